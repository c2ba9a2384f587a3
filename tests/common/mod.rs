// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared collaborator doubles for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use flux_studio::api::AppState;
use flux_studio::auth::{AuthError, AuthenticatedUser, IdentityProvider};
use flux_studio::diffusion::{
    GenerationService, Prediction, PredictionBackend, PredictionError, PredictionInput,
};
use flux_studio::storage::{
    MetadataError, MetadataOutcome, ObjectStorage, PutObject, StorageError, UploadRecord,
    UploadRecorder, UploadService, UploadSettings,
};

pub const TEST_TOKEN: &str = "r8_test_token";
pub const USER_TOKEN: &str = "user-access-token";
pub const USER_ID: &str = "0b4f7c1e-5a1d-4c55-9a57-2f3c4d5e6f70";

// ============================================================================
// Model backend
// ============================================================================

#[derive(Clone)]
pub enum BackendReply {
    Prediction(Value),
    Status(u16, String),
    Transport(String),
}

pub struct MockBackend {
    reply: BackendReply,
    pub calls: AtomicUsize,
    pub last_call: Mutex<Option<(String, PredictionInput)>>,
}

impl MockBackend {
    pub fn returning(prediction: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: BackendReply::Prediction(prediction),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        })
    }

    pub fn replying(reply: BackendReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<PredictionInput> {
        self.last_call.lock().unwrap().as_ref().map(|(_, input)| input.clone())
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_call.lock().unwrap().as_ref().map(|(token, _)| token.clone())
    }
}

#[async_trait]
impl PredictionBackend for MockBackend {
    async fn create_prediction(
        &self,
        api_token: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((api_token.to_string(), input.clone()));
        match &self.reply {
            BackendReply::Prediction(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
            BackendReply::Status(status, message) => Err(PredictionError::Status {
                status: *status,
                message: message.clone(),
            }),
            BackendReply::Transport(message) => Err(PredictionError::Transport(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock/flux"
    }
}

// ============================================================================
// Object storage
// ============================================================================

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub len: usize,
    pub content_type: String,
    pub cache_control: String,
    pub upsert: bool,
}

#[derive(Default)]
pub struct MockStorage {
    pub fail: bool,
    pub objects: Mutex<Vec<StoredObject>>,
}

impl MockStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn stored(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn put_object(&self, object: PutObject<'_>) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Rejected {
                status: 500,
                message: "bucket unavailable".to_string(),
            });
        }
        self.objects.lock().unwrap().push(StoredObject {
            key: object.key.to_string(),
            len: object.bytes.len(),
            content_type: object.content_type.to_string(),
            cache_control: object.cache_control.to_string(),
            upsert: object.upsert,
        });
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/ai-images/{}", key)
    }
}

// ============================================================================
// Metadata recorder
// ============================================================================

#[derive(Clone, Copy)]
pub enum RecorderMode {
    Record,
    NoCustomer,
    Fail,
}

pub struct MockRecorder {
    mode: RecorderMode,
    pub records: Mutex<Vec<(String, UploadRecord)>>,
}

impl MockRecorder {
    pub fn new(mode: RecorderMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<(String, UploadRecord)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadRecorder for MockRecorder {
    async fn record(
        &self,
        user: &AuthenticatedUser,
        record: &UploadRecord,
    ) -> Result<MetadataOutcome, MetadataError> {
        match self.mode {
            RecorderMode::Record => {
                self.records
                    .lock()
                    .unwrap()
                    .push((user.id.clone(), record.clone()));
                Ok(MetadataOutcome::Recorded)
            }
            RecorderMode::NoCustomer => Ok(MetadataOutcome::Skipped),
            RecorderMode::Fail => Err(MetadataError::Insert("relation does not exist".to_string())),
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

pub struct MockIdentity {
    users: HashMap<String, AuthenticatedUser>,
}

impl MockIdentity {
    pub fn with_user(token: &str, user_id: &str) -> Arc<Self> {
        let mut users = HashMap::new();
        users.insert(
            token.to_string(),
            AuthenticatedUser {
                id: user_id.to_string(),
                email: Some("visitor@example.com".to_string()),
            },
        );
        Arc::new(Self { users })
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

pub fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: USER_ID.to_string(),
        email: None,
    }
}

// ============================================================================
// App state builders
// ============================================================================

pub struct TestHarness {
    pub backend: Arc<MockBackend>,
    pub storage: Arc<MockStorage>,
    pub recorder: Arc<MockRecorder>,
    pub state: AppState,
}

impl TestHarness {
    pub fn new(backend: Arc<MockBackend>, api_token: Option<&str>) -> Self {
        Self::with_parts(
            backend,
            api_token,
            MockStorage::new(),
            MockRecorder::new(RecorderMode::Record),
        )
    }

    pub fn with_parts(
        backend: Arc<MockBackend>,
        api_token: Option<&str>,
        storage: Arc<MockStorage>,
        recorder: Arc<MockRecorder>,
    ) -> Self {
        let generation = GenerationService::new(backend.clone(), api_token.map(str::to_string));
        let uploads = UploadService::new(
            storage.clone(),
            recorder.clone(),
            UploadSettings::default(),
        );
        let state = AppState {
            generation: Arc::new(generation),
            uploads: Arc::new(uploads),
            identity: MockIdentity::with_user(USER_TOKEN, USER_ID),
        };
        Self {
            backend,
            storage,
            recorder,
            state,
        }
    }

    pub fn app(&self) -> Router {
        flux_studio::api::create_app(self.state.clone())
    }
}

// ============================================================================
// HTTP helpers
// ============================================================================

pub const BOUNDARY: &str = "----fluxstudiotestboundary";

/// Build a multipart body with a single file field
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve a router on an ephemeral local port; returns its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
