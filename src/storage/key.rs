// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Storage key derivation for uploaded images

use rand::Rng;

pub const DEFAULT_EXTENSION: &str = "jpg";

const SUFFIX_LEN: usize = 13;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_EXTENSION_LEN: usize = 10;

/// Object key under the owning user's prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    /// Full key: `<user id>/<file name>`
    pub path: String,
    /// Generated file name: `<millis>-<suffix>.<ext>`
    pub file_name: String,
}

impl StorageKey {
    /// Derive a key from explicit parts
    pub fn derive(user_id: &str, original_name: Option<&str>, timestamp_ms: i64, suffix: &str) -> Self {
        let file_name = format!("{}-{}.{}", timestamp_ms, suffix, file_extension(original_name));
        Self {
            path: format!("{}/{}", user_id, file_name),
            file_name,
        }
    }

    /// Derive a fresh key using the current time and a random suffix
    pub fn generate(user_id: &str, original_name: Option<&str>) -> Self {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let suffix = random_suffix(&mut rand::thread_rng());
        Self::derive(user_id, original_name, timestamp_ms, &suffix)
    }
}

/// Lowercase base-36 suffix
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// Extension of the original file name, restricted to ASCII alphanumerics.
///
/// Names without a usable extension map to `jpg`.
pub fn file_extension(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| {
            ext.chars()
                .filter(char::is_ascii_alphanumeric)
                .take(MAX_EXTENSION_LEN)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
