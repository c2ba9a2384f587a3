// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::client::StudioClient;
use crate::api::GenerateImageRequest;
use crate::diffusion::{AspectRatio, GenerationStatus};

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Image file to upload
    #[arg(long)]
    pub file: PathBuf,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Transformation prompt
    #[arg(long)]
    pub prompt: String,

    /// Optional input image, uploaded before generation
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// jpg, png or webp
    #[arg(long)]
    pub output_format: Option<String>,

    /// e.g. 16:9 (default 1:1); ignored with --image, which matches the input
    #[arg(long)]
    pub aspect_ratio: Option<String>,

    /// Where to save the generated image
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn upload(client: &StudioClient, args: UploadArgs) -> Result<()> {
    let uploaded = client.upload(&args.file).await?;
    println!("{}", serde_json::to_string_pretty(&uploaded)?);
    Ok(())
}

pub async fn generate(client: &StudioClient, args: GenerateArgs) -> Result<()> {
    let input_image = match &args.image {
        Some(path) => {
            let uploaded = client.upload(path).await?;
            info!("Uploaded input image to {}", uploaded.url);
            Some(uploaded.url)
        }
        None => None,
    };

    let out = args.out.clone();
    let request = generation_request(args, input_image);
    let result = client.generate(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let (Some(dest), GenerationStatus::Succeeded, Some(url)) =
        (&out, result.status, result.output.as_deref())
    {
        let written = client.download(url, dest).await?;
        info!("Saved {} bytes to {}", written, dest.display());
    }
    Ok(())
}

/// Build the request the way the web widget does: an input image always
/// uses `match_input_image`, otherwise the chosen ratio is sent.
pub fn generation_request(args: GenerateArgs, input_image: Option<String>) -> GenerateImageRequest {
    let aspect_ratio = match input_image {
        Some(_) => Some(AspectRatio::MatchInputImage.as_str().to_string()),
        None => args.aspect_ratio,
    };
    GenerateImageRequest {
        prompt: Some(args.prompt),
        input_image,
        output_format: args.output_format,
        aspect_ratio,
    }
}

pub async fn options(client: &StudioClient) -> Result<()> {
    let options = client.options().await?;
    println!("Output formats:");
    for f in &options.output_formats {
        println!("  {:<18} {:<18} {}", f.value, f.label, f.description);
    }
    println!("Aspect ratios:");
    for r in &options.aspect_ratios {
        println!("  {:<18} {:<18} {}", r.value, r.label, r.description);
    }
    Ok(())
}
