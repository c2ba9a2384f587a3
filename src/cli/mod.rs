// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod client;
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use client::StudioClient;

/// Flux Studio CLI
#[derive(Parser, Debug)]
#[command(name = "flux-studio-cli")]
#[command(version)]
#[command(about = "Upload images and run generations against a Flux Studio gateway", long_about = None)]
pub struct Cli {
    /// Gateway base URL
    #[arg(long, global = true, env = "FLUX_STUDIO_URL", default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Access token of the signed-in user (needed for uploads)
    #[arg(long, global = true, env = "FLUX_STUDIO_TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an image and print its public URL
    Upload(commands::UploadArgs),

    /// Generate an image, optionally from an uploaded input image
    Generate(commands::GenerateArgs),

    /// List supported output formats and aspect ratios
    Options,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let client = StudioClient::new(&cli.server, cli.token);
    match cli.command {
        Commands::Upload(args) => commands::upload(&client, args).await,
        Commands::Generate(args) => commands::generate(&client, args).await,
        Commands::Options => commands::options(&client).await,
    }
}
