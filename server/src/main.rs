// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use clap::Parser;
use secret_server::application::{AppState, Application};
use secret_server::configuration::{SecretsConfig, ServerOptions};
use secret_server::decryptor::SopsDecryptor;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        .with_ansi(false)
        // container runtimes add their own ingestion time.
        .without_time()
        .with_target(false)
        .init();

    // get configuration options from environment variables
    let options = ServerOptions::parse();

    tracing::info!("[server] {:?}", &options);

    let config = SecretsConfig::default();
    tracing::info!(
        "[server] serving secrets from {}",
        config.document.path.display()
    );

    let state = AppState::new(config, Arc::new(SopsDecryptor::default()));
    let application = Application::build(options, state).await?;

    application.run_until_stopped().await?;

    Ok(())
}
