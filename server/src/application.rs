// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use crate::configuration::{SecretsConfig, ServerOptions};
use crate::constants;
use crate::decryptor::Decryptor;
use crate::resolver::SecretResolver;
use crate::routes;
use axum::Router;
use axum::serve::Serve;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct AppState {
    pub config: SecretsConfig,
    pub resolver: SecretResolver,
}

impl AppState {
    pub fn new(config: SecretsConfig, decryptor: Arc<dyn Decryptor>) -> Self {
        let resolver = SecretResolver::new(decryptor, config.document.clone());
        Self { config, resolver }
    }
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(options: ServerOptions, state: AppState) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", constants::DEFAULT_HOST, options.port);
        let listener = TcpListener::bind(address).await?;
        let server = run(listener, state)?;
        let port = server.local_addr()?.port();

        tracing::info!(
            "[server] listening at http://{}:{}",
            constants::DEFAULT_HOST,
            port
        );

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Routes every method and path to the secret gate.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(routes::get_secret)
        .with_state(Arc::new(state))
}

#[tracing::instrument(skip(listener, state))]
pub fn run(
    listener: TcpListener,
    state: AppState,
) -> Result<Serve<TcpListener, Router, Router>, std::io::Error> {
    Ok(axum::serve(listener, create_router(state)))
}
