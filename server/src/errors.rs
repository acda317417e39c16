// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

/// Failure reported by a [`Decryptor`](crate::decryptor::Decryptor).
///
/// The details are for logs only and never reach an HTTP response body.
#[derive(thiserror::Error, Debug)]
pub enum DecryptError {
    #[error("unable to run decryption command: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("decryption command failed: {code:?} {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("key '{0}' not found in decrypted secrets file")]
    NotFound(String),
    #[error(transparent)]
    Decrypt(#[from] DecryptError),
}

/// Terminal states of the request gate that are not a successful lookup.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AppError {
    #[error("missing or invalid header")]
    Unauthorized,
    #[error("secret key not specified in path")]
    KeyNotSpecified,
    #[error("secret not found")]
    NotFound,
    #[error("internal server error")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Missing or invalid header"),
            Self::KeyNotSpecified => (StatusCode::NOT_FOUND, "Secret key not specified in path"),
            Self::NotFound => (StatusCode::NOT_FOUND, "404 page not found"),
            Self::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve secret")
            }
        };

        (status, [(CONTENT_TYPE, "text/plain")], message).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(source: ResolveError) -> Self {
        match source {
            ResolveError::NotFound(key) => {
                tracing::warn!("[gate] key '{}' not found", key);
                AppError::NotFound
            }
            ResolveError::Decrypt(e) => {
                tracing::error!("[gate] failed to get secret: {}", e);
                AppError::InternalServerError
            }
        }
    }
}
