// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! HTTP request gate for secret lookups.
//!
//! Every method and path is routed to [`get_secret`]:
//!
//! | Condition | Status |
//! |-----------|--------|
//! | header missing or wrong | 401 |
//! | empty key | 404 |
//! | unknown key | 404 |
//! | decryption failure | 500 |
//! | success | 200, value as `text/plain` |

use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Uri};
use axum::response::IntoResponse;

use crate::application::AppState;
use crate::configuration::SecretsConfig;
use crate::errors::AppError;

/// Checks the request header against the configured literal.
///
/// Only the first value is considered and the comparison is exact.
pub fn authorize(headers: &HeaderMap, config: &SecretsConfig) -> Result<(), AppError> {
    let value = headers
        .get(config.header_name.as_str())
        .and_then(|v| v.to_str().ok());

    match value {
        Some(v) if v == config.header_value => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Derives the lookup key from a request path.
pub fn extract_key(path: &str) -> Result<Cow<'_, str>, AppError> {
    let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));

    let key = match decoded {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim_matches('/')),
        Cow::Owned(s) => Cow::Owned(s.trim_matches('/').to_string()),
    };

    if key.is_empty() {
        return Err(AppError::KeyNotSpecified);
    }

    Ok(key)
}

/// Returns the value for the key named by the request path.
///
/// # Errors
///
/// - [`AppError::Unauthorized`] - header check failed, nothing is decrypted
/// - [`AppError::KeyNotSpecified`] - path is empty after trimming `/`
/// - [`AppError::NotFound`] - key absent from the document
/// - [`AppError::InternalServerError`] - decryption failed
#[tracing::instrument(skip(state, headers))]
pub async fn get_secret(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<impl IntoResponse, AppError> {
    authorize(&headers, &state.config).inspect_err(|_| {
        tracing::warn!("[gate] rejected request with missing or invalid header");
    })?;

    let key = extract_key(uri.path())?;

    let value = state.resolver.resolve(&key).await?;

    tracing::debug!("[gate] served secret for key '{}'", key);

    Ok(([(CONTENT_TYPE, "text/plain")], value))
}
