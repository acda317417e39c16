// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::sync::Arc;

use crate::configuration::DocumentConfig;
use crate::decryptor::Decryptor;
use crate::errors::ResolveError;
use crate::parser::SecretMap;

/// Looks up a single key in the encrypted document.
///
/// Nothing is cached: every call decrypts and parses the document again,
/// so a lookup always reflects the document currently on disk.
#[derive(Clone)]
pub struct SecretResolver {
    decryptor: Arc<dyn Decryptor>,
    document: DocumentConfig,
}

impl SecretResolver {
    pub fn new(decryptor: Arc<dyn Decryptor>, document: DocumentConfig) -> Self {
        Self {
            decryptor,
            document,
        }
    }

    /// Decrypts the document and returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Decrypt`] - the decryptor failed, not retried
    /// - [`ResolveError::NotFound`] - the document has no such key
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, key: &str) -> Result<String, ResolveError> {
        let plaintext = self
            .decryptor
            .decrypt(&self.document.path, &self.document.format)
            .await?;

        let secrets = SecretMap::parse(&plaintext);

        tracing::debug!(
            "[resolver] parsed {} entries, skipped {} lines",
            secrets.len(),
            secrets.warnings().len()
        );

        secrets
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::NotFound(key.to_string()))
    }
}
