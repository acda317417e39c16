// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Decryption of the encrypted secrets document.
//!
//! The resolver only depends on the [`Decryptor`] trait. Production uses
//! [`SopsDecryptor`], which shells out to the `sops` binary; key resolution
//! (KMS, age, PGP) is entirely up to sops and its own configuration.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use zeroize::Zeroizing;

use crate::constants::SOPS_BINARY;
use crate::errors::DecryptError;

/// Produces plaintext bytes from an encrypted document.
///
/// Implementations are shared between concurrent requests and must be
/// safe to call reentrantly.
#[async_trait]
pub trait Decryptor: Send + Sync {
    async fn decrypt(
        &self,
        location: &Path,
        format: &str,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError>;
}

/// Runs `sops --decrypt` as a child process for every call.
#[derive(Debug, Clone)]
pub struct SopsDecryptor {
    binary: PathBuf,
}

impl Default for SopsDecryptor {
    fn default() -> Self {
        Self::new(SOPS_BINARY)
    }
}

impl SopsDecryptor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

/// Maps a document format tag onto the sops `--input-type` name.
fn sops_type(format: &str) -> &str {
    match format {
        "env" | "dotenv" => "dotenv",
        other => other,
    }
}

#[async_trait]
impl Decryptor for SopsDecryptor {
    #[tracing::instrument(skip(self))]
    async fn decrypt(
        &self,
        location: &Path,
        format: &str,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        let file_type = sops_type(format);

        let output = Command::new(&self.binary)
            .arg("--decrypt")
            .args(["--input-type", file_type])
            .args(["--output-type", file_type])
            .arg(location)
            .kill_on_drop(true)
            .output()
            .await?;

        let stdout = Zeroizing::new(output.stdout);

        if !output.status.success() {
            return Err(DecryptError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(output.stderr.as_slice()).to_string(),
            });
        }

        tracing::debug!("[sops] decrypted {} bytes", stdout.len());

        Ok(stdout)
    }
}
