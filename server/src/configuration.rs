// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{
    DEFAULT_PORT, SECRET_HEADER_NAME, SECRET_HEADER_VALUE, SECRETS_FILE_FORMAT, SECRETS_FILE_PATH,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ServerOptions {
    #[arg(long, default_value_t = DEFAULT_PORT, env("SECRETS_PORT"))]
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        ServerOptions { port: DEFAULT_PORT }
    }
}

/// Location and format tag of the encrypted document handed to the decryptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub path: PathBuf,
    pub format: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            path: PathBuf::from(SECRETS_FILE_PATH),
            format: SECRETS_FILE_FORMAT.to_string(),
        }
    }
}

/// Everything the request gate and resolver need, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretsConfig {
    pub document: DocumentConfig,
    pub header_name: String,
    pub header_value: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        SecretsConfig {
            document: DocumentConfig::default(),
            header_name: SECRET_HEADER_NAME.to_string(),
            header_value: SECRET_HEADER_VALUE.to_string(),
        }
    }
}
