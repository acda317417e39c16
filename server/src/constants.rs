// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8181;

/// Callers must send this header with [`SECRET_HEADER_VALUE`] to be served.
pub const SECRET_HEADER_NAME: &str = "X-Secret-Request";
pub const SECRET_HEADER_VALUE: &str = "true";

/// SOPS encrypted document, mounted into the container at build time
pub const SECRETS_FILE_PATH: &str = "/app/secrets.env";
pub const SECRETS_FILE_FORMAT: &str = "env";

pub const SOPS_BINARY: &str = "sops";
