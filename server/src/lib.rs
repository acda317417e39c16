// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # Secret Server
//!
//! A small HTTP endpoint that serves individual keys out of a SOPS encrypted
//! `.env` document.
//!
//! ## Architecture
//!
//! ```text
//! Client -> HTTP gate -> resolver -> sops --decrypt -> .env parser -> value
//! ```
//!
//! Every request decrypts and parses the document from scratch. Nothing is
//! cached and no state is shared between requests beyond the configuration.
//!
//! ## Modules
//!
//! - [`application`]: Axum router and listener setup
//! - [`configuration`]: CLI/environment options and injectable gate config
//! - [`constants`]: Fixed document location, header and defaults
//! - [`decryptor`]: The [`Decryptor`](decryptor::Decryptor) trait and the `sops` implementation
//! - [`errors`]: Error types with HTTP response mapping
//! - [`parser`]: `.env` document parsing
//! - [`resolver`]: Decrypt, parse and look up a single key
//! - [`routes`]: Header check, key extraction and the catch-all handler
//!
//! ## Usage
//!
//! ```bash
//! curl -H 'X-Secret-Request: true' http://localhost:8181/DB_PASSWORD
//! ```
//!
//! ## Security Considerations
//!
//! - Decrypted plaintext and parsed values are zeroized on drop
//! - Error responses never include the decryption failure cause
//! - There is no timeout on the `sops` call; a hung child blocks its request

pub mod application;
pub mod configuration;
pub mod constants;
pub mod decryptor;
pub mod errors;
pub mod parser;
pub mod resolver;
pub mod routes;
