// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Parser for decrypted `.env` style documents.
//!
//! ```text
//! # comment
//! KEY=value
//! QUOTED="value with spaces"
//! ```
//!
//! Parsing never fails. Lines without `=` are skipped and reported as
//! [`ParseWarning`]s; a later duplicate key replaces an earlier one.

use std::collections::HashMap;

use zeroize::Zeroize;

/// A skipped line, identified by its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
}

/// Key/value pairs built from one decrypted document.
///
/// Values are zeroized when the map is dropped.
#[derive(Debug, Default)]
pub struct SecretMap {
    entries: HashMap<String, String>,
    warnings: Vec<ParseWarning>,
}

impl SecretMap {
    pub fn parse(plaintext: &[u8]) -> Self {
        let mut map = SecretMap::default();
        let text = String::from_utf8_lossy(plaintext);

        for (index, line) in text.split('\n').enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                let warning = ParseWarning { line: index + 1 };
                tracing::warn!(
                    "[parser] skipping a malformed line {} in decrypted ENV file",
                    warning.line
                );
                map.warnings.push(warning);
                continue;
            };

            let value = strip_quotes(value.trim());
            map.entries.insert(key.trim().to_string(), value.to_string());
        }

        map
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
}

impl Drop for SecretMap {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

/// Removes one matched pair of surrounding double quotes.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
