// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Funcenv environment pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the Funcenv crates.
///
/// File-level errors are fatal to the operation that triggered the load;
/// gateway errors are caught and logged at the call site and never escape
/// the update operations.
#[derive(Debug, Error)]
pub enum FuncenvError {
    /// A stage configuration file is missing or unreadable. Fatal to the
    /// load attempt that requested it.
    #[error("can not find config file \"{}\"", path.display())]
    ConfigNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration errors (malformed INI, bad descriptor values,
    /// unsupported value shapes).
    #[error("configuration error: {0}")]
    Config(String),

    /// A section or command named a function absent from the host's
    /// function set.
    #[error("function `{name}` does not exist")]
    FunctionUnknown { name: String },

    /// A `Ref` target matched no pseudo-parameter and no deployed resource.
    #[error("unresolved reference `{logical_id}`")]
    UnresolvedReference { logical_id: String },

    /// Fetching the deployed resource inventory failed; the reference
    /// resolution pass is skipped entirely when this occurs.
    #[error("resource inventory fetch failed: {message}")]
    InventoryFetch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A remote gateway call was rejected (update, identity query).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
