// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Funcenv environment pipeline.
//!
//! Two halves, matching the two inputs of the system:
//!
//! - the **stage INI pipeline**: settings table, document loading, value
//!   coercion, and two-tier environment resolution;
//! - the **service descriptor**: TOML parsing with strict validation
//!   (`deny_unknown_fields`), `FUNCENV_*` overrides, and miette diagnostic
//!   rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use funcenv_config::load_and_validate;
//!
//! let descriptor = load_and_validate().expect("config errors");
//! println!("service: {}", descriptor.service.name);
//! ```

pub mod coerce;
pub mod diagnostic;
pub mod document;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod settings;
pub mod validation;

pub use coerce::{to_config_scalar, to_system_scalar};
pub use diagnostic::{ConfigError, render_errors};
pub use document::{ConfigDocument, load_document};
pub use loader::{load_descriptor, load_descriptor_from_path, load_descriptor_from_str};
pub use model::ServiceDescriptor;
pub use resolver::{resolve_environments, split_function_names, suggest_function_name};
pub use settings::{AutoloadEntry, SettingsSource, SettingsTable};

/// Load the descriptor from the working directory and validate it.
///
/// 1. Loads `funcenv.toml` + env overrides via Figment.
/// 2. On success: runs post-deserialization validation.
/// 3. On Figment error: converts to miette diagnostics with typo
///    suggestions.
pub fn load_and_validate() -> Result<ServiceDescriptor, Vec<ConfigError>> {
    finish(loader::load_descriptor())
}

/// Load the descriptor from an explicit path and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<ServiceDescriptor, Vec<ConfigError>> {
    finish(loader::load_descriptor_from_path(path))
}

/// Load the descriptor from TOML text and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<ServiceDescriptor, Vec<ConfigError>> {
    finish(loader::load_descriptor_from_str(toml_content))
}

fn finish(
    loaded: Result<ServiceDescriptor, figment::Error>,
) -> Result<ServiceDescriptor, Vec<ConfigError>> {
    match loaded {
        Ok(descriptor) => {
            validation::validate_descriptor(&descriptor)?;
            Ok(descriptor)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
