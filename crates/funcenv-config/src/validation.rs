// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for the service descriptor.
//!
//! Validates semantic constraints serde attributes cannot express: name
//! charsets (they end up inside fully-qualified function names), endpoint
//! shape, and that every provider-environment value parses under the
//! symbolic reference grammar.

use funcenv_core::SymbolicReference;

use crate::diagnostic::ConfigError;
use crate::model::ServiceDescriptor;

/// Validate a deserialized descriptor for semantic correctness.
///
/// Collects every failure rather than stopping at the first.
pub fn validate_descriptor(descriptor: &ServiceDescriptor) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if descriptor.service.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "service.name must not be empty".to_string(),
        });
    } else if !is_name_safe(&descriptor.service.name) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.name `{}` may only contain alphanumerics and dashes",
                descriptor.service.name
            ),
        });
    }

    if descriptor.service.stage.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "service.stage must not be empty".to_string(),
        });
    }

    for name in descriptor.functions.keys() {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "function names must not be empty".to_string(),
            });
        } else if !is_name_safe(name) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "function name `{name}` may only contain alphanumerics and dashes"
                ),
            });
        }
    }

    if !descriptor.gateway.endpoint.starts_with("http://")
        && !descriptor.gateway.endpoint.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "gateway.endpoint `{}` must be an http(s) URL",
                descriptor.gateway.endpoint
            ),
        });
    }

    if descriptor.gateway.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.timeout_secs must be at least 1".to_string(),
        });
    }

    for (key, value) in &descriptor.provider.environment {
        if let Err(e) = SymbolicReference::parse(value) {
            errors.push(ConfigError::Validation {
                message: format!("provider.environment.{key}: {e}"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn is_name_safe(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
