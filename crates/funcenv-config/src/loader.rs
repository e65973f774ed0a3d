// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service descriptor loader using Figment for layered merging.
//!
//! Merge order: compiled defaults, then `./funcenv.toml`, then `FUNCENV_*`
//! environment variable overrides. The descriptor is service-local: it
//! travels with the project the way the stage INI files do.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ServiceDescriptor;

/// Default descriptor file name, looked up in the working directory.
pub const DESCRIPTOR_FILE: &str = "funcenv.toml";

/// Load the descriptor from the working directory with env overrides.
pub fn load_descriptor() -> Result<ServiceDescriptor, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ServiceDescriptor::default()))
        .merge(Toml::file(DESCRIPTOR_FILE))
        .merge(env_provider())
        .extract()
}

/// Load the descriptor from an explicit path with env overrides.
pub fn load_descriptor_from_path(path: &Path) -> Result<ServiceDescriptor, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ServiceDescriptor::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load the descriptor from TOML text only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_descriptor_from_str(toml_content: &str) -> Result<ServiceDescriptor, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ServiceDescriptor::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys containing
/// underscores stay intact: `FUNCENV_GATEWAY_TIMEOUT_SECS` must map to
/// `gateway.timeout_secs`, not `gateway.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("FUNCENV_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("service_", "service.", 1)
            .replacen("provider_", "provider.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
