// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service descriptor model for `funcenv.toml`.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! keys at startup with actionable diagnostics. The descriptor doubles as
//! the standalone implementation of [`ServiceModel`] when Funcenv runs
//! from its own CLI rather than inside a host framework.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use funcenv_core::{EnvMap, FuncenvError, ServiceModel};

use crate::settings::SettingsSource;

/// Top-level service descriptor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDescriptor {
    /// Service identity.
    #[serde(default)]
    pub service: ServiceSection,

    /// Deployment provider settings, including the provider-level
    /// environment block that may hold symbolic references.
    #[serde(default)]
    pub provider: ProviderSection,

    /// Deployable functions keyed by short name.
    #[serde(default)]
    pub functions: BTreeMap<String, FunctionSection>,

    /// Stage settings: explicit stage-to-INI mapping or autoload form.
    #[serde(default)]
    pub settings: Option<SettingsSource>,

    /// Provider bridge endpoint used for remote updates.
    #[serde(default)]
    pub gateway: GatewaySection,
}

/// The `[service]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Service name, embedded in every fully-qualified function name.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Stage used when no `--stage` option is supplied.
    #[serde(default = "default_stage")]
    pub stage: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            stage: default_stage(),
        }
    }
}

fn default_service_name() -> String {
    "service".to_string()
}

fn default_stage() -> String {
    "dev".to_string()
}

/// The `[provider]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Deployment region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Provider-level environment block. Values are either plain strings
    /// or symbolic references (`{ Ref = ... }`, `{ "Fn::Join" = ... }`).
    #[serde(default)]
    pub environment: BTreeMap<String, Value>,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            region: default_region(),
            environment: BTreeMap::new(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// One `[functions.<name>]` entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionSection {
    /// Handler identifier, informational only for this plugin.
    #[serde(default)]
    pub handler: Option<String>,

    /// Environment variables already declared on the function.
    #[serde(default)]
    pub environment: EnvMap,
}

/// The `[gateway]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    /// Base URL of the host's provider bridge.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:4001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ServiceModel for ServiceDescriptor {
    fn service_name(&self) -> &str {
        &self.service.name
    }

    fn default_stage(&self) -> &str {
        &self.service.stage
    }

    fn function_names(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }

    fn function_environment(&self, name: &str) -> Option<EnvMap> {
        self.functions.get(name).map(|f| f.environment.clone())
    }

    fn set_function_environment(&mut self, name: &str, env: EnvMap) -> Result<(), FuncenvError> {
        match self.functions.get_mut(name) {
            Some(function) => {
                function.environment = env;
                Ok(())
            }
            None => Err(FuncenvError::FunctionUnknown {
                name: name.to_string(),
            }),
        }
    }

    fn provider_environment(&self) -> BTreeMap<String, Value> {
        self.provider.environment.clone()
    }

    fn set_provider_variable(&mut self, key: &str, value: String) {
        self.provider
            .environment
            .insert(key.to_string(), Value::String(value));
    }
}
