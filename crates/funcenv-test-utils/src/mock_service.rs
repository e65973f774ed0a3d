// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock service model for deterministic testing.
//!
//! `MockServiceModel` implements `ServiceModel` over plain in-memory maps,
//! enabling fast, CI-runnable tests without a host framework.

use std::collections::BTreeMap;

use serde_json::Value;

use funcenv_core::{EnvMap, FuncenvError, ServiceModel};

/// An in-memory service model with configurable functions and provider
/// environment.
#[derive(Debug, Clone)]
pub struct MockServiceModel {
    service_name: String,
    stage: String,
    functions: BTreeMap<String, EnvMap>,
    provider_environment: BTreeMap<String, Value>,
}

impl MockServiceModel {
    /// Create a model named `svc` on stage `dev` with no functions.
    pub fn new() -> Self {
        Self {
            service_name: "svc".to_string(),
            stage: "dev".to_string(),
            functions: BTreeMap::new(),
            provider_environment: BTreeMap::new(),
        }
    }

    /// Override the service name.
    pub fn with_service_name(mut self, name: &str) -> Self {
        self.service_name = name.to_string();
        self
    }

    /// Add a function with an empty declared environment.
    pub fn with_function(mut self, name: &str) -> Self {
        self.functions.insert(name.to_string(), EnvMap::new());
        self
    }

    /// Add a function with a declared environment.
    pub fn with_function_env(mut self, name: &str, env: &[(&str, &str)]) -> Self {
        self.functions.insert(
            name.to_string(),
            env.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Add a provider-level environment entry.
    pub fn with_provider_variable(mut self, key: &str, value: Value) -> Self {
        self.provider_environment.insert(key.to_string(), value);
        self
    }
}

impl Default for MockServiceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceModel for MockServiceModel {
    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn default_stage(&self) -> &str {
        &self.stage
    }

    fn function_names(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }

    fn function_environment(&self, name: &str) -> Option<EnvMap> {
        self.functions.get(name).cloned()
    }

    fn set_function_environment(&mut self, name: &str, env: EnvMap) -> Result<(), FuncenvError> {
        match self.functions.get_mut(name) {
            Some(slot) => {
                *slot = env;
                Ok(())
            }
            None => Err(FuncenvError::FunctionUnknown {
                name: name.to_string(),
            }),
        }
    }

    fn provider_environment(&self) -> BTreeMap<String, Value> {
        self.provider_environment.clone()
    }

    fn set_provider_variable(&mut self, key: &str, value: String) {
        self.provider_environment
            .insert(key.to_string(), Value::String(value));
    }
}
