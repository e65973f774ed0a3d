// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness assembling the plugin with mock capabilities.
//!
//! `PluginHarness` wires a `MockServiceModel`, `MockGateway`, `MemoryEnv`,
//! and a temp-dir stage INI file into a constructed `EnvPlugin`, keeping
//! handles to every mock so tests can drive hooks and then assert on the
//! recorded effects.

use std::sync::Arc;

use tokio::sync::RwLock;

use funcenv_core::{FuncenvError, ServiceModel};
use funcenv_plugin::{EnvPlugin, PluginOptions};

use crate::memory_env::MemoryEnv;
use crate::mock_gateway::MockGateway;
use crate::mock_service::MockServiceModel;

/// Builder for creating plugin test environments.
pub struct PluginHarnessBuilder {
    ini: String,
    stage: String,
    target_function: Option<String>,
    service: MockServiceModel,
    gateway: MockGateway,
}

impl PluginHarnessBuilder {
    fn new() -> Self {
        Self {
            ini: String::new(),
            stage: "dev".to_string(),
            target_function: None,
            service: MockServiceModel::new(),
            gateway: MockGateway::new(),
        }
    }

    /// Content of the active stage's INI file.
    pub fn with_ini(mut self, content: &str) -> Self {
        self.ini = content.to_string();
        self
    }

    /// Active stage name (also names the INI file).
    pub fn with_stage(mut self, stage: &str) -> Self {
        self.stage = stage.to_string();
        self
    }

    /// Target function for the single-function update command.
    pub fn with_target_function(mut self, name: &str) -> Self {
        self.target_function = Some(name.to_string());
        self
    }

    /// Replace the service model wholesale.
    pub fn with_service(mut self, service: MockServiceModel) -> Self {
        self.service = service;
        self
    }

    /// Add a function with an empty declared environment.
    pub fn with_function(mut self, name: &str) -> Self {
        self.service = self.service.with_function(name);
        self
    }

    /// Add a function with a declared environment.
    pub fn with_function_env(mut self, name: &str, env: &[(&str, &str)]) -> Self {
        self.service = self.service.with_function_env(name, env);
        self
    }

    /// Add a provider-level environment entry.
    pub fn with_provider_variable(mut self, key: &str, value: serde_json::Value) -> Self {
        self.service = self.service.with_provider_variable(key, value);
        self
    }

    /// Replace the gateway wholesale.
    pub fn with_gateway(mut self, gateway: MockGateway) -> Self {
        self.gateway = gateway;
        self
    }

    /// Build the harness, writing the stage INI file into a temp dir and
    /// constructing the plugin against the mocks.
    pub async fn build(self) -> Result<PluginHarness, FuncenvError> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| FuncenvError::Internal(format!("temp dir unavailable: {e}")))?;
        let ini_path = temp_dir.path().join(format!("{}.ini", self.stage));
        std::fs::write(&ini_path, &self.ini).map_err(|source| FuncenvError::ConfigNotFound {
            path: ini_path.clone(),
            source,
        })?;

        let service = Arc::new(RwLock::new(self.service));
        let gateway = Arc::new(self.gateway);
        let env = Arc::new(MemoryEnv::new());

        let service_model: Arc<RwLock<dyn ServiceModel>> = service.clone();
        let plugin = EnvPlugin::new(
            service_model,
            gateway.clone(),
            env.clone(),
            None,
            PluginOptions {
                stage: Some(self.stage.clone()),
                function: self.target_function,
                base_dir: Some(temp_dir.path().to_path_buf()),
            },
        )
        .await?;

        Ok(PluginHarness {
            plugin,
            service,
            gateway,
            env,
            temp_dir,
            stage: self.stage,
        })
    }
}

/// A constructed plugin plus handles to all of its mocks.
pub struct PluginHarness {
    pub plugin: EnvPlugin,
    pub service: Arc<RwLock<MockServiceModel>>,
    pub gateway: Arc<MockGateway>,
    pub env: Arc<MemoryEnv>,
    temp_dir: tempfile::TempDir,
    stage: String,
}

impl PluginHarness {
    pub fn builder() -> PluginHarnessBuilder {
        PluginHarnessBuilder::new()
    }

    /// Rewrite the active stage's INI file on disk, for tests of the
    /// read-then-write update behavior.
    pub fn rewrite_ini(&self, content: &str) -> std::io::Result<()> {
        std::fs::write(
            self.temp_dir.path().join(format!("{}.ini", self.stage)),
            content,
        )
    }

    /// Delete the active stage's INI file on disk.
    pub fn remove_ini(&self) -> std::io::Result<()> {
        std::fs::remove_file(self.temp_dir.path().join(format!("{}.ini", self.stage)))
    }
}
