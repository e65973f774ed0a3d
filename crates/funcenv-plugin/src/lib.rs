// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Funcenv plugin: lifecycle hooks, environment loading, reference
//! resolution, and remote updates.
//!
//! The plugin is constructed against three capabilities supplied by the
//! host (a [`ServiceModel`], a [`CloudGateway`], and an [`EnvSink`]) and
//! never assumes a concrete implementation of any of them. Construction
//! builds the stage settings table and immediately loads the active
//! stage's environments into the service model, the same work the host
//! would trigger at startup.

pub mod hooks;
pub mod manifest;
pub mod merge;
pub mod refs;
pub mod update;

pub use hooks::HookEvent;
pub use manifest::{
    CommandOption, CommandSpec, PluginManifest, builtin_manifest, command_manifest,
    parse_plugin_manifest,
};
pub use merge::merge_config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use funcenv_config::{
    SettingsSource, SettingsTable, load_document, resolve_environments, split_function_names,
    suggest_function_name,
};
use funcenv_core::{CloudGateway, EnvSink, FuncenvError, ServiceModel};

/// Options supplied by the host CLI at plugin construction.
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    /// Stage override; the descriptor's default stage applies otherwise.
    pub stage: Option<String>,
    /// Target function for the single-function update command.
    pub function: Option<String>,
    /// Base directory for relative settings paths; defaults to the
    /// working directory.
    pub base_dir: Option<PathBuf>,
}

/// The plugin instance, one per invocation.
pub struct EnvPlugin {
    service: Arc<RwLock<dyn ServiceModel>>,
    gateway: Arc<dyn CloudGateway>,
    env: Arc<dyn EnvSink>,
    settings: SettingsTable,
    stage: String,
    target_function: Option<String>,
}

impl EnvPlugin {
    /// Construct the plugin and run the startup environment load.
    ///
    /// Fails with [`FuncenvError::ConfigNotFound`] when the active stage's
    /// INI file cannot be read.
    pub async fn new(
        service: Arc<RwLock<dyn ServiceModel>>,
        gateway: Arc<dyn CloudGateway>,
        env: Arc<dyn EnvSink>,
        settings_source: Option<&SettingsSource>,
        options: PluginOptions,
    ) -> Result<Self, FuncenvError> {
        let stage = match options.stage {
            Some(stage) => stage,
            None => service.read().await.default_stage().to_string(),
        };
        let base_dir = match options.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir()
                .map_err(|e| FuncenvError::Internal(format!("working directory unavailable: {e}")))?,
        };
        let settings = SettingsTable::build(&stage, &base_dir, settings_source)?;

        let plugin = Self {
            service,
            gateway,
            env,
            settings,
            stage,
            target_function: options.function,
        };
        plugin.load_environments().await?;

        if let Some(path) = plugin.settings.path_for(&plugin.stage) {
            info!(config = %path.display(), stage = %plugin.stage, "stage configuration active");
        }
        Ok(plugin)
    }

    /// The active stage name.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// The settings table built for this invocation.
    pub fn settings(&self) -> &SettingsTable {
        &self.settings
    }

    pub(crate) fn active_path(&self) -> Result<&Path, FuncenvError> {
        self.settings.path_for(&self.stage).ok_or_else(|| {
            FuncenvError::Config(format!("no settings entry for stage `{}`", self.stage))
        })
    }

    /// Load the active stage's environments into the service model.
    ///
    /// Every known function receives the merge of its declared environment
    /// with the resolved configuration. A section that matches no known
    /// function at all abandons the pass before anything is written; the
    /// per-name warn-and-skip policy inside the resolver handles lists
    /// that are only partially known.
    pub async fn load_environments(&self) -> Result<(), FuncenvError> {
        let path = self.active_path()?;
        let doc = load_document(path)?;

        let mut service = self.service.write().await;
        let known = service.function_names();

        for (section_key, _) in doc.sections() {
            let names = split_function_names(section_key);
            if !names.is_empty() && !names.iter().any(|n| known.contains(n)) {
                match names.iter().find_map(|n| suggest_function_name(n, &known)) {
                    Some(suggestion) => error!(
                        section = %section_key,
                        "section matches no known function (did you mean `{suggestion}`?); abandoning environment load"
                    ),
                    None => error!(
                        section = %section_key,
                        "section matches no known function; abandoning environment load"
                    ),
                }
                return Ok(());
            }
        }

        let resolved = resolve_environments(&doc, &known, self.env.as_ref());
        for name in &known {
            let merged = merge_config(service.function_environment(name).as_ref(), resolved.get(name));
            info!(function = %name, vars = merged.len(), "loading environments");
            service.set_function_environment(name, merged)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{CaptureEnv, MiniGateway, MiniService};
    use super::*;
    use funcenv_core::EnvMap;
    use std::io::Write;
    use std::sync::Arc;

    fn write_ini(dir: &std::path::Path, stage: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(format!("{stage}.ini"))).unwrap();
        write!(file, "{content}").unwrap();
    }

    async fn build_plugin(
        ini: &str,
        functions: &[&str],
    ) -> (
        EnvPlugin,
        Arc<RwLock<MiniService>>,
        Arc<CaptureEnv>,
        tempfile::TempDir,
    ) {
        let dir = tempfile::tempdir().unwrap();
        write_ini(dir.path(), "dev", ini);

        let service = Arc::new(RwLock::new(MiniService::new(functions)));
        let env = Arc::new(CaptureEnv::default());
        let plugin = EnvPlugin::new(
            service.clone(),
            Arc::new(MiniGateway::new()),
            env.clone(),
            None,
            PluginOptions {
                base_dir: Some(dir.path().to_path_buf()),
                ..PluginOptions::default()
            },
        )
        .await
        .unwrap();
        (plugin, service, env, dir)
    }

    #[tokio::test]
    async fn construction_loads_environments_into_the_model() {
        let (_plugin, service, _env, _dir) =
            build_plugin("A=1\n[foo]\nB=2\n", &["foo", "bar"]).await;

        let service = service.read().await;
        let foo = service.function_environment("foo").unwrap();
        assert_eq!(foo.get("A").map(String::as_str), Some("1"));
        assert_eq!(foo.get("B").map(String::as_str), Some("2"));

        let bar = service.function_environment("bar").unwrap();
        assert_eq!(bar.get("A").map(String::as_str), Some("1"));
        assert!(!bar.contains_key("B"));
    }

    #[tokio::test]
    async fn construction_fails_without_stage_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(RwLock::new(MiniService::new(&["foo"])));

        let result = EnvPlugin::new(
            service,
            Arc::new(MiniGateway::new()),
            Arc::new(CaptureEnv::default()),
            None,
            PluginOptions {
                base_dir: Some(dir.path().to_path_buf()),
                ..PluginOptions::default()
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(FuncenvError::ConfigNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn declared_values_lose_to_config_on_load() {
        let dir = tempfile::tempdir().unwrap();
        write_ini(dir.path(), "dev", "KEY=config\n");

        let mut model = MiniService::new(&["foo"]);
        let mut declared = EnvMap::new();
        declared.insert("KEY".to_string(), "declared".to_string());
        declared.insert("KEEP".to_string(), "yes".to_string());
        model.functions.insert("foo".to_string(), declared);

        let service = Arc::new(RwLock::new(model));
        let _plugin = EnvPlugin::new(
            service.clone(),
            Arc::new(MiniGateway::new()),
            Arc::new(CaptureEnv::default()),
            None,
            PluginOptions {
                base_dir: Some(dir.path().to_path_buf()),
                ..PluginOptions::default()
            },
        )
        .await
        .unwrap();

        let service = service.read().await;
        let foo = service.function_environment("foo").unwrap();
        assert_eq!(foo.get("KEY").map(String::as_str), Some("config"));
        assert_eq!(foo.get("KEEP").map(String::as_str), Some("yes"));
    }

    #[tokio::test]
    async fn fully_unknown_section_abandons_the_load_pass() {
        let (_plugin, service, _env, _dir) =
            build_plugin("[ghost]\nX=1\n", &["foo"]).await;

        // The pass returned early: nothing was written to any function.
        let service = service.read().await;
        assert!(service.function_environment("foo").unwrap().is_empty());
    }

    #[tokio::test]
    async fn partially_known_section_still_loads() {
        let (_plugin, service, _env, _dir) =
            build_plugin("[foo,ghost]\nX=1\n", &["foo"]).await;

        let service = service.read().await;
        assert_eq!(
            service
                .function_environment("foo")
                .unwrap()
                .get("X")
                .map(String::as_str),
            Some("1")
        );
    }

    #[tokio::test]
    async fn explicit_stage_option_selects_its_file() {
        let dir = tempfile::tempdir().unwrap();
        write_ini(dir.path(), "prod", "A=prod\n");

        let service = Arc::new(RwLock::new(MiniService::new(&["foo"])));
        let plugin = EnvPlugin::new(
            service.clone(),
            Arc::new(MiniGateway::new()),
            Arc::new(CaptureEnv::default()),
            None,
            PluginOptions {
                stage: Some("prod".to_string()),
                base_dir: Some(dir.path().to_path_buf()),
                ..PluginOptions::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(plugin.stage(), "prod");
        let service = service.read().await;
        assert_eq!(
            service
                .function_environment("foo")
                .unwrap()
                .get("A")
                .map(String::as_str),
            Some("prod")
        );
    }
}
