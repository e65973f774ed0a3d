// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote environment updates, single function or the whole service.
//!
//! Both paths re-derive the configuration from disk rather than reusing
//! the startup resolution, so edits made to the INI file after load are
//! observed. Remote failures are logged per function and never propagate;
//! only an unreadable configuration file fails the operation itself.

use tracing::{error, info};

use funcenv_core::{EnvMap, FuncenvError, FunctionEnvironmentMap};

use funcenv_config::{load_document, resolve_environments};

use crate::EnvPlugin;
use crate::merge::merge_config;

impl EnvPlugin {
    /// Push the merged environment of the target function named in the
    /// plugin options.
    pub async fn update_single(&self) -> Result<(), FuncenvError> {
        let Some(target) = self.target_function.clone() else {
            return Err(FuncenvError::Config(
                "single-function update requires a function name".to_string(),
            ));
        };

        let resolved = self.resolve_current().await?;
        if !resolved.contains_key(&target) {
            return Err(FuncenvError::FunctionUnknown { name: target });
        }

        let (qualified, merged) = {
            let service = self.service.read().await;
            let merged = merge_config(
                service.function_environment(&target).as_ref(),
                resolved.get(&target),
            );
            (
                self.qualified_name(service.service_name(), &target),
                merged,
            )
        };

        self.push(&qualified, &merged).await;
        Ok(())
    }

    /// Push merged environments for every function in the resolved map,
    /// strictly one at a time.
    ///
    /// A failing push is logged and the iteration continues; the batch
    /// neither aborts nor aggregates failures into its own result.
    pub async fn update_all(&self) -> Result<(), FuncenvError> {
        let resolved = self.resolve_current().await?;

        let plan: Vec<(String, EnvMap)> = {
            let service = self.service.read().await;
            resolved
                .iter()
                .map(|(name, env)| {
                    let merged =
                        merge_config(service.function_environment(name).as_ref(), Some(env));
                    (self.qualified_name(service.service_name(), name), merged)
                })
                .collect()
        };

        for (qualified, merged) in &plan {
            self.push(qualified, merged).await;
        }
        Ok(())
    }

    /// Re-derive the per-function environment map from the active stage
    /// file.
    pub(crate) async fn resolve_current(&self) -> Result<FunctionEnvironmentMap, FuncenvError> {
        let path = self.active_path()?;
        let doc = load_document(path)?;
        let service = self.service.read().await;
        Ok(resolve_environments(
            &doc,
            &service.function_names(),
            self.env.as_ref(),
        ))
    }

    fn qualified_name(&self, service_name: &str, function: &str) -> String {
        format!("{service_name}-{}-{function}", self.stage)
    }

    async fn push(&self, qualified: &str, variables: &EnvMap) {
        match self
            .gateway
            .update_function_configuration(qualified, variables)
            .await
        {
            Ok(()) => {
                info!(function = %qualified, vars = variables.len(), "updating environments: ok");
            }
            Err(e) => {
                error!(function = %qualified, error = %e, "updating environments failed");
            }
        }
    }
}
