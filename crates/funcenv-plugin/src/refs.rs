// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of provider-level symbolic references against the deployed
//! resource inventory.
//!
//! Runs only on the local-emulation lifecycle event. The inventory is
//! collected in full, following pagination to exhaustion, before any
//! reference resolves; a fetch failure skips the whole pass rather than
//! resolving partially.

use tracing::{debug, error, warn};

use funcenv_core::types::{PSEUDO_ACCOUNT_ID, PSEUDO_REGION, PSEUDO_STACK_NAME};
use funcenv_core::{CloudGateway, FuncenvError, StackResource, SymbolicReference};

use crate::EnvPlugin;

impl EnvPlugin {
    /// Resolve every symbolic value in the provider environment block,
    /// writing results back into the service model and the env sink.
    ///
    /// Per-key failures (unknown logical id, unsupported shape) are logged
    /// and skipped; the remaining keys still resolve.
    pub async fn resolve_references(&self) -> Result<(), FuncenvError> {
        let block = self.service.read().await.provider_environment();
        if block.is_empty() {
            return Ok(());
        }

        let inventory = match fetch_inventory(self.gateway.as_ref()).await {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(error = %e, "resource inventory unavailable, skipping reference resolution");
                return Ok(());
            }
        };
        debug!(resources = inventory.len(), "resource inventory collected");

        let mut resolved_entries: Vec<(String, String, bool)> = Vec::new();
        for (key, value) in &block {
            let reference = match SymbolicReference::parse(value) {
                Ok(reference) => reference,
                Err(e) => {
                    error!(key = %key, error = %e, "unsupported provider environment value");
                    continue;
                }
            };
            let symbolic = !matches!(reference, SymbolicReference::Literal(_));
            match resolve_reference(&reference, &inventory, self.gateway.as_ref()).await {
                Ok(resolved) => resolved_entries.push((key.clone(), resolved, symbolic)),
                Err(e) => error!(key = %key, error = %e, "reference resolution failed"),
            }
        }

        let mut service = self.service.write().await;
        for (key, value, symbolic) in resolved_entries {
            self.env.export(&key, &value);
            if symbolic {
                service.set_provider_variable(&key, value);
            }
        }
        Ok(())
    }
}

/// Collect the full resource inventory, following continuation tokens
/// until the gateway reports no further page.
pub(crate) async fn fetch_inventory(
    gateway: &dyn CloudGateway,
) -> Result<Vec<StackResource>, FuncenvError> {
    let stack_name = gateway.stack_name().to_string();
    let mut resources = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = gateway
            .list_stack_resources(&stack_name, token.as_deref())
            .await?;
        resources.extend(page.resources);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    Ok(resources)
}

async fn resolve_reference(
    reference: &SymbolicReference,
    inventory: &[StackResource],
    gateway: &dyn CloudGateway,
) -> Result<String, FuncenvError> {
    match reference {
        SymbolicReference::Literal(text) => Ok(text.clone()),
        SymbolicReference::Ref(target) => resolve_ref_target(target, inventory, gateway).await,
        SymbolicReference::Join { delimiter, parts } => {
            let mut rendered = Vec::with_capacity(parts.len());
            for part in parts {
                match part {
                    SymbolicReference::Literal(text) => rendered.push(text.clone()),
                    SymbolicReference::Ref(target) => {
                        rendered.push(resolve_ref_target(target, inventory, gateway).await?);
                    }
                    SymbolicReference::Join { .. } => {
                        return Err(FuncenvError::Config(
                            "nested Fn::Join is not supported".to_string(),
                        ));
                    }
                }
            }
            Ok(rendered.join(delimiter))
        }
    }
}

async fn resolve_ref_target(
    target: &str,
    inventory: &[StackResource],
    gateway: &dyn CloudGateway,
) -> Result<String, FuncenvError> {
    match target {
        PSEUDO_REGION => Ok(gateway.region().to_string()),
        PSEUDO_ACCOUNT_ID => gateway.account_id().await,
        PSEUDO_STACK_NAME => Ok(gateway.stack_name().to_string()),
        logical_id => inventory
            .iter()
            .find(|resource| resource.logical_id == logical_id)
            .map(|resource| resource.physical_id.clone())
            .ok_or_else(|| FuncenvError::UnresolvedReference {
                logical_id: logical_id.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CaptureEnv, MiniGateway, MiniService};
    use crate::{EnvPlugin, PluginOptions};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn resource(logical: &str, physical: &str) -> StackResource {
        StackResource {
            logical_id: logical.to_string(),
            physical_id: physical.to_string(),
        }
    }

    async fn build_plugin(
        provider_env: &[(&str, serde_json::Value)],
        gateway: MiniGateway,
    ) -> (
        EnvPlugin,
        Arc<RwLock<MiniService>>,
        Arc<CaptureEnv>,
        tempfile::TempDir,
    ) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dev.ini"), "").unwrap();

        let mut model = MiniService::new(&["fn1"]);
        for (key, value) in provider_env {
            model.provider_env.insert(key.to_string(), value.clone());
        }

        let service = Arc::new(RwLock::new(model));
        let env = Arc::new(CaptureEnv::default());
        let plugin = EnvPlugin::new(
            service.clone(),
            Arc::new(gateway),
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
    async fn fetch_inventory_follows_pagination() {
        let mut gateway = MiniGateway::new();
        gateway.pages = vec![
            vec![resource("A", "phys-a")],
            vec![resource("B", "phys-b")],
            vec![resource("C", "phys-c")],
        ];

        let inventory = fetch_inventory(&gateway).await.unwrap();
        let logical: Vec<_> = inventory.iter().map(|r| r.logical_id.as_str()).collect();
        assert_eq!(logical, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn pseudo_parameters_resolve_from_the_gateway() {
        let mut gateway = MiniGateway::new();
        gateway.pages = vec![vec![]];
        let (plugin, service, env, _dir) = build_plugin(
            &[
                ("REGION", json!({"Ref": "AWS::Region"})),
                ("ACCOUNT", json!({"Ref": "AWS::AccountId"})),
                ("STACK", json!({"Ref": "AWS::StackName"})),
            ],
            gateway,
        )
        .await;

        plugin.resolve_references().await.unwrap();

        let seen = env.0.lock().unwrap();
        assert_eq!(seen.get("REGION").map(String::as_str), Some("eu-central-1"));
        assert_eq!(seen.get("ACCOUNT").map(String::as_str), Some("123456789012"));
        assert_eq!(seen.get("STACK").map(String::as_str), Some("svc-dev"));
        drop(seen);

        let service = service.read().await;
        assert_eq!(
            service.provider_env.get("REGION"),
            Some(&json!("eu-central-1"))
        );
    }

    #[tokio::test]
    async fn logical_id_resolves_to_physical_id() {
        let mut gateway = MiniGateway::new();
        gateway.pages = vec![vec![resource("OrdersQueue", "https://queue.example/orders")]];
        let (plugin, _service, env, _dir) = build_plugin(
            &[("QUEUE_URL", json!({"Ref": "OrdersQueue"}))],
            gateway,
        )
        .await;

        plugin.resolve_references().await.unwrap();

        assert_eq!(
            env.0.lock().unwrap().get("QUEUE_URL").map(String::as_str),
            Some("https://queue.example/orders")
        );
    }

    #[tokio::test]
    async fn join_resolves_parts_then_joins() {
        let mut gateway = MiniGateway::new();
        gateway.pages = vec![vec![resource("Topic", "orders-topic")]];
        let (plugin, _service, env, _dir) = build_plugin(
            &[(
                "TOPIC_ARN",
                json!({"Fn::Join": [":", ["arn", {"Ref": "AWS::Region"}, {"Ref": "Topic"}]]}),
            )],
            gateway,
        )
        .await;

        plugin.resolve_references().await.unwrap();

        assert_eq!(
            env.0.lock().unwrap().get("TOPIC_ARN").map(String::as_str),
            Some("arn:eu-central-1:orders-topic")
        );
    }

    #[tokio::test]
    async fn unknown_logical_id_skips_that_key_only() {
        let mut gateway = MiniGateway::new();
        gateway.pages = vec![vec![resource("Known", "phys-known")]];
        let (plugin, service, env, _dir) = build_plugin(
            &[
                ("GOOD", json!({"Ref": "Known"})),
                ("BAD", json!({"Ref": "Ghost"})),
            ],
            gateway,
        )
        .await;

        plugin.resolve_references().await.unwrap();

        let seen = env.0.lock().unwrap();
        assert_eq!(seen.get("GOOD").map(String::as_str), Some("phys-known"));
        assert!(seen.get("BAD").is_none());
        drop(seen);

        // The unresolved key keeps its symbolic value in the model.
        let service = service.read().await;
        assert_eq!(service.provider_env.get("BAD"), Some(&json!({"Ref": "Ghost"})));
    }

    #[tokio::test]
    async fn inventory_failure_skips_the_whole_pass() {
        let mut gateway = MiniGateway::new();
        gateway.fail_inventory = true;
        let (plugin, service, env, _dir) = build_plugin(
            &[
                ("QUEUE", json!({"Ref": "OrdersQueue"})),
                ("PLAIN", json!("literal")),
            ],
            gateway,
        )
        .await;

        plugin.resolve_references().await.unwrap();

        assert!(env.0.lock().unwrap().is_empty());
        let service = service.read().await;
        assert_eq!(
            service.provider_env.get("QUEUE"),
            Some(&json!({"Ref": "OrdersQueue"}))
        );
    }

    #[tokio::test]
    async fn literals_export_without_rewriting_the_model() {
        let mut gateway = MiniGateway::new();
        gateway.pages = vec![vec![]];
        let (plugin, service, env, _dir) =
            build_plugin(&[("PLAIN", json!("value"))], gateway).await;

        plugin.resolve_references().await.unwrap();

        assert_eq!(
            env.0.lock().unwrap().get("PLAIN").map(String::as_str),
            Some("value")
        );
        let service = service.read().await;
        assert_eq!(service.provider_env.get("PLAIN"), Some(&json!("value")));
    }

    #[tokio::test]
    async fn empty_provider_block_skips_inventory_fetch() {
        let mut gateway = MiniGateway::new();
        // Would error if fetched; the empty block must short-circuit first.
        gateway.fail_inventory = true;
        let (plugin, _service, env, _dir) = build_plugin(&[], gateway).await;

        plugin.resolve_references().await.unwrap();
        assert!(env.0.lock().unwrap().is_empty());
    }
}
