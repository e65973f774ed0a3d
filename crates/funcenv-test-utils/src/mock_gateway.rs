// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock cloud gateway for deterministic testing.
//!
//! `MockGateway` records every update call, serves a scripted paginated
//! resource inventory, and can be configured to reject updates for chosen
//! functions or to fail inventory listing outright.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;

use funcenv_core::{
    CloudGateway, EnvMap, FuncenvError, ResourcePage, StackResource,
};

/// One recorded update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub qualified_name: String,
    pub variables: EnvMap,
}

/// A scripted gateway with recording and failure injection.
pub struct MockGateway {
    region: String,
    stack_name: String,
    account_id: String,
    pages: Vec<Vec<StackResource>>,
    failing_functions: BTreeSet<String>,
    fail_inventory: bool,
    updates: Mutex<Vec<RecordedUpdate>>,
    list_calls: Mutex<usize>,
}

impl MockGateway {
    /// Create a gateway for stack `svc-dev` in `eu-central-1` with an
    /// empty single-page inventory.
    pub fn new() -> Self {
        Self {
            region: "eu-central-1".to_string(),
            stack_name: "svc-dev".to_string(),
            account_id: "123456789012".to_string(),
            pages: vec![Vec::new()],
            failing_functions: BTreeSet::new(),
            fail_inventory: false,
            updates: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
        }
    }

    /// Script the inventory as a sequence of pages joined by continuation
    /// tokens.
    pub fn with_resource_pages(mut self, pages: Vec<Vec<(&str, &str)>>) -> Self {
        self.pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|(logical, physical)| StackResource {
                        logical_id: logical.to_string(),
                        physical_id: physical.to_string(),
                    })
                    .collect()
            })
            .collect();
        self
    }

    /// Reject update calls for one qualified function name.
    pub fn with_failing_function(mut self, qualified_name: &str) -> Self {
        self.failing_functions.insert(qualified_name.to_string());
        self
    }

    /// Fail every inventory listing call.
    pub fn with_failing_inventory(mut self) -> Self {
        self.fail_inventory = true;
        self
    }

    /// Updates recorded so far, in call order.
    pub fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Number of inventory list calls made.
    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CloudGateway for MockGateway {
    async fn update_function_configuration(
        &self,
        qualified_name: &str,
        variables: &EnvMap,
    ) -> Result<(), FuncenvError> {
        if self.failing_functions.contains(qualified_name) {
            return Err(FuncenvError::Gateway {
                message: format!("update rejected for {qualified_name}"),
                source: None,
            });
        }
        self.updates.lock().unwrap().push(RecordedUpdate {
            qualified_name: qualified_name.to_string(),
            variables: variables.clone(),
        });
        Ok(())
    }

    async fn list_stack_resources(
        &self,
        _stack_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResourcePage, FuncenvError> {
        *self.list_calls.lock().unwrap() += 1;
        if self.fail_inventory {
            return Err(FuncenvError::InventoryFetch {
                message: "listing unavailable".to_string(),
                source: None,
            });
        }
        let index = match next_token {
            None => 0,
            Some(token) => token.parse::<usize>().unwrap_or(0),
        };
        let resources = self.pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
        Ok(ResourcePage {
            resources,
            next_token,
        })
    }

    async fn account_id(&self) -> Result<String, FuncenvError> {
        Ok(self.account_id.clone())
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn stack_name(&self) -> &str {
        &self.stack_name
    }
}
