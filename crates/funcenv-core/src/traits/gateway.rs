// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability interface over the deployed compute platform.

use async_trait::async_trait;

use crate::error::FuncenvError;
use crate::types::{EnvMap, ResourcePage};

/// Remote calls consumed by the pipeline.
///
/// Every operation is a single attempt; retry and backoff are delegated to
/// the host's transport. Timeouts and cancellation likewise belong to the
/// implementation, not to callers.
#[async_trait]
pub trait CloudGateway: Send + Sync {
    /// Push a variables map to one deployed function, addressed by its
    /// fully-qualified `<service>-<stage>-<function>` name.
    async fn update_function_configuration(
        &self,
        qualified_name: &str,
        variables: &EnvMap,
    ) -> Result<(), FuncenvError>;

    /// Fetch one page of the deployed resource inventory for a stack.
    ///
    /// Callers follow `next_token` until the gateway reports no further
    /// page.
    async fn list_stack_resources(
        &self,
        stack_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResourcePage, FuncenvError>;

    /// The active account identifier.
    async fn account_id(&self) -> Result<String, FuncenvError>;

    /// The active deployment region, fixed at construction.
    fn region(&self) -> &str;

    /// The deployed stack name per the host's naming convention.
    fn stack_name(&self) -> &str;
}
