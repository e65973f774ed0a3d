// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability interface over the host framework's service model.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::FuncenvError;
use crate::types::EnvMap;

/// Read/write access to the host's in-memory service model.
///
/// Descriptor lifecycle is owned entirely by the host: the pipeline never
/// creates or deletes a function, it only reads names and mutates the
/// environment attribute of functions that already exist.
pub trait ServiceModel: Send + Sync {
    /// Name of the service, used to build fully-qualified function names.
    fn service_name(&self) -> &str;

    /// The stage the descriptor declares when the caller supplies none.
    fn default_stage(&self) -> &str;

    /// All function names known to the host, in declaration order.
    fn function_names(&self) -> Vec<String>;

    /// The environment currently declared on a function, if the function
    /// exists.
    fn function_environment(&self, name: &str) -> Option<EnvMap>;

    /// Replace a function's environment with a merged mapping.
    ///
    /// Errors with [`FuncenvError::FunctionUnknown`] when no descriptor of
    /// that name exists.
    fn set_function_environment(&mut self, name: &str, env: EnvMap) -> Result<(), FuncenvError>;

    /// The provider-level environment block, which may contain symbolic
    /// reference values (`Ref`, `Fn::Join`).
    fn provider_environment(&self) -> BTreeMap<String, Value>;

    /// Write a resolved value back into the provider-level environment.
    fn set_provider_variable(&mut self, key: &str, value: String);
}
