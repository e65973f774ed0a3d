// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire shapes for the provider bridge, following the platform's JSON
//! field conventions.

use serde::{Deserialize, Serialize};

use funcenv_core::EnvMap;

/// Body of an update-function-configuration call.
#[derive(Debug, Serialize)]
pub struct UpdateFunctionConfigurationRequest<'a> {
    #[serde(rename = "FunctionName")]
    pub function_name: &'a str,
    #[serde(rename = "Environment")]
    pub environment: EnvironmentSpec<'a>,
}

/// The `Environment` envelope around the variables map.
#[derive(Debug, Serialize)]
pub struct EnvironmentSpec<'a> {
    #[serde(rename = "Variables")]
    pub variables: &'a EnvMap,
}

/// Body of a list-stack-resources call.
#[derive(Debug, Serialize)]
pub struct ListStackResourcesRequest<'a> {
    #[serde(rename = "StackName")]
    pub stack_name: &'a str,
    #[serde(rename = "NextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<&'a str>,
}

/// One page of stack resource summaries.
#[derive(Debug, Deserialize)]
pub struct ListStackResourcesResponse {
    #[serde(rename = "StackResourceSummaries", default)]
    pub summaries: Vec<ResourceSummary>,
    #[serde(rename = "NextToken")]
    pub next_token: Option<String>,
}

/// One deployed resource summary.
#[derive(Debug, Deserialize)]
pub struct ResourceSummary {
    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,
    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,
}

/// Response of the caller-identity query.
#[derive(Debug, Deserialize)]
pub struct CallerIdentityResponse {
    #[serde(rename = "Account")]
    pub account: String,
}
