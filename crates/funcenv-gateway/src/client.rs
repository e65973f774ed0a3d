// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the host framework's provider bridge.
//!
//! Provides [`HttpGateway`], the production [`CloudGateway`] backed by
//! JSON-over-HTTP calls. Every operation is exactly one attempt: retry,
//! backoff, and cancellation belong to the bridge transport, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use funcenv_core::{CloudGateway, EnvMap, FuncenvError, ResourcePage, StackResource};

use crate::types::{
    CallerIdentityResponse, EnvironmentSpec, ListStackResourcesRequest,
    ListStackResourcesResponse, UpdateFunctionConfigurationRequest,
};

/// Path of the update-function-configuration operation.
const UPDATE_FUNCTION_PATH: &str = "/lambda/update-function-configuration";
/// Path of the list-stack-resources operation.
const LIST_RESOURCES_PATH: &str = "/cloudformation/list-stack-resources";
/// Path of the caller-identity query.
const CALLER_IDENTITY_PATH: &str = "/sts/get-caller-identity";

/// HTTP implementation of the cloud gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    region: String,
    stack_name: String,
}

impl HttpGateway {
    /// Creates a gateway against a bridge endpoint.
    ///
    /// The stack name is fixed here from the host naming convention
    /// (`<service>-<stage>`), as is the active region.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        region: String,
        service: &str,
        stage: &str,
    ) -> Result<Self, FuncenvError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FuncenvError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            region,
            stack_name: format!("{service}-{stage}"),
        })
    }

    async fn post<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, FuncenvError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FuncenvError::Gateway {
                message: format!("HTTP request to {path} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(path, status = %status, "bridge response received");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(FuncenvError::Gateway {
            message: format!("bridge returned {status} for {path}: {body}"),
            source: None,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FuncenvError> {
        let body = response.text().await.map_err(|e| FuncenvError::Gateway {
            message: format!("failed to read bridge response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| FuncenvError::Gateway {
            message: format!("failed to parse bridge response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl CloudGateway for HttpGateway {
    async fn update_function_configuration(
        &self,
        qualified_name: &str,
        variables: &EnvMap,
    ) -> Result<(), FuncenvError> {
        let request = UpdateFunctionConfigurationRequest {
            function_name: qualified_name,
            environment: EnvironmentSpec { variables },
        };
        self.post(UPDATE_FUNCTION_PATH, &request).await?;
        Ok(())
    }

    async fn list_stack_resources(
        &self,
        stack_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResourcePage, FuncenvError> {
        let request = ListStackResourcesRequest {
            stack_name,
            next_token,
        };
        let response = self
            .post(LIST_RESOURCES_PATH, &request)
            .await
            .map_err(|e| FuncenvError::InventoryFetch {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
        let parsed: ListStackResourcesResponse = Self::read_json(response).await?;

        Ok(ResourcePage {
            resources: parsed
                .summaries
                .into_iter()
                .map(|summary| StackResource {
                    logical_id: summary.logical_resource_id,
                    physical_id: summary.physical_resource_id,
                })
                .collect(),
            next_token: parsed.next_token,
        })
    }

    async fn account_id(&self) -> Result<String, FuncenvError> {
        let response = self
            .post(CALLER_IDENTITY_PATH, &serde_json::json!({}))
            .await?;
        let parsed: CallerIdentityResponse = Self::read_json(response).await?;
        Ok(parsed.account)
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn stack_name(&self) -> &str {
        &self.stack_name
    }
}
