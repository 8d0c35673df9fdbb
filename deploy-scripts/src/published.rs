//! Client for the directory of published Kleros contract deployments
//!
//! Each deployment target is served as a single JSON document at
//! `{base_url}/{target}.json`, of the form:
//!
//! ```json
//! {
//!     "klerosCore": { "address": "0x..." },
//!     "disputeTemplateRegistry": { "address": "0x..." }
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::{
    constants::JSON_EXTENSION,
    errors::DeployError,
    types::{DependencyAddresses, DeploymentRecord, DeploymentTarget},
};

/// The published contracts of a single deployment target
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedContracts {
    /// The arbitrator contract
    pub kleros_core: DeploymentRecord,
    /// The dispute template registry contract
    pub dispute_template_registry: DeploymentRecord,
}

impl From<PublishedContracts> for DependencyAddresses {
    fn from(contracts: PublishedContracts) -> Self {
        Self {
            kleros_core: contracts.kleros_core.address,
            dispute_template_registry: contracts.dispute_template_registry.address,
        }
    }
}

/// Client for the published-contracts directory
#[derive(Clone, Debug)]
pub struct PublishedContractsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PublishedContractsClient {
    /// Create a client for the directory at `base_url`.
    ///
    /// Requests that take longer than `timeout` fail; they are never retried.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, DeployError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// The URL serving the given target's contracts
    pub fn endpoint(&self, target: DeploymentTarget) -> Result<Url, DeployError> {
        // Without a trailing slash, `join` would replace the last path segment
        let mut base_url = self.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        base_url
            .join(&format!("{}.{}", target, JSON_EXTENSION))
            .map_err(|e| DeployError::RemoteFetch(e.to_string()))
    }

    /// Fetch the published contracts of the given deployment target
    pub async fn get_contracts(
        &self,
        target: DeploymentTarget,
    ) -> Result<PublishedContracts, DeployError> {
        let url = self.endpoint(target)?;
        info!("fetching {} contracts from {}", target, url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DeployError::RemoteFetch(format!("GET {}: {}", url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(DeployError::RemoteFetch(format!(
                "GET {} returned {}: {}",
                url, status, body
            )));
        }

        resp.json().await.map_err(|e| {
            DeployError::RemoteFetch(format!("GET {}: malformed contracts: {}", url, e))
        })
    }
}
