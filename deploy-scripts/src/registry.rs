//! The local deployments directory and the skip registry
//!
//! Deployment records follow the hardhat-deploy layout: one directory per
//! network, holding a `<Name>.json` file per deployed contract.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    constants::JSON_EXTENSION,
    errors::DeployError,
    types::{DeploymentRecord, NetworkIdentifier},
};

/// A network-scoped directory of deployment records
#[derive(Clone, Debug)]
pub struct DeploymentsDir {
    /// The directory holding the network's deployment records
    path: PathBuf,
}

impl DeploymentsDir {
    /// Create a registry over the given network deployments directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The directory backing the registry
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the deployment record with the given name.
    ///
    /// Returns `Ok(None)` if no record exists under that name.
    pub fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, DeployError> {
        let record_path = self.path.join(name).with_extension(JSON_EXTENSION);
        let contents = match fs::read_to_string(&record_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no deployment record at {}", record_path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(DeployError::ReadDeployments(format!(
                    "{}: {}",
                    record_path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| DeployError::ReadDeployments(format!("{}: {}", record_path.display(), e)))
    }

    /// Look up a deployment record that the deployment depends on,
    /// failing if it is absent
    pub fn require(&self, name: &str) -> Result<DeploymentRecord, DeployError> {
        self.get(name)?.ok_or_else(|| {
            DeployError::MissingDependency(format!(
                "no `{}` deployment in {}",
                name,
                self.path.display()
            ))
        })
    }
}

/// Decides whether a network has been marked as skipped for this deployment
pub trait SkipRegistry {
    /// Whether the deployment should be skipped on the given network.
    ///
    /// `forced` is set when the caller already knows the network is
    /// incompatible with the deployment.
    fn is_skipped(&self, network: &NetworkIdentifier, forced: bool) -> bool;
}

/// A skip registry backed by a list of networks the deployment has already
/// been completed on
#[derive(Clone, Debug, Default)]
pub struct ForcedSkipList {
    /// The names of the networks to skip
    networks: Vec<String>,
}

impl ForcedSkipList {
    /// Create a skip list over the given network names
    pub fn new(networks: Vec<String>) -> Self {
        Self { networks }
    }

    /// Whether the network is on the skip list
    fn lists(&self, network: &NetworkIdentifier) -> bool {
        let chain_id = network.chain_id().to_string();
        self.networks
            .iter()
            .any(|listed| network.name() == Some(listed.as_str()) || *listed == chain_id)
    }
}

impl SkipRegistry for ForcedSkipList {
    fn is_skipped(&self, network: &NetworkIdentifier, forced: bool) -> bool {
        if forced {
            warn!("incompatible network {} for this deployment script", network);
            return true;
        }

        if self.lists(network) {
            warn!("deployment already completed on {}, skipping", network);
            return true;
        }

        false
    }
}
