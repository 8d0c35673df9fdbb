//! Resolution of the deployment's target network.
//!
//! Decides whether the deployment runs on a network at all, and if so
//! resolves the addresses of the contracts it is constructed against.

use itertools::Itertools;
use tracing::info;

use crate::{
    constants::{DISPUTE_TEMPLATE_REGISTRY_RECORD, KLEROS_CORE_RECORD},
    errors::DeployError,
    published::PublishedContractsClient,
    registry::{DeploymentsDir, SkipRegistry},
    types::{DependencyAddresses, DeploymentTarget, HomeChain, NetworkIdentifier},
};

/// The published deployment each supported network name binds against
pub const NETWORK_TO_DEPLOYMENT: [(&str, DeploymentTarget); 3] = [
    ("arbitrumSepoliaDevnet", DeploymentTarget::Devnet),
    ("arbitrumSepolia", DeploymentTarget::Testnet),
    ("arbitrum", DeploymentTarget::MainnetNeo),
];

/// Map a network name to its published deployment target
pub fn deployment_target(network: &str) -> Result<DeploymentTarget, DeployError> {
    NETWORK_TO_DEPLOYMENT
        .iter()
        .find(|(name, _)| *name == network)
        .map(|(_, target)| *target)
        .ok_or_else(|| DeployError::UnsupportedNetwork(network.to_string()))
}

/// A human readable listing of the supported networks and their targets
pub fn supported_networks() -> String {
    NETWORK_TO_DEPLOYMENT
        .iter()
        .map(|(name, target)| format!("{} ({})", name, target))
        .join(", ")
}

/// Whether the arbitration system lives on the given chain
pub fn is_home_chain(chain_id: u64) -> bool {
    HomeChain::from_chain_id(chain_id).is_some()
}

/// Whether the deployment should be skipped on the given network.
///
/// Networks off the home chains are always skipped, whatever the skip
/// registry decides.
pub fn should_skip(network: &NetworkIdentifier, skip_registry: &impl SkipRegistry) -> bool {
    let foreign = !is_home_chain(network.chain_id());
    skip_registry.is_skipped(network, foreign) || foreign
}

/// Where the addresses of the deployment's dependencies are read from
#[derive(Clone, Debug)]
pub enum AddressSource {
    /// Records in the network's local deployments directory
    LocalRegistry(DeploymentsDir),
    /// The published deployment of the network's target
    PublishedContracts(PublishedContractsClient),
}

impl AddressSource {
    /// Pick the source matching the kind of network identifier: named
    /// networks bind against published deployments, bare chain ids against
    /// the local registry.
    ///
    /// Returns `None` if the source for that kind was not configured.
    pub fn for_network(
        network: &NetworkIdentifier,
        local: Option<DeploymentsDir>,
        published: Option<PublishedContractsClient>,
    ) -> Option<Self> {
        match network {
            NetworkIdentifier::ChainId(_) => local.map(AddressSource::LocalRegistry),
            NetworkIdentifier::Named { .. } => published.map(AddressSource::PublishedContracts),
        }
    }

    /// Resolve the dependency addresses on the given network
    pub async fn resolve(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<(Option<DeploymentTarget>, DependencyAddresses), DeployError> {
        match self {
            AddressSource::LocalRegistry(registry) => {
                let kleros_core = registry.require(KLEROS_CORE_RECORD)?;
                let dispute_template_registry = registry.require(DISPUTE_TEMPLATE_REGISTRY_RECORD)?;

                let addresses = DependencyAddresses {
                    kleros_core: kleros_core.address,
                    dispute_template_registry: dispute_template_registry.address,
                };
                Ok((None, addresses))
            }
            AddressSource::PublishedContracts(client) => {
                let name = network
                    .name()
                    .ok_or_else(|| DeployError::UnsupportedNetwork(network.to_string()))?;
                let target = deployment_target(name)?;
                let contracts = client.get_contracts(target).await?;

                Ok((Some(target), contracts.into()))
            }
        }
    }
}

/// The decision reached for a network
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The deployment does not apply to the network
    Skip,
    /// The deployment should proceed against the given dependencies
    Deploy {
        /// The published deployment the addresses were read from, if any
        target: Option<DeploymentTarget>,
        /// The resolved dependency addresses
        addresses: DependencyAddresses,
    },
}

/// Resolves whether and against what the deployment runs on a network
pub struct NetworkResolver<S: SkipRegistry> {
    /// The source of dependency addresses
    source: AddressSource,
    /// The registry of networks to skip
    skip_registry: S,
}

impl<S: SkipRegistry> NetworkResolver<S> {
    /// Create a resolver
    pub fn new(source: AddressSource, skip_registry: S) -> Self {
        Self {
            source,
            skip_registry,
        }
    }

    /// Whether the deployment should be skipped on the given network
    pub fn should_skip(&self, network: &NetworkIdentifier) -> bool {
        should_skip(network, &self.skip_registry)
    }

    /// Resolve the deployment decision for the given network
    pub async fn resolve(&self, network: &NetworkIdentifier) -> Result<Resolution, DeployError> {
        if self.should_skip(network) {
            return Ok(Resolution::Skip);
        }

        let (target, addresses) = self.source.resolve(network).await?;
        info!(
            "resolved dependencies on {}: KlerosCore at {}, DisputeTemplateRegistry at {}",
            network, addresses.kleros_core, addresses.dispute_template_registry
        );

        Ok(Resolution::Deploy { target, addresses })
    }
}
