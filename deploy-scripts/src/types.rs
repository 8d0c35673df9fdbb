//! Type definitions used throughout the deploy scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::solidity::RealityV2ConstructorParams;

/// The chains on which the arbitration system itself is deployed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HomeChain {
    /// Arbitrum One
    ArbitrumOne,
    /// Arbitrum Sepolia
    ArbitrumSepolia,
    /// A local hardhat node
    Hardhat,
}

impl HomeChain {
    /// Every home chain
    pub const ALL: [HomeChain; 3] = [
        HomeChain::ArbitrumOne,
        HomeChain::ArbitrumSepolia,
        HomeChain::Hardhat,
    ];

    /// The chain id of the home chain
    pub fn chain_id(self) -> u64 {
        match self {
            HomeChain::ArbitrumOne => 42161,
            HomeChain::ArbitrumSepolia => 421614,
            HomeChain::Hardhat => 31337,
        }
    }

    /// Look up the home chain with the given chain id
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.chain_id() == chain_id)
    }
}

impl Display for HomeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeChain::ArbitrumOne => write!(f, "ARBITRUM_ONE"),
            HomeChain::ArbitrumSepolia => write!(f, "ARBITRUM_SEPOLIA"),
            HomeChain::Hardhat => write!(f, "HARDHAT"),
        }
    }
}

/// Identifies the network a deployment targets.
///
/// The kind of identifier also selects where dependency addresses come from:
/// a bare chain id binds against the local deployments directory, a named
/// network binds against the published Kleros deployments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkIdentifier {
    /// A network known only by its chain id
    ChainId(u64),
    /// A symbolic network name, e.g. `arbitrumSepoliaDevnet`
    Named {
        /// The symbolic network name
        name: String,
        /// The chain id reported by the network
        chain_id: u64,
    },
}

impl NetworkIdentifier {
    /// The chain id of the network
    pub fn chain_id(&self) -> u64 {
        match self {
            NetworkIdentifier::ChainId(chain_id) => *chain_id,
            NetworkIdentifier::Named { chain_id, .. } => *chain_id,
        }
    }

    /// The symbolic name of the network, if one was given
    pub fn name(&self) -> Option<&str> {
        match self {
            NetworkIdentifier::ChainId(_) => None,
            NetworkIdentifier::Named { name, .. } => Some(name),
        }
    }
}

impl Display for NetworkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkIdentifier::ChainId(chain_id) => write!(f, "chain {}", chain_id),
            NetworkIdentifier::Named { name, chain_id } => {
                write!(f, "{} (chain {})", name, chain_id)
            }
        }
    }
}

/// A tier of published Kleros deployments
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeploymentTarget {
    /// The development deployment
    Devnet,
    /// The testnet deployment
    Testnet,
    /// The Neo mainnet deployment
    MainnetNeo,
}

impl Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentTarget::Devnet => write!(f, "devnet"),
            DeploymentTarget::Testnet => write!(f, "testnet"),
            DeploymentTarget::MainnetNeo => write!(f, "mainnetNeo"),
        }
    }
}

/// A previously deployed contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The address the contract was deployed at
    pub address: Address,
}

/// The deployed contracts that RealityV2 is constructed against
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DependencyAddresses {
    /// The arbitrator, i.e. the `KlerosCore` contract
    pub kleros_core: Address,
    /// The `DisputeTemplateRegistry` contract
    pub dispute_template_registry: Address,
}

/// The arguments of the RealityV2 constructor, in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorArgs {
    /// The arbitrator address
    pub arbitrator: Address,
    /// The court routing data passed to the arbitrator
    pub extra_data: Bytes,
    /// The serialized dispute template
    pub dispute_template: String,
    /// The dispute template mappings
    pub dispute_template_mappings: String,
    /// The dispute template registry address
    pub dispute_template_registry: Address,
    /// The arbitration fee timeout, in seconds
    pub fee_timeout: U256,
}

impl ConstructorArgs {
    /// ABI-encode the arguments as constructor parameters
    pub fn abi_encode(&self) -> Vec<u8> {
        RealityV2ConstructorParams::from(self).abi_encode_params()
    }
}

/// The outcome of a deployment run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The deployment step did not apply to the network
    Skipped,
    /// The contract was deployed at the given address
    Deployed(Address),
}
