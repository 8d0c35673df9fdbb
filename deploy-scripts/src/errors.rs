//! Definitions of errors that can occur while deploying the RealityV2 contract

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::network::supported_networks;

/// Errors that can occur while deploying the RealityV2 contract
#[derive(Debug)]
pub enum DeployError {
    /// The network has no entry in the network-to-deployment table
    UnsupportedNetwork(String),
    /// A deployment record the contract depends on is absent
    MissingDependency(String),
    /// The published-contracts directory could not be reached,
    /// or returned malformed data
    RemoteFetch(String),
    /// Error reading a record from the local deployments directory
    ReadDeployments(String),
    /// The inputs to the dispute template were invalid
    InvalidTemplateInput(String),
    /// The deploy command was configured inconsistently
    Configuration(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing the constructor calldata
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::UnsupportedNetwork(network) => write!(
                f,
                "unsupported network: {}, supported networks: {}",
                network,
                supported_networks()
            ),
            DeployError::MissingDependency(s) => write!(f, "missing dependency: {}", s),
            DeployError::RemoteFetch(s) => {
                write!(f, "error fetching published contracts: {}", s)
            }
            DeployError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            DeployError::InvalidTemplateInput(s) => {
                write!(f, "invalid dispute template input: {}", s)
            }
            DeployError::Configuration(s) => write!(f, "invalid configuration: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            DeployError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
        }
    }
}

impl Error for DeployError {}
