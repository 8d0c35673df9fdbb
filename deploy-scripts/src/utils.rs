//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    primitives::{Address, Bytes},
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Deserialize;

use crate::errors::DeployError;

/// Sets up the client with which to deploy contracts, returning it along with
/// the address of the deployer
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(DynProvider, Address), DeployError> {
    let url =
        Url::parse(rpc_url).map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    Ok((DynProvider::new(provider), deployer))
}

/// The bytecode of a compiled contract
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// Hardhat artifacts store the bytecode as a hex string
    Hardhat(Bytes),
    /// Foundry artifacts nest it under `object`
    Foundry {
        /// The hex encoded bytecode
        object: Bytes,
    },
}

/// The parts of a compilation artifact needed to deploy a contract
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    /// The contract creation bytecode
    bytecode: ArtifactBytecode,
}

/// A compiled contract, ready to deploy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse a hardhat or foundry compilation artifact
    pub fn parse(json: &str) -> Result<Self, DeployError> {
        let raw: RawArtifact =
            serde_json::from_str(json).map_err(|e| DeployError::ArtifactParsing(e.to_string()))?;

        let bytecode = match raw.bytecode {
            ArtifactBytecode::Hardhat(bytecode) => bytecode,
            ArtifactBytecode::Foundry { object } => object,
        };

        // Interfaces and abstract contracts compile to empty bytecode
        if bytecode.is_empty() {
            return Err(DeployError::ArtifactParsing("artifact has no bytecode".to_string()));
        }

        Ok(Self { bytecode })
    }

    /// Read a compilation artifact from a file
    pub fn from_file(path: &Path) -> Result<Self, DeployError> {
        let json = fs::read_to_string(path)
            .map_err(|e| DeployError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
        Self::parse(&json)
    }
}
