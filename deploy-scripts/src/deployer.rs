//! Submission of contract deployments to the chain

use alloy::{
    network::TransactionBuilder,
    primitives::Address,
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use tracing::info;

use crate::{errors::DeployError, types::ConstructorArgs, utils::ContractArtifact};

/// Executes contract deployments
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// The account submitting deployments
    fn deployer(&self) -> Address;

    /// Deploy the named contract with the given constructor arguments,
    /// returning the address it was deployed at
    async fn deploy(&self, name: &str, args: &ConstructorArgs) -> Result<Address, DeployError>;
}

/// Deploys a compiled contract over RPC
pub struct RpcDeployer {
    /// The signing provider to submit the deployment with
    provider: DynProvider,
    /// The address of the signer
    deployer: Address,
    /// The compiled contract
    artifact: ContractArtifact,
}

impl RpcDeployer {
    /// Create a deployer
    pub fn new(provider: DynProvider, deployer: Address, artifact: ContractArtifact) -> Self {
        Self {
            provider,
            deployer,
            artifact,
        }
    }

    /// The contract creation code: the bytecode followed by the encoded
    /// constructor arguments
    pub fn creation_code(&self, args: &ConstructorArgs) -> Vec<u8> {
        let mut code = self.artifact.bytecode.to_vec();
        code.extend_from_slice(&args.abi_encode());
        code
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn deploy(&self, name: &str, args: &ConstructorArgs) -> Result<Address, DeployError> {
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(self.creation_code(args));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;
        info!("deploying {} (tx: {})", name, pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(DeployError::ContractDeployment(format!(
                "deployment of {} reverted in tx {}",
                name, receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            DeployError::ContractDeployment(format!(
                "receipt of tx {} has no contract address",
                receipt.transaction_hash
            ))
        })
    }
}
