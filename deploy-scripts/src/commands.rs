//! Implementations of the deploy scripts

use std::{fs, str::FromStr, time::Duration};

use alloy::providers::Provider;
use alloy_primitives::{Bytes, U256};
use tracing::info;

use crate::{
    cli::{DeployRealityV2Args, PreviewTemplateArgs},
    constants::{EXTRA_DATA, FEE_TIMEOUT_SECS, REALITY_V2_CONTRACT_NAME},
    deployer::{ContractDeployer, RpcDeployer},
    errors::DeployError,
    network::{should_skip, AddressSource, NetworkResolver, Resolution},
    published::PublishedContractsClient,
    registry::{DeploymentsDir, ForcedSkipList, SkipRegistry},
    template::{build_dispute_template, DisputeTemplate},
    types::{
        ConstructorArgs, DependencyAddresses, DeployOutcome, HomeChain, NetworkIdentifier,
    },
    utils::{setup_client, ContractArtifact},
};

/// Deploy RealityV2 on the given network.
///
/// Skips the deployment on networks it does not apply to. Otherwise resolves
/// the arbitrator and template registry, builds the dispute template for the
/// arbitrator and submits a single deployment.
pub async fn deploy_reality_v2<S: SkipRegistry>(
    network: &NetworkIdentifier,
    resolver: &NetworkResolver<S>,
    deployer: &impl ContractDeployer,
) -> Result<DeployOutcome, DeployError> {
    let addresses = match resolver.resolve(network).await? {
        Resolution::Skip => {
            info!("skipping {} on {}", REALITY_V2_CONTRACT_NAME, network);
            return Ok(DeployOutcome::Skipped);
        }
        Resolution::Deploy { target, addresses } => {
            if let Some(target) = target {
                info!("binding against the {} deployment", target);
            }
            addresses
        }
    };

    // The resolver only lets home chains through
    let chain = HomeChain::from_chain_id(network.chain_id())
        .map(|chain| chain.to_string())
        .unwrap_or_else(|| network.to_string());
    info!("deploying to {} with deployer {}", chain, deployer.deployer());

    let args = reality_v2_constructor_args(network.chain_id(), addresses)?;
    let address = deployer.deploy(REALITY_V2_CONTRACT_NAME, &args).await?;
    info!("{} deployed at {}", REALITY_V2_CONTRACT_NAME, address);

    Ok(DeployOutcome::Deployed(address))
}

/// Assemble the RealityV2 constructor arguments for the given dependencies
pub fn reality_v2_constructor_args(
    chain_id: u64,
    addresses: DependencyAddresses,
) -> Result<ConstructorArgs, DeployError> {
    let (dispute_template, dispute_template_mappings) =
        build_dispute_template(chain_id, &addresses.kleros_core.to_string())?;
    let extra_data = Bytes::from_str(EXTRA_DATA)
        .map_err(|e| DeployError::CalldataConstruction(e.to_string()))?;

    Ok(ConstructorArgs {
        arbitrator: addresses.kleros_core,
        extra_data,
        dispute_template,
        dispute_template_mappings: dispute_template_mappings.to_string(),
        dispute_template_registry: addresses.dispute_template_registry,
        fee_timeout: U256::from(FEE_TIMEOUT_SECS),
    })
}

/// A deployment that has passed the skip check and is ready to resolve
/// its dependencies
pub struct PreparedDeployment {
    /// The network to deploy on
    pub network: NetworkIdentifier,
    /// The resolver of the deployment's dependencies
    pub resolver: NetworkResolver<ForcedSkipList>,
    /// The compiled RealityV2 contract
    pub artifact: ContractArtifact,
}

/// Prepare the deployment configured on the command line for the chain the
/// RPC endpoint reports.
///
/// Returns `None` if the deployment is skipped on the network, before any of
/// the deployment's own configuration is loaded.
pub fn prepare_deployment(
    args: DeployRealityV2Args,
    chain_id: u64,
) -> Result<Option<PreparedDeployment>, DeployError> {
    let network = match args.network {
        Some(name) => NetworkIdentifier::Named { name, chain_id },
        None => NetworkIdentifier::ChainId(chain_id),
    };

    let skip_registry = ForcedSkipList::new(args.skip_networks);
    if should_skip(&network, &skip_registry) {
        info!("skipping {} on {}", REALITY_V2_CONTRACT_NAME, network);
        return Ok(None);
    }

    let artifact = ContractArtifact::from_file(&args.artifact)?;

    let local = args.deployments_dir.map(DeploymentsDir::new);
    let timeout = Duration::from_secs(args.fetch_timeout_secs);
    let published = args
        .contracts_endpoint
        .map(|endpoint| PublishedContractsClient::new(endpoint, timeout))
        .transpose()?;
    let source = AddressSource::for_network(&network, local, published).ok_or_else(|| {
        DeployError::Configuration(format!("no dependency address source for {}", network))
    })?;

    Ok(Some(PreparedDeployment {
        network,
        resolver: NetworkResolver::new(source, skip_registry),
        artifact,
    }))
}

/// Deploy RealityV2 as configured on the command line
pub async fn run_deploy_reality_v2(
    args: DeployRealityV2Args,
) -> Result<DeployOutcome, DeployError> {
    let (provider, deployer) = setup_client(&args.priv_key, &args.rpc_url)?;
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;

    let Some(PreparedDeployment {
        network,
        resolver,
        artifact,
    }) = prepare_deployment(args, chain_id)?
    else {
        return Ok(DeployOutcome::Skipped);
    };

    let deployer = RpcDeployer::new(provider, deployer, artifact);
    deploy_reality_v2(&network, &resolver, &deployer).await
}

/// Print the dispute template for an arbitrator, optionally rendered with
/// the values of a raised dispute
pub fn preview_template(args: PreviewTemplateArgs) -> Result<(), DeployError> {
    let document = DisputeTemplate::new(args.chain_id, &args.arbitrator)?.to_document();

    let output = match args.context {
        Some(path) => {
            let json = fs::read_to_string(&path).map_err(|e| {
                DeployError::Configuration(format!("{}: {}", path.display(), e))
            })?;
            let context = serde_json::from_str(&json).map_err(|e| {
                DeployError::Configuration(format!("{}: {}", path.display(), e))
            })?;
            document.render(&context)
        }
        None => document.to_source(),
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use alloy_primitives::address;

    use super::*;

    /// Deploy arguments bound to a local deployments directory, with an
    /// artifact that does not exist
    fn args_without_artifact(skip_networks: Vec<String>) -> DeployRealityV2Args {
        DeployRealityV2Args {
            rpc_url: "http://localhost:8545".to_string(),
            priv_key: String::new(),
            artifact: PathBuf::from("/nonexistent/RealityV2.json"),
            network: None,
            contracts_endpoint: None,
            fetch_timeout_secs: 30,
            deployments_dir: Some(PathBuf::from("/nonexistent/deployments")),
            skip_networks,
        }
    }

    #[test]
    fn foreign_chain_skips_before_loading_the_artifact() {
        let prepared = prepare_deployment(args_without_artifact(vec![]), 1).unwrap();
        assert!(prepared.is_none());
    }

    #[test]
    fn listed_network_skips_before_loading_the_artifact() {
        let args = args_without_artifact(vec!["42161".to_string()]);
        let prepared = prepare_deployment(args, 42161).unwrap();
        assert!(prepared.is_none());
    }

    #[test]
    fn named_network_without_endpoint_skips_on_foreign_chain() {
        let mut args = args_without_artifact(vec![]);
        args.network = Some("arbitrum".to_string());
        args.deployments_dir = None;

        let prepared = prepare_deployment(args, 1).unwrap();
        assert!(prepared.is_none());
    }

    #[test]
    fn home_chain_requires_the_artifact() {
        let err = prepare_deployment(args_without_artifact(vec![]), 42161)
            .err()
            .unwrap();
        assert!(matches!(err, DeployError::ArtifactParsing(_)));
    }

    #[test]
    fn constructor_args_bind_to_resolved_dependencies() {
        let addresses = DependencyAddresses {
            kleros_core: address!("991d2df165670b9cac3b022f4b68d65b664222ea"),
            dispute_template_registry: address!("596d3b09e684d62217682216e9b7a0de75933391"),
        };
        let args = reality_v2_constructor_args(421614, addresses).unwrap();

        assert_eq!(args.arbitrator, addresses.kleros_core);
        assert_eq!(
            args.dispute_template_registry,
            addresses.dispute_template_registry
        );
        assert_eq!(args.extra_data.len(), 64);
        assert_eq!(args.extra_data[31], 1);
        assert_eq!(args.extra_data[63], 3);
        assert_eq!(args.fee_timeout, U256::from(600));
        assert_eq!(args.dispute_template_mappings, "TODO");
        assert!(args.dispute_template.contains(r#""arbitratorChainID": "421614""#));
        assert!(args
            .dispute_template
            .contains(&format!(r#""arbitratorAddress": "{}""#, addresses.kleros_core)));
    }
}
