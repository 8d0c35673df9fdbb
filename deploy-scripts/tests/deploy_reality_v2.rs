//! End-to-end tests of the RealityV2 deployment flow against a recording
//! deployer

use std::{fs, path::Path, sync::Mutex, time::Duration};

use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;
use deploy_scripts::{
    commands::deploy_reality_v2,
    deployer::ContractDeployer,
    errors::DeployError,
    network::{AddressSource, NetworkResolver, NETWORK_TO_DEPLOYMENT},
    published::PublishedContractsClient,
    registry::{DeploymentsDir, ForcedSkipList},
    types::{ConstructorArgs, DeployOutcome, NetworkIdentifier},
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KLEROS_CORE: Address = address!("1000000000000000000000000000000000000001");
const TEMPLATE_REGISTRY: Address = address!("2000000000000000000000000000000000000002");
const DEPLOYED: Address = address!("3000000000000000000000000000000000000003");

/// A deployer that records deployments instead of submitting them
#[derive(Default)]
struct RecordingDeployer {
    deployments: Mutex<Vec<(String, ConstructorArgs)>>,
}

impl RecordingDeployer {
    fn deployments(&self) -> Vec<(String, ConstructorArgs)> {
        self.deployments.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractDeployer for RecordingDeployer {
    fn deployer(&self) -> Address {
        Address::ZERO
    }

    async fn deploy(&self, name: &str, args: &ConstructorArgs) -> Result<Address, DeployError> {
        self.deployments
            .lock()
            .unwrap()
            .push((name.to_string(), args.clone()));
        Ok(DEPLOYED)
    }
}

fn write_record(dir: &Path, name: &str, address: Address) {
    let record = serde_json::json!({ "address": address, "abi": [] });
    fs::write(dir.join(format!("{name}.json")), record.to_string()).unwrap();
}

/// A local deployments directory holding both dependencies
fn populated_registry() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "KlerosCore", KLEROS_CORE);
    write_record(dir.path(), "DisputeTemplateRegistry", TEMPLATE_REGISTRY);
    dir
}

fn local_resolver(dir: &Path) -> NetworkResolver<ForcedSkipList> {
    NetworkResolver::new(
        AddressSource::LocalRegistry(DeploymentsDir::new(dir)),
        ForcedSkipList::default(),
    )
}

fn published_resolver(mock_server: &MockServer) -> NetworkResolver<ForcedSkipList> {
    let client = PublishedContractsClient::new(
        mock_server.uri().parse().unwrap(),
        Duration::from_secs(5),
    )
    .unwrap();
    NetworkResolver::new(
        AddressSource::PublishedContracts(client),
        ForcedSkipList::default(),
    )
}

async fn mount_published(mock_server: &MockServer, target: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{target}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "klerosCore": { "address": KLEROS_CORE },
            "disputeTemplateRegistry": { "address": TEMPLATE_REGISTRY }
        })))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn deploys_against_local_registry() {
    let dir = populated_registry();
    let deployer = RecordingDeployer::default();
    let network = NetworkIdentifier::ChainId(42161);

    let outcome = deploy_reality_v2(&network, &local_resolver(dir.path()), &deployer)
        .await
        .unwrap();
    assert_eq!(outcome, DeployOutcome::Deployed(DEPLOYED));

    let deployments = deployer.deployments();
    assert_eq!(deployments.len(), 1);

    let (name, args) = &deployments[0];
    assert_eq!(name, "RealityV2");
    assert_eq!(args.arbitrator, KLEROS_CORE);
    assert_eq!(args.dispute_template_registry, TEMPLATE_REGISTRY);
    assert_eq!(args.fee_timeout, U256::from(600));
    assert!(args.dispute_template.contains(r#""arbitratorChainID": "42161""#));
    assert!(args
        .dispute_template
        .contains(&format!(r#""arbitratorAddress": "{KLEROS_CORE}""#)));
    let too_soon = r#""title": "Answered Too Soon""#;
    assert_eq!(args.dispute_template.matches(too_soon).count(), 1);
}

#[tokio::test]
async fn missing_local_dependency_aborts_before_deploying() {
    let dir = tempfile::tempdir().unwrap();
    write_record(dir.path(), "KlerosCore", KLEROS_CORE);
    let deployer = RecordingDeployer::default();
    let network = NetworkIdentifier::ChainId(421614);

    let err = deploy_reality_v2(&network, &local_resolver(dir.path()), &deployer)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::MissingDependency(_)));
    assert!(deployer.deployments().is_empty());
}

#[tokio::test]
async fn named_network_binds_against_published_deployment() {
    let mock_server = MockServer::start().await;
    mount_published(&mock_server, "devnet", 1).await;

    let deployer = RecordingDeployer::default();
    let network = NetworkIdentifier::Named {
        name: "arbitrumSepoliaDevnet".to_string(),
        chain_id: 421614,
    };

    let outcome = deploy_reality_v2(&network, &published_resolver(&mock_server), &deployer)
        .await
        .unwrap();
    assert_eq!(outcome, DeployOutcome::Deployed(DEPLOYED));

    let (_, args) = &deployer.deployments()[0];
    assert_eq!(args.arbitrator, KLEROS_CORE);
    assert_eq!(args.dispute_template_registry, TEMPLATE_REGISTRY);
    assert!(args.dispute_template.contains(r#""arbitratorChainID": "421614""#));
}

#[tokio::test]
async fn every_supported_network_binds_against_its_deployment() {
    for (name, target) in NETWORK_TO_DEPLOYMENT {
        let mock_server = MockServer::start().await;
        mount_published(&mock_server, &target.to_string(), 1).await;

        let deployer = RecordingDeployer::default();
        let network = NetworkIdentifier::Named {
            name: name.to_string(),
            chain_id: 421614,
        };
        let resolver = published_resolver(&mock_server);

        let outcome = deploy_reality_v2(&network, &resolver, &deployer)
            .await
            .unwrap();
        assert_eq!(outcome, DeployOutcome::Deployed(DEPLOYED), "{name}");

        let deployments = deployer.deployments();
        assert_eq!(deployments.len(), 1, "{name}");
        let (_, args) = &deployments[0];
        assert_eq!(args.arbitrator, KLEROS_CORE, "{name}");
        assert_eq!(
            args.dispute_template_registry, TEMPLATE_REGISTRY,
            "{name}"
        );

        // Verifies the expected fetch of this target's document
        mock_server.verify().await;
    }
}

#[tokio::test]
async fn unsupported_network_halts_without_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let deployer = RecordingDeployer::default();
    let network = NetworkIdentifier::Named {
        name: "unknownTestnet".to_string(),
        chain_id: 421614,
    };

    let err = deploy_reality_v2(&network, &published_resolver(&mock_server), &deployer)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::UnsupportedNetwork(_)));

    let msg = err.to_string();
    for supported in ["devnet", "testnet", "mainnetNeo"] {
        assert!(msg.contains(supported));
    }
    assert!(deployer.deployments().is_empty());
}

#[tokio::test]
async fn remote_fetch_failure_propagates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/testnet.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let deployer = RecordingDeployer::default();
    let network = NetworkIdentifier::Named {
        name: "arbitrumSepolia".to_string(),
        chain_id: 421614,
    };

    let err = deploy_reality_v2(&network, &published_resolver(&mock_server), &deployer)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::RemoteFetch(_)));
    assert!(deployer.deployments().is_empty());
}

#[tokio::test]
async fn foreign_chain_is_skipped_without_side_effects() {
    let mock_server = MockServer::start().await;
    mount_published(&mock_server, "mainnetNeo", 0).await;

    let deployer = RecordingDeployer::default();
    // A supported network name reporting the chain id of Ethereum mainnet
    let network = NetworkIdentifier::Named {
        name: "arbitrum".to_string(),
        chain_id: 1,
    };

    let outcome = deploy_reality_v2(&network, &published_resolver(&mock_server), &deployer)
        .await
        .unwrap();
    assert_eq!(outcome, DeployOutcome::Skipped);
    assert!(deployer.deployments().is_empty());
}

#[tokio::test]
async fn listed_network_is_skipped() {
    let dir = populated_registry();
    let deployer = RecordingDeployer::default();
    let resolver = NetworkResolver::new(
        AddressSource::LocalRegistry(DeploymentsDir::new(dir.path())),
        ForcedSkipList::new(vec!["31337".to_string()]),
    );

    let outcome = deploy_reality_v2(&NetworkIdentifier::ChainId(31337), &resolver, &deployer)
        .await
        .unwrap();
    assert_eq!(outcome, DeployOutcome::Skipped);
    assert!(deployer.deployments().is_empty());
}
