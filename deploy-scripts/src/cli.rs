//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::{
    commands::{preview_template, run_deploy_reality_v2},
    constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_RPC_URL},
    errors::DeployError,
};

/// Deploy the RealityV2 arbitration proxy
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    DeployRealityV2(DeployRealityV2Args),
    PreviewTemplate(PreviewTemplateArgs),
}

impl Command {
    pub async fn run(self) -> Result<(), DeployError> {
        match self {
            Command::DeployRealityV2(args) => run_deploy_reality_v2(args).await.map(|_| ()),
            Command::PreviewTemplate(args) => preview_template(args),
        }
    }
}

/// Deploy the RealityV2 contract, bound to the arbitrator of the chain it is
/// deployed on.
///
/// When `--network` names a published Kleros deployment, the arbitrator and
/// dispute template registry are read from the published-contracts directory.
/// Otherwise they are read from the local deployments directory.
#[derive(Args)]
pub struct DeployRealityV2Args {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer
    #[arg(short, long = "priv-key", env = "PKEY")]
    pub priv_key: String,

    /// Path to the compilation artifact of the RealityV2 contract
    #[arg(short, long)]
    pub artifact: PathBuf,

    /// The symbolic name of the network, e.g. `arbitrumSepoliaDevnet`
    #[arg(short, long, requires = "contracts_endpoint")]
    pub network: Option<String>,

    /// The directory of published contract deployments
    #[arg(long, env = "CONTRACTS_ENDPOINT")]
    pub contracts_endpoint: Option<Url>,

    /// Timeout for fetching published deployments, in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_secs: u64,

    /// The network's local deployments directory, e.g. `deployments/localhost`
    #[arg(short, long, required_unless_present = "network")]
    pub deployments_dir: Option<PathBuf>,

    /// Networks, by name or chain id, the deployment has already completed on
    #[arg(long = "skip-network")]
    pub skip_networks: Vec<String>,
}

/// Print the dispute template for an arbitrator
#[derive(Args)]
pub struct PreviewTemplateArgs {
    /// The chain the arbitrator lives on
    #[arg(short, long)]
    pub chain_id: u64,

    /// The arbitrator address
    #[arg(short, long)]
    pub arbitrator: String,

    /// A JSON file of dispute values to render the template with
    #[arg(long)]
    pub context: Option<PathBuf>,
}
