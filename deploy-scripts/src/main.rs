use clap::Parser;
use deploy_scripts::{cli::Cli, errors::DeployError};

#[tokio::main]
async fn main() -> Result<(), DeployError> {
    let Cli { command } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    command.run().await
}
