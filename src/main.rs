use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use postman::cli::{self, Cli};
use postman::{logging, SesClient, SesConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(cli.verbose).context("failed to initialise logging")?;

    let config = SesConfig::from_env(cli.overrides())?;
    tracing::debug!(?config, "resolved configuration");
    let client = SesClient::new(config)?;

    let mut stdin = tokio::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = cli::dispatch(&client, &cli, &mut stdin, &mut out).await?;
    out.flush()?;

    Ok(outcome.into())
}
