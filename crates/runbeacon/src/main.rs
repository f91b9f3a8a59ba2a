//! Runbeacon - Slack notifier for completed Puppet runs.
//!
//! Invoked once per completed run by the host framework's report hook with
//! the run's outcome and node metadata on the command line. Loads
//! `slack.yaml` from the confdir, enriches the run with PuppetDB facts, and
//! posts the rendered summary to the configured webhook.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use runbeacon_report::{
    DEFAULT_FACTS, PuppetDbClient, RunContext, RunStatus, SlackNotifier, notify_run,
};

/// Runbeacon - Slack notifier for completed Puppet runs
#[derive(Parser)]
#[command(name = "runbeacon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Terminal status of the run (changed, failed, unchanged, ...)
    #[arg(long)]
    status: RunStatus,

    /// Certified name of the node the run executed on
    #[arg(long)]
    host: String,

    /// Puppet environment the run used
    #[arg(long)]
    environment: String,

    /// Run mode the agent reported
    #[arg(long, default_value = "agent")]
    runmode: String,

    /// Whether the run was a no-op (dry) run
    #[arg(long)]
    noop: bool,

    /// Directory containing slack.yaml
    #[arg(
        long,
        default_value = "/etc/puppetlabs/puppet",
        env = "RUNBEACON_CONFDIR"
    )]
    confdir: PathBuf,

    /// PuppetDB root URL for fact queries
    #[arg(
        long,
        default_value = "http://localhost:8080",
        env = "RUNBEACON_PUPPETDB_URL"
    )]
    puppetdb: String,

    /// Fact to include in the summary table (repeatable; defaults to
    /// tier, role, subrole)
    #[arg(long = "fact", value_name = "NAME")]
    facts: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "runbeacon=debug,runbeacon_report=debug,runbeacon_config=debug,info"
    } else {
        "runbeacon=info,runbeacon_report=info,runbeacon_config=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = runbeacon_config::load_config(&cli.confdir)?;

    let ctx = RunContext {
        host: cli.host,
        environment: cli.environment,
        runmode: cli.runmode,
        noop: cli.noop,
        status: cli.status,
    };
    let fact_names = if cli.facts.is_empty() {
        DEFAULT_FACTS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.facts
    };

    let source = PuppetDbClient::new(&cli.puppetdb)?;
    let notifier = SlackNotifier::new();
    notify_run(&ctx, &config, &fact_names, &source, &notifier).await?;

    tracing::debug!("notification delivered");
    Ok(())
}
