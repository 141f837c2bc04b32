//! Council daemon — hosts a council and replays operation scripts against it.
//!
//! Callers named in a script are taken as already authenticated; the daemon
//! only maps them onto member ids.

mod replay;

use anyhow::Context;
use clap::Parser;
use council_governance::GovernanceConfig;
use council_types::MemberId;
use council_utils::{init_tracing, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "council-daemon", about = "Membership-gated governance ledger host")]
struct Cli {
    /// Path to a TOML governance configuration file. Missing keys take
    /// their defaults; CLI flags and env vars override file values.
    #[arg(long, env = "COUNCIL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the voting window, in seconds.
    #[arg(long, env = "COUNCIL_VOTING_DURATION_SECS")]
    voting_duration_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "COUNCIL_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as newline-delimited JSON.
    #[arg(long, env = "COUNCIL_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON operation script and print the resulting state.
    Replay {
        /// Owner identity (64 hex chars).
        #[arg(long)]
        owner: MemberId,

        /// Path to the JSON script.
        #[arg(long)]
        script: PathBuf,

        /// Initial clock value in Unix seconds.
        #[arg(long, default_value_t = 0)]
        start_time: u64,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<GovernanceConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = GovernanceConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        None => GovernanceConfig::default(),
    };
    if let Some(secs) = cli.voting_duration_secs {
        config.voting_duration_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(LogFormat::from_json_flag(cli.log_json), &cli.log_level);

    let config = load_config(&cli)?;

    match &cli.command {
        Command::Replay {
            owner,
            script,
            start_time,
        } => {
            let text = std::fs::read_to_string(script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let steps = replay::parse_script(&text)?;
            tracing::info!(steps = steps.len(), %owner, "replaying script");
            let report = replay::run(*owner, config, *start_time, &steps)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
