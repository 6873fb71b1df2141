//! spendgate CLI.
//!
//! - `actions`: list registered actions
//! - `run <name> --args <json>`: invoke an action (dry-run collaborators)
//! - `policy encode|decode`: inspect the policy wire form
//! - `tools`: program identifiers known for a network

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spendgate_agent::app_state::{builtin_provider, AppState};
use spendgate_agent::config::{self, AgentConfig};
use spendgate_agent::resolver::CidResolver;
use spendgate_agent::session::SigningKey;
use spendgate_core::error::{Result, SpendGateError};
use spendgate_core::policy::{decode_hex, encode_hex, TransferPolicy};

const DEFAULT_CONFIG: &str = "spendgate.yaml";

#[derive(Parser, Debug)]
#[command(name = "spendgate", version, about = "Policy-gated remote actions for agent toolkits")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ./spendgate.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered actions.
    Actions,

    /// Invoke an action. Reads the signing key from EVM_PRIVATE_KEY.
    Run {
        name: String,
        /// JSON object of action arguments.
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Encode or decode a transfer policy.
    #[command(subcommand)]
    Policy(PolicyCommand),

    /// Program identifiers known for a network.
    Tools {
        #[arg(long)]
        network: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Validate and encode a policy JSON file; prints 0x-hex.
    Encode {
        #[arg(long)]
        file: PathBuf,
    },
    /// Decode 0x-hex into policy JSON (maxAmount in smallest units).
    Decode { hex: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match run(cli).await {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.code().as_str(), "{e}");
            eprintln!("error [{}]: {e}", e.code().as_str());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Policy(PolicyCommand::Encode { file }) => {
            let raw = fs::read_to_string(&file).map_err(|e| {
                SpendGateError::InvalidArgument(format!("read {} failed: {e}", file.display()))
            })?;
            let record: TransferPolicy = serde_json::from_str(&raw)
                .map_err(|e| SpendGateError::InvalidArgument(format!("invalid policy json: {e}")))?;
            encode_hex(&record.validate()?)
        }
        Commands::Policy(PolicyCommand::Decode { hex }) => {
            let policy = decode_hex(&hex)?;
            to_pretty(&policy.to_record())
        }
        Commands::Tools { network } => {
            let cfg = load_config(cli.config.as_deref())?;
            let network = network.unwrap_or_else(|| cfg.network.clone());
            let resolver = CidResolver::from_config(&cfg.deployments)?;
            let mut lines = Vec::new();
            for tool in resolver.tool_names(&network) {
                let (cid, source) = resolver.resolve_with_source(&network, &tool)?;
                lines.push(format!("{tool}\t{cid}\t{source:?}"));
            }
            Ok(lines.join("\n"))
        }
        Commands::Actions => Ok(builtin_provider()
            .describe()
            .into_iter()
            .map(|(name, desc)| format!("{name}\t{desc}"))
            .collect::<Vec<_>>()
            .join("\n")),
        Commands::Run { name, args } => {
            let cfg = load_config(cli.config.as_deref())?;
            let key = SigningKey::from_env()?;
            let args = serde_json::from_str(&args)
                .map_err(|e| SpendGateError::InvalidArgument(format!("--args must be JSON: {e}")))?;
            let state = AppState::dry_run(cfg, key)?;
            state.run(&name, args).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AgentConfig> {
    match path {
        Some(p) => config::load_from_file(p),
        None if Path::new(DEFAULT_CONFIG).exists() => config::load_from_file(DEFAULT_CONFIG),
        None => config::load_from_str("version: 1"),
    }
}

fn to_pretty<T: serde::Serialize>(v: &T) -> Result<String> {
    serde_json::to_string_pretty(v).map_err(|e| SpendGateError::Internal(e.to_string()))
}
