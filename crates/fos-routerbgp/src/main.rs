//! routerbgpctl - manage FortiOS `router bgp` through a FortiManager
//!
//! Applies, reads, deletes or imports the object and keeps its state in a
//! JSON file between runs. The resulting state is printed as
//! attribute-named JSON on stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fos_client::JsonRpcClient;
use fos_objmap::encode_attr_object;
use fos_routerbgp::{ProviderConfig, Resource, ResourceData, RouterBgpResource, StateFile};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// FortiOS router bgp resource
#[derive(Parser, Debug)]
#[command(name = "routerbgpctl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Provider configuration (YAML)
    #[arg(short = 'p', long, default_value = "provider.yaml")]
    provider: PathBuf,

    /// State file (JSON)
    #[arg(short = 's', long, default_value = "routerbgp.state.json")]
    state: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update the object from a configuration file
    Apply {
        /// Resource configuration (YAML or JSON)
        #[arg(short = 'c', long)]
        config: PathBuf,
    },
    /// Refresh state from the device
    Read,
    /// Delete the object and its state
    Delete,
    /// Take an existing object under management
    Import {
        /// Object identifier
        #[arg(default_value = fos_routerbgp::ROUTER_BGP_ID)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let provider = ProviderConfig::load(&args.provider)?;
    let client = JsonRpcClient::new(&provider.client)
        .with_context(|| format!("building client for {}", provider.client.url))?;
    let resource = RouterBgpResource::new(client, provider.defaults());
    let saved = StateFile::load(&args.state)?;

    let data = match args.command {
        Command::Apply { config } => {
            let mut data = load_config(&config)?;
            let update = match &saved {
                Some(saved) => {
                    saved.restore_into(&mut data)?;
                    data.id().is_some()
                }
                None => false,
            };
            if update {
                resource.update(&mut data).await?;
            } else {
                resource.create(&mut data).await?;
            }
            data
        }
        Command::Read => {
            let Some(saved) = saved else {
                bail!("no state at {}; apply or import first", args.state.display());
            };
            let mut data = saved.to_data()?;
            resource.read(&mut data).await?;
            data
        }
        Command::Delete => {
            let Some(saved) = saved else {
                bail!("no state at {}", args.state.display());
            };
            let mut data = saved.to_data()?;
            resource.delete(&mut data).await?;
            std::fs::remove_file(&args.state)
                .with_context(|| format!("removing {}", args.state.display()))?;
            info!(state = %args.state.display(), "State removed");
            return Ok(());
        }
        Command::Import { id } => {
            let mut data = ResourceData::default();
            resource.import(&id, &mut data).await?;
            data
        }
    };

    if data.id().is_none() {
        info!(resource = resource.name(), "Object is gone; state not saved");
        return Ok(());
    }

    StateFile::from_data(&data).save(&args.state)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&encode_attr_object(data.state()))?
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<ResourceData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    let data = ResourceData::from_attr_value(&value)
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(data)
}
