//! # Governmint Node Runtime
//!
//! Boots a governance application from files and replays a transaction log
//! against it. There is no network listener: the consensus host is simulated
//! by the log.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load governance configuration and genesis
//! 3. Open a session, apply genesis, commit height 0
//! 4. Replay the transaction log, committing each block
//! 5. Report the final root hash

use anyhow::{Context, Result};
use gm_02_governance::{Application, GovernanceApi};
use node_runtime::container::{parse_gov_config, DEFAULT_LOG_FILTER};
use node_runtime::genesis::{bootstrap, load_genesis};
use node_runtime::{parse_tx_log, replay, NodeConfig, USAGE};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let node = NodeConfig::from_args(std::env::args().skip(1)).context(USAGE)?;

    let config_json = std::fs::read_to_string(&node.config_path)
        .with_context(|| format!("Failed to read config {}", node.config_path.display()))?;
    let config = parse_gov_config(&config_json)?;
    info!(?config, "configuration loaded");

    let genesis = load_genesis(&node.genesis_path)?;

    let app = Application::new(config);
    let mut ctx = app.open().context("Failed to open session")?;
    bootstrap(&mut ctx, &genesis)?;

    if let Some(path) = &node.txlog_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tx log {}", path.display()))?;
        let entries = parse_tx_log(&text)?;
        let summary = replay(&mut ctx, &entries)?;
        info!(
            blocks = summary.blocks,
            accepted = summary.accepted,
            rejected = summary.rejected,
            validator_updates = summary.validator_updates,
            "replay finished"
        );
    }

    info!(info = %ctx.info(), "final state");
    info!(hash = %hex::encode(app.committed_hash()), "final root hash");
    Ok(())
}
