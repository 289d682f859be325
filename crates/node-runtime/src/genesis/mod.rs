//! # Genesis Bootstrap
//!
//! Loads the genesis entity list and seeds a fresh session with it. The
//! bootstrapped state is committed at height 0.

use anyhow::{Context, Result};
use gm_02_governance::{AppContext, Genesis, GovernanceApi};
use shared_crypto::Hash;
use std::path::Path;
use tracing::info;

pub fn load_genesis(path: &Path) -> Result<Genesis> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read genesis file {}", path.display()))?;
    Genesis::from_json(&json)
        .with_context(|| format!("Failed to parse genesis file {}", path.display()))
}

/// Register genesis entities, commit, and return the genesis root hash.
pub fn bootstrap(ctx: &mut AppContext, genesis: &Genesis) -> Result<Hash> {
    ctx.apply_genesis(genesis)
        .context("Failed to apply genesis")?;
    ctx.begin_block(0).context("BeginBlock at genesis")?;
    ctx.end_block(0).context("EndBlock at genesis")?;
    let hash = ctx.commit().context("Failed to commit genesis")?;
    info!(
        entities = genesis.entities().len(),
        hash = %hex::encode(hash),
        "genesis committed"
    );
    Ok(hash)
}
