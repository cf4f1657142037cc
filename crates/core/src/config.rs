use std::{collections::HashSet, path::Path};

use color_eyre::eyre::{self, Context as _, eyre};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chain::Chain;

pub const DEFAULT_CONFIG_PATH: &str = "clowder.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chains to read from, in display order
    pub chains: Vec<ChainConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EIP-155 chain id
    pub chain_id: u64,

    /// RPC endpoint URL. Empty means the chain has no read client.
    #[serde(default)]
    pub rpc_url: String,

    /// Address of the TNT vault factory on this chain
    #[serde(default)]
    pub tnt_factory: Option<String>,

    /// Address of the CAT factory on this chain
    #[serde(default)]
    pub cat_factory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from `clowder.yaml` and `CLOWDER_` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Yaml::file(path))
                .merge(Env::prefixed("CLOWDER_").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    /// Validate the chain section into [`Chain`]s, preserving order.
    pub fn build_chains(&self) -> eyre::Result<Vec<Chain>> {
        let mut seen = HashSet::new();
        let chains = self
            .chains
            .iter()
            .map(|cfg| {
                if !seen.insert(cfg.chain_id) {
                    return Err(eyre!("duplicate chain id {} in config", cfg.chain_id));
                }
                let chain = Chain::new(
                    cfg.chain_id,
                    &cfg.rpc_url,
                    cfg.tnt_factory.as_deref(),
                    cfg.cat_factory.as_deref(),
                )
                .wrap_err("failed to parse chain info")?;
                debug!(chain = %chain, "parsed chain config");
                Ok(chain)
            })
            .collect::<eyre::Result<Vec<_>>>()?;

        info!(chains = chains.len(), "loaded chain configs");
        Ok(chains)
    }
}
