use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use clowder_core::{
    client::RpcClients,
    config::{Config, DEFAULT_CONFIG_PATH},
    family::TokenFamily,
};
use color_eyre::eyre::{self, WrapErr as _};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{holdings, token};

#[derive(Parser)]
#[command(name = "clowder", about = "Browse TNTs and CATs across chains")]
pub(crate) struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the settled page state as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the TNTs a holder deployed, across every configured chain
    #[command(name = "my-tnts")]
    MyTnts(holdings::Holdings),

    /// List the CATs a holder owns, across every configured chain
    #[command(name = "my-cats")]
    MyCats(holdings::Holdings),

    /// Show a single TNT
    Token(token::Token),
}

impl Cli {
    pub(crate) fn load_config(&self) -> eyre::Result<Config> {
        Config::load_from(&self.config)
            .wrap_err_with(|| format!("failed to load {}", self.config.display()))
    }

    pub(crate) async fn run(self, config: Config, shutdown_token: CancellationToken) -> eyre::Result<()> {
        let chains = config.build_chains()?;

        for chain in &chains {
            info!(chain = %chain, rpc = !chain.rpc_url.is_empty(), "🔗 Initialized chain info from config");
        }

        let clients = Arc::new(RpcClients::connect(&chains).await);

        match self.command {
            Commands::MyTnts(cmd) => {
                cmd.run(TokenFamily::Tnt, &chains, clients, self.json, shutdown_token)
                    .await
            }
            Commands::MyCats(cmd) => {
                cmd.run(TokenFamily::Cat, &chains, clients, self.json, shutdown_token)
                    .await
            }
            Commands::Token(cmd) => cmd.run(clients, self.json, shutdown_token).await,
        }
    }
}
