use std::sync::Arc;

use alloy::primitives::Address;
use clowder_core::{
    chain::Chain, client::RpcClients, family::TokenFamily, pages::HoldingsPage, params::Account,
    registry::ChainRegistry, view::ViewDriver,
};
use color_eyre::eyre::{self, WrapErr as _};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::render;

#[derive(clap::Args, Debug)]
pub(crate) struct Holdings {
    /// Connected wallet address. Without it the page stays locked.
    #[arg(long)]
    pub holder: Option<Address>,
}

impl Holdings {
    pub(crate) async fn run(
        &self,
        family: TokenFamily,
        chains: &[Chain],
        clients: Arc<RpcClients>,
        json: bool,
        shutdown_token: CancellationToken,
    ) -> eyre::Result<()> {
        let registry = Arc::new(ChainRegistry::for_family(chains, family));
        info!(%family, chains = registry.len(), "built chain registry");

        let account = Account {
            address: self.holder,
            connecting: false,
        };
        let (_account_tx, account_rx) = watch::channel(account.holdings_prerequisites());

        let mut handle = ViewDriver::spawn(
            HoldingsPage::new(registry, clients, family),
            account_rx,
            shutdown_token,
        );
        let state = handle.settled().await?;

        if json {
            let json = serde_json::to_string_pretty(&state).wrap_err("failed to serialize holdings")?;
            println!("{json}");
        } else {
            print!("{}", render::holdings(&state, family));
        }

        handle.shutdown().await
    }
}
