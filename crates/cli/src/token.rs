use std::{
    io::{self, Write},
    sync::Arc,
};

use clowder_core::{
    client::RpcClients,
    clipboard::{Clipboard, Notification, copy_to_clipboard},
    pages::DetailPage,
    params::{DetailParams, Prerequisites},
    token::TokenDetails,
    view::{ViewDriver, ViewState},
};
use color_eyre::eyre::{self, WrapErr as _};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{clipboard::TerminalClipboard, render};

#[derive(clap::Args, Debug)]
pub(crate) struct Token {
    /// Token contract address (the `vault` query parameter)
    #[arg(long, conflicts_with = "link")]
    vault: Option<String>,

    /// Chain the token lives on (the `chainId` query parameter)
    #[arg(long, conflicts_with = "link")]
    chain_id: Option<String>,

    /// Detail page link or query string, e.g. `/t?vault=0x..&chainId=137`
    #[arg(long)]
    link: Option<String>,

    /// Copy the contract address to the clipboard once loaded
    #[arg(long)]
    copy: bool,
}

impl Token {
    fn prerequisites(&self) -> Prerequisites<DetailParams> {
        match &self.link {
            Some(link) => DetailParams::from_query_str(link),
            None => DetailParams::from_query(self.vault.as_deref(), self.chain_id.as_deref()),
        }
    }

    pub(crate) async fn run(
        &self,
        clients: Arc<RpcClients>,
        json: bool,
        shutdown_token: CancellationToken,
    ) -> eyre::Result<()> {
        let (_params_tx, params_rx) = watch::channel(self.prerequisites());

        let mut handle =
            ViewDriver::spawn(DetailPage::new(clients), params_rx, shutdown_token);
        let state = handle.settled().await?;

        write_state(&mut io::stdout(), &state, json)?;

        if self.copy {
            match copy_address(&state, &TerminalClipboard::stderr()) {
                Some(notification) => eprintln!("{}", render::notification(notification)),
                None => eprintln!("nothing to copy"),
            }
        }

        handle.shutdown().await
    }
}

fn write_state(
    out: &mut impl Write,
    state: &ViewState<TokenDetails>,
    json: bool,
) -> eyre::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, state)
            .wrap_err("failed to serialize token details")?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::details(state))?;
    }
    Ok(())
}

/// Copies the loaded contract address. `None` when nothing has loaded.
fn copy_address(
    state: &ViewState<TokenDetails>,
    clipboard: &impl Clipboard,
) -> Option<Notification> {
    match state {
        ViewState::Success(details) => {
            Some(copy_to_clipboard(clipboard, &details.address.to_string()))
        }
        _ => None,
    }
}
