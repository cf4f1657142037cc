//! The dashboard's pages expressed as [`Loader`]s for a [`ViewDriver`](crate::view::ViewDriver).
use std::sync::Arc;

use alloy::primitives::Address;
use color_eyre::eyre;
use futures::{FutureExt as _, future::BoxFuture};

use crate::{
    aggregator::{Holdings, aggregate},
    client::ChainClients,
    detail::fetch_details,
    family::TokenFamily,
    params::DetailParams,
    registry::ChainRegistry,
    token::TokenDetails,
    view::Loader,
};

pub const DETAILS_ERROR: &str = "Failed to fetch token details";

/// "My TNTs" / "My CATs": every token of one family the holder has, across all chains.
pub struct HoldingsPage<C> {
    registry: Arc<ChainRegistry>,
    clients: Arc<C>,
    family: TokenFamily,
}

impl<C> HoldingsPage<C> {
    pub fn new(registry: Arc<ChainRegistry>, clients: Arc<C>, family: TokenFamily) -> Self {
        Self {
            registry,
            clients,
            family,
        }
    }
}

impl<C: ChainClients + 'static> Loader for HoldingsPage<C> {
    type Params = Address;
    type Output = Holdings;

    fn error_message(&self) -> String {
        format!("Failed to fetch {}s. Please try again later.", self.family)
    }

    fn load(&self, holder: Address) -> BoxFuture<'static, eyre::Result<Holdings>> {
        let registry = Arc::clone(&self.registry);
        let clients = Arc::clone(&self.clients);
        let family = self.family;

        async move { Ok(aggregate(&registry, clients.as_ref(), family, holder).await) }.boxed()
    }
}

/// The single-token page selected by `vault` and `chainId`.
pub struct DetailPage<C> {
    clients: Arc<C>,
}

impl<C> DetailPage<C> {
    pub fn new(clients: Arc<C>) -> Self {
        Self { clients }
    }
}

impl<C: ChainClients + 'static> Loader for DetailPage<C> {
    type Params = DetailParams;
    type Output = TokenDetails;

    fn error_message(&self) -> String {
        DETAILS_ERROR.to_string()
    }

    fn load(&self, params: DetailParams) -> BoxFuture<'static, eyre::Result<TokenDetails>> {
        let clients = Arc::clone(&self.clients);

        async move { fetch_details(clients.as_ref(), params).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::watch;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::{
        params::{Account, INVALID_PARAMS, Prerequisites},
        registry::ChainEntry,
        testing::{FakeClient, FakeClients, addr},
        view::{ViewDriver, ViewState},
    };

    fn detail_clients() -> Arc<FakeClients> {
        Arc::new(
            FakeClients::default()
                .with_chain(
                    137,
                    FakeClient::default()
                        .with_token(addr(1), "Slow", "SLW")
                        .with_revokable(addr(1), true)
                        .with_delay(addr(1), Duration::from_millis(500))
                        .with_token(addr(2), "Fast", "FST")
                        .with_revokable(addr(2), false)
                        // no revokable answer for this one
                        .with_token(addr(3), "Partial", "PRT"),
                ),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_page_success() {
        let (_params_tx, params_rx) = watch::channel(DetailParams::from_query_str(&format!(
            "vault={}&chainId=137",
            addr(2)
        )));
        let mut handle = ViewDriver::spawn(
            DetailPage::new(detail_clients()),
            params_rx,
            CancellationToken::new(),
        );

        let ViewState::Success(details) = handle.settled().await.unwrap() else {
            panic!("expected details");
        };
        assert_eq!(details.token_name, "Fast");
        assert_eq!(details.token_symbol, "FST");
        assert!(!details.revokable);
        assert_eq!(details.address, addr(2));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_page_flag_failure_is_error() {
        let (_params_tx, params_rx) = watch::channel(Prerequisites::Ready(DetailParams {
            vault: addr(3),
            chain_id: 137,
        }));
        let mut handle = ViewDriver::spawn(
            DetailPage::new(detail_clients()),
            params_rx,
            CancellationToken::new(),
        );

        assert_eq!(
            handle.settled().await.unwrap(),
            ViewState::Error(DETAILS_ERROR.to_string())
        );

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_page_invalid_params() {
        let (_params_tx, params_rx) =
            watch::channel(DetailParams::from_query(Some("0xbad"), Some("137")));
        let mut handle = ViewDriver::spawn(
            DetailPage::new(detail_clients()),
            params_rx,
            CancellationToken::new(),
        );

        assert_eq!(
            handle.settled().await.unwrap(),
            ViewState::Error(INVALID_PARAMS.to_string())
        );

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_page_reflects_newest_params() {
        let slow = DetailParams {
            vault: addr(1),
            chain_id: 137,
        };
        let fast = DetailParams {
            vault: addr(2),
            chain_id: 137,
        };
        let (params_tx, params_rx) = watch::channel(Prerequisites::Ready(slow));
        let mut handle = ViewDriver::spawn(
            DetailPage::new(detail_clients()),
            params_rx,
            CancellationToken::new(),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.current().is_loading());
        params_tx.send(Prerequisites::Ready(fast)).unwrap();

        let settled = handle.settled().await.unwrap();
        let ViewState::Success(details) = &settled else {
            panic!("expected details");
        };
        assert_eq!(details.address, addr(2));

        // let the slow read finish; it belongs to a superseded cycle
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(handle.current(), settled);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_holdings_page_follows_account() {
        let registry = Arc::new(ChainRegistry::new([
            ChainEntry {
                chain_id: 61,
                factory_address: addr(1061),
            },
            ChainEntry {
                chain_id: 137,
                factory_address: addr(1137),
            },
        ]));
        let clients = Arc::new(
            FakeClients::default()
                .with_chain(
                    61,
                    FakeClient::default()
                        .with_listing(TokenFamily::Tnt, &[addr(10), addr(11)])
                        .with_token(addr(10), "Ten", "TEN")
                        .with_token(addr(11), "Eleven", "ELV")
                        .with_broken(addr(11)),
                )
                .with_chain(137, FakeClient::default()),
        );

        let (account_tx, account_rx) = watch::channel(Account::default().holdings_prerequisites());
        let mut handle = ViewDriver::spawn(
            HoldingsPage::new(registry, clients, TokenFamily::Tnt),
            account_rx,
            CancellationToken::new(),
        );
        assert_eq!(handle.current(), ViewState::Idle);

        let mut state_rx = handle.state_rx();
        account_tx
            .send(Account::connected(addr(99)).holdings_prerequisites())
            .unwrap();
        state_rx.changed().await.unwrap();

        let ViewState::Success(holdings) = handle.settled().await.unwrap() else {
            panic!("expected holdings");
        };
        assert_eq!(holdings.records.len(), 1);
        assert_eq!(holdings.records[0].token_symbol, "TEN");
        assert_eq!(holdings.unavailable(), 1);

        handle.shutdown().await.unwrap();
    }

    #[test]
    fn test_holdings_error_message_names_family() {
        let page = HoldingsPage::new(
            Arc::new(ChainRegistry::default()),
            Arc::new(FakeClients::default()),
            TokenFamily::Tnt,
        );
        assert_eq!(
            page.error_message(),
            "Failed to fetch TNTs. Please try again later."
        );
    }
}
