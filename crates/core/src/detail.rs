use chrono::Utc;
use color_eyre::eyre::{self, OptionExt as _, WrapErr as _};
use tracing::{debug, instrument};

use crate::{
    client::{ChainClients, ReadClient as _},
    family::TokenFamily,
    params::DetailParams,
    token::TokenDetails,
};

/// Reads name, symbol and the revocability flag of one TNT.
///
/// All three reads run concurrently and all must succeed; there is no partial result.
#[instrument(skip_all, fields(chain.id = params.chain_id, vault = %params.vault))]
pub async fn fetch_details<C: ChainClients>(
    clients: &C,
    params: DetailParams,
) -> eyre::Result<TokenDetails> {
    let client = clients
        .client(params.chain_id)
        .ok_or_eyre("no read client available for chain")?;

    let (token_name, token_symbol, revokable) = futures::try_join!(
        client.token_name(TokenFamily::Tnt, params.vault),
        client.token_symbol(TokenFamily::Tnt, params.vault),
        client.revokable(params.vault),
    )
    .wrap_err("failed to read token details")?;

    debug!(%token_name, %token_symbol, revokable, "fetched token details");

    Ok(TokenDetails {
        chain_id: params.chain_id,
        address: params.vault,
        token_name,
        token_symbol,
        revokable,
        fetched_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClient, FakeClients, addr};

    fn params() -> DetailParams {
        DetailParams {
            vault: addr(7),
            chain_id: 137,
        }
    }

    #[tokio::test]
    async fn test_fetch_details_success() {
        let clients = FakeClients::default().with_chain(
            137,
            FakeClient::default()
                .with_token(addr(7), "Trust", "TRST")
                .with_revokable(addr(7), true),
        );

        let before = Utc::now();
        let details = fetch_details(&clients, params()).await.expect("details");
        let after = Utc::now();

        assert_eq!(details.token_name, "Trust");
        assert_eq!(details.token_symbol, "TRST");
        assert!(details.revokable);
        assert_eq!(details.address, addr(7));
        assert_eq!(details.chain_id, 137);
        assert!(before <= details.fetched_at && details.fetched_at <= after);
    }

    #[tokio::test]
    async fn test_fetch_details_fails_when_flag_read_fails() {
        // name and symbol resolve, revokable has no answer
        let clients = FakeClients::default().with_chain(
            137,
            FakeClient::default().with_token(addr(7), "Trust", "TRST"),
        );

        assert!(fetch_details(&clients, params()).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_details_fails_without_client() {
        let clients = FakeClients::default();

        assert!(fetch_details(&clients, params()).await.is_err());
    }
}
