use alloy::primitives::Address;
use futures::future::join_all;
use serde::Serialize;
use tracing::info;

use crate::{
    client::ChainClients,
    family::TokenFamily,
    fetcher::{ChainFetch, ChainStatus, fetch_chain},
    registry::ChainRegistry,
    token::TokenRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReport {
    pub chain_id: u64,
    pub status: ChainStatus,
}

/// A holder's tokens across every registered chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Holdings {
    /// Registry order, then factory order within a chain
    pub records: Vec<TokenRecord>,
    pub chains: Vec<ChainReport>,
}

impl Holdings {
    fn from_fetches(fetches: Vec<ChainFetch>) -> Self {
        let mut holdings = Self::default();
        for fetch in fetches {
            holdings.chains.push(ChainReport {
                chain_id: fetch.chain_id,
                status: fetch.status,
            });
            holdings.records.extend(fetch.records);
        }
        holdings
    }

    /// Number of chains that failed or had no client.
    pub fn unavailable(&self) -> usize {
        self.chains
            .iter()
            .filter(|c| c.status.is_unavailable())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetches every chain in `registry` concurrently and flattens the results.
pub async fn aggregate<C: ChainClients>(
    registry: &ChainRegistry,
    clients: &C,
    family: TokenFamily,
    holder: Address,
) -> Holdings {
    let fetches = join_all(
        registry
            .iter()
            .map(|entry| fetch_chain(clients, family, *entry, holder)),
    )
    .await;

    let holdings = Holdings::from_fetches(fetches);
    info!(
        %family,
        %holder,
        records = holdings.records.len(),
        chains = holdings.chains.len(),
        unavailable = holdings.unavailable(),
        "aggregated holdings"
    );
    holdings
}
