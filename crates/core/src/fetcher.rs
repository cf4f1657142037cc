use alloy::primitives::Address;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    client::{ChainClients, ReadClient},
    family::TokenFamily,
    registry::ChainEntry,
    token::TokenRecord,
};

/// How a chain fared in one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainStatus {
    /// At least one record resolved
    Ok,
    /// Enumeration succeeded but nothing resolved
    Empty,
    /// The factory enumeration call failed
    Failed,
    /// No read client exists for the chain
    Unsupported,
}

impl ChainStatus {
    pub fn is_unavailable(self) -> bool {
        matches!(self, ChainStatus::Failed | ChainStatus::Unsupported)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainFetch {
    pub chain_id: u64,
    pub status: ChainStatus,
    pub records: Vec<TokenRecord>,
}

impl ChainFetch {
    fn empty(chain_id: u64, status: ChainStatus) -> Self {
        Self {
            chain_id,
            status,
            records: Vec::new(),
        }
    }
}

/// Lists the holder's tokens on one chain and resolves their name and symbol.
///
/// Never fails: a chain without a client, a failed enumeration, or a token whose
/// metadata can't be read all shrink the result instead. Records keep the order
/// the factory returned them in.
#[instrument(skip_all, fields(chain.id = entry.chain_id, %family, %holder))]
pub async fn fetch_chain<C: ChainClients>(
    clients: &C,
    family: TokenFamily,
    entry: ChainEntry,
    holder: Address,
) -> ChainFetch {
    let Some(client) = clients.client(entry.chain_id) else {
        warn!("no read client available for chain");
        return ChainFetch::empty(entry.chain_id, ChainStatus::Unsupported);
    };

    let addresses = match client
        .list_tokens(family, entry.factory_address, holder)
        .await
    {
        Ok(addresses) => addresses,
        Err(e) => {
            warn!(factory = %entry.factory_address, error = %e, "token enumeration failed");
            return ChainFetch::empty(entry.chain_id, ChainStatus::Failed);
        }
    };
    debug!(tokens = addresses.len(), "enumerated tokens");

    let records: Vec<TokenRecord> = join_all(
        addresses
            .into_iter()
            .map(|address| fetch_record(client, family, entry.chain_id, address)),
    )
    .await
    .into_iter()
    .flatten()
    .collect();

    let status = if records.is_empty() {
        ChainStatus::Empty
    } else {
        ChainStatus::Ok
    };

    ChainFetch {
        chain_id: entry.chain_id,
        status,
        records,
    }
}

async fn fetch_record<R: ReadClient>(
    client: &R,
    family: TokenFamily,
    chain_id: u64,
    address: Address,
) -> Option<TokenRecord> {
    match futures::try_join!(
        client.token_name(family, address),
        client.token_symbol(family, address)
    ) {
        Ok((token_name, token_symbol)) => Some(TokenRecord {
            family,
            chain_id,
            address,
            token_name,
            token_symbol,
        }),
        Err(e) => {
            warn!(token = %address, error = %e, "failed to fetch token metadata");
            None
        }
    }
}
