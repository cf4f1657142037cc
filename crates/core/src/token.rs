use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::family::TokenFamily;

/// Name and symbol of one token found through a factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub family: TokenFamily,
    pub chain_id: u64,
    pub address: Address,
    pub token_name: String,
    pub token_symbol: String,
}

impl TokenRecord {
    /// Link to the token's detail page. CAT pages are keyed by address alone.
    pub fn detail_link(&self) -> String {
        match self.family {
            TokenFamily::Tnt => format!("/t?vault={}&chainId={}", self.address, self.chain_id),
            TokenFamily::Cat => format!("/cat/{}", self.address),
        }
    }

    /// Name to show, falling back to the address for unnamed tokens.
    pub fn display_name(&self) -> String {
        if self.token_name.is_empty() {
            self.address.to_string()
        } else {
            self.token_name.clone()
        }
    }
}

/// Everything the single-token page shows. Built only when every read succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    pub chain_id: u64,
    pub address: Address,
    pub token_name: String,
    pub token_symbol: String,
    pub revokable: bool,
    /// When the reads completed
    pub fetched_at: DateTime<Utc>,
}

impl TokenDetails {
    pub fn actions_link(&self) -> String {
        format!("/token-actions?vault={}&chainId={}", self.address, self.chain_id)
    }
}
