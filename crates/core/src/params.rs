use std::str::FromStr;

use alloy::primitives::Address;
use serde::Deserialize;

pub const INVALID_PARAMS: &str = "Invalid token address or chain ID";

/// What a view has to work with before it may fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerequisites<P> {
    /// Inputs not available yet; the view stays idle
    Pending,
    /// Inputs present but unusable; the view shows this message without fetching
    Invalid(&'static str),
    Ready(P),
}

/// Selects the token shown on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailParams {
    pub vault: Address,
    pub chain_id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetailQuery {
    vault: Option<String>,
    #[serde(rename = "chainId")]
    chain_id: Option<String>,
}

impl DetailParams {
    /// Interprets the raw `vault` and `chainId` query values. Empty values count as absent.
    pub fn from_query(vault: Option<&str>, chain_id: Option<&str>) -> Prerequisites<Self> {
        let vault = vault.map(str::trim).filter(|v| !v.is_empty());
        let chain_id = chain_id.map(str::trim).filter(|c| !c.is_empty());

        match (vault, chain_id) {
            (None, None) => Prerequisites::Pending,
            (Some(vault), Some(chain_id)) => match Self::parse(vault, chain_id) {
                Some(params) => Prerequisites::Ready(params),
                None => Prerequisites::Invalid(INVALID_PARAMS),
            },
            _ => Prerequisites::Invalid(INVALID_PARAMS),
        }
    }

    /// Parses a query string such as `vault=0x..&chainId=137`. Anything up to and
    /// including a `?` is ignored, so full links like `/t?vault=..` work too.
    pub fn from_query_str(query: &str) -> Prerequisites<Self> {
        let query = query.split_once('?').map_or(query, |(_, q)| q);
        match serde_urlencoded::from_str::<DetailQuery>(query) {
            Ok(q) => Self::from_query(q.vault.as_deref(), q.chain_id.as_deref()),
            Err(_) => Prerequisites::Invalid(INVALID_PARAMS),
        }
    }

    fn parse(vault: &str, chain_id: &str) -> Option<Self> {
        let vault = Address::from_str(vault).ok()?;
        let chain_id = parse_chain_id(chain_id).filter(|id| *id != 0)?;
        Some(Self { vault, chain_id })
    }
}

/// Decimal, or hex with a `0x` prefix.
fn parse_chain_id(raw: &str) -> Option<u64> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

/// The wallet provider's view of the connected holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Account {
    pub address: Option<Address>,
    /// Wallet still connecting; the address is not trusted yet
    pub connecting: bool,
}

impl Account {
    pub fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
            connecting: false,
        }
    }

    pub fn holdings_prerequisites(&self) -> Prerequisites<Address> {
        match self.address {
            Some(address) if !self.connecting => Prerequisites::Ready(address),
            _ => Prerequisites::Pending,
        }
    }
}
