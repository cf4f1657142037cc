//! In-memory read clients for exercising fetch logic without a node.
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use alloy::primitives::Address;
use color_eyre::eyre::{self, eyre};

use crate::{
    client::{ChainClients, ReadClient},
    family::TokenFamily,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeClient {
    /// Enumeration results by family; a missing family reverts
    pub listings: HashMap<TokenFamily, Vec<Address>>,
    pub names: HashMap<Address, String>,
    pub symbols: HashMap<Address, String>,
    pub revokable: HashMap<Address, bool>,
    /// Tokens whose reads sleep before answering
    pub delays: HashMap<Address, Duration>,
    /// Tokens whose reads all fail
    pub broken: HashSet<Address>,
}

impl FakeClient {
    pub fn with_listing(mut self, family: TokenFamily, tokens: &[Address]) -> Self {
        self.listings.insert(family, tokens.to_vec());
        self
    }

    pub fn with_token(mut self, token: Address, name: &str, symbol: &str) -> Self {
        self.names.insert(token, name.to_string());
        self.symbols.insert(token, symbol.to_string());
        self
    }

    pub fn with_revokable(mut self, token: Address, revokable: bool) -> Self {
        self.revokable.insert(token, revokable);
        self
    }

    pub fn with_delay(mut self, token: Address, delay: Duration) -> Self {
        self.delays.insert(token, delay);
        self
    }

    pub fn with_broken(mut self, token: Address) -> Self {
        self.broken.insert(token);
        self
    }

    async fn read<T: Clone + Sync>(&self, table: &HashMap<Address, T>, token: Address) -> eyre::Result<T> {
        if let Some(delay) = self.delays.get(&token) {
            tokio::time::sleep(*delay).await;
        }
        if self.broken.contains(&token) {
            return Err(eyre!("execution reverted"));
        }
        table
            .get(&token)
            .cloned()
            .ok_or_else(|| eyre!("no data for {token}"))
    }
}

impl ReadClient for FakeClient {
    async fn list_tokens(
        &self,
        family: TokenFamily,
        _factory: Address,
        _holder: Address,
    ) -> eyre::Result<Vec<Address>> {
        self.listings
            .get(&family)
            .cloned()
            .ok_or_else(|| eyre!("enumeration reverted"))
    }

    async fn token_name(&self, _family: TokenFamily, token: Address) -> eyre::Result<String> {
        self.read(&self.names, token).await
    }

    async fn token_symbol(&self, _family: TokenFamily, token: Address) -> eyre::Result<String> {
        self.read(&self.symbols, token).await
    }

    async fn revokable(&self, token: Address) -> eyre::Result<bool> {
        self.read(&self.revokable, token).await
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeClients {
    pub chains: HashMap<u64, FakeClient>,
}

impl FakeClients {
    pub fn with_chain(mut self, chain_id: u64, client: FakeClient) -> Self {
        self.chains.insert(chain_id, client);
        self
    }
}

impl ChainClients for FakeClients {
    type Client = FakeClient;

    fn client(&self, chain_id: u64) -> Option<&FakeClient> {
        self.chains.get(&chain_id)
    }
}

/// Deterministic test address derived from a small integer.
pub(crate) fn addr(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    Address::from(bytes)
}
