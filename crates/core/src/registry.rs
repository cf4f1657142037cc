use alloy::primitives::Address;
use tracing::warn;

use crate::{chain::Chain, family::TokenFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEntry {
    pub chain_id: u64,
    pub factory_address: Address,
}

/// Immutable chain id -> factory mapping, iterated in configuration order.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    entries: Vec<ChainEntry>,
}

impl ChainRegistry {
    /// Builds a registry, keeping the first entry for a repeated chain id.
    pub fn new(entries: impl IntoIterator<Item = ChainEntry>) -> Self {
        let mut kept: Vec<ChainEntry> = Vec::new();
        for entry in entries {
            if kept.iter().any(|e| e.chain_id == entry.chain_id) {
                warn!(chain.id = entry.chain_id, "duplicate registry entry ignored");
                continue;
            }
            kept.push(entry);
        }
        Self { entries: kept }
    }

    /// Registry of every chain that has a factory for `family`.
    pub fn for_family(chains: &[Chain], family: TokenFamily) -> Self {
        Self::new(chains.iter().filter_map(|chain| {
            chain.factory(family).map(|factory_address| ChainEntry {
                chain_id: chain.chain_id(),
                factory_address,
            })
        }))
    }

    pub fn lookup(&self, chain_id: u64) -> Option<Address> {
        self.entries
            .iter()
            .find(|e| e.chain_id == chain_id)
            .map(|e| e.factory_address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
