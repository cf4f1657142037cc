use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy::primitives::Address;
use color_eyre::eyre::{self, Context, eyre};

use crate::family::TokenFamily;

/// A configured EVM chain: where to read from and which factories live there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    pub metadata: alloy_chains::Chain,
    pub rpc_url: String,
    pub tnt_factory: Option<Address>,
    pub cat_factory: Option<Address>,
}

impl Chain {
    pub fn new(
        chain_id: u64,
        rpc_url: &str,
        tnt_factory: Option<&str>,
        cat_factory: Option<&str>,
    ) -> eyre::Result<Self> {
        if chain_id == 0 {
            return Err(eyre!("chain id must be non-zero"));
        }
        let metadata = alloy_chains::Chain::from_id(chain_id);

        let tnt_factory = tnt_factory
            .map(Address::from_str)
            .transpose()
            .wrap_err_with(|| format!("failed to parse TNT factory address for chain {chain_id}"))?;
        let cat_factory = cat_factory
            .map(Address::from_str)
            .transpose()
            .wrap_err_with(|| format!("failed to parse CAT factory address for chain {chain_id}"))?;

        Ok(Self {
            metadata,
            rpc_url: rpc_url.trim().to_string(),
            tnt_factory,
            cat_factory,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.metadata.id()
    }

    pub fn factory(&self, family: TokenFamily) -> Option<Address> {
        match family {
            TokenFamily::Tnt => self.tnt_factory,
            TokenFamily::Cat => self.cat_factory,
        }
    }

    #[cfg(test)]
    pub fn polygon() -> Self {
        Self::new(
            137,
            "https://polygon-rpc.com",
            Some("0x00000000000000000000000000000000000000a1"),
            Some("0x00000000000000000000000000000000000000c1"),
        )
        .expect("valid test chain")
    }

    #[cfg(test)]
    pub fn scroll_sepolia() -> Self {
        Self::new(
            534351,
            "https://sepolia-rpc.scroll.io",
            Some("0x00000000000000000000000000000000000000a2"),
            None,
        )
        .expect("valid test chain")
    }

    #[cfg(test)]
    pub fn ethereum_classic() -> Self {
        Self::new(
            61,
            "",
            Some("0x00000000000000000000000000000000000000a3"),
            Some("0x00000000000000000000000000000000000000c3"),
        )
        .expect("valid test chain")
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={})", self.metadata, self.chain_id())
    }
}
