use std::{collections::HashMap, future::Future};

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::{DynProvider, Provider as _, ProviderBuilder},
};
use color_eyre::eyre::{self, WrapErr as _};
use tracing::{debug, info, warn};

use crate::{
    chain::Chain,
    contracts::{CAT, CATFactory, TNT, TNTFactory},
    family::TokenFamily,
};

/// Read-only contract calls against a single chain.
pub trait ReadClient: Send + Sync {
    /// Addresses the family's factory reports for `holder`.
    fn list_tokens(
        &self,
        family: TokenFamily,
        factory: Address,
        holder: Address,
    ) -> impl Future<Output = eyre::Result<Vec<Address>>> + Send;

    fn token_name(
        &self,
        family: TokenFamily,
        token: Address,
    ) -> impl Future<Output = eyre::Result<String>> + Send;

    fn token_symbol(
        &self,
        family: TokenFamily,
        token: Address,
    ) -> impl Future<Output = eyre::Result<String>> + Send;

    /// Only TNTs expose this flag.
    fn revokable(&self, token: Address) -> impl Future<Output = eyre::Result<bool>> + Send;
}

/// Lookup of the read client scoped to a chain id.
pub trait ChainClients: Send + Sync {
    type Client: ReadClient;

    fn client(&self, chain_id: u64) -> Option<&Self::Client>;
}

#[derive(Clone)]
pub struct RpcClient {
    chain_id: u64,
    provider: DynProvider<Ethereum>,
}

impl RpcClient {
    pub async fn connect(chain: &Chain) -> eyre::Result<Self> {
        let provider = ProviderBuilder::new()
            .connect(&chain.rpc_url)
            .await
            .wrap_err_with(|| format!("failed to connect provider for {chain}"))?;

        Ok(Self {
            chain_id: chain.chain_id(),
            provider: provider.erased(),
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl ReadClient for RpcClient {
    async fn list_tokens(
        &self,
        family: TokenFamily,
        factory: Address,
        holder: Address,
    ) -> eyre::Result<Vec<Address>> {
        let tokens = match family {
            TokenFamily::Tnt => TNTFactory::new(factory, self.provider.clone())
                .getDeployedTNTs(holder)
                .call()
                .await
                .wrap_err("getDeployedTNTs call failed")?,
            TokenFamily::Cat => CATFactory::new(factory, self.provider.clone())
                .getOwnedCATs(holder)
                .call()
                .await
                .wrap_err("getOwnedCATs call failed")?,
        };
        Ok(tokens)
    }

    async fn token_name(&self, family: TokenFamily, token: Address) -> eyre::Result<String> {
        let name = match family {
            TokenFamily::Tnt => TNT::new(token, self.provider.clone())
                .name()
                .call()
                .await
                .wrap_err("name call failed")?,
            TokenFamily::Cat => CAT::new(token, self.provider.clone())
                .tokenName()
                .call()
                .await
                .wrap_err("tokenName call failed")?,
        };
        Ok(name)
    }

    async fn token_symbol(&self, family: TokenFamily, token: Address) -> eyre::Result<String> {
        let symbol = match family {
            TokenFamily::Tnt => TNT::new(token, self.provider.clone())
                .symbol()
                .call()
                .await
                .wrap_err("symbol call failed")?,
            TokenFamily::Cat => CAT::new(token, self.provider.clone())
                .tokenSymbol()
                .call()
                .await
                .wrap_err("tokenSymbol call failed")?,
        };
        Ok(symbol)
    }

    async fn revokable(&self, token: Address) -> eyre::Result<bool> {
        TNT::new(token, self.provider.clone())
            .revokable()
            .call()
            .await
            .wrap_err("revokable call failed")
    }
}

/// One [`RpcClient`] per configured chain that has an RPC URL.
#[derive(Clone, Default)]
pub struct RpcClients {
    clients: HashMap<u64, RpcClient>,
}

impl RpcClients {
    /// Connects every chain with a non-empty RPC URL. Chains that fail to connect are
    /// left without a client and read as unsupported.
    pub async fn connect(chains: &[Chain]) -> Self {
        let mut clients = HashMap::new();

        for chain in chains {
            if chain.rpc_url.is_empty() {
                debug!(chain = %chain, "no rpc url configured");
                continue;
            }

            match RpcClient::connect(chain).await {
                Ok(client) => {
                    clients.insert(chain.chain_id(), client);
                }
                Err(e) => {
                    warn!(chain = %chain, error = %e, "provider error");
                }
            }
        }

        info!(clients = clients.len(), "initialized read clients");
        Self { clients }
    }
}

impl ChainClients for RpcClients {
    type Client = RpcClient;

    fn client(&self, chain_id: u64) -> Option<&RpcClient> {
        self.clients.get(&chain_id)
    }
}
