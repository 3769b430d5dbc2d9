//! Read-only blockchain RPC client.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint over HTTP
//! - Query account and chain state (accounts, nonce, balance, blocks)
//! - Execute `eth_call` for contract reads
//!
//! No timeouts or retries are layered on top of the transport; callers
//! inherit whatever the underlying HTTP client does.

use alloy::eips::BlockNumberOrTag;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::blockchain::types::{BlockSummary, BlockchainError, BlockchainResult};

/// Read-only queries the account prober and the injected connector rely on.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Accounts the node or wallet behind the endpoint exposes.
    async fn accounts(&self) -> BlockchainResult<Vec<Address>>;

    async fn chain_id(&self) -> BlockchainResult<u64>;

    /// Transaction count (nonce) for an address.
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64>;

    async fn balance(&self, address: Address) -> BlockchainResult<U256>;

    async fn block_number(&self) -> BlockchainResult<u64>;

    /// Block by number, `None` if the node does not know it.
    async fn block(&self, number: u64) -> BlockchainResult<Option<BlockSummary>>;

    /// Node metadata (`web3_clientVersion`).
    async fn node_info(&self) -> BlockchainResult<String>;
}

/// Creates clients bound to an endpoint.
pub trait ChainClientFactory: Send + Sync {
    fn connect(&self, endpoint: &Url) -> BlockchainResult<Arc<dyn ChainClient>>;
}

/// Alloy-backed JSON-RPC client.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: Url,
}

impl RpcChainClient {
    /// Create a client for an HTTP endpoint. No request is made here.
    pub fn new(endpoint: Url) -> Self {
        let provider = Arc::new(ProviderBuilder::new().connect_http(endpoint.clone()))
            as Arc<dyn Provider + Send + Sync>;
        Self { provider, endpoint }
    }

    /// Parse `url` and create a client for it.
    pub fn from_url(url: &str) -> BlockchainResult<Self> {
        let endpoint: Url = url.parse().map_err(|e: url::ParseError| BlockchainError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(endpoint))
    }

    /// Execute `eth_call` against `to` with the given calldata.
    pub async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        self.provider.call(tx).await.map_err(rpc_error)
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn rpc_error(e: impl std::fmt::Display) -> BlockchainError {
    BlockchainError::Rpc(e.to_string())
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.provider.get_accounts().await.map_err(rpc_error)
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        self.provider.get_chain_id().await.map_err(rpc_error)
    }

    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(rpc_error)
    }

    async fn balance(&self, address: Address) -> BlockchainResult<U256> {
        self.provider.get_balance(address).await.map_err(rpc_error)
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.provider.get_block_number().await.map_err(rpc_error)
    }

    async fn block(&self, number: u64) -> BlockchainResult<Option<BlockSummary>> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(rpc_error)?;

        Ok(block.map(|block| BlockSummary {
            number: block.header.number,
            hash: block.header.hash,
            timestamp: block.header.timestamp,
            gas_used: block.header.gas_used,
            transaction_count: block.transactions.len(),
        }))
    }

    async fn node_info(&self) -> BlockchainResult<String> {
        self.provider.get_client_version().await.map_err(rpc_error)
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Factory producing [`RpcChainClient`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

impl ChainClientFactory for HttpClientFactory {
    fn connect(&self, endpoint: &Url) -> BlockchainResult<Arc<dyn ChainClient>> {
        tracing::debug!(endpoint = %endpoint, "Creating RPC client");
        Ok(Arc::new(RpcChainClient::new(endpoint.clone())))
    }
}
