//! Token symbol reader.
//!
//! Reads `symbol()` from a fixed ERC-20 contract and keeps the result as a
//! display value. An empty `eth_call` result is shown as
//! [`NO_DATA_SENTINEL`]; any other failure is logged and leaves the display
//! value alone.

use std::sync::Arc;

use alloy::primitives::Address;
use alloy::sol;
use alloy::sol_types::SolCall;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::RpcChainClient;
use crate::observability::metrics;
use crate::wallet::ConnectionConfig;

sol! {
    /// ERC-20 optional metadata extension.
    interface IERC20Metadata {
        function symbol() external view returns (string);
    }
}

/// Display value used when the contract returned no data.
pub const NO_DATA_SENTINEL: &str = "NO DATA (0x)";

/// Errors from contract reads.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The call executed but returned zero bytes, usually because the
    /// address does not implement the function.
    #[error("{function} on {address} returned no data (\"0x\")")]
    ZeroData { address: Address, function: &'static str },

    /// Transport or node error.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Non-empty return data that does not decode as expected.
    #[error("decode error: {0}")]
    Decode(String),
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Read-only contract queries.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Call `symbol()` on `address`.
    async fn read_symbol(&self, address: Address) -> ReadResult<String>;
}

/// Decode `symbol()` return data, classifying empty data as [`ReadError::ZeroData`].
pub fn decode_symbol(address: Address, data: &[u8]) -> ReadResult<String> {
    if data.is_empty() {
        return Err(ReadError::ZeroData { address, function: "symbol" });
    }
    IERC20Metadata::symbolCall::abi_decode_returns(data).map_err(|e| ReadError::Decode(e.to_string()))
}

/// Contract reader issuing `eth_call` over the default chain's transport.
#[derive(Debug, Clone)]
pub struct RpcContractReader {
    client: RpcChainClient,
}

impl RpcContractReader {
    pub fn new(config: &ConnectionConfig) -> Self {
        Self {
            client: RpcChainClient::new(config.default_transport().clone()),
        }
    }
}

#[async_trait]
impl ContractReader for RpcContractReader {
    async fn read_symbol(&self, address: Address) -> ReadResult<String> {
        let input = IERC20Metadata::symbolCall {}.abi_encode();
        let output = self
            .client
            .call(address, input.into())
            .await
            .map_err(|e| ReadError::Rpc(e.to_string()))?;
        decode_symbol(address, &output)
    }
}

/// Reads the configured token's symbol and holds the display value.
pub struct TokenSymbolReader {
    reader: Arc<dyn ContractReader>,
    token: Address,
    display: ArcSwapOption<String>,
}

impl TokenSymbolReader {
    pub fn new(reader: Arc<dyn ContractReader>, token: Address) -> Self {
        Self {
            reader,
            token,
            display: ArcSwapOption::empty(),
        }
    }

    /// Query the symbol and update the display value.
    ///
    /// Never fails: zero data becomes the sentinel, other errors are logged.
    /// Concurrent calls race; whichever finishes last wins.
    pub async fn read_token_symbol(&self) -> Option<Arc<String>> {
        match self.reader.read_symbol(self.token).await {
            Ok(symbol) => {
                tracing::info!(token = %self.token, symbol = %symbol, "Token symbol read");
                metrics::record_symbol_read("ok");
                self.display.store(Some(Arc::new(symbol)));
            }
            Err(ReadError::ZeroData { .. }) => {
                tracing::info!(token = %self.token, "Token returned no data");
                metrics::record_symbol_read("no_data");
                self.display.store(Some(Arc::new(NO_DATA_SENTINEL.to_string())));
            }
            Err(e) => {
                tracing::error!(token = %self.token, error = %e, "Token symbol read failed");
                metrics::record_symbol_read("error");
            }
        }
        self.display()
    }

    /// Current display value.
    pub fn display(&self) -> Option<Arc<String>> {
        self.display.load_full()
    }

    pub fn token(&self) -> Address {
        self.token
    }
}
