//! Blockchain access subsystem.
//!
//! # Data Flow
//! ```text
//! chains.rs (known networks, default RPC endpoints)
//!     → client.rs (read-only JSON-RPC over alloy)
//!     → signer.rs (local key for the LocalKey connector)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data

pub mod chains;
pub mod client;
pub mod signer;
pub mod types;

pub use client::{ChainClient, ChainClientFactory, HttpClientFactory, RpcChainClient};
pub use signer::KeySigner;
pub use types::{BlockSummary, BlockchainError, BlockchainResult, Chain, ChainId};
