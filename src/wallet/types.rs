//! Session status and error definitions.

use alloy::primitives::Address;
use serde::Serialize;
use thiserror::Error;

use crate::blockchain::{BlockchainError, ChainId};

/// Snapshot of the wallet session as reported by the session provider.
///
/// Callers never keep one of these around to make decisions; they ask the
/// provider again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub connected: bool,
    pub address: Option<Address>,
    pub chain_id: Option<ChainId>,
    /// Connector id that established the session.
    pub connector: Option<String>,
}

impl SessionStatus {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(address: Address, chain_id: ChainId, connector: impl Into<String>) -> Self {
        Self {
            connected: true,
            address: Some(address),
            chain_id: Some(chain_id),
            connector: Some(connector.into()),
        }
    }
}

/// Errors from session, modal and configuration handling.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The controller was used before `initialize()`.
    #[error("session controller not initialized")]
    NotInitialized,

    /// `initialize()` was called a second time.
    #[error("session controller already initialized")]
    AlreadyInitialized,

    /// The connector cannot establish a session in this runtime.
    #[error("connector '{0}' is not available")]
    ConnectorUnavailable(String),

    /// Building the connection configuration failed.
    #[error("invalid connection configuration: {0}")]
    Config(String),

    /// The modal could not be constructed or driven.
    #[error("modal error: {0}")]
    Modal(String),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for session operations.
pub type WalletResult<T> = Result<T, WalletError>;
