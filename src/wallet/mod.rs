//! Wallet session subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig
//!     → connection.rs (ConnectionConfig: chains, transports, connectors)
//!     → session.rs (SessionProvider: restore / connect / status / disconnect)
//! ```

pub mod connection;
pub mod session;
pub mod types;

pub use connection::{AppMetadata, ConnectionConfig, ConnectorKind, ResolvedChain};
pub use session::{LocalSessionProvider, SessionProvider};
pub use types::{SessionStatus, WalletError, WalletResult};
