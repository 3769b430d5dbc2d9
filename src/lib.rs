//! Wallet session front-end library.
//!
//! Wires a connect modal to a wallet session provider and read-only chain
//! clients: restore and toggle a session, read a token symbol, and probe the
//! connected account whenever the modal closes.

pub mod app;
pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod modal;
pub mod observability;
pub mod probe;
pub mod reader;
pub mod wallet;

pub use app::{Services, WalletApp};
pub use config::AppConfig;
pub use lifecycle::{SessionController, ToggleAction};
