//! Connect modal subsystem.
//!
//! The modal is the interactive surface used for pairing. It is created once
//! by the session controller and publishes its visibility changes on a
//! broadcast channel.

pub mod terminal;
pub mod visibility;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::ModalConfig;
use crate::wallet::{ConnectionConfig, WalletResult};

pub use terminal::{PromptSource, TerminalModal, TerminalModalFactory};
pub use visibility::{ModalState, VisibilityEdge};

/// Feature flags applied when the modal is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalOptions {
    pub enable_analytics: bool,
    pub enable_onramp: bool,
}

impl From<&ModalConfig> for ModalOptions {
    fn from(config: &ModalConfig) -> Self {
        Self {
            enable_analytics: config.enable_analytics,
            enable_onramp: config.enable_onramp,
        }
    }
}

/// Wallet details the modal caches after a successful connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletInfo {
    pub name: String,
    pub icon: Option<String>,
}

/// Handle to the interactive connect surface.
#[async_trait]
pub trait Modal: Send + Sync {
    /// Show the modal and run the pairing flow.
    async fn open(&self) -> WalletResult<()>;

    /// Subscribe to visibility changes.
    fn subscribe_visibility(&self) -> broadcast::Receiver<ModalState>;

    /// Wallet info cached from the last connection, if any.
    fn cached_wallet_info(&self) -> Option<WalletInfo>;
}

/// Builds the modal bound to a connection configuration.
pub trait ModalFactory: Send + Sync {
    fn create(&self, config: Arc<ConnectionConfig>, options: ModalOptions) -> WalletResult<Arc<dyn Modal>>;
}
