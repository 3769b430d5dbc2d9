//! Wallet session provider.
//!
//! The session provider is the single source of truth for whether a wallet
//! is connected. Everything else asks it through [`SessionProvider::status`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;

use crate::blockchain::{BlockchainError, ChainClientFactory, ChainId, KeySigner};
use crate::wallet::connection::{ConnectionConfig, ConnectorKind};
use crate::wallet::types::{SessionStatus, WalletError, WalletResult};

/// Owner of the wallet session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Silently restore a previously authorized session. Best effort: any
    /// failure leaves the session disconnected and is not reported.
    async fn restore(&self);

    /// Establish a session through `connector`.
    async fn connect(&self, connector: &ConnectorKind) -> WalletResult<SessionStatus>;

    /// Current session status.
    fn status(&self) -> SessionStatus;

    /// End the current session. A no-op when already disconnected.
    async fn disconnect(&self) -> WalletResult<()>;
}

/// Session provider backed by the injected endpoint and local keys.
///
/// Interactive pairing needs the external relay and is reported as
/// unavailable. Nothing is persisted: "previously authorized" means the
/// injected endpoint still exposes an account, or the local key is present.
pub struct LocalSessionProvider {
    config: Arc<ConnectionConfig>,
    clients: Arc<dyn ChainClientFactory>,
    active: ArcSwapOption<SessionStatus>,
    /// Set when the user disconnected an injected session with
    /// `shim_disconnect` enabled; suppresses silent restore.
    injected_shimmed: AtomicBool,
}

impl LocalSessionProvider {
    pub fn new(config: Arc<ConnectionConfig>, clients: Arc<dyn ChainClientFactory>) -> Self {
        Self {
            config,
            clients,
            active: ArcSwapOption::empty(),
            injected_shimmed: AtomicBool::new(false),
        }
    }

    async fn connect_injected(&self) -> WalletResult<SessionStatus> {
        let client = self.clients.connect(self.config.injected_endpoint())?;
        let accounts = client.accounts().await?;
        let address = accounts.first().copied().ok_or(BlockchainError::NoAccounts)?;
        let chain_id = ChainId(client.chain_id().await?);
        Ok(SessionStatus::connected(address, chain_id, "injected"))
    }

    fn connect_local_key(&self, env_var: &str) -> WalletResult<SessionStatus> {
        let signer = KeySigner::from_env(env_var)?;
        Ok(SessionStatus::connected(
            signer.address(),
            self.config.default_chain().id,
            "localKey",
        ))
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn restore(&self) {
        for connector in self.config.connectors() {
            match connector {
                // Pairings live in the relay's storage, which we do not have.
                ConnectorKind::WalletConnect { .. } => continue,
                ConnectorKind::Injected { shim_disconnect: true }
                    if self.injected_shimmed.load(Ordering::SeqCst) =>
                {
                    tracing::debug!("Skipping injected restore after explicit disconnect");
                    continue;
                }
                _ => {}
            }

            match self.connect(connector).await {
                Ok(status) => {
                    tracing::info!(
                        connector = connector.id(),
                        address = ?status.address,
                        "Session restored"
                    );
                    return;
                }
                Err(e) => {
                    tracing::debug!(connector = connector.id(), error = %e, "Restore attempt failed");
                }
            }
        }
        tracing::debug!("No session to restore");
    }

    async fn connect(&self, connector: &ConnectorKind) -> WalletResult<SessionStatus> {
        let status = match connector {
            ConnectorKind::WalletConnect { .. } => {
                return Err(WalletError::ConnectorUnavailable(connector.id().to_string()));
            }
            ConnectorKind::Injected { .. } => self.connect_injected().await?,
            ConnectorKind::LocalKey { env_var } => self.connect_local_key(env_var)?,
        };

        if matches!(connector, ConnectorKind::Injected { .. }) {
            self.injected_shimmed.store(false, Ordering::SeqCst);
        }
        self.active.store(Some(Arc::new(status.clone())));

        tracing::info!(
            connector = connector.id(),
            address = ?status.address,
            chain_id = ?status.chain_id,
            "Wallet connected"
        );
        Ok(status)
    }

    fn status(&self) -> SessionStatus {
        self.active
            .load_full()
            .map(|status| status.as_ref().clone())
            .unwrap_or_default()
    }

    async fn disconnect(&self) -> WalletResult<()> {
        let Some(previous) = self.active.swap(None) else {
            return Ok(());
        };

        let shim = self.config.connectors().iter().any(|c| {
            matches!(c, ConnectorKind::Injected { shim_disconnect: true })
        });
        if shim && previous.connector.as_deref() == Some("injected") {
            self.injected_shimmed.store(true, Ordering::SeqCst);
        }

        tracing::info!(address = ?previous.address, "Wallet disconnected");
        Ok(())
    }
}
