//! Account prober run after the modal closes on a connected session.
//!
//! # Sequence
//! ```text
//! status check (disconnected → skip)
//!     → resolve designated chain (fixed, not the session's chain)
//!     → bind client: injected endpoint if chain name matches, else transport
//!     → accounts → transaction count → balance → block number → block
//!       → node info → cached wallet info
//! ```
//!
//! Any failure aborts the remaining steps. There is no partial report and
//! no retry.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::blockchain::{BlockSummary, BlockchainError, ChainClientFactory, ChainId};
use crate::config::ProbeConfig;
use crate::modal::{Modal, WalletInfo};
use crate::observability::metrics;
use crate::wallet::{ConnectionConfig, ResolvedChain, SessionProvider};

/// Errors that abort a probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("chain {0} is not configured")]
    UnknownChain(ChainId),

    #[error("session is connected but has no address")]
    NoAddress,

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Which endpoint the probe client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientBinding {
    /// The browser-injected provider.
    Injected(Url),
    /// The chain's configured transport.
    Transport(Url),
}

impl ClientBinding {
    /// Pick the injected provider when the chain's name is `injected_chain_name`.
    pub fn select(resolved: &ResolvedChain, injected_chain_name: &str, injected: &Url) -> Self {
        if resolved.chain.name == injected_chain_name {
            Self::Injected(injected.clone())
        } else {
            Self::Transport(resolved.transport.clone())
        }
    }

    pub fn endpoint(&self) -> &Url {
        match self {
            Self::Injected(url) | Self::Transport(url) => url,
        }
    }
}

/// Everything a completed probe observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub address: Address,
    pub accounts: Vec<Address>,
    pub transaction_count: u64,
    pub balance: U256,
    pub block_number: u64,
    pub block: Option<BlockSummary>,
    pub node_info: String,
    pub wallet_info: Option<WalletInfo>,
}

/// Result of [`AccountProber::run`].
#[derive(Debug)]
pub enum ProbeOutcome {
    /// No session was active when the probe started.
    Skipped,
    Completed(ProbeReport),
    /// A step failed; the remaining steps did not run.
    Aborted(ProbeError),
}

/// Runs the diagnostic query sequence against the connected account.
pub struct AccountProber {
    config: Arc<ConnectionConfig>,
    session: Arc<dyn SessionProvider>,
    clients: Arc<dyn ChainClientFactory>,
    settings: ProbeConfig,
}

impl AccountProber {
    pub fn new(
        config: Arc<ConnectionConfig>,
        session: Arc<dyn SessionProvider>,
        clients: Arc<dyn ChainClientFactory>,
        settings: ProbeConfig,
    ) -> Self {
        Self {
            config,
            session,
            clients,
            settings,
        }
    }

    /// Run the probe, logging instead of returning any failure.
    pub async fn run(&self, modal: &dyn Modal) -> ProbeOutcome {
        match self.probe_account(modal).await {
            Ok(Some(report)) => {
                metrics::record_probe("completed");
                ProbeOutcome::Completed(report)
            }
            Ok(None) => {
                metrics::record_probe("skipped");
                ProbeOutcome::Skipped
            }
            Err(e) => {
                tracing::error!(error = %e, "Account probe failed");
                metrics::record_probe("aborted");
                ProbeOutcome::Aborted(e)
            }
        }
    }

    /// The probe sequence. `Ok(None)` when no session is active.
    pub async fn probe_account(&self, modal: &dyn Modal) -> Result<Option<ProbeReport>, ProbeError> {
        let status = self.session.status();
        if !status.connected {
            tracing::info!("No active session, skipping account probe");
            return Ok(None);
        }
        let address = status.address.ok_or(ProbeError::NoAddress)?;

        let chain_id = ChainId(self.settings.chain_id);
        if status.chain_id.is_some_and(|id| id != chain_id) {
            tracing::debug!(
                session_chain = ?status.chain_id,
                probe_chain = %chain_id,
                "Probing designated chain, not the session's chain"
            );
        }
        let resolved = self
            .config
            .resolve(chain_id)
            .ok_or(ProbeError::UnknownChain(chain_id))?;
        let binding = ClientBinding::select(
            &resolved,
            &self.settings.injected_chain_name,
            self.config.injected_endpoint(),
        );
        tracing::info!(
            chain = %resolved.chain.name,
            binding = ?binding,
            "Probe client bound"
        );
        let client = self.clients.connect(binding.endpoint())?;

        let accounts = client.accounts().await?;
        tracing::info!(accounts = ?accounts, "Accounts");

        let transaction_count = client.transaction_count(address).await?;
        tracing::info!(address = %address, transaction_count, "Transaction count");

        let balance = client.balance(address).await?;
        tracing::info!(address = %address, balance = %balance, "Balance");

        let block_number = client.block_number().await?;
        let block = client.block(block_number).await?;
        tracing::info!(block_number, block = ?block, "Latest block");

        let node_info = client.node_info().await?;
        tracing::info!(node_info = %node_info, "Node info");

        let wallet_info = modal.cached_wallet_info();
        tracing::info!(wallet_info = ?wallet_info, "Wallet info");

        Ok(Some(ProbeReport {
            address,
            accounts,
            transaction_count,
            balance,
            block_number,
            block,
            node_info,
            wallet_info,
        }))
    }
}
