//! Session lifecycle controller.
//!
//! Owns the modal handle and gates the connect/disconnect toggle on the
//! session provider's current status. Never caches a connected flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::modal::{Modal, ModalFactory, ModalOptions, ModalState, VisibilityEdge};
use crate::observability::metrics;
use crate::probe::{AccountProber, ProbeOutcome};
use crate::wallet::{ConnectionConfig, SessionProvider, WalletError, WalletResult};

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The session was connected and has been ended.
    Disconnected,
    /// The session was disconnected and the modal was opened.
    OpenedModal,
}

/// Drives session restore, the modal and the close-triggered probe.
pub struct SessionController {
    config: Arc<ConnectionConfig>,
    options: ModalOptions,
    session: Arc<dyn SessionProvider>,
    modal_factory: Arc<dyn ModalFactory>,
    prober: Arc<AccountProber>,
    /// Claimed by the first `initialize()` call, before any await.
    initializing: AtomicBool,
    modal: OnceLock<Arc<dyn Modal>>,
    edge: Mutex<VisibilityEdge>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl SessionController {
    pub fn new(
        config: Arc<ConnectionConfig>,
        options: ModalOptions,
        session: Arc<dyn SessionProvider>,
        modal_factory: Arc<dyn ModalFactory>,
        prober: Arc<AccountProber>,
    ) -> Self {
        Self {
            config,
            options,
            session,
            modal_factory,
            prober,
            initializing: AtomicBool::new(false),
            modal: OnceLock::new(),
            edge: Mutex::new(VisibilityEdge::new()),
            watcher: Mutex::new(None),
        }
    }

    /// Restore any previous session, create the modal and start watching
    /// its visibility. Must be called once; modal construction errors are
    /// returned to the caller untouched and a failed call may be retried.
    pub async fn initialize(self: &Arc<Self>) -> WalletResult<()> {
        if self.initializing.swap(true, Ordering::SeqCst) {
            return Err(WalletError::AlreadyInitialized);
        }

        let result = self.start().await;
        if result.is_err() {
            self.initializing.store(false, Ordering::SeqCst);
        }
        result
    }

    async fn start(self: &Arc<Self>) -> WalletResult<()> {
        self.session.restore().await;
        let status = self.session.status();
        tracing::info!(
            connected = status.connected,
            address = ?status.address,
            "Session restore finished"
        );

        let modal = self
            .modal_factory
            .create(Arc::clone(&self.config), self.options)?;
        let visibility = modal.subscribe_visibility();
        self.modal
            .set(modal)
            .map_err(|_| WalletError::AlreadyInitialized)?;

        let handle = tokio::spawn(watch_visibility(Arc::downgrade(self), visibility));
        if let Some(previous) = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle)
        {
            previous.abort();
        }

        Ok(())
    }

    /// Disconnect when connected, otherwise open the modal.
    pub async fn toggle_connection(&self) -> WalletResult<ToggleAction> {
        let modal = self.modal.get().ok_or(WalletError::NotInitialized)?;

        if self.session.status().connected {
            self.session.disconnect().await?;
            metrics::record_toggle("disconnect");
            Ok(ToggleAction::Disconnected)
        } else {
            modal.open().await?;
            metrics::record_toggle("open_modal");
            Ok(ToggleAction::OpenedModal)
        }
    }

    /// Visibility callback: probe once per open→closed edge while connected.
    ///
    /// Returns the probe outcome when a probe ran.
    pub async fn handle_visibility(&self, state: ModalState) -> Option<ProbeOutcome> {
        let closed = self
            .edge
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observe(state);
        if !closed {
            return None;
        }

        if !self.session.status().connected {
            tracing::debug!("Modal closed without a session");
            return None;
        }

        let modal = self.modal.get()?;
        Some(self.prober.run(modal.as_ref()).await)
    }

    /// The modal handle, once initialized.
    pub fn modal(&self) -> Option<&Arc<dyn Modal>> {
        self.modal.get()
    }

    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(handle) = self
            .watcher
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

/// Feed visibility events to the controller until either side goes away.
async fn watch_visibility(
    controller: Weak<SessionController>,
    mut visibility: broadcast::Receiver<ModalState>,
) {
    loop {
        let state = match visibility.recv().await {
            Ok(state) => state,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Visibility watcher lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let Some(controller) = controller.upgrade() else {
            break;
        };
        controller.handle_visibility(state).await;
    }
    tracing::debug!("Visibility watcher stopped");
}
