//! Terminal rendering of the connect modal.
//!
//! `open()` shows the connector list, reads the user's choice from a shared
//! prompt source, connects through the session provider and closes again.
//! Pairing failures are shown inside the modal and never escape it.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, Mutex};

use crate::modal::{Modal, ModalFactory, ModalOptions, ModalState, WalletInfo};
use crate::wallet::{ConnectionConfig, SessionProvider, WalletResult};

const VISIBILITY_CAPACITY: usize = 16;

/// Line-oriented input shared between the modal and the command loop.
pub struct PromptSource {
    reader: Mutex<Box<dyn AsyncBufRead + Send + Unpin>>,
}

impl PromptSource {
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        Self {
            reader: Mutex::new(Box::new(reader)),
        }
    }

    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }

    /// Next trimmed line, `None` at end of input.
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        let mut reader = self.reader.lock().await;
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Modal drawn on stdout.
pub struct TerminalModal {
    config: Arc<ConnectionConfig>,
    session: Arc<dyn SessionProvider>,
    prompt: Arc<PromptSource>,
    options: ModalOptions,
    visibility: broadcast::Sender<ModalState>,
    wallet_info: ArcSwapOption<CachedWallet>,
}

/// Wallet info tagged with the connector that produced it.
struct CachedWallet {
    connector: &'static str,
    info: WalletInfo,
}

impl TerminalModal {
    pub fn new(
        config: Arc<ConnectionConfig>,
        session: Arc<dyn SessionProvider>,
        prompt: Arc<PromptSource>,
        options: ModalOptions,
    ) -> Self {
        let (visibility, _) = broadcast::channel(VISIBILITY_CAPACITY);
        Self {
            config,
            session,
            prompt,
            options,
            visibility,
            wallet_info: ArcSwapOption::empty(),
        }
    }

    fn set_visibility(&self, state: ModalState) {
        // No subscribers is fine
        let _ = self.visibility.send(state);
    }

    fn track(&self, event: &'static str) {
        if self.options.enable_analytics {
            tracing::info!(
                target: "wallet_session::analytics",
                event,
                project_id = self.config.project_id(),
                "Modal event"
            );
        }
    }

    async fn run_pairing(&self) -> WalletResult<()> {
        let metadata = self.config.metadata();
        println!();
        println!("== {} ==", metadata.name);
        println!("{} ({})", metadata.description, metadata.url);

        let status = self.session.status();
        if let (true, Some(address)) = (status.connected, status.address) {
            println!("Connected as {}", address);
            println!("Press enter to close");
            self.prompt.next_line().await?;
            return Ok(());
        }

        let connectors = self.config.connectors();
        for (i, connector) in connectors.iter().enumerate() {
            println!("  [{}] {}", i + 1, connector.label());
        }
        if self.options.enable_onramp {
            println!("  Buy crypto: on-ramp providers are listed after connecting");
        }
        println!("Select a wallet (enter to close):");

        let Some(line) = self.prompt.next_line().await? else {
            return Ok(());
        };
        let choice = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| connectors.get(i));
        let Some(connector) = choice else {
            println!("Closed without connecting");
            return Ok(());
        };

        self.track("SELECT_WALLET");
        match self.session.connect(connector).await {
            Ok(status) => {
                self.wallet_info.store(Some(Arc::new(CachedWallet {
                    connector: connector.id(),
                    info: WalletInfo {
                        name: connector.label().to_string(),
                        icon: None,
                    },
                })));
                if let Some(address) = status.address {
                    println!("Connected as {}", address);
                }
                self.track("CONNECT_SUCCESS");
            }
            Err(e) => {
                tracing::warn!(connector = connector.id(), error = %e, "Connection failed");
                println!("Connection failed: {}", e);
                self.wallet_info.store(None);
                self.track("CONNECT_ERROR");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Modal for TerminalModal {
    async fn open(&self) -> WalletResult<()> {
        self.set_visibility(ModalState::Open);
        self.track("MODAL_OPEN");

        let result = self.run_pairing().await;

        self.set_visibility(ModalState::Closed);
        self.track("MODAL_CLOSE");
        result
    }

    fn subscribe_visibility(&self) -> broadcast::Receiver<ModalState> {
        self.visibility.subscribe()
    }

    /// Only reported while the session still belongs to the cached connector.
    fn cached_wallet_info(&self) -> Option<WalletInfo> {
        let cached = self.wallet_info.load_full()?;
        let status = self.session.status();
        if status.connected && status.connector.as_deref() == Some(cached.connector) {
            Some(cached.info.clone())
        } else {
            None
        }
    }
}

/// Creates [`TerminalModal`]s sharing one session provider and prompt.
pub struct TerminalModalFactory {
    session: Arc<dyn SessionProvider>,
    prompt: Arc<PromptSource>,
}

impl TerminalModalFactory {
    pub fn new(session: Arc<dyn SessionProvider>, prompt: Arc<PromptSource>) -> Self {
        Self { session, prompt }
    }
}

impl ModalFactory for TerminalModalFactory {
    fn create(&self, config: Arc<ConnectionConfig>, options: ModalOptions) -> WalletResult<Arc<dyn Modal>> {
        tracing::info!(
            analytics = options.enable_analytics,
            onramp = options.enable_onramp,
            connectors = config.connectors().len(),
            "Creating connect modal"
        );
        Ok(Arc::new(TerminalModal::new(
            config,
            Arc::clone(&self.session),
            Arc::clone(&self.prompt),
            options,
        )))
    }
}
