//! Application wiring: configuration, session, modal, reader and prober
//! assembled into one component.

use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::{ChainClientFactory, HttpClientFactory};
use crate::config::AppConfig;
use crate::lifecycle::{SessionController, ToggleAction};
use crate::modal::{ModalFactory, ModalOptions, PromptSource, TerminalModalFactory};
use crate::probe::AccountProber;
use crate::reader::{ContractReader, RpcContractReader, TokenSymbolReader};
use crate::wallet::{
    ConnectionConfig, LocalSessionProvider, SessionProvider, SessionStatus, WalletError,
    WalletResult,
};

/// External services the component consumes.
pub struct Services {
    pub session: Arc<dyn SessionProvider>,
    pub modal_factory: Arc<dyn ModalFactory>,
    pub contract_reader: Arc<dyn ContractReader>,
    pub clients: Arc<dyn ChainClientFactory>,
}

impl Services {
    /// Production services: local session provider, terminal modal, alloy
    /// RPC clients.
    pub fn runtime(config: &Arc<ConnectionConfig>, prompt: Arc<PromptSource>) -> Self {
        let clients: Arc<dyn ChainClientFactory> = Arc::new(HttpClientFactory);
        let session: Arc<dyn SessionProvider> =
            Arc::new(LocalSessionProvider::new(Arc::clone(config), Arc::clone(&clients)));
        Self {
            modal_factory: Arc::new(TerminalModalFactory::new(Arc::clone(&session), prompt)),
            contract_reader: Arc::new(RpcContractReader::new(config)),
            session,
            clients,
        }
    }
}

/// The wallet session component.
pub struct WalletApp {
    config: Arc<ConnectionConfig>,
    controller: Arc<SessionController>,
    symbol: TokenSymbolReader,
}

impl WalletApp {
    /// Build the connection configuration and wire the runtime services.
    pub fn new(app_config: &AppConfig, prompt: Arc<PromptSource>) -> WalletResult<Self> {
        let config = Arc::new(ConnectionConfig::from_app_config(app_config)?);
        let services = Services::runtime(&config, prompt);
        Self::with_services(config, app_config, services)
    }

    /// Wire the component around caller-supplied services.
    pub fn with_services(
        config: Arc<ConnectionConfig>,
        app_config: &AppConfig,
        services: Services,
    ) -> WalletResult<Self> {
        let token: Address = app_config.reader.token_address.parse().map_err(|e| {
            WalletError::Config(format!(
                "invalid token address '{}': {}",
                app_config.reader.token_address, e
            ))
        })?;

        let prober = Arc::new(AccountProber::new(
            Arc::clone(&config),
            Arc::clone(&services.session),
            services.clients,
            app_config.probe.clone(),
        ));
        let controller = Arc::new(SessionController::new(
            Arc::clone(&config),
            ModalOptions::from(&app_config.modal),
            services.session,
            services.modal_factory,
            prober,
        ));

        Ok(Self {
            config,
            controller,
            symbol: TokenSymbolReader::new(services.contract_reader, token),
        })
    }

    /// Restore the session and create the modal.
    pub async fn initialize(&self) -> WalletResult<()> {
        self.controller.initialize().await
    }

    /// Connect or disconnect depending on the current status.
    pub async fn toggle_connection(&self) -> WalletResult<ToggleAction> {
        self.controller.toggle_connection().await
    }

    /// Read the token symbol; see [`TokenSymbolReader::read_token_symbol`].
    pub async fn read_token_symbol(&self) -> Option<Arc<String>> {
        self.symbol.read_token_symbol().await
    }

    pub fn status(&self) -> SessionStatus {
        self.controller.session().status()
    }

    /// Last displayed symbol, if any.
    pub fn symbol(&self) -> Option<Arc<String>> {
        self.symbol.display()
    }

    pub fn config(&self) -> &Arc<ConnectionConfig> {
        &self.config
    }

    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }
}
