//! Connection configuration: networks, transports, connectors and app
//! metadata.
//!
//! Built once before anything else runs and shared by reference afterwards.
//! Construction never touches the network.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use crate::blockchain::chains;
use crate::blockchain::{Chain, ChainId};
use crate::config::schema::{AppConfig, MetadataConfig};
use crate::wallet::types::{WalletError, WalletResult};

/// Application metadata presented to wallets during pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    pub icons: Vec<String>,
}

impl From<&MetadataConfig> for AppMetadata {
    fn from(config: &MetadataConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
            icons: config.icons.clone(),
        }
    }
}

/// A connection method offered in the modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConnectorKind {
    /// Interactive pairing through the wallet-connector relay.
    WalletConnect { project_id: String, show_qr_modal: bool },
    /// Browser-injected provider.
    Injected { shim_disconnect: bool },
    /// Private key held in an environment variable.
    LocalKey { env_var: String },
}

impl ConnectorKind {
    /// Stable identifier, used in session status and logs.
    pub fn id(&self) -> &'static str {
        match self {
            Self::WalletConnect { .. } => "walletConnect",
            Self::Injected { .. } => "injected",
            Self::LocalKey { .. } => "localKey",
        }
    }

    /// Name shown in the modal.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WalletConnect { .. } => "WalletConnect",
            Self::Injected { .. } => "Browser Wallet",
            Self::LocalKey { .. } => "Local Key",
        }
    }
}

/// A chain together with the transport endpoint configured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    pub chain: Chain,
    pub transport: Url,
}

/// Immutable connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    project_id: String,
    metadata: AppMetadata,
    chains: Vec<Chain>,
    transports: BTreeMap<ChainId, Url>,
    connectors: Vec<ConnectorKind>,
    injected_endpoint: Url,
}

impl ConnectionConfig {
    /// Start building a configuration.
    pub fn builder(project_id: impl Into<String>, metadata: AppMetadata) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            project_id: project_id.into(),
            metadata,
            chains: Vec::new(),
            connectors: Vec::new(),
            injected_endpoint: None,
        }
    }

    /// Build from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> WalletResult<Self> {
        let mut builder = Self::builder(config.project.id.clone(), AppMetadata::from(&config.metadata));

        for entry in config.effective_chains() {
            let known = chains::known(entry.id);
            let name = entry
                .name
                .clone()
                .or_else(|| known.map(|k| k.name.to_string()))
                .unwrap_or_else(|| format!("Chain {}", entry.id));
            let rpc_url = entry
                .rpc_url
                .clone()
                .or_else(|| known.map(|k| k.rpc_url.to_string()))
                .ok_or_else(|| WalletError::Config(format!("chain {} has no transport", entry.id)))?;
            let chain = Chain {
                id: ChainId(entry.id),
                name,
                native_currency: known.map_or("ETH", |k| k.native_currency).to_string(),
            };
            builder = builder.chain(chain, parse_url(&rpc_url)?);
        }

        let connectors = &config.connectors;
        if connectors.wallet_connect {
            builder = builder.connector(ConnectorKind::WalletConnect {
                project_id: config.project.id.clone(),
                show_qr_modal: connectors.show_qr_modal,
            });
        }
        if connectors.injected {
            builder = builder.connector(ConnectorKind::Injected {
                shim_disconnect: connectors.shim_disconnect,
            });
        }
        if let Some(env_var) = &connectors.local_key_env {
            builder = builder.connector(ConnectorKind::LocalKey {
                env_var: env_var.clone(),
            });
        }

        builder
            .injected_endpoint(parse_url(&connectors.injected_rpc_url)?)
            .build()
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    /// Supported chains, in configuration order.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// The first configured chain; reads with no explicit chain go here.
    pub fn default_chain(&self) -> &Chain {
        // build() rejects an empty chain list
        &self.chains[0]
    }

    /// Transport of [`Self::default_chain`].
    pub fn default_transport(&self) -> &Url {
        // build() stores a transport for every chain
        &self.transports[&self.default_chain().id]
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    pub fn transport(&self, id: ChainId) -> Option<&Url> {
        self.transports.get(&id)
    }

    /// Resolve a chain and its transport.
    pub fn resolve(&self, id: ChainId) -> Option<ResolvedChain> {
        let chain = self.chain(id)?.clone();
        let transport = self.transports.get(&id)?.clone();
        Some(ResolvedChain { chain, transport })
    }

    pub fn connectors(&self) -> &[ConnectorKind] {
        &self.connectors
    }

    /// Endpoint standing in for the browser-injected provider.
    pub fn injected_endpoint(&self) -> &Url {
        &self.injected_endpoint
    }
}

fn parse_url(raw: &str) -> WalletResult<Url> {
    raw.parse()
        .map_err(|e| WalletError::Config(format!("invalid URL '{}': {}", raw, e)))
}

/// Builder for [`ConnectionConfig`].
#[derive(Debug)]
pub struct ConnectionConfigBuilder {
    project_id: String,
    metadata: AppMetadata,
    chains: Vec<(Chain, Url)>,
    connectors: Vec<ConnectorKind>,
    injected_endpoint: Option<Url>,
}

impl ConnectionConfigBuilder {
    pub fn chain(mut self, chain: Chain, transport: Url) -> Self {
        self.chains.push((chain, transport));
        self
    }

    pub fn connector(mut self, connector: ConnectorKind) -> Self {
        self.connectors.push(connector);
        self
    }

    pub fn injected_endpoint(mut self, endpoint: Url) -> Self {
        self.injected_endpoint = Some(endpoint);
        self
    }

    pub fn build(self) -> WalletResult<ConnectionConfig> {
        if self.chains.is_empty() {
            return Err(WalletError::Config("at least one chain is required".to_string()));
        }

        let mut chains = Vec::with_capacity(self.chains.len());
        let mut transports = BTreeMap::new();
        for (chain, transport) in self.chains {
            if transports.insert(chain.id, transport).is_some() {
                return Err(WalletError::Config(format!("chain {} configured twice", chain.id)));
            }
            chains.push(chain);
        }

        let injected_endpoint = match self.injected_endpoint {
            Some(endpoint) => endpoint,
            None => parse_url(chains::ANVIL.rpc_url)?,
        };

        Ok(ConnectionConfig {
            project_id: self.project_id,
            metadata: self.metadata,
            chains,
            transports,
            connectors: self.connectors,
            injected_endpoint,
        })
    }
}
