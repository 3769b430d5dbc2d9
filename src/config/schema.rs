//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wallet
//! session front-end. All types derive Serde traits for deserialization from
//! config files, and every section has defaults so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Environment variable carrying the wallet-connector project identifier.
pub const PROJECT_ID_ENV_VAR: &str = "PROJECT_ID";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Wallet-connector project settings.
    pub project: ProjectConfig,

    /// Application metadata shown to wallets during pairing.
    pub metadata: MetadataConfig,

    /// Supported networks and their transports.
    pub chains: Vec<ChainConfig>,

    /// Enabled connector methods.
    pub connectors: ConnectorsConfig,

    /// Modal feature flags.
    pub modal: ModalConfig,

    /// Token symbol reader settings.
    pub reader: ReaderConfig,

    /// Account prober settings.
    pub probe: ProbeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Project settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project identifier issued by the wallet-connector cloud.
    /// Overridden by `PROJECT_ID` when set.
    pub id: String,
}

/// Application metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub name: String,
    pub description: String,
    /// Origin URL; must match the domain and subdomain the app is served from.
    pub url: String,
    pub icons: Vec<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            name: "Web3Modal".to_string(),
            description: "Web3Modal Example".to_string(),
            url: "https://web3modal.com".to_string(),
            icons: vec!["https://avatars.githubusercontent.com/u/37784886".to_string()],
        }
    }
}

/// A supported network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainConfig {
    /// Chain ID (e.g., 1 for Ethereum mainnet).
    pub id: u64,

    /// Display name. Defaults to the registry name for known chains.
    #[serde(default)]
    pub name: Option<String>,

    /// HTTP transport endpoint. Defaults to the registry RPC for known chains.
    #[serde(default)]
    pub rpc_url: Option<String>,
}

/// Connector toggles.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectorsConfig {
    /// Interactive pairing (QR / deep link).
    pub wallet_connect: bool,

    /// Show the connector's own QR modal instead of ours.
    pub show_qr_modal: bool,

    /// Browser-injected provider.
    pub injected: bool,

    /// Remember explicit disconnects so the injected connector is not
    /// silently restored afterwards.
    pub shim_disconnect: bool,

    /// Endpoint standing in for the injected provider (EIP-1193 bridge).
    pub injected_rpc_url: String,

    /// Environment variable holding a local private key. Enables the local
    /// key connector when set.
    pub local_key_env: Option<String>,
}

impl Default for ConnectorsConfig {
    fn default() -> Self {
        Self {
            wallet_connect: true,
            show_qr_modal: false,
            injected: true,
            shim_disconnect: true,
            injected_rpc_url: "http://127.0.0.1:8545".to_string(),
            local_key_env: None,
        }
    }
}

/// Modal feature flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModalConfig {
    pub enable_analytics: bool,
    pub enable_onramp: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            enable_analytics: true,
            enable_onramp: true,
        }
    }
}

/// Token symbol reader settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Contract queried for `symbol()`.
    pub token_address: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            // USDT on mainnet
            token_address: "0xdAC17F958D2ee523a2206206994597C13D831ec7".to_string(),
        }
    }
}

/// Account prober settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Chain the probe client is bound to, whatever chain the session is on.
    pub chain_id: u64,

    /// Chain name that selects the injected provider instead of the transport.
    pub injected_chain_name: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            injected_chain_name: "Ethereum".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

impl AppConfig {
    /// Chains to configure, falling back to mainnet and sepolia.
    pub fn effective_chains(&self) -> Vec<ChainConfig> {
        if !self.chains.is_empty() {
            return self.chains.clone();
        }
        vec![
            ChainConfig { id: 1, name: None, rpc_url: None },
            ChainConfig { id: 11_155_111, name: None, rpc_url: None },
        ]
    }
}
