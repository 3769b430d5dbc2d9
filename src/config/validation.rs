//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every chain has a usable transport
//! - Validate addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::blockchain::chains;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("chain {0} is listed more than once")]
    DuplicateChain(u64),

    #[error("chain {0} is unknown and has no rpc_url")]
    MissingTransport(u64),

    #[error("invalid URL for {field}: {value}")]
    InvalidUrl { field: String, value: String },

    #[error("invalid token address: {0}")]
    InvalidTokenAddress(String),

    #[error("no connectors enabled")]
    NoConnectors,

    #[error("probe chain {0} is not among the configured chains")]
    UnknownProbeChain(u64),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    let chains = config.effective_chains();
    for chain in &chains {
        if !seen.insert(chain.id) {
            errors.push(ValidationError::DuplicateChain(chain.id));
        }
        match &chain.rpc_url {
            Some(url) => {
                if url.parse::<url::Url>().is_err() {
                    errors.push(ValidationError::InvalidUrl {
                        field: format!("chains[{}].rpc_url", chain.id),
                        value: url.clone(),
                    });
                }
            }
            None if chains::known(chain.id).is_none() => {
                errors.push(ValidationError::MissingTransport(chain.id));
            }
            None => {}
        }
    }

    let connectors = &config.connectors;
    if !connectors.wallet_connect && !connectors.injected && connectors.local_key_env.is_none() {
        errors.push(ValidationError::NoConnectors);
    }
    // Parsed by the connection config even when the injected connector is off
    if connectors.injected_rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "connectors.injected_rpc_url".to_string(),
            value: connectors.injected_rpc_url.clone(),
        });
    }

    if !chains.iter().any(|chain| chain.id == config.probe.chain_id) {
        errors.push(ValidationError::UnknownProbeChain(config.probe.chain_id));
    }

    if config.reader.token_address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidTokenAddress(
            config.reader.token_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
