//! Account prober: query order, skip and abort behavior, client binding.

use std::sync::Arc;

use alloy::primitives::U256;
use wallet_session::blockchain::{BlockchainError, ChainId};
use wallet_session::config::{AppConfig, ProbeConfig};
use wallet_session::modal::WalletInfo;
use wallet_session::probe::{AccountProber, ProbeError, ProbeOutcome};
use wallet_session::wallet::SessionStatus;

mod common;
use common::*;

fn prober(session: Arc<MockSession>, clients: Arc<MockClientFactory>, settings: ProbeConfig) -> AccountProber {
    AccountProber::new(connection_config(), session, clients, settings)
}

#[tokio::test]
async fn test_probe_runs_steps_in_order() {
    let client = MockChainClient::new();
    let modal = MockModal::new();
    modal.set_wallet_info(WalletInfo {
        name: "Browser Wallet".into(),
        icon: None,
    });
    let prober = prober(MockSession::connected(), MockClientFactory::new(client.clone()), ProbeConfig::default());

    let outcome = prober.run(modal.as_ref()).await;

    let ProbeOutcome::Completed(report) = outcome else {
        panic!("expected a completed probe, got {:?}", outcome);
    };
    assert_eq!(
        client.calls(),
        vec!["accounts", "transaction_count", "balance", "block_number", "block", "node_info"]
    );
    assert_eq!(report.address, ACCOUNT);
    assert_eq!(report.accounts, vec![ACCOUNT]);
    assert_eq!(report.transaction_count, 7);
    assert_eq!(report.balance, U256::from(1_000_000_000_000_000_000u64));
    assert_eq!(report.block_number, BLOCK_NUMBER);
    assert_eq!(report.block, Some(block_summary()));
    assert_eq!(report.node_info, NODE_INFO);
    assert_eq!(report.wallet_info.map(|info| info.name), Some("Browser Wallet".to_string()));
}

#[tokio::test]
async fn test_probe_skips_when_disconnected() {
    let client = MockChainClient::new();
    let clients = MockClientFactory::new(client.clone());
    let prober = prober(MockSession::disconnected(), clients.clone(), ProbeConfig::default());

    let outcome = prober.run(MockModal::new().as_ref()).await;

    assert!(matches!(outcome, ProbeOutcome::Skipped));
    assert!(clients.endpoints().is_empty());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_failure_aborts_remaining_steps() {
    let client = MockChainClient::failing_at("balance");
    let prober = prober(MockSession::connected(), MockClientFactory::new(client.clone()), ProbeConfig::default());

    let outcome = prober.run(MockModal::new().as_ref()).await;

    assert!(matches!(
        outcome,
        ProbeOutcome::Aborted(ProbeError::Blockchain(BlockchainError::Rpc(_)))
    ));
    assert_eq!(client.calls(), vec!["accounts", "transaction_count", "balance"]);
}

#[tokio::test]
async fn test_designated_chain_name_binds_injected_provider() {
    let clients = MockClientFactory::new(MockChainClient::new());
    let prober = prober(MockSession::connected(), clients.clone(), ProbeConfig::default());

    prober.run(MockModal::new().as_ref()).await;

    let config = connection_config();
    assert_eq!(clients.endpoints(), vec![config.injected_endpoint().clone()]);
}

#[tokio::test]
async fn test_other_chain_name_binds_transport() {
    let clients = MockClientFactory::new(MockChainClient::new());
    let settings = ProbeConfig {
        chain_id: 11_155_111,
        injected_chain_name: "Ethereum".into(),
    };
    let prober = prober(MockSession::connected(), clients.clone(), settings);

    prober.run(MockModal::new().as_ref()).await;

    let config = connection_config();
    assert_eq!(clients.endpoints(), vec![config.transport(ChainId(11_155_111)).unwrap().clone()]);
}

#[tokio::test]
async fn test_probe_ignores_session_chain() {
    let session = MockSession::disconnected();
    session.set_status(SessionStatus::connected(ACCOUNT, ChainId(11_155_111), "injected"));
    let clients = MockClientFactory::new(MockChainClient::new());
    let settings = ProbeConfig {
        chain_id: 1,
        injected_chain_name: "none".into(),
    };
    let prober = prober(session, clients.clone(), settings);

    let outcome = prober.run(MockModal::new().as_ref()).await;

    assert!(matches!(outcome, ProbeOutcome::Completed(_)));
    let config = connection_config();
    assert_eq!(clients.endpoints(), vec![config.transport(ChainId(1)).unwrap().clone()]);
}

#[tokio::test]
async fn test_unconfigured_designated_chain_aborts() {
    let clients = MockClientFactory::new(MockChainClient::new());
    let settings = ProbeConfig {
        chain_id: 42,
        ..AppConfig::default().probe
    };
    let prober = prober(MockSession::connected(), clients.clone(), settings);

    let outcome = prober.run(MockModal::new().as_ref()).await;

    assert!(matches!(outcome, ProbeOutcome::Aborted(ProbeError::UnknownChain(ChainId(42)))));
    assert!(clients.endpoints().is_empty());
}
