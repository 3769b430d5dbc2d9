//! Shared mocks for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, b256, Address, U256};
use async_trait::async_trait;
use tokio::sync::broadcast;
use url::Url;

use wallet_session::blockchain::{
    BlockSummary, BlockchainError, BlockchainResult, ChainClient, ChainClientFactory, ChainId,
};
use wallet_session::config::AppConfig;
use wallet_session::lifecycle::SessionController;
use wallet_session::modal::{Modal, ModalFactory, ModalOptions, ModalState, WalletInfo};
use wallet_session::probe::AccountProber;
use wallet_session::reader::{ContractReader, ReadError, ReadResult};
use wallet_session::wallet::{
    ConnectionConfig, ConnectorKind, SessionProvider, SessionStatus, WalletError, WalletResult,
};

pub const ACCOUNT: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

pub fn connected_status() -> SessionStatus {
    SessionStatus::connected(ACCOUNT, ChainId(1), "injected")
}

pub fn connection_config() -> Arc<ConnectionConfig> {
    Arc::new(ConnectionConfig::from_app_config(&AppConfig::default()).unwrap())
}

/// Session provider whose status is set by the test.
#[derive(Default)]
pub struct MockSession {
    status: Mutex<SessionStatus>,
    restorable: Option<SessionStatus>,
    restore_delay: Duration,
    calls: Mutex<Vec<&'static str>>,
}

impl MockSession {
    pub fn disconnected() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connected() -> Arc<Self> {
        let session = Self::default();
        *session.status.lock().unwrap() = connected_status();
        Arc::new(session)
    }

    /// Disconnected until `restore()` is called.
    pub fn restorable(status: SessionStatus) -> Arc<Self> {
        Arc::new(Self {
            restorable: Some(status),
            ..Self::default()
        })
    }

    /// Restore that takes `delay` and finds nothing.
    pub fn slow_restore(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            restore_delay: delay,
            ..Self::default()
        })
    }

    pub fn set_status(&self, status: SessionStatus) {
        *self.status.lock().unwrap() = status;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }
}

#[async_trait]
impl SessionProvider for MockSession {
    async fn restore(&self) {
        self.calls.lock().unwrap().push("restore");
        if !self.restore_delay.is_zero() {
            tokio::time::sleep(self.restore_delay).await;
        }
        if let Some(status) = &self.restorable {
            self.set_status(status.clone());
        }
    }

    async fn connect(&self, connector: &ConnectorKind) -> WalletResult<SessionStatus> {
        self.calls.lock().unwrap().push("connect");
        let status = SessionStatus::connected(ACCOUNT, ChainId(1), connector.id());
        self.set_status(status.clone());
        Ok(status)
    }

    fn status(&self) -> SessionStatus {
        self.status.lock().unwrap().clone()
    }

    async fn disconnect(&self) -> WalletResult<()> {
        self.calls.lock().unwrap().push("disconnect");
        self.set_status(SessionStatus::disconnected());
        Ok(())
    }
}

/// Modal that only counts opens; visibility is driven by the test.
pub struct MockModal {
    visibility: broadcast::Sender<ModalState>,
    opens: AtomicUsize,
    fail_open: bool,
    wallet_info: Mutex<Option<WalletInfo>>,
}

impl MockModal {
    pub fn new() -> Arc<Self> {
        Self::build(false)
    }

    /// Modal whose `open()` fails.
    pub fn failing_open() -> Arc<Self> {
        Self::build(true)
    }

    fn build(fail_open: bool) -> Arc<Self> {
        let (visibility, _) = broadcast::channel(16);
        Arc::new(Self {
            visibility,
            opens: AtomicUsize::new(0),
            fail_open,
            wallet_info: Mutex::new(None),
        })
    }

    pub fn emit(&self, state: ModalState) {
        let _ = self.visibility.send(state);
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn set_wallet_info(&self, info: WalletInfo) {
        *self.wallet_info.lock().unwrap() = Some(info);
    }
}

#[async_trait]
impl Modal for MockModal {
    async fn open(&self) -> WalletResult<()> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(WalletError::Modal("relay unreachable".into()));
        }
        Ok(())
    }

    fn subscribe_visibility(&self) -> broadcast::Receiver<ModalState> {
        self.visibility.subscribe()
    }

    fn cached_wallet_info(&self) -> Option<WalletInfo> {
        self.wallet_info.lock().unwrap().clone()
    }
}

pub struct MockModalFactory {
    pub modal: Arc<MockModal>,
    created: AtomicUsize,
    fail: bool,
}

impl MockModalFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            modal: MockModal::new(),
            created: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub fn with_modal(modal: Arc<MockModal>) -> Arc<Self> {
        Arc::new(Self {
            modal,
            created: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            modal: MockModal::new(),
            created: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ModalFactory for MockModalFactory {
    fn create(&self, _config: Arc<ConnectionConfig>, _options: ModalOptions) -> WalletResult<Arc<dyn Modal>> {
        if self.fail {
            return Err(WalletError::Modal("project id rejected".into()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.modal.clone() as Arc<dyn Modal>)
    }
}

pub const NODE_INFO: &str = "anvil/v1.2.0";
pub const BLOCK_NUMBER: u64 = 19_000_000;

pub fn block_summary() -> BlockSummary {
    BlockSummary {
        number: BLOCK_NUMBER,
        hash: b256!("0000000000000000000000000000000000000000000000000000000000000abc"),
        timestamp: 1_700_000_000,
        gas_used: 12_345_678,
        transaction_count: 150,
    }
}

/// Chain client recording every query in order.
#[derive(Default)]
pub struct MockChainClient {
    calls: Mutex<Vec<&'static str>>,
    fail_at: Option<&'static str>,
}

impl MockChainClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_at(step: &'static str) -> Arc<Self> {
        Arc::new(Self {
            fail_at: Some(step),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, step: &'static str) -> BlockchainResult<()> {
        self.calls.lock().unwrap().push(step);
        if self.fail_at == Some(step) {
            return Err(BlockchainError::Rpc(format!("{} failed", step)));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.record("accounts")?;
        Ok(vec![ACCOUNT])
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        self.record("chain_id")?;
        Ok(1)
    }

    async fn transaction_count(&self, _address: Address) -> BlockchainResult<u64> {
        self.record("transaction_count")?;
        Ok(7)
    }

    async fn balance(&self, _address: Address) -> BlockchainResult<U256> {
        self.record("balance")?;
        Ok(U256::from(1_000_000_000_000_000_000u64))
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.record("block_number")?;
        Ok(BLOCK_NUMBER)
    }

    async fn block(&self, number: u64) -> BlockchainResult<Option<BlockSummary>> {
        self.record("block")?;
        Ok((number == BLOCK_NUMBER).then(block_summary))
    }

    async fn node_info(&self) -> BlockchainResult<String> {
        self.record("node_info")?;
        Ok(NODE_INFO.to_string())
    }
}

/// Hands out one shared client and remembers the endpoints asked for.
pub struct MockClientFactory {
    pub client: Arc<MockChainClient>,
    endpoints: Mutex<Vec<Url>>,
}

impl MockClientFactory {
    pub fn new(client: Arc<MockChainClient>) -> Arc<Self> {
        Arc::new(Self {
            client,
            endpoints: Mutex::new(Vec::new()),
        })
    }

    pub fn endpoints(&self) -> Vec<Url> {
        self.endpoints.lock().unwrap().clone()
    }
}

impl ChainClientFactory for MockClientFactory {
    fn connect(&self, endpoint: &Url) -> BlockchainResult<Arc<dyn ChainClient>> {
        self.endpoints.lock().unwrap().push(endpoint.clone());
        Ok(self.client.clone() as Arc<dyn ChainClient>)
    }
}

/// Contract reader returning queued results, optionally after a delay.
#[derive(Default)]
pub struct MockContractReader {
    results: Mutex<VecDeque<(Duration, ReadResult<String>)>>,
}

impl MockContractReader {
    pub fn with(results: Vec<ReadResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into_iter().map(|r| (Duration::ZERO, r)).collect()),
        })
    }

    pub fn delayed(results: Vec<(Duration, ReadResult<String>)>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into_iter().collect()),
        })
    }
}

#[async_trait]
impl ContractReader for MockContractReader {
    async fn read_symbol(&self, _address: Address) -> ReadResult<String> {
        let next = self.results.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(ReadError::Rpc("no more results".into())),
        }
    }
}

/// Controller wired to mocks, using the default probe settings.
pub fn controller(
    session: Arc<MockSession>,
    modals: Arc<MockModalFactory>,
    clients: Arc<MockClientFactory>,
) -> Arc<SessionController> {
    let config = connection_config();
    let prober = Arc::new(AccountProber::new(
        config.clone(),
        session.clone(),
        clients,
        AppConfig::default().probe,
    ));
    Arc::new(SessionController::new(
        config,
        ModalOptions {
            enable_analytics: true,
            enable_onramp: true,
        },
        session,
        modals,
        prober,
    ))
}

/// Poll `condition` until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
