//! Registry of well-known chains and their public RPC endpoints.

use crate::blockchain::types::{Chain, ChainId};

/// Static description of a known chain.
#[derive(Debug, Clone, Copy)]
pub struct KnownChain {
    pub id: u64,
    pub name: &'static str,
    pub native_currency: &'static str,
    pub rpc_url: &'static str,
}

impl KnownChain {
    pub fn to_chain(&self) -> Chain {
        Chain {
            id: ChainId(self.id),
            name: self.name.to_string(),
            native_currency: self.native_currency.to_string(),
        }
    }
}

pub const MAINNET: KnownChain = KnownChain {
    id: 1,
    name: "Ethereum",
    native_currency: "ETH",
    rpc_url: "https://eth.merkle.io",
};

pub const SEPOLIA: KnownChain = KnownChain {
    id: 11_155_111,
    name: "Sepolia",
    native_currency: "ETH",
    rpc_url: "https://sepolia.drpc.org",
};

pub const ANVIL: KnownChain = KnownChain {
    id: 31_337,
    name: "Anvil",
    native_currency: "ETH",
    rpc_url: "http://127.0.0.1:8545",
};

static KNOWN: [KnownChain; 3] = [MAINNET, SEPOLIA, ANVIL];

/// Look up a known chain by ID.
pub fn known(id: u64) -> Option<&'static KnownChain> {
    KNOWN.iter().find(|chain| chain.id == id)
}
