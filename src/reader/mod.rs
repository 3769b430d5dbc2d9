//! Post-connect contract reads.

pub mod token;

pub use token::{
    decode_symbol, ContractReader, ReadError, ReadResult, RpcContractReader, TokenSymbolReader,
    NO_DATA_SENTINEL,
};
