//! Post-session-close account probing.

pub mod prober;

pub use prober::{AccountProber, ClientBinding, ProbeError, ProbeOutcome, ProbeReport};
