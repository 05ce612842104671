//! Shared fixtures for the cross-crate scenarios in `tests/`.

use std::sync::Arc;

use orchard_core::{Address, U256};
use orchard_ledger::{ChannelLedger, InMemoryBank, InMemoryRegistry};

/// Balance every funded account starts with, per token.
pub const STARTING_BALANCE: u64 = 1_000_000;

/// A ledger wired to in-memory ownership and custody.
pub struct Orchard {
    pub ledger: ChannelLedger,
    pub registry: Arc<InMemoryRegistry>,
    pub bank: Arc<InMemoryBank>,
}

impl Orchard {
    pub fn new() -> Self {
        let registry = Arc::new(InMemoryRegistry::default());
        let bank = Arc::new(InMemoryBank::new(account(0xc0ffee)));
        let ledger = ChannelLedger::new(registry.clone(), bank.clone());
        tracing::debug!("orchard fixture ready");
        Self {
            ledger,
            registry,
            bank,
        }
    }

    /// Give `holder` [`STARTING_BALANCE`] of each of `tokens`.
    pub fn fund_account(&self, holder: Address, tokens: &[Address]) {
        for token in tokens {
            self.bank
                .mint(holder, *token, U256::from(STARTING_BALANCE))
                .expect("mint starting balance");
        }
    }

    pub fn balance(&self, holder: Address, token: Address) -> U256 {
        self.bank.balance_of(holder, token)
    }
}

impl Default for Orchard {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic test account.
pub fn account(n: u64) -> Address {
    Address::from_low_u64_be(n)
}
