use dashmap::{DashMap, DashSet};
use orchard_core::{Address, NATIVE_TOKEN, U256};

use crate::error::TransferError;
use crate::traits::TokenTransfer;

/// In-memory token and native-currency balances.
///
/// Balances are keyed by `(holder, token)`; native currency lives under the
/// zero-address token. The ledger's holdings sit in the `custody` account.
/// Receivers can be marked as rejecting, which makes every transfer to them
/// fail the way a reverting receiver contract would.
pub struct InMemoryBank {
    custody: Address,
    balances: DashMap<(Address, Address), U256>,
    rejecting: DashSet<Address>,
}

impl InMemoryBank {
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: DashMap::new(),
            rejecting: DashSet::new(),
        }
    }

    /// Address of the custody account.
    pub fn custody(&self) -> Address {
        self.custody
    }

    /// Balance of `token` held by `holder`.
    pub fn balance_of(&self, holder: Address, token: Address) -> U256 {
        self.balances
            .get(&(holder, token))
            .map(|v| *v)
            .unwrap_or_default()
    }

    /// Native-currency balance of `holder`.
    pub fn native_balance_of(&self, holder: Address) -> U256 {
        self.balance_of(holder, NATIVE_TOKEN)
    }

    /// Credit `amount` of `token` to `holder` out of thin air.
    pub fn mint(&self, holder: Address, token: Address, amount: U256) -> Result<(), TransferError> {
        self.credit(holder, token, amount)
    }

    /// Make every future transfer to `receiver` fail.
    pub fn reject_transfers_to(&self, receiver: Address) {
        self.rejecting.insert(receiver);
    }

    pub fn accept_transfers_to(&self, receiver: Address) {
        self.rejecting.remove(&receiver);
    }

    fn credit(&self, holder: Address, token: Address, amount: U256) -> Result<(), TransferError> {
        let mut balance = self.balances.entry((holder, token)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow { holder, token })?;
        Ok(())
    }

    /// Move `amount` of `token` from `from` to `to`, all or nothing.
    ///
    /// The debit is checked and applied under the holder's entry guard, so
    /// concurrent transfers from the same holder cannot both spend the same
    /// balance. A failed credit reverses the debit.
    fn move_balance(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(&to) {
            return Err(TransferError::Rejected(to));
        }

        {
            let mut balance = self.balances.entry((from, token)).or_default();
            let available = *balance;
            *balance = available
                .checked_sub(amount)
                .ok_or(TransferError::InsufficientBalance {
                    holder: from,
                    token,
                    available,
                    required: amount,
                })?;
        }

        if let Err(e) = self.credit(to, token, amount) {
            self.balances
                .entry((from, token))
                .and_modify(|b| *b = b.saturating_add(amount))
                .or_insert(amount);
            return Err(e);
        }
        Ok(())
    }
}

impl TokenTransfer for InMemoryBank {
    fn transfer_from(&self, token: Address, from: Address, amount: U256) -> Result<(), TransferError> {
        if token == NATIVE_TOKEN {
            return Err(TransferError::NotAContract(token));
        }
        self.move_balance(token, from, self.custody, amount)
    }

    fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<(), TransferError> {
        if token == NATIVE_TOKEN {
            return Err(TransferError::NotAContract(token));
        }
        self.move_balance(token, self.custody, to, amount)
    }

    fn receive_value(&self, from: Address, amount: U256) -> Result<(), TransferError> {
        self.move_balance(NATIVE_TOKEN, from, self.custody, amount)
    }

    fn send_value(&self, to: Address, amount: U256) -> Result<(), TransferError> {
        self.move_balance(NATIVE_TOKEN, self.custody, to, amount)
    }
}
