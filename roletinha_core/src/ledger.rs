use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// The player's balance. Debits are validated before anything is touched,
/// so the balance can never go negative; wins credit the full payout
/// because the stake was already taken at spin start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    balance: u64,
}

impl Ledger {
    pub fn new(starting_balance: u64) -> Self {
        Self {
            balance: starting_balance,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Take a stake out of the balance. Rejects a zero stake and a stake
    /// above the balance without mutating.
    pub fn debit(&mut self, stake: u64) -> GameResult<()> {
        if stake == 0 {
            return Err(GameError::ZeroStake);
        }
        if stake > self.balance {
            return Err(GameError::InsufficientBalance {
                stake,
                balance: self.balance,
            });
        }
        self.balance -= stake;
        Ok(())
    }

    /// Add a payout; zero is fine (a losing spin credits nothing).
    pub fn credit(&mut self, payout: u64) {
        self.balance = self.balance.saturating_add(payout);
    }
}
