use serde::{Deserialize, Serialize};

use crate::history::Outcome;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AutoStatus {
    Idle,
    Running,
}

/// Why the policy stopped a run on its own. User cancellation goes
/// through `cancel` and is reported there, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Won,
    /// The doubled stake would exceed the balance; the loop stops itself
    /// rather than over-bet.
    InsufficientBalance,
}

/// What the policy wants next, given the latest resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDecision {
    SpinAgain { stake: u64 },
    Stop(StopReason),
}

/// The doubling policy: stake doubles after every loss, everything resets
/// after a win or an insufficient-balance abort. Pure state machine; the
/// session fires the actual spins.
#[derive(Debug, Clone)]
pub struct Martingale {
    initial_stake: u64,
    current_stake: u64,
    status: AutoStatus,
}

impl Martingale {
    pub fn idle() -> Self {
        Self {
            initial_stake: 0,
            current_stake: 0,
            status: AutoStatus::Idle,
        }
    }

    pub fn start(&mut self, initial_stake: u64) {
        self.initial_stake = initial_stake;
        self.current_stake = initial_stake;
        self.status = AutoStatus::Running;
    }

    pub fn status(&self) -> AutoStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AutoStatus::Running
    }

    pub fn initial_stake(&self) -> u64 {
        self.initial_stake
    }

    pub fn current_stake(&self) -> u64 {
        self.current_stake
    }

    /// React to a resolved spin. On a loss the next stake strictly doubles;
    /// if that would exceed `balance` the run aborts instead, so the policy
    /// never asks for a stake it cannot cover.
    pub fn decide(&mut self, outcome: Outcome, balance: u64) -> AutoDecision {
        match outcome {
            Outcome::Win => {
                self.reset();
                AutoDecision::Stop(StopReason::Won)
            }
            Outcome::Lose => {
                let next = self.current_stake.saturating_mul(2);
                if next > balance {
                    self.reset();
                    AutoDecision::Stop(StopReason::InsufficientBalance)
                } else {
                    self.current_stake = next;
                    AutoDecision::SpinAgain { stake: next }
                }
            }
        }
    }

    /// User cancellation between spins. Returns whether a run was active.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        self.reset();
        was_running
    }

    fn reset(&mut self) {
        self.current_stake = self.initial_stake;
        self.status = AutoStatus::Idle;
    }
}
