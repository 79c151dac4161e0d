pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod ledger;
pub mod martingale;
pub mod paytable;
pub mod rng;
pub mod wheel;

pub use crate::config::{half_stake, quarter_stake, GameConfig, Messages};
pub use crate::engine::{AutoStep, Bet, Session, SpinAlert};
pub use crate::error::{GameError, GameResult};
pub use crate::history::{History, Outcome, SpinRecord};
pub use crate::ledger::Ledger;
pub use crate::martingale::{AutoDecision, AutoStatus, Martingale, StopReason};
pub use crate::paytable::{Paytable, PaytableEntry};
pub use crate::rng::{
    derive_hash_hex, fair_position, verify_position, DrawSource, EntropyDraw, FairDraw,
};
pub use crate::wheel::{Face, Wheel};
