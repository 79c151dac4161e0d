use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("stake must be greater than zero")]
    ZeroStake,
    #[error("stake {stake} exceeds balance {balance}")]
    InsufficientBalance { stake: u64, balance: u64 },
    #[error("a spin is already in flight")]
    SpinInFlight,
    #[error("no spin to resolve")]
    NoSpinInFlight,
    #[error("previous result has not been acknowledged")]
    AlertPending,
    #[error("auto-bet is already running")]
    AutoRunning,
    #[error("auto-bet is not running")]
    AutoNotRunning,
}

pub type GameResult<T> = Result<T, GameError>;
