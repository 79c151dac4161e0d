use serde::{Deserialize, Serialize};

/// User-facing strings the game surfaces. Kept as data so frontends stay
/// locale-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    pub win_title: String,
    pub lose_title: String,
    pub auto_won: String,
    pub auto_insufficient: String,
    pub auto_cancelled: String,
    pub history_empty: String,
}

impl Messages {
    pub fn english() -> Self {
        Self {
            win_title: "You Won!".into(),
            lose_title: "You Lost!".into(),
            auto_won: "Auto-bet finished on a win.".into(),
            auto_insufficient: "Not enough balance for the next double. Auto-bet stopped.".into(),
            auto_cancelled: "Auto-bet stopped.".into(),
            history_empty: "No betting history yet. Start playing to see your results!".into(),
        }
    }

    pub fn korean() -> Self {
        Self {
            win_title: "이겼습니다!".into(),
            lose_title: "졌습니다!".into(),
            auto_won: "자동 베팅이 승리로 끝났습니다.".into(),
            auto_insufficient: "다음 배액 베팅에 필요한 잔액이 부족하여 자동 베팅을 중지했습니다.".into(),
            auto_cancelled: "자동 베팅을 중지했습니다.".into(),
            history_empty: "아직 베팅 기록이 없습니다. 게임을 시작해 보세요!".into(),
        }
    }
}

/// Everything the near-identical game variants differed in: starting
/// balance, how much history is kept, and the wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_balance: u64,
    /// `None` keeps every record; `Some(n)` keeps the newest n.
    pub history_cap: Option<usize>,
    pub messages: Messages,
}

impl GameConfig {
    /// The default table: balance 1000, unbounded history, English.
    pub fn classic() -> Self {
        Self {
            starting_balance: 1000,
            history_cap: None,
            messages: Messages::english(),
        }
    }

    /// The localized variant: smaller bankroll, only the ten most recent
    /// spins on screen.
    pub fn lounge() -> Self {
        Self {
            starting_balance: 500,
            history_cap: Some(10),
            messages: Messages::korean(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Quarter-balance stake shortcut, rounded up.
pub fn quarter_stake(balance: u64) -> u64 {
    balance.div_ceil(4)
}

/// Half-balance stake shortcut, rounded up.
pub fn half_stake(balance: u64) -> u64 {
    balance.div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let classic = GameConfig::classic();
        assert_eq!(classic.starting_balance, 1000);
        assert_eq!(classic.history_cap, None);
        let lounge = GameConfig::lounge();
        assert_eq!(lounge.starting_balance, 500);
        assert_eq!(lounge.history_cap, Some(10));
    }

    #[test]
    fn stake_shortcuts_round_up() {
        assert_eq!(quarter_stake(1000), 250);
        assert_eq!(quarter_stake(999), 250);
        assert_eq!(quarter_stake(1), 1);
        assert_eq!(half_stake(999), 500);
        assert_eq!(half_stake(0), 0);
    }
}
