use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wheel::Face;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Lose => write!(f, "LOSE"),
        }
    }
}

/// One resolved spin. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinRecord {
    pub ts: DateTime<Utc>,
    /// Face the player bet on.
    pub face: Face,
    pub stake: u64,
    /// Segment the wheel stopped at.
    pub position: u8,
    /// Face shown at that segment.
    pub landed: Face,
    pub outcome: Outcome,
    /// Amount returned to the balance (0 on a loss, gross on a win).
    pub payout: u64,
    /// payout - stake, clamped to the i64 range; what the spin did to the
    /// balance overall.
    pub change: i64,
}

/// Spin records, newest first. A cap of `Some(n)` keeps the most recent
/// n records and silently drops the oldest; `None` keeps everything.
/// The aggregate figures are computed over whatever is retained.
#[derive(Debug, Clone)]
pub struct History {
    records: VecDeque<SpinRecord>,
    cap: Option<usize>,
}

impl History {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            cap,
        }
    }

    pub fn push(&mut self, record: SpinRecord) {
        self.records.push_front(record);
        if let Some(cap) = self.cap {
            self.records.truncate(cap);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    /// Records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &SpinRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&SpinRecord> {
        self.records.front()
    }

    pub fn wins(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_win()).count()
    }

    /// wins / total as a fraction; 0.0 with no records.
    pub fn win_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.wins() as f64 / self.records.len() as f64
    }

    /// Sum of per-spin changes over the retained records.
    pub fn net_profit(&self) -> i64 {
        self.records.iter().map(|r| r.change).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stake: u64, outcome: Outcome, change: i64) -> SpinRecord {
        SpinRecord {
            ts: Utc::now(),
            face: Face::One,
            stake,
            position: 0,
            landed: Face::One,
            outcome,
            payout: (stake as i64 + change).max(0) as u64,
            change,
        }
    }

    #[test]
    fn newest_first_and_capped() {
        let mut history = History::new(Some(3));
        assert_eq!(history.cap(), Some(3));
        for stake in 1..=5 {
            history.push(record(stake, Outcome::Lose, -(stake as i64)));
        }
        assert_eq!(history.len(), 3);
        let stakes: Vec<u64> = history.iter().map(|r| r.stake).collect();
        assert_eq!(stakes, vec![5, 4, 3]);
        assert_eq!(history.latest().unwrap().stake, 5);
    }

    #[test]
    fn unbounded_keeps_everything() {
        let mut history = History::new(None);
        assert_eq!(history.cap(), None);
        for _ in 0..100 {
            history.push(record(1, Outcome::Lose, -1));
        }
        assert_eq!(history.len(), 100);
    }

    #[test]
    fn aggregates() {
        let mut history = History::new(None);
        assert_eq!(history.win_rate(), 0.0);
        assert_eq!(history.net_profit(), 0);
        history.push(record(10, Outcome::Win, 10));
        history.push(record(10, Outcome::Lose, -10));
        history.push(record(20, Outcome::Lose, -20));
        history.push(record(40, Outcome::Win, 40));
        assert_eq!(history.wins(), 2);
        assert!((history.win_rate() - 0.5).abs() < 1e-9);
        assert_eq!(history.net_profit(), 20);
    }
}
