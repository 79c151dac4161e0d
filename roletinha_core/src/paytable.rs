use serde::{Deserialize, Serialize};

use crate::wheel::{Face, Wheel};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub face: Face,
    /// Gross multiplier: a winning stake s returns s * multiplier.
    pub multiplier: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paytable(pub Vec<PaytableEntry>);

impl Paytable {
    /// The standard table: 1 pays 2x, 3 pays 4x, 5 pays 6x, 10 pays 11x,
    /// 20 pays 21x (gross, so the net win on face 1 equals the stake).
    pub fn standard() -> Self {
        Self(vec![
            PaytableEntry {
                face: Face::One,
                multiplier: 2,
            },
            PaytableEntry {
                face: Face::Three,
                multiplier: 4,
            },
            PaytableEntry {
                face: Face::Five,
                multiplier: 6,
            },
            PaytableEntry {
                face: Face::Ten,
                multiplier: 11,
            },
            PaytableEntry {
                face: Face::Twenty,
                multiplier: 21,
            },
        ])
    }

    /// Gross multiplier for a face; faces missing from the table pay nothing.
    pub fn multiplier(&self, face: Face) -> u64 {
        self.0
            .iter()
            .find(|e| e.face == face)
            .map(|e| e.multiplier)
            .unwrap_or(0)
    }

    /// Long-run return per unit staked on `face`: hit probability times the
    /// gross multiplier. Below 1.0 means the wheel keeps the difference.
    pub fn expected_return(&self, wheel: &Wheel, face: Face) -> f64 {
        if wheel.is_empty() {
            return 0.0;
        }
        let hits = wheel.count_of(face) as f64;
        hits / wheel.len() as f64 * self.multiplier(face) as f64
    }
}
