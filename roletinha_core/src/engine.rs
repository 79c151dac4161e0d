use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Messages};
use crate::error::{GameError, GameResult};
use crate::history::{History, Outcome, SpinRecord};
use crate::ledger::Ledger;
use crate::martingale::{AutoDecision, AutoStatus, Martingale, StopReason};
use crate::paytable::Paytable;
use crate::rng::DrawSource;
use crate::wheel::{Face, Wheel};

/// A stake on a face. Debited the moment the spin starts and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bet {
    pub stake: u64,
    pub face: Face,
}

/// A started spin whose result presentation has not finished yet. The
/// landing position is already committed; only the reveal is pending.
#[derive(Debug, Clone, Copy)]
struct PendingSpin {
    bet: Bet,
    position: usize,
}

/// The result dialog raised after every resolution. It stays up until the
/// frontend acknowledges it, and the auto-bet loop will not advance past
/// an unacknowledged one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinAlert {
    pub outcome: Outcome,
    pub stake: u64,
    pub face: Face,
    pub payout: u64,
}

impl SpinAlert {
    pub fn change(&self) -> i64 {
        signed_change(self.payout, self.stake)
    }
}

// payout - stake, clamped: with u64 operands the difference itself can
// sit outside the i64 range a plain cast would wrap through.
fn signed_change(payout: u64, stake: u64) -> i64 {
    (payout as i128 - stake as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Result of one auto-bet step: either the next spin was fired or the
/// run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStep {
    Spun { stake: u64, position: usize },
    Stopped(StopReason),
}

/// One player's game: wheel, paytable, balance and history in a single
/// object so the whole thing is unit-testable with an injected draw
/// source and no rendering environment.
///
/// A spin is two events. `start_spin` validates, debits the stake and
/// commits the drawn position; `complete_spin` resolves it, credits the
/// full payout and appends the record. Whatever presentational delay a
/// frontend puts between the two, only one spin can be in flight.
#[derive(Debug)]
pub struct Session {
    wheel: Wheel,
    paytable: Paytable,
    ledger: Ledger,
    history: History,
    messages: Messages,
    pending: Option<PendingSpin>,
    alert: Option<SpinAlert>,
    last_result: Option<SpinRecord>,
    auto: Martingale,
    auto_face: Option<Face>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            wheel: Wheel::standard_30(),
            paytable: Paytable::standard(),
            ledger: Ledger::new(config.starting_balance),
            history: History::new(config.history_cap),
            messages: config.messages,
            pending: None,
            alert: None,
            last_result: None,
            auto: Martingale::idle(),
            auto_face: None,
        }
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn spin_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn alert(&self) -> Option<&SpinAlert> {
        self.alert.as_ref()
    }

    pub fn last_result(&self) -> Option<&SpinRecord> {
        self.last_result.as_ref()
    }

    pub fn auto_status(&self) -> AutoStatus {
        self.auto.status()
    }

    /// Stake the auto-bet loop is currently at (the doubled value while a
    /// run is losing).
    pub fn auto_stake(&self) -> u64 {
        self.auto.current_stake()
    }

    /// Start a spin: validate, debit the stake, commit a drawn position.
    ///
    /// Returns the committed position so a frontend can land its wheel on
    /// it. A fresh start dismisses any result dialog still on screen, the
    /// same way a new bet replaces the previous result.
    pub fn start_spin(
        &mut self,
        draw: &mut dyn DrawSource,
        stake: u64,
        face: Face,
    ) -> GameResult<usize> {
        if self.pending.is_some() {
            return Err(GameError::SpinInFlight);
        }
        self.ledger.debit(stake)?;
        self.alert = None;
        self.last_result = None;
        let position = draw.draw(self.wheel.len()) % self.wheel.len();
        self.pending = Some(PendingSpin {
            bet: Bet { stake, face },
            position,
        });
        Ok(position)
    }

    /// Resolve the in-flight spin: credit the full payout (the stake was
    /// already debited), append the record and raise the result dialog.
    pub fn complete_spin(&mut self) -> GameResult<SpinRecord> {
        let PendingSpin { bet, position } = self.pending.take().ok_or(GameError::NoSpinInFlight)?;
        let landed = self.wheel.face_at(position);
        let outcome = if landed == bet.face {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        let payout = match outcome {
            Outcome::Win => bet.stake.saturating_mul(self.paytable.multiplier(bet.face)),
            Outcome::Lose => 0,
        };
        self.ledger.credit(payout);
        let record = SpinRecord {
            ts: Utc::now(),
            face: bet.face,
            stake: bet.stake,
            position: position as u8,
            landed,
            outcome,
            payout,
            change: signed_change(payout, bet.stake),
        };
        self.history.push(record.clone());
        self.alert = Some(SpinAlert {
            outcome,
            stake: bet.stake,
            face: bet.face,
            payout,
        });
        self.last_result = Some(record.clone());
        Ok(record)
    }

    /// Dismiss the result dialog, returning it if one was up.
    pub fn acknowledge(&mut self) -> Option<SpinAlert> {
        self.alert.take()
    }

    /// Start the auto-bet loop: fire the first spin at the initial stake
    /// and arm the doubling policy.
    pub fn start_auto(
        &mut self,
        draw: &mut dyn DrawSource,
        initial_stake: u64,
        face: Face,
    ) -> GameResult<usize> {
        if self.auto.is_running() {
            return Err(GameError::AutoRunning);
        }
        let position = self.start_spin(draw, initial_stake, face)?;
        self.auto.start(initial_stake);
        self.auto_face = Some(face);
        Ok(position)
    }

    /// Advance the loop after a resolution has been acknowledged: stop on
    /// a win, double and respin on a loss, abort when the double cannot
    /// be covered. Refuses to run over an in-flight spin or an
    /// unacknowledged dialog, so ledger updates can never race.
    pub fn auto_step(&mut self, draw: &mut dyn DrawSource) -> GameResult<AutoStep> {
        if !self.auto.is_running() {
            return Err(GameError::AutoNotRunning);
        }
        if self.pending.is_some() {
            return Err(GameError::SpinInFlight);
        }
        if self.alert.is_some() {
            return Err(GameError::AlertPending);
        }
        let outcome = match self.last_result.as_ref() {
            Some(record) => record.outcome,
            None => return Err(GameError::NoSpinInFlight),
        };
        let face = self.auto_face.ok_or(GameError::AutoNotRunning)?;
        match self.auto.decide(outcome, self.ledger.balance()) {
            AutoDecision::SpinAgain { stake } => {
                let position = self.start_spin(draw, stake, face)?;
                Ok(AutoStep::Spun { stake, position })
            }
            AutoDecision::Stop(reason) => {
                self.auto_face = None;
                Ok(AutoStep::Stopped(reason))
            }
        }
    }

    /// Cancel the auto-bet loop between spins. The spin already resolved
    /// stays resolved; only the next iteration is prevented. Returns
    /// whether a run was actually active.
    pub fn stop_auto(&mut self) -> bool {
        self.auto_face = None;
        self.auto.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FairDraw;

    #[test]
    fn test_spin_deterministic() {
        let run = || {
            let mut draw = FairDraw::new("server", "client");
            let mut session = Session::new(GameConfig::classic());
            session.start_spin(&mut draw, 10, Face::One).unwrap();
            session.complete_spin().unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.position, b.position);
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.change, b.change);
    }

    #[test]
    fn winning_spin_credits_full_payout() {
        let mut session = Session::new(GameConfig::classic());
        // Position 0 shows face 1.
        let mut forced = |_: usize| 0usize;
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        assert_eq!(session.balance(), 990);
        let record = session.complete_spin().unwrap();
        assert_eq!(record.outcome, Outcome::Win);
        assert_eq!(record.payout, 20);
        assert_eq!(record.change, 10);
        assert_eq!(session.balance(), 1010);
    }

    #[test]
    fn losing_spin_credits_nothing() {
        let mut session = Session::new(GameConfig::classic());
        // Position 1 shows face 3.
        let mut forced = |_: usize| 1usize;
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        let record = session.complete_spin().unwrap();
        assert_eq!(record.outcome, Outcome::Lose);
        assert_eq!(record.payout, 0);
        assert_eq!(record.change, -10);
        assert_eq!(session.balance(), 990);
    }

    #[test]
    fn only_one_spin_in_flight() {
        let mut session = Session::new(GameConfig::classic());
        let mut forced = |_: usize| 0usize;
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        assert!(matches!(
            session.start_spin(&mut forced, 10, Face::One),
            Err(GameError::SpinInFlight)
        ));
        session.complete_spin().unwrap();
        assert!(matches!(
            session.complete_spin(),
            Err(GameError::NoSpinInFlight)
        ));
    }

    #[test]
    fn rejected_stakes_leave_everything_untouched() {
        let mut session = Session::new(GameConfig::classic());
        let mut forced = |_: usize| 0usize;
        assert!(matches!(
            session.start_spin(&mut forced, 0, Face::One),
            Err(GameError::ZeroStake)
        ));
        assert!(matches!(
            session.start_spin(&mut forced, 1001, Face::One),
            Err(GameError::InsufficientBalance { .. })
        ));
        assert_eq!(session.balance(), 1000);
        assert!(!session.spin_in_flight());
        assert!(session.history().is_empty());
    }

    #[test]
    fn new_spin_dismisses_the_dialog() {
        let mut session = Session::new(GameConfig::classic());
        let mut forced = |_: usize| 0usize;
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        session.complete_spin().unwrap();
        assert!(session.alert().is_some());
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        assert!(session.alert().is_none());
    }

    #[test]
    fn last_result_follows_the_latest_resolution() {
        let mut session = Session::new(GameConfig::classic());
        let mut forced = |_: usize| 0usize;
        assert!(session.last_result().is_none());
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        assert!(session.last_result().is_none());
        session.complete_spin().unwrap();
        let last = session.last_result().unwrap();
        assert_eq!(last.outcome, Outcome::Win);
        assert_eq!(last.payout, 20);
        // A fresh start clears it until the new spin resolves.
        session.start_spin(&mut forced, 10, Face::One).unwrap();
        assert!(session.last_result().is_none());
    }

    #[test]
    fn extreme_stakes_saturate_the_recorded_change() {
        let config = GameConfig {
            starting_balance: u64::MAX,
            history_cap: None,
            messages: Messages::english(),
        };

        // Losing the whole u64 bankroll: the raw difference sits below
        // i64::MIN.
        let mut session = Session::new(config.clone());
        let mut lose = |_: usize| 1usize;
        session.start_spin(&mut lose, u64::MAX, Face::One).unwrap();
        let record = session.complete_spin().unwrap();
        assert_eq!(record.change, i64::MIN);
        assert_eq!(session.balance(), 0);

        // A saturated win payout: the raw difference sits above i64::MAX.
        let mut session = Session::new(config);
        let mut win = |_: usize| 11usize;
        session
            .start_spin(&mut win, 1_u64 << 62, Face::Twenty)
            .unwrap();
        let record = session.complete_spin().unwrap();
        assert_eq!(record.payout, u64::MAX);
        assert_eq!(record.change, i64::MAX);
        assert_eq!(session.alert().unwrap().change(), i64::MAX);
        assert_eq!(session.balance(), u64::MAX);
    }
}
