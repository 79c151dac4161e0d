use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use roletinha_core::{AutoStep, Face, FairDraw, GameConfig, Messages, Session, StopReason};

use crate::export;

pub struct SimOpts {
    pub spins: u64,
    pub stake: u64,
    pub face: Face,
    pub balance: u64,
    pub martingale: bool,
    pub server_seed: String,
    pub client_seed: String,
    pub json: bool,
    pub export: Option<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    mode: &'static str,
    spins: u64,
    wins: u64,
    losses: u64,
    win_rate: f64,
    total_staked: u64,
    total_paid: u64,
    rtp: f64,
    peak_stake: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    episodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aborted_episodes: Option<u64>,
    starting_balance: u64,
    final_balance: u64,
    net_profit: i64,
    server_seed_hash: String,
}

pub fn run(opts: SimOpts) -> Result<()> {
    let config = GameConfig {
        starting_balance: opts.balance,
        history_cap: None,
        messages: Messages::english(),
    };
    let mut session = Session::new(config);
    let mut draw = FairDraw::new(opts.server_seed.as_str(), opts.client_seed.as_str());
    let server_seed_hash = draw.server_seed_hash_hex();

    let (episodes, aborted_episodes) = if opts.martingale {
        let (episodes, aborted) = run_martingale(&mut session, &mut draw, &opts)?;
        (Some(episodes), Some(aborted))
    } else {
        run_flat(&mut session, &mut draw, &opts)?;
        (None, None)
    };

    let history = session.history();
    let spins = history.len() as u64;
    let wins = history.wins() as u64;
    let total_staked: u64 = history.iter().map(|r| r.stake).sum();
    let total_paid: u64 = history.iter().map(|r| r.payout).sum();
    let summary = Summary {
        mode: if opts.martingale { "martingale" } else { "flat" },
        spins,
        wins,
        losses: spins - wins,
        win_rate: history.win_rate(),
        total_staked,
        total_paid,
        rtp: if total_staked == 0 {
            0.0
        } else {
            total_paid as f64 / total_staked as f64
        },
        peak_stake: history.iter().map(|r| r.stake).max().unwrap_or(0),
        episodes,
        aborted_episodes,
        starting_balance: opts.balance,
        final_balance: session.balance(),
        net_profit: history.net_profit(),
        server_seed_hash,
    };

    info!(spins = summary.spins, rtp = summary.rtp, "simulation finished");
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    if let Some(path) = &opts.export {
        export::write_history(path, session.history())?;
    }
    Ok(())
}

fn run_flat(session: &mut Session, draw: &mut FairDraw, opts: &SimOpts) -> Result<()> {
    for _ in 0..opts.spins {
        if session.balance() < opts.stake {
            debug!(balance = session.balance(), "bankroll exhausted");
            break;
        }
        session.start_spin(draw, opts.stake, opts.face)?;
        session.complete_spin()?;
        session.acknowledge();
    }
    Ok(())
}

// Episode after episode: start at the opening stake, double on every loss,
// stop the episode on a win or when the next double cannot be covered.
fn run_martingale(
    session: &mut Session,
    draw: &mut FairDraw,
    opts: &SimOpts,
) -> Result<(u64, u64)> {
    let mut episodes = 0u64;
    let mut aborted = 0u64;
    'episodes: while (session.history().len() as u64) < opts.spins {
        if session.balance() < opts.stake {
            debug!(balance = session.balance(), "bankroll exhausted");
            break;
        }
        session.start_auto(draw, opts.stake, opts.face)?;
        loop {
            session.complete_spin()?;
            session.acknowledge();
            if session.history().len() as u64 >= opts.spins {
                session.stop_auto();
                break 'episodes;
            }
            match session.auto_step(draw)? {
                AutoStep::Spun { .. } => {}
                AutoStep::Stopped(StopReason::Won) => {
                    episodes += 1;
                    break;
                }
                AutoStep::Stopped(StopReason::InsufficientBalance) => {
                    episodes += 1;
                    aborted += 1;
                    debug!(balance = session.balance(), "episode aborted short of a win");
                    break;
                }
            }
        }
    }
    Ok((episodes, aborted))
}

fn print_summary(s: &Summary) {
    println!("mode             {}", s.mode);
    println!("spins            {}", s.spins);
    println!("wins / losses    {} / {}", s.wins, s.losses);
    println!("win rate         {:.1}%", s.win_rate * 100.0);
    println!("total staked     {}", s.total_staked);
    println!("total paid out   {}", s.total_paid);
    println!("rtp              {:.4}", s.rtp);
    println!("peak stake       {}", s.peak_stake);
    if let (Some(episodes), Some(aborted)) = (s.episodes, s.aborted_episodes) {
        println!("episodes         {} ({} aborted)", episodes, aborted);
    }
    println!(
        "balance          {} -> {} ({:+})",
        s.starting_balance, s.final_balance, s.net_profit
    );
    println!("server seed hash {}", s.server_seed_hash);
}
