use std::io::{self, Write};

use anyhow::Result;
use tracing::{debug, info};

use roletinha_core::{
    half_stake, quarter_stake, AutoStep, DrawSource, Face, GameConfig, Session, StopReason,
};

use crate::export;

pub struct PlayOpts {
    pub config: GameConfig,
    pub draw: Box<dyn DrawSource>,
    pub fairness_note: Option<String>,
    pub export: Option<String>,
}

pub fn run(mut opts: PlayOpts) -> Result<()> {
    let mut session = Session::new(opts.config);
    let draw = opts.draw.as_mut();

    println!("=== roletinha ===");
    if let Some(note) = &opts.fairness_note {
        println!("{note}");
    }
    println!("Balance: {}", session.balance());
    println!("Type 'help' for the commands.");

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = read_line()? else { break };
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };
        let args: Vec<&str> = parts.collect();

        match command {
            "bet" | "b" => cmd_bet(&mut session, draw, &args)?,
            "auto" | "a" => cmd_auto(&mut session, draw, &args)?,
            "balance" => println!("Balance: {}", session.balance()),
            "history" | "h" => print_history(&session),
            "stats" => print_stats(&session),
            "odds" => crate::print_odds(session.wheel(), session.paytable()),
            "help" | "?" => print_help(),
            "quit" | "q" | "exit" => break,
            other => println!("Unknown command '{other}'. Type 'help' for the commands."),
        }
    }

    if let Some(path) = &opts.export {
        export::write_history(path, session.history())?;
    }
    println!("You leave the wheel with {}.", session.balance());
    Ok(())
}

fn cmd_bet(session: &mut Session, draw: &mut dyn DrawSource, args: &[&str]) -> Result<()> {
    let Some((stake, face)) = parse_bet(session.balance(), args) else {
        println!("Usage: bet <stake> <face>  (stake also takes 25%, 50% or max)");
        return Ok(());
    };
    let position = match session.start_spin(draw, stake, face) {
        Ok(position) => position,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };
    println!("You bet {stake} on {face}. The wheel spins...");
    let record = session.complete_spin()?;
    debug!(position, landed = %record.landed, "spin resolved");
    show_result(session)?;
    Ok(())
}

fn cmd_auto(session: &mut Session, draw: &mut dyn DrawSource, args: &[&str]) -> Result<()> {
    let Some((stake, face)) = parse_bet(session.balance(), args) else {
        println!("Usage: auto <initial stake> <face>");
        return Ok(());
    };
    if let Err(err) = session.start_auto(draw, stake, face) {
        println!("{err}");
        return Ok(());
    }
    info!(initial_stake = stake, %face, "auto-bet started");
    println!("Spinning until a win, starting at {stake} on {face}.");
    loop {
        let record = session.complete_spin()?;
        let title = if record.outcome.is_win() {
            session.messages().win_title.clone()
        } else {
            session.messages().lose_title.clone()
        };
        println!();
        println!(
            "  *** {title} ***  stake {} landed {} change {:+}  balance {}",
            record.stake,
            record.landed,
            record.change,
            session.balance()
        );
        print!("  [Enter] continue, 's' to stop: ");
        io::stdout().flush()?;
        let stop_requested = matches!(read_line()?.as_deref(), None | Some("s") | Some("stop"));
        session.acknowledge();
        if stop_requested {
            if session.stop_auto() {
                println!("{}", session.messages().auto_cancelled);
            }
            break;
        }
        match session.auto_step(draw)? {
            AutoStep::Spun { stake, .. } => {
                println!("Doubling down: {stake} on {face}. The wheel spins...");
            }
            AutoStep::Stopped(StopReason::Won) => {
                println!("{}", session.messages().auto_won);
                break;
            }
            AutoStep::Stopped(StopReason::InsufficientBalance) => {
                println!("{}", session.messages().auto_insufficient);
                break;
            }
        }
    }
    Ok(())
}

// Print the result dialog the way the alert box shows it, then wait for
// the player to dismiss it before handing the prompt back.
fn show_result(session: &mut Session) -> Result<()> {
    let Some(alert) = session.alert().cloned() else {
        return Ok(());
    };
    let title = if alert.outcome.is_win() {
        &session.messages().win_title
    } else {
        &session.messages().lose_title
    };
    println!();
    println!("  *** {title} ***");
    println!(
        "  Bet {} on {}  payout {}  change {:+}",
        alert.stake,
        alert.face,
        alert.payout,
        alert.change()
    );
    println!("  Balance: {}", session.balance());
    print!("  [Enter] ");
    io::stdout().flush()?;
    let _ = read_line()?;
    session.acknowledge();
    Ok(())
}

fn parse_bet(balance: u64, args: &[&str]) -> Option<(u64, Face)> {
    if args.len() != 2 {
        return None;
    }
    let stake = parse_stake(balance, args[0])?;
    let face = parse_face(args[1])?;
    Some((stake, face))
}

fn parse_stake(balance: u64, token: &str) -> Option<u64> {
    match token {
        "max" | "all" => Some(balance),
        "25%" => Some(quarter_stake(balance)),
        "50%" => Some(half_stake(balance)),
        _ => token.parse().ok(),
    }
}

fn parse_face(token: &str) -> Option<Face> {
    let n: u64 = token.trim_end_matches('x').parse().ok()?;
    Face::from_value(n)
}

fn print_history(session: &Session) {
    let history = session.history();
    if history.is_empty() {
        println!("{}", session.messages().history_empty);
        return;
    }
    println!(
        "{:>10}  {:>10}  {:>6}  {:>8}",
        "multiplier", "stake", "result", "change"
    );
    for record in history.iter() {
        println!(
            "{:>9}x  {:>10}  {:>6}  {:>+8}",
            record.face, record.stake, record.outcome, record.change
        );
    }
    println!();
    print_stats(session);
}

fn print_stats(session: &Session) {
    let history = session.history();
    println!("Total bets: {}", history.len());
    println!("Win rate:   {:.1}%", history.win_rate() * 100.0);
    println!("Net profit: {:+}", history.net_profit());
}

fn print_help() {
    println!("  bet <stake> <face>    spin once (stake: a number, 25%, 50% or max)");
    println!("  auto <stake> <face>   double after every loss until a win");
    println!("  balance               show the balance");
    println!("  history               past spins, newest first");
    println!("  stats                 totals, win rate, net profit");
    println!("  odds                  wheel layout and expected return");
    println!("  quit                  leave the table");
}

fn read_line() -> Result<Option<String>> {
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
