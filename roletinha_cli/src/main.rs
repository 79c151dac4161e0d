mod export;
mod play;
mod sim;

use clap::{Parser, Subcommand, ValueEnum};

use roletinha_core::{
    derive_hash_hex, fair_position, EntropyDraw, Face, FairDraw, GameConfig, Messages, Paytable,
    Wheel,
};

#[derive(Parser)]
#[command(name = "roletinha-cli", about = "Wheel-of-fortune betting game for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log filter, e.g. "info" or "roletinha_core=debug"
    #[arg(long, env = "ROLETINHA_LOG", default_value = "warn")]
    log: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// 1000 starting balance, unbounded history, English messages
    Classic,
    /// 500 starting balance, last 10 spins kept, Korean messages
    Lounge,
}

#[derive(Clone, Copy, ValueEnum)]
enum Locale {
    En,
    Ko,
}

#[derive(Subcommand)]
enum Commands {
    /// Play at the wheel interactively
    Play {
        #[arg(long, value_enum, default_value = "classic")]
        preset: Preset,
        /// Override the preset's starting balance
        #[arg(long)]
        balance: Option<u64>,
        /// Override the preset's history cap, 0 keeps everything
        #[arg(long)]
        cap: Option<usize>,
        /// Override the preset's message language
        #[arg(long, value_enum)]
        locale: Option<Locale>,
        /// Draw provably fair positions from this secret seed instead of OS entropy
        #[arg(long)]
        server_seed: Option<String>,
        /// Client half of the provably-fair seed pair
        #[arg(long, default_value = "roletinha")]
        client_seed: String,
        /// Write the session history to a CSV file on quit
        #[arg(long)]
        export: Option<String>,
    },
    /// Spin without interaction and report the totals
    Simulate {
        /// How many spins to run
        #[arg(long, default_value_t = 1000)]
        spins: u64,
        /// Stake per spin, or the opening stake of each martingale episode
        #[arg(long, default_value_t = 10)]
        stake: u64,
        /// Face to bet on: 1, 3, 5, 10 or 20
        #[arg(long, default_value_t = 1)]
        face: u64,
        /// Bankroll to start from
        #[arg(long, default_value_t = 1_000_000)]
        balance: u64,
        /// Double the stake after every loss and reset on a win
        #[arg(long)]
        martingale: bool,
        #[arg(long, default_value = "simulator")]
        server_seed: String,
        #[arg(long, default_value = "roletinha")]
        client_seed: String,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Write every spin to a CSV file
        #[arg(long)]
        export: Option<String>,
    },
    /// Recompute a provably-fair draw and check it against a recorded position
    Verify {
        server_seed: String,
        client_seed: String,
        nonce: u64,
        position: usize,
    },
    /// Show the wheel layout, multipliers and expected return per face
    Odds,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_env_filter(cli.log.as_str()).init();

    match cli.command {
        Commands::Play {
            preset,
            balance,
            cap,
            locale,
            server_seed,
            client_seed,
            export,
        } => {
            let mut config = match preset {
                Preset::Classic => GameConfig::classic(),
                Preset::Lounge => GameConfig::lounge(),
            };
            if let Some(balance) = balance {
                config.starting_balance = balance;
            }
            if let Some(cap) = cap {
                config.history_cap = if cap == 0 { None } else { Some(cap) };
            }
            if let Some(locale) = locale {
                config.messages = match locale {
                    Locale::En => Messages::english(),
                    Locale::Ko => Messages::korean(),
                };
            }
            let opts = match server_seed {
                Some(seed) => {
                    let draw = FairDraw::new(seed, client_seed);
                    let note =
                        format!("Provably fair, server seed hash {}", draw.server_seed_hash_hex());
                    play::PlayOpts {
                        config,
                        draw: Box::new(draw),
                        fairness_note: Some(note),
                        export,
                    }
                }
                None => play::PlayOpts {
                    config,
                    draw: Box::new(EntropyDraw),
                    fairness_note: None,
                    export,
                },
            };
            play::run(opts)
        }
        Commands::Simulate {
            spins,
            stake,
            face,
            balance,
            martingale,
            server_seed,
            client_seed,
            json,
            export,
        } => {
            let face = Face::from_value(face)
                .ok_or_else(|| anyhow::anyhow!("face must be one of 1, 3, 5, 10, 20"))?;
            sim::run(sim::SimOpts {
                spins,
                stake,
                face,
                balance,
                martingale,
                server_seed,
                client_seed,
                json,
                export,
            })
        }
        Commands::Verify {
            server_seed,
            client_seed,
            nonce,
            position,
        } => {
            let wheel = Wheel::standard_30();
            let recomputed = fair_position(&server_seed, &client_seed, nonce, wheel.len());
            println!("server seed hash    {}", derive_hash_hex(server_seed.as_bytes()));
            println!(
                "recomputed position {} (face {})",
                recomputed,
                wheel.face_at(recomputed)
            );
            if recomputed == position {
                println!("OK: the recorded position checks out.");
                Ok(())
            } else {
                anyhow::bail!("recorded position {position} does not match recomputed {recomputed}")
            }
        }
        Commands::Odds => {
            print_odds(&Wheel::standard_30(), &Paytable::standard());
            Ok(())
        }
    }
}

pub(crate) fn print_odds(wheel: &Wheel, paytable: &Paytable) {
    let layout: Vec<String> = wheel.segments().iter().map(|f| f.to_string()).collect();
    println!("Wheel ({} segments): {}", wheel.len(), layout.join(" "));
    println!();
    println!(
        "{:>4}  {:>8}  {:>10}  {:>15}",
        "face", "segments", "multiplier", "expected return"
    );
    for face in Face::ALL {
        println!(
            "{:>4}  {:>8}  {:>9}x  {:>15.3}",
            face.to_string(),
            wheel.count_of(face),
            paytable.multiplier(face),
            paytable.expected_return(wheel, face)
        );
    }
}
