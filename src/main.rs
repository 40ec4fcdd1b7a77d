//! XFChess bot launcher
//!
//! Challenges the Lichess AI, plays the game and exits when it ends.
//!
//! ```bash
//! LICHESS_TOKEN=lip_... cargo run -- --level 3 --color white
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use xfchess_bot::api::{ChallengeColor, ChallengeRequest, GameApi, LichessClient};
use xfchess_bot::game::ai::RandomMoveSupplier;
use xfchess_bot::{BotConfig, Coordinator};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(name = "xfchess-bot")]
#[command(about = "Plays a game against the Lichess AI")]
struct Args {
    /// Lichess AI level
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    level: u8,

    /// Color the bot asks for
    #[arg(long, value_enum, default_value_t = ChallengeColor::Random)]
    color: ChallengeColor,

    /// Search depth in plies (overrides XFCHESS_SEARCH_DEPTH)
    #[arg(long)]
    depth: Option<u32>,

    /// Initial clock in seconds
    #[arg(long, default_value_t = 3600)]
    clock_limit: u32,

    /// Clock increment in seconds
    #[arg(long, default_value_t = 30)]
    clock_increment: u32,

    /// Play random legal moves instead of book and search
    #[arg(long)]
    random: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = BotConfig::from_env().context("Loading configuration")?;
    if let Some(depth) = args.depth {
        config = config.with_search_depth(depth)?;
    }

    let client = LichessClient::new(&config.host, &config.explorer_host, &config.token)
        .context("Building Lichess client")?;
    let api: Arc<dyn GameApi> = Arc::new(client);

    let request = ChallengeRequest {
        level: args.level,
        clock_limit: args.clock_limit,
        clock_increment: args.clock_increment,
        color: args.color,
        ..ChallengeRequest::default()
    };
    let challenge = config
        .retry
        .run("create challenge", || api.create_challenge(&request))
        .context("Creating challenge")?;
    info!(
        "Game started: {}/{}",
        config.host.trim_end_matches('/'),
        challenge.id
    );

    let mut session = if args.random {
        Coordinator::start_with_supplier(
            Arc::clone(&api),
            &challenge,
            Box::new(RandomMoveSupplier::new()),
            &config,
        )?
    } else {
        Coordinator::start(Arc::clone(&api), &challenge, &config)?
    };

    let mut announced_color = false;
    while session.is_active() {
        if !announced_color {
            if let Some(color) = session.color() {
                info!("Playing as {:?}", color);
                announced_color = true;
            }
        }
        thread::sleep(POLL_INTERVAL);
    }

    session.close();

    let snapshot = session.snapshot();
    if snapshot.unusable {
        warn!("Session could not be played (color unresolved)");
    } else if snapshot.degraded {
        warn!("Session ended with service errors");
    }
    info!(
        "Result: {} ({} moves played)",
        snapshot.status,
        session.moves_submitted()
    );
    Ok(())
}
