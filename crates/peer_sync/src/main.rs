//! Peer Sync - headless host for two synchronized peers.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, MoveScript};
use peer_sync::{
    GameLoop, InputSource, LocalBus, SharedInput, StatusText, SyncConfig, SyncCoordinator,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Demo {
            config,
            board_size,
            moves,
        } => run_demo(config, board_size, moves).await,
        Command::CheckConfig { config } => check_config(config),
    }
}

/// Loads the config file if given, defaults otherwise.
fn load_config(path: Option<PathBuf>) -> Result<SyncConfig> {
    Ok(match path {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    })
}

/// Runs peers "A" and "B" against each other on one bus.
#[instrument(skip(moves), fields(moves = moves.0.len()))]
async fn run_demo(
    config: Option<PathBuf>,
    board_size: Option<usize>,
    moves: MoveScript,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(size) = board_size {
        config = config.with_board_size(size);
    }
    config.validate()?;

    let [alice, bob] = play_script(&config, &moves).await?;
    for peer in [&alice, &bob] {
        info!(
            peer = peer.local_id(),
            status = %peer.status_text(),
            known_peers = ?peer.known_peers(),
            "Final board:\n{}",
            peer.board_snapshot()
        );
    }
    if alice.board_snapshot() != bob.board_snapshot() {
        anyhow::bail!("peers disagree on the final board");
    }
    Ok(())
}

/// Plays `moves` alternately as "A" and "B", each click waiting until the
/// other peer shows it. Returns both coordinators once the loops stop.
async fn play_script(
    config: &SyncConfig,
    moves: &MoveScript,
) -> Result<[SyncCoordinator<LocalBus>; 2]> {
    let bus = LocalBus::new(*config.bus_capacity());
    let alice = SyncCoordinator::new(&config.clone().with_local_id("A").with_peer_id("B"), bus.clone())?;
    let bob = SyncCoordinator::new(&config.clone().with_local_id("B").with_peer_id("A"), bus.clone())?;
    bus.attach(&alice.inbox());
    bus.attach(&bob.inbox());

    let period = config.tick_period();
    let size = alice.engine().board_size();
    let inputs = [SharedInput::new(), SharedInput::new()];
    let (alice_loop, alice_views) = GameLoop::new(alice, inputs[0].clone(), period);
    let (bob_loop, bob_views) = GameLoop::new(bob, inputs[1].clone(), period);
    let mut views = [alice_views, bob_views];
    let patience = Duration::from_secs(1).max(period * 20);

    let (stop_tx, stop_rx) = watch::channel(false);
    let alice_task = tokio::spawn(alice_loop.run(stop_rx.clone()));
    let bob_task = tokio::spawn(bob_loop.run(stop_rx));

    let mut placed = 0;
    for (turn, coord) in moves.0.iter().enumerate() {
        let mover = turn % 2;
        let input = &inputs[mover];
        let centre = |i: usize| (i as f64 + 0.5) / size as f64;
        input.move_pointer(centre(coord.col), centre(coord.row));
        input.click(coord.row, coord.col);

        // The move counts once the other peer's board shows it.
        let watcher = &mut views[1 - mover];
        let seen = timeout(patience, watcher.wait_for(|v| v.board.occupied() > placed))
            .await
            .map(|view| view.is_ok());
        match seen {
            Ok(true) => placed += 1,
            Ok(false) => anyhow::bail!("game loop stopped early"),
            Err(_) => {
                input.take_click();
                warn!(%coord, "Scripted move was not played");
            }
        }
        if turn + 1 < moves.0.len() && !matches!(watcher.borrow().status, StatusText::Turn(_)) {
            info!(turn, "Game finished before the script ran out");
            break;
        }
    }

    stop_tx.send(true)?;
    let alice = alice_task.await?;
    let bob = bob_task.await?;
    Ok([alice, bob])
}

/// Parses a config file and logs it.
#[instrument(skip_all, fields(config_path = %path.display()))]
fn check_config(path: PathBuf) -> Result<()> {
    let config = SyncConfig::from_file(&path)?;
    info!(?config, tick_period = ?config.tick_period(), "Config is valid");
    Ok(())
}
