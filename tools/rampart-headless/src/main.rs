//! rampart-headless: runs a RAMPART session without a renderer.
//!
//! A seeded autopilot builds, upgrades and calls waves, so balance changes can
//! be soaked from the command line:
//!
//!   rampart-headless --frames 36000 --seed 7
//!   RUST_LOG=debug rampart-headless --config balance.json --json

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rampart_core::commands::PlayerCommand;
use rampart_core::events::SimEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "rampart-headless")]
#[command(about = "Run a tower-defense session with a scripted player")]
struct Args {
    /// JSON session config. Omitted fields use the stock map.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "36000")]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value = "0.016666668")]
    frame_time: f32,

    /// Autopilot RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Stop after this many waves have started
    #[arg(long)]
    max_waves: Option<u32>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Frames between autopilot decisions.
const DECISION_INTERVAL: u32 = 30;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SimConfig::from_json_str(&text)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    let mut engine = SimulationEngine::new(config).context("starting session")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut snapshot = engine.snapshot();
    let mut kills = 0u32;
    let mut breaches = 0u32;

    for frame in 0..args.frames {
        if frame % DECISION_INTERVAL == 0 {
            if let Some(command) = choose_command(&snapshot, &mut rng, args.max_waves) {
                engine.queue_command(command);
            }
        }

        snapshot = engine.tick(args.frame_time);
        for event in &snapshot.events {
            match event {
                SimEvent::EnemyKilled { .. } => kills += 1,
                SimEvent::BaseBreached { .. } => breaches += 1,
                _ => {}
            }
        }

        if snapshot.game_over {
            info!(frame, "session over");
            break;
        }
        let waves_done = args
            .max_waves
            .is_some_and(|max| snapshot.wave_index.map_or(0, |i| i + 1) >= max);
        if waves_done && !snapshot.wave_in_progress {
            info!(frame, "wave limit reached");
            break;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "time {:.1}s | wave {} ({:?}) | base {} | currency {} | towers {} | kills {} | breaches {}",
            snapshot.time.elapsed_secs,
            snapshot.wave_label,
            snapshot.wave_status,
            snapshot.base_health,
            snapshot.currency,
            snapshot.towers.len(),
            kills,
            breaches,
        );
        println!("{}", snapshot.status_message);
    }
    Ok(())
}

/// Pick the autopilot's next intent from what the player can see.
fn choose_command(
    snapshot: &GameStateSnapshot,
    rng: &mut ChaCha8Rng,
    max_waves: Option<u32>,
) -> Option<PlayerCommand> {
    let started = snapshot.wave_index.map_or(0, |index| index + 1);
    let may_start = max_waves.map_or(true, |max| started < max);
    if snapshot.can_start_wave && may_start && snapshot.wave_index.is_none() {
        return Some(PlayerCommand::StartNextWave);
    }

    let free_spots: Vec<_> = snapshot
        .build_spots
        .iter()
        .filter(|spot| spot.tower.is_none())
        .map(|spot| spot.id)
        .collect();
    if let Some(&spot) = free_spots.choose(rng) {
        if rng.gen_bool(0.6) && snapshot.currency >= snapshot.selected_design.cost {
            return Some(PlayerCommand::BuildTower { spot, design: None });
        }
    }

    let upgradable: Vec<_> = snapshot
        .towers
        .iter()
        .filter(|tower| tower.upgrade_cost > 0 && tower.upgrade_cost <= snapshot.currency)
        .map(|tower| tower.id)
        .collect();
    if let Some(&tower) = upgradable.choose(rng) {
        return Some(PlayerCommand::UpgradeTower { tower });
    }

    if rng.gen_bool(0.3) {
        return Some(PlayerCommand::CycleTowerDesign);
    }
    None
}
