//! Headless session driver
//!
//! Runs the simulation without a host engine: a scripted pilot strafes
//! around the map and shoots at the nearest enemy while outbound events
//! stream to the log. Useful for balance runs and as a reference for
//! embedding the core.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;

use siege_core::config::SessionConfig;
use siege_core::sim::{GameEvent, GamePhase, Session, TickInput, tick};

const FRAME_MS: f32 = 1000.0 / 60.0;

#[derive(Debug, Parser)]
#[command(about = "Headless driver for the siege-core simulation")]
struct Args {
    /// Session seed
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum frames to simulate (60 per second)
    #[arg(long, default_value_t = 3600)]
    frames: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config: SessionConfig = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    let mut session = Session::new(config, args.seed);
    for frame in 0..args.frames {
        let input = pilot_input(&session, frame);
        tick(&mut session, &input, FRAME_MS);
        for event in session.drain_events() {
            log_event(&event);
        }
        if session.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "survived {:.1}s, score {}, kills {}",
        session.clock_ms / 1000.0,
        session.score,
        session.kills
    );
    Ok(())
}

/// Scripted pilot: hold the middle of the map, circle-strafe once there,
/// aim at the nearest enemy and shoot twice a second
fn pilot_input(session: &Session, frame: u32) -> TickInput {
    let center = session.config.world_extent() / 2.0;
    let to_center = center - session.player.pos;
    let move_dir = if to_center.length() > 150.0 {
        to_center
    } else {
        Vec2::new(-to_center.y, to_center.x)
    };

    let aim_target = session
        .enemies
        .iter()
        .min_by(|a, b| {
            let da = a.pos.distance_squared(session.player.pos);
            let db = b.pos.distance_squared(session.player.pos);
            da.total_cmp(&db)
        })
        .map(|enemy| enemy.pos);

    TickInput {
        move_dir,
        aim_target,
        fire: aim_target.is_some() && frame % 30 == 0,
        pause: false,
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::SceneTransition(change) => log::info!("scene: {change:?}"),
        GameEvent::HudUpdate { score, health } => {
            log::debug!("hud: score {score} health {health}");
        }
        other => log::trace!("{other:?}"),
    }
}
