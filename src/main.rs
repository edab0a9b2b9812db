//! Astro Raid headless runner
//!
//! Plays one run at a fixed 60 Hz with a simple autopilot and logs what
//! happens. Usage: `astro-raid [settings.json]`

use std::path::Path;
use std::process::ExitCode;

use astro_raid::consts::SHIP_SPEED;
use astro_raid::sim::{Director, GameEvent, RunStatus, StageSnapshot, TickInput, VisualRegistry};
use astro_raid::{Assets, Settings};

/// One frame per tick
const DT: f32 = 1.0;

/// Steer under the nearest target and shoot once lined up with nothing in flight
fn autopilot(snapshot: &StageSnapshot) -> TickInput {
    let ship_x = snapshot.ship.x;
    let Some(target) = snapshot
        .targets
        .iter()
        .min_by(|a, b| (a.x - ship_x).abs().total_cmp(&(b.x - ship_x).abs()))
    else {
        return TickInput::default();
    };

    let dx = target.x - ship_x;
    TickInput {
        move_left: dx < -SHIP_SPEED,
        move_right: dx > SHIP_SPEED,
        fire: dx.abs() <= SHIP_SPEED && snapshot.bullets == 0,
    }
}

fn run(settings: Settings) -> RunStatus {
    let max_ticks = settings.max_ticks;
    let mut director = Director::new(settings, Assets::builtin(), VisualRegistry::new());

    let mut status = RunStatus::InProgress;
    for _ in 0..max_ticks {
        let input = autopilot(&director.snapshot());
        status = director.tick(&input, DT);
        for event in director.drain_events() {
            match event {
                GameEvent::RunEnded(outcome) => log::info!("Outcome: {:?}", outcome),
                other => log::debug!("{:?}", other),
            }
        }
        if status != RunStatus::InProgress {
            break;
        }
    }

    let visuals = director.visuals();
    log::info!(
        "Finished after {} ticks, {} visuals live ({} created, {} removed)",
        director.ticks(),
        visuals.live_count(),
        visuals.created_count(),
        visuals.removed_count()
    );
    if visuals.stale_commands() > 0 {
        log::warn!("{} stale visual commands", visuals.stale_commands());
    }
    status
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Astro Raid (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_or_default(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Bad settings: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    match run(settings) {
        RunStatus::Win => {
            println!("You win!");
            ExitCode::SUCCESS
        }
        RunStatus::Lose => {
            println!("Game over");
            ExitCode::from(1)
        }
        RunStatus::InProgress => {
            println!("Tick limit reached");
            ExitCode::from(2)
        }
    }
}
