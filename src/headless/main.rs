use std::env;

use skyhop::{DeathCause, FrameEvent, GameKey, LevelDef, World};
use tokio::time::Instant;

const DEFAULT_TICKS: u64 = 600;

/// Counters collected over a run.
#[derive(Debug, Default)]
struct RunStats {
    ticks: u64,
    jumps: u32,
    landings: u32,
    hazard_deaths: u32,
    fall_deaths: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let level = match env::args().nth(1).filter(|a| a != "-") {
        Some(path) => LevelDef::load(path)?,
        None => LevelDef::builtin()?,
    };
    let ticks = match env::args().nth(2) {
        Some(n) => n.parse()?,
        None => DEFAULT_TICKS,
    };
    log::info!("running '{}' headless for {ticks} ticks", level.name);

    let mut world = World::new(&level);
    let stats = run(&mut world, ticks).await;

    log::info!(
        "done: {} ticks, {} jumps, {} landings, {} spike deaths, {} falls, player at ({:.1}, {:.1})",
        stats.ticks,
        stats.jumps,
        stats.landings,
        stats.hazard_deaths,
        stats.fall_deaths,
        world.player.pos.x,
        world.player.pos.y
    );
    Ok(())
}

/// Fixed-rate loop: walk right and hop whenever grounded.
async fn run(world: &mut World, ticks: u64) -> RunStats {
    let tick = world.tick_duration();
    let mut stats = RunStats::default();
    let mut last = Instant::now();

    world.key_down(GameKey::Right, false);

    while stats.ticks < ticks {
        let now = Instant::now();
        let elapsed = now.duration_since(last);
        if elapsed < tick {
            tokio::time::sleep(tick - elapsed).await;
            continue;
        }
        last = now;

        if !world.player.is_airborne() {
            world.key_down(GameKey::Jump, false);
            world.key_up(GameKey::Jump, false);
        }
        world.tick();
        stats.ticks += 1;

        for event in world.drain_events() {
            match event {
                FrameEvent::Jumped => stats.jumps += 1,
                FrameEvent::Landed { .. } => stats.landings += 1,
                FrameEvent::PlayerDied { cause, .. } => {
                    match cause {
                        DeathCause::Hazard => stats.hazard_deaths += 1,
                        DeathCause::FellOut => stats.fall_deaths += 1,
                    }
                    // respawn clears movement, so press again
                    world.key_down(GameKey::Right, false);
                }
                FrameEvent::SceneRebuilt { .. } => {}
            }
        }

        if stats.ticks % 60 == 0 {
            log::debug!(
                "tick {}: player at ({:.1}, {:.1})",
                world.frame_id,
                world.player.pos.x,
                world.player.pos.y
            );
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn run_counts_events() {
        let level = LevelDef::builtin().unwrap();
        let mut world = World::new(&level);
        let stats = run(&mut world, 120).await;
        assert_eq!(stats.ticks, 120);
        assert!(stats.jumps >= 1);
        assert_eq!(world.frame_id, 120);
    }
}
