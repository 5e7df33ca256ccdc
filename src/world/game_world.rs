use std::time::Duration;

use crate::clock::FixedStep;
use crate::input::{GameKey, process_key_down, process_key_up};
use crate::map::{LevelDef, PhysicsSettings};
use crate::physics::{PlayerStep, simulate_platforms, simulate_player};

use super::{FrameEvent, Player, Scene};

/// Everything the simulation mutates. Driven from outside through `tick` or `advance`.
pub struct World {
    pub player: Player,
    pub scene: Scene,
    pub physics: PhysicsSettings,
    pub frame_id: u64,
    clock: FixedStep,
    events: Vec<FrameEvent>,
}

impl World {
    pub fn new(level: &LevelDef) -> Self {
        let physics = level.physics.clone();
        let scene = Scene::build(level, 1);
        let player = Player::new(scene.spawn, physics.player_size());
        log::info!(
            "world created for level '{}' ({}x{}, {} items)",
            scene.name,
            scene.width(),
            scene.height(),
            scene.items().len()
        );

        Self {
            player,
            scene,
            clock: FixedStep::new(physics.tick_hz, physics.max_catch_up_ticks),
            physics,
            frame_id: 0,
            events: Vec::new(),
        }
    }

    /// Replaces the static content wholesale. The player is left untouched.
    pub fn rebuild_scene(&mut self, level: &LevelDef) {
        let generation = self.scene.generation + 1;
        self.scene = Scene::build(level, generation);
        log::info!("scene '{}' rebuilt, generation {generation}", self.scene.name);
        self.events.push(FrameEvent::SceneRebuilt { generation });
    }

    pub fn key_down(&mut self, key: GameKey, repeat: bool) {
        process_key_down(&mut self.player, key, repeat, &self.physics, &mut self.events);
    }

    pub fn key_up(&mut self, key: GameKey, repeat: bool) {
        process_key_up(&mut self.player, key, repeat);
    }

    /// One fixed step: platforms move first so the player collides with this tick's positions.
    pub fn tick(&mut self) -> PlayerStep {
        self.frame_id += 1;
        simulate_platforms(&mut self.scene);
        simulate_player(&mut self.player, &self.scene, &self.physics, &mut self.events)
    }

    /// Feeds wall-clock time in and runs however many fixed ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.accumulate(elapsed);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    pub fn tick_duration(&self) -> Duration {
        self.clock.step()
    }

    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }
}
