use std::env;

use ggez::event::{self, EventHandler};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::winit::keyboard::PhysicalKey;
use ggez::{Context, ContextBuilder, GameError, GameResult};
use skyhop::{FrameEvent, GameKey, LevelDef, World};

mod rendering;

use rendering::Renderer;

struct MainState {
    level: LevelDef,
    world: World,
    renderer: Renderer,
}

impl MainState {
    fn new(level: LevelDef) -> Self {
        Self {
            world: World::new(&level),
            level,
            renderer: Renderer::new(),
        }
    }
}

fn map_key(key: KeyCode) -> Option<GameKey> {
    match key {
        KeyCode::ArrowLeft => Some(GameKey::Left),
        KeyCode::ArrowRight => Some(GameKey::Right),
        KeyCode::Space => Some(GameKey::Jump),
        _ => None,
    }
}

impl EventHandler for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        self.world.advance(ctx.time.delta());

        for event in self.world.drain_events() {
            if let FrameEvent::PlayerDied { cause, .. } = event {
                log::debug!("death #{} ({cause:?})", self.world.player.deaths);
            }
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        self.renderer.draw(ctx, &self.world)
    }

    fn key_down_event(
        &mut self,
        ctx: &mut Context,
        input: KeyInput,
        repeat: bool,
    ) -> Result<(), GameError> {
        match keycode_of(&input) {
            Some(KeyCode::Escape) => ctx.request_quit(),
            Some(KeyCode::KeyR) if !repeat => self.world.rebuild_scene(&self.level),
            Some(keycode) => {
                if let Some(key) = map_key(keycode) {
                    self.world.key_down(key, repeat);
                }
            }
            None => {}
        }
        Ok(())
    }

    fn key_up_event(&mut self, _ctx: &mut Context, input: KeyInput) -> Result<(), GameError> {
        if let Some(key) = keycode_of(&input).and_then(map_key) {
            self.world.key_up(key, false);
        }
        Ok(())
    }
}

fn keycode_of(input: &KeyInput) -> Option<KeyCode> {
    match input.event.physical_key {
        PhysicalKey::Code(keycode) => Some(keycode),
        PhysicalKey::Unidentified(_) => None,
    }
}

pub fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let level = match env::args().nth(1) {
        Some(path) => LevelDef::load(&path),
        None => LevelDef::builtin(),
    }
    .map_err(|e| GameError::CustomError(format!("{e:#}")))?;

    let (ctx, event_loop) = ContextBuilder::new("skyhop", "skyhop")
        .window_setup(ggez::conf::WindowSetup::default().title("Skyhop"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(level.width, level.height))
        .build()?;

    let state = MainState::new(level);
    event::run(ctx, event_loop, state)
}
