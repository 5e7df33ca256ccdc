//! Fixed-tick platformer simulation: gravity, platform landing, spikes and respawn.
//!
//! The crate has no window or timer of its own. A driver feeds logical key
//! events into a [`World`] and calls [`World::tick`] (or [`World::advance`]
//! with wall-clock time), then drains [`FrameEvent`]s and draws the scene.

pub mod clock;
pub mod geometry;
pub mod input;
pub mod map;
pub mod physics;
pub mod world;

pub use input::GameKey;
pub use map::{LevelDef, PhysicsSettings};
pub use world::{DeathCause, FrameEvent, World};
