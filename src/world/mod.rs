mod frame_event;
mod game_world;
mod player;
mod scene;

pub use frame_event::{DeathCause, FrameEvent};
pub use game_world::World;
pub use player::{KNIFE_PRICE, MotionState, Player, SWORD_PRICE};
pub use scene::{Decoration, Direction, Hazard, MovingPlatform, Platform, Scene, SceneItem};
