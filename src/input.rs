use crate::map::PhysicsSettings;
use crate::physics::try_jump;
use crate::world::{FrameEvent, Player};

/// Logical keys the simulation understands. Physical key mapping lives in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Left,
    Right,
    Jump,
}

/// Latches movement flags and fires jumps. Auto-repeat events are ignored.
pub fn process_key_down(
    player: &mut Player,
    key: GameKey,
    repeat: bool,
    physics: &PhysicsSettings,
    events: &mut Vec<FrameEvent>,
) {
    if repeat {
        return;
    }
    match key {
        GameKey::Left => player.move_left = true,
        GameKey::Right => player.move_right = true,
        GameKey::Jump => {
            try_jump(player, physics, events);
        }
    }
}

pub fn process_key_up(player: &mut Player, key: GameKey, repeat: bool) {
    if repeat {
        return;
    }
    match key {
        GameKey::Left => player.move_left = false,
        GameKey::Right => player.move_right = false,
        GameKey::Jump => {}
    }
}
