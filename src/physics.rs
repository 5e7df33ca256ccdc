use glam::Vec2;

use crate::geometry::Aabb;
use crate::map::PhysicsSettings;
use crate::world::{
    DeathCause, Direction, FrameEvent, MotionState, MovingPlatform, Player, Scene, SceneItem,
};

/// Outcome of one player step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerStep {
    Moved,
    Landed { y: f32 },
    Respawned(DeathCause),
}

pub fn simulate_platforms(scene: &mut Scene) {
    for platform in scene.moving_platforms_mut() {
        advance_platform(platform);
    }
}

/// Bounces the platform between its bounds. The offset is pinned to the bound
/// it crossed so it never leaves `[min, max]`.
pub fn advance_platform(platform: &mut MovingPlatform) {
    let before = platform.offset;
    let next = platform.offset + platform.direction.sign() * platform.speed;
    if next >= platform.max {
        platform.offset = platform.max;
        platform.direction = Direction::Backward;
    } else if next <= platform.min {
        platform.offset = platform.min;
        platform.direction = Direction::Forward;
    } else {
        platform.offset = next;
    }
    platform.last_delta = platform.axis.unit() * (platform.offset - before);
}

/// Starts a jump when grounded. Returns whether the jump happened.
pub fn try_jump(
    player: &mut Player,
    physics: &PhysicsSettings,
    events: &mut Vec<FrameEvent>,
) -> bool {
    if player.is_airborne() {
        return false;
    }
    player.vertical_velocity = -physics.jump_force;
    player.motion = MotionState::Airborne;
    log::debug!("jump from ({:.1}, {:.1})", player.pos.x, player.pos.y);
    events.push(FrameEvent::Jumped);
    true
}

pub fn simulate_player(
    player: &mut Player,
    scene: &Scene,
    physics: &PhysicsSettings,
    events: &mut Vec<FrameEvent>,
) -> PlayerStep {
    // horizontal input, each direction clamped on its own
    if player.move_left {
        player.pos.x = (player.pos.x - physics.player_speed).max(0.0);
    }
    if player.move_right {
        let max_x = (scene.width() - player.size.x).max(0.0);
        player.pos.x = (player.pos.x + physics.player_speed).min(max_x);
    }

    // gravity
    player.vertical_velocity += physics.gravity;
    if let Some(cap) = physics.max_fall_speed {
        player.vertical_velocity = player.vertical_velocity.min(cap);
    }

    let mut new_y = player.pos.y + player.vertical_velocity;
    if new_y < 0.0 {
        new_y = 0.0;
        player.vertical_velocity = 0.0;
    }

    let was_airborne = player.is_airborne();
    let mut final_y = new_y;
    let mut landed = false;

    // Rising players skip the whole scan, spikes included.
    if player.vertical_velocity >= 0.0 {
        let bottom = player.pos.y + player.size.y;
        let proposed = Aabb::from_pos_size(Vec2::new(player.pos.x, new_y), player.size);

        for item in scene.items() {
            // A platform that moved up this tick is measured from where its top was,
            // so a player resting on it gets lifted instead of sinking in.
            let (platform, support_top) = match item {
                SceneItem::Platform(p) => (p.rect, p.rect.top()),
                SceneItem::MovingPlatform(p) => (p.rect(), p.previous_top()),
                SceneItem::Hazard(h) => {
                    if proposed.intersects(&h.rect) {
                        respawn(player, scene.spawn, DeathCause::Hazard, events);
                        return PlayerStep::Respawned(DeathCause::Hazard);
                    }
                    continue;
                }
                SceneItem::Decoration(_) => continue,
            };

            // first platform wins
            if landed {
                continue;
            }
            if lands_on(&proposed, bottom, player.vertical_velocity, &platform, support_top) {
                final_y = platform.top() - player.size.y;
                player.vertical_velocity = 0.0;
                player.motion = MotionState::Grounded;
                landed = true;
            }
        }
    }

    // Measured on the unresolved position, so a landing does not save a player
    // whose fall already carried them past the floor.
    if new_y > scene.height() {
        respawn(player, scene.spawn, DeathCause::FellOut, events);
        return PlayerStep::Respawned(DeathCause::FellOut);
    }

    player.pos.y = final_y;
    log::trace!(
        "player at ({:.1}, {:.1}) vy={:.2}",
        player.pos.x,
        player.pos.y,
        player.vertical_velocity
    );

    if landed {
        if was_airborne {
            log::debug!("landed at y={final_y:.1}");
            events.push(FrameEvent::Landed { y: final_y });
        }
        PlayerStep::Landed { y: final_y }
    } else {
        PlayerStep::Moved
    }
}

/// One-tick look-ahead: the bottom edge was at or above `support_top` and reaches
/// the platform's current top this tick.
fn lands_on(
    player: &Aabb,
    bottom: f32,
    vertical_velocity: f32,
    platform: &Aabb,
    support_top: f32,
) -> bool {
    player.overlaps_x(platform)
        && bottom <= support_top
        && bottom + vertical_velocity >= platform.top()
}

/// Sends the player back to `spawn`. Score, coins and items are kept.
pub fn respawn(player: &mut Player, spawn: Vec2, cause: DeathCause, events: &mut Vec<FrameEvent>) {
    let at = player.pos;
    player.pos = spawn;
    player.vertical_velocity = 0.0;
    player.motion = MotionState::Grounded;
    player.move_left = false;
    player.move_right = false;
    player.deaths = player.deaths.saturating_add(1);

    log::info!(
        "player died ({cause:?}) at ({:.1}, {:.1}), respawning at ({:.1}, {:.1})",
        at.x,
        at.y,
        spawn.x,
        spawn.y
    );
    events.push(FrameEvent::PlayerDied {
        cause,
        x: at.x,
        y: at.y,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;
    use crate::map::{ColorDef, LevelDef, MovingPlatformDef, PlatformDef, SpikeRowDef};

    fn level() -> LevelDef {
        LevelDef::from_json(r#"{"name":"test","width":800,"height":600,"backdrop":{"stars":0}}"#)
            .unwrap()
    }

    fn platform(x: f32, y: f32, w: f32, h: f32) -> PlatformDef {
        PlatformDef {
            x,
            y,
            w,
            h,
            color: ColorDef::rgb(0, 0, 0),
            outline: ColorDef::rgb(0, 0, 0),
        }
    }

    fn spike(x: f32, y: f32) -> SpikeRowDef {
        SpikeRowDef {
            x,
            y,
            count: 1,
            w: 20.0,
            h: 20.0,
            spacing: None,
            color: ColorDef::rgb(200, 0, 0),
        }
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), Vec2::splat(30.0))
    }

    fn moving(max: f32, speed: f32) -> MovingPlatform {
        let def = MovingPlatformDef {
            x: 0.0,
            y: 0.0,
            w: 80.0,
            h: 20.0,
            axis: Axis::X,
            min: 0.0,
            max,
            speed,
            color: ColorDef::rgb(0, 0, 0),
        };
        let mut lvl = level();
        lvl.moving_platforms.push(def);
        let mut scene = Scene::build(&lvl, 1);
        scene.moving_platforms_mut().next().unwrap().clone()
    }

    #[test]
    fn platform_bounces_at_upper_bound() {
        let mut p = moving(5.0, 2.0);
        let offsets: Vec<f32> = (0..6)
            .map(|_| {
                advance_platform(&mut p);
                p.offset
            })
            .collect();
        assert_eq!(offsets, vec![2.0, 4.0, 5.0, 3.0, 1.0, 0.0]);
        assert_eq!(p.direction, Direction::Forward);
    }

    #[test]
    fn platform_oscillates_within_bounds() {
        let mut p = moving(350.0, 1.5);
        let mut hit_max = false;
        let mut hit_min_again = false;
        for _ in 0..2000 {
            advance_platform(&mut p);
            assert!(p.offset >= 0.0 && p.offset <= 350.0, "offset {}", p.offset);
            hit_max |= p.offset == 350.0;
            hit_min_again |= hit_max && p.offset == 0.0;
        }
        assert!(hit_max && hit_min_again);
    }

    #[test]
    fn landing_snaps_to_platform_top() {
        let mut lvl = level();
        lvl.platforms.push(platform(0.0, 100.0, 200.0, 20.0));
        let scene = Scene::build(&lvl, 1);
        let physics = PhysicsSettings::default();
        let mut events = Vec::new();

        let mut p = player_at(10.0, 66.0);
        p.motion = MotionState::Airborne;
        p.vertical_velocity = 4.0;

        let step = simulate_player(&mut p, &scene, &physics, &mut events);
        assert_eq!(step, PlayerStep::Landed { y: 70.0 });
        assert_eq!(p.pos.y, 70.0);
        assert_eq!(p.vertical_velocity, 0.0);
        assert_eq!(p.motion, MotionState::Grounded);
        assert_eq!(events, vec![FrameEvent::Landed { y: 70.0 }]);
    }

    #[test]
    fn first_platform_in_scene_order_wins() {
        let mut lvl = level();
        lvl.platforms.push(platform(0.0, 110.0, 200.0, 20.0));
        lvl.platforms.push(platform(0.0, 105.0, 200.0, 20.0));
        let scene = Scene::build(&lvl, 1);
        let mut events = Vec::new();

        let mut p = player_at(0.0, 70.0);
        p.vertical_velocity = 10.0;
        simulate_player(&mut p, &scene, &PhysicsSettings::default(), &mut events);
        assert_eq!(p.pos.y, 80.0);
    }

    #[test]
    fn no_landing_without_horizontal_overlap() {
        let mut lvl = level();
        lvl.platforms.push(platform(100.0, 100.0, 100.0, 20.0));
        let scene = Scene::build(&lvl, 1);
        let mut events = Vec::new();

        // right edge exactly touches the platform's left edge
        let mut p = player_at(70.0, 69.5);
        simulate_player(&mut p, &scene, &PhysicsSettings::default(), &mut events);
        assert!((p.pos.y - 70.3).abs() < 1e-4);
        assert!(p.vertical_velocity > 0.0);
    }

    #[test]
    fn ceiling_clamps_and_zeroes_velocity() {
        let scene = Scene::build(&level(), 1);
        let physics = PhysicsSettings::default();
        let mut events = Vec::new();

        let mut p = player_at(0.0, 5.0);
        assert!(try_jump(&mut p, &physics, &mut events));
        simulate_player(&mut p, &scene, &physics, &mut events);
        assert_eq!(p.pos.y, 0.0);
        assert_eq!(p.vertical_velocity, 0.0);
        assert!(p.is_airborne());
    }

    #[test]
    fn jump_is_ignored_in_the_air() {
        let physics = PhysicsSettings::default();
        let mut events = Vec::new();
        let mut p = player_at(0.0, 300.0);
        assert!(try_jump(&mut p, &physics, &mut events));
        p.vertical_velocity = -3.0;
        assert!(!try_jump(&mut p, &physics, &mut events));
        assert_eq!(p.vertical_velocity, -3.0);
        assert_eq!(events, vec![FrameEvent::Jumped]);
    }

    #[test]
    fn falling_into_spike_respawns() {
        let mut lvl = level();
        lvl.spikes.push(spike(100.0, 200.0));
        let scene = Scene::build(&lvl, 1);
        let mut events = Vec::new();

        let mut p = player_at(90.0, 170.0);
        p.score = 7;
        p.move_right = true;
        // after moving right x = 95, proposed y = 170.8 -> overlaps the spike by 0.8
        let step = simulate_player(&mut p, &scene, &PhysicsSettings::default(), &mut events);
        assert_eq!(step, PlayerStep::Respawned(DeathCause::Hazard));
        assert_eq!(p.pos, Vec2::ZERO);
        assert!(!p.move_right);
        assert_eq!(p.score, 7);
        assert_eq!(p.deaths, 1);
        assert!(matches!(
            events.as_slice(),
            [FrameEvent::PlayerDied { cause: DeathCause::Hazard, .. }]
        ));
    }

    #[test]
    fn max_fall_speed_caps_velocity() {
        let scene = Scene::build(&level(), 1);
        let physics = PhysicsSettings {
            max_fall_speed: Some(3.0),
            ..Default::default()
        };
        let mut events = Vec::new();
        let mut p = player_at(0.0, 0.0);
        for _ in 0..20 {
            simulate_player(&mut p, &scene, &physics, &mut events);
        }
        assert_eq!(p.vertical_velocity, 3.0);
    }

    #[test]
    fn landing_below_the_floor_still_falls_out() {
        let mut lvl = level();
        lvl.platforms.push(platform(0.0, 610.0, 200.0, 20.0));
        let scene = Scene::build(&lvl, 1);
        let mut events = Vec::new();

        // would land at y=580, but the unresolved y of 605.8 is already past the floor
        let mut p = player_at(0.0, 575.0);
        p.vertical_velocity = 30.0;
        let step = simulate_player(&mut p, &scene, &PhysicsSettings::default(), &mut events);
        assert_eq!(step, PlayerStep::Respawned(DeathCause::FellOut));
        assert_eq!(p.pos, Vec2::ZERO);
    }

    #[test]
    fn platform_records_its_last_move() {
        let mut p = moving(5.0, 2.0);
        p.axis = Axis::Y;
        advance_platform(&mut p);
        assert_eq!(p.last_delta, Vec2::new(0.0, 2.0));
        advance_platform(&mut p);
        advance_platform(&mut p);
        // pinned at the bound, so only one unit of travel
        assert_eq!(p.last_delta, Vec2::new(0.0, 1.0));
        advance_platform(&mut p);
        assert_eq!(p.last_delta, Vec2::new(0.0, -2.0));
        assert_eq!(p.previous_top(), p.rect().top() + 2.0);
    }

    #[test]
    fn respawn_uses_scene_spawn_point() {
        let mut lvl = level();
        lvl.spawn.x = 40.0;
        lvl.spawn.y = 12.0;
        let scene = Scene::build(&lvl, 1);
        let mut events = Vec::new();

        let mut p = player_at(100.0, 590.0);
        p.vertical_velocity = 20.0;
        let step = simulate_player(&mut p, &scene, &PhysicsSettings::default(), &mut events);
        assert_eq!(step, PlayerStep::Respawned(DeathCause::FellOut));
        assert_eq!(p.pos, Vec2::new(40.0, 12.0));
    }
}
