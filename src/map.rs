use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, bail, ensure};
use glam::Vec2;
use serde::Deserialize;

use crate::geometry::{Aabb, Axis};

const BUILTIN_LEVEL: &str = include_str!("../levels/scene_one.json");

/// Fallback player box used when the configured size is unusable.
pub const FALLBACK_PLAYER_SIZE: Vec2 = Vec2::new(30.0, 30.0);

/// Tick rates a level may ask for.
pub const TICK_HZ_RANGE: RangeInclusive<f32> = 1.0..=1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ColorDef {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl ColorDef {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

fn platform_color() -> ColorDef {
    ColorDef::rgb(120, 80, 50)
}

fn platform_outline() -> ColorDef {
    ColorDef::rgb(70, 50, 30)
}

fn moving_platform_color() -> ColorDef {
    ColorDef::rgb(150, 100, 60)
}

fn spike_color() -> ColorDef {
    ColorDef::rgb(200, 0, 0)
}

fn spike_extent() -> f32 {
    20.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Downward speed cap. `None` keeps gravity accumulating without bound.
    pub max_fall_speed: Option<f32>,
    pub tick_hz: f32,
    pub max_catch_up_ticks: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            player_width: 30.0,
            player_height: 30.0,
            player_speed: 5.0,
            jump_force: 15.0,
            gravity: 0.8,
            max_fall_speed: None,
            tick_hz: 60.0,
            max_catch_up_ticks: 5,
        }
    }
}

impl PhysicsSettings {
    /// Configured player size, or the fallback box when it is not a positive finite size.
    pub fn player_size(&self) -> Vec2 {
        let size = Vec2::new(self.player_width, self.player_height);
        if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
            size
        } else {
            log::warn!(
                "invalid player size {}x{}, using fallback {}x{}",
                self.player_width,
                self.player_height,
                FALLBACK_PLAYER_SIZE.x,
                FALLBACK_PLAYER_SIZE.y
            );
            FALLBACK_PLAYER_SIZE
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PointDef {
    pub x: f32,
    pub y: f32,
}

impl From<PointDef> for Vec2 {
    fn from(p: PointDef) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackdropDef {
    pub top: ColorDef,
    pub bottom: ColorDef,
    pub stars: u32,
    /// Stars are scattered over `[0, star_band)` vertically.
    pub star_band: f32,
    pub seed: u64,
}

impl Default for BackdropDef {
    fn default() -> Self {
        Self {
            top: ColorDef::rgb(30, 30, 60),
            bottom: ColorDef::rgb(10, 10, 30),
            stars: 100,
            star_band: 300.0,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default = "platform_color")]
    pub color: ColorDef,
    #[serde(default = "platform_outline")]
    pub outline: ColorDef,
}

impl PlatformDef {
    pub fn rect(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingPlatformDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub axis: Axis,
    #[serde(default)]
    pub min: f32,
    pub max: f32,
    pub speed: f32,
    #[serde(default = "moving_platform_color")]
    pub color: ColorDef,
}

impl MovingPlatformDef {
    pub fn rect(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }
}

/// A run of identical spikes laid left to right.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeRowDef {
    pub x: f32,
    pub y: f32,
    pub count: u32,
    #[serde(default = "spike_extent")]
    pub w: f32,
    #[serde(default = "spike_extent")]
    pub h: f32,
    /// Distance between spike origins; defaults to the spike width.
    #[serde(default)]
    pub spacing: Option<f32>,
    #[serde(default = "spike_color")]
    pub color: ColorDef,
}

impl SpikeRowDef {
    pub fn boxes(&self) -> impl Iterator<Item = Aabb> + '_ {
        let step = self.spacing.unwrap_or(self.w);
        (0..self.count).map(move |i| Aabb::new(self.x + i as f32 * step, self.y, self.w, self.h))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDef {
    pub name: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub spawn: PointDef,
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default)]
    pub backdrop: BackdropDef,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformDef>,
    #[serde(default)]
    pub spikes: Vec<SpikeRowDef>,
}

impl LevelDef {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("loading level {}", path.display()))
    }

    /// The scene-one layout bundled with the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_LEVEL).context("loading built-in level")
    }

    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        let level: LevelDef = serde_json::from_str(data).context("malformed level json")?;
        level.validate()?;
        Ok(level)
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0,
            "level '{}' has invalid size {}x{}",
            self.name,
            self.width,
            self.height
        );
        let spawn_max_x = self.width - self.physics.player_size().x;
        ensure!(
            (0.0..=spawn_max_x).contains(&self.spawn.x)
                && (0.0..=self.height).contains(&self.spawn.y),
            "level '{}' spawns the player outside the scene at ({}, {})",
            self.name,
            self.spawn.x,
            self.spawn.y
        );

        for (i, p) in self.platforms.iter().enumerate() {
            if !finite_rect(&p.rect()) {
                bail!("platform {i} of level '{}' has non-finite geometry", self.name);
            }
        }
        for (i, p) in self.moving_platforms.iter().enumerate() {
            if !finite_rect(&p.rect()) || !p.min.is_finite() || !p.max.is_finite() {
                bail!("moving platform {i} of level '{}' has non-finite geometry", self.name);
            }
            ensure!(
                p.max > p.min,
                "moving platform {i} of level '{}' has empty range [{}, {}]",
                self.name,
                p.min,
                p.max
            );
            ensure!(
                p.speed.is_finite() && p.speed > 0.0,
                "moving platform {i} of level '{}' has invalid speed {}",
                self.name,
                p.speed
            );
        }
        for (i, row) in self.spikes.iter().enumerate() {
            if row.boxes().any(|b| !finite_rect(&b)) {
                bail!("spike row {i} of level '{}' has non-finite geometry", self.name);
            }
        }

        let physics = &self.physics;
        ensure!(
            TICK_HZ_RANGE.contains(&physics.tick_hz),
            "level '{}' has invalid tick rate {}",
            self.name,
            physics.tick_hz
        );
        ensure!(
            [physics.player_speed, physics.jump_force, physics.gravity]
                .iter()
                .all(|v| v.is_finite()),
            "level '{}' has non-finite physics constants",
            self.name
        );
        if let Some(cap) = physics.max_fall_speed {
            ensure!(
                cap.is_finite() && cap > 0.0,
                "level '{}' has invalid max fall speed {cap}",
                self.name
            );
        }
        Ok(())
    }
}

fn finite_rect(r: &Aabb) -> bool {
    r.pos.is_finite() && r.size.is_finite()
}
