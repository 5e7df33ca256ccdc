use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::geometry::{Aabb, Axis};
use crate::map::{ColorDef, LevelDef};

#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Aabb,
    pub color: ColorDef,
    pub outline: ColorDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// A platform sliding back and forth along one axis. `offset` is the leading
/// coordinate and stays within `[min, max]`. `last_delta` is how far it moved
/// on the most recent tick.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    pub base: Aabb,
    pub axis: Axis,
    pub offset: f32,
    pub last_delta: Vec2,
    pub min: f32,
    pub max: f32,
    pub speed: f32,
    pub direction: Direction,
    pub color: ColorDef,
}

impl MovingPlatform {
    pub fn rect(&self) -> Aabb {
        self.base.translated(self.axis.unit() * self.offset)
    }

    /// Top edge before the most recent move.
    pub fn previous_top(&self) -> f32 {
        self.rect().top() - self.last_delta.y
    }
}

#[derive(Debug, Clone)]
pub struct Hazard {
    pub rect: Aabb,
    pub color: ColorDef,
}

#[derive(Debug, Clone)]
pub enum Decoration {
    Backdrop {
        rect: Aabb,
        top: ColorDef,
        bottom: ColorDef,
    },
    Star {
        pos: Vec2,
        size: f32,
        color: ColorDef,
    },
}

#[derive(Debug, Clone)]
pub enum SceneItem {
    Platform(Platform),
    MovingPlatform(MovingPlatform),
    Hazard(Hazard),
    Decoration(Decoration),
}

/// Static content of one level. Rebuilt wholesale, never edited item by item.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    pub generation: u64,
    pub bounds: Vec2,
    pub spawn: Vec2,
    items: Vec<SceneItem>,
}

impl Scene {
    pub fn build(level: &LevelDef, generation: u64) -> Self {
        let mut items = Vec::new();
        let bounds = level.bounds();

        let backdrop = &level.backdrop;
        items.push(SceneItem::Decoration(Decoration::Backdrop {
            rect: Aabb::from_pos_size(Vec2::ZERO, bounds),
            top: backdrop.top,
            bottom: backdrop.bottom,
        }));

        let band = backdrop.star_band.min(bounds.y);
        if band > 0.0 {
            let mut rng = StdRng::seed_from_u64(backdrop.seed);
            for _ in 0..backdrop.stars {
                let size = f32::from(rng.random_range(1..=3u8));
                let pos = Vec2::new(rng.random_range(0.0..bounds.x), rng.random_range(0.0..band));
                let alpha: u8 = rng.random_range(150..255);
                items.push(SceneItem::Decoration(Decoration::Star {
                    pos,
                    size,
                    color: ColorDef::rgba(255, 255, 255, alpha),
                }));
            }
        }

        for p in &level.platforms {
            items.push(SceneItem::Platform(Platform {
                rect: p.rect(),
                color: p.color,
                outline: p.outline,
            }));
        }

        for p in &level.moving_platforms {
            items.push(SceneItem::MovingPlatform(MovingPlatform {
                base: p.rect(),
                axis: p.axis,
                offset: p.min,
                last_delta: Vec2::ZERO,
                min: p.min,
                max: p.max,
                speed: p.speed,
                direction: Direction::Forward,
                color: p.color,
            }));
        }

        for row in &level.spikes {
            for rect in row.boxes() {
                items.push(SceneItem::Hazard(Hazard {
                    rect,
                    color: row.color,
                }));
            }
        }

        Self {
            name: level.name.clone(),
            generation,
            bounds,
            spawn: level.spawn.into(),
            items,
        }
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn moving_platforms_mut(&mut self) -> impl Iterator<Item = &mut MovingPlatform> {
        self.items.iter_mut().filter_map(|item| match item {
            SceneItem::MovingPlatform(p) => Some(p),
            _ => None,
        })
    }

    pub fn width(&self) -> f32 {
        self.bounds.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.y
    }
}
