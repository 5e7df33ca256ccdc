use glam::Vec2;

use crate::geometry::Aabb;

pub const SWORD_PRICE: u32 = 10;
pub const KNIFE_PRICE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    #[default]
    Grounded,
    Airborne,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the bounding box.
    pub pos: Vec2,
    pub size: Vec2,
    /// Positive is downward.
    pub vertical_velocity: f32,
    pub motion: MotionState,
    pub move_left: bool,
    pub move_right: bool,

    pub score: u32,
    pub coins: u32,
    pub has_sword: bool,
    pub has_knife: bool,
    pub deaths: u32,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vertical_velocity: 0.0,
            motion: MotionState::Grounded,
            move_left: false,
            move_right: false,
            score: 0,
            coins: 0,
            has_sword: false,
            has_knife: false,
            deaths: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn is_airborne(&self) -> bool {
        self.motion == MotionState::Airborne
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn gain_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Returns false and leaves the balance untouched when the player cannot afford it.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.coins >= amount {
            self.coins -= amount;
            true
        } else {
            false
        }
    }

    pub fn buy_sword(&mut self) -> bool {
        if self.has_sword || !self.spend_coins(SWORD_PRICE) {
            return false;
        }
        self.has_sword = true;
        log::info!("sword picked up, {} coins left", self.coins);
        true
    }

    pub fn buy_knife(&mut self) -> bool {
        if self.has_knife || !self.spend_coins(KNIFE_PRICE) {
            return false;
        }
        self.has_knife = true;
        true
    }
}
