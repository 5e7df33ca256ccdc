use glam::Vec2;
use serde::Deserialize;

/// Axis-aligned box anchored at its top-left corner. y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap on the x axis; touching edges do not count.
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Strict overlap on both axes.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.bottom() > other.top() && self.top() < other.bottom()
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let c = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn one_unit_overlap_intersects() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn overlaps_x_ignores_vertical_distance() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 500.0, 10.0, 10.0);
        assert!(a.overlaps_x(&b));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn translated_keeps_size() {
        let a = Aabb::new(1.0, 2.0, 3.0, 4.0).translated(Axis::Y.unit() * 5.0);
        assert_eq!(a, Aabb::new(1.0, 7.0, 3.0, 4.0));
    }
}
