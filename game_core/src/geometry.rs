use glam::Vec2;
use hecs::Entity;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box for a top-left corner and size, the way layout reports rectangles
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Reports the current on-screen box of a live entity.
///
/// Collision math only ever compares boxes from the same provider, so the
/// unit (arena percent, CSS pixels) is the provider's choice. Effects are
/// positioned in the same space.
pub trait Geometry {
    fn rect(&self, entity: Entity) -> Option<Aabb>;
}
