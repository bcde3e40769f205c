//! Pixel space ↔ local space ↔ world space.
//!
//! Pixel space: origin at the buffer's top-left corner, y down, one unit per
//! pixel. Local space: origin at the buffer centre, y up, one unit per world
//! unit (`pixels_per_unit` pixels). World space: local space mapped through
//! the object's [`Transform2D`].
//!
//! Every fragment placement, on both the crack and the split path, goes
//! through [`local_offset`] and [`Transform2D::place`].

use kurbo::{Affine, Point, Vec2};

use crate::geom::PixelRect;

/// Snapshot of an object's placement in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub translation: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f64,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Transform2D {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::new(1.0, 1.0),
    };

    pub fn new(translation: Vec2, rotation: f64, scale: Vec2) -> Self {
        Transform2D {
            translation,
            rotation,
            scale,
        }
    }

    /// Local → world: translate · rotate · scale.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.translation)
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    pub fn to_world(&self, local: Point) -> Point {
        self.affine() * local
    }

    /// World → local. Degenerate (zero) scale maps everything to the origin.
    pub fn to_local(&self, world: Point) -> Point {
        if self.affine().determinant().abs() < f64::EPSILON {
            return Point::ZERO;
        }
        self.affine().inverse() * world
    }

    /// Same rotation and scale, translated to where `offset` (local) lands in the world.
    pub fn place(&self, offset: Vec2) -> Transform2D {
        Transform2D {
            translation: self.to_world(offset.to_point()).to_vec2(),
            ..*self
        }
    }

    /// Mean absolute axis scale, used to convert world radii into local radii.
    pub fn mean_scale(&self) -> f64 {
        ((self.scale.x.abs() + self.scale.y.abs()) * 0.5).max(f64::EPSILON)
    }
}

/// Continuous pixel coordinate → local point.
pub fn pixel_to_local(px: f64, py: f64, width: u32, height: u32, pixels_per_unit: f64) -> Point {
    Point::new(
        (px - width as f64 / 2.0) / pixels_per_unit,
        (height as f64 / 2.0 - py) / pixels_per_unit,
    )
}

/// Local point → continuous pixel coordinate.
pub fn local_to_pixel(local: Point, width: u32, height: u32, pixels_per_unit: f64) -> (f64, f64) {
    (
        local.x * pixels_per_unit + width as f64 / 2.0,
        height as f64 / 2.0 - local.y * pixels_per_unit,
    )
}

/// Offset of a fragment's centre from its source buffer's centre, in local units.
pub fn local_offset(rect: &PixelRect, width: u32, height: u32, pixels_per_unit: f64) -> Vec2 {
    let (cx, cy) = rect.center();
    pixel_to_local(cx, cy, width, height, pixels_per_unit).to_vec2()
}
