//! Host adapter: how pieces and bodies reach a rendering/physics world.
//!
//! The core never creates sprites, bodies or colliders. A host implements
//! [`SpriteHost`] for whatever object represents a sprite in its world and
//! lets pieces apply themselves to it.

use image::RgbaImage;

use crate::engine::{Body, Piece};
use crate::outline::OutlineRing;
use crate::placement::Transform2D;

/// Capabilities a host object exposes to receive fragment data.
pub trait SpriteHost {
    /// Replace the rendered pixels. Pivot is the buffer centre.
    fn set_pixel_buffer(&mut self, buffer: &RgbaImage, pixels_per_unit: f64);
    /// Replace the collision outline (local space).
    fn set_outline(&mut self, outline: &[OutlineRing]);
    fn set_mass(&mut self, mass: f64);
    fn set_transform(&mut self, transform: Transform2D);
}

impl Piece {
    /// Push everything about this piece into a host object.
    ///
    /// For the primary piece this is the original object; for the others a
    /// freshly spawned copy of it.
    pub fn apply_to<H: SpriteHost + ?Sized>(&self, host: &mut H) {
        host.set_pixel_buffer(&self.fragment.buffer, self.pixels_per_unit);
        host.set_outline(&self.outline);
        host.set_mass(self.mass);
        host.set_transform(self.transform);
    }
}

impl Body {
    /// Outline and mass only; pixels and placement are unchanged.
    pub fn apply_to<H: SpriteHost + ?Sized>(&self, host: &mut H) {
        host.set_outline(&self.outline);
        host.set_mass(self.mass);
    }
}
