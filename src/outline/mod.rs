//! Fragment outlines: closed rings, their generation and simplification.

pub mod contour;
pub mod simplify;

use image::RgbaImage;
use kurbo::{Point, Rect};

use crate::error::ShatterError;
use crate::geom::{bounding_box, signed_area};

/// Closed polygon boundary in local space.
///
/// The point order encodes orientation. An explicit closing vertex (last ==
/// first) is allowed and preserved by simplification.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRing {
    points: Vec<Point>,
}

impl OutlineRing {
    /// Fails with `MalformedRing` unless the ring has at least 3 vertices
    /// besides an explicit closing vertex.
    pub fn new(points: Vec<Point>) -> Result<Self, ShatterError> {
        let ring = OutlineRing { points };
        let vertices = ring.open().len();
        if vertices < 3 {
            return Err(ShatterError::MalformedRing { vertices });
        }
        Ok(ring)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of stored points, including an explicit closing vertex.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_explicitly_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Points without the explicit closing vertex.
    pub fn open(&self) -> &[Point] {
        if self.is_explicitly_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Shoelace area. Positive = counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        signed_area(self.open())
    }

    pub fn bounding_box(&self) -> Rect {
        bounding_box(self.points.iter().copied()).unwrap_or(Rect::ZERO)
    }
}

/// Derives raw collision rings from a fragment's pixels.
///
/// Rings are in local space: centred on the buffer, y up, world units.
pub trait OutlineGenerator {
    fn generate(&self, buffer: &RgbaImage, pixels_per_unit: f64) -> Vec<OutlineRing>;
}
