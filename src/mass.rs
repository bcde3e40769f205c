//! Area-based mass for fragment bodies.

use std::f64::consts::PI;

use kurbo::Vec2;

use crate::outline::OutlineRing;

/// Mass per unit of world area.
pub const DENSITY: f64 = 100.0;

/// Collider shape whose area determines the mass.
#[derive(Debug, Clone, Copy)]
pub enum MassShape<'a> {
    /// One or more outline rings in local space.
    Polygon(&'a [OutlineRing]),
    /// Local-space radius.
    Circle { radius: f64 },
}

/// Mass of a shape under the body's scale.
///
/// Polygon: `Σ |area(ring)| · |sx · sy| · DENSITY`.
/// Circle: `π (r · s)² · DENSITY` with `s` the mean of the two axis scales.
pub fn estimate_mass(shape: MassShape<'_>, scale: Vec2) -> f64 {
    let area = match shape {
        MassShape::Polygon(rings) => polygon_area(rings) * (scale.x * scale.y).abs(),
        MassShape::Circle { radius } => {
            let s = ((scale.x + scale.y) * 0.5).abs();
            let world_radius = radius * s;
            PI * world_radius * world_radius
        }
    };
    area * DENSITY
}

/// Unscaled area covered by a set of rings, orientation ignored.
pub fn polygon_area(rings: &[OutlineRing]) -> f64 {
    rings.iter().map(|ring| ring.signed_area().abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn square(side: f64, ccw: bool) -> OutlineRing {
        let mut points = vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ];
        if !ccw {
            points.reverse();
        }
        OutlineRing::new(points).unwrap()
    }

    #[test]
    fn polygon_mass_ignores_orientation() {
        let rings = [square(2.0, true), square(1.0, false)];
        let mass = estimate_mass(MassShape::Polygon(&rings), Vec2::new(1.0, 1.0));
        assert!((mass - 500.0).abs() < 1e-9);
    }

    #[test]
    fn doubling_scale_quadruples_mass() {
        let rings = [square(0.7, true)];
        let base = estimate_mass(MassShape::Polygon(&rings), Vec2::new(1.5, 1.5));
        let doubled = estimate_mass(MassShape::Polygon(&rings), Vec2::new(3.0, 3.0));
        assert!((doubled - 4.0 * base).abs() < 1e-9);

        let circle = MassShape::Circle { radius: 0.4 };
        let base = estimate_mass(circle, Vec2::new(1.0, 1.0));
        let doubled = estimate_mass(circle, Vec2::new(2.0, 2.0));
        assert!((doubled - 4.0 * base).abs() < 1e-9);
    }

    #[test]
    fn negative_scale_still_positive_mass() {
        let rings = [square(1.0, true)];
        let mass = estimate_mass(MassShape::Polygon(&rings), Vec2::new(-2.0, 1.0));
        assert!((mass - 200.0).abs() < 1e-9);
    }

    #[test]
    fn circle_uses_mean_axis_scale() {
        let mass = estimate_mass(MassShape::Circle { radius: 1.0 }, Vec2::new(1.0, 3.0));
        assert!((mass - PI * 4.0 * DENSITY).abs() < 1e-9);
    }

    #[test]
    fn empty_outline_has_no_mass() {
        assert_eq!(estimate_mass(MassShape::Polygon(&[]), Vec2::new(1.0, 1.0)), 0.0);
    }
}
