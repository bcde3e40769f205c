//! Outline reduction: Douglas–Peucker on closed rings.
//!
//! Per ring:
//! 1. Drop the explicit closing vertex
//! 2. RDP-simplify the open polyline between first and last vertex
//! 3. Fall back to the input if fewer than 3 vertices (or zero area) remain
//! 4. Restore the input's orientation, then re-close

use geo::{LineString, Simplify};
use kurbo::Point;
use tracing::trace;

use super::OutlineRing;
use crate::config::SimplificationLevel;
use crate::geom::{bounding_box, signed_area};

/// Simplify one ring with a tolerance derived from its own extent.
pub fn simplify_outline(ring: &OutlineRing, level: SimplificationLevel) -> OutlineRing {
    let bbox = ring.bounding_box();
    let tolerance = level.tolerance(bbox.width().max(bbox.height()));
    simplify_with_tolerance(ring, tolerance)
}

/// Simplify every ring of a multi-contour outline with one shared tolerance,
/// derived from the extent of the whole outline.
pub fn simplify_outline_set(rings: &[OutlineRing], level: SimplificationLevel) -> Vec<OutlineRing> {
    let bbox = bounding_box(rings.iter().flat_map(|r| r.points().iter().copied()));
    let Some(bbox) = bbox else {
        return Vec::new();
    };
    let tolerance = level.tolerance(bbox.width().max(bbox.height()));
    rings
        .iter()
        .map(|ring| simplify_with_tolerance(ring, tolerance))
        .collect()
}

/// Simplify one ring with an explicit world-space tolerance.
///
/// Never returns a ring with fewer than 3 vertices; orientation is kept.
pub fn simplify_with_tolerance(ring: &OutlineRing, tolerance: f64) -> OutlineRing {
    if tolerance <= 0.0 {
        return ring.clone();
    }

    let open = ring.open();
    let mut simplified = rdp_simplify(open, tolerance);
    let input_area = signed_area(open);
    let output_area = signed_area(&simplified);

    if simplified.len() < 3 || (output_area == 0.0 && input_area != 0.0) {
        trace!(
            vertices = open.len(),
            kept = simplified.len(),
            tolerance,
            "degenerate simplification, keeping original ring"
        );
        return ring.clone();
    }

    if input_area * output_area < 0.0 {
        simplified.reverse();
    }

    if ring.is_explicitly_closed() {
        simplified.push(simplified[0]);
    }

    trace!(from = ring.len(), to = simplified.len(), tolerance, "ring simplified");
    OutlineRing::new(simplified).unwrap_or_else(|_| ring.clone())
}

/// RDP polyline simplification (distance to the chord segment, strict `>`).
fn rdp_simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 || epsilon <= 0.0 {
        return points.to_vec();
    }
    LineString::from(points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>())
        .simplify(&epsilon)
        .into_inner()
        .into_iter()
        .map(|c| Point::new(c.x, c.y))
        .collect()
}
