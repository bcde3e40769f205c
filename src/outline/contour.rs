use image::RgbaImage;
use imageproc::contours::{find_contours, BorderType};
use kurbo::Point;

use super::{OutlineGenerator, OutlineRing};
use crate::config::ShatterConfig;
use crate::mask::Mask;
use crate::placement::pixel_to_local;

/// Default collision-outline generator: outer borders of the alpha mask.
///
/// Borders run through the centres of the edge pixels. Holes are ignored.
/// A border that encloses no area (single pixels, 1-px lines) is replaced
/// by the pixel-edge rectangle around it, so every visible island gets a
/// ring with positive area. Rings are counter-clockwise in local space.
///
/// Use the same `alpha_threshold` as the fracture config, or outlines and
/// mass describe a different solid set than the fragments; see
/// [`ContourOutliner::from_config`].
#[derive(Debug, Clone, Copy)]
pub struct ContourOutliner {
    pub alpha_threshold: f32,
}

impl Default for ContourOutliner {
    fn default() -> Self {
        ContourOutliner {
            alpha_threshold: 0.1,
        }
    }
}

impl ContourOutliner {
    /// Outliner that thresholds alpha exactly like `config`.
    pub fn from_config(config: &ShatterConfig) -> Self {
        ContourOutliner {
            alpha_threshold: config.alpha_threshold,
        }
    }
}

impl OutlineGenerator for ContourOutliner {
    fn generate(&self, buffer: &RgbaImage, pixels_per_unit: f64) -> Vec<OutlineRing> {
        let (w, h) = buffer.dimensions();
        if w == 0 || h == 0 {
            return Vec::new();
        }
        // imageproc only starts an outer border after a background pixel on
        // the left, so fragments touching x = 0 need a one-pixel frame.
        let gray = Mask::from_alpha(buffer, self.alpha_threshold).to_gray(1);

        find_contours::<i32>(&gray)
            .iter()
            .filter(|contour| contour.border_type == BorderType::Outer)
            .filter_map(|contour| {
                let border: Vec<(i32, i32)> =
                    contour.points.iter().map(|p| (p.x - 1, p.y - 1)).collect();
                border_ring(&border, w, h, pixels_per_unit)
            })
            .collect()
    }
}

/// Ring through pixel centres, or the pixel-edge box when that has no area.
fn border_ring(border: &[(i32, i32)], w: u32, h: u32, ppu: f64) -> Option<OutlineRing> {
    if border.is_empty() {
        return None;
    }
    let to_local = |x: f64, y: f64| pixel_to_local(x, y, w, h, ppu);

    let twice_area = twice_area(border);
    if border.len() >= 3 && twice_area != 0 {
        let mut points: Vec<Point> = border
            .iter()
            .map(|&(x, y)| to_local(x as f64 + 0.5, y as f64 + 0.5))
            .collect();
        // Pixel rows grow downward, so positive pixel-space area is clockwise in local space.
        if twice_area > 0 {
            points.reverse();
        }
        return OutlineRing::new(points).ok();
    }

    let x0 = border.iter().map(|p| p.0).min()? as f64;
    let x1 = border.iter().map(|p| p.0).max()? as f64 + 1.0;
    let y0 = border.iter().map(|p| p.1).min()? as f64;
    let y1 = border.iter().map(|p| p.1).max()? as f64 + 1.0;
    OutlineRing::new(vec![
        to_local(x0, y1),
        to_local(x1, y1),
        to_local(x1, y0),
        to_local(x0, y0),
    ])
    .ok()
}

/// Shoelace sum in integer pixel space (y down), exact.
fn twice_area(border: &[(i32, i32)]) -> i64 {
    let n = border.len();
    (0..n)
        .map(|i| {
            let (ax, ay) = border[i];
            let (bx, by) = border[(i + 1) % n];
            ax as i64 * by as i64 - bx as i64 * ay as i64
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if x >= x0 && x < x1 && y >= y0 && y < y1 {
                Rgba([200, 50, 50, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn square_outline_is_ccw_and_centered() {
        let buffer = solid_rect(10, 10, 0, 0, 10, 10);
        let rings = ContourOutliner::default().generate(&buffer, 10.0);
        assert_eq!(rings.len(), 1);

        let ring = &rings[0];
        assert!(ring.signed_area() > 0.0);
        // Pixel centres of a 10 px square span 9 px → 0.9 units.
        let bbox = ring.bounding_box();
        assert!((bbox.width() - 0.9).abs() < 1e-9);
        assert!((bbox.center().x).abs() < 1e-9 && (bbox.center().y).abs() < 1e-9);
        assert!((ring.signed_area() - 0.81).abs() < 1e-9);
    }

    #[test]
    fn separate_islands_give_separate_rings() {
        let mut buffer = solid_rect(20, 8, 1, 1, 7, 7);
        for y in 2..6 {
            for x in 12..18 {
                buffer.put_pixel(x, y, Rgba([0, 0, 255, 255]));
            }
        }
        let rings = ContourOutliner::default().generate(&buffer, 1.0);
        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn holes_are_ignored() {
        let mut buffer = solid_rect(12, 12, 1, 1, 11, 11);
        for y in 4..8 {
            for x in 4..8 {
                buffer.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        let rings = ContourOutliner::default().generate(&buffer, 1.0);
        assert_eq!(rings.len(), 1);
        // Outer border only: 9 × 9 between edge-pixel centres.
        assert!((rings[0].signed_area() - 81.0).abs() < 1e-9);
    }

    #[test]
    fn fully_opaque_buffers_are_traced() {
        for n in [16u32, 17, 20, 64] {
            let buffer = RgbaImage::from_pixel(n, n, Rgba([9, 9, 9, 255]));
            let rings = ContourOutliner::default().generate(&buffer, 1.0);
            assert_eq!(rings.len(), 1, "{n}x{n}");
            let side = (n - 1) as f64;
            assert!((rings[0].signed_area() - side * side).abs() < 1e-9, "{n}x{n}");
        }
    }

    #[test]
    fn thin_strip_gets_pixel_edge_box() {
        let buffer = solid_rect(30, 1, 0, 0, 30, 1);
        let rings = ContourOutliner::default().generate(&buffer, 10.0);
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(ring.len(), 4);
        assert!((ring.signed_area() - 0.3).abs() < 1e-9);
        let bbox = ring.bounding_box();
        assert!((bbox.width() - 3.0).abs() < 1e-9);
        assert!((bbox.height() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn lone_pixel_gets_unit_box() {
        let mut buffer = RgbaImage::new(9, 9);
        buffer.put_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let rings = ContourOutliner::default().generate(&buffer, 1.0);
        assert_eq!(rings.len(), 1);
        assert!((rings[0].signed_area() - 1.0).abs() < 1e-9);
        assert!(rings[0].bounding_box().contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn threshold_follows_config() {
        let config = ShatterConfig {
            alpha_threshold: 0.6,
            ..ShatterConfig::default()
        };
        assert_eq!(ContourOutliner::from_config(&config).alpha_threshold, 0.6);

        // Left half at ~0.39 alpha is below the 0.6 cutoff.
        let buffer = RgbaImage::from_fn(8, 4, |x, _| {
            Rgba([0, 0, 0, if x < 4 { 100 } else { 255 }])
        });
        let rings = ContourOutliner::from_config(&config).generate(&buffer, 1.0);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].bounding_box().min_x() > 0.0);
    }

    #[test]
    fn transparent_buffer_has_no_outline() {
        let buffer = RgbaImage::new(5, 5);
        assert!(ContourOutliner::default().generate(&buffer, 1.0).is_empty());
    }
}
