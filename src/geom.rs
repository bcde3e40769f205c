//! Shared geometry utilities.

use kurbo::{Point, Rect};

/// Signed area of a closed polygon via the shoelace formula.
///
/// Positive = counter-clockwise, negative = clockwise (y-up).
/// A repeated closing vertex contributes nothing.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            points[i].x * points[j].y - points[j].x * points[i].y
        })
        .sum::<f64>()
        / 2.0
}

/// Tight bounding box of a point set, `None` when empty.
pub fn bounding_box(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Rect::from_points(first, first), |rect, p| {
        rect.union_pt(p)
    }))
}

/// Axis-aligned pixel rectangle, min inclusive, max exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        PixelRect { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Centre in continuous pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x0 as f64 + self.x1 as f64) / 2.0,
            (self.y0 as f64 + self.y1 as f64) / 2.0,
        )
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

/// Running min/max accumulator, O(1) per included pixel.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    empty: bool,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: 0,
            max_y: 0,
            empty: true,
        }
    }
}

impl Bounds {
    #[inline]
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.empty = false;
    }

    /// Exclusive-max rectangle; the default (empty) rect if nothing was included.
    pub fn to_rect(&self) -> PixelRect {
        if self.empty {
            return PixelRect::default();
        }
        PixelRect::new(self.min_x, self.min_y, self.max_x + 1, self.max_y + 1)
    }
}
