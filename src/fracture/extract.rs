//! Sub-buffer extraction: crop one region into its own pixel buffer.

use image::{Rgba, RgbaImage};

use super::Region;

/// New buffer sized to the region's rect: transparent everywhere except the
/// region's own pixels, copied from `source`.
///
/// Listed pixels that fall outside the rect or the source are skipped.
pub fn extract(source: &RgbaImage, region: &Region) -> RgbaImage {
    let rect = region.bounds;
    let mut dst = RgbaImage::from_pixel(rect.width(), rect.height(), Rgba([0, 0, 0, 0]));
    for &(x, y) in &region.pixels {
        if !rect.contains(x, y) || x >= source.width() || y >= source.height() {
            continue;
        }
        dst.put_pixel(x - rect.x0, y - rect.y0, *source.get_pixel(x, y));
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PixelRect;

    #[test]
    fn copies_only_listed_pixels() {
        let source = RgbaImage::from_fn(6, 6, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let region = Region {
            id: 0,
            bounds: PixelRect::new(2, 1, 5, 4),
            pixels: vec![(2, 1), (4, 3), (3, 2)],
        };
        let out = extract(&source, &region);

        assert_eq!(out.dimensions(), (3, 3));
        assert_eq!(*out.get_pixel(0, 0), Rgba([2, 1, 7, 255]));
        assert_eq!(*out.get_pixel(2, 2), Rgba([4, 3, 7, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([3, 2, 7, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
        let opaque = out.pixels().filter(|p| p.0[3] > 0).count();
        assert_eq!(opaque, 3);
    }

    #[test]
    fn out_of_rect_pixels_are_ignored() {
        let source = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let region = Region {
            id: 0,
            bounds: PixelRect::new(0, 0, 2, 2),
            pixels: vec![(0, 0), (3, 3)],
        };
        let out = extract(&source, &region);
        assert_eq!(out.pixels().filter(|p| p.0[3] > 0).count(), 1);
    }
}
