//! Alpha solidity mask.
//!
//! Stored as a flat row-major boolean array with the image crate's
//! orientation (row 0 = top of the sprite).

use image::{GrayImage, Luma, RgbaImage};

/// Boolean solidity grid derived from a pixel buffer's alpha channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<bool>,
    width: u32,
    height: u32,
    solid_count: usize,
}

impl Mask {
    /// Threshold the alpha channel: solid when `alpha / 255 > threshold`.
    pub fn from_alpha(buffer: &RgbaImage, threshold: f32) -> Self {
        let (width, height) = buffer.dimensions();
        let mut solid_count = 0;
        let data: Vec<bool> = buffer
            .pixels()
            .map(|p| {
                let solid = p.0[3] as f32 / 255.0 > threshold;
                solid_count += solid as usize;
                solid
            })
            .collect();

        Mask {
            data,
            width,
            height,
            solid_count,
        }
    }

    /// Build directly from row-major cells. Panics if the length does not match.
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), (width * height) as usize, "mask cell count");
        let solid_count = cells.iter().filter(|&&s| s).count();
        Mask {
            data: cells,
            width,
            height,
            solid_count,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// Solidity at (x, y). Out-of-bounds = false.
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.data[(y * self.width as i64 + x) as usize]
    }

    /// Row-major cells, one per pixel.
    pub fn cells(&self) -> &[bool] {
        &self.data
    }

    /// Solid coordinates in raster order (top row first, left to right).
    pub fn solid_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &solid)| solid)
            .map(move |(idx, _)| (idx as u32 % width, idx as u32 / width))
    }

    /// Binary image for imageproc: solid = 255, empty = 0, surrounded by
    /// `border` empty pixels on every side.
    pub fn to_gray(&self, border: u32) -> GrayImage {
        let width = self.width + 2 * border;
        let height = self.height + 2 * border;
        GrayImage::from_fn(width, height, |x, y| {
            let solid = self.get(x as i64 - border as i64, y as i64 - border as i64);
            Luma([if solid { 255 } else { 0 }])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn threshold_is_strict() {
        // 26/255 ≈ 0.102 > 0.1, 25/255 ≈ 0.098 is not.
        let mut buffer = RgbaImage::new(3, 1);
        buffer.put_pixel(0, 0, Rgba([10, 10, 10, 26]));
        buffer.put_pixel(1, 0, Rgba([10, 10, 10, 25]));
        buffer.put_pixel(2, 0, Rgba([10, 10, 10, 255]));

        let mask = Mask::from_alpha(&buffer, 0.1);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(mask.get(2, 0));
        assert_eq!(mask.solid_count(), 2);
    }

    #[test]
    fn fully_transparent_buffer_gives_empty_mask() {
        let buffer = RgbaImage::new(8, 8);
        let mask = Mask::from_alpha(&buffer, 0.1);
        assert_eq!(mask.solid_count(), 0);
        assert_eq!(mask.solid_pixels().count(), 0);
    }

    #[test]
    fn solid_pixels_follow_raster_order() {
        let mask = Mask::from_cells(3, 2, vec![false, true, true, true, false, true]);
        let pixels: Vec<_> = mask.solid_pixels().collect();
        assert_eq!(pixels, vec![(1, 0), (2, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn out_of_bounds_reads_empty() {
        let mask = Mask::from_cells(2, 2, vec![true; 4]);
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(0, 2));
        assert!(mask.get(1, 1));
    }

    #[test]
    fn gray_export_matches_cells() {
        let mask = Mask::from_cells(2, 1, vec![true, false]);
        let gray = mask.to_gray(0);
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 0);

        let padded = mask.to_gray(1);
        assert_eq!(padded.dimensions(), (4, 3));
        assert_eq!(padded.get_pixel(0, 1).0[0], 0);
        assert_eq!(padded.get_pixel(1, 1).0[0], 255);
        assert_eq!(padded.get_pixel(2, 1).0[0], 0);
        assert!(padded.pixels().filter(|p| p.0[0] == 255).count() == 1);
    }
}
