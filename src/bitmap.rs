//! Readable pixel sources and in-place pixel edits.

use std::path::Path;

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::error::ShatterError;

/// Load an image from disk as 8-bit RGBA.
pub fn load(path: &Path) -> Result<RgbaImage, ShatterError> {
    let img = ImageReader::open(path)
        .map_err(|e| ShatterError::SourceUnreadable(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| ShatterError::SourceUnreadable(format!("{}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| ShatterError::SourceUnreadable(format!("{}: {}", path.display(), e)))?
        .into_rgba8();

    if img.width() == 0 || img.height() == 0 {
        return Err(ShatterError::EmptySource);
    }
    debug!(path = %path.display(), width = img.width(), height = img.height(), "loaded sprite");
    Ok(img)
}

/// Copy a sprite's sub-rectangle out of an atlas.
///
/// The origin is clamped into the atlas and the size to `[1, remaining]`,
/// so a slightly-off rect still yields a usable buffer.
pub fn clone_sprite_rect(
    atlas: &RgbaImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<RgbaImage, ShatterError> {
    let (aw, ah) = atlas.dimensions();
    if aw == 0 || ah == 0 {
        return Err(ShatterError::EmptySource);
    }
    let x = x.min(aw - 1);
    let y = y.min(ah - 1);
    let width = width.clamp(1, aw - x);
    let height = height.clamp(1, ah - y);
    Ok(image::imageops::crop_imm(atlas, x, y, width, height).to_image())
}

/// Clear alpha inside a pixel-space disc centred on (cx, cy).
///
/// Covers every integer offset with `dx² + dy² ≤ r²`; colour channels are
/// left alone. Returns how many pixels went from visible to transparent.
/// Only rows and columns inside the buffer are visited, so any radius or
/// centre is safe.
pub fn erase_circle(buffer: &mut RgbaImage, cx: i64, cy: i64, radius: i64) -> usize {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    if radius < 0 || w == 0 || h == 0 {
        return 0;
    }
    // Visited offsets never exceed the radius, so squares fit in i128.
    let r2 = (radius as i128) * (radius as i128);

    let y_start = cy.saturating_sub(radius).max(0);
    let y_end = cy.saturating_add(radius).min(h - 1);
    let x_start = cx.saturating_sub(radius).max(0);
    let x_end = cx.saturating_add(radius).min(w - 1);

    let mut erased = 0;
    for py in y_start..=y_end {
        let dy = (py as i128) - (cy as i128);
        for px in x_start..=x_end {
            let dx = (px as i128) - (cx as i128);
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let pixel = buffer.get_pixel_mut(px as u32, py as u32);
            if pixel.0[3] != 0 {
                pixel.0[3] = 0;
                erased += 1;
            }
        }
    }
    erased
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn load_round_trips_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        let img = RgbaImage::from_fn(6, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        img.save(&path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn load_reports_unreadable_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        assert!(matches!(load(&missing), Err(ShatterError::SourceUnreadable(_))));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image").unwrap();
        assert!(matches!(load(&garbage), Err(ShatterError::SourceUnreadable(_))));
    }

    #[test]
    fn clone_rect_clamps_to_atlas() {
        let atlas = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let sprite = clone_sprite_rect(&atlas, 6, 5, 10, 10).unwrap();
        assert_eq!(sprite.dimensions(), (2, 3));
        assert_eq!(*sprite.get_pixel(0, 0), Rgba([6, 5, 0, 255]));

        let tiny = clone_sprite_rect(&atlas, 20, 20, 0, 0).unwrap();
        assert_eq!(tiny.dimensions(), (1, 1));
        assert_eq!(*tiny.get_pixel(0, 0), Rgba([7, 7, 0, 255]));

        assert!(matches!(
            clone_sprite_rect(&RgbaImage::new(0, 0), 0, 0, 1, 1),
            Err(ShatterError::EmptySource)
        ));
    }

    #[test]
    fn erase_clears_disc_only() {
        let mut buffer = RgbaImage::from_pixel(9, 9, Rgba([10, 20, 30, 255]));
        let erased = erase_circle(&mut buffer, 4, 4, 1);
        // Radius 1 disc: centre + 4 edge neighbours.
        assert_eq!(erased, 5);
        assert_eq!(*buffer.get_pixel(4, 4), Rgba([10, 20, 30, 0]));
        assert_eq!(buffer.get_pixel(3, 3).0[3], 255);

        // Already-transparent pixels are not counted again.
        assert_eq!(erase_circle(&mut buffer, 4, 4, 1), 0);
    }

    #[test]
    fn erase_clips_at_buffer_edges() {
        let mut buffer = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let erased = erase_circle(&mut buffer, -1, -1, 2);
        // Offsets landing inside: (0,0) d²=2, (1,0)/(0,1) d²=5 > 4 excluded.
        assert_eq!(erased, 1);
    }

    #[test]
    fn huge_radius_clears_whole_buffer() {
        let mut buffer = RgbaImage::from_pixel(5, 3, Rgba([0, 0, 0, 255]));
        assert_eq!(erase_circle(&mut buffer, 2, 1, i64::MAX), 15);

        let mut buffer = RgbaImage::from_pixel(5, 3, Rgba([0, 0, 0, 255]));
        assert_eq!(erase_circle(&mut buffer, -3, 1, i64::MAX), 15);
    }

    #[test]
    fn far_centre_erases_nothing() {
        let mut buffer = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        assert_eq!(erase_circle(&mut buffer, i64::MAX, i64::MIN, 3), 0);
        assert_eq!(erase_circle(&mut buffer, -10, 2, 5), 0);
        assert_eq!(erase_circle(&mut buffer, -10, 2, -1), 0);
    }
}
