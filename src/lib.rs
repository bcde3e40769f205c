//! sprite-shatter: break 2D sprites into independent pieces.
//!
//! Two fracture modes over an RGBA pixel buffer:
//! Voronoi cracking around randomly sampled seed pixels, and splitting
//! into 4-connected islands after pixels have been erased. Every piece
//! comes back as a cropped buffer plus a local-space offset; the engine
//! adds a simplified collision outline, an area-based mass and a world
//! placement.
//!
//! # Example
//!
//! ```no_run
//! use sprite_shatter::{crack, bitmap, Outcome, ShatterConfig};
//! use std::path::Path;
//!
//! let sprite = bitmap::load(Path::new("crate.png"))?;
//! let config = ShatterConfig { seed: Some(7), ..ShatterConfig::default() };
//! if let Outcome::Broken(fragments) = crack(&sprite, 6, &config)? {
//!     println!("{} fragments", fragments.len());
//! }
//! # Ok::<(), sprite_shatter::ShatterError>(())
//! ```

#![forbid(unsafe_code)]

pub mod bitmap;
mod config;
pub mod engine;
pub mod error;
pub mod fracture;
mod geom;
pub mod host;
pub mod mask;
pub mod mass;
pub mod outline;
pub mod placement;
pub mod session;

// Re-export the geometry and raster crates so hosts get the same versions
// used by fragments and outlines.
pub use image;
pub use kurbo;

pub use config::{ShatterConfig, SimplificationLevel};
pub use engine::{Body, Piece, Shatter};
pub use error::ShatterError;
pub use fracture::{Fragment, NoEffect, Outcome, Region};
pub use geom::PixelRect;
pub use host::SpriteHost;
pub use mass::{estimate_mass, MassShape};
pub use outline::contour::ContourOutliner;
pub use outline::simplify::simplify_outline;
pub use outline::{OutlineGenerator, OutlineRing};
pub use placement::Transform2D;
pub use session::{DestructibleSprite, SpriteEvent};

use std::time::Instant;

use image::RgbaImage;
use rand::Rng;
use tracing::debug;

use fracture::{build_fragments, components, prune, seeds, voronoi};
use mask::Mask;

/// Voronoi crack with the config's random source.
///
/// Reproducible when `config.seed` is set.
pub fn crack(
    buffer: &RgbaImage,
    piece_count: usize,
    config: &ShatterConfig,
) -> Result<Outcome<Fragment>, ShatterError> {
    let mut rng = config.rng();
    crack_with_rng(buffer, piece_count, config, &mut rng)
}

/// Full crack pipeline: mask → seeds → Voronoi regions → fragments.
pub fn crack_with_rng<R: Rng + ?Sized>(
    buffer: &RgbaImage,
    piece_count: usize,
    config: &ShatterConfig,
    rng: &mut R,
) -> Result<Outcome<Fragment>, ShatterError> {
    let t_start = Instant::now();
    config.validate()?;

    // ── Mask ──────────────────────────────────────────────
    let mask = match solid_mask(buffer, config)? {
        Ok(mask) => mask,
        Err(reason) => return Ok(Outcome::Unaffected(reason)),
    };

    // ── Seeds ─────────────────────────────────────────────
    let seeds = seeds::sample_seeds(&mask, piece_count.min(mask.solid_count()), rng);
    if seeds.len() < 2 {
        return Ok(Outcome::Unaffected(NoEffect::InsufficientSeeds {
            usable: seeds.len(),
        }));
    }

    // ── Partition ─────────────────────────────────────────
    let regions = prune(voronoi::partition(&mask, &seeds), config.min_pixels);
    if regions.len() < 2 {
        return Ok(Outcome::Unaffected(NoEffect::InsufficientSeeds {
            usable: regions.len(),
        }));
    }

    // ── Extract ───────────────────────────────────────────
    let fragments = build_fragments(buffer, &regions, config.pixels_per_unit);
    debug!(
        seeds = seeds.len(),
        fragments = fragments.len(),
        elapsed_ms = t_start.elapsed().as_millis() as u64,
        "crack"
    );
    Ok(Outcome::Broken(fragments))
}

/// Split into 4-connected islands; a no-op unless at least two survive pruning.
pub fn try_split(
    buffer: &RgbaImage,
    config: &ShatterConfig,
) -> Result<Outcome<Fragment>, ShatterError> {
    let t_start = Instant::now();
    config.validate()?;

    let mask = match solid_mask(buffer, config)? {
        Ok(mask) => mask,
        Err(reason) => return Ok(Outcome::Unaffected(reason)),
    };

    let regions = prune(components::label(&mask), config.min_pixels);
    if regions.len() < 2 {
        return Ok(Outcome::Unaffected(NoEffect::InsufficientComponents {
            found: regions.len(),
        }));
    }

    let fragments = build_fragments(buffer, &regions, config.pixels_per_unit);
    debug!(
        islands = fragments.len(),
        elapsed_ms = t_start.elapsed().as_millis() as u64,
        "split"
    );
    Ok(Outcome::Broken(fragments))
}

/// Threshold the buffer; the inner `Err` is a no-op reason, not a failure.
fn solid_mask(
    buffer: &RgbaImage,
    config: &ShatterConfig,
) -> Result<Result<Mask, NoEffect>, ShatterError> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(ShatterError::EmptySource);
    }
    let mask = Mask::from_alpha(buffer, config.alpha_threshold);
    if mask.solid_count() < config.min_pixels {
        return Ok(Err(NoEffect::InsufficientSolidMass {
            solid: mask.solid_count(),
            required: config.min_pixels,
        }));
    }
    Ok(Ok(mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn opaque(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    fn config(min_pixels: usize) -> ShatterConfig {
        ShatterConfig {
            min_pixels,
            seed: Some(42),
            ..ShatterConfig::default()
        }
    }

    #[test]
    fn crack_is_reproducible_with_seed() {
        let buffer = opaque(48, 48);
        let a = crack(&buffer, 5, &config(8)).unwrap().into_pieces().unwrap();
        let b = crack(&buffer, 5, &config(8)).unwrap().into_pieces().unwrap();
        let rects_a: Vec<_> = a.iter().map(|f| f.rect).collect();
        let rects_b: Vec<_> = b.iter().map(|f| f.rect).collect();
        assert_eq!(rects_a, rects_b);
    }

    #[test]
    fn single_piece_request_is_no_op() {
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = crack_with_rng(&opaque(16, 16), 1, &config(1), &mut rng).unwrap();
        assert_eq!(
            outcome.no_effect(),
            Some(NoEffect::InsufficientSeeds { usable: 1 })
        );
    }

    #[test]
    fn transparent_sprite_is_no_op_on_both_paths() {
        let buffer = RgbaImage::new(16, 16);
        let expected = Some(NoEffect::InsufficientSolidMass {
            solid: 0,
            required: 64,
        });
        assert_eq!(crack(&buffer, 4, &config(64)).unwrap().no_effect(), expected);
        assert_eq!(try_split(&buffer, &config(64)).unwrap().no_effect(), expected);
    }

    #[test]
    fn solid_sprite_does_not_split() {
        let outcome = try_split(&opaque(12, 12), &config(4)).unwrap();
        assert_eq!(
            outcome.no_effect(),
            Some(NoEffect::InsufficientComponents { found: 1 })
        );
    }

    #[test]
    fn empty_buffer_is_a_hard_error() {
        assert!(matches!(
            try_split(&RgbaImage::new(0, 0), &config(1)),
            Err(ShatterError::EmptySource)
        ));
    }

    #[test]
    fn invalid_config_is_a_hard_error() {
        let bad = ShatterConfig {
            pixels_per_unit: 0.0,
            ..config(1)
        };
        assert!(matches!(
            crack(&opaque(4, 4), 2, &bad),
            Err(ShatterError::InvalidConfig(_))
        ));
    }
}
