//! Uniform seed sampling over solid pixels.
//!
//! Single-pass reservoir sampling in raster order, so the full list of
//! solid pixels is never materialized.

use rand::Rng;

use crate::mask::Mask;

/// A Voronoi anchor on a solid pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed {
    pub x: u32,
    pub y: u32,
}

/// Pick up to `k` distinct solid pixels uniformly at random.
///
/// The i-th solid pixel (1-based) fills a free slot while the reservoir is
/// short, otherwise replaces slot `r` when `r = uniform[0, i)` lands below `k`.
/// With fewer than `k` solid pixels every solid pixel is returned.
pub fn sample_seeds<R: Rng + ?Sized>(mask: &Mask, k: usize, rng: &mut R) -> Vec<Seed> {
    if k == 0 {
        return Vec::new();
    }

    let mut reservoir = Vec::with_capacity(k.min(mask.solid_count()));
    let mut seen = 0usize;
    for (x, y) in mask.solid_pixels() {
        seen += 1;
        if reservoir.len() < k {
            reservoir.push(Seed { x, y });
        } else {
            let r = rng.gen_range(0..seen);
            if r < k {
                reservoir[r] = Seed { x, y };
            }
        }
    }
    reservoir
}
