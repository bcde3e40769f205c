//! Nearest-seed (Voronoi) partition of the solid pixels.
//!
//! Labelling is O(solid × seeds) and dominates crack time, so rows are
//! labelled in parallel with rayon. Region lists and bounds are then built
//! in a single raster-order pass, which keeps the output identical to a
//! sequential implementation.

use rayon::prelude::*;

use super::seeds::Seed;
use super::Region;
use crate::geom::Bounds;
use crate::mask::Mask;

const UNASSIGNED: u32 = u32::MAX;

/// Assign every solid pixel to its nearest seed.
///
/// Returns one region per seed, in seed order, before pruning. Ties go to
/// the lowest seed index. Regions are pairwise disjoint and together cover
/// exactly the solid set.
pub fn partition(mask: &Mask, seeds: &[Seed]) -> Vec<Region> {
    let width = mask.width() as usize;
    let labels = label_rows(mask, seeds);

    let mut bounds = vec![Bounds::default(); seeds.len()];
    let mut pixels: Vec<Vec<(u32, u32)>> = vec![Vec::new(); seeds.len()];
    if width > 0 {
        for (idx, &label) in labels.iter().enumerate() {
            if label == UNASSIGNED {
                continue;
            }
            let x = (idx % width) as u32;
            let y = (idx / width) as u32;
            pixels[label as usize].push((x, y));
            bounds[label as usize].include(x, y);
        }
    }

    pixels
        .into_iter()
        .zip(bounds)
        .enumerate()
        .map(|(id, (pixels, bounds))| Region {
            id,
            bounds: bounds.to_rect(),
            pixels,
        })
        .collect()
}

/// Per-pixel seed index, `UNASSIGNED` for empty pixels.
fn label_rows(mask: &Mask, seeds: &[Seed]) -> Vec<u32> {
    let width = mask.width() as usize;
    let mut labels = vec![UNASSIGNED; mask.cells().len()];
    if width == 0 || seeds.is_empty() {
        return labels;
    }

    let seeds: Vec<(i64, i64)> = seeds.iter().map(|s| (s.x as i64, s.y as i64)).collect();
    labels
        .par_chunks_mut(width)
        .zip(mask.cells().par_chunks(width))
        .enumerate()
        .for_each(|(y, (row_labels, row_cells))| {
            let y = y as i64;
            for (x, (label, &solid)) in row_labels.iter_mut().zip(row_cells).enumerate() {
                if solid {
                    *label = nearest(&seeds, x as i64, y);
                }
            }
        });
    labels
}

#[inline]
fn nearest(seeds: &[(i64, i64)], x: i64, y: i64) -> u32 {
    let mut best = 0u32;
    let mut best_d2 = i64::MAX;
    for (s, &(sx, sy)) in seeds.iter().enumerate() {
        let dx = x - sx;
        let dy = y - sy;
        let d2 = dx * dx + dy * dy;
        // Strict comparison keeps the earliest seed on ties.
        if d2 < best_d2 {
            best_d2 = d2;
            best = s as u32;
        }
    }
    best
}
