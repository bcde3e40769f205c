//! Fragmentation pipeline: mask → regions → fragments.
//!
//! Two ways to obtain regions from a mask:
//! 1. Crack: seed sampling + nearest-seed (Voronoi) assignment
//! 2. Split: 4-connected component labelling
//!
//! Both feed the same pruning, sub-buffer extraction and placement.

pub mod components;
pub mod extract;
pub mod seeds;
pub mod voronoi;

use image::RgbaImage;
use kurbo::Vec2;

use crate::geom::PixelRect;
use crate::placement::local_offset;

/// A set of source pixels that will become one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Seed index (crack) or discovery order (split).
    pub id: usize,
    pub bounds: PixelRect,
    /// Absolute source coordinates, raster order for Voronoi, BFS order for components.
    pub pixels: Vec<(u32, u32)>,
}

/// A cropped, self-contained piece of the source sprite.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: usize,
    /// Pixels of the region only; everything else in the rect is transparent.
    pub buffer: RgbaImage,
    /// Where the buffer sat inside the source.
    pub rect: PixelRect,
    pub pixel_count: usize,
    /// Local-space displacement of the fragment centre from the source centre.
    pub offset: Vec2,
}

/// Why a fracture request left the sprite untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEffect {
    /// Fewer solid pixels than `min_pixels` before any partitioning.
    InsufficientSolidMass { solid: usize, required: usize },
    /// Fewer than two seeds, or fewer than two Voronoi regions survived pruning.
    InsufficientSeeds { usable: usize },
    /// Zero or one connected component survived pruning.
    InsufficientComponents { found: usize },
}

/// Result of a fracture request that did not hit a hard failure.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The sprite broke. Largest piece (by rect area) first.
    Broken(Vec<T>),
    Unaffected(NoEffect),
}

impl<T> Outcome<T> {
    pub fn is_broken(&self) -> bool {
        matches!(self, Outcome::Broken(_))
    }

    pub fn pieces(&self) -> &[T] {
        match self {
            Outcome::Broken(pieces) => pieces,
            Outcome::Unaffected(_) => &[],
        }
    }

    pub fn into_pieces(self) -> Option<Vec<T>> {
        match self {
            Outcome::Broken(pieces) => Some(pieces),
            Outcome::Unaffected(_) => None,
        }
    }

    pub fn no_effect(&self) -> Option<NoEffect> {
        match self {
            Outcome::Broken(_) => None,
            Outcome::Unaffected(reason) => Some(*reason),
        }
    }
}

/// Drop regions that are too small or have an empty rect.
pub fn prune(regions: Vec<Region>, min_pixels: usize) -> Vec<Region> {
    regions
        .into_iter()
        .filter(|r| r.pixels.len() >= min_pixels && !r.bounds.is_empty())
        .collect()
}

/// Crop every region out of `source`, order by rect area (largest first,
/// stable) and compute placement offsets.
pub fn build_fragments(source: &RgbaImage, regions: &[Region], pixels_per_unit: f64) -> Vec<Fragment> {
    let (width, height) = source.dimensions();
    let mut fragments: Vec<Fragment> = regions
        .iter()
        .map(|region| Fragment {
            id: region.id,
            buffer: extract::extract(source, region),
            rect: region.bounds,
            pixel_count: region.pixels.len(),
            offset: local_offset(&region.bounds, width, height, pixels_per_unit),
        })
        .collect();
    fragments.sort_by_key(|f| std::cmp::Reverse(f.rect.area()));
    fragments
}
