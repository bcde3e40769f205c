use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ShatterError;

/// All fragmentation parameters in one struct.
/// Plain data so hosts can keep presets and tweak values at runtime.
#[derive(Debug, Clone)]
pub struct ShatterConfig {
    // -- Mask stage --
    /// Alpha cutoff in [0, 1]. A pixel is solid when `alpha / 255 > alpha_threshold`.
    pub alpha_threshold: f32,

    // -- Partition stage --
    /// Fragments (and whole sprites) with fewer solid pixels than this are ignored.
    pub min_pixels: usize,
    /// Seed for the crack sampler. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
    /// Number of Voronoi seeds used by crack requests coming from the session.
    pub crack_pieces: usize,

    // -- Outline stage --
    /// Outline reduction strength, 0 (off) to 5 (strongest).
    pub simplify_level: SimplificationLevel,

    // -- World mapping --
    /// Pixels per world unit of the source sprite.
    pub pixels_per_unit: f64,
    /// Seconds between outline/mass rebuilds after an erase that did not split.
    pub rebuild_interval: f64,
}

impl Default for ShatterConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: 0.1,
            min_pixels: 64,
            seed: None,
            crack_pieces: 6,
            simplify_level: SimplificationLevel::OFF,
            pixels_per_unit: 100.0,
            rebuild_interval: 0.2,
        }
    }
}

impl ShatterConfig {
    /// Reject values that would make every downstream stage meaningless.
    pub fn validate(&self) -> Result<(), ShatterError> {
        if !(0.0..=1.0).contains(&self.alpha_threshold) {
            return Err(ShatterError::InvalidConfig(format!(
                "alpha_threshold must be within [0, 1], got {}",
                self.alpha_threshold
            )));
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(ShatterError::InvalidConfig(format!(
                "pixels_per_unit must be positive, got {}",
                self.pixels_per_unit
            )));
        }
        Ok(())
    }

    /// Random source for seed sampling: reproducible when `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Discrete outline simplification strength, clamped to 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SimplificationLevel(u8);

impl SimplificationLevel {
    pub const OFF: Self = Self(0);
    pub const MAX: Self = Self(5);

    /// Tolerance per unit of shape extent, indexed by level.
    const STEPS: [f64; 6] = [0.0, 0.005, 0.01, 0.02, 0.04, 0.08];

    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// World-space tolerance for a shape whose larger bounding-box side is `extent`.
    pub fn tolerance(self, extent: f64) -> f64 {
        Self::STEPS[self.0 as usize] * extent
    }
}

impl From<u8> for SimplificationLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}
