//! Fragments → finished pieces (buffer, outline, mass, placement).

use image::RgbaImage;
use kurbo::Vec2;
use rand::Rng;
use rayon::prelude::*;

use crate::config::ShatterConfig;
use crate::error::ShatterError;
use crate::fracture::{Fragment, Outcome};
use crate::mass::{estimate_mass, MassShape};
use crate::outline::contour::ContourOutliner;
use crate::outline::simplify::simplify_outline_set;
use crate::outline::{OutlineGenerator, OutlineRing};
use crate::placement::Transform2D;

/// A fragment ready to be handed to the host world.
#[derive(Debug, Clone)]
pub struct Piece {
    pub fragment: Fragment,
    /// Simplified collision outline, local space.
    pub outline: Vec<OutlineRing>,
    pub mass: f64,
    /// World placement derived from the pre-fracture snapshot.
    pub transform: Transform2D,
    pub pixels_per_unit: f64,
}

/// Outline and mass of a sprite that changed shape without splitting.
#[derive(Debug, Clone)]
pub struct Body {
    pub outline: Vec<OutlineRing>,
    pub mass: f64,
}

/// Fracture operations bound to one configuration and outline generator.
#[derive(Debug, Clone)]
pub struct Shatter<G> {
    config: ShatterConfig,
    outliner: G,
}

impl Shatter<ContourOutliner> {
    /// Engine with the default outliner, thresholding alpha like `config`.
    pub fn with_contours(config: ShatterConfig) -> Result<Self, ShatterError> {
        let outliner = ContourOutliner::from_config(&config);
        Shatter::new(config, outliner)
    }
}

impl<G: OutlineGenerator + Sync> Shatter<G> {
    /// A custom outliner should treat the same pixels as solid as
    /// `config.alpha_threshold` does, or mass and outline drift from the
    /// fragment contents.
    pub fn new(config: ShatterConfig, outliner: G) -> Result<Self, ShatterError> {
        config.validate()?;
        Ok(Shatter { config, outliner })
    }

    pub fn config(&self) -> &ShatterConfig {
        &self.config
    }

    /// Voronoi crack into up to `piece_count` pieces.
    ///
    /// `snapshot` is the object's transform before anything is modified;
    /// every piece, the primary one included, is placed from it.
    pub fn crack<R: Rng + ?Sized>(
        &self,
        buffer: &RgbaImage,
        piece_count: usize,
        snapshot: &Transform2D,
        rng: &mut R,
    ) -> Result<Outcome<Piece>, ShatterError> {
        let outcome = crate::crack_with_rng(buffer, piece_count, &self.config, rng)?;
        Ok(self.finish(outcome, snapshot))
    }

    /// Split into connected islands, if there is more than one.
    pub fn split(
        &self,
        buffer: &RgbaImage,
        snapshot: &Transform2D,
    ) -> Result<Outcome<Piece>, ShatterError> {
        let outcome = crate::try_split(buffer, &self.config)?;
        Ok(self.finish(outcome, snapshot))
    }

    /// Regenerate outline and mass for a buffer under the given scale.
    pub fn body(&self, buffer: &RgbaImage, scale: Vec2) -> Body {
        let raw = self.outliner.generate(buffer, self.config.pixels_per_unit);
        let outline = simplify_outline_set(&raw, self.config.simplify_level);
        let mass = estimate_mass(MassShape::Polygon(&outline), scale);
        Body { outline, mass }
    }

    fn finish(&self, outcome: Outcome<Fragment>, snapshot: &Transform2D) -> Outcome<Piece> {
        match outcome {
            // Outline tracing dominates here; pieces are independent.
            Outcome::Broken(fragments) => Outcome::Broken(
                fragments
                    .into_par_iter()
                    .map(|fragment| self.piece(fragment, snapshot))
                    .collect(),
            ),
            Outcome::Unaffected(reason) => Outcome::Unaffected(reason),
        }
    }

    fn piece(&self, fragment: Fragment, snapshot: &Transform2D) -> Piece {
        let Body { outline, mass } = self.body(&fragment.buffer, snapshot.scale);
        Piece {
            transform: snapshot.place(fragment.offset),
            fragment,
            outline,
            mass,
            pixels_per_unit: self.config.pixels_per_unit,
        }
    }
}
