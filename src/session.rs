//! Event-driven destructible sprite.
//!
//! The host forwards discrete events (`on_erase`, `on_crack_requested`) and
//! calls `tick` once per frame. Fracture work happens synchronously inside
//! the event call; `tick` only schedules outline/mass rebuilds after erasures
//! that did not split the sprite.

use image::RgbaImage;
use kurbo::Point;
use rand::Rng;
use tracing::debug;

use crate::bitmap::erase_circle;
use crate::engine::{Body, Piece, Shatter};
use crate::error::ShatterError;
use crate::fracture::{NoEffect, Outcome};
use crate::outline::OutlineGenerator;
use crate::placement::{local_to_pixel, Transform2D};

/// What an event did to the sprite.
#[derive(Debug, Clone)]
pub enum SpriteEvent {
    /// The brush did not reach any visible pixel of this sprite.
    Missed,
    /// Pixels were erased but the sprite is still one piece; a body rebuild is pending.
    Eroded { erased: usize },
    /// The sprite broke. This session now holds `primary`; the host spawns `spawned`.
    Shattered { primary: Piece, spawned: Vec<Piece> },
    /// A crack was requested but left the sprite untouched.
    Unaffected(NoEffect),
}

/// One destructible sprite and its pending-rebuild state.
#[derive(Debug, Clone)]
pub struct DestructibleSprite {
    buffer: RgbaImage,
    transform: Transform2D,
    rebuild_pending: bool,
    since_rebuild: f64,
}

impl DestructibleSprite {
    pub fn new(buffer: RgbaImage, transform: Transform2D) -> Result<Self, ShatterError> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(ShatterError::EmptySource);
        }
        Ok(DestructibleSprite {
            buffer,
            transform,
            rebuild_pending: false,
            since_rebuild: 0.0,
        })
    }

    /// Session for a piece the host just spawned.
    pub fn from_piece(piece: &Piece) -> Self {
        DestructibleSprite {
            buffer: piece.fragment.buffer.clone(),
            transform: piece.transform,
            rebuild_pending: false,
            since_rebuild: 0.0,
        }
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    /// Keep in sync with the host's physics-driven placement.
    pub fn set_transform(&mut self, transform: Transform2D) {
        self.transform = transform;
    }

    pub fn rebuild_pending(&self) -> bool {
        self.rebuild_pending
    }

    /// Whether a world-space disc overlaps the sprite's rectangle.
    pub fn overlaps(&self, world_point: Point, radius: f64, pixels_per_unit: f64) -> bool {
        let local = self.transform.to_local(world_point);
        let local_radius = radius / self.transform.mean_scale();
        let half_w = self.buffer.width() as f64 / (2.0 * pixels_per_unit);
        let half_h = self.buffer.height() as f64 / (2.0 * pixels_per_unit);
        let dx = (local.x.abs() - half_w).max(0.0);
        let dy = (local.y.abs() - half_h).max(0.0);
        dx * dx + dy * dy <= local_radius * local_radius
    }

    /// Erase a world-space disc and split the sprite if islands appeared.
    pub fn on_erase<G: OutlineGenerator + Sync>(
        &mut self,
        engine: &Shatter<G>,
        world_point: Point,
        radius: f64,
    ) -> Result<SpriteEvent, ShatterError> {
        let ppu = engine.config().pixels_per_unit;
        if !self.overlaps(world_point, radius, ppu) {
            return Ok(SpriteEvent::Missed);
        }

        let (w, h) = self.buffer.dimensions();
        let (px, py) = local_to_pixel(self.transform.to_local(world_point), w, h, ppu);
        let pixel_radius = (radius / self.transform.mean_scale() * ppu).ceil() as i64;
        let erased = erase_circle(
            &mut self.buffer,
            px.floor() as i64,
            py.floor() as i64,
            pixel_radius,
        );
        if erased == 0 {
            return Ok(SpriteEvent::Missed);
        }

        match engine.split(&self.buffer, &self.transform)? {
            Outcome::Broken(pieces) => Ok(self.adopt(pieces)),
            Outcome::Unaffected(reason) => {
                debug!(erased, ?reason, "erase left sprite in one piece");
                self.rebuild_pending = true;
                Ok(SpriteEvent::Eroded { erased })
            }
        }
    }

    /// Crack into `crack_pieces` Voronoi pieces if the disc touches the sprite.
    pub fn on_crack_requested<G: OutlineGenerator + Sync, R: Rng + ?Sized>(
        &mut self,
        engine: &Shatter<G>,
        world_point: Point,
        radius: f64,
        rng: &mut R,
    ) -> Result<SpriteEvent, ShatterError> {
        if !self.overlaps(world_point, radius, engine.config().pixels_per_unit) {
            return Ok(SpriteEvent::Missed);
        }
        let pieces = engine.config().crack_pieces;
        match engine.crack(&self.buffer, pieces, &self.transform, rng)? {
            Outcome::Broken(pieces) => Ok(self.adopt(pieces)),
            Outcome::Unaffected(reason) => Ok(SpriteEvent::Unaffected(reason)),
        }
    }

    /// Advance time; returns a fresh body once a pending rebuild is due.
    pub fn tick<G: OutlineGenerator + Sync>(&mut self, engine: &Shatter<G>, dt: f64) -> Option<Body> {
        if !self.rebuild_pending {
            return None;
        }
        self.since_rebuild += dt.max(0.0);
        if self.since_rebuild < engine.config().rebuild_interval {
            return None;
        }
        self.rebuild_pending = false;
        self.since_rebuild = 0.0;
        Some(engine.body(&self.buffer, self.transform.scale))
    }

    /// Become the primary (largest) piece; the rest go back to the host.
    fn adopt(&mut self, pieces: Vec<Piece>) -> SpriteEvent {
        let mut pieces = pieces.into_iter();
        let Some(primary) = pieces.next() else {
            return SpriteEvent::Missed;
        };
        self.buffer = primary.fragment.buffer.clone();
        self.transform = primary.transform;
        self.rebuild_pending = false;
        self.since_rebuild = 0.0;
        SpriteEvent::Shattered {
            primary,
            spawned: pieces.collect(),
        }
    }
}
