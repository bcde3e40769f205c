use clap::{Args, Parser, Subcommand};
use sprite_shatter::{
    bitmap, Outcome, Piece, Shatter, ShatterConfig, SimplificationLevel, Transform2D,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprite-shatter", about = "Break a sprite into fragment images")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Voronoi crack around random seed pixels
    Crack {
        #[command(flatten)]
        common: Common,

        /// Number of seeds (upper bound on fragment count)
        #[arg(long, default_value = "6")]
        pieces: usize,

        /// Seed for the random sampler (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Split into 4-connected islands of visible pixels
    Split {
        #[command(flatten)]
        common: Common,
    },
}

#[derive(Args)]
struct Common {
    /// Input image path (PNG, JPEG, BMP)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for fragment_<i>.png files
    #[arg(short, long)]
    output: PathBuf,

    /// Alpha cutoff in [0, 1]
    #[arg(long, default_value = "0.1")]
    threshold: f32,

    /// Drop fragments with fewer visible pixels
    #[arg(long, default_value = "64")]
    min_pixels: usize,

    /// Outline simplification level (0 = off, 5 = strongest)
    #[arg(long, default_value = "0")]
    level: u8,

    /// Pixels per world unit
    #[arg(long, default_value = "100")]
    ppu: f64,
}

impl Common {
    fn config(&self, seed: Option<u64>) -> ShatterConfig {
        ShatterConfig {
            alpha_threshold: self.threshold,
            min_pixels: self.min_pixels,
            seed,
            simplify_level: SimplificationLevel::new(self.level),
            pixels_per_unit: self.ppu,
            ..ShatterConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (common, config, pieces) = match &cli.mode {
        Mode::Crack {
            common,
            pieces,
            seed,
        } => (common, common.config(*seed), Some(*pieces)),
        Mode::Split { common } => (common, common.config(None), None),
    };

    let shatter = Shatter::with_contours(config)?;
    let sprite = bitmap::load(&common.input)?;
    let (w, h) = sprite.dimensions();

    eprintln!();
    eprintln!("  sprite-shatter \u{00b7} {}", common.input.display());
    eprintln!("  Load        {}x{} px", w, h);

    let outcome = match pieces {
        Some(n) => {
            let mut rng = shatter.config().rng();
            shatter.crack(&sprite, n, &Transform2D::IDENTITY, &mut rng)?
        }
        None => shatter.split(&sprite, &Transform2D::IDENTITY)?,
    };

    let pieces = match outcome {
        Outcome::Broken(pieces) => pieces,
        Outcome::Unaffected(reason) => {
            eprintln!("  Unaffected  {:?}", reason);
            eprintln!();
            return Ok(());
        }
    };

    std::fs::create_dir_all(&common.output)?;
    for (i, piece) in pieces.iter().enumerate() {
        let path = write_piece(&common.output, i, piece)?;
        let rect = piece.fragment.rect;
        let vertices: usize = piece.outline.iter().map(|ring| ring.len()).sum();
        eprintln!(
            "  Piece {:<4}  rect ({},{})-({},{}) \u{00b7} {} px \u{00b7} offset ({:.3}, {:.3}) \u{00b7} {} vertices \u{00b7} mass {:.2}  \u{2192} {}",
            i,
            rect.x0, rect.y0, rect.x1, rect.y1,
            piece.fragment.pixel_count,
            piece.fragment.offset.x, piece.fragment.offset.y,
            vertices,
            piece.mass,
            path.display(),
        );
    }

    eprintln!();
    eprintln!("  \u{2713} {} fragments in {}", pieces.len(), common.output.display());
    eprintln!();

    Ok(())
}

fn write_piece(dir: &Path, index: usize, piece: &Piece) -> Result<PathBuf, image::ImageError> {
    let path = dir.join(format!("fragment_{}.png", index));
    piece.fragment.buffer.save(&path)?;
    Ok(path)
}
