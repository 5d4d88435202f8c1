//! Particle fields: one running explosion over one image/rectangle pair.
//!
//! A [`ParticleField`] decomposes a source image into a fixed-size grid of
//! colored particles, each with a randomized physical profile, and exposes
//! the pure per-frame evaluation of all of them. Time-driving lives in
//! [`crate::surface`]; the field only composes a [`Timeline`] and answers
//! "where is everything at this progress value".
//!
//! # Sampling
//!
//! The image is partitioned into an `(N+2) x (N+2)` virtual grid and only
//! the interior `N x N` cells are sampled, which skips the outer border of
//! the image where anti-aliased or transparent edge pixels live. Cell sizes
//! use integer division, matching the reference behavior for images whose
//! size is not a multiple of the grid.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use shatter::{FieldConfig, ParticleField, Rect, Timeline, DEFAULT_DURATION};
//!
//! let image = image::RgbaImage::from_pixel(34, 34, image::Rgba([200, 80, 40, 255]));
//! let mut rng = SmallRng::seed_from_u64(42);
//! let field = ParticleField::new(
//!     &image,
//!     Rect::new(0.0, 0.0, 34.0, 34.0),
//!     Timeline::new(Duration::ZERO, DEFAULT_DURATION),
//!     FieldConfig::default(),
//!     &mut rng,
//! );
//! assert_eq!(field.len(), 225);
//! ```

use std::time::Duration;

use rand::Rng;

use crate::particle::{Particle, ParticleState};
use crate::rect::Rect;
use crate::source::PixelSource;
use crate::timeline::{Phase, Timeline};

/// Construction parameters for a particle field.
#[derive(Clone, Copy, Debug)]
pub struct FieldConfig {
    /// Particles per grid axis; the field holds `grid * grid` particles.
    pub grid: u32,
    /// Display density multiplier applied to all density-independent lengths.
    pub density: f32,
}

impl FieldConfig {
    /// Default configuration: 15x15 grid at density 1.0.
    pub fn new() -> Self {
        Self {
            grid: 15,
            density: 1.0,
        }
    }

    /// Set the per-axis grid size.
    pub fn with_grid(mut self, grid: u32) -> Self {
        self.grid = grid;
        self
    }

    /// Set the display density multiplier.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One running explosion: a particle grid, its target rectangle, and its
/// timeline.
pub struct ParticleField {
    particles: Vec<Particle>,
    rect: Rect,
    timeline: Timeline,
}

impl ParticleField {
    /// Sample `source` and roll particle profiles from `rng`.
    ///
    /// A zero-area rectangle or zero-sized image yields a degenerate but
    /// well-behaved field: particles cluster at the rectangle's center with
    /// no travel, sampled colors fall back to transparent, and the field
    /// fades out on its normal schedule.
    pub fn new<S, R>(
        source: &S,
        rect: Rect,
        timeline: Timeline,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self
    where
        S: PixelSource + ?Sized,
        R: Rng + ?Sized,
    {
        let n = config.grid;
        let cell_w = source.width() / (n + 2);
        let cell_h = source.height() / (n + 2);
        let mut particles = Vec::with_capacity((n * n) as usize);
        for i in 0..n {
            for j in 0..n {
                let color = source.pixel((j + 1) * cell_w, (i + 1) * cell_h);
                particles.push(Particle::generate(color, &rect, config.density, rng));
            }
        }
        Self {
            particles,
            rect,
            timeline,
        }
    }

    /// The target rectangle the field was built for.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The field's timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Number of particles in the field.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles (grid size 0).
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Timeline phase at `elapsed` time since the field was registered.
    pub fn phase(&self, elapsed: Duration) -> Phase {
        self.timeline.phase(elapsed)
    }

    /// Evaluate every particle at the given eased progress.
    ///
    /// Pure: repeated calls with the same `factor` yield identical states,
    /// in a fixed (row-major grid) order.
    pub fn evaluate(&self, factor: f32) -> impl Iterator<Item = ParticleState> + '_ {
        self.particles.iter().map(move |p| p.at(factor))
    }
}
