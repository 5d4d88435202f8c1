//! # shatter
//!
//! A "shatter into particles" visual transition: a source image (or a
//! snapshot of a UI element) is sampled into a grid of colored particles
//! that fly outward on parabolic arcs and fade over a fixed time window,
//! simulating an explosion.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use shatter::{EffectSurface, Rect, DEFAULT_DURATION};
//!
//! let mut surface = EffectSurface::new();
//! let image = image::open("card.png")?.to_rgba8();
//!
//! surface.explode_image(
//!     &image,
//!     Rect::new(100.0, 100.0, 128.0, 128.0),
//!     Duration::ZERO,
//!     DEFAULT_DURATION,
//! );
//!
//! // In the host's redraw handler:
//! let keep_animating = surface.render(now, &mut canvas);
//! ```
//!
//! Or just run the windowed demo: `shatter::window::run()?` opens a window
//! where every click shatters a card image at the cursor.
//!
//! ## Core Concepts
//!
//! ### Particle fields
//!
//! A [`ParticleField`] is one running explosion: the source image is
//! partitioned into a 15x15 grid (configurable via [`FieldConfig`]), one
//! particle per interior cell, each with a randomized radius, trajectory,
//! start stagger, and fade budget. Evaluation is a pure function of eased
//! progress; the field has no per-frame mutable state.
//!
//! ### The effect surface
//!
//! An [`EffectSurface`] owns any number of concurrent fields and drives them
//! from a monotonic timestamp the host samples once per repaint. The frame
//! loop is explicit and single-threaded:
//!
//! ```text
//! host schedules frame -> surface.render(now, canvas) -> true? schedule again
//! ```
//!
//! ### Host collaborators
//!
//! The core draws through the [`Canvas`] trait (one filled-circle primitive)
//! and reaches UI elements through [`Element`] (bounds + snapshot +
//! decorative transform hooks). [`crate::window`] implements both on top of
//! winit and an instanced wgpu circle renderer; tests use recording doubles.
//!
//! ### Randomness
//!
//! All particle randomness flows from a single seeded generator owned by the
//! surface ([`EffectSurface::with_seed`]), so tests can assert exact particle
//! profiles and replay whole frame sequences.

pub mod error;
pub mod field;
pub mod host;
mod particle;
pub mod rect;
pub mod shader;
pub mod source;
pub mod surface;
pub mod time;
pub mod timeline;
pub mod window;

pub use error::{CaptureError, GpuError, HostError};
pub use field::{FieldConfig, ParticleField};
pub use glam::Vec2;
pub use host::{capture_with_retry, Canvas, Element};
pub use particle::ParticleState;
pub use rect::{dp, Rect};
pub use source::{PixelSource, Rgba};
pub use surface::EffectSurface;
pub use timeline::{Easing, Phase, Timeline, DEFAULT_DURATION, END_VALUE};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use shatter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::CaptureError;
    pub use crate::field::{FieldConfig, ParticleField};
    pub use crate::host::{Canvas, Element};
    pub use crate::particle::ParticleState;
    pub use crate::rect::Rect;
    pub use crate::source::{PixelSource, Rgba};
    pub use crate::surface::EffectSurface;
    pub use crate::time::Time;
    pub use crate::timeline::{Easing, Phase, Timeline, DEFAULT_DURATION, END_VALUE};
    pub use crate::Vec2;
}
