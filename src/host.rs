//! Host-side collaborators: the draw target and shatterable elements.
//!
//! The core never talks to a platform directly. It draws through [`Canvas`]
//! and reaches UI elements through [`Element`]; the windowed host in
//! [`crate::window`] provides one implementation of each, and tests provide
//! recording doubles.

use glam::Vec2;
use image::RgbaImage;

use crate::error::CaptureError;
use crate::rect::Rect;
use crate::source::Rgba;

/// Receives the draw calls for one frame's visible particles.
///
/// The only primitive the effect needs is a filled circle with per-call
/// color and opacity. Implementations that rasterize immediately and
/// implementations that batch into an instance list are both fine; calls
/// arrive in a deterministic order (field insertion order, then row-major
/// grid order within a field).
pub trait Canvas {
    /// Fill a circle at `center` with the given radius.
    ///
    /// `alpha` is in `[0, 1]` and multiplies the color's own alpha channel.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32);
}

/// A host UI element that can be shattered.
///
/// [`frame`](Element::frame) and [`capture`](Element::capture) feed the
/// particle field; the remaining hooks are decorative, driven by the brief
/// shake-then-vanish transition that plays on the element while its particle
/// explosion spools up. Implementations whose elements cannot be transformed
/// may leave the decorative hooks empty.
pub trait Element {
    /// Bounding rectangle in surface coordinates.
    fn frame(&self) -> Rect;

    /// Render the element's current content into an RGBA image.
    fn capture(&mut self) -> Result<RgbaImage, CaptureError>;

    /// Hint that cached memory should be released before a capture retry.
    fn reclaim_memory(&mut self) {}

    /// Translate the element's visual by `offset` from its resting place.
    fn set_offset(&mut self, offset: Vec2);

    /// Scale the element's visual around its center.
    fn set_scale(&mut self, scale: f32);

    /// Set the element's visual opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f32);
}

/// Capture retries attempted after an out-of-memory failure.
const CAPTURE_RETRIES: u32 = 1;

/// Capture an element's content, retrying after a reclamation hint.
///
/// A [`CaptureError::OutOfMemory`] failure triggers
/// [`Element::reclaim_memory`] and one more attempt; any other error, or a
/// second allocation failure, is returned as-is. Callers treat an `Err` as
/// "skip the explosion".
pub fn capture_with_retry<E: Element + ?Sized>(element: &mut E) -> Result<RgbaImage, CaptureError> {
    let mut attempts_left = CAPTURE_RETRIES;
    loop {
        match element.capture() {
            Err(CaptureError::OutOfMemory) if attempts_left > 0 => {
                attempts_left -= 1;
                element.reclaim_memory();
            }
            other => return other,
        }
    }
}
