//! Effect surface: owns and time-drives running explosions.
//!
//! An [`EffectSurface`] is created once per window and lives as long as the
//! window does; explosions come and go continuously. The surface holds no
//! clock of its own: the host samples a monotonic clock once per repaint and
//! passes it to [`render`](EffectSurface::render), which evaluates every
//! active field, issues the frame's draw calls, and reports whether another
//! repaint is needed. The frame loop is explicit and single-threaded:
//!
//! ```text
//! host schedules frame -> surface.render(now, canvas) -> true? schedule again
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use shatter::{Canvas, EffectSurface, Rect, Rgba, Vec2, DEFAULT_DURATION};
//!
//! struct CountingCanvas(usize);
//! impl Canvas for CountingCanvas {
//!     fn fill_circle(&mut self, _: Vec2, _: f32, _: Rgba, _: f32) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let image = image::RgbaImage::from_pixel(34, 34, image::Rgba([255, 128, 0, 255]));
//! let mut surface = EffectSurface::with_seed(7);
//! surface.explode_image(&image, Rect::new(0.0, 0.0, 34.0, 34.0), Duration::ZERO, DEFAULT_DURATION);
//!
//! let mut canvas = CountingCanvas(0);
//! let active = surface.render(Duration::from_millis(512), &mut canvas);
//! assert!(active);
//! assert!(canvas.0 > 0);
//! ```

use std::time::Duration;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::CaptureError;
use crate::field::{FieldConfig, ParticleField};
use crate::host::{capture_with_retry, Canvas, Element};
use crate::rect::{dp, Rect};
use crate::source::PixelSource;
use crate::timeline::{Phase, Timeline, DEFAULT_DURATION};

/// Default expansion inset in density-independent units, applied on each
/// side when deriving a rectangle from an element.
const DEFAULT_INSET_DP: f32 = 32.0;
/// Length of the jitter phase of the pre-shatter transition.
const SHAKE_DURATION: Duration = Duration::from_millis(100);
/// Length of the scale/fade phase of the pre-shatter transition.
const VANISH_DURATION: Duration = Duration::from_millis(150);
/// Jitter amplitude as a fraction of the element's size.
const SHAKE_AMPLITUDE: f32 = 0.05;

/// A registered explosion and the frame timestamp its timeline is anchored
/// to.
struct ActiveField {
    field: ParticleField,
    start: Duration,
}

/// Decorative shake-then-vanish transition on a host element.
///
/// Purely cosmetic: it transforms the element while the particle field's
/// start delay elapses, and nothing in the particle system depends on it.
struct Vanish {
    element: Box<dyn Element>,
    start: Duration,
}

impl Vanish {
    /// Apply the transition state for `now`; false once it has run out.
    fn advance(&mut self, now: Duration, rng: &mut SmallRng) -> bool {
        let elapsed = now.saturating_sub(self.start);
        if elapsed < SHAKE_DURATION {
            let frame = self.element.frame();
            self.element.set_offset(Vec2::new(
                (rng.gen::<f32>() - 0.5) * frame.width * SHAKE_AMPLITUDE,
                (rng.gen::<f32>() - 0.5) * frame.height * SHAKE_AMPLITUDE,
            ));
            true
        } else if elapsed < SHAKE_DURATION + VANISH_DURATION {
            let t = (elapsed - SHAKE_DURATION).as_secs_f32() / VANISH_DURATION.as_secs_f32();
            self.element.set_offset(Vec2::ZERO);
            self.element.set_scale(1.0 - t);
            self.element.set_opacity(1.0 - t);
            true
        } else {
            self.element.set_scale(0.0);
            self.element.set_opacity(0.0);
            false
        }
    }
}

/// Owns zero or more concurrently running particle fields and renders them.
///
/// Fields are drawn in insertion order; removing a completed field never
/// disturbs the order or liveness of the others. All particle randomness
/// flows from one seeded generator owned by the surface, so a seeded surface
/// replays identically.
pub struct EffectSurface {
    explosions: Vec<ActiveField>,
    vanishes: Vec<Vanish>,
    insets: Vec2,
    config: FieldConfig,
    rng: SmallRng,
    /// Timestamp of the most recent frame; new explosions anchor to it.
    clock: Duration,
}

impl EffectSurface {
    /// Surface with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Surface with a fixed seed; identical calls replay identically.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        let config = FieldConfig::default();
        let inset = dp(DEFAULT_INSET_DP, config.density);
        Self {
            explosions: Vec::new(),
            vanishes: Vec::new(),
            insets: Vec2::splat(inset),
            config,
            rng,
            clock: Duration::ZERO,
        }
    }

    /// Replace the field configuration.
    ///
    /// Resets the expansion insets to their default under the new density;
    /// call [`set_expansion_insets`](Self::set_expansion_insets) afterwards
    /// to customize them.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self.insets = Vec2::splat(dp(DEFAULT_INSET_DP, config.density));
        self
    }

    /// Override the rectangle expansion insets, in surface pixels.
    ///
    /// Affects only future [`explode`](Self::explode) calls; rectangles of
    /// already-running fields are fixed at registration.
    pub fn set_expansion_insets(&mut self, dx: f32, dy: f32) {
        self.insets = Vec2::new(dx, dy);
    }

    /// Number of registered fields that have not yet completed.
    pub fn active_fields(&self) -> usize {
        self.explosions.len()
    }

    /// The fields currently registered, in render order.
    pub fn fields(&self) -> impl Iterator<Item = &ParticleField> {
        self.explosions.iter().map(|active| &active.field)
    }

    /// Whether nothing is left to animate.
    pub fn is_idle(&self) -> bool {
        self.explosions.is_empty() && self.vanishes.is_empty()
    }

    /// Start an explosion for an already-captured image.
    ///
    /// The field's timeline is anchored to the surface's most recent frame
    /// timestamp and starts after `delay`; the field is removed once
    /// `delay + duration` has elapsed. The caller should schedule a repaint
    /// so the new field gets its first frame.
    pub fn explode_image<S>(&mut self, source: &S, rect: Rect, delay: Duration, duration: Duration)
    where
        S: PixelSource + ?Sized,
    {
        let timeline = Timeline::new(delay, duration);
        let field = ParticleField::new(source, rect, timeline, self.config, &mut self.rng);
        self.explosions.push(ActiveField {
            field,
            start: self.clock,
        });
    }

    /// Shatter a host element.
    ///
    /// Captures the element's content (with one allocation retry), expands
    /// its frame by the configured insets, plays the decorative
    /// shake-then-vanish transition on the element, and starts the particle
    /// explosion with a start delay covering the shake. On error the
    /// explosion is skipped entirely; nothing is registered.
    pub fn explode(&mut self, mut element: Box<dyn Element>) -> Result<(), CaptureError> {
        let image = capture_with_retry(element.as_mut())?;
        let rect = element.frame().expand(self.insets.x, self.insets.y);
        self.explode_image(&image, rect, SHAKE_DURATION, DEFAULT_DURATION);
        self.vanishes.push(Vanish {
            element,
            start: self.clock,
        });
        Ok(())
    }

    /// Render one frame at timestamp `now`.
    ///
    /// Advances the decorative transitions, evaluates every started field in
    /// insertion order, draws every particle with positive opacity, and
    /// removes fields whose timelines have finished. Returns true while
    /// anything is still animating; the host keeps scheduling repaints as
    /// long as it does. With nothing active this is a no-op returning false.
    pub fn render<C>(&mut self, now: Duration, canvas: &mut C) -> bool
    where
        C: Canvas + ?Sized,
    {
        self.clock = now;
        let rng = &mut self.rng;
        self.vanishes.retain_mut(|vanish| vanish.advance(now, rng));
        self.explosions.retain(|active| {
            let elapsed = now.saturating_sub(active.start);
            match active.field.phase(elapsed) {
                Phase::Pending => true,
                Phase::Finished => false,
                Phase::Running(factor) => {
                    for state in active.field.evaluate(factor) {
                        if state.alpha > 0.0 {
                            canvas.fill_circle(state.center, state.radius, state.color, state.alpha);
                        }
                    }
                    true
                }
            }
        });
        !self.explosions.is_empty() || !self.vanishes.is_empty()
    }

    /// Remove all fields and transitions immediately.
    ///
    /// The next `render` call draws nothing; the host should schedule one
    /// final repaint after calling this so already-drawn particles disappear
    /// from screen. Safe to call on an empty surface.
    pub fn clear(&mut self) {
        self.explosions.clear();
        self.vanishes.clear();
    }
}

impl Default for EffectSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Rgba;
    use image::RgbaImage;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Canvas double that records every circle drawn in a frame.
    #[derive(Default)]
    struct RecordingCanvas {
        circles: Vec<(Vec2, f32, Rgba, f32)>,
    }

    impl RecordingCanvas {
        fn frame(surface: &mut EffectSurface, at_ms: u64) -> (Self, bool) {
            let mut canvas = Self::default();
            let active = surface.render(Duration::from_millis(at_ms), &mut canvas);
            (canvas, active)
        }
    }

    impl Canvas for RecordingCanvas {
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
            self.circles.push((center, radius, color, alpha));
        }
    }

    #[derive(Default)]
    struct ElementState {
        offset: Vec2,
        scale: f32,
        opacity: f32,
        offsets_seen: u32,
        fail_captures: bool,
        reclaims: u32,
    }

    /// Element double sharing its observed state with the test.
    struct TestElement {
        frame: Rect,
        state: Rc<RefCell<ElementState>>,
    }

    impl TestElement {
        fn new(frame: Rect) -> (Self, Rc<RefCell<ElementState>>) {
            let state = Rc::new(RefCell::new(ElementState {
                scale: 1.0,
                opacity: 1.0,
                ..Default::default()
            }));
            (
                Self {
                    frame,
                    state: state.clone(),
                },
                state,
            )
        }
    }

    impl Element for TestElement {
        fn frame(&self) -> Rect {
            self.frame
        }

        fn capture(&mut self) -> Result<RgbaImage, CaptureError> {
            if self.state.borrow().fail_captures {
                Err(CaptureError::OutOfMemory)
            } else {
                Ok(RgbaImage::from_pixel(
                    self.frame.width as u32,
                    self.frame.height as u32,
                    image::Rgba([10, 200, 30, 255]),
                ))
            }
        }

        fn reclaim_memory(&mut self) {
            self.state.borrow_mut().reclaims += 1;
        }

        fn set_offset(&mut self, offset: Vec2) {
            let mut state = self.state.borrow_mut();
            state.offset = offset;
            state.offsets_seen += 1;
        }

        fn set_scale(&mut self, scale: f32) {
            self.state.borrow_mut().scale = scale;
        }

        fn set_opacity(&mut self, opacity: f32) {
            self.state.borrow_mut().opacity = opacity;
        }
    }

    fn test_image() -> RgbaImage {
        RgbaImage::from_fn(34, 34, |x, y| {
            image::Rgba([(x * 7) as u8, (y * 7) as u8, 128, 255])
        })
    }

    fn rect() -> Rect {
        Rect::new(100.0, 100.0, 100.0, 100.0)
    }

    #[test]
    fn test_end_to_end_frame_sequence() {
        let mut surface = EffectSurface::with_seed(7);
        surface.explode_image(&test_image(), rect(), Duration::ZERO, DEFAULT_DURATION);

        // Frame 0: nothing has moved; only particles with a ~zero stagger
        // would be visible, and every drawn circle sits at its rest position
        // near the rectangle center.
        let (canvas, active) = RecordingCanvas::frame(&mut surface, 0);
        assert!(active);
        assert_eq!(surface.active_fields(), 1);
        for (center, _, _, alpha) in &canvas.circles {
            assert!((*alpha - 1.0).abs() < 1e-6);
            assert!(center.distance(rect().center()) <= 15.0);
        }

        // Frame 512: mid-flight. Particles are visible and some have left
        // the rest cluster.
        let (canvas, active) = RecordingCanvas::frame(&mut surface, 512);
        assert!(active);
        assert!(!canvas.circles.is_empty());
        assert!(canvas
            .circles
            .iter()
            .any(|(center, _, _, _)| center.distance(rect().center()) > 15.0));
        for (_, radius, _, alpha) in &canvas.circles {
            assert!((0.0..=1.0).contains(alpha));
            assert!(*radius >= 0.0);
        }

        // Frame 1024 (== duration): the field still exists; anything still
        // drawn is deep into its fade.
        let (canvas, active) = RecordingCanvas::frame(&mut surface, 1024);
        assert!(active);
        assert_eq!(surface.active_fields(), 1);
        for (_, _, _, alpha) in &canvas.circles {
            assert!(*alpha < 0.05);
        }

        // Frame 2000 (past duration): the field is gone and contributes
        // nothing.
        let (canvas, active) = RecordingCanvas::frame(&mut surface, 2000);
        assert!(!active);
        assert_eq!(surface.active_fields(), 0);
        assert!(canvas.circles.is_empty());
    }

    #[test]
    fn test_start_delay_defers_first_visible_frame() {
        let mut surface = EffectSurface::with_seed(3);
        surface.explode_image(
            &test_image(),
            rect(),
            Duration::from_millis(300),
            DEFAULT_DURATION,
        );

        let (canvas, active) = RecordingCanvas::frame(&mut surface, 200);
        assert!(active, "pending field keeps the surface animating");
        assert!(canvas.circles.is_empty());

        let (canvas, _) = RecordingCanvas::frame(&mut surface, 800);
        assert!(!canvas.circles.is_empty());
    }

    #[test]
    fn test_clear_empties_immediately() {
        let mut surface = EffectSurface::with_seed(5);
        surface.explode_image(&test_image(), rect(), Duration::ZERO, DEFAULT_DURATION);
        surface.explode_image(&test_image(), rect(), Duration::ZERO, DEFAULT_DURATION);
        RecordingCanvas::frame(&mut surface, 100);

        surface.clear();
        assert!(surface.is_idle());
        let (canvas, active) = RecordingCanvas::frame(&mut surface, 150);
        assert!(!active);
        assert!(canvas.circles.is_empty());

        // Clearing an already-empty surface is a no-op.
        surface.clear();
    }

    #[test]
    fn test_completion_leaves_other_fields_untouched() {
        let mut surface = EffectSurface::with_seed(11);
        let short = Rect::new(0.0, 0.0, 50.0, 50.0);
        let long = Rect::new(300.0, 300.0, 50.0, 50.0);
        surface.explode_image(&test_image(), short, Duration::ZERO, Duration::from_millis(400));
        surface.explode_image(&test_image(), long, Duration::ZERO, DEFAULT_DURATION);
        assert_eq!(surface.active_fields(), 2);

        let (_, active) = RecordingCanvas::frame(&mut surface, 600);
        assert!(active);
        assert_eq!(surface.active_fields(), 1);
        let rects: Vec<_> = surface.fields().map(|f| f.rect()).collect();
        assert_eq!(rects, vec![long]);

        // The survivor still draws.
        let (canvas, _) = RecordingCanvas::frame(&mut surface, 700);
        assert!(canvas
            .circles
            .iter()
            .all(|(center, _, _, _)| center.x > 200.0));
        assert!(!canvas.circles.is_empty());
    }

    #[test]
    fn test_insets_affect_only_future_explosions() {
        let mut surface = EffectSurface::with_seed(13);
        let (element_a, _) = TestElement::new(Rect::new(50.0, 50.0, 20.0, 20.0));
        surface.explode(Box::new(element_a)).unwrap();
        let first_rect = surface.fields().next().unwrap().rect();
        assert_eq!(first_rect, Rect::new(18.0, 18.0, 84.0, 84.0));

        surface.set_expansion_insets(4.0, 2.0);
        let (element_b, _) = TestElement::new(Rect::new(50.0, 50.0, 20.0, 20.0));
        surface.explode(Box::new(element_b)).unwrap();

        let rects: Vec<_> = surface.fields().map(|f| f.rect()).collect();
        assert_eq!(rects[0], first_rect, "running field keeps its rectangle");
        assert_eq!(rects[1], Rect::new(46.0, 48.0, 28.0, 24.0));
    }

    #[test]
    fn test_vanish_transition_shakes_then_shrinks() {
        let mut surface = EffectSurface::with_seed(17);
        let (element, state) = TestElement::new(Rect::new(0.0, 0.0, 40.0, 40.0));
        surface.explode(Box::new(element)).unwrap();

        // Shake phase: the element jitters around its resting place.
        RecordingCanvas::frame(&mut surface, 50);
        {
            let state = state.borrow();
            assert!(state.offsets_seen > 0);
            assert!(state.offset.x.abs() <= 40.0 * SHAKE_AMPLITUDE / 2.0);
            assert_eq!(state.scale, 1.0);
        }

        // Vanish phase: offset resets, scale and opacity ramp down.
        RecordingCanvas::frame(&mut surface, 175);
        {
            let state = state.borrow();
            assert_eq!(state.offset, Vec2::ZERO);
            assert!((state.scale - 0.5).abs() < 0.01);
            assert!((state.opacity - 0.5).abs() < 0.01);
        }

        // After the transition: fully collapsed, transition dropped, but the
        // particle field is still running.
        let (_, active) = RecordingCanvas::frame(&mut surface, 400);
        assert!(active);
        let state = state.borrow();
        assert_eq!(state.scale, 0.0);
        assert_eq!(state.opacity, 0.0);
    }

    #[test]
    fn test_capture_failure_skips_explosion() {
        let mut surface = EffectSurface::with_seed(19);
        let (element, state) = TestElement::new(Rect::new(0.0, 0.0, 16.0, 16.0));
        state.borrow_mut().fail_captures = true;

        let result = surface.explode(Box::new(element));
        assert_eq!(result, Err(CaptureError::OutOfMemory));
        assert!(surface.is_idle());
        assert_eq!(state.borrow().reclaims, 1, "one reclamation pass before giving up");
    }

    #[test]
    fn test_seeded_surfaces_replay_identically() {
        let run = || {
            let mut surface = EffectSurface::with_seed(23);
            surface.explode_image(&test_image(), rect(), Duration::ZERO, DEFAULT_DURATION);
            let (canvas, _) = RecordingCanvas::frame(&mut surface, 512);
            canvas.circles
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_mid_run_explosions_anchor_to_latest_frame() {
        let mut surface = EffectSurface::with_seed(29);
        surface.explode_image(&test_image(), rect(), Duration::ZERO, DEFAULT_DURATION);
        RecordingCanvas::frame(&mut surface, 5000);
        assert_eq!(surface.active_fields(), 0);

        // A second explosion added after a long idle stretch starts fresh
        // from the latest frame timestamp rather than the surface epoch.
        surface.explode_image(&test_image(), rect(), Duration::ZERO, DEFAULT_DURATION);
        let (canvas, active) = RecordingCanvas::frame(&mut surface, 5512);
        assert!(active);
        assert!(!canvas.circles.is_empty());
    }
}
