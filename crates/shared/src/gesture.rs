//! Wheel and pointer input routing.
//!
//! All cursor positions are container-relative pixels. The router owns only
//! gesture bookkeeping; zoom and pan live in [`ViewportState`].

use crate::clamp;
use crate::geometry::{Point, ViewportState};

/// Absorbs accumulated float error from linear stepping (1.0 + 0.2 - 0.2 != 1.0).
const SCALE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMode {
    Idle,
    /// `start` is `cursor - pan` at press time.
    Panning { start: Point },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    Unchanged,
    /// Zoomed back out to the minimum scale; view re-centered.
    Reset,
    Zoomed { scale: f64 },
}

/// What the click landed on, as reported by the host's hit testing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    Marker(String),
    Background,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickResolution {
    /// The click ended a drag and must be ignored.
    Suppressed,
    Marker(String),
    Background,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureRouter {
    mode: GestureMode,
    press_origin: Option<Point>,
}

impl Default for GestureRouter {
    fn default() -> Self {
        GestureRouter {
            mode: GestureMode::Idle,
            press_origin: None,
        }
    }
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, GestureMode::Panning { .. })
    }

    /// Drop any in-progress gesture (container switch, map swap).
    pub fn cancel(&mut self) {
        self.mode = GestureMode::Idle;
        self.press_origin = None;
    }

    /// Linear wheel zoom anchored on the cursor. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, viewport: &mut ViewportState, delta_y: f64, cursor: Point) -> ZoomOutcome {
        if !delta_y.is_finite() || delta_y == 0.0 || !cursor.is_finite() {
            return ZoomOutcome::Unchanged;
        }
        let config = *viewport.config();
        let old_scale = viewport.scale();
        let step = if delta_y > 0.0 {
            -config.zoom_step
        } else {
            config.zoom_step
        };
        let new_scale = clamp::clamp_scale(old_scale + step, &config);

        if (new_scale - old_scale).abs() < SCALE_EPSILON {
            return ZoomOutcome::Unchanged;
        }
        if new_scale <= config.min_scale + SCALE_EPSILON {
            viewport.reset_view();
            return ZoomOutcome::Reset;
        }

        let Some(offset) = viewport.cursor_offset_in_content(cursor) else {
            // No image box yet: nothing to anchor against.
            return ZoomOutcome::Unchanged;
        };
        let factor = new_scale / old_scale - 1.0;
        let pan = viewport.pan();
        viewport.apply(
            new_scale,
            Point::new(pan.x - offset.x * factor, pan.y - offset.y * factor),
        );
        ZoomOutcome::Zoomed {
            scale: viewport.scale(),
        }
    }

    /// Returns `true` when a pan gesture started.
    pub fn pointer_down(
        &mut self,
        viewport: &ViewportState,
        button: PointerButton,
        cursor: Point,
        over_content: bool,
    ) -> bool {
        if button != PointerButton::Primary || !cursor.is_finite() {
            return false;
        }
        self.press_origin = Some(cursor);
        if !over_content || !viewport.is_zoomed() {
            return false;
        }
        self.mode = GestureMode::Panning {
            start: cursor.sub(viewport.pan()),
        };
        true
    }

    /// Returns `true` when the pan changed. Every frame is clamped.
    pub fn pointer_move(&mut self, viewport: &mut ViewportState, cursor: Point) -> bool {
        let GestureMode::Panning { start } = self.mode else {
            return false;
        };
        if !cursor.is_finite() {
            return false;
        }
        let before = viewport.pan();
        viewport.set_pan(cursor.sub(start));
        viewport.pan() != before
    }

    /// Release anywhere, inside the container or not.
    pub fn pointer_up(&mut self) {
        self.mode = GestureMode::Idle;
    }

    /// Decide whether a click is genuine or the tail of a drag.
    ///
    /// The press origin is consumed; a click with no recorded press is genuine.
    pub fn resolve_click(&mut self, threshold: f64, cursor: Point, target: ClickTarget) -> ClickResolution {
        let origin = self.press_origin.take();
        if let Some(origin) = origin {
            let moved = cursor.sub(origin);
            if !moved.is_finite() || moved.x.abs() > threshold || moved.y.abs() > threshold {
                return ClickResolution::Suppressed;
            }
        }
        match target {
            ClickTarget::Marker(id) => ClickResolution::Marker(id),
            ClickTarget::Background => ClickResolution::Background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewportConfig;
    use crate::geometry::Size;

    /// 800x400 container showing a 2:1 image: content box fills it exactly.
    fn viewport() -> ViewportState {
        let mut vp = ViewportState::new(ViewportConfig::default());
        vp.set_container(Size::new(800.0, 400.0)).unwrap();
        vp.set_intrinsic(Size::new(1600.0, 800.0)).unwrap();
        vp
    }

    /// Screen position of a content-space point under the current transform.
    fn screen_of(vp: &ViewportState, content: Point) -> Point {
        let b = vp.image_box().unwrap();
        Point::new(
            b.left + vp.pan().x + content.x * vp.scale(),
            b.top + vp.pan().y + content.y * vp.scale(),
        )
    }

    #[test]
    fn test_wheel_up_zooms_in_by_linear_step() {
        let mut vp = viewport();
        let mut router = GestureRouter::new();
        let out = router.wheel(&mut vp, -100.0, Point::new(400.0, 200.0));
        assert!(matches!(out, ZoomOutcome::Zoomed { scale } if (scale - 1.2).abs() < 1e-9));
        router.wheel(&mut vp, -3.0, Point::new(400.0, 200.0));
        assert!((vp.scale() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_keeps_cursor_point_fixed() {
        let mut vp = viewport();
        let mut router = GestureRouter::new();
        let cursor = Point::new(300.0, 120.0);
        let anchor = vp.container_to_content(cursor).unwrap();
        for _ in 0..5 {
            router.wheel(&mut vp, -1.0, cursor);
            let s = screen_of(&vp, anchor);
            assert!((s.x - cursor.x).abs() < 0.01, "x drifted to {}", s.x);
            assert!((s.y - cursor.y).abs() < 0.01, "y drifted to {}", s.y);
        }
        assert!((vp.scale() - 2.0).abs() < 1e-9);
        // And back out again, still anchored.
        for _ in 0..3 {
            router.wheel(&mut vp, 1.0, cursor);
            let s = screen_of(&vp, anchor);
            assert!((s.x - cursor.x).abs() < 0.01);
            assert!((s.y - cursor.y).abs() < 0.01);
        }
    }

    #[test]
    fn test_wheel_out_to_min_resets_view() {
        let mut vp = viewport();
        let mut router = GestureRouter::new();
        let cursor = Point::new(700.0, 50.0);
        router.wheel(&mut vp, -1.0, cursor);
        router.wheel(&mut vp, -1.0, cursor);
        router.wheel(&mut vp, 1.0, cursor);
        let out = router.wheel(&mut vp, 1.0, cursor);
        assert_eq!(out, ZoomOutcome::Reset);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.pan(), Point::ZERO);
    }

    #[test]
    fn test_wheel_at_bounds_is_unchanged() {
        let mut vp = viewport();
        let mut router = GestureRouter::new();
        assert_eq!(router.wheel(&mut vp, 1.0, Point::new(10.0, 10.0)), ZoomOutcome::Unchanged);
        for _ in 0..60 {
            router.wheel(&mut vp, -1.0, Point::new(10.0, 10.0));
        }
        assert_eq!(vp.scale(), 8.0);
        assert_eq!(router.wheel(&mut vp, -1.0, Point::new(10.0, 10.0)), ZoomOutcome::Unchanged);
    }

    #[test]
    fn test_wheel_ignores_zero_and_nan_delta() {
        let mut vp = viewport();
        let mut router = GestureRouter::new();
        assert_eq!(router.wheel(&mut vp, 0.0, Point::new(1.0, 1.0)), ZoomOutcome::Unchanged);
        assert_eq!(router.wheel(&mut vp, f64::NAN, Point::new(1.0, 1.0)), ZoomOutcome::Unchanged);
        assert_eq!(vp.scale(), 1.0);
    }

    #[test]
    fn test_no_panning_at_min_scale() {
        let vp = viewport();
        let mut router = GestureRouter::new();
        assert!(!router.pointer_down(&vp, PointerButton::Primary, Point::new(10.0, 10.0), true));
        assert_eq!(router.mode(), GestureMode::Idle);
    }

    #[test]
    fn test_only_primary_button_pans() {
        let mut vp = viewport();
        vp.apply(2.0, Point::new(-200.0, -100.0));
        let mut router = GestureRouter::new();
        assert!(!router.pointer_down(&vp, PointerButton::Secondary, Point::new(10.0, 10.0), true));
        assert!(!router.pointer_down(&vp, PointerButton::Primary, Point::new(10.0, 10.0), false));
        assert!(router.pointer_down(&vp, PointerButton::Primary, Point::new(10.0, 10.0), true));
        assert!(router.is_panning());
    }

    #[test]
    fn test_drag_pans_and_clamps_every_frame() {
        let mut vp = viewport();
        vp.apply(2.0, Point::new(-200.0, -100.0));
        let mut router = GestureRouter::new();
        router.pointer_down(&vp, PointerButton::Primary, Point::new(400.0, 200.0), true);

        assert!(router.pointer_move(&mut vp, Point::new(350.0, 180.0)));
        assert_eq!(vp.pan(), Point::new(-250.0, -120.0));

        // Overshoot past the left/top edge: clamped mid-drag, not at release.
        router.pointer_move(&mut vp, Point::new(900.0, 600.0));
        assert_eq!(vp.pan(), Point::new(0.0, 0.0));
        router.pointer_move(&mut vp, Point::new(-900.0, -600.0));
        assert_eq!(vp.pan(), Point::new(-800.0, -400.0));

        router.pointer_up();
        assert!(!router.pointer_move(&mut vp, Point::new(100.0, 100.0)));
        assert_eq!(vp.pan(), Point::new(-800.0, -400.0));
    }

    #[test]
    fn test_small_displacement_is_a_click() {
        let vp = viewport();
        let mut router = GestureRouter::new();
        router.pointer_down(&vp, PointerButton::Primary, Point::new(100.0, 100.0), true);
        router.pointer_up();
        let r = router.resolve_click(2.0, Point::new(101.0, 101.0), ClickTarget::Background);
        assert_eq!(r, ClickResolution::Background);
    }

    #[test]
    fn test_large_displacement_suppresses_click() {
        let vp = viewport();
        let mut router = GestureRouter::new();
        router.pointer_down(&vp, PointerButton::Primary, Point::new(100.0, 100.0), true);
        router.pointer_up();
        let r = router.resolve_click(2.0, Point::new(110.0, 100.0), ClickTarget::Marker("porto".into()));
        assert_eq!(r, ClickResolution::Suppressed);
    }

    #[test]
    fn test_press_origin_is_consumed() {
        let vp = viewport();
        let mut router = GestureRouter::new();
        router.pointer_down(&vp, PointerButton::Primary, Point::new(100.0, 100.0), true);
        router.resolve_click(2.0, Point::new(150.0, 100.0), ClickTarget::Background);
        let r = router.resolve_click(2.0, Point::new(150.0, 100.0), ClickTarget::Marker("a".into()));
        assert_eq!(r, ClickResolution::Marker("a".to_string()));
    }

    #[test]
    fn test_cancel_ends_pan() {
        let mut vp = viewport();
        vp.apply(3.0, Point::new(-100.0, -100.0));
        let mut router = GestureRouter::new();
        router.pointer_down(&vp, PointerButton::Primary, Point::new(1.0, 1.0), true);
        router.cancel();
        assert_eq!(router.mode(), GestureMode::Idle);
    }
}
