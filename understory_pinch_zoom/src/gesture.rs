// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state machine driving a [`ViewportState`].
//!
//! ## Usage
//!
//! 1) Create a [`GestureCoordinator`] with the content size and a [`ZoomConfig`].
//! 2) On every layout pass call [`GestureCoordinator::measured_size`]; the first
//!    pass fits the content to the available width.
//! 3) Forward gesture callbacks from the platform's gesture detector to the
//!    `on_*` methods, using viewport coordinates.
//! 4) Once per frame call [`GestureCoordinator::tick`] and redraw with
//!    [`GestureCoordinator::current_transform`] when it returns `true`.
//!
//! At most one driver (pinch session, fling, zoom animation) is active at a
//! time. Starting a gesture discards whatever driver was active, freezing the
//! transform at its last value first.

use kurbo::{Point, Rect, Size, Vec2};

use crate::animation::ZoomAnimator;
use crate::clamp::{clamp_scale, clamp_translate};
use crate::config::ZoomConfig;
use crate::inertia::InertialScroller;
use crate::layout::{LayoutAdapter, LayoutConstraints};
use crate::viewport::{ViewTransform, ViewportDebugInfo, ViewportState};

/// What, if anything, is currently driving the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// Nothing is moving.
    #[default]
    Idle,
    /// A finger is dragging the content.
    Panning,
    /// A two-finger pinch is in progress.
    Pinching,
    /// The content is coasting after a fling.
    Flinging,
    /// The double-tap zoom animation is running.
    ZoomAnimating,
}

/// State captured when a pinch begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    /// Scale at pinch begin.
    pub start_scale: f64,
    /// Scroll offset at pinch begin.
    pub start_translate: Vec2,
    /// Content-space point that was under the focal point at pinch begin.
    pub start_focal_content: Point,
}

#[derive(Clone, Debug)]
enum Driver {
    Idle,
    Panning,
    Pinch(PinchSession),
    Fling(InertialScroller),
    Zoom(ZoomAnimator),
}

impl Driver {
    fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Panning => GesturePhase::Panning,
            Self::Pinch(_) => GesturePhase::Pinching,
            Self::Fling(_) => GesturePhase::Flinging,
            Self::Zoom(_) => GesturePhase::ZoomAnimating,
        }
    }
}

/// Turns gesture primitives into a clamped pan/zoom transform.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use understory_pinch_zoom::{GestureCoordinator, LayoutConstraints, ZoomConfig};
///
/// let mut view = GestureCoordinator::new(Size::new(1000.0, 2000.0), ZoomConfig::default());
/// view.measured_size(LayoutConstraints::at_most(Size::new(500.0, 500.0)));
/// assert_eq!(view.current_transform().scale, 0.5);
///
/// view.on_double_tap(Point::new(250.0, 250.0));
/// while view.is_animating() {
///     view.tick(16.0);
/// }
/// assert_eq!(view.current_transform().scale, 1.25);
/// ```
#[derive(Clone, Debug)]
pub struct GestureCoordinator {
    viewport: ViewportState,
    layout: LayoutAdapter,
    config: ZoomConfig,
    driver: Driver,
    user_scaled: bool,
}

impl GestureCoordinator {
    /// Creates a coordinator for content of the given intrinsic size.
    ///
    /// The configuration is sanitized first. Until the first layout pass the
    /// scale is `1` and the viewport is empty.
    #[must_use]
    pub fn new(content_size: Size, config: ZoomConfig) -> Self {
        let config = config.sanitized();
        Self {
            viewport: ViewportState::new(content_size, Size::ZERO),
            layout: LayoutAdapter::new(config.max_scale_multiplier),
            config,
            driver: Driver::Idle,
            user_scaled: false,
        }
    }

    /// Returns the (sanitized) configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Returns the underlying viewport state.
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Returns the current gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.driver.phase()
    }

    /// Returns the active pinch session, if any.
    #[must_use]
    pub fn pinch_session(&self) -> Option<&PinchSession> {
        match &self.driver {
            Driver::Pinch(session) => Some(session),
            _ => None,
        }
    }

    /// Returns `true` while a fling or zoom animation needs ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.driver, Driver::Fling(_) | Driver::Zoom(_))
    }

    /// Returns a snapshot of the transform for the render call.
    #[must_use]
    pub fn current_transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    /// Replaces the content, discarding any driver and the current fit.
    ///
    /// The next [`GestureCoordinator::measured_size`] call refits the new
    /// content.
    pub fn set_content_size(&mut self, size: Size) {
        self.set_driver(Driver::Idle);
        self.viewport.set_content_size(size);
        self.layout.reset();
        self.user_scaled = false;
    }

    /// Runs a layout pass and returns the size the viewport wants.
    ///
    /// The first pass (and any pass with new constraints before the user has
    /// zoomed) fits the content to the available width, setting the scale
    /// limits to `[fit, fit * max_scale_multiplier]`.
    pub fn measured_size(&mut self, constraints: LayoutConstraints) -> Size {
        if self
            .layout
            .apply(constraints, &mut self.viewport, self.user_scaled)
        {
            self.set_driver(Driver::Idle);
        }
        LayoutAdapter::measured_size(&constraints, &self.viewport)
    }

    /// Pointer went down: stop any fling or zoom animation where it is.
    ///
    /// Ignored while pinching.
    pub fn on_down(&mut self) {
        if matches!(self.driver, Driver::Pinch(_)) {
            return;
        }
        self.set_driver(Driver::Idle);
    }

    /// Pointer went up: a pan ends. Flings and animations keep running.
    pub fn on_up(&mut self) {
        if matches!(self.driver, Driver::Panning) {
            self.set_driver(Driver::Idle);
        }
    }

    /// Pans by a scroll distance in viewport pixels.
    ///
    /// Positive deltas scroll toward the bottom-right of the content, i.e. the
    /// content moves opposite to the finger. Deltas pushing past an edge are
    /// dropped on that axis. Any fling or zoom animation is cancelled first.
    /// Returns `true` if the transform changed.
    pub fn on_pan_delta(&mut self, delta: Vec2) -> bool {
        if matches!(self.driver, Driver::Pinch(_)) {
            log::debug!("ignoring pan delta during pinch");
            return false;
        }
        self.set_driver(Driver::Panning);
        let applied = self.viewport.pan_by(delta);
        applied != Vec2::ZERO
    }

    /// Starts a pinch anchored at `focal` (viewport space).
    pub fn on_pinch_begin(&mut self, focal: Point) {
        if !focal.is_finite() {
            log::debug!("ignoring pinch begin at non-finite focal point");
            return;
        }
        let session = PinchSession {
            start_scale: self.viewport.scale(),
            start_translate: self.viewport.translate(),
            start_focal_content: self.viewport.viewport_to_content_point(focal),
        };
        self.set_driver(Driver::Pinch(session));
    }

    /// Applies a multiplicative scale `factor` with the focal point now at `focal`.
    ///
    /// The content point captured at pinch begin is placed back under `focal`
    /// at the new scale, as far as bounds allow. Non-finite or non-positive
    /// factors are ignored, as are updates without a preceding pinch begin.
    /// Returns `true` if the transform changed.
    pub fn on_pinch_update(&mut self, factor: f64, focal: Point) -> bool {
        let Driver::Pinch(session) = &self.driver else {
            log::debug!("ignoring pinch update outside of a pinch");
            return false;
        };
        if !(factor.is_finite() && factor > 0.0) || !focal.is_finite() {
            log::debug!("ignoring malformed pinch update (factor {factor}, focal {focal:?})");
            return false;
        }
        let anchor = session.start_focal_content.to_vec2();
        let before = self.viewport.transform();
        let scale = clamp_scale(
            before.scale * factor,
            self.viewport.min_scale(),
            self.viewport.max_scale(),
        );
        self.viewport
            .set_transform(scale, anchor * scale - focal.to_vec2());
        let after = self.viewport.transform();
        if after.scale != before.scale {
            self.user_scaled = true;
        }
        after != before
    }

    /// Ends the current pinch.
    pub fn on_pinch_end(&mut self) {
        if matches!(self.driver, Driver::Pinch(_)) {
            self.set_driver(Driver::Idle);
        }
    }

    /// Starts inertial scrolling from a fling with the given pointer velocity.
    ///
    /// The content coasts opposite to the pointer, so the scroll velocity is
    /// the negated pointer velocity (viewport pixels per tick unit). Returns
    /// `true` if a fling started; a fling too slow to move, or one pointing
    /// only into edges, leaves the coordinator idle.
    pub fn on_fling_start(&mut self, pointer_velocity: Vec2) -> bool {
        if matches!(self.driver, Driver::Pinch(_)) {
            log::debug!("ignoring fling during pinch");
            return false;
        }
        if !pointer_velocity.is_finite() {
            log::debug!("ignoring fling with non-finite velocity {pointer_velocity:?}");
            return false;
        }
        let max = self.viewport.max_translate();
        let scroller = InertialScroller::new(
            self.viewport.translate().to_point(),
            -pointer_velocity,
            Rect::new(0.0, 0.0, max.x, max.y),
            self.config.fling_friction,
            self.config.fling_velocity_epsilon,
        );
        if scroller.is_settled() {
            self.set_driver(Driver::Idle);
            return false;
        }
        self.set_driver(Driver::Fling(scroller));
        true
    }

    /// Toggles between the fitted and the maximum scale around `tap`.
    ///
    /// If the scale sits on the minimum (within
    /// [`ZoomConfig::scale_epsilon`]) the target is the maximum scale,
    /// otherwise it is the minimum. The content point under `tap` stays under
    /// `tap` at the target scale, as far as bounds allow. Returns `true` if
    /// the animation started.
    pub fn on_double_tap(&mut self, tap: Point) -> bool {
        if matches!(self.driver, Driver::Pinch(_)) {
            log::debug!("ignoring double tap during pinch");
            return false;
        }
        if !tap.is_finite() {
            log::debug!("ignoring double tap at non-finite point {tap:?}");
            return false;
        }
        self.set_driver(Driver::Idle);

        let target_scale = if self.viewport.is_at_min_scale(self.config.scale_epsilon) {
            self.viewport.max_scale()
        } else {
            self.viewport.min_scale()
        };
        let anchor = self.viewport.viewport_to_content_point(tap).to_vec2();
        let target = ViewTransform {
            scale: target_scale,
            translate: clamp_translate(
                anchor * target_scale - tap.to_vec2(),
                target_scale,
                self.viewport.content_size(),
                self.viewport.viewport_size(),
            ),
        };
        let animator = ZoomAnimator::new(
            self.viewport.transform(),
            target,
            self.config.zoom_duration,
            self.config.zoom_easing,
        );
        self.user_scaled = true;
        self.set_driver(Driver::Zoom(animator));
        true
    }

    /// Advances the active fling or zoom animation by `dt` tick units.
    ///
    /// Returns `true` if the transform changed and a redraw is needed.
    /// Non-finite or negative `dt` counts as zero.
    pub fn tick(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let (next, done) = match &mut self.driver {
            Driver::Fling(scroller) => {
                let position = scroller.step(dt);
                let next = ViewTransform {
                    scale: self.viewport.scale(),
                    translate: position.to_vec2(),
                };
                (next, scroller.is_settled())
            }
            Driver::Zoom(animator) => {
                let next = animator.advance(dt);
                (next, animator.is_finished())
            }
            Driver::Idle | Driver::Panning | Driver::Pinch(_) => return false,
        };
        let before = self.viewport.transform();
        self.viewport.set_transform(next.scale, next.translate);
        if done {
            self.set_driver(Driver::Idle);
        }
        self.viewport.transform() != before
    }

    /// Sets the transform programmatically, discarding any driver.
    ///
    /// Values are clamped like any gesture. Counts as a user-chosen scale, so
    /// later constraint changes keep it. Returns `true` if the transform
    /// changed.
    pub fn set_transform(&mut self, scale: f64, translate: Vec2) -> bool {
        self.set_driver(Driver::Idle);
        let before = self.viewport.transform();
        self.viewport.set_transform(scale, translate);
        self.user_scaled = true;
        self.viewport.transform() != before
    }

    /// Discards any driver, leaving the transform where it is.
    pub fn cancel(&mut self) {
        self.set_driver(Driver::Idle);
    }

    /// Snapshot of the coordinator state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> GestureDebugInfo {
        GestureDebugInfo {
            phase: self.phase(),
            viewport: self.viewport.debug_info(),
            user_scaled: self.user_scaled,
            needs_fit: self.layout.needs_fit(),
        }
    }

    fn set_driver(&mut self, driver: Driver) {
        let from = self.driver.phase();
        self.driver = driver;
        let to = self.driver.phase();
        if from != to {
            log::trace!("gesture phase {from:?} -> {to:?}");
        }
    }
}

/// Debug snapshot of a [`GestureCoordinator`].
#[derive(Clone, Copy, Debug)]
pub struct GestureDebugInfo {
    /// Current gesture phase.
    pub phase: GesturePhase,
    /// Viewport snapshot.
    pub viewport: ViewportDebugInfo,
    /// Whether the user has chosen a scale since the last fit.
    pub user_scaled: bool,
    /// Whether the next layout pass will fit the content.
    pub needs_fit: bool,
}
