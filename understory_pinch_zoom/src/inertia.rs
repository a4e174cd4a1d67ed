// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Friction-based fling deceleration.
//!
//! Each [`InertialScroller::step`] moves the position by the current velocity
//! and then multiplies the velocity by a constant friction factor in `(0, 1)`.
//! The geometric decay guarantees that any finite velocity drops below the
//! rest threshold within a bounded number of steps. Motion never leaves the
//! configured bounds: an axis that reaches a bound stops there.

use kurbo::{Point, Rect, Vec2};

/// Simulates inertial scrolling of a 2D position after a fling.
#[derive(Clone, Debug)]
pub struct InertialScroller {
    position: Point,
    velocity: Vec2,
    bounds: Rect,
    friction: f64,
    epsilon: f64,
}

impl InertialScroller {
    /// Default velocity multiplier applied per step.
    pub const DEFAULT_FRICTION: f64 = 0.95;
    /// Default rest threshold.
    pub const DEFAULT_EPSILON: f64 = 0.01;

    /// Starts a fling at `position` with `velocity`, confined to `bounds`.
    ///
    /// The start position is clamped into `bounds`. Friction outside `(0, 1)`
    /// and non-positive epsilons fall back to the defaults; a non-finite
    /// velocity component is treated as zero.
    #[must_use]
    pub fn new(position: Point, velocity: Vec2, bounds: Rect, friction: f64, epsilon: f64) -> Self {
        let bounds = bounds.abs();
        let friction = if friction > 0.0 && friction < 1.0 {
            friction
        } else {
            Self::DEFAULT_FRICTION
        };
        let epsilon = if epsilon > 0.0 && epsilon.is_finite() {
            epsilon
        } else {
            Self::DEFAULT_EPSILON
        };
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let mut scroller = Self {
            position: Point::new(
                clamp_axis(position.x, bounds.x0, bounds.x1),
                clamp_axis(position.y, bounds.y0, bounds.y1),
            ),
            velocity: Vec2::new(finite(velocity.x), finite(velocity.y)),
            bounds,
            friction,
            epsilon,
        };
        scroller.settle_slow_axes();
        scroller.settle_axes_at_rest_on_bounds();
        scroller
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns the bounds the position is confined to.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns `true` once both axes are at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.velocity.x == 0.0 && self.velocity.y == 0.0
    }

    /// Stops the fling where it is.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Advances the simulation by `dt` and returns the new position.
    ///
    /// Friction is applied once per call. A zero, negative or non-finite `dt`
    /// leaves position and velocity untouched.
    pub fn step(&mut self, dt: f64) -> Point {
        if self.is_settled() || !(dt.is_finite() && dt > 0.0) {
            return self.position;
        }
        let (x, vx) = advance_axis(
            self.position.x,
            self.velocity.x,
            dt,
            self.bounds.x0,
            self.bounds.x1,
        );
        let (y, vy) = advance_axis(
            self.position.y,
            self.velocity.y,
            dt,
            self.bounds.y0,
            self.bounds.y1,
        );
        self.position = Point::new(x, y);
        self.velocity = Vec2::new(vx * self.friction, vy * self.friction);
        self.settle_slow_axes();
        self.position
    }

    /// Zeroes axes that already sit on the bound they are heading into.
    fn settle_axes_at_rest_on_bounds(&mut self) {
        let pushing =
            |p: f64, v: f64, lo: f64, hi: f64| (p <= lo && v < 0.0) || (p >= hi && v > 0.0);
        if pushing(self.position.x, self.velocity.x, self.bounds.x0, self.bounds.x1) {
            self.velocity.x = 0.0;
        }
        if pushing(self.position.y, self.velocity.y, self.bounds.y0, self.bounds.y1) {
            self.velocity.y = 0.0;
        }
    }

    fn settle_slow_axes(&mut self) {
        if self.velocity.x.abs() < self.epsilon {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < self.epsilon {
            self.velocity.y = 0.0;
        }
    }
}

fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Moves one axis, stopping it at a bound. Returns the new position and velocity.
fn advance_axis(position: f64, velocity: f64, dt: f64, lo: f64, hi: f64) -> (f64, f64) {
    if velocity == 0.0 {
        return (position, 0.0);
    }
    let next = position + velocity * dt;
    if next <= lo {
        (lo, 0.0)
    } else if next >= hi {
        (hi, 0.0)
    } else {
        (next, velocity)
    }
}
