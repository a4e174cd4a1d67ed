// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pinch_zoom --heading-base-level=0

//! Understory Pinch Zoom: a headless pan/zoom engine for a fixed-size content surface.
//!
//! This crate turns gesture primitives (pan deltas, pinch factors with a focal
//! point, fling velocities, double taps) into a scale + scroll-offset transform
//! that always stays within legal bounds, and animates that transform over
//! time (inertial flings, double-tap zoom). It focuses on:
//! - Viewport state with clamped scale and translation ([`ViewportState`]).
//! - Stateless bounds clamping ([`clamp_scale`], [`clamp_translate`]).
//! - Fit-to-width layout and measurement ([`LayoutAdapter`]).
//! - Fling deceleration ([`InertialScroller`]) and zoom interpolation
//!   ([`ZoomAnimator`]).
//! - A gesture state machine tying it together ([`GestureCoordinator`]).
//!
//! It does **not** decode images, recognize gestures from raw pointer events,
//! or draw anything. Callers are expected to:
//! - Feed layout constraints into [`GestureCoordinator::measured_size`] and
//!   apply the returned size to their widget.
//! - Forward recognized gestures (for example from a platform gesture detector)
//!   to the `on_*` methods in viewport coordinates.
//! - Call [`GestureCoordinator::tick`] once per frame and redraw with
//!   [`ViewTransform::to_affine`] when it reports a change.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_pinch_zoom::{GestureCoordinator, GesturePhase, LayoutConstraints, ZoomConfig};
//!
//! // A 1000x2000 image in a 500x500 window.
//! let mut view = GestureCoordinator::new(Size::new(1000.0, 2000.0), ZoomConfig::default());
//! let size = view.measured_size(LayoutConstraints::at_most(Size::new(500.0, 500.0)));
//! assert_eq!(size, Size::new(500.0, 500.0));
//!
//! // Fitted to width: scale 0.5, maximum 0.5 * 2.5.
//! assert_eq!(view.viewport().min_scale(), 0.5);
//! assert_eq!(view.viewport().max_scale(), 1.25);
//!
//! // Drag, then flick upwards.
//! view.on_down();
//! view.on_pan_delta(Vec2::new(0.0, 40.0));
//! view.on_fling_start(Vec2::new(0.0, -1.5));
//! while view.tick(16.0) {}
//! assert_eq!(view.phase(), GesturePhase::Idle);
//!
//! // Pinch around the window center.
//! let focal = Point::new(250.0, 250.0);
//! view.on_pinch_begin(focal);
//! view.on_pinch_update(2.0, focal);
//! view.on_pinch_end();
//! assert_eq!(view.current_transform().scale, 1.0);
//!
//! // Render with the content → viewport transform.
//! let _affine = view.current_transform().to_affine();
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform; rotation and overscroll bounce are intentionally absent.
//! - Time is an abstract tick unit (milliseconds by convention); fling
//!   velocities are in viewport pixels per tick unit.
//! - Malformed input (NaN factors, out-of-order gesture callbacks) is ignored
//!   silently and logged at `debug` level through the `log` facade.
//!
//! This crate is `no_std`.

#![no_std]

mod animation;
mod clamp;
mod config;
mod gesture;
mod inertia;
mod layout;
mod viewport;

pub use animation::{Easing, ZoomAnimator};
pub use clamp::{clamp_pan_delta, clamp_scale, clamp_translate, max_translate};
pub use config::ZoomConfig;
pub use gesture::{GestureCoordinator, GestureDebugInfo, GesturePhase, PinchSession};
pub use inertia::InertialScroller;
pub use layout::{LayoutAdapter, LayoutConstraints, MeasureMode, fit_scale};
pub use viewport::{ViewTransform, ViewportDebugInfo, ViewportState};
