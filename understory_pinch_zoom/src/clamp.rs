// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateless bounds clamping for scale and translation.
//!
//! Every function here is idempotent and never panics, even for inverted
//! ranges or NaN inputs. Callers apply the returned values themselves.

use kurbo::{Size, Vec2};

/// Clamps `value` into `[lo, hi]` without panicking.
///
/// Unlike [`f64::clamp`], an inverted range resolves to `hi` and a NaN
/// `value` resolves to `lo` (then bounded by `hi`).
#[inline]
fn clamp_range(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Clamps a scale factor into `[min_scale, max_scale]`.
///
/// A NaN scale resolves to `min_scale`.
#[must_use]
pub fn clamp_scale(scale: f64, min_scale: f64, max_scale: f64) -> f64 {
    clamp_range(scale, min_scale, max_scale)
}

/// Returns the largest legal translation on each axis for `scale`.
///
/// This is `max(0, content * scale - viewport)` per axis: when the scaled
/// content fits inside the viewport on an axis there is no slack to scroll.
#[must_use]
pub fn max_translate(scale: f64, content: Size, viewport: Size) -> Vec2 {
    Vec2::new(
        slack(content.width * scale, viewport.width),
        slack(content.height * scale, viewport.height),
    )
}

fn slack(scaled_content: f64, viewport: f64) -> f64 {
    let extra = scaled_content - viewport;
    // NaN and negative slack both collapse to zero.
    if extra > 0.0 { extra } else { 0.0 }
}

/// Clamps a translation into `[0, max_translate(scale, ..)]` on each axis.
///
/// A NaN component resolves to `0`.
#[must_use]
pub fn clamp_translate(translate: Vec2, scale: f64, content: Size, viewport: Size) -> Vec2 {
    let max = max_translate(scale, content, viewport);
    Vec2::new(
        clamp_range(translate.x, 0.0, max.x),
        clamp_range(translate.y, 0.0, max.y),
    )
}

/// Clamps a pan delta so that `translate + delta` stays within bounds.
///
/// A delta pointing past an edge that `translate` already sits on becomes
/// zero on that axis, so panning against an edge never produces a jump. A
/// NaN component is dropped.
#[must_use]
pub fn clamp_pan_delta(
    delta: Vec2,
    translate: Vec2,
    scale: f64,
    content: Size,
    viewport: Size,
) -> Vec2 {
    let max = max_translate(scale, content, viewport);
    let axis = |d: f64, t: f64, m: f64| {
        if d.is_nan() {
            return 0.0;
        }
        clamp_range(d, -t, m - t)
    };
    Vec2::new(
        axis(delta.x, translate.x, max.x),
        axis(delta.y, translate.y, max.y),
    )
}
