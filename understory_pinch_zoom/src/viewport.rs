// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::clamp::{clamp_pan_delta, clamp_scale, clamp_translate, max_translate};

/// Read-only snapshot of the transform mapping content space into viewport space.
///
/// A content point `p` is drawn at `p * scale - translate` in the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Scroll offset in viewport pixels; never negative.
    pub translate: Vec2,
}

impl ViewTransform {
    /// Returns the content → viewport transform as an [`Affine`].
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(-self.translate) * Affine::scale(self.scale)
    }
}

/// The authoritative scale and scroll offset of a content surface in a viewport.
///
/// `ViewportState` keeps the following invariants after every mutation:
/// - `min_scale <= scale <= max_scale`
/// - `0 <= translate.x <= max(0, content.width * scale - viewport.width)`, and
///   likewise for `y`.
///
/// Translation is a scroll offset: positive values move the content up and to
/// the left.
#[derive(Clone, Debug)]
pub struct ViewportState {
    scale: f64,
    translate: Vec2,
    min_scale: f64,
    max_scale: f64,
    content_size: Size,
    viewport_size: Size,
}

impl ViewportState {
    /// Creates a state at scale `1.0` with no translation and scale limits `[1, 1]`.
    ///
    /// Sizes with negative or non-finite components are treated as empty.
    #[must_use]
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
            min_scale: 1.0,
            max_scale: 1.0,
            content_size: sanitize_size(content_size),
            viewport_size: sanitize_size(viewport_size),
        }
    }

    /// Returns the current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Returns the minimum scale factor.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum scale factor.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Returns the intrinsic content size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Returns a snapshot of the current transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.scale,
            translate: self.translate,
        }
    }

    /// Returns the largest legal translation at the current scale.
    #[must_use]
    pub fn max_translate(&self) -> Vec2 {
        max_translate(self.scale, self.content_size, self.viewport_size)
    }

    /// Returns `true` if the scale sits on `min_scale`, within `epsilon`.
    #[must_use]
    pub fn is_at_min_scale(&self, epsilon: f64) -> bool {
        (self.scale - self.min_scale).abs() <= epsilon
    }

    /// Sets the minimum and maximum scale factors.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`. The
    /// current scale and translation are clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Sets the content size and re-clamps the translation.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = sanitize_size(size);
        self.clamp_to_bounds();
    }

    /// Sets the viewport size and re-clamps the translation.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = sanitize_size(size);
        self.clamp_to_bounds();
    }

    /// Sets the scale factor, clamping it into the configured range.
    ///
    /// The translation is re-clamped for the new scale. A NaN scale is ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = clamp_scale(scale, self.min_scale, self.max_scale);
        self.clamp_to_bounds();
    }

    /// Sets the scroll offset, clamping it into bounds for the current scale.
    pub fn set_translate(&mut self, translate: Vec2) {
        self.translate = clamp_translate(
            translate,
            self.scale,
            self.content_size,
            self.viewport_size,
        );
    }

    /// Sets scale and translation together; the translation is clamped for
    /// the new scale.
    pub fn set_transform(&mut self, scale: f64, translate: Vec2) {
        if !scale.is_nan() {
            self.scale = clamp_scale(scale, self.min_scale, self.max_scale);
        }
        self.set_translate(translate);
    }

    /// Pans by a scroll delta, returning the delta actually applied.
    ///
    /// Each axis is limited to the remaining room before the nearest edge.
    pub fn pan_by(&mut self, delta: Vec2) -> Vec2 {
        let applied = clamp_pan_delta(
            delta,
            self.translate,
            self.scale,
            self.content_size,
            self.viewport_size,
        );
        self.translate += applied;
        applied
    }

    /// Converts a viewport-space point into content space.
    #[must_use]
    pub fn viewport_to_content_point(&self, pt: Point) -> Point {
        ((pt.to_vec2() + self.translate) / self.scale).to_point()
    }

    /// Converts a content-space point into viewport space.
    #[must_use]
    pub fn content_to_viewport_point(&self, pt: Point) -> Point {
        (pt.to_vec2() * self.scale - self.translate).to_point()
    }

    /// Returns the content-space rectangle currently visible in the viewport.
    ///
    /// The result is limited to the content bounds.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        let origin = self.viewport_to_content_point(Point::ORIGIN);
        let corner = self.viewport_to_content_point(self.viewport_size.to_vec2().to_point());
        Rect::from_points(origin, corner).intersect(self.content_size.to_rect())
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            scale: self.scale,
            translate: self.translate,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            content_size: self.content_size,
            viewport_size: self.viewport_size,
            max_translate: self.max_translate(),
            visible_content_rect: self.visible_content_rect(),
        }
    }

    fn clamp_to_bounds(&mut self) {
        self.set_translate(self.translate);
    }
}

fn sanitize_size(size: Size) -> Size {
    let axis = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    Size::new(axis(size.width), axis(size.height))
}

/// Debug snapshot of a [`ViewportState`].
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current scale factor.
    pub scale: f64,
    /// Current scroll offset.
    pub translate: Vec2,
    /// Minimum scale factor.
    pub min_scale: f64,
    /// Maximum scale factor.
    pub max_scale: f64,
    /// Intrinsic content size.
    pub content_size: Size,
    /// Viewport size.
    pub viewport_size: Size,
    /// Largest legal translation at the current scale.
    pub max_translate: Vec2,
    /// Content-space rectangle currently visible.
    pub visible_content_rect: Rect,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::ViewportState;

    fn state() -> ViewportState {
        let mut vp = ViewportState::new(Size::new(1000.0, 2000.0), Size::new(500.0, 500.0));
        vp.set_scale_limits(0.5, 2.0);
        vp
    }

    #[test]
    fn new_state_is_identity_with_unit_limits() {
        let vp = ViewportState::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0));
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.translate(), Vec2::ZERO);
        assert_eq!(vp.min_scale(), 1.0);
        assert_eq!(vp.max_scale(), 1.0);
    }

    #[test]
    fn scale_limits_are_normalized() {
        let mut vp = state();
        vp.set_scale_limits(3.0, 0.25);
        assert_eq!(vp.min_scale(), 0.25);
        assert_eq!(vp.max_scale(), 3.0);
    }

    #[test]
    fn set_scale_clamps_and_reclamps_translate() {
        let mut vp = state();
        vp.set_scale(2.0);
        vp.set_translate(Vec2::new(1500.0, 3500.0));
        assert_eq!(vp.translate(), Vec2::new(1500.0, 3500.0));

        vp.set_scale(10.0);
        assert_eq!(vp.scale(), 2.0);

        // Shrinking leaves less room to scroll.
        vp.set_scale(0.5);
        assert_eq!(vp.translate(), Vec2::new(0.0, 500.0));

        vp.set_scale(f64::NAN);
        assert_eq!(vp.scale(), 0.5);
    }

    #[test]
    fn pan_by_reports_applied_delta() {
        let mut vp = state();
        vp.set_scale(1.0);
        let applied = vp.pan_by(Vec2::new(600.0, -10.0));
        assert_eq!(applied, Vec2::new(500.0, 0.0));
        assert_eq!(vp.translate(), Vec2::new(500.0, 0.0));
    }

    #[test]
    fn point_conversion_roundtrip() {
        let mut vp = state();
        vp.set_transform(1.5, Vec2::new(120.0, 340.0));
        let content = Point::new(321.0, 654.0);
        let view = vp.content_to_viewport_point(content);
        let back = vp.viewport_to_content_point(view);
        assert!((back.x - content.x).abs() < 1e-9);
        assert!((back.y - content.y).abs() < 1e-9);
    }

    #[test]
    fn affine_matches_point_conversion() {
        let mut vp = state();
        vp.set_transform(1.25, Vec2::new(80.0, 200.0));
        let content = Point::new(400.0, 900.0);
        let via_affine = vp.transform().to_affine() * content;
        let direct = vp.content_to_viewport_point(content);
        assert!((via_affine.x - direct.x).abs() < 1e-9);
        assert!((via_affine.y - direct.y).abs() < 1e-9);
    }

    #[test]
    fn visible_rect_is_limited_to_content() {
        let vp = state();
        // Scale 1 after limits: a 500x500 window at the origin.
        assert_eq!(vp.visible_content_rect(), Rect::new(0.0, 0.0, 500.0, 500.0));

        let mut vp = state();
        vp.set_scale(0.5);
        let visible = vp.visible_content_rect();
        assert_eq!(visible, Rect::new(0.0, 0.0, 1000.0, 1000.0));
    }

    #[test]
    fn degenerate_sizes_have_no_slack() {
        let mut vp = ViewportState::new(Size::new(-5.0, f64::NAN), Size::new(100.0, 100.0));
        assert_eq!(vp.content_size(), Size::ZERO);
        vp.set_translate(Vec2::new(50.0, 50.0));
        assert_eq!(vp.translate(), Vec2::ZERO);
        let info = vp.debug_info();
        assert_eq!(info.max_translate, Vec2::ZERO);
    }
}
