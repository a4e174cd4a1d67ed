// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit-to-width layout and measurement.

use kurbo::{Size, Vec2};

use crate::viewport::ViewportState;

/// How a layout pass constrains one axis of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MeasureMode {
    /// The viewport must be exactly the available extent.
    Exact,
    /// The viewport may be at most the available extent.
    #[default]
    AtMost,
    /// The viewport may take whatever extent it likes.
    Unconstrained,
}

/// Constraints handed down by the surrounding layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstraints {
    /// Available extent per axis. Ignored on an [`MeasureMode::Unconstrained`] axis.
    pub available: Size,
    /// Mode of the horizontal axis.
    pub width_mode: MeasureMode,
    /// Mode of the vertical axis.
    pub height_mode: MeasureMode,
}

impl LayoutConstraints {
    /// Creates constraints with explicit modes.
    #[must_use]
    pub fn new(available: Size, width_mode: MeasureMode, height_mode: MeasureMode) -> Self {
        Self {
            available,
            width_mode,
            height_mode,
        }
    }

    /// Both axes fixed at `size`.
    #[must_use]
    pub fn exact(size: Size) -> Self {
        Self::new(size, MeasureMode::Exact, MeasureMode::Exact)
    }

    /// Both axes bounded by `size`.
    #[must_use]
    pub fn at_most(size: Size) -> Self {
        Self::new(size, MeasureMode::AtMost, MeasureMode::AtMost)
    }

    /// Neither axis constrained.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::new(Size::ZERO, MeasureMode::Unconstrained, MeasureMode::Unconstrained)
    }

    fn sanitized(self) -> Self {
        let axis = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            available: Size::new(axis(self.available.width), axis(self.available.height)),
            ..self
        }
    }
}

/// Computes the scale that fits `content` to the available width.
///
/// An unconstrained width keeps the intrinsic size (scale `1`). Degenerate
/// inputs (empty content, zero available width) also yield `1`.
#[must_use]
pub fn fit_scale(content: Size, constraints: &LayoutConstraints) -> f64 {
    if constraints.width_mode == MeasureMode::Unconstrained {
        return 1.0;
    }
    let scale = constraints.available.width / content.width;
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Derives the fitted scale, scale limits and viewport size from layout
/// constraints, at most once per constraint change.
///
/// Once the user has set a scale, constraint changes only resize the
/// viewport; they never re-derive the scale, which would silently reset the
/// user's zoom.
#[derive(Clone, Debug)]
pub struct LayoutAdapter {
    max_scale_multiplier: f64,
    fitted_for: Option<LayoutConstraints>,
}

impl LayoutAdapter {
    /// Creates an adapter; `max_scale = min_scale * max_scale_multiplier`.
    ///
    /// The multiplier is raised to at least `1`.
    #[must_use]
    pub fn new(max_scale_multiplier: f64) -> Self {
        let max_scale_multiplier = if max_scale_multiplier.is_finite() {
            max_scale_multiplier.max(1.0)
        } else {
            1.0
        };
        Self {
            max_scale_multiplier,
            fitted_for: None,
        }
    }

    /// Returns the multiplier applied over the fitted scale.
    #[must_use]
    pub fn max_scale_multiplier(&self) -> f64 {
        self.max_scale_multiplier
    }

    /// Returns `true` until the first layout pass has been applied.
    #[must_use]
    pub fn needs_fit(&self) -> bool {
        self.fitted_for.is_none()
    }

    /// Forgets the current fit so that the next layout pass refits.
    ///
    /// Used when the content is replaced.
    pub fn reset(&mut self) {
        self.fitted_for = None;
    }

    /// Applies a layout pass to `state`.
    ///
    /// Returns `true` if the scale was (re)fitted. Repeated passes with
    /// unchanged constraints do nothing.
    pub fn apply(
        &mut self,
        constraints: LayoutConstraints,
        state: &mut ViewportState,
        user_scaled: bool,
    ) -> bool {
        let constraints = constraints.sanitized();
        if self.fitted_for == Some(constraints) {
            return false;
        }
        let content = state.content_size();
        let empty = content.is_zero_area();
        let fit = if empty {
            1.0
        } else {
            fit_scale(content, &constraints)
        };
        let viewport = Size::new(
            viewport_extent(constraints.width_mode, constraints.available.width, content.width * fit),
            viewport_extent(
                constraints.height_mode,
                constraints.available.height,
                content.height * fit,
            ),
        );

        let refit = self.fitted_for.is_none() || !user_scaled;
        self.fitted_for = Some(constraints);
        state.set_viewport_size(viewport);
        if refit {
            let max_scale = if empty {
                fit
            } else {
                fit * self.max_scale_multiplier
            };
            state.set_scale_limits(fit, max_scale);
            state.set_transform(fit, Vec2::ZERO);
            log::trace!("fitted scale {fit} for viewport {viewport:?}");
        } else {
            log::trace!("resized viewport to {viewport:?}, keeping user scale");
        }
        refit
    }

    /// Returns the size the viewport wants for `constraints` at the current scale.
    #[must_use]
    pub fn measured_size(constraints: &LayoutConstraints, state: &ViewportState) -> Size {
        let constraints = constraints.sanitized();
        let desired = state.content_size() * state.scale();
        Size::new(
            measure_axis(constraints.width_mode, constraints.available.width, desired.width),
            measure_axis(
                constraints.height_mode,
                constraints.available.height,
                desired.height,
            ),
        )
    }
}

fn viewport_extent(mode: MeasureMode, available: f64, natural: f64) -> f64 {
    match mode {
        MeasureMode::Exact | MeasureMode::AtMost => available,
        MeasureMode::Unconstrained => natural,
    }
}

fn measure_axis(mode: MeasureMode, available: f64, desired: f64) -> f64 {
    match mode {
        MeasureMode::Exact => available,
        MeasureMode::AtMost => desired.min(available),
        MeasureMode::Unconstrained => desired,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{LayoutAdapter, LayoutConstraints, MeasureMode, fit_scale};
    use crate::viewport::ViewportState;

    fn state() -> ViewportState {
        ViewportState::new(Size::new(1000.0, 2000.0), Size::ZERO)
    }

    #[test]
    fn first_layout_fits_width() {
        let mut vp = state();
        let mut layout = LayoutAdapter::new(2.5);
        assert!(layout.needs_fit());
        let refit = layout.apply(LayoutConstraints::at_most(Size::new(500.0, 500.0)), &mut vp, false);
        assert!(refit);
        assert_eq!(vp.min_scale(), 0.5);
        assert_eq!(vp.max_scale(), 1.25);
        assert_eq!(vp.scale(), 0.5);
        assert_eq!(vp.viewport_size(), Size::new(500.0, 500.0));
    }

    #[test]
    fn repeated_layout_is_a_no_op() {
        let mut vp = state();
        let mut layout = LayoutAdapter::new(2.5);
        let c = LayoutConstraints::at_most(Size::new(500.0, 500.0));
        layout.apply(c, &mut vp, false);
        vp.set_transform(1.0, Vec2::new(100.0, 100.0));
        assert!(!layout.apply(c, &mut vp, true));
        assert!(!layout.apply(c, &mut vp, false));
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.translate(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn constraint_change_keeps_user_zoom() {
        let mut vp = state();
        let mut layout = LayoutAdapter::new(2.5);
        layout.apply(LayoutConstraints::at_most(Size::new(500.0, 500.0)), &mut vp, false);
        vp.set_scale(1.0);
        let refit = layout.apply(LayoutConstraints::at_most(Size::new(400.0, 600.0)), &mut vp, true);
        assert!(!refit);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.min_scale(), 0.5);
        assert_eq!(vp.viewport_size(), Size::new(400.0, 600.0));
    }

    #[test]
    fn constraint_change_refits_without_user_zoom() {
        let mut vp = state();
        let mut layout = LayoutAdapter::new(2.0);
        layout.apply(LayoutConstraints::at_most(Size::new(500.0, 500.0)), &mut vp, false);
        let refit = layout.apply(LayoutConstraints::at_most(Size::new(250.0, 500.0)), &mut vp, false);
        assert!(refit);
        assert_eq!(vp.scale(), 0.25);
        assert_eq!(vp.max_scale(), 0.5);
    }

    #[test]
    fn reset_forces_refit() {
        let mut vp = state();
        let mut layout = LayoutAdapter::new(2.5);
        let c = LayoutConstraints::at_most(Size::new(500.0, 500.0));
        layout.apply(c, &mut vp, false);
        vp.set_scale(1.0);
        layout.reset();
        assert!(layout.apply(c, &mut vp, true));
        assert_eq!(vp.scale(), 0.5);
    }

    #[test]
    fn measured_size_honors_modes() {
        let mut vp = ViewportState::new(Size::new(1000.0, 400.0), Size::ZERO);
        let mut layout = LayoutAdapter::new(2.5);
        let c = LayoutConstraints::at_most(Size::new(500.0, 500.0));
        layout.apply(c, &mut vp, false);

        // Scaled content is 500x200; the height shrinks to fit.
        assert_eq!(LayoutAdapter::measured_size(&c, &vp), Size::new(500.0, 200.0));

        let exact = LayoutConstraints::exact(Size::new(500.0, 500.0));
        assert_eq!(LayoutAdapter::measured_size(&exact, &vp), Size::new(500.0, 500.0));

        let free = LayoutConstraints::new(
            Size::new(500.0, 0.0),
            MeasureMode::AtMost,
            MeasureMode::Unconstrained,
        );
        vp.set_scale(1.0);
        assert_eq!(LayoutAdapter::measured_size(&free, &vp), Size::new(500.0, 400.0));
    }

    #[test]
    fn unconstrained_width_keeps_intrinsic_scale() {
        let c = LayoutConstraints::unconstrained();
        assert_eq!(fit_scale(Size::new(1000.0, 2000.0), &c), 1.0);

        let mut vp = state();
        let mut layout = LayoutAdapter::new(2.5);
        layout.apply(c, &mut vp, false);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.viewport_size(), Size::new(1000.0, 2000.0));
        assert_eq!(vp.max_translate(), Vec2::ZERO);
    }

    #[test]
    fn degenerate_content_and_multiplier_are_corrected() {
        let mut vp = ViewportState::new(Size::ZERO, Size::ZERO);
        let mut layout = LayoutAdapter::new(-3.0);
        assert_eq!(layout.max_scale_multiplier(), 1.0);
        layout.apply(LayoutConstraints::exact(Size::new(500.0, 500.0)), &mut vp, false);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.min_scale(), 1.0);
        assert_eq!(vp.max_scale(), 1.0);
        assert_eq!(vp.max_translate(), Vec2::ZERO);
    }

    #[test]
    fn empty_content_pins_scale_with_default_multiplier() {
        let mut vp = ViewportState::new(Size::ZERO, Size::ZERO);
        let mut layout = LayoutAdapter::new(2.5);
        layout.apply(LayoutConstraints::at_most(Size::new(400.0, 400.0)), &mut vp, false);
        assert_eq!(vp.min_scale(), 1.0);
        assert_eq!(vp.max_scale(), 1.0);
        assert_eq!(vp.scale(), 1.0);
    }
}
