//! Morph configuration: curve tuning, dimensions, and mode flags.
//!
//! All fields are optional with defaults and set through chained builder
//! methods. Configuration is read-only during an in-flight transition; the
//! controller snapshots what it needs when a transition starts, so changes
//! only take effect on the next open/close.

use crate::animation::{Animatable, SpringConfig, TimingFunction};
use crate::morph::geometry::Rect;

/// Visual treatment of the full-screen backdrop behind the expanded surface.
///
/// Rendering is external; the core only drives the backdrop's opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropStyle {
    /// Blurred backdrop
    Blur,
    /// Dimmed backdrop
    Dark,
    /// No backdrop
    None,
}

/// Shadow parameters for one end of the morph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    /// Shadow offset in logical pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in logical pixels
    pub blur: f32,
    /// Shadow opacity (0.0 to 1.0)
    pub alpha: f32,
    /// Platform elevation hint
    pub elevation: f32,
}

impl ShadowStyle {
    /// Resting shadow for the collapsed control.
    pub fn resting() -> Self {
        Self {
            offset: (0.0, 2.0),
            blur: 8.0,
            alpha: 0.12,
            elevation: 2.0,
        }
    }

    /// Elevated shadow for the expanded surface.
    pub fn elevated() -> Self {
        Self {
            offset: (0.0, 12.0),
            blur: 32.0,
            alpha: 0.28,
            elevation: 16.0,
        }
    }
}

impl Animatable for ShadowStyle {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            offset: (
                f32::lerp(&from.offset.0, &to.offset.0, t),
                f32::lerp(&from.offset.1, &to.offset.1, t),
            ),
            blur: f32::lerp(&from.blur, &to.blur, t),
            alpha: f32::lerp(&from.alpha, &to.alpha, t),
            elevation: f32::lerp(&from.elevation, &to.elevation, t),
        }
    }
}

/// Immutable curve and geometry tuning for one morph controller.
#[derive(Debug, Clone)]
pub struct MorphConfig {
    /// Explicit expanded bounds; screen-derived when `None`.
    pub expanded: Option<Rect>,
    /// Horizontal/bottom margin for the screen-derived expanded rect.
    pub expanded_margin: f32,
    /// Top edge of the screen-derived expanded rect.
    pub expanded_top: f32,
    /// Corner radius of the screen-derived expanded rect.
    pub expanded_radius: f32,

    pub backdrop: BackdropStyle,

    /// Open transition duration in seconds.
    pub open_duration: f32,
    pub open_timing: TimingFunction,
    /// Peak height of the upward opening arc, in pixels.
    pub open_arc_height: f32,
    /// Depth of the landing bounce dip, in pixels.
    pub open_bounce_height: f32,

    /// Close phase-A (ease-out) duration in seconds.
    pub close_duration: f32,
    /// Progress overshoot below zero at the phase A/B handoff.
    pub close_overshoot: f32,
    /// Peak depth of the downward valley arc during close, in pixels.
    pub close_arc_height: f32,
    /// Hold width/height at the collapse destination's dimensions for the
    /// whole close; only position and radius animate.
    pub close_fixed_size: bool,
    /// Dip the shadow to zero mid-close instead of fading monotonically,
    /// for when the element passes over sibling UI.
    pub shadow_fade: bool,

    /// Compass direction of the close overshoot displacement, in degrees
    /// (0 = up, clockwise positive). `None` leaves the natural polynomial
    /// pull-past as the only overshoot motion.
    pub overshoot_angle: Option<f32>,
    /// Peak overshoot displacement in pixels.
    pub overshoot_magnitude: f32,
    /// Peak size pop during directional overshoot, as a fraction (<= 0.015).
    /// Suppressed by `close_fixed_size`.
    pub overshoot_size_pop: f32,

    /// Alternate collapse destination (see `MorphGeometry::close_target`).
    pub close_target: Option<Rect>,

    pub shadow_resting: ShadowStyle,
    pub shadow_elevated: ShadowStyle,

    /// Delay between close completion and the cleanup callback, in seconds.
    pub cleanup_delay: f32,
    /// Spring used for the close settle (phase B).
    pub settle_spring: SpringConfig,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            expanded: None,
            expanded_margin: 16.0,
            expanded_top: 108.0,
            expanded_radius: 24.0,
            backdrop: BackdropStyle::Blur,
            open_duration: 1.0,
            open_timing: TimingFunction::OPEN_EASE,
            open_arc_height: 70.0,
            open_bounce_height: 14.0,
            close_duration: 0.55,
            close_overshoot: 0.04,
            close_arc_height: 35.0,
            close_fixed_size: false,
            shadow_fade: false,
            overshoot_angle: None,
            overshoot_magnitude: 6.0,
            overshoot_size_pop: 0.015,
            close_target: None,
            shadow_resting: ShadowStyle::resting(),
            shadow_elevated: ShadowStyle::elevated(),
            cleanup_delay: 0.05,
            settle_spring: SpringConfig::SETTLE,
        }
    }
}

impl MorphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set explicit expanded bounds.
    pub fn expanded(mut self, rect: Rect) -> Self {
        self.expanded = Some(rect);
        self
    }

    pub fn backdrop(mut self, style: BackdropStyle) -> Self {
        self.backdrop = style;
        self
    }

    pub fn open_duration(mut self, seconds: f32) -> Self {
        self.open_duration = seconds;
        self
    }

    pub fn open_timing(mut self, timing: TimingFunction) -> Self {
        self.open_timing = timing;
        self
    }

    pub fn close_duration(mut self, seconds: f32) -> Self {
        self.close_duration = seconds;
        self
    }

    pub fn close_arc_height(mut self, pixels: f32) -> Self {
        self.close_arc_height = pixels;
        self
    }

    pub fn close_fixed_size(mut self, fixed: bool) -> Self {
        self.close_fixed_size = fixed;
        self
    }

    pub fn shadow_fade(mut self, fade: bool) -> Self {
        self.shadow_fade = fade;
        self
    }

    /// Configure the directional overshoot: compass angle in degrees
    /// (0 = up, clockwise positive) and peak displacement in pixels.
    pub fn overshoot(mut self, angle_degrees: f32, magnitude: f32) -> Self {
        self.overshoot_angle = Some(angle_degrees);
        self.overshoot_magnitude = magnitude;
        self
    }

    pub fn close_target(mut self, rect: Rect) -> Self {
        self.close_target = Some(rect);
        self
    }

    pub fn cleanup_delay(mut self, seconds: f32) -> Self {
        self.cleanup_delay = seconds;
        self
    }

    /// True when the overshoot size pop applies: a directional overshoot is
    /// configured and fixed-size close is not. Fixed-size takes priority
    /// over the pop; the overshoot position displacement still applies.
    pub fn size_pop_active(&self) -> bool {
        self.overshoot_angle.is_some() && !self.close_fixed_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_lerp_midpoint() {
        let mid = ShadowStyle::lerp(&ShadowStyle::resting(), &ShadowStyle::elevated(), 0.5);
        assert_eq!(mid.offset.1, 7.0);
        assert_eq!(mid.blur, 20.0);
        assert_eq!(mid.alpha, 0.2);
        assert_eq!(mid.elevation, 9.0);
    }

    #[test]
    fn test_fixed_size_suppresses_size_pop() {
        let config = MorphConfig::new().overshoot(0.0, 6.0).close_fixed_size(true);
        assert!(!config.size_pop_active());

        let config = MorphConfig::new().overshoot(0.0, 6.0);
        assert!(config.size_pop_active());
    }
}
