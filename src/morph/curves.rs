//! The phase curve evaluator: pure progress -> style math.
//!
//! Every frame the controller feeds the current progress value plus an
//! immutable snapshot of geometry and config into [`evaluate`], which
//! returns the complete style for the morphing element. Position, size,
//! radius, opacity, and shadow are computed together from the same inputs,
//! so the channels can never desynchronize. Same inputs always produce the
//! same outputs; no hidden state.
//!
//! Opening and closing use different curve families:
//!
//! - opening: ease-out travel with an upward parabolic arc and a brief
//!   landing bounce in the final 30% of progress;
//! - closing: quadratic/cubic ease-in with a downward valley arc, optional
//!   size suction, and a directional overshoot window once progress dips
//!   below zero.

use crate::animation::Animatable;
use crate::morph::config::{MorphConfig, ShadowStyle};
use crate::morph::geometry::MorphGeometry;

/// Which curve family applies. Set at the start of each transition and
/// never changed mid-transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Opening,
    Closing,
}

/// Immutable per-frame snapshot consumed by the evaluator.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub progress: f32,
    pub direction: Direction,
    pub geometry: &'a MorphGeometry,
    pub config: &'a MorphConfig,
    /// Once the first full close has completed, the collapsed representation
    /// is already on screen, so the element stays opaque at progress 0.
    pub has_completed_close_once: bool,
}

/// Complete style for the morphing element at one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub opacity: f32,
    pub shadow: ShadowStyle,
}

/// The opening arc spans the first 70% of progress.
const OPEN_ARC_END: f32 = 0.7;
/// Opacity threshold below which the element hides behind the real control.
const OPEN_VISIBILITY_EPS: f32 = 0.001;
/// Fraction of the fixed-size close spent on the valley descent.
const VALLEY_DESCENT_SHARE: f32 = 0.75;

/// Evaluate the morph style at the snapshot's progress value.
pub fn evaluate(input: &FrameInput) -> FrameStyle {
    match input.direction {
        Direction::Opening => evaluate_opening(input),
        Direction::Closing => evaluate_closing(input),
    }
}

fn evaluate_opening(input: &FrameInput) -> FrameStyle {
    let config = input.config;
    let origin = input.geometry.origin;
    let target = input.geometry.target;
    let t = input.progress.clamp(0.0, 1.0);

    // Ease-out power curve for both travel and size, so size lands exactly
    // when the eased value reaches 1, independent of arc and bounce.
    let eased = 1.0 - (1.0 - t).powf(2.5);

    let x = f32::lerp(&origin.x, &target.x, eased);
    let mut y = f32::lerp(&origin.y, &target.y, eased);
    y += open_arc_offset(t, config.open_arc_height);
    y += piecewise_linear(
        &[
            (0.0, 0.0),
            (OPEN_ARC_END, 0.0),
            (0.85, config.open_bounce_height),
            (1.0, 0.0),
        ],
        t,
    );

    let width = f32::lerp(&origin.width, &target.width, eased);
    let height = f32::lerp(&origin.height, &target.height, eased);
    let radius = f32::lerp(&origin.radius, &target.radius, eased);

    // Invisible at the very start so the real control underneath shows,
    // except after the first completed close (the control is then hidden
    // already and a transparent frame would flash).
    let opacity = if t <= OPEN_VISIBILITY_EPS && !input.has_completed_close_once {
        0.0
    } else {
        1.0
    };

    let shadow = ShadowStyle::lerp(&config.shadow_resting, &config.shadow_elevated, eased);

    FrameStyle {
        x,
        y,
        width,
        height,
        radius,
        opacity,
        shadow,
    }
}

fn evaluate_closing(input: &FrameInput) -> FrameStyle {
    let config = input.config;
    let expanded = input.geometry.target;
    let dest = input.geometry.close_destination();

    // External progress runs 1 -> -overshoot -> 0; curves are written in
    // close-time, which runs 0 -> 1+overshoot -> 1.
    let close_t = 1.0 - input.progress;
    let directional = config.overshoot_angle.is_some();

    let ease_in_raw = close_t * close_t;
    // With a directional overshoot the displacement is handled separately,
    // so position clamps at the destination; without one the unclamped
    // polynomial provides the natural pull-past motion.
    let pos_ease = if directional {
        ease_in_raw.min(1.0)
    } else {
        ease_in_raw
    };
    // Cubic size easing under directional overshoot keeps size visibly
    // animating near the end instead of stopping early.
    let size_ease = if directional {
        (close_t * close_t * close_t).clamp(0.0, 1.0)
    } else {
        ease_in_raw.clamp(0.0, 1.0)
    };

    let mut x = f32::lerp(&expanded.x, &dest.x, pos_ease);
    let mut y = f32::lerp(&expanded.y, &dest.y, pos_ease);

    // Valley arc: downward parabola, zero at both ends. Under fixed-size
    // close the descent takes 75% of the close and the recovery 25%; the
    // segments meet at the parabola's zero-velocity peak, so the composite
    // offset is slope-continuous at the breakpoint.
    let arc_u = if config.close_fixed_size {
        valley_time_remap(close_t)
    } else {
        close_t.clamp(0.0, 1.0)
    };
    y += valley_arc_offset(arc_u, config.close_arc_height);

    let (mut width, mut height) = if config.close_fixed_size {
        (dest.width, dest.height)
    } else {
        (
            f32::lerp(&expanded.width, &dest.width, size_ease),
            f32::lerp(&expanded.height, &dest.height, size_ease),
        )
    };
    let radius = f32::lerp(&expanded.radius, &dest.radius, size_ease);

    // Size suction: a brief shrink-and-pop late in the close, only when
    // neither fixed-size nor directional overshoot shapes the size channel.
    if !config.close_fixed_size && !directional {
        let suction = piecewise_linear(
            &[(0.0, 1.0), (0.6, 1.0), (0.88, 0.93), (1.0, 1.0)],
            close_t.min(1.0),
        );
        width *= suction;
        height *= suction;
    }

    // Directional overshoot window: close_t exceeds 1.0 only while external
    // progress is negative (late phase A through the settle).
    if close_t > 1.0 {
        if let Some(angle_degrees) = config.overshoot_angle {
            let overshoot = config.close_overshoot.max(1e-6);
            let norm = ((close_t - 1.0) / overshoot).clamp(0.0, 1.0);
            let radians = angle_degrees.to_radians();
            let displacement = config.overshoot_magnitude * norm;
            // 0 degrees = up, clockwise positive.
            x += radians.sin() * displacement;
            y -= radians.cos() * displacement;

            if config.size_pop_active() {
                let pop = config.overshoot_size_pop.min(0.015) * norm;
                let dw = width * pop;
                let dh = height * pop;
                width += dw;
                height += dh;
                // Compensate so the pop expands from the element's center.
                x -= dw / 2.0;
                y -= dh / 2.0;
            }
        }
    }

    let mut shadow = ShadowStyle::lerp(&config.shadow_elevated, &config.shadow_resting, size_ease);
    if config.shadow_fade {
        // Dip to nothing mid-close, back to resting by completion.
        let dip = piecewise_linear(&[(0.0, 1.0), (0.5, 0.0), (1.0, 1.0)], close_t.min(1.0));
        shadow.alpha *= dip;
        shadow.elevation *= dip;
    }

    FrameStyle {
        x,
        y,
        width,
        height,
        radius,
        opacity: 1.0,
        shadow,
    }
}

/// Upward parabolic arc offset for the opening travel.
///
/// Parabola `coeff * tc * (tc - END)` over `tc in [0, END]`, with `coeff`
/// solved so the minimum at `tc = END/2` equals `-peak` (negative = up).
/// Zero at both ends, frozen past `END`.
fn open_arc_offset(t: f32, peak: f32) -> f32 {
    let tc = t.clamp(0.0, OPEN_ARC_END);
    let coeff = 4.0 * peak / (OPEN_ARC_END * OPEN_ARC_END);
    coeff * tc * (tc - OPEN_ARC_END)
}

/// Downward valley arc offset, zero at `u = 0` and `u = 1`, peak `height`
/// at `u = 0.5`.
fn valley_arc_offset(u: f32, height: f32) -> f32 {
    let u = u.clamp(0.0, 1.0);
    4.0 * height * u * (1.0 - u)
}

/// Asymmetric close-time remap for fixed-size closes: 75% of the duration
/// covers the descent half of the valley, 25% the recovery half.
fn valley_time_remap(close_t: f32) -> f32 {
    let s = close_t.clamp(0.0, 1.0);
    if s <= VALLEY_DESCENT_SHARE {
        s / VALLEY_DESCENT_SHARE * 0.5
    } else {
        0.5 + (s - VALLEY_DESCENT_SHARE) / (1.0 - VALLEY_DESCENT_SHARE) * 0.5
    }
}

/// Piecewise-linear interpolation over sorted `(x, y)` control points,
/// clamped to the first/last point outside the domain.
fn piecewise_linear(points: &[(f32, f32)], x: f32) -> f32 {
    debug_assert!(points.len() >= 2);
    if x <= points[0].0 {
        return points[0].1;
    }
    if let Some(last) = points.last() {
        if x >= last.0 {
            return last.1;
        }
    }
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / span;
        }
    }
    points[points.len() - 1].1
}
