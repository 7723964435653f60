//! Cross-fade coordination between the collapsed and expanded content.
//!
//! The morphing element carries two content layers. The coordinator maps
//! progress to their opacities so that exactly one layer reads as primary at
//! any progress value, except inside a deliberately designed overlap band
//! where both may be partially visible. The overlap exists to avoid a frame
//! where neither content shows.

use crate::morph::curves::Direction;

/// Per-frame opacities for the two content layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentOpacity {
    pub collapsed: f32,
    /// Scale pulse applied to the collapsed content while it fades out.
    pub collapsed_scale: f32,
    pub expanded: f32,
}

/// Maps progress to content-layer opacities. Thresholds are tunable but the
/// defaults encode the designed fade windows.
#[derive(Debug, Clone)]
pub struct CrossfadeCoordinator {
    /// Opening: collapsed content fades out over [0, this].
    pub open_collapsed_out: f32,
    /// Scale the collapsed content shrinks to while fading out.
    pub collapsed_scale_min: f32,
    /// Opening: expanded content fades in over this progress window.
    pub open_expanded_in: (f32, f32),
    /// Closing: expanded content opacity follows progress over this window.
    pub close_expanded_out: (f32, f32),
    /// Closing: collapsed content snaps visible below this progress.
    pub close_collapsed_snap: f32,
}

impl Default for CrossfadeCoordinator {
    fn default() -> Self {
        Self {
            open_collapsed_out: 0.35,
            collapsed_scale_min: 0.92,
            open_expanded_in: (0.55, 0.88),
            close_expanded_out: (0.45, 0.85),
            close_collapsed_snap: 0.01,
        }
    }
}

impl CrossfadeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute both layers' opacities at the given progress value.
    pub fn evaluate(&self, progress: f32, direction: Direction) -> ContentOpacity {
        match direction {
            Direction::Opening => {
                let fade = window(progress, 0.0, self.open_collapsed_out);
                ContentOpacity {
                    collapsed: 1.0 - fade,
                    collapsed_scale: 1.0 + (self.collapsed_scale_min - 1.0) * fade,
                    expanded: window(progress, self.open_expanded_in.0, self.open_expanded_in.1),
                }
            }
            Direction::Closing => {
                let (lo, hi) = self.close_expanded_out;
                ContentOpacity {
                    collapsed: if progress < self.close_collapsed_snap {
                        1.0
                    } else {
                        0.0
                    },
                    collapsed_scale: 1.0,
                    expanded: window(progress, lo, hi),
                }
            }
        }
    }
}

/// 0 below `lo`, 1 above `hi`, linear in between.
fn window(x: f32, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return if x >= hi { 1.0 } else { 0.0 };
    }
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}
