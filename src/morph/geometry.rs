//! Rectangle types and the geometry resolver.
//!
//! The resolver computes the two endpoints of a morph in screen coordinates:
//! the collapsed origin (measured from the live host element on every open,
//! never cached, because the host may have scrolled) and the expanded target
//! (configured explicitly or derived from the screen bounds).

use crate::error::MorphError;
use crate::morph::config::MorphConfig;

/// Axis-aligned rectangle in logical pixels, with the corner radius channel
/// the morph animates alongside position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            radius,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.radius.is_finite()
    }
}

/// Screen (or host container) dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Measurement hook implemented by the host rendering layer.
///
/// Returns `None` while the host element is not mounted/measurable. The
/// morph core treats the UI tree behind this as read-only.
pub trait OriginProbe {
    fn measure(&self) -> Option<Rect>;
}

/// Measure the collapsed host bounds for a new open transition.
///
/// Re-invoked on every `open()`; the result is never reused across opens.
pub fn capture_origin(probe: &dyn OriginProbe) -> Result<Rect, MorphError> {
    match probe.measure() {
        Some(rect) if rect.is_finite() => Ok(rect),
        _ => Err(MorphError::HostUnmeasurable),
    }
}

/// Compute the expanded rectangle from configuration, falling back to
/// screen-relative defaults with a margin when no explicit rect is set.
pub fn resolve_target(config: &MorphConfig, screen: Size) -> Rect {
    if let Some(rect) = config.expanded {
        return rect;
    }
    let margin = config.expanded_margin;
    Rect::new(
        margin,
        config.expanded_top,
        screen.width - margin * 2.0,
        screen.height - config.expanded_top - margin,
        config.expanded_radius,
    )
}

/// The two endpoints of an in-flight morph, captured at open time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphGeometry {
    /// Collapsed bounds, measured from the host at open time.
    pub origin: Rect,
    /// Expanded bounds.
    pub target: Rect,
    /// Alternate collapse destination; when set, the close lands here
    /// instead of back on `origin` (e.g. collapsing into a relocated
    /// search bar after a scroll-driven layout change).
    pub close_target: Option<Rect>,
}

impl MorphGeometry {
    pub fn new(origin: Rect, target: Rect) -> Self {
        Self {
            origin,
            target,
            close_target: None,
        }
    }

    /// Where the close animation resolves to.
    pub fn close_destination(&self) -> Rect {
        self.close_target.unwrap_or(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Option<Rect>);

    impl OriginProbe for FixedProbe {
        fn measure(&self) -> Option<Rect> {
            self.0
        }
    }

    #[test]
    fn test_capture_origin_reads_probe() {
        let rect = Rect::new(16.0, 60.0, 120.0, 44.0, 22.0);
        let origin = capture_origin(&FixedProbe(Some(rect))).unwrap();
        assert_eq!(origin, rect);
    }

    #[test]
    fn test_capture_origin_fails_when_unmounted() {
        assert!(capture_origin(&FixedProbe(None)).is_err());
    }

    #[test]
    fn test_capture_origin_rejects_non_finite() {
        let rect = Rect::new(f32::NAN, 0.0, 10.0, 10.0, 0.0);
        assert!(capture_origin(&FixedProbe(Some(rect))).is_err());
    }

    #[test]
    fn test_resolve_target_uses_screen_margins() {
        let config = MorphConfig::default();
        let target = resolve_target(&config, Size::new(375.0, 812.0));
        assert_eq!(target.x, config.expanded_margin);
        assert_eq!(target.width, 375.0 - config.expanded_margin * 2.0);
        assert_eq!(target.radius, config.expanded_radius);
    }

    #[test]
    fn test_resolve_target_prefers_explicit_rect() {
        let explicit = Rect::new(0.0, 0.0, 300.0, 500.0, 12.0);
        let config = MorphConfig::default().expanded(explicit);
        assert_eq!(resolve_target(&config, Size::new(375.0, 812.0)), explicit);
    }

    #[test]
    fn test_close_destination_prefers_override() {
        let origin = Rect::new(200.0, 60.0, 120.0, 44.0, 22.0);
        let target = Rect::new(16.0, 108.0, 343.0, 560.0, 24.0);
        let mut geometry = MorphGeometry::new(origin, target);
        assert_eq!(geometry.close_destination(), origin);

        let relocated = Rect::new(16.0, 60.0, 120.0, 44.0, 22.0);
        geometry.close_target = Some(relocated);
        assert_eq!(geometry.close_destination(), relocated);
    }
}
