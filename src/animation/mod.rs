mod driver;
mod spring;
mod timing;

pub use driver::{DriverStatus, ProgressDriver, SharedProgress};
pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshoot effects
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}
