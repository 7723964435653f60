//! Spring physics for the close settle phase.
//!
//! The close sequence ends with the progress value springing from its small
//! negative overshoot back to exactly zero. The spring animates an arbitrary
//! `start -> target` scalar, so the settle can begin at whatever value the
//! preceding ease-out phase ended on.

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f32,
    /// Stiffness of the spring (default: 180.0)
    pub stiffness: f32,
    /// Damping coefficient (default: 11.0)
    pub damping: f32,
}

impl SpringConfig {
    /// Default spring with pleasant overshoot
    pub const DEFAULT: Self = Self {
        mass: 1.0,
        stiffness: 180.0,
        damping: 11.0,
    };

    /// Low-mass, high-stiffness, near-critically damped spring for the
    /// overshoot settle: reaches the target in roughly 100-150 ms with
    /// minimal oscillation.
    pub const SETTLE: Self = Self {
        mass: 0.6,
        stiffness: 900.0,
        damping: 45.0,
    };

    /// Bouncy spring with more overshoot
    pub const BOUNCY: Self = Self {
        mass: 1.0,
        stiffness: 200.0,
        damping: 10.0,
    };
}

/// State for spring physics simulation toward a fixed target value.
#[derive(Clone, Debug)]
pub struct SpringState {
    /// Current position
    pub position: f32,
    /// Current velocity
    pub velocity: f32,
    target: f32,
}

impl SpringState {
    /// Create a spring at rest at `start`, aimed at `target`.
    pub fn new(start: f32, target: f32) -> Self {
        Self {
            position: start,
            velocity: 0.0,
            target,
        }
    }

    /// The value the spring settles toward.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Step the simulation forward by `dt` seconds using semi-implicit Euler.
    /// Returns the new position (can overshoot the target).
    pub fn step(&mut self, dt: f32, config: &SpringConfig) -> f32 {
        if dt <= 0.0 {
            return self.position;
        }

        // Cap individual timestep for numerical stability (~30fps minimum)
        let capped_dt = dt.min(0.033);

        // Spring force: F = -k * x
        let displacement = self.position - self.target;
        let spring_force = -config.stiffness * displacement;

        // Damping force: F = -c * v
        let damping_force = -config.damping * self.velocity;

        // Acceleration: a = F / m
        let acceleration = (spring_force + damping_force) / config.mass;

        self.velocity += acceleration * capped_dt;
        self.position += self.velocity * capped_dt;

        self.position
    }

    /// Check if the spring has settled (position near target, velocity near zero)
    pub fn is_settled(&self, threshold: f32) -> bool {
        // Velocity is units/second; compare its per-frame displacement so
        // both checks share one tolerance.
        (self.position - self.target).abs() < threshold && self.velocity.abs() / 60.0 < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_reaches_target() {
        let mut state = SpringState::new(0.0, 1.0);
        let config = SpringConfig::DEFAULT;

        let mut position = 0.0;
        for _ in 0..120 {
            position = state.step(1.0 / 60.0, &config);
        }

        assert!(
            (position - 1.0).abs() < 0.1,
            "Spring should settle near target, got {}",
            position
        );
    }

    #[test]
    fn test_spring_overshoots() {
        let mut state = SpringState::new(0.0, 1.0);
        let config = SpringConfig::BOUNCY;

        let mut max_position: f32 = 0.0;
        for _ in 0..120 {
            let pos = state.step(1.0 / 60.0, &config);
            max_position = max_position.max(pos);
        }

        assert!(
            max_position > 1.0,
            "Bouncy spring should overshoot, max was {}",
            max_position
        );
    }

    #[test]
    fn test_settle_spring_is_fast_and_quiet() {
        // Settle from the close overshoot (-0.04) back to zero.
        let mut state = SpringState::new(-0.04, 0.0);
        let config = SpringConfig::SETTLE;

        let mut min_pos: f32 = 0.0;
        let mut max_pos: f32 = f32::MIN;
        let mut settled_at = None;
        for frame in 0..60 {
            let pos = state.step(1.0 / 60.0, &config);
            min_pos = min_pos.min(pos);
            max_pos = max_pos.max(pos);
            if settled_at.is_none() && state.is_settled(0.001) {
                settled_at = Some(frame);
            }
        }

        let settled_at = settled_at.expect("settle spring should come to rest within a second");
        assert!(
            settled_at <= 12,
            "settle should take ~100-150ms, took {} frames",
            settled_at
        );
        // Minimal oscillation: barely pokes past the target.
        assert!(max_pos < 0.005, "settle overshot too far: {}", max_pos);
    }
}
