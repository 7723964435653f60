//! The progress driver: one time-varying scalar that the whole morph reads.
//!
//! Opening runs progress 0 -> 1 under a single timing curve. Closing is a
//! two-phase sequence: an ease-out drives progress from 1 down past zero to
//! a small negative overshoot, then a spring settles it back to exactly 0.
//! The phase handoff happens inside a single [`ProgressDriver::advance`]
//! call, so phase B always starts at exactly the value phase A ended on.
//!
//! The driver never spawns threads or timers: the host rendering runtime
//! advances it once per display frame with the frame's delta time.

use std::cell::Cell;
use std::rc::Rc;

use super::spring::{SpringConfig, SpringState};
use super::timing::TimingFunction;

/// Shared progress value for externally driven morphs.
///
/// When several sibling controllers must stay synchronized (a cascading
/// stagger, a scroll-bound coordinator), one of these is created by the
/// outside coordinator and passed into each controller's constructor. The
/// morph core never stores progress in ambient or global scope.
#[derive(Clone, Debug, Default)]
pub struct SharedProgress(Rc<Cell<f32>>);

impl SharedProgress {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, value: f32) {
        self.0.set(value);
    }
}

/// Result of advancing the driver by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverStatus {
    /// No transition in flight; the value is at rest.
    Idle,
    /// Transition still running; carries the new progress value.
    Running(f32),
    /// Transition reached its terminal value this frame (natural
    /// completion, not interruption).
    Finished(f32),
}

enum Phase {
    Idle,
    /// A duration-based segment under a timing curve.
    Timed {
        from: f32,
        to: f32,
        elapsed: f32,
        duration: f32,
        timing: TimingFunction,
        /// When set, completion hands off to a spring settle toward zero
        /// instead of finishing the transition.
        then_settle: Option<SpringConfig>,
    },
    /// Spring settle toward zero (close phase B).
    Settle {
        spring: SpringState,
        config: SpringConfig,
    },
}

/// Drives the morph progress scalar frame by frame.
pub struct ProgressDriver {
    value: f32,
    phase: Phase,
}

impl ProgressDriver {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            phase: Phase::Idle,
        }
    }

    /// Current progress. Domain is roughly [-overshoot, 1].
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Begin the open transition: current value -> 1 under `timing`.
    pub fn start_open(&mut self, timing: TimingFunction, duration: f32) {
        self.phase = Phase::Timed {
            from: self.value,
            to: 1.0,
            elapsed: 0.0,
            duration: duration.max(1e-3),
            timing,
            then_settle: None,
        };
    }

    /// Begin the two-phase close sequence: ease-out from the current value
    /// down to `-overshoot`, then spring-settle back to exactly 0.
    pub fn start_close(&mut self, duration: f32, overshoot: f32, settle: SpringConfig) {
        self.phase = Phase::Timed {
            from: self.value,
            to: -overshoot.max(0.0),
            elapsed: 0.0,
            duration: duration.max(1e-3),
            timing: TimingFunction::EaseOut,
            then_settle: Some(settle),
        };
    }

    /// Advance the driver by `dt` seconds (one display frame).
    pub fn advance(&mut self, dt: f32) -> DriverStatus {
        match &mut self.phase {
            Phase::Idle => DriverStatus::Idle,
            Phase::Timed {
                from,
                to,
                elapsed,
                duration,
                timing,
                then_settle,
            } => {
                *elapsed += dt.max(0.0);
                let t = (*elapsed / *duration).min(1.0);
                if t >= 1.0 {
                    // Land exactly on the segment's terminal value, then hand
                    // off within this same call so no frame is skipped.
                    let end = *to;
                    self.value = end;
                    match then_settle.take() {
                        Some(config) => {
                            self.phase = Phase::Settle {
                                spring: SpringState::new(end, 0.0),
                                config,
                            };
                            DriverStatus::Running(end)
                        }
                        None => {
                            self.phase = Phase::Idle;
                            DriverStatus::Finished(end)
                        }
                    }
                } else {
                    let eased = timing.evaluate(t);
                    self.value = *from + (*to - *from) * eased;
                    DriverStatus::Running(self.value)
                }
            }
            Phase::Settle { spring, config } => {
                self.value = spring.step(dt, config);
                if spring.is_settled(1e-3) {
                    self.value = spring.target();
                    self.phase = Phase::Idle;
                    DriverStatus::Finished(self.value)
                } else {
                    DriverStatus::Running(self.value)
                }
            }
        }
    }
}

impl Default for ProgressDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_to_completion(driver: &mut ProgressDriver) -> (f32, usize) {
        for frame in 0..600 {
            if let DriverStatus::Finished(v) = driver.advance(DT) {
                return (v, frame);
            }
        }
        panic!("driver did not finish within 10 seconds");
    }

    #[test]
    fn test_open_reaches_one() {
        let mut driver = ProgressDriver::new();
        driver.start_open(TimingFunction::OPEN_EASE, 1.0);
        let (end, frames) = run_to_completion(&mut driver);
        assert_eq!(end, 1.0);
        assert!(frames >= 58, "open should take ~1s, took {} frames", frames);
    }

    #[test]
    fn test_close_dips_negative_then_settles_to_zero() {
        let mut driver = ProgressDriver::new();
        driver.start_open(TimingFunction::Linear, 0.1);
        run_to_completion(&mut driver);

        driver.start_close(0.55, 0.04, SpringConfig::SETTLE);
        let mut min_value: f32 = 1.0;
        let end = loop {
            match driver.advance(DT) {
                DriverStatus::Running(v) => min_value = min_value.min(v),
                DriverStatus::Finished(v) => break v,
                DriverStatus::Idle => panic!("driver went idle mid-close"),
            }
        };
        assert_eq!(end, 0.0);
        assert!(
            (min_value + 0.04).abs() < 1e-3,
            "close should dip to -0.04, dipped to {}",
            min_value
        );
    }

    #[test]
    fn test_close_handoff_is_continuous() {
        // The settle phase must start at exactly the ease phase's end value.
        let mut driver = ProgressDriver::new();
        driver.start_open(TimingFunction::Linear, 0.1);
        run_to_completion(&mut driver);

        driver.start_close(0.55, 0.04, SpringConfig::SETTLE);
        let mut prev = driver.value();
        loop {
            let status = driver.advance(DT);
            let v = driver.value();
            // One frame moves progress by well under 0.2 in every phase.
            assert!(
                (v - prev).abs() < 0.2,
                "discontinuity: {} -> {} in one frame",
                prev,
                v
            );
            prev = v;
            if matches!(status, DriverStatus::Finished(_)) {
                break;
            }
        }
    }

    #[test]
    fn test_idle_driver_reports_idle() {
        let mut driver = ProgressDriver::new();
        assert_eq!(driver.advance(DT), DriverStatus::Idle);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_shared_progress_is_shared() {
        let master = SharedProgress::new(0.0);
        let follower = master.clone();
        master.set(0.42);
        assert_eq!(follower.get(), 0.42);
    }
}
