//! The morph controller: owns the progress driver and the morph state,
//! exposes the imperative open/close surface, and emits one complete frame
//! of style outputs per tick.
//!
//! The host rendering runtime calls [`MorphController::tick`] once per
//! display frame with the frame's delta time and applies the returned
//! [`MorphFrame`] to the morphing element, the two content layers, and the
//! backdrop. `open()`/`close()` return immediately; completion is observed
//! only through callbacks.

use crate::animation::{DriverStatus, ProgressDriver, SharedProgress};
use crate::morph::config::{BackdropStyle, MorphConfig};
use crate::morph::crossfade::{ContentOpacity, CrossfadeCoordinator};
use crate::morph::curves::{evaluate, Direction, FrameInput, FrameStyle};
use crate::morph::geometry::{capture_origin, resolve_target, MorphGeometry, OriginProbe, Size};

/// Animation state owned exclusively by one controller instance.
#[derive(Debug, Clone, Copy)]
pub struct MorphState {
    /// Current progress. Roughly [-overshoot, 1].
    pub progress: f32,
    /// Curve family in effect; set at transition start, never mid-flight.
    pub direction: Direction,
    /// True between transition start and the completion callback.
    pub is_animating: bool,
    /// Latches true after the first full close and never resets, so the
    /// next open starts opaque instead of flashing the underlying control.
    pub has_completed_close_once: bool,
}

impl MorphState {
    fn resting() -> Self {
        Self {
            progress: 0.0,
            direction: Direction::Opening,
            is_animating: false,
            has_completed_close_once: false,
        }
    }
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphFrame {
    /// Style for the single morphing element.
    pub style: FrameStyle,
    /// Opacities for the collapsed/expanded content layers.
    pub content: ContentOpacity,
    /// Opacity for the external backdrop layer (always 0 with
    /// `BackdropStyle::None`).
    pub backdrop_opacity: f32,
}

type Callback = Box<dyn FnMut()>;
type FlagCallback = Box<dyn FnMut(bool)>;

enum ProgressSource {
    /// The controller's own driver.
    Internal(ProgressDriver),
    /// An outside coordinator writes progress; used to synchronize several
    /// sibling morphs from one master value.
    External(SharedProgress),
}

/// Orchestrates one element's morph between its collapsed and expanded
/// representations.
pub struct MorphController {
    config: MorphConfig,
    crossfade: CrossfadeCoordinator,
    probe: Box<dyn OriginProbe>,
    screen: Size,
    state: MorphState,
    geometry: Option<MorphGeometry>,
    source: ProgressSource,
    is_open: bool,
    /// Seconds until the deferred close cleanup callback fires.
    cleanup_countdown: Option<f32>,
    on_open: Option<Callback>,
    on_close: Option<Callback>,
    on_animation_start: Option<FlagCallback>,
    on_animation_complete: Option<FlagCallback>,
    on_close_cleanup: Option<Callback>,
}

impl MorphController {
    pub fn new(config: MorphConfig, probe: Box<dyn OriginProbe>, screen: Size) -> Self {
        Self {
            config,
            crossfade: CrossfadeCoordinator::new(),
            probe,
            screen,
            state: MorphState::resting(),
            geometry: None,
            source: ProgressSource::Internal(ProgressDriver::new()),
            is_open: false,
            cleanup_countdown: None,
            on_open: None,
            on_close: None,
            on_animation_start: None,
            on_animation_complete: None,
            on_close_cleanup: None,
        }
    }

    /// Drive progress from an outside coordinator instead of the internal
    /// driver. In this mode a transition completes once the shared value
    /// rests at its terminal (1 for open, 0 for close) for two ticks.
    pub fn with_progress_source(mut self, source: SharedProgress) -> Self {
        self.source = ProgressSource::External(source);
        self
    }

    pub fn with_crossfade(mut self, crossfade: CrossfadeCoordinator) -> Self {
        self.crossfade = crossfade;
        self
    }

    pub fn on_open(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(f));
        self
    }

    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    pub fn on_animation_start(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_animation_start = Some(Box::new(f));
        self
    }

    pub fn on_animation_complete(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_animation_complete = Some(Box::new(f));
        self
    }

    /// Fires once, `cleanup_delay` after a close completes. Intended for
    /// host-side teardown (unmounting expanded content) so cleanup never
    /// causes a layout flash while the element is still animating.
    pub fn on_close_cleanup(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close_cleanup = Some(Box::new(f));
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    pub fn state(&self) -> &MorphState {
        &self.state
    }

    /// Begin expanding. No-op while a transition is in flight or already
    /// expanded; aborts with no state change if the host is unmeasurable.
    pub fn open(&mut self) {
        if self.state.is_animating {
            log::debug!("open ignored: transition already in flight");
            return;
        }
        if self.is_open {
            log::debug!("open ignored: already expanded");
            return;
        }

        // Measured fresh on every open; the host may have moved since.
        let origin = match capture_origin(self.probe.as_ref()) {
            Ok(rect) => rect,
            Err(err) => {
                log::warn!("open aborted: {err}");
                return;
            }
        };
        let target = resolve_target(&self.config, self.screen);
        let mut geometry = MorphGeometry::new(origin, target);
        geometry.close_target = self.config.close_target;
        self.geometry = Some(geometry);

        // Fresh transition: auxiliary channels back to base.
        self.cleanup_countdown = None;
        self.state.direction = Direction::Opening;
        self.state.is_animating = true;
        self.state.progress = 0.0;
        self.is_open = true;

        if let ProgressSource::Internal(driver) = &mut self.source {
            driver.start_open(self.config.open_timing.clone(), self.config.open_duration);
        }
        if let Some(cb) = self.on_open.as_mut() {
            cb();
        }
        if let Some(cb) = self.on_animation_start.as_mut() {
            cb(true);
        }
    }

    /// Begin collapsing. No-op while a transition is in flight or not
    /// expanded.
    pub fn close(&mut self) {
        if self.state.is_animating {
            log::debug!("close ignored: transition already in flight");
            return;
        }
        if !self.is_open {
            log::debug!("close ignored: not expanded");
            return;
        }

        self.state.direction = Direction::Closing;
        self.state.is_animating = true;
        self.state.progress = 1.0;

        if let ProgressSource::Internal(driver) = &mut self.source {
            driver.start_close(
                self.config.close_duration,
                self.config.close_overshoot,
                self.config.settle_spring,
            );
        }
        if let Some(cb) = self.on_close.as_mut() {
            cb();
        }
        if let Some(cb) = self.on_animation_start.as_mut() {
            cb(false);
        }
    }

    /// System back-navigation hook: closes and reports the signal handled
    /// when expanded and idle, otherwise lets it propagate.
    pub fn handle_back(&mut self) -> bool {
        if self.is_open && !self.state.is_animating {
            self.close();
            true
        } else {
            false
        }
    }

    /// Advance one display frame and produce the styles to apply.
    ///
    /// Returns `None` until the first successful `open()` has captured
    /// geometry.
    pub fn tick(&mut self, dt: f32) -> Option<MorphFrame> {
        if self.state.is_animating {
            let mut finished = false;
            match &mut self.source {
                ProgressSource::Internal(driver) => match driver.advance(dt) {
                    DriverStatus::Idle => {}
                    DriverStatus::Running(value) => self.state.progress = value,
                    DriverStatus::Finished(value) => {
                        self.state.progress = value;
                        finished = true;
                    }
                },
                ProgressSource::External(shared) => {
                    let value = shared.get();
                    let previous = self.state.progress;
                    self.state.progress = value;
                    finished = match self.state.direction {
                        Direction::Opening => value >= 1.0,
                        // The close dips below zero before settling, so a
                        // single zero sample is not completion yet.
                        Direction::Closing => value.abs() <= 1e-6 && previous.abs() <= 1e-6,
                    };
                }
            }
            if finished {
                self.finish_transition();
            }
        }

        if let Some(remaining) = self.cleanup_countdown.take() {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                if let Some(cb) = self.on_close_cleanup.as_mut() {
                    cb();
                }
            } else {
                self.cleanup_countdown = Some(remaining);
            }
        }

        let geometry = self.geometry.as_ref()?;
        let style = evaluate(&FrameInput {
            progress: self.state.progress,
            direction: self.state.direction,
            geometry,
            config: &self.config,
            has_completed_close_once: self.state.has_completed_close_once,
        });
        let content = self
            .crossfade
            .evaluate(self.state.progress, self.state.direction);
        let backdrop_opacity = match self.config.backdrop {
            BackdropStyle::None => 0.0,
            BackdropStyle::Blur | BackdropStyle::Dark => self.state.progress.clamp(0.0, 1.0),
        };

        Some(MorphFrame {
            style,
            content,
            backdrop_opacity,
        })
    }

    fn finish_transition(&mut self) {
        self.state.is_animating = false;
        match self.state.direction {
            Direction::Opening => {
                if let Some(cb) = self.on_animation_complete.as_mut() {
                    cb(true);
                }
            }
            Direction::Closing => {
                self.is_open = false;
                self.state.has_completed_close_once = true;
                if let Some(cb) = self.on_animation_complete.as_mut() {
                    cb(false);
                }
                self.cleanup_countdown = Some(self.config.cleanup_delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::geometry::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    struct FixedProbe(Option<Rect>);

    impl OriginProbe for FixedProbe {
        fn measure(&self) -> Option<Rect> {
            self.0
        }
    }

    fn controller(config: MorphConfig) -> MorphController {
        MorphController::new(
            config,
            Box::new(FixedProbe(Some(Rect::new(16.0, 60.0, 120.0, 44.0, 22.0)))),
            Size::new(375.0, 812.0),
        )
    }

    fn run_until_idle(controller: &mut MorphController) {
        for _ in 0..600 {
            controller.tick(DT);
            if !controller.is_animating() {
                return;
            }
        }
        panic!("transition did not complete within 10 seconds");
    }

    #[test]
    fn test_open_guard_rejects_reentrant_calls() {
        let starts = Rc::new(Cell::new(0));
        let counter = starts.clone();
        let mut controller = controller(MorphConfig::default())
            .on_animation_start(move |_| counter.set(counter.get() + 1));

        controller.open();
        assert!(controller.is_animating());
        controller.open();
        controller.close();
        assert!(controller.is_animating());
        assert_eq!(starts.get(), 1, "exactly one transition may start");
    }

    #[test]
    fn test_unmeasurable_host_aborts_without_state_change() {
        let mut controller = MorphController::new(
            MorphConfig::default(),
            Box::new(FixedProbe(None)),
            Size::new(375.0, 812.0),
        );
        controller.open();
        assert!(!controller.is_animating());
        assert!(!controller.is_open());
        assert!(controller.tick(DT).is_none());
    }

    #[test]
    fn test_full_open_close_cycle() {
        let completions = Rc::new(Cell::new(0));
        let counter = completions.clone();
        let mut controller = controller(MorphConfig::default())
            .on_animation_complete(move |_| counter.set(counter.get() + 1));

        controller.open();
        run_until_idle(&mut controller);
        assert!(controller.is_open());
        assert_eq!(controller.progress(), 1.0);

        controller.close();
        run_until_idle(&mut controller);
        assert!(!controller.is_open());
        assert_eq!(controller.progress(), 0.0);
        assert!(controller.state().has_completed_close_once);
        assert_eq!(completions.get(), 2);
    }

    #[test]
    fn test_cleanup_fires_after_delay() {
        let cleaned = Rc::new(Cell::new(false));
        let flag = cleaned.clone();
        let mut controller =
            controller(MorphConfig::default()).on_close_cleanup(move || flag.set(true));

        controller.open();
        run_until_idle(&mut controller);
        controller.close();
        run_until_idle(&mut controller);
        assert!(!cleaned.get(), "cleanup must not fire at completion");

        for _ in 0..5 {
            controller.tick(DT);
        }
        assert!(cleaned.get(), "cleanup should fire ~50ms after close");
    }

    #[test]
    fn test_back_handled_only_when_expanded_and_idle() {
        let mut controller = controller(MorphConfig::default());
        assert!(!controller.handle_back());

        controller.open();
        assert!(!controller.handle_back(), "mid-animation back propagates");
        run_until_idle(&mut controller);
        assert!(controller.handle_back(), "expanded and idle closes");
        assert!(controller.is_animating());
    }

    #[test]
    fn test_external_progress_source() {
        let master = SharedProgress::new(0.0);
        let mut controller = controller(MorphConfig::default())
            .with_progress_source(master.clone());

        controller.open();
        master.set(0.5);
        let frame = controller.tick(DT).unwrap();
        assert!(frame.style.width > 120.0 && frame.style.width < 343.0);
        assert!(controller.is_animating());

        master.set(1.0);
        controller.tick(DT);
        assert!(!controller.is_animating());
        assert!(controller.is_open());
    }

    #[test]
    fn test_origin_is_remeasured_each_open() {
        let origin = Rc::new(Cell::new(Rect::new(16.0, 60.0, 120.0, 44.0, 22.0)));

        struct MovingProbe(Rc<Cell<Rect>>);
        impl OriginProbe for MovingProbe {
            fn measure(&self) -> Option<Rect> {
                Some(self.0.get())
            }
        }

        let mut controller = MorphController::new(
            MorphConfig::default(),
            Box::new(MovingProbe(origin.clone())),
            Size::new(375.0, 812.0),
        );

        controller.open();
        let first = controller.tick(0.0).unwrap();
        assert_eq!(first.style.y, 60.0);
        run_until_idle(&mut controller);
        controller.close();
        run_until_idle(&mut controller);

        // Host scrolled; the next open must start from the new bounds.
        origin.set(Rect::new(16.0, 300.0, 120.0, 44.0, 22.0));
        controller.open();
        let second = controller.tick(0.0).unwrap();
        assert_eq!(second.style.y, 300.0);
    }

    #[test]
    fn test_backdrop_opacity_follows_progress() {
        let mut controller = controller(MorphConfig::default().backdrop(BackdropStyle::None));
        controller.open();
        let frame = controller.tick(DT).unwrap();
        assert_eq!(frame.backdrop_opacity, 0.0);

        let mut controller = controller_with_dark();
        controller.open();
        run_until_idle(&mut controller);
        let frame = controller.tick(DT).unwrap();
        assert_eq!(frame.backdrop_opacity, 1.0);
    }

    fn controller_with_dark() -> MorphController {
        controller(MorphConfig::default().backdrop(BackdropStyle::Dark))
    }
}
