//! Physics-based morph transitions for a single UI element.
//!
//! `morpho` drives one on-screen control (a pill button, an action button,
//! a card) through a continuous multi-phase trajectory between its
//! collapsed and expanded representations: position, size, corner radius,
//! opacity, and shadow move together through arc trajectories, a landing
//! bounce, and a directional-overshoot close, while a cross-fade
//! coordinator swaps the two content layers and a backdrop opacity tracks
//! progress.
//!
//! The crate is rendering-agnostic: the host runtime implements
//! [`morph::OriginProbe`] to measure the collapsed control, ticks the
//! controller once per display frame, and applies the returned
//! [`morph::MorphFrame`] however it draws.
//!
//! # Example
//! ```ignore
//! use morpho::prelude::*;
//!
//! let mut morph = MorphController::new(
//!     MorphConfig::new().overshoot(0.0, 6.0),
//!     Box::new(my_probe),
//!     Size::new(375.0, 812.0),
//! )
//! .on_close_cleanup(|| unmount_expanded_content());
//!
//! morph.open();
//! // each display frame:
//! if let Some(frame) = morph.tick(dt) {
//!     apply(frame.style);
//! }
//! ```

pub mod animation;
pub mod error;
pub mod morph;

pub use error::MorphError;

pub mod prelude {
    pub use crate::animation::{
        Animatable, DriverStatus, ProgressDriver, SharedProgress, SpringConfig, TimingFunction,
    };
    pub use crate::morph::{
        BackdropStyle, ContentOpacity, CrossfadeCoordinator, Direction, FrameInput, FrameStyle,
        MorphConfig, MorphController, MorphFrame, MorphGeometry, MorphState, OriginProbe, Rect,
        ShadowStyle, Size,
    };
    pub use crate::MorphError;
}
