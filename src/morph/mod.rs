mod config;
mod controller;
mod crossfade;
mod curves;
mod geometry;

pub use config::{BackdropStyle, MorphConfig, ShadowStyle};
pub use controller::{MorphController, MorphFrame, MorphState};
pub use crossfade::{ContentOpacity, CrossfadeCoordinator};
pub use curves::{evaluate, Direction, FrameInput, FrameStyle};
pub use geometry::{
    capture_origin, resolve_target, MorphGeometry, OriginProbe, Rect, Size,
};
