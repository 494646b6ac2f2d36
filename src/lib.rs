//! Viewport negotiation for fixed-size canvases: scale modes, orientation
//! tracking, and mobile chrome-collapse stabilization.
//!
//! Pure engine: every window, timer, and surface interaction goes through
//! the traits in [`host`], so the same code runs in a browser (feature
//! `web`) or under a scripted test host. `no_std` compatible without `web`.
//!
//! # Modules
//!
//! - [`scale`] — Scale modes, bounds, and target size computation
//! - [`orientation`] — Orientation classification, tracking, forced orientation
//! - [`stabilizer`] — Bounded polling loop that waits for browser chrome to collapse
//! - [`manager`] — [`ScaleManager`], wiring the above to the host
//! - [`fullscreen`] — Vendor-variant fullscreen capability resolution
//! - [`platform`] — Device facts
//! - [`config`] — [`StageConfig`] and scale mode parsing
//! - [`host`] — Collaborator traits

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod config;
pub mod fullscreen;
pub mod host;
pub mod manager;
pub mod orientation;
pub mod platform;
pub mod scale;
pub mod stabilizer;
#[cfg(feature = "web")]
pub mod web;

pub use config::{ParseScaleModeError, StageConfig};
pub use fullscreen::{Fullscreen, FullscreenApi};
pub use host::{InputScale, Stage, TimerHandle, Viewport};
pub use manager::ScaleManager;
pub use orientation::{
    ForcedOrientation, Orientation, OrientationCheck, OrientationEvent, OrientationTracker,
};
pub use platform::Platform;
pub use scale::{Bounds, Margin, ScaleFactor, ScaleMode, Size, compute_target};
pub use stabilizer::{
    Convergence, StabilizationRun, StabilizerState, Tick, ViewportStabilizer,
};
