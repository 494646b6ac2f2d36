//! Target surface size computation for each scale mode.
//!
//! Given the active mode, the window's inner size, the logical surface size,
//! and the caller's bounds, computes the size the surface should be displayed
//! at. Pure geometry with no side effects, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use zenviewport::{Bounds, ScaleMode, Size, compute_target};
//!
//! let logical = Size::new(800, 600);
//! let target = compute_target(
//!     ScaleMode::ShowAll,
//!     Size::new(1024, 768),
//!     logical,
//!     &Bounds::NONE,
//!     logical,
//! );
//!
//! // min(768/600, 1024/800) = 1.28
//! assert_eq!(target, Size::new(1024, 768));
//! ```

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the logical surface is mapped onto the window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScaleMode {
    /// Stretch to fill the window, ignoring aspect ratio.
    ExactFit,

    /// Keep the committed size. Window changes are ignored.
    NoScale,

    /// Scale to fit entirely within the window, preserving aspect ratio.
    /// Output may be smaller than the window on one axis.
    ShowAll,
}

impl ScaleMode {
    /// Canonical snake_case name, as accepted by `FromStr`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactFit => "exact_fit",
            Self::NoScale => "no_scale",
            Self::ShowAll => "show_all",
        }
    }

    /// Whether window changes should trigger a refresh.
    pub const fn tracks_window(self) -> bool {
        !matches!(self, Self::NoScale)
    }
}

impl core::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width × height dimensions in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height. Zero when height is zero.
    pub fn aspect_ratio(self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// Whether either axis is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Optional size limits on the committed surface.
///
/// Each bound is independent. `None` (or zero) means unconstrained.
///
/// Only `max_width` and `max_height` take part in clamping. The minimums
/// are carried as configuration for callers that read them back, but
/// [`compute_target`] does not enforce them. Crossed bounds
/// (`max_width < min_width`) are not validated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Bounds {
    /// Advisory minimum width. Never enforced.
    pub min_width: Option<u32>,
    /// Maximum width. `None` or 0 means unbounded.
    pub max_width: Option<u32>,
    /// Advisory minimum height. Never enforced.
    pub min_height: Option<u32>,
    /// Maximum height. `None` or 0 means unbounded.
    pub max_height: Option<u32>,
}

impl Bounds {
    /// No constraints on either axis.
    pub const NONE: Self = Self {
        min_width: None,
        max_width: None,
        min_height: None,
        max_height: None,
    };

    /// Set the advisory minimum width.
    pub fn min_width(mut self, px: u32) -> Self {
        self.min_width = Some(px);
        self
    }

    /// Set the maximum width.
    pub fn max_width(mut self, px: u32) -> Self {
        self.max_width = Some(px);
        self
    }

    /// Set the advisory minimum height.
    pub fn min_height(mut self, px: u32) -> Self {
        self.min_height = Some(px);
        self
    }

    /// Set the maximum height.
    pub fn max_height(mut self, px: u32) -> Self {
        self.max_height = Some(px);
        self
    }

    /// Clamp each axis independently against its maximum.
    ///
    /// The other axis is not re-derived, so clamping can change the
    /// aspect ratio of a [`ScaleMode::ShowAll`] result.
    pub fn clamp_max(&self, size: Size) -> Size {
        Size {
            width: clamp_axis(size.width, self.max_width),
            height: clamp_axis(size.height, self.max_height),
        }
    }
}

fn clamp_axis(v: u32, max: Option<u32>) -> u32 {
    match max {
        Some(m) if m > 0 && v > m => m,
        _ => v,
    }
}

/// Per-axis ratio from display coordinates back to logical coordinates.
///
/// Published to the input subsystem on every commit, so a pointer at
/// display `(px, py)` maps to logical `(px * x, py * y)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleFactor {
    /// Horizontal ratio.
    pub x: f64,
    /// Vertical ratio.
    pub y: f64,
}

impl ScaleFactor {
    /// No scaling on either axis.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// `logical / display` per axis. An axis with zero display extent maps 1:1.
    pub fn between(logical: Size, display: Size) -> Self {
        Self {
            x: axis_ratio(logical.width, display.width),
            y: axis_ratio(logical.height, display.height),
        }
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn axis_ratio(logical: u32, display: u32) -> f64 {
    if display == 0 {
        1.0
    } else {
        logical as f64 / display as f64
    }
}

/// Offset of the surface inside the window when page alignment is on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Margin {
    /// Left offset in pixels.
    pub x: u32,
    /// Top offset in pixels.
    pub y: u32,
}

/// Compute the display size for a surface.
///
/// - [`ExactFit`](ScaleMode::ExactFit): the window's inner size, each axis
///   clamped to its maximum bound.
/// - [`ShowAll`](ScaleMode::ShowAll): the logical size times
///   `min(window_h / logical_h, window_w / logical_w)`, rounded per axis,
///   then clamped per axis. An empty logical size keeps `current`.
/// - [`NoScale`](ScaleMode::NoScale): `current`, unchanged.
pub fn compute_target(
    mode: ScaleMode,
    window: Size,
    logical: Size,
    bounds: &Bounds,
    current: Size,
) -> Size {
    match mode {
        ScaleMode::ExactFit => bounds.clamp_max(window),
        ScaleMode::ShowAll => match show_all(window, logical) {
            Some(fitted) => bounds.clamp_max(fitted),
            None => current,
        },
        ScaleMode::NoScale => current,
    }
}

/// Uniform fit of `logical` inside `window`. `None` for an empty logical size.
fn show_all(window: Size, logical: Size) -> Option<Size> {
    if logical.is_empty() {
        return None;
    }
    let m = multiplier(window, logical);
    Some(Size::new(
        scale_axis(logical.width, m),
        scale_axis(logical.height, m),
    ))
}

fn multiplier(window: Size, logical: Size) -> f64 {
    let by_height = window.height as f64 / logical.height as f64;
    let by_width = window.width as f64 / logical.width as f64;
    by_height.min(by_width)
}

fn scale_axis(extent: u32, m: f64) -> u32 {
    Float::round(extent as f64 * m) as u32
}
