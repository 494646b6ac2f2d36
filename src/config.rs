//! Engine configuration.
//!
//! The scale mode itself belongs to the [`Stage`](crate::Stage); everything
//! else the engine needs is collected here.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use zenviewport::{ForcedOrientation, StageConfig};
//!
//! let config = StageConfig::new()
//!     .max_width(900)
//!     .align(true, false)
//!     .force(ForcedOrientation::Landscape)
//!     .period(Duration::from_millis(16));
//!
//! assert_eq!(config.bounds.max_width, Some(900));
//! assert_eq!(config.budget, 40);
//! ```

use core::str::FromStr;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::orientation::ForcedOrientation;
use crate::scale::{Bounds, ScaleMode};
use crate::stabilizer::{DEFAULT_BUDGET, DEFAULT_PERIOD, DEFAULT_SENTINEL_HEIGHT};

/// Settings for a [`ScaleManager`](crate::ScaleManager).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageConfig {
    /// Size limits on the committed surface.
    pub bounds: Bounds,
    /// Polling iterations before a stabilization run times out.
    pub budget: u32,
    /// Interval between polling samples.
    pub period: Duration,
    /// Minimum content height forced while waiting for chrome collapse.
    pub sentinel_height: u32,
    /// Center the surface horizontally when narrower than the window.
    pub align_horizontally: bool,
    /// Center the surface vertically when shorter than the window.
    pub align_vertically: bool,
    /// Orientation the content requires, if any.
    pub forced_orientation: Option<ForcedOrientation>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StageConfig {
    /// Defaults: no bounds, 40 ticks of 10 ms, 5000 px sentinel, no alignment.
    pub const fn new() -> Self {
        Self {
            bounds: Bounds::NONE,
            budget: DEFAULT_BUDGET,
            period: DEFAULT_PERIOD,
            sentinel_height: DEFAULT_SENTINEL_HEIGHT,
            align_horizontally: false,
            align_vertically: false,
            forced_orientation: None,
        }
    }

    /// Replace all bounds.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Cap the display width.
    pub fn max_width(mut self, px: u32) -> Self {
        self.bounds.max_width = Some(px);
        self
    }

    /// Cap the display height.
    pub fn max_height(mut self, px: u32) -> Self {
        self.bounds.max_height = Some(px);
        self
    }

    /// Advisory; see [`Bounds`].
    pub fn min_width(mut self, px: u32) -> Self {
        self.bounds.min_width = Some(px);
        self
    }

    /// Advisory; see [`Bounds`].
    pub fn min_height(mut self, px: u32) -> Self {
        self.bounds.min_height = Some(px);
        self
    }

    /// Ticks a run may take before it times out.
    pub fn budget(mut self, iterations: u32) -> Self {
        self.budget = iterations;
        self
    }

    /// Interval between ticks.
    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Content height forced while waiting for the chrome to collapse.
    pub fn sentinel_height(mut self, px: u32) -> Self {
        self.sentinel_height = px;
        self
    }

    /// Page alignment on each axis.
    pub fn align(mut self, horizontally: bool, vertically: bool) -> Self {
        self.align_horizontally = horizontally;
        self.align_vertically = vertically;
        self
    }

    /// Require the window to be in `orientation`.
    pub fn force(mut self, orientation: ForcedOrientation) -> Self {
        self.forced_orientation = Some(orientation);
        self
    }
}

/// Unknown scale mode name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown scale mode (expected exact_fit, no_scale, or show_all)")]
pub struct ParseScaleModeError;

impl FromStr for ScaleMode {
    type Err = ParseScaleModeError;

    /// Case-insensitive; `_`, `-`, or no separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, ScaleMode); 3] = [
            ("exactfit", ScaleMode::ExactFit),
            ("noscale", ScaleMode::NoScale),
            ("showall", ScaleMode::ShowAll),
        ];
        let key = s.trim().bytes().filter(|b| *b != b'_' && *b != b'-');
        NAMES
            .iter()
            .find(|(name, _)| {
                let mut k = key.clone();
                name.bytes()
                    .all(|n| k.next().is_some_and(|b| b.eq_ignore_ascii_case(&n)))
                    && k.next().is_none()
            })
            .map(|&(_, mode)| mode)
            .ok_or(ParseScaleModeError)
    }
}
