//! Device orientation tracking and transition events.
//!
//! Two detection paths feed the tracker:
//!
//! - the native orientation reading (`window.orientation` in a browser),
//!   consulted on orientation-change notifications, and
//! - the window's outer size, consulted on resize notifications because
//!   some platforms resize without updating the native reading.
//!
//! The two can disagree at rotation boundaries (a native 180 with a wide
//! outer box, a native 90 reported before the outer box has rotated).
//! Both are kept as-is; whichever handler ran last wins.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scale::Size;

/// Signed orientation angle in degrees.
///
/// ```text
///        0           90          -90         180
///     ┌─────┐     ┌───────┐   ┌───────┐   ┌─────┐
///     │  ▲  │     │     ▶ │   │ ◀     │   │     │
///     │     │     └───────┘   └───────┘   │  ▼  │
///     └─────┘                             └─────┘
///     portrait    landscape   landscape   portrait
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Rotation in degrees as reported by the device.
    pub angle: i32,
}

impl Orientation {
    /// Upright portrait.
    pub const PORTRAIT: Self = Self { angle: 0 };
    /// Landscape as inferred from window geometry.
    pub const LANDSCAPE: Self = Self { angle: 90 };

    /// Wrap a raw angle.
    pub const fn new(angle: i32) -> Self {
        Self { angle }
    }

    /// Infer from the window's outer box: landscape iff strictly wider than tall.
    pub fn from_outer_size(outer: Size) -> Self {
        if outer.width > outer.height {
            Self::LANDSCAPE
        } else {
            Self::PORTRAIT
        }
    }

    /// Landscape iff the angle is exactly 90 or -90.
    pub const fn is_landscape(self) -> bool {
        self.angle == 90 || self.angle == -90
    }

    /// Everything that is not landscape, including 180.
    pub const fn is_portrait(self) -> bool {
        !self.is_landscape()
    }
}

/// Transition notification raised after every orientation or resize event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrientationEvent {
    EnterLandscape { angle: i32 },
    EnterPortrait { angle: i32 },
}

impl OrientationEvent {
    /// The event matching an orientation's classification.
    pub const fn for_orientation(o: Orientation) -> Self {
        if o.is_landscape() {
            Self::EnterLandscape { angle: o.angle }
        } else {
            Self::EnterPortrait { angle: o.angle }
        }
    }

    /// Angle carried as payload.
    pub const fn angle(self) -> i32 {
        match self {
            Self::EnterLandscape { angle } | Self::EnterPortrait { angle } => angle,
        }
    }

    /// Whether this is [`EnterLandscape`](Self::EnterLandscape).
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::EnterLandscape { .. })
    }
}

/// Holds the current orientation and classifies incoming readings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OrientationTracker {
    current: Orientation,
}

impl OrientationTracker {
    /// Initial orientation: the native reading when there is one, otherwise
    /// inferred from the outer size.
    pub fn detect(native: Option<i32>, outer: Size) -> Self {
        let current = match native {
            Some(angle) => Orientation::new(angle),
            None => Orientation::from_outer_size(outer),
        };
        tracing::debug!(
            angle = current.angle,
            native = native.is_some(),
            "initial orientation"
        );
        Self { current }
    }

    /// Current orientation.
    pub fn orientation(&self) -> Orientation {
        self.current
    }

    /// Current angle is ±90.
    pub fn is_landscape(&self) -> bool {
        self.current.is_landscape()
    }

    /// Current angle is anything but ±90.
    pub fn is_portrait(&self) -> bool {
        self.current.is_portrait()
    }

    /// Apply a native orientation reading.
    ///
    /// A missing reading leaves the angle unchanged; the current
    /// classification is still reported.
    pub fn handle_orientation_change(&mut self, native: Option<i32>) -> OrientationEvent {
        if let Some(angle) = native {
            self.current = Orientation::new(angle);
        }
        let event = OrientationEvent::for_orientation(self.current);
        tracing::debug!(
            angle = self.current.angle,
            landscape = event.is_landscape(),
            source = "native",
            "orientation change"
        );
        event
    }

    /// Re-infer orientation from the outer size, ignoring any native reading.
    pub fn handle_resize(&mut self, outer: Size) -> OrientationEvent {
        self.current = Orientation::from_outer_size(outer);
        let event = OrientationEvent::for_orientation(self.current);
        tracing::debug!(
            angle = self.current.angle,
            landscape = event.is_landscape(),
            source = "resize",
            "orientation change"
        );
        event
    }
}

/// An orientation the content requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ForcedOrientation {
    Landscape,
    Portrait,
}

impl ForcedOrientation {
    /// The window is strictly the wrong way round.
    pub fn is_violated_by(self, inner: Size) -> bool {
        match self {
            Self::Landscape => inner.width < inner.height,
            Self::Portrait => inner.height < inner.width,
        }
    }

    /// The window is strictly the right way round.
    ///
    /// A square window neither violates nor satisfies, so the current
    /// state is kept.
    pub fn is_satisfied_by(self, inner: Size) -> bool {
        match self {
            Self::Landscape => inner.width > inner.height,
            Self::Portrait => inner.height > inner.width,
        }
    }
}

/// Change in forced-orientation state detected by a consistency check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrientationCheck {
    /// The window no longer matches the forced orientation.
    EnterIncorrect,
    /// The window matches the forced orientation again.
    LeaveIncorrect,
}
