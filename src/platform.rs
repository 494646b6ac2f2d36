//! Device facts that decide how aggressively to fight browser chrome.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean capability facts supplied by the host's device detection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Platform {
    /// Tablet form factor (iPad class). Chrome does not collapse.
    pub tablet: bool,
    /// Running as a wrapped or home-screen app with no browser chrome.
    pub wrapped_app: bool,
    /// Desktop browser.
    pub desktop: bool,
    /// Mobile browser variant that only collapses its chrome when scrolled
    /// one pixel down (stock Android browser, not Chrome).
    pub legacy_mobile_browser: bool,
}

impl Platform {
    /// A desktop browser.
    pub const DESKTOP: Self = Self {
        tablet: false,
        wrapped_app: false,
        desktop: true,
        legacy_mobile_browser: false,
    };

    /// A phone browser with collapsible chrome.
    pub const MOBILE: Self = Self {
        tablet: false,
        wrapped_app: false,
        desktop: false,
        legacy_mobile_browser: false,
    };

    /// Whether the address bar can be scrolled away.
    pub const fn can_hide_chrome(&self) -> bool {
        !self.tablet && !self.wrapped_app && !self.desktop
    }

    /// Scroll position that asks the browser to collapse its chrome.
    pub const fn chrome_nudge(&self) -> (i32, i32) {
        if self.legacy_mobile_browser {
            (0, 1)
        } else {
            (0, 0)
        }
    }
}
