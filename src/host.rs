//! Collaborator contracts the engine drives.
//!
//! The engine never touches a real window. Everything it reads or writes
//! goes through these traits, so a test host can script window geometry
//! and fire timer ticks deterministically.

use core::time::Duration;

use crate::fullscreen::FullscreenApi;
use crate::scale::{Margin, ScaleFactor, ScaleMode, Size};

/// Identifies a repeating timer started by [`Viewport::start_interval`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// The window the surface lives in.
pub trait Viewport {
    /// Current inner (layout viewport) size.
    fn inner_size(&self) -> Size;

    /// Current outer size, including browser chrome.
    fn outer_size(&self) -> Size;

    /// Native orientation angle, when the platform reports one.
    fn native_orientation(&self) -> Option<i32>;

    /// Set the document's minimum content height. Used only to make the
    /// page scrollable so the browser will collapse its chrome.
    fn set_min_content_height(&mut self, px: u32);

    /// Scroll the document to `(x, y)`.
    fn scroll_to(&mut self, x: i32, y: i32);

    /// Start a repeating timer. The host must call
    /// [`ScaleManager::sample`](crate::ScaleManager::sample) on every tick
    /// until the handle is cancelled. Returns `None` if no timer could be
    /// started, in which case no ticks will arrive.
    fn start_interval(&mut self, period: Duration) -> Option<TimerHandle>;

    /// Stop a timer started by [`start_interval`](Self::start_interval).
    fn cancel_interval(&mut self, handle: TimerHandle);

    /// Whether the surface element exposes `api`'s request method.
    fn supports_fullscreen_request(&self, _api: FullscreenApi) -> bool {
        false
    }

    /// Whether the document exposes `api`'s cancel method.
    fn supports_fullscreen_cancel(&self, _api: FullscreenApi) -> bool {
        false
    }

    fn request_fullscreen(&mut self, _api: FullscreenApi) {}

    fn cancel_fullscreen(&mut self, _api: FullscreenApi) {}

    fn is_fullscreen(&self) -> bool {
        false
    }
}

/// The host object owning the drawable surface.
pub trait Stage {
    /// Fixed design resolution of the content.
    fn logical_size(&self) -> Size;

    /// Active scale mode.
    fn scale_mode(&self) -> ScaleMode;

    /// Set the surface's presented (CSS) size.
    fn set_display_size(&mut self, size: Size);

    /// Offset the surface inside the page. Only called when alignment is on.
    fn set_display_margin(&mut self, _margin: Margin) {}
}

/// Pointer-coordinate translation in the input subsystem.
pub trait InputScale {
    fn set_input_scale(&mut self, scale: ScaleFactor);
}

impl InputScale for ScaleFactor {
    fn set_input_scale(&mut self, scale: ScaleFactor) {
        *self = scale;
    }
}
