//! Fullscreen request/cancel over vendor-specific API variants.
//!
//! Browsers expose fullscreen under different names. The available
//! variant is probed once, in preference order, when the controller is
//! built; requests then go straight to the resolved variant.

/// A fullscreen API family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    /// `requestFullscreen` / `exitFullscreen`.
    Standard,
    /// `mozRequestFullScreen` / `mozCancelFullScreen`.
    Moz,
    /// `webkitRequestFullScreen` / `webkitCancelFullScreen`.
    Webkit,
}

impl FullscreenApi {
    /// Probe order.
    pub const PREFERENCE: [Self; 3] = [Self::Standard, Self::Moz, Self::Webkit];

    /// Element method that enters fullscreen.
    pub const fn request_method(self) -> &'static str {
        match self {
            Self::Standard => "requestFullscreen",
            Self::Moz => "mozRequestFullScreen",
            Self::Webkit => "webkitRequestFullScreen",
        }
    }

    /// Document method that leaves fullscreen.
    pub const fn cancel_method(self) -> &'static str {
        match self {
            Self::Standard => "exitFullscreen",
            Self::Moz => "mozCancelFullScreen",
            Self::Webkit => "webkitCancelFullScreen",
        }
    }
}

/// Resolved request and cancel variants. Either may be absent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fullscreen {
    request: Option<FullscreenApi>,
    cancel: Option<FullscreenApi>,
}

impl Fullscreen {
    /// No fullscreen support. Requests and cancels are no-ops.
    pub const UNSUPPORTED: Self = Self {
        request: None,
        cancel: None,
    };

    /// Pick the first supported variant for each direction.
    ///
    /// Request and cancel are resolved separately, since some engines
    /// shipped one prefixed half before the other.
    pub fn resolve(
        supports_request: impl Fn(FullscreenApi) -> bool,
        supports_cancel: impl Fn(FullscreenApi) -> bool,
    ) -> Self {
        let request = FullscreenApi::PREFERENCE
            .into_iter()
            .find(|&api| supports_request(api));
        let cancel = FullscreenApi::PREFERENCE
            .into_iter()
            .find(|&api| supports_cancel(api));
        tracing::debug!(?request, ?cancel, "fullscreen api resolved");
        Self { request, cancel }
    }

    /// Variant used to enter fullscreen.
    pub fn request_api(&self) -> Option<FullscreenApi> {
        self.request
    }

    /// Variant used to leave fullscreen.
    pub fn cancel_api(&self) -> Option<FullscreenApi> {
        self.cancel
    }
}
