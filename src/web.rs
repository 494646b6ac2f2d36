//! Browser backend over `web-sys`.
//!
//! [`WebWindow`] implements [`Viewport`] on the global `window`, and
//! [`CanvasStage`] implements [`Stage`] on an `HtmlCanvasElement` whose
//! backing store (`width`/`height` attributes) is the logical size and whose
//! CSS size is the display size. [`attach`] wires window events and the
//! polling interval to a shared [`ScaleManager`].
//!
//! ```ignore
//! let canvas: HtmlCanvasElement = /* … */;
//! let manager = ScaleManager::new(
//!     WebWindow::new(canvas.clone())?,
//!     CanvasStage::new(canvas, ScaleMode::ShowAll),
//!     ScaleFactor::IDENTITY,
//!     platform,
//!     StageConfig::new(),
//! );
//! let attached = attach(manager, |event| log_orientation(event))?;
//! // once per animation frame:
//! attached.update();
//! ```

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlCanvasElement, HtmlElement, Window};

use crate::fullscreen::FullscreenApi;
use crate::host::{InputScale, Stage, TimerHandle, Viewport};
use crate::manager::ScaleManager;
use crate::orientation::{OrientationCheck, OrientationEvent};
use crate::scale::{Margin, ScaleMode, Size};

/// `Element.ALLOW_KEYBOARD_INPUT`, passed to the webkit request.
const ALLOW_KEYBOARD_INPUT: u32 = 1;

/// Browser backend setup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("failed to listen for `{event}`: {message}")]
    Listener {
        event: &'static str,
        message: String,
    },
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn read_px(value: Result<JsValue, JsValue>) -> u32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(0, |v| v.max(0.0) as u32)
}

fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn has_method(target: &JsValue, name: &str) -> bool {
    property(target, name).is_some_and(|v| v.is_function())
}

fn call_method(target: &JsValue, name: &str, arg: Option<&JsValue>) {
    let Some(func) = property(target, name).and_then(|v| v.dyn_into::<Function>().ok()) else {
        tracing::warn!(name, "method vanished after probing");
        return;
    };
    let result = match arg {
        Some(arg) => func.call1(target, arg),
        None => func.call0(target),
    };
    if let Err(e) = result {
        tracing::warn!(name, error = %js_message(&e), "call failed");
    }
}

/// The global browser window, plus the canvas used for fullscreen requests.
pub struct WebWindow {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    tick: Option<Closure<dyn FnMut()>>,
}

impl core::fmt::Debug for WebWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebWindow")
            .field("canvas", &self.canvas)
            .field("tick_installed", &self.tick.is_some())
            .finish_non_exhaustive()
    }
}

impl WebWindow {
    /// Bind to the global window. `canvas` is the fullscreen target.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Self {
            window,
            document,
            canvas,
            tick: None,
        })
    }

    /// The underlying browser window.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Viewport for WebWindow {
    fn inner_size(&self) -> Size {
        Size::new(
            read_px(self.window.inner_width()),
            read_px(self.window.inner_height()),
        )
    }

    fn outer_size(&self) -> Size {
        Size::new(
            read_px(self.window.outer_width()),
            read_px(self.window.outer_height()),
        )
    }

    fn native_orientation(&self) -> Option<i32> {
        property(self.window.as_ref(), "orientation")
            .and_then(|v| v.as_f64())
            .map(|angle| angle as i32)
    }

    fn set_min_content_height(&mut self, px: u32) {
        let Some(root) = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(e) = root.style().set_property("min-height", &format!("{px}px")) {
            tracing::warn!(error = %js_message(&e), "could not set min-height");
        }
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        self.window.scroll_to_with_x_and_y(x as f64, y as f64);
    }

    fn start_interval(&mut self, period: Duration) -> Option<TimerHandle> {
        let Some(tick) = &self.tick else {
            tracing::warn!("interval requested before attach");
            return None;
        };
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(id) => Some(TimerHandle(id)),
            Err(e) => {
                tracing::warn!(error = %js_message(&e), "setInterval failed");
                None
            }
        }
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        self.window.clear_interval_with_handle(handle.0);
    }

    fn supports_fullscreen_request(&self, api: FullscreenApi) -> bool {
        has_method(self.canvas.as_ref(), api.request_method())
    }

    fn supports_fullscreen_cancel(&self, api: FullscreenApi) -> bool {
        has_method(self.document.as_ref(), api.cancel_method())
    }

    fn request_fullscreen(&mut self, api: FullscreenApi) {
        let arg = JsValue::from(ALLOW_KEYBOARD_INPUT);
        let arg = (api == FullscreenApi::Webkit).then_some(&arg);
        call_method(self.canvas.as_ref(), api.request_method(), arg);
    }

    fn cancel_fullscreen(&mut self, api: FullscreenApi) {
        call_method(self.document.as_ref(), api.cancel_method(), None);
    }

    fn is_fullscreen(&self) -> bool {
        let doc = self.document.as_ref();
        property(doc, "fullscreenElement").is_some()
            || property(doc, "mozFullScreen").is_some_and(|v| v.is_truthy())
            || property(doc, "webkitIsFullScreen").is_some_and(|v| v.is_truthy())
    }
}

/// A canvas whose attribute size is the logical size.
#[derive(Debug, Clone)]
pub struct CanvasStage {
    canvas: HtmlCanvasElement,
    mode: ScaleMode,
}

impl CanvasStage {
    /// Wrap `canvas`, scaled with `mode`.
    pub fn new(canvas: HtmlCanvasElement, mode: ScaleMode) -> Self {
        Self { canvas, mode }
    }

    /// The wrapped canvas.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Change the mode. Takes effect on the next refresh.
    pub fn set_scale_mode(&mut self, mode: ScaleMode) {
        self.mode = mode;
    }

    fn set_style(&self, name: &str, px: u32) {
        if let Err(e) = self.canvas.style().set_property(name, &format!("{px}px")) {
            tracing::warn!(name, error = %js_message(&e), "could not style canvas");
        }
    }
}

impl Stage for CanvasStage {
    fn logical_size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }

    fn scale_mode(&self) -> ScaleMode {
        self.mode
    }

    fn set_display_size(&mut self, size: Size) {
        self.set_style("width", size.width);
        self.set_style("height", size.height);
    }

    fn set_display_margin(&mut self, margin: Margin) {
        self.set_style("margin-left", margin.x);
        self.set_style("margin-top", margin.y);
    }
}

/// A [`ScaleManager`] over the browser backend.
pub type WebScaleManager<I> = ScaleManager<WebWindow, CanvasStage, I>;

type Listener = (&'static str, Closure<dyn FnMut(Event)>);

/// A manager with live window listeners. Dropping it detaches them and
/// cancels any active polling interval.
pub struct Attached<I: 'static> {
    manager: Rc<RefCell<WebScaleManager<I>>>,
    window: Window,
    listeners: Vec<Listener>,
}

/// Install `orientationchange` and `resize` listeners and the polling tick.
///
/// `on_orientation` receives every transition event after the manager has
/// handled it.
pub fn attach<I, F>(
    manager: WebScaleManager<I>,
    on_orientation: F,
) -> Result<Attached<I>, WebError>
where
    I: InputScale + 'static,
    F: FnMut(OrientationEvent) + 'static,
{
    let window = manager.viewport().window.clone();
    let manager = Rc::new(RefCell::new(manager));

    let weak = Rc::downgrade(&manager);
    let tick = Closure::<dyn FnMut()>::new(move || {
        if let Some(m) = weak.upgrade() {
            m.borrow_mut().sample();
        }
    });
    manager.borrow_mut().viewport_mut().tick = Some(tick);

    let on_orientation = Rc::new(RefCell::new(on_orientation));
    let mut listeners: Vec<Listener> = Vec::new();
    for event in ["orientationchange", "resize"] {
        let weak = Rc::downgrade(&manager);
        let on_orientation = Rc::clone(&on_orientation);
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let Some(m) = weak.upgrade() else {
                return;
            };
            let transition = {
                let mut m = m.borrow_mut();
                if event == "resize" {
                    m.handle_resize()
                } else {
                    m.handle_orientation_change()
                }
            };
            let mut callback = on_orientation.borrow_mut();
            (&mut *callback)(transition);
        });
        if let Err(e) =
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            remove_listeners(&window, &listeners);
            return Err(WebError::Listener {
                event,
                message: js_message(&e),
            });
        }
        listeners.push((event, closure));
    }

    Ok(Attached {
        manager,
        window,
        listeners,
    })
}

impl<I: InputScale + 'static> Attached<I> {
    /// Per-frame consistency check. Call once per animation frame.
    pub fn update(&self) -> Option<OrientationCheck> {
        self.manager.borrow_mut().update()
    }

    /// Kick off a refresh, e.g. right after attaching.
    pub fn refresh(&self) -> bool {
        self.manager.borrow_mut().refresh()
    }

    /// See [`ScaleManager::start_full_screen`].
    pub fn start_full_screen(&self) -> bool {
        self.manager.borrow_mut().start_full_screen()
    }

    /// See [`ScaleManager::stop_full_screen`].
    pub fn stop_full_screen(&self) -> bool {
        self.manager.borrow_mut().stop_full_screen()
    }

    /// The shared manager.
    pub fn manager(&self) -> &Rc<RefCell<WebScaleManager<I>>> {
        &self.manager
    }
}

/// Unregister `listeners` from `window`. Must run before their closures drop.
fn remove_listeners(window: &Window, listeners: &[Listener]) {
    for (event, closure) in listeners {
        let _ = window.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
}

impl<I: 'static> Drop for Attached<I> {
    fn drop(&mut self) {
        remove_listeners(&self.window, &self.listeners);
        if let Ok(m) = self.manager.try_borrow()
            && let Some(run) = m.stabilizer().run()
        {
            self.window.clear_interval_with_handle(run.timer().0);
        }
    }
}
