//! Browser bindings for the orbit controls.
//!
//! ARCHITECTURE
//! ============
//! `OrbitControls` is the handle the host page constructs. It shares one
//! [`EngineCore`] with four touch listeners on the canvas, applies the
//! returned [`Action`]s (prevent-default, indicator) and writes transforms
//! into the framework's `object3D` through [`JsTarget`]. Listeners are
//! attached while the controls are enabled and removed when disabled or
//! dropped. With a `target` selector configured, the matching entity's
//! `object3D` is bound at construction and re-bound on every `model-ready`
//! document event.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, HtmlCanvasElement, HtmlElement, TouchEvent, TouchList};

use crate::config::OrbitConfig;
use crate::consts::INDICATOR_DURATION_MS;
use crate::engine::{Action, EngineCore};
use crate::indicator::Indicator;
use crate::input::TouchSample;
use crate::target::ModelTarget;

const INDICATOR_ID: &str = "orbit-indicator";
const MODEL_READY_EVENT: &str = "model-ready";

const INDICATOR_STYLE: [(&str, &str); 11] = [
    ("position", "absolute"),
    ("top", "50%"),
    ("left", "50%"),
    ("width", "50px"),
    ("height", "50px"),
    ("transform", "translate(-50%, -50%)"),
    ("border-radius", "50%"),
    ("border", "2px solid rgba(255, 255, 255, 0.5)"),
    ("box-shadow", "0 0 10px rgba(0, 0, 0, 0.5)"),
    ("pointer-events", "none"),
    ("z-index", "1000"),
];

/// Route the `log` facade to the browser console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

// =============================================================================
// OBJECT3D TARGET
// =============================================================================

/// [`ModelTarget`] over a three.js `Object3D` owned by the AR framework.
pub struct JsTarget {
    object3d: JsValue,
}

impl JsTarget {
    #[must_use]
    pub fn new(object3d: JsValue) -> Self {
        Self { object3d }
    }

    fn get(&self, path: &[&str]) -> Result<JsValue, JsValue> {
        let mut value = self.object3d.clone();
        for key in path {
            value = Reflect::get(&value, &JsValue::from_str(key))?;
        }
        Ok(value)
    }

    fn set_number(&self, path: &[&str], field: &str, number: f64) {
        let result = self
            .get(path)
            .and_then(|owner| Reflect::set(&owner, &JsValue::from_str(field), &JsValue::from_f64(number)));
        if let Err(e) = result {
            log::warn!("object3D.{}.{field} not writable: {e:?}", path.join("."));
        }
    }
}

impl ModelTarget for JsTarget {
    fn is_visible(&self) -> bool {
        match self.get(&["visible"]) {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                log::warn!("object3D.visible not readable: {e:?}");
                false
            }
        }
    }

    fn scale(&self) -> f64 {
        match self.get(&["scale", "x"]) {
            Ok(value) => value.as_f64().unwrap_or(1.0),
            Err(e) => {
                log::warn!("object3D.scale.x not readable: {e:?}");
                1.0
            }
        }
    }

    fn set_rotation_y(&mut self, radians: f64) {
        self.set_number(&["rotation"], "y", radians);
    }

    fn set_uniform_scale(&mut self, scale: f64) {
        for axis in ["x", "y", "z"] {
            self.set_number(&["scale"], axis, scale);
        }
    }
}

/// Find the entity matching `selector` and wrap its `object3D`.
fn resolve_target(selector: &str) -> Option<JsTarget> {
    let document = web_sys::window()?.document()?;
    let element = match document.query_selector(selector) {
        Ok(Some(element)) => element,
        Ok(None) => {
            log::warn!("orbit target '{selector}' not found");
            return None;
        }
        Err(e) => {
            log::warn!("orbit target '{selector}' is not a valid selector: {e:?}");
            return None;
        }
    };
    match Reflect::get(&element, &JsValue::from_str("object3D")) {
        Ok(object3d) if object3d.is_object() => Some(JsTarget::new(object3d)),
        Ok(_) => {
            log::warn!("orbit target '{selector}' has no object3D yet");
            None
        }
        Err(e) => {
            log::warn!("orbit target '{selector}' object3D not readable: {e:?}");
            None
        }
    }
}

// =============================================================================
// EVENT HOST
// =============================================================================

/// State shared between the exported handle and its listeners.
#[derive(Clone)]
struct Host {
    core: Rc<RefCell<EngineCore<JsTarget>>>,
    indicator: Rc<RefCell<Indicator>>,
    indicator_el: Option<HtmlElement>,
    selector: Option<String>,
}

impl Host {
    /// Bind the configured selector's `object3D`, if it resolves.
    fn retarget(&self) {
        let Some(target) = self.selector.as_deref().and_then(resolve_target) else {
            return;
        };
        if self.core.borrow_mut().bind_target(target).is_some() {
            log::debug!("orbit controls rebound to the current model");
        }
    }

    fn dispatch(&self, event: &TouchEvent, actions: &[Action]) {
        for action in actions {
            match action {
                Action::PreventDefault => event.prevent_default(),
                Action::GestureStarted(kind) => {
                    log::debug!("{} gesture started", kind.as_str());
                    self.show_indicator();
                }
                Action::GestureEnded
                | Action::RotationChanged { .. }
                | Action::ScaleChanged { .. }
                | Action::DistanceChanged { .. } => {}
            }
        }
    }

    fn show_indicator(&self) {
        let Some(element) = self.indicator_el.clone() else {
            return;
        };
        let ticket = self.indicator.borrow_mut().show();
        set_display(&element, "block");

        let indicator = Rc::clone(&self.indicator);
        Timeout::new(INDICATOR_DURATION_MS, move || {
            if indicator.borrow_mut().expire(ticket) {
                set_display(&element, "none");
            }
        })
        .forget();
    }
}

fn set_display(element: &HtmlElement, value: &str) {
    if let Err(e) = element.style().set_property("display", value) {
        log::warn!("indicator display not set: {e:?}");
    }
}

fn create_indicator_element() -> Option<HtmlElement> {
    let document = web_sys::window()?.document()?;
    let body = document.body()?;
    let element = match document.create_element("div").map(|el| el.dyn_into::<HtmlElement>()) {
        Ok(Ok(element)) => element,
        Ok(Err(_)) | Err(_) => {
            log::warn!("indicator element could not be created");
            return None;
        }
    };
    element.set_id(INDICATOR_ID);
    let style = element.style();
    for (property, value) in INDICATOR_STYLE {
        if let Err(e) = style.set_property(property, value) {
            log::warn!("indicator style {property} not set: {e:?}");
        }
    }
    set_display(&element, "none");
    if let Err(e) = body.append_child(&element) {
        log::warn!("indicator element not attached: {e:?}");
        return None;
    }
    Some(element)
}

fn touch_samples(list: &TouchList) -> Vec<TouchSample> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchSample::new(t.identifier(), f64::from(t.page_x()), f64::from(t.page_y())))
        .collect()
}

// =============================================================================
// LISTENERS
// =============================================================================

type TouchHandler = Closure<dyn FnMut(TouchEvent)>;
type EventHandler = Closure<dyn FnMut(Event)>;

struct Listeners {
    start: TouchHandler,
    moved: TouchHandler,
    end: TouchHandler,
    cancel: TouchHandler,
}

impl Listeners {
    fn new(host: &Host) -> Self {
        Self {
            start: handler(host, |core, e| core.on_touch_start(&touch_samples(&e.touches()))),
            moved: handler(host, |core, e| core.on_touch_move(&touch_samples(&e.touches()))),
            end: handler(host, |core, _| core.on_touch_end()),
            cancel: handler(host, |core, _| core.on_touch_cancel()),
        }
    }

    fn bindings(&self) -> [(&'static str, &TouchHandler); 4] {
        [
            ("touchstart", &self.start),
            ("touchmove", &self.moved),
            ("touchend", &self.end),
            ("touchcancel", &self.cancel),
        ]
    }

    fn attach(&self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        // Non-passive so preventDefault can stop page scrolling.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        for (name, handler) in self.bindings() {
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                handler.as_ref().unchecked_ref(),
                &options,
            )?;
        }
        Ok(())
    }

    fn detach(&self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        for (name, handler) in self.bindings() {
            canvas.remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

fn handler<F>(host: &Host, on_event: F) -> TouchHandler
where
    F: Fn(&mut EngineCore<JsTarget>, &TouchEvent) -> Vec<Action> + 'static,
{
    let host = host.clone();
    Closure::wrap(Box::new(move |event: TouchEvent| {
        let actions = on_event(&mut *host.core.borrow_mut(), &event);
        host.dispatch(&event, &actions);
    }) as Box<dyn FnMut(TouchEvent)>)
}

fn watch_model_ready(host: &Host) -> Option<EventHandler> {
    let document = web_sys::window()?.document()?;
    let host = host.clone();
    let handler = Closure::wrap(Box::new(move |_: Event| host.retarget()) as Box<dyn FnMut(Event)>);
    if let Err(e) = document.add_event_listener_with_callback(MODEL_READY_EVENT, handler.as_ref().unchecked_ref()) {
        log::warn!("{MODEL_READY_EVENT} listener not attached: {e:?}");
        return None;
    }
    Some(handler)
}

// =============================================================================
// EXPORTED HANDLE
// =============================================================================

/// Touch orbit controls bound to one canvas.
#[wasm_bindgen]
pub struct OrbitControls {
    canvas: HtmlCanvasElement,
    host: Host,
    listeners: Listeners,
    attached: bool,
    model_ready: Option<EventHandler>,
}

#[wasm_bindgen]
impl OrbitControls {
    /// Create controls for `canvas` from a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the listeners can't be attached.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<OrbitControls, JsError> {
        let config = OrbitConfig::from_json(config_json)?;
        let enabled = config.enabled;
        let host = Host {
            indicator: Rc::new(RefCell::new(Indicator::new(config.indicator))),
            selector: config.target_selector().map(str::to_owned),
            core: Rc::new(RefCell::new(EngineCore::new(config))),
            indicator_el: create_indicator_element(),
        };
        host.retarget();
        let model_ready = host.selector.as_ref().and_then(|_| watch_model_ready(&host));
        let listeners = Listeners::new(&host);
        let mut controls = Self { canvas, host, listeners, attached: false, model_ready };
        controls.set_listening(enabled)?;
        Ok(controls)
    }

    /// Bind the framework object the gestures rotate and scale.
    #[wasm_bindgen(js_name = bindTarget)]
    pub fn bind_target(&self, object3d: JsValue) {
        if self.host.core.borrow_mut().bind_target(JsTarget::new(object3d)).is_some() {
            log::info!("orbit controls rebound to a new model");
        }
    }

    /// Release the bound object; gestures are ignored until another is bound.
    #[wasm_bindgen(js_name = unbindTarget)]
    pub fn unbind_target(&self) {
        if self.host.core.borrow_mut().unbind_target().is_some() {
            log::info!("orbit controls unbound");
        }
    }

    /// Enable or disable gestures, attaching or detaching the touch listeners.
    ///
    /// # Errors
    ///
    /// Fails if the browser rejects a listener change.
    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), JsError> {
        self.host.core.borrow_mut().set_enabled(enabled);
        self.set_listening(enabled)
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.host.core.borrow().is_enabled()
    }

    pub fn yaw(&self) -> f64 {
        self.host.core.borrow().yaw()
    }

    pub fn scale(&self) -> Option<f64> {
        self.host.core.borrow().scale()
    }

    pub fn distance(&self) -> f64 {
        self.host.core.borrow().distance()
    }

    /// Active gesture: `idle`, `orbit` or `pinch`.
    pub fn gesture(&self) -> String {
        self.host.core.borrow().state().label().to_owned()
    }
}

impl OrbitControls {
    fn set_listening(&mut self, listening: bool) -> Result<(), JsError> {
        let result = match (listening, self.attached) {
            (true, false) => self.listeners.attach(&self.canvas),
            (false, true) => self.listeners.detach(&self.canvas),
            _ => return Ok(()),
        };
        result.map_err(|e| JsError::new(&format!("touch listeners: {e:?}")))?;
        self.attached = listening;
        Ok(())
    }
}

impl Drop for OrbitControls {
    fn drop(&mut self) {
        if self.attached {
            if let Err(e) = self.listeners.detach(&self.canvas) {
                log::warn!("touch listeners not removed: {e:?}");
            }
        }
        if let Some(handler) = &self.model_ready {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Err(e) =
                    document.remove_event_listener_with_callback(MODEL_READY_EVENT, handler.as_ref().unchecked_ref())
                {
                    log::warn!("{MODEL_READY_EVENT} listener not removed: {e:?}");
                }
            }
        }
        if let Some(element) = &self.host.indicator_el {
            element.remove();
        }
    }
}
