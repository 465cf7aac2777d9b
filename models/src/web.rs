//! Browser bindings: writing load directives onto an A-Frame entity and
//! following its load lifecycle.
//!
//! `ModelSelector::attach` listens for the entity's `model-loaded` and
//! `model-error` events. A loaded model fades out the page's
//! `#loading-screen` (class `hidden`, then `display: none` after 600 ms); an
//! error is logged. Both are recorded as the loader's [`LoadStatus`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement};

use crate::loader::{LoadDirective, LoadStatus, ModelLoader};
use crate::registry::{ModelRegistry, RegistryError};

const MODEL_LOADED_EVENT: &str = "model-loaded";
const MODEL_ERROR_EVENT: &str = "model-error";
const LOADING_SCREEN_ID: &str = "loading-screen";
const LOADING_HIDDEN_CLASS: &str = "hidden";
const LOADING_FADE_MS: u32 = 600;

#[derive(Debug, thiserror::Error)]
enum SelectError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("model entity: {0}")]
    Dom(String),
}

fn dom_error(e: JsValue) -> SelectError {
    SelectError::Dom(format!("{e:?}"))
}

/// Apply `directive` to `element`: clear the loader components, then set
/// each attribute in order.
///
/// # Errors
///
/// Returns the DOM exception if an attribute can't be changed.
pub fn apply_directive(element: &Element, directive: &LoadDirective) -> Result<(), JsValue> {
    for name in &directive.remove {
        element.remove_attribute(name)?;
    }
    for (name, value) in &directive.set {
        element.set_attribute(name, value)?;
    }
    Ok(())
}

fn hide_loading_screen() {
    let Some(screen) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(LOADING_SCREEN_ID))
    else {
        return;
    };
    if let Err(e) = screen.class_list().add_1(LOADING_HIDDEN_CLASS) {
        log::warn!("loading screen class not set: {e:?}");
    }
    let Ok(screen) = screen.dyn_into::<HtmlElement>() else {
        return;
    };
    Timeout::new(LOADING_FADE_MS, move || {
        if let Err(e) = screen.style().set_property("display", "none") {
            log::warn!("loading screen not hidden: {e:?}");
        }
    })
    .forget();
}

fn event_detail(event: &Event) -> String {
    match event.dyn_ref::<web_sys::CustomEvent>() {
        Some(custom) => format!("{:?}", custom.detail()),
        None => event.type_(),
    }
}

// =============================================================================
// ENTITY LISTENERS
// =============================================================================

type EventHandler = Closure<dyn FnMut(Event)>;

struct EntityListeners {
    entity: Element,
    loaded: EventHandler,
    failed: EventHandler,
}

impl EntityListeners {
    fn new(entity: &Element, loader: &Rc<RefCell<ModelLoader>>) -> Self {
        let on_loaded = Rc::clone(loader);
        let on_failed = Rc::clone(loader);
        Self {
            entity: entity.clone(),
            loaded: Closure::wrap(Box::new(move |_: Event| {
                match on_loaded.try_borrow_mut() {
                    Ok(mut loader) => loader.mark_loaded(),
                    Err(_) => log::warn!("{MODEL_LOADED_EVENT} arrived during a load; status not updated"),
                }
                hide_loading_screen();
            }) as Box<dyn FnMut(Event)>),
            failed: Closure::wrap(Box::new(move |event: Event| {
                let detail = event_detail(&event);
                log::error!("error loading model: {detail}");
                match on_failed.try_borrow_mut() {
                    Ok(mut loader) => loader.mark_failed(detail),
                    Err(_) => log::warn!("{MODEL_ERROR_EVENT} arrived during a load; status not updated"),
                }
            }) as Box<dyn FnMut(Event)>),
        }
    }

    fn bindings(&self) -> [(&'static str, &EventHandler); 2] {
        [(MODEL_LOADED_EVENT, &self.loaded), (MODEL_ERROR_EVENT, &self.failed)]
    }

    fn attach(&self) -> Result<(), JsValue> {
        for (name, handler) in self.bindings() {
            self.entity.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        }
        Ok(())
    }

    fn detach(&self) {
        for (name, handler) in self.bindings() {
            if let Err(e) = self.entity.remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref()) {
                log::warn!("{name} listener not removed: {e:?}");
            }
        }
    }
}

// =============================================================================
// EXPORTED HANDLE
// =============================================================================

/// Model picker state bound to the host page.
#[wasm_bindgen]
pub struct ModelSelector {
    loader: Rc<RefCell<ModelLoader>>,
    listeners: Option<EntityListeners>,
}

#[wasm_bindgen]
impl ModelSelector {
    /// Selector over the built-in models of `project`.
    #[wasm_bindgen(constructor)]
    pub fn new(project: &str) -> ModelSelector {
        Self::with_registry(ModelRegistry::for_project(project))
    }

    /// Selector over a JSON catalog of model definitions.
    ///
    /// # Errors
    ///
    /// Fails if the catalog is malformed.
    #[wasm_bindgen(js_name = fromCatalog)]
    pub fn from_catalog(catalog_json: &str) -> Result<ModelSelector, JsError> {
        Ok(Self::with_registry(ModelRegistry::from_json(catalog_json)?))
    }

    /// Follow `entity`'s load events, replacing any previously attached
    /// entity.
    ///
    /// # Errors
    ///
    /// Fails if the entity rejects a listener.
    pub fn attach(&mut self, entity: &Element) -> Result<(), JsError> {
        if let Some(previous) = self.listeners.take() {
            previous.detach();
        }
        let listeners = EntityListeners::new(entity, &self.loader);
        if let Err(e) = listeners.attach() {
            listeners.detach();
            return Err(dom_error(e).into());
        }
        self.listeners = Some(listeners);
        Ok(())
    }

    /// Load `key` into `entity`. The selection only changes once every
    /// attribute was applied.
    ///
    /// # Errors
    ///
    /// Fails if `key` is unknown or the entity rejects an attribute.
    pub fn load(&mut self, entity: &Element, key: &str) -> Result<(), JsError> {
        let result = self
            .loader
            .borrow_mut()
            .load(key, |directive| apply_directive(entity, directive).map_err(dom_error));
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("{e}");
                Err(e.into())
            }
        }
    }

    /// Re-apply the current model to `entity`; returns whether one was selected.
    ///
    /// # Errors
    ///
    /// Fails if the entity rejects an attribute.
    pub fn reload(&mut self, entity: &Element) -> Result<bool, JsError> {
        let result = self
            .loader
            .borrow_mut()
            .reload(|directive| apply_directive(entity, directive).map_err(dom_error));
        match result {
            Ok(directive) => Ok(directive.is_some()),
            Err(e) => {
                log::error!("{e}");
                Err(e.into())
            }
        }
    }

    /// Show or hide the model; returns the new visibility.
    ///
    /// # Errors
    ///
    /// Fails if the entity rejects the attribute; the recorded visibility is
    /// then unchanged.
    #[wasm_bindgen(js_name = setVisible)]
    pub fn set_visible(&mut self, entity: &Element, visible: bool) -> Result<bool, JsError> {
        entity.set_attribute("visible", &visible.to_string()).map_err(dom_error)?;
        Ok(self.loader.borrow_mut().toggle_visibility(visible))
    }

    /// `pending`, `loaded` or `failed`.
    pub fn status(&self) -> String {
        let label = match self.loader.borrow().status() {
            LoadStatus::Pending => "pending",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Failed(_) => "failed",
        };
        label.to_owned()
    }

    /// JSON array of `{key, format, path, name, description}` for a picker.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn available(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.loader.borrow().registry().summaries())?)
    }

    /// JSON description of the current model, or `null`.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn info(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.loader.borrow().info())?)
    }
}

impl ModelSelector {
    fn with_registry(registry: ModelRegistry) -> Self {
        Self { loader: Rc::new(RefCell::new(ModelLoader::new(registry))), listeners: None }
    }
}

impl Drop for ModelSelector {
    fn drop(&mut self) {
        if let Some(listeners) = &self.listeners {
            listeners.detach();
        }
    }
}
