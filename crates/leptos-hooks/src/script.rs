//! Script Loader Hook
//!
//! Appends `<script>` elements to the document body, once per source.
//! Deduplication lives in an explicit `ScriptRegistry` that callers share
//! (usually through context) instead of a process-wide cache.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// What to load: a URL, or script text to inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptSource {
    Url(String),
    Inline(String),
}

impl ScriptSource {
    /// Deduplication key
    pub fn key(&self) -> &str {
        match self {
            ScriptSource::Url(src) | ScriptSource::Inline(src) => src,
        }
    }
}

/// Load progress reported by `use_script`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptState {
    pub loaded: bool,
    pub error: bool,
}

impl ScriptState {
    const READY: Self = Self { loaded: true, error: false };
    const FAILED: Self = Self { loaded: true, error: true };
}

/// The document side of script loading.
///
/// `notify` is called with `true` when the element loads and `false` when
/// it fails.
pub trait ScriptHost: 'static {
    type Element: 'static;
    type Error: std::fmt::Debug;

    fn insert(&self, source: &ScriptSource, notify: Rc<dyn Fn(bool)>) -> Result<Self::Element, Self::Error>;

    /// Remove the element from the document.
    fn remove(&self, element: &Self::Element);

    /// Stop delivering load/error notifications for the element.
    fn detach(&self, element: &Self::Element);
}

struct Registry<H> {
    host: H,
    cached: RefCell<Vec<String>>,
}

impl<H> Registry<H> {
    fn forget(&self, key: &str) {
        self.cached.borrow_mut().retain(|cached| cached != key);
    }
}

/// Shared set of sources that have been requested.
pub struct ScriptRegistry<H: ScriptHost = DomScriptHost> {
    inner: Rc<Registry<H>>,
}

impl<H: ScriptHost> Clone for ScriptRegistry<H> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<H: ScriptHost> ScriptRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            inner: Rc::new(Registry { host, cached: RefCell::new(Vec::new()) }),
        }
    }

    pub fn contains(&self, source: &ScriptSource) -> bool {
        self.inner.cached.borrow().iter().any(|cached| cached == source.key())
    }

    /// Request `source`. A source already in the registry reports ready
    /// immediately and inserts nothing. Otherwise a new element is inserted
    /// and its outcome is reported through `on_state`; on failure the
    /// element and registry entry are removed so a later request retries.
    ///
    /// The returned `ScriptLoad` keeps the notifications alive; dropping it
    /// detaches them.
    pub fn load(
        &self,
        source: &ScriptSource,
        on_state: impl Fn(ScriptState) + 'static,
    ) -> Option<ScriptLoad<H>> {
        if self.contains(source) {
            on_state(ScriptState::READY);
            return None;
        }
        let key = source.key().to_string();
        self.inner.cached.borrow_mut().push(key.clone());

        let element: Rc<OnceCell<H::Element>> = Rc::new(OnceCell::new());
        let registry = Rc::downgrade(&self.inner);
        let weak_element = Rc::downgrade(&element);
        let on_state = Rc::new(on_state);

        let report = on_state.clone();
        let notify: Rc<dyn Fn(bool)> = Rc::new(move |ok| {
            if !ok {
                if let Some(registry) = registry.upgrade() {
                    registry.forget(&key);
                    if let Some(el) = weak_element.upgrade() {
                        if let Some(el) = el.get() {
                            registry.host.remove(el);
                        }
                    }
                }
            }
            report(if ok { ScriptState::READY } else { ScriptState::FAILED });
        });

        match self.inner.host.insert(source, notify) {
            Ok(el) => {
                let _ = element.set(el);
                Some(ScriptLoad { registry: Rc::downgrade(&self.inner), element })
            }
            Err(err) => {
                tracing::warn!(source = %source.key(), error = ?err, "failed to insert script");
                self.inner.forget(source.key());
                on_state(ScriptState::FAILED);
                None
            }
        }
    }
}

/// An in-progress or finished load owned by one hook instance.
pub struct ScriptLoad<H: ScriptHost> {
    registry: Weak<Registry<H>>,
    element: Rc<OnceCell<H::Element>>,
}

impl<H: ScriptHost> Drop for ScriptLoad<H> {
    fn drop(&mut self) {
        if let (Some(registry), Some(el)) = (self.registry.upgrade(), self.element.get()) {
            registry.host.detach(el);
        }
    }
}

// ========================
// Browser host
// ========================

/// Appends real `<script>` elements to `document.body`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomScriptHost;

pub struct DomScript {
    element: web_sys::HtmlScriptElement,
    on_load: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut()>,
}

impl ScriptHost for DomScriptHost {
    type Element = DomScript;
    type Error = JsValue;

    fn insert(&self, source: &ScriptSource, notify: Rc<dyn Fn(bool)>) -> Result<DomScript, JsValue> {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or_else(|| JsValue::from_str("document is not available"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;

        let element: web_sys::HtmlScriptElement = document
            .create_element("script")?
            .dyn_into()
            .map_err(JsValue::from)?;
        match source {
            ScriptSource::Url(src) => {
                element.set_src(src);
                element.set_async(true);
            }
            ScriptSource::Inline(code) => element.set_text(code)?,
        }

        let loaded = notify.clone();
        let on_load = Closure::<dyn FnMut()>::new(move || loaded(true));
        let on_error = Closure::<dyn FnMut()>::new(move || notify(false));
        element.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        element.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;

        body.append_child(&element)?;
        Ok(DomScript { element, on_load, on_error })
    }

    fn remove(&self, script: &DomScript) {
        script.element.remove();
    }

    fn detach(&self, script: &DomScript) {
        let _ = script
            .element
            .remove_event_listener_with_callback("load", script.on_load.as_ref().unchecked_ref());
        let _ = script
            .element
            .remove_event_listener_with_callback("error", script.on_error.as_ref().unchecked_ref());
    }
}

/// Load `source` through `registry` and expose its state as a signal.
///
/// Listeners are detached when the owning scope is disposed; the element
/// itself stays in the document.
pub fn use_script<H: ScriptHost>(registry: &ScriptRegistry<H>, source: ScriptSource) -> ReadSignal<ScriptState> {
    let (state, set_state) = signal(ScriptState::default());
    let load = registry.load(&source, move |next| set_state.set(next));
    // Owned by the reactive scope so disposal drops (and detaches) it.
    StoredValue::new_local(load);
    state
}
