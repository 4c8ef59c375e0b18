//! Event Listener Hook

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::Latest;

/// Attaches listeners to event targets. Dropping a binding detaches it.
pub trait ListenerHost: 'static {
    type Target: 'static;
    type Event: 'static;
    type Binding: 'static;

    fn bind(&self, target: Self::Target, event: &str, handler: Latest<Self::Event>) -> Option<Self::Binding>;
}

/// `addEventListener` on DOM targets
#[derive(Clone, Copy, Debug, Default)]
pub struct DomListeners;

/// A live `addEventListener` registration, removed on drop.
pub struct DomBinding {
    target: web_sys::EventTarget,
    event: String,
    listener: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for DomBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.listener.as_ref().unchecked_ref());
    }
}

impl ListenerHost for DomListeners {
    type Target = web_sys::EventTarget;
    type Event = web_sys::Event;
    type Binding = DomBinding;

    fn bind(&self, target: web_sys::EventTarget, event: &str, handler: Latest<web_sys::Event>) -> Option<DomBinding> {
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| handler.call(ev));
        match target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
            Ok(()) => Some(DomBinding { target, event: event.to_string(), listener }),
            Err(err) => {
                tracing::warn!(event = %event, error = ?err, "failed to attach event listener");
                None
            }
        }
    }
}

/// The current binding of one hook instance.
struct ListenerSlot<H: ListenerHost> {
    host: H,
    handler: Latest<H::Event>,
    binding: Option<H::Binding>,
}

impl<H: ListenerHost> ListenerSlot<H> {
    fn new(host: H, handler: Latest<H::Event>) -> Self {
        Self { host, handler, binding: None }
    }

    /// Detach the current listener, then attach to `target` if there is one.
    fn rebind(&mut self, target: Option<H::Target>, event: &str) {
        // Detach first so the same target never holds two listeners.
        self.binding = None;
        self.binding = target.and_then(|t| self.host.bind(t, event, self.handler.clone()));
    }
}

/// Bind `handler` to `event` on the target returned by `target`.
///
/// `target` and `event` are tracked: when either changes the old listener
/// is detached and a new one attached. A `None` target binds nothing.
/// The listener always calls the handler last passed to `Latest::replace`.
pub fn use_event_listener<T, F>(
    target: T,
    event: impl Into<Signal<String>>,
    handler: F,
) -> Latest<web_sys::Event>
where
    T: Fn() -> Option<web_sys::EventTarget> + 'static,
    F: FnMut(web_sys::Event) + 'static,
{
    use_event_listener_with(DomListeners, target, event, handler)
}

/// `use_event_listener` on an explicit listener host.
pub fn use_event_listener_with<H, T, F>(
    host: H,
    target: T,
    event: impl Into<Signal<String>>,
    handler: F,
) -> Latest<H::Event>
where
    H: ListenerHost,
    T: Fn() -> Option<H::Target> + 'static,
    F: FnMut(H::Event) + 'static,
{
    let saved = Latest::new(handler);
    let event = event.into();
    let slot = StoredValue::new_local(ListenerSlot::new(host, saved.clone()));

    Effect::new(move |_| {
        let name = event.get();
        let next = target();
        slot.update_value(|slot| slot.rebind(next, &name));
    });

    saved
}
