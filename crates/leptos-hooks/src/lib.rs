//! Leptos Hook Utilities
//!
//! Small reactive helpers that bind browser resources to the lifetime of
//! the owning Leptos scope:
//! - `use_interval`: periodic callback
//! - `use_script`: deduplicated external script loading
//! - `use_event_listener`: DOM event binding

mod event_listener;
mod interval;
mod latest;
mod script;

pub use event_listener::{use_event_listener, use_event_listener_with, DomBinding, DomListeners, ListenerHost};
pub use interval::{use_interval, use_interval_with, BrowserTimers, TimerHost};
pub use latest::Latest;
pub use script::{
    use_script, DomScript, DomScriptHost, ScriptHost, ScriptLoad, ScriptRegistry, ScriptSource,
    ScriptState,
};
