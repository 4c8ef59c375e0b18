//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_hooks::{DomScriptHost, ScriptRegistry};

use crate::store::{store_dispatch, Action, AppStore};
use crate::sync::SyncStatus;
use crate::time::now_ms;

/// Script registry handle; the registry is `Rc`-based so it lives in
/// local storage.
pub type ScriptRegistryHandle = StoredValue<ScriptRegistry<DomScriptHost>, LocalStorage>;

/// App-wide store and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Application state
    pub store: AppStore,
    /// Sync indicator - read
    pub sync_status: ReadSignal<SyncStatus>,
    /// Sync indicator - write
    set_sync_status: WriteSignal<SyncStatus>,
    /// Shared script loader registry
    pub scripts: ScriptRegistryHandle,
}

impl AppContext {
    pub fn new(
        store: AppStore,
        sync_status: (ReadSignal<SyncStatus>, WriteSignal<SyncStatus>),
        scripts: ScriptRegistryHandle,
    ) -> Self {
        Self {
            store,
            sync_status: sync_status.0,
            set_sync_status: sync_status.1,
            scripts,
        }
    }

    /// The single entry point for state changes
    pub fn dispatch(&self, action: Action) {
        store_dispatch(&self.store, action, now_ms());
    }

    pub fn set_sync_status(&self, status: SyncStatus) {
        self.set_sync_status.set(status);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
