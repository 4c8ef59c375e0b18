//! Pomoday Frontend Entry Point

mod api;
mod app;
mod command;
mod components;
mod config;
mod context;
mod markdown;
mod models;
mod persist;
mod store;
mod sync;
mod time;
mod view_model;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!("starting pomoday");
    mount_to_body(App);
}
