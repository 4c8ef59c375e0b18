//! Custom CSS Editor
//!
//! Textarea bound to `customCSS`; the root view injects the result.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{Action, AppStateStoreFields};

#[component]
pub fn CodeEditor() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="code-editor">
            <div class="code-editor-header">
                <span>"Custom CSS"</span>
                <button on:click=move |_| ctx.dispatch(Action::ToggleCustomCss)>"Close"</button>
            </div>
            <textarea
                class="code-editor-input"
                spellcheck="false"
                placeholder=".row-task { font-size: 14px; }"
                prop:value=move || ctx.store.custom_css().get()
                on:input=move |ev| ctx.dispatch(Action::SetCustomCss(event_target_value(&ev)))
            ></textarea>
        </div>
    }
}
