//! Command Input Box
//!
//! Single-line command prompt at the bottom of the screen. Submitted lines
//! are parsed into actions and recorded in history; ArrowUp/ArrowDown walk
//! the history. Typing anywhere on the page focuses the prompt.

use leptos::html;
use leptos::prelude::*;
use leptos_hooks::use_event_listener;
use wasm_bindgen::JsCast;

use crate::command::parse_command;
use crate::context::use_app_context;
use crate::store::{Action, AppStateStoreFields};

fn is_text_field(target: Option<web_sys::EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || t.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
    })
}

#[component]
pub fn InputBox() -> impl IntoView {
    let ctx = use_app_context();
    let input_ref = NodeRef::<html::Input>::new();

    let (text, set_text) = signal(String::new());
    // How far back in history the prompt shows; 0 = fresh line
    let (recall, set_recall) = signal(0usize);

    use_event_listener(
        || web_sys::window().map(Into::into),
        "keydown".to_string(),
        move |ev: web_sys::Event| {
            let Some(key_ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if key_ev.key() == "Escape" {
                ctx.dispatch(Action::ShowHelp(false));
                return;
            }
            if key_ev.ctrl_key() || key_ev.meta_key() || key_ev.alt_key() || is_text_field(ev.target()) {
                return;
            }
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        },
    );

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let line = text.get_untracked();
        if line.trim().is_empty() {
            return;
        }
        match parse_command(&line) {
            Some(action) => ctx.dispatch(action),
            None => tracing::debug!(input = %line, "unrecognized command"),
        }
        ctx.dispatch(Action::Submitted(line));
        set_text.set(String::new());
        set_recall.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let step: isize = match ev.key().as_str() {
            "ArrowUp" => 1,
            "ArrowDown" => -1,
            _ => return,
        };
        ev.prevent_default();
        let next = recall.get_untracked().saturating_add_signed(step);
        if next == 0 {
            set_recall.set(0);
            set_text.set(String::new());
            return;
        }
        let line = ctx.store.history().with_untracked(|h| h.recall(next).map(str::to_string));
        if let Some(line) = line {
            set_recall.set(next);
            set_text.set(line);
        }
    };

    let placeholder = move || {
        if ctx.store.saw_the_input().get() {
            ""
        } else {
            "Type a command, e.g. t @work write report (help for more)"
        }
    };

    view! {
        <form class="input-box" on:submit=submit>
            <span class="input-prompt">">"</span>
            <input
                node_ref=input_ref
                type="text"
                autofocus=true
                autocomplete="off"
                spellcheck="false"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
        </form>
    }
}
