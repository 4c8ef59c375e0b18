//! Auth Dialog Component
//!
//! Collects server URL and credentials, exchanges them for a token.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpRemote;
use crate::context::use_app_context;
use crate::store::{Action, AppStateStoreFields};

#[component]
pub fn AuthDialog() -> impl IntoView {
    let ctx = use_app_context();

    let (server_url, set_server_url) = signal(ctx.store.server_url().get_untracked());
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (pending, set_pending) = signal(false);

    let login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let url = server_url.get_untracked();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        set_pending.set(true);
        set_error.set(None);

        spawn_local(async move {
            match HttpRemote::new().login(&url, &user, &pass).await {
                Ok(token) => {
                    tracing::info!(server = %url, "logged in");
                    ctx.dispatch(Action::LoggedIn { server_url: url, token });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "login failed");
                    set_error.set(Some(err.to_string()));
                }
            }
            set_pending.set(false);
        });
    };

    view! {
        <div class="dialog-backdrop">
            <form class="dialog auth-dialog" on:submit=login>
                <h2>"Sync login"</h2>
                <input
                    type="url"
                    placeholder="https://sync.example.com"
                    prop:value=move || server_url.get()
                    on:input=move |ev| set_server_url.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <p class="auth-error">{msg}</p> })}
                <div class="auth-actions">
                    <button type="submit" disabled=move || pending.get()>
                        {move || if pending.get() { "Logging in..." } else { "Login" }}
                    </button>
                    <button type="button" on:click=move |_| ctx.dispatch(Action::CancelLogin)>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
