//! Sync Status Indicator

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;
use crate::sync::SyncStatus;

#[component]
pub fn SyncStatusBar() -> impl IntoView {
    let ctx = use_app_context();
    let logged_in = move || ctx.store.auth_token().with(|token| !token.is_empty());

    view! {
        <Show when=logged_in>
            <div class="sync-status">
                {move || match ctx.sync_status.get() {
                    SyncStatus::Idle => view! { <span class="sync-idle">"●"</span> }.into_any(),
                    SyncStatus::Syncing => view! { <span class="sync-busy">"syncing..."</span> }.into_any(),
                    SyncStatus::Synced { at } => {
                        let when = chrono::DateTime::from_timestamp_millis(at)
                            .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M").to_string())
                            .unwrap_or_default();
                        view! { <span class="sync-ok">{format!("synced {}", when)}</span> }.into_any()
                    }
                    SyncStatus::Failed(msg) => view! {
                        <span class="sync-failed" title=msg>"sync failed"</span>
                    }
                    .into_any(),
                }}
            </div>
        </Show>
    }
}
