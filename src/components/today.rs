//! Today Panel
//!
//! Tasks worked on today with time spent, refreshed every second.

use leptos::prelude::*;
use leptos_hooks::use_interval;

use crate::context::use_app_context;
use crate::markdown::parse_markdown_inline;
use crate::store::AppStateStoreFields;
use crate::time::{format_duration, now_ms};
use crate::view_model::today_entries;

const TICK_MS: u32 = 1_000;

#[component]
pub fn Today() -> impl IntoView {
    let ctx = use_app_context();
    let (now, set_now) = signal(now_ms());

    use_interval(move || set_now.set(now_ms()), TICK_MS);

    let entries = move || {
        let now = now.get();
        let today = chrono::Local::now().date_naive();
        ctx.store.tasks().with(|tasks| today_entries(tasks, today, now))
    };

    view! {
        <div class="today">
            <h2 class="today-title">"Today"</h2>
            {move || {
                let entries = entries();
                if entries.is_empty() {
                    return view! { <p class="today-empty">"Nothing tracked yet today."</p> }.into_any();
                }
                let total: i64 = entries.iter().map(|e| e.spent_today).sum();
                view! {
                    <ul class="today-list">
                        {entries.into_iter().map(|entry| view! {
                            <li class=if entry.running { "today-item running" } else { "today-item" }>
                                <span class="today-time">{format_duration(entry.spent_today)}</span>
                                " "
                                <span class="today-tag">{entry.task.tag.clone()}</span>
                                " "
                                <span class="today-task" inner_html=parse_markdown_inline(&entry.task.title)></span>
                            </li>
                        }).collect_view()}
                    </ul>
                    <p class="today-total">"Total: " {format_duration(total)}</p>
                }
                .into_any()
            }}
        </div>
    }
}
