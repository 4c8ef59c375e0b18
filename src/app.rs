//! Pomoday App
//!
//! Root component: owns the store, persists it on every change, starts
//! background syncs and lays out the main list and side panels.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_hooks::{DomScriptHost, ScriptRegistry};
use reactive_stores::Store;

use crate::api::HttpRemote;
use crate::components::{
    Analytics, ArchivedList, AuthDialog, CodeEditor, HelpDialog, InputBox, QuickHelp, Row, RowType,
    SyncStatusBar, Today,
};
use crate::context::AppContext;
use crate::persist::{self, BrowserStorage};
use crate::store::{Action, AppStateStoreFields};
use crate::sync::{self, SyncGate, SyncStatus};
use crate::time::now_ms;
use crate::view_model::{group_tasks, hidden_status_labels, percent_complete, summarize};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(persist::load_state(&BrowserStorage));
    let scripts = StoredValue::new_local(ScriptRegistry::new(DomScriptHost));
    let ctx = AppContext::new(store, signal(SyncStatus::Idle), scripts);

    // Provide context to all children
    provide_context(ctx);

    let gate = SyncGate::new();
    let remote = Rc::new(HttpRemote::new());

    // Persist on every change, then sync if the timer allows
    Effect::new(move |_| {
        let state = store.get();
        if let Err(error) = persist::save_state(&BrowserStorage, &state) {
            tracing::error!(%error, "failed to persist state");
        }

        let Some((permit, request)) = sync::begin_sync(&gate, &state, now_ms()) else {
            return;
        };
        ctx.set_sync_status(SyncStatus::Syncing);
        let remote = Rc::clone(&remote);
        spawn_local(async move {
            match sync::sync_tasks(remote.as_ref(), &request).await {
                Ok(tasks) => {
                    let at = now_ms();
                    tracing::info!(count = tasks.len(), "sync finished");
                    ctx.dispatch(Action::SyncCompleted { tasks, at });
                    ctx.set_sync_status(SyncStatus::Synced { at });
                }
                Err(error) => {
                    tracing::warn!(%error, "sync failed");
                    ctx.set_sync_status(SyncStatus::Failed(error.to_string()));
                }
            }
            drop(permit);
        });
    });

    let groups = Memo::new(move |_| {
        let visibility = store.task_visibility().get();
        store.tasks().with(|tasks| group_tasks(tasks, &visibility))
    });
    let summary = Memo::new(move |_| store.tasks().with(|tasks| (summarize(tasks), tasks.len())));

    let hidden_banner = move || {
        let hidden = groups.with(|g| g.hidden.len());
        (hidden > 0).then(|| {
            let labels = hidden_status_labels(&store.task_visibility().get()).join(", ");
            view! {
                <div class="hidden-banner">
                    {format!("{} tasks in {} group are hidden.", hidden, labels)}
                </div>
            }
        })
    };

    let task_list = move || {
        let groups = groups.get();
        groups
            .display
            .iter()
            .map(|(tag, tasks)| {
                let sidetext = format!("[{}/{}]", groups.count_done(tag), groups.count_total(tag));
                let progress = format!("width: {:.0}%", groups.completion(tag) * 100.0);
                view! {
                    <Row row={RowType::Tag { text: tag.clone(), sidetext }} />
                    <div class="tag-progress-bar" style=progress></div>
                    {tasks.iter().cloned().map(|task| view! { <Row row=RowType::Task(task) /> }).collect_view()}
                    <Row row=RowType::Text(String::new()) />
                }
            })
            .collect_view()
    };

    let totals = move || {
        let (stats, count) = summary.get();
        view! {
            <Row row=RowType::Text(format!("{}% of all tasks complete.", percent_complete(&stats, count))) />
            <div class="row row-text">
                <span class="text-green">{stats.done}</span>" done · "
                <span class="text-orange">{stats.wip}</span>" in-progress · "
                <span class="text-purple">{stats.pending}</span>" waiting"
            </div>
        }
    };

    let theme = move || if store.dark_mode().get() { "app dark" } else { "app light" };
    let show_auth = move || store.auth_token().with(String::is_empty) && store.user_want_to_login().get();

    view! {
        <style>{move || store.custom_css().get()}</style>
        <div class=theme>
            <SyncStatusBar />
            <div class="app-body">
                <main class="main-view">
                    {hidden_banner}
                    <div class="task-list">
                        {task_list}
                        {totals}
                    </div>
                </main>

                <Show when=move || store.show_today().get()>
                    <aside class="side-view">
                        <Today />
                    </aside>
                </Show>
                <Show when=move || store.show_help().get()>
                    <HelpDialog />
                </Show>
                <Show when=move || store.show_quick_help().get()>
                    <QuickHelp />
                </Show>
                <Show when=move || store.show_custom_css().get()>
                    <aside class="side-view">
                        <CodeEditor />
                    </aside>
                </Show>
                <Show when=move || store.show_archived().get()>
                    <aside class="side-view">
                        <ArchivedList />
                    </aside>
                </Show>
                <Show when=show_auth>
                    <AuthDialog />
                </Show>
            </div>
            <InputBox />
        </div>
        <Analytics />
    }
}
