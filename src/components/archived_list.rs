//! Archived Tasks Panel

use leptos::prelude::*;

use super::{Row, RowType};
use crate::context::use_app_context;
use crate::store::{Action, AppStateStoreFields};
use crate::view_model::archived_groups;

#[component]
pub fn ArchivedList() -> impl IntoView {
    let ctx = use_app_context();
    let groups = move || ctx.store.tasks().with(|tasks| archived_groups(tasks));

    view! {
        <div class="archived-list">
            <div class="archived-header">
                <span>"Archived"</span>
                <button on:click=move |_| ctx.dispatch(Action::ShowArchived(false))>"Close"</button>
            </div>
            {move || {
                let groups = groups();
                if groups.is_empty() {
                    return view! { <p class="archived-empty">"No archived tasks."</p> }.into_any();
                }
                groups
                    .into_iter()
                    .map(|(tag, tasks)| view! {
                        <Row row={RowType::Tag { sidetext: format!("[{}]", tasks.len()), text: tag }} />
                        {tasks.into_iter().map(|task| view! { <Row row=RowType::Task(task) /> }).collect_view()}
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
