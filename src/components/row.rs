//! Row Component
//!
//! One line of the main list: a tag header, a task, or plain text.

use leptos::prelude::*;

use crate::markdown::parse_markdown_inline;
use crate::models::TaskItem;
use crate::time::{format_duration, now_ms};

#[derive(Clone, Debug, PartialEq)]
pub enum RowType {
    /// Group header with `[done/total]` side text
    Tag { text: String, sidetext: String },
    Task(TaskItem),
    Text(String),
}

#[component]
pub fn Row(row: RowType) -> impl IntoView {
    match row {
        RowType::Tag { text, sidetext } => view! {
            <div class="row row-tag">
                <span class="tag-name">{text}</span>
                " "
                <span class="tag-progress">{sidetext}</span>
            </div>
        }
        .into_any(),
        RowType::Task(task) => {
            let title = parse_markdown_inline(&task.title);
            let spent = task.time_spent(now_ms());
            view! {
                <div class=format!("row row-task {}", task.status.css_class())>
                    <span class="task-id">{format!("{}.", task.id)}</span>
                    <span class="task-marker">{task.status.marker()}</span>
                    <span class="task-title" inner_html=title></span>
                    {(spent > 0).then(|| view! {
                        <span class="task-time">{format_duration(spent)}</span>
                    })}
                </div>
            }
            .into_any()
        }
        RowType::Text(text) => view! { <div class="row row-text">{text}</div> }.into_any(),
    }
}
