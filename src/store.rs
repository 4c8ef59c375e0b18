//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Every change
//! goes through `reduce` with a typed `Action`.

use leptos::prelude::*;
use reactive_stores::Store;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TAG;
use crate::models::{deserialize_tasks, HistoryQueue, TaskItem, TaskStatus, TaskVisibility, VisibilityKey};

/// Global application state; serialized as the `pomoday` snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Store)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(deserialize_with = "deserialize_tasks")]
    pub tasks: Vec<TaskItem>,
    pub show_help: bool,
    pub show_quick_help: bool,
    pub show_today: bool,
    pub dark_mode: bool,
    pub saw_the_input: bool,
    pub task_visibility: TaskVisibility,
    pub history: HistoryQueue,
    #[serde(rename = "showCustomCSS")]
    pub show_custom_css: bool,
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    pub show_archived: bool,
    pub user_want_to_login: bool,
    pub auth_token: String,
    pub server_url: String,
    /// Epoch ms of the last completed sync
    pub last_sync: i64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            show_help: false,
            show_quick_help: true,
            show_today: false,
            dark_mode: false,
            saw_the_input: false,
            task_visibility: TaskVisibility::default(),
            history: HistoryQueue::default(),
            show_custom_css: false,
            custom_css: String::new(),
            show_archived: false,
            user_want_to_login: false,
            auth_token: String::new(),
            server_url: String::new(),
            last_sync: 0,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Actions
// ========================

/// Every state transition the UI can request
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddTask { tag: Option<String>, title: String },
    Begin(Vec<u32>),
    Check(Vec<u32>),
    Flag(Vec<u32>),
    Stop(Vec<u32>),
    Delete(Vec<u32>),
    Edit { id: u32, title: String },
    Move { ids: Vec<u32>, tag: String },
    Archive(Vec<u32>),
    Restore(Vec<u32>),
    SetVisibility { key: VisibilityKey, visible: bool },
    ToggleToday,
    SetDarkMode(bool),
    ShowHelp(bool),
    ToggleQuickHelp,
    ToggleCustomCss,
    SetCustomCss(String),
    ShowArchived(bool),
    RequestLogin,
    CancelLogin,
    LoggedIn { server_url: String, token: String },
    Logout,
    /// A command line was submitted
    Submitted(String),
    /// Remote round trip finished; replaces tasks only
    SyncCompleted { tasks: Vec<TaskItem>, at: i64 },
}

/// Apply `action` to `state`. `now` stamps work logs and `last_action`.
pub fn reduce(state: &mut AppState, action: Action, now: i64) {
    match action {
        Action::AddTask { tag, title } => {
            let id = next_id(&state.tasks);
            let tag = tag.unwrap_or_else(|| DEFAULT_TAG.to_string());
            tracing::debug!(task_id = id, tag = %tag, "adding task");
            state.tasks.push(TaskItem::new(id, tag, title, now));
        }
        Action::Begin(ids) => for_each_task(state, &ids, now, |task| {
            if task.status != TaskStatus::Wip {
                task.status = TaskStatus::Wip;
                task.open_log(now);
            }
        }),
        Action::Check(ids) => for_each_task(state, &ids, now, |task| {
            task.status = if task.status == TaskStatus::Done { TaskStatus::Wait } else { TaskStatus::Done };
            task.close_log(now);
        }),
        Action::Flag(ids) => for_each_task(state, &ids, now, |task| {
            task.status = if task.status == TaskStatus::Flag { TaskStatus::Wait } else { TaskStatus::Flag };
            task.close_log(now);
        }),
        Action::Stop(ids) => for_each_task(state, &ids, now, |task| {
            task.status = TaskStatus::Wait;
            task.close_log(now);
        }),
        Action::Delete(ids) => for_each_task(state, &ids, now, |task| {
            task.status = TaskStatus::None;
            task.close_log(now);
        }),
        Action::Edit { id, title } => for_each_task(state, &[id], now, |task| task.title = title.clone()),
        Action::Move { ids, tag } => for_each_task(state, &ids, now, |task| task.tag = tag.clone()),
        Action::Archive(ids) => for_each_task(state, &ids, now, |task| {
            task.archived = true;
            task.close_log(now);
        }),
        Action::Restore(ids) => for_each_task(state, &ids, now, |task| task.archived = false),
        Action::SetVisibility { key, visible } => state.task_visibility.set(key, visible),
        Action::ToggleToday => state.show_today = !state.show_today,
        Action::SetDarkMode(dark) => state.dark_mode = dark,
        Action::ShowHelp(show) => state.show_help = show,
        Action::ToggleQuickHelp => state.show_quick_help = !state.show_quick_help,
        Action::ToggleCustomCss => state.show_custom_css = !state.show_custom_css,
        Action::SetCustomCss(css) => state.custom_css = css,
        Action::ShowArchived(show) => state.show_archived = show,
        Action::RequestLogin => state.user_want_to_login = true,
        Action::CancelLogin => state.user_want_to_login = false,
        Action::LoggedIn { server_url, token } => {
            state.server_url = server_url;
            state.auth_token = token;
            state.user_want_to_login = false;
        }
        Action::Logout => {
            state.auth_token.clear();
            state.user_want_to_login = false;
        }
        Action::Submitted(line) => {
            state.saw_the_input = true;
            state.history.push(line);
        }
        Action::SyncCompleted { tasks, at } => {
            state.tasks = tasks;
            state.last_sync = at;
        }
    }
}

/// One past the highest id; once `u32::MAX` is taken, the lowest free id
fn next_id(tasks: &[TaskItem]) -> u32 {
    let Some(max) = tasks.iter().map(|t| t.id).max() else {
        return 1;
    };
    max.checked_add(1)
        .or_else(|| (1..max).find(|id| tasks.iter().all(|t| t.id != *id)))
        .unwrap_or(max)
}

fn for_each_task(state: &mut AppState, ids: &[u32], now: i64, mut apply: impl FnMut(&mut TaskItem)) {
    for task in state.tasks.iter_mut().filter(|t| ids.contains(&t.id)) {
        apply(task);
        task.last_action = now;
    }
}

// ========================
// Store Helper Functions
// ========================

/// Run `action` against the store; subscribers of every field are notified
pub fn store_dispatch(store: &AppStore, action: Action, now: i64) {
    store.update(|state| reduce(state, action, now));
}
