//! Frontend Models
//!
//! Task data and the small value types stored alongside it. Field names
//! and encodings match the persisted `pomoday` snapshot.

use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{DEFAULT_TAG, HISTORY_CAPACITY};

/// Lifecycle state of a task, stored as its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TaskStatus {
    /// Deleted; never rendered
    None = 0,
    Done = 1,
    Wip = 2,
    #[default]
    Wait = 3,
    Flag = 4,
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::None),
            1 => Ok(TaskStatus::Done),
            2 => Ok(TaskStatus::Wip),
            3 => Ok(TaskStatus::Wait),
            4 => Ok(TaskStatus::Flag),
            other => Err(format!("unknown task status {}", other)),
        }
    }
}

impl TaskStatus {
    /// Marker shown in front of a task title
    pub fn marker(&self) -> &'static str {
        match self {
            TaskStatus::None => " ",
            TaskStatus::Done => "✔",
            TaskStatus::Wip => "…",
            TaskStatus::Wait => "☐",
            TaskStatus::Flag => "⚑",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TaskStatus::None => "task-none",
            TaskStatus::Done => "task-done",
            TaskStatus::Wip => "task-wip",
            TaskStatus::Wait => "task-wait",
            TaskStatus::Flag => "task-flag",
        }
    }
}

/// One work session; `end == 0` while it is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worklog {
    pub start: i64,
    pub end: i64,
}

impl Worklog {
    pub fn is_open(&self) -> bool {
        self.end == 0
    }

    pub fn elapsed(&self, now: i64) -> i64 {
        let end = if self.is_open() { now } else { self.end };
        (end - self.start).max(0)
    }
}

/// Task data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: u32,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub logs: Vec<Worklog>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, rename = "lastaction")]
    pub last_action: i64,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl TaskItem {
    pub fn new(id: u32, tag: impl Into<String>, title: impl Into<String>, now: i64) -> Self {
        Self {
            id,
            tag: tag.into(),
            title: title.into(),
            status: TaskStatus::Wait,
            logs: Vec::new(),
            archived: false,
            last_action: now,
        }
    }

    /// Total tracked time, counting a running session up to `now`
    pub fn time_spent(&self, now: i64) -> i64 {
        self.logs.iter().map(|log| log.elapsed(now)).sum()
    }

    pub fn open_log(&mut self, now: i64) {
        if !self.logs.last().is_some_and(Worklog::is_open) {
            self.logs.push(Worklog { start: now, end: 0 });
        }
    }

    pub fn close_log(&mut self, now: i64) {
        if let Some(log) = self.logs.last_mut().filter(|log| log.is_open()) {
            log.end = now;
        }
    }
}

/// Which statuses are rendered in the main list.
///
/// A flag missing from a stored snapshot reads as hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskVisibility {
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub wait: bool,
    #[serde(default)]
    pub wip: bool,
}

impl Default for TaskVisibility {
    fn default() -> Self {
        Self { done: true, flagged: true, wait: true, wip: true }
    }
}

/// Status group addressed by `hide` / `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityKey {
    Done,
    Flagged,
    Wait,
    Wip,
}

impl VisibilityKey {
    pub const ALL: [VisibilityKey; 4] =
        [VisibilityKey::Done, VisibilityKey::Flagged, VisibilityKey::Wait, VisibilityKey::Wip];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "done" | "finished" => Some(VisibilityKey::Done),
            "flag" | "flagged" => Some(VisibilityKey::Flagged),
            "wait" | "pending" => Some(VisibilityKey::Wait),
            "wip" | "ongoing" | "on-going" => Some(VisibilityKey::Wip),
            _ => None,
        }
    }

    /// Label used in the "tasks are hidden" banner
    pub fn label(&self) -> &'static str {
        match self {
            VisibilityKey::Done => "Finished",
            VisibilityKey::Flagged => "Flagged",
            VisibilityKey::Wait => "Pending",
            VisibilityKey::Wip => "On Going",
        }
    }
}

impl TaskVisibility {
    pub fn get(&self, key: VisibilityKey) -> bool {
        match key {
            VisibilityKey::Done => self.done,
            VisibilityKey::Flagged => self.flagged,
            VisibilityKey::Wait => self.wait,
            VisibilityKey::Wip => self.wip,
        }
    }

    pub fn set(&mut self, key: VisibilityKey, visible: bool) {
        match key {
            VisibilityKey::Done => self.done = visible,
            VisibilityKey::Flagged => self.flagged = visible,
            VisibilityKey::Wait => self.wait = visible,
            VisibilityKey::Wip => self.wip = visible,
        }
    }

    /// Whether a task with `status` goes to the main list
    pub fn shows(&self, status: TaskStatus) -> bool {
        match status {
            TaskStatus::Done => self.done,
            TaskStatus::Flag => self.flagged,
            TaskStatus::Wait => self.wait,
            TaskStatus::Wip => self.wip,
            TaskStatus::None => false,
        }
    }
}

/// Recently submitted command lines, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct HistoryQueue {
    items: VecDeque<String>,
}

impl HistoryQueue {
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.trim().is_empty() || self.items.back() == Some(&line) {
            return;
        }
        if self.items.len() == HISTORY_CAPACITY {
            self.items.pop_front();
        }
        self.items.push_back(line);
    }

    /// `back = 1` is the newest entry
    pub fn recall(&self, back: usize) -> Option<&str> {
        let idx = self.items.len().checked_sub(back)?;
        self.items.get(idx).map(String::as_str)
    }
}

// Older snapshots stored history in other shapes; anything that is not a
// list of strings starts an empty queue instead of failing the whole state.
impl<'de> Deserialize<'de> for HistoryQueue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let mut queue = HistoryQueue::default();
        if let Ok(lines) = serde_json::from_value::<Vec<String>>(value) {
            for line in lines {
                queue.push(line);
            }
        }
        Ok(queue)
    }
}

/// Decode a stored task list entry by entry. Entries that do not decode
/// are dropped so one bad task cannot discard the rest of the snapshot.
pub fn deserialize_tasks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TaskItem>, D::Error> {
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(task) => Some(task),
            Err(error) => {
                tracing::warn!(index, %error, "dropping unreadable task");
                None
            }
        })
        .collect())
}
