//! View Derivation
//!
//! Pure functions turning the task list into what the main view renders.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::models::{TaskItem, TaskStatus, TaskVisibility, VisibilityKey};
use crate::time::local_date;

/// Live tasks split by visibility, grouped by tag in first-seen order.
///
/// A tag whose tasks are all hidden still has an (empty) `display` entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskGroups {
    pub display: IndexMap<String, Vec<TaskItem>>,
    pub hidden: Vec<TaskItem>,
}

impl TaskGroups {
    /// DONE tasks of `tag`, shown or hidden
    pub fn count_done(&self, tag: &str) -> usize {
        let shown = self.display.get(tag).map_or(0, |tasks| {
            tasks.iter().filter(|t| t.status == TaskStatus::Done).count()
        });
        let hidden = self
            .hidden
            .iter()
            .filter(|t| t.tag == tag && t.status == TaskStatus::Done)
            .count();
        shown + hidden
    }

    /// All tasks of `tag`, shown or hidden
    pub fn count_total(&self, tag: &str) -> usize {
        let shown = self.display.get(tag).map_or(0, Vec::len);
        shown + self.hidden.iter().filter(|t| t.tag == tag).count()
    }

    /// `count_done / count_total`, 0 for an empty group
    pub fn completion(&self, tag: &str) -> f64 {
        match self.count_total(tag) {
            0 => 0.0,
            total => self.count_done(tag) as f64 / total as f64,
        }
    }
}

/// Group live (not deleted, not archived) tasks for the main list
pub fn group_tasks(tasks: &[TaskItem], visibility: &TaskVisibility) -> TaskGroups {
    tasks
        .iter()
        .filter(|t| t.status != TaskStatus::None)
        .filter(|t| !t.archived)
        .fold(TaskGroups::default(), |mut groups, task| {
            let shown = visibility.shows(task.status);
            let bucket = groups.display.entry(task.tag.clone()).or_default();
            if shown {
                bucket.push(task.clone());
            } else {
                groups.hidden.push(task.clone());
            }
            groups
        })
}

/// Status tallies over the whole list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub done: usize,
    pub wip: usize,
    pub pending: usize,
}

/// Count WAIT / DONE / WIP across every task, archived or not
pub fn summarize(tasks: &[TaskItem]) -> Summary {
    tasks.iter().fold(Summary::default(), |mut stats, task| {
        match task.status {
            TaskStatus::Wait => stats.pending += 1,
            TaskStatus::Done => stats.done += 1,
            TaskStatus::Wip => stats.wip += 1,
            TaskStatus::None | TaskStatus::Flag => {}
        }
        stats
    })
}

/// Whole-number percentage of DONE tasks over the full list length
pub fn percent_complete(summary: &Summary, task_count: usize) -> u32 {
    if task_count == 0 {
        return 0;
    }
    (summary.done as f64 / task_count as f64 * 100.0).round() as u32
}

/// Banner labels of the status groups currently hidden
pub fn hidden_status_labels(visibility: &TaskVisibility) -> Vec<&'static str> {
    VisibilityKey::ALL
        .iter()
        .filter(|key| !visibility.get(**key))
        .map(VisibilityKey::label)
        .collect()
}

/// A task worked on today, with the time spent on it today
#[derive(Clone, Debug, PartialEq)]
pub struct TodayEntry {
    pub task: TaskItem,
    pub spent_today: i64,
    pub running: bool,
}

/// Live tasks with a work session started on `today` (local date)
pub fn today_entries(tasks: &[TaskItem], today: NaiveDate, now: i64) -> Vec<TodayEntry> {
    tasks
        .iter()
        .filter(|t| t.status != TaskStatus::None)
        .filter_map(|task| {
            let todays: Vec<_> = task
                .logs
                .iter()
                .filter(|log| local_date(log.start) == Some(today))
                .collect();
            if todays.is_empty() {
                return None;
            }
            Some(TodayEntry {
                task: task.clone(),
                spent_today: todays.iter().map(|log| log.elapsed(now)).sum(),
                running: todays.iter().any(|log| log.is_open()),
            })
        })
        .collect()
}

/// Archived tasks grouped by tag
pub fn archived_groups(tasks: &[TaskItem]) -> IndexMap<String, Vec<TaskItem>> {
    let mut groups: IndexMap<String, Vec<TaskItem>> = IndexMap::new();
    for task in tasks.iter().filter(|t| t.archived && t.status != TaskStatus::None) {
        groups.entry(task.tag.clone()).or_default().push(task.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Worklog;
    use pretty_assertions::assert_eq;

    fn task(id: u32, tag: &str, status: TaskStatus) -> TaskItem {
        let mut t = TaskItem::new(id, tag, format!("task {}", id), 0);
        t.status = status;
        t
    }

    fn ids(tasks: &[TaskItem]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_groups_with_everything_visible() {
        let tasks = vec![
            task(1, "a", TaskStatus::Done),
            task(2, "a", TaskStatus::Wait),
            task(3, "b", TaskStatus::Wip),
        ];
        let groups = group_tasks(&tasks, &TaskVisibility::default());

        assert_eq!(groups.display.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ids(&groups.display["a"]), vec![1, 2]);
        assert_eq!(ids(&groups.display["b"]), vec![3]);
        assert!(groups.hidden.is_empty());
        assert_eq!(groups.completion("a"), 0.5);
        assert_eq!(groups.completion("b"), 0.0);
    }

    #[test]
    fn test_hiding_done_moves_tasks_to_hidden() {
        let tasks = vec![
            task(1, "a", TaskStatus::Done),
            task(2, "a", TaskStatus::Wait),
            task(3, "b", TaskStatus::Done),
        ];
        let visibility = TaskVisibility { done: false, ..TaskVisibility::default() };
        let groups = group_tasks(&tasks, &visibility);

        assert_eq!(ids(&groups.display["a"]), vec![2]);
        assert!(groups.display["b"].is_empty());
        assert_eq!(ids(&groups.hidden), vec![1, 3]);

        assert_eq!(groups.count_total("a"), 2);
        assert_eq!(groups.count_done("a"), 1);
        assert_eq!(groups.count_total("b"), 1);
        assert_eq!(groups.count_done("b"), 1);
    }

    #[test]
    fn test_deleted_and_archived_are_excluded() {
        let mut archived = task(2, "a", TaskStatus::Wait);
        archived.archived = true;
        let tasks = vec![task(1, "gone", TaskStatus::None), archived, task(3, "a", TaskStatus::Flag)];
        let groups = group_tasks(&tasks, &TaskVisibility::default());

        assert_eq!(groups.display.len(), 1);
        assert_eq!(ids(&groups.display["a"]), vec![3]);
        assert_eq!(groups.count_total("gone"), 0);
        assert_eq!(groups.completion("gone"), 0.0);
    }

    #[test]
    fn test_tag_order_is_first_seen() {
        let tasks = vec![
            task(1, "z", TaskStatus::Wait),
            task(2, "a", TaskStatus::Wait),
            task(3, "z", TaskStatus::Wait),
        ];
        let groups = group_tasks(&tasks, &TaskVisibility::default());
        assert_eq!(groups.display.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(ids(&groups.display["z"]), vec![1, 3]);
    }

    #[test]
    fn test_summary_counts_only_wait_done_wip() {
        let mut archived = task(6, "a", TaskStatus::Done);
        archived.archived = true;
        let tasks = vec![
            task(1, "a", TaskStatus::Done),
            task(2, "a", TaskStatus::Wait),
            task(3, "b", TaskStatus::Wip),
            task(4, "b", TaskStatus::Flag),
            task(5, "b", TaskStatus::None),
            archived,
        ];
        let summary = summarize(&tasks);

        assert_eq!(summary, Summary { done: 2, wip: 1, pending: 1 });
        let counted = tasks
            .iter()
            .filter(|t| matches!(t.status, TaskStatus::Done | TaskStatus::Wip | TaskStatus::Wait))
            .count();
        assert_eq!(summary.done + summary.wip + summary.pending, counted);
        assert_eq!(percent_complete(&summary, tasks.len()), 33);
    }

    #[test]
    fn test_percent_complete_with_no_tasks_is_zero() {
        assert_eq!(percent_complete(&Summary::default(), 0), 0);
        assert_eq!(percent_complete(&Summary { done: 1, wip: 0, pending: 1 }, 2), 50);
    }

    #[test]
    fn test_hidden_status_labels_follow_field_order() {
        let visibility = TaskVisibility { done: false, flagged: true, wait: false, wip: false };
        assert_eq!(hidden_status_labels(&visibility), vec!["Finished", "Pending", "On Going"]);
        assert!(hidden_status_labels(&TaskVisibility::default()).is_empty());
    }

    #[test]
    fn test_today_entries_sum_todays_sessions() {
        let now = chrono::Local::now();
        let today = now.date_naive();
        let now_ms = now.timestamp_millis();
        let two_days = 2 * 24 * 3_600_000;

        let mut worked = task(1, "a", TaskStatus::Wip);
        worked.logs = vec![
            Worklog { start: now_ms - two_days, end: now_ms - two_days + 60_000 },
            Worklog { start: now_ms - 1_000, end: 0 },
        ];
        let mut deleted = task(2, "a", TaskStatus::None);
        deleted.logs = vec![Worklog { start: now_ms - 1_000, end: now_ms }];
        let idle = task(3, "a", TaskStatus::Wait);

        let entries = today_entries(&[worked, deleted, idle], today, now_ms);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].task.id, 1);
        assert_eq!(entries[0].spent_today, 1_000);
        assert!(entries[0].running);
    }

    #[test]
    fn test_archived_groups() {
        let mut a = task(1, "x", TaskStatus::Done);
        a.archived = true;
        let mut b = task(2, "y", TaskStatus::Wait);
        b.archived = true;
        let groups = archived_groups(&[a, task(3, "x", TaskStatus::Wait), b]);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(ids(&groups["x"]), vec![1]);
    }
}
