//! Command Line Parsing
//!
//! Turns a line typed into the input box into an `Action`.

use crate::models::VisibilityKey;
use crate::store::Action;

/// Split `"1 2,3"` into ids; any non-numeric token rejects the list.
fn parse_ids<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<Vec<u32>> {
    let ids = tokens
        .flat_map(|tok| tok.split(','))
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    (!ids.is_empty()).then_some(ids)
}

fn is_tag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('@')
}

/// `@tag rest of title` -> (Some("@tag"), "rest of title")
fn split_tag(rest: &str) -> (Option<String>, String) {
    let rest = rest.trim();
    match rest.split_once(char::is_whitespace) {
        Some((first, title)) if is_tag(first) => (Some(first.to_string()), title.trim().to_string()),
        None if is_tag(rest) => (Some(rest.to_string()), String::new()),
        _ => (None, rest.to_string()),
    }
}

/// Parse one command line. Unknown or incomplete commands yield `None`.
pub fn parse_command(line: &str) -> Option<Action> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let keyword = head.to_lowercase();
    let args = || rest.split_whitespace();

    let action = match keyword.as_str() {
        "t" | "task" => {
            let (tag, title) = split_tag(rest);
            if title.is_empty() {
                return None;
            }
            Action::AddTask { tag, title }
        }
        "b" | "begin" => Action::Begin(parse_ids(args())?),
        "c" | "check" => Action::Check(parse_ids(args())?),
        "fl" | "flag" => Action::Flag(parse_ids(args())?),
        "st" | "stop" => Action::Stop(parse_ids(args())?),
        "d" | "delete" => Action::Delete(parse_ids(args())?),
        "a" | "archive" => Action::Archive(parse_ids(args())?),
        "re" | "restore" => Action::Restore(parse_ids(args())?),
        "e" | "edit" => {
            let (id, title) = rest.split_once(char::is_whitespace)?;
            let title = title.trim();
            if title.is_empty() {
                return None;
            }
            Action::Edit { id: id.parse().ok()?, title: title.to_string() }
        }
        "mv" | "move" => {
            let tokens: Vec<&str> = args().collect();
            let (tag, ids) = tokens.split_last()?;
            if !is_tag(tag) {
                return None;
            }
            Action::Move { ids: parse_ids(ids.iter().copied())?, tag: tag.to_string() }
        }
        "hide" | "show" => Action::SetVisibility {
            key: VisibilityKey::parse(&rest.to_lowercase())?,
            visible: keyword == "show",
        },
        "today" => Action::ToggleToday,
        "dark" => Action::SetDarkMode(true),
        "light" => Action::SetDarkMode(false),
        "help" => Action::ShowHelp(true),
        "close-help" => Action::ShowHelp(false),
        "quickhelp" => Action::ToggleQuickHelp,
        "customize" => Action::ToggleCustomCss,
        "list-archived" => Action::ShowArchived(true),
        "close-archived" => Action::ShowArchived(false),
        "login" => Action::RequestLogin,
        "logout" => Action::Logout,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_with_and_without_tag() {
        assert_eq!(
            parse_command("t @work write the report"),
            Some(Action::AddTask { tag: Some("@work".into()), title: "write the report".into() })
        );
        assert_eq!(
            parse_command("task buy milk"),
            Some(Action::AddTask { tag: None, title: "buy milk".into() })
        );
        assert_eq!(parse_command("t @work"), None);
        assert_eq!(parse_command("t"), None);
    }

    #[test]
    fn test_status_commands_take_id_lists() {
        assert_eq!(parse_command("b 1"), Some(Action::Begin(vec![1])));
        assert_eq!(parse_command("begin 1 2"), Some(Action::Begin(vec![1, 2])));
        assert_eq!(parse_command("c 1,2 3"), Some(Action::Check(vec![1, 2, 3])));
        assert_eq!(parse_command("check 4"), Some(Action::Check(vec![4])));
        assert_eq!(parse_command("fl 5"), Some(Action::Flag(vec![5])));
        assert_eq!(parse_command("flag 5"), Some(Action::Flag(vec![5])));
        assert_eq!(parse_command("st 6"), Some(Action::Stop(vec![6])));
        assert_eq!(parse_command("stop 6"), Some(Action::Stop(vec![6])));
        assert_eq!(parse_command("d 7"), Some(Action::Delete(vec![7])));
        assert_eq!(parse_command("delete 7"), Some(Action::Delete(vec![7])));
        assert_eq!(parse_command("a 8"), Some(Action::Archive(vec![8])));
        assert_eq!(parse_command("archive 8"), Some(Action::Archive(vec![8])));
        assert_eq!(parse_command("re 9"), Some(Action::Restore(vec![9])));
        assert_eq!(parse_command("restore 9"), Some(Action::Restore(vec![9])));
    }

    #[test]
    fn test_status_commands_reject_bad_ids() {
        assert_eq!(parse_command("c"), None);
        assert_eq!(parse_command("c one"), None);
        assert_eq!(parse_command("b 1 x"), None);
    }

    #[test]
    fn test_edit_and_move() {
        assert_eq!(
            parse_command("e 3 new title here"),
            Some(Action::Edit { id: 3, title: "new title here".into() })
        );
        assert_eq!(
            parse_command("edit 3 x"),
            Some(Action::Edit { id: 3, title: "x".into() })
        );
        assert_eq!(parse_command("e 3"), None);
        assert_eq!(parse_command("e x title"), None);

        assert_eq!(
            parse_command("mv 1 2 @home"),
            Some(Action::Move { ids: vec![1, 2], tag: "@home".into() })
        );
        assert_eq!(
            parse_command("move 4 @home"),
            Some(Action::Move { ids: vec![4], tag: "@home".into() })
        );
        assert_eq!(parse_command("mv 1 home"), None);
        assert_eq!(parse_command("mv @home"), None);
    }

    #[test]
    fn test_visibility_commands() {
        assert_eq!(
            parse_command("hide done"),
            Some(Action::SetVisibility { key: VisibilityKey::Done, visible: false })
        );
        assert_eq!(
            parse_command("show flagged"),
            Some(Action::SetVisibility { key: VisibilityKey::Flagged, visible: true })
        );
        assert_eq!(
            parse_command("HIDE Wait"),
            Some(Action::SetVisibility { key: VisibilityKey::Wait, visible: false })
        );
        assert_eq!(
            parse_command("show wip"),
            Some(Action::SetVisibility { key: VisibilityKey::Wip, visible: true })
        );
        assert_eq!(parse_command("hide everything"), None);
    }

    #[test]
    fn test_panel_commands() {
        assert_eq!(parse_command("today"), Some(Action::ToggleToday));
        assert_eq!(parse_command("dark"), Some(Action::SetDarkMode(true)));
        assert_eq!(parse_command("light"), Some(Action::SetDarkMode(false)));
        assert_eq!(parse_command("help"), Some(Action::ShowHelp(true)));
        assert_eq!(parse_command("close-help"), Some(Action::ShowHelp(false)));
        assert_eq!(parse_command("quickhelp"), Some(Action::ToggleQuickHelp));
        assert_eq!(parse_command("customize"), Some(Action::ToggleCustomCss));
        assert_eq!(parse_command("list-archived"), Some(Action::ShowArchived(true)));
        assert_eq!(parse_command("close-archived"), Some(Action::ShowArchived(false)));
        assert_eq!(parse_command("  login "), Some(Action::RequestLogin));
        assert_eq!(parse_command("logout"), Some(Action::Logout));
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("dance 1"), None);
    }
}
