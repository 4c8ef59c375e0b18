//! Help Dialog and Quick Help
//!
//! Command reference rendered from markdown.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::markdown::parse_markdown;
use crate::store::Action;

const HELP_TEXT: &str = r#"
# Commands

| Command | Short | Example |
|---|---|---|
| `task` | `t` | `t @work write the %b%report%b%` |
| `begin` | `b` | `b 1 2` |
| `check` | `c` | `c 3` |
| `flag` | `fl` | `fl 4` |
| `stop` | `st` | `st 1` |
| `delete` | `d` | `d 5` |
| `edit` | `e` | `e 1 new title` |
| `move` | `mv` | `mv 1 2 @home` |
| `archive` | `a` | `a 3` |
| `restore` | `re` | `re 3` |

## Views

- `hide done|flagged|wait|wip`, `show ...`: filter the main list
- `today`: toggle the today panel
- `dark`, `light`: color scheme
- `customize`: edit custom CSS
- `list-archived`, `close-archived`: archived tasks
- `quickhelp`: toggle the quick help panel
- `login`, `logout`: sync with a server

Titles support **markdown** and color spans like `%r%red%r%`.
Use the arrow keys in the input to recall earlier commands.
"#;

const QUICK_HELP: &[(&str, &str)] = &[
    ("t @tag title", "new task"),
    ("b / c / fl / st id", "begin, check, flag, stop"),
    ("d / a id", "delete, archive"),
    ("help", "all commands"),
];

#[component]
pub fn HelpDialog() -> impl IntoView {
    let ctx = use_app_context();
    let html = parse_markdown(HELP_TEXT);

    view! {
        <div class="dialog-backdrop" on:click=move |_| ctx.dispatch(Action::ShowHelp(false))>
            <div class="dialog help-dialog" on:click=|ev| ev.stop_propagation()>
                <button class="dialog-close" on:click=move |_| ctx.dispatch(Action::ShowHelp(false))>
                    "✕"
                </button>
                <div class="help-content" inner_html=html></div>
            </div>
        </div>
    }
}

#[component]
pub fn QuickHelp() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="quick-help">
            <div class="quick-help-header">
                <span>"Quick help"</span>
                <button class="quick-help-close" on:click=move |_| ctx.dispatch(Action::ToggleQuickHelp)>
                    "✕"
                </button>
            </div>
            <ul>
                {QUICK_HELP.iter().map(|(cmd, what)| view! {
                    <li><code>{*cmd}</code>" " {*what}</li>
                }).collect_view()}
            </ul>
        </div>
    }
}
