//! UI Components
//!
//! Views composed by the root `App`.

mod analytics;
mod archived_list;
mod auth_dialog;
mod code_editor;
mod help_dialog;
mod input_box;
mod row;
mod sync_status;
mod today;

pub use analytics::Analytics;
pub use archived_list::ArchivedList;
pub use auth_dialog::AuthDialog;
pub use code_editor::CodeEditor;
pub use help_dialog::{HelpDialog, QuickHelp};
pub use input_box::InputBox;
pub use row::{Row, RowType};
pub use sync_status::SyncStatusBar;
pub use today::Today;
