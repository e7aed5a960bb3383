/// Window building blocks
///
/// - `panels.rs` - table, edit row and log list widgets
/// - `dialogs.rs` - native prompts and confirmations

pub mod dialogs;
pub mod panels;
