/// State management module
///
/// This module holds everything the editor knows, independent of the window:
/// - Table rows parsed from the library's list output (data.rs)
/// - Edit boxes and row selection (edit.rs)
/// - The user-facing log panel (log.rs)
/// - The session tying them to the loaded document (session.rs)

pub mod data;
pub mod edit;
pub mod log;
pub mod session;

pub use edit::Table;
pub use session::Session;
