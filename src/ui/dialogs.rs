/// Native dialogs
///
/// Every prompt blocks the UI thread until the user answers, the same as
/// the native library calls that follow it.
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::Path;

const ABOUT: &str = "KMLParser, 2022.\n\
    Author: Logan Hagen\n\
    Displays select contents of a given KML file for viewing and editing.";

/// The native save panel asks before replacing an existing file
pub const SAVE_DIALOG_CONFIRMS_OVERWRITE: bool =
    cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows"));

/// Ask for a KML file to open
pub fn ask_open_path() -> Option<String> {
    FileDialog::new()
        .set_title("Open KML")
        .add_filter("KML", &["kml"])
        .set_directory(".")
        .pick_file()
        .map(|path| path.to_string_lossy().into_owned())
}

/// Ask for a filename to save under, starting from the current one
pub fn ask_save_path(current: Option<&str>) -> Option<String> {
    let mut dialog = FileDialog::new()
        .set_title("Save KML As")
        .add_filter("KML", &["kml"]);

    if let Some(current) = current.map(Path::new) {
        if let Some(name) = current.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        if let Some(dir) = current.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            dialog = dialog.set_directory(dir);
        }
    }

    dialog
        .save_file()
        .map(|path| path.to_string_lossy().into_owned())
}

/// Yes/No question; anything but Yes counts as No
pub fn confirm(title: &str, description: &str) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}

pub fn show_about() {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("About")
        .set_description(ABOUT)
        .set_buttons(MessageButtons::Ok)
        .show();
}
