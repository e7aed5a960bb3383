use iced::keyboard::{self, Key, Modifiers};
use iced::widget::{button, column, container, row, text, Row};
use iced::{Element, Length, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

mod config;
mod ffi;
mod state;
mod ui;

use config::Settings;
use ffi::NativeLibrary;
use state::{Session, Table};
use ui::{dialogs, panels};

/// Main application state
struct KmlEditor {
    /// Loaded document, tables and log
    session: Session<NativeLibrary>,
    /// Whether the File menu entries are showing
    file_menu_open: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    ToggleFileMenu,
    Open,
    Save,
    SaveAs,
    About,
    /// Exit, after confirmation
    Quit,
    RowSelected(Table, usize),
    PointNameChanged(String),
    PathNameChanged(String),
    StyleColourChanged(String),
    StyleWidthChanged(String),
    /// Copy the edit boxes into the selected row
    Edit(Table),
    CheckPath,
    ClearLog,
    ClearTables,
}

impl KmlEditor {
    /// Load the native library and start an empty session
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let backend = NativeLibrary::load(&settings.library_path);
        let session = Session::new(backend, &settings);

        (
            KmlEditor {
                session,
                file_menu_open: false,
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        self.session.title().to_string()
    }

    /// Handle application messages and update state.
    ///
    /// Outcomes of file commands are written to the log panel by the session.
    fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::ToggleFileMenu) {
            self.file_menu_open = false;
        }

        match message {
            Message::ToggleFileMenu => {
                self.file_menu_open = !self.file_menu_open;
            }
            Message::Open => {
                if let Some(filename) = dialogs::ask_open_path() {
                    let _ = self.session.open(&filename);
                }
            }
            Message::Save => {
                if self.session.is_open() {
                    let _ = self.session.save();
                }
            }
            Message::SaveAs => {
                let Some(current) = self.session.filename().map(str::to_owned) else {
                    return Task::none();
                };
                if let Some(filename) = dialogs::ask_save_path(Some(&current)) {
                    let confirmed = overwrite_confirmed(&filename, &current, || {
                        dialogs::confirm(
                            "Confirm Overwrite",
                            &format!("Are you sure you want to overwrite <{current}>?"),
                        )
                    });
                    let _ = self.session.save_as(&filename, confirmed);
                }
            }
            Message::About => dialogs::show_about(),
            Message::Quit => {
                if dialogs::confirm("Quit?", "Are you sure you want to quit the app?") {
                    self.session.close();
                    return iced::exit();
                }
            }
            Message::RowSelected(table, index) => self.session.select(table, index),
            Message::PointNameChanged(value) => self.session.edits_mut().point_name = value,
            Message::PathNameChanged(value) => self.session.edits_mut().path_name = value,
            Message::StyleColourChanged(value) => self.session.edits_mut().style_colour = value,
            Message::StyleWidthChanged(value) => self.session.edits_mut().style_width = value,
            Message::Edit(table) => {
                self.session.edit(table);
            }
            Message::CheckPath => {
                let _ = self.session.check_path();
            }
            Message::ClearLog => self.session.clear_log(),
            Message::ClearTables => self.session.clear_tables(),
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let tables = self.session.tables();
        let selection = self.session.selection();
        let edits = self.session.edits();

        let points = column![
            panels::table("Points", &tables.points, Table::Points, selection.point),
            panels::edit_row(
                "Name",
                &edits.point_name,
                Message::PointNameChanged,
                selection.point.map(|_| Message::Edit(Table::Points)),
            ),
        ]
        .spacing(6);

        let paths = column![
            panels::table("Paths", &tables.paths, Table::Paths, selection.path),
            panels::edit_row(
                "Name",
                &edits.path_name,
                Message::PathNameChanged,
                selection.path.map(|_| Message::Edit(Table::Paths)),
            ),
            button("Check loop and length")
                .on_press_maybe(selection.path.map(|_| Message::CheckPath)),
        ]
        .spacing(6);

        let styles = column![
            panels::table("Styles", &tables.styles, Table::Styles, selection.style),
            panels::edit_row(
                "Colour",
                &edits.style_colour,
                Message::StyleColourChanged,
                selection.style.map(|_| Message::Edit(Table::Styles)),
            ),
            panels::edit_row(
                "Width",
                &edits.style_width,
                Message::StyleWidthChanged,
                selection.style.map(|_| Message::Edit(Table::Styles)),
            ),
        ]
        .spacing(6);

        let log = column![
            panels::log_list(self.session.log().lines()),
            row![
                button("Clear log").on_press(Message::ClearLog),
                button("Clear tables")
                    .on_press_maybe((!tables.is_empty()).then_some(Message::ClearTables)),
            ]
            .spacing(8),
        ]
        .spacing(6);

        let content = column![
            self.menu_bar(),
            row![points, paths].spacing(10).height(Length::FillPortion(1)),
            row![styles, log].spacing(10).height(Length::FillPortion(1)),
        ]
        .spacing(10)
        .padding(10);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// File menu: a toggle button followed by its entries when open
    fn menu_bar(&self) -> Element<Message> {
        let mut bar: Row<Message> = row![button("File")
            .style(button::text)
            .on_press(Message::ToggleFileMenu)]
        .spacing(4);

        if self.file_menu_open {
            let has_file = self.session.is_open();
            let entries = [
                ("Open", Some(Message::Open)),
                ("Save", has_file.then_some(Message::Save)),
                ("Save As...", has_file.then_some(Message::SaveAs)),
                ("About", Some(Message::About)),
                ("Exit", Some(Message::Quit)),
            ];
            for (label, message) in entries {
                bar = bar.push(
                    button(text(label).size(14))
                        .style(button::secondary)
                        .on_press_maybe(message),
                );
            }
        }

        bar.into()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(hotkey)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Global key bindings: Ctrl+O, Ctrl+S, Ctrl+Shift+S, Ctrl+X
fn hotkey(key: Key, modifiers: Modifiers) -> Option<Message> {
    if !modifiers.control() {
        return None;
    }

    match key.as_ref() {
        Key::Character(c) if c.eq_ignore_ascii_case("o") => Some(Message::Open),
        Key::Character(c) if c.eq_ignore_ascii_case("s") => Some(if modifiers.shift() {
            Message::SaveAs
        } else {
            Message::Save
        }),
        Key::Character(c) if c.eq_ignore_ascii_case("x") => Some(Message::Quit),
        _ => None,
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kml_editor=info")),
        )
        .init();

    let settings = Settings::load();
    let window_size = (settings.window_width, settings.window_height);
    tracing::info!(
        library = %settings.library_path.display(),
        schema = %settings.schema_file,
        "starting KML editor"
    );

    iced::application(KmlEditor::title, KmlEditor::update, KmlEditor::view)
        .subscription(KmlEditor::subscription)
        .theme(KmlEditor::theme)
        .window_size(window_size)
        .centered()
        .run_with(move || KmlEditor::new(settings))
}

/// Saving over the current file needs one confirmation. `ask` runs only
/// when the save dialog has not already asked.
fn overwrite_confirmed(filename: &str, current: &str, ask: impl FnOnce() -> bool) -> bool {
    filename == current && (dialogs::SAVE_DIALOG_CONFIRMS_OVERWRITE || ask())
}
