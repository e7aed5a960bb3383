/// The editor session
///
/// Owns the loaded document handle, the current filename, the three tables,
/// the edit buffers and the log panel. Every user command (open, save, save
/// as, select, edit, check, clear, close) is a method here, so the whole
/// editor can be driven without a window.
///
/// Lifecycle: `NoFileOpen -> FileOpen` on a successful open. Save and save-as
/// keep the session in `FileOpen`, whatever the outcome. Opening another file
/// releases the current handle first, so at most one handle is ever live.
/// The handle is released exactly once, by `close` or by `Drop`.

use crate::config::Settings;
use crate::ffi::{KmlBackend, LibraryError, ListKind, PathMetrics};

use super::data::{parse_rows, TableRow, Tables};
use super::edit::{EditBuffers, Selection, Table};
use super::log::LogPanel;

/// Window title while no file is open
pub const DEFAULT_TITLE: &str = "KMLParser";

/// Failures reported to the user. The `Display` text is the log panel line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Native KML library is not loaded.")]
    LibraryUnavailable,
    #[error("No file is open.")]
    NoFileOpen,
    #[error("No filename given.")]
    EmptyFilename,
    #[error("<{0}> not opened.")]
    NotOpened(String),
    #[error("Style {index} has invalid width \"{width}\". File not saved.")]
    InvalidStyleWidth { index: usize, width: String },
    #[error("{} {index} contains a NUL character. File not saved.", table.label())]
    InvalidText { table: Table, index: usize },
    #[error("{} {index} was rejected by the KML library. File not saved.", table.label())]
    UpdateRejected { table: Table, index: usize },
    #[error("Data failed to validate. File not saved.")]
    ValidationFailed,
    #[error("<{0}> failed to save.")]
    WriteFailed(String),
    #[error("Save operation cancelled.")]
    Cancelled,
    #[error("No path is selected.")]
    NoPathSelected,
    #[error("No path named <{0}> in the loaded document.")]
    UnknownPath(String),
}

/// A handle together with the file it will be written to
struct OpenDocument<D> {
    handle: D,
    filename: String,
}

pub struct Session<B: KmlBackend> {
    backend: Option<B>,
    document: Option<OpenDocument<B::Document>>,
    schema: String,
    loop_tolerance: f64,
    tables: Tables,
    selection: Selection,
    edits: EditBuffers,
    log: LogPanel,
}

impl<B: KmlBackend> Session<B> {
    /// Start a session. A backend that failed to load is reported in the
    /// log panel and every file command then fails with `LibraryUnavailable`.
    pub fn new(backend: Result<B, LibraryError>, settings: &Settings) -> Self {
        let mut log = LogPanel::default();
        let backend = match backend {
            Ok(backend) => Some(backend),
            Err(e) => {
                tracing::error!("native KML library unavailable: {e}");
                log.push(format!("Native KML library unavailable: {e}"));
                None
            }
        };

        Self {
            backend,
            document: None,
            schema: settings.schema_file.clone(),
            loop_tolerance: settings.loop_tolerance,
            tables: Tables::default(),
            selection: Selection::default(),
            edits: EditBuffers::default(),
            log,
        }
    }

    // ========== Accessors ==========

    pub fn title(&self) -> &str {
        self.filename().unwrap_or(DEFAULT_TITLE)
    }

    pub fn filename(&self) -> Option<&str> {
        self.document.as_ref().map(|open| open.filename.as_str())
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn edits(&self) -> &EditBuffers {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut EditBuffers {
        &mut self.edits
    }

    pub fn log(&self) -> &LogPanel {
        &self.log
    }

    // ========== File commands ==========

    /// Open `filename`, validating it against the schema, and fill the tables.
    ///
    /// Any previously open document is released first.
    pub fn open(&mut self, filename: &str) -> Result<(), SessionError> {
        self.close();
        let result = self.load(filename);
        self.report(result)
    }

    fn load(&mut self, filename: &str) -> Result<(), SessionError> {
        if filename.trim().is_empty() {
            return Err(SessionError::EmptyFilename);
        }
        let backend = self.backend.as_ref().ok_or(SessionError::LibraryUnavailable)?;

        let handle = backend
            .create_valid(filename, &self.schema)
            .ok_or_else(|| SessionError::NotOpened(filename.to_string()))?;

        self.log
            .push(format!("<{filename}> successfully opened and KML created."));

        self.tables.points = rows_of(backend, &handle, ListKind::Points);
        self.tables.paths = rows_of(backend, &handle, ListKind::Paths);
        self.tables.styles = rows_of(backend, &handle, ListKind::Styles);

        tracing::info!(
            file = filename,
            points = self.tables.points.len(),
            paths = self.tables.paths.len(),
            styles = self.tables.styles.len(),
            namespaces = backend.list_len(&handle, ListKind::Namespaces),
            style_maps = backend.list_len(&handle, ListKind::StyleMaps),
            "document opened"
        );

        self.document = Some(OpenDocument {
            handle,
            filename: filename.to_string(),
        });
        Ok(())
    }

    /// Push every row back to the library, validate, and write to the current file
    pub fn save(&mut self) -> Result<(), SessionError> {
        let result = self.push_and_write();
        self.report(result)
    }

    /// Save under `filename`.
    ///
    /// Saving over the current file needs `overwrite_confirmed`; without it
    /// nothing is pushed, validated or written. The new name becomes the
    /// session's target even if the write then fails.
    pub fn save_as(&mut self, filename: &str, overwrite_confirmed: bool) -> Result<(), SessionError> {
        let result = self
            .retarget(filename, overwrite_confirmed)
            .and_then(|()| self.push_and_write());
        self.report(result)
    }

    fn retarget(&mut self, filename: &str, overwrite_confirmed: bool) -> Result<(), SessionError> {
        let open = self.document.as_mut().ok_or(SessionError::NoFileOpen)?;
        if filename.trim().is_empty() {
            return Err(SessionError::EmptyFilename);
        }
        if open.filename == filename && !overwrite_confirmed {
            return Err(SessionError::Cancelled);
        }

        open.filename = filename.to_string();
        Ok(())
    }

    fn push_and_write(&mut self) -> Result<(), SessionError> {
        let backend = self.backend.as_ref().ok_or(SessionError::LibraryUnavailable)?;
        let open = self.document.as_mut().ok_or(SessionError::NoFileOpen)?;

        // Widths go over the ABI as integers; reject bad ones before touching the handle
        let widths = self
            .tables
            .styles
            .iter()
            .enumerate()
            .map(|(index, style)| {
                style
                    .width
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| SessionError::InvalidStyleWidth {
                        index,
                        width: style.width.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Text goes over as C strings; reject interior NULs the same way
        check_text(Table::Points, self.tables.points.iter().map(|row| row.name.as_str()))?;
        check_text(Table::Paths, self.tables.paths.iter().map(|row| row.name.as_str()))?;
        check_text(Table::Styles, self.tables.styles.iter().map(|row| row.colour.as_str()))?;

        for (index, point) in self.tables.points.iter().enumerate() {
            if !backend.update_point(&mut open.handle, &point.name, index) {
                return Err(SessionError::UpdateRejected { table: Table::Points, index });
            }
        }
        for (index, path) in self.tables.paths.iter_mut().enumerate() {
            if !backend.update_path(&mut open.handle, &path.name, index) {
                return Err(SessionError::UpdateRejected { table: Table::Paths, index });
            }
            path.saved_name.clone_from(&path.name);
        }
        for (index, (style, width)) in self.tables.styles.iter().zip(widths).enumerate() {
            if !backend.update_style(&mut open.handle, &style.colour, width, index) {
                return Err(SessionError::UpdateRejected { table: Table::Styles, index });
            }
        }

        if !backend.validate(&open.handle, &self.schema) {
            return Err(SessionError::ValidationFailed);
        }
        self.log
            .push(format!("<{}> successfully validated.", open.filename));

        if !backend.write(&open.handle, &open.filename) {
            return Err(SessionError::WriteFailed(open.filename.clone()));
        }
        self.log.push(format!("<{}> successfully saved.", open.filename));
        Ok(())
    }

    /// Release the document and empty the tables
    pub fn close(&mut self) {
        self.release_document();
        self.clear_tables();
    }

    fn release_document(&mut self) {
        let Some(open) = self.document.take() else {
            return;
        };
        if let Some(backend) = &self.backend {
            backend.delete(open.handle);
            tracing::debug!(file = %open.filename, "document released");
        }
    }

    // ========== Selection and inline edit ==========

    /// Select row `index` of `table` and load its fields into the edit boxes
    pub fn select(&mut self, table: Table, index: usize) {
        let found = match table {
            Table::Points => self.tables.points.get(index).map(|row| self.edits.load_point(row)),
            Table::Paths => self.tables.paths.get(index).map(|row| self.edits.load_path(row)),
            Table::Styles => self.tables.styles.get(index).map(|row| self.edits.load_style(row)),
        };
        if found.is_some() {
            self.selection.set(table, Some(index));
        }
    }

    /// Copy the edit boxes into the selected row of `table`.
    ///
    /// Returns false when nothing is selected.
    pub fn edit(&mut self, table: Table) -> bool {
        let Some(index) = self.selection.get(table) else {
            return false;
        };
        let applied = match table {
            Table::Points => self.tables.points.get_mut(index).map(|row| self.edits.apply_point(row)),
            Table::Paths => self.tables.paths.get_mut(index).map(|row| self.edits.apply_path(row)),
            Table::Styles => self.tables.styles.get_mut(index).map(|row| self.edits.apply_style(row)),
        };
        applied.is_some()
    }

    /// Ask the library for the length and loop status of the selected path.
    ///
    /// The lookup uses the name the library holds, so an unsaved rename
    /// still finds its path.
    pub fn check_path(&mut self) -> Result<PathMetrics, SessionError> {
        let result = self.measure_selected_path();
        if let Ok((name, metrics)) = &result {
            let looped = if metrics.is_loop { "Yes" } else { "No" };
            self.log.push(format!(
                "<{name}> length {:.2} m, loop: {looped}",
                metrics.length
            ));
        }
        self.report(result.map(|(_, metrics)| metrics))
    }

    fn measure_selected_path(&self) -> Result<(String, PathMetrics), SessionError> {
        let backend = self.backend.as_ref().ok_or(SessionError::LibraryUnavailable)?;
        let open = self.document.as_ref().ok_or(SessionError::NoFileOpen)?;
        let row = self
            .selection
            .path
            .and_then(|index| self.tables.paths.get(index))
            .ok_or(SessionError::NoPathSelected)?;

        backend
            .path_metrics(&open.handle, &row.saved_name, self.loop_tolerance)
            .map(|metrics| (row.saved_name.clone(), metrics))
            .ok_or_else(|| SessionError::UnknownPath(row.saved_name.clone()))
    }

    // ========== Housekeeping ==========

    pub fn clear_tables(&mut self) {
        self.tables.clear();
        self.selection = Selection::default();
        self.edits.reset();
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn report<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        if let Err(e) = &result {
            tracing::warn!(error = ?e, "command failed");
            self.log.push(e.to_string());
        }
        result
    }
}

impl<B: KmlBackend> Drop for Session<B> {
    fn drop(&mut self) {
        self.release_document();
    }
}

/// First value of `table` that cannot become a C string
fn check_text<'a>(table: Table, values: impl Iterator<Item = &'a str>) -> Result<(), SessionError> {
    match values.enumerate().find(|(_, value)| value.contains('\0')) {
        Some((index, _)) => Err(SessionError::InvalidText { table, index }),
        None => Ok(()),
    }
}

/// Rows of one list, or none when the list is empty
fn rows_of<B: KmlBackend, R: TableRow>(backend: &B, doc: &B::Document, list: ListKind) -> Vec<R> {
    if backend.list_len(doc, list) == 0 {
        return Vec::new();
    }
    backend
        .list_to_string(doc, list)
        .map(|text| parse_rows(&text))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::stub::{Call, CallLog, StubBackend};
    use crate::ffi::NativeLibrary;
    use std::path::Path;

    const POINTS: &str = "Summit;-79.300000,43.600000,120.000000\nn/a;-80.100000,44.000000\n";
    const PATHS: &str = "Trail,1523.400000,No\nLoop road,804.250000,Yes\n";
    const STYLES: &str = "ff0000ff,4,1\n";

    fn opened() -> (Session<StubBackend>, CallLog) {
        let stub = StubBackend::with_lists(POINTS, PATHS, STYLES);
        let calls = stub.recorder();
        let mut session = Session::new(Ok(stub), &Settings::default());
        session.open("trails.kml").unwrap();
        calls.borrow_mut().clear();
        (session, calls)
    }

    fn session_with(stub: StubBackend) -> (Session<StubBackend>, CallLog) {
        let calls = stub.recorder();
        (Session::new(Ok(stub), &Settings::default()), calls)
    }

    #[test]
    fn test_failed_open_logs_once_and_populates_nothing() {
        let (mut session, calls) = session_with(StubBackend::failing());

        let result = session.open("missing.kml");

        assert_eq!(result, Err(SessionError::NotOpened("missing.kml".into())));
        assert!(session.tables().is_empty());
        assert!(!session.is_open());
        assert_eq!(session.title(), DEFAULT_TITLE);
        assert_eq!(session.log().messages().collect::<Vec<_>>(), vec!["<missing.kml> not opened."]);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Create {
                file: "missing.kml".into(),
                schema: "ogckml22.xsd".into()
            }]
        );
    }

    #[test]
    fn test_open_fills_one_row_per_line() {
        let (session, _) = opened();
        let tables = session.tables();

        assert_eq!(tables.points.len(), 2);
        assert_eq!(tables.points[0].name, "Summit");
        assert_eq!(tables.points[0].coordinate, "-79.300000,43.600000,120.000000");
        assert_eq!(tables.points[1].name, "n/a");

        assert_eq!(tables.paths.len(), 2);
        assert_eq!(tables.paths[1].name, "Loop road");
        assert_eq!(tables.paths[1].length, "804.250000");
        assert_eq!(tables.paths[1].is_loop, "Yes");

        assert_eq!(tables.styles.len(), 1);
        assert_eq!(tables.styles[0].cells(), vec!["ff0000ff", "4", "1"]);

        assert_eq!(session.title(), "trails.kml");
        assert_eq!(
            session.log().messages().last(),
            Some("<trails.kml> successfully opened and KML created.")
        );
    }

    #[test]
    fn test_empty_lists_leave_tables_empty() {
        let (mut session, _) = session_with(StubBackend::with_lists("", "", ""));
        session.open("empty.kml").unwrap();
        assert!(session.tables().is_empty());
        assert!(session.is_open());
    }

    #[test]
    fn test_save_pushes_rows_in_order_then_validates_and_writes() {
        let (mut session, calls) = opened();

        session.save().unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                Call::UpdatePoint { name: "Summit".into(), index: 0 },
                Call::UpdatePoint { name: "n/a".into(), index: 1 },
                Call::UpdatePath { name: "Trail".into(), index: 0 },
                Call::UpdatePath { name: "Loop road".into(), index: 1 },
                Call::UpdateStyle { colour: "ff0000ff".into(), width: 4, index: 0 },
                Call::Validate { schema: "ogckml22.xsd".into() },
                Call::Write { file: "trails.kml".into() },
            ]
        );
        let messages: Vec<_> = session.log().messages().collect();
        assert_eq!(
            &messages[messages.len() - 2..],
            ["<trails.kml> successfully validated.", "<trails.kml> successfully saved."]
        );
    }

    #[test]
    fn test_invalid_document_is_never_written() {
        let mut stub = StubBackend::with_lists(POINTS, PATHS, STYLES);
        stub.validates = false;
        let (mut session, calls) = session_with(stub);
        session.open("trails.kml").unwrap();

        let result = session.save();

        assert_eq!(result, Err(SessionError::ValidationFailed));
        assert!(!calls.borrow().iter().any(|call| matches!(call, Call::Write { .. })));
        assert_eq!(
            session.log().messages().last(),
            Some("Data failed to validate. File not saved.")
        );
        assert!(session.is_open());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut stub = StubBackend::with_lists(POINTS, PATHS, STYLES);
        stub.writes = false;
        let (mut session, _) = session_with(stub);
        session.open("trails.kml").unwrap();

        assert_eq!(session.save(), Err(SessionError::WriteFailed("trails.kml".into())));
        assert_eq!(session.log().messages().last(), Some("<trails.kml> failed to save."));
    }

    #[test]
    fn test_declined_overwrite_touches_nothing() {
        let (mut session, calls) = opened();

        let result = session.save_as("trails.kml", false);

        assert_eq!(result, Err(SessionError::Cancelled));
        assert!(calls.borrow().is_empty());
        assert_eq!(session.log().messages().last(), Some("Save operation cancelled."));
        assert_eq!(session.filename(), Some("trails.kml"));
    }

    #[test]
    fn test_confirmed_overwrite_saves() {
        let (mut session, calls) = opened();
        session.save_as("trails.kml", true).unwrap();
        assert_eq!(calls.borrow().last(), Some(&Call::Write { file: "trails.kml".into() }));
    }

    #[test]
    fn test_save_as_new_name_retargets() {
        let (mut session, calls) = opened();

        session.save_as("copy.kml", false).unwrap();

        assert_eq!(calls.borrow().last(), Some(&Call::Write { file: "copy.kml".into() }));
        assert_eq!(session.title(), "copy.kml");

        calls.borrow_mut().clear();
        session.save().unwrap();
        assert_eq!(calls.borrow().last(), Some(&Call::Write { file: "copy.kml".into() }));
    }

    #[test]
    fn test_save_without_file() {
        let (mut session, calls) = session_with(StubBackend::with_lists("", "", ""));
        assert_eq!(session.save(), Err(SessionError::NoFileOpen));
        assert_eq!(session.save_as("x.kml", true), Err(SessionError::NoFileOpen));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_bad_width_aborts_before_any_update() {
        let (mut session, calls) = opened();
        session.select(Table::Styles, 0);
        session.edits_mut().style_width = "wide".into();
        assert!(session.edit(Table::Styles));

        let result = session.save();

        assert_eq!(
            result,
            Err(SessionError::InvalidStyleWidth { index: 0, width: "wide".into() })
        );
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_nul_in_name_aborts_before_any_update() {
        let (mut session, calls) = opened();
        session.select(Table::Paths, 1);
        session.edits_mut().path_name = "Loop\0road".into();
        assert!(session.edit(Table::Paths));

        let result = session.save();

        assert_eq!(result, Err(SessionError::InvalidText { table: Table::Paths, index: 1 }));
        assert!(calls.borrow().is_empty());
        assert_eq!(
            session.log().messages().last(),
            Some("Path 1 contains a NUL character. File not saved.")
        );
    }

    #[test]
    fn test_rejected_update_is_never_validated_or_written() {
        let mut stub = StubBackend::with_lists(POINTS, PATHS, STYLES);
        stub.rejected = Some((ListKind::Points, 1));
        let (mut session, calls) = session_with(stub);
        session.open("trails.kml").unwrap();
        calls.borrow_mut().clear();

        let result = session.save();

        assert_eq!(result, Err(SessionError::UpdateRejected { table: Table::Points, index: 1 }));
        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(!calls
            .iter()
            .any(|call| matches!(call, Call::Validate { .. } | Call::Write { .. })));
        assert_eq!(
            session.log().messages().last(),
            Some("Point 1 was rejected by the KML library. File not saved.")
        );
    }

    #[test]
    fn test_edit_changes_only_target_fields() {
        let (mut session, calls) = opened();
        let before = session.tables().clone();

        session.select(Table::Points, 1);
        assert_eq!(session.edits().point_name, "n/a");
        session.edits_mut().point_name = "Lookout".into();
        assert!(session.edit(Table::Points));

        session.select(Table::Styles, 0);
        session.edits_mut().style_colour = "7f00ff00".into();
        session.edits_mut().style_width = "2".into();
        assert!(session.edit(Table::Styles));

        let after = session.tables();
        assert_eq!(after.points[1].name, "Lookout");
        assert_eq!(after.points[1].coordinate, before.points[1].coordinate);
        assert_eq!(after.points[0], before.points[0]);
        assert_eq!(after.paths, before.paths);
        assert_eq!(after.styles[0].colour, "7f00ff00");
        assert_eq!(after.styles[0].width, "2");
        assert_eq!(after.styles[0].fill, before.styles[0].fill);

        // Edits stay local until the next save
        assert!(calls.borrow().is_empty());
        session.save().unwrap();
        assert!(calls
            .borrow()
            .contains(&Call::UpdatePoint { name: "Lookout".into(), index: 1 }));
    }

    #[test]
    fn test_edit_without_selection_is_a_no_op() {
        let (mut session, _) = opened();
        let before = session.tables().clone();
        session.edits_mut().path_name = "Ignored".into();

        assert!(!session.edit(Table::Paths));
        assert_eq!(session.tables().paths, before.paths);
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let (mut session, _) = opened();
        session.select(Table::Paths, 0);
        session.select(Table::Paths, 9);
        assert_eq!(session.selection().path, Some(0));
        assert_eq!(session.edits().path_name, "Trail");
    }

    #[test]
    fn test_reopen_releases_previous_handle() {
        let (mut session, calls) = opened();

        session.open("other.kml").unwrap();

        let calls = calls.borrow();
        assert_eq!(calls[0], Call::Delete { id: 1 });
        assert!(matches!(&calls[1], Call::Create { file, .. } if file == "other.kml"));
    }

    #[test]
    fn test_handle_released_exactly_once() {
        let (mut session, calls) = opened();
        session.close();
        session.close();
        assert_eq!(session.title(), DEFAULT_TITLE);
        drop(session);

        let deletes = calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::Delete { .. }))
            .count();
        assert_eq!(deletes, 1);
    }

    #[test]
    fn test_drop_releases_open_handle() {
        let (session, calls) = opened();
        drop(session);
        assert_eq!(*calls.borrow(), vec![Call::Delete { id: 1 }]);
    }

    #[test]
    fn test_failed_reopen_leaves_no_file_open() {
        let (mut session, _) = opened();
        session.open("").unwrap_err();
        assert!(!session.is_open());
        assert!(session.tables().is_empty());
        assert_eq!(session.log().messages().last(), Some("No filename given."));
    }

    #[test]
    fn test_check_path_reports_metrics() {
        let mut stub = StubBackend::with_lists(POINTS, PATHS, STYLES);
        stub.paths.insert(
            "Loop road".into(),
            PathMetrics { length: 804.25, is_loop: true },
        );
        let (mut session, calls) = session_with(stub);
        session.open("trails.kml").unwrap();

        assert_eq!(session.check_path(), Err(SessionError::NoPathSelected));

        session.select(Table::Paths, 1);
        let metrics = session.check_path().unwrap();
        assert!(metrics.is_loop);
        assert_eq!(
            session.log().messages().last(),
            Some("<Loop road> length 804.25 m, loop: Yes")
        );
        assert!(calls
            .borrow()
            .contains(&Call::PathMetrics { name: "Loop road".into(), tolerance: 10.0 }));

        session.select(Table::Paths, 0);
        assert_eq!(session.check_path(), Err(SessionError::UnknownPath("Trail".into())));
    }

    #[test]
    fn test_check_path_uses_saved_name_until_save() {
        let mut stub = StubBackend::with_lists(POINTS, PATHS, STYLES);
        stub.paths.insert(
            "Loop road".into(),
            PathMetrics { length: 804.25, is_loop: true },
        );
        let (mut session, calls) = session_with(stub);
        session.open("trails.kml").unwrap();

        session.select(Table::Paths, 1);
        session.edits_mut().path_name = "Ring road".into();
        assert!(session.edit(Table::Paths));
        assert!(session.check_path().is_ok());

        calls.borrow_mut().clear();
        session.save().unwrap();
        assert_eq!(
            session.check_path(),
            Err(SessionError::UnknownPath("Ring road".into()))
        );
        assert_eq!(
            calls.borrow().last(),
            Some(&Call::PathMetrics { name: "Ring road".into(), tolerance: 10.0 })
        );
    }

    #[test]
    fn test_missing_library_reports_every_command() {
        let backend = NativeLibrary::load(Path::new("./no-such-dir/libkmlparser.so"));
        let mut session = Session::new(backend, &Settings::default());

        assert_eq!(session.log().lines().len(), 1);
        assert_eq!(session.open("trails.kml"), Err(SessionError::LibraryUnavailable));
        assert_eq!(
            session.log().messages().last(),
            Some("Native KML library is not loaded.")
        );
    }

    #[test]
    fn test_clear_log_and_tables() {
        let (mut session, _) = opened();
        session.select(Table::Points, 0);

        session.clear_tables();
        session.clear_log();

        assert!(session.tables().is_empty());
        assert_eq!(session.selection(), Selection::default());
        assert!(session.log().lines().is_empty());
        assert!(session.is_open());
    }
}
