/// Scripted backend that records every call, for session tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KmlBackend, ListKind, PathMetrics};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { file: String, schema: String },
    Validate { schema: String },
    UpdatePoint { name: String, index: usize },
    UpdatePath { name: String, index: usize },
    UpdateStyle { colour: String, width: i32, index: usize },
    Write { file: String },
    PathMetrics { name: String, tolerance: f64 },
    Delete { id: u32 },
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug)]
pub struct StubDocument {
    pub id: u32,
}

#[derive(Debug, Default)]
pub struct StubBackend {
    /// `None` makes create_valid fail
    pub lists: Option<HashMap<ListKind, String>>,
    pub validates: bool,
    pub writes: bool,
    pub paths: HashMap<String, PathMetrics>,
    /// Update of this list entry returns false
    pub rejected: Option<(ListKind, usize)>,
    pub calls: CallLog,
    next_id: RefCell<u32>,
}

impl StubBackend {
    /// A backend whose create call always returns null
    pub fn failing() -> Self {
        Self::default()
    }

    /// A backend that opens successfully with the given list renderings
    pub fn with_lists(points: &str, paths: &str, styles: &str) -> Self {
        let lists = HashMap::from([
            (ListKind::Points, points.to_string()),
            (ListKind::Paths, paths.to_string()),
            (ListKind::Styles, styles.to_string()),
        ]);
        Self {
            lists: Some(lists),
            validates: true,
            writes: true,
            ..Self::default()
        }
    }

    pub fn recorder(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn text(&self, list: ListKind) -> &str {
        self.lists
            .as_ref()
            .and_then(|lists| lists.get(&list))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl KmlBackend for StubBackend {
    type Document = StubDocument;

    fn create_valid(&self, file: &str, schema: &str) -> Option<StubDocument> {
        self.record(Call::Create {
            file: file.to_string(),
            schema: schema.to_string(),
        });
        self.lists.as_ref()?;

        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;
        Some(StubDocument { id: *next_id })
    }

    fn validate(&self, _doc: &StubDocument, schema: &str) -> bool {
        self.record(Call::Validate {
            schema: schema.to_string(),
        });
        self.validates
    }

    fn list_len(&self, _doc: &StubDocument, list: ListKind) -> usize {
        self.text(list).lines().filter(|line| !line.is_empty()).count()
    }

    fn list_to_string(&self, _doc: &StubDocument, list: ListKind) -> Option<String> {
        Some(self.text(list).to_string())
    }

    fn update_point(&self, _doc: &mut StubDocument, name: &str, index: usize) -> bool {
        self.record(Call::UpdatePoint {
            name: name.to_string(),
            index,
        });
        self.rejected != Some((ListKind::Points, index))
    }

    fn update_path(&self, _doc: &mut StubDocument, name: &str, index: usize) -> bool {
        self.record(Call::UpdatePath {
            name: name.to_string(),
            index,
        });
        self.rejected != Some((ListKind::Paths, index))
    }

    fn update_style(&self, _doc: &mut StubDocument, colour: &str, width: i32, index: usize) -> bool {
        self.record(Call::UpdateStyle {
            colour: colour.to_string(),
            width,
            index,
        });
        self.rejected != Some((ListKind::Styles, index))
    }

    fn write(&self, _doc: &StubDocument, file: &str) -> bool {
        self.record(Call::Write {
            file: file.to_string(),
        });
        self.writes
    }

    fn path_metrics(&self, _doc: &StubDocument, name: &str, tolerance: f64) -> Option<PathMetrics> {
        self.record(Call::PathMetrics {
            name: name.to_string(),
            tolerance,
        });
        self.paths.get(name).copied()
    }

    fn delete(&self, doc: StubDocument) {
        self.record(Call::Delete { id: doc.id });
    }
}
