/// Inline edit state for the three tables
///
/// Selecting a row copies its editable fields into the text boxes held
/// here; the Edit action writes them back into the selected row. Nothing is
/// validated at this point: bad values surface at the next save, when the
/// library validates the whole document against the schema.

use super::data::{PathRow, PointRow, StyleRow};

/// Which table a selection or edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Points,
    Paths,
    Styles,
}

/// Contents of the editable text boxes beside each table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffers {
    // ========== Points ==========
    pub point_name: String,

    // ========== Paths ==========
    pub path_name: String,

    // ========== Styles ==========
    pub style_colour: String,
    pub style_width: String,
}

/// Selected row index per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub point: Option<usize>,
    pub path: Option<usize>,
    pub style: Option<usize>,
}

impl Table {
    /// Singular row name used in messages
    pub fn label(self) -> &'static str {
        match self {
            Table::Points => "Point",
            Table::Paths => "Path",
            Table::Styles => "Style",
        }
    }
}

impl Selection {
    pub fn get(&self, table: Table) -> Option<usize> {
        match table {
            Table::Points => self.point,
            Table::Paths => self.path,
            Table::Styles => self.style,
        }
    }

    pub fn set(&mut self, table: Table, index: Option<usize>) {
        match table {
            Table::Points => self.point = index,
            Table::Paths => self.path = index,
            Table::Styles => self.style = index,
        }
    }
}

impl EditBuffers {
    pub fn load_point(&mut self, row: &PointRow) {
        self.point_name.clone_from(&row.name);
    }

    pub fn load_path(&mut self, row: &PathRow) {
        self.path_name.clone_from(&row.name);
    }

    pub fn load_style(&mut self, row: &StyleRow) {
        self.style_colour.clone_from(&row.colour);
        self.style_width.clone_from(&row.width);
    }

    /// Copy the point box into `row`, leaving the coordinate untouched
    pub fn apply_point(&self, row: &mut PointRow) {
        row.name.clone_from(&self.point_name);
    }

    /// Copy the path box into `row`, leaving length and loop status untouched
    pub fn apply_path(&self, row: &mut PathRow) {
        row.name.clone_from(&self.path_name);
    }

    /// Copy colour and width into `row`, leaving fill untouched
    pub fn apply_style(&self, row: &mut StyleRow) {
        row.colour.clone_from(&self.style_colour);
        row.width.clone_from(&self.style_width);
    }

    /// Empty every text box
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
