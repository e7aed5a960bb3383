/// Shared data structures for the editor state
///
/// These rows are flat projections of the lists held by the native KML
/// document. A row's position in its table is the index the library expects
/// when the row is pushed back on save.

/// A record that can be parsed from one line of the library's list output
/// and shown as a row of cells.
pub trait TableRow {
    /// Column headings, in cell order
    const COLUMNS: &'static [&'static str];

    /// Parse one non-empty line. Missing fields become empty strings.
    fn parse(line: &str) -> Self;

    fn cells(&self) -> Vec<&str>;
}

/// A point placemark: `name;coordinate`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointRow {
    pub name: String,
    /// `lon,lat` or `lon,lat,alt` as rendered by the library
    pub coordinate: String,
}

/// A path placemark: `name,length,is-loop`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathRow {
    pub name: String,
    /// Name as last loaded from or pushed to the library
    pub saved_name: String,
    pub length: String,
    /// `Yes` or `No`
    pub is_loop: String,
}

/// A style: `colour,width,fill`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleRow {
    pub colour: String,
    pub width: String,
    pub fill: String,
}

impl TableRow for PointRow {
    const COLUMNS: &'static [&'static str] = &["Name", "Coordinate"];

    fn parse(line: &str) -> Self {
        // Coordinates contain commas, so points use ';' between fields
        let (name, coordinate) = line.split_once(';').unwrap_or((line, ""));
        Self {
            name: name.to_string(),
            coordinate: coordinate.to_string(),
        }
    }

    fn cells(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.coordinate.as_str()]
    }
}

impl TableRow for PathRow {
    const COLUMNS: &'static [&'static str] = &["Name", "Length", "IsLoop"];

    fn parse(line: &str) -> Self {
        // Split from the right: the trailing fields are numeric/Yes/No,
        // the name is free text
        let mut fields = line.rsplitn(3, ',');
        let is_loop = fields.next().unwrap_or_default();
        let length = fields.next().unwrap_or_default();
        match fields.next() {
            Some(name) => Self {
                name: name.to_string(),
                saved_name: name.to_string(),
                length: length.to_string(),
                is_loop: is_loop.to_string(),
            },
            // Fewer than three fields: fill from the left
            None if length.is_empty() => Self {
                name: is_loop.to_string(),
                saved_name: is_loop.to_string(),
                ..Self::default()
            },
            None => Self {
                name: length.to_string(),
                saved_name: length.to_string(),
                length: is_loop.to_string(),
                ..Self::default()
            },
        }
    }

    fn cells(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.length.as_str(), self.is_loop.as_str()]
    }
}

impl TableRow for StyleRow {
    const COLUMNS: &'static [&'static str] = &["Colour", "Width", "Fill"];

    fn parse(line: &str) -> Self {
        let mut fields = line.splitn(3, ',');
        Self {
            colour: fields.next().unwrap_or_default().to_string(),
            width: fields.next().unwrap_or_default().to_string(),
            fill: fields.next().unwrap_or_default().to_string(),
        }
    }

    fn cells(&self) -> Vec<&str> {
        vec![self.colour.as_str(), self.width.as_str(), self.fill.as_str()]
    }
}

/// Split a newline-delimited list rendering into rows, dropping blank lines
pub fn parse_rows<R: TableRow>(text: &str) -> Vec<R> {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(R::parse)
        .collect()
}

/// The three tables shown by the editor
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub points: Vec<PointRow>,
    pub paths: Vec<PathRow>,
    pub styles: Vec<StyleRow>,
}

impl Tables {
    pub fn clear(&mut self) {
        self.points.clear();
        self.paths.clear();
        self.styles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.paths.is_empty() && self.styles.is_empty()
    }
}
