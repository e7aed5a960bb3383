/// Bindings to the native KML parser
///
/// All KML semantics (parsing, schema validation, path geometry and
/// serialization) live in `libkmlparser.so`. This module exposes that
/// library through the [`KmlBackend`] trait so the editor session never
/// handles raw pointers:
/// - `native.rs` - runtime-loaded C ABI implementation
/// - `stub.rs` - scripted, call-recording backend for tests

pub mod native;
#[cfg(test)]
pub mod stub;

pub use native::NativeLibrary;

use std::path::PathBuf;

/// The lists held by a loaded KML document, in struct field order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Namespaces,
    Points,
    Paths,
    Styles,
    StyleMaps,
}

/// Geometry of a single path placemark as computed by the library
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathMetrics {
    /// Total length in metres
    pub length: f64,
    /// Whether the first and last coordinates lie within the loop tolerance
    pub is_loop: bool,
}

/// Errors raised while binding to the native library
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("missing symbol `{name}`: {source}")]
    Symbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// The operations the editor needs from a KML library.
///
/// A `Document` is an opaque handle owned by the library. It is created by
/// [`create_valid`](KmlBackend::create_valid) and must be handed back to
/// [`delete`](KmlBackend::delete) exactly once. Placemarks and styles are
/// addressed by their 0-based position in the document's lists.
pub trait KmlBackend {
    type Document;

    /// Parse `file` and validate it against `schema`. `None` on any failure.
    fn create_valid(&self, file: &str, schema: &str) -> Option<Self::Document>;

    fn validate(&self, doc: &Self::Document, schema: &str) -> bool;

    fn list_len(&self, doc: &Self::Document, list: ListKind) -> usize;

    /// Newline-delimited rendering of every element in `list`
    fn list_to_string(&self, doc: &Self::Document, list: ListKind) -> Option<String>;

    fn update_point(&self, doc: &mut Self::Document, name: &str, index: usize) -> bool;

    fn update_path(&self, doc: &mut Self::Document, name: &str, index: usize) -> bool;

    fn update_style(&self, doc: &mut Self::Document, colour: &str, width: i32, index: usize) -> bool;

    fn write(&self, doc: &Self::Document, file: &str) -> bool;

    /// Length and loop status of the path placemark called `name`
    fn path_metrics(&self, doc: &Self::Document, name: &str, tolerance: f64) -> Option<PathMetrics>;

    fn delete(&self, doc: Self::Document);
}
