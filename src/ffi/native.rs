use std::ffi::{c_char, c_double, c_int, c_void, CStr, CString};
use std::path::Path;
use std::ptr::NonNull;

use libloading::Library;

use super::{KmlBackend, LibraryError, ListKind, PathMetrics};

/// Memory layout of the library's `KML` struct: five list pointers
#[repr(C)]
struct RawKml {
    namespaces: *mut c_void,
    point_placemarks: *mut c_void,
    path_placemarks: *mut c_void,
    styles: *mut c_void,
    style_maps: *mut c_void,
}

type CreateValidKml = unsafe extern "C" fn(*const c_char, *const c_char) -> *mut RawKml;
type ValidateKml = unsafe extern "C" fn(*const RawKml, *const c_char) -> bool;
type GetLength = unsafe extern "C" fn(*const c_void) -> c_int;
type ListToString = unsafe extern "C" fn(*const c_void) -> *mut c_char;
type UpdateName = unsafe extern "C" fn(*const c_char, c_int, *mut RawKml) -> c_int;
type UpdateStyle = unsafe extern "C" fn(*const c_char, c_int, c_int, *mut RawKml) -> c_int;
type WriteKml = unsafe extern "C" fn(*const RawKml, *const c_char) -> bool;
type GetPathPlacemark = unsafe extern "C" fn(*const RawKml, *const c_char) -> *const c_void;
type GetPathLen = unsafe extern "C" fn(*const c_void) -> c_double;
type IsLoopPath = unsafe extern "C" fn(*const c_void, c_double) -> bool;
type DeleteKml = unsafe extern "C" fn(*mut RawKml);
type Free = unsafe extern "C" fn(*mut c_void);

/// A KML document owned by the native library.
///
/// Never null. Released only through [`KmlBackend::delete`].
#[derive(Debug)]
pub struct NativeDocument(NonNull<RawKml>);

impl NativeDocument {
    fn list(&self, list: ListKind) -> *const c_void {
        // SAFETY: the pointer came from createValidKML and has not been deleted
        let raw = unsafe { self.0.as_ref() };
        let list = match list {
            ListKind::Namespaces => raw.namespaces,
            ListKind::Points => raw.point_placemarks,
            ListKind::Paths => raw.path_placemarks,
            ListKind::Styles => raw.styles,
            ListKind::StyleMaps => raw.style_maps,
        };
        list.cast_const()
    }
}

/// `libkmlparser.so` loaded at runtime.
///
/// The function pointers stay valid for as long as `_library` is alive,
/// which is the lifetime of this struct.
pub struct NativeLibrary {
    create_valid_kml: CreateValidKml,
    validate_kml: ValidateKml,
    get_length: GetLength,
    to_string: ListToString,
    update_point: UpdateName,
    update_path: UpdateName,
    update_style: UpdateStyle,
    write_kml: WriteKml,
    get_path_placemark: GetPathPlacemark,
    get_path_len: GetPathLen,
    is_loop_path: IsLoopPath,
    delete_kml: DeleteKml,
    /// libc `free`, resolved through the library's dependency chain
    free: Option<Free>,
    _library: Library,
}

impl NativeLibrary {
    /// Load the library at `path` and resolve every entry point
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        // SAFETY: loading runs the library's initialisers; libkmlparser has none
        let library = unsafe { Library::new(path) }.map_err(|source| LibraryError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: the signatures below match the library's C header
        let loaded = unsafe {
            Self {
                create_valid_kml: symbol(&library, "createValidKML")?,
                validate_kml: symbol(&library, "validateKML")?,
                get_length: symbol(&library, "getLength")?,
                to_string: symbol(&library, "toString")?,
                update_point: symbol(&library, "updatePoint")?,
                update_path: symbol(&library, "updatePath")?,
                update_style: symbol(&library, "updateStyle")?,
                write_kml: symbol(&library, "writeKML")?,
                get_path_placemark: symbol(&library, "getPathPlacemark")?,
                get_path_len: symbol(&library, "getPathLen")?,
                is_loop_path: symbol(&library, "isLoopPath")?,
                delete_kml: symbol(&library, "deleteKML")?,
                free: symbol(&library, "free").ok(),
                _library: library,
            }
        };

        tracing::info!(path = %path.display(), "native KML library loaded");
        Ok(loaded)
    }
}

unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, LibraryError> {
    library
        .get::<T>(name.as_bytes())
        .map(|sym| *sym)
        .map_err(|source| LibraryError::Symbol { name, source })
}

fn c_string(value: &str) -> Option<CString> {
    match CString::new(value) {
        Ok(c) => Some(c),
        Err(_) => {
            tracing::warn!(value, "string contains an interior NUL byte");
            None
        }
    }
}

fn c_index(index: usize) -> Option<c_int> {
    c_int::try_from(index).ok()
}

impl KmlBackend for NativeLibrary {
    type Document = NativeDocument;

    fn create_valid(&self, file: &str, schema: &str) -> Option<NativeDocument> {
        let file = c_string(file)?;
        let schema = c_string(schema)?;
        // SAFETY: both arguments are valid NUL-terminated strings
        let raw = unsafe { (self.create_valid_kml)(file.as_ptr(), schema.as_ptr()) };
        NonNull::new(raw).map(NativeDocument)
    }

    fn validate(&self, doc: &NativeDocument, schema: &str) -> bool {
        let Some(schema) = c_string(schema) else {
            return false;
        };
        unsafe { (self.validate_kml)(doc.0.as_ptr(), schema.as_ptr()) }
    }

    fn list_len(&self, doc: &NativeDocument, list: ListKind) -> usize {
        let len = unsafe { (self.get_length)(doc.list(list)) };
        usize::try_from(len).unwrap_or(0)
    }

    fn list_to_string(&self, doc: &NativeDocument, list: ListKind) -> Option<String> {
        let raw = unsafe { (self.to_string)(doc.list(list)) };
        if raw.is_null() {
            return None;
        }

        // SAFETY: toString returns a freshly allocated NUL-terminated string
        let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        if let Some(free) = self.free {
            unsafe { free(raw.cast()) };
        }
        Some(text)
    }

    fn update_point(&self, doc: &mut NativeDocument, name: &str, index: usize) -> bool {
        let (Some(name), Some(index)) = (c_string(name), c_index(index)) else {
            return false;
        };
        unsafe { (self.update_point)(name.as_ptr(), index, doc.0.as_ptr()) == 1 }
    }

    fn update_path(&self, doc: &mut NativeDocument, name: &str, index: usize) -> bool {
        let (Some(name), Some(index)) = (c_string(name), c_index(index)) else {
            return false;
        };
        unsafe { (self.update_path)(name.as_ptr(), index, doc.0.as_ptr()) == 1 }
    }

    fn update_style(&self, doc: &mut NativeDocument, colour: &str, width: i32, index: usize) -> bool {
        let (Some(colour), Some(index)) = (c_string(colour), c_index(index)) else {
            return false;
        };
        unsafe { (self.update_style)(colour.as_ptr(), width, index, doc.0.as_ptr()) == 1 }
    }

    fn write(&self, doc: &NativeDocument, file: &str) -> bool {
        let Some(file) = c_string(file) else {
            return false;
        };
        unsafe { (self.write_kml)(doc.0.as_ptr(), file.as_ptr()) }
    }

    fn path_metrics(&self, doc: &NativeDocument, name: &str, tolerance: f64) -> Option<PathMetrics> {
        let name = c_string(name)?;
        let placemark = unsafe { (self.get_path_placemark)(doc.0.as_ptr(), name.as_ptr()) };
        if placemark.is_null() {
            return None;
        }

        // SAFETY: placemark is owned by doc, which outlives both calls
        let (length, is_loop) = unsafe {
            (
                (self.get_path_len)(placemark),
                (self.is_loop_path)(placemark, tolerance),
            )
        };
        Some(PathMetrics { length, is_loop })
    }

    fn delete(&self, doc: NativeDocument) {
        unsafe { (self.delete_kml)(doc.0.as_ptr()) };
        tracing::debug!("native KML document released");
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("free", &self.free.is_some())
            .finish_non_exhaustive()
    }
}
