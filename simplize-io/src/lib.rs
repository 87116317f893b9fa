//! Triangle soup import and export
//!
//! The half-edge core only deals in raw triangle soups. This crate moves
//! those soups to and from files; the format is picked from the extension.

pub mod obj;

pub use obj::{ObjReader, ObjWriter};

use simplize_core::{Error, Result, TriangleSoup};
use std::path::Path;

/// Trait for reading triangle soups from files
pub trait SoupReader {
    fn read_soup<P: AsRef<Path>>(path: P) -> Result<TriangleSoup>;
}

/// Trait for writing triangle soups to files
pub trait SoupWriter {
    fn write_soup<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()>;
}

/// Auto-detect format and read a triangle soup
pub fn read_soup<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjReader::read_soup(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write a triangle soup
pub fn write_soup<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjWriter::write_soup(soup, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}
