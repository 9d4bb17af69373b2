//! File port for attachment content.

use std::fs;
use std::io;

use camino::Utf8Path;

/// Reads whole files on behalf of the attachment operation.
///
/// The handle is scoped to the call: implementations open, read, and release
/// regardless of outcome, so a failed dispatch never pins a descriptor.
pub trait FileSource {
    /// Reads the entire file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the file cannot be opened or
    /// read.
    fn read_all(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;
}

/// [`FileSource`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSource;

impl FileSource for SystemFileSource {
    fn read_all(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        fs::read(path.as_std_path())
    }
}
