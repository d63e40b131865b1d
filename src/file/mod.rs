//! DEX file abstraction and raw byte access.
//!
//! This module provides the byte-source layer every other part of the crate builds on. It
//! abstracts over different data sources (files on disk, memory buffers) and hands out
//! bounds-checked slices of the raw container, without interpreting any of it.
//!
//! # Architecture
//!
//! The module is built around a small set of cooperating pieces:
//!
//! - **File abstraction layer** - Unified interface for container access
//! - **Backend system** - Pluggable data sources (disk files, memory buffers)
//! - **I/O helpers** - Bounds-checked little-endian field reads
//!
//! Structural interpretation (header, tables, code items) deliberately lives one layer up
//! in [`crate::dex`]; a [`crate::file::File`] is nothing but safely addressable bytes. This
//! keeps the parsing layer independent of where the bytes came from, and means no component
//! above may assume which backend variant it is handed.
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Main byte-source abstraction
//! - [`crate::file::Backend`] - Trait for different data sources
//!
//! ## Backend Implementations
//! - [`crate::file::physical::Physical`] - Memory-mapped file backend for disk access
//! - [`crate::file::memory::Memory`] - In-memory buffer backend for dynamic analysis
//!
//! # Examples
//!
//! ## Loading from File
//!
//! ```rust,no_run
//! use dexscope::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("classes.dex"))?;
//! println!("Loaded {} bytes", file.len());
//! assert_eq!(file.data_slice(0, 4)?, b"dex\n");
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! ## Loading from Memory
//!
//! ```rust,no_run
//! use dexscope::File;
//! use std::fs;
//!
//! let data = fs::read("classes.dex")?;
//! let file = File::from_mem(data)?;
//! println!("Container size: {} bytes", file.len());
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! Backends are `Send + Sync` and a [`crate::file::File`] is immutable after loading, so
//! it can be shared across threads for concurrent analysis of the same container.

pub mod io;

mod memory;
mod physical;

use std::path::Path;

use crate::{Error::Empty, Result};
use memory::Memory;
use physical::Physical;

/// Backend trait for file data sources.
///
/// This trait abstracts over the source of DEX data, allowing for both in-memory and
/// on-disk representations. All implementations must be thread-safe.
///
/// The trait provides a common interface for accessing container bytes regardless of
/// whether they are memory-mapped from a file or owned by a buffer.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// This method provides bounds-checked access to the underlying data. It's used
    /// internally by the `File` struct to safely read portions of the container.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    ///
    /// For file-based backends, this typically maps the entire file into memory.
    /// For memory-based backends, this returns the underlying buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    ///
    /// This is equivalent to `self.data().len()` but may be more efficient
    /// for some backend implementations.
    fn len(&self) -> usize;
}

/// Represents a loaded DEX container as raw bytes.
///
/// This struct wraps a [`crate::file::Backend`] and provides bounds-checked access to the
/// container data. It supports loading from both files and memory buffers; structural
/// parsing happens in [`crate::dex::DexFile::open`], which borrows the `File`.
///
/// # Examples
///
/// ## Loading from a file
///
/// ```rust,no_run
/// use dexscope::File;
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("classes.dex"))?;
/// println!("Loaded {} bytes", file.len());
/// # Ok::<(), dexscope::Error>(())
/// ```
///
/// ## Loading from memory
///
/// ```rust,no_run
/// use dexscope::File;
/// use std::fs;
///
/// let data = fs::read("classes.dex")?;
/// let file = File::from_mem(data)?;
/// assert_eq!(file.data_slice(0, 4)?, b"dex\n");
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct File {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
}

impl File {
    /// Loads a DEX container from the given path.
    ///
    /// The file is memory-mapped for efficient access; no bytes are interpreted yet.
    ///
    /// # Arguments
    ///
    /// * `file` - Path to the DEX file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or opened, or if it is empty.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use dexscope::File;
    /// use std::path::Path;
    ///
    /// let file = File::from_file(Path::new("classes.dex"))?;
    /// println!("Loaded {} bytes", file.len());
    /// # Ok::<(), dexscope::Error>(())
    /// ```
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Loads a DEX container from a memory buffer.
    ///
    /// Useful when working with embedded resources, downloaded files, or crafted
    /// test fixtures.
    ///
    /// # Arguments
    ///
    /// * `data` - The bytes of the DEX container.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Empty`] if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use dexscope::File;
    /// use std::fs;
    ///
    /// let data = fs::read("classes.dex")?;
    /// let file = File::from_mem(data)?;
    /// println!("Container size: {} bytes", file.len());
    /// # Ok::<(), dexscope::Error>(())
    /// ```
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    /// Internal loader for any backend.
    ///
    /// # Arguments
    ///
    /// * `data` - The backend providing the container bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Empty`] if the backend holds no data.
    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(data),
        })
    }

    /// Returns the total size of the loaded container in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the container has a length of zero.
    ///
    /// Loading rejects empty input, so this is always `false` for a constructed `File`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entire container as a byte slice.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Returns a bounds-checked slice of the container.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the container.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the requested range does not fit.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.data.data_slice(offset, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_buffer() {
        let file = File::from_mem(b"dex\n035\0".to_vec()).unwrap();

        assert_eq!(file.len(), 8);
        assert!(!file.is_empty());
        assert_eq!(file.data_slice(0, 4).unwrap(), b"dex\n");
        assert!(file.data_slice(4, 8).is_err());
    }

    #[test]
    fn load_empty() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn load_file() {
        let path = std::env::temp_dir().join("dexscope_file_mod.bin");
        std::fs::write(&path, b"dex\n035\0payload").unwrap();

        let file = File::from_file(&path).unwrap();
        assert_eq!(file.len(), 15);
        assert_eq!(file.data_slice(0, 4).unwrap(), b"dex\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_invalid() {
        assert!(File::from_file(Path::new("does_not_exist.dex")).is_err());
    }
}
