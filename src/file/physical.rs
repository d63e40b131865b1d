//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for accessing files from disk using memory-mapped I/O.
//! This approach provides efficient access to large files without loading the entire content
//! into memory upfront, while still allowing fast random access to any part of the file.
//!
//! # Architecture
//!
//! The physical backend uses memory-mapped I/O to map files directly into the process's
//! virtual address space:
//!
//! - **Efficient memory usage** - Only requested portions are loaded into physical memory
//! - **Operating system optimization** - Leverages OS-level caching and paging
//! - **Lazy loading** - Pages are loaded on-demand as they are accessed
//!
//! DEX containers are read in a non-sequential pattern: the header points at tables, table
//! rows point into the data section, and class data points at code items. Memory mapping
//! keeps those scattered reads cheap for multi-megabyte `classes.dex` files.
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use dexscope::file::{Physical, Backend};
//! use std::path::Path;
//!
//! let physical = Physical::new(Path::new("classes.dex"))?;
//! println!("File size: {} bytes", physical.len());
//!
//! // Read the first 4 bytes of the magic
//! let magic = physical.data_slice(0, 4)?;
//! assert_eq!(magic, b"dex\n");
//! # Ok::<(), dexscope::Error>(())
//! ```

use super::Backend;
use crate::{Error::FileError, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for efficient access to files on disk.
///
/// [`crate::file::physical::Physical`] maps the file directly into the process's virtual
/// address space as read-only shared memory. All access operations include bounds checking
/// to ensure memory safety.
///
/// # Examples
///
/// ```rust,ignore
/// use dexscope::file::{Physical, Backend};
/// use std::path::Path;
///
/// let physical = Physical::new(Path::new("classes.dex"))?;
/// assert_eq!(physical.data_slice(0, 4)?, b"dex\n");
/// # Ok::<(), dexscope::Error>(())
/// ```
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// The file is mapped as read-only and shared, allowing multiple processes to
    /// efficiently access the same file.
    ///
    /// # Arguments
    /// * `path` - Path to the DEX file on disk. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or the
    /// memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(FileError(error)),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(crate::Error::OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(crate::Error::OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn physical() {
        let path = temp_file("dexscope_physical.bin", b"dex\n035\0rest-of-container");
        let physical = Physical::new(&path).unwrap();

        assert_eq!(physical.len(), 25);
        assert_eq!(physical.data_slice(0, 4).unwrap(), b"dex\n");
        assert_eq!(physical.data()[4], b'0');

        assert!(physical
            .data_slice(u32::MAX as usize, u32::MAX as usize)
            .is_err());
        assert!(physical.data_slice(0, 1024).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn physical_invalid_file_path() {
        let result = Physical::new(PathBuf::from("/nonexistent/path/to/classes.dex"));
        match result.unwrap_err() {
            FileError(io_error) => {
                assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected FileError"),
        }
    }

    #[test]
    fn physical_empty_file() {
        let path = temp_file("dexscope_physical_empty.bin", b"");
        let physical = Physical::new(&path).unwrap();

        assert_eq!(physical.len(), 0);
        assert!(physical.data_slice(0, 1).is_err());
        let empty_slice: &[u8] = &[];
        assert_eq!(physical.data_slice(0, 0).unwrap(), empty_slice);

        std::fs::remove_file(&path).unwrap();
    }
}
