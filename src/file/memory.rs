//! In-memory backend over an owned byte buffer.
//!
//! This module provides the [`crate::file::memory::Memory`] backend that implements the
//! [`crate::file::Backend`] trait for containers already resident in memory. It backs
//! [`crate::File::from_mem`] and fits inputs that never touch disk: a `classes.dex`
//! extracted from an APK archive, bytes received over the network, or the crafted
//! fixtures the test suite assembles.
//!
//! All reads are served straight from the owned `Vec<u8>` with explicit bounds checks;
//! there is no lazy loading and no unsafe code in this backend.
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use dexscope::file::{Memory, Backend};
//!
//! let memory = Memory::new(std::fs::read("classes.dex")?);
//! assert_eq!(memory.data_slice(0, 4)?, b"dex\n");
//! # Ok::<(), dexscope::Error>(())
//! ```

use super::Backend;
use crate::{Error::OutOfBounds, Result};

/// A file backend that serves a container from an owned in-memory buffer.
///
/// [`crate::file::memory::Memory`] takes ownership of the bytes at construction and
/// hands out bounds-checked slices for the lifetime of the backend. Every `data_slice`
/// request is validated against the buffer length, with the `offset + len` addition
/// checked for overflow, so an out-of-range request can never reach the slice index.
#[derive(Debug)]
pub struct Memory {
    /// The owned container bytes.
    data: Vec<u8>,
}

impl Memory {
    /// Create a new in-memory backend that takes ownership of `data`.
    ///
    /// # Arguments
    /// * `data` - The container bytes to serve
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
