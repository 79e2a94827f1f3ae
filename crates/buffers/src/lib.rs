//! Binary buffer utilities for bondlens.
//!
//! This crate provides a bounds-checked binary reader over a byte slice.
//! Captured network payloads are frequently truncated or misaligned, so
//! every read returns a [`Result`] instead of panicking when the cursor
//! would run past the end of the buffer.
//!
//! # Example
//!
//! ```
//! use bondlens_buffers::Reader;
//!
//! let data = [0x01, 0x02, 0x03];
//! let mut reader = Reader::new(&data);
//!
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.u16_le(), Ok(0x0302));
//! assert!(reader.u8().is_err());
//! ```

mod reader;

pub use reader::Reader;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
