use bondlens_buffers::BufferError;
use thiserror::Error;

use crate::constants::BondDataType;

/// Error type for Compact Binary decode operations.
///
/// Both variants collapse into the same observable outcome at the public
/// entry points: the decode attempt stops and the error text is appended
/// to the trace.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BondError {
    #[error("attempted to read past the end of the buffer")]
    EndOfBuffer,
    #[error("cannot skip value of data type {0}")]
    Unskippable(BondDataType),
    #[error("structure nesting exceeds the supported depth")]
    NestingTooDeep,
}

impl From<BufferError> for BondError {
    fn from(_: BufferError) -> Self {
        BondError::EndOfBuffer
    }
}
