//! Schema-less structural trace decoder for Bond Compact Binary payloads.
//!
//! Captured HTTP bodies and WebSocket frames often carry Compact Binary
//! encoded structures with no schema available and an unknown amount of
//! protocol framing around them. This crate walks such a payload purely
//! from its inline type tags, field ids and container headers, and renders
//! an indented textual trace of everything it finds. Field ids stay
//! numeric; nothing is resolved to a symbolic name.
//!
//! Two entry points cover the host's needs:
//!
//! - [`decode`] — one decode pass from the start of the buffer.
//! - [`decode_with_discovery`] — a decode attempt at every byte offset,
//!   for eyeballing where the real envelope begins inside a capture.
//!
//! Both always return a string: decode failures are rendered into the
//! trace rather than surfaced as errors.
//!
//! # Example
//!
//! ```
//! // struct { 1: string "hi" }
//! let payload = [0x29, 0x02, b'h', b'i', 0x00];
//! let trace = bondlens::decode(&payload, 1);
//! assert!(trace.contains("BT_STRING"));
//! assert!(trace.contains("hi"));
//! ```

mod constants;
mod error;
mod processor;
mod reader;
mod trace;
mod walker;

pub use constants::BondDataType;
pub use error::BondError;
pub use processor::{decode, decode_with_discovery, BondProcessor};
