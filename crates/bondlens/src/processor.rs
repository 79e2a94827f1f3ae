//! Decode entry points and the incremental discovery scanner.

use crate::reader::CompactBinaryReader;
use crate::trace::Tracer;
use crate::walker;

/// Drives schema-less decodes and holds the rendered trace for a host view.
///
/// The accumulated text is the only state that outlives a decode call;
/// depth and trace bookkeeping live in a per-call [`Tracer`], so one
/// processor can serve sequential decodes without cross-talk.
pub struct BondProcessor {
    version: u16,
    text: String,
}

impl BondProcessor {
    pub fn new(version: u16) -> Self {
        Self {
            version,
            text: String::new(),
        }
    }

    /// Decodes `bytes` and replaces the held trace with the result.
    ///
    /// `skip` is reported in the trace but does not move the cursor. With
    /// `iterative_discovery` set, a full decode attempt runs at every byte
    /// offset of the buffer; otherwise a single attempt runs from offset
    /// zero. Decode failures are rendered into the trace, never returned.
    pub fn process_bytes(
        &mut self,
        bytes: Option<&[u8]>,
        iterative_discovery: bool,
        skip: usize,
    ) -> &str {
        let mut tracer = Tracer::new();
        match bytes {
            Some(content) if !content.is_empty() => {
                tracer.push_line(&format!("Skipping bytes: {skip}"));
                if iterative_discovery {
                    run_discovery(content, self.version, &mut tracer);
                } else {
                    run_single(content, self.version, &mut tracer);
                }
            }
            _ => tracer.push_line("No byte content to read."),
        }
        self.text = tracer.into_string();
        &self.text
    }

    /// The last rendered trace.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Drops the held trace, for the host's clear operation.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

fn run_single(content: &[u8], version: u16, tracer: &mut Tracer) {
    let mut reader = CompactBinaryReader::new(content, version);
    if let Err(error) = walker::read_struct(&mut reader, tracer) {
        tracer.push_line(&error.to_string());
    }
}

/// Brute-force envelope discovery: one isolated decode attempt per start
/// offset, all appending to the same trace. A failed attempt logs a notice
/// and decrements the shared depth once; the drift this produces across
/// many failures is long-standing observed behavior and is left as is.
fn run_discovery(content: &[u8], version: u16, tracer: &mut Tracer) {
    for i in 0..content.len() {
        tracer.discovery_open(i);
        let mut reader = CompactBinaryReader::new(&content[i..], version);
        if walker::read_struct(&mut reader, tracer).is_err() {
            tracer.push_line(
                "Failed to process iteration due to wrong byte structure. \
                 This is likely not the start of the envelope.",
            );
            tracer.depth -= 1;
        }
        tracer.discovery_close(i);
    }
}

/// Decodes a buffer in a single pass and returns the rendered trace.
pub fn decode(bytes: &[u8], version: u16) -> String {
    let mut processor = BondProcessor::new(version);
    processor.process_bytes(Some(bytes), false, 0);
    processor.text
}

/// Runs a decode attempt at every byte offset and returns the combined
/// trace for visual inspection. No attempt is scored or selected.
pub fn decode_with_discovery(bytes: &[u8], version: u16) -> String {
    let mut processor = BondProcessor::new(version);
    processor.process_bytes(Some(bytes), true, 0);
    processor.text
}
