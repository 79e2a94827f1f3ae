//! Indented trace accumulation for decode events.
//!
//! A [`Tracer`] is created per decode call and owns both the output buffer
//! and the nesting depth, so concurrent decodes never share state. Depth
//! is signed: discovery mode decrements it once per failed attempt, on top
//! of whatever the failed walk left behind, and the counter may drift
//! negative across many failed iterations. Rendering clamps the tab count
//! at zero instead of treating the drift as an error.

const RULE: &str = "═════════════════════════";

/// Append-only trace buffer plus the nesting depth of the walk feeding it.
pub struct Tracer {
    out: String,
    pub depth: i32,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracer {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: -1,
        }
    }

    /// One tab per nesting level, clamped at zero when depth has drifted
    /// negative.
    pub fn indent(&self) -> String {
        "\t".repeat(self.depth.max(0) as usize)
    }

    /// Appends a line without indentation.
    pub fn push_line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Appends a line at the current nesting depth.
    pub fn indented(&mut self, text: &str) {
        let line = format!("{}{}", self.indent(), text);
        self.push_line(&line);
    }

    pub fn struct_open(&mut self) {
        self.indented(&format!("╔{RULE} STR {RULE}╗"));
    }

    pub fn struct_close(&mut self) {
        self.indented(&format!("╚{RULE} STR {RULE}╝"));
    }

    pub fn container_open(&mut self) {
        self.indented(&format!("╔{RULE} CON {RULE}╗"));
    }

    pub fn container_close(&mut self) {
        self.indented(&format!("╚{RULE} CON {RULE}╝"));
    }

    pub fn discovery_open(&mut self, iteration: usize) {
        self.push_line(&format!(
            "╔{RULE} INCREMENTAL DISCOVERY ITERATION {iteration} {RULE}╗"
        ));
    }

    pub fn discovery_close(&mut self, iteration: usize) {
        self.push_line(&format!(
            "╚{RULE} END INCREMENTAL DISCOVERY ITERATION {iteration} {RULE}╝"
        ));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
