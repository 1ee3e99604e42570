//! The IO contract the core interpreter consumes: an output sink for
//! `ΓΡΑΨΕ` and an input source for `ΔΙΑΒΑΣΕ`. Neither capability knows
//! anything about files, terminals, or sockets — the host wires those up.

/// Appends one line of text to the user-visible output.
pub trait OutputSink {
    fn write_line(&mut self, text: &str);
}

/// Returns the next input line, or `None` once the source is exhausted.
pub trait InputSource {
    fn read_line(&mut self) -> Option<String>;
}

/// An in-memory output sink used by tests and embedding hosts that want to
/// inspect everything a program printed.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for BufferedOutput {
    fn write_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// An input source that replays a fixed, pre-recorded sequence of lines.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = String>>(lines: I) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}
