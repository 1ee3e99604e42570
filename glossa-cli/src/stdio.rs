//! Terminal IO: wires [`glossa_interp::OutputSink`] and
//! [`glossa_interp::InputSource`] to the process's standard streams.

use std::io::{self, BufRead, Write};

use glossa_interp::{InputSource, OutputSink};

/// Writes each `ΓΡΑΨΕ` line straight to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
    }
}

/// Reads each `ΔΙΑΒΑΣΕ` line from standard input, one line per request.
#[derive(Debug, Default)]
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Some(line)
    }
}
