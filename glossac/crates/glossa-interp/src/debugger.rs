//! The debugger hook: an optional collaborator notified before and after
//! every statement, given read-only access to what is currently visible in
//! the environment. The interpreter makes exactly one call before and one
//! call after each statement and resumes when that call returns; any
//! stepping/blocking behavior is entirely up to the implementation.

use glossa_env::BindingSnapshot;

/// A one-line description of the statement about to run or that just ran,
/// together with its source line, handed to the hook alongside the
/// environment snapshot.
pub trait Debugger {
    fn before(&mut self, stmt_desc: &str, line: u32, snapshot: &[BindingSnapshot]);
    fn after(&mut self, stmt_desc: &str, line: u32, snapshot: &[BindingSnapshot]);

    /// Polled by the interpreter after every `before`/`after` call; once
    /// this returns `true` execution unwinds with `RuntimeError::StopRequested`.
    fn stop_requested(&self) -> bool {
        false
    }
}

/// The hook used when the host supplies none: both callbacks are no-ops and
/// a stop is never requested.
#[derive(Debug, Default)]
pub struct NullDebugger;

impl Debugger for NullDebugger {
    fn before(&mut self, _stmt_desc: &str, _line: u32, _snapshot: &[BindingSnapshot]) {}
    fn after(&mut self, _stmt_desc: &str, _line: u32, _snapshot: &[BindingSnapshot]) {}
}
