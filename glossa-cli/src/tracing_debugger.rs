//! A [`glossa_interp::Debugger`] that narrates execution through `tracing`
//! instead of interrupting it. Attached when `glossa run --trace` or the
//! `trace_debugger` config setting is on.

use glossa_env::BindingSnapshot;
use glossa_interp::Debugger;

/// Logs every statement the interpreter is about to run and the bindings
/// visible afterward, at `trace`/`debug` level. Never asks the interpreter
/// to stop.
#[derive(Debug, Default)]
pub struct TracingDebugger;

impl Debugger for TracingDebugger {
    fn before(&mut self, stmt_desc: &str, line: u32, _snapshot: &[BindingSnapshot]) {
        tracing::debug!(line, stmt = stmt_desc, "about to execute");
    }

    fn after(&mut self, stmt_desc: &str, line: u32, snapshot: &[BindingSnapshot]) {
        for binding in snapshot {
            tracing::trace!(
                line,
                stmt = stmt_desc,
                name = %binding.name,
                value = %binding.value.format(),
                "binding"
            );
        }
    }
}
