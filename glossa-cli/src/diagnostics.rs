//! Renders the [`glossa_util::diagnostic::Diagnostic`]s a `Handler` has
//! collected to the terminal. Lexing and parsing never panic on bad input;
//! they record diagnostics and let the caller decide how to show them.

use glossa_util::diagnostic::{Handler, Level};

/// Prints every diagnostic the handler collected, one per line, prefixed
/// with the source line and severity.
pub fn report(handler: &Handler) {
    for diagnostic in handler.diagnostics() {
        let prefix = match diagnostic.level {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        eprintln!(
            "[γραμμή {}] {}: {}",
            diagnostic.span.line, prefix, diagnostic.message
        );
        for note in &diagnostic.notes {
            eprintln!("  note: {note}");
        }
        for help in &diagnostic.helps {
            eprintln!("  help: {help}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_util::Span;

    #[test]
    fn report_does_not_panic_on_an_empty_handler() {
        let handler = Handler::new();
        report(&handler);
    }

    #[test]
    fn report_does_not_panic_with_diagnostics_present() {
        let handler = Handler::new();
        handler
            .build_error(Span::DUMMY, "unexpected token")
            .emit(&handler);
        assert!(handler.has_errors());
        report(&handler);
    }
}
