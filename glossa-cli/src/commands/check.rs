//! Check command implementation.
//!
//! Lexes and parses a ΓΛΩΣΣΑ source file without running it, reporting any
//! diagnostics. Useful for editors and CI that only want a syntax check.

use std::path::PathBuf;

use glossa_par::Parser;
use glossa_util::diagnostic::Handler;

use crate::commands::traits::{Command, CommandDescription};
use crate::diagnostics;
use crate::error::{CliError, Result};

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Path to the source file to check.
    pub path: PathBuf,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new CheckCommand.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Execute the command.
    pub fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.args.path).map_err(|e| {
            CliError::FileOperation(format!(
                "could not read {}: {e}",
                self.args.path.display()
            ))
        })?;

        let mut handler = Handler::new();
        let tokens = glossa_lex::Lexer::new(&source, &mut handler).tokenize();
        let program = Parser::new(tokens, &mut handler).parse_program();

        if handler.has_errors() || program.is_none() {
            diagnostics::report(&handler);
            return Err(CliError::Parse);
        }

        println!("{}: χωρίς σφάλματα", self.args.path.display());
        Ok(())
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Check a ΓΛΩΣΣΑ program for syntax errors without running it"
    }

    fn help() -> &'static str {
        "Lexes and parses the given source file and reports any diagnostics, \
         without executing the program."
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<()> {
    let command = CheckCommand::new(args);
    command.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_check_command_name() {
        assert_eq!(<CheckCommand as Command>::name(), "check");
    }

    #[test]
    fn test_missing_file_is_a_file_operation_error() {
        let args = CheckArgs {
            path: PathBuf::from("/nonexistent/program.γλωσσα"),
        };
        let command = CheckCommand::new(args);
        assert!(matches!(command.run(), Err(CliError::FileOperation(_))));
    }

    #[test]
    fn test_valid_program_passes() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_source(
            &temp_dir,
            "hello.γλωσσα",
            "ΠΡΟΓΡΑΜΜΑ χαιρετισμός\nΑΡΧΗ\nΓΡΑΨΕ 1\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
        );

        let args = CheckArgs { path };
        let command = CheckCommand::new(args);
        assert!(command.run().is_ok());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_source(&temp_dir, "bad.γλωσσα", "ΠΡΟΓΡΑΜΜΑ χωρίς_τέλος\nΑΡΧΗ\n");

        let args = CheckArgs { path };
        let command = CheckCommand::new(args);
        assert!(matches!(command.run(), Err(CliError::Parse)));
    }

    #[test]
    fn test_run_check_convenience_function() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_source(
            &temp_dir,
            "hello.γλωσσα",
            "ΠΡΟΓΡΑΜΜΑ χαιρετισμός\nΑΡΧΗ\nΓΡΑΨΕ 1\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
        );

        let args = CheckArgs { path };
        assert!(run_check(args).is_ok());
    }
}
