//! Run command implementation.
//!
//! Lexes, parses, and executes a ΓΛΩΣΣΑ source file against the terminal's
//! standard input and output.

use std::path::PathBuf;
use std::time::Instant;

use glossa_interp::NullDebugger;
use glossa_par::{Parser, Program};
use glossa_util::diagnostic::Handler;

use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::diagnostics;
use crate::error::{CliError, Result};
use crate::stdio::{StdinSource, StdoutSink};
use crate::tracing_debugger::TracingDebugger;

/// Arguments for the run command.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to the source file to run.
    pub path: PathBuf,
    /// Attach the tracing debugger regardless of configuration.
    pub trace: bool,
}

/// Run command handler.
pub struct RunCommand {
    args: RunArgs,
    config: Config,
}

impl RunCommand {
    /// Create a new RunCommand.
    pub fn new(args: RunArgs, config: Config) -> Self {
        Self { args, config }
    }

    /// Execute the command.
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();
        let source = self.read_source()?;
        let program = self.parse_program(&source)?;
        self.execute_program(&program)?;

        if self.config.verbose {
            tracing::info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "run complete");
        }
        Ok(())
    }

    fn read_source(&self) -> Result<String> {
        if self.args.path == PathBuf::from("-") {
            let mut source = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut source)
                .map_err(|e| CliError::FileOperation(format!("could not read stdin: {e}")))?;
            return Ok(source);
        }
        std::fs::read_to_string(&self.args.path).map_err(|e| {
            CliError::FileOperation(format!(
                "could not read {}: {e}",
                self.args.path.display()
            ))
        })
    }

    fn parse_program(&self, source: &str) -> Result<Program> {
        let mut handler = Handler::new();
        let tokens = glossa_lex::Lexer::new(source, &mut handler).tokenize();
        let program = Parser::new(tokens, &mut handler).parse_program();

        if handler.has_errors() {
            diagnostics::report(&handler);
            return Err(CliError::Parse);
        }

        program.ok_or(CliError::Parse)
    }

    fn execute_program(&self, program: &Program) -> Result<()> {
        let mut output = StdoutSink;
        let mut input = StdinSource;

        if self.args.trace || self.config.trace_debugger {
            let mut debugger = TracingDebugger;
            glossa_interp::run(program, &mut output, &mut input, &mut debugger)?;
        } else {
            let mut debugger = NullDebugger;
            glossa_interp::run(program, &mut output, &mut input, &mut debugger)?;
        }
        Ok(())
    }
}

impl Command for RunCommand {
    type Args = RunArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "run"
    }
}

impl CommandDescription for RunCommand {
    fn description() -> &'static str {
        "Run a ΓΛΩΣΣΑ program"
    }

    fn help() -> &'static str {
        "Lexes, parses, and executes a ΓΛΩΣΣΑ source file, reading ΔΙΑΒΑΣΕ \
         input from standard input and writing ΓΡΑΨΕ output to standard \
         output."
    }
}

/// Run the run command.
pub fn run_program(args: RunArgs, config: Config) -> Result<()> {
    let command = RunCommand::new(args, config);
    command.run()
}
