//! Runtime error taxonomy for the interpreter, and the top-level error type
//! a host sees from [`crate::run`].

use glossa_util::Symbol;
use thiserror::Error;

/// Every error the interpreter itself can raise once parsing has already
/// succeeded. Each variant carries the source line of the statement or
/// expression that triggered it, and a Greek message via `thiserror`'s
/// `#[error]`, per the error-handling design this crate follows.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("[γραμμή {line}] άγνωστο αναγνωριστικό '{name}'")]
    UnknownIdentifier { name: Symbol, line: u32 },

    #[error("[γραμμή {line}] η μεταβλητή '{name}' έχει ήδη δηλωθεί")]
    DuplicateDeclaration { name: Symbol, line: u32 },

    #[error("[γραμμή {line}] ασύμβατοι τύποι κατά τη δήλωση ή την ανάθεση: {message}")]
    TypeMismatch { message: String, line: u32 },

    #[error(
        "[γραμμή {line}] λανθασμένος αριθμός ορισμάτων για '{name}': αναμένονταν {expected}, δόθηκαν {found}"
    )]
    ArityMismatch {
        name: Symbol,
        expected: usize,
        found: usize,
        line: u32,
    },

    #[error("[γραμμή {line}] άγνωστη διαδικασία ή συνάρτηση '{name}'")]
    UnknownCallable { name: Symbol, line: u32 },

    #[error("[γραμμή {line}] το '{name}' είναι συνάρτηση και δεν μπορεί να κληθεί ως διαδικασία με ΚΑΛΕΣΕ")]
    NotAProcedure { name: Symbol, line: u32 },

    #[error("[γραμμή {line}] το '{name}' είναι διαδικασία και δεν επιστρέφει τιμή")]
    NotAFunction { name: Symbol, line: u32 },

    #[error("[γραμμή {line}] η συνθήκη δεν είναι λογικού τύπου")]
    GuardNotBoolean { line: u32 },

    #[error("[γραμμή {line}] ασύμβατοι τύποι τελεσέων σε πράξη")]
    OperandTypeMismatch { line: u32 },

    #[error("[γραμμή {line}] η συνάρτηση '{name}' ολοκληρώθηκε χωρίς εντολή ΕΠΙΣΤΡΕΨΕ")]
    MissingReturn { name: Symbol, line: u32 },

    #[error("[γραμμή {line}] διαίρεση με το μηδέν")]
    DivisionByZero { line: u32 },

    #[error("[γραμμή {line}] σφάλμα πεδίου ορισμού")]
    DomainError { line: u32 },

    #[error("[γραμμή {line}] ο δείκτης είναι εκτός ορίων")]
    IndexOutOfRange { line: u32 },

    #[error("[γραμμή {line}] μη έγκυρο βήμα επανάληψης")]
    InvalidLoopStep { line: u32 },

    #[error("[γραμμή {line}] μη έγκυρη είσοδος για τον δηλωμένο τύπο")]
    InvalidInput { line: u32 },

    #[error("[γραμμή {line}] υπέρβαση μέγιστου βάθους αναδρομής κατά την κλήση '{name}'")]
    RecursionLimit { name: Symbol, line: u32 },

    #[error("η εκτέλεση σταμάτησε")]
    StopRequested,
}

impl RuntimeError {
    /// The source line this error occurred at, when one is meaningful
    /// (`StopRequested` has none — it originates outside program text).
    pub fn line(&self) -> Option<u32> {
        match self {
            RuntimeError::UnknownIdentifier { line, .. }
            | RuntimeError::DuplicateDeclaration { line, .. }
            | RuntimeError::TypeMismatch { line, .. }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::UnknownCallable { line, .. }
            | RuntimeError::NotAProcedure { line, .. }
            | RuntimeError::NotAFunction { line, .. }
            | RuntimeError::GuardNotBoolean { line }
            | RuntimeError::OperandTypeMismatch { line }
            | RuntimeError::MissingReturn { line, .. }
            | RuntimeError::DivisionByZero { line }
            | RuntimeError::DomainError { line }
            | RuntimeError::IndexOutOfRange { line }
            | RuntimeError::InvalidLoopStep { line }
            | RuntimeError::InvalidInput { line }
            | RuntimeError::RecursionLimit { line, .. } => Some(*line),
            RuntimeError::StopRequested => None,
        }
    }
}

pub type InterpResult<T> = std::result::Result<T, RuntimeError>;

/// The single error type a host sees out of the full pipeline: either the
/// program never made it past lexing/parsing (diagnostics were already
/// reported through the `Handler` the caller supplied), or it failed while
/// running.
#[derive(Debug, Error)]
pub enum GlossaError {
    #[error("το πρόγραμμα περιέχει σφάλματα ανάλυσης")]
    Parse,

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
