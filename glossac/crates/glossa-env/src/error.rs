//! Error types for environment operations: declaration, lookup, assignment,
//! and indexed array access.

use glossa_util::Symbol;
use thiserror::Error;

/// Errors raised while declaring, resolving, or mutating bindings in an
/// [`crate::Environment`]. These carry no source line; the caller (the
/// interpreter) attaches line information when surfacing them to the host.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvError {
    #[error("άγνωστο αναγνωριστικό '{0}'")]
    UnknownIdentifier(Symbol),

    #[error("η μεταβλητή '{0}' έχει ήδη δηλωθεί")]
    DuplicateDeclaration(Symbol),

    #[error("ασυμβατοι τύποι: δεν μπορεί να αποθηκευτεί τιμή τύπου {found} σε θέση τύπου {expected}")]
    TypeMismatch { expected: String, found: String },

    #[error("η μεταβλητή '{0}' δεν είναι πίνακας")]
    NotAnArray(Symbol),

    #[error("η μεταβλητή '{0}' είναι πίνακας και απαιτεί δείκτη")]
    IsAnArray(Symbol),

    #[error("λανθασμένος αριθμός διαστάσεων για τον πίνακα '{0}'")]
    WrongDimensionality(Symbol),

    #[error("ο δείκτης {index} είναι εκτός ορίων [1, {upper}] για τον πίνακα '{name}'")]
    IndexOutOfRange { name: Symbol, index: i64, upper: u64 },
}

pub type EnvResult<T> = std::result::Result<T, EnvError>;
