//! The eight built-in numeric callables. Built-in names shadow user
//! procedures/functions of the same name, so the interpreter always tries
//! [`call`] before looking up a user subprogram.

use crate::error::{InterpResult, RuntimeError};
use glossa_env::Value;

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Real(r) => Some(*r),
        _ => None,
    }
}

fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Dispatches a built-in call by name. Returns `None` when `name` is not a
/// built-in, so the caller falls through to user-subprogram lookup.
pub fn call(name: &str, args: &[Value], line: u32) -> Option<InterpResult<Value>> {
    if args.len() != 1 {
        return if is_builtin_name(name) {
            Some(Err(RuntimeError::ArityMismatch {
                name: glossa_util::Symbol::intern(name),
                expected: 1,
                found: args.len(),
                line,
            }))
        } else {
            None
        };
    }

    let arg = &args[0];
    let x = match as_f64(arg) {
        Some(x) => x,
        None if is_builtin_name(name) => {
            return Some(Err(RuntimeError::OperandTypeMismatch { line }))
        }
        None => return None,
    };

    let result = match name {
        "Α_Μ" => Ok(Value::Integer(x.trunc() as i64)),
        "Α_Τ" => Ok(match arg {
            Value::Integer(n) => Value::Integer(n.abs()),
            _ => Value::Real(x.abs()),
        }),
        "Ε" => Ok(Value::Real(x.exp())),
        "ΕΦ" => Ok(Value::Real(degrees_to_radians(x).tan())),
        "ΗΜ" => Ok(Value::Real(degrees_to_radians(x).sin())),
        "ΣΥΝ" => Ok(Value::Real(degrees_to_radians(x).cos())),
        "ΛΟΓ" => {
            if x <= 0.0 {
                Err(RuntimeError::DomainError { line })
            } else {
                Ok(Value::Real(x.ln()))
            }
        }
        "Τ_Ρ" => {
            if x < 0.0 {
                Err(RuntimeError::DomainError { line })
            } else {
                Ok(Value::Real(x.sqrt()))
            }
        }
        _ => return None,
    };
    Some(result)
}

fn is_builtin_name(name: &str) -> bool {
    matches!(
        name,
        "Α_Μ" | "Α_Τ" | "Ε" | "ΕΦ" | "ΗΜ" | "ΣΥΝ" | "ΛΟΓ" | "Τ_Ρ"
    )
}
