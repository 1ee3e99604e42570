//! glossa-env - Typed value storage and two-level lexical scoping for
//! ΓΛΩΣΣΑ.
//!
//! ============================================================================
//! SCOPING MODEL
//! ============================================================================
//!
//! Subprograms in ΓΛΩΣΣΑ are never nested, so an [`Environment`] needs at
//! most two frames: the global frame (constants and variables declared at
//! program level) and, while a procedure or function is executing, one call
//! frame for its parameters and locals. This is deliberately not a general
//! parent-chain of scopes — a call frame shadows the global frame entirely
//! rather than falling back to it, matching how the pedagogical language
//! defines visibility: a subprogram sees only its own parameters and
//! locally declared variables, plus the global constants.
//!
//! Constants are folded into the global frame at construction time and are
//! immutable afterwards; nothing in this crate currently enforces that at
//! the type level, so callers must not route constant names through
//! [`Environment::assign`].

pub mod error;

pub use error::{EnvError, EnvResult};
pub use glossa_par::{ArrayShape, TypeTag};

use glossa_util::Symbol;
use indexmap::IndexMap;

/// A runtime value. `Character` holds a `String` rather than a single
/// character: in this curriculum CHARACTER is the textual type, matching
/// how ΓΛΩΣΣΑ source treats quoted literals.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Character(String),
    Boolean(bool),
    Array1(Vec<Value>),
    Array2(Vec<Vec<Value>>),
}

impl Value {
    pub fn default_for(ty: TypeTag) -> Value {
        match ty {
            TypeTag::Integer => Value::Integer(0),
            TypeTag::Real => Value::Real(0.0),
            TypeTag::Character => Value::Character(String::new()),
            TypeTag::Boolean => Value::Boolean(false),
        }
    }

    fn array1_default(ty: TypeTag, len: u64) -> Value {
        Value::Array1(vec![Value::default_for(ty); len as usize])
    }

    fn array2_default(ty: TypeTag, rows: u64, cols: u64) -> Value {
        Value::Array2(vec![
            vec![Value::default_for(ty); cols as usize];
            rows as usize
        ])
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "ΑΚΕΡΑΙΗ",
            Value::Real(_) => "ΠΡΑΓΜΑΤΙΚΗ",
            Value::Character(_) => "ΧΑΡΑΚΤΗΡΩΝ",
            Value::Boolean(_) => "ΛΟΓΙΚΗ",
            Value::Array1(_) | Value::Array2(_) => "ΠΙΝΑΚΑΣ",
        }
    }

    /// Formats the value per the output rules of `ΓΡΑΨΕ`: integers plain,
    /// reals with a guaranteed fractional digit, booleans as the Greek
    /// keywords, characters verbatim, arrays bracketed and comma-joined.
    pub fn format(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Real(r) => format_real(*r),
            Value::Character(s) => s.clone(),
            Value::Boolean(b) => if *b { "ΑΛΗΘΗΣ" } else { "ΨΕΥΔΗΣ" }.to_string(),
            Value::Array1(items) => {
                let parts: Vec<String> = items.iter().map(Value::format).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Array2(rows) => {
                let parts: Vec<String> = rows
                    .iter()
                    .map(|row| {
                        let inner: Vec<String> = row.iter().map(Value::format).collect();
                        format!("[{}]", inner.join(", "))
                    })
                    .collect();
                format!("[{}]", parts.join(","))
            }
        }
    }
}

/// Renders a real number with Rust's shortest round-trip representation,
/// forcing a trailing `.0` when the default formatting produced neither a
/// decimal point nor an exponent (e.g. `3.0`, not `3`).
fn format_real(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') || text.contains('e') || text.contains('E') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Coerces `value` to `target`, per the coercion table: INTEGER accepts
/// INTEGER and BOOLEAN (widened to 1/0); REAL accepts REAL, INTEGER, and
/// BOOLEAN (all widened); BOOLEAN and CHARACTER accept only their own kind.
pub fn coerce(value: Value, target: TypeTag) -> EnvResult<Value> {
    match (value, target) {
        (v @ Value::Integer(_), TypeTag::Integer) => Ok(v),
        (Value::Boolean(b), TypeTag::Integer) => Ok(Value::Integer(if b { 1 } else { 0 })),
        (v @ Value::Real(_), TypeTag::Real) => Ok(v),
        (Value::Integer(n), TypeTag::Real) => Ok(Value::Real(n as f64)),
        (Value::Boolean(b), TypeTag::Real) => Ok(Value::Real(if b { 1.0 } else { 0.0 })),
        (v @ Value::Boolean(_), TypeTag::Boolean) => Ok(v),
        (v @ Value::Character(_), TypeTag::Character) => Ok(v),
        (other, target) => Err(EnvError::TypeMismatch {
            expected: format!("{target:?}"),
            found: other.type_name().to_string(),
        }),
    }
}

/// Coerces an argument value against a parameter's declared type and,
/// for array parameters, shape — used at call binding, where the whole
/// array is passed by value. Scalars delegate to [`coerce`]; arrays must
/// already carry a matching shape, with every element coerced in turn so
/// the callee's copy is independent of the caller's.
pub fn coerce_param(
    value: Value,
    ty: TypeTag,
    shape: Option<ArrayShape>,
    name: Symbol,
) -> EnvResult<Value> {
    match shape {
        None => coerce(value, ty),
        Some(ArrayShape::OneD(expected)) => match value {
            Value::Array1(items) if items.len() as u64 == expected => {
                let coerced = items
                    .into_iter()
                    .map(|item| coerce(item, ty))
                    .collect::<EnvResult<Vec<_>>>()?;
                Ok(Value::Array1(coerced))
            }
            _ => Err(EnvError::WrongDimensionality(name)),
        },
        Some(ArrayShape::TwoD(expected_rows, expected_cols)) => match value {
            Value::Array2(rows) if rows.len() as u64 == expected_rows => {
                let coerced = rows
                    .into_iter()
                    .map(|row| {
                        if row.len() as u64 != expected_cols {
                            return Err(EnvError::WrongDimensionality(name));
                        }
                        row.into_iter()
                            .map(|item| coerce(item, ty))
                            .collect::<EnvResult<Vec<_>>>()
                    })
                    .collect::<EnvResult<Vec<_>>>()?;
                Ok(Value::Array2(coerced))
            }
            _ => Err(EnvError::WrongDimensionality(name)),
        },
    }
}

/// One declared binding: its static type, optional array shape, and
/// current value.
#[derive(Clone, Debug)]
pub struct Slot {
    pub ty: TypeTag,
    pub shape: Option<ArrayShape>,
    pub value: Value,
}

impl Slot {
    fn scalar(ty: TypeTag) -> Self {
        Slot {
            ty,
            shape: None,
            value: Value::default_for(ty),
        }
    }

    fn array(ty: TypeTag, shape: ArrayShape) -> Self {
        let value = match shape {
            ArrayShape::OneD(n) => Value::array1_default(ty, n),
            ArrayShape::TwoD(rows, cols) => Value::array2_default(ty, rows, cols),
        };
        Slot {
            ty,
            shape: Some(shape),
            value,
        }
    }
}

/// The scope tag reported in a debugger environment snapshot: whether a
/// visible binding lives in the active call frame or the global frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeTag {
    Local,
    Outer,
}

/// A read-only view of one visible binding, handed to the debugger hook.
#[derive(Clone, Debug)]
pub struct BindingSnapshot {
    pub name: Symbol,
    pub ty: TypeTag,
    pub value: Value,
    pub scope: ScopeTag,
}

type Frame = IndexMap<Symbol, Slot>;

/// Storage for one executing program: a global frame plus a stack of call
/// frames, one pushed per subprogram call still in progress. Subprograms
/// are never nested in source, but recursion nests calls at runtime, so the
/// call side is a stack even though lookup only ever consults its top.
pub struct Environment {
    global: Frame,
    call: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            global: IndexMap::new(),
            call: Vec::new(),
        }
    }

    fn frame_mut(&mut self) -> &mut Frame {
        self.call.last_mut().unwrap_or(&mut self.global)
    }

    /// Declares `name` with scalar type `ty` in the active frame.
    pub fn declare(&mut self, name: Symbol, ty: TypeTag) -> EnvResult<()> {
        if self.frame_mut().contains_key(&name) {
            return Err(EnvError::DuplicateDeclaration(name));
        }
        self.frame_mut().insert(name, Slot::scalar(ty));
        Ok(())
    }

    /// Declares `name` as an array of element type `ty` and `shape`.
    pub fn declare_array(&mut self, name: Symbol, ty: TypeTag, shape: ArrayShape) -> EnvResult<()> {
        if self.frame_mut().contains_key(&name) {
            return Err(EnvError::DuplicateDeclaration(name));
        }
        self.frame_mut().insert(name, Slot::array(ty, shape));
        Ok(())
    }

    /// Declares `name` as a scalar constant, inferring its type from
    /// `value` itself rather than from a separate type annotation — used
    /// for `ΣΤΑΘΕΡΕΣ` declarations, whose surface syntax gives only a
    /// value expression.
    pub fn declare_constant(&mut self, name: Symbol, value: Value) -> EnvResult<()> {
        if self.frame_mut().contains_key(&name) {
            return Err(EnvError::DuplicateDeclaration(name));
        }
        let ty = match &value {
            Value::Integer(_) => TypeTag::Integer,
            Value::Real(_) => TypeTag::Real,
            Value::Character(_) => TypeTag::Character,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Array1(_) | Value::Array2(_) => {
                return Err(EnvError::TypeMismatch {
                    expected: "βαθμωτή τιμή".to_string(),
                    found: "ΠΙΝΑΚΑΣ".to_string(),
                })
            }
        };
        self.frame_mut().insert(name, Slot { ty, shape: None, value });
        Ok(())
    }

    /// Pushes a fresh, empty call frame, shadowing the global frame (and any
    /// outer call frame) until the matching [`Environment::exit_call`]. Each
    /// nested or recursive call pushes its own frame, so an inner call
    /// unwinding never disturbs an outer call still on the stack.
    pub fn enter_call(&mut self) {
        self.call.push(IndexMap::new());
    }

    pub fn exit_call(&mut self) {
        self.call.pop();
    }

    /// Declares `name` as a parameter binding already coerced to `ty`/
    /// `shape`, storing `value` directly. Unlike [`Environment::assign`],
    /// this accepts array values — parameter binding legitimately replaces
    /// a whole array's contents in one step, since the caller's argument
    /// was already copied by [`coerce_param`].
    pub fn bind_param(
        &mut self,
        name: Symbol,
        ty: TypeTag,
        shape: Option<ArrayShape>,
        value: Value,
    ) -> EnvResult<()> {
        match shape {
            None => self.declare(name, ty)?,
            Some(shape) => self.declare_array(name, ty, shape)?,
        }
        self.frame_mut().get_mut(&name).expect("just declared").value = value;
        Ok(())
    }

    pub fn lookup(&self, name: Symbol) -> EnvResult<&Slot> {
        if let Some(frame) = self.call.last() {
            if let Some(slot) = frame.get(&name) {
                return Ok(slot);
            }
        }
        self.global
            .get(&name)
            .ok_or(EnvError::UnknownIdentifier(name))
    }

    fn lookup_mut(&mut self, name: Symbol) -> EnvResult<&mut Slot> {
        if let Some(frame) = self.call.last_mut() {
            if frame.contains_key(&name) {
                return Ok(frame.get_mut(&name).unwrap());
            }
        }
        self.global
            .get_mut(&name)
            .ok_or(EnvError::UnknownIdentifier(name))
    }

    /// Coerce-and-store `value` into the scalar binding `name`.
    pub fn assign(&mut self, name: Symbol, value: Value) -> EnvResult<()> {
        let slot = self.lookup(name)?;
        if slot.shape.is_some() {
            return Err(EnvError::IsAnArray(name));
        }
        let ty = slot.ty;
        let coerced = coerce(value, ty)?;
        self.lookup_mut(name)?.value = coerced;
        Ok(())
    }

    /// Coerce-and-store `value` into cell `index` (1-based) of a 1-D array.
    pub fn assign_index1(&mut self, name: Symbol, index: i64, value: Value) -> EnvResult<()> {
        let slot = self.lookup(name)?;
        let ty = slot.ty;
        let upper = match slot.shape {
            Some(ArrayShape::OneD(n)) => n,
            Some(ArrayShape::TwoD(..)) => return Err(EnvError::WrongDimensionality(name)),
            None => return Err(EnvError::NotAnArray(name)),
        };
        let offset = bounds_check(name, index, upper)?;
        let coerced = coerce(value, ty)?;
        let slot = self.lookup_mut(name)?;
        match &mut slot.value {
            Value::Array1(cells) => cells[offset] = coerced,
            _ => unreachable!("shape guarantees Array1 representation"),
        }
        Ok(())
    }

    /// Coerce-and-store `value` into cell `(row, col)` (1-based) of a 2-D
    /// array.
    pub fn assign_index2(
        &mut self,
        name: Symbol,
        row: i64,
        col: i64,
        value: Value,
    ) -> EnvResult<()> {
        let slot = self.lookup(name)?;
        let ty = slot.ty;
        let (rows, cols) = match slot.shape {
            Some(ArrayShape::TwoD(rows, cols)) => (rows, cols),
            Some(ArrayShape::OneD(_)) => return Err(EnvError::WrongDimensionality(name)),
            None => return Err(EnvError::NotAnArray(name)),
        };
        let row_off = bounds_check(name, row, rows)?;
        let col_off = bounds_check(name, col, cols)?;
        let coerced = coerce(value, ty)?;
        let slot = self.lookup_mut(name)?;
        match &mut slot.value {
            Value::Array2(grid) => grid[row_off][col_off] = coerced,
            _ => unreachable!("shape guarantees Array2 representation"),
        }
        Ok(())
    }

    pub fn read_index1(&self, name: Symbol, index: i64) -> EnvResult<Value> {
        let slot = self.lookup(name)?;
        let upper = match slot.shape {
            Some(ArrayShape::OneD(n)) => n,
            Some(ArrayShape::TwoD(..)) => return Err(EnvError::WrongDimensionality(name)),
            None => return Err(EnvError::NotAnArray(name)),
        };
        let offset = bounds_check(name, index, upper)?;
        match &slot.value {
            Value::Array1(cells) => Ok(cells[offset].clone()),
            _ => unreachable!("shape guarantees Array1 representation"),
        }
    }

    pub fn read_index2(&self, name: Symbol, row: i64, col: i64) -> EnvResult<Value> {
        let slot = self.lookup(name)?;
        let (rows, cols) = match slot.shape {
            Some(ArrayShape::TwoD(rows, cols)) => (rows, cols),
            Some(ArrayShape::OneD(_)) => return Err(EnvError::WrongDimensionality(name)),
            None => return Err(EnvError::NotAnArray(name)),
        };
        let row_off = bounds_check(name, row, rows)?;
        let col_off = bounds_check(name, col, cols)?;
        match &slot.value {
            Value::Array2(grid) => Ok(grid[row_off][col_off].clone()),
            _ => unreachable!("shape guarantees Array2 representation"),
        }
    }

    /// A read-only snapshot of every binding visible right now, for the
    /// debugger hook. Bindings from the top call frame (if any) are listed
    /// before global ones and tagged `Local`; global bindings are tagged
    /// `Outer` whenever a call frame is active, `Local` otherwise (there is
    /// nothing further out). Frames further down the call stack, belonging
    /// to callers still suspended higher up, are not visible here — they
    /// are not visible to the running subprogram either.
    pub fn snapshot(&self) -> Vec<BindingSnapshot> {
        let mut out = Vec::new();
        if let Some(call) = self.call.last() {
            for (name, slot) in call {
                out.push(BindingSnapshot {
                    name: *name,
                    ty: slot.ty,
                    value: slot.value.clone(),
                    scope: ScopeTag::Local,
                });
            }
            for (name, slot) in &self.global {
                out.push(BindingSnapshot {
                    name: *name,
                    ty: slot.ty,
                    value: slot.value.clone(),
                    scope: ScopeTag::Outer,
                });
            }
        } else {
            for (name, slot) in &self.global {
                out.push(BindingSnapshot {
                    name: *name,
                    ty: slot.ty,
                    value: slot.value.clone(),
                    scope: ScopeTag::Local,
                });
            }
        }
        out
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

fn bounds_check(name: Symbol, index: i64, upper: u64) -> EnvResult<usize> {
    if index < 1 || index as u64 > upper {
        return Err(EnvError::IndexOutOfRange { name, index, upper });
    }
    Ok((index - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    #[test]
    fn declare_and_assign_scalar() {
        let mut env = Environment::new();
        env.declare(sym("x"), TypeTag::Integer).unwrap();
        env.assign(sym("x"), Value::Integer(42)).unwrap();
        assert_eq!(env.lookup(sym("x")).unwrap().value, Value::Integer(42));
    }

    #[test]
    fn boolean_widens_into_integer_and_real() {
        let mut env = Environment::new();
        env.declare(sym("i"), TypeTag::Integer).unwrap();
        env.declare(sym("r"), TypeTag::Real).unwrap();
        env.assign(sym("i"), Value::Boolean(true)).unwrap();
        env.assign(sym("r"), Value::Boolean(false)).unwrap();
        assert_eq!(env.lookup(sym("i")).unwrap().value, Value::Integer(1));
        assert_eq!(env.lookup(sym("r")).unwrap().value, Value::Real(0.0));
    }

    #[test]
    fn character_rejects_non_character() {
        let mut env = Environment::new();
        env.declare(sym("c"), TypeTag::Character).unwrap();
        let err = env.assign(sym("c"), Value::Integer(1)).unwrap_err();
        assert!(matches!(err, EnvError::TypeMismatch { .. }));
    }

    #[test]
    fn duplicate_declaration_is_rejected() {
        let mut env = Environment::new();
        env.declare(sym("x"), TypeTag::Integer).unwrap();
        let err = env.declare(sym("x"), TypeTag::Integer).unwrap_err();
        assert!(matches!(err, EnvError::DuplicateDeclaration(_)));
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let env = Environment::new();
        let err = env.lookup(sym("ghost")).unwrap_err();
        assert!(matches!(err, EnvError::UnknownIdentifier(_)));
    }

    #[test]
    fn array1_bounds_at_edges_succeed_and_outside_fails() {
        let mut env = Environment::new();
        env.declare_array(sym("a"), TypeTag::Integer, ArrayShape::OneD(5))
            .unwrap();
        env.assign_index1(sym("a"), 1, Value::Integer(10)).unwrap();
        env.assign_index1(sym("a"), 5, Value::Integer(50)).unwrap();
        assert_eq!(env.read_index1(sym("a"), 1).unwrap(), Value::Integer(10));
        assert_eq!(env.read_index1(sym("a"), 5).unwrap(), Value::Integer(50));
        assert!(matches!(
            env.read_index1(sym("a"), 0),
            Err(EnvError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            env.read_index1(sym("a"), 6),
            Err(EnvError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn array2_write_then_read_round_trips() {
        let mut env = Environment::new();
        env.declare_array(sym("m"), TypeTag::Real, ArrayShape::TwoD(2, 3))
            .unwrap();
        env.assign_index2(sym("m"), 2, 3, Value::Integer(7)).unwrap();
        assert_eq!(env.read_index2(sym("m"), 2, 3).unwrap(), Value::Real(7.0));
    }

    #[test]
    fn call_frame_shadows_global_and_is_discarded_on_exit() {
        let mut env = Environment::new();
        env.declare(sym("x"), TypeTag::Integer).unwrap();
        env.assign(sym("x"), Value::Integer(1)).unwrap();

        env.enter_call();
        env.declare(sym("x"), TypeTag::Integer).unwrap();
        env.assign(sym("x"), Value::Integer(99)).unwrap();
        assert_eq!(env.lookup(sym("x")).unwrap().value, Value::Integer(99));
        env.exit_call();

        assert_eq!(env.lookup(sym("x")).unwrap().value, Value::Integer(1));
    }

    #[test]
    fn nested_call_frames_do_not_clobber_each_other() {
        let mut env = Environment::new();

        env.enter_call();
        env.declare(sym("ν"), TypeTag::Integer).unwrap();
        env.assign(sym("ν"), Value::Integer(10)).unwrap();

        env.enter_call();
        env.declare(sym("ν"), TypeTag::Integer).unwrap();
        env.assign(sym("ν"), Value::Integer(20)).unwrap();
        assert_eq!(env.lookup(sym("ν")).unwrap().value, Value::Integer(20));
        env.exit_call();

        assert_eq!(env.lookup(sym("ν")).unwrap().value, Value::Integer(10));
        env.exit_call();
    }

    #[test]
    fn bind_param_stores_array_argument_by_copy() {
        let mut env = Environment::new();
        let arg = Value::Array1(vec![Value::Integer(1), Value::Integer(2)]);
        env.enter_call();
        env.bind_param(sym("a"), TypeTag::Integer, Some(ArrayShape::OneD(2)), arg.clone())
            .unwrap();
        env.assign_index1(sym("a"), 1, Value::Integer(99)).unwrap();
        assert_eq!(env.read_index1(sym("a"), 1).unwrap(), Value::Integer(99));
        assert_eq!(arg, Value::Array1(vec![Value::Integer(1), Value::Integer(2)]));
    }

    #[test]
    fn coerce_param_rejects_mismatched_array_length() {
        let arg = Value::Array1(vec![Value::Integer(1), Value::Integer(2)]);
        let err = coerce_param(arg, TypeTag::Integer, Some(ArrayShape::OneD(3)), sym("a"))
            .unwrap_err();
        assert!(matches!(err, EnvError::WrongDimensionality(_)));
    }

    #[test]
    fn array_default_values_match_element_type() {
        let mut env = Environment::new();
        env.declare_array(sym("flags"), TypeTag::Boolean, ArrayShape::OneD(3))
            .unwrap();
        assert_eq!(
            env.read_index1(sym("flags"), 2).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn real_formatting_forces_trailing_fractional_digit() {
        assert_eq!(Value::Real(3.0).format(), "3.0");
        assert_eq!(Value::Real(3.5).format(), "3.5");
    }

    #[test]
    fn array_formatting_matches_bracketed_rule() {
        let value = Value::Array1(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(value.format(), "[1, 2]");
        let grid = Value::Array2(vec![
            vec![Value::Integer(1), Value::Integer(2)],
            vec![Value::Integer(3), Value::Integer(4)],
        ]);
        assert_eq!(grid.format(), "[[1, 2],[3, 4]]");
    }
}
