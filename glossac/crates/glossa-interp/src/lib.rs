//! glossa-interp - the tree-walking interpreter for ΓΛΩΣΣΑ.
//!
//! A [`Program`] is executed directly against its AST: no bytecode, no
//! separate resolution pass. Scoping, coercion, and storage all live in
//! [`glossa_env::Environment`]; this crate is responsible for statement and
//! expression evaluation, the non-local control-flow signal a function's
//! `ΕΠΙΣΤΡΕΨΕ` raises, and the seams a host plugs into: [`OutputSink`],
//! [`InputSource`], and [`Debugger`].
//!
//! Execution never recovers from an error: any [`RuntimeError`] unwinds all
//! the way out of [`run`] via `?`. The only thing caught locally is a
//! function's own return value, modelled as [`ExecOutcome::Return`] rather
//! than as an actual unwind, since it only ever needs to escape as far as
//! the matching call site.

pub mod builtins;
pub mod debugger;
pub mod error;
pub mod io;

pub use debugger::{Debugger, NullDebugger};
pub use error::{GlossaError, InterpResult, RuntimeError};
pub use io::{BufferedOutput, InputSource, OutputSink, ScriptedInput};

use std::cmp::Ordering;
use std::collections::HashMap;

use glossa_env::{coerce, coerce_param, EnvError, Environment, Value};
use glossa_par::{
    ArrayShape, BinOp, CaseValue, Expr, Program, SelectArm, Stmt, SubKind, Subprogram, Target,
    TypeTag, UnOp,
};
use glossa_util::Symbol;

/// Subprogram calls nested this deep are refused with [`RuntimeError::RecursionLimit`]
/// rather than left to overflow the native Rust stack.
const MAX_CALL_DEPTH: usize = 256;

/// What a statement (or a run of statements) produced: either it ran to
/// completion, or a `ΕΠΙΣΤΡΕΨΕ` fired and the enclosing subprogram call
/// should unwind to its caller with this value.
#[derive(Debug)]
enum ExecOutcome {
    Normal,
    Return(Value),
}

fn env_err(err: EnvError, line: u32) -> RuntimeError {
    match err {
        EnvError::UnknownIdentifier(name) => RuntimeError::UnknownIdentifier { name, line },
        EnvError::DuplicateDeclaration(name) => RuntimeError::DuplicateDeclaration { name, line },
        EnvError::TypeMismatch { expected, found } => RuntimeError::TypeMismatch {
            message: format!("αναμενόταν {expected}, βρέθηκε {found}"),
            line,
        },
        EnvError::NotAnArray(name) => RuntimeError::TypeMismatch {
            message: format!("το '{name}' δεν είναι πίνακας"),
            line,
        },
        EnvError::IsAnArray(name) => RuntimeError::TypeMismatch {
            message: format!("το '{name}' είναι πίνακας και απαιτεί δείκτη"),
            line,
        },
        EnvError::WrongDimensionality(name) => RuntimeError::TypeMismatch {
            message: format!("λανθασμένος αριθμός διαστάσεων για το '{name}'"),
            line,
        },
        EnvError::IndexOutOfRange { .. } => RuntimeError::IndexOutOfRange { line },
    }
}

fn stmt_line(stmt: &Stmt) -> u32 {
    match stmt {
        Stmt::Assign { line, .. }
        | Stmt::If { line, .. }
        | Stmt::While { line, .. }
        | Stmt::RepeatUntil { line, .. }
        | Stmt::For { line, .. }
        | Stmt::Select { line, .. }
        | Stmt::Call { line, .. }
        | Stmt::Read { line, .. }
        | Stmt::Write { line, .. }
        | Stmt::Return { line, .. } => *line,
    }
}

fn stmt_desc(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Assign { .. } => "ΑΝΑΘΕΣΗ",
        Stmt::If { .. } => "ΑΝ",
        Stmt::While { .. } => "ΟΣΟ",
        Stmt::RepeatUntil { .. } => "ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ",
        Stmt::For { .. } => "ΓΙΑ",
        Stmt::Select { .. } => "ΕΠΙΛΕΞΕ",
        Stmt::Call { .. } => "ΚΑΛΕΣΕ",
        Stmt::Read { .. } => "ΔΙΑΒΑΣΕ",
        Stmt::Write { .. } => "ΓΡΑΨΕ",
        Stmt::Return { .. } => "ΕΠΙΣΤΡΕΨΕ",
    }
}

fn as_integer(value: &Value, line: u32) -> InterpResult<i64> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1 } else { 0 }),
        _ => Err(RuntimeError::OperandTypeMismatch { line }),
    }
}

fn as_f64(value: &Value, line: u32) -> InterpResult<f64> {
    match value {
        Value::Integer(n) => Ok(*n as f64),
        Value::Real(r) => Ok(*r),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        _ => Err(RuntimeError::OperandTypeMismatch { line }),
    }
}

fn as_bool(value: &Value, line: u32) -> InterpResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        _ => Err(RuntimeError::GuardNotBoolean { line }),
    }
}

/// Runs `program` to completion against the supplied IO and debugger
/// collaborators. Returns the first [`RuntimeError`] encountered, if any;
/// lexical and syntactic failures are never seen here, since a caller only
/// reaches [`run`] once parsing has already succeeded.
pub fn run(
    program: &Program,
    output: &mut dyn OutputSink,
    input: &mut dyn InputSource,
    debugger: &mut dyn Debugger,
) -> Result<(), RuntimeError> {
    let mut subprograms = HashMap::new();
    for sub in &program.subprograms {
        subprograms.insert(sub.name, sub);
    }

    let mut interp = Interpreter {
        subprograms,
        env: Environment::new(),
        output,
        input,
        debugger,
        depth: 0,
    };
    interp.init_globals(program)?;
    interp.exec_stmts(&program.body)?;
    Ok(())
}

struct Interpreter<'p, 'io> {
    subprograms: HashMap<Symbol, &'p Subprogram>,
    env: Environment,
    output: &'io mut dyn OutputSink,
    input: &'io mut dyn InputSource,
    debugger: &'io mut dyn Debugger,
    /// Number of subprogram calls currently on the stack.
    depth: usize,
}

impl<'p, 'io> Interpreter<'p, 'io> {
    fn init_globals(&mut self, program: &Program) -> InterpResult<()> {
        for constant in &program.constants {
            let value = self.eval_expr(&constant.value, 0)?;
            self.env
                .declare_constant(constant.name, value)
                .map_err(|e| env_err(e, 0))?;
        }
        for decl in &program.variables {
            match decl.shape {
                None => self.env.declare(decl.name, decl.ty),
                Some(shape) => self.env.declare_array(decl.name, decl.ty, shape),
            }
            .map_err(|e| env_err(e, 0))?;
        }
        Ok(())
    }

    fn exec_stmts(&mut self, stmts: &[Stmt]) -> InterpResult<ExecOutcome> {
        for stmt in stmts {
            if let ExecOutcome::Return(value) = self.exec_stmt(stmt)? {
                return Ok(ExecOutcome::Return(value));
            }
        }
        Ok(ExecOutcome::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> InterpResult<ExecOutcome> {
        let line = stmt_line(stmt);
        let desc = stmt_desc(stmt);

        self.debugger.before(desc, line, &self.env.snapshot());
        if self.debugger.stop_requested() {
            return Err(RuntimeError::StopRequested);
        }

        let outcome = self.exec_stmt_inner(stmt, line)?;

        self.debugger.after(desc, line, &self.env.snapshot());
        if self.debugger.stop_requested() {
            return Err(RuntimeError::StopRequested);
        }

        Ok(outcome)
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt, line: u32) -> InterpResult<ExecOutcome> {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                let value = self.eval_expr(value, line)?;
                self.assign_target(target, value, line)?;
                Ok(ExecOutcome::Normal)
            }
            Stmt::If {
                arms, else_body, ..
            } => {
                for (cond, body) in arms {
                    if as_bool(&self.eval_expr(cond, line)?, line)? {
                        return self.exec_stmts(body);
                    }
                }
                match else_body {
                    Some(body) => self.exec_stmts(body),
                    None => Ok(ExecOutcome::Normal),
                }
            }
            Stmt::While { cond, body, .. } => {
                while as_bool(&self.eval_expr(cond, line)?, line)? {
                    if let ExecOutcome::Return(v) = self.exec_stmts(body)? {
                        return Ok(ExecOutcome::Return(v));
                    }
                }
                Ok(ExecOutcome::Normal)
            }
            Stmt::RepeatUntil { body, cond, .. } => loop {
                if let ExecOutcome::Return(v) = self.exec_stmts(body)? {
                    return Ok(ExecOutcome::Return(v));
                }
                if as_bool(&self.eval_expr(cond, line)?, line)? {
                    return Ok(ExecOutcome::Normal);
                }
            },
            Stmt::For {
                var,
                from,
                to,
                step,
                body,
                ..
            } => self.exec_for(*var, from, to, step.as_ref(), body, line),
            Stmt::Select {
                subject,
                arms,
                default,
                ..
            } => self.exec_select(subject, arms, default.as_ref(), line),
            Stmt::Call { name, args, .. } => {
                self.call_user(*name, args, line, SubKind::Procedure)?;
                Ok(ExecOutcome::Normal)
            }
            Stmt::Read { targets, .. } => {
                for target in targets {
                    self.exec_read(target, line)?;
                }
                Ok(ExecOutcome::Normal)
            }
            Stmt::Write { values, .. } => {
                let mut parts = Vec::with_capacity(values.len());
                for expr in values {
                    parts.push(self.eval_expr(expr, line)?.format());
                }
                self.output.write_line(&parts.join(" "));
                Ok(ExecOutcome::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = self.eval_expr(value, line)?;
                Ok(ExecOutcome::Return(value))
            }
        }
    }

    fn exec_for(
        &mut self,
        var: Symbol,
        from: &Expr,
        to: &Expr,
        step: Option<&Expr>,
        body: &[Stmt],
        line: u32,
    ) -> InterpResult<ExecOutcome> {
        let from = as_integer(&self.eval_expr(from, line)?, line)?;
        let to = as_integer(&self.eval_expr(to, line)?, line)?;
        let step = match step {
            Some(expr) => as_integer(&self.eval_expr(expr, line)?, line)?,
            None => 1,
        };
        if step == 0 {
            return Err(RuntimeError::InvalidLoopStep { line });
        }

        let span = to - from;
        let count = if step > 0 {
            if span < 0 {
                0
            } else {
                span / step + 1
            }
        } else if span > 0 {
            0
        } else {
            span / step + 1
        };

        let mut current = from;
        for _ in 0..count {
            self.env
                .assign(var, Value::Integer(current))
                .map_err(|e| env_err(e, line))?;
            if let ExecOutcome::Return(v) = self.exec_stmts(body)? {
                return Ok(ExecOutcome::Return(v));
            }
            current += step;
        }
        Ok(ExecOutcome::Normal)
    }

    fn exec_select(
        &mut self,
        subject: &Expr,
        arms: &[SelectArm],
        default: Option<&Vec<Stmt>>,
        line: u32,
    ) -> InterpResult<ExecOutcome> {
        let subject_value = self.eval_expr(subject, line)?;
        for arm in arms {
            for case in &arm.values {
                if self.case_matches(&subject_value, case, line)? {
                    return self.exec_stmts(&arm.body);
                }
            }
        }
        match default {
            Some(body) => self.exec_stmts(body),
            None => Ok(ExecOutcome::Normal),
        }
    }

    fn case_matches(&mut self, subject: &Value, case: &CaseValue, line: u32) -> InterpResult<bool> {
        match case {
            CaseValue::Literal(expr) => {
                let candidate = self.eval_expr(expr, line)?;
                values_equal(subject, &candidate, line)
            }
            CaseValue::Range(lo, hi) => {
                let lo = self.eval_expr(lo, line)?;
                let hi = self.eval_expr(hi, line)?;
                let below_lo = compare_ordering(&lo, subject, line)? == Ordering::Greater;
                let above_hi = compare_ordering(&hi, subject, line)? == Ordering::Less;
                Ok(!below_lo && !above_hi)
            }
        }
    }

    fn assign_target(&mut self, target: &Target, value: Value, line: u32) -> InterpResult<()> {
        match target {
            Target::Name(name) => self.env.assign(*name, value).map_err(|e| env_err(e, line)),
            Target::Index1(name, idx) => {
                let idx = as_integer(&self.eval_expr(idx, line)?, line)?;
                self.env
                    .assign_index1(*name, idx, value)
                    .map_err(|e| env_err(e, line))
            }
            Target::Index2(name, row, col) => {
                let row = as_integer(&self.eval_expr(row, line)?, line)?;
                let col = as_integer(&self.eval_expr(col, line)?, line)?;
                self.env
                    .assign_index2(*name, row, col, value)
                    .map_err(|e| env_err(e, line))
            }
        }
    }

    fn target_type(&self, target: &Target, line: u32) -> InterpResult<TypeTag> {
        let name = match target {
            Target::Name(n) | Target::Index1(n, _) | Target::Index2(n, _, _) => *n,
        };
        self.env.lookup(name).map(|slot| slot.ty).map_err(|e| env_err(e, line))
    }

    fn exec_read(&mut self, target: &Target, line: u32) -> InterpResult<()> {
        let ty = self.target_type(target, line)?;
        let line_text = self
            .input
            .read_line()
            .ok_or(RuntimeError::InvalidInput { line })?;
        let value = parse_input(&line_text, ty, line)?;
        self.assign_target(target, value, line)
    }

    fn eval_expr(&mut self, expr: &Expr, line: u32) -> InterpResult<Value> {
        match expr {
            Expr::IntLiteral(n) => Ok(Value::Integer(*n)),
            Expr::RealLiteral(r) => Ok(Value::Real(*r)),
            Expr::StringLiteral(s) => Ok(Value::Character(s.as_str().to_string())),
            Expr::BoolLiteral(b) => Ok(Value::Boolean(*b)),
            Expr::Var(name) => self
                .env
                .lookup(*name)
                .map(|slot| slot.value.clone())
                .map_err(|e| env_err(e, line)),
            Expr::Index1(name, idx) => {
                let idx = as_integer(&self.eval_expr(idx, line)?, line)?;
                self.env.read_index1(*name, idx).map_err(|e| env_err(e, line))
            }
            Expr::Index2(name, row, col) => {
                let row = as_integer(&self.eval_expr(row, line)?, line)?;
                let col = as_integer(&self.eval_expr(col, line)?, line)?;
                self.env
                    .read_index2(*name, row, col)
                    .map_err(|e| env_err(e, line))
            }
            Expr::Unary(op, inner) => {
                let value = self.eval_expr(inner, line)?;
                match (op, &value) {
                    (UnOp::Neg, Value::Integer(n)) => Ok(Value::Integer(-n)),
                    (UnOp::Neg, Value::Real(r)) => Ok(Value::Real(-r)),
                    (UnOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
                    _ => Err(RuntimeError::OperandTypeMismatch { line }),
                }
            }
            Expr::Binary(BinOp::And, l, r) => {
                let left = as_bool(&self.eval_expr(l, line)?, line)?;
                if !left {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(as_bool(&self.eval_expr(r, line)?, line)?))
            }
            Expr::Binary(BinOp::Or, l, r) => {
                let left = as_bool(&self.eval_expr(l, line)?, line)?;
                if left {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(as_bool(&self.eval_expr(r, line)?, line)?))
            }
            Expr::Binary(op, l, r) => {
                let left = self.eval_expr(l, line)?;
                let right = self.eval_expr(r, line)?;
                apply_binary(*op, left, right, line)
            }
            Expr::Call(name, args) => self.eval_call(*name, args, line),
        }
    }

    fn eval_call(&mut self, name: Symbol, args: &[Expr], line: u32) -> InterpResult<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, line)?);
        }
        if let Some(result) = builtins::call(name.as_str(), &values, line) {
            return result;
        }
        self.call_user_with_values(name, values, line, SubKind::Function)
            .map(|v| v.expect("function call always yields a value"))
    }

    /// Calls a user subprogram whose arguments still need evaluating (used
    /// by `ΚΑΛΕΣΕ`, where there is no built-in fallback to try first).
    fn call_user(
        &mut self,
        name: Symbol,
        arg_exprs: &[Expr],
        line: u32,
        expected: SubKind,
    ) -> InterpResult<Option<Value>> {
        let mut values = Vec::with_capacity(arg_exprs.len());
        for expr in arg_exprs {
            values.push(self.eval_expr(expr, line)?);
        }
        self.call_user_with_values(name, values, line, expected)
    }

    fn call_user_with_values(
        &mut self,
        name: Symbol,
        arg_values: Vec<Value>,
        line: u32,
        expected: SubKind,
    ) -> InterpResult<Option<Value>> {
        let sub: &Subprogram = *self
            .subprograms
            .get(&name)
            .ok_or(RuntimeError::UnknownCallable { name, line })?;

        match (expected, sub.kind) {
            (SubKind::Procedure, SubKind::Function) => {
                return Err(RuntimeError::NotAProcedure { name, line })
            }
            (SubKind::Function, SubKind::Procedure) => {
                return Err(RuntimeError::NotAFunction { name, line })
            }
            _ => {}
        }

        if sub.params.len() != arg_values.len() {
            return Err(RuntimeError::ArityMismatch {
                name,
                expected: sub.params.len(),
                found: arg_values.len(),
                line,
            });
        }

        let mut bound = Vec::with_capacity(sub.params.len());
        for (param, value) in sub.params.iter().zip(arg_values) {
            let coerced = coerce_param(value, param.ty, param.shape, param.name)
                .map_err(|e| env_err(e, line))?;
            bound.push((param.name, param.ty, param.shape, coerced));
        }

        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { name, line });
        }

        self.depth += 1;
        self.env.enter_call();
        let result = self.run_subprogram_body(sub, bound, line);
        self.env.exit_call();
        self.depth -= 1;
        let outcome = result?;

        match (sub.kind, outcome) {
            (SubKind::Function, ExecOutcome::Return(value)) => {
                let return_type = sub
                    .return_type
                    .expect("parser guarantees functions carry a return type");
                let coerced = coerce(value, return_type).map_err(|e| env_err(e, line))?;
                Ok(Some(coerced))
            }
            (SubKind::Function, ExecOutcome::Normal) => {
                Err(RuntimeError::MissingReturn { name, line })
            }
            (SubKind::Procedure, _) => Ok(None),
        }
    }

    fn run_subprogram_body(
        &mut self,
        sub: &Subprogram,
        bound: Vec<(Symbol, TypeTag, Option<ArrayShape>, Value)>,
        line: u32,
    ) -> InterpResult<ExecOutcome> {
        for (name, ty, shape, value) in bound {
            self.env
                .bind_param(name, ty, shape, value)
                .map_err(|e| env_err(e, line))?;
        }
        for decl in &sub.variables {
            match decl.shape {
                None => self.env.declare(decl.name, decl.ty),
                Some(shape) => self.env.declare_array(decl.name, decl.ty, shape),
            }
            .map_err(|e| env_err(e, line))?;
        }
        self.exec_stmts(&sub.body)
    }
}

fn values_equal(a: &Value, b: &Value, line: u32) -> InterpResult<bool> {
    if let (Value::Character(x), Value::Character(y)) = (a, b) {
        return Ok(x == y);
    }
    if let (Value::Boolean(x), Value::Boolean(y)) = (a, b) {
        return Ok(x == y);
    }
    let is_real = matches!(a, Value::Real(_)) || matches!(b, Value::Real(_));
    if is_real {
        Ok(as_f64(a, line)? == as_f64(b, line)?)
    } else {
        Ok(as_integer(a, line)? == as_integer(b, line)?)
    }
}

fn compare_ordering(a: &Value, b: &Value, line: u32) -> InterpResult<Ordering> {
    if let (Value::Character(x), Value::Character(y)) = (a, b) {
        return Ok(x.cmp(y));
    }
    let is_real = matches!(a, Value::Real(_)) || matches!(b, Value::Real(_));
    if is_real {
        let x = as_f64(a, line)?;
        let y = as_f64(b, line)?;
        x.partial_cmp(&y).ok_or(RuntimeError::OperandTypeMismatch { line })
    } else {
        Ok(as_integer(a, line)?.cmp(&as_integer(b, line)?))
    }
}

fn apply_binary(op: BinOp, left: Value, right: Value, line: u32) -> InterpResult<Value> {
    match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul => {
            let is_real = matches!(left, Value::Real(_)) || matches!(right, Value::Real(_));
            if is_real {
                let a = as_f64(&left, line)?;
                let b = as_f64(&right, line)?;
                Ok(Value::Real(match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    _ => unreachable!(),
                }))
            } else {
                let a = as_integer(&left, line)?;
                let b = as_integer(&right, line)?;
                Ok(Value::Integer(match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    _ => unreachable!(),
                }))
            }
        }
        BinOp::Div => {
            let a = as_f64(&left, line)?;
            let b = as_f64(&right, line)?;
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Real(a / b))
        }
        BinOp::IntDiv => {
            let a = as_integer(&left, line)?;
            let b = as_integer(&right, line)?;
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Integer(a / b))
        }
        BinOp::IntMod => {
            let a = as_integer(&left, line)?;
            let b = as_integer(&right, line)?;
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Integer(a % b))
        }
        BinOp::Eq => Ok(Value::Boolean(values_equal(&left, &right, line)?)),
        BinOp::NotEq => Ok(Value::Boolean(!values_equal(&left, &right, line)?)),
        BinOp::Lt => Ok(Value::Boolean(compare_ordering(&left, &right, line)? == Ordering::Less)),
        BinOp::LtEq => Ok(Value::Boolean(
            compare_ordering(&left, &right, line)? != Ordering::Greater,
        )),
        BinOp::Gt => Ok(Value::Boolean(
            compare_ordering(&left, &right, line)? == Ordering::Greater,
        )),
        BinOp::GtEq => Ok(Value::Boolean(
            compare_ordering(&left, &right, line)? != Ordering::Less,
        )),
        BinOp::And | BinOp::Or => unreachable!("short-circuited in eval_expr"),
    }
}

fn parse_input(text: &str, ty: TypeTag, line: u32) -> InterpResult<Value> {
    let trimmed = text.trim();
    match ty {
        TypeTag::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| RuntimeError::InvalidInput { line }),
        TypeTag::Real => trimmed
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| RuntimeError::InvalidInput { line }),
        TypeTag::Boolean => match trimmed {
            "ΑΛΗΘΗΣ" => Ok(Value::Boolean(true)),
            "ΨΕΥΔΗΣ" => Ok(Value::Boolean(false)),
            _ => Err(RuntimeError::InvalidInput { line }),
        },
        TypeTag::Character => Ok(Value::Character(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_lex::Lexer;
    use glossa_par::Parser;
    use glossa_util::Handler;

    fn parse(source: &str) -> Program {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).tokenize();
        let program = Parser::new(tokens, &mut handler).parse_program();
        assert!(!handler.has_errors(), "unexpected parse errors");
        program.expect("program parsed")
    }

    fn run_source(source: &str) -> Vec<String> {
        let program = parse(source);
        let mut output = BufferedOutput::new();
        let mut input = ScriptedInput::new(Vec::<String>::new());
        let mut debugger = NullDebugger;
        run(&program, &mut output, &mut input, &mut debugger).expect("program runs");
        output.into_lines()
    }

    #[test]
    fn literal_write_prints_the_value() {
        let lines = run_source(
            "ΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΓΡΑΨΕ 42\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
        );
        assert_eq!(lines, vec!["42".to_string()]);
    }

    #[test]
    fn for_loop_computes_factorial_of_five() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: αποτελεσμα, i\nΑΡΧΗ\nαποτελεσμα <- 1\nΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 5\nαποτελεσμα <- αποτελεσμα * i\nΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ\nΓΡΑΨΕ αποτελεσμα\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["120".to_string()]);
    }

    #[test]
    fn while_loop_counts_down() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: ν\nΑΡΧΗ\nν <- 3\nΟΣΟ ν > 0 ΕΠΑΝΑΛΑΒΕ\nΓΡΑΨΕ ν\nν <- ν - 1\nΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(
            run_source(source),
            vec!["3".to_string(), "2".to_string(), "1".to_string()]
        );
    }

    #[test]
    fn repeat_until_runs_body_at_least_once_when_guard_starts_true() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: ν\nΑΡΧΗ\nν <- 0\nΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ\nν <- ν + 1\nΓΡΑΨΕ ν\nΜΕΧΡΙΣ_ΟΤΟΥ ΑΛΗΘΗΣ\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["1".to_string()]);
    }

    #[test]
    fn select_matches_range_arm_in_source_order() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: x\nΑΡΧΗ\nx <- 3\nΕΠΙΛΕΞΕ x\nΠΕΡΙΠΤΩΣΗ 1\nΓΡΑΨΕ 1\nΠΕΡΙΠΤΩΣΗ 2 ΜΕΧΡΙ 3\nΓΡΑΨΕ 2\nΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["2".to_string()]);
    }

    #[test]
    fn recursive_function_computes_fibonacci() {
        let source = "ΣΥΝΑΡΤΗΣΗ φιμπ(ν: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ\nΑΡΧΗ\nΑΝ ν < 2 ΤΟΤΕ\nΕΠΙΣΤΡΕΨΕ ν\nΤΕΛΟΣ_ΑΝ\nΕΠΙΣΤΡΕΨΕ φιμπ(ν - 1) + φιμπ(ν - 2)\nΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ\nΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΓΡΑΨΕ φιμπ(10)\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["55".to_string()]);
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: x\nΑΡΧΗ\nx <- 1 DIV 0\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        let program = parse(source);
        let mut output = BufferedOutput::new();
        let mut input = ScriptedInput::new(Vec::<String>::new());
        let mut debugger = NullDebugger;
        let result = run(&program, &mut output, &mut input, &mut debugger);
        assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn array_bounds_succeed_at_edges_and_fail_outside() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: πιν[3], x\nΑΡΧΗ\nπιν[1] <- 10\nπιν[3] <- 30\nx <- πιν[1] + πιν[3]\nΓΡΑΨΕ x\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["40".to_string()]);

        let out_of_range = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: πιν[3]\nΑΡΧΗ\nπιν[4] <- 1\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        let program = parse(out_of_range);
        let mut output = BufferedOutput::new();
        let mut input = ScriptedInput::new(Vec::<String>::new());
        let mut debugger = NullDebugger;
        let result = run(&program, &mut output, &mut input, &mut debugger);
        assert!(matches!(result, Err(RuntimeError::IndexOutOfRange { .. })));
    }

    #[test]
    fn short_circuit_and_skips_right_operand_side_effects() {
        let source = "ΣΥΝΑΡΤΗΣΗ ψευδες_με_πλαιστικο(): ΛΟΓΙΚΕΣ\nΑΡΧΗ\nΓΡΑΨΕ 1\nΕΠΙΣΤΡΕΨΕ ΑΛΗΘΗΣ\nΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ\nΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΑΝ ΨΕΥΔΗΣ ΚΑΙ ψευδες_με_πλαιστικο() ΤΟΤΕ\nΓΡΑΨΕ 2\nΤΕΛΟΣ_ΑΝ\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), Vec::<String>::new());
    }

    #[test]
    fn read_parses_input_according_to_declared_type() {
        let source = "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: x\nΑΡΧΗ\nΔΙΑΒΑΣΕ x\nΓΡΑΨΕ x\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        let program = parse(source);
        let mut output = BufferedOutput::new();
        let mut input = ScriptedInput::new(vec!["7".to_string()]);
        let mut debugger = NullDebugger;
        run(&program, &mut output, &mut input, &mut debugger).expect("program runs");
        assert_eq!(output.into_lines(), vec!["7".to_string()]);
    }

    #[test]
    fn recursive_call_does_not_clobber_outer_frames_pending_operand() {
        // The outer call's own ν must still be 10 when the second recursive
        // call is evaluated, even though the first recursive call has
        // already entered and exited its own frame by that point.
        let source = "ΣΥΝΑΡΤΗΣΗ αθροισμα(ν: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ\nΑΡΧΗ\nΑΝ ν < 1 ΤΟΤΕ\nΕΠΙΣΤΡΕΨΕ 0\nΤΕΛΟΣ_ΑΝ\nΕΠΙΣΤΡΕΨΕ ν + αθροισμα(ν - 1)\nΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ\nΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΓΡΑΨΕ αθροισμα(10)\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["55".to_string()]);
    }

    #[test]
    fn unbounded_recursion_is_a_recursion_limit_error_not_a_stack_overflow() {
        let source = "ΣΥΝΑΡΤΗΣΗ απειρη(ν: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ\nΑΡΧΗ\nΕΠΙΣΤΡΕΨΕ απειρη(ν + 1)\nΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ\nΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΓΡΑΨΕ απειρη(0)\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        let program = parse(source);
        let mut output = BufferedOutput::new();
        let mut input = ScriptedInput::new(Vec::<String>::new());
        let mut debugger = NullDebugger;
        let result = run(&program, &mut output, &mut input, &mut debugger);
        assert!(matches!(result, Err(RuntimeError::RecursionLimit { .. })));
    }

    #[test]
    fn array_argument_is_passed_by_value_not_reference() {
        let source = "ΔΙΑΔΙΚΑΣΙΑ μηδενισε(πιν: ΑΚΕΡΑΙΕΣ[3])\nΑΡΧΗ\nπιν[1] <- 0\nΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ\nΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: τιμες[3]\nΑΡΧΗ\nτιμες[1] <- 7\nΚΑΛΕΣΕ μηδενισε(τιμες)\nΓΡΑΨΕ τιμες[1]\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["7".to_string()]);
    }

    #[test]
    fn call_frame_does_not_share_state_with_global_scope() {
        let source = "ΔΙΑΔΙΚΑΣΙΑ ορισε(τιμη: ΑΚΕΡΑΙΕΣ)\nΑΡΧΗ\nτιμη <- 99\nΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ\nΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: τιμη\nΑΡΧΗ\nτιμη <- 1\nΚΑΛΕΣΕ ορισε(τιμη)\nΓΡΑΨΕ τιμη\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n";
        assert_eq!(run_source(source), vec!["1".to_string()]);
    }
}
