//! glossa-par - Recursive-descent parser for ΓΛΩΣΣΑ.
//!
//! ============================================================================
//! GRAMMAR OVERVIEW
//! ============================================================================
//!
//! Program := `ΠΡΟΓΡΑΜΜΑ` name
//!            [`ΣΤΑΘΕΡΕΣ` const-decl+]
//!            [`ΜΕΤΑΒΛΗΤΕΣ` var-decl+]
//!            `ΑΡΧΗ` stmt* `ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ`
//!            subprogram*
//!
//! Subprograms may be written before or after the main program block; both
//! orderings are accepted in one pass since `ΔΙΑΔΙΚΑΣΙΑ`/`ΣΥΝΑΡΤΗΣΗ` and
//! `ΠΡΟΓΡΑΜΜΑ` are mutually exclusive at the top level.
//!
//! Expression precedence, lowest to highest (§4.2 of the specification this
//! parser was built against):
//!
//! 1. `Η`  (logical or)
//! 2. `ΚΑΙ` (logical and)
//! 3. `ΟΧΙ` (logical not, prefix, right-associative)
//! 4. relational: `=`, `<>`, `<`, `<=`, `>`, `>=`
//! 5. additive: `+`, `-`
//! 6. multiplicative: `*`, `/`, `DIV`, `MOD`
//! 7. unary minus (prefix)
//! 8. primary: literal, name, indexed reference, call, parenthesized
//!
//! Each precedence level is one recursive function that calls the next
//! tighter level before trying its own operators - classic precedence
//! climbing without an explicit binding-power table, since the grammar has
//! few enough levels that the table would not pay for itself.
//!
//! Parsing never backtracks and never recovers: the first syntax error is
//! fatal, reported through the same diagnostic infrastructure the lexer
//! uses, and parsing stops.

use glossa_lex::{Token, TokenKind};
use glossa_util::{DiagnosticBuilder, Handler, Symbol};

// ============================================================================
// AST
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Integer,
    Real,
    Character,
    Boolean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayShape {
    OneD(u64),
    TwoD(u64, u64),
}

#[derive(Clone, Debug)]
pub struct VarDecl {
    pub name: Symbol,
    pub ty: TypeTag,
    pub shape: Option<ArrayShape>,
}

#[derive(Clone, Debug)]
pub struct ConstDecl {
    pub name: Symbol,
    pub value: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubKind {
    Procedure,
    Function,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: Symbol,
    pub ty: TypeTag,
    /// `Some` when the parameter accepts an array argument of this shape,
    /// passed by value like every other argument (spec: arrays are copied
    /// at binding, never aliased).
    pub shape: Option<ArrayShape>,
}

#[derive(Clone, Debug)]
pub struct Subprogram {
    pub kind: SubKind,
    pub name: Symbol,
    pub params: Vec<Param>,
    pub return_type: Option<TypeTag>,
    pub variables: Vec<VarDecl>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct Program {
    pub name: Symbol,
    pub constants: Vec<ConstDecl>,
    pub variables: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub subprograms: Vec<Subprogram>,
}

/// An assignment or read target: a plain name or an indexed array cell.
#[derive(Clone, Debug)]
pub enum Target {
    Name(Symbol),
    Index1(Symbol, Expr),
    Index2(Symbol, Expr, Expr),
}

#[derive(Clone, Debug)]
pub enum CaseValue {
    Literal(Expr),
    Range(Expr, Expr),
}

#[derive(Clone, Debug)]
pub struct SelectArm {
    pub values: Vec<CaseValue>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Assign {
        target: Target,
        value: Expr,
        line: u32,
    },
    If {
        arms: Vec<(Expr, Vec<Stmt>)>,
        else_body: Option<Vec<Stmt>>,
        line: u32,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
        line: u32,
    },
    RepeatUntil {
        body: Vec<Stmt>,
        cond: Expr,
        line: u32,
    },
    For {
        var: Symbol,
        from: Expr,
        to: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
        line: u32,
    },
    Select {
        subject: Expr,
        arms: Vec<SelectArm>,
        default: Option<Vec<Stmt>>,
        line: u32,
    },
    Call {
        name: Symbol,
        args: Vec<Expr>,
        line: u32,
    },
    Read {
        targets: Vec<Target>,
        line: u32,
    },
    Write {
        values: Vec<Expr>,
        line: u32,
    },
    Return {
        value: Expr,
        line: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    IntMod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

#[derive(Clone, Debug)]
pub enum Expr {
    IntLiteral(i64),
    RealLiteral(f64),
    StringLiteral(Symbol),
    BoolLiteral(bool),
    Var(Symbol),
    Index1(Symbol, Box<Expr>),
    Index2(Symbol, Box<Expr>, Box<Expr>),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Symbol, Vec<Expr>),
}

// ============================================================================
// PARSER
// ============================================================================

pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a mut Handler,
    /// Set once a syntax error has been reported; subsequent parse methods
    /// short-circuit rather than keep producing cascading nonsense.
    failed: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a mut Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
            failed: false,
        }
    }

    /// Parses a complete source file. Returns `None` if a syntax error was
    /// reported (the error itself is on the handler, per §4.2: no recovery).
    pub fn parse_program(&mut self) -> Option<Program> {
        let mut leading_subprograms = Vec::new();
        while self.check(&TokenKind::Procedure) || self.check(&TokenKind::Function) {
            leading_subprograms.push(self.parse_subprogram()?);
        }

        self.expect(&TokenKind::Program)?;
        let name = self.expect_identifier()?;

        let mut constants = Vec::new();
        if self.eat(&TokenKind::Constants) {
            while self.is_identifier() {
                constants.push(self.parse_const_decl()?);
            }
        }

        let mut variables = Vec::new();
        if self.eat(&TokenKind::Variables) {
            while self.is_type_keyword() {
                variables.extend(self.parse_var_decl_line()?);
            }
        }

        self.expect(&TokenKind::Begin)?;
        let body = self.parse_stmts_until(&[TokenKind::EndProgram])?;
        self.expect(&TokenKind::EndProgram)?;

        let mut trailing_subprograms = Vec::new();
        while self.check(&TokenKind::Procedure) || self.check(&TokenKind::Function) {
            trailing_subprograms.push(self.parse_subprogram()?);
        }

        if !self.is_at_end() {
            self.error("αναμενόταν τέλος αρχείου".to_string());
            return None;
        }

        leading_subprograms.extend(trailing_subprograms);
        Some(Program {
            name,
            constants,
            variables,
            body,
            subprograms: leading_subprograms,
        })
    }

    fn parse_const_decl(&mut self) -> Option<ConstDecl> {
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Some(ConstDecl { name, value })
    }

    fn type_tag_for_current(&self) -> Option<TypeTag> {
        match self.current().kind {
            TokenKind::IntegerType => Some(TypeTag::Integer),
            TokenKind::RealType => Some(TypeTag::Real),
            TokenKind::CharacterType => Some(TypeTag::Character),
            TokenKind::BooleanType => Some(TypeTag::Boolean),
            _ => None,
        }
    }

    fn is_type_keyword(&self) -> bool {
        self.type_tag_for_current().is_some()
    }

    /// Parses one `TYPE: name[, name[upper] ...]` declaration line, which
    /// may declare several scalars and/or arrays sharing one element type.
    fn parse_var_decl_line(&mut self) -> Option<Vec<VarDecl>> {
        let ty = self.type_tag_for_current()?;
        self.advance();
        self.expect(&TokenKind::Colon)?;

        let mut decls = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let shape = self.parse_optional_shape()?;
            decls.push(VarDecl { name, ty, shape });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Some(decls)
    }

    /// Parses an optional `[upper]` or `[rows, cols]` array-shape suffix.
    /// Returns `Some(None)` when no bracket follows (a scalar).
    fn parse_optional_shape(&mut self) -> Option<Option<ArrayShape>> {
        if self.eat(&TokenKind::LBracket) {
            let upper1 = self.expect_integer_literal()?;
            let shape = if self.eat(&TokenKind::Comma) {
                let upper2 = self.expect_integer_literal()?;
                ArrayShape::TwoD(upper1 as u64, upper2 as u64)
            } else {
                ArrayShape::OneD(upper1 as u64)
            };
            self.expect(&TokenKind::RBracket)?;
            Some(Some(shape))
        } else {
            Some(None)
        }
    }

    fn parse_subprogram(&mut self) -> Option<Subprogram> {
        let kind = if self.eat(&TokenKind::Procedure) {
            SubKind::Procedure
        } else {
            self.expect(&TokenKind::Function)?;
            SubKind::Function
        };

        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let pname = self.expect_identifier()?;
                self.expect(&TokenKind::Colon)?;
                let pty = self.expect_type_tag()?;
                let shape = self.parse_optional_shape()?;
                params.push(Param {
                    name: pname,
                    ty: pty,
                    shape,
                });
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let return_type = if kind == SubKind::Function {
            self.expect(&TokenKind::Colon)?;
            Some(self.expect_type_tag()?)
        } else {
            None
        };

        let mut variables = Vec::new();
        if self.eat(&TokenKind::Variables) {
            while self.is_type_keyword() {
                variables.extend(self.parse_var_decl_line()?);
            }
        }

        let end_keyword = match kind {
            SubKind::Procedure => TokenKind::EndProcedure,
            SubKind::Function => TokenKind::EndFunction,
        };

        self.expect(&TokenKind::Begin)?;
        let body = self.parse_stmts_until(&[end_keyword.clone()])?;
        self.expect(&end_keyword)?;

        Some(Subprogram {
            kind,
            name,
            params,
            return_type,
            variables,
            body,
        })
    }

    fn expect_type_tag(&mut self) -> Option<TypeTag> {
        let ty = self.type_tag_for_current()?;
        self.advance();
        Some(ty)
    }

    // ---- statements ---------------------------------------------------------

    /// Parses statements until the current token matches one of `closers`
    /// (the closer itself is left unconsumed for the caller to `expect`).
    fn parse_stmts_until(&mut self, closers: &[TokenKind]) -> Option<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !closers.iter().any(|c| self.check(c)) {
            if self.is_at_end() {
                self.error("μη αναμενόμενο τέλος εισόδου μέσα σε εντολές".to_string());
                return None;
            }
            stmts.push(self.parse_stmt()?);
        }
        Some(stmts)
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        let line = self.current().line;
        match self.current().kind.clone() {
            TokenKind::If => self.parse_if(line),
            TokenKind::While => self.parse_while(line),
            TokenKind::DoRepeat => self.parse_repeat_until(line),
            TokenKind::For => self.parse_for(line),
            TokenKind::Select => self.parse_select(line),
            TokenKind::Call => self.parse_call_stmt(line),
            TokenKind::Read => self.parse_read(line),
            TokenKind::Write => self.parse_write(line),
            TokenKind::Return => self.parse_return(line),
            TokenKind::Identifier(_) => self.parse_assignment(line),
            other => {
                self.error(format!("αναμενόταν εντολή, βρέθηκε {other}"));
                None
            }
        }
    }

    fn parse_assignment(&mut self, line: u32) -> Option<Stmt> {
        let target = self.parse_target()?;
        self.expect(&TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Some(Stmt::Assign { target, value, line })
    }

    fn parse_target(&mut self) -> Option<Target> {
        let name = self.expect_identifier()?;
        if self.eat(&TokenKind::LBracket) {
            let idx1 = self.parse_expr()?;
            let target = if self.eat(&TokenKind::Comma) {
                let idx2 = self.parse_expr()?;
                Target::Index2(name, idx1, idx2)
            } else {
                Target::Index1(name, idx1)
            };
            self.expect(&TokenKind::RBracket)?;
            Some(target)
        } else {
            Some(Target::Name(name))
        }
    }

    fn parse_if(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::If)?;
        let mut arms = Vec::new();
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Then)?;
        let body = self.parse_stmts_until(&[
            TokenKind::ElseIf,
            TokenKind::Else,
            TokenKind::EndIf,
        ])?;
        arms.push((cond, body));

        while self.eat(&TokenKind::ElseIf) {
            let cond = self.parse_expr()?;
            self.expect(&TokenKind::Then)?;
            let body = self.parse_stmts_until(&[
                TokenKind::ElseIf,
                TokenKind::Else,
                TokenKind::EndIf,
            ])?;
            arms.push((cond, body));
        }

        let else_body = if self.eat(&TokenKind::Else) {
            Some(self.parse_stmts_until(&[TokenKind::EndIf])?)
        } else {
            None
        };

        self.expect(&TokenKind::EndIf)?;
        Some(Stmt::If { arms, else_body, line })
    }

    fn parse_while(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::While)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Repeat)?;
        let body = self.parse_stmts_until(&[TokenKind::EndWhile])?;
        self.expect(&TokenKind::EndWhile)?;
        Some(Stmt::While { cond, body, line })
    }

    fn parse_repeat_until(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::DoRepeat)?;
        let body = self.parse_stmts_until(&[TokenKind::Until])?;
        self.expect(&TokenKind::Until)?;
        let cond = self.parse_expr()?;
        Some(Stmt::RepeatUntil { body, cond, line })
    }

    fn parse_for(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::For)?;
        let var = self.expect_identifier()?;
        self.expect(&TokenKind::From)?;
        let from = self.parse_expr()?;
        self.expect(&TokenKind::To)?;
        let to = self.parse_expr()?;
        let step = if self.eat(&TokenKind::WithStep) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let body = self.parse_stmts_until(&[TokenKind::EndWhile])?;
        self.expect(&TokenKind::EndWhile)?;
        Some(Stmt::For {
            var,
            from,
            to,
            step,
            body,
            line,
        })
    }

    fn parse_select(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::Select)?;
        let subject = self.parse_expr()?;

        let mut arms = Vec::new();
        let mut default = None;
        self.expect(&TokenKind::Case)?;
        loop {
            if self.eat(&TokenKind::Else) {
                default = Some(self.parse_stmts_until(&[
                    TokenKind::Case,
                    TokenKind::EndSelect,
                ])?);
            } else {
                let mut values = Vec::new();
                loop {
                    values.push(self.parse_case_value()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                let body = self.parse_stmts_until(&[
                    TokenKind::Case,
                    TokenKind::EndSelect,
                ])?;
                arms.push(SelectArm { values, body });
            }

            if self.check(&TokenKind::EndSelect) {
                break;
            }
            self.expect(&TokenKind::Case)?;
        }
        self.expect(&TokenKind::EndSelect)?;
        Some(Stmt::Select {
            subject,
            arms,
            default,
            line,
        })
    }

    fn parse_case_value(&mut self) -> Option<CaseValue> {
        let first = self.parse_expr()?;
        if self.eat(&TokenKind::To) {
            let last = self.parse_expr()?;
            Some(CaseValue::Range(first, last))
        } else {
            Some(CaseValue::Literal(first))
        }
    }

    fn parse_call_stmt(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::Call)?;
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;
        let args = self.parse_arg_list()?;
        self.expect(&TokenKind::RParen)?;
        Some(Stmt::Call { name, args, line })
    }

    fn parse_read(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::Read)?;
        let mut targets = vec![self.parse_target()?];
        while self.eat(&TokenKind::Comma) {
            targets.push(self.parse_target()?);
        }
        Some(Stmt::Read { targets, line })
    }

    fn parse_write(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::Write)?;
        let mut values = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            values.push(self.parse_expr()?);
        }
        Some(Stmt::Write { values, line })
    }

    fn parse_return(&mut self, line: u32) -> Option<Stmt> {
        self.expect(&TokenKind::Return)?;
        let value = self.parse_expr()?;
        Some(Stmt::Return { value, line })
    }

    // ---- expressions (precedence climbing) -----------------------------------

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.parse_not()?;
            lhs = Expr::Binary(BinOp::And, Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_not(&mut self) -> Option<Expr> {
        if self.eat(&TokenKind::Not) {
            let operand = self.parse_not()?;
            Some(Expr::Unary(UnOp::Not, Box::new(operand)))
        } else {
            self.parse_relational()
        }
    }

    fn parse_relational(&mut self) -> Option<Expr> {
        let lhs = self.parse_additive()?;
        let op = match self.current().kind {
            TokenKind::Eq => BinOp::Eq,
            TokenKind::NotEq => BinOp::NotEq,
            TokenKind::Less => BinOp::Lt,
            TokenKind::LessEq => BinOp::LtEq,
            TokenKind::Greater => BinOp::Gt,
            TokenKind::GreaterEq => BinOp::GtEq,
            _ => return Some(lhs),
        };
        self.advance();
        let rhs = self.parse_additive()?;
        Some(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Div => BinOp::IntDiv,
                TokenKind::Mod => BinOp::IntMod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            Some(Expr::Unary(UnOp::Neg, Box::new(operand)))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current().kind.clone() {
            TokenKind::IntegerLiteral(n) => {
                self.advance();
                Some(Expr::IntLiteral(n))
            }
            TokenKind::RealLiteral(n) => {
                self.advance();
                Some(Expr::RealLiteral(n))
            }
            TokenKind::StringLiteral(s) => {
                self.advance();
                Some(Expr::StringLiteral(s))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::BoolLiteral(true))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::BoolLiteral(false))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.eat(&TokenKind::LParen) {
                    let args = self.parse_arg_list()?;
                    self.expect(&TokenKind::RParen)?;
                    Some(Expr::Call(name, args))
                } else if self.eat(&TokenKind::LBracket) {
                    let idx1 = self.parse_expr()?;
                    let expr = if self.eat(&TokenKind::Comma) {
                        let idx2 = self.parse_expr()?;
                        Expr::Index2(name, Box::new(idx1), Box::new(idx2))
                    } else {
                        Expr::Index1(name, Box::new(idx1))
                    };
                    self.expect(&TokenKind::RBracket)?;
                    Some(expr)
                } else {
                    Some(Expr::Var(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Some(inner)
            }
            other => {
                self.error(format!("αναμενόταν έκφραση, βρέθηκε {other}"));
                None
            }
        }
    }

    fn parse_arg_list(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        Some(args)
    }

    // ---- token-stream primitives ----------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn is_identifier(&self) -> bool {
        matches!(self.current().kind, TokenKind::Identifier(_))
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Option<()> {
        if self.eat(kind) {
            Some(())
        } else {
            let got = self.current().kind.clone();
            self.error(format!("αναμενόταν {kind}, βρέθηκε {got}"));
            None
        }
    }

    fn expect_identifier(&mut self) -> Option<Symbol> {
        match self.current().kind.clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Some(name)
            }
            other => {
                self.error(format!("αναμενόταν αναγνωριστικό, βρέθηκε {other}"));
                None
            }
        }
    }

    fn expect_integer_literal(&mut self) -> Option<i64> {
        match self.current().kind {
            TokenKind::IntegerLiteral(n) => {
                self.advance();
                Some(n)
            }
            _ => {
                let got = self.current().kind.clone();
                self.error(format!("αναμενόταν ακέραιο όριο πίνακα, βρέθηκε {got}"));
                None
            }
        }
    }

    fn error(&mut self, message: String) {
        if self.failed {
            return;
        }
        self.failed = true;
        let line = self.current().line;
        DiagnosticBuilder::error(format!("σφάλμα σύνταξης στη γραμμή {line}: {message}"))
            .emit(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_lex::Lexer;

    fn parse(src: &str) -> (Option<Program>, bool) {
        let mut handler = Handler::new();
        let tokens = Lexer::new(src, &mut handler).tokenize();
        let program = Parser::new(tokens, &mut handler).parse_program();
        (program, handler.has_errors())
    }

    #[test]
    fn minimal_program() {
        let (program, had_errors) = parse(
            "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α ΑΡΧΗ α<-42 ΓΡΑΨΕ α ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.expect("program should parse");
        assert_eq!(program.variables.len(), 1);
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn array_declaration_with_two_bounds() {
        let (program, had_errors) = parse(
            "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: Π[3, 4] ΑΡΧΗ ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        assert_eq!(program.variables[0].shape, Some(ArrayShape::TwoD(3, 4)));
    }

    #[test]
    fn if_elseif_else_chain() {
        let (program, had_errors) = parse(
            "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: x \
             ΑΡΧΗ \
             ΑΝ x = 1 ΤΟΤΕ ΓΡΑΨΕ x ΑΛΛΙΩΣ_ΑΝ x = 2 ΤΟΤΕ ΓΡΑΨΕ x ΑΛΛΙΩΣ ΓΡΑΨΕ x ΤΕΛΟΣ_ΑΝ \
             ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        match &program.body[0] {
            Stmt::If { arms, else_body, .. } => {
                assert_eq!(arms.len(), 2);
                assert!(else_body.is_some());
            }
            other => panic!("expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_with_step() {
        let (program, had_errors) = parse(
            "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i \
             ΑΡΧΗ ΓΙΑ i ΑΠΟ 10 ΜΕΧΡΙ 1 ΜΕ_ΒΗΜΑ -1 ΓΡΑΨΕ i ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ \
             ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        match &program.body[0] {
            Stmt::For { step, .. } => assert!(step.is_some()),
            other => panic!("expected for statement, got {other:?}"),
        }
    }

    #[test]
    fn select_with_range_and_default() {
        let (program, had_errors) = parse(
            "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: x \
             ΑΡΧΗ \
             ΕΠΙΛΕΞΕ x ΠΕΡΙΠΤΩΣΗ 1 ΓΡΑΨΕ 1 \
             ΠΕΡΙΠΤΩΣΗ 2, 3 ΓΡΑΨΕ 2 \
             ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ ΓΡΑΨΕ 0 \
             ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ \
             ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        match &program.body[0] {
            Stmt::Select { arms, default, .. } => {
                assert_eq!(arms.len(), 2);
                assert!(default.is_some());
            }
            other => panic!("expected select statement, got {other:?}"),
        }
    }

    #[test]
    fn expression_precedence_respects_and_over_or() {
        // x Η y ΚΑΙ z parses as x Η (y ΚΑΙ z)
        let (program, had_errors) = parse(
            "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΛΟΓΙΚΕΣ: x, y, z \
             ΑΡΧΗ ΑΝ x Η y ΚΑΙ z ΤΟΤΕ ΓΡΑΨΕ x ΤΕΛΟΣ_ΑΝ \
             ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        match &program.body[0] {
            Stmt::If { arms, .. } => match &arms[0].0 {
                Expr::Binary(BinOp::Or, _, rhs) => {
                    assert!(matches!(**rhs, Expr::Binary(BinOp::And, _, _)));
                }
                other => panic!("expected top-level OR, got {other:?}"),
            },
            other => panic!("expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn function_subprogram_with_params_and_return_type() {
        let (program, had_errors) = parse(
            "ΣΥΝΑΡΤΗΣΗ τετράγωνο(x: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ \
             ΑΡΧΗ ΕΠΙΣΤΡΕΨΕ x * x ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ \
             ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        assert_eq!(program.subprograms.len(), 1);
        assert_eq!(program.subprograms[0].kind, SubKind::Function);
        assert_eq!(program.subprograms[0].return_type, Some(TypeTag::Integer));
    }

    #[test]
    fn subprogram_parameter_accepts_array_shape() {
        let (program, had_errors) = parse(
            "ΔΙΑΔΙΚΑΣΙΑ γεμισε(πιν: ΑΚΕΡΑΙΕΣ[5]) \
             ΑΡΧΗ ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ \
             ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        );
        assert!(!had_errors);
        let program = program.unwrap();
        assert_eq!(
            program.subprograms[0].params[0].shape,
            Some(ArrayShape::OneD(5))
        );
    }

    #[test]
    fn syntax_error_is_reported_and_stops_parsing() {
        let (program, had_errors) = parse("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ α <- ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
        assert!(had_errors);
        assert!(program.is_none());
    }
}
