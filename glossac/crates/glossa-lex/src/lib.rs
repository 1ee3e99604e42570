//! glossa-lex - Tokenizer for ΓΛΩΣΣΑ source text.
//!
//! ============================================================================
//! LEXICAL ANALYSIS OVERVIEW
//! ============================================================================
//!
//! The tokenizer is a single left-to-right pass over UTF-8 source text. At
//! every position it applies, in order, the rules below (longest match wins
//! within a rule):
//!
//! 1. Whitespace (space, tab, CR) is skipped.
//! 2. A line comment starts with `!` and runs to end of line.
//! 3. String literals are delimited by either `"` ... `"` or the guillemets
//!    `«` ... `»`; the closing delimiter must match the opening kind. There
//!    are no escape sequences.
//! 4. A numeric literal is one or more decimal digits; if immediately
//!    followed by `.` and more digits it is a real literal, otherwise an
//!    integer literal. There is no sign prefix — unary minus is an operator
//!    parsed by the grammar, not the lexer.
//! 5. Multi-character operators are tried before single-character ones:
//!    `<-`, `<=`, `>=`, `<>`.
//! 6. Single-character punctuation and operators: `+ - * / ( ) , [ ] :`.
//! 7. An identifier begins with a Greek or Latin letter or underscore and
//!    continues with letters, digits, or underscores (mixing scripts within
//!    one name is permitted). The matched text is looked up case-sensitively
//!    in the keyword table; anything not found there is an identifier.
//! 8. Any other character is a lexical error ("unexpected character").
//!
//! Greek letters are recognized via [`unicode::is_ident_start`] and
//! [`unicode::is_ident_continue`], which accept any Unicode letter — this
//! covers both the U+0370-U+03FF and U+1F00-U+1FFF ranges the language
//! actually uses plus Latin letters for mixed-script identifiers, without
//! hard-coding the narrower ranges.

pub mod cursor;
pub mod unicode;

use glossa_util::{DiagnosticBuilder, Handler, Symbol};
use std::fmt;

use cursor::Cursor;

/// The kind of a lexical token, independent of its source location.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // ---- Program structure -------------------------------------------------
    Program,
    Constants,
    Variables,
    Begin,
    EndProgram,
    Procedure,
    EndProcedure,
    Function,
    EndFunction,

    // ---- Type keywords (ΜΕΤΑΒΛΗΤΕΣ declarations) ----------------------------
    IntegerType,
    RealType,
    CharacterType,
    BooleanType,

    // ---- Control flow --------------------------------------------------------
    If,
    Then,
    ElseIf,
    Else,
    EndIf,
    While,
    Repeat,
    EndWhile,
    DoRepeat,
    Until,
    For,
    From,
    To,
    WithStep,
    Select,
    Case,
    EndSelect,

    // ---- Subprogram / IO -----------------------------------------------------
    Call,
    Read,
    Write,
    Return,

    // ---- Logical keywords ----------------------------------------------------
    And,
    Or,
    Not,

    // ---- Integer operators written as Latin keywords --------------------------
    Div,
    Mod,

    // ---- Boolean literals ------------------------------------------------------
    True,
    False,

    // ---- Identifiers and literals ----------------------------------------------
    Identifier(Symbol),
    IntegerLiteral(i64),
    RealLiteral(f64),
    StringLiteral(Symbol),

    // ---- Operators --------------------------------------------------------------
    Assign,   // <-
    LessEq,   // <=
    GreaterEq,// >=
    NotEq,    // <>
    Less,     // <
    Greater,  // >
    Eq,       // =
    Plus,
    Minus,
    Star,
    Slash,

    // ---- Punctuation --------------------------------------------------------------
    LParen,
    RParen,
    Comma,
    LBracket,
    RBracket,
    Colon,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "αναγνωριστικό '{s}'"),
            TokenKind::IntegerLiteral(n) => write!(f, "ακέραιος {n}"),
            TokenKind::RealLiteral(n) => write!(f, "πραγματικός {n}"),
            TokenKind::StringLiteral(s) => write!(f, "συμβολοσειρά \"{s}\""),
            TokenKind::Eof => write!(f, "τέλος εισόδου"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A single lexical token: its kind, the exact source text it was matched
/// from, and the 1-based source line it started on.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

/// Maps a matched identifier-shaped lexeme to a keyword token, or `None` if
/// it is an ordinary identifier. Lookup is case-sensitive, matching §4.1.
fn keyword_from_text(text: &str) -> Option<TokenKind> {
    Some(match text {
        "ΠΡΟΓΡΑΜΜΑ" => TokenKind::Program,
        "ΣΤΑΘΕΡΕΣ" => TokenKind::Constants,
        "ΜΕΤΑΒΛΗΤΕΣ" => TokenKind::Variables,
        "ΑΡΧΗ" => TokenKind::Begin,
        "ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ" => TokenKind::EndProgram,
        "ΔΙΑΔΙΚΑΣΙΑ" => TokenKind::Procedure,
        "ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ" => TokenKind::EndProcedure,
        "ΣΥΝΑΡΤΗΣΗ" => TokenKind::Function,
        "ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ" => TokenKind::EndFunction,

        "ΑΚΕΡΑΙΕΣ" => TokenKind::IntegerType,
        "ΠΡΑΓΜΑΤΙΚΕΣ" => TokenKind::RealType,
        "ΧΑΡΑΚΤΗΡΕΣ" => TokenKind::CharacterType,
        "ΛΟΓΙΚΕΣ" => TokenKind::BooleanType,

        "ΑΝ" => TokenKind::If,
        "ΤΟΤΕ" => TokenKind::Then,
        "ΑΛΛΙΩΣ_ΑΝ" => TokenKind::ElseIf,
        "ΑΛΛΙΩΣ" => TokenKind::Else,
        "ΤΕΛΟΣ_ΑΝ" => TokenKind::EndIf,
        "ΟΣΟ" => TokenKind::While,
        "ΕΠΑΝΑΛΑΒΕ" => TokenKind::Repeat,
        "ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ" => TokenKind::EndWhile,
        "ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ" => TokenKind::DoRepeat,
        "ΜΕΧΡΙΣ_ΟΤΟΥ" => TokenKind::Until,
        "ΓΙΑ" => TokenKind::For,
        "ΑΠΟ" => TokenKind::From,
        "ΜΕΧΡΙ" => TokenKind::To,
        "ΜΕ_ΒΗΜΑ" => TokenKind::WithStep,
        "ΕΠΙΛΕΞΕ" => TokenKind::Select,
        "ΠΕΡΙΠΤΩΣΗ" => TokenKind::Case,
        "ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ" => TokenKind::EndSelect,

        "ΚΑΛΕΣΕ" => TokenKind::Call,
        "ΔΙΑΒΑΣΕ" => TokenKind::Read,
        "ΓΡΑΨΕ" => TokenKind::Write,
        "ΕΠΙΣΤΡΕΨΕ" => TokenKind::Return,

        "ΚΑΙ" => TokenKind::And,
        "Η" => TokenKind::Or,
        "ΟΧΙ" => TokenKind::Not,

        "DIV" => TokenKind::Div,
        "MOD" => TokenKind::Mod,

        "ΑΛΗΘΗΣ" => TokenKind::True,
        "ΨΕΥΔΗΣ" => TokenKind::False,

        _ => return None,
    })
}

/// Tokenizes ΓΛΩΣΣΑ source text, reporting lexical errors through a
/// [`glossa_util::diagnostic::Handler`] rather than failing eagerly; callers
/// decide whether to keep consuming tokens after an error has been emitted.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    handler: &'a mut Handler,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
        Self {
            cursor: Cursor::new(source),
            handler,
        }
    }

    /// Produces the full token stream, always ending with one `Eof` token.
    /// Lexical errors are recorded on the handler but do not stop scanning;
    /// this lets `glossa check` report more than one bad character per run.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                '!' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_trivia();
        let line = self.cursor.line();
        let start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                line,
            };
        }

        let c = self.cursor.current_char();
        let kind = match c {
            '"' => self.lex_delimited_string('"', '"', line),
            '«' => self.lex_delimited_string('«', '»', line),
            '0'..='9' => self.lex_number(),
            c if unicode::is_ident_start(c) => self.lex_identifier_or_keyword(),
            '<' => {
                self.cursor.advance();
                if self.cursor.match_char('-') {
                    TokenKind::Assign
                } else if self.cursor.match_char('=') {
                    TokenKind::LessEq
                } else if self.cursor.match_char('>') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '=' => {
                self.cursor.advance();
                TokenKind::Eq
            }
            '+' => {
                self.cursor.advance();
                TokenKind::Plus
            }
            '-' => {
                self.cursor.advance();
                TokenKind::Minus
            }
            '*' => {
                self.cursor.advance();
                TokenKind::Star
            }
            '/' => {
                self.cursor.advance();
                TokenKind::Slash
            }
            '(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            ')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            ',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            '[' => {
                self.cursor.advance();
                TokenKind::LBracket
            }
            ']' => {
                self.cursor.advance();
                TokenKind::RBracket
            }
            ':' => {
                self.cursor.advance();
                TokenKind::Colon
            }
            other => {
                self.cursor.advance();
                self.report_error(line, format!("μη αναμενόμενος χαρακτήρας '{other}'"));
                TokenKind::Eof
            }
        };

        let lexeme = self.cursor.slice_from(start).to_string();
        Token { kind, lexeme, line }
    }

    fn lex_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.cursor.position();
        while unicode::is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        keyword_from_text(text).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(text)))
    }

    fn lex_number(&mut self) -> TokenKind {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let mut is_real = false;
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            is_real = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        let text = self.cursor.slice_from(start);
        if is_real {
            TokenKind::RealLiteral(text.parse().unwrap_or(0.0))
        } else {
            TokenKind::IntegerLiteral(text.parse().unwrap_or(0))
        }
    }

    fn lex_delimited_string(&mut self, open: char, close: char, line: u32) -> TokenKind {
        self.cursor.advance(); // opening delimiter
        let start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != close {
            self.cursor.advance();
        }
        if self.cursor.is_at_end() {
            self.report_error(line, format!("μη τερματισμένη συμβολοσειρά (άνοιξε με {open})"));
            let text = self.cursor.slice_from(start);
            return TokenKind::StringLiteral(Symbol::intern(text));
        }
        let text = self.cursor.slice_from(start).to_string();
        self.cursor.advance(); // closing delimiter
        TokenKind::StringLiteral(Symbol::intern(&text))
    }

    fn report_error(&mut self, line: u32, message: String) {
        DiagnosticBuilder::error(message)
            .note(format!("γραμμή {line}"))
            .emit(self.handler);
    }
}
