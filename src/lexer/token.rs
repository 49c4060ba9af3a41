//! Token definitions for the translator
//!
//! Tokens are deliberately flat: a kind tag plus the exact source text,
//! rather than one enum variant per operator. Every pass downstream edits
//! tokens in place (retagging a `.` as `->`, inserting `;` and `( * )`
//! wrappers), which is natural with a uniform kind+text representation and
//! awkward with a fully typed token enum.

use std::fmt;

/// Classification tag carried by every [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A name that is not a reserved keyword.
    Identifier,
    /// An integer or decimal literal.
    Number,
    /// A string literal, quotes included in the text.
    StringLit,
    /// A reserved C/C++ word.
    Keyword,
    /// One of the operator characters, or an allowed two-character pair.
    Operator,
    /// One of `( ) [ ] { } ; , .`.
    Punct,
    /// A `#` directive; the text is the whole remainder of the line.
    Preprocessor,
    /// Any other character, passed through verbatim.
    Unknown,
}

/// A lexical unit with its position in the normalized source.
///
/// `line` and `col` are 1-based and refer to the token's first character.
/// `scope_id` is 0 until the scope analyzer assigns the enclosing scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub col: usize,
    pub scope_id: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
            scope_id: 0,
        }
    }

    /// True for a punctuation token with exactly this text.
    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == text
    }

    /// True for an operator token with exactly this text.
    pub fn is_op(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// True for a keyword token with exactly this text.
    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == text
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::StringLit => write!(f, "string literal {}", self.text),
            TokenKind::Keyword => write!(f, "keyword '{}'", self.text),
            TokenKind::Operator => write!(f, "operator '{}'", self.text),
            TokenKind::Punct => write!(f, "'{}'", self.text),
            TokenKind::Preprocessor => write!(f, "preprocessor directive"),
            TokenKind::Unknown => write!(f, "character '{}'", self.text),
        }
    }
}
