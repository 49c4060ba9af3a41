//! Statement termination
//!
//! The input dialect ends statements at the end of the physical line. Two
//! edits per line restore C++ form:
//!
//! - a `;` is inserted before a mid-line `}` when the preceding token reads
//!   as the end of a value (`int f() { return 3 }` → `{ return 3; }`),
//! - a `;` is appended when the line as a whole needs a terminator.
//!
//! Enum bodies are exempt from both: enumerators are comma-separated and
//! the definition's own `;` is handled by the type-block pass. A `}` that
//! ends an initializer list (`x = { 1, 2 }`) is also left alone — the list
//! takes its terminator after the brace, never inside it.

use crate::analysis::scope::{ScopeKind, ScopeMap};
use crate::lexer::{Token, TokenKind};

/// Does `token` read as the end of a value expression?
fn is_value_closing(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::Number | TokenKind::StringLit | TokenKind::Operator
    ) || token.is_punct(")")
        || token.is_punct("]")
}

/// Does the `}` at `close` end a brace group opened by `= {` on this line?
fn closes_initializer_list(line: &[Token], close: usize) -> bool {
    let mut depth = 0usize;
    for k in (0..=close).rev() {
        if line[k].is_punct("}") {
            depth += 1;
        } else if line[k].is_punct("{") {
            depth -= 1;
            if depth == 0 {
                return k > 0 && line[k - 1].is_op("=");
            }
        }
    }
    false
}

/// Insert `;` before every statement-closing `}` whose predecessor closes a
/// value. Braces that end an enum body or an initializer list are skipped.
pub fn insert_semicolon_before_closing_brace(
    line: &mut Vec<Token>,
    scope_kind: ScopeKind,
    scopes: &ScopeMap,
) {
    if scope_kind == ScopeKind::Enum {
        return;
    }
    let mut i = 1;
    while i < line.len() {
        if line[i].is_punct("}")
            && scopes.kind(line[i].scope_id) != ScopeKind::Enum
            && !closes_initializer_list(line, i)
        {
            let prev = &line[i - 1];
            if !prev.is_punct(";") && !prev.is_punct("{") && is_value_closing(prev) {
                let mut semi = prev.clone();
                semi.kind = TokenKind::Punct;
                semi.text = ";".to_string();
                line.insert(i, semi);
                i += 1;
            }
        }
        i += 1;
    }
}

/// Does this line need a trailing `;`?
pub fn needs_terminator(line: &[Token], scope_kind: ScopeKind) -> bool {
    let (Some(first), Some(last)) = (line.first(), line.last()) else {
        return false;
    };
    if scope_kind == ScopeKind::Enum {
        return false;
    }
    if first.kind == TokenKind::Preprocessor {
        return false;
    }

    // a line closing with `}` is a block or type close, except for an
    // initializer list `x = { ... }`
    if last.is_punct("}") {
        let body = &line[..line.len() - 1];
        let has_eq = body.iter().any(|t| t.is_op("="));
        let has_lbrace = body.iter().any(|t| t.is_punct("{"));
        return has_eq && has_lbrace;
    }

    if last.is_punct("{") || last.is_punct(";") {
        return false;
    }

    // `if (...)`, `for (...)` and friends govern the next line
    let has_control = line.iter().any(|t| {
        t.kind == TokenKind::Keyword && matches!(t.text.as_str(), "if" | "for" | "while" | "switch")
    });
    if has_control && last.is_punct(")") {
        return false;
    }

    matches!(
        last.kind,
        TokenKind::Identifier | TokenKind::Number | TokenKind::StringLit
    ) || last.is_punct(")")
        || last.is_punct("]")
}

/// Append the line's `;` when [`needs_terminator`] says so.
pub fn append_line_terminator(line: &mut Vec<Token>, scope_kind: ScopeKind) {
    if !needs_terminator(line, scope_kind) {
        return;
    }
    let semi = match line.last() {
        Some(last) => {
            let mut semi = last.clone();
            semi.kind = TokenKind::Punct;
            semi.text = ";".to_string();
            semi.col = last.col + 1;
            semi
        }
        None => return,
    };
    line.push(semi);
}
