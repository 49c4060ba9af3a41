//! Physical-line grouping
//!
//! The semicolon and member passes reason per physical line, so the edited
//! token stream is partitioned by source line number here. Each group keeps
//! the scope of its first token as the line's representative scope.

use crate::lexer::Token;

/// The tokens of one physical source line.
#[derive(Debug, Clone)]
pub struct Line {
    pub tokens: Vec<Token>,
    /// Scope id of the line's first token.
    pub scope_id: usize,
}

/// Group consecutive tokens that share a source line number.
pub fn split_into_lines(tokens: Vec<Token>) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    for token in tokens {
        match lines.last_mut() {
            Some(line) if line.tokens[0].line == token.line => line.tokens.push(token),
            _ => lines.push(Line {
                scope_id: token.scope_id,
                tokens: vec![token],
            }),
        }
    }
    lines
}
