//! Lexer for C+ source text
//!
//! Converts normalized source text into a flat [`Token`] stream. Comments
//! are dropped during scanning; every other construct survives as a token,
//! including preprocessor lines (kept whole) and characters the lexer does
//! not recognize (kept as [`TokenKind::Unknown`]).
//!
//! The one hard error is the arrow operator: C+ spells every member access
//! with `.`, so a source-level `->` aborts the scan with its position.

pub mod token;

use thiserror::Error;

pub use token::{Token, TokenKind};

/// Fatal scanning errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// The input used the arrow operator, which C+ forbids.
    #[error("'->' is not allowed (line {line}, col {col}); pointers use '.' in C+")]
    ForbiddenArrow { line: usize, col: usize },
}

/// Reserved words: the C89 keyword list plus `inline` and `bool`.
fn is_keyword_word(word: &str) -> bool {
    matches!(
        word,
        "auto"
            | "break"
            | "case"
            | "char"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extern"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "inline"
            | "int"
            | "long"
            | "register"
            | "return"
            | "short"
            | "signed"
            | "sizeof"
            | "static"
            | "struct"
            | "switch"
            | "typedef"
            | "union"
            | "unsigned"
            | "void"
            | "volatile"
            | "while"
            | "bool"
    )
}

fn is_operator_char(ch: char) -> bool {
    "+-*/%=&|!<>^~?:".contains(ch)
}

fn is_punct_char(ch: char) -> bool {
    "()[]{};,.".contains(ch)
}

/// Two-character operators the lexer recognizes. `->` is handled (and
/// rejected) separately before this check.
fn is_two_char_op(first: char, second: char) -> bool {
    matches!(
        (first, second),
        ('+', '+')
            | ('-', '-')
            | ('=', '=')
            | ('!', '=')
            | ('>', '=')
            | ('<', '=')
            | ('+', '=')
            | ('-', '=')
            | ('*', '=')
            | ('/', '=')
            | ('&', '&')
            | ('|', '|')
            | ('&', '=')
            | ('|', '=')
            | ('^', '=')
            | ('<', '<')
            | ('>', '>')
    )
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Scanner over normalized source text.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer. The input is expected to be line-normalized
    /// already (see [`crate::source::normalize_physical_lines`]).
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '#' {
                tokens.push(self.preprocessor_line());
                continue;
            }

            if ch == '/' && self.peek_ahead(1) == Some('/') {
                self.skip_line_comment();
                continue;
            }
            if ch == '/' && self.peek_ahead(1) == Some('*') {
                self.skip_block_comment();
                continue;
            }

            if ch == '"' {
                tokens.push(self.string_literal());
                continue;
            }

            if ch.is_ascii_digit() {
                tokens.push(self.number_literal());
                continue;
            }

            if is_ident_start(ch) {
                tokens.push(self.identifier_or_keyword());
                continue;
            }

            if is_operator_char(ch) {
                tokens.push(self.operator(ch)?);
                continue;
            }

            let (line, col) = (self.line, self.column);
            self.advance();
            let kind = if is_punct_char(ch) {
                TokenKind::Punct
            } else {
                TokenKind::Unknown
            };
            tokens.push(Token::new(kind, ch.to_string(), line, col));
        }

        Ok(tokens)
    }

    /// Scan a `#` directive: the token text is the rest of the physical line.
    fn preprocessor_line(&mut self) -> Token {
        let (line, col) = (self.line, self.column);
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }
        Token::new(TokenKind::Preprocessor, text, line, col)
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip `/* ... */`. An unterminated comment runs to end of input
    /// without error.
    fn skip_block_comment(&mut self) {
        self.advance(); // '/'
        self.advance(); // '*'
        while let Some(ch) = self.peek() {
            if ch == '*' && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    /// Scan a string literal, quotes included. `\` escapes the following
    /// character; an unterminated literal closes at end of input.
    fn string_literal(&mut self) -> Token {
        let (line, col) = (self.line, self.column);
        let mut text = String::new();
        text.push('"');
        self.advance();

        while let Some(ch) = self.peek() {
            if ch == '\\' {
                text.push(ch);
                self.advance();
                if let Some(escaped) = self.peek() {
                    text.push(escaped);
                    self.advance();
                }
            } else if ch == '"' {
                text.push(ch);
                self.advance();
                break;
            } else {
                text.push(ch);
                self.advance();
            }
        }

        Token::new(TokenKind::StringLit, text, line, col)
    }

    /// Scan a number: digits with at most one interior `.`.
    fn number_literal(&mut self) -> Token {
        let (line, col) = (self.line, self.column);
        let mut text = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, text, line, col)
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let (line, col) = (self.line, self.column);
        let mut word = String::new();

        while let Some(ch) = self.peek() {
            if is_ident_char(ch) {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_keyword_word(&word) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, word, line, col)
    }

    /// Scan an operator, preferring two-character pairs. Rejects `->`.
    fn operator(&mut self, first: char) -> Result<Token, LexError> {
        let (line, col) = (self.line, self.column);

        if let Some(second) = self.peek_ahead(1) {
            if first == '-' && second == '>' {
                return Err(LexError::ForbiddenArrow { line, col });
            }
            if is_two_char_op(first, second) {
                self.advance();
                self.advance();
                let mut text = String::new();
                text.push(first);
                text.push(second);
                return Ok(Token::new(TokenKind::Operator, text, line, col));
            }
        }

        self.advance();
        Ok(Token::new(TokenKind::Operator, first.to_string(), line, col))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("int main() { return 0 }");
        assert_eq!(
            texts(&tokens),
            vec!["int", "main", "(", ")", "{", "return", "0", "}"]
        );
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Punct);
        assert_eq!(tokens[6].kind, TokenKind::Number);
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex("int x\n  y");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (1, 5));
        assert_eq!((tokens[2].line, tokens[2].col), (2, 3));
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = lex("int x // trailing\nint y /* block\nspanning */ int z");
        assert_eq!(texts(&tokens), vec!["int", "x", "int", "y", "int", "z"]);
        // the block comment swallowed a newline, so z sits on line 3
        assert_eq!(tokens[5].line, 3);
    }

    #[test]
    fn test_preprocessor_line_is_one_token() {
        let tokens = lex("#include <stdio.h>\nint x");
        assert_eq!(tokens[0].kind, TokenKind::Preprocessor);
        assert_eq!(tokens[0].text, "#include <stdio.h>");
        assert_eq!(tokens[1].text, "int");
    }

    #[test]
    fn test_string_literal_keeps_quotes_and_escapes() {
        let tokens = lex(r#"x = "a \"quoted\" word""#);
        assert_eq!(tokens[2].kind, TokenKind::StringLit);
        assert_eq!(tokens[2].text, r#""a \"quoted\" word""#);
    }

    #[test]
    fn test_unterminated_string_closes_at_eof() {
        let tokens = lex("\"never closed");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::StringLit);
        assert_eq!(tokens[0].text, "\"never closed");
    }

    #[test]
    fn test_number_with_single_dot() {
        let tokens = lex("1.25 1.2.3");
        assert_eq!(texts(&tokens), vec!["1.25", "1.2", ".", "3"]);
        assert_eq!(tokens[2].kind, TokenKind::Punct);
    }

    #[test]
    fn test_two_char_operators() {
        let tokens = lex("a += b << 2 && c != d");
        assert_eq!(
            texts(&tokens),
            vec!["a", "+=", "b", "<<", "2", "&&", "c", "!=", "d"]
        );
        assert!(tokens[1].is_op("+="));
        assert!(tokens[3].is_op("<<"));
    }

    #[test]
    fn test_arrow_is_rejected_with_position() {
        let err = Lexer::new("x = p->y").tokenize().unwrap_err();
        assert_eq!(err, LexError::ForbiddenArrow { line: 1, col: 6 });
    }

    #[test]
    fn test_arrow_inside_string_is_fine() {
        let tokens = lex("s = \"a->b\"");
        assert_eq!(tokens[2].kind, TokenKind::StringLit);
    }

    #[test]
    fn test_arrow_inside_comment_is_fine() {
        let tokens = lex("x // p->y\ny");
        assert_eq!(texts(&tokens), vec!["x", "y"]);
    }

    #[test]
    fn test_unknown_character_passes_through() {
        let tokens = lex("x @ y");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].text, "@");
    }

    #[test]
    fn test_keyword_set_includes_c89_extras() {
        let tokens = lex("inline bool register");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Keyword));
    }
}
