//! Type-block termination
//!
//! A `struct`/`union`/`enum` definition must end with `;` in C++. The input
//! dialect lets the closer stand alone, so this pass appends one after every
//! type body's `}` — unless a declarator (`} Name`, `} *p`, `} (...)`,
//! `} [...]`) or an explicit `;` already follows. Preprocessor lines between
//! the closer and the declarator are looked through.

use crate::analysis::scope::{ScopeKind, ScopeMap};
use crate::lexer::{Token, TokenKind};

/// Insert a `;` after each type body's `}` that has no declarator behind it.
/// Running the pass again on its own output changes nothing.
pub fn terminate_type_blocks(tokens: &mut Vec<Token>, scopes: &ScopeMap) {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].is_punct("}")
            && matches!(
                scopes.kind(tokens[i].scope_id),
                ScopeKind::Struct | ScopeKind::Union | ScopeKind::Enum
            )
        {
            let mut j = i + 1;
            while j < tokens.len() && tokens[j].kind == TokenKind::Preprocessor {
                j += 1;
            }

            let declarator_follows = tokens.get(j).is_some_and(|next| {
                next.is_identifier()
                    || next.is_op("*")
                    || next.is_punct("(")
                    || next.is_punct("[")
                    || next.is_punct(";")
            });

            if !declarator_follows {
                let mut semi = tokens[i].clone();
                semi.kind = TokenKind::Punct;
                semi.text = ";".to_string();
                tokens.insert(i + 1, semi);
                i += 1;
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::analysis::scope::KnownTypes;
    use crate::lexer::Lexer;

    fn terminated(source: &str) -> Vec<String> {
        let mut tokens = Lexer::new(source).tokenize().unwrap();
        let mut types = KnownTypes::new();
        let scopes = analyze(&mut tokens, &mut types);
        terminate_type_blocks(&mut tokens, &scopes);
        tokens.into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_bare_struct_close_gains_semicolon() {
        assert_eq!(
            terminated("struct S { int x; }"),
            vec!["struct", "S", "{", "int", "x", ";", "}", ";"]
        );
    }

    #[test]
    fn test_already_terminated_definition_is_unchanged() {
        let once = terminated("struct S { int x; };");
        assert_eq!(once, vec!["struct", "S", "{", "int", "x", ";", "}", ";"]);
    }

    #[test]
    fn test_declarator_after_close_suppresses_insertion() {
        assert_eq!(
            terminated("struct S { int x; } instance;"),
            vec!["struct", "S", "{", "int", "x", ";", "}", "instance", ";"]
        );
        assert_eq!(
            terminated("struct S { int x; } *p;"),
            vec!["struct", "S", "{", "int", "x", ";", "}", "*", "p", ";"]
        );
    }

    #[test]
    fn test_function_body_close_is_left_alone() {
        assert_eq!(
            terminated("int f() { return; }"),
            vec!["int", "f", "(", ")", "{", "return", ";", "}"]
        );
    }

    #[test]
    fn test_preprocessor_between_close_and_declarator() {
        assert_eq!(
            terminated("enum E { A }\n#endif\nx"),
            // the lookahead skips the directive and finds `x`
            vec!["enum", "E", "{", "A", "}", "#endif", "x"]
        );
    }
}
