//! Member-access rewriting
//!
//! The input dialect spells every member access with `.`. For each access
//! chain this pass computes the base's effective pointer depth at the dot
//! and picks the C++ spelling:
//!
//! - depth 0: the dot stays a dot,
//! - depth 1: the dot becomes `->`,
//! - depth d > 1: the base is wrapped `(*...)` d−1 times, then `->`.
//!
//! The depth starts from the declared pointer level and array rank of the
//! base identifier. A postfix `[...]` consumes one rank (or one level once
//! the rank is exhausted); a postfix call is opaque and leaves the depth
//! untouched. After an arrow the member is treated as a plain sub-object —
//! field types are unknown here, so any later dots in the chain stay dots.
//!
//! Identifiers with no variable record in scope are never rewritten.

use crate::analysis::scope::ScopeMap;
use crate::lexer::{Token, TokenKind};

/// Rewrite every access chain on one line, resolving bases against
/// `scope_id` and its ancestors.
pub fn rewrite_member_chains(line: &mut Vec<Token>, scope_id: usize, scopes: &ScopeMap) {
    let mut i = 0;
    while i < line.len() {
        if !line[i].is_identifier() {
            i += 1;
            continue;
        }
        let Some(info) = scopes.resolve(scope_id, &line[i].text) else {
            i += 1;
            continue;
        };

        let mut cur_ptr = info.pointer_level;
        let mut cur_arr = info.array_rank;
        let mut j = i + 1;

        // postfix walk over subscripts and calls
        loop {
            if j < line.len() && line[j].is_punct("[") {
                let Some(close) = matching_bracket(line, j, "[", "]") else {
                    break;
                };
                if cur_arr > 0 {
                    cur_arr -= 1;
                } else if cur_ptr > 0 {
                    cur_ptr -= 1;
                }
                j = close + 1;
            } else if j < line.len() && line[j].is_punct("(") {
                let Some(close) = matching_bracket(line, j, "(", ")") else {
                    break;
                };
                j = close + 1;
            } else {
                break;
            }
        }

        // rewrite the `. IDENT` chain
        while j + 1 < line.len() && line[j].is_punct(".") && line[j + 1].is_identifier() {
            if cur_ptr == 0 {
                j += 2;
                continue;
            }

            // dereference down to a single indirection: each wrap turns
            // `base... .` into `( * base... ) .`
            while cur_ptr > 1 {
                let mut lpar = line[i].clone();
                lpar.kind = TokenKind::Punct;
                lpar.text = "(".to_string();
                let mut star = line[i].clone();
                star.kind = TokenKind::Operator;
                star.text = "*".to_string();
                line.insert(i, lpar);
                line.insert(i + 1, star);
                j += 2;

                let mut rpar = line[j].clone();
                rpar.kind = TokenKind::Punct;
                rpar.text = ")".to_string();
                line.insert(j, rpar);
                j += 1;

                cur_ptr -= 1;
            }

            line[j].kind = TokenKind::Operator;
            line[j].text = "->".to_string();
            cur_ptr = 0;
            j += 2;
        }

        i = j;
    }
}

/// Index of the close bracket matching the open one at `open`, if the line
/// contains it.
fn matching_bracket(line: &[Token], open: usize, open_text: &str, close_text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for k in open..line.len() {
        if line[k].is_punct(open_text) {
            depth += 1;
        } else if line[k].is_punct(close_text) {
            depth -= 1;
            if depth == 0 {
                return Some(k);
            }
        }
    }
    None
}
