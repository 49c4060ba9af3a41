//! Scope and declaration analysis
//!
//! A single left-to-right walk over the token stream that, without parsing,
//! works out:
//!
//! - the scope tree (every `{` opens a scope; its kind comes from the most
//!   recent function signature or `struct`/`union`/`enum` head),
//! - which identifiers name variables, with pointer level and array rank,
//! - the growing set of known type names (typedefs and tag names).
//!
//! Declaration detection is deliberately loose. A strict pass handles
//! declarations whose type is recognizable (built-in scalars, known type
//! names, `struct X`); a relaxed pass catches declarators whose type word
//! the translator has never seen, using trailing punctuation as evidence.
//! Nothing here validates the program — a missed declaration only means a
//! member access is left unrewritten.

pub mod scope;

use rustc_hash::FxHashMap;

use crate::lexer::{Token, TokenKind};
use scope::{is_builtin_scalar, KnownTypes, ScopeKind, ScopeMap};

/// One function parameter captured from a signature.
#[derive(Debug, Clone)]
struct Param {
    name: String,
    stars: usize,
}

/// Indices of a matched function-signature shape
/// `TYPE (kw|*|&)* IDENT ( ... ) (kw|IDENT|*|&)* {`.
#[derive(Debug, Clone, Copy)]
struct Signature {
    name: usize,
    lparen: usize,
    rparen: usize,
    /// Index of the body's `{`, when the signature is a definition rather
    /// than a prototype.
    lbrace: Option<usize>,
}

/// A matched relaxed declaration, e.g. `Mesh* buf[16]` with `Mesh` unknown.
#[derive(Debug, Clone)]
struct RelaxedDecl {
    name: String,
    stars: usize,
    arrays: usize,
    /// Index of the lookahead token that confirmed the match; scanning
    /// resumes there.
    resume: usize,
}

/// Walk the token stream once, assigning a scope id to every token and
/// returning the scope tree with its variable tables. `types` persists
/// across calls so typedefs and tags from earlier files stay visible.
pub fn analyze(tokens: &mut [Token], types: &mut KnownTypes) -> ScopeMap {
    Analyzer { tokens, types }.run()
}

struct Analyzer<'t> {
    tokens: &'t mut [Token],
    types: &'t mut KnownTypes,
}

fn tag_kind(token: &Token) -> Option<ScopeKind> {
    if token.kind != TokenKind::Keyword {
        return None;
    }
    match token.text.as_str() {
        "struct" => Some(ScopeKind::Struct),
        "union" => Some(ScopeKind::Union),
        "enum" => Some(ScopeKind::Enum),
        _ => None,
    }
}

fn is_tag_keyword(token: &Token) -> bool {
    tag_kind(token).is_some()
}

impl Analyzer<'_> {
    fn run(&mut self) -> ScopeMap {
        let mut scopes = ScopeMap::new();
        let mut cur = 0usize;
        let mut pending: Option<(ScopeKind, String)> = None;
        let mut params_at_lbrace: FxHashMap<usize, Vec<Param>> = FxHashMap::default();

        let mut i = 0;
        while i < self.tokens.len() {
            self.tokens[i].scope_id = cur;

            if self.tokens[i].is_keyword("typedef") {
                self.observe_typedef(i);
            }

            if let Some(kind) = tag_kind(&self.tokens[i]) {
                let mut name = String::new();
                if let Some(next) = self.tokens.get(i + 1) {
                    if next.is_identifier() {
                        name = next.text.clone();
                        self.types.insert(&name);
                    }
                }
                pending = Some((kind, name));
            }

            if self.is_type_start(i) {
                let sig = self.match_function_signature(i);
                if let Some(sig) = sig {
                    if let Some(lbrace) = sig.lbrace {
                        pending =
                            Some((ScopeKind::Function, self.tokens[sig.name].text.clone()));
                        params_at_lbrace.insert(lbrace, self.parse_params(sig.lparen, sig.rparen));
                    }
                } else {
                    self.scan_declarator_list(i, cur, &mut scopes);
                }
            } else if self.tokens[i].is_identifier() {
                if let Some(decl) = self.match_relaxed_declaration(i) {
                    scopes.record_var(cur, &decl.name, decl.stars, decl.arrays);
                    // the whole declarator belongs to the current scope;
                    // resume at the lookahead token so it is still handled
                    // as a brace or terminator below
                    for t in &mut self.tokens[i + 1..=decl.resume] {
                        t.scope_id = cur;
                    }
                    i = decl.resume;
                }
            }

            let token = &self.tokens[i];
            if token.is_punct("{") {
                let (kind, name) = pending.take().unwrap_or((ScopeKind::Block, String::new()));
                cur = scopes.open(cur, kind, name);
                if let Some(params) = params_at_lbrace.remove(&i) {
                    for p in &params {
                        scopes.record_var(cur, &p.name, p.stars, 0);
                    }
                }
            } else if token.is_punct("}") {
                if let Some(parent) = scopes.parent(cur) {
                    cur = parent;
                }
                pending = None;
            } else if token.is_punct(";") {
                // a statement ended before any brace opened, so a pending
                // head (e.g. a forward declaration) introduces no scope
                pending = None;
            }

            i += 1;
        }

        scopes
    }

    /// `typedef` makes the last identifier before the statement's `;` (or a
    /// stray `}`) a known type name.
    fn observe_typedef(&mut self, start: usize) {
        let mut last_ident: Option<usize> = None;
        for j in start + 1..self.tokens.len() {
            let t = &self.tokens[j];
            if t.is_punct(";") || t.is_punct("}") {
                break;
            }
            if t.is_identifier() {
                last_ident = Some(j);
            }
        }
        if let Some(j) = last_ident {
            let name = self.tokens[j].text.clone();
            self.types.insert(&name);
        }
    }

    /// Does the token at `i` open a type position?
    fn is_type_start(&self, i: usize) -> bool {
        let t = &self.tokens[i];
        match t.kind {
            TokenKind::Identifier => self.types.contains(&t.text),
            TokenKind::Keyword => is_builtin_scalar(&t.text) || is_tag_keyword(t),
            _ => false,
        }
    }

    /// Try to match a function signature starting at the type token.
    /// Returns `None` when the shape does not fit; a match with
    /// `lbrace: None` is a prototype (still suppresses declarator capture).
    fn match_function_signature(&self, type_idx: usize) -> Option<Signature> {
        let toks = &self.tokens;
        let n = toks.len();

        let mut i = type_idx + 1;
        while i < n && (toks[i].kind == TokenKind::Keyword || toks[i].is_op("*") || toks[i].is_op("&"))
        {
            i += 1;
        }
        if !(i < n && toks[i].is_identifier()) {
            return None;
        }
        let name = i;

        if !(i + 1 < n && toks[i + 1].is_punct("(")) {
            return None;
        }
        let lparen = i + 1;

        let mut depth = 0usize;
        let mut j = lparen;
        let mut rparen = None;
        while j < n {
            if toks[j].is_punct("(") {
                depth += 1;
            } else if toks[j].is_punct(")") {
                depth -= 1;
                if depth == 0 {
                    rparen = Some(j);
                    j += 1;
                    break;
                }
            }
            j += 1;
        }
        let rparen = rparen?;

        while j < n
            && (toks[j].kind == TokenKind::Keyword
                || toks[j].is_identifier()
                || toks[j].is_op("*")
                || toks[j].is_op("&"))
        {
            j += 1;
        }
        let lbrace = if j < n && toks[j].is_punct("{") {
            Some(j)
        } else {
            None
        };

        Some(Signature {
            name,
            lparen,
            rparen,
            lbrace,
        })
    }

    /// Capture a comma-separated declarator list `(*)* IDENT ([...])*`
    /// following a recognized type at `start`.
    fn scan_declarator_list(&self, start: usize, scope: usize, scopes: &mut ScopeMap) {
        let toks = &self.tokens;
        let n = toks.len();
        let mut j = start;

        if is_tag_keyword(&toks[j]) {
            if j + 1 < n && toks[j + 1].is_identifier() {
                j += 2;
            }
        } else {
            while j < n && (toks[j].kind == TokenKind::Keyword || toks[j].is_identifier()) {
                j += 1;
            }
        }

        loop {
            let mut stars = 0;
            while j < n && toks[j].is_op("*") {
                stars += 1;
                j += 1;
            }
            if !(j < n && toks[j].is_identifier()) {
                break;
            }
            let name = toks[j].text.clone();
            j += 1;

            let mut arrays = 0;
            while j < n && toks[j].is_punct("[") {
                while j < n && !toks[j].is_punct("]") {
                    j += 1;
                }
                if j < n {
                    j += 1;
                }
                arrays += 1;
            }

            scopes.record_var(scope, &name, stars, arrays);

            if j < n && toks[j].is_punct(",") {
                j += 1;
                continue;
            }
            break;
        }
    }

    /// Match a declaration whose type word is unknown, using the trailing
    /// punctuation (`;` `,` `[` `=` `{`) as the deciding evidence:
    /// `(IDENT | struct|union|enum IDENT) (kw|IDENT)* (*)* IDENT ([...])*`.
    fn match_relaxed_declaration(&self, start: usize) -> Option<RelaxedDecl> {
        let toks = &self.tokens;
        let n = toks.len();
        let mut j = start;

        if toks[j].is_identifier() {
            j += 1;
        } else if is_tag_keyword(&toks[j]) {
            if j + 1 < n && toks[j + 1].is_identifier() {
                j += 2;
            } else {
                return None;
            }
        } else {
            return None;
        }

        while j < n && (toks[j].kind == TokenKind::Keyword || toks[j].is_identifier()) {
            j += 1;
        }

        let mut stars = 0;
        while j < n && toks[j].is_op("*") {
            stars += 1;
            j += 1;
        }

        if !(j < n && toks[j].is_identifier()) {
            return None;
        }
        let name = toks[j].text.clone();
        j += 1;

        let mut arrays = 0;
        while j < n && toks[j].is_punct("[") {
            let mut k = j + 1;
            while k < n && !toks[k].is_punct("]") {
                k += 1;
            }
            if k == n {
                break;
            }
            j = k + 1;
            arrays += 1;
        }

        let confirmed = j < n
            && (toks[j].is_punct(";")
                || toks[j].is_punct(",")
                || toks[j].is_punct("[")
                || toks[j].is_punct("{")
                || toks[j].is_op("="));
        if !confirmed {
            return None;
        }

        Some(RelaxedDecl {
            name,
            stars,
            arrays,
            resume: j,
        })
    }

    /// Collect named parameters between a signature's parentheses.
    /// Abstract declarators (no name) are skipped.
    fn parse_params(&self, lparen: usize, rparen: usize) -> Vec<Param> {
        let toks = &self.tokens;
        let mut params = Vec::new();
        let mut i = lparen + 1;

        while i < rparen {
            if toks[i].is_punct(",") {
                i += 1;
                continue;
            }

            let type_start = (toks[i].is_identifier() && self.types.contains(&toks[i].text))
                || (toks[i].kind == TokenKind::Keyword
                    && (is_builtin_scalar(&toks[i].text) || is_tag_keyword(&toks[i])));
            if !type_start {
                i += 1;
                continue;
            }

            let mut j = i;
            if is_tag_keyword(&toks[j]) {
                if j + 1 < rparen && toks[j + 1].is_identifier() {
                    j += 2;
                } else {
                    i += 1;
                    continue;
                }
            } else {
                while j < rparen && (toks[j].kind == TokenKind::Keyword || toks[j].is_identifier())
                {
                    j += 1;
                }
            }

            let mut stars = 0;
            while j < rparen && toks[j].is_op("*") {
                stars += 1;
                j += 1;
            }

            if !(j < rparen && toks[j].is_identifier()) {
                i = j;
                continue;
            }
            params.push(Param {
                name: toks[j].text.clone(),
                stars,
            });
            j += 1;

            while j < rparen && toks[j].is_punct("[") {
                while j < rparen && !toks[j].is_punct("]") {
                    j += 1;
                }
                if j < rparen {
                    j += 1;
                }
            }
            while j < rparen && !toks[j].is_punct(",") {
                j += 1;
            }
            i = j;
        }

        params
    }
}
