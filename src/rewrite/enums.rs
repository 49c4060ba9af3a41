//! Enum-body cleanup
//!
//! Enumerators are comma-separated, so any `;` the input carried inside an
//! enum body would end up between enumerators and break the definition.
//! Later passes never add semicolons into enum scopes; this pass removes
//! the ones the input itself contained.

use crate::analysis::scope::{ScopeKind, ScopeMap};
use crate::lexer::Token;

/// Delete every `;` whose scope is an enum body.
pub fn strip_enum_semicolons(tokens: &mut Vec<Token>, scopes: &ScopeMap) {
    tokens.retain(|t| !(t.is_punct(";") && scopes.kind(t.scope_id) == ScopeKind::Enum));
}
