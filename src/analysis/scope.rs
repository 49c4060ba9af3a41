//! Scope tree, variable records and the known-type registry
//!
//! The scope tree is a flat arena: nodes live in a `Vec` in creation order
//! (the order of opening braces) and point at their parent by index, with
//! the global scope fixed at index 0. Variable records are a parallel
//! per-scope side table keyed by name.

use rustc_hash::{FxHashMap, FxHashSet};

/// What introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Struct,
    Union,
    Enum,
    Block,
}

/// A node in the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: usize,
    pub parent: Option<usize>,
    pub kind: ScopeKind,
    /// Function or tag name; empty for anonymous tags, blocks and the root.
    pub name: String,
}

/// What is known about one declared name within one scope.
///
/// Re-observation of the same name in the same scope keeps the *minimum*
/// pointer level (ambiguity must not add rewrites) and the *maximum* array
/// rank (the most specific structure seen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInfo {
    /// Count of `*` on the declarator; 0 for a plain object.
    pub pointer_level: usize,
    /// Count of `[...]` suffixes on the declarator.
    pub array_rank: usize,
}

/// The scope tree plus its per-scope variable tables.
#[derive(Debug)]
pub struct ScopeMap {
    scopes: Vec<Scope>,
    vars: Vec<FxHashMap<String, VarInfo>>,
}

impl ScopeMap {
    /// A fresh tree holding only the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                id: 0,
                parent: None,
                kind: ScopeKind::Global,
                name: String::new(),
            }],
            vars: vec![FxHashMap::default()],
        }
    }

    /// Append a child scope and return its id.
    pub fn open(&mut self, parent: usize, kind: ScopeKind, name: String) -> usize {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            id,
            parent: Some(parent),
            kind,
            name,
        });
        self.vars.push(FxHashMap::default());
        id
    }

    pub fn kind(&self, id: usize) -> ScopeKind {
        self.scopes[id].kind
    }

    pub fn parent(&self, id: usize) -> Option<usize> {
        self.scopes[id].parent
    }

    pub fn get(&self, id: usize) -> &Scope {
        &self.scopes[id]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Record one declarator observation in `scope`, merging with any
    /// earlier observation of the same name.
    pub fn record_var(&mut self, scope: usize, name: &str, pointer_level: usize, array_rank: usize) {
        self.vars[scope]
            .entry(name.to_string())
            .and_modify(|v| {
                v.pointer_level = v.pointer_level.min(pointer_level);
                v.array_rank = v.array_rank.max(array_rank);
            })
            .or_insert(VarInfo {
                pointer_level,
                array_rank,
            });
    }

    /// Look a name up from `scope` outward to the root. `None` means the
    /// name was never observed as a variable in any enclosing scope.
    pub fn resolve(&self, scope: usize, name: &str) -> Option<VarInfo> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            if let Some(info) = self.vars[id].get(name) {
                return Some(*info);
            }
            cur = self.scopes[id].parent;
        }
        None
    }
}

impl Default for ScopeMap {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in scalar type words.
pub fn is_builtin_scalar(word: &str) -> bool {
    matches!(
        word,
        "void"
            | "char"
            | "short"
            | "int"
            | "long"
            | "float"
            | "double"
            | "signed"
            | "unsigned"
            | "bool"
    )
}

/// Identifiers that behave as type names.
///
/// Seeded with the built-in scalars and grown monotonically by typedef and
/// tag observations. One registry is shared across all files of a single
/// invocation, so types introduced early are visible to later inputs.
#[derive(Debug, Clone)]
pub struct KnownTypes {
    names: FxHashSet<String>,
}

impl KnownTypes {
    pub fn new() -> Self {
        let names = [
            "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
            "bool",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        Self { names }
    }

    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for KnownTypes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_walks_parents() {
        let mut map = ScopeMap::new();
        let f = map.open(0, ScopeKind::Function, "main".to_string());
        let b = map.open(f, ScopeKind::Block, String::new());
        map.record_var(0, "g", 1, 0);
        map.record_var(f, "p", 2, 0);

        assert_eq!(map.resolve(b, "p").unwrap().pointer_level, 2);
        assert_eq!(map.resolve(b, "g").unwrap().pointer_level, 1);
        assert_eq!(map.resolve(b, "missing"), None);
    }

    #[test]
    fn test_inner_record_shadows_outer() {
        let mut map = ScopeMap::new();
        let f = map.open(0, ScopeKind::Function, "main".to_string());
        map.record_var(0, "x", 2, 0);
        map.record_var(f, "x", 0, 1);

        assert_eq!(
            map.resolve(f, "x").unwrap(),
            VarInfo {
                pointer_level: 0,
                array_rank: 1
            }
        );
        assert_eq!(map.resolve(0, "x").unwrap().pointer_level, 2);
    }

    #[test]
    fn test_reobservation_merges_min_pointer_max_rank() {
        let mut map = ScopeMap::new();
        map.record_var(0, "buf", 2, 0);
        map.record_var(0, "buf", 1, 1);
        map.record_var(0, "buf", 3, 0);

        assert_eq!(
            map.resolve(0, "buf").unwrap(),
            VarInfo {
                pointer_level: 1,
                array_rank: 1
            }
        );
    }

    #[test]
    fn test_known_types_seeded_and_grown() {
        let mut types = KnownTypes::new();
        assert!(types.contains("unsigned"));
        assert!(!types.contains("Vec2"));
        types.insert("Vec2");
        assert!(types.contains("Vec2"));
    }
}
