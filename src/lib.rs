//! # Introduction
//!
//! cp2cpp translates C+ — a C-family dialect where statements end at the
//! line break and every member access is spelled with `.` — into
//! C++-compatible text. It is a syntactic rewriter over an unparsed token
//! stream: unrecognized constructs pass through verbatim, and a C++
//! compiler downstream remains the arbiter of whether the program means
//! anything.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Normalizer → Lexer → Scope/Decl Analysis → Token Edits
//!        → Line Split → Member & Semicolon Rewrites → Emitter
//! ```
//!
//! 1. [`source`] — CRLF/CR normalization, backslash-newline splicing and
//!    output-path derivation.
//! 2. [`lexer`] — tokenization with positions; comments dropped; the arrow
//!    operator rejected (C+ spells pointer access with `.`).
//! 3. [`analysis`] — a scope tree plus per-scope variable records (pointer
//!    level, array rank) and the growing known-type registry.
//! 4. [`rewrite`] — the edit passes: enum-body cleanup, type-block
//!    termination, line splitting, member-chain rewriting, semicolon
//!    insertion.
//! 5. [`emit`] — minimal-whitespace token joining.
//! 6. [`translate`] — the per-file driver tying the stages together.
//!
//! ## Dialect notes
//!
//! Member rewriting is scope-driven: a dot is only turned into `->` (or a
//! `(*base)->` form for deeper pointers) when the base identifier resolves
//! to a recorded variable whose effective pointer depth at the dot is
//! nonzero. Function calls in an access chain are treated as opaque, so an
//! access through a pointer-returning call needs explicit parentheses in
//! the source. The known-type registry spans all files of one invocation:
//! a typedef in the first input is visible while translating the last.

pub mod analysis;
pub mod emit;
pub mod lexer;
pub mod rewrite;
pub mod source;
pub mod translate;
