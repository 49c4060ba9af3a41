//! Per-file translation pipeline
//!
//! Runs the stages in their fixed order over one input:
//!
//! ```text
//! bytes → normalize → lex → analyze → enum cleanup → type-block `;`
//!       → split lines → (rewrite members, insert semicolons) per line
//!       → emit → bytes
//! ```
//!
//! Earlier stages complete fully before later ones begin; all per-file
//! state is dropped when the function returns. The only state that
//! outlives a file is the caller's [`KnownTypes`] registry, which later
//! files of the same run keep growing.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::analyze;
use crate::analysis::scope::KnownTypes;
use crate::emit;
use crate::lexer::{LexError, Lexer};
use crate::rewrite::{enums, lines, members, semicolons, type_blocks};
use crate::source;

/// Failures of one file's translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The input used a construct the input dialect forbids.
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Translate one source text to C++-compatible text.
///
/// `types` is the cross-file known-type registry; typedefs and tag names
/// observed here are added to it.
pub fn translate_source(text: &str, types: &mut KnownTypes) -> Result<String, LexError> {
    let normalized = source::normalize_physical_lines(text);
    let mut tokens = Lexer::new(&normalized).tokenize()?;
    let scopes = analyze(&mut tokens, types);

    enums::strip_enum_semicolons(&mut tokens, &scopes);
    type_blocks::terminate_type_blocks(&mut tokens, &scopes);

    let mut lines = lines::split_into_lines(tokens);
    for line in &mut lines {
        let kind = scopes.kind(line.scope_id);
        members::rewrite_member_chains(&mut line.tokens, line.scope_id, &scopes);
        semicolons::insert_semicolon_before_closing_brace(&mut line.tokens, kind, &scopes);
        semicolons::append_line_terminator(&mut line.tokens, kind);
    }

    Ok(emit::emit(&lines))
}

/// Translate one file, writing the sibling `.cpp` output.
///
/// Returns the path written. Input bytes are decoded lossily as UTF-8;
/// output is raw bytes with LF line endings and no BOM.
pub fn translate_file(path: &Path, types: &mut KnownTypes) -> Result<PathBuf, TranslateError> {
    let bytes = fs::read(path).map_err(|source| TranslateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let output = translate_source(&text, types)?;

    let out_path = source::output_path(path);
    fs::write(&out_path, output.as_bytes()).map_err(|source| TranslateError::Write {
        path: out_path.clone(),
        source,
    })?;
    Ok(out_path)
}
