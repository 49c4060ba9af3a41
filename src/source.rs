//! Physical-line normalization and output-path derivation

use std::path::{Path, PathBuf};

/// Normalize line endings and splice continuations: every `\r\n` and lone
/// `\r` becomes `\n`, and a `\` immediately before a newline is removed
/// together with that newline. Nothing else changes, and running the
/// normalization twice gives the same result as running it once.
pub fn normalize_physical_lines(input: &str) -> String {
    let mut unified = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() != Some(&'\n') {
                unified.push('\n');
            }
        } else {
            unified.push(ch);
        }
    }

    let mut spliced = String::with_capacity(unified.len());
    let mut chars = unified.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&'\n') {
            chars.next();
            continue;
        }
        spliced.push(ch);
    }
    spliced
}

/// Sibling output path: same directory and stem, `cpp` extension. A
/// basename without an extension gets `.cpp` appended.
pub fn output_path(input: &Path) -> PathBuf {
    let mut out = input.to_path_buf();
    out.set_extension("cpp");
    out
}
