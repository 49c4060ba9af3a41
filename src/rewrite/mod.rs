//! Token-stream and per-line rewrite passes
//!
//! The passes run in a fixed order after analysis:
//!
//! - [`enums`]: drop semicolons the input carried between enumerators
//! - [`type_blocks`]: terminate `struct`/`union`/`enum` definitions
//! - [`lines`]: partition the stream into physical lines
//! - [`members`]: per line, rewrite `.` into `->` / `(*base)->` forms
//! - [`semicolons`]: per line, insert the statement terminators the input
//!   dialect omits
//!
//! The stream passes see the whole token sequence because their decisions
//! cross line boundaries (a type body's closer is terminated by looking at
//! the next line's first token). The per-line passes only ever edit within
//! one physical line.

pub mod enums;
pub mod lines;
pub mod members;
pub mod semicolons;
pub mod type_blocks;
