//! Lenient parser for NPC save files.
//!
//! NPC plugins store their data in YAML, but only a small subset of it:
//! nested `key: value` mappings, indented by two spaces, with plain,
//! single-quoted, boolean and numeric scalars. This module reads that
//! subset without ever failing and writes it back out.
//!
//! # Document Structure
//!
//! - One `key: value` pair per line
//! - Two spaces of indentation per nesting level
//! - A key with nothing after the colon opens a nested mapping
//! - `#` starts a comment line
//!
//! Flow collections, anchors, block scalars, sequences and multiple
//! documents per file are not understood. Lines that do not look like
//! `key: value` are skipped.
//!
//! # Usage
//!
//! ```ignore
//! use npconvert::parser::parse;
//!
//! let source = std::fs::read_to_string("saves.yml")?;
//! let doc = parse(&source);
//!
//! for key in doc.get_mapping(&["npc"]).into_iter().flat_map(|m| m.keys()) {
//!     println!("Found: {}", key);
//! }
//! ```

mod emit;
mod lenient;
mod scalar;

pub use emit::emit;
pub use lenient::{parse, INDENT_WIDTH};
pub use scalar::infer_scalar;
