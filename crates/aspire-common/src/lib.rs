//! Common data structures for the Aspire front end.
//!
//! This crate provides the foundational types used across the Aspire crates:
//! - `Span`: source code location tracking
//! - `LineIndex`: byte offset to line/column lookup for diagnostics

mod line_index;
mod span;

pub use line_index::{LineCol, LineIndex};
pub use span::{BytePos, Span};
