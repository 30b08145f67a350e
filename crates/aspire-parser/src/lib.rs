//! Parser for Aspire.
//!
//! This crate provides a backtracking parser that turns Aspire source text
//! straight into the syntax tree, without a separate lexer.
//!
//! ## Error Diagnosis
//!
//! A failed parse produces a tree of [`Cause`]s, one per failed attempt.
//! [`diagnose`] picks the deepest, then right-most leaf of that tree, which
//! is the error reported to the user.

mod cause;
mod diagnose;
mod error;
mod grammar;
mod state;

pub use cause::{Cause, CauseKind, CauseTree};
pub use diagnose::{deepest_leaves, diagnose};
pub use error::ParseError;
pub use grammar::{Grammar, ParseOptions, Parsed, Rule, UnknownRule};

use aspire_syntax::{Function, Value};

/// Parse a program with the default options.
pub fn parse_program(text: &str) -> Result<Vec<Function>, ParseError> {
    Grammar::default().parse_program(text)
}

/// Parse a single value with the default options.
pub fn parse_value(text: &str) -> Result<Value, ParseError> {
    Grammar::default().parse_value(text)
}
