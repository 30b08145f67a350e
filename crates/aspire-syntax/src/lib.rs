//! AST and syntax definitions for Aspire.
//!
//! This crate defines the parse tree produced by `aspire-parser`. Every node
//! is immutable once built and carries the span it was parsed from.

mod ast;
mod literal;
mod ops;
mod value;

pub use ast::*;
pub use literal::*;
pub use ops::*;
pub use value::*;
