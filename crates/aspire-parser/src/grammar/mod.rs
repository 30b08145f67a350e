//! The Aspire grammar and its entry points.
//! Aspire 语法及其入口。
//!
//! Every named rule can be used as an entry point. A parse only succeeds when
//! the rule consumes the whole input; otherwise the failure tree is diagnosed
//! and the selected cause is returned in a [`ParseError`].

mod composite;
mod expression;
mod literal;
mod statement;

use crate::cause::Cause;
use crate::diagnose::diagnose;
use crate::error::ParseError;
use crate::state::{Parser, RuleFn};
use aspire_syntax::{Block, Function, Ident, Signature, Statement, Value};
use log::{debug, trace};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Parser configuration.
/// 解析器配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// How deeply values and blocks may nest before the parse is aborted.
    pub max_nesting: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_NESTING: usize = 128;
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting: Self::DEFAULT_MAX_NESTING,
        }
    }
}

/// A named grammar rule usable as an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Program,
    Function,
    Signature,
    Block,
    Statement,
    ForStatement,
    IfStatement,
    IfElseStatement,
    Value,
    Expression,
    NonExpression,
    Assignment,
    Array,
    Vector,
    Matrix,
    Enclosed,
    Color,
    Float,
    Integer,
    Boolean,
    Identifier,
}

impl Rule {
    pub const ALL: [Rule; 21] = [
        Rule::Program,
        Rule::Function,
        Rule::Signature,
        Rule::Block,
        Rule::Statement,
        Rule::ForStatement,
        Rule::IfStatement,
        Rule::IfElseStatement,
        Rule::Value,
        Rule::Expression,
        Rule::NonExpression,
        Rule::Assignment,
        Rule::Array,
        Rule::Vector,
        Rule::Matrix,
        Rule::Enclosed,
        Rule::Color,
        Rule::Float,
        Rule::Integer,
        Rule::Boolean,
        Rule::Identifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::Function => "function",
            Rule::Signature => "signature",
            Rule::Block => "block",
            Rule::Statement => "statement",
            Rule::ForStatement => "for-statement",
            Rule::IfStatement => "if-statement",
            Rule::IfElseStatement => "if-else-statement",
            Rule::Value => "value",
            Rule::Expression => "expression",
            Rule::NonExpression => "non-expression",
            Rule::Assignment => "assignment",
            Rule::Array => "array",
            Rule::Vector => "vector",
            Rule::Matrix => "matrix",
            Rule::Enclosed => "enclosed",
            Rule::Color => "color",
            Rule::Float => "float",
            Rule::Integer => "integer",
            Rule::Boolean => "boolean",
            Rule::Identifier => "identifier",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule `{0}`")]
pub struct UnknownRule(pub String);

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// The tree produced by an entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Parsed {
    Program(Vec<Function>),
    Function(Function),
    Signature(Signature),
    Block(Block),
    Statement(Statement),
    Value(Value),
    Identifier(Ident),
}

/// The Aspire grammar.
/// Aspire 语法。
///
/// Holds only configuration; each parse builds its own state, so one grammar
/// can be shared between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grammar {
    pub options: ParseOptions,
}

impl Grammar {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse `text` as `rule`, requiring the whole input to match.
    pub fn parse(&self, rule: Rule, text: &str) -> Result<Parsed, ParseError> {
        debug!("parsing {} bytes as {}", text.len(), rule);
        let parser = Parser::new(text, self.options);
        match rule {
            Rule::Program => parser.complete(Parser::parse_program).map(Parsed::Program),
            Rule::Function => parser.complete(Parser::parse_function).map(Parsed::Function),
            Rule::Signature => parser.complete(Parser::parse_signature).map(Parsed::Signature),
            Rule::Block => parser.complete(Parser::parse_block).map(Parsed::Block),
            Rule::Statement => parser.complete(Parser::parse_statement).map(Parsed::Statement),
            Rule::ForStatement => parser
                .complete(Parser::parse_for_statement)
                .map(Parsed::Statement),
            Rule::IfStatement => parser
                .complete(Parser::parse_if_statement)
                .map(Parsed::Statement),
            Rule::IfElseStatement => parser
                .complete(Parser::parse_if_else_statement)
                .map(Parsed::Statement),
            Rule::Value => parser.complete(Parser::parse_value).map(Parsed::Value),
            Rule::Expression => parser.complete(Parser::parse_expression).map(Parsed::Value),
            Rule::NonExpression => parser
                .complete(Parser::parse_non_expression)
                .map(Parsed::Value),
            Rule::Assignment => parser.complete(Parser::parse_assignment).map(Parsed::Value),
            Rule::Array => parser.complete(Parser::parse_array).map(Parsed::Value),
            Rule::Vector => parser.complete(Parser::parse_vector).map(Parsed::Value),
            Rule::Matrix => parser.complete(Parser::parse_matrix).map(Parsed::Value),
            Rule::Enclosed => parser.complete(Parser::parse_enclosed).map(Parsed::Value),
            Rule::Color => parser.complete(Parser::parse_color).map(Parsed::Value),
            Rule::Float => parser.complete(Parser::parse_float).map(Parsed::Value),
            Rule::Integer => parser.complete(Parser::parse_integer).map(Parsed::Value),
            Rule::Boolean => parser.complete(Parser::parse_boolean).map(Parsed::Value),
            Rule::Identifier => parser
                .complete(Parser::parse_identifier)
                .map(Parsed::Identifier),
        }
    }

    /// Parse a whole program: zero or more functions.
    pub fn parse_program(&self, text: &str) -> Result<Vec<Function>, ParseError> {
        Parser::new(text, self.options).complete(Parser::parse_program)
    }

    pub fn parse_function(&self, text: &str) -> Result<Function, ParseError> {
        Parser::new(text, self.options).complete(Parser::parse_function)
    }

    pub fn parse_block(&self, text: &str) -> Result<Block, ParseError> {
        Parser::new(text, self.options).complete(Parser::parse_block)
    }

    pub fn parse_statement(&self, text: &str) -> Result<Statement, ParseError> {
        Parser::new(text, self.options).complete(Parser::parse_statement)
    }

    pub fn parse_value(&self, text: &str) -> Result<Value, ParseError> {
        Parser::new(text, self.options).complete(Parser::parse_value)
    }

    /// The full failure tree of a failing parse, `None` if `text` parses or
    /// the parse hit the nesting limit.
    pub fn explain(&self, rule: Rule, text: &str) -> Option<Arc<Cause>> {
        self.parse(rule, text).err()?.tree().cloned()
    }
}

impl<'src> Parser<'src> {
    /// Run `entry` and require it to consume the whole input.
    fn complete<T>(mut self, entry: RuleFn<'src, T>) -> Result<T, ParseError> {
        let result = entry(&mut self);

        if let Some(pos) = self.limit_hit() {
            debug!("nesting limit hit at {pos}");
            return Err(ParseError::NestingLimit {
                pos,
                limit: self.options().max_nesting,
            });
        }

        let tree = match result {
            Ok(parsed) if self.at_end() => return Ok(parsed),
            Ok(_) => {
                let pos = self.pos();
                let reason = self
                    .take_swallowed()
                    .filter(|cause| cause.furthest() >= pos);
                trace!("input left at {pos}");
                Cause::trailing(pos, reason)
            }
            Err(cause) => cause,
        };

        let cause = diagnose(&tree);
        debug!("parse failed: {cause}");
        Err(ParseError::Syntax { cause, tree })
    }
}
