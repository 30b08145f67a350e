//! CLI command implementations.

pub mod check;
pub mod explain;
pub mod parse;
pub mod repl;

use crate::output;
use aspire_diagnostic::emit;
use aspire_parser::{Grammar, ParseError};
use std::fs;

/// Settings shared by every command.
pub struct Context {
    pub grammar: Grammar,
    pub verbose: bool,
    pub quiet: bool,
}

impl Context {
    pub fn info(&self, msg: &str) {
        if self.verbose && !self.quiet {
            output::info(msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            output::success(msg);
        }
    }
}

/// Source text and the name to report it under.
pub struct Input {
    pub name: String,
    pub source: String,
}

/// Read `input` as a file path, or take it verbatim when `inline` is set.
pub fn read_input(input: &str, inline: bool) -> Result<Input, String> {
    if inline {
        return Ok(Input {
            name: "<inline>".to_string(),
            source: input.to_string(),
        });
    }
    let source =
        fs::read_to_string(input).map_err(|e| format!("cannot read file '{}': {}", input, e))?;
    Ok(Input {
        name: input.to_string(),
        source,
    })
}

/// Render a parse error against its input.
pub fn report(input: &Input, err: &ParseError) -> Result<(), String> {
    emit(&input.source, &input.name, &err.to_diagnostic(&input.source))
        .map_err(|e| format!("cannot write diagnostic: {}", e))
}
