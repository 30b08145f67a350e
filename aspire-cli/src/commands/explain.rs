//! The `aspire explain` command.
//! `aspire explain` 命令。
//!
//! Prints every failed attempt of a parse as an indented tree, followed by
//! the one cause that diagnosis picked from it.

use super::{Context, read_input};
use aspire_common::LineIndex;
use aspire_parser::{ParseError, Rule};

pub fn run(
    input: &str,
    rule: Rule,
    inline: bool,
    max_lines: usize,
    ctx: &Context,
) -> Result<(), String> {
    let input = read_input(input, inline)?;

    match ctx.grammar.parse(rule, &input.source) {
        Ok(_) => {
            ctx.success(&format!("{} parses as {}", input.name, rule));
            Ok(())
        }
        Err(ParseError::Syntax { cause, tree }) => {
            print!("{}", tree.tree(max_lines));
            let location = LineIndex::new(&input.source).line_col(&input.source, cause.pos());
            println!();
            println!("selected: {} ({})", cause, location);
            Ok(())
        }
        Err(err @ ParseError::NestingLimit { .. }) => Err(err.to_string()),
    }
}
