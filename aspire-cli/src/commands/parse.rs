//! The `aspire parse` command.
//! `aspire parse` 命令。

use super::{Context, read_input, report};
use aspire_parser::{Parsed, Rule};

/// Parse the input as `rule` and print the resulting tree.
/// 按 `rule` 解析输入并打印语法树。
pub fn run(input: &str, rule: Rule, inline: bool, json: bool, ctx: &Context) -> Result<(), String> {
    let input = read_input(input, inline)?;
    ctx.info(&format!("parsing {} as {}", input.name, rule));

    let parsed = match ctx.grammar.parse(rule, &input.source) {
        Ok(parsed) => parsed,
        Err(err) => {
            report(&input, &err)?;
            return Err("parse error".to_string());
        }
    };

    println!("{}", render(&parsed, json)?);
    Ok(())
}

/// Pretty debug output, or JSON.
pub fn render(parsed: &Parsed, json: bool) -> Result<String, String> {
    if json {
        serde_json::to_string_pretty(parsed).map_err(|e| format!("cannot serialize tree: {}", e))
    } else {
        Ok(format!("{:#?}", parsed))
    }
}
