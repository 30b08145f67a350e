//! The `aspire repl` command.

use super::{Context, Input, report};
use aspire_parser::Rule;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub fn run(rule: Rule, ctx: &Context) -> Result<(), String> {
    println!("Aspire REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;
    let mut rule = rule;

    loop {
        let readline = rl.readline(&format!("{}> ", rule));
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // REPL commands
                if let Some(command) = line.strip_prefix(':') {
                    let mut words = command.split_whitespace();
                    match (words.next(), words.next()) {
                        (Some("quit" | "q"), _) => break,
                        (Some("help" | "h"), _) => {
                            println!("Commands:");
                            println!("  :help, :h         Show this help");
                            println!("  :quit, :q         Exit the REPL");
                            println!("  :rule <name>      Parse lines as another rule");
                            println!("  :rules            List rule names");
                        }
                        (Some("rules"), _) => {
                            let names: Vec<_> = Rule::ALL.iter().map(Rule::as_str).collect();
                            println!("{}", names.join(", "));
                        }
                        (Some("rule"), Some(name)) => match name.parse::<Rule>() {
                            Ok(next) => rule = next,
                            Err(e) => eprintln!("{}", e),
                        },
                        _ => println!("Unknown command: {}", line),
                    }
                    continue;
                }

                match ctx.grammar.parse(rule, line) {
                    Ok(parsed) => println!("{:#?}", parsed),
                    Err(err) => {
                        let input = Input {
                            name: "<repl>".to_string(),
                            source: line.to_string(),
                        };
                        report(&input, &err)?;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
