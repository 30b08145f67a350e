//! The `aspire check` command.
//! `aspire check` 命令。

use super::{Context, read_input, report};
use aspire_common::Span;
use aspire_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, emit};

/// Check that a file parses as a program.
/// 检查文件能否解析为程序。
pub fn run(file: &str, ctx: &Context) -> Result<(), String> {
    let input = read_input(file, false)?;

    let functions = match ctx.grammar.parse_program(&input.source) {
        Ok(functions) => functions,
        Err(err) => {
            report(&input, &err)?;
            return Err("parse error".to_string());
        }
    };

    if functions.is_empty() && !ctx.quiet {
        let diagnostic = Diagnostic::warning(
            DiagnosticKind::Program,
            Span::point(input.source.len()),
            "program defines no functions",
        )
        .with_code(ErrorCode::EmptyProgram);
        emit(&input.source, &input.name, &diagnostic)
            .map_err(|e| format!("cannot write diagnostic: {}", e))?;
    }

    for function in &functions {
        ctx.info(&format!(
            "function `{}` with {} argument(s), {} statement(s)",
            function.name.name,
            function.args.len(),
            function.body.statements.len()
        ));
    }

    ctx.success("OK - No errors found");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspire_parser::Grammar;
    use std::fs;
    use tempfile::TempDir;

    fn ctx() -> Context {
        Context {
            grammar: Grammar::default(),
            verbose: false,
            quiet: true,
        }
    }

    #[test]
    fn test_check_valid_program() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.aspire");
        fs::write(&path, "main(args) {\n  x = 1 + 2\n  if (x > 2) { x } else { 0 }\n}\n").unwrap();

        assert!(run(path.to_str().unwrap(), &ctx()).is_ok());
    }

    #[test]
    fn test_check_invalid_program() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.aspire");
        fs::write(&path, "main() {\n  (1,)\n}\n").unwrap();

        assert_eq!(run(path.to_str().unwrap(), &ctx()), Err("parse error".to_string()));
    }

    #[test]
    fn test_check_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.aspire");

        let err = run(path.to_str().unwrap(), &ctx()).unwrap_err();
        assert!(err.starts_with("cannot read file"));
    }
}
