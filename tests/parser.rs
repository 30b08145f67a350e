//! Integration tests for aspire-parser crate.

use aspire_parser::{Grammar, ParseError, ParseOptions, Parsed, Rule, parse_program, parse_value};
use aspire_syntax::{BinOp, Iterable, Statement, UnaryOp, ValueKind};
use std::time::{Duration, Instant};

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_parse_empty_program() {
    assert!(parse_program("").unwrap().is_empty());
    assert!(parse_program(" \n\t\n").unwrap().is_empty());
}

#[test]
fn test_parse_program_with_functions() {
    let source = r#"
main(args) {
  total = 0
  for (x : args) {
    total = total + x
  }
  if (total > 10) {
    big = true
  } else {
    big = false; total = 10
  }
  total
}

helper() { [#fff, #000000, (1, 2), ((1, 0), (0, 1))] }
"#;
    let functions = parse_program(source).unwrap();
    assert_eq!(functions.len(), 2);

    let main = &functions[0];
    assert_eq!(main.name.name, "main");
    assert_eq!(main.args.len(), 1);
    assert_eq!(main.body.statements.len(), 4);
    assert!(matches!(main.body.statements[1], Statement::For(_)));
    assert!(matches!(main.body.statements[2], Statement::IfElse(_)));

    let helper = &functions[1];
    assert!(helper.args.is_empty());
    assert_eq!(helper.span.slice(source), "helper() { [#fff, #000000, (1, 2), ((1, 0), (0, 1))] }");
}

#[test]
fn test_parse_functions_without_separator() {
    let functions = parse_program("f(){}g(){}").unwrap();
    assert_eq!(functions.len(), 2);
}

#[test]
fn test_crlf_line_endings() {
    let functions = parse_program("f() {\r\n  a\r\n  b\r\n}\r\n").unwrap();
    assert_eq!(functions[0].body.statements.len(), 2);
}

#[test]
fn test_for_over_array_literal() {
    let functions = parse_program("f() { for (x : [1, 2, 3]) { x } }").unwrap();
    let Statement::For(stmt) = &functions[0].body.statements[0] else {
        panic!("not a for statement");
    };
    let Iterable::Array { elements, .. } = &stmt.iterable else {
        panic!("not an array");
    };
    assert_eq!(elements.len(), 3);
}

// ============================================================================
// Values and expressions
// ============================================================================

#[test]
fn test_precedence() {
    let value = parse_value("a*b+c").unwrap();
    let ValueKind::Infix { op, left, .. } = value.kind else {
        panic!("not infix");
    };
    assert_eq!(op, BinOp::Add);
    assert_eq!(left.infix_op(), Some(BinOp::Mul));
}

#[test]
fn test_left_associativity() {
    let value = parse_value("a-b-c").unwrap();
    let ValueKind::Infix { left, right, .. } = value.kind else {
        panic!("not infix");
    };
    assert_eq!(left.infix_op(), Some(BinOp::Sub));
    assert!(matches!(right.kind, ValueKind::Identifier(_)));
}

#[test]
fn test_unary_binds_whole_infix() {
    let value = parse_value("-a*b").unwrap();
    let ValueKind::Unary { op, operand } = value.kind else {
        panic!("not unary");
    };
    assert_eq!(op, UnaryOp::Minus);
    assert_eq!(operand.infix_op(), Some(BinOp::Mul));
}

#[test]
fn test_signed_literal_is_not_unary() {
    let ValueKind::Integer(lit) = parse_value("-3").unwrap().kind else {
        panic!("not an integer");
    };
    assert_eq!(lit.value(), Some(-3));
}

#[test]
fn test_container_arity() {
    assert!(matches!(parse_value("(1)").unwrap().kind, ValueKind::Enclosed(_)));
    assert!(matches!(parse_value("(1, 2)").unwrap().kind, ValueKind::Vector(_)));
    assert!(matches!(
        parse_value("((1, 2), (3, 4))").unwrap().kind,
        ValueKind::Matrix(_)
    ));
}

#[test]
fn test_trailing_commas_rejected() {
    for text in ["[1,]", "(1,)", "((1, 2), (3, 4),)"] {
        assert!(parse_value(text).is_err(), "{text}");
    }
    assert!(parse_program("f(a,){}").is_err());
}

#[test]
fn test_spans_cover_source() {
    let source = "x = [1, 2]";
    let value = parse_value(source).unwrap();
    assert_eq!(value.span.slice(source), source);
    let ValueKind::Assignment { target, value } = value.kind else {
        panic!("not an assignment");
    };
    assert_eq!(target.span.slice(source), "x");
    assert_eq!(value.span.slice(source), "[1, 2]");
}

// ============================================================================
// Entry points and limits
// ============================================================================

#[test]
fn test_rule_entry_points() {
    let grammar = Grammar::default();
    assert!(matches!(grammar.parse(Rule::Color, "#abc"), Ok(Parsed::Value(_))));
    assert!(matches!(grammar.parse(Rule::Block, "{}"), Ok(Parsed::Block(_))));
    assert!(grammar.parse(Rule::Integer, "1.0").is_err());
    assert!(grammar.parse(Rule::Statement, "if (a) {}").is_ok());
    assert_eq!("if-else-statement".parse::<Rule>(), Ok(Rule::IfElseStatement));
}

#[test]
fn test_nesting_limit_instead_of_overflow() {
    let grammar = Grammar::new(ParseOptions { max_nesting: 16 });
    let deep = format!("{}1{}", "[".repeat(1000), "]".repeat(1000));
    let err = grammar.parse_value(&deep).unwrap_err();
    assert!(matches!(err, ParseError::NestingLimit { limit: 16, .. }));

    let blocks = format!("f() {}{}", "{".repeat(1000), "}".repeat(1000));
    let err = grammar.parse_program(&blocks).unwrap_err();
    assert!(matches!(err, ParseError::NestingLimit { .. }));
}

#[test]
fn test_long_operator_chain_hits_nesting_limit() {
    let chain = vec!["a"; 100_000].join(" + ");
    let err = parse_value(&chain).unwrap_err();
    assert!(matches!(
        err,
        ParseError::NestingLimit {
            limit: ParseOptions::DEFAULT_MAX_NESTING,
            ..
        }
    ));

    let err = parse_program(&format!("f() {{\n  x = {chain}\n}}\n")).unwrap_err();
    assert!(matches!(err, ParseError::NestingLimit { .. }));
}

#[test]
fn test_operator_chain_within_limit() {
    let chain = vec!["a"; 100].join(" + ");
    let value = parse_value(&chain).unwrap();
    assert_eq!(value.span.slice(&chain), chain);

    let mut depth = 0;
    let mut node = &value;
    while let ValueKind::Infix { left, .. } = &node.kind {
        depth += 1;
        node = left;
    }
    assert_eq!(depth, 99);

    let grammar = Grammar::new(ParseOptions { max_nesting: 2000 });
    let chain = vec!["1"; 1000].join("*");
    assert!(grammar.parse_value(&chain).is_ok());
}

#[test]
fn test_long_statement_list() {
    let body = vec!["x = x + 1"; 20_000].join("\n  ");
    let functions = parse_program(&format!("main(x) {{\n  {body}\n}}\n")).unwrap();
    assert_eq!(functions[0].body.statements.len(), 20_000);

    let body = vec!["a"; 20_000].join("; ");
    let functions = parse_program(&format!("main(a) {{ {body} }}")).unwrap();
    assert_eq!(functions[0].body.statements.len(), 20_000);
}

#[test]
fn test_long_array() {
    let elements = (0..20_000).map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
    let value = parse_value(&format!("[{elements}]")).unwrap();
    let ValueKind::Array(array) = value.kind else {
        panic!("not an array");
    };
    assert_eq!(array.len(), 20_000);
}

#[test]
fn test_nested_parentheses_are_fast() {
    let grammar = Grammar::new(ParseOptions { max_nesting: 64 });
    let nested = format!("{}1{}", "(".repeat(25), ")".repeat(25));

    let start = Instant::now();
    let value = grammar.parse_value(&nested).unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(matches!(value.kind, ValueKind::Enclosed(_)));
}

#[test]
fn test_grammar_is_shareable() {
    fn assert_send_sync<T: Send + Sync + Copy>() {}
    assert_send_sync::<Grammar>();

    let grammar = Grammar::default();
    let handles: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || grammar.parse_value(&format!("[{i}, {i}]")).is_ok()))
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
