//! Statement, block and function rules.
//! 语句、代码块与函数规则。

use crate::state::{PResult, Parser};
use aspire_syntax::{
    Block, ForStatement, Function, Ident, IfElseStatement, IfStatement, Iterable, Signature,
    Statement, Value, ValueKind,
};

impl<'src> Parser<'src> {
    /// Functions separated by optional whitespace, with space around the list.
    pub(crate) fn parse_program(&mut self) -> PResult<Vec<Function>> {
        self.skip_space();
        let functions = self.separated(
            "functions",
            0,
            Self::parse_function,
            Self::parse_function_separator,
        )?;
        self.skip_space();
        Ok(functions)
    }

    fn parse_function_separator(&mut self) -> PResult<()> {
        self.skip_space();
        Ok(())
    }

    pub(crate) fn parse_function(&mut self) -> PResult<Function> {
        self.rule("function", |p| {
            let signature = p.parse_signature()?;
            p.skip_space();
            let body = p.parse_block()?;
            Ok(Function::from_signature(signature, body))
        })
    }

    pub(crate) fn parse_signature(&mut self) -> PResult<Signature> {
        self.rule("function signature", |p| {
            let start = p.pos();
            let name = p.parse_identifier()?;
            p.skip_space();
            p.expect_str("(", "left parenthesis")?;
            let args = p.parse_identifiers()?;
            p.expect_str(")", "right parenthesis")?;
            Ok(Signature {
                name,
                args,
                span: p.span_from(start),
            })
        })
    }

    fn parse_identifiers(&mut self) -> PResult<Vec<Ident>> {
        self.skip_space();
        let idents = self.separated("identifiers", 0, Self::parse_identifier, Self::parse_comma)?;
        self.skip_space();
        Ok(idents)
    }

    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        self.nested(|p| {
            p.memo_block(|p| {
                p.rule("function block", |p| {
                    let start = p.pos();
                    p.expect_str("{", "left brace")?;
                    p.skip_space();
                    let statements = p.separated(
                        "statements",
                        0,
                        Self::parse_statement,
                        Self::parse_statement_separator,
                    )?;
                    p.skip_space();
                    p.expect_str("}", "right brace")?;
                    Ok(Block {
                        statements,
                        span: p.span_from(start),
                    })
                })
            })
        })
    }

    pub(crate) fn parse_block_value(&mut self) -> PResult<Value> {
        let block = self.parse_block()?;
        let span = block.span;
        Ok(Value::new(ValueKind::Block(block), span))
    }

    /// A line break or a semicolon, with space around it.
    fn parse_statement_separator(&mut self) -> PResult<()> {
        self.first_of(
            "statement separator",
            &[Self::parse_line_break, Self::parse_semicolon],
        )
    }

    fn parse_line_break(&mut self) -> PResult<()> {
        self.skip_inline_space();
        self.expect_str("\n", "new line")?;
        self.skip_space();
        Ok(())
    }

    fn parse_semicolon(&mut self) -> PResult<()> {
        self.skip_space();
        self.expect_str(";", "semicolon")?;
        self.skip_space();
        Ok(())
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<Statement> {
        self.first_of(
            "statement",
            &[
                Self::parse_for_statement,
                Self::parse_if_else_statement,
                Self::parse_if_statement,
                Self::parse_value_statement,
            ],
        )
    }

    fn parse_value_statement(&mut self) -> PResult<Statement> {
        self.parse_value().map(Statement::Value)
    }

    pub(crate) fn parse_for_statement(&mut self) -> PResult<Statement> {
        self.rule("for statement", |p| {
            let start = p.pos();
            p.expect_str("for", "for keyword")?;
            p.skip_space();
            p.expect_str("(", "left parenthesis")?;
            p.skip_space();
            let element = p.parse_identifier()?;
            p.skip_space();
            p.expect_str(":", "colon")?;
            p.skip_space();
            let iterable = p.first_of(
                "iterable",
                &[Self::parse_iterable_identifier, Self::parse_iterable_array],
            )?;
            p.skip_space();
            p.expect_str(")", "right parenthesis")?;
            p.skip_space();
            let body = p.parse_block()?;
            Ok(Statement::For(ForStatement {
                element,
                iterable,
                body,
                span: p.span_from(start),
            }))
        })
    }

    fn parse_iterable_identifier(&mut self) -> PResult<Iterable> {
        self.parse_identifier().map(Iterable::Identifier)
    }

    fn parse_iterable_array(&mut self) -> PResult<Iterable> {
        let (elements, span) = self.parse_array_elements()?;
        Ok(Iterable::Array { elements, span })
    }

    /// `if (condition) block`, shared by both conditional statements.
    fn parse_if_head(&mut self) -> PResult<(Value, Block)> {
        self.expect_str("if", "if keyword")?;
        self.skip_space();
        self.expect_str("(", "left parenthesis")?;
        self.skip_space();
        let condition = self.parse_value()?;
        self.skip_space();
        self.expect_str(")", "right parenthesis")?;
        self.skip_space();
        let body = self.parse_block()?;
        Ok((condition, body))
    }

    pub(crate) fn parse_if_statement(&mut self) -> PResult<Statement> {
        self.rule("if statement", |p| {
            let start = p.pos();
            let (condition, body) = p.parse_if_head()?;
            Ok(Statement::If(IfStatement {
                condition,
                body,
                span: p.span_from(start),
            }))
        })
    }

    pub(crate) fn parse_if_else_statement(&mut self) -> PResult<Statement> {
        self.rule("if-else statement", |p| {
            let start = p.pos();
            let (condition, if_block) = p.parse_if_head()?;
            p.skip_space();
            p.expect_str("else", "else keyword")?;
            p.skip_space();
            let else_block = p.parse_block()?;
            Ok(Statement::IfElse(IfElseStatement {
                condition,
                if_block,
                else_block,
                span: p.span_from(start),
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Grammar, Parsed, Rule};
    use aspire_syntax::{Block, Iterable, Statement, ValueKind};

    fn block(text: &str) -> Block {
        match Grammar::default().parse(Rule::Block, text) {
            Ok(Parsed::Block(block)) => block,
            other => panic!("expected a block from {text:?}, got {other:?}"),
        }
    }

    fn statement(rule: Rule, text: &str) -> Statement {
        match Grammar::default().parse(rule, text) {
            Ok(Parsed::Statement(statement)) => statement,
            other => panic!("expected a statement from {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_blocks() {
        assert_eq!(block("{3;4;5}").statements.len(), 3);
        assert_eq!(block("{\n3\n4;5\n}").statements.len(), 3);
        assert_eq!(block("{}").statements.len(), 0);
        assert_eq!(block("{ \r\n a \r\n b \r\n}").statements.len(), 2);
        assert!(Grammar::default().parse(Rule::Block, "{3 4}").is_err());
        assert!(Grammar::default().parse(Rule::Block, "{3;}").is_err());
    }

    #[test]
    fn test_newline_ends_expression() {
        let block = block("{\n a + b\n c\n}");
        assert_eq!(block.statements.len(), 2);
        let Statement::Value(first) = &block.statements[0] else {
            panic!("not a value statement");
        };
        assert!(first.is_expression());
    }

    #[test]
    fn test_for_statements() {
        let Statement::For(stmt) = statement(Rule::ForStatement, "for (x : xs) { x }") else {
            panic!("not a for statement");
        };
        assert_eq!(stmt.element.name, "x");
        assert!(matches!(stmt.iterable, Iterable::Identifier(_)));

        let Statement::For(stmt) = statement(Rule::Statement, "for(x:[1, 2]){}") else {
            panic!("not a for statement");
        };
        assert!(matches!(
            stmt.iterable,
            Iterable::Array { ref elements, .. } if elements.len() == 2
        ));

        assert!(Grammar::default().parse(Rule::ForStatement, "for(1:[]){}").is_err());
    }

    #[test]
    fn test_if_statements() {
        assert!(matches!(statement(Rule::IfStatement, "if (a < b) { a }"), Statement::If(_)));
        assert!(matches!(statement(Rule::Statement, "if(a){b}"), Statement::If(_)));

        let Statement::IfElse(stmt) = statement(Rule::Statement, "if (a) {b}\nelse {c; d}") else {
            panic!("not an if-else statement");
        };
        assert_eq!(stmt.else_block.statements.len(), 2);
        assert!(Grammar::default().parse(Rule::IfElseStatement, "if (a) {b}").is_err());
    }

    #[test]
    fn test_keyword_prefixed_identifiers_are_values() {
        let Statement::Value(value) = statement(Rule::Statement, "format = 1") else {
            panic!("not a value statement");
        };
        assert!(matches!(value.kind, ValueKind::Assignment { .. }));
    }

    #[test]
    fn test_signatures_and_functions() {
        let grammar = Grammar::default();
        for text in ["f()", "f(a)", "f \n( \n a, a \n)"] {
            let parsed = grammar.parse(Rule::Signature, text);
            assert!(matches!(parsed, Ok(Parsed::Signature(_))), "{text}");
        }
        assert!(grammar.parse(Rule::Signature, "f(1)").is_err());
        assert!(grammar.parse(Rule::Signature, "f(a,)").is_err());

        for text in ["f(){}", "f(a){b}", "f(a,b){b;b}"] {
            let parsed = grammar.parse(Rule::Function, text);
            assert!(matches!(parsed, Ok(Parsed::Function(_))), "{text}");
        }
    }

    #[test]
    fn test_programs() {
        let grammar = Grammar::default();
        let Ok(Parsed::Program(functions)) = grammar.parse(Rule::Program, "f(){}g(){}") else {
            panic!("program did not parse");
        };
        assert_eq!(functions.len(), 2);

        let source = "\n f(a) {\n a\n}\n\n g() {}\n";
        let Ok(Parsed::Program(functions)) = grammar.parse(Rule::Program, source) else {
            panic!("program did not parse");
        };
        assert_eq!(functions[0].args.len(), 1);
        assert_eq!(functions[1].name.name, "g");

        let empty = grammar.parse(Rule::Program, "");
        assert!(matches!(empty, Ok(Parsed::Program(f)) if f.is_empty()));
    }
}
