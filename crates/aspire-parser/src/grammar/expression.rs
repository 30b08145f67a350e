//! Value and expression rules.
//! 值与表达式规则。
//!
//! Infix expressions are parsed by precedence climbing over non-expression
//! operands. All operators are left-associative.

use crate::cause::Cause;
use crate::state::{PResult, Parser, ValueRule};
use aspire_syntax::{BinOp, UnaryOp, Value, ValueKind};

/// Operator spellings in scan order: longer spellings before their prefixes.
const OPERATORS: [(&str, BinOp); 19] = [
    ("||", BinOp::Or),
    ("^^", BinOp::Xor),
    ("&&", BinOp::And),
    ("|", BinOp::BitOr),
    ("^", BinOp::BitXor),
    ("&", BinOp::BitAnd),
    ("==", BinOp::Eq),
    ("!=", BinOp::Ne),
    ("<<", BinOp::Shl),
    (">>", BinOp::Shr),
    ("<=", BinOp::Le),
    (">=", BinOp::Ge),
    ("<", BinOp::Lt),
    (">", BinOp::Gt),
    ("+", BinOp::Add),
    ("-", BinOp::Sub),
    ("*", BinOp::Mul),
    ("/", BinOp::Div),
    ("%", BinOp::Rem),
];

/// Binding strength used by the climb: the tightest level is the strongest.
fn strength(op: BinOp) -> u8 {
    BinOp::LOOSEST + 1 - op.precedence()
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_value(&mut self) -> PResult<Value> {
        self.nested(|p| {
            p.memo_value(ValueRule::Value, |p| {
                p.first_of("value", &[Self::parse_expression, Self::parse_non_expression])
            })
        })
    }

    pub(crate) fn parse_expression(&mut self) -> PResult<Value> {
        self.memo_value(ValueRule::Expression, |p| {
            p.first_of("expression", &[Self::parse_prefixed, Self::parse_infix])
        })
    }

    pub(crate) fn parse_non_expression(&mut self) -> PResult<Value> {
        self.memo_value(ValueRule::NonExpression, |p| {
            p.first_of(
                "non-expression",
                &[
                    Self::parse_block_value,
                    Self::parse_assignment,
                    Self::parse_array,
                    Self::parse_matrix,
                    Self::parse_vector,
                    Self::parse_color,
                    Self::parse_float,
                    Self::parse_integer,
                    Self::parse_boolean,
                    Self::parse_identifier_value,
                    Self::parse_enclosed,
                ],
            )
        })
    }

    /// `-a`, `!a`. A sign glued to a number literal belongs to the literal.
    fn parse_prefixed(&mut self) -> PResult<Value> {
        self.rule("unary expression", |p| {
            let start = p.pos();
            let op = match p.peek() {
                Some('+') => UnaryOp::Plus,
                Some('-') => UnaryOp::Minus,
                Some('!') => UnaryOp::Not,
                _ => return Err(Cause::expected(start, "prefix operator")),
            };
            p.eat_if(|_| true);
            p.not_ahead("number literal", |p| {
                p.first_of("number literal", &[Self::parse_float, Self::parse_integer])
            })?;
            let operand = p.parse_infix()?;
            Ok(Value::new(
                ValueKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                p.span_from(start),
            ))
        })
    }

    fn parse_infix(&mut self) -> PResult<Value> {
        self.memo_value(ValueRule::Infix, |p| {
            p.first_of(
                "infix expression",
                &[Self::parse_operator_chain, Self::parse_non_expression],
            )
        })
    }

    /// Only climb when a non-expression followed by an operator is ahead.
    fn parse_operator_chain(&mut self) -> PResult<Value> {
        self.ahead("infix expression", |p| {
            p.parse_non_expression()?;
            p.skip_space();
            p.parse_operator()
        })?;
        self.climb(1)
    }

    /// Parse operands joined by operators binding at least `min_strength`.
    ///
    /// Space after the last operand is left alone so a line break can still
    /// end the statement.
    fn climb(&mut self, min_strength: u8) -> PResult<Value> {
        let depth = self.nesting();
        let result = self.climb_operands(min_strength);
        self.restore_nesting(depth);
        result
    }

    /// Every fold puts the tree built so far one level deeper, so each one
    /// counts against the nesting limit.
    fn climb_operands(&mut self, min_strength: u8) -> PResult<Value> {
        self.skip_space();
        let mut left = self.parse_non_expression()?;

        loop {
            let before = self.pos();
            self.skip_space();
            let op = match self.parse_operator() {
                Ok(op) => op,
                Err(cause) => {
                    self.reset(before);
                    self.swallow(cause);
                    break;
                }
            };
            if strength(op) < min_strength {
                self.reset(before);
                break;
            }

            self.deepen()?;
            let right = self.climb(strength(op) + 1)?;
            let span = left.span.merge(right.span);
            left = Value::new(
                ValueKind::Infix {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_operator(&mut self) -> PResult<BinOp> {
        let start = self.pos();
        for (spelling, op) in OPERATORS {
            let Some(after) = self.rest().strip_prefix(spelling) else {
                continue;
            };
            // A bare `<` or `>` must not run into another angle bracket.
            let angled = after.starts_with(|c: char| matches!(c, '<' | '>'));
            if matches!(op, BinOp::Lt | BinOp::Gt) && angled {
                continue;
            }
            self.eat_str(spelling);
            return Ok(op);
        }
        Err(Cause::expected(start, "infix operator"))
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Grammar, Parsed, Rule};
    use aspire_syntax::{BinOp, UnaryOp, Value, ValueKind};

    fn parse(rule: Rule, text: &str) -> Value {
        match Grammar::default().parse(rule, text) {
            Ok(Parsed::Value(value)) => value,
            other => panic!("expected a value from {text:?}, got {other:?}"),
        }
    }

    fn top_op(text: &str) -> BinOp {
        parse(Rule::Expression, text)
            .infix_op()
            .unwrap_or_else(|| panic!("{text} is not an infix expression"))
    }

    #[test]
    fn test_every_operator() {
        for (text, op) in [
            ("a*b", BinOp::Mul),
            ("a/b", BinOp::Div),
            ("a%b", BinOp::Rem),
            ("a+b", BinOp::Add),
            ("a-b", BinOp::Sub),
            ("a<<b", BinOp::Shl),
            ("a>>b", BinOp::Shr),
            ("a<b", BinOp::Lt),
            ("a>b", BinOp::Gt),
            ("a<=b", BinOp::Le),
            ("a>=b", BinOp::Ge),
            ("a==b", BinOp::Eq),
            ("a!=b", BinOp::Ne),
            ("a&b", BinOp::BitAnd),
            ("a^b", BinOp::BitXor),
            ("a|b", BinOp::BitOr),
            ("a&&b", BinOp::And),
            ("a^^b", BinOp::Xor),
            ("a||b", BinOp::Or),
        ] {
            assert_eq!(top_op(text), op, "{text}");
        }
    }

    #[test]
    fn test_looser_operator_is_on_top() {
        for (text, op) in [
            ("a*b+c", BinOp::Add),
            ("a+b>>c", BinOp::Shr),
            ("a>>b>c", BinOp::Gt),
            ("a<b==c", BinOp::Eq),
            ("a==b&c", BinOp::BitAnd),
            ("a&b^c", BinOp::BitXor),
            ("a^b|c", BinOp::BitOr),
            ("a|b&&c", BinOp::And),
            ("a&&b^^c", BinOp::Xor),
            ("a^^b||c", BinOp::Or),
            ("a+b*c", BinOp::Add),
        ] {
            assert_eq!(top_op(text), op, "{text}");
        }
    }

    #[test]
    fn test_left_associative() {
        let value = parse(Rule::Value, "a-b-c");
        let ValueKind::Infix { op, left, right } = value.kind else {
            panic!("not infix");
        };
        assert_eq!(op, BinOp::Sub);
        assert_eq!(left.infix_op(), Some(BinOp::Sub));
        assert!(matches!(right.kind, ValueKind::Identifier(_)));
    }

    #[test]
    fn test_operands_are_any_non_expression() {
        for text in [
            "1*(1, 2)",
            "1+(1, 2)",
            "1>>(1, 2)",
            "1<(1, 2)",
            "1==(1, 2)",
            "1&(1, 2)",
            "1^^(1, 2)",
            "1||(1, 2)",
        ] {
            assert!(parse(Rule::Value, text).is_expression(), "{text}");
        }
        let complex = "(1, 2)*[]+2>>0.3e+10&((1,1),(1,1))^(1+2)|true&&a_3^^#000000||a";
        assert_eq!(top_op(complex), BinOp::Or);
    }

    #[test]
    fn test_spaced_operators() {
        let value = parse(Rule::Value, "a \n+\n b");
        assert_eq!(value.infix_op(), Some(BinOp::Add));
    }

    #[test]
    fn test_unary() {
        for (text, op) in [("-a", UnaryOp::Minus), ("+a", UnaryOp::Plus), ("!a", UnaryOp::Not)] {
            let value = parse(Rule::Expression, text);
            assert!(
                matches!(value.kind, ValueKind::Unary { op: actual, .. } if actual == op),
                "{text}"
            );
        }
        // The sign is part of the literal.
        assert!(matches!(parse(Rule::Value, "-3").kind, ValueKind::Integer(_)));
        assert!(matches!(parse(Rule::Value, "-3.5").kind, ValueKind::Float(_)));

        let ValueKind::Unary { op, operand } = parse(Rule::Value, "-a*b").kind else {
            panic!("not unary");
        };
        assert_eq!(op, UnaryOp::Minus);
        assert_eq!(operand.infix_op(), Some(BinOp::Mul));
    }

    #[test]
    fn test_missing_right_operand() {
        assert!(Grammar::default().parse(Rule::Value, "a*").is_err());
        assert!(Grammar::default().parse(Rule::Value, "a <> b").is_err());
    }
}
