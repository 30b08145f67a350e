//! Container and assignment rules.
//!
//! Arrays take any number of values, vectors at least two and matrices at
//! least two vector rows. Those arities are what tells `(1)`, `(1, 2)` and
//! `((1, 2), (3, 4))` apart.

use crate::state::{PResult, Parser};
use aspire_common::Span;
use aspire_syntax::{Value, ValueKind, Vector};

impl<'src> Parser<'src> {
    pub(crate) fn parse_comma(&mut self) -> PResult<()> {
        self.skip_space();
        self.expect_str(",", "comma")?;
        self.skip_space();
        Ok(())
    }

    /// Comma separated values, with optional space around the list.
    fn parse_values(&mut self, min: usize) -> PResult<Vec<Value>> {
        self.skip_space();
        let values = self.separated("values", min, Self::parse_value, Self::parse_comma)?;
        self.skip_space();
        Ok(values)
    }

    pub(crate) fn parse_array_elements(&mut self) -> PResult<(Vec<Value>, Span)> {
        self.rule("array", |p| {
            let start = p.pos();
            p.expect_str("[", "left bracket")?;
            let elements = p.parse_values(0)?;
            p.expect_str("]", "right bracket")?;
            Ok((elements, p.span_from(start)))
        })
    }

    pub(crate) fn parse_array(&mut self) -> PResult<Value> {
        let (elements, span) = self.parse_array_elements()?;
        Ok(Value::new(ValueKind::Array(elements), span))
    }

    fn parse_vector_row(&mut self) -> PResult<Vector> {
        self.rule("vector", |p| {
            let start = p.pos();
            p.expect_str("(", "left parenthesis")?;
            let elements = p.parse_values(2)?;
            p.expect_str(")", "right parenthesis")?;
            Ok(Vector {
                elements,
                span: p.span_from(start),
            })
        })
    }

    pub(crate) fn parse_vector(&mut self) -> PResult<Value> {
        let vector = self.parse_vector_row()?;
        let span = vector.span;
        Ok(Value::new(ValueKind::Vector(vector), span))
    }

    pub(crate) fn parse_matrix(&mut self) -> PResult<Value> {
        self.rule("matrix", |p| {
            let start = p.pos();
            p.expect_str("(", "left parenthesis")?;
            p.skip_space();
            let rows = p.separated("vectors", 2, Self::parse_vector_row, Self::parse_comma)?;
            p.skip_space();
            p.expect_str(")", "right parenthesis")?;
            Ok(Value::new(ValueKind::Matrix(rows), p.span_from(start)))
        })
    }

    pub(crate) fn parse_enclosed(&mut self) -> PResult<Value> {
        self.rule("parenthesis-enclosed value", |p| {
            let start = p.pos();
            p.expect_str("(", "left parenthesis")?;
            p.skip_space();
            let value = p.parse_value()?;
            p.skip_space();
            p.expect_str(")", "right parenthesis")?;
            Ok(Value::new(
                ValueKind::Enclosed(Box::new(value)),
                p.span_from(start),
            ))
        })
    }

    pub(crate) fn parse_assignment(&mut self) -> PResult<Value> {
        self.rule("assignment", |p| {
            let start = p.pos();
            let target = p.parse_identifier()?;
            p.skip_space();
            p.expect_str("=", "equals sign")?;
            p.skip_space();
            let value = p.parse_value()?;
            Ok(Value::new(
                ValueKind::Assignment {
                    target,
                    value: Box::new(value),
                },
                p.span_from(start),
            ))
        })
    }
}
