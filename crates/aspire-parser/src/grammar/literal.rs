//! Literal and identifier rules.
//! 字面量与标识符规则。

use crate::cause::Cause;
use crate::state::{PResult, Parser};
use aspire_syntax::{Color, Exponent, FloatLit, Ident, IntLit, Sign, Value, ValueKind};

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

type Fraction = (Option<String>, Option<String>);

impl<'src> Parser<'src> {
    pub(crate) fn parse_identifier(&mut self) -> PResult<Ident> {
        let start = self.pos();
        self.expect_char(is_ident_start, "identifier")?;
        self.eat_while(is_ident_char);
        Ok(Ident::new(self.slice_from(start), self.span_from(start)))
    }

    pub(crate) fn parse_identifier_value(&mut self) -> PResult<Value> {
        let ident = self.parse_identifier()?;
        let span = ident.span;
        Ok(Value::new(ValueKind::Identifier(ident), span))
    }

    pub(crate) fn parse_boolean(&mut self) -> PResult<Value> {
        self.rule("boolean", |p| {
            let start = p.pos();
            let value = if p.eat_str("true") {
                true
            } else if p.eat_str("false") {
                false
            } else {
                return Err(Cause::expected(start, "boolean"));
            };
            // `trueish` is an identifier.
            p.not_ahead("identifier character", |p| {
                p.expect_char(is_ident_char, "identifier character")
            })?;
            Ok(Value::new(ValueKind::Boolean(value), p.span_from(start)))
        })
    }

    pub(crate) fn parse_integer(&mut self) -> PResult<Value> {
        self.rule("integer", |p| {
            let start = p.pos();
            let sign = p.parse_sign();
            let digits = p.parse_number()?.to_string();
            Ok(Value::new(
                ValueKind::Integer(IntLit { sign, digits }),
                p.span_from(start),
            ))
        })
    }

    pub(crate) fn parse_float(&mut self) -> PResult<Value> {
        self.rule("float", |p| {
            let start = p.pos();
            let sign = p.parse_sign();
            let (integer, fraction) =
                p.first_of("fraction", &[Self::parse_point_fraction, Self::parse_bare_fraction])?;
            let exponent = p.optional(Self::parse_exponent);
            let lit = FloatLit {
                sign,
                integer,
                fraction,
                exponent,
            };
            Ok(Value::new(ValueKind::Float(lit), p.span_from(start)))
        })
    }

    pub(crate) fn parse_color(&mut self) -> PResult<Value> {
        self.rule("color", |p| {
            let start = p.pos();
            p.expect_str("#", "hash sign")?;
            let digits_start = p.pos();
            p.first_of("hexadecimal color", &[Self::parse_rgb24, Self::parse_rgb12])?;
            let color = Color {
                digits: p.slice_from(digits_start).to_string(),
            };
            Ok(Value::new(ValueKind::Color(color), p.span_from(start)))
        })
    }

    /// `0`, or a non-zero digit followed by digits.
    fn parse_number(&mut self) -> PResult<&'src str> {
        let start = self.pos();
        if !self.eat_str("0") {
            self.expect_char(|c| matches!(c, '1'..='9'), "number")?;
            self.eat_while(|c| c.is_ascii_digit());
        }
        Ok(self.slice_from(start))
    }

    fn parse_sign(&mut self) -> Option<Sign> {
        self.eat_if(|c| matches!(c, '+' | '-'))
            .and_then(Sign::from_char)
    }

    fn parse_digits(&mut self) -> Option<String> {
        let start = self.pos();
        let len = self.eat_while(|c| c.is_ascii_digit());
        (len > 0).then(|| self.slice_from(start).to_string())
    }

    /// `1.` or `1.5`
    fn parse_point_fraction(&mut self) -> PResult<Fraction> {
        let integer = self.parse_number()?.to_string();
        self.expect_str(".", "decimal point")?;
        Ok((Some(integer), self.parse_digits()))
    }

    /// `.5`
    fn parse_bare_fraction(&mut self) -> PResult<Fraction> {
        self.expect_str(".", "decimal point")?;
        let fraction = self
            .parse_digits()
            .ok_or_else(|| Cause::expected(self.pos(), "digits"))?;
        Ok((None, Some(fraction)))
    }

    fn parse_exponent(&mut self) -> PResult<Exponent> {
        self.expect_char(|c| matches!(c, 'e' | 'E'), "exponent")?;
        let sign = self.parse_sign();
        let digits = self.parse_number()?.to_string();
        Ok(Exponent { sign, digits })
    }

    fn parse_hex_digits(&mut self, count: usize) -> PResult<()> {
        for _ in 0..count {
            self.expect_char(|c| c.is_ascii_hexdigit(), "hexadecimal digit")?;
        }
        Ok(())
    }

    fn parse_rgb24(&mut self) -> PResult<()> {
        self.parse_hex_digits(6)?;
        self.optional(|p| p.parse_hex_digits(2));
        Ok(())
    }

    fn parse_rgb12(&mut self) -> PResult<()> {
        self.parse_hex_digits(3)
    }
}
