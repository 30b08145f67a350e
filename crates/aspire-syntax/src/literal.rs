//! Literal AST nodes.
//! 字面量 AST 节点。

use crate::Sign;
use serde::Serialize;

/// Integer literal, digits kept as written.
/// 整数字面量，保留原始数字。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntLit {
    pub sign: Option<Sign>,
    pub digits: String,
}

impl IntLit {
    /// The numeric value, or `None` if it does not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        let magnitude: i128 = self.digits.parse().ok()?;
        let value = match self.sign {
            Some(Sign::Minus) => -magnitude,
            _ => magnitude,
        };
        i64::try_from(value).ok()
    }
}

/// Exponent part of a float literal, `e-10`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exponent {
    pub sign: Option<Sign>,
    pub digits: String,
}

/// Float literal. `integer` and `fraction` are never both absent.
/// 浮点数字面量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatLit {
    pub sign: Option<Sign>,
    pub integer: Option<String>,
    pub fraction: Option<String>,
    pub exponent: Option<Exponent>,
}

impl FloatLit {
    /// Rebuild the literal in a form `str::parse::<f64>` accepts.
    pub fn normalized(&self) -> String {
        let mut text = String::new();
        if let Some(Sign::Minus) = self.sign {
            text.push('-');
        }
        text.push_str(self.integer.as_deref().unwrap_or("0"));
        text.push('.');
        text.push_str(self.fraction.as_deref().unwrap_or("0"));
        if let Some(exp) = &self.exponent {
            text.push('e');
            if let Some(Sign::Minus) = exp.sign {
                text.push('-');
            }
            text.push_str(&exp.digits);
        }
        text
    }

    pub fn value(&self) -> f64 {
        // `normalized` only ever produces valid float syntax.
        self.normalized().parse().unwrap_or(f64::NAN)
    }
}

/// How many hex digits a color literal was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorFormat {
    /// `#rgb`
    Rgb12,
    /// `#rrggbb`
    Rgb24,
    /// `#rrggbbaa`
    Rgba32,
}

/// Color literal, the hex digits after `#`.
/// 颜色字面量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub digits: String,
}

impl Color {
    pub fn format(&self) -> ColorFormat {
        match self.digits.len() {
            3 => ColorFormat::Rgb12,
            8 => ColorFormat::Rgba32,
            _ => ColorFormat::Rgb24,
        }
    }

    /// Expand to red, green, blue, alpha bytes. Missing alpha is opaque.
    pub fn rgba(&self) -> [u8; 4] {
        let nibble = |c: u8| (c as char).to_digit(16).unwrap_or(0) as u8;
        let bytes = self.digits.as_bytes();
        match self.format() {
            ColorFormat::Rgb12 => {
                let expand = |c: u8| nibble(c) * 17;
                [expand(bytes[0]), expand(bytes[1]), expand(bytes[2]), 0xff]
            }
            ColorFormat::Rgb24 | ColorFormat::Rgba32 => {
                let byte = |i: usize| {
                    bytes
                        .get(i..i + 2)
                        .map_or(0xff, |pair| nibble(pair[0]) * 16 + nibble(pair[1]))
                };
                [byte(0), byte(2), byte(4), byte(6)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(sign: Option<Sign>, digits: &str) -> IntLit {
        IntLit {
            sign,
            digits: digits.to_string(),
        }
    }

    #[test]
    fn test_int_value() {
        assert_eq!(int(None, "10").value(), Some(10));
        assert_eq!(int(Some(Sign::Minus), "10").value(), Some(-10));
        assert_eq!(int(Some(Sign::Minus), "9223372036854775808").value(), Some(i64::MIN));
        assert_eq!(int(None, "9223372036854775808").value(), None);
    }

    #[test]
    fn test_float_value() {
        let lit = FloatLit {
            sign: Some(Sign::Minus),
            integer: None,
            fraction: Some("5".to_string()),
            exponent: Some(Exponent {
                sign: Some(Sign::Plus),
                digits: "2".to_string(),
            }),
        };
        assert_eq!(lit.normalized(), "-0.5e2");
        assert_eq!(lit.value(), -50.0);

        let trailing_point = FloatLit {
            sign: None,
            integer: Some("3".to_string()),
            fraction: None,
            exponent: None,
        };
        assert_eq!(trailing_point.value(), 3.0);
    }

    #[test]
    fn test_color_rgba() {
        let short = Color {
            digits: "f0a".to_string(),
        };
        assert_eq!(short.format(), ColorFormat::Rgb12);
        assert_eq!(short.rgba(), [0xff, 0x00, 0xaa, 0xff]);

        let long = Color {
            digits: "FFFFFF00".to_string(),
        };
        assert_eq!(long.format(), ColorFormat::Rgba32);
        assert_eq!(long.rgba(), [0xff, 0xff, 0xff, 0x00]);

        let plain = Color {
            digits: "102030".to_string(),
        };
        assert_eq!(plain.rgba(), [0x10, 0x20, 0x30, 0xff]);
    }
}
