//! Value AST nodes: expressions and non-expressions.
//! 值 AST 节点：表达式与非表达式。

use crate::{BinOp, Block, Color, FloatLit, Ident, IntLit, UnaryOp};
use aspire_common::Span;
use serde::Serialize;

/// A value.
/// 值。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
}

impl Value {
    pub fn new(kind: ValueKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// True for operator applications, false for every non-expression.
    /// 运算符应用返回 true，其余返回 false。
    pub fn is_expression(&self) -> bool {
        matches!(self.kind, ValueKind::Unary { .. } | ValueKind::Infix { .. })
    }

    /// The operator of an infix value, if this is one.
    pub fn infix_op(&self) -> Option<BinOp> {
        match &self.kind {
            ValueKind::Infix { op, .. } => Some(*op),
            _ => None,
        }
    }
}

/// Value kind.
/// 值类型。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueKind {
    /// Prefix operation `-a`, `!a` / 一元运算
    Unary { op: UnaryOp, operand: Box<Value> },
    /// Binary operation `a + b` / 二元运算
    Infix {
        op: BinOp,
        left: Box<Value>,
        right: Box<Value>,
    },

    /// Block `{ a; b }` / 代码块
    Block(Block),
    /// Assignment `a = value` / 赋值
    Assignment { target: Ident, value: Box<Value> },
    /// Array `[a, b]`, any length / 数组
    Array(Vec<Value>),
    /// Matrix `((a, b), (c, d))`, at least two rows / 矩阵
    Matrix(Vec<Vector>),
    /// Vector `(a, b)`, at least two elements / 向量
    Vector(Vector),
    /// Color `#rrggbb` / 颜色
    Color(Color),
    /// Float literal / 浮点数字面量
    Float(FloatLit),
    /// Integer literal / 整数字面量
    Integer(IntLit),
    /// Boolean literal / 布尔字面量
    Boolean(bool),
    /// Identifier / 标识符
    Identifier(Ident),
    /// Parenthesis-enclosed value `(a)` / 括号包围的值
    Enclosed(Box<Value>),
}

/// A vector, also a matrix row.
/// 向量，也用作矩阵的行。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vector {
    pub elements: Vec<Value>,
    pub span: Span,
}
