//! Function and statement AST definitions.
//! 函数与语句 AST 定义。

use crate::Value;
use aspire_common::Span;
use serde::Serialize;

/// An identifier.
/// 标识符。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A function signature `name(a, b)`.
/// 函数签名。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    pub name: Ident,
    pub args: Vec<Ident>,
    pub span: Span,
}

/// A function definition `name(a, b) { ... }`.
/// 函数定义。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: Ident,
    pub args: Vec<Ident>,
    pub body: Block,
    pub span: Span,
}

impl Function {
    pub fn from_signature(signature: Signature, body: Block) -> Self {
        let span = signature.span.merge(body.span);
        Self {
            name: signature.name,
            args: signature.args,
            body,
            span,
        }
    }
}

/// A braced statement list `{ a; b }`.
/// 代码块。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// A statement.
/// 语句。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// `for (x : xs) { ... }` / for 循环
    For(ForStatement),
    /// `if (c) { ... } else { ... }` / 带 else 的条件语句
    IfElse(IfElseStatement),
    /// `if (c) { ... }` / 条件语句
    If(IfStatement),
    /// A bare value / 值语句
    Value(Value),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::For(stmt) => stmt.span,
            Statement::IfElse(stmt) => stmt.span,
            Statement::If(stmt) => stmt.span,
            Statement::Value(value) => value.span,
        }
    }
}

/// What a `for` loop walks over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Iterable {
    Identifier(Ident),
    /// An array literal, elements kept in order.
    Array { elements: Vec<Value>, span: Span },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    pub element: Ident,
    pub iterable: Iterable,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub condition: Value,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfElseStatement {
    pub condition: Value,
    pub if_block: Block,
    pub else_block: Block,
    pub span: Span,
}
