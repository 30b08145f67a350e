//! Parse errors.

use crate::cause::{Cause, CauseKind};
use aspire_common::{LineIndex, Span};
use aspire_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The input does not match the grammar. `cause` is the diagnosed cause,
    /// `tree` the root of the full failure tree it was selected from.
    #[error("{cause}")]
    Syntax { cause: Arc<Cause>, tree: Arc<Cause> },

    #[error("nesting deeper than {limit} levels at position {pos}")]
    NestingLimit { pos: usize, limit: usize },
}

impl ParseError {
    /// Position the error points at.
    pub fn pos(&self) -> usize {
        match self {
            ParseError::Syntax { cause, .. } => cause.pos(),
            ParseError::NestingLimit { pos, .. } => *pos,
        }
    }

    /// The selected cause, for syntax errors.
    pub fn cause(&self) -> Option<&Arc<Cause>> {
        match self {
            ParseError::Syntax { cause, .. } => Some(cause),
            ParseError::NestingLimit { .. } => None,
        }
    }

    /// The full failure tree, for syntax errors.
    pub fn tree(&self) -> Option<&Arc<Cause>> {
        match self {
            ParseError::Syntax { tree, .. } => Some(tree),
            ParseError::NestingLimit { .. } => None,
        }
    }

    /// Convert to a renderable diagnostic for `source`.
    /// 转换为可渲染的诊断信息。
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let pos = self.pos();
        let span = Span::point(pos);
        let location = LineIndex::new(source).line_col(source, pos);

        let diagnostic = match self {
            ParseError::Syntax { cause, tree } => {
                let code = if tree.kind() == CauseKind::TrailingInput {
                    ErrorCode::TrailingInput
                } else {
                    ErrorCode::ExpectedConstruct
                };
                let verb = if cause.is_too_deep() { "unexpected" } else { "expected" };
                Diagnostic::error(DiagnosticKind::Syntax, span, format!("{verb} {}", cause.label()))
                    .with_code(code)
                    .with_label(Label::new(span, format!("{verb} {} here", cause.label())))
            }
            ParseError::NestingLimit { limit, .. } => Diagnostic::error(
                DiagnosticKind::Limit,
                span,
                format!("nesting deeper than {limit} levels"),
            )
            .with_code(ErrorCode::NestingLimit)
            .with_label(Label::new(span, "limit reached here")),
        };

        diagnostic.with_note(format!("at {location}"))
    }
}
