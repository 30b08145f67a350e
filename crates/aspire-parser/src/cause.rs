//! Failure causes.
//!
//! Every failed rule attempt produces a [`Cause`]: the position where it
//! broke, what was expected there, and the causes of the sub-attempts that
//! failed beneath it. Memoized failures are shared between parents, so the
//! tree is really a DAG of `Arc<Cause>` nodes.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// What kind of attempt a cause records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseKind {
    /// A terminal (literal text or character class) did not match, or a rule
    /// failed without getting past its first character.
    Expected,
    /// A rule or an ordered choice failed after making progress. Children hold
    /// the failing step, or every alternative.
    Rule,
    /// A separated repetition stopped before reaching its minimum count.
    Repetition,
    /// A positive lookahead failed (with children), or a negative lookahead
    /// found what it forbids (leaf).
    Lookahead,
    /// The entry rule matched but input remained.
    TrailingInput,
}

/// One node of the failure tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause {
    pos: usize,
    label: Cow<'static, str>,
    kind: CauseKind,
    children: Vec<Arc<Cause>>,
    furthest: usize,
}

impl Cause {
    fn build(
        pos: usize,
        label: Cow<'static, str>,
        kind: CauseKind,
        children: Vec<Arc<Cause>>,
    ) -> Arc<Cause> {
        let furthest = children
            .iter()
            .map(|child| child.furthest)
            .fold(pos, usize::max);
        Arc::new(Cause {
            pos,
            label,
            kind,
            children,
            furthest,
        })
    }

    /// `label` was expected at `pos`.
    pub fn expected(pos: usize, label: impl Into<Cow<'static, str>>) -> Arc<Cause> {
        Self::build(pos, label.into(), CauseKind::Expected, Vec::new())
    }

    /// The rule `label` starting at `pos` failed for the given reasons.
    pub fn rule(
        pos: usize,
        label: impl Into<Cow<'static, str>>,
        children: Vec<Arc<Cause>>,
    ) -> Arc<Cause> {
        Self::build(pos, label.into(), CauseKind::Rule, children)
    }

    /// Fewer than `min` items of `label` were found; `stop` ended the run.
    pub fn repetition(pos: usize, label: &'static str, min: usize, stop: Arc<Cause>) -> Arc<Cause> {
        let label = format!("at least {min} {label}");
        Self::build(pos, label.into(), CauseKind::Repetition, vec![stop])
    }

    /// A positive lookahead for `label` failed because of `inner`.
    pub fn lookahead(pos: usize, label: &'static str, inner: Arc<Cause>) -> Arc<Cause> {
        Self::build(pos, label.into(), CauseKind::Lookahead, vec![inner])
    }

    /// A negative lookahead found `label` at `pos`.
    pub fn unexpected(pos: usize, label: &'static str) -> Arc<Cause> {
        Self::build(pos, label.into(), CauseKind::Lookahead, Vec::new())
    }

    /// Input remains at `pos`; `reason` is the furthest failure that stopped
    /// the parse from going on, if any.
    pub fn trailing(pos: usize, reason: Option<Arc<Cause>>) -> Arc<Cause> {
        Self::build(
            pos,
            "end of input".into(),
            CauseKind::TrailingInput,
            reason.into_iter().collect(),
        )
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> CauseKind {
        self.kind
    }

    pub fn children(&self) -> &[Arc<Cause>] {
        &self.children
    }

    /// Largest position anywhere in this subtree.
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// A leaf left behind by a negative lookahead. Those only disambiguate
    /// between alternatives (a sign that belongs to a number literal, `<`
    /// followed by another angle bracket) and never describe a fix.
    pub fn is_too_deep(&self) -> bool {
        self.is_leaf() && self.kind == CauseKind::Lookahead
    }

    /// Render the whole tree, one node per line, at most `max_lines` lines.
    pub fn tree(&self, max_lines: usize) -> CauseTree<'_> {
        CauseTree {
            root: self,
            max_lines,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_too_deep() {
            write!(f, "unexpected {} at position {}", self.label, self.pos)
        } else {
            write!(f, "expected {} at position {}", self.label, self.pos)
        }
    }
}

/// Indented rendering of a cause tree, see [`Cause::tree`].
pub struct CauseTree<'a> {
    root: &'a Cause,
    max_lines: usize,
}

impl CauseTree<'_> {
    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        cause: &Cause,
        depth: usize,
        lines: &mut usize,
    ) -> Result<bool, fmt::Error> {
        if *lines >= self.max_lines {
            return Ok(false);
        }
        *lines += 1;
        writeln!(f, "{:indent$}{}", "", cause, indent = depth * 2)?;
        for child in &cause.children {
            if !self.write_node(f, child, depth + 1, lines)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for CauseTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = 0;
        if !self.write_node(f, self.root, 0, &mut lines)? {
            writeln!(f, "...")?;
        }
        Ok(())
    }
}
