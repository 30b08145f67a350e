//! Per-invocation parser state and the backtracking primitives the grammar
//! rules are written with.
//!
//! Conventions: every rule method returns `PResult<T>`. A rule that fails
//! leaves the position where it started, which `rule`, `first_of` and
//! `separated` guarantee for everything built on them.

use crate::cause::Cause;
use crate::grammar::ParseOptions;
use aspire_common::Span;
use aspire_syntax::{Block, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) type PResult<T> = Result<T, Arc<Cause>>;

/// A grammar rule as a plain function pointer, for ordered choices.
pub(crate) type RuleFn<'src, T> = fn(&mut Parser<'src>) -> PResult<T>;

type Memo<T> = Result<(T, usize), Arc<Cause>>;

/// Value-producing rules whose results are memoized per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ValueRule {
    Value,
    Expression,
    Infix,
    NonExpression,
}

/// The Aspire parser: one instance per parse invocation.
pub(crate) struct Parser<'src> {
    source: &'src str,
    pos: usize,
    options: ParseOptions,
    /// Current depth of nested value and block attempts and operator folds.
    nesting: usize,
    /// Position where the nesting limit was first exceeded.
    limit_hit: Option<usize>,
    /// Furthest failure an ordered choice, optional or repetition recovered from.
    swallowed: Option<Arc<Cause>>,
    values: HashMap<(ValueRule, usize), Memo<Value>>,
    blocks: HashMap<usize, Memo<Block>>,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            pos: 0,
            options,
            nesting: 0,
            limit_hit: None,
            swallowed: None,
            values: HashMap::new(),
            blocks: HashMap::new(),
        }
    }

    // ========== Cursor ==========

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub(crate) fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::from_usize(start, self.pos)
    }

    pub(crate) fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }

    /// Move back to `pos`, which must be a position already visited.
    pub(crate) fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn options(&self) -> ParseOptions {
        self.options
    }

    pub(crate) fn limit_hit(&self) -> Option<usize> {
        self.limit_hit
    }

    pub(crate) fn take_swallowed(&mut self) -> Option<Arc<Cause>> {
        self.swallowed.take()
    }

    /// Consume one character if it satisfies `pred`.
    pub(crate) fn eat_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        let c = self.peek().filter(|&c| pred(c))?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume characters while they satisfy `pred`, returning how many bytes were eaten.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while self.eat_if(&pred).is_some() {}
        self.pos - start
    }

    pub(crate) fn eat_str(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_str(&mut self, literal: &str, label: &'static str) -> PResult<()> {
        if self.eat_str(literal) {
            Ok(())
        } else {
            Err(Cause::expected(self.pos, label))
        }
    }

    pub(crate) fn expect_char(
        &mut self,
        pred: impl Fn(char) -> bool,
        label: &'static str,
    ) -> PResult<char> {
        self.eat_if(pred).ok_or_else(|| Cause::expected(self.pos, label))
    }

    /// Optional whitespace, newlines included.
    pub(crate) fn skip_space(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Optional whitespace that does not cross a line break.
    pub(crate) fn skip_inline_space(&mut self) {
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    // ========== Backtracking ==========

    /// Run `f`, restoring the position if it fails.
    pub(crate) fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// A named rule. On failure the position is restored and the cause is
    /// wrapped under `label`. A rule that failed without getting past its
    /// first character collapses into a single `expected <label>` leaf.
    pub(crate) fn rule<T>(
        &mut self,
        label: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let start = self.pos;
        f(self).map_err(|cause| {
            self.pos = start;
            if cause.furthest() <= start {
                Cause::expected(start, label)
            } else {
                Cause::rule(start, label, vec![cause])
            }
        })
    }

    /// Ordered choice: the first alternative that succeeds wins. Failed
    /// alternatives before it are recorded as swallowed.
    pub(crate) fn first_of<T>(
        &mut self,
        label: &'static str,
        alternatives: &[RuleFn<'src, T>],
    ) -> PResult<T> {
        let start = self.pos;
        let mut causes = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            match self.attempt(alternative) {
                Ok(value) => {
                    for cause in causes {
                        self.swallow(cause);
                    }
                    return Ok(value);
                }
                Err(cause) => causes.push(cause),
            }
        }
        if causes.iter().all(|cause| cause.furthest() <= start) {
            Err(Cause::expected(start, label))
        } else {
            Err(Cause::rule(start, label, causes))
        }
    }

    /// Zero or one `f`; a failure is swallowed.
    pub(crate) fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        match self.attempt(f) {
            Ok(value) => Some(value),
            Err(cause) => {
                self.swallow(cause);
                None
            }
        }
    }

    /// `item (separator item)*` with at least `min` items. A separator is only
    /// consumed when an item follows it, so trailing separators are left in
    /// the input.
    pub(crate) fn separated<T>(
        &mut self,
        label: &'static str,
        min: usize,
        item: RuleFn<'src, T>,
        separator: RuleFn<'src, ()>,
    ) -> PResult<Vec<T>> {
        let start = self.pos;
        let mut items = Vec::new();
        let stop = loop {
            let before = self.pos;
            if !items.is_empty() {
                if let Err(cause) = separator(self) {
                    self.pos = before;
                    break cause;
                }
            }
            match item(self) {
                Ok(value) => items.push(value),
                Err(cause) => {
                    self.pos = before;
                    break cause;
                }
            }
        };

        if items.len() < min {
            self.pos = start;
            return Err(Cause::repetition(start, label, min, stop));
        }
        self.swallow(stop);
        Ok(items)
    }

    /// Positive lookahead: succeed without consuming if `f` would match here.
    pub(crate) fn ahead<T>(
        &mut self,
        label: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<()> {
        let start = self.pos;
        let result = f(self);
        self.pos = start;
        result
            .map(|_| ())
            .map_err(|cause| Cause::lookahead(start, label, cause))
    }

    /// Negative lookahead: succeed without consuming if `f` would not match here.
    pub(crate) fn not_ahead<T>(
        &mut self,
        label: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<()> {
        let start = self.pos;
        let result = f(self);
        self.pos = start;
        match result {
            Ok(_) => Err(Cause::unexpected(start, label)),
            Err(_) => Ok(()),
        }
    }

    /// Keep `cause` if it reaches at least as far as the one kept so far.
    pub(crate) fn swallow(&mut self, cause: Arc<Cause>) {
        let replace = match &self.swallowed {
            Some(kept) => cause.furthest() >= kept.furthest(),
            None => true,
        };
        if replace {
            self.swallowed = Some(cause);
        }
    }

    // ========== Resources ==========

    /// Run `f` one nesting level deeper, failing once the limit is exceeded.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let depth = self.nesting;
        self.deepen()?;
        let result = f(self);
        self.nesting = depth;
        result
    }

    /// Go one nesting level deeper without leaving it again. Loops that grow
    /// a tree in place use this and put the depth back with `restore_nesting`.
    pub(crate) fn deepen(&mut self) -> PResult<()> {
        if self.nesting >= self.options.max_nesting {
            self.limit_hit.get_or_insert(self.pos);
            return Err(Cause::expected(self.pos, "shallower nesting"));
        }
        self.nesting += 1;
        Ok(())
    }

    pub(crate) fn nesting(&self) -> usize {
        self.nesting
    }

    pub(crate) fn restore_nesting(&mut self, depth: usize) {
        self.nesting = depth;
    }

    pub(crate) fn memo_value(
        &mut self,
        rule: ValueRule,
        f: impl FnOnce(&mut Self) -> PResult<Value>,
    ) -> PResult<Value> {
        let start = self.pos;
        if let Some(memo) = self.values.get(&(rule, start)) {
            return match memo {
                Ok((value, end)) => {
                    let value = value.clone();
                    self.pos = *end;
                    Ok(value)
                }
                Err(cause) => Err(Arc::clone(cause)),
            };
        }

        let result = f(self);
        let memo = match &result {
            Ok(value) => Ok((value.clone(), self.pos)),
            Err(cause) => {
                self.pos = start;
                Err(Arc::clone(cause))
            }
        };
        self.values.insert((rule, start), memo);
        result
    }

    pub(crate) fn memo_block(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<Block>,
    ) -> PResult<Block> {
        let start = self.pos;
        if let Some(memo) = self.blocks.get(&start) {
            return match memo {
                Ok((block, end)) => {
                    let block = block.clone();
                    self.pos = *end;
                    Ok(block)
                }
                Err(cause) => Err(Arc::clone(cause)),
            };
        }

        let result = f(self);
        let memo = match &result {
            Ok(block) => Ok((block.clone(), self.pos)),
            Err(cause) => {
                self.pos = start;
                Err(Arc::clone(cause))
            }
        };
        self.blocks.insert(start, memo);
        result
    }
}
