//! Error diagnosis: pick the single cause that best explains a failed parse.
//! 错误诊断：从失败原因树中挑选最能说明问题的一个。
//!
//! The selection is "deepest, then right-most". Among the leaves of the cause
//! tree, the ones furthest from the root are the most specific; among those,
//! the one that got furthest into the input is what the user most likely got
//! wrong.

use crate::cause::Cause;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

type Selection = (Arc<Cause>, usize);

/// Keep only the entries with the largest depth, in their original order.
pub fn deepest_leaves<T>(leaves: Vec<(T, usize)>) -> Vec<(T, usize)> {
    let Some(max) = leaves.iter().map(|(_, depth)| *depth).max() else {
        return leaves;
    };
    leaves
        .into_iter()
        .filter(|(_, depth)| *depth == max)
        .collect()
}

/// Select the cause to report for a failure tree rooted at `root`.
pub fn diagnose(root: &Arc<Cause>) -> Arc<Cause> {
    let mut memo = HashMap::new();
    let (selected, height) = select(root, &mut memo);
    trace!(
        "diagnosed {} from {} nodes, height {}",
        selected,
        memo.len(),
        height
    );
    selected
}

/// Returns the selected leaf under `cause` and its distance from `cause`,
/// counting `cause` itself as 1. Shared subtrees are visited once.
fn select(cause: &Arc<Cause>, memo: &mut HashMap<*const Cause, Selection>) -> Selection {
    let key = Arc::as_ptr(cause);
    if let Some((leaf, height)) = memo.get(&key) {
        return (Arc::clone(leaf), *height);
    }

    let candidates: Vec<_> = cause
        .children()
        .iter()
        .filter(|child| !child.is_too_deep())
        .map(|child| select(child, memo))
        .collect();

    let result = if candidates.is_empty() {
        (Arc::clone(cause), 1)
    } else {
        // `fold` keeps the earliest child when positions tie.
        deepest_leaves(candidates)
            .into_iter()
            .fold(None, |best: Option<Selection>, (leaf, height)| match best {
                Some(best) if best.0.pos() >= leaf.pos() => Some(best),
                _ => Some((leaf, height + 1)),
            })
            .unwrap_or_else(|| (Arc::clone(cause), 1))
    };

    memo.insert(key, result.clone());
    result
}
