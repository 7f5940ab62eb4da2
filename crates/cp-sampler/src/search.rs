//! Combinatorial interferer search with domination pruning.
//!
//! Explores subsets of a candidate list depth-first with an explicit
//! worklist.  Each frame holds an accepted (non-interfering) subset, the
//! candidates still open to it, and the index of the next one to try:
//!
//! ```text
//! trial = accepted ∪ {remaining[next]}
//!   trial ⊆ some found set   → skip
//!   interfered(trial)        → found += trial (drop found sets it dominates)
//!   otherwise                → push child (trial, remaining[next+1..])
//! ```
//!
//! A candidate is never revisited at the same level, so every subset is
//! tried at most once.  The worst case is still exponential in the candidate
//! count; domination pruning and the radius pre-filter upstream are the only
//! bounds.

use cp_core::NodeId;
use cp_plan::InterfererSet;

struct Frame<'a> {
    accepted:  Option<InterfererSet>,
    remaining: &'a [NodeId],
    next:      usize,
}

/// Search `candidates` (sorted, unique) for interfering combinations.
///
/// `interfered` is asked about each trial set in depth-first order.  Returns
/// the maximal combinations found, in discovery order.  An error from
/// `interfered` aborts the search.
pub fn search<E>(
    candidates:     &[NodeId],
    mut interfered: impl FnMut(&InterfererSet) -> Result<bool, E>,
) -> Result<Vec<InterfererSet>, E> {
    let mut found: Vec<InterfererSet> = Vec::new();
    let mut stack = vec![Frame { accepted: None, remaining: candidates, next: 0 }];

    while let Some(mut frame) = stack.pop() {
        let Some(&candidate) = frame.remaining.get(frame.next) else {
            continue;
        };
        frame.next += 1;

        let trial = match &frame.accepted {
            Some(accepted) => accepted.with(candidate),
            None => InterfererSet::single(candidate),
        };

        let child = if found.iter().any(|f| trial.is_subset(f)) {
            None
        } else if interfered(&trial)? {
            found.retain(|f| !f.is_strict_subset(&trial));
            found.push(trial);
            None
        } else {
            Some(Frame { accepted: Some(trial), remaining: &frame.remaining[frame.next..], next: 0 })
        };

        stack.push(frame);
        if let Some(child) = child {
            stack.push(child);
        }
    }
    Ok(found)
}
