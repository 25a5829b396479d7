//! Tier-interleaved breadth-first search (CBFS).
//!
//! The search visits every non-sink node at most once, recording the parent it was first
//! reached from. Reaching the sink is different: every dequeued arrival at the sink is recorded
//! as an [`Arrival`] and never marks the sink visited, so each distinct incoming edge that the
//! traversal follows produces its own path.

use petgraph::{graph::NodeIndex, visit::VisitMap};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::{
    error::TrustPathError,
    graph::UserId,
    ordering::TierOrdering,
    proximity::Tier,
};

/// One instance of the search reaching the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrival {
    /// The node the sink was reached from; `None` when the source is the sink.
    pub parent: Option<UserId>,
    pub sink: UserId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub(crate) parents: BTreeMap<UserId, Option<UserId>>,
    pub(crate) arrivals: Vec<Arrival>,
}

impl SearchOutcome {
    /// First-visit parent of every expanded node. The source maps to `None`.
    pub fn parents(&self) -> &BTreeMap<UserId, Option<UserId>> {
        &self.parents
    }

    /// Arrivals at the sink, in dequeue order.
    pub fn arrivals(&self) -> &[Arrival] {
        &self.arrivals
    }

    /// `Some(parent)` if `id` was expanded during the search.
    pub fn parent_of(&self, id: UserId) -> Option<Option<UserId>> {
        self.parents.get(&id).copied()
    }

    pub fn visited_count(&self) -> usize {
        self.parents.len()
    }
}

/// Search from `source` to `sink` over the tiers of `ordering`, within the graph it borrows.
///
/// At each expansion, tier members are enqueued rank by rank: for every rank, the longest-tier
/// member first, then the longer-tier member, then the local-tier member.
pub fn cbfs(
    ordering: &TierOrdering<'_>,
    source: UserId,
    sink: UserId,
) -> Result<SearchOutcome, TrustPathError> {
    let graph = ordering.graph();
    let source_idx = graph.index_of(source)?;
    let sink_idx = graph.index_of(sink)?;
    if ordering.target() != sink {
        tracing::warn!(
            "CBFS to sink {sink} using an ordering built for target {}",
            ordering.target()
        );
    }

    let mut outcome = SearchOutcome::default();
    let mut visited = graph.visit_map();
    let mut queue: VecDeque<(Option<NodeIndex>, NodeIndex)> = VecDeque::new();
    queue.push_back((None, source_idx));

    while let Some((parent, current)) = queue.pop_front() {
        let parent_id = parent.map(|p| graph.node_at(p).id);
        if current == sink_idx {
            tracing::trace!("arrived at sink {sink} from {parent_id:?}");
            outcome.arrivals.push(Arrival {
                parent: parent_id,
                sink,
            });
            continue;
        }
        if !visited.visit(current) {
            continue;
        }

        let current_id = graph.node_at(current).id;
        outcome.parents.insert(current_id, parent_id);

        let Some(tiers) = ordering.tiers(current) else {
            continue;
        };
        for level in 0..tiers.depth() {
            for tier in Tier::SEARCH_ORDER {
                if let Some(neighbor) = tiers.get(tier).get(level) {
                    queue.push_back((Some(current), *neighbor));
                }
            }
        }
    }

    tracing::debug!(
        "CBFS {source} -> {sink}: {} users expanded, {} arrivals",
        outcome.visited_count(),
        outcome.arrivals.len()
    );
    Ok(outcome)
}
