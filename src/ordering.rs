//! Query-scoped neighbor ordering.
//!
//! A [`TierOrdering`] is a read-only view borrowing a classified [`TrustGraph`], in which every
//! node's three tiers are sorted by [`priority`] for one (target, topic) context. The graph itself
//! is never reordered, so any number of orderings can coexist over a shared `&TrustGraph`.

use petgraph::graph::NodeIndex;
use std::{fmt, ptr};

use crate::{
    error::TrustPathError,
    graph::{TopicCode, TrustGraph, UserId},
    proximity::{Tier, Tiers},
    relevance::priority,
};

#[derive(Clone)]
pub struct TierOrdering<'g> {
    graph: &'g TrustGraph,
    target: UserId,
    topic: TopicCode,
    /// Indexed by `NodeIndex::index()`.
    tiers: Vec<Tiers>,
}

impl fmt::Debug for TierOrdering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TierOrdering")
            .field("target", &self.target)
            .field("topic", &self.topic)
            .field("tiers", &self.tiers)
            .finish_non_exhaustive()
    }
}

/// Orderings are equal only when they view the same graph instance.
impl PartialEq for TierOrdering<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.graph, other.graph)
            && self.target == other.target
            && self.topic == other.topic
            && self.tiers == other.tiers
    }
}

impl<'g> TierOrdering<'g> {
    /// Stable-sort every node's tiers by descending priority relative to `target` and `topic`.
    /// Neighbors with equal scores keep their classification order.
    pub fn new(
        graph: &'g TrustGraph,
        target: UserId,
        topic: TopicCode,
    ) -> Result<Self, TrustPathError> {
        let target_domain = &graph.node(target)?.active_domain;

        // A neighbor's score depends only on the neighbor for a fixed context.
        let scores = graph
            .node_indices()
            .map(|idx| priority(target_domain, &graph.node_at(idx).active_domain, topic))
            .collect::<Vec<f64>>();

        let mut unclassified = 0;
        let mut tiers = Vec::with_capacity(graph.len());
        for idx in graph.node_indices() {
            let Some(classified) = graph.node_at(idx).tiers() else {
                unclassified += 1;
                tiers.push(Tiers::default());
                continue;
            };
            let mut ordered = classified.clone();
            for tier in Tier::ALL {
                ordered
                    .get_mut(tier)
                    .sort_by(|a, b| scores[b.index()].total_cmp(&scores[a.index()]));
            }
            tiers.push(ordered);
        }

        if unclassified > 0 {
            tracing::warn!(
                "{unclassified} unclassified users treated as having no tiered neighbors"
            );
        }
        tracing::debug!("Ordered neighbor tiers for target {target}, topic {topic}");
        Ok(TierOrdering {
            graph,
            target,
            topic,
            tiers,
        })
    }

    /// The graph this ordering was built over.
    pub fn graph(&self) -> &'g TrustGraph {
        self.graph
    }

    pub fn target(&self) -> UserId {
        self.target
    }

    pub fn topic(&self) -> TopicCode {
        self.topic
    }

    pub(crate) fn tiers(&self, idx: NodeIndex) -> Option<&Tiers> {
        self.tiers.get(idx.index())
    }

    /// Neighbor ids of `id` in `tier`, in this ordering's rank order.
    pub fn ordered_ids(&self, id: UserId, tier: Tier) -> Result<Vec<UserId>, TrustPathError> {
        let graph = self.graph;
        let idx = graph.index_of(id)?;
        Ok(self
            .tiers(idx)
            .map(|tiers| {
                tiers
                    .get(tier)
                    .iter()
                    .map(|n| graph.node_at(*n).id)
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl TrustGraph {
    /// Build the neighbor ordering for a (target, topic) query context.
    pub fn order_all(
        &self,
        target: UserId,
        topic: TopicCode,
    ) -> Result<TierOrdering<'_>, TrustPathError> {
        TierOrdering::new(self, target, topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::ActiveDomain, tests::helpers::diamond_graph};
    use test_log::test;

    #[test]
    fn test_ordering_follows_topic() {
        let graph = diamond_graph();

        let by_topic_1 = graph.order_all(4, 1).unwrap();
        assert_eq!(
            by_topic_1.ordered_ids(1, Tier::Local).unwrap(),
            vec![2, 3]
        );

        let by_topic_2 = graph.order_all(4, 2).unwrap();
        assert_eq!(
            by_topic_2.ordered_ids(1, Tier::Local).unwrap(),
            vec![3, 2]
        );

        // the shared graph keeps its classification order
        assert_eq!(graph.tier_member_ids(1, Tier::Local).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_ordering_is_idempotent() {
        let graph = diamond_graph();
        let first = graph.order_all(4, 2).unwrap();
        let second = graph.order_all(4, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_orderings_over_distinct_graphs_differ() {
        let graph = diamond_graph();
        let copy = diamond_graph();
        let ordering = graph.order_all(4, 1).unwrap();
        assert!(ptr::eq(ordering.graph(), &graph));
        assert_ne!(ordering, copy.order_all(4, 1).unwrap());
    }

    #[test]
    fn test_ties_keep_classification_order() {
        let mut graph = TrustGraph::from_edges([(1, 5), (1, 3), (1, 4), (1, 2)]).unwrap();
        graph.set_active_domain(1, [1, 2].into()).unwrap();
        graph.set_active_domain(2, [1].into()).unwrap();
        graph.set_active_domain(3, [2].into()).unwrap();
        graph.set_active_domain(4, ActiveDomain::new()).unwrap();
        graph.set_active_domain(5, [1].into()).unwrap();
        graph.classify_all().unwrap();

        // target 1, topic 1: 5 and 2 score 2/3, 3 scores 1/3, 4 scores 0
        let ordering = graph.order_all(1, 1).unwrap();
        assert_eq!(
            ordering.ordered_ids(1, Tier::Local).unwrap(),
            vec![5, 2, 3, 4]
        );
    }

    #[test]
    fn test_unknown_target_is_missing_identifier() {
        let graph = diamond_graph();
        assert_eq!(
            graph.order_all(42, 1).unwrap_err(),
            TrustPathError::MissingIdentifier(42)
        );
    }
}
