//! Trust graph data structures.
//!
//! This module provides the arena that owns every user for the lifetime of a query session:
//! - [`TrustGraph`]: petgraph-backed arena of [`UserNode`]s plus an id lookup table
//! - [`UserNode`]: a user's identifier, active domain, and (once classified) proximity tiers
//! - [`ActiveDomain`]: the set of topics a user has rated
//!
//! Neighbors are never owned references. Raw trust relations are petgraph edges, and tier lists
//! hold [`NodeIndex`] keys back into the same arena.

use petgraph::{
    graph::NodeIndex,
    visit::{EdgeRef, VisitMap, Visitable},
    Direction,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{error::TrustPathError, proximity::Tiers};

pub type UserId = u64;
pub type TopicCode = u32;

/// The set of topic codes a user has rated at least one item in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDomain(BTreeSet<TopicCode>);

impl ActiveDomain {
    pub fn new() -> Self {
        ActiveDomain::default()
    }

    /// Returns true if the topic was not already present.
    pub fn insert(&mut self, topic: TopicCode) -> bool {
        self.0.insert(topic)
    }

    pub fn contains(&self, topic: TopicCode) -> bool {
        self.0.contains(&topic)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TopicCode> + '_ {
        self.0.iter().copied()
    }

    /// Size of the intersection with `other`, counted without building the intersection set.
    pub fn intersection_len(&self, other: &ActiveDomain) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };
        small.iter().filter(|topic| large.contains(topic)).count()
    }
}

impl FromIterator<TopicCode> for ActiveDomain {
    fn from_iter<I: IntoIterator<Item = TopicCode>>(iter: I) -> Self {
        ActiveDomain(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[TopicCode; N]> for ActiveDomain {
    fn from(topics: [TopicCode; N]) -> Self {
        topics.into_iter().collect()
    }
}

/// A directed trust relation: `truster` extends trust to `trustee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrustEdge {
    pub truster: UserId,
    pub trustee: UserId,
}

impl From<(UserId, UserId)> for TrustEdge {
    fn from((truster, trustee): (UserId, UserId)) -> Self {
        TrustEdge { truster, trustee }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNode {
    pub id: UserId,
    pub active_domain: ActiveDomain,
    tiers: Option<Tiers>,
}

impl UserNode {
    fn new(id: UserId) -> Self {
        UserNode {
            id,
            active_domain: ActiveDomain::default(),
            tiers: None,
        }
    }

    /// The proximity tiers, or `None` if this node has not been classified yet.
    pub fn tiers(&self) -> Option<&Tiers> {
        self.tiers.as_ref()
    }

    pub fn is_classified(&self) -> bool {
        self.tiers.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrustGraph {
    graph: petgraph::Graph<UserNode, ()>,
    index: BTreeMap<UserId, NodeIndex>,
}

impl TrustGraph {
    /// Build the graph from a sequence of trust edges. One node is created per distinct
    /// identifier appearing in either position, and every edge (including repeats) becomes a raw
    /// neighbor relation from truster to trustee.
    pub fn from_edges<I>(iterable: I) -> Result<Self, TrustPathError>
    where
        I: IntoIterator,
        I::Item: Into<TrustEdge>,
    {
        let edges = iterable
            .into_iter()
            .map(|edge| edge.into())
            .collect::<Vec<TrustEdge>>();

        let ids = edges
            .iter()
            .flat_map(|edge| [edge.truster, edge.trustee])
            .collect::<BTreeSet<UserId>>();

        let mut trust_graph = TrustGraph::default();
        for id in ids {
            let idx = trust_graph.graph.add_node(UserNode::new(id));
            trust_graph.index.insert(id, idx);
        }

        for edge in edges.iter() {
            let truster_idx = trust_graph.index_of(edge.truster)?;
            let trustee_idx = trust_graph.index_of(edge.trustee)?;
            trust_graph.graph.add_edge(truster_idx, trustee_idx, ());
        }

        tracing::debug!(
            "Built trust graph with {} users and {} trust edges",
            trust_graph.len(),
            trust_graph.edge_count()
        );
        Ok(trust_graph)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn index_of(&self, id: UserId) -> Result<NodeIndex, TrustPathError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(TrustPathError::MissingIdentifier(id))
    }

    pub fn node(&self, id: UserId) -> Result<&UserNode, TrustPathError> {
        Ok(&self.graph[self.index_of(id)?])
    }

    /// Indices handed out by this graph are always valid: nodes are never removed.
    pub(crate) fn node_at(&self, idx: NodeIndex) -> &UserNode {
        &self.graph[idx]
    }

    /// All user ids in ascending order.
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.index.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &UserNode> + '_ {
        self.index.values().map(|idx| &self.graph[*idx])
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub(crate) fn visit_map(&self) -> impl VisitMap<NodeIndex> {
        self.graph.visit_map()
    }

    /// The users `idx` directly trusts, in edge insertion order.
    pub(crate) fn raw_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect::<Vec<_>>();
        edges.sort_by_key(|(edge_idx, _)| *edge_idx);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// The ids of the users `id` directly trusts, in edge insertion order.
    pub fn raw_neighbor_ids(&self, id: UserId) -> Result<Vec<UserId>, TrustPathError> {
        let idx = self.index_of(id)?;
        Ok(self
            .raw_neighbors(idx)
            .into_iter()
            .map(|n| self.graph[n].id)
            .collect())
    }

    pub fn set_active_domain(
        &mut self,
        id: UserId,
        domain: ActiveDomain,
    ) -> Result<(), TrustPathError> {
        let idx = self.index_of(id)?;
        self.graph[idx].active_domain = domain;
        Ok(())
    }

    pub fn add_active_topic(&mut self, id: UserId, topic: TopicCode) -> Result<(), TrustPathError> {
        let idx = self.index_of(id)?;
        self.graph[idx].active_domain.insert(topic);
        Ok(())
    }

    /// Install the tier partition for `id`. Tiers are written exactly once per node.
    pub(crate) fn set_tiers(&mut self, id: UserId, tiers: Tiers) -> Result<(), TrustPathError> {
        let idx = self.index_of(id)?;
        let node = &mut self.graph[idx];
        if node.tiers.is_some() {
            return Err(TrustPathError::InvalidState(format!(
                "neighbor tiers of user {id} are already populated"
            )));
        }
        node.tiers = Some(tiers);
        Ok(())
    }
}
