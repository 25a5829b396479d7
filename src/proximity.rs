//! Proximity classification of trusted neighbors.
//!
//! Every raw neighbor of a user is placed in at most one of three [`Tier`]s according to the
//! [`social_distance`] between the two users' active domains. Classification runs once per node;
//! the per-query ordering of each tier lives in [`crate::ordering`].

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::TrustPathError,
    graph::{ActiveDomain, TrustGraph, UserId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Complete topical overlap with the classifying user.
    Local,
    Longer,
    Longest,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Local, Tier::Longer, Tier::Longest];

    /// Order in which tiers contribute a neighbor at each rank during search expansion.
    pub const SEARCH_ORDER: [Tier; 3] = [Tier::Longest, Tier::Longer, Tier::Local];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Local => write!(f, "local"),
            Tier::Longer => write!(f, "longer"),
            Tier::Longest => write!(f, "longest"),
        }
    }
}

/// Disjoint partition of (a subset of) a node's raw neighbors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiers {
    local: Vec<NodeIndex>,
    longer: Vec<NodeIndex>,
    longest: Vec<NodeIndex>,
}

impl Tiers {
    pub fn get(&self, tier: Tier) -> &[NodeIndex] {
        match tier {
            Tier::Local => &self.local,
            Tier::Longer => &self.longer,
            Tier::Longest => &self.longest,
        }
    }

    pub(crate) fn get_mut(&mut self, tier: Tier) -> &mut Vec<NodeIndex> {
        match tier {
            Tier::Local => &mut self.local,
            Tier::Longer => &mut self.longer,
            Tier::Longest => &mut self.longest,
        }
    }

    pub(crate) fn push(&mut self, tier: Tier, neighbor: NodeIndex) {
        self.get_mut(tier).push(neighbor);
    }

    /// Total number of tiered neighbors.
    pub fn len(&self) -> usize {
        self.local.len() + self.longer.len() + self.longest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest of the three tiers, i.e. the number of expansion levels.
    pub fn depth(&self) -> usize {
        self.local
            .len()
            .max(self.longer.len())
            .max(self.longest.len())
    }
}

/// `|neighbor| - |src ∩ neighbor| + 1`. Always at least 1.
pub fn social_distance(src: &ActiveDomain, neighbor: &ActiveDomain) -> usize {
    neighbor.len() - src.intersection_len(neighbor) + 1
}

/// Tier for `neighbor` as seen from `src`, or `None` if the neighbor is dropped from all tiers.
///
/// With the distance formula above, `Longest` corresponds to exactly one shared topic, and a
/// neighbor with a non-empty domain sharing no topic with `src` lands in no tier at all.
pub fn assign_tier(src: &ActiveDomain, neighbor: &ActiveDomain) -> Option<Tier> {
    let distance = social_distance(src, neighbor);
    let size = neighbor.len();
    if distance == 1 {
        Some(Tier::Local)
    } else if distance < size {
        Some(Tier::Longer)
    } else if distance == size {
        Some(Tier::Longest)
    } else {
        None
    }
}

/// Tier population summary across a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStats {
    pub classified_nodes: usize,
    pub unclassified_nodes: usize,
    pub local: usize,
    pub longer: usize,
    pub longest: usize,
    /// Raw neighbors of classified nodes that fell into no tier.
    pub dropped: usize,
}

impl fmt::Display for TierStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classified: {}, unclassified: {}, local: {}, longer: {}, longest: {}, dropped: {}",
            self.classified_nodes,
            self.unclassified_nodes,
            self.local,
            self.longer,
            self.longest,
            self.dropped
        )
    }
}

impl TrustGraph {
    /// Social distance between two users by id.
    pub fn social_distance(&self, src: UserId, neighbor: UserId) -> Result<usize, TrustPathError> {
        Ok(social_distance(
            &self.node(src)?.active_domain,
            &self.node(neighbor)?.active_domain,
        ))
    }

    /// Partition the raw neighbors of `id` into proximity tiers. Every neighbor's active domain
    /// must already be populated. Fails with [`TrustPathError::InvalidState`] if `id` was
    /// classified before.
    pub fn classify(&mut self, id: UserId) -> Result<(), TrustPathError> {
        let idx = self.index_of(id)?;
        if self.node_at(idx).is_classified() {
            return Err(TrustPathError::InvalidState(format!(
                "neighbor tiers of user {id} are already populated"
            )));
        }

        let src_domain = &self.node_at(idx).active_domain;
        let mut tiers = Tiers::default();
        let mut dropped = 0;
        for neighbor in self.raw_neighbors(idx) {
            match assign_tier(src_domain, &self.node_at(neighbor).active_domain) {
                Some(tier) => tiers.push(tier, neighbor),
                None => dropped += 1,
            }
        }
        tracing::trace!(
            "classified user {id}: {} local, {} longer, {} longest, {dropped} dropped",
            tiers.local.len(),
            tiers.longer.len(),
            tiers.longest.len()
        );
        self.set_tiers(id, tiers)
    }

    /// Classify every node that has not been classified yet.
    pub fn classify_all(&mut self) -> Result<TierStats, TrustPathError> {
        let pending = self
            .nodes()
            .filter(|node| !node.is_classified())
            .map(|node| node.id)
            .collect::<Vec<_>>();
        for id in pending {
            self.classify(id)?;
        }
        let stats = self.tier_stats();
        tracing::debug!("Classified trust graph: {stats}");
        Ok(stats)
    }

    pub fn tier_stats(&self) -> TierStats {
        let mut stats = TierStats::default();
        for idx in self.node_indices() {
            let Some(tiers) = self.node_at(idx).tiers() else {
                stats.unclassified_nodes += 1;
                continue;
            };
            stats.classified_nodes += 1;
            stats.local += tiers.local.len();
            stats.longer += tiers.longer.len();
            stats.longest += tiers.longest.len();
            stats.dropped += self.raw_neighbors(idx).len() - tiers.len();
        }
        stats
    }

    /// Neighbor ids of `id` in the given tier, in classification order.
    pub fn tier_member_ids(&self, id: UserId, tier: Tier) -> Result<Vec<UserId>, TrustPathError> {
        let node = self.node(id)?;
        Ok(node
            .tiers()
            .map(|tiers| {
                tiers
                    .get(tier)
                    .iter()
                    .map(|n| self.node_at(*n).id)
                    .collect()
            })
            .unwrap_or_default())
    }
}
