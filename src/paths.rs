//! Full trust paths reconstructed from search arrivals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    graph::UserId,
    search::{Arrival, SearchOutcome},
};

/// An ordered sequence of users from source to sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustPath(Vec<UserId>);

impl TrustPath {
    pub fn new(nodes: Vec<UserId>) -> Self {
        TrustPath(nodes)
    }

    pub fn nodes(&self) -> &[UserId] {
        &self.0
    }

    pub fn source(&self) -> Option<UserId> {
        self.0.first().copied()
    }

    pub fn sink(&self) -> Option<UserId> {
        self.0.last().copied()
    }

    /// Number of trust edges along the path. A path from a user to itself has no hops.
    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive `(upstream, downstream)` pairs in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl From<Vec<UserId>> for TrustPath {
    fn from(nodes: Vec<UserId>) -> Self {
        TrustPath(nodes)
    }
}

impl fmt::Display for TrustPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in self.0.iter() {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

impl SearchOutcome {
    /// Walk the parent chain back from `arrival` to the source.
    pub fn reconstruct(&self, arrival: &Arrival) -> TrustPath {
        let mut nodes = vec![arrival.sink];
        let mut current = arrival.parent;
        while let Some(id) = current {
            nodes.push(id);
            current = match self.parents.get(&id) {
                Some(parent) => *parent,
                None => {
                    tracing::warn!("parent chain broken at user {id}; truncating path");
                    None
                }
            };
        }
        nodes.reverse();
        TrustPath(nodes)
    }

    /// One full path per arrival, in arrival order.
    pub fn full_paths(&self) -> Vec<TrustPath> {
        self.arrivals
            .iter()
            .map(|arrival| self.reconstruct(arrival))
            .collect()
    }
}
