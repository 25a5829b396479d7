//! Per-edge quality filtering of reconstructed paths.
//!
//! Each edge `(upstream, downstream)` is scored as `priority(downstream, upstream, topic)`: the
//! downstream user plays the target and the upstream user the candidate neighbor. This is the
//! reverse of the role order used when ordering tiers, and it is kept that way.

use serde::{Deserialize, Serialize};

use crate::{
    error::TrustPathError,
    graph::{TopicCode, TrustGraph, UserId},
    paths::TrustPath,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathApprover {
    topic: TopicCode,
    threshold: f64,
}

impl PathApprover {
    pub fn new(topic: TopicCode, threshold: f64) -> Result<Self, TrustPathError> {
        if threshold.is_nan() {
            return Err(TrustPathError::MalformedInput(
                "approval threshold must be a number".to_string(),
            ));
        }
        Ok(PathApprover { topic, threshold })
    }

    pub fn topic(&self) -> TopicCode {
        self.topic
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn edge_score(
        &self,
        graph: &TrustGraph,
        upstream: UserId,
        downstream: UserId,
    ) -> Result<f64, TrustPathError> {
        graph.priority(downstream, upstream, self.topic)
    }

    /// True unless some edge scores strictly below the threshold. Paths without edges are
    /// always approved.
    pub fn approve(&self, graph: &TrustGraph, path: &TrustPath) -> Result<bool, TrustPathError> {
        for (upstream, downstream) in path.edges() {
            let score = self.edge_score(graph, upstream, downstream)?;
            if score < self.threshold {
                tracing::trace!(
                    "rejecting path {path}: edge {upstream} -> {downstream} scored {score:.3}"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Split `paths` into `(approved, rejected)`, preserving order within each side.
    pub fn partition(
        &self,
        graph: &TrustGraph,
        paths: Vec<TrustPath>,
    ) -> Result<(Vec<TrustPath>, Vec<TrustPath>), TrustPathError> {
        let mut approved = Vec::new();
        let mut rejected = Vec::new();
        for path in paths {
            if self.approve(graph, &path)? {
                approved.push(path);
            } else {
                rejected.push(path);
            }
        }
        Ok((approved, rejected))
    }
}
