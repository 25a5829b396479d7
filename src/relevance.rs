//! Relevance scoring of a candidate neighbor for a (target, topic) query context.

use crate::{
    error::TrustPathError,
    graph::{ActiveDomain, TopicCode, TrustGraph, UserId},
};

/// Weight of the neighbor being active in the query topic.
pub const LAMBDA_TOPIC: f64 = 1.0;
/// Weight of the topical overlap between target and neighbor.
pub const LAMBDA_OVERLAP: f64 = 1.0;

/// `(λ1·x + λ2·y) / (1 + |target|)` where `x` is 1 if `neighbor` is active in `topic` and `y` is
/// the number of topics `target` and `neighbor` share. Lies in `[0, 1]`.
pub fn priority(target: &ActiveDomain, neighbor: &ActiveDomain, topic: TopicCode) -> f64 {
    let topic_match = if neighbor.contains(topic) { 1.0 } else { 0.0 };
    let overlap = target.intersection_len(neighbor) as f64;
    (LAMBDA_TOPIC * topic_match + LAMBDA_OVERLAP * overlap) / (1.0 + target.len() as f64)
}

impl TrustGraph {
    pub fn priority(
        &self,
        target: UserId,
        neighbor: UserId,
        topic: TopicCode,
    ) -> Result<f64, TrustPathError> {
        Ok(priority(
            &self.node(target)?.active_domain,
            &self.node(neighbor)?.active_domain,
            topic,
        ))
    }
}
