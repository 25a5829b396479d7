//! End-to-end path queries over a classified trust network.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    approval::PathApprover,
    dataset::{fill_active_domains, RatingRecord},
    error::TrustPathError,
    graph::{TopicCode, TrustEdge, TrustGraph, UserId},
    paths::TrustPath,
    proximity::TierStats,
    search::cbfs,
};

/// Approval threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustQuery {
    pub source: UserId,
    pub sink: UserId,
    pub topic: TopicCode,
    pub threshold: f64,
}

impl fmt::Display for TrustQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (topic {}, threshold {})",
            self.source, self.sink, self.topic, self.threshold
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub query: TrustQuery,
    /// Number of paths reconstructed before approval.
    pub discovered: usize,
    pub approved: Vec<TrustPath>,
}

impl QueryReport {
    pub fn approved_count(&self) -> usize {
        self.approved.len()
    }
}

/// A trust graph whose nodes have all been classified, ready to answer queries.
#[derive(Debug, Clone)]
pub struct TrustNetwork {
    graph: TrustGraph,
}

impl TrustNetwork {
    /// Build the graph from `edges`, fill active domains from `ratings`, and classify every node.
    pub fn build<I>(edges: I, ratings: &[RatingRecord]) -> Result<Self, TrustPathError>
    where
        I: IntoIterator,
        I::Item: Into<TrustEdge>,
    {
        let mut graph = TrustGraph::from_edges(edges)?;
        fill_active_domains(&mut graph, ratings)?;
        TrustNetwork::from_graph(graph)
    }

    /// Classify any node of `graph` that has not been classified yet.
    pub fn from_graph(mut graph: TrustGraph) -> Result<Self, TrustPathError> {
        graph.classify_all()?;
        Ok(TrustNetwork { graph })
    }

    pub fn graph(&self) -> &TrustGraph {
        &self.graph
    }

    pub fn tier_stats(&self) -> TierStats {
        self.graph.tier_stats()
    }

    /// Order, search, reconstruct, and approve for one query.
    pub fn run(&self, query: &TrustQuery) -> Result<QueryReport, TrustPathError> {
        let approver = PathApprover::new(query.topic, query.threshold)?;
        self.graph.index_of(query.source)?;
        let ordering = self.graph.order_all(query.sink, query.topic)?;
        let outcome = cbfs(&ordering, query.source, query.sink)?;
        let paths = outcome.full_paths();
        let discovered = paths.len();
        let (approved, _) = approver.partition(&self.graph, paths)?;
        tracing::info!(
            "query {query}: {} of {discovered} paths approved",
            approved.len()
        );
        Ok(QueryReport {
            query: *query,
            discovered,
            approved,
        })
    }

    /// One query per topic in the source's active domain, in ascending topic order.
    pub fn run_source_topics(
        &self,
        source: UserId,
        sink: UserId,
        threshold: f64,
    ) -> Result<Vec<QueryReport>, TrustPathError> {
        let topics = self
            .graph
            .node(source)?
            .active_domain
            .iter()
            .collect::<Vec<_>>();
        topics
            .into_iter()
            .map(|topic| {
                self.run(&TrustQuery {
                    source,
                    sink,
                    topic,
                    threshold,
                })
            })
            .collect()
    }
}
