//! # trustpath-core
//!
//! A Rust library for discovering and ranking trust-propagation paths between two users of a
//! social trust network, for trust-aware recommendation.
//!
//! ## Overview
//!
//! Given a source user, a target (sink) user, and a topic, trustpath-core finds paths through
//! mutually-trusting users along which recommendation confidence can be propagated, and keeps
//! only those whose weakest link meets a quality threshold.
//!
//! ### Pipeline
//!
//! 1. **Graph model** ([`graph`]): users and raw trust edges in a petgraph arena, each user
//!    carrying the set of topics they are active in
//! 2. **Proximity classification** ([`proximity`]): every trusted neighbor is put in a local,
//!    longer, or longest tier by social distance, or dropped
//! 3. **Relevance scoring** ([`relevance`]): how well a neighbor fits a (target, topic) context
//! 4. **Neighbor ordering** ([`ordering`]): a query-scoped view with each tier sorted by relevance
//! 5. **Multi-path search** ([`search`]): tier-interleaved BFS recording every arrival at the sink
//! 6. **Path reconstruction** ([`paths`]) and **approval** ([`approval`])
//!
//! [`session::TrustNetwork`] runs the whole pipeline for a [`session::TrustQuery`].
//!
//! ## Quick Start
//!
//! ```rust
//! use trustpath_core::{
//!     dataset::RatingRecord,
//!     session::{TrustNetwork, TrustQuery},
//! };
//!
//! # fn main() -> Result<(), trustpath_core::TrustPathError> {
//! let edges = [(1, 2), (1, 3), (2, 4), (3, 4)];
//! let ratings = [(1, 1), (1, 2), (2, 1), (3, 2), (4, 1), (4, 2)]
//!     .into_iter()
//!     .map(|(user, topic)| RatingRecord { user, item: 0, topic })
//!     .collect::<Vec<_>>();
//!
//! let network = TrustNetwork::build(edges, &ratings)?;
//! let report = network.run(&TrustQuery {
//!     source: 1,
//!     sink: 4,
//!     topic: 1,
//!     threshold: 0.5,
//! })?;
//!
//! println!("{} of {} paths approved", report.approved_count(), report.discovered);
//! for path in report.approved.iter() {
//!     println!("{path}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **default**: the library
//! - **bin**: the `trustpath` CLI

pub mod approval;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod ordering;
pub mod paths;
pub mod proximity;
pub mod relevance;
pub mod search;
pub mod session;
#[cfg(test)]
mod tests;

pub use error::*;
