//! Loading and preparing trust and rating records.
//!
//! Both record files are plain text with one record per line. Fields are separated by
//! whitespace and/or commas; blank lines and lines starting with `#` are ignored.
//!
//! - trust edges: `truster trustee [...]`
//! - ratings: `user item topic [...]`
//!
//! Extra trailing columns (rating value, helpfulness, timestamps) are accepted and ignored.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs::read_to_string, path::Path};

use crate::{
    error::TrustPathError,
    graph::{TopicCode, TrustEdge, TrustGraph, UserId},
};

/// A single rating of `item` by `user`, filed under `topic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user: UserId,
    pub item: u64,
    pub topic: TopicCode,
}

fn records(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(line_idx, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let fields = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>();
        Some((line_idx + 1, fields))
    })
}

fn field<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    fields: &[&str],
    pos: usize,
    name: &str,
    line: usize,
) -> Result<T, TrustPathError> {
    let raw = fields.get(pos).ok_or_else(|| {
        TrustPathError::MalformedInput(format!("line {line}: missing {name} column"))
    })?;
    raw.parse::<T>().map_err(|err| {
        TrustPathError::MalformedInput(format!("line {line}: invalid {name} '{raw}': {err}"))
    })
}

pub fn parse_trust_edges(text: &str) -> Result<Vec<TrustEdge>, TrustPathError> {
    records(text)
        .map(|(line, fields)| {
            Ok(TrustEdge {
                truster: field(&fields, 0, "truster", line)?,
                trustee: field(&fields, 1, "trustee", line)?,
            })
        })
        .collect()
}

pub fn parse_ratings(text: &str) -> Result<Vec<RatingRecord>, TrustPathError> {
    records(text)
        .map(|(line, fields)| {
            Ok(RatingRecord {
                user: field(&fields, 0, "user", line)?,
                item: field(&fields, 1, "item", line)?,
                topic: field(&fields, 2, "topic", line)?,
            })
        })
        .collect()
}

pub fn load_trust_edges<P: AsRef<Path>>(path: P) -> Result<Vec<TrustEdge>, TrustPathError> {
    tracing::debug!("Reading trust edges from {:?}", path.as_ref());
    parse_trust_edges(&read_to_string(path)?)
}

pub fn load_ratings<P: AsRef<Path>>(path: P) -> Result<Vec<RatingRecord>, TrustPathError> {
    tracing::debug!("Reading ratings from {:?}", path.as_ref());
    parse_ratings(&read_to_string(path)?)
}

/// Working subset of the ratings: sorted by topic (stable), then truncated to `limit` rows.
pub fn filter_ratings(mut ratings: Vec<RatingRecord>, limit: Option<usize>) -> Vec<RatingRecord> {
    ratings.sort_by_key(|rating| rating.topic);
    if let Some(limit) = limit {
        ratings.truncate(limit);
    }
    ratings
}

/// Keep only trust edges whose endpoints both authored at least one of `ratings`.
pub fn filter_trust_edges(edges: Vec<TrustEdge>, ratings: &[RatingRecord]) -> Vec<TrustEdge> {
    let authors = ratings
        .iter()
        .map(|rating| rating.user)
        .collect::<BTreeSet<_>>();
    let total = edges.len();
    let kept = edges
        .into_iter()
        .filter(|edge| authors.contains(&edge.truster) && authors.contains(&edge.trustee))
        .collect::<Vec<_>>();
    tracing::debug!(
        "Kept {} of {total} trust edges between {} rating authors",
        kept.len(),
        authors.len()
    );
    kept
}

/// Add each rating's topic to its author's active domain. Ratings by users absent from the
/// graph are skipped.
pub fn fill_active_domains(
    graph: &mut TrustGraph,
    ratings: &[RatingRecord],
) -> Result<(), TrustPathError> {
    let mut skipped = 0;
    for rating in ratings {
        if !graph.contains(rating.user) {
            tracing::trace!("skipping rating by user {} outside the trust graph", rating.user);
            skipped += 1;
            continue;
        }
        graph.add_active_topic(rating.user, rating.topic)?;
    }
    tracing::debug!(
        "Filled active domains from {} ratings ({skipped} skipped)",
        ratings.len()
    );
    Ok(())
}
