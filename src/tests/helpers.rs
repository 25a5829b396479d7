//! Shared test fixtures for trust graph testing

use crate::{
    dataset::RatingRecord,
    graph::{ActiveDomain, TopicCode, TrustGraph, UserId},
    proximity::{Tier, Tiers},
};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// A trusts B and C, both of which trust D.
pub const DIAMOND_EDGES: [(UserId, UserId); 4] = [(1, 2), (1, 3), (2, 4), (3, 4)];

/// Active domains for the diamond: A={1,2}, B={1}, C={2}, D={1,2}.
pub const DIAMOND_DOMAINS: [(UserId, &[TopicCode]); 4] =
    [(1, &[1, 2]), (2, &[1]), (3, &[2]), (4, &[1, 2])];

pub fn diamond_ratings() -> Vec<RatingRecord> {
    DIAMOND_DOMAINS
        .iter()
        .flat_map(|(user, topics)| {
            topics.iter().enumerate().map(move |(item, topic)| RatingRecord {
                user: *user,
                item: item as u64,
                topic: *topic,
            })
        })
        .collect()
}

/// The diamond graph with active domains filled and every node classified.
///
/// A's local tier is [B, C]; B and C each hold D in their longest tier.
pub fn diamond_graph() -> TrustGraph {
    init_logging();
    let mut graph = TrustGraph::from_edges(DIAMOND_EDGES).unwrap();
    for (user, topics) in DIAMOND_DOMAINS {
        graph
            .set_active_domain(user, topics.iter().copied().collect::<ActiveDomain>())
            .unwrap();
    }
    graph.classify_all().unwrap();
    graph
}

/// Eleven users with tiers assigned by hand rather than by classification, all with empty
/// active domains so any ordering keeps the listed order.
///
/// ```text
/// 0: longest [1, 2, 3, 4]
/// 1: longest [10]          4: longest [10]
/// 2: longer [5], longest [6]
/// 3: longest [7, 8]
/// 5: longest [9]           6: longest [9]
/// 7: longest [10]          9: longest [10]
/// ```
pub fn hand_tiered_graph() -> TrustGraph {
    init_logging();
    let layout: [(UserId, &[(Tier, UserId)]); 11] = [
        (
            0,
            &[
                (Tier::Longest, 1),
                (Tier::Longest, 2),
                (Tier::Longest, 3),
                (Tier::Longest, 4),
            ],
        ),
        (1, &[(Tier::Longest, 10)]),
        (2, &[(Tier::Longer, 5), (Tier::Longest, 6)]),
        (3, &[(Tier::Longest, 7), (Tier::Longest, 8)]),
        (4, &[(Tier::Longest, 10)]),
        (5, &[(Tier::Longest, 9)]),
        (6, &[(Tier::Longest, 9)]),
        (7, &[(Tier::Longest, 10)]),
        (8, &[]),
        (9, &[(Tier::Longest, 10)]),
        (10, &[]),
    ];

    let edges = layout
        .iter()
        .flat_map(|(user, members)| members.iter().map(move |(_, n)| (*user, *n)))
        .collect::<Vec<_>>();
    let mut graph = TrustGraph::from_edges(edges).unwrap();
    for (user, members) in layout {
        let mut tiers = Tiers::default();
        for (tier, neighbor) in members {
            tiers.push(*tier, graph.index_of(*neighbor).unwrap());
        }
        graph.set_tiers(user, tiers).unwrap();
    }
    graph
}
