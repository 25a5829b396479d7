//! Whole-pipeline scenarios over small hand-checked networks

use crate::{
    approval::PathApprover,
    graph::{TrustGraph, UserId},
    paths::TrustPath,
    proximity::Tier,
    search::cbfs,
    session::{TrustNetwork, TrustQuery},
    tests::helpers::{diamond_graph, init_logging},
};
use test_log::test;

/// A 12-user network with several layers, cross links, cycles, and a dropped neighbor.
fn layered_graph() -> TrustGraph {
    init_logging();
    let edges: [(UserId, UserId); 20] = [
        (1, 2),
        (1, 3),
        (1, 4),
        (2, 5),
        (2, 6),
        (3, 6),
        (3, 7),
        (4, 7),
        (4, 1),
        (5, 8),
        (6, 8),
        (6, 9),
        (7, 9),
        (7, 10),
        (8, 11),
        (9, 11),
        (10, 11),
        (10, 12),
        (11, 2),
        (12, 11),
    ];
    let mut graph = TrustGraph::from_edges(edges).unwrap();
    let domains: [(UserId, &[u32]); 12] = [
        (1, &[1, 2, 3]),
        (2, &[1, 2]),
        (3, &[2, 3, 4]),
        (4, &[5, 6]),
        (5, &[1]),
        (6, &[1, 2, 3, 4]),
        (7, &[3]),
        (8, &[1, 2]),
        (9, &[2, 4]),
        (10, &[3, 5]),
        (11, &[1, 2, 3]),
        (12, &[]),
    ];
    for (user, topics) in domains {
        graph
            .set_active_domain(user, topics.iter().copied().collect())
            .unwrap();
    }
    graph.classify_all().unwrap();
    graph
}

#[test]
fn test_diamond_end_to_end() {
    let network = TrustNetwork::from_graph(diamond_graph()).unwrap();
    let graph = network.graph();
    assert_eq!(graph.social_distance(1, 2).unwrap(), 1);

    let ordering = graph.order_all(4, 1).unwrap();
    let outcome = cbfs(&ordering, 1, 4).unwrap();
    assert_eq!(outcome.arrivals().len(), 2);
    let paths = outcome.full_paths();

    // the weaker path is the one through C: its C -> D edge scores 1/3
    let weakest = |path: &TrustPath| {
        let approver = PathApprover::new(1, 0.0).unwrap();
        path.edges()
            .map(|(a, b)| approver.edge_score(graph, a, b).unwrap())
            .fold(f64::INFINITY, f64::min)
    };
    assert_eq!(weakest(&paths[0]), 2.0 / 3.0);
    assert_eq!(weakest(&paths[1]), 1.0 / 3.0);

    for (threshold, expected) in [(0.0, 2), (1.0 / 3.0, 2), (0.4, 1), (2.0 / 3.0, 1), (0.7, 0)] {
        let report = network
            .run(&TrustQuery {
                source: 1,
                sink: 4,
                topic: 1,
                threshold,
            })
            .unwrap();
        assert_eq!(report.discovered, 2);
        assert_eq!(
            report.approved_count(),
            expected,
            "threshold {threshold} should approve {expected} paths"
        );
    }
}

#[test]
fn test_layered_paths_follow_trust_edges() {
    let graph = layered_graph();
    for (source, sink, topic) in [(1, 11, 1), (1, 11, 3), (3, 2, 2), (4, 12, 5)] {
        let ordering = graph.order_all(sink, topic).unwrap();
        let outcome = cbfs(&ordering, source, sink).unwrap();
        for path in outcome.full_paths() {
            assert_eq!(path.source(), Some(source));
            assert_eq!(path.sink(), Some(sink));
            for (a, b) in path.edges() {
                assert!(
                    graph.raw_neighbor_ids(a).unwrap().contains(&b),
                    "{a} -> {b} in {path} is not a trust edge"
                );
            }
            // only the sink may repeat along a path, and only at its end
            let interior = &path.nodes()[..path.nodes().len() - 1];
            assert!(!interior.contains(&sink));
        }
    }
}

#[test]
fn test_layered_sink_arrivals() {
    let graph = layered_graph();
    // 1 -> 4 shares nothing with a non-empty domain and is dropped from every tier
    assert!(Tier::ALL
        .into_iter()
        .all(|tier| !graph.tier_member_ids(1, tier).unwrap().contains(&4)));

    let ordering = graph.order_all(11, 1).unwrap();
    let outcome = cbfs(&ordering, 1, 11).unwrap();
    let parents = outcome
        .arrivals()
        .iter()
        .filter_map(|arrival| arrival.parent)
        .collect::<Vec<_>>();
    // no parallel edges in this network, so each in-neighbor of the sink arrives at most once
    let mut unique = parents.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), parents.len());
    assert!(!parents.is_empty());
    // 4 is unreachable from 1
    assert_eq!(outcome.parent_of(4), None);
}

#[test]
fn test_orderings_do_not_interfere() {
    let graph = layered_graph();
    let first = graph.order_all(11, 1).unwrap();
    let other = graph.order_all(9, 4).unwrap();
    let again = graph.order_all(11, 1).unwrap();
    assert_eq!(first, again);

    let a = cbfs(&first, 1, 11).unwrap();
    let _ = cbfs(&other, 1, 9).unwrap();
    let b = cbfs(&again, 1, 11).unwrap();
    assert_eq!(a, b);
}
