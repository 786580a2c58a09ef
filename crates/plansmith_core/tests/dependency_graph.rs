use plansmith_core::graph::{detect_cycle, has_cycle, validate_dependency, DependencyGraph};
use plansmith_core::{Dependency, ScheduleError};
use uuid::Uuid;

fn ids(count: usize) -> Vec<Uuid> {
    (0..count).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn accepted_edits_never_form_a_cycle() {
    let nodes = ids(6);
    let mut accepted: Vec<Dependency> = Vec::new();
    // Every ordered pair, forwards and backwards; only a DAG may survive.
    for from in 0..nodes.len() {
        for to in 0..nodes.len() {
            let candidate = Dependency::new(nodes[from], nodes[to]);
            if validate_dependency(&candidate, &accepted).is_ok() {
                accepted.push(candidate);
            }
            assert!(!has_cycle(&accepted));
        }
    }

    assert!(!accepted.is_empty());
    let graph = DependencyGraph::build(nodes.iter().copied(), &accepted);
    assert_eq!(graph.topological_order().unwrap().len(), nodes.len());
}

#[test]
fn closing_a_transitive_chain_is_rejected() {
    let nodes = ids(4);
    let chain: Vec<Dependency> = nodes
        .windows(2)
        .map(|pair| Dependency::new(pair[0], pair[1]))
        .collect();
    let closing = Dependency::new(nodes[3], nodes[0]);

    assert!(detect_cycle(&closing, &chain));
    let err = validate_dependency(&closing, &chain).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::DependencyCycle {
            predecessor_id: nodes[3],
            successor_id: nodes[0],
        }
    );

    let shortcut = Dependency::new(nodes[0], nodes[3]);
    assert!(!detect_cycle(&shortcut, &chain));
}

#[test]
fn self_dependency_is_rejected() {
    let node = Uuid::new_v4();
    let edge = Dependency::new(node, node);
    assert!(detect_cycle(&edge, &[]));
    assert_eq!(
        validate_dependency(&edge, &[]).unwrap_err(),
        ScheduleError::SelfDependency(node)
    );
}

#[test]
fn graph_keeps_largest_lag_for_duplicate_edges() {
    let nodes = ids(3);
    let deps = vec![
        Dependency::new(nodes[0], nodes[1]).with_lag(1),
        Dependency::new(nodes[0], nodes[1]).with_lag(4),
        Dependency::new(nodes[1], nodes[2]),
        Dependency::new(Uuid::new_v4(), nodes[2]),
    ];

    let graph = DependencyGraph::build(nodes.iter().copied(), &deps);
    assert_eq!(graph.lag(nodes[0], nodes[1]), Some(4));
    assert_eq!(graph.skipped_dependencies(), 1);
    assert_eq!(graph.topological_order().unwrap(), nodes);
}
