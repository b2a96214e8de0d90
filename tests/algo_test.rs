use roadgraph::algo::{
    connected_components, kruskal, prim, single_source, MstAlgorithm, ShortestPathQuery,
};
use roadgraph::dimacs::{parse_str, read_graph, ParseError, ParsePolicy};
use roadgraph::{Error, LoadConfig};

fn load(input: &str) -> roadgraph::GraphStore {
    read_graph(input.as_bytes(), &LoadConfig::default())
        .expect("load failed")
        .store
}

#[test]
fn test_triangle_scenario() {
    let store = load("a 1 2 5\na 2 3 3\na 1 3 10\n");

    // Shortest path 1 -> 3 is 8, via 2
    let paths = ShortestPathQuery::new(1, Some(3)).run(&store).unwrap();
    let n2 = store.index_of(2).unwrap();
    let n3 = store.index_of(3).unwrap();
    assert_eq!(paths.distance(n3), Some(8));
    assert_eq!(paths.predecessor(n3), Some(n2));

    let resolved = paths.resolve(&store, n3).unwrap().unwrap();
    assert_eq!(resolved.path, vec![1, 2, 3]);

    // MST keeps (2,3,3) and (1,2,5)
    let forest = kruskal(&store);
    assert_eq!(forest.total_weight, 8);
    let mut picked: Vec<_> = forest
        .edges
        .iter()
        .map(|e| {
            (
                store.raw_id_of(e.source).unwrap(),
                store.raw_id_of(e.target).unwrap(),
                e.weight,
            )
        })
        .collect();
    picked.sort();
    assert_eq!(picked, vec![(1, 2, 5), (2, 3, 3)]);
}

#[test]
fn test_disconnected_scenario() {
    let store = load("a 1 2 4\na 3 4 7\n");

    let paths = ShortestPathQuery::new(1, Some(3)).run(&store).unwrap();
    let n3 = store.index_of(3).unwrap();
    assert!(!paths.contains(n3));
    assert_eq!(paths.distance(n3), None);

    for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
        let forest = algorithm.run(&store);
        assert_eq!(forest.len(), 2, "{}", algorithm.name());
        assert_eq!(forest.tree_count(), 2);
    }
    assert_eq!(connected_components(&store).count(), 2);
}

#[test]
fn test_malformed_line_policies() {
    let input = "c header\na 1 2 5\na 1 2\na 2 3 1\n";

    let err = read_graph(input.as_bytes(), &LoadConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::MalformedEdgeLine { line: 3, .. })
    ));

    let loaded = read_graph(input.as_bytes(), &LoadConfig::lenient()).unwrap();
    assert_eq!(loaded.store.edge_count(), 2);
    assert_eq!(loaded.store.node_count(), 3);
    assert_eq!(loaded.stats.skipped, 1);
}

#[test]
fn test_counts_follow_accepted_lines() {
    let input = "\
c DIMACS style graph with sparse ids
p sp 5 6
a 10 20 1
a 20 10 1
a 20 30 2
a 30 40 2
a 40 40 9
a 900 10 4
";
    let edges: Vec<_> = parse_str(input, ParsePolicy::Strict)
        .collect::<Result<_, _>>()
        .unwrap();
    let store = load(input);

    assert_eq!(store.edge_count(), edges.len());
    assert_eq!(store.node_count(), 5);
    for id in [10, 20, 30, 40, 900] {
        let idx = store.index_of(id).unwrap();
        assert_eq!(store.raw_id_of(idx).unwrap(), id);
    }
}

#[test]
fn test_reverse_arcs_become_parallel_edges() {
    // DIMACS lists both directions of every road
    let store = load("a 1 2 7\na 2 1 7\na 2 3 1\na 3 2 1\n");
    assert_eq!(store.edge_count(), 4);
    assert_eq!(store.degree(store.index_of(2).unwrap()).unwrap(), 4);

    let forest = kruskal(&store);
    assert_eq!(forest.len(), 2);
    assert_eq!(forest.total_weight, 8);
    assert_eq!(prim(&store).total_weight, 8);

    let paths = single_source(&store, store.index_of(1).unwrap(), None).unwrap();
    assert_eq!(paths.distance(store.index_of(3).unwrap()), Some(8));
}

#[test]
fn test_unknown_source_is_an_error() {
    let store = load("a 1 2 1\n");
    let err = ShortestPathQuery::new(5, None).run(&store).unwrap_err();
    assert_eq!(err, roadgraph::GraphError::UnknownNode(5));
}
