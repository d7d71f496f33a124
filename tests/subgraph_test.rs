use typed_multigraph::graph::{Edge, EdgeType, ErrorKind, GraphError, Multigraph, TypedGraph};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Directed complete DAG: one `type-1` edge i -> j for every i < j
fn complete_dag(n: u32) -> Multigraph {
    let graph = Multigraph::directed();
    for v in 0..n {
        graph.add_vertex(v).unwrap();
    }
    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge(Edge::directed(i, j, "type-1")).unwrap();
        }
    }
    graph
}

#[test]
fn test_subgraph_follows_vertex_removal() {
    init_tracing();
    let graph = complete_dag(10);
    assert_eq!(graph.order(), 10);
    assert_eq!(graph.size(), 45);

    let sub = graph.subgraph([0, 1, 2, 3, 4]).unwrap();
    assert_eq!(sub.order(), 5);
    assert_eq!(sub.size(), 10);

    graph.remove_vertex(0).unwrap();
    assert_eq!(sub.order(), 4);
    assert_eq!(sub.size(), 6);
    assert!(!sub.contains_vertex(0));
}

#[test]
fn test_subgraph_rejects_vertices_outside_frame() {
    let graph = complete_dag(3);
    let sub = graph.subgraph([0, 1]).unwrap();

    let err = sub.add_vertex(5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(!graph.contains_vertex(5));

    let edge = Edge::directed(1, 0, "type-1");
    assert!(sub.add_edge(edge.clone()).unwrap());
    assert!(graph.contains_edge(&edge));
    assert!(sub.contains_edge(&edge));
}

#[test]
fn test_subgraph_argument_errors() {
    let graph = complete_dag(3);

    let err = graph.subgraph([0, 9]).unwrap_err();
    assert!(matches!(err, GraphError::VertexNotFound(9)));
    assert_eq!(err.kind(), ErrorKind::Argument);

    let err = graph
        .subgraph_with_types([0, 1], Vec::<EdgeType>::new())
        .unwrap_err();
    assert!(matches!(err, GraphError::EmptyTypeSet));

    let err = graph
        .subgraph_with_types([0, 1], [EdgeType::new("missing")])
        .unwrap_err();
    assert!(matches!(err, GraphError::UnknownEdgeType(_)));
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn test_type_retirement_reaches_every_subgraph() {
    init_tracing();
    let graph: Multigraph = Multigraph::directed();
    graph.add_edge(Edge::directed(0, 1, "a")).unwrap();
    graph.add_edge(Edge::directed(1, 2, "b")).unwrap();
    graph.add_edge(Edge::directed(2, 3, "b")).unwrap();

    let left = graph.subgraph([0, 1, 2]).unwrap();
    let right = graph.subgraph([1, 2, 3]).unwrap();
    assert_eq!(left.edge_types().len(), 2);

    graph.remove_edge(&Edge::directed(0, 1, "a"));
    assert!(!left.has_edge_type(&EdgeType::new("a")));
    assert!(!right.has_edge_type(&EdgeType::new("a")));

    // Re-adding the type does not widen existing frames
    graph.add_edge(Edge::directed(0, 1, "a")).unwrap();
    assert!(!left.has_edge_type(&EdgeType::new("a")));
    assert!(!left.contains_edge(&Edge::directed(0, 1, "a")));
    assert_eq!(left.size(), 1);
}

#[test]
fn test_removing_a_vertex_retires_its_last_types() {
    let graph: Multigraph = Multigraph::directed();
    graph.add_edge(Edge::directed(0, 1, "only-here")).unwrap();
    graph.add_edge(Edge::directed(2, 3, "elsewhere")).unwrap();
    let sub = graph.subgraph([2, 3]).unwrap();
    assert_eq!(sub.edge_types().len(), 2);

    graph.remove_vertex(1).unwrap();
    assert_eq!(sub.type_list(), vec![EdgeType::new("elsewhere")]);
    assert_eq!(sub.size(), 1);
}

#[test]
fn test_dropped_subgraphs_are_pruned() {
    init_tracing();
    let graph = complete_dag(4);
    let kept = graph.subgraph([0, 1]).unwrap();
    {
        let _a = graph.subgraph([1, 2]).unwrap();
        let _b = graph.subgraph([2, 3]).unwrap();
        assert_eq!(graph.live_subgraphs(), 3);
    }
    assert_eq!(graph.tracked_subgraphs(), 3);
    assert_eq!(graph.live_subgraphs(), 1);

    // The next mutation that walks the registry prunes the dead entries
    graph.remove_vertex(3).unwrap();
    assert_eq!(graph.tracked_subgraphs(), 1);
    assert_eq!(kept.order(), 2);
}

#[test]
fn test_subgraph_outlives_graph_handle() {
    let sub = {
        let graph = complete_dag(4);
        graph.subgraph([1, 2, 3]).unwrap()
    };
    assert_eq!(sub.order(), 3);
    assert_eq!(sub.size(), 3);
}

#[test]
fn test_clear_empties_every_subgraph() {
    let graph = complete_dag(5);
    let sub = graph.subgraph([1, 2, 3]).unwrap();

    graph.clear_edges();
    assert_eq!(sub.order(), 3);
    assert_eq!(sub.size(), 0);
    assert!(sub.edge_types().is_empty());

    graph.clear();
    assert!(sub.is_empty());
    assert!(sub.vertices().iter().next().is_none());
}

#[test]
fn test_clear_edges_of_type_prunes_frames() {
    let graph: Multigraph = Multigraph::directed();
    graph.add_edge(Edge::directed(0, 1, "a")).unwrap();
    graph.add_edge(Edge::directed(0, 1, "b")).unwrap();
    let sub = graph.subgraph([0, 1]).unwrap();

    assert_eq!(graph.clear_edges_of_type(&EdgeType::new("a")), 1);
    assert_eq!(sub.type_list(), vec![EdgeType::new("b")]);
    assert_eq!(sub.size(), 1);
}

#[test]
fn test_subgraph_views_write_through() {
    let graph = complete_dag(4);
    let sub = graph.subgraph([0, 1, 2]).unwrap();

    let mut edges: Vec<_> = sub.edges().iter().collect();
    edges.sort_by_key(|e| (e.from, e.to));
    assert_eq!(
        edges,
        vec![
            Edge::directed(0, 1, "type-1"),
            Edge::directed(0, 2, "type-1"),
            Edge::directed(1, 2, "type-1"),
        ]
    );

    // Adjacency and neighbors only see the frame
    assert_eq!(sub.adjacency(2).len(), 2);
    assert_eq!(graph.adjacency(2).len(), 3);
    let mut neighbors: Vec<_> = sub.neighbors(0).iter().collect();
    neighbors.sort();
    assert_eq!(neighbors, vec![1, 2]);

    assert!(sub.edges().remove(&Edge::directed(0, 2, "type-1")));
    assert!(!graph.contains_edge(&Edge::directed(0, 2, "type-1")));
    assert!(!sub.edges().remove(&Edge::directed(0, 3, "type-1")));
    assert!(graph.contains_edge(&Edge::directed(0, 3, "type-1")));

    let err = sub.vertices().remove(1).unwrap_err();
    assert!(matches!(err, GraphError::Unsupported(_)));
    assert!(sub.vertices().insert(3).is_err());
}
