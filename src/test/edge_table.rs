use crate::mac::MacAddr;
use crate::topo::{EdgeTable, NodeId, NodeKind, TopoError};

const SAMPLE: &str = "\
# node_id, neighbor_id, port_no, identifier_hex
1, 5, 1, 820000700000
5, 1, 1, 000000000001
5, 6, 2, 0000000000F0
6, 5, 1, 00000000000F
6, 2, 2, 000000000100
2, 6, 1, 000000001000
";

#[test]
fn edge_table_loads_directed_entries_from_csv() {
    let t = EdgeTable::from_reader(SAMPLE.as_bytes()).expect("load sample");
    assert_eq!(t.len(), 6);
    assert_eq!(t.identifier(NodeId(1), NodeId(5)), MacAddr::new(0x8200_0070_0000));
    assert_eq!(t.port(NodeId(5), NodeId(6)), Some(2));
    assert_eq!(t.port(NodeId(6), NodeId(2)), Some(2));
    assert!(t.get(NodeId(1), NodeId(6)).is_none());
}

#[test]
fn edge_table_keeps_both_directions_independent() {
    let t = EdgeTable::from_reader(SAMPLE.as_bytes()).unwrap();
    assert_eq!(t.identifier(NodeId(5), NodeId(6)), MacAddr::new(0xf0));
    assert_eq!(t.identifier(NodeId(6), NodeId(5)), MacAddr::new(0x0f));
}

#[test]
fn edge_table_classifies_hosts_and_switches_by_degree() {
    let t = EdgeTable::from_reader(SAMPLE.as_bytes()).unwrap();
    assert_eq!(t.kind(NodeId(1)), Some(NodeKind::Host));
    assert_eq!(t.kind(NodeId(5)), Some(NodeKind::Switch));
    assert_eq!(t.kind(NodeId(99)), None);
    assert_eq!(t.hosts().collect::<Vec<_>>(), vec![NodeId(1), NodeId(2)]);
    assert_eq!(t.switches().collect::<Vec<_>>(), vec![NodeId(5), NodeId(6)]);
    assert_eq!(t.label(NodeId(2)).to_string(), "h2");
    assert_eq!(t.label(NodeId(6)).to_string(), "s6");
    assert_eq!(t.label(NodeId(99)).to_string(), "99");
}

#[test]
fn edge_table_host_link_is_the_single_outgoing_entry() {
    let t = EdgeTable::from_reader(SAMPLE.as_bytes()).unwrap();
    let (to, entry) = t.host_link(NodeId(2)).expect("h2 link");
    assert_eq!(to, NodeId(6));
    assert_eq!(entry.id, MacAddr::new(0x1000).unwrap());
    assert!(t.host_link(NodeId(5)).is_none());
}

#[test]
fn edge_table_lists_undirected_links_once() {
    let t = EdgeTable::from_reader(SAMPLE.as_bytes()).unwrap();
    assert_eq!(
        t.links(),
        vec![
            (NodeId(1), NodeId(5)),
            (NodeId(2), NodeId(6)),
            (NodeId(5), NodeId(6)),
        ]
    );
    let nbrs: Vec<NodeId> = t.neighbors(NodeId(5)).map(|(n, _)| n).collect();
    assert_eq!(nbrs, vec![NodeId(1), NodeId(6)]);
}

#[test]
fn edge_table_rejects_bad_identifier() {
    let err = EdgeTable::from_reader("1, 2, 1, 12345\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TopoError::InvalidIdentifier { row: 1, .. }), "{err}");
}

#[test]
fn edge_table_rejects_duplicate_directed_entry() {
    let csv = "1, 2, 1, 000000000001\n1, 2, 3, 000000000002\n";
    let err = EdgeTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(
        matches!(
            err,
            TopoError::DuplicateLink {
                from: NodeId(1),
                to: NodeId(2),
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn edge_table_reports_missing_columns_and_bad_integers() {
    let err = EdgeTable::from_reader("1, 2, 1\n".as_bytes()).unwrap_err();
    assert!(
        matches!(
            err,
            TopoError::MissingColumn {
                pos: 3,
                name: "identifier_hex",
                ..
            }
        ),
        "{err}"
    );

    let err = EdgeTable::from_reader("a, 2, 1, 000000000001\n".as_bytes()).unwrap_err();
    assert!(
        matches!(err, TopoError::InvalidInteger { name: "node_id", .. }),
        "{err}"
    );
}

#[test]
fn edge_table_open_error_names_the_path() {
    let err = EdgeTable::from_csv_path("/nonexistent/bloom_ids.csv").unwrap_err();
    assert!(matches!(err, TopoError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/bloom_ids.csv"));
}

#[test]
fn edge_table_from_entries_matches_csv_loading() {
    let t = EdgeTable::from_entries([
        (1, 2, 4, MacAddr::new(0x10).unwrap()),
        (2, 1, 1, MacAddr::new(0x20).unwrap()),
    ])
    .unwrap();
    assert_eq!(t.port(NodeId(1), NodeId(2)), Some(4));
    assert_eq!(t.identifier(NodeId(2), NodeId(1)), MacAddr::new(0x20));
    assert!(!t.is_empty());
}
