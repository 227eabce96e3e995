use crate::topo::{COORD_MAX, Coord, CoordTable, NodeId, TopoError};

#[test]
fn coord_table_loads_rows() {
    let t = CoordTable::from_reader("1, 2, 3\n2, 16777215, 0\n".as_bytes()).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(NodeId(1)), Some(Coord { x: 2, y: 3 }));
    assert_eq!(t.get(NodeId(2)), Some(Coord { x: COORD_MAX, y: 0 }));
    assert_eq!(t.get(NodeId(3)), None);
    let ids: Vec<NodeId> = t.iter().map(|(n, _)| n).collect();
    assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
}

#[test]
fn coord_table_rejects_values_wider_than_24_bits() {
    let err = CoordTable::from_reader("1, 16777216, 0\n".as_bytes()).unwrap_err();
    assert!(
        matches!(
            err,
            TopoError::CoordinateOutOfRange {
                node: NodeId(1),
                value: 16777216,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn coord_table_rejects_duplicate_nodes() {
    let err = CoordTable::from_entries([(4, 1, 1), (4, 2, 2)]).unwrap_err();
    assert!(
        matches!(err, TopoError::DuplicateNode { row: 2, node: NodeId(4) }),
        "{err}"
    );
}

#[test]
fn coord_new_checks_range() {
    assert!(Coord::new(COORD_MAX, COORD_MAX).is_some());
    assert!(Coord::new(COORD_MAX + 1, 0).is_none());
}
