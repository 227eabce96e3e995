mod addressing_plan;
mod coord_table;
mod edge_table;

use crate::mac::MacAddr;
use crate::topo::{CoordTable, EdgeTable};

/// 用 `(from, to, id)` 构建链路表，端口统一为 1
pub(crate) fn edge_table(entries: &[(u32, u32, &str)]) -> EdgeTable {
    EdgeTable::from_entries(
        entries
            .iter()
            .map(|&(from, to, id)| (from, to, 1, MacAddr::from_hex12(id).expect("hex id"))),
    )
    .expect("build edge table")
}

pub(crate) fn butterfly_edges() -> EdgeTable {
    EdgeTable::from_reader(include_str!("../../data/bloom_ids.csv").as_bytes())
        .expect("load data/bloom_ids.csv")
}

pub(crate) fn butterfly_coords() -> CoordTable {
    CoordTable::from_reader(include_str!("../../data/greedy_coords.csv").as_bytes())
        .expect("load data/greedy_coords.csv")
}

pub(crate) fn mac(s: &str) -> MacAddr {
    s.parse().expect("mac literal")
}
