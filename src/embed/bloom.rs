//! Bloom 匹配
//!
//! 交换机按目的地址转发：某条出链路的标识被地址完全包含（`addr & id == id`）
//! 就从该端口发出。若邻居是主机，最后一跳把目的 MAC/IP 改写成主机自己的。
//! 用来检查一个推导出的地址在各节点上会选中哪些链路。

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::mac::MacAddr;
use crate::topo::{EdgeTable, NodeId, NodeLabel};

/// 最后一跳交付给主机时的改写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub mac: MacAddr,
    pub ip: Ipv4Addr,
}

/// 被地址选中的一条出链路
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkMatch {
    pub neighbor: NodeLabel,
    pub port: u32,
    pub id: MacAddr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
}

/// `node` 上被 `address` 选中的出链路，按邻居编号升序。全零标识从不匹配。
pub fn matching_links(edges: &EdgeTable, node: NodeId, address: MacAddr) -> Vec<LinkMatch> {
    edges
        .neighbors(node)
        .filter(|(_, entry)| !entry.id.is_zero() && address.contains(entry.id))
        .map(|(neighbor, entry)| {
            let delivery = edges.host_link(neighbor).map(|(_, host_entry)| Delivery {
                mac: host_entry.id,
                ip: neighbor.host_ip(),
            });
            LinkMatch {
                neighbor: edges.label(neighbor),
                port: entry.port,
                id: entry.id,
                delivery,
            }
        })
        .collect()
}
