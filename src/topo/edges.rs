//! 有向链路表
//!
//! 每条物理链路在表中是两条独立的有向记录（A→B 与 B→A），各自带一个
//! 48 位链路标识和本端端口号。表在加载时一次构建，之后只读。

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::error::{Result, TopoError};
use super::id::{NodeId, NodeKind, NodeLabel};
use super::rows;
use crate::mac::MacAddr;

/// 一条有向链路记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeEntry {
    /// `from` 节点上通往邻居的端口
    pub port: u32,
    /// 链路标识
    pub id: MacAddr,
}

#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    /// from -> (to -> entry)
    nodes: BTreeMap<NodeId, BTreeMap<NodeId, EdgeEntry>>,
}

impl EdgeTable {
    /// 从 CSV 文件加载：`node_id, neighbor_id, port_no, identifier_hex`
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "加载链路表");
        Self::from_csv(rows::reader_from_path(path)?)
    }

    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self> {
        Self::from_csv(rows::reader_from_io(rdr))
    }

    /// 由已解析的记录 `(from, to, port, id)` 构建，行号按迭代顺序计。
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u32, u32, MacAddr)>,
    {
        let mut table = Self::default();
        for (idx, (from, to, port, id)) in entries.into_iter().enumerate() {
            table.insert(idx as u64 + 1, NodeId(from), NodeId(to), EdgeEntry { port, id })?;
        }
        table.check_reverse_links();
        Ok(table)
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let mut table = Self::default();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let row = rows::row_number(&record, idx);
            let from: u32 = rows::int_field(&record, row, 0, "node_id")?;
            let to: u32 = rows::int_field(&record, row, 1, "neighbor_id")?;
            let port: u32 = rows::int_field(&record, row, 2, "port_no")?;
            let raw_id = rows::field(&record, row, 3, "identifier_hex")?;
            let id = MacAddr::from_hex12(raw_id)
                .map_err(|source| TopoError::InvalidIdentifier { row, source })?;
            table.insert(row, NodeId(from), NodeId(to), EdgeEntry { port, id })?;
        }
        table.check_reverse_links();
        debug!(nodes = table.nodes.len(), links = table.len(), "链路表加载完成");
        Ok(table)
    }

    fn insert(&mut self, row: u64, from: NodeId, to: NodeId, entry: EdgeEntry) -> Result<()> {
        let neighbors = self.nodes.entry(from).or_default();
        if neighbors.contains_key(&to) {
            return Err(TopoError::DuplicateLink { row, from, to });
        }
        neighbors.insert(to, entry);
        Ok(())
    }

    /// 缺少反向记录不算错误（两个方向本就独立），只提示一下。
    fn check_reverse_links(&self) {
        for (&from, neighbors) in &self.nodes {
            for &to in neighbors.keys() {
                if self.get(to, from).is_none() {
                    warn!(%from, %to, "link has no reverse entry");
                }
            }
        }
    }

    /// 有向记录总数
    pub fn len(&self) -> usize {
        self.nodes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> Option<&EdgeEntry> {
        self.nodes.get(&from).and_then(|n| n.get(&to))
    }

    pub fn identifier(&self, from: NodeId, to: NodeId) -> Option<MacAddr> {
        self.get(from, to).map(|e| e.id)
    }

    pub fn port(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.get(from, to).map(|e| e.port)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// 作为 `from` 出现过的节点，按编号升序
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// `node` 的出边，按邻居编号升序
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &EdgeEntry)> + '_ {
        self.nodes
            .get(&node)
            .into_iter()
            .flat_map(|n| n.iter().map(|(&to, e)| (to, e)))
    }

    /// 恰有一个邻居的是主机，多于一个的是交换机。
    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|n| {
            if n.len() > 1 {
                NodeKind::Switch
            } else {
                NodeKind::Host
            }
        })
    }

    /// 带类型前缀的节点名；不在表中的节点不带前缀。
    pub fn label(&self, node: NodeId) -> NodeLabel {
        NodeLabel {
            kind: self.kind(node),
            id: node,
        }
    }

    pub fn hosts(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .filter(move |&n| self.kind(n) == Some(NodeKind::Host))
    }

    pub fn switches(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .filter(move |&n| self.kind(n) == Some(NodeKind::Switch))
    }

    /// 主机唯一的出边；交换机或未知节点返回 `None`。
    pub fn host_link(&self, host: NodeId) -> Option<(NodeId, &EdgeEntry)> {
        if self.kind(host) != Some(NodeKind::Host) {
            return None;
        }
        self.neighbors(host).next()
    }

    /// 无向链路列表 `(a, b)`，`a < b`，取自编号较小一端的记录。
    pub fn links(&self) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        for (&from, neighbors) in &self.nodes {
            for &to in neighbors.keys() {
                if from < to {
                    out.push((from, to));
                }
            }
        }
        out
    }
}
