//! 贪婪嵌入坐标表
//!
//! 每个可寻址节点一对整数坐标 `(x, y)`，每个分量不超过 24 位，
//! 这样两者能拼进一个 48 位地址。

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{Result, TopoError};
use super::id::NodeId;
use super::rows;

/// 单个分量的最大值
pub const COORD_MAX: u32 = 0xFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    /// 任一分量超过 24 位时返回 `None`。
    pub fn new(x: u32, y: u32) -> Option<Self> {
        (x <= COORD_MAX && y <= COORD_MAX).then_some(Self { x, y })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoordTable {
    coords: BTreeMap<NodeId, Coord>,
}

impl CoordTable {
    /// 从 CSV 文件加载：`node_id, x, y`
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "加载坐标表");
        Self::from_csv(rows::reader_from_path(path)?)
    }

    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self> {
        Self::from_csv(rows::reader_from_io(rdr))
    }

    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u64, u64)>,
    {
        let mut table = Self::default();
        for (idx, (node, x, y)) in entries.into_iter().enumerate() {
            table.insert(idx as u64 + 1, NodeId(node), x, y)?;
        }
        Ok(table)
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let mut table = Self::default();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let row = rows::row_number(&record, idx);
            let node: u32 = rows::int_field(&record, row, 0, "node_id")?;
            let x: u64 = rows::int_field(&record, row, 1, "x")?;
            let y: u64 = rows::int_field(&record, row, 2, "y")?;
            table.insert(row, NodeId(node), x, y)?;
        }
        debug!(nodes = table.coords.len(), "坐标表加载完成");
        Ok(table)
    }

    fn insert(&mut self, row: u64, node: NodeId, x: u64, y: u64) -> Result<()> {
        for value in [x, y] {
            if value > u64::from(COORD_MAX) {
                return Err(TopoError::CoordinateOutOfRange { row, node, value });
            }
        }
        if self.coords.contains_key(&node) {
            return Err(TopoError::DuplicateNode { row, node });
        }
        // 上面已经检查过范围
        self.coords.insert(
            node,
            Coord {
                x: x as u32,
                y: y as u32,
            },
        );
        Ok(())
    }

    pub fn get(&self, node: NodeId) -> Option<Coord> {
        self.coords.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Coord)> + '_ {
        self.coords.iter().map(|(&n, &c)| (n, c))
    }
}
