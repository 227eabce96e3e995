//! 地址推导
//!
//! 沿路由逐跳查出链路标识并按位或，得到一个能同时表示多条分支的地址；
//! 也可以把节点坐标直接打包成地址。查表失败的一跳按全零标识处理，
//! 其余的跳照常合并，失败次数记在结果里。

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::coord::coordinate_address;
use super::route::Route;
use crate::mac::MacAddr;
use crate::topo::{CoordTable, EdgeTable, LabelError, NodeId, NodeLabel};

/// 单跳查表失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Label(#[from] LabelError),
    #[error("unknown link {from} -> {to}")]
    UnknownLink { from: NodeLabel, to: NodeLabel },
}

/// 调用方负责保证的前提不成立（不做降级处理，直接返回）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    #[error("no coordinate table loaded")]
    NoCoordinateTable,
    #[error("node {0} has no coordinates")]
    MissingCoordinates(NodeId),
}

/// 一跳的推导记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopTrace {
    pub from: String,
    pub to: String,
    /// 查到的链路标识，失败时为全零
    pub id: MacAddr,
    /// 合并这一跳之后的累加值
    pub acc: MacAddr,
    /// 失败原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 路由地址推导结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteAddress {
    pub address: MacAddr,
    pub hops: Vec<HopTrace>,
    /// 按全零处理的跳数
    pub misses: usize,
}

/// 借用只读的拓扑表做地址推导，从不修改它们。
#[derive(Debug, Clone, Copy)]
pub struct AddressEmbedder<'a> {
    edges: &'a EdgeTable,
    coords: Option<&'a CoordTable>,
}

impl<'a> AddressEmbedder<'a> {
    pub fn new(edges: &'a EdgeTable) -> Self {
        Self { edges, coords: None }
    }

    pub fn with_coords(mut self, coords: &'a CoordTable) -> Self {
        self.coords = Some(coords);
        self
    }

    pub fn edges(&self) -> &'a EdgeTable {
        self.edges
    }

    pub fn coords(&self) -> Option<&'a CoordTable> {
        self.coords
    }

    /// 查有向链路 `from -> to` 的标识。节点名可带 `h`/`s` 前缀。
    pub fn edge_identifier(&self, from: &str, to: &str) -> Result<MacAddr, LookupError> {
        let from: NodeLabel = from.parse()?;
        let to: NodeLabel = to.parse()?;
        self.lookup(from, to)
    }

    pub fn lookup(&self, from: NodeLabel, to: NodeLabel) -> Result<MacAddr, LookupError> {
        self.edges
            .identifier(from.id, to.id)
            .ok_or(LookupError::UnknownLink { from, to })
    }

    /// 沿路由推导地址：所有跳的链路标识按位或。
    ///
    /// 结果与段的顺序、段内跳的顺序无关，同一条链路走多次只算一次。
    /// 查不到的跳按全零处理，不会让整个推导失败。
    /// `verbose` 时逐跳以 48 位二进制输出标识和累加值。
    #[tracing::instrument(skip(self, route), fields(route = %route))]
    pub fn derive_route_address(&self, route: &Route, verbose: bool) -> RouteAddress {
        let mut acc = MacAddr::ZERO;
        let mut hops = Vec::new();
        let mut misses = 0;

        for path in route.paths() {
            // 每个节点名只解析一次
            let labels: Vec<Result<NodeLabel, LabelError>> =
                path.iter().map(|token| token.parse()).collect();

            for (pair, tokens) in labels.windows(2).zip(path.windows(2)) {
                let (from, to) = (tokens[0].as_str(), tokens[1].as_str());
                let looked_up = match (&pair[0], &pair[1]) {
                    (Ok(a), Ok(b)) => self.lookup(*a, *b),
                    (Err(e), _) | (_, Err(e)) => Err(LookupError::from(e.clone())),
                };
                let (id, error) = match looked_up {
                    Ok(id) => (id, None),
                    Err(err) => {
                        warn!(from, to, %err, "link lookup failed, using zero identifier");
                        misses += 1;
                        (MacAddr::ZERO, Some(err.to_string()))
                    }
                };
                acc |= id;
                if verbose {
                    info!("{from:>3}->{to:<3}: {}", id.to_bit_string());
                    info!("{:>9} {}", "acc", acc.to_bit_string());
                }
                hops.push(HopTrace {
                    from: from.to_string(),
                    to: to.to_string(),
                    id,
                    acc,
                    error,
                });
            }
        }

        if verbose {
            info!("{:>9} {}", "=====>", acc.to_bit_string());
            info!("{:>9} {}", "=====>", acc);
        }
        debug!(address = %acc, hops = hops.len(), misses, "路由地址推导完成");

        RouteAddress {
            address: acc,
            hops,
            misses,
        }
    }

    /// 由节点坐标推导地址。节点必须在坐标表中，否则返回错误。
    pub fn derive_coordinate_address(&self, node: NodeId) -> Result<MacAddr, EmbedError> {
        let coords = self.coords.ok_or(EmbedError::NoCoordinateTable)?;
        let coord = coords
            .get(node)
            .ok_or(EmbedError::MissingCoordinates(node))?;
        Ok(coordinate_address(coord))
    }
}
