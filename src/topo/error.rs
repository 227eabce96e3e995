use thiserror::Error;

use super::id::NodeId;
use crate::mac::MacParseError;

pub type Result<T> = std::result::Result<T, TopoError>;

/// 加载拓扑表时的错误（只发生在构建阶段，构建完成后表不再变化）
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TopoError {
    #[error("could not open {path}")]
    Open {
        path: String,
        source: csv::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing column at position {pos} ({name})")]
    MissingColumn {
        row: u64,
        pos: usize,
        name: &'static str,
    },
    #[error("row {row}: invalid integer {value:?} in column {name}")]
    InvalidInteger {
        row: u64,
        name: &'static str,
        value: String,
    },
    #[error("row {row}: invalid link identifier")]
    InvalidIdentifier {
        row: u64,
        source: MacParseError,
    },
    #[error("row {row}: duplicate entry for link {from} -> {to}")]
    DuplicateLink { row: u64, from: NodeId, to: NodeId },
    #[error("row {row}: duplicate coordinates for node {node}")]
    DuplicateNode { row: u64, node: NodeId },
    #[error("row {row}: coordinate {value} of node {node} does not fit in 24 bits")]
    CoordinateOutOfRange { row: u64, node: NodeId, value: u64 },
}
