//! 标识符类型
//!
//! 拓扑中的节点以整数编号；命令行和路由表里写的是带前缀的名字
//! （`h3` 表示主机，`s5` 表示交换机，也可以直接写 `3`）。
//! 名字只在边界处解析一次，之后一律使用 [`NodeLabel`]。

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 节点标识符（CSV 中的 node_id）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// 主机的 IPv4 地址，约定为 `10.0.0.<id>`
    pub fn host_ip(self) -> Ipv4Addr {
        Ipv4Addr::from(0x0a00_0000u32.wrapping_add(self.0))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Host,
    Switch,
}

impl NodeKind {
    pub fn prefix(self) -> char {
        match self {
            NodeKind::Host => 'h',
            NodeKind::Switch => 's',
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Host => f.write_str("host"),
            NodeKind::Switch => f.write_str("switch"),
        }
    }
}

/// 解析后的节点名：可选的类型前缀 + 编号
///
/// 前缀只是书写习惯，查表时只看编号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodeLabel {
    pub kind: Option<NodeKind>,
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node label {0:?}: expected h<N>, s<N> or <N>")]
pub struct LabelError(pub String);

impl NodeLabel {
    pub fn host(id: u32) -> Self {
        Self {
            kind: Some(NodeKind::Host),
            id: NodeId(id),
        }
    }

    pub fn switch(id: u32) -> Self {
        Self {
            kind: Some(NodeKind::Switch),
            id: NodeId(id),
        }
    }

    pub fn bare(id: u32) -> Self {
        Self {
            kind: None,
            id: NodeId(id),
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{}{}", kind.prefix(), self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

impl FromStr for NodeLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let (kind, digits) = match token.as_bytes().first() {
            Some(b'h') => (Some(NodeKind::Host), &token[1..]),
            Some(b's') => (Some(NodeKind::Switch), &token[1..]),
            _ => (None, token),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LabelError(s.to_string()));
        }
        let id = digits.parse::<u32>().map_err(|_| LabelError(s.to_string()))?;
        Ok(Self {
            kind,
            id: NodeId(id),
        })
    }
}

impl From<NodeLabel> for String {
    fn from(label: NodeLabel) -> String {
        label.to_string()
    }
}

impl TryFrom<String> for NodeLabel {
    type Error = LabelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
