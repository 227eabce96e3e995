use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 控制器的寻址模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    /// MPLS 组播（默认）
    Mpls,
    /// 网络编码
    Nc,
    /// 参考模式，行为同 MPLS
    Ref,
    /// 按链路标识推导地址
    Bloom,
    /// 按贪婪嵌入坐标推导地址
    Greedy,
}

impl AppMode {
    pub const ALL: [AppMode; 5] = [
        AppMode::Mpls,
        AppMode::Nc,
        AppMode::Ref,
        AppMode::Bloom,
        AppMode::Greedy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AppMode::Mpls => "mpls",
            AppMode::Nc => "nc",
            AppMode::Ref => "ref",
            AppMode::Bloom => "bloom",
            AppMode::Greedy => "greedy",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode {0:?}: expected one of mpls, nc, ref, bloom, greedy")]
pub struct ParseModeError(pub String);

impl FromStr for AppMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppMode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}
