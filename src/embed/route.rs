//! 路由：若干段路径的并集
//!
//! 每段路径是一串节点名，相邻两个节点构成一跳。多段路径用于描述组播树，
//! 例如 `s5-s9-h3` 与 `s5-s7-s8-s10-h4` 一起表示发往 h3 和 h4 的两条分支。
//! 节点名保持原样，到查表时才解析，解析失败只影响对应的那一跳。

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    paths: Vec<Vec<String>>,
}

impl Route {
    pub fn from_paths<P, S>(paths: impl IntoIterator<Item = P>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|p| p.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// 每个参数是一段用 `-` 连接的路径，如 `s5-s7-s8`。
    pub fn from_dashed<S: AsRef<str>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self::from_paths(
            segments
                .into_iter()
                .map(|s| s.as_ref().split('-').map(str::to_string).collect::<Vec<_>>()),
        )
    }

    pub fn paths(&self) -> &[Vec<String>] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&path.join("-"))?;
        }
        Ok(())
    }
}
