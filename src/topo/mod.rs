//! 拓扑表模块
//!
//! 此模块负责节点标识、有向链路表和坐标表的加载。表只在构建时写入，
//! 之后以不可变引用交给地址推导使用。

// 子模块声明
mod coords;
mod edges;
mod error;
mod id;
mod rows;
pub mod butterfly;

use std::path::PathBuf;

// 重新导出公共接口
pub use coords::{COORD_MAX, Coord, CoordTable};
pub use edges::{EdgeEntry, EdgeTable};
pub use error::{Result, TopoError};
pub use id::{LabelError, NodeId, NodeKind, NodeLabel};

/// 拓扑数据文件位置
#[derive(Debug, Clone)]
pub struct TopoPaths {
    /// 链路标识 CSV
    pub links: PathBuf,
    /// 贪婪坐标 CSV
    pub coords: PathBuf,
}

impl Default for TopoPaths {
    fn default() -> Self {
        Self {
            links: PathBuf::from("data/bloom_ids.csv"),
            coords: PathBuf::from("data/greedy_coords.csv"),
        }
    }
}

impl TopoPaths {
    pub fn load_edges(&self) -> Result<EdgeTable> {
        EdgeTable::from_csv_path(&self.links)
    }

    pub fn load_coords(&self) -> Result<CoordTable> {
        CoordTable::from_csv_path(&self.coords)
    }
}
