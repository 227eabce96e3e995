//! 地址嵌入模块
//!
//! 把拓扑信息（路由经过的链路、节点坐标）确定性地编码进一个 48 位 MAC 地址，
//! 让转发设备直接根据地址本身做决定。

// 子模块声明
mod bloom;
mod coord;
mod embedder;
mod route;

// 重新导出公共接口
pub use bloom::{Delivery, LinkMatch, matching_links};
pub use coord::{coordinate_address, coordinate_from_address};
pub use embedder::{AddressEmbedder, EmbedError, HopTrace, LookupError, RouteAddress};
pub use route::Route;
