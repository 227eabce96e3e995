//! 经典 butterfly 拓扑
//!
//! 拓扑结构：h1..h4 为主机，s5..s10 为交换机，s7 <-> s8 是瓶颈链路。
//! 链路标识和坐标来自 `data/` 下的 CSV；这里只保存固定不变的部分：
//! 示意图、交换机端口编号和 Bloom 模式下预装的路由。

use std::net::Ipv4Addr;

use crate::embed::Route;
use crate::topo::NodeLabel;

/// 拓扑示意图
pub const ASCII_ART: &str = r"        /----\                /----\
        | h1 |                | h2 |
        \-+--/                \-+--/
          |                     |
        +-+--+                +-+--+
        | s5 |                | s6 |
        +-+--+                +-+--+
          |   \---\      /---/  |
          |        +----+       |
          |        | s7 |       |
          |        +-+--+       |
          |          |          |
          |        +-+--+       |
          |        | s8 |       |
          |        +----+       |
          |   /---/      \---\  |
        +-+--+                +-+---+
        | s9 |                | s10 |
        +-+--+                +-+---+
          |                     |
        /-+--\                /-+--\
        | h3 |                | h4 |
        \----/                \----/
";

/// 交换机端口编号 `(switch, neighbor, port)`
pub const SWITCH_PORTS: [(u32, u32, u32); 18] = [
    (5, 1, 1),
    (5, 7, 2),
    (5, 9, 3),
    (6, 2, 1),
    (6, 7, 2),
    (6, 10, 3),
    (7, 5, 1),
    (7, 6, 2),
    (7, 8, 3),
    (8, 7, 1),
    (8, 9, 2),
    (8, 10, 3),
    (9, 3, 1),
    (9, 5, 2),
    (9, 8, 3),
    (10, 4, 1),
    (10, 6, 2),
    (10, 8, 3),
];

/// 一条静态路由：在 `src` 上把 `ip` 解析为沿 `route` 推导出的地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub src: NodeLabel,
    pub ip: Ipv4Addr,
    pub route: Route,
}

impl RouteSpec {
    pub fn new(src: NodeLabel, ip: Ipv4Addr, route: Route) -> Self {
        Self { src, ip, route }
    }
}

/// Bloom 模式下预装的路由。`10.0.3.4` 是发往 h3 和 h4 的组播地址。
pub fn builtin_routes() -> Vec<RouteSpec> {
    let multicast = Ipv4Addr::new(10, 0, 3, 4);
    vec![
        RouteSpec::new(
            NodeLabel::host(1),
            Ipv4Addr::new(10, 0, 0, 3),
            Route::from_dashed(["s5-s9-h3"]),
        ),
        RouteSpec::new(
            NodeLabel::host(1),
            Ipv4Addr::new(10, 0, 0, 4),
            Route::from_dashed(["s5-s7-s8-s10-h4"]),
        ),
        RouteSpec::new(
            NodeLabel::host(1),
            multicast,
            Route::from_dashed(["s5-s9-h3", "s5-s7-s8-s10-h4"]),
        ),
        RouteSpec::new(
            NodeLabel::host(3),
            Ipv4Addr::new(10, 0, 0, 1),
            Route::from_dashed(["s9-s5-h1"]),
        ),
        RouteSpec::new(
            NodeLabel::host(2),
            Ipv4Addr::new(10, 0, 0, 3),
            Route::from_dashed(["s6-s10-h4"]),
        ),
        RouteSpec::new(
            NodeLabel::host(2),
            Ipv4Addr::new(10, 0, 0, 4),
            Route::from_dashed(["s6-s7-s8-s9-h3"]),
        ),
        RouteSpec::new(
            NodeLabel::host(2),
            multicast,
            Route::from_dashed(["s6-s10-h4", "s6-s7-s8-s9-h3"]),
        ),
        RouteSpec::new(
            NodeLabel::host(4),
            Ipv4Addr::new(10, 0, 0, 1),
            Route::from_dashed(["s10-s8-s7-s5-h1"]),
        ),
    ]
}
