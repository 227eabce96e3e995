//! 节点地址初始化计划
//!
//! 切换到 bloom/greedy 模式时需要改写主机网卡的 MAC，并在主机上装静态 ARP。
//! 这里只计算要做的事并渲染成命令行，不执行任何命令。

use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::{debug, info};

use super::mode::AppMode;
use crate::embed::{AddressEmbedder, EmbedError};
use crate::mac::MacAddr;
use crate::topo::NodeLabel;
use crate::topo::butterfly::RouteSpec;

/// 主机网卡的 MAC 改写
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceMac {
    pub node: NodeLabel,
    pub interface: String,
    pub mac: MacAddr,
}

impl InterfaceMac {
    /// 主机的第一块网卡 `<host>-eth0`
    pub fn first_interface(node: NodeLabel, mac: MacAddr) -> Self {
        Self {
            node,
            interface: format!("{node}-eth0"),
            mac,
        }
    }

    pub fn commands(&self) -> [String; 3] {
        let dev = &self.interface;
        [
            format!("ip link set dev {dev} down"),
            format!("ip link set dev {dev} address {}", self.mac),
            format!("ip link set dev {dev} up"),
        ]
    }
}

/// 一条静态 ARP 表项，装在 `node` 上
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArpEntry {
    pub node: NodeLabel,
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl ArpEntry {
    pub fn command(&self) -> String {
        format!("arp -s {} {}", self.ip, self.mac)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressingPlan {
    pub mode: AppMode,
    pub interfaces: Vec<InterfaceMac>,
    pub arp: Vec<ArpEntry>,
    /// 路由推导中按全零处理的跳数合计
    pub misses: usize,
}

impl AddressingPlan {
    pub fn empty(mode: AppMode) -> Self {
        Self {
            mode,
            interfaces: Vec::new(),
            arp: Vec::new(),
            misses: 0,
        }
    }

    /// 按模式生成计划；只有 bloom 和 greedy 需要初始化节点。
    pub fn for_mode(
        mode: AppMode,
        embedder: &AddressEmbedder<'_>,
        routes: &[RouteSpec],
    ) -> Result<Self, EmbedError> {
        match mode {
            AppMode::Bloom => Ok(Self::bloom(embedder, routes)),
            AppMode::Greedy => Self::greedy(embedder),
            AppMode::Mpls | AppMode::Nc | AppMode::Ref => Ok(Self::empty(mode)),
        }
    }

    /// 主机 MAC 取自它唯一一条出链路的标识；每条路由在源主机上装一条 ARP。
    pub fn bloom(embedder: &AddressEmbedder<'_>, routes: &[RouteSpec]) -> Self {
        let edges = embedder.edges();
        let mut plan = Self::empty(AppMode::Bloom);

        for host in edges.hosts() {
            if let Some((_, entry)) = edges.host_link(host) {
                plan.interfaces
                    .push(InterfaceMac::first_interface(edges.label(host), entry.id));
            }
        }

        for entry in routes {
            let derived = embedder.derive_route_address(&entry.route, false);
            debug!(src = %entry.src, ip = %entry.ip, address = %derived.address, "路由表项");
            plan.misses += derived.misses;
            plan.arp.push(ArpEntry {
                node: entry.src,
                ip: entry.ip,
                mac: derived.address,
            });
        }

        info!(
            hosts = plan.interfaces.len(),
            routes = plan.arp.len(),
            misses = plan.misses,
            "bloom 计划生成完成"
        );
        plan
    }

    /// 主机 MAC 取自坐标地址；每台主机为所有主机（含自己）装一条 ARP。
    pub fn greedy(embedder: &AddressEmbedder<'_>) -> Result<Self, EmbedError> {
        let edges = embedder.edges();
        let mut plan = Self::empty(AppMode::Greedy);

        let hosts: Vec<_> = edges.hosts().collect();
        let mut addrs = Vec::with_capacity(hosts.len());
        for &host in &hosts {
            addrs.push((host, embedder.derive_coordinate_address(host)?));
        }

        for &(host, mac) in &addrs {
            let label = edges.label(host);
            plan.interfaces
                .push(InterfaceMac::first_interface(label, mac));
            for &(peer, peer_mac) in &addrs {
                plan.arp.push(ArpEntry {
                    node: label,
                    ip: peer.host_ip(),
                    mac: peer_mac,
                });
            }
        }

        info!(hosts = plan.interfaces.len(), "greedy 计划生成完成");
        Ok(plan)
    }

    /// 按执行顺序给出 `(节点, 命令)`：先改网卡，再装 ARP。
    pub fn commands(&self) -> Vec<(NodeLabel, String)> {
        let mut out = Vec::new();
        for iface in &self.interfaces {
            for cmd in iface.commands() {
                out.push((iface.node, cmd));
            }
        }
        for entry in &self.arp {
            out.push((entry.node, entry.command()));
        }
        out
    }
}
