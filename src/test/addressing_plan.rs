use super::{butterfly_coords, butterfly_edges, mac};
use crate::embed::{AddressEmbedder, EmbedError};
use crate::plan::{AddressingPlan, AppMode, ArpEntry, InterfaceMac};
use crate::topo::butterfly::builtin_routes;
use crate::topo::{CoordTable, NodeId, NodeLabel};
use std::net::Ipv4Addr;

#[test]
fn app_mode_parses_names() {
    assert_eq!("bloom".parse::<AppMode>().unwrap(), AppMode::Bloom);
    assert_eq!("greedy".parse::<AppMode>().unwrap(), AppMode::Greedy);
    assert_eq!("nc".parse::<AppMode>().unwrap(), AppMode::Nc);
    assert!("flood".parse::<AppMode>().is_err());
    for m in AppMode::ALL {
        assert_eq!(m.to_string().parse::<AppMode>().unwrap(), m);
    }
}

#[test]
fn interface_and_arp_commands_render_shell_lines() {
    let iface = InterfaceMac::first_interface(NodeLabel::host(1), mac("004000000010"));
    assert_eq!(iface.interface, "h1-eth0");
    assert_eq!(
        iface.commands(),
        [
            "ip link set dev h1-eth0 down".to_string(),
            "ip link set dev h1-eth0 address 00:40:00:00:00:10".to_string(),
            "ip link set dev h1-eth0 up".to_string(),
        ]
    );

    let arp = ArpEntry {
        node: NodeLabel::host(1),
        ip: Ipv4Addr::new(10, 0, 3, 4),
        mac: mac("0080960d6204"),
    };
    assert_eq!(arp.command(), "arp -s 10.0.3.4 00:80:96:0d:62:04");
}

#[test]
fn bloom_plan_assigns_host_link_ids_and_route_entries() {
    let t = butterfly_edges();
    let e = AddressEmbedder::new(&t);
    let plan = AddressingPlan::for_mode(AppMode::Bloom, &e, &builtin_routes()).unwrap();

    assert_eq!(plan.mode, AppMode::Bloom);
    assert_eq!(plan.misses, 0);
    assert_eq!(plan.interfaces.len(), 4);
    assert_eq!(plan.interfaces[0].node, NodeLabel::host(1));
    assert_eq!(plan.interfaces[0].mac, mac("004000000010"));

    assert_eq!(plan.arp.len(), 8);
    assert_eq!(plan.arp[0].node, NodeLabel::host(1));
    assert_eq!(plan.arp[0].command(), "arp -s 10.0.0.3 00:00:04:01:60:00");
    assert_eq!(plan.arp[2].mac.to_string(), "00:80:96:0d:62:04");

    let cmds = plan.commands();
    assert_eq!(cmds.len(), 4 * 3 + 8);
    assert_eq!(cmds[0].1, "ip link set dev h1-eth0 down");
    assert_eq!(cmds[12].0, NodeLabel::host(1));
}

#[test]
fn greedy_plan_installs_full_mesh_arp() {
    let t = butterfly_edges();
    let c = butterfly_coords();
    let e = AddressEmbedder::new(&t).with_coords(&c);
    let plan = AddressingPlan::for_mode(AppMode::Greedy, &e, &[]).unwrap();

    assert_eq!(plan.interfaces.len(), 4);
    assert_eq!(plan.interfaces[0].mac.to_string(), "01:00:00:05:00:00");
    assert_eq!(plan.arp.len(), 16);

    let h2_to_h1 = plan
        .arp
        .iter()
        .find(|a| a.node == NodeLabel::host(2) && a.ip == NodeId(1).host_ip())
        .expect("h2 entry for h1");
    assert_eq!(h2_to_h1.mac, plan.interfaces[0].mac);
}

#[test]
fn greedy_plan_requires_coordinates_for_every_host() {
    let t = butterfly_edges();
    let c = CoordTable::from_entries([(1, 1, 5), (2, 5, 5), (3, 1, 0)]).unwrap();
    let e = AddressEmbedder::new(&t).with_coords(&c);
    assert_eq!(
        AddressingPlan::greedy(&e),
        Err(EmbedError::MissingCoordinates(NodeId(4)))
    );
}

#[test]
fn other_modes_have_empty_plans() {
    let t = butterfly_edges();
    let e = AddressEmbedder::new(&t);
    for mode in [AppMode::Mpls, AppMode::Nc, AppMode::Ref] {
        let plan = AddressingPlan::for_mode(mode, &e, &builtin_routes()).unwrap();
        assert_eq!(plan, AddressingPlan::empty(mode));
        assert!(plan.commands().is_empty());
    }
}

#[test]
fn plan_serializes_to_json() {
    let t = butterfly_edges();
    let e = AddressEmbedder::new(&t);
    let plan = AddressingPlan::bloom(&e, &builtin_routes());
    let v = serde_json::to_value(&plan).unwrap();
    assert_eq!(v["mode"], "bloom");
    assert_eq!(v["interfaces"][0]["node"], "h1");
    assert_eq!(v["interfaces"][0]["interface"], "h1-eth0");
    assert_eq!(v["interfaces"][0]["mac"], "00:40:00:00:00:10");
    assert_eq!(v["arp"][0]["ip"], "10.0.0.3");
    assert_eq!(v["arp"][0]["mac"], "00:00:04:01:60:00");
}
