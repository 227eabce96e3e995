//! butterfly 地址工具
//!
//! 加载链路标识表和坐标表，推导路由地址/坐标地址，并把节点初始化要执行的
//! 命令打印出来。诊断信息走 stderr，stdout 只有结果。

use std::error::Error;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process::ExitCode;

use butterfly_rs::embed::{AddressEmbedder, LinkMatch, Route, RouteAddress, matching_links};
use butterfly_rs::mac::MacAddr;
use butterfly_rs::plan::{AddressingPlan, AppMode, ArpEntry};
use butterfly_rs::topo::{EdgeEntry, EdgeTable, NodeId, NodeLabel, TopoPaths, butterfly};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error, info, warn};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "butterfly",
    about = "Derive link-identifier and coordinate MAC addresses for the butterfly topology"
)]
struct Args {
    /// Link identifier CSV: node_id, neighbor_id, port_no, identifier_hex
    #[arg(long, global = true, default_value = "data/bloom_ids.csv")]
    links: PathBuf,

    /// Greedy coordinate CSV: node_id, x, y
    #[arg(long, global = true, default_value = "data/greedy_coords.csv")]
    coords: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Derive a route address and print the static ARP entry for SRC.
    /// Example: route h1 10.0.3.4 s5-s9-h3 s5-s7-s8-s10-h4
    Route {
        src: NodeLabel,
        ip: Ipv4Addr,
        /// Dash-separated hop sequences
        #[arg(required = true)]
        hops: Vec<String>,
    },
    /// Print the identifier of the directed link FROM -> TO
    Edge { from: String, to: String },
    /// Print the coordinate address of NODE
    Coord { node: NodeLabel },
    /// Print the node initialization commands of an addressing mode
    Plan { mode: AppMode },
    /// Print the outgoing links of NODE selected by MAC
    Matches { node: NodeLabel, mac: MacAddr },
    /// Print the topology drawing and the link table
    Topo,
}

#[derive(Debug, Serialize)]
struct RouteOutput<'a> {
    arp: ArpEntry,
    command: String,
    #[serde(flatten)]
    derived: &'a RouteAddress,
}

#[derive(Debug, Serialize)]
struct EdgeOutput {
    from: String,
    to: String,
    id: MacAddr,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CoordOutput {
    node: NodeLabel,
    x: u32,
    y: u32,
    address: MacAddr,
}

#[derive(Debug, Serialize)]
struct MatchesOutput {
    node: NodeLabel,
    mac: MacAddr,
    links: Vec<LinkMatch>,
}

#[derive(Debug, Serialize)]
struct NodeOutput {
    node: NodeLabel,
    neighbors: Vec<NeighborOutput>,
}

#[derive(Debug, Serialize)]
struct NeighborOutput {
    neighbor: NodeLabel,
    #[serde(flatten)]
    entry: EdgeEntry,
}

#[derive(Debug, Serialize)]
struct TopoOutput {
    nodes: Vec<NodeOutput>,
    links: Vec<(NodeLabel, NodeLabel)>,
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: &Args) -> CliResult<()> {
    let paths = TopoPaths {
        links: args.links.clone(),
        coords: args.coords.clone(),
    };
    let edges = paths.load_edges()?;
    debug!(links = edges.len(), "链路表就绪");

    match &args.cmd {
        Cmd::Route { src, ip, hops } => {
            if !edges.contains_node(src.id) {
                return Err(format!("unknown host: {src}").into());
            }
            let route = Route::from_dashed(hops);
            info!(%src, %ip, %route, "推导路由地址");
            let embedder = AddressEmbedder::new(&edges);
            let derived = embedder.derive_route_address(&route, true);
            let arp = ArpEntry {
                node: *src,
                ip: *ip,
                mac: derived.address,
            };
            let command = arp.command();
            if args.json {
                print_json(&RouteOutput {
                    arp,
                    command,
                    derived: &derived,
                })?;
            } else {
                println!("{src}: {command}");
            }
        }
        Cmd::Edge { from, to } => {
            let embedder = AddressEmbedder::new(&edges);
            let (id, error) = match embedder.edge_identifier(from, to) {
                Ok(id) => (id, None),
                Err(err) => {
                    warn!(from = %from, to = %to, %err, "link lookup failed, using zero identifier");
                    (MacAddr::ZERO, Some(err.to_string()))
                }
            };
            if args.json {
                print_json(&EdgeOutput {
                    from: from.clone(),
                    to: to.clone(),
                    id,
                    error,
                })?;
            } else {
                println!("{from}->{to}: {} ({id})", id.to_hex12());
            }
        }
        Cmd::Coord { node } => {
            let coords = paths.load_coords()?;
            let embedder = AddressEmbedder::new(&edges).with_coords(&coords);
            let address = embedder.derive_coordinate_address(node.id)?;
            let coord = butterfly_rs::embed::coordinate_from_address(address);
            if args.json {
                print_json(&CoordOutput {
                    node: *node,
                    x: coord.x,
                    y: coord.y,
                    address,
                })?;
            } else {
                println!("{address}");
            }
        }
        Cmd::Plan { mode } => {
            let plan = match mode {
                AppMode::Greedy => {
                    let coords = paths.load_coords()?;
                    let embedder = AddressEmbedder::new(&edges).with_coords(&coords);
                    AddressingPlan::for_mode(*mode, &embedder, &[])?
                }
                _ => {
                    let embedder = AddressEmbedder::new(&edges);
                    AddressingPlan::for_mode(*mode, &embedder, &butterfly::builtin_routes())?
                }
            };
            if args.json {
                print_json(&plan)?;
            } else {
                for (node, cmd) in plan.commands() {
                    println!("{node}: {cmd}");
                }
            }
        }
        Cmd::Matches { node, mac } => {
            let links = matching_links(&edges, node.id, *mac);
            if args.json {
                print_json(&MatchesOutput {
                    node: *node,
                    mac: *mac,
                    links,
                })?;
            } else {
                for m in &links {
                    match m.delivery {
                        Some(d) => println!(
                            "port {} -> {} (deliver as {} {})",
                            m.port, m.neighbor, d.mac, d.ip
                        ),
                        None => println!("port {} -> {}", m.port, m.neighbor),
                    }
                }
            }
        }
        Cmd::Topo => print_topo(&edges, args.json)?,
    }
    Ok(())
}

fn print_topo(edges: &EdgeTable, json: bool) -> CliResult<()> {
    let nodes: Vec<NodeOutput> = edges
        .nodes()
        .map(|n| NodeOutput {
            node: edges.label(n),
            neighbors: edges
                .neighbors(n)
                .map(|(to, entry)| NeighborOutput {
                    neighbor: edges.label(to),
                    entry: *entry,
                })
                .collect(),
        })
        .collect();
    let links: Vec<(NodeLabel, NodeLabel)> = edges
        .links()
        .into_iter()
        .map(|(a, b): (NodeId, NodeId)| (edges.label(a), edges.label(b)))
        .collect();

    if json {
        return print_json(&TopoOutput { nodes, links });
    }

    print!("{}", butterfly::ASCII_ART);
    for n in &nodes {
        let kind = n.node.kind.map(|k| k.to_string()).unwrap_or_default();
        println!("{} ({kind})", n.node);
        for nb in &n.neighbors {
            println!("  port {} -> {}: {}", nb.entry.port, nb.neighbor, nb.entry.id);
        }
    }
    for (a, b) in &links {
        println!("link {a} - {b}");
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing，输出到 stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
