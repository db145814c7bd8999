pub mod context;
pub mod live_link;
pub mod project;
pub mod tree;
pub mod types;

/// Typed node builders generated from `blender_nodes_dump.json`.
#[allow(dead_code, clippy::all)]
pub mod nodes {
    include!(concat!(env!("OUT_DIR"), "/nodes.rs"));
}
