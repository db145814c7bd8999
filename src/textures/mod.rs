pub mod grouping;
pub mod kind;
pub mod scan;

pub use grouping::{GroupedResult, MapDescriptor, MaterialGroup, collect_maps, parse_map_name};
pub use kind::MapKind;
pub use scan::list_files;
