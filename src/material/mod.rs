//! Material graph generation from grouped texture maps.

pub mod builder;
pub mod cycles;
pub mod image;
pub mod octane;
pub mod slot;

pub use builder::MaterialGraphBuilder;
pub use slot::{ColorSpace, ResolvedMap, Target, TextureSlot, resolve_maps, slot_for};

/// Blender node name given to the surface shader so it can be found by name.
pub const SURFACE_NODE_NAME: &str = "BSDF";
pub const OUTPUT_LOCATION: (f32, f32) = (540.0, 600.0);
pub const BSDF_LOCATION: (f32, f32) = (200.0, 600.0);
