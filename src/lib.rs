//! Texture-set importer for Blender.
//!
//! Texture folders following the `<Material>_<Map>.<ext>` convention are
//! grouped per material ([`textures::collect_maps`]) and turned into a Python
//! script ([`material::MaterialGraphBuilder`]) that Blender runs to build the
//! shader graphs, either from a file or over the Live-Link socket.

pub mod assets;
pub mod config;
pub mod core;
pub mod error;
pub mod material;
pub mod textures;

pub use config::{CleanupTarget, ImportConfig, Renderer};
pub use error::{Error, Result};
