//! Standalone scripts that manage shared datablocks in the open file.

pub mod cleanup;
pub mod normal_group;

pub use cleanup::{cleanup_script, images_matching_script};
pub use normal_group::{NORMAL_MAP_GROUP, normal_group_script};
