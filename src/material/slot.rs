use crate::config::{ImportConfig, Renderer};
use crate::material::{cycles, octane};
use crate::textures::{MapDescriptor, MapKind, MaterialGroup};

/// Image colorspace; only meaningful for Blender's own image nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    NonColor,
}

impl ColorSpace {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorSpace::Srgb => "sRGB",
            ColorSpace::NonColor => "Non-Color",
        }
    }
}

/// Where a texture's color output ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Straight into the named input of the surface shader.
    Surface(&'static str),
    /// Through the normal-map group into the surface's `Normal` input.
    NormalGroup,
    /// Loaded and parked next to the graph, not connected.
    Unlinked,
}

/// What a renderer does with one map kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSlot {
    pub location: (f32, f32),
    pub colorspace: Option<ColorSpace>,
    pub target: Target,
}

/// Node position for textures that are loaded but not wired.
pub const UNUSED_X: f32 = -600.0;
pub const UNUSED_Y: f32 = 0.0;

pub fn slot_for(renderer: Renderer, kind: MapKind) -> Option<TextureSlot> {
    match renderer {
        Renderer::Cycles => cycles::slot(kind),
        Renderer::Octane => octane::slot(kind),
    }
}

/// A descriptor that survived filtering, paired with its handler.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMap<'g> {
    pub kind: MapKind,
    pub slot: TextureSlot,
    pub descriptor: &'g MapDescriptor,
}

/// Drops ignored and unhandled map codes, keeping group order.
pub fn resolve_maps<'g>(group: &'g MaterialGroup, config: &ImportConfig) -> Vec<ResolvedMap<'g>> {
    group
        .iter()
        .filter_map(|descriptor| {
            let code = descriptor.map_code.as_str();
            if config.is_ignored(code) {
                log::debug!("ignoring map '{}' ({})", code, descriptor.file_name);
                return None;
            }
            let Some(kind) = MapKind::from_code(code) else {
                log::warn!("unknown map code '{}' ({}), skipped", code, descriptor.file_name);
                return None;
            };
            let Some(slot) = slot_for(config.renderer, kind) else {
                log::debug!("{:?} has no handler for '{}', skipped", config.renderer, code);
                return None;
            };
            Some(ResolvedMap {
                kind,
                slot,
                descriptor,
            })
        })
        .collect()
}
