//! Cycles/EEVEE graphs around a Principled BSDF.

use crate::assets::normal_group::{INPUT_IMAGE, INPUT_STRENGTH, NORMAL_MAP_GROUP, OUTPUT_NORMAL};
use crate::config::ImportConfig;
use crate::core::nodes::{
    ShaderNodeBsdfPrincipled, ShaderNodeGroup, ShaderNodeOutputMaterial, ShaderNodeTexImage,
};
use crate::core::types::{Float, NodeSocket, ShaderNodeGroupExt, Vector, python_string_literal};
use crate::material::image::load_image;
use crate::material::slot::{ColorSpace, ResolvedMap, Target, TextureSlot, UNUSED_X, UNUSED_Y};
use crate::material::{BSDF_LOCATION, OUTPUT_LOCATION, SURFACE_NODE_NAME};
use crate::textures::MapKind;

const NORMAL_GROUP_LOCATION: (f32, f32) = (-60.0, 135.0);

pub fn slot(kind: MapKind) -> Option<TextureSlot> {
    let (location, target) = match kind {
        MapKind::Albedo => ((-400.0, 600.0), Target::Surface("Base Color")),
        MapKind::AmbientOcclusion => ((UNUSED_X, UNUSED_Y), Target::Unlinked),
        MapKind::Roughness => ((-400.0, 400.0), Target::Surface("Roughness")),
        MapKind::Metallic => ((-400.0, 500.0), Target::Surface("Metallic")),
        MapKind::Normal => ((-400.0, 300.0), Target::NormalGroup),
        MapKind::Opacity => ((-400.0, 200.0), Target::Surface("Alpha")),
        MapKind::EmissionMask => ((UNUSED_X, UNUSED_Y + 50.0), Target::Unlinked),
        MapKind::Emission => ((UNUSED_X, UNUSED_Y + 100.0), Target::Unlinked),
        MapKind::TintColor => return None,
    };
    let colorspace = if kind.is_color() {
        ColorSpace::Srgb
    } else {
        ColorSpace::NonColor
    };
    Some(TextureSlot {
        location,
        colorspace: Some(colorspace),
        target,
    })
}

/// Fills the current tree; must run inside a material build.
pub fn populate(maps: &[ResolvedMap<'_>], config: &ImportConfig) {
    let output = ShaderNodeOutputMaterial::new().location(OUTPUT_LOCATION.0, OUTPUT_LOCATION.1);
    let bsdf = ShaderNodeBsdfPrincipled::new()
        .set_property("name", python_string_literal(SURFACE_NODE_NAME))
        .location(BSDF_LOCATION.0, BSDF_LOCATION.1);
    output.with_surface(bsdf.out_bsdf());

    for map in maps {
        let (x, y) = map.slot.location;
        let tex = ShaderNodeTexImage::new()
            .label(map.kind.code())
            .hide(true)
            .location(x, y);
        load_image(&tex.name, map.descriptor, map.slot.colorspace);

        match map.slot.target {
            Target::Surface(socket) => {
                bsdf.clone().set_named_input(socket, tex.out_color());
            }
            Target::NormalGroup => {
                let normal = ShaderNodeGroup::new()
                    .with_node_tree(NORMAL_MAP_GROUP)
                    .location(NORMAL_GROUP_LOCATION.0, NORMAL_GROUP_LOCATION.1)
                    .set_named_input(INPUT_STRENGTH, NodeSocket::<Float>::from(config.normal_strength))
                    .set_named_input(INPUT_IMAGE, tex.out_color());
                bsdf.clone()
                    .with_normal(normal.out_socket::<Vector>(OUTPUT_NORMAL));
            }
            Target::Unlinked => {}
        }
    }
}
