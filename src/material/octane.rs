//! Octane graphs around a Standard Surface material.

use crate::config::ImportConfig;
use crate::core::nodes::{OctaneRgbImage, OctaneStandardSurfaceMaterial, ShaderNodeOutputMaterial};
use crate::core::types::{Shader, python_string_literal};
use crate::material::image::load_image;
use crate::material::slot::{ResolvedMap, Target, TextureSlot, UNUSED_X, UNUSED_Y};
use crate::material::{BSDF_LOCATION, OUTPUT_LOCATION, SURFACE_NODE_NAME};
use crate::textures::MapKind;

pub fn slot(kind: MapKind) -> Option<TextureSlot> {
    let (location, target) = match kind {
        MapKind::Albedo => ((-400.0, 600.0), Target::Surface("Base color")),
        MapKind::AmbientOcclusion => ((UNUSED_X, UNUSED_Y), Target::Unlinked),
        MapKind::Roughness => ((-400.0, 400.0), Target::Surface("Specular roughness")),
        MapKind::Metallic => ((-400.0, 500.0), Target::Surface("Metalness")),
        MapKind::Normal => ((-400.0, 300.0), Target::Surface("Normal")),
        MapKind::Opacity => ((-400.0, 200.0), Target::Surface("Opacity")),
        MapKind::EmissionMask => ((UNUSED_X, UNUSED_Y + 50.0), Target::Unlinked),
        MapKind::Emission => ((UNUSED_X, UNUSED_Y + 100.0), Target::Unlinked),
        MapKind::TintColor => ((UNUSED_X, UNUSED_Y + 200.0), Target::Unlinked),
    };
    // Octane image nodes manage their own gamma
    Some(TextureSlot {
        location,
        colorspace: None,
        target,
    })
}

pub fn populate(maps: &[ResolvedMap<'_>], config: &ImportConfig) {
    let output = ShaderNodeOutputMaterial::new().location(OUTPUT_LOCATION.0, OUTPUT_LOCATION.1);
    let surface = OctaneStandardSurfaceMaterial::new()
        .set_property("name", python_string_literal(SURFACE_NODE_NAME))
        .location(BSDF_LOCATION.0, BSDF_LOCATION.1);
    output.with_surface(surface.output::<Shader>(0));

    for map in maps {
        let (x, y) = map.slot.location;
        let mut tex = OctaneRgbImage::new()
            .label(map.kind.code())
            .hide(true)
            .location(x, y);
        if map.kind == MapKind::Normal {
            tex = tex.with_power(config.octane_normal_power);
        }
        load_image(&tex.name, map.descriptor, map.slot.colorspace);

        match map.slot.target {
            Target::Surface(socket) => {
                surface.clone().set_named_input(socket, tex.out_texture_out());
            }
            // no group indirection on Octane; normals go straight in
            Target::NormalGroup | Target::Unlinked => {}
        }
    }
}
