use crate::core::context::append_post_creation;
use crate::core::types::python_string_literal;
use crate::material::slot::ColorSpace;
use crate::textures::MapDescriptor;
use std::fmt::Write;

/// Emits the image (re)load for an image node: a stale datablock with the same
/// file name is dropped first so edits on disk are picked up.
pub fn load_image(node: &str, descriptor: &MapDescriptor, colorspace: Option<ColorSpace>) {
    let name = python_string_literal(&descriptor.file_name);
    let path = python_string_literal(&descriptor.full_path.to_string_lossy());

    let mut code = String::new();
    let _ = writeln!(code, "if {name} in bpy.data.images:");
    let _ = writeln!(code, "    bpy.data.images.remove(bpy.data.images[{name}])");
    let _ = writeln!(code, "{node}.image = bpy.data.images.load({path})");
    if let Some(colorspace) = colorspace {
        let _ = writeln!(
            code,
            "{node}.image.colorspace_settings.name = '{}'",
            colorspace.as_str()
        );
    }
    append_post_creation(node, &code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context;
    use crate::core::context::test_utils::GLOBAL_TEST_LOCK;
    use crate::core::nodes::ShaderNodeTexImage;
    use std::path::PathBuf;

    #[test]
    fn test_reload_then_colorspace() {
        let _lock = GLOBAL_TEST_LOCK.lock().unwrap();

        context::enter_zone();
        let tex = ShaderNodeTexImage::new();
        let descriptor = MapDescriptor {
            map_code: "Rgh".into(),
            file_name: "Wall_Rgh.png".into(),
            full_path: PathBuf::from("/tex/Wall_Rgh.png"),
        };
        load_image(&tex.name, &descriptor, Some(ColorSpace::NonColor));
        let nodes = context::exit_zone();

        let post = &nodes[0].post_creation_script;
        let remove = post
            .find("bpy.data.images.remove(bpy.data.images[\"Wall_Rgh.png\"])")
            .unwrap();
        let load = post
            .find(&format!("{}.image = bpy.data.images.load(\"/tex/Wall_Rgh.png\")", tex.name))
            .unwrap();
        let cs = post.find("colorspace_settings.name = 'Non-Color'").unwrap();
        assert!(remove < load && load < cs);
    }
}
