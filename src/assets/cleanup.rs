use crate::config::CleanupTarget;
use crate::core::types::python_string_literal;
use std::fmt::Write;

impl CleanupTarget {
    fn collection(self) -> &'static str {
        match self {
            CleanupTarget::Materials => "bpy.data.materials",
            CleanupTarget::Images => "bpy.data.images",
        }
    }
}

/// Removes every datablock of each selected kind.
///
/// WARNING: this empties the open file; keep a backup.
pub fn cleanup_script<'a>(targets: impl IntoIterator<Item = &'a CleanupTarget>) -> String {
    let mut code = String::new();
    for target in targets {
        let collection = target.collection();
        let _ = write!(
            code,
            "\n# --- Cleanup: {target:?} ---\nfor _block in list({collection}):\n    {collection}.remove(_block)\n"
        );
    }
    code
}

/// Removes images whose name contains any of `material_names`, so a
/// re-import does not pick up stale `Wall_Alb.png.001` style duplicates.
pub fn images_matching_script<'a>(material_names: impl IntoIterator<Item = &'a str>) -> String {
    let names: Vec<String> = material_names
        .into_iter()
        .map(python_string_literal)
        .collect();
    if names.is_empty() {
        return String::new();
    }

    let mut code = String::from("\n# --- Cleanup: images of imported materials ---\n");
    let _ = writeln!(code, "for _name in [{}]:", names.join(", "));
    code.push_str("    for _img in [i for i in bpy.data.images if _name in i.name]:\n");
    code.push_str("        bpy.data.images.remove(_img)\n");
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_all() {
        let script = cleanup_script(&[CleanupTarget::Materials, CleanupTarget::Images]);
        assert!(script.contains("for _block in list(bpy.data.materials):\n    bpy.data.materials.remove(_block)\n"));
        assert!(script.contains("for _block in list(bpy.data.images):\n    bpy.data.images.remove(_block)\n"));
    }

    #[test]
    fn test_cleanup_nothing() {
        assert!(cleanup_script(&[]).is_empty());
        assert!(images_matching_script(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_images_matching_names() {
        let script = images_matching_script(["Wall", "Fl\"oor"]);
        assert!(script.contains(r#"for _name in ["Wall", "Fl\"oor"]:"#));
        assert!(script.contains("if _name in i.name"));
    }
}
