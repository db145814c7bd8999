//! Filename-convention parsing and per-material grouping.
//!
//! Texture files are expected to be named `<materialBase>_<mapCode>.<ext>`,
//! e.g. `Wall_Alb.png`. Matching is anchored at the end only: the pattern is
//! `(\w+)_(\w{2,3})\.<ext>$` searched leftmost-first, so `Foo_Bar_Alb.png`
//! yields base `Foo_Bar` and a non-word prefix such as `"my Wall_Alb.png"` is
//! skipped over, yielding `Wall`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// applied to the name with `.<ext>` already removed
static MAP_STEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)_(\w{2,3})$").expect("static pattern"));

/// One texture file and the role it plays in its material.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MapDescriptor {
    pub map_code: String,
    pub file_name: String,
    pub full_path: PathBuf,
}

/// Map code -> descriptor for a single material, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialGroup {
    maps: Vec<MapDescriptor>,
}

impl MaterialGroup {
    /// Inserts or replaces the descriptor for `descriptor.map_code`. A
    /// replaced entry keeps its position.
    pub fn insert(&mut self, descriptor: MapDescriptor) {
        match self
            .maps
            .iter_mut()
            .find(|m| m.map_code == descriptor.map_code)
        {
            Some(existing) => *existing = descriptor,
            None => self.maps.push(descriptor),
        }
    }

    pub fn get(&self, map_code: &str) -> Option<&MapDescriptor> {
        self.maps.iter().find(|m| m.map_code == map_code)
    }

    pub fn contains(&self, map_code: &str) -> bool {
        self.get(map_code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapDescriptor> {
        self.maps.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(|m| m.map_code.as_str())
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl Serialize for MaterialGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.maps.len()))?;
        for descriptor in &self.maps {
            map.serialize_entry(&descriptor.map_code, descriptor)?;
        }
        map.end()
    }
}

/// Material base name -> group, in the order materials were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedResult {
    materials: Vec<(String, MaterialGroup)>,
    index: HashMap<String, usize>,
}

impl GroupedResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn group_mut(&mut self, base: &str) -> &mut MaterialGroup {
        let slot = match self.index.get(base) {
            Some(&slot) => slot,
            None => {
                self.materials
                    .push((base.to_string(), MaterialGroup::default()));
                let slot = self.materials.len() - 1;
                self.index.insert(base.to_string(), slot);
                slot
            }
        };
        &mut self.materials[slot].1
    }

    pub fn insert(&mut self, base: &str, descriptor: MapDescriptor) {
        self.group_mut(base).insert(descriptor);
    }

    pub fn get(&self, base: &str) -> Option<&MaterialGroup> {
        self.index.get(base).map(|&slot| &self.materials[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterialGroup)> {
        self.materials.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Total number of descriptors across all materials.
    pub fn map_count(&self) -> usize {
        self.materials.iter().map(|(_, g)| g.len()).sum()
    }
}

impl Serialize for GroupedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.materials.len()))?;
        for (base, group) in &self.materials {
            map.serialize_entry(base, group)?;
        }
        map.end()
    }
}

/// Splits a filename into `(material_base, map_code)` if it follows the
/// naming convention for `extension`.
pub fn parse_map_name<'a>(file_name: &'a str, extension: &str) -> Option<(&'a str, &'a str)> {
    let stem = file_name
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    let caps = MAP_STEM_RE.captures(stem)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Groups `filenames` into per-material map sets.
///
/// Names that do not follow the convention are skipped, never reported as
/// errors. Later duplicates of a `(base, code)` pair replace earlier ones.
pub fn collect_maps<S: AsRef<str>>(directory: &Path, filenames: &[S], extension: &str) -> GroupedResult {
    let mut result = GroupedResult::new();

    for file_name in filenames {
        let file_name = file_name.as_ref();
        log::trace!("-> {}", file_name);

        let Some((base, code)) = parse_map_name(file_name, extension) else {
            log::debug!("skipping '{}': not <material>_<map>.{}", file_name, extension);
            continue;
        };

        result.insert(
            base,
            MapDescriptor {
                map_code: code.to_string(),
                file_name: file_name.to_string(),
                full_path: directory.join(file_name),
            },
        );
    }

    result
}

// ----------------------------------------------------------------------------
// unittest
// ----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn codes(group: &MaterialGroup) -> Vec<&str> {
        group.codes().collect()
    }

    #[test]
    fn test_groups_by_material() {
        let files = ["Wall_Alb.png", "Wall_Nrm.png", "Floor_Mtl.png", "readme.txt"];
        let result = collect_maps(Path::new("/tex"), &files, "png");

        assert_eq!(result.names().collect::<Vec<_>>(), ["Wall", "Floor"]);
        assert_eq!(codes(result.get("Wall").unwrap()), ["Alb", "Nrm"]);
        assert_eq!(codes(result.get("Floor").unwrap()), ["Mtl"]);
        assert_eq!(result.map_count(), 3);
    }

    #[test]
    fn test_descriptor_fields() {
        let result = collect_maps(Path::new("/tex"), &["Prop_Nrm.png"], "png");
        let nrm = result.get("Prop").unwrap().get("Nrm").unwrap();

        assert_eq!(
            nrm,
            &MapDescriptor {
                map_code: "Nrm".into(),
                file_name: "Prop_Nrm.png".into(),
                full_path: PathBuf::from("/tex/Prop_Nrm.png"),
            }
        );
    }

    #[test]
    fn test_duplicates_overwrite() {
        let result = collect_maps(Path::new("/tex"), &["Wall_Alb.png", "Wall_Alb.png"], "png");
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("Wall").unwrap().len(), 1);
    }

    #[test]
    fn test_last_seen_duplicate_wins_but_keeps_position() {
        let mut result = GroupedResult::new();
        let desc = |code: &str, file: &str| MapDescriptor {
            map_code: code.into(),
            file_name: file.into(),
            full_path: PathBuf::from(file),
        };
        result.insert("Wall", desc("Alb", "first.png"));
        result.insert("Wall", desc("Nrm", "n.png"));
        result.insert("Wall", desc("Alb", "second.png"));

        let group = result.get("Wall").unwrap();
        assert_eq!(codes(group), ["Alb", "Nrm"]);
        assert_eq!(group.get("Alb").unwrap().file_name, "second.png");
    }

    #[test]
    fn test_later_file_for_same_map_replaces_earlier_in_place() {
        let files = ["Wall_Alb.png", "Wall_Nrm.png", "x Wall_Alb.png"];
        let result = collect_maps(Path::new("/tex"), &files, "png");

        assert_eq!(result.len(), 1);
        let wall = result.get("Wall").unwrap();
        assert_eq!(codes(wall), ["Alb", "Nrm"]);
        let albedo = wall.get("Alb").unwrap();
        assert_eq!(albedo.file_name, "x Wall_Alb.png");
        assert_eq!(albedo.full_path, Path::new("/tex").join("x Wall_Alb.png"));
    }

    #[test]
    fn test_map_code_length_bounds() {
        let files = ["a_b.png", "a_Ao.png", "a_Alb.png", "a_Albd.png"];
        let result = collect_maps(Path::new("."), &files, "png");
        assert_eq!(codes(result.get("a").unwrap()), ["Ao", "Alb"]);

        let short = collect_maps(Path::new("."), &["a_b.png"], "png");
        assert!(short.is_empty());
    }

    #[test]
    fn test_material_base_takes_everything_before_last_suffix() {
        assert_eq!(parse_map_name("Foo_Bar_Alb.png", "png"), Some(("Foo_Bar", "Alb")));
        assert_eq!(parse_map_name("my Wall_Alb.png", "png"), Some(("Wall", "Alb")));
        assert_eq!(parse_map_name("T_Rock_01_Rgh.png", "png"), Some(("T_Rock_01", "Rgh")));
    }

    #[test]
    fn test_extension_is_literal_and_case_sensitive() {
        assert_eq!(parse_map_name("Wall_Alb.PNG", "png"), None);
        assert_eq!(parse_map_name("Wall_Albxpng", "png"), None);
        assert_eq!(parse_map_name("Wall_Alb.png.bak", "png"), None);
        assert_eq!(parse_map_name("Wall_Alb.tar.gz", "tar.gz"), Some(("Wall", "Alb")));
    }

    #[test]
    fn test_non_matching_names_are_dropped() {
        let files = ["Wall.png", "_Alb.png", "Wall_.png", "Wall-Alb.png", ""];
        assert!(collect_maps(Path::new("."), &files, "png").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let files = vec![
            "Rock_Alb.png".to_string(),
            "Rock_Rgh.png".to_string(),
            "Moss_Alb.png".to_string(),
        ];
        let a = collect_maps(Path::new("/x"), &files, "png");
        let b = collect_maps(Path::new("/x"), &files, "png");
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_keeps_insertion_order() {
        let files = ["Zed_Alb.png", "Abc_Nrm.png", "Zed_Ao.png"];
        let result = collect_maps(Path::new("/t"), &files, "png");
        let json = serde_json::to_string(&result).unwrap();

        let zed = json.find("\"Zed\"").unwrap();
        let abc = json.find("\"Abc\"").unwrap();
        assert!(zed < abc);
        assert!(json.contains(
            r#""Ao":{"map_code":"Ao","file_name":"Zed_Ao.png","full_path":"/t/Zed_Ao.png"}"#
        ));
    }
}
