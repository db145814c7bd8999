use crate::assets::{cleanup_script, images_matching_script, normal_group_script};
use crate::config::{CleanupTarget, ImportConfig, Renderer};
use crate::core::project::BlenderProject;
use crate::core::tree::NodeTree;
use crate::material::slot::{Target, resolve_maps};
use crate::material::{cycles, octane};
use crate::textures::{GroupedResult, MaterialGroup};

/// Turns grouped texture maps into material-building scripts.
pub struct MaterialGraphBuilder<'c> {
    config: &'c ImportConfig,
}

impl<'c> MaterialGraphBuilder<'c> {
    pub fn new(config: &'c ImportConfig) -> Self {
        Self { config }
    }

    /// One material: recreated from scratch, surface shader plus a texture
    /// node per handled map.
    pub fn material_script(&self, base: &str, group: &MaterialGroup) -> String {
        let name = self.config.material_name(base);
        let maps = resolve_maps(group, self.config);
        log::info!(
            "building material '{}' ({} of {} maps wired for {:?})",
            name,
            maps.len(),
            group.len(),
            self.config.renderer
        );

        NodeTree::new_material(&name).build(|| match self.config.renderer {
            Renderer::Cycles => cycles::populate(&maps, self.config),
            Renderer::Octane => octane::populate(&maps, self.config),
        })
    }

    fn needs_normal_group(&self, maps: &GroupedResult) -> bool {
        self.config.renderer == Renderer::Cycles
            && maps.iter().any(|(_, group)| {
                resolve_maps(group, self.config)
                    .iter()
                    .any(|m| m.slot.target == Target::NormalGroup)
            })
    }

    /// The complete import: cleanup, normal group if required, then every
    /// material in first-seen order.
    pub fn import_project(&self, maps: &GroupedResult) -> BlenderProject {
        let mut project = BlenderProject::new();

        if self.config.cleanup.contains(&CleanupTarget::Materials) {
            project = project.add_script(&cleanup_script(&[CleanupTarget::Materials]));
        }
        if self.config.cleanup.contains(&CleanupTarget::Images) {
            project = project.add_script(&images_matching_script(maps.names()));
        }
        if self.config.ensure_normal_group && self.needs_normal_group(maps) {
            project = project.add_script(&normal_group_script(true));
        }

        for (base, group) in maps.iter() {
            project = project.add_script(&self.material_script(base, group));
        }
        project
    }
}
