use crate::core::nodes::{
    NodeGroupInput, NodeGroupOutput, ShaderNodeCombineColor, ShaderNodeNormalMap,
    ShaderNodeSeparateColor,
};
use crate::core::tree::NodeTree;
use crate::core::types::{Color, Float, NodeGroupInputExt, Vector};

pub const NORMAL_MAP_GROUP: &str = "RG_Normal_Map";
pub const INPUT_IMAGE: &str = "Color";
pub const INPUT_STRENGTH: &str = "Strength";
pub const OUTPUT_NORMAL: &str = "Normal";

/// Builds `RG_Normal_Map`: the image's red and green channels with blue forced
/// to 1.0, fed through a tangent-space Normal Map node.
///
/// With `keep_existing` the group is only built when the file has none yet;
/// otherwise any existing group of that name is replaced.
pub fn normal_group_script(keep_existing: bool) -> String {
    NodeTree::new_shader_group(NORMAL_MAP_GROUP)
        .with_input::<Color>(INPUT_IMAGE)
        .with_input::<Float>(INPUT_STRENGTH)
        .with_output::<Vector>(OUTPUT_NORMAL)
        .keep_existing(keep_existing)
        .build(|| {
            let group_in = NodeGroupInput::new().location(-200.0, 0.0);

            let sep = ShaderNodeSeparateColor::new()
                .location(0.0, 0.0)
                .set_input(0, group_in.socket::<Color>(INPUT_IMAGE));

            let comb = ShaderNodeCombineColor::new()
                .location(200.0, 0.0)
                .set_input(0, sep.output::<Float>(0))
                .set_input(1, sep.output::<Float>(1))
                .with_blue(1.0_f32);

            let normal_map = ShaderNodeNormalMap::new()
                .location(400.0, 0.0)
                .with_strength(group_in.socket::<Float>(INPUT_STRENGTH))
                .with_color(comb.out_color());

            NodeGroupOutput::new()
                .location(600.0, 0.0)
                .set_named_input(OUTPUT_NORMAL, normal_map.out_normal());
        })
}
