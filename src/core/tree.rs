use crate::core::context::{enter_zone, exit_zone};
use crate::core::types::{SocketDef, python_string_literal};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeType {
    /// A material's embedded shader tree.
    Material,
    /// A standalone `ShaderNodeTree` datablock in `bpy.data.node_groups`.
    ShaderGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InOut {
    Input,
    Output,
}

impl InOut {
    fn as_str(self) -> &'static str {
        match self {
            InOut::Input => "INPUT",
            InOut::Output => "OUTPUT",
        }
    }
}

#[derive(Debug, Clone)]
struct InterfaceSocket {
    name: String,
    in_out: InOut,
    socket_type: &'static str,
}

pub struct NodeTree {
    name: String,
    tree_type: TreeType,
    interface: Vec<InterfaceSocket>,
    keep_existing: bool,
}

impl NodeTree {
    pub fn new_material(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tree_type: TreeType::Material,
            interface: Vec::new(),
            keep_existing: false,
        }
    }

    pub fn new_shader_group(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tree_type: TreeType::ShaderGroup,
            interface: Vec::new(),
            keep_existing: false,
        }
    }

    /// Group interface sockets are created in call order; group input/output
    /// nodes expose them at the same indices.
    pub fn with_input<T: SocketDef>(mut self, name: &str) -> Self {
        self.interface.push(InterfaceSocket {
            name: name.to_string(),
            in_out: InOut::Input,
            socket_type: T::blender_socket_type(),
        });
        self
    }

    pub fn with_output<T: SocketDef>(mut self, name: &str) -> Self {
        self.interface.push(InterfaceSocket {
            name: name.to_string(),
            in_out: InOut::Output,
            socket_type: T::blender_socket_type(),
        });
        self
    }

    /// Skips the whole build when a datablock of the same name already exists.
    pub fn keep_existing(mut self, keep: bool) -> Self {
        self.keep_existing = keep;
        self
    }

    fn generate_setup_script(&self) -> String {
        let name = python_string_literal(&self.name);
        let mut code = String::new();
        match self.tree_type {
            TreeType::Material => {
                let _ = write!(
                    &mut code,
                    r#"
# --- Setup Material: {raw} ---
if {name} in bpy.data.materials:
    bpy.data.materials.remove(bpy.data.materials[{name}])
mat = bpy.data.materials.new(name={name})
mat.use_nodes = True
tree = mat.node_tree
tree.nodes.clear()
"#,
                    raw = self.name.escape_debug(),
                    name = name
                );
            }
            TreeType::ShaderGroup => {
                let _ = write!(
                    &mut code,
                    r#"
# --- Setup Node Group: {raw} ---
if {name} in bpy.data.node_groups:
    bpy.data.node_groups.remove(bpy.data.node_groups[{name}])
tree = bpy.data.node_groups.new({name}, 'ShaderNodeTree')
"#,
                    raw = self.name.escape_debug(),
                    name = name
                );
                for socket in &self.interface {
                    let _ = writeln!(
                        &mut code,
                        "tree.interface.new_socket(name={}, in_out='{}', socket_type='{}')",
                        python_string_literal(&socket.name),
                        socket.in_out.as_str(),
                        socket.socket_type
                    );
                }
            }
        }
        code
    }

    fn collection(&self) -> &'static str {
        match self.tree_type {
            TreeType::Material => "bpy.data.materials",
            TreeType::ShaderGroup => "bpy.data.node_groups",
        }
    }

    pub fn build<F>(&self, body: F) -> String
    where
        F: FnOnce(),
    {
        struct PanicGuard {
            is_panicking: bool,
        }

        impl Drop for PanicGuard {
            fn drop(&mut self) {
                if self.is_panicking {
                    let _ = exit_zone();
                }
            }
        }

        enter_zone();
        let mut guard = PanicGuard { is_panicking: true };
        body();
        guard.is_panicking = false;
        let my_nodes = exit_zone();

        log::debug!(
            "built tree '{}' ({:?}) with {} nodes",
            self.name,
            self.tree_type,
            my_nodes.len()
        );

        let mut code = self.generate_setup_script();

        code.push_str("\n# --- Node Creation Phase ---\n");
        for node in &my_nodes {
            code.push_str(&node.creation_script());
        }

        code.push_str("\n# --- Node Linking Phase ---\n");
        for node in &my_nodes {
            code.push_str(&node.links_script());
        }

        if self.keep_existing {
            let mut guarded = format!(
                "\nif {} not in {}:\n",
                python_string_literal(&self.name),
                self.collection()
            );
            guarded.push_str(&indent_block(&code));
            code = guarded;
        }

        code
    }
}

fn indent_block(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + code.len() / 8);
    for line in code.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

pub fn generate_script_header() -> String {
    "import bpy\n".to_string()
}
