use crate::core::types::is_link_expr;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// A node recorded during a tree build, plus everything needed to emit it.
///
/// Socket keys are Python subscripts (`0`, `"Base Color"`), so both positional
/// and named sockets share one map.
#[derive(Clone, Debug)]
pub struct NodeData {
    pub name: String,
    pub bl_idname: String,
    pub properties: BTreeMap<String, String>,
    pub inputs: BTreeMap<String, String>,
    pub post_creation_script: String,
}

impl NodeData {
    pub fn new(name: String, bl_idname: String) -> Self {
        Self {
            name,
            bl_idname,
            properties: BTreeMap::new(),
            inputs: BTreeMap::new(),
            post_creation_script: String::new(),
        }
    }

    pub fn creation_script(&self) -> String {
        let mut code = format!("{} = tree.nodes.new('{}')\n", self.name, self.bl_idname);
        for (k, v) in &self.properties {
            code.push_str(&format!("{}.{} = {}\n", self.name, k, v));
        }
        for (key, expr) in &self.inputs {
            if !is_link_expr(expr) {
                code.push_str(&format!(
                    "{}.inputs[{}].default_value = {}\n",
                    self.name, key, expr
                ));
            }
        }
        code.push_str(&self.post_creation_script);
        code
    }

    pub fn links_script(&self) -> String {
        self.inputs
            .iter()
            .filter(|(_, expr)| is_link_expr(expr))
            .map(|(key, expr)| format!("tree.links.new({}, {}.inputs[{}])\n", expr, self.name, key))
            .collect()
    }
}

pub type Scope = Vec<NodeData>;

pub struct BuildContext {
    stack: Vec<Scope>,
}

impl BuildContext {
    fn new() -> Self {
        Self {
            stack: vec![Vec::new()],
        }
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut NodeData> {
        self.stack
            .iter_mut()
            .rev()
            .find_map(|scope| scope.iter_mut().find(|n| n.name == name))
    }

    pub fn add_node(&mut self, data: NodeData) {
        if let Some(scope) = self.stack.last_mut() {
            scope.push(data);
        }
    }

    pub fn update_property(&mut self, name: &str, key: &str, val: String) {
        if let Some(n) = self.find_mut(name) {
            n.properties.insert(key.to_string(), val);
        }
    }

    pub fn update_input(&mut self, name: &str, socket: String, val: String) {
        if let Some(n) = self.find_mut(name) {
            n.inputs.insert(socket, val);
        }
    }

    pub fn append_post_creation(&mut self, name: &str, script: &str) {
        if let Some(n) = self.find_mut(name) {
            n.post_creation_script.push_str(script);
        }
    }

    pub fn enter_scope(&mut self) {
        self.stack.push(Vec::new());
    }

    pub fn exit_scope(&mut self) -> Scope {
        // the root scope is never popped
        if self.stack.len() > 1 {
            self.stack.pop().unwrap_or_default()
        } else {
            std::mem::take(&mut self.stack[0])
        }
    }
}

pub static GLOBAL_CONTEXT: Lazy<Mutex<BuildContext>> =
    Lazy::new(|| Mutex::new(BuildContext::new()));

fn context() -> MutexGuard<'static, BuildContext> {
    // a panic inside a tree body leaves the data consistent, so keep going
    GLOBAL_CONTEXT
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_node(data: NodeData) {
    context().add_node(data);
}
pub fn update_property(name: &str, key: &str, val: String) {
    context().update_property(name, key, val);
}
pub fn update_input(name: &str, socket: String, val: String) {
    context().update_input(name, socket, val);
}
pub fn append_post_creation(name: &str, script: &str) {
    context().append_post_creation(name, script);
}
pub fn enter_zone() {
    context().enter_scope();
}
pub fn exit_zone() -> Scope {
    context().exit_scope()
}

#[cfg(test)]
pub mod test_utils {
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    /// Serializes tests that record nodes into the global context.
    pub static GLOBAL_TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
}

// ----------------------------------------------------------------------------
// unittest
// ----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::test_utils::GLOBAL_TEST_LOCK;

    #[test]
    fn test_defaults_and_links_are_split_by_phase() {
        let mut node = NodeData::new("bsdf".into(), "ShaderNodeBsdfPrincipled".into());
        node.inputs
            .insert("\"Roughness\"".into(), "0.5000".into());
        node.inputs
            .insert("\"Base Color\"".into(), "tex.outputs[\"Color\"]".into());
        node.properties.insert("label".into(), "\"Alb\"".into());

        let creation = node.creation_script();
        assert!(creation.starts_with("bsdf = tree.nodes.new('ShaderNodeBsdfPrincipled')\n"));
        assert!(creation.contains("bsdf.label = \"Alb\"\n"));
        assert!(creation.contains("bsdf.inputs[\"Roughness\"].default_value = 0.5000\n"));
        assert!(!creation.contains("Base Color"));

        let links = node.links_script();
        assert_eq!(
            links,
            "tree.links.new(tex.outputs[\"Color\"], bsdf.inputs[\"Base Color\"])\n"
        );
    }

    #[test]
    fn test_post_creation_runs_after_defaults() {
        let _lock = GLOBAL_TEST_LOCK.lock().unwrap();

        enter_zone();
        add_node(NodeData::new("tex".into(), "ShaderNodeTexImage".into()));
        update_input("tex", "\"Vector\"".into(), "(0.0000, 0.0000, 0.0000)".into());
        append_post_creation("tex", "tex.image = img\n");
        append_post_creation("missing", "never.emitted = True\n");
        let nodes = exit_zone();

        assert_eq!(nodes.len(), 1);
        let creation = nodes[0].creation_script();
        assert!(creation.ends_with("tex.image = img\n"));
        assert!(creation.find("default_value").unwrap() < creation.find("tex.image").unwrap());
        assert!(!creation.contains("never.emitted"));
        assert!(nodes[0].links_script().is_empty());
    }

    #[test]
    fn test_zones_collect_their_own_nodes() {
        let _lock = GLOBAL_TEST_LOCK.lock().unwrap();

        enter_zone();
        add_node(NodeData::new("outer".into(), "ShaderNodeGroup".into()));
        enter_zone();
        add_node(NodeData::new("inner".into(), "ShaderNodeGroup".into()));
        update_property("outer", "hide", "True".into());
        let inner = exit_zone();
        let outer = exit_zone();

        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].name, "inner");
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].properties.get("hide").unwrap(), "True");
    }
}
