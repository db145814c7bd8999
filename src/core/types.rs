pub struct Float;
pub struct Vector;
pub struct Color;
pub struct Bool;
pub struct Shader;

pub fn python_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '\t' => out.push_str(r"\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn fmt_f32(v: f32) -> String {
    if v.is_nan() {
        "float('nan')".to_string()
    } else if v.is_infinite() && v.is_sign_positive() {
        "float('inf')".to_string()
    } else if v.is_infinite() {
        "float('-inf')".to_string()
    } else {
        format!("{:.4}", v)
    }
}

pub fn fmt_bool(v: bool) -> String {
    let literal = if v { "True" } else { "False" };
    literal.to_string()
}

/// Node editor coordinates as a Python tuple.
pub fn fmt_location(x: f32, y: f32) -> String {
    format!("({}, {})", fmt_f32(x), fmt_f32(y))
}

#[derive(Debug, PartialEq, Eq)]
pub struct NodeSocket<T> {
    pub python_expr: String,
    pub _marker: std::marker::PhantomData<T>,
}

impl<T> Clone for NodeSocket<T> {
    fn clone(&self) -> Self {
        Self {
            python_expr: self.python_expr.clone(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> NodeSocket<T> {
    pub fn new_expr(expr: impl Into<String>) -> Self {
        Self {
            python_expr: expr.into(),
            _marker: std::marker::PhantomData,
        }
    }
}

/// An expression that refers to another node's output becomes a link rather
/// than a default value.
pub fn is_link_expr(expr: &str) -> bool {
    expr.contains(".outputs[")
}

impl From<f32> for NodeSocket<Float> {
    fn from(v: f32) -> Self {
        Self::new_expr(fmt_f32(v))
    }
}

impl From<bool> for NodeSocket<Bool> {
    fn from(v: bool) -> Self {
        Self::new_expr(fmt_bool(v))
    }
}

/// Interface socket type used when a group declares its inputs and outputs.
pub trait SocketDef {
    fn blender_socket_type() -> &'static str;
}

pub trait NodeGroupInputExt {
    fn socket<T>(&self, name: &str) -> NodeSocket<T>;
}

impl NodeGroupInputExt for crate::core::nodes::NodeGroupInput {
    fn socket<T>(&self, name: &str) -> NodeSocket<T> {
        NodeSocket::new_expr(format!(
            "{}.outputs[{}]",
            self.name,
            python_string_literal(name)
        ))
    }
}

pub trait ShaderNodeGroupExt {
    fn out_socket<T>(&self, name: &str) -> NodeSocket<T>;
    /// Points the group node at an existing node-group datablock.
    fn with_node_tree(self, group_name: &str) -> Self;
}

impl ShaderNodeGroupExt for crate::core::nodes::ShaderNodeGroup {
    fn out_socket<T>(&self, name: &str) -> NodeSocket<T> {
        NodeSocket::new_expr(format!(
            "{}.outputs[{}]",
            self.name,
            python_string_literal(name)
        ))
    }

    fn with_node_tree(self, group_name: &str) -> Self {
        self.set_property(
            "node_tree",
            format!("bpy.data.node_groups[{}]", python_string_literal(group_name)),
        )
    }
}

macro_rules! impl_socket_def {
    ($type:ident, $blender_sock:expr) => {
        impl SocketDef for $type {
            fn blender_socket_type() -> &'static str {
                $blender_sock
            }
        }
    };
}

impl_socket_def!(Float, "NodeSocketFloat");
impl_socket_def!(Vector, "NodeSocketVector");
impl_socket_def!(Color, "NodeSocketColor");
impl_socket_def!(Bool, "NodeSocketBool");
impl_socket_def!(Shader, "NodeSocketShader");

// ---------------------------------------------------------
// unittest
// ---------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(
            NodeSocket::<Float>::from(std::f32::consts::PI).python_expr,
            "3.1416"
        );
        assert_eq!(
            NodeSocket::<Float>::from(f32::NAN).python_expr,
            "float('nan')"
        );
        assert_eq!(NodeSocket::<Bool>::from(true).python_expr, "True");
        assert_eq!(NodeSocket::<Bool>::from(false).python_expr, "False");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(python_string_literal("Hello"), "\"Hello\"");
        assert_eq!(
            python_string_literal("It's an \"apple\"\nNext line"),
            "\"It's an \\\"apple\\\"\\nNext line\""
        );
        assert_eq!(python_string_literal("a\u{1b}b"), "\"a\\x1bb\"");
    }

    #[test]
    fn test_windows_paths_are_escaped() {
        assert_eq!(
            python_string_literal(r"X:\Assets\Wall_Alb.png"),
            r#""X:\\Assets\\Wall_Alb.png""#
        );
    }

    #[test]
    fn test_location_formatting() {
        assert_eq!(fmt_location(-400.0, 600.0), "(-400.0000, 600.0000)");
    }

    #[test]
    fn test_only_output_references_are_links() {
        assert!(is_link_expr("tex.outputs[\"Color\"]"));
        assert!(is_link_expr("group_in.outputs[0]"));
        assert!(!is_link_expr(&NodeSocket::<Float>::from(1.0).python_expr));
        assert!(!is_link_expr("(0.0000, 0.0000, 1.0000)"));
    }
}
