use heck::{ToPascalCase, ToSnakeCase};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::Path;

// structs to parse json --------------------------------------------------------------------------
// only the socket kinds that shader and Octane material nodes expose
#[derive(Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum BlenderSocketType {
    NodeSocketBool,
    NodeSocketColor,
    NodeSocketFloat,
    NodeSocketFloatFactor,
    NodeSocketShader,
    NodeSocketVector,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct NodeSocket {
    name: String,
    identifier: String,
    #[serde(rename = "type")]
    type_name: BlenderSocketType,
    default: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct EnumItem {
    identifier: String,
    name: String,
    description: String,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct NodeProperty {
    identifier: String,
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    enum_items: Option<Vec<EnumItem>>,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct NodeDef {
    bl_idname: String,
    bl_label: String,
    #[serde(default)]
    inputs: Vec<NodeSocket>,
    #[serde(default)]
    outputs: Vec<NodeSocket>,
    #[serde(default)]
    properties: Vec<NodeProperty>,
}

#[derive(Deserialize, Debug)]
#[allow(non_snake_case)]
struct DumpRoot {
    ShaderNodes: HashMap<String, NodeDef>,
    #[serde(default)]
    OctaneNodes: HashMap<String, NodeDef>,
}

// name sanitize ----------------------------------------------------
struct NameSanitizer {
    used_names: HashSet<String>,
}

impl NameSanitizer {
    fn new() -> Self {
        Self {
            used_names: HashSet::new(),
        }
    }

    fn sanitize_and_register(
        &mut self,
        base_name: &str,
        fallback_index: usize,
        prefix: &str,
    ) -> String {
        let mut s = base_name.to_snake_case();

        if s.is_empty() {
            s = format!("idx_{}", fallback_index);
        } else if s.starts_with(|c: char| c.is_numeric()) {
            s = format!("_{}", s);
        }

        if syn::parse_str::<syn::Ident>(&s).is_err() {
            s = format!("{}_", s);
        }

        let mut final_name = format!("{}_{}", prefix, s);
        let mut counter = 0;

        while self.used_names.contains(&final_name) {
            final_name = format!("{}_{}_{}", prefix, s, counter);
            counter += 1;
        }
        let debug_mode = env::var("BANKARA_DEBUG_NODES").is_ok();
        if counter > 0 && debug_mode {
            println!(
                "cargo:warning=API naming collision: '{}_{}' was renamed to '{}'",
                prefix, s, final_name
            );
        }

        self.used_names.insert(final_name.clone());
        final_name
    }
}

// type mapping -----------------------------------------------------------------------

fn map_blender_type_to_rust(socket_type: &BlenderSocketType) -> TokenStream {
    match socket_type {
        BlenderSocketType::NodeSocketFloat | BlenderSocketType::NodeSocketFloatFactor => {
            quote! { crate::core::types::Float }
        }
        BlenderSocketType::NodeSocketVector => quote! { crate::core::types::Vector },
        BlenderSocketType::NodeSocketColor => quote! { crate::core::types::Color },
        BlenderSocketType::NodeSocketBool => quote! { crate::core::types::Bool },
        BlenderSocketType::NodeSocketShader => quote! { crate::core::types::Shader },
    }
}

// code generator body -----------------------------------------------------------------------------

/// `with_<socket>` setters, addressed by socket name so that inputs sharing
/// an index across Blender versions stay correct.
fn generate_inputs(def: &NodeDef, sanitizer: &mut NameSanitizer) -> Vec<TokenStream> {
    def.inputs
        .iter()
        .enumerate()
        .map(|(i, socket)| {
            let method_name = format_ident!("{}", sanitizer.sanitize_and_register(&socket.name, i, "with"));
            let rust_type = map_blender_type_to_rust(&socket.type_name);
            let socket_name = &socket.name;
            quote! {
                pub fn #method_name(self, val: impl Into<crate::core::types::NodeSocket<#rust_type>>) -> Self {
                    crate::core::context::update_input(
                        &self.name,
                        crate::core::types::python_string_literal(#socket_name),
                        val.into().python_expr,
                    );
                    self
                }
            }
        })
        .collect()
}

fn generate_outputs(def: &NodeDef, sanitizer: &mut NameSanitizer) -> Vec<TokenStream> {
    def.outputs
        .iter()
        .enumerate()
        .map(|(i, socket)| {
            let getter = format_ident!("{}", sanitizer.sanitize_and_register(&socket.name, i, "out"));
            let rust_type = map_blender_type_to_rust(&socket.type_name);
            let socket_name = &socket.name;
            quote! {
                pub fn #getter(&self) -> crate::core::types::NodeSocket<#rust_type> {
                    crate::core::types::NodeSocket::new_expr(format!(
                        "{}.outputs[{}]",
                        self.name,
                        crate::core::types::python_string_literal(#socket_name)
                    ))
                }
            }
        })
        .collect()
}

fn generate_enum_property(
    node_id: &str,
    prop: &NodeProperty,
    items: &[EnumItem],
    method_name: &syn::Ident,
) -> (TokenStream, TokenStream) {
    let enum_name_str = format!(
        "{}{}",
        node_id.to_pascal_case(),
        prop.identifier.to_pascal_case()
    );
    let enum_ident = format_ident!("{}", enum_name_str);

    let mut variants = Vec::new();
    let mut match_arms = Vec::new();

    let mut enum_sanitizer = NameSanitizer::new();

    for (item_i, item) in items.iter().enumerate() {
        // Empty prefix "" forces a leading '_' for safe namespace separation (trimmed later).
        let safe_variant_str = enum_sanitizer
            .sanitize_and_register(&item.identifier, item_i, "")
            .trim_start_matches('_')
            .to_pascal_case();
        let safe_variant_str = if safe_variant_str.is_empty()
            || safe_variant_str.starts_with(|c: char| c.is_numeric())
        {
            format!("Variant{}", safe_variant_str)
        } else {
            safe_variant_str
        };
        let variant_ident = format_ident!("{}", safe_variant_str);
        let item_id = &item.identifier;

        variants.push(quote! { #variant_ident });
        match_arms.push(quote! { Self::#variant_ident => #item_id });
    }

    let enum_def = quote! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum #enum_ident {
            #(#variants),*
        }
        impl #enum_ident {
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#match_arms),*
                }
            }
        }
        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };

    let prop_id = &prop.identifier;
    let method_def = quote! {
        pub fn #method_name(self, val: #enum_ident) -> Self {
            crate::core::context::update_property(&self.name, #prop_id, crate::core::types::python_string_literal(val.as_str()));
            self
        }
    };

    (method_def, enum_def)
}

fn generate_properties(
    node_id: &str,
    def: &NodeDef,
    sanitizer: &mut NameSanitizer,
) -> (Vec<TokenStream>, Vec<TokenStream>) {
    let mut methods = Vec::new();
    let mut enums = Vec::new();

    for (i, prop) in def.properties.iter().enumerate() {
        let safe_name = sanitizer.sanitize_and_register(&prop.identifier, i, "with");
        let method_name = format_ident!("{}", safe_name);
        let prop_id = &prop.identifier;

        match prop.type_name.as_str() {
            "INT" => methods.push(quote! { pub fn #method_name(self, val: i32) -> Self { crate::core::context::update_property(&self.name, #prop_id, val.to_string()); self } }),
            "FLOAT" => methods.push(quote! { pub fn #method_name(self, val: f32) -> Self { crate::core::context::update_property(&self.name, #prop_id, crate::core::types::fmt_f32(val)); self } }),
            "BOOLEAN" => methods.push(quote! { pub fn #method_name(self, val: bool) -> Self { crate::core::context::update_property(&self.name, #prop_id, crate::core::types::fmt_bool(val)); self } }),
            "ENUM" => {
                if let Some(items) = &prop.enum_items
                    && !items.is_empty() {
                        let (method, enum_def) = generate_enum_property(node_id, prop, items, &method_name);
                        enums.push(enum_def);
                        methods.push(method);
                        continue;
                    }
                methods.push(quote! { pub fn #method_name(self, val: &str) -> Self { crate::core::context::update_property(&self.name, #prop_id, crate::core::types::python_string_literal(val)); self } })
            },
            _ => methods.push(quote! { pub fn #method_name(self, val: &str) -> Self { crate::core::context::update_property(&self.name, #prop_id, crate::core::types::python_string_literal(val)); self } })
        }
    }
    (methods, enums)
}

fn generate_node_struct(node_id: &str, def: &NodeDef) -> TokenStream {
    let struct_name = format_ident!("{}", node_id.to_pascal_case());
    let struct_name_str = struct_name.to_string();
    let blender_idname = &def.bl_idname;

    let mut sanitizer = NameSanitizer::new();

    let input_methods = generate_inputs(def, &mut sanitizer);
    let output_getters = generate_outputs(def, &mut sanitizer);
    let (property_methods, property_enums) = generate_properties(node_id, def, &mut sanitizer);

    quote! {
        #(#property_enums)*

        #[derive(Clone, Debug)]
        pub struct #struct_name { pub name: String }

        impl #struct_name {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                let uuid_str = uuid::Uuid::new_v4().simple().to_string();
                let name = format!("{}_{}", #struct_name_str, uuid_str.chars().take(12).collect::<String>());
                crate::core::context::add_node(crate::core::context::NodeData::new(name.clone(), #blender_idname.to_string()));
                Self { name }
            }

            #(#input_methods)*
            #(#output_getters)*
            #(#property_methods)*

            pub fn label(self, text: &str) -> Self {
                crate::core::context::update_property(&self.name, "label", crate::core::types::python_string_literal(text));
                self
            }
            pub fn location(self, x: f32, y: f32) -> Self {
                crate::core::context::update_property(&self.name, "location", crate::core::types::fmt_location(x, y));
                self
            }
            pub fn hide(self, hidden: bool) -> Self {
                crate::core::context::update_property(&self.name, "hide", crate::core::types::fmt_bool(hidden));
                self
            }
            /// Assigns a raw Python expression to a node attribute.
            pub fn set_property(self, key: &str, expr: impl Into<String>) -> Self {
                crate::core::context::update_property(&self.name, key, expr.into());
                self
            }
            pub fn set_input<T>(self, index: usize, val: crate::core::types::NodeSocket<T>) -> Self {
                crate::core::context::update_input(&self.name, index.to_string(), val.python_expr);
                self
            }
            pub fn set_named_input<T>(self, socket: &str, val: crate::core::types::NodeSocket<T>) -> Self {
                crate::core::context::update_input(&self.name, crate::core::types::python_string_literal(socket), val.python_expr);
                self
            }
            pub fn output<T>(&self, index: usize) -> crate::core::types::NodeSocket<T> {
                crate::core::types::NodeSocket::new_expr(format!("{}.outputs[{}]", self.name, index))
            }
        }
    }
}

// main ===================================

fn main() {
    let json_path = "blender_nodes_dump.json";
    println!("cargo:rerun-if-changed={}", json_path);

    let json_content = fs::read_to_string(json_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", json_path, e));
    if json_content.trim().is_empty() {
        panic!("{} is empty, cannot generate node bindings", json_path);
    }

    let dump: DumpRoot = serde_json::from_str(&json_content).expect("Failed to parse JSON");

    let debug_mode = env::var("BANKARA_DEBUG_NODES").is_ok();
    let mut unique_nodes = HashMap::new();
    for (category, nodes) in [
        ("ShaderNodes", dump.ShaderNodes),
        ("OctaneNodes", dump.OctaneNodes),
    ] {
        for (key, def) in nodes {
            if unique_nodes.contains_key(&key) && debug_mode {
                println!(
                    "cargo:warning=Duplicate node key '{}' in {} (already present), overwriting",
                    key, category
                );
            }
            unique_nodes.insert(key, def);
        }
    }

    let mut structs = Vec::new();
    let mut sorted_keys: Vec<_> = unique_nodes.keys().collect();
    sorted_keys.sort();
    let mut seen_struct_names = HashSet::new();

    for key in sorted_keys {
        let struct_name_str = key.to_pascal_case();

        if seen_struct_names.contains(&struct_name_str) {
            panic!(
                "PascalCase collision: node ID '{}' conflicts with another node resulting in '{}'",
                key, struct_name_str
            );
        }
        seen_struct_names.insert(struct_name_str);
        structs.push(generate_node_struct(key, &unique_nodes[key]));
    }

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("nodes.rs");

    let raw_code = quote! { #(#structs)* }.to_string();
    fs::write(&dest_path, raw_code).unwrap();
}
