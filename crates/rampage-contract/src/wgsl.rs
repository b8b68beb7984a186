//! Shader-side view of the contract.
//!
//! Shaders never declare slot numbers or the uniform struct themselves; they are
//! compiled from [`compose`], which prepends declarations generated from the
//! Rust definitions in [`crate::slots`] and [`crate::uniforms`].

use crate::binding::{
    sampler_binding, texture_binding, uniform_binding, TEXTURE_GROUP, UNIFORM_GROUP,
};
use crate::slots::{BufferIndex, TextureIndex, VertexAttribute};
use crate::uniforms::Uniforms;

/// Name of the uniform block variable in generated WGSL.
pub const UNIFORMS_VAR: &str = "uniforms";
/// Name of the color texture variable in generated WGSL.
pub const COLOR_TEXTURE_VAR: &str = "color_texture";
/// Name of the color sampler variable in generated WGSL.
pub const COLOR_SAMPLER_VAR: &str = "color_sampler";

/// WGSL declarations for every slot, the `Uniforms` struct, the `VertexIn`
/// struct and the resource bindings.
pub fn prelude() -> String {
    let mut out = String::from("// Generated by rampage-contract. Edit the Rust definitions instead.\n\n");

    for slot in BufferIndex::ALL {
        out.push_str(&const_decl(slot.name(), slot.index()));
    }
    for attr in VertexAttribute::ALL {
        out.push_str(&const_decl(attr.name(), attr.index()));
    }
    for slot in TextureIndex::ALL {
        out.push_str(&const_decl(slot.name(), slot.index()));
    }
    out.push('\n');

    out.push_str("struct Uniforms {\n");
    for field in Uniforms::FIELDS {
        out.push_str(&format!("    {}: mat4x4<f32>,\n", field.wgsl_name));
    }
    out.push_str("};\n\n");

    out.push_str("struct VertexIn {\n");
    for attr in VertexAttribute::ALL {
        out.push_str(&format!(
            "    @location({}) {}: {},\n",
            attr.index(),
            attr.field_name(),
            vec_type(attr.components()),
        ));
    }
    out.push_str("};\n\n");

    if let Some(binding) = uniform_binding(BufferIndex::Uniforms) {
        out.push_str(&format!(
            "@group({UNIFORM_GROUP}) @binding({binding}) var<uniform> {UNIFORMS_VAR}: Uniforms;\n"
        ));
    }
    let color = TextureIndex::Color;
    out.push_str(&format!(
        "@group({TEXTURE_GROUP}) @binding({}) var {COLOR_TEXTURE_VAR}: texture_2d<f32>;\n",
        texture_binding(color),
    ));
    out.push_str(&format!(
        "@group({TEXTURE_GROUP}) @binding({}) var {COLOR_SAMPLER_VAR}: sampler;\n\n",
        sampler_binding(color),
    ));

    out
}

/// Prelude followed by `body`.
pub fn compose(body: &str) -> String {
    let mut src = prelude();
    src.push_str(body);
    src
}

fn const_decl(name: &str, value: u32) -> String {
    format!("const {name}: u32 = {value}u;\n")
}

fn vec_type(components: u32) -> String {
    match components {
        1 => "f32".to_owned(),
        n => format!("vec{n}<f32>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use naga::{AddressSpace, Binding, Module, TypeInner};

    /// Minimal stage entry points so the generated declarations are exercised.
    const BODY: &str = r#"
@vertex
fn vs_main(v: VertexIn) -> @builtin(position) vec4<f32> {
    let p = uniforms.projectionMatrix * uniforms.modelViewMatrix * vec4<f32>(v.position, 1.0);
    return p + uniforms.orthoMatrix[3] * 0.0 + vec4<f32>(v.texcoord, 0.0, 0.0) * 0.0 + v.color * 0.0;
}

@fragment
fn fs_main(@builtin(position) pos: vec4<f32>) -> @location(0) vec4<f32> {
    return textureSample(color_texture, color_sampler, pos.xy);
}
"#;

    fn parse(src: &str) -> Module {
        let module = naga::front::wgsl::parse_str(src).unwrap_or_else(|e| {
            panic!("WGSL parse error: {}", e.emit_to_string(src));
        });
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .unwrap_or_else(|e| panic!("WGSL validation error: {e:?}"));
        module
    }

    fn module() -> Module {
        parse(&compose(BODY))
    }

    /// Evaluates a scalar `u32` module constant by name.
    fn const_value(module: &Module, name: &str) -> u32 {
        let (_, c) = module
            .constants
            .iter()
            .find(|(_, c)| c.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("missing const {name}"));
        match module.global_expressions[c.init] {
            naga::Expression::Literal(naga::Literal::U32(v)) => v,
            ref other => panic!("{name} is not a u32 literal: {other:?}"),
        }
    }

    fn struct_members<'a>(module: &'a Module, name: &str) -> (&'a [naga::StructMember], u32) {
        module
            .types
            .iter()
            .find_map(|(_, ty)| match &ty.inner {
                TypeInner::Struct { members, span } if ty.name.as_deref() == Some(name) => {
                    Some((members.as_slice(), *span))
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("missing struct {name}"))
    }

    fn resource_binding(module: &Module, name: &str) -> (u32, u32) {
        let (_, var) = module
            .global_variables
            .iter()
            .find(|(_, v)| v.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("missing global {name}"));
        let rb = var.binding.as_ref().unwrap_or_else(|| panic!("{name} has no binding"));
        (rb.group, rb.binding)
    }

    // ── generated text ────────────────────────────────────────────────────

    #[test]
    fn prelude_declares_every_slot_constant() {
        let src = prelude();
        assert!(src.contains("const BUFFER_INDEX_MESH_POSITIONS: u32 = 0u;"));
        assert!(src.contains("const BUFFER_INDEX_UNIFORMS: u32 = 1u;"));
        assert!(src.contains("const VERTEX_ATTRIBUTE_POSITION: u32 = 0u;"));
        assert!(src.contains("const VERTEX_ATTRIBUTE_TEXCOORD: u32 = 1u;"));
        assert!(src.contains("const VERTEX_ATTRIBUTE_COLOR: u32 = 2u;"));
        assert!(src.contains("const TEXTURE_INDEX_COLOR: u32 = 0u;"));
    }

    #[test]
    fn compose_appends_body_after_prelude() {
        let src = compose("// body");
        assert!(src.starts_with(&prelude()));
        assert!(src.ends_with("// body"));
    }

    // ── shader-side reflection ────────────────────────────────────────────

    #[test]
    fn shader_constants_equal_host_slots() {
        let m = module();
        for slot in BufferIndex::ALL {
            assert_eq!(const_value(&m, slot.name()), slot.index(), "{slot:?}");
        }
        for attr in VertexAttribute::ALL {
            assert_eq!(const_value(&m, attr.name()), attr.index(), "{attr:?}");
        }
        for slot in TextureIndex::ALL {
            assert_eq!(const_value(&m, slot.name()), slot.index(), "{slot:?}");
        }
    }

    #[test]
    fn shader_uniform_struct_matches_host_layout() {
        let m = module();
        let (members, span) = struct_members(&m, "Uniforms");
        assert_eq!(span as usize, std::mem::size_of::<Uniforms>());
        assert_eq!(members.len(), Uniforms::FIELDS.len());
        for (member, field) in members.iter().zip(Uniforms::FIELDS) {
            assert_eq!(member.name.as_deref(), Some(field.wgsl_name));
            assert_eq!(member.offset as usize, field.offset, "{}", field.name);
            match m.types[member.ty].inner {
                TypeInner::Matrix { columns, rows, scalar } => {
                    assert_eq!((columns, rows), (naga::VectorSize::Quad, naga::VectorSize::Quad));
                    assert_eq!(scalar, naga::Scalar::F32);
                }
                ref other => panic!("{} is not a matrix: {other:?}", field.name),
            }
        }
    }

    #[test]
    fn shader_uniform_binding_uses_uniform_slot() {
        let m = module();
        assert_eq!(resource_binding(&m, UNIFORMS_VAR), (UNIFORM_GROUP, BufferIndex::Uniforms.index()));
        let (_, var) = m
            .global_variables
            .iter()
            .find(|(_, v)| v.name.as_deref() == Some(UNIFORMS_VAR))
            .unwrap();
        assert_eq!(var.space, AddressSpace::Uniform);
    }

    #[test]
    fn shader_texture_bindings_use_texture_slot() {
        let m = module();
        let color = TextureIndex::Color;
        assert_eq!(resource_binding(&m, COLOR_TEXTURE_VAR), (TEXTURE_GROUP, texture_binding(color)));
        assert_eq!(resource_binding(&m, COLOR_SAMPLER_VAR), (TEXTURE_GROUP, sampler_binding(color)));
    }

    #[test]
    fn shader_vertex_inputs_use_attribute_slots() {
        let m = module();
        let (members, _) = struct_members(&m, "VertexIn");
        assert_eq!(members.len(), VertexAttribute::COUNT);
        for (member, attr) in members.iter().zip(VertexAttribute::ALL) {
            assert_eq!(member.name.as_deref(), Some(attr.field_name()));
            match member.binding {
                Some(Binding::Location { location, .. }) => assert_eq!(location, attr.index()),
                ref other => panic!("{attr:?} bound as {other:?}"),
            }
            let width = match m.types[member.ty].inner {
                TypeInner::Vector { size, .. } => size as u32,
                TypeInner::Scalar(_) => 1,
                ref other => panic!("{attr:?} has type {other:?}"),
            };
            assert_eq!(width, attr.components(), "{attr:?}");
        }
    }
}
