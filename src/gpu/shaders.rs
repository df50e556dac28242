//! WGSL sources for the trail and marker pipelines.
//!
//! Both shaders share the [`Uniforms`](super::Uniforms) block at
//! `@group(0) @binding(0)`.

/// Uniform block declaration shared by every shader.
const UNIFORMS_WGSL: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    // xyz = marker center, w = marker radius
    marker: vec4<f32>,
    // xyz = point light position, w = intensity
    light: vec4<f32>,
    // rgb = ambient color, w = intensity
    ambient: vec4<f32>,
    // rgb = emissive color, w = intensity
    emissive: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
"#;

/// Unlit line strip with per-vertex colors.
const TRAIL_BODY_WGSL: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// Unit sphere scaled and moved to the marker, lit by ambient + one point
/// light with a Lambert BRDF, plus emissive glow.
const MARKER_BODY_WGSL: &str = r#"
const INV_PI: f32 = 0.31830988;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let world = position * uniforms.marker.w + uniforms.marker.xyz;
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 1.0);
    out.world_position = world;
    out.normal = normal;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let to_light = normalize(uniforms.light.xyz - in.world_position);
    let diffuse = max(dot(n, to_light), 0.0) * uniforms.light.w * INV_PI;

    let ambient = uniforms.ambient.rgb * uniforms.ambient.w * INV_PI;
    let emissive = uniforms.emissive.rgb * uniforms.emissive.w;
    let color = min(ambient + vec3<f32>(diffuse) + emissive, vec3<f32>(1.0));
    return vec4<f32>(color, 1.0);
}
"#;

/// Full source of the trail shader.
pub fn trail_shader() -> String {
    format!("{}{}", UNIFORMS_WGSL, TRAIL_BODY_WGSL)
}

/// Full source of the marker shader.
pub fn marker_shader() -> String {
    format!("{}{}", UNIFORMS_WGSL, MARKER_BODY_WGSL)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_trail_shader_validates() {
        let src = trail_shader();
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
        validate_wgsl(&src).unwrap();
    }

    #[test]
    fn test_marker_shader_validates() {
        let src = marker_shader();
        assert!(src.contains("uniforms.marker.w"));
        validate_wgsl(&src).unwrap();
    }

    #[test]
    fn test_uniform_block_matches_rust_layout() {
        // mat4 + four vec4s
        assert_eq!(std::mem::size_of::<super::super::Uniforms>(), 64 + 4 * 16);
        assert!(UNIFORMS_WGSL.contains("@binding(0)"));
    }
}
