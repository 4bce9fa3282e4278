//! WGSL for the textured smoke quads.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// rgb tint, w = quad size in scene units.
    pub tint: [f32; 4],
    /// xyz = normalized direction toward the light, w = intensity.
    pub light: [f32; 4],
    /// x = ambient intensity.
    pub ambient: [f32; 4],
}

pub(crate) const SMOKE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    tint: vec4<f32>,
    light: vec4<f32>,
    ambient: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var smoke_texture: texture_2d<f32>;

@group(0) @binding(2)
var smoke_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) opacity: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) rotation: f32,
    @location(2) scale: f32,
    @location(3) opacity: f32,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>(-0.5,  0.5),
        vec2<f32>(-0.5,  0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>( 0.5,  0.5),
    );

    let corner = corners[vertex_index];
    let c = cos(rotation);
    let s = sin(rotation);
    let rotated = vec2<f32>(corner.x * c - corner.y * s, corner.x * s + corner.y * c);
    let local = rotated * uniforms.tint.w * scale;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(position + vec3<f32>(local, 0.0), 1.0);
    out.uv = vec2<f32>(corner.x + 0.5, 0.5 - corner.y);
    out.opacity = opacity;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(smoke_texture, smoke_sampler, in.uv);

    // Quads always face the camera, so the normal is +z.
    let diffuse = max(dot(vec3<f32>(0.0, 0.0, 1.0), uniforms.light.xyz), 0.0) * uniforms.light.w;
    let shade = uniforms.tint.rgb * (diffuse + uniforms.ambient.x);

    let alpha = texel.a * in.opacity;
    return vec4<f32>(texel.rgb * shade * alpha, alpha);
}
"#;
