//! # Toolpath Shaders
//!
//! GLSL 330 programs for the ribbon and gizmo meshes. Lighting is a
//! single point light fixed in eye space, so it stays put while the
//! scene orbits.

pub const TOOLPATH_VERTEX_SHADER: &str = r#"
#version 330 core

layout (location = 0) in vec3 position;
layout (location = 1) in vec3 normal;
layout (location = 2) in vec4 color;

uniform mat4 model_view;
uniform mat4 projection;
uniform mat3 normal_matrix;

out vec3 eye_position;
out vec3 eye_normal;
out vec4 vertex_color;

void main() {
    vec4 eye = model_view * vec4(position, 1.0);
    gl_Position = projection * eye;

    eye_position = eye.xyz;
    eye_normal = normal_matrix * normal;
    vertex_color = color;
}
"#;

pub const TOOLPATH_FRAGMENT_SHADER: &str = r#"
#version 330 core

in vec3 eye_position;
in vec3 eye_normal;
in vec4 vertex_color;

uniform vec3 light_position;
uniform vec3 light_color;
uniform vec3 ambient_color;
uniform vec4 material_diffuse;
uniform vec4 material_ambient;
uniform bool use_flat_color;

out vec4 FragColor;

void main() {
    vec4 base = use_flat_color ? material_diffuse : vertex_color;
    vec3 ambient = use_flat_color ? material_ambient.rgb : vertex_color.rgb;

    // Zero-length normals come from degenerate quads; leave them unlit.
    float len = length(eye_normal);
    float diffuse = 0.0;
    if (len > 0.0) {
        vec3 n = eye_normal / len;
        vec3 l = normalize(light_position - eye_position);
        diffuse = max(dot(n, l), 0.0);
    }

    vec3 lit = ambient * ambient_color + base.rgb * diffuse * light_color;
    FragColor = vec4(min(lit, vec3(1.0)), base.a);
}
"#;
