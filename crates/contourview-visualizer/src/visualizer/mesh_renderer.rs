//! # OpenGL Renderer
//!
//! Executes a [`FramePlan`] with `glow`. GPU buffers are owned here and
//! keyed by [`DrawTarget`]; the scene only hands out handles.

use glam::{Mat3, Mat4};
use glow::HasContext;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::frame::{DrawTarget, FramePlan};
use super::mesh_rendering::{RenderableMesh, FLOATS_PER_VERTEX};
use super::mesh_shaders::{TOOLPATH_FRAGMENT_SHADER, TOOLPATH_VERTEX_SHADER};
use super::scene3d::CompiledScene;

/// Error type for mesh rendering operations
#[derive(Debug, thiserror::Error)]
pub enum MeshRenderError {
    #[error("OpenGL error: {0}")]
    OpenGLError(String),
    #[error("Shader compilation error: {0}")]
    ShaderError(String),
    #[error("Buffer creation error: {0}")]
    BufferError(String),
}

type Result<T> = std::result::Result<T, MeshRenderError>;

const STRIDE: i32 = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;

#[derive(Debug)]
struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: i32,
}

/// OpenGL backend for the toolpath view
pub struct MeshRenderer {
    gl: glow::Context,
    program: glow::Program,
    meshes: HashMap<DrawTarget, GpuMesh>,
    scene_generation: Option<u64>,
    uploaded_shapes: usize,
}

impl MeshRenderer {
    /// Compile shaders on the current context.
    pub fn new(gl: glow::Context) -> Result<Self> {
        let program = compile_program(&gl, TOOLPATH_VERTEX_SHADER, TOOLPATH_FRAGMENT_SHADER)?;
        Ok(Self {
            gl,
            program,
            meshes: HashMap::new(),
            scene_generation: None,
            uploaded_shapes: 0,
        })
    }

    /// Bring GPU buffers in line with `scene`.
    ///
    /// A different scene replaces every shape buffer; the same scene only
    /// uploads shapes added since the last sync.
    pub fn sync(&mut self, scene: &CompiledScene) -> Result<()> {
        if self.scene_generation != Some(scene.generation()) {
            self.clear_shapes();
            self.scene_generation = Some(scene.generation());
        }

        for (handle, shape) in scene.meshes().skip(self.uploaded_shapes) {
            self.upload(DrawTarget::Shape(handle), shape.renderable())?;
            self.uploaded_shapes += 1;
        }
        Ok(())
    }

    pub fn upload_gizmo(&mut self, gizmo: &RenderableMesh) -> Result<()> {
        self.upload(DrawTarget::Gizmo, gizmo)
    }

    pub fn render_frame(&self, plan: &FramePlan) -> Result<()> {
        let [r, g, b, a] = plan.clear_color;
        let vp = plan.viewport;

        unsafe {
            self.gl.viewport(vp.x, vp.y, vp.width, vp.height);
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            self.gl.enable(glow::DEPTH_TEST);
            self.gl.enable(glow::CULL_FACE);
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            self.gl.use_program(Some(self.program));
            self.set_mat4("projection", &plan.projection);
            self.set_vec3("light_position", &plan.light_position);
            self.set_vec3("light_color", &plan.light_color);
            self.set_vec3("ambient_color", &plan.ambient_color);

            for call in &plan.draw_calls {
                let Some(mesh) = self.meshes.get(&call.target) else {
                    continue;
                };

                let normal_matrix = Mat3::from_mat4(call.model_view.inverse().transpose());
                self.set_mat4("model_view", &call.model_view);
                self.set_mat3("normal_matrix", &normal_matrix);
                match &call.material {
                    Some(material) => {
                        self.set_vec4("material_diffuse", &material.diffuse_color);
                        self.set_vec4("material_ambient", &material.ambient_color);
                        self.set_bool("use_flat_color", true);
                    }
                    None => self.set_bool("use_flat_color", false),
                }

                self.gl.bind_vertex_array(Some(mesh.vao));
                self.gl
                    .draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
            }

            self.gl.bind_vertex_array(None);
            self.gl.use_program(None);

            let error = self.gl.get_error();
            if error != glow::NO_ERROR {
                return Err(MeshRenderError::OpenGLError(format!(
                    "frame ended with GL error 0x{:X}",
                    error
                )));
            }
        }
        Ok(())
    }

    fn upload(&mut self, target: DrawTarget, mesh: &RenderableMesh) -> Result<()> {
        if let Some(old) = self.meshes.remove(&target) {
            self.release(&old);
        }
        if mesh.is_empty() {
            return Ok(());
        }

        let gpu = unsafe {
            let vao = self
                .gl
                .create_vertex_array()
                .map_err(MeshRenderError::BufferError)?;
            self.gl.bind_vertex_array(Some(vao));

            let vbo = self.gl.create_buffer().map_err(MeshRenderError::BufferError)?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.vertices),
                glow::STATIC_DRAW,
            );

            let ebo = self.gl.create_buffer().map_err(MeshRenderError::BufferError)?;
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.indices),
                glow::STATIC_DRAW,
            );

            // position, normal, color
            self.gl
                .vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, STRIDE, 0);
            self.gl.enable_vertex_attrib_array(0);
            self.gl
                .vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, STRIDE, 12);
            self.gl.enable_vertex_attrib_array(1);
            self.gl
                .vertex_attrib_pointer_f32(2, 4, glow::FLOAT, false, STRIDE, 24);
            self.gl.enable_vertex_attrib_array(2);

            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            GpuMesh {
                vao,
                vbo,
                ebo,
                index_count: mesh.indices.len() as i32,
            }
        };

        debug!(
            "Uploaded {:?}: {} vertices, {} triangles",
            target,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.meshes.insert(target, gpu);
        Ok(())
    }

    fn clear_shapes(&mut self) {
        let shapes: Vec<DrawTarget> = self
            .meshes
            .keys()
            .filter(|target| matches!(target, DrawTarget::Shape(_)))
            .copied()
            .collect();
        for target in shapes {
            if let Some(mesh) = self.meshes.remove(&target) {
                self.release(&mesh);
            }
        }
        self.uploaded_shapes = 0;
    }

    fn release(&self, mesh: &GpuMesh) {
        unsafe {
            self.gl.delete_vertex_array(mesh.vao);
            self.gl.delete_buffer(mesh.vbo);
            self.gl.delete_buffer(mesh.ebo);
        }
    }

    fn set_mat4(&self, name: &str, m: &Mat4) {
        unsafe {
            let loc = self.gl.get_uniform_location(self.program, name);
            self.gl
                .uniform_matrix_4_f32_slice(loc.as_ref(), false, &m.to_cols_array());
        }
    }

    fn set_mat3(&self, name: &str, m: &Mat3) {
        unsafe {
            let loc = self.gl.get_uniform_location(self.program, name);
            self.gl
                .uniform_matrix_3_f32_slice(loc.as_ref(), false, &m.to_cols_array());
        }
    }

    fn set_vec3(&self, name: &str, v: &[f32; 3]) {
        unsafe {
            let loc = self.gl.get_uniform_location(self.program, name);
            self.gl.uniform_3_f32(loc.as_ref(), v[0], v[1], v[2]);
        }
    }

    fn set_vec4(&self, name: &str, v: &[f32; 4]) {
        unsafe {
            let loc = self.gl.get_uniform_location(self.program, name);
            self.gl.uniform_4_f32(loc.as_ref(), v[0], v[1], v[2], v[3]);
        }
    }

    fn set_bool(&self, name: &str, value: bool) {
        unsafe {
            let loc = self.gl.get_uniform_location(self.program, name);
            self.gl.uniform_1_i32(loc.as_ref(), value as i32);
        }
    }
}

fn compile_program(gl: &glow::Context, vs_source: &str, fs_source: &str) -> Result<glow::Program> {
    unsafe {
        let program = gl.create_program().map_err(MeshRenderError::ShaderError)?;
        let mut shaders = Vec::with_capacity(2);

        for (kind, source, label) in [
            (glow::VERTEX_SHADER, vs_source, "Vertex shader"),
            (glow::FRAGMENT_SHADER, fs_source, "Fragment shader"),
        ] {
            let shader = gl.create_shader(kind).map_err(MeshRenderError::ShaderError)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let info = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                for s in shaders {
                    gl.delete_shader(s);
                }
                gl.delete_program(program);
                return Err(MeshRenderError::ShaderError(format!("{}: {}", label, info)));
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        let linked = gl.get_program_link_status(program);
        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        if !linked {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            warn!("Toolpath shader failed to link");
            return Err(MeshRenderError::ShaderError(format!("Program linking: {}", info)));
        }

        Ok(program)
    }
}

impl Drop for MeshRenderer {
    fn drop(&mut self) {
        let meshes: Vec<GpuMesh> = self.meshes.drain().map(|(_, mesh)| mesh).collect();
        for mesh in &meshes {
            self.release(mesh);
        }
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}
