//! # Mesh Data
//!
//! Two representations of renderable geometry:
//! - [`ToolpathMesh`]: the compiled ribbon of one shape, kept as quads
//!   grouped into top cap, bottom cap and side walls.
//! - [`RenderableMesh`]: interleaved GPU-ready vertex and index buffers.

use glam::{Mat4, Vec3};

/// Flat quad with a single face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Vec3; 4],
    pub normal: Vec3,
}

impl Quad {
    pub fn new(corners: [Vec3; 4], normal: Vec3) -> Self {
        Self { corners, normal }
    }

    /// Area of the (planar) quad, split along the 0-2 diagonal.
    pub fn area(&self) -> f32 {
        let [a, b, c, d] = self.corners;
        0.5 * ((b - a).cross(c - a).length() + (c - a).cross(d - a).length())
    }
}

/// Compiled, immutable ribbon geometry of one shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolpathMesh {
    pub(crate) top: Vec<Quad>,
    pub(crate) bottom: Vec<Quad>,
    pub(crate) walls: Vec<Quad>,
}

impl ToolpathMesh {
    pub fn top(&self) -> &[Quad] {
        &self.top
    }

    pub fn bottom(&self) -> &[Quad] {
        &self.bottom
    }

    pub fn walls(&self) -> &[Quad] {
        &self.walls
    }

    pub fn quad_count(&self) -> usize {
        self.top.len() + self.bottom.len() + self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quad_count() == 0
    }

    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.top.iter().chain(&self.bottom).chain(&self.walls)
    }
}

/// Per-shape display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeStyle {
    pub selected: bool,
    pub disabled: bool,
}

/// Flat material used when a mesh is drawn in a single color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshMaterial {
    /// Diffuse color (RGBA)
    pub diffuse_color: [f32; 4],
    /// Ambient reflectance (RGBA)
    pub ambient_color: [f32; 4],
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self::solid([1.0, 1.0, 1.0, 1.0])
    }
}

impl MeshMaterial {
    /// Same color for diffuse and ambient reflection
    pub fn solid(color: [f32; 4]) -> Self {
        Self {
            diffuse_color: color,
            ambient_color: color,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.diffuse_color[3]
    }
}

/// Floats per interleaved vertex: position, normal, color
pub const FLOATS_PER_VERTEX: usize = 10;

/// A renderable mesh for upload to the GPU
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableMesh {
    /// Vertex data: [x, y, z, nx, ny, nz, r, g, b, a] per vertex
    pub vertices: Vec<f32>,
    /// Index data for triangles
    pub indices: Vec<u32>,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

impl Default for RenderableMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderableMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            bounds_min: Vec3::splat(f32::MAX),
            bounds_max: Vec3::splat(f32::MIN),
        }
    }

    /// Flatten a compiled ribbon; every quad becomes two triangles.
    pub fn from_toolpath(mesh: &ToolpathMesh) -> Self {
        let mut out = Self::new();
        out.vertices.reserve(mesh.quad_count() * 4 * FLOATS_PER_VERTEX);
        out.indices.reserve(mesh.quad_count() * 6);

        for quad in mesh.quads() {
            out.push_quad(quad, [1.0, 1.0, 1.0, 1.0]);
        }
        out
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, color: [f32; 4]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z,
        ]);
        self.vertices.extend_from_slice(&color);
        self.bounds_min = self.bounds_min.min(position);
        self.bounds_max = self.bounds_max.max(position);
        index
    }

    pub fn push_quad(&mut self, quad: &Quad, color: [f32; 4]) {
        let base = self.push_vertex(quad.corners[0], quad.normal, color);
        for corner in &quad.corners[1..] {
            self.push_vertex(*corner, quad.normal, color);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    /// Triangle with per-vertex normals.
    pub fn push_triangle(&mut self, positions: [Vec3; 3], normals: [Vec3; 3], color: [f32; 4]) {
        for (position, normal) in positions.into_iter().zip(normals) {
            let index = self.push_vertex(position, normal, color);
            self.indices.push(index);
        }
    }

    /// Append another mesh, re-basing its indices.
    pub fn append(&mut self, other: &RenderableMesh) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
        if !other.is_empty() {
            self.bounds_min = self.bounds_min.min(other.bounds_min);
            self.bounds_max = self.bounds_max.max(other.bounds_max);
        }
    }

    /// Overwrite the color of every vertex
    pub fn set_color(&mut self, color: [f32; 4]) {
        for chunk in self.vertices.chunks_mut(FLOATS_PER_VERTEX) {
            chunk[6..10].copy_from_slice(&color);
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Get bounds as (min, max) Vec3 tuple
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    /// Transform mesh vertices by a matrix
    pub fn transform(&mut self, transform: &Mat4) {
        let normal_matrix = transform.inverse().transpose();

        for chunk in self.vertices.chunks_mut(FLOATS_PER_VERTEX) {
            let pos = Vec3::new(chunk[0], chunk[1], chunk[2]);
            let transformed_pos = transform.transform_point3(pos);
            chunk[0..3].copy_from_slice(&transformed_pos.to_array());

            let normal = Vec3::new(chunk[3], chunk[4], chunk[5]);
            let transformed_normal = normal_matrix.transform_vector3(normal).normalize_or_zero();
            chunk[3..6].copy_from_slice(&transformed_normal.to_array());
        }

        let mut min_pos = Vec3::splat(f32::MAX);
        let mut max_pos = Vec3::splat(f32::MIN);
        for chunk in self.vertices.chunks(FLOATS_PER_VERTEX) {
            let pos = Vec3::new(chunk[0], chunk[1], chunk[2]);
            min_pos = min_pos.min(pos);
            max_pos = max_pos.max(pos);
        }
        self.bounds_min = min_pos;
        self.bounds_max = max_pos;
    }
}
