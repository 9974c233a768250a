//! Mesh generation and per-object instance data
//!
//! Geometry is generated in unit size and placed with a per-instance model
//! matrix. Building the instance list is plain math so it can be tested
//! without a GPU.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};
use std::ops::Range;

use crate::consts::PLAYER_CAPSULE_LENGTH;
use crate::scene::Floor;
use crate::settings::Settings;
use crate::sim::GameState;
use crate::{colors, hex_to_rgb, hex_to_rgba};

/// Lit mesh vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Floor grid line vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Per-draw object data (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    /// Base color with alpha
    pub color: [f32; 4],
    /// Emissive rgb + intensity
    pub emissive: [f32; 4],
    /// x = 1.0 for lit surfaces, 0.0 for flat color
    pub params: [f32; 4],
}

impl InstanceData {
    pub fn new(model: Mat4, color: [f32; 4], emissive: [f32; 4], lit: bool) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
            emissive,
            params: [if lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model_3[0], self.model_3[1], self.model_3[2])
    }

    pub fn alpha(&self) -> f32 {
        self.color[3]
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
            8 => Float32x4,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Which shared mesh an instance is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
    Sphere,
    Disc,
}

/// Location of one mesh inside the shared vertex/index buffers
///
/// Indices are absolute into the shared vertex buffer, so every mesh draws
/// with a base vertex of 0 (WebGL2 has no base-vertex draws).
#[derive(Debug, Clone)]
pub struct MeshRange {
    pub indices: Range<u32>,
    /// Span of the shared vertex buffer this mesh's indices point into
    pub vertices: Range<u32>,
}

/// All meshes packed into one vertex and one index buffer
pub struct MeshSet {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub cube: MeshRange,
    pub sphere: MeshRange,
    pub disc: MeshRange,
}

impl MeshSet {
    pub fn build() -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut push = |(v, i): (Vec<Vertex>, Vec<u16>)| {
            let offset = vertices.len() as u32;
            let range = MeshRange {
                indices: indices.len() as u32..(indices.len() + i.len()) as u32,
                vertices: offset..offset + v.len() as u32,
            };
            vertices.extend(v);
            indices.extend(i.into_iter().map(|idx| offset + idx as u32));
            range
        };

        let cube = push(cube_mesh());
        let sphere = push(sphere_mesh(12, 16));
        let disc = push(disc_mesh(32));

        Self {
            vertices,
            indices,
            cube,
            sphere,
            disc,
        }
    }

    pub fn range(&self, kind: MeshKind) -> &MeshRange {
        match kind {
            MeshKind::Cube => &self.cube,
            MeshKind::Sphere => &self.sphere,
            MeshKind::Disc => &self.disc,
        }
    }
}

/// Unit cube centered at the origin
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex::new([-p, -p,  p], [0.0, 0.0, 1.0]),
        Vertex::new([ p, -p,  p], [0.0, 0.0, 1.0]),
        Vertex::new([ p,  p,  p], [0.0, 0.0, 1.0]),
        Vertex::new([-p,  p,  p], [0.0, 0.0, 1.0]),
        // -Z face
        Vertex::new([ p, -p, -p], [0.0, 0.0, -1.0]),
        Vertex::new([-p, -p, -p], [0.0, 0.0, -1.0]),
        Vertex::new([-p,  p, -p], [0.0, 0.0, -1.0]),
        Vertex::new([ p,  p, -p], [0.0, 0.0, -1.0]),
        // +X face
        Vertex::new([ p, -p,  p], [1.0, 0.0, 0.0]),
        Vertex::new([ p, -p, -p], [1.0, 0.0, 0.0]),
        Vertex::new([ p,  p, -p], [1.0, 0.0, 0.0]),
        Vertex::new([ p,  p,  p], [1.0, 0.0, 0.0]),
        // -X face
        Vertex::new([-p, -p, -p], [-1.0, 0.0, 0.0]),
        Vertex::new([-p, -p,  p], [-1.0, 0.0, 0.0]),
        Vertex::new([-p,  p,  p], [-1.0, 0.0, 0.0]),
        Vertex::new([-p,  p, -p], [-1.0, 0.0, 0.0]),
        // +Y face
        Vertex::new([-p,  p,  p], [0.0, 1.0, 0.0]),
        Vertex::new([ p,  p,  p], [0.0, 1.0, 0.0]),
        Vertex::new([ p,  p, -p], [0.0, 1.0, 0.0]),
        Vertex::new([-p,  p, -p], [0.0, 1.0, 0.0]),
        // -Y face
        Vertex::new([-p, -p, -p], [0.0, -1.0, 0.0]),
        Vertex::new([ p, -p, -p], [0.0, -1.0, 0.0]),
        Vertex::new([ p, -p,  p], [0.0, -1.0, 0.0]),
        Vertex::new([-p, -p,  p], [0.0, -1.0, 0.0]),
    ];
    let indices = (0..6u16)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    (vertices, indices)
}

/// Unit-radius UV sphere, counter-clockwise from outside
pub fn sphere_mesh(rings: u16, segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);

    for i in 0..=rings {
        let theta = PI * i as f32 / rings as f32;
        for j in 0..=segments {
            let phi = TAU * j as f32 / segments as f32;
            let n = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            vertices.push(Vertex::new(n, n));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for i in 0..rings {
        for j in 0..segments {
            let a = i * stride + j;
            let b = a + stride;
            let c = a + 1;
            let d = b + 1;
            indices.extend_from_slice(&[a, c, b, c, d, b]);
        }
    }
    (vertices, indices)
}

/// Unit-radius disc in the XZ plane facing +Y
pub fn disc_mesh(segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let segments = segments.max(3);
    let up = [0.0, 1.0, 0.0];
    let mut vertices = vec![Vertex::new([0.0, 0.0, 0.0], up)];
    for j in 0..segments {
        let phi = TAU * j as f32 / segments as f32;
        vertices.push(Vertex::new([phi.cos(), 0.0, -phi.sin()], up));
    }

    let mut indices = Vec::with_capacity(segments as usize * 3);
    for j in 0..segments {
        let next = (j + 1) % segments;
        indices.extend_from_slice(&[0, j + 1, next + 1]);
    }
    (vertices, indices)
}

/// Floor grid as colored line-list vertices
pub fn grid_vertices(floor: &Floor) -> Vec<LineVertex> {
    let color = hex_to_rgba(floor.color, 1.0);
    floor
        .grid_lines()
        .into_iter()
        .map(|p| LineVertex {
            position: p.to_array(),
            color,
        })
        .collect()
}

/// One object to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub mesh: MeshKind,
    pub instance: InstanceData,
}

/// Build the draw list for a frame
///
/// Indicator discs come first (they lie on the floor), then solids sorted
/// back-to-front along `view_dir` so translucency and overlap resolve
/// without a depth buffer.
pub fn scene_items(state: &GameState, settings: &Settings) -> Vec<DrawItem> {
    let mut discs = Vec::new();
    let mut solids = Vec::with_capacity(state.blocks.len() + 1);
    let no_glow = [0.0; 4];

    for block in &state.blocks {
        let scale = if settings.reduced_motion {
            1.0
        } else {
            block.scale()
        };

        if block.indicator_visible {
            let (radius, alpha) = if settings.reduced_motion {
                (block.interaction_radius, block.pulse.max_opacity)
            } else {
                (block.indicator_radius(), block.pulse.opacity())
            };
            let model = Mat4::from_scale_rotation_translation(
                Vec3::new(radius, 1.0, radius),
                Quat::IDENTITY,
                Vec3::new(block.position.x, block.indicator_height(), block.position.z),
            );
            discs.push(DrawItem {
                mesh: MeshKind::Disc,
                instance: InstanceData::new(
                    model,
                    hex_to_rgba(block.base_color, alpha),
                    no_glow,
                    false,
                ),
            });
        }

        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::IDENTITY,
            block.position,
        );
        let [er, eg, eb] = hex_to_rgb(block.material.emissive);
        solids.push(DrawItem {
            mesh: MeshKind::Cube,
            instance: InstanceData::new(
                model,
                hex_to_rgba(block.material.color, 1.0),
                [er, eg, eb, block.material.emissive_intensity],
                true,
            ),
        });
    }

    let player = &state.player;
    let half_length = player.radius + PLAYER_CAPSULE_LENGTH / 2.0;
    let model = Mat4::from_scale_rotation_translation(
        Vec3::new(player.radius, player.radius, half_length),
        Quat::IDENTITY,
        player.position,
    );
    solids.push(DrawItem {
        mesh: MeshKind::Sphere,
        instance: InstanceData::new(model, hex_to_rgba(colors::PLAYER, 1.0), no_glow, true),
    });

    let view_dir = state.camera.forward();
    let depth = |item: &DrawItem| item.instance.translation().dot(view_dir);
    // Farthest first
    solids.sort_by(|a, b| {
        depth(b)
            .partial_cmp(&depth(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    discs.extend(solids);
    discs
}
