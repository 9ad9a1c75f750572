//! Mesh data structures and primitive generation.

use crate::vertex::Vertex;
use glam::Vec3;
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// Create a UV sphere. UVs run the full equirectangular range so planet
    /// maps wrap once around the equator.
    pub fn sphere(device: &wgpu::Device, radius: f32, segments: u32, rings: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();

            for segment in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();

                let position = [x, y, z];
                let normal = Vec3::new(x, y, z).normalize();
                let uv = [
                    segment as f32 / segments as f32,
                    ring as f32 / rings as f32,
                ];

                vertices.push(Vertex::new(position, normal.into(), uv));
            }
        }

        for ring in 0..rings {
            for segment in 0..segments {
                let current = ring * (segments + 1) + segment;
                let next = current + segments + 1;

                indices.push(current);
                indices.push(next);
                indices.push(current + 1);

                indices.push(current + 1);
                indices.push(next);
                indices.push(next + 1);
            }
        }

        Self::new(device, &vertices, &indices)
    }

    /// Create a flat annulus in the XZ plane for ring systems.
    ///
    /// U runs radially from the inner to the outer edge so a 1D band texture
    /// reads as concentric rings; V runs around the circumference.
    pub fn annulus(device: &wgpu::Device, inner_radius: f32, outer_radius: f32, segments: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for segment in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
            let (sin_t, cos_t) = theta.sin_cos();
            let v = segment as f32 / segments as f32;

            vertices.push(Vertex::new(
                [inner_radius * cos_t, 0.0, inner_radius * sin_t],
                [0.0, 1.0, 0.0],
                [0.0, v],
            ));
            vertices.push(Vertex::new(
                [outer_radius * cos_t, 0.0, outer_radius * sin_t],
                [0.0, 1.0, 0.0],
                [1.0, v],
            ));
        }

        for segment in 0..segments {
            let inner = segment * 2;
            let outer = inner + 1;
            let next_inner = inner + 2;
            let next_outer = inner + 3;

            indices.extend_from_slice(&[inner, next_inner, outer, outer, next_inner, next_outer]);
        }

        Self::new(device, &vertices, &indices)
    }

    /// Create a billboard quad (XY plane, facing +Z). The star shader orients
    /// it toward the camera per instance.
    pub fn billboard_quad(device: &wgpu::Device, size: f32) -> Self {
        let half = size / 2.0;
        let vertices = [
            Vertex::new([-half, -half, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex::new([half, -half, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([half, half, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([-half, half, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
        ];
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        Self::new(device, &vertices, &indices)
    }
}
