//! Sphere geometry, GPU meshes and Euler-angle transforms.
//!
//! - [`Vertex3d`]: position, normal and UV, 32 bytes per vertex
//! - [`SphereGeometry`]: CPU-side UV sphere generator
//! - [`Mesh`]: vertex and index buffers on the GPU
//! - [`Transform`]: position, Euler rotation and scale
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |

use std::f32::consts::PI;

use crate::gpu::GpuContext;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// A vertex with position, normal, and texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Texture coordinates with the origin at the top-left of the image.
    pub uv: [f32; 2],
}

impl Vertex3d {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A latitude/longitude sphere description.
///
/// `width_segments` divides the equator and `height_segments` the meridian,
/// giving a `(width_segments + 1) × (height_segments + 1)` vertex grid. The
/// seam and pole columns are duplicated so every vertex has a unique UV.
///
/// The triangles touching each pole are emitted once rather than as
/// degenerate quads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(0.5, 64, 64)
    }
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn vertex_count(&self) -> usize {
        ((self.width_segments + 1) * (self.height_segments + 1)) as usize
    }

    /// Generates vertex and index data with counter-clockwise front faces.
    pub fn build(&self) -> (Vec<Vertex3d>, Vec<u32>) {
        let columns = self.width_segments + 1;
        let mut vertices = Vec::with_capacity(self.vertex_count());
        let mut indices = Vec::new();

        for iy in 0..=self.height_segments {
            let v = iy as f32 / self.height_segments as f32;
            let theta = v * PI;

            for ix in 0..=self.width_segments {
                let u = ix as f32 / self.width_segments as f32;
                let phi = u * 2.0 * PI;

                let normal = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                let position = normal * self.radius;

                vertices.push(Vertex3d::new(
                    position.to_array(),
                    normal.normalize_or_zero().to_array(),
                    [u, v],
                ));
            }
        }

        for iy in 0..self.height_segments {
            for ix in 0..self.width_segments {
                let a = iy * columns + ix + 1;
                let b = iy * columns + ix;
                let c = (iy + 1) * columns + ix;
                let d = (iy + 1) * columns + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != self.height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        (vertices, indices)
    }
}

/// GPU-resident geometry with vertex and index buffers.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn sphere(gpu: &GpuContext, geometry: &SphereGeometry) -> Self {
        let (vertices, indices) = geometry.build();
        Self::new(gpu, &vertices, &indices)
    }
}

/// Position, rotation and scale of an object.
///
/// Rotation is stored as Euler angles in radians and applied in X, Y, Z
/// order, so `rotation.x` and `rotation.y` can be eased independently
/// frame to frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}
