//! Off-screen color and depth attachments for the scene.

use crate::gpu::GpuContext;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Color and depth textures the scene is drawn into before being copied to
/// the window.
///
/// The target is sized from the viewport's buffer size rather than the
/// surface, so the pixel ratio cap applies to shading cost while the surface
/// always matches the window.
pub struct SceneTarget {
    pub color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    size: (u32, u32),
}

impl SceneTarget {
    pub fn new(gpu: &GpuContext, size: (u32, u32)) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let extent = wgpu::Extent3d {
            width: size.0,
            height: size.1,
            depth_or_array_layers: 1,
        };

        let color = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Color Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: gpu.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

        let depth = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            color_view,
            depth_view,
            size,
        }
    }

    /// Reallocates when `size` differs from the current one. Returns whether
    /// it did.
    pub fn ensure_size(&mut self, gpu: &GpuContext, size: (u32, u32)) -> bool {
        let size = (size.0.max(1), size.1.max(1));
        if self.size == size {
            return false;
        }
        log::debug!("Scene target {:?} -> {:?}", self.size, size);
        *self = Self::new(gpu, size);
        true
    }
}
