//! Lit mesh rendering with a normal-mapped metallic-roughness material.
//!
//! The pass uses three bind groups:
//! - **Group 0**: frame uniforms (view-projection, camera position, lights)
//! - **Group 1**: object uniforms (model and normal matrices, material)
//! - **Group 2**: normal map texture and sampler
//!
//! Meshes are drawn into a [`SceneTarget`]; [`StandardPass::blit`] then
//! copies that target onto the surface.

use crate::gpu::GpuContext;
use crate::light::{MAX_LIGHTS, PointLight};
use crate::material::StandardMaterial;
use crate::mesh::{Mesh, Transform, Vertex3d};
use crate::render_target::{DEPTH_FORMAT, SceneTarget};
use crate::scene::Scene;
use crate::texture::Texture;

/// One point light as laid out in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub intensity: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    pub distance: f32,
    pub decay: f32,
    pub _pad: [f32; 3],
}

impl From<&PointLight> for PointLightUniform {
    fn from(light: &PointLight) -> Self {
        let [r, g, b, _] = light.color.to_linear();
        Self {
            position: light.position.to_array(),
            intensity: light.intensity,
            color: [r, g, b],
            distance: light.distance,
            decay: light.decay,
            _pad: [0.0; 3],
        }
    }
}

/// Camera and lights, written once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _pad: f32,
    pub lights: [PointLightUniform; MAX_LIGHTS],
}

impl FrameUniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            camera_pos: scene.camera.position.to_array(),
            _pad: 0.0,
            lights: scene.lights.each_ref().map(PointLightUniform::from),
        }
    }
}

/// Per-object transform and material.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear RGBA.
    pub base_color: [f32; 4],
    pub metalness: f32,
    pub roughness: f32,
    pub normal_scale: [f32; 2],
}

impl ObjectUniforms {
    pub fn new(transform: &Transform, material: &StandardMaterial) -> Self {
        let model = transform.matrix();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            base_color: material.color.to_linear(),
            metalness: material.metalness,
            roughness: material.roughness,
            normal_scale: material.normal_scale.to_array(),
        }
    }
}

pub struct StandardPass {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    normal_map_bind_group: wgpu::BindGroup,
    blit_pipeline: wgpu::RenderPipeline,
    blit_bind_group_layout: wgpu::BindGroupLayout,
    blit_sampler: wgpu::Sampler,
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn texture_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl StandardPass {
    /// Builds both pipelines and binds `normal_map` (usually the flat
    /// fallback) until [`set_normal_map`](Self::set_normal_map) replaces it.
    pub fn new(gpu: &GpuContext, normal_map: &Texture) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Standard Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/standard.wgsl").into()),
        });

        // Group 0
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group_layout = uniform_layout(device, "Frame Bind Group Layout");
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Group 1
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniforms"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bind_group_layout = uniform_layout(device, "Object Bind Group Layout");
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: &object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        // Group 2
        let texture_bind_group_layout = texture_layout(device, "Normal Map Bind Group Layout");
        let normal_map_bind_group = texture_bind_group(
            device,
            &texture_bind_group_layout,
            &normal_map.view,
            &normal_map.sampler,
            "Normal Map Bind Group",
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Standard Pipeline Layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &object_bind_group_layout,
                &texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Standard Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex3d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let blit_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blit Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let blit_bind_group_layout = texture_layout(device, "Blit Bind Group Layout");
        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_bind_group_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            texture_bind_group_layout,
            normal_map_bind_group,
            blit_pipeline,
            blit_bind_group_layout,
            blit_sampler,
        }
    }

    /// Binds a new normal map for all following draws.
    pub fn set_normal_map(&mut self, gpu: &GpuContext, texture: &Texture) {
        self.normal_map_bind_group = texture_bind_group(
            &gpu.device,
            &self.texture_bind_group_layout,
            &texture.view,
            &texture.sampler,
            "Normal Map Bind Group",
        );
    }

    /// Uploads camera, light and sphere uniforms for this frame.
    pub fn prepare(&self, gpu: &GpuContext, scene: &Scene) {
        let frame = FrameUniforms::from_scene(scene);
        gpu.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame]));

        let sphere = &scene.sphere;
        let object = ObjectUniforms::new(&sphere.transform, &sphere.material);
        gpu.queue
            .write_buffer(&self.object_buffer, 0, bytemuck::cast_slice(&[object]));
    }

    /// Draws `mesh` with the uniforms from the last [`prepare`](Self::prepare).
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass, mesh: &Mesh) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        render_pass.set_bind_group(1, &self.object_bind_group, &[]);
        render_pass.set_bind_group(2, &self.normal_map_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    /// Copies the scene target over the whole render pass target.
    pub fn blit(&self, gpu: &GpuContext, render_pass: &mut wgpu::RenderPass, target: &SceneTarget) {
        let bind_group = texture_bind_group(
            &gpu.device,
            &self.blit_bind_group_layout,
            &target.color_view,
            &self.blit_sampler,
            "Blit Bind Group",
        );

        render_pass.set_pipeline(&self.blit_pipeline);
        render_pass.set_bind_group(0, &bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
