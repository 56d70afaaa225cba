//! wgpu implementation of [`SceneRenderer`].
//!
//! Each frame draws the sphere into the off-screen [`SceneTarget`], copies
//! it onto the swapchain image and paints the debug panel on top.

use std::sync::Arc;

use winit::window::Window;

use crate::config::AppConfig;
use crate::debug_ui::UiFrame;
use crate::error::Result;
use crate::frame_loop::SceneRenderer;
use crate::gpu::GpuContext;
use crate::mesh::Mesh;
use crate::render_target::SceneTarget;
use crate::standard_pass::StandardPass;
use crate::state::AppState;
use crate::texture::{LoadStatus, Texture, TextureLoader};

/// What to do about a failed swapchain acquire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Recovery {
    /// Configure the surface again and skip this frame.
    Reconfigure,
    /// Skip this frame and try again on the next.
    Skip,
    Fatal,
}

fn recovery_for(err: &wgpu::SurfaceError) -> Recovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Recovery::Reconfigure,
        wgpu::SurfaceError::Timeout => Recovery::Skip,
        _ => Recovery::Fatal,
    }
}

pub struct WgpuRenderer {
    gpu: GpuContext,
    pass: StandardPass,
    target: SceneTarget,
    sphere: Mesh,
    loader: Option<TextureLoader>,
    overlay: Option<egui_wgpu::Renderer>,
    ui: Option<UiFrame>,
}

impl WgpuRenderer {
    /// Sets up the GPU and starts loading the normal map in the background.
    /// The sphere shades with flat normals until the map arrives.
    pub fn new(window: Arc<Window>, config: &AppConfig, state: &AppState) -> Result<Self> {
        let gpu = GpuContext::new(window, config.vsync)?;

        let normal_map = Texture::flat_normal(&gpu);
        let pass = StandardPass::new(&gpu, &normal_map);
        let target = SceneTarget::new(&gpu, state.viewport.buffer_size());
        let sphere = Mesh::sphere(&gpu, &state.scene.sphere.geometry);

        let loader = state
            .scene
            .sphere
            .material
            .normal_map
            .clone()
            .map(TextureLoader::spawn);

        let overlay = config.debug_panel.then(|| {
            egui_wgpu::Renderer::new(
                &gpu.device,
                gpu.config.format,
                egui_wgpu::RendererOptions::default(),
            )
        });

        Ok(Self {
            gpu,
            pass,
            target,
            sphere,
            loader,
            overlay,
            ui: None,
        })
    }

    /// Resizes the swapchain to the window's physical size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Queues panel output for the next frame.
    ///
    /// Texture updates from a frame that was never drawn are carried over so
    /// the overlay's font atlas is not lost across a skipped frame.
    pub fn set_ui(&mut self, mut frame: UiFrame) {
        if let Some(mut stale) = self.ui.take() {
            stale.textures_delta.append(frame.textures_delta);
            frame.textures_delta = stale.textures_delta;
        }
        self.ui = Some(frame);
    }

    fn poll_normal_map(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };

        match loader.poll() {
            LoadStatus::Pending => return,
            LoadStatus::Ready(image) => {
                log::info!(
                    "Loaded normal map {} ({}x{})",
                    image.path.display(),
                    image.width,
                    image.height
                );
                let texture = Texture::normal_map(&self.gpu, &image);
                self.pass.set_normal_map(&self.gpu, &texture);
            }
            LoadStatus::Failed(err) => {
                log::warn!("{err}; shading with flat normals");
            }
        }
        self.loader = None;
    }

    fn draw(&mut self, state: &AppState) -> Result<()> {
        self.poll_normal_map();
        self.target
            .ensure_size(&self.gpu, state.viewport.buffer_size());

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(err) => {
                return match recovery_for(&err) {
                    Recovery::Reconfigure => {
                        log::warn!("Surface {err}; reconfiguring");
                        self.gpu.reconfigure();
                        Ok(())
                    }
                    Recovery::Skip => {
                        log::warn!("Surface {err}; skipping frame");
                        Ok(())
                    }
                    Recovery::Fatal => Err(err.into()),
                };
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.pass.prepare(&self.gpu, &state.scene);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.pass.draw(&mut render_pass, &self.sphere);
        }

        let ui = self.ui.take();
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.width(), self.gpu.height()],
            pixels_per_point: ui.as_ref().map_or(1.0, |ui| ui.pixels_per_point),
        };

        if let (Some(overlay), Some(ui)) = (self.overlay.as_mut(), ui.as_ref()) {
            for (id, delta) in &ui.textures_delta.set {
                overlay.update_texture(&self.gpu.device, &self.gpu.queue, *id, delta);
            }
            overlay.update_buffers(
                &self.gpu.device,
                &self.gpu.queue,
                &mut encoder,
                &ui.primitives,
                &screen,
            );
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.pass.blit(&self.gpu, &mut render_pass, &self.target);

            if let (Some(overlay), Some(ui)) = (self.overlay.as_ref(), ui.as_ref()) {
                overlay.render(&mut render_pass.forget_lifetime(), &ui.primitives, &screen);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let (Some(overlay), Some(ui)) = (self.overlay.as_mut(), ui.as_ref()) {
            for id in &ui.textures_delta.free {
                overlay.free_texture(id);
            }
        }

        Ok(())
    }
}

impl SceneRenderer for WgpuRenderer {
    fn render(&mut self, state: &AppState) -> Result<()> {
        self.draw(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_surfaces_are_reconfigured() {
        assert_eq!(recovery_for(&wgpu::SurfaceError::Lost), Recovery::Reconfigure);
        assert_eq!(recovery_for(&wgpu::SurfaceError::Outdated), Recovery::Reconfigure);
    }

    #[test]
    fn timeouts_skip_one_frame() {
        assert_eq!(recovery_for(&wgpu::SurfaceError::Timeout), Recovery::Skip);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(recovery_for(&wgpu::SurfaceError::OutOfMemory), Recovery::Fatal);
    }
}
