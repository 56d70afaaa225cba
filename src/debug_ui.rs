//! egui front-end for [`DebugPanel`].

use winit::event::WindowEvent;
use winit::window::Window;

use crate::color::Color;
use crate::debug_panel::{DebugPanel, PanelChange};
use crate::light::PointLight;

/// Tessellated panel output, ready for the renderer.
pub struct UiFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Owns the egui context and its winit input adapter.
pub struct DebugUi {
    context: egui::Context,
    winit_state: egui_winit::State,
}

impl DebugUi {
    pub fn new(window: &Window) -> Self {
        let context = egui::Context::default();
        let winit_state = egui_winit::State::new(
            context.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );

        Self {
            context,
            winit_state,
        }
    }

    /// Feeds a window event to egui. Returns whether egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Lays out the panel against the current light values and returns the
    /// edits made this frame along with the shapes to paint.
    pub fn run(
        &mut self,
        window: &Window,
        panel: &DebugPanel,
        lights: &[PointLight],
    ) -> (Vec<PanelChange>, UiFrame) {
        let raw_input = self.winit_state.take_egui_input(window);
        let mut changes = Vec::new();

        let full_output = self.context.run(raw_input, |ctx| {
            changes.clear();
            show_panel(ctx, panel, lights, &mut changes);
        });

        self.winit_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self
            .context
            .tessellate(full_output.shapes, pixels_per_point);

        (
            changes,
            UiFrame {
                primitives,
                textures_delta: full_output.textures_delta,
                pixels_per_point,
            },
        )
    }
}

fn show_panel(
    ctx: &egui::Context,
    panel: &DebugPanel,
    lights: &[PointLight],
    changes: &mut Vec<PanelChange>,
) {
    egui::Window::new(panel.title.as_str())
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            for (folder_index, folder) in panel.folders().iter().enumerate() {
                egui::CollapsingHeader::new(folder.name.as_str())
                    .default_open(true)
                    .show(ui, |ui| {
                        for (binding_index, binding) in folder.numbers.iter().enumerate() {
                            let Some(current) = panel.value(folder_index, binding_index, lights)
                            else {
                                continue;
                            };
                            let mut value = current;
                            let slider = egui::Slider::new(&mut value, binding.min..=binding.max)
                                .step_by(binding.step as f64)
                                .text(binding.label);
                            // The slider re-snaps in f64 every frame, which can
                            // nudge an untouched f32 by one ulp.
                            if ui.add(slider).changed() && binding.is_edit(current, value) {
                                changes.push(PanelChange::Number {
                                    folder: folder_index,
                                    binding: binding_index,
                                    value,
                                });
                            }
                        }

                        if let Some(picker) = folder.color {
                            let mut rgb = picker.value.to_srgb_u8();
                            ui.horizontal(|ui| {
                                if ui.color_edit_button_srgb(&mut rgb).changed() {
                                    changes.push(PanelChange::Color {
                                        folder: folder_index,
                                        value: Color::from_srgb_u8(rgb),
                                    });
                                }
                                ui.label(picker.label);
                            });
                        }
                    });
            }
        });
}
