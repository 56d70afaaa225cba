//! Live light tuning: folders of bounded bindings onto light fields.
//!
//! The panel is a plain model. A front-end (see [`crate::debug_ui`]) reads
//! the current values, shows widgets, and reports edits back as
//! [`PanelChange`]s, which [`DebugPanel::apply`] writes into the lights after
//! clamping and step-snapping.

use crate::color::Color;
use crate::light::PointLight;

/// A numeric light property a slider can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightField {
    PositionX,
    PositionY,
    PositionZ,
    Intensity,
}

impl LightField {
    pub fn read(self, light: &PointLight) -> f32 {
        match self {
            LightField::PositionX => light.position.x,
            LightField::PositionY => light.position.y,
            LightField::PositionZ => light.position.z,
            LightField::Intensity => light.intensity,
        }
    }

    pub fn write(self, light: &mut PointLight, value: f32) {
        match self {
            LightField::PositionX => light.position.x = value,
            LightField::PositionY => light.position.y = value,
            LightField::PositionZ => light.position.z = value,
            LightField::Intensity => light.intensity = value,
        }
    }
}

/// A slider over `[min, max]` in increments of `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberBinding {
    pub label: &'static str,
    pub field: LightField,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl NumberBinding {
    pub const fn new(label: &'static str, field: LightField, min: f32, max: f32) -> Self {
        Self {
            label,
            field,
            min,
            max,
            step: 0.01,
        }
    }

    /// Clamps to the range, then rounds to the nearest step.
    pub fn constrain(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        if self.step > 0.0 {
            (clamped / self.step).round() * self.step
        } else {
            clamped
        }
    }

    /// Whether moving from `current` to `value` is at least half a step.
    /// Smaller differences are float noise from the widget's step rounding.
    pub fn is_edit(&self, current: f32, value: f32) -> bool {
        if self.step > 0.0 {
            (value - current).abs() >= self.step / 2.0
        } else {
            value != current
        }
    }
}

/// A color picker with its own value.
///
/// The picker starts from `value`, not from the light's color; the light only
/// takes on the picker's color once the picker is changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBinding {
    pub label: &'static str,
    pub value: Color,
}

/// One collapsible section bound to one light.
#[derive(Clone, Debug, PartialEq)]
pub struct LightFolder {
    pub name: String,
    pub light: usize,
    pub numbers: Vec<NumberBinding>,
    pub color: Option<ColorBinding>,
}

impl LightFolder {
    pub fn new(name: impl Into<String>, light: usize) -> Self {
        Self {
            name: name.into(),
            light,
            numbers: Vec::new(),
            color: None,
        }
    }

    /// Position y, x, z and intensity, in that order.
    pub fn with_light_controls(mut self) -> Self {
        self.numbers.extend([
            NumberBinding::new("y", LightField::PositionY, -3.0, 3.0),
            NumberBinding::new("x", LightField::PositionX, -6.0, 6.0),
            NumberBinding::new("z", LightField::PositionZ, -3.0, 3.0),
            NumberBinding::new("intensity", LightField::Intensity, 0.0, 10.0),
        ]);
        self
    }

    pub fn with_color(mut self, label: &'static str, value: Color) -> Self {
        self.color = Some(ColorBinding { label, value });
        self
    }
}

/// An edit reported by the front-end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelChange {
    Number {
        folder: usize,
        binding: usize,
        value: f32,
    },
    Color {
        folder: usize,
        value: Color,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DebugPanel {
    pub title: String,
    folders: Vec<LightFolder>,
}

impl DebugPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            folders: Vec::new(),
        }
    }

    /// Controls for the red and contrast lights. The white key light is
    /// fixed.
    pub fn for_sphere_lights() -> Self {
        let mut panel = Self::new("Lights");
        panel
            .add_folder(LightFolder::new("Light 2", 1).with_light_controls())
            .add_folder(
                LightFolder::new("Light 3", 2)
                    .with_light_controls()
                    .with_color("color", Color::from_hex(0xff0000)),
            );
        panel
    }

    pub fn add_folder(&mut self, folder: LightFolder) -> &mut Self {
        self.folders.push(folder);
        self
    }

    pub fn folders(&self) -> &[LightFolder] {
        &self.folders
    }

    /// Current value behind a number binding, or `None` for an unknown
    /// binding or light.
    pub fn value(&self, folder: usize, binding: usize, lights: &[PointLight]) -> Option<f32> {
        let folder = self.folders.get(folder)?;
        let binding = folder.numbers.get(binding)?;
        let light = lights.get(folder.light)?;
        Some(binding.field.read(light))
    }

    /// Writes an edit into the bound light. Returns whether anything was
    /// applied.
    pub fn apply(&mut self, change: PanelChange, lights: &mut [PointLight]) -> bool {
        match change {
            PanelChange::Number {
                folder,
                binding,
                value,
            } => {
                let Some(folder) = self.folders.get(folder) else {
                    return false;
                };
                let (Some(binding), Some(light)) =
                    (folder.numbers.get(binding), lights.get_mut(folder.light))
                else {
                    return false;
                };
                let value = binding.constrain(value);
                binding.field.write(light, value);
                log::debug!("{}.{} = {}", folder.name, binding.label, value);
                true
            }
            PanelChange::Color { folder, value } => {
                let Some(folder) = self.folders.get_mut(folder) else {
                    return false;
                };
                let (Some(picker), Some(light)) =
                    (folder.color.as_mut(), lights.get_mut(folder.light))
                else {
                    return false;
                };
                picker.value = value;
                light.color = value;
                log::debug!("{}.{} = #{:06x}", folder.name, picker.label, value.to_hex());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::sphere_lights;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn folders_bind_lights_two_and_three() {
        let panel = DebugPanel::for_sphere_lights();
        let names: Vec<_> = panel
            .folders()
            .iter()
            .map(|f| (f.name.as_str(), f.light))
            .collect();
        assert_eq!(names, vec![("Light 2", 1), ("Light 3", 2)]);

        for folder in panel.folders() {
            let ranges: Vec<_> = folder
                .numbers
                .iter()
                .map(|b| (b.label, b.min, b.max, b.step))
                .collect();
            assert_eq!(
                ranges,
                vec![
                    ("y", -3.0, 3.0, 0.01),
                    ("x", -6.0, 6.0, 0.01),
                    ("z", -3.0, 3.0, 0.01),
                    ("intensity", 0.0, 10.0, 0.01),
                ]
            );
        }

        assert!(panel.folders()[0].color.is_none());
        let picker = panel.folders()[1].color.unwrap();
        assert_eq!(picker.value.to_hex(), 0xff0000);
    }

    #[test]
    fn reads_current_light_values() {
        let panel = DebugPanel::for_sphere_lights();
        let lights = sphere_lights();
        assert_eq!(panel.value(0, 0, &lights), Some(1.0));
        assert_eq!(panel.value(0, 1, &lights), Some(-1.86));
        assert_eq!(panel.value(1, 3, &lights), Some(6.8));
        assert_eq!(panel.value(2, 0, &lights), None);
        assert_eq!(panel.value(0, 9, &lights), None);
    }

    #[test]
    fn number_edit_writes_only_its_field() {
        let mut panel = DebugPanel::for_sphere_lights();
        let mut lights = sphere_lights();
        let before = lights;

        let applied = panel.apply(
            PanelChange::Number {
                folder: 0,
                binding: 2,
                value: 0.5,
            },
            &mut lights,
        );

        assert!(applied);
        assert!(approx(lights[1].position.z, 0.5));
        assert_eq!(lights[1].position.x, before[1].position.x);
        assert_eq!(lights[1].intensity, before[1].intensity);
        assert_eq!(lights[0], before[0]);
        assert_eq!(lights[2], before[2]);
    }

    #[test]
    fn number_edits_are_clamped_and_snapped() {
        let binding = NumberBinding::new("x", LightField::PositionX, -6.0, 6.0);
        assert_eq!(binding.constrain(9.0), 6.0);
        assert_eq!(binding.constrain(-100.0), -6.0);
        assert!(approx(binding.constrain(1.23456), 1.23));
        assert!(approx(binding.constrain(-0.004), 0.0));

        let mut panel = DebugPanel::for_sphere_lights();
        let mut lights = sphere_lights();
        panel.apply(
            PanelChange::Number {
                folder: 1,
                binding: 3,
                value: 42.0,
            },
            &mut lights,
        );
        assert_eq!(lights[2].intensity, 10.0);
    }

    #[test]
    fn rounding_noise_is_not_an_edit() {
        let binding = NumberBinding::new("y", LightField::PositionY, -3.0, 3.0);
        assert!(!binding.is_edit(1.0, 0.9999999));
        assert!(!binding.is_edit(-1.86, -1.8600001));
        assert!(binding.is_edit(1.0, 1.01));
        assert!(binding.is_edit(1.0, 0.99));
    }

    #[test]
    fn color_change_touches_only_light_three_color() {
        let mut panel = DebugPanel::for_sphere_lights();
        let mut lights = sphere_lights();
        let before = lights;

        let green = Color::from_hex(0x00ff00);
        assert!(panel.apply(PanelChange::Color { folder: 1, value: green }, &mut lights));

        assert_eq!(lights[2].color, green);
        assert_eq!(lights[2].position, before[2].position);
        assert_eq!(lights[2].intensity, before[2].intensity);
        assert_eq!(lights[0], before[0]);
        assert_eq!(lights[1], before[1]);
        assert_eq!(panel.folders()[1].color.unwrap().value, green);
    }

    #[test]
    fn picker_value_is_independent_until_changed() {
        let panel = DebugPanel::for_sphere_lights();
        let lights = sphere_lights();
        // The picker shows red while the light is still cyan.
        assert_eq!(panel.folders()[1].color.unwrap().value.to_hex(), 0xff0000);
        assert_eq!(lights[2].color.to_hex(), 0x00e1ff);
    }

    #[test]
    fn unknown_targets_are_rejected() {
        let mut panel = DebugPanel::for_sphere_lights();
        let mut lights = sphere_lights();
        let before = lights;

        assert!(!panel.apply(PanelChange::Color { folder: 0, value: Color::WHITE }, &mut lights));
        assert!(!panel.apply(
            PanelChange::Number {
                folder: 5,
                binding: 0,
                value: 1.0,
            },
            &mut lights,
        ));
        assert_eq!(lights, before);
    }
}
