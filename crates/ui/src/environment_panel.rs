//! Environment controls: scene preset, weather, and the day clock.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::scene::{SceneKind, SceneSettings};
use simulation::time_of_day::DayCycle;
use simulation::weather::{WeatherChanged, WeatherState, WeatherKind};

/// Whether the environment window is open. Toggled with E.
#[derive(Resource, Default)]
pub struct EnvironmentPanelVisible(pub bool);

pub fn panel_keybind(
    keys: Res<ButtonInput<KeyCode>>,
    mut visible: ResMut<EnvironmentPanelVisible>,
) {
    if keys.just_pressed(KeyCode::KeyE) {
        visible.0 = !visible.0;
    }
}

pub fn environment_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<EnvironmentPanelVisible>,
    mut settings: ResMut<SceneSettings>,
    mut weather: ResMut<WeatherState>,
    mut cycle: ResMut<DayCycle>,
    mut weather_changed: EventWriter<WeatherChanged>,
) {
    if !visible.0 {
        return;
    }

    let mut open = true;
    egui::Window::new("Environment")
        .open(&mut open)
        .resizable(false)
        .default_width(240.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("Scene");
            ui.horizontal(|ui| {
                for kind in [SceneKind::Plain, SceneKind::Mountain] {
                    if ui.selectable_label(settings.kind == kind, kind.name()).clicked()
                        && settings.kind != kind
                    {
                        // Terrain resamples; track already laid stays put,
                        // new sections follow the new landscape.
                        settings.kind = kind;
                    }
                }
            });

            ui.separator();

            ui.label("Weather");
            ui.horizontal(|ui| {
                for kind in WeatherKind::ALL {
                    if ui.selectable_label(weather.kind == kind, kind.name()).clicked()
                        && weather.set_kind(kind)
                    {
                        weather_changed.send(WeatherChanged { kind });
                    }
                }
            });
            let mut intensity = weather.intensity;
            if ui
                .add(egui::Slider::new(&mut intensity, 0.0..=1.0).text("intensity"))
                .changed()
            {
                weather.set_intensity(intensity);
            }

            ui.separator();

            ui.label("Time of day");
            let mut time = cycle.time;
            if ui
                .add(egui::Slider::new(&mut time, 0.0..=1.0).custom_formatter(|v, _| {
                    let h = (v * 24.0) as u32;
                    let m = ((v * 24.0 - h as f64) * 60.0) as u32;
                    format!("{h:02}:{m:02}")
                }))
                .changed()
            {
                cycle.time = time;
                cycle.auto_advance = false;
            }
            ui.horizontal(|ui| {
                for (name, preset) in DayCycle::PRESETS {
                    if ui.button(name).clicked() {
                        cycle.time = preset;
                        cycle.auto_advance = false;
                    }
                }
            });
            ui.checkbox(&mut cycle.auto_advance, "advance automatically");
        });

    if !open {
        visible.0 = false;
    }
}
