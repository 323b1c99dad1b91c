//! The driving HUD: throttle readout, gauges, odometer, and the consist
//! controls, in a fixed panel along the bottom of the screen.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::CameraMode;
use simulation::config::{MAX_FUEL, MAX_PRESSURE, MAX_SPEED, MAX_WAGONS, MIN_WAGONS};
use simulation::consist::TrainConsist;
use simulation::gauges::TrainGauges;
use simulation::input::ThrottleInput;

pub fn hud_ui(
    mut contexts: EguiContexts,
    consist: Res<TrainConsist>,
    gauges: Res<TrainGauges>,
    camera_mode: Res<CameraMode>,
    mut input: ResMut<ThrottleInput>,
) {
    egui::TopBottomPanel::bottom("hud").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(format!("Speed {:>4.2} / {MAX_SPEED:.1}", consist.speed()));
                ui.add(
                    egui::ProgressBar::new(consist.speed() / MAX_SPEED)
                        .desired_width(120.0)
                        .text(if consist.is_braking() { "BRAKE" } else { "" }),
                );
            });

            ui.separator();

            ui.vertical(|ui| {
                ui.label(format!("Fuel {:>5.1}", gauges.fuel));
                ui.add(egui::ProgressBar::new(gauges.fuel / MAX_FUEL).desired_width(120.0));
            });

            ui.vertical(|ui| {
                ui.label(format!("Pressure {:>4.1} bar", gauges.pressure));
                ui.add(egui::ProgressBar::new(gauges.pressure / MAX_PRESSURE).desired_width(120.0));
            });

            ui.separator();

            ui.label(format!("Distance {:>7.0} m", gauges.distance));

            ui.separator();

            let coupled = consist.coupled_count();
            ui.label(format!("Wagons {coupled}"));
            if ui
                .add_enabled(coupled < MAX_WAGONS, egui::Button::new("+ Wagon"))
                .clicked()
            {
                input.add_wagon = true;
            }
            if ui
                .add_enabled(coupled > MIN_WAGONS, egui::Button::new("- Wagon"))
                .clicked()
            {
                input.remove_wagon = true;
            }

            ui.separator();

            ui.label(format!("Camera: {} (C)", camera_mode.name()));
            ui.label("W/S throttle · A/R couple");
        });
    });
}
