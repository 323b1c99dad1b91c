use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod environment_panel;
pub mod hud;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<environment_panel::EnvironmentPanelVisible>()
            .add_systems(
                Update,
                (
                    environment_panel::panel_keybind,
                    hud::hud_ui,
                    environment_panel::environment_panel_ui,
                ),
            );
    }
}
