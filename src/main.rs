mod render;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use render::{kind_rgb, load_kind_visuals, setup_camera, spawn_agent_sprites, sync_agent_sprites};
use rps_arena::config::SEED_ENV_VAR;
use rps_arena::{ArenaConfig, ArenaError, Kind, Simulation, SimulationPlugin, SimulationState};

fn main() -> Result<(), ArenaError> {
    let config = ArenaConfig::default();
    let seed = std::env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok());
    let simulation = Simulation::new(&config, seed)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rock Paper Scissors".to_string(),
                resolution: (config.arena_width, config.arena_height).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(simulation)
        .add_plugins(SimulationPlugin)
        .add_systems(Startup, (setup_camera, (load_kind_visuals, spawn_agent_sprites).chain()))
        .add_systems(Update, (sync_agent_sprites, ui_system))
        .run();

    Ok(())
}

fn egui_color(kind: Kind) -> egui::Color32 {
    let [r, g, b] = kind_rgb(kind);
    egui::Color32::from_rgb(r, g, b)
}

fn ui_system(
    mut contexts: EguiContexts,
    mut simulation: ResMut<Simulation>,
    mut simulation_state: ResMut<SimulationState>,
) {
    egui::Window::new("Arena")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                let button_text = if *simulation_state == SimulationState::Running {
                    "⏸ Pause"
                } else {
                    "▶ Resume"
                };
                if ui.button(button_text).clicked() {
                    *simulation_state = simulation_state.toggled();
                }

                if ui.button("⟲ Restart").clicked() {
                    if let Err(err) = simulation.restart(None) {
                        error!("restart failed: {}", err);
                    }
                }
            });

            ui.separator();
            ui.label(format!("Tick: {}", simulation.ticks()));

            let census = simulation.census();
            for kind in Kind::ALL {
                ui.colored_label(egui_color(kind), format!("{}: {}", kind, census.get(kind)));
            }
            ui.label(format!("Total: {}", census.total()));

            if let Some(kind) = simulation.survivor() {
                ui.separator();
                ui.heading(format!("{} wins", kind));
            }
        });
}
