//! Asteroids - vector-graphics arcade client
//!
//! Bevy front end for the deterministic simulation in `asteroids-sim`.
//! The simulation runs once per fixed step; this crate only turns keys
//! into input frames and draws, plays and displays what comes out.

mod audio;
mod config;
mod game;
mod ui;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::WindowMode;

use asteroids::{FIELD_HEIGHT, FIELD_WIDTH, TICK_RATE};
use audio::SoundPlugin;
use config::ClientConfig;
use game::GamePlugin;
use ui::UiPlugin;

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    GameOver,
}

fn main() {
    App::new()
        // Bevy defaults with custom window
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Asteroids".into(),
                resolution: (FIELD_WIDTH, FIELD_HEIGHT).into(),
                mode: WindowMode::Windowed,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Time::<Fixed>::from_hz(f64::from(TICK_RATE)))
        // Game state
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((
            GamePlugin,
            SoundPlugin,
            UiPlugin,
        ))
        // Startup
        .add_systems(PreStartup, load_client_config)
        .add_systems(Startup, setup_2d_camera)
        .run();
}

/// Environment settings. Must run after the log plugin is built.
fn load_client_config(mut commands: Commands) {
    commands.insert_resource(ClientConfig::from_env());
}

/// Orthographic camera showing exactly the play-field.
fn setup_2d_camera(mut commands: Commands, config: Res<ClientConfig>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: config.game.field_width,
                height: config.game.field_height,
            },
            ..OrthographicProjection::default_2d()
        },
    ));

    info!("Asteroids v{} initialized (seed {})", asteroids::VERSION, config.seed);
    match serde_json::to_string(&*config) {
        Ok(json) => debug!("Client config: {}", json),
        Err(e) => warn!("Could not serialize client config: {}", e),
    }
}
