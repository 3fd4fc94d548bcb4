//! Game module - drives the simulation from Bevy's fixed timestep.
//!
//! One [`tick`] per `FixedUpdate`. Everything the simulation reports
//! is re-sent as a [`SimEvent`] for audio, particles and the HUD.

use std::fs;

use bevy::input::InputSystem;
use bevy::prelude::*;

use asteroids::game::tick::tick;
use asteroids::{GameEvent, GameEventData, GameState, HighScoreStore, InputRecording};

use crate::config::ClientConfig;
use crate::AppState;

pub mod input;
pub mod render;

pub use input::LatchedPresses;

pub const QUIT_KEY: KeyCode = KeyCode::Escape;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<LatchedPresses>()

            // Events
            .add_event::<SimEvent>()

            .add_systems(Startup, setup_simulation)

            // Edge presses must be seen before the fixed steps run
            .add_systems(PreUpdate, input::latch_presses.after(InputSystem))

            // Simulation (fixed timestep, both phases: restart is handled inside)
            .add_systems(FixedUpdate, (
                step_simulation,
                sync_app_state,
            ).chain())

            // Visual updates (variable timestep)
            .add_systems(Update, (
                render::draw_world,
                render::spawn_debris,
                render::update_debris,
                save_high_score_on_game_over,
                handle_quit,
            ))

            .add_systems(Last, persist_on_exit);
    }
}

// ============================================================================
// RESOURCES & EVENTS
// ============================================================================

/// The running game plus everything persisted from it.
#[derive(Resource)]
pub struct Simulation {
    pub state: GameState,
    pub recording: InputRecording,
    pub store: HighScoreStore,
}

impl Simulation {
    pub fn new(config: &ClientConfig) -> Self {
        let store = HighScoreStore::new(config.highscore_path.clone());
        let high_score = store.load();
        Self {
            state: GameState::new(config.game.clone(), config.seed, high_score),
            recording: InputRecording::new(config.seed),
            store,
        }
    }

    /// Fold a game still in progress into the high score and write it.
    pub fn save_on_exit(&mut self) {
        self.state.high_score = self.state.high_score.max(self.state.score);
        self.save_high_score();
    }

    /// Write the current high score, logging rather than failing.
    pub fn save_high_score(&self) {
        match self.store.save(self.state.high_score) {
            Ok(()) => info!("High score {} saved", self.state.high_score),
            Err(e) => warn!("Failed to save high score: {}", e),
        }
    }
}

/// A simulation event, forwarded to Bevy systems.
#[derive(Event, Debug, Clone)]
pub struct SimEvent(pub GameEvent);

// ============================================================================
// SYSTEMS
// ============================================================================

fn setup_simulation(mut commands: Commands, config: Res<ClientConfig>) {
    let sim = Simulation::new(&config);
    info!(
        "New game: {} asteroids, high score {}",
        sim.state.asteroids.len(),
        sim.state.high_score
    );
    commands.insert_resource(sim);
}

/// Advance the simulation by one tick.
fn step_simulation(
    keys: Res<ButtonInput<KeyCode>>,
    mut latched: ResMut<LatchedPresses>,
    mut sim: ResMut<Simulation>,
    mut events: EventWriter<SimEvent>,
) {
    let frame = input::frame_from_keys(&keys, &mut latched);
    let sim = &mut *sim;

    sim.recording.record(sim.state.tick, frame);
    let result = tick(&mut sim.state, frame);

    for event in result.events {
        debug!("{}", event);
        events.send(SimEvent(event));
    }
}

/// Mirror the simulation phase into [`AppState`].
fn sync_app_state(
    sim: Res<Simulation>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let wanted = if sim.state.is_game_over() {
        AppState::GameOver
    } else {
        AppState::Playing
    };
    if *state.get() != wanted {
        next_state.set(wanted);
    }
}

fn save_high_score_on_game_over(
    sim: Res<Simulation>,
    mut events: EventReader<SimEvent>,
) {
    for SimEvent(event) in events.read() {
        if let GameEventData::GameOver { score, new_high_score } = event.data {
            info!("Game over with {} points", score);
            if new_high_score {
                sim.save_high_score();
            }
        }
    }
}

fn handle_quit(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(QUIT_KEY) {
        exit.send(AppExit::Success);
    }
}

/// Save the high score and the optional recording once the app exits,
/// whether through Escape or by closing the window.
fn persist_on_exit(
    mut exits: EventReader<AppExit>,
    sim: Option<ResMut<Simulation>>,
    config: Res<ClientConfig>,
) {
    if exits.read().last().is_none() {
        return;
    }
    let Some(mut sim) = sim else {
        return;
    };

    sim.save_on_exit();

    if let Some(path) = &config.record_path {
        match sim.recording.to_json() {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => info!(
                    "Recording of {} ticks written to {}",
                    sim.recording.tick_count(),
                    path.display()
                ),
                Err(e) => warn!("Failed to write recording to {}: {}", path.display(), e),
            },
            Err(e) => warn!("Failed to serialize recording: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids::InputFrame;

    fn test_config(dir: &tempfile::TempDir) -> ClientConfig {
        ClientConfig {
            seed: 7,
            highscore_path: dir.path().join("highscore.txt"),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_simulation_loads_saved_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        fs::write(&config.highscore_path, "1230\n").unwrap();

        let sim = Simulation::new(&config);
        assert_eq!(sim.state.high_score, 1230);
        assert_eq!(sim.state.rng_seed, 7);
    }

    #[test]
    fn test_save_high_score_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let mut sim = Simulation::new(&config);
        sim.state.high_score = 4500;
        sim.save_high_score();

        assert_eq!(Simulation::new(&config).state.high_score, 4500);
    }

    #[test]
    fn test_exit_keeps_score_of_unfinished_game() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        fs::write(&config.highscore_path, "100").unwrap();

        let mut sim = Simulation::new(&config);
        sim.state.score = 5000;
        sim.save_on_exit();

        assert_eq!(sim.state.high_score, 5000);
        assert_eq!(Simulation::new(&config).state.high_score, 5000);
    }

    #[test]
    fn test_exit_never_lowers_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        fs::write(&config.highscore_path, "800").unwrap();

        let mut sim = Simulation::new(&config);
        sim.state.score = 20;
        sim.save_on_exit();

        assert_eq!(Simulation::new(&config).state.high_score, 800);
    }

    #[test]
    fn test_step_records_and_forwards_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new();
        app.insert_resource(test_config(&dir))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<LatchedPresses>()
            .add_event::<SimEvent>()
            .add_systems(Startup, setup_simulation)
            .add_systems(Update, step_simulation);

        app.update();

        let sim = app.world().resource::<Simulation>();
        assert_eq!(sim.state.tick, 1);
        assert_eq!(sim.recording.tick_count(), 1);
        assert_eq!(sim.recording.input_at(0), InputFrame::new());

        let events = app.world().resource::<Events<SimEvent>>();
        let mut reader = events.get_cursor();
        assert!(reader
            .read(events)
            .any(|SimEvent(e)| matches!(e.data, GameEventData::LevelStarted { level: 1, .. })));
    }
}
