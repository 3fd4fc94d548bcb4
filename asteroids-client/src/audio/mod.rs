//! Sound playback for the synthesized effects.
//!
//! One-shots follow simulation events. Thrust and saucer sounds are
//! looping entities spawned and despawned to match the game state.

use bevy::audio::Volume;
use bevy::prelude::*;

use asteroids::{GameEventData, GameState, SoundBank, SoundEffect};

use crate::config::ClientConfig;
use crate::game::{SimEvent, Simulation};

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sounds)
            .add_systems(Update, (play_one_shots, sync_loops).chain());
    }
}

/// Handles for every effect, built once from the in-memory WAVs.
#[derive(Resource, Default)]
pub struct SoundHandles {
    clips: Vec<(SoundEffect, Handle<AudioSource>)>,
}

impl SoundHandles {
    pub fn get(&self, effect: SoundEffect) -> Option<Handle<AudioSource>> {
        self.clips
            .iter()
            .find(|(e, _)| *e == effect)
            .map(|(_, handle)| handle.clone())
    }
}

/// Marks the entity playing a looped effect.
#[derive(Component)]
pub struct LoopingSound(pub SoundEffect);

fn load_sounds(mut commands: Commands, mut sources: ResMut<Assets<AudioSource>>) {
    let bank = SoundBank::synthesize();
    let clips = bank
        .iter()
        .map(|(effect, wav)| {
            let handle = sources.add(AudioSource { bytes: wav.to_vec().into() });
            (effect, handle)
        })
        .collect::<Vec<_>>();

    info!("Synthesized {} sound effects", clips.len());
    commands.insert_resource(SoundHandles { clips });
}

fn play_one_shots(
    mut commands: Commands,
    sounds: Res<SoundHandles>,
    config: Res<ClientConfig>,
    mut events: EventReader<SimEvent>,
    loops: Query<Entity, With<LoopingSound>>,
) {
    for SimEvent(event) in events.read() {
        if let GameEventData::ShipDestroyed { .. } = event.data {
            for entity in loops.iter() {
                commands.entity(entity).despawn();
            }
        }

        let Some(handle) = event.sound().and_then(|effect| sounds.get(effect)) else {
            continue;
        };
        commands.spawn((
            AudioPlayer::new(handle),
            PlaybackSettings::DESPAWN.with_volume(Volume::new(config.volume)),
        ));
    }
}

/// Which looped effects should be audible for this state.
pub fn wanted_loops(state: &GameState) -> [(SoundEffect, bool); 2] {
    let playing = !state.is_game_over();
    [
        (SoundEffect::Thrust, playing && state.ship.thrusting),
        (SoundEffect::Saucer, playing && state.ufo_present()),
    ]
}

fn sync_loops(
    mut commands: Commands,
    sounds: Res<SoundHandles>,
    config: Res<ClientConfig>,
    sim: Res<Simulation>,
    loops: Query<(Entity, &LoopingSound)>,
) {
    for (effect, wanted) in wanted_loops(&sim.state) {
        let playing = loops.iter().find(|(_, l)| l.0 == effect).map(|(e, _)| e);

        match (wanted, playing) {
            (true, None) => {
                if let Some(handle) = sounds.get(effect) {
                    commands.spawn((
                        AudioPlayer::new(handle),
                        PlaybackSettings::LOOP.with_volume(Volume::new(config.volume)),
                        LoopingSound(effect),
                    ));
                }
            }
            (false, Some(entity)) => commands.entity(entity).despawn(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids::GameConfig;

    #[test]
    fn test_no_loops_at_start() {
        let state = GameState::new(GameConfig::default(), 1, 0);
        assert!(wanted_loops(&state).iter().all(|(_, wanted)| !wanted));
    }

    #[test]
    fn test_thrust_loop_follows_ship() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        state.ship.thrusting = true;
        assert_eq!(wanted_loops(&state)[0], (SoundEffect::Thrust, true));

        state.phase = asteroids::GamePhase::GameOver;
        assert_eq!(wanted_loops(&state)[0], (SoundEffect::Thrust, false));
    }

    #[test]
    fn test_every_effect_is_looped_or_one_shot() {
        let looped: Vec<_> = SoundEffect::ALL.iter().filter(|e| e.is_looped()).collect();
        assert_eq!(looped, vec![&SoundEffect::Thrust, &SoundEffect::Saucer]);
    }
}
