//! Authoritative Simulation Tick
//!
//! One call advances the game by 1/60 s. Given the same seed, config
//! and inputs, the sequence of states is bit-identical on every run.

#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::config::GameConfig;
use crate::game::bullet::BulletOwner;
use crate::game::collision::{asteroid_hitting_ship, collides, first_bullet_hit};
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputRecording};
use crate::game::state::{GamePhase, GameState};
use crate::game::ufo::{Ufo, UfoSize};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the game is over after this tick
    pub game_over: bool,
}

/// Run one simulation tick.
///
/// While the game is over the world stays frozen and only a restart
/// press has an effect.
pub fn tick(state: &mut GameState, input: InputFrame) -> TickResult {
    // 0. Advance tick counter
    state.tick += 1;

    match state.phase {
        GamePhase::GameOver => {
            if input.restart_pressed() {
                state.reset();
            }
        }
        GamePhase::Playing => simulate(state, input),
    }

    #[cfg(feature = "debug-tracing")]
    trace!(
        tick = state.tick,
        asteroids = state.asteroids.len(),
        bullets = state.bullets.len(),
        ufos = state.ufos.len(),
        score = state.score,
        "tick"
    );

    TickResult {
        events: state.take_events(),
        game_over: state.is_game_over(),
    }
}

/// One tick of active play. Stops early if the ship's last life is lost.
fn simulate(state: &mut GameState, input: InputFrame) {
    // 1. Apply player input
    if !apply_input(state, input) {
        return;
    }

    // 2. Update ship
    state.ship.update(&state.config);

    // 3. Update bullets
    for bullet in &mut state.bullets {
        bullet.update(&state.config);
    }
    state.bullets.retain(|b| !b.is_expired());

    // 4. Update asteroids
    for asteroid in &mut state.asteroids {
        asteroid.update(&state.config);
    }

    // 5. Asteroids vs ship
    if !process_asteroid_ship_collisions(state) {
        return;
    }

    // 6. Player bullets vs asteroids
    process_bullet_asteroid_collisions(state);

    // 7. UFOs: move, shoot, collide
    if !process_ufos(state) {
        return;
    }

    // 8. UFO bullets vs ship
    if !process_ufo_bullet_hits(state) {
        return;
    }

    // 9. Maybe spawn a UFO
    maybe_spawn_ufo(state);

    // 10. Field cleared - next level
    if state.asteroids.is_empty() {
        state.next_level();
    }
}

/// Returns `false` if the game ended.
fn apply_input(state: &mut GameState, input: InputFrame) -> bool {
    if input.hyperspace_pressed() {
        let destroyed = state.ship.hyperspace(&mut state.rng, &state.config);
        state.push_event(GameEvent::hyperspace(state.tick, destroyed));
        if destroyed {
            state.destroy_ship();
            if state.is_game_over() {
                return false;
            }
        }
    }

    let turn = state.config.ship_rotation_speed;
    if input.rotate_left_held() {
        state.ship.rotate(-turn);
    }
    if input.rotate_right_held() {
        state.ship.rotate(turn);
    }

    state.ship.thrusting = input.thrust_held();

    if input.fire_held() {
        if let Some(bullet) = state.ship.shoot(&state.config) {
            state.bullets.push(bullet);
            state.push_event(GameEvent::bullet_fired(state.tick, BulletOwner::Player));
        }
    }

    true
}

/// At most one ship death per check. Returns `false` if the game ended.
fn process_asteroid_ship_collisions(state: &mut GameState) -> bool {
    if !state.ship.is_vulnerable() {
        return true;
    }
    if asteroid_hitting_ship(&state.asteroids, &state.ship).is_some() {
        state.destroy_ship();
    }
    !state.is_game_over()
}

/// Pieces created this tick are not tested until the next one.
fn process_bullet_asteroid_collisions(state: &mut GameState) {
    let mut remaining = state.asteroids.len();
    let mut i = 0;

    while i < remaining {
        let hit = first_bullet_hit(&state.bullets, BulletOwner::Player, &state.asteroids[i]);
        match hit {
            Some(bullet_idx) => {
                state.bullets.remove(bullet_idx);
                state.destroy_asteroid(i);
                remaining -= 1;
            }
            None => i += 1,
        }
    }
}

/// Returns `false` if the game ended.
fn process_ufos(state: &mut GameState) -> bool {
    let mut i = 0;

    while i < state.ufos.len() {
        if !state.ufos[i].update(&mut state.rng, &state.config) {
            state.ufos.remove(i);
            state.push_event(GameEvent::ufo_left(state.tick));
            continue;
        }

        let target = state.ship.position;
        if let Some(bullet) = state.ufos[i].shoot(target, &mut state.rng, &state.config) {
            state.bullets.push(bullet);
            state.push_event(GameEvent::bullet_fired(state.tick, BulletOwner::Ufo));
        }

        if state.ship.is_vulnerable() && collides(&state.ufos[i], &state.ship) {
            state.ufos.remove(i);
            state.destroy_ship();
            return !state.is_game_over();
        }

        if let Some(bullet_idx) = first_bullet_hit(&state.bullets, BulletOwner::Player, &state.ufos[i]) {
            state.bullets.remove(bullet_idx);
            let ufo = state.ufos.remove(i);
            state.score += ufo.points();
            state.push_event(GameEvent::ufo_destroyed(state.tick, ufo.size, ufo.position));
            continue;
        }

        i += 1;
    }

    true
}

/// Returns `false` if the game ended.
fn process_ufo_bullet_hits(state: &mut GameState) -> bool {
    if !state.ship.is_vulnerable() {
        return true;
    }
    if let Some(bullet_idx) = first_bullet_hit(&state.bullets, BulletOwner::Ufo, &state.ship) {
        state.bullets.remove(bullet_idx);
        state.destroy_ship();
    }
    !state.is_game_over()
}

fn maybe_spawn_ufo(state: &mut GameState) {
    if state.ufo_present() || !state.rng.next_bool(state.config.ufo_spawn_chance) {
        return;
    }

    let size = if state.rng.next_bool(state.config.ufo_small_chance) {
        UfoSize::Small
    } else {
        UfoSize::Large
    };
    let id = state.alloc_id();
    let ufo = Ufo::spawn(id, size, &mut state.rng, &state.config);
    state.ufos.push(ufo);
    state.push_event(GameEvent::ufo_spawned(state.tick, size));
}

/// Replay a recorded session from its seed.
///
/// Returns the final state and every event produced along the way.
pub fn replay(
    config: GameConfig,
    seed: u64,
    high_score: u32,
    recording: &InputRecording,
) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState::new(config, seed, high_score);
    let mut all_events = Vec::new();

    for (_, input) in recording.replay_iter() {
        let result = tick(&mut state, input);
        all_events.extend(result.events);
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use crate::game::asteroid::{Asteroid, AsteroidSize};
    use crate::game::bullet::Bullet;
    use crate::game::events::GameEventData;

    /// A state with no asteroids near the centre and UFOs disabled.
    fn quiet_state(seed: u64) -> GameState {
        quiet_state_with(
            GameConfig {
                ufo_spawn_chance: 0.0,
                ..GameConfig::default()
            },
            seed,
        )
    }

    /// Asteroids parked in a corner, any config.
    fn quiet_state_with(config: GameConfig, seed: u64) -> GameState {
        let mut state = GameState::new(config, seed, 0);
        for asteroid in &mut state.asteroids {
            asteroid.velocity = Vec2::ZERO;
            asteroid.position = Vec2::new(40.0, 40.0);
        }
        state.take_events();
        state
    }

    fn place_asteroid(state: &mut GameState, position: Vec2, size: AsteroidSize) {
        let id = state.alloc_id();
        let mut asteroid = Asteroid::spawn(id, position, size, &mut state.rng, &state.config);
        asteroid.velocity = Vec2::ZERO;
        state.asteroids.push(asteroid);
    }

    fn scripted_input(t: u32) -> InputFrame {
        let mut frame = InputFrame::new();
        frame.set_rotate_left(t % 90 < 30);
        frame.set_thrust(t % 50 < 20);
        frame.set_fire(t % 7 == 0);
        frame.set_hyperspace(t % 400 == 399);
        frame
    }

    #[test]
    fn test_tick_determinism() {
        let mut state1 = GameState::new(GameConfig::default(), 12345, 0);
        let mut state2 = GameState::new(GameConfig::default(), 12345, 0);

        for t in 0..1200 {
            let input = scripted_input(t);
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_rotation_and_thrust() {
        let mut state = quiet_state(1);

        tick(&mut state, InputFrame::new().with_rotate_right());
        assert_eq!(state.ship.rotation, 5.0);
        tick(&mut state, InputFrame::new().with_rotate_left().with_rotate_right());
        assert_eq!(state.ship.rotation, 5.0);

        tick(&mut state, InputFrame::new().with_thrust());
        assert!(state.ship.thrusting);
        assert!(state.ship.velocity.length() > 0.0);

        tick(&mut state, InputFrame::new());
        assert!(!state.ship.thrusting);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = quiet_state(2);
        let mut fired = 0;

        for _ in 0..30 {
            let result = tick(&mut state, InputFrame::new().with_fire());
            fired += result
                .events
                .iter()
                .filter(|e| e.data == GameEventData::BulletFired { owner: BulletOwner::Player })
                .count();
        }

        // Ticks 1, 11, 21
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_bullet_splits_asteroid() {
        let mut state = quiet_state(3);
        place_asteroid(&mut state, Vec2::new(400.0, 200.0), AsteroidSize::Large);
        let before = state.asteroids.len();

        // Bullet starts at (400, 280), moving 10 units up per tick
        tick(&mut state, InputFrame::new().with_fire());
        let mut destroyed = false;
        for _ in 0..10 {
            let result = tick(&mut state, InputFrame::new());
            destroyed |= result
                .events
                .iter()
                .any(|e| matches!(e.data, GameEventData::AsteroidDestroyed { size: AsteroidSize::Large, .. }));
        }

        assert!(destroyed);
        assert_eq!(state.score, 20);
        assert_eq!(state.asteroids.len(), before + 1);
        assert!(state.player_bullets().next().is_none());
    }

    #[test]
    fn test_one_bullet_destroys_one_asteroid() {
        let mut state = quiet_state(4);
        place_asteroid(&mut state, Vec2::new(600.0, 100.0), AsteroidSize::Small);
        place_asteroid(&mut state, Vec2::new(602.0, 100.0), AsteroidSize::Small);
        state.bullets.push(Bullet::new(Vec2::new(601.0, 100.0), Vec2::ZERO, BulletOwner::Player, &state.config));

        tick(&mut state, InputFrame::new());

        assert_eq!(state.score, 100);
        assert_eq!(state.asteroids.iter().filter(|a| a.size == AsteroidSize::Small).count(), 1);
    }

    #[test]
    fn test_ufo_bullets_pass_through_asteroids() {
        let mut state = quiet_state(5);
        place_asteroid(&mut state, Vec2::new(600.0, 100.0), AsteroidSize::Large);
        state.bullets.push(Bullet::new(Vec2::new(600.0, 100.0), Vec2::ZERO, BulletOwner::Ufo, &state.config));
        let before = state.asteroids.len();

        tick(&mut state, InputFrame::new());

        assert_eq!(state.asteroids.len(), before);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_asteroid_destroys_ship() {
        let mut state = quiet_state(6);
        place_asteroid(&mut state, Vec2::new(420.0, 300.0), AsteroidSize::Small);

        let result = tick(&mut state, InputFrame::new());

        assert_eq!(state.ship.lives, 2);
        assert!(state.ship.invincible);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::ShipDestroyed { lives_left: 2, .. })));

        // Invincible: the same asteroid no longer hurts
        tick(&mut state, InputFrame::new());
        assert_eq!(state.ship.lives, 2);
    }

    #[test]
    fn test_ufo_bullet_destroys_ship() {
        let mut state = quiet_state(7);
        state.bullets.push(Bullet::new(Vec2::new(400.0, 305.0), Vec2::ZERO, BulletOwner::Ufo, &state.config));

        tick(&mut state, InputFrame::new());

        assert_eq!(state.ship.lives, 2);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_player_shoots_down_ufo() {
        let mut state = quiet_state(8);
        state.ufos.push(Ufo {
            id: 99,
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
            size: UfoSize::Small,
            fire_timer: 50,
        });
        state.bullets.push(Bullet::new(Vec2::new(100.0, 100.0), Vec2::ZERO, BulletOwner::Player, &state.config));

        let result = tick(&mut state, InputFrame::new());

        assert!(state.ufos.is_empty());
        assert_eq!(state.score, 1000);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::UfoDestroyed { points: 1000, .. })));
    }

    #[test]
    fn test_ufo_ramming_ship_removes_both() {
        let mut state = quiet_state(9);
        state.ufos.push(Ufo {
            id: 99,
            position: Vec2::new(410.0, 300.0),
            velocity: Vec2::ZERO,
            size: UfoSize::Large,
            fire_timer: 50,
        });

        tick(&mut state, InputFrame::new());

        assert!(state.ufos.is_empty());
        assert_eq!(state.ship.lives, 2);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut state = quiet_state(10);
        state.ship.lives = 1;
        state.score = 70;
        place_asteroid(&mut state, Vec2::new(400.0, 300.0), AsteroidSize::Large);

        let result = tick(&mut state, InputFrame::new());
        assert!(result.game_over);
        assert_eq!(state.high_score, 70);

        let frozen = state.asteroids.clone();
        for _ in 0..30 {
            let result = tick(&mut state, InputFrame::new().with_thrust().with_fire());
            assert!(result.events.is_empty());
        }
        assert_eq!(state.asteroids, frozen);

        let result = tick(&mut state, InputFrame::new().with_restart());
        assert!(!result.game_over);
        assert_eq!(state.ship.lives, 3);
        assert_eq!(state.high_score, 70);
        assert_eq!(result.events[0].data, GameEventData::GameRestarted);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = quiet_state(11);
        state.score = 40;
        tick(&mut state, InputFrame::new().with_restart());
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_cleared_field_starts_next_level() {
        let mut state = quiet_state(12);
        state.asteroids.clear();

        let result = tick(&mut state, InputFrame::new());

        assert_eq!(state.level, 2);
        assert_eq!(state.asteroids.len(), 6);
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::LevelStarted { level: 2, asteroids: 6 }));
    }

    #[test]
    fn test_hyperspace_is_edge_triggered() {
        let mut state = quiet_state(13);
        let result = tick(&mut state, InputFrame::new().with_hyperspace());
        let jumps = result
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::Hyperspace { .. }))
            .count();
        assert_eq!(jumps, 1);
        assert_eq!(state.ship.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_hyperspace_can_kill_an_invincible_ship() {
        let config = GameConfig {
            hyperspace_death_chance: 1.0,
            ufo_spawn_chance: 0.0,
            ..GameConfig::default()
        };
        let mut state = quiet_state_with(config, 14);
        state.ship.invincible = true;
        state.ship.invincibility_ticks = 100;

        let result = tick(&mut state, InputFrame::new().with_hyperspace());

        assert_eq!(state.ship.lives, 2);
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::Hyperspace { destroyed: true }));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::ShipDestroyed { lives_left: 2, .. })));
    }

    #[test]
    fn test_safe_hyperspace_keeps_lives() {
        let config = GameConfig {
            hyperspace_death_chance: 0.0,
            ufo_spawn_chance: 0.0,
            ..GameConfig::default()
        };
        let mut state = quiet_state_with(config, 15);
        state.ship.invincible = true;
        state.ship.invincibility_ticks = 100;

        let result = tick(&mut state, InputFrame::new().with_hyperspace());

        assert_eq!(state.ship.lives, 3);
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::Hyperspace { destroyed: false }));
    }

    #[test]
    fn test_only_one_ufo_at_a_time() {
        let config = GameConfig {
            ufo_spawn_chance: 1.0,
            ..GameConfig::default()
        };
        let mut state = quiet_state_with(config, 16);

        let mut spawned = 0;
        for _ in 0..5 {
            let result = tick(&mut state, InputFrame::new());
            spawned += result
                .events
                .iter()
                .filter(|e| matches!(e.data, GameEventData::UfoSpawned { .. }))
                .count();
        }

        assert_eq!(spawned, 1);
        assert_eq!(state.ufos.len(), 1);
    }

    #[test]
    fn test_ufo_leaves_past_far_edge() {
        let mut state = quiet_state(17);
        let beyond = state.config.field_width + state.config.ufo_exit_margin;
        state.ufos.push(Ufo {
            id: 99,
            position: Vec2::new(beyond - 1.0, 200.0),
            velocity: Vec2::new(2.0, 0.0),
            size: UfoSize::Large,
            fire_timer: 50,
        });

        let result = tick(&mut state, InputFrame::new());

        assert!(state.ufos.is_empty());
        assert!(result.events.iter().any(|e| e.data == GameEventData::UfoLeft));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_replay_matches_live_run() {
        let config = GameConfig::default();
        let mut live = GameState::new(config.clone(), 777, 0);
        let mut recording = InputRecording::new(777);
        let mut live_events = Vec::new();

        for t in 0..900 {
            let input = scripted_input(t);
            recording.record(live.tick, input);
            live_events.extend(tick(&mut live, input).events);
        }

        let (replayed, events) = replay(config, 777, 0, &recording);

        assert_eq!(replayed.tick, 900);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(events, live_events);
    }
}
