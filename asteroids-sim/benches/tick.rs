//! Simulation throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use asteroids::game::tick::tick;
use asteroids::{GameConfig, GameState, InputFrame};

fn busy_input(t: u32) -> InputFrame {
    let mut frame = InputFrame::new();
    frame.set_rotate_right(t % 90 < 30);
    frame.set_thrust(t % 50 < 10);
    frame.set_fire(t % 4 == 0);
    frame.set_restart(t % 2 == 0);
    frame
}

fn bench_one_minute(c: &mut Criterion) {
    c.bench_function("tick_3600", |b| {
        b.iter(|| {
            let mut state = GameState::new(GameConfig::default(), black_box(42), 0);
            for t in 0..3600 {
                tick(&mut state, busy_input(t));
            }
            state.compute_hash()
        })
    });
}

fn bench_state_hash(c: &mut Criterion) {
    let state = GameState::new(GameConfig::default(), 42, 0);
    c.bench_function("compute_hash", |b| b.iter(|| black_box(&state).compute_hash()));
}

criterion_group!(benches, bench_one_minute, bench_state_hash);
criterion_main!(benches);
