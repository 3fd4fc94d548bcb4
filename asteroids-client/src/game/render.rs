//! Vector drawing and explosion debris.

use bevy::prelude::*;

use asteroids::game::shape;
use asteroids::GameConfig;

use super::{SimEvent, Simulation};

const LINE_COLOR: Color = Color::WHITE;

const DEBRIS_COUNT: usize = 8;
const DEBRIS_LIFETIME: f32 = 0.6;

/// Play-field point (+y down, origin top-left) to world space
/// (+y up, origin at the window centre).
pub fn to_world(point: asteroids::Vec2, config: &GameConfig) -> Vec2 {
    Vec2::new(
        point.x - config.field_width / 2.0,
        config.field_height / 2.0 - point.y,
    )
}

fn draw_outline(gizmos: &mut Gizmos, points: &[asteroids::Vec2], config: &GameConfig) {
    gizmos.linestrip_2d(points.iter().map(|&p| to_world(p, config)), LINE_COLOR);
}

/// Redraw every entity from the current simulation state.
pub fn draw_world(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let state = &sim.state;
    let config = &state.config;

    if !state.is_game_over() && state.ship.is_visible() {
        draw_outline(&mut gizmos, &shape::ship_outline(&state.ship), config);
        if let Some(flame) = shape::thruster_outline(&state.ship) {
            draw_outline(&mut gizmos, &flame, config);
        }
    }

    for bullet in &state.bullets {
        let [start, end] = shape::bullet_segment(bullet);
        gizmos.line_2d(to_world(start, config), to_world(end, config), LINE_COLOR);
    }

    for asteroid in &state.asteroids {
        draw_outline(&mut gizmos, &shape::asteroid_outline(asteroid), config);
    }

    for ufo in &state.ufos {
        draw_outline(&mut gizmos, &shape::ufo_outline(ufo), config);
    }

    for icon in shape::life_icons(state.ship.lives, config.field_height) {
        draw_outline(&mut gizmos, &icon, config);
    }
}

// ============================================================================
// DEBRIS
// ============================================================================

#[derive(Component)]
pub struct DebrisParticle {
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// Burst of debris wherever something was destroyed.
pub fn spawn_debris(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut events: EventReader<SimEvent>,
) {
    for SimEvent(event) in events.read() {
        let Some(position) = event.explosion_at() else {
            continue;
        };
        let origin = to_world(position, &sim.state.config);

        for i in 0..DEBRIS_COUNT {
            let angle = (i as f32 / DEBRIS_COUNT as f32) * std::f32::consts::TAU;
            let speed = 60.0 + rand::random::<f32>() * 60.0;

            commands.spawn((
                DebrisParticle {
                    velocity: Vec2::from_angle(angle) * speed,
                    lifetime: DEBRIS_LIFETIME * (0.7 + rand::random::<f32>() * 0.3),
                },
                Sprite {
                    color: LINE_COLOR,
                    custom_size: Some(Vec2::splat(2.0)),
                    ..default()
                },
                Transform::from_translation(origin.extend(1.0)),
            ));
        }
    }
}

/// Move, slow and fade debris; despawn it when its time is up.
pub fn update_debris(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DebrisParticle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut transform, mut sprite) in query.iter_mut() {
        transform.translation += (particle.velocity * dt).extend(0.0);
        particle.velocity *= 0.97;
        particle.lifetime -= dt;

        if particle.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        sprite.color = LINE_COLOR.with_alpha((particle.lifetime / DEBRIS_LIFETIME).min(1.0));
    }
}
