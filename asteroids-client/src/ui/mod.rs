//! UI - score line, lives label and the game-over overlay

use bevy::prelude::*;

use asteroids::GameState;

use crate::game::Simulation;
use crate::AppState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, setup_hud)
            .add_systems(Update, update_hud)
            .add_systems(OnEnter(AppState::GameOver), setup_game_over)
            .add_systems(OnExit(AppState::GameOver), cleanup_game_over);
    }
}

// Marker components
#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct LevelText;

#[derive(Component)]
struct HighScoreText;

#[derive(Component)]
struct GameOverUI;

const SCORE_FONT_SIZE: f32 = 32.0;
const HUD_FONT_SIZE: f32 = 20.0;

/// Text shown in the score line.
#[derive(Debug, PartialEq, Eq)]
pub struct HudLabels {
    pub score: String,
    pub level: String,
    pub high_score: String,
}

impl HudLabels {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("Score: {}", state.score),
            level: format!("Level: {}", state.level),
            high_score: format!("High Score: {}", state.high_score),
        }
    }
}

fn hud_text(label: &str, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(label),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn setup_hud(mut commands: Commands) {
    // Score (left), level (centre), high score (right)
    commands.spawn(Node {
        width: Val::Percent(100.0),
        position_type: PositionType::Absolute,
        top: Val::Px(0.0),
        left: Val::Px(0.0),
        padding: UiRect::all(Val::Px(10.0)),
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::SpaceBetween,
        ..default()
    }).with_children(|parent| {
        parent.spawn((hud_text("Score: 0", SCORE_FONT_SIZE), ScoreText));
        parent.spawn((hud_text("Level: 1", HUD_FONT_SIZE), LevelText));
        parent.spawn((hud_text("High Score: 0", HUD_FONT_SIZE), HighScoreText));
    });

    // Ship icons are drawn next to this by the renderer
    commands.spawn((
        hud_text("Lives:", HUD_FONT_SIZE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn update_hud(
    sim: Res<Simulation>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<LevelText>, Without<HighScoreText>)>,
    mut level_text: Query<&mut Text, (With<LevelText>, Without<ScoreText>, Without<HighScoreText>)>,
    mut high_text: Query<&mut Text, (With<HighScoreText>, Without<ScoreText>, Without<LevelText>)>,
) {
    if !sim.is_changed() {
        return;
    }
    let labels = HudLabels::from_state(&sim.state);

    if let Ok(mut text) = score_text.get_single_mut() {
        **text = labels.score;
    }
    if let Ok(mut text) = level_text.get_single_mut() {
        **text = labels.level;
    }
    if let Ok(mut text) = high_text.get_single_mut() {
        **text = labels.high_score;
    }
}

fn setup_game_over(mut commands: Commands) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        GameOverUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new("GAME OVER"),
            TextFont {
                font_size: 64.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                margin: UiRect::bottom(Val::Px(20.0)),
                ..default()
            },
        ));

        parent.spawn((
            Text::new("Press ENTER to play again"),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::srgb(0.7, 0.7, 0.7)),
        ));
    });
}

fn cleanup_game_over(
    mut commands: Commands,
    query: Query<Entity, With<GameOverUI>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
