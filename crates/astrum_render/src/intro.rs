use astrum_sim::{AppState, Settings};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Intro), spawn_intro)
            .add_systems(OnExit(AppState::Intro), despawn_intro)
            .add_systems(Update, intro_system.run_if(in_state(AppState::Intro)));
    }
}

// --- Markers ---

#[derive(Component)]
struct IntroRoot;

/// Text or decoration that fades with the splash, at its own full alpha
#[derive(Component)]
struct IntroFade {
    alpha: f32,
}

/// When the splash started
#[derive(Resource)]
struct IntroClock {
    started: f32,
}

/// Splash opacity at `elapsed` seconds: solid for `hold`, then a linear fade
/// over `fade`. `None` once the splash is over.
pub fn splash_opacity(elapsed: f32, hold: f32, fade: f32) -> Option<f32> {
    if elapsed < hold {
        Some(1.0)
    } else if elapsed < hold + fade {
        Some(1.0 - (elapsed - hold) / fade)
    } else {
        None
    }
}

fn spawn_intro(mut commands: Commands, time: Res<Time>) {
    commands.insert_resource(IntroClock {
        started: time.elapsed_secs(),
    });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::BLACK),
            GlobalZIndex(50),
            IntroRoot,
            IntroFade { alpha: 1.0 },
        ))
        .with_children(|parent| {
            // Decorative stars
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            for _ in 0..20 {
                let size = rng.gen_range(1.0..3.0);
                let alpha = rng.gen_range(0.2..1.0);
                parent.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Percent(rng.gen_range(0.0..100.0)),
                        left: Val::Percent(rng.gen_range(0.0..100.0)),
                        width: Val::Px(size),
                        height: Val::Px(size),
                        ..default()
                    },
                    BorderRadius::MAX,
                    BackgroundColor(Color::srgba(1.0, 1.0, 1.0, alpha)),
                    IntroFade { alpha },
                ));
            }

            parent.spawn((
                Text::new("ASTRUM"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                IntroFade { alpha: 1.0 },
            ));

            parent.spawn((
                Node {
                    width: Val::Px(480.0),
                    height: Val::Px(1.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.2)),
                IntroFade { alpha: 0.2 },
            ));

            parent.spawn((
                Text::new(
                    "\"The cosmos is all that is or ever was or ever will be.\"",
                ),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgba(0.63, 0.63, 0.67, 1.0)),
                IntroFade { alpha: 1.0 },
            ));

            parent.spawn((
                Text::new("SYNCHRONIZING NASA/JPL DATA..."),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgba(0.44, 0.44, 0.48, 1.0)),
                IntroFade { alpha: 1.0 },
            ));
        });

    info!("Intro: splash shown");
}

fn despawn_intro(mut commands: Commands, query: Query<Entity, With<IntroRoot>>) {
    commands.remove_resource::<IntroClock>();
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

fn intro_system(
    time: Res<Time>,
    settings: Res<Settings>,
    clock: Option<Res<IntroClock>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut backgrounds: Query<(&IntroFade, &mut BackgroundColor), Without<Text>>,
    mut texts: Query<(&IntroFade, &mut TextColor)>,
) {
    let Some(clock) = clock else {
        return;
    };
    let elapsed = time.elapsed_secs() - clock.started;
    let config = &settings.0;

    match splash_opacity(elapsed, config.intro_secs, config.intro_fade_secs) {
        Some(opacity) => {
            for (fade, mut background) in &mut backgrounds {
                background.0.set_alpha(fade.alpha * opacity);
            }
            for (fade, mut color) in &mut texts {
                color.0.set_alpha(fade.alpha * opacity);
            }
        }
        None => {
            info!("Intro: done after {:.1}s", elapsed);
            next_state.set(AppState::Running);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_holds_then_fades_then_ends() {
        assert_eq!(splash_opacity(0.0, 4.0, 1.0), Some(1.0));
        assert_eq!(splash_opacity(3.99, 4.0, 1.0), Some(1.0));
        let mid = splash_opacity(4.5, 4.0, 1.0).unwrap();
        assert!((mid - 0.5).abs() < 1e-6);
        assert_eq!(splash_opacity(5.0, 4.0, 1.0), None);
    }

    #[test]
    fn zero_length_intro_ends_immediately() {
        assert_eq!(splash_opacity(0.0, 0.0, 0.0), None);
    }
}
