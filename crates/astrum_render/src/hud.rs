use astrum_core::{MissionRecord, PlanetRecord};
use astrum_sim::Session;
use bevy::prelude::*;
use bevy::ui::FocusPolicy;

use super::generation::GenerateTextureRequested;
use super::materials::srgb_color;

const PANEL_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
const ACCENT: Color = Color::srgb(0.23, 0.51, 0.96);
const MUTED: Color = Color::srgb(0.32, 0.32, 0.36);
const BODY_TEXT: Color = Color::srgb(0.83, 0.83, 0.85);
const ERROR_TEXT: Color = Color::srgb(0.94, 0.27, 0.27);
const ACTIVE_BADGE_BG: Color = Color::srgba(0.13, 0.77, 0.37, 0.1);
const ACTIVE_BADGE_TEXT: Color = Color::srgb(0.29, 0.87, 0.5);
const NEUTRAL_BADGE_BG: Color = Color::srgba(0.15, 0.15, 0.16, 0.5);

const GENERATE_LABEL: &str = "GENERATE ULTRA-REALISTIC SURFACE";
const GENERATING_LABEL: &str = "MAPPING...";

// --- Markers ---

/// Root of the per-planet panels, rebuilt whenever focus changes
#[derive(Component)]
pub struct FocusPanels;

#[derive(Component)]
pub struct BackButton;

#[derive(Component)]
pub struct GenerateButton;

#[derive(Component)]
pub struct GenerateLabel;

#[derive(Component)]
pub struct ErrorText;

#[derive(Component)]
pub struct LoadingOverlay;

#[derive(Component)]
pub struct LoadingText;

#[derive(Component)]
pub struct ProgressSweep;

#[derive(Component)]
pub struct OverviewHint;

fn text(content: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(content),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Rows of the stats table, in display order
pub fn stat_rows(planet: &PlanetRecord) -> [(&'static str, String); 7] {
    let stats = &planet.stats;
    [
        ("Diameter", stats.diameter.to_string()),
        ("Mass", stats.mass.to_string()),
        ("Gravity", stats.gravity.to_string()),
        ("Temperature", stats.temperature.to_string()),
        ("Day", stats.day.to_string()),
        ("Year", stats.year.to_string()),
        ("Moons", stats.moons.to_string()),
    ]
}

/// Badge colors: highlighted for active missions, neutral otherwise
pub fn badge_colors(mission: &MissionRecord) -> (Color, Color) {
    if mission.status.is_active() {
        (ACTIVE_BADGE_BG, ACTIVE_BADGE_TEXT)
    } else {
        (NEUTRAL_BADGE_BG, MUTED)
    }
}

/// Text naming the planet while its surface is being generated
pub fn loading_message(planet_name: &str) -> String {
    format!("Mapping coordinates of {planet_name} via Gemini...")
}

/// Brand header, engine indicator, overview hint and the (hidden) overlay
pub fn spawn_chrome(mut commands: Commands) {
    // Brand header
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                left: Val::Px(24.0),
                column_gap: Val::Px(16.0),
                align_items: AlignItems::Center,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|header| {
            header.spawn(text("ASTRUM v1.1", 12.0, Color::srgba(1.0, 1.0, 1.0, 0.5)));
            header.spawn((
                Node {
                    width: Val::Px(32.0),
                    height: Val::Px(1.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.2)),
            ));
            header.spawn(text("INTERACTIVE ATLAS OF REAL TELEMETRY", 10.0, MUTED));
        });

    // Engine indicator
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                right: Val::Px(24.0),
                column_gap: Val::Px(8.0),
                align_items: AlignItems::Center,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|indicator| {
            indicator.spawn((
                Node {
                    width: Val::Px(6.0),
                    height: Val::Px(6.0),
                    ..default()
                },
                BorderRadius::MAX,
                BackgroundColor(ACCENT),
            ));
            indicator.spawn(text(
                "AI RECONSTRUCTION ENGINE ACTIVE",
                10.0,
                Color::srgb(0.63, 0.63, 0.67),
            ));
        });

    // Overview hint
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(48.0),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            PickingBehavior::IGNORE,
            OverviewHint,
        ))
        .with_children(|hint| {
            hint.spawn(text("SOLAR SYSTEM", 12.0, Color::srgba(1.0, 1.0, 1.0, 0.4)));
            hint.spawn(text(
                "SCROLL TO ZOOM  /  CLICK A PLANET FOR SCIENTIFIC DETAIL",
                10.0,
                MUTED,
            ));
        });

    // Generation overlay, blocks all input while shown
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.9)),
            FocusPolicy::Block,
            GlobalZIndex(10),
            Visibility::Hidden,
            LoadingOverlay,
        ))
        .with_children(|overlay| {
            overlay.spawn(text("INITIATING PLANETARY RECONSTRUCTION", 12.0, ACCENT));
            overlay.spawn((text("", 10.0, Color::srgb(0.44, 0.44, 0.48)), LoadingText));
            overlay
                .spawn((
                    Node {
                        width: Val::Px(240.0),
                        height: Val::Px(2.0),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BackgroundColor(ACCENT.with_alpha(0.2)),
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Percent(30.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(ACCENT),
                        ProgressSweep,
                    ));
                });
        });
}

/// Rebuild the side panels for the newly focused planet
pub fn rebuild_focus_panels(
    mut commands: Commands,
    session: Res<Session>,
    mut shown: Local<Option<&'static str>>,
    panels: Query<Entity, With<FocusPanels>>,
) {
    let focus = session.focus_id();
    if *shown == focus {
        return;
    }
    *shown = focus;

    for entity in &panels {
        commands.entity(entity).despawn_recursive();
    }
    if let Some(planet) = session.focus() {
        spawn_focus_panels(&mut commands, planet);
    }
}

fn section_heading(parent: &mut ChildBuilder, title: &str, color: Color) {
    parent.spawn((
        text(title.to_uppercase(), 10.0, color),
        Node {
            margin: UiRect::bottom(Val::Px(12.0)),
            ..default()
        },
    ));
}

fn science_entry(parent: &mut ChildBuilder, title: &str, body: &str) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            margin: UiRect::bottom(Val::Px(16.0)),
            ..default()
        })
        .with_children(|entry| {
            entry.spawn(text(title.to_uppercase(), 9.0, MUTED));
            entry.spawn(text(body, 14.0, BODY_TEXT));
        });
}

fn panel_node(width: f32) -> Node {
    Node {
        width: Val::Px(width),
        flex_direction: FlexDirection::Column,
        padding: UiRect::all(Val::Px(32.0)),
        ..default()
    }
}

fn spawn_focus_panels(commands: &mut Commands, planet: &'static PlanetRecord) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::FlexStart,
                padding: UiRect::all(Val::Px(48.0)),
                ..default()
            },
            PickingBehavior::IGNORE,
            FocusPanels,
        ))
        .with_children(|root| {
            // Left: identity, generate control, description, stats
            root.spawn((panel_node(384.0), BackgroundColor(PANEL_BG)))
                .with_children(|left| {
                    left.spawn((
                        Button,
                        Node {
                            margin: UiRect::bottom(Val::Px(32.0)),
                            ..default()
                        },
                        BackButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn(text("<  RETURN TO THE VOID", 12.0, Color::srgb(0.44, 0.44, 0.48)));
                    });

                    left.spawn(text(planet.name.to_uppercase(), 48.0, Color::WHITE));
                    left.spawn((
                        text(planet.tagline.to_uppercase(), 10.0, srgb_color(planet.color)),
                        Node {
                            margin: UiRect::vertical(Val::Px(8.0)),
                            ..default()
                        },
                    ));

                    left.spawn((
                        Button,
                        Node {
                            width: Val::Percent(100.0),
                            padding: UiRect::vertical(Val::Px(16.0)),
                            margin: UiRect::vertical(Val::Px(16.0)),
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.1)),
                        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.05)),
                        GenerateButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((text(GENERATE_LABEL, 10.0, Color::WHITE), GenerateLabel));
                    });

                    left.spawn((
                        text("", 10.0, ERROR_TEXT),
                        Node {
                            padding: UiRect::all(Val::Px(12.0)),
                            margin: UiRect::bottom(Val::Px(16.0)),
                            display: Display::None,
                            ..default()
                        },
                        BackgroundColor(ERROR_TEXT.with_alpha(0.1)),
                        ErrorText,
                    ));

                    left.spawn((
                        text(format!("\"{}\"", planet.description), 14.0, Color::srgb(0.63, 0.63, 0.67)),
                        Node {
                            margin: UiRect::bottom(Val::Px(32.0)),
                            ..default()
                        },
                    ));

                    section_heading(left, "Technical specifications", MUTED);
                    for (label, value) in stat_rows(planet) {
                        left.spawn(Node {
                            justify_content: JustifyContent::SpaceBetween,
                            padding: UiRect::vertical(Val::Px(4.0)),
                            ..default()
                        })
                        .with_children(|row| {
                            row.spawn(text(label.to_uppercase(), 10.0, MUTED));
                            row.spawn(text(value, 12.0, BODY_TEXT));
                        });
                    }
                });

            // Right: science and missions
            root.spawn(Node {
                width: Val::Px(450.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(24.0),
                ..default()
            })
            .with_children(|right| {
                right
                    .spawn((panel_node(450.0), BackgroundColor(PANEL_BG)))
                    .with_children(|science| {
                        section_heading(science, "Biosphere and geology", ACCENT);
                        let facts = &planet.science;
                        science_entry(science, "Atmospheric composition", facts.atmosphere);
                        science_entry(science, "Structural architecture", facts.structure);
                        science_entry(science, "Surface pressure", facts.pressure);
                        science_entry(science, "Magnetosphere", facts.magnetic_field);

                        section_heading(science, "Orbital records", MUTED);
                        for fact in facts.curiosities {
                            science.spawn((
                                text(format!("/  {fact}"), 14.0, Color::srgb(0.63, 0.63, 0.67)),
                                Node {
                                    margin: UiRect::bottom(Val::Px(8.0)),
                                    ..default()
                                },
                            ));
                        }
                    });

                right
                    .spawn((panel_node(450.0), BackgroundColor(PANEL_BG)))
                    .with_children(|log| {
                        section_heading(log, "Exploration module", MUTED);
                        for mission in planet.missions {
                            spawn_mission_row(log, mission);
                        }
                    });
            });
        });

    info!("HUD: showing {}", planet.name);
}

fn spawn_mission_row(parent: &mut ChildBuilder, mission: &MissionRecord) {
    let (badge_bg, badge_text) = badge_colors(mission);
    parent
        .spawn(Node {
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(16.0)),
            ..default()
        })
        .with_children(|row| {
            row.spawn(Node {
                flex_direction: FlexDirection::Column,
                ..default()
            })
            .with_children(|info| {
                info.spawn(text(mission.name, 14.0, BODY_TEXT));
                info.spawn(text(
                    format!("{}  /  {}", mission.agency.to_uppercase(), mission.year),
                    10.0,
                    MUTED,
                ));
            });
            row.spawn((
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                    ..default()
                },
                BackgroundColor(badge_bg),
            ))
            .with_children(|badge| {
                badge.spawn(text(mission.status.name().to_uppercase(), 9.0, badge_text));
            });
        });
}

/// Back returns to overview; generate asks for a new surface
pub fn hud_button_system(
    mut session: ResMut<Session>,
    mut requests: EventWriter<GenerateTextureRequested>,
    back_q: Query<&Interaction, (Changed<Interaction>, With<BackButton>)>,
    generate_q: Query<&Interaction, (Changed<Interaction>, With<GenerateButton>)>,
) {
    if session.is_generating() {
        return;
    }
    for interaction in &back_q {
        if *interaction == Interaction::Pressed && session.deselect() {
            info!("Focus: back to overview");
        }
    }
    for interaction in &generate_q {
        if *interaction == Interaction::Pressed {
            requests.send(GenerateTextureRequested);
        }
    }
}

/// Reflect the in-flight flag and the last error in the HUD
pub fn update_hud_state(
    session: Res<Session>,
    mut labels: Query<&mut Text, (With<GenerateLabel>, Without<ErrorText>, Without<LoadingText>)>,
    mut buttons: Query<&mut BackgroundColor, With<GenerateButton>>,
    mut errors: Query<(&mut Text, &mut Node), (With<ErrorText>, Without<GenerateLabel>, Without<LoadingText>)>,
    mut overlay: Query<&mut Visibility, (With<LoadingOverlay>, Without<ErrorText>, Without<OverviewHint>)>,
    mut loading: Query<&mut Text, (With<LoadingText>, Without<GenerateLabel>, Without<ErrorText>)>,
    mut hint: Query<&mut Visibility, (With<OverviewHint>, Without<ErrorText>, Without<LoadingOverlay>)>,
) {
    let generating = session.is_generating();

    for mut label in &mut labels {
        let wanted = if generating { GENERATING_LABEL } else { GENERATE_LABEL };
        if label.0 != wanted {
            label.0 = wanted.to_string();
        }
    }
    for mut background in &mut buttons {
        let alpha = if generating { 0.02 } else { 0.05 };
        background.0 = Color::srgba(1.0, 1.0, 1.0, alpha);
    }

    // Taken out of the layout entirely while there is nothing to report
    for (mut text, mut node) in &mut errors {
        let display = match session.error() {
            Some(message) => {
                if text.0 != message {
                    text.0 = message.to_string();
                }
                Display::Flex
            }
            None => Display::None,
        };
        if node.display != display {
            node.display = display;
        }
    }

    for mut visibility in &mut overlay {
        *visibility = if generating {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Some(ticket) = session.pending() {
        for mut text in &mut loading {
            text.0 = loading_message(ticket.planet_name);
        }
    }

    for mut visibility in &mut hint {
        *visibility = if session.focus().is_none() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Indeterminate progress: a bar sweeping across its track
pub fn animate_progress(time: Res<Time>, mut sweeps: Query<&mut Node, With<ProgressSweep>>) {
    let phase = (time.elapsed_secs() * 0.8).fract();
    for mut node in &mut sweeps {
        node.left = Val::Percent(phase * 130.0 - 30.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrum_core::{MissionStatus, PLANETS, find};

    #[test]
    fn stats_table_has_seven_rows_from_catalog() {
        let earth = find("earth").unwrap();
        let rows = stat_rows(earth);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ("Diameter", earth.stats.diameter.to_string()));
        assert_eq!(rows[6], ("Moons", earth.stats.moons.to_string()));
        for planet in PLANETS.iter() {
            assert!(stat_rows(planet).iter().all(|(_, v)| !v.is_empty()));
        }
    }

    #[test]
    fn only_active_missions_are_highlighted() {
        let mut mission = MissionRecord {
            name: "Probe",
            year: "2030",
            status: MissionStatus::Active,
            agency: "ESA",
        };
        assert_eq!(badge_colors(&mission).1, ACTIVE_BADGE_TEXT);
        for status in [MissionStatus::Ended, MissionStatus::Success, MissionStatus::Failure] {
            mission.status = status;
            assert_eq!(badge_colors(&mission), (NEUTRAL_BADGE_BG, MUTED));
        }
    }

    #[test]
    fn loading_text_names_planet() {
        assert!(loading_message("Neptune").contains("Neptune"));
    }

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Session>()
            .add_systems(Startup, spawn_chrome)
            .add_systems(Update, (rebuild_focus_panels, update_hud_state).chain());
        app
    }

    fn count<T: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<T>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn panels_follow_focus() {
        let mut app = hud_app();
        app.update();
        assert_eq!(count::<FocusPanels>(&mut app), 0);

        app.world_mut()
            .resource_mut::<Session>()
            .select(find("mars").unwrap());
        app.update();
        assert_eq!(count::<FocusPanels>(&mut app), 1);
        assert_eq!(count::<GenerateButton>(&mut app), 1);

        app.world_mut()
            .resource_mut::<Session>()
            .select(find("venus").unwrap());
        app.update();
        assert_eq!(count::<FocusPanels>(&mut app), 1);

        app.world_mut().resource_mut::<Session>().deselect();
        app.update();
        assert_eq!(count::<FocusPanels>(&mut app), 0);
        assert_eq!(count::<GenerateButton>(&mut app), 0);
    }

    #[test]
    fn overlay_and_label_track_generation() {
        let mut app = hud_app();
        app.world_mut()
            .resource_mut::<Session>()
            .select(find("mars").unwrap());
        app.update();
        app.update();

        let ticket = app
            .world_mut()
            .resource_mut::<Session>()
            .begin_generation()
            .unwrap();
        app.update();

        let world = app.world_mut();
        let error_node = world
            .query_filtered::<&Node, With<ErrorText>>()
            .single(world);
        assert_eq!(error_node.display, Display::None);
        let overlay = *world
            .query_filtered::<&Visibility, With<LoadingOverlay>>()
            .single(world);
        assert_eq!(overlay, Visibility::Visible);
        let label = world
            .query_filtered::<&Text, With<GenerateLabel>>()
            .single(world)
            .0
            .clone();
        assert_eq!(label, GENERATING_LABEL);
        let loading = world
            .query_filtered::<&Text, With<LoadingText>>()
            .single(world)
            .0
            .clone();
        assert!(loading.contains("Mars"));

        app.world_mut()
            .resource_mut::<Session>()
            .fail_generation(ticket, "Orbital data synchronization failed. Please try again.");
        app.update();

        let world = app.world_mut();
        let overlay = *world
            .query_filtered::<&Visibility, With<LoadingOverlay>>()
            .single(world);
        assert_eq!(overlay, Visibility::Hidden);
        let (error, node) = world
            .query_filtered::<(&Text, &Node), With<ErrorText>>()
            .single(world);
        assert!(error.0.starts_with("Orbital data"));
        assert_eq!(node.display, Display::Flex);
        let label = world
            .query_filtered::<&Text, With<GenerateLabel>>()
            .single(world)
            .0
            .clone();
        assert_eq!(label, GENERATE_LABEL);

        // a retry clears the message and gives its space back
        app.world_mut()
            .resource_mut::<Session>()
            .begin_generation()
            .unwrap();
        app.update();
        let world = app.world_mut();
        let node = world
            .query_filtered::<&Node, With<ErrorText>>()
            .single(world);
        assert_eq!(node.display, Display::None);
    }
}
