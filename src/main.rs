use astrum_render::AstrumRenderPlugin;
use astrum_sim::{AppState, SessionPlugin};
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Astrum - Interactive Solar System".into(),
                resolution: (1920.0, 1080.0).into(),
                ..default()
            }),
            ..default()
        }))
        .init_state::<AppState>()
        .add_plugins(SessionPlugin::default())
        .add_plugins(AstrumRenderPlugin)
        .run();
}
