use astrum_sim::AppState;
use bevy::picking::mesh_picking::{MeshPickingPlugin, MeshPickingSettings};
use bevy::prelude::*;

use super::bodies;
use super::camera;
use super::generation::GenerationPlugin;
use super::hud;
use super::intro::IntroPlugin;
use super::materials::BodyMaterialsPlugin;
use super::scene;

/// Scene, camera, HUD and texture generation for the viewer
pub struct AstrumRenderPlugin;

impl Plugin for AstrumRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            BodyMaterialsPlugin,
            MeshPickingPlugin,
            IntroPlugin,
            GenerationPlugin,
        ))
        // Only marked meshes are ray cast; the star field is not
        .insert_resource(MeshPickingSettings {
            require_markers: true,
            ..default()
        })
        .add_systems(Startup, camera::spawn_camera)
        .add_systems(
            OnEnter(AppState::Running),
            (scene::spawn_scene, hud::spawn_chrome),
        )
        .add_systems(
            Update,
            (
                bodies::animate_orbits,
                bodies::animate_spin,
                bodies::animate_float,
                bodies::update_gas_giant_time,
                bodies::sync_surface_materials,
                camera::orbit_controls_system,
                camera::focus_camera_system.after(bodies::animate_orbits),
                camera::flight_system
                    .after(camera::focus_camera_system)
                    .after(camera::orbit_controls_system),
                bodies::update_labels.after(camera::flight_system),
                hud::rebuild_focus_panels,
                hud::hud_button_system,
                hud::update_hud_state.after(hud::rebuild_focus_panels),
                hud::animate_progress,
            )
                .run_if(in_state(AppState::Running)),
        );
    }
}
