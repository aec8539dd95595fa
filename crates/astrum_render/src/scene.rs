use astrum_core::constants::{STAR_SHELL_DEPTH, STAR_SHELL_RADIUS};
use astrum_core::{PLANETS, SUN};
use astrum_sim::{Session, Settings};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;

use super::bodies::{BodyAssets, spawn_body};

/// Clear color behind everything
pub const BACKGROUND: Color = Color::srgb(0.0, 0.0, 3.0 / 255.0);

/// Background star
#[derive(Component)]
pub struct StarFieldStar;

/// Uniform point in a spherical shell around the origin
pub fn shell_point(rng: &mut impl Rng, inner: f32, depth: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let cos_phi: f32 = rng.gen_range(-1.0..1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
    let radius = inner + rng.gen_range(0.0..depth);
    Vec3::new(
        radius * sin_phi * theta.cos(),
        radius * cos_phi,
        radius * sin_phi * theta.sin(),
    )
}

/// Lights, backdrop and every body. Runs once when the interactive scene starts.
pub fn spawn_scene(
    mut commands: Commands,
    settings: Res<Settings>,
    session: Res<Session>,
    mut assets: BodyAssets,
) {
    commands.insert_resource(ClearColor(BACKGROUND));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
    });
    commands.spawn((
        PointLight {
            intensity: 10_000_000.0,
            range: 1_000.0,
            ..default()
        },
        Transform::default(),
    ));

    spawn_star_field(
        &mut commands,
        &mut assets.meshes,
        &mut assets.standard,
        settings.0.star_count,
        settings.0.star_seed,
    );

    spawn_body(&mut commands, &mut assets, &SUN, true, None);
    for planet in PLANETS.iter() {
        let texture = session.overrides().get(planet.id).cloned();
        spawn_body(&mut commands, &mut assets, planet, false, texture);
    }

    info!("Scene: spawned sun and {} planets", PLANETS.len());
}

fn spawn_star_field(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    count: u32,
    seed: u64,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let star_mesh = meshes.add(Sphere::new(1.0).mesh().uv(6, 4));

    // Shared materials for different star colors
    let star_colors = [
        Color::srgb(1.0, 1.0, 1.0),
        Color::srgb(0.8, 0.9, 1.0),
        Color::srgb(1.0, 0.95, 0.8),
        Color::srgb(1.0, 0.7, 0.5),
        Color::srgb(0.6, 0.7, 1.0),
    ];
    let star_mats: Vec<Handle<StandardMaterial>> = star_colors
        .iter()
        .map(|c| {
            materials.add(StandardMaterial {
                base_color: *c,
                emissive: LinearRgba::from(*c) * 50.0,
                unlit: true,
                ..default()
            })
        })
        .collect();

    for _ in 0..count {
        let position = shell_point(&mut rng, STAR_SHELL_RADIUS, STAR_SHELL_DEPTH);
        let size = rng.gen_range(0.3..1.2);
        let mat_idx = rng.gen_range(0..star_mats.len());

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_mats[mat_idx].clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(size)),
            StarFieldStar,
        ));
    }

    info!("Scene: spawned {} background stars (seed {})", count, seed);
}
