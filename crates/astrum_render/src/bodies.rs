use astrum_core::constants::{
    ATMOSPHERE_SCALE, CLOUD_SCALE, CLOUD_SPIN_RATE, LABEL_CLEARANCE, ORBIT_PATH_HALF_WIDTH,
    RING_INNER_SCALE, RING_OUTER_SCALE, RING_SPIN_RATE, RING_TILT, SPIN_RATE,
};
use astrum_core::{PlanetRecord, SurfaceKind, decorations, surface_kind};
use astrum_sim::Session;
use astrum_sim::motion::{OrbitMotion, float_offset, spin_angle};
use bevy::ecs::system::SystemParam;
use bevy::picking::events::{Click, Pointer};
use bevy::picking::mesh_picking::RayCastPickable;
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use super::camera::OrbitRig;
use super::materials::{AtmosphereMaterial, GasGiantMaterial, srgb_color};

/// Width of the name tag box; the text is centered inside it
const LABEL_WIDTH: f32 = 160.0;
/// Sun light reach in world units
const SUN_LIGHT_RANGE: f32 = 60.0;
const SUN_LIGHT_INTENSITY: f32 = 2_000_000.0;

/// Orbit pivot of one body, rotated about the origin
#[derive(Component, Debug, Clone, Copy)]
pub struct CelestialBody {
    pub record: &'static PlanetRecord,
    pub is_sun: bool,
}

/// Fixed offset of the body from its pivot
#[derive(Component)]
pub struct BodySlot;

/// Gentle bobbing layer between the slot and the visible geometry
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyFloat {
    pub phase: f32,
}

/// Clickable sphere. Tracks which material is currently attached so a
/// new texture swaps it exactly once.
#[derive(Component, Debug, Clone)]
pub struct BodySurface {
    pub record: &'static PlanetRecord,
    pub is_sun: bool,
    pub kind: SurfaceKind,
    pub texture: Option<Handle<Image>>,
}

/// Constant rotation about a local axis, after a fixed base orientation
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    pub rate: f32,
    pub axis: Vec3,
    pub base: Quat,
}

impl Spin {
    pub fn about_y(rate: f32) -> Self {
        Self {
            rate,
            axis: Vec3::Y,
            base: Quat::IDENTITY,
        }
    }

    pub fn rotation_at(&self, now: f32) -> Quat {
        self.base * Quat::from_axis_angle(self.axis, spin_angle(self.rate, now))
    }
}

/// Screen-space name tag tracking a body slot
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyLabel {
    pub planet_id: &'static str,
    pub anchor: Entity,
    pub lift: f32,
}

/// Asset stores a body needs at spawn time
#[derive(SystemParam)]
pub struct BodyAssets<'w> {
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub standard: ResMut<'w, Assets<StandardMaterial>>,
    pub banded: ResMut<'w, Assets<GasGiantMaterial>>,
    pub glow: ResMut<'w, Assets<AtmosphereMaterial>>,
}

/// Surface material for the kinds backed by `StandardMaterial`
pub fn standard_surface(
    kind: SurfaceKind,
    record: &PlanetRecord,
    texture: Option<Handle<Image>>,
) -> StandardMaterial {
    let color = srgb_color(record.color);
    match kind {
        SurfaceKind::Emissive => StandardMaterial {
            base_color: color,
            emissive: LinearRgba::from(color) * 10.0,
            unlit: true,
            ..default()
        },
        SurfaceKind::Textured => StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: texture,
            perceptual_roughness: 0.8,
            metallic: 0.05,
            ..default()
        },
        SurfaceKind::ProceduralBanded | SurfaceKind::FlatShaded => StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            metallic: 0.1,
            ..default()
        },
    }
}

/// Attach the material for `kind`, dropping whichever material type it replaces
fn attach_surface_material(
    entity: &mut EntityCommands,
    kind: SurfaceKind,
    record: &PlanetRecord,
    texture: Option<Handle<Image>>,
    standard: &mut Assets<StandardMaterial>,
    banded: &mut Assets<GasGiantMaterial>,
) {
    match kind {
        SurfaceKind::ProceduralBanded => {
            entity
                .remove::<MeshMaterial3d<StandardMaterial>>()
                .insert(MeshMaterial3d(banded.add(GasGiantMaterial::for_planet(record))));
        }
        _ => {
            entity
                .remove::<MeshMaterial3d<GasGiantMaterial>>()
                .insert(MeshMaterial3d(standard.add(standard_surface(kind, record, texture))));
        }
    }
}

/// Faint unlit trace of an orbit, visible from above and below
fn orbit_path_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.1),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Lit see-through layer over a body. Rings show both faces, cloud shells only the outer one.
fn translucent_layer(color: Color, opacity: f32, double_sided: bool) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        alpha_mode: AlphaMode::Blend,
        double_sided,
        cull_mode: if double_sided {
            None
        } else {
            StandardMaterial::default().cull_mode
        },
        ..default()
    }
}

/// Spawn one body with its pivot, slot and decorations. Planets also get a name tag.
pub fn spawn_body(
    commands: &mut Commands,
    assets: &mut BodyAssets,
    record: &'static PlanetRecord,
    is_sun: bool,
    texture: Option<Handle<Image>>,
) -> Entity {
    let texture = texture.filter(|_| !is_sun);
    let kind = surface_kind(record, is_sun, texture.is_some());
    let extras = decorations(record, is_sun);

    let pivot = commands
        .spawn((
            CelestialBody { record, is_sun },
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    if !is_sun {
        commands.entity(pivot).insert(OrbitMotion::new(record.distance));
    }

    if extras.orbit_path {
        let path = assets.meshes.add(
            Annulus::new(
                record.distance - ORBIT_PATH_HALF_WIDTH,
                record.distance + ORBIT_PATH_HALF_WIDTH,
            )
            .mesh()
            .resolution(128),
        );
        commands
            .spawn((
                Mesh3d(path),
                MeshMaterial3d(assets.standard.add(orbit_path_material())),
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ))
            .set_parent(pivot);
    }

    let slot = commands
        .spawn((
            BodySlot,
            Transform::from_xyz(record.distance, 0.0, 0.0),
            Visibility::default(),
        ))
        .set_parent(pivot)
        .id();

    if is_sun {
        commands
            .spawn(PointLight {
                color: srgb_color(record.color),
                intensity: SUN_LIGHT_INTENSITY,
                range: SUN_LIGHT_RANGE,
                ..default()
            })
            .set_parent(slot);
    }

    let float = commands
        .spawn((
            BodyFloat {
                phase: record.distance * 0.37,
            },
            Transform::default(),
            Visibility::default(),
        ))
        .set_parent(slot)
        .id();

    let sphere = assets.meshes.add(Sphere::new(record.radius).mesh().uv(64, 64));
    let mut surface = commands.spawn((
        Mesh3d(sphere),
        Transform::default(),
        Spin::about_y(SPIN_RATE),
        RayCastPickable,
        BodySurface {
            record,
            is_sun,
            kind,
            texture: texture.clone(),
        },
    ));
    attach_surface_material(
        &mut surface,
        kind,
        record,
        texture,
        &mut assets.standard,
        &mut assets.banded,
    );
    surface.set_parent(float).observe(on_body_clicked);

    if extras.clouds {
        let shell = assets
            .meshes
            .add(Sphere::new(record.radius * CLOUD_SCALE).mesh().uv(64, 64));
        commands
            .spawn((
                Mesh3d(shell),
                MeshMaterial3d(assets.standard.add(translucent_layer(Color::WHITE, 0.3, false))),
                Transform::default(),
                Spin::about_y(CLOUD_SPIN_RATE),
            ))
            .set_parent(float);
    }

    if let Some(glow) = extras.atmosphere {
        let shell = assets
            .meshes
            .add(Sphere::new(record.radius * ATMOSPHERE_SCALE).mesh().uv(64, 64));
        commands
            .spawn((
                Mesh3d(shell),
                MeshMaterial3d(assets.glow.add(AtmosphereMaterial::from(glow))),
                Transform::default(),
            ))
            .set_parent(float);
    }

    if extras.rings {
        let ring = assets.meshes.add(
            Annulus::new(
                record.radius * RING_INNER_SCALE,
                record.radius * RING_OUTER_SCALE,
            )
            .mesh()
            .resolution(128),
        );
        let spin = Spin {
            rate: RING_SPIN_RATE,
            axis: Vec3::Z,
            base: Quat::from_rotation_x(RING_TILT),
        };
        commands
            .spawn((
                Mesh3d(ring),
                MeshMaterial3d(
                    assets
                        .standard
                        .add(translucent_layer(srgb_color(record.color), 0.5, true)),
                ),
                Transform::from_rotation(spin.base),
                spin,
            ))
            .set_parent(float);
    }

    if !is_sun {
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(LABEL_WIDTH),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
                PickingBehavior::IGNORE,
                BodyLabel {
                    planet_id: record.id,
                    anchor: slot,
                    lift: record.radius + LABEL_CLEARANCE,
                },
            ))
            .with_children(|tag| {
                tag.spawn((
                    Text::new(record.name.to_uppercase()),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
                    PickingBehavior::IGNORE,
                ));
            });
    }

    pivot
}

/// Focus the clicked planet, or return to overview when the sun is clicked.
/// Ignored while a generation is in flight.
pub fn apply_click(session: &mut Session, surface: &BodySurface) -> bool {
    if session.is_generating() {
        return false;
    }
    if surface.is_sun {
        let changed = session.deselect();
        if changed {
            info!("Focus: back to overview");
        }
        changed
    } else {
        let changed = session.select(surface.record);
        if changed {
            info!("Focus: {}", surface.record.name);
        }
        changed
    }
}

fn on_body_clicked(
    mut trigger: Trigger<Pointer<Click>>,
    surfaces: Query<&BodySurface>,
    mut session: ResMut<Session>,
) {
    // Bodies are nested; only the innermost hit counts
    trigger.propagate(false);
    if trigger.event().event.button != PointerButton::Primary {
        return;
    }
    let Ok(surface) = surfaces.get(trigger.entity()) else {
        return;
    };
    apply_click(&mut session, surface);
}

/// Advance orbits, freezing the focused planet and resuming it on release
pub fn animate_orbits(
    time: Res<Time>,
    session: Res<Session>,
    mut bodies: Query<(&CelestialBody, &mut OrbitMotion, &mut Transform)>,
) {
    let now = time.elapsed_secs();
    for (body, mut motion, mut transform) in &mut bodies {
        let focused = session.is_focused(body.record.id);
        if focused != motion.is_frozen() {
            motion.set_frozen(focused, now);
        }
        transform.rotation = Quat::from_rotation_y(motion.angle_at(now));
    }
}

pub fn animate_spin(time: Res<Time>, mut spinners: Query<(&Spin, &mut Transform)>) {
    let now = time.elapsed_secs();
    for (spin, mut transform) in &mut spinners {
        transform.rotation = spin.rotation_at(now);
    }
}

pub fn animate_float(time: Res<Time>, mut floats: Query<(&BodyFloat, &mut Transform)>) {
    let now = time.elapsed_secs();
    for (float, mut transform) in &mut floats {
        let (lift, tilt) = float_offset(now, float.phase);
        transform.translation.y = lift;
        transform.rotation = Quat::from_rotation_z(tilt) * Quat::from_rotation_x(tilt * 0.5);
    }
}

pub fn update_gas_giant_time(
    time: Res<Time>,
    surfaces: Query<&MeshMaterial3d<GasGiantMaterial>, With<BodySurface>>,
    mut materials: ResMut<Assets<GasGiantMaterial>>,
) {
    let now = time.elapsed_secs();
    for handle in &surfaces {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.time = now;
        }
    }
}

/// Swap surface materials when a generated texture lands
pub fn sync_surface_materials(
    mut commands: Commands,
    session: Res<Session>,
    mut surfaces: Query<(Entity, &mut BodySurface)>,
    mut standard: ResMut<Assets<StandardMaterial>>,
    mut banded: ResMut<Assets<GasGiantMaterial>>,
) {
    if !session.is_changed() {
        return;
    }
    for (entity, mut surface) in &mut surfaces {
        let texture = if surface.is_sun {
            None
        } else {
            session.overrides().get(surface.record.id).cloned()
        };
        let kind = surface_kind(surface.record, surface.is_sun, texture.is_some());
        if kind == surface.kind && texture == surface.texture {
            continue;
        }

        info!("Surface: {} now {}", surface.record.name, kind.name());
        attach_surface_material(
            &mut commands.entity(entity),
            kind,
            surface.record,
            texture.clone(),
            &mut standard,
            &mut banded,
        );
        surface.kind = kind;
        surface.texture = texture;
    }
}

/// Keep name tags over their bodies; the focused planet's tag is hidden
pub fn update_labels(
    session: Res<Session>,
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitRig>>,
    anchors: Query<&GlobalTransform, With<BodySlot>>,
    mut labels: Query<(&BodyLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    for (label, mut node, mut visibility) in &mut labels {
        let screen = anchors
            .get(label.anchor)
            .ok()
            .filter(|_| !session.is_focused(label.planet_id))
            .and_then(|anchor| {
                let world = anchor.translation() + Vec3::Y * label.lift;
                camera.world_to_viewport(camera_transform, world).ok()
            });

        match screen {
            Some(position) => {
                node.left = Val::Px(position.x - LABEL_WIDTH / 2.0);
                node.top = Val::Px(position.y);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrum_core::{SUN, find};
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn surface(id: &str) -> BodySurface {
        let record = find(id).unwrap();
        BodySurface {
            record,
            is_sun: false,
            kind: surface_kind(record, false, false),
            texture: None,
        }
    }

    fn sun_surface() -> BodySurface {
        BodySurface {
            record: &SUN,
            is_sun: true,
            kind: SurfaceKind::Emissive,
            texture: None,
        }
    }

    fn orbit_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<Session>()
            .add_systems(Update, animate_orbits);
        app
    }

    fn pivot_angle(app: &mut App, entity: Entity) -> f32 {
        let transform = app.world().get::<Transform>(entity).unwrap();
        transform.rotation.to_euler(EulerRot::YXZ).0
    }

    #[test]
    fn clicking_planets_and_sun() {
        let mut session = Session::default();
        assert!(apply_click(&mut session, &surface("earth")));
        assert_eq!(session.focus_id(), Some("earth"));
        assert!(!apply_click(&mut session, &surface("earth")));
        assert!(apply_click(&mut session, &surface("mars")));
        assert!(apply_click(&mut session, &sun_surface()));
        assert!(session.focus().is_none());
        assert!(!apply_click(&mut session, &sun_surface()));
    }

    #[test]
    fn clicks_are_ignored_while_generating() {
        let mut session = Session::default();
        apply_click(&mut session, &surface("earth"));
        session.begin_generation().unwrap();
        assert!(!apply_click(&mut session, &surface("mars")));
        assert!(!apply_click(&mut session, &sun_surface()));
        assert_eq!(session.focus_id(), Some("earth"));
    }

    #[test]
    fn focused_planet_holds_then_resumes_without_snap() {
        let mut app = orbit_app();
        let earth = find("earth").unwrap();
        let mars = find("mars").unwrap();
        let e = app
            .world_mut()
            .spawn((
                CelestialBody { record: earth, is_sun: false },
                OrbitMotion::new(earth.distance),
                Transform::default(),
            ))
            .id();
        let m = app
            .world_mut()
            .spawn((
                CelestialBody { record: mars, is_sun: false },
                OrbitMotion::new(mars.distance),
                Transform::default(),
            ))
            .id();

        for _ in 0..10 {
            app.update();
        }
        assert!(pivot_angle(&mut app, e) > 0.0);

        app.world_mut().resource_mut::<Session>().select(earth);
        app.update();
        let held = pivot_angle(&mut app, e);
        let mars_before = pivot_angle(&mut app, m);
        for _ in 0..10 {
            app.update();
        }
        assert!((pivot_angle(&mut app, e) - held).abs() < 1e-6);
        // other bodies keep moving
        assert!(pivot_angle(&mut app, m) > mars_before);

        app.world_mut().resource_mut::<Session>().deselect();
        app.update();
        assert!((pivot_angle(&mut app, e) - held).abs() < 1e-6);
        app.update();
        assert!(pivot_angle(&mut app, e) > held);
        assert!(!app.world().get::<OrbitMotion>(e).unwrap().is_frozen());
    }

    #[test]
    fn generated_texture_replaces_procedural_material() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Assets::<StandardMaterial>::default())
            .insert_resource(Assets::<GasGiantMaterial>::default())
            .init_resource::<Session>()
            .add_systems(Update, sync_surface_materials);

        let jupiter = find("jupiter").unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<GasGiantMaterial>>()
            .add(GasGiantMaterial::for_planet(jupiter));
        let entity = app
            .world_mut()
            .spawn((surface("jupiter"), MeshMaterial3d(handle)))
            .id();

        app.update();
        assert!(app.world().get::<MeshMaterial3d<GasGiantMaterial>>(entity).is_some());

        let image = Handle::<Image>::weak_from_u128(42);
        {
            let mut session = app.world_mut().resource_mut::<Session>();
            session.select(jupiter);
            let ticket = session.begin_generation().unwrap();
            session.complete_generation(ticket, image.clone());
        }
        app.update();

        let world = app.world();
        assert!(world.get::<MeshMaterial3d<GasGiantMaterial>>(entity).is_none());
        let material = world.get::<MeshMaterial3d<StandardMaterial>>(entity).unwrap();
        let material = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material.0)
            .unwrap();
        assert_eq!(material.base_color_texture, Some(image.clone()));

        let tracked = world.get::<BodySurface>(entity).unwrap();
        assert_eq!(tracked.kind, SurfaceKind::Textured);
        assert_eq!(tracked.texture, Some(image));
    }

    #[test]
    fn materials_per_kind() {
        let earth = find("earth").unwrap();
        let flat = standard_surface(SurfaceKind::FlatShaded, earth, None);
        assert_eq!(flat.base_color, srgb_color(earth.color));
        assert!(flat.base_color_texture.is_none());

        let sun = standard_surface(SurfaceKind::Emissive, &SUN, None);
        assert!(sun.unlit);
        assert_ne!(sun.emissive, LinearRgba::BLACK);

        let image = Handle::<Image>::weak_from_u128(5);
        let textured = standard_surface(SurfaceKind::Textured, earth, Some(image.clone()));
        assert_eq!(textured.base_color_texture, Some(image));
        assert_eq!(textured.base_color, Color::WHITE);
    }

    #[test]
    fn only_orbit_paths_skip_lighting() {
        let path = orbit_path_material();
        assert!(path.unlit);
        assert!(path.double_sided);

        let clouds = translucent_layer(Color::WHITE, 0.3, false);
        assert!(!clouds.unlit);
        assert!(!clouds.double_sided);
        assert!(clouds.cull_mode.is_some());
        assert_eq!(clouds.alpha_mode, AlphaMode::Blend);

        let saturn = find("saturn").unwrap();
        let rings = translucent_layer(srgb_color(saturn.color), 0.5, true);
        assert!(!rings.unlit);
        assert!(rings.cull_mode.is_none());
        assert!((rings.base_color.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn spin_keeps_base_orientation() {
        let spin = Spin {
            rate: RING_SPIN_RATE,
            axis: Vec3::Z,
            base: Quat::from_rotation_x(RING_TILT),
        };
        assert!(spin.rotation_at(0.0).abs_diff_eq(spin.base, 1e-6));
        let later = spin.rotation_at(10.0);
        // spinning about the ring's own normal leaves that normal in place
        let normal = spin.base * Vec3::Z;
        assert!((later * Vec3::Z).abs_diff_eq(normal, 1e-5));
    }
}
