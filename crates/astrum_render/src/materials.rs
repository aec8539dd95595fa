use astrum_core::{AtmosphereGlow, GAS_GIANT_STRIPE, PlanetRecord, STORM_CENTER, STORM_RADIUS, hex_rgb};
use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};

const GAS_GIANT_SHADER: &str = "shaders/gas_giant.wgsl";
const ATMOSPHERE_SHADER: &str = "shaders/atmosphere.wgsl";

/// Banded, animated surface with a storm spot
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GasGiantMaterial {
    #[uniform(0)]
    pub base_color: LinearRgba,
    #[uniform(1)]
    pub stripe_color: LinearRgba,
    #[uniform(2)]
    pub time: f32,
    /// xy = center in uv space, z = radius
    #[uniform(3)]
    pub storm: Vec4,
}

impl GasGiantMaterial {
    pub fn for_planet(record: &PlanetRecord) -> Self {
        Self {
            base_color: srgb_hex(record.color),
            stripe_color: srgb_hex(GAS_GIANT_STRIPE),
            time: 0.0,
            storm: Vec4::new(STORM_CENTER[0], STORM_CENTER[1], STORM_RADIUS, 0.0),
        }
    }
}

impl Material for GasGiantMaterial {
    fn fragment_shader() -> ShaderRef {
        GAS_GIANT_SHADER.into()
    }
}

/// Additive view-dependent rim glow
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct AtmosphereMaterial {
    #[uniform(0)]
    pub glow_color: LinearRgba,
    #[uniform(1)]
    pub power: f32,
    #[uniform(2)]
    pub multiplier: f32,
}

impl From<AtmosphereGlow> for AtmosphereMaterial {
    fn from(glow: AtmosphereGlow) -> Self {
        Self {
            glow_color: srgb_hex(glow.color),
            power: glow.power,
            multiplier: glow.multiplier,
        }
    }
}

impl Material for AtmosphereMaterial {
    fn fragment_shader() -> ShaderRef {
        ATMOSPHERE_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

/// Catalog colors are sRGB hex; unparsable ones fall back to white
pub fn srgb_color(hex: &str) -> Color {
    match hex_rgb(hex) {
        Some([r, g, b]) => Color::srgb(r, g, b),
        None => {
            warn!("Bad catalog color {hex:?}, using white");
            Color::WHITE
        }
    }
}

fn srgb_hex(hex: &str) -> LinearRgba {
    LinearRgba::from(srgb_color(hex))
}

/// Registers the custom body materials
pub struct BodyMaterialsPlugin;

impl Plugin for BodyMaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<GasGiantMaterial>::default())
            .add_plugins(MaterialPlugin::<AtmosphereMaterial>::default());
    }
}
