/// Appended to every prompt after `" Avoid: "`
pub const NEGATIVE_CONSTRAINTS: &str = "fantasy, sci-fi, cartoon, stylized, neon colors, exaggerated contrast, unrealistic glow, fake lighting, artistic interpretation, painting style, low resolution, blur, noise";

/// Template used for ids without their own entry
pub const FALLBACK_ID: &str = "earth";

const TEMPLATES: &[(&str, &str)] = &[
    (
        "mercury",
        "Ultra-realistic Mercury surface texture. High-resolution cratered terrain, physically accurate gray albedo. Based on MESSENGER mission data. Equirectangular projection. No atmosphere.",
    ),
    (
        "venus",
        "Realistic Venus surface texture beneath dense atmosphere. Basaltic plains, volcanic formations and impact craters. Muted brown and gray tones. No lava glow, no fantasy lighting. Scientific reference from Magellan radar mapping. Equirectangular high-resolution texture.",
    ),
    (
        "earth",
        "Ultra-realistic Earth surface texture based on satellite imagery. Accurate continents, oceans, deserts, forests and polar ice caps. Correct ocean color, no clouds in this base layer (they will be added separately). No stylization, no glow, no exaggerated saturation. Equirectangular 8K texture for 3D globe mapping. Scientific visualization style, NASA Earth Observatory reference. Photorealistic, clean, sharp details.",
    ),
    (
        "mars",
        "High-resolution Mars planetary surface texture. Accurate reddish iron-oxide coloration. Realistic craters, canyons and volcanic formations. Visible Valles Marineris and polar ice caps. No clouds, no atmosphere. Scientific realism, based on Mars Reconnaissance Orbiter data. Equirectangular projection for sphere mapping.",
    ),
    (
        "jupiter",
        "Ultra-realistic Jupiter cloud texture. Accurate horizontal cloud bands. Correct color palette: beige, white, muted orange and brown. Visible Great Red Spot with realistic scale and tone. No neon colors, no artistic exaggeration. Scientific visualization based on Juno mission data. Equirectangular projection for gas giant mapping.",
    ),
    (
        "saturn",
        "Photorealistic Saturn cloud layer texture. Soft pastel tones with subtle banding. No sharp contrasts, no fantasy colors. High-resolution equirectangular texture for gas giant. NASA Cassini scientific reference.",
    ),
    (
        "uranus",
        "Scientifically accurate Uranus atmospheric texture. Pale cyan color with very subtle cloud patterns. Minimal contrast. No dramatic storms or bands. Realistic ice giant appearance. Equirectangular texture, NASA Voyager reference.",
    ),
    (
        "neptune",
        "Realistic Neptune atmospheric texture. Deep blue coloration with subtle storm patterns. Visible but not exaggerated dark spots. Scientific realism, Voyager and Hubble reference. High-resolution equirectangular mapping.",
    ),
];

fn template(planet_id: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(id, _)| *id == planet_id)
        .map(|(_, text)| *text)
}

/// Full prompt for a planet: its template (or the fallback) plus the shared constraints
pub fn prompt_for(planet_id: &str) -> String {
    let base = template(planet_id)
        .or_else(|| template(FALLBACK_ID))
        .unwrap_or_default();
    format!("{base} Avoid: {NEGATIVE_CONSTRAINTS}")
}
