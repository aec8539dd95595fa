use astrum_sim::{GenerationTicket, Session, Settings};
use astrum_texture::{GeminiClient, TextureError, TextureGenerator};
use bevy::image::{ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on, poll_once};
use image::DynamicImage;
use std::sync::Arc;

/// Texture source used by the generate control
#[derive(Resource, Clone)]
pub struct TextureBackend(pub Arc<dyn TextureGenerator>);

/// Sent by the generate control
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GenerateTextureRequested;

/// The one outstanding request, if any
#[derive(Resource)]
pub struct GenerationTask {
    ticket: GenerationTicket,
    task: Task<Result<DynamicImage, TextureError>>,
}

pub struct GenerationPlugin;

impl Plugin for GenerationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GenerateTextureRequested>()
            .add_systems(Startup, install_backend)
            .add_systems(
                Update,
                (start_generation, poll_generation.after(start_generation)),
            );
    }
}

/// Default backend from settings, unless one was already provided
fn install_backend(
    mut commands: Commands,
    settings: Res<Settings>,
    existing: Option<Res<TextureBackend>>,
) {
    if existing.is_some() {
        return;
    }
    let client = GeminiClient::from_config(&settings.0);
    commands.insert_resource(TextureBackend(Arc::new(client)));
}

/// Issue a request for the focused planet. A request while one is already in
/// flight, or with nothing focused, does nothing.
pub fn start_generation(
    mut commands: Commands,
    mut requests: EventReader<GenerateTextureRequested>,
    mut session: ResMut<Session>,
    backend: Option<Res<TextureBackend>>,
    running: Option<Res<GenerationTask>>,
) {
    if requests.read().count() == 0 || running.is_some() {
        return;
    }
    let Some(backend) = backend else {
        warn!("Texture generation requested before a backend was installed");
        return;
    };
    let Some(ticket) = session.begin_generation() else {
        return;
    };

    info!("Generation: mapping {}", ticket.planet_name);

    let generator = backend.0.clone();
    let planet_id = ticket.planet_id;
    let task = AsyncComputeTaskPool::get()
        .spawn(async move { generator.generate(planet_id).and_then(|image| image.decode()) });

    commands.insert_resource(GenerationTask { ticket, task });
}

/// Check the outstanding request without blocking the frame
pub fn poll_generation(
    mut commands: Commands,
    task: Option<ResMut<GenerationTask>>,
    mut session: ResMut<Session>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(mut pending) = task else {
        return;
    };
    let Some(result) = block_on(poll_once(&mut pending.task)) else {
        return;
    };

    let ticket = pending.ticket;
    commands.remove_resource::<GenerationTask>();
    apply_outcome(&mut session, &mut images, ticket, result);
}

/// File a finished request. The override always lands under the ticket's
/// planet, whatever is focused now.
pub fn apply_outcome(
    session: &mut Session,
    images: &mut Assets<Image>,
    ticket: GenerationTicket,
    result: Result<DynamicImage, TextureError>,
) -> bool {
    match result {
        Ok(pixels) => {
            let (width, height) = (pixels.width(), pixels.height());
            let handle = images.add(surface_image(pixels));
            let stored = session.complete_generation(ticket, handle);
            if stored {
                info!(
                    "Generation: {} surface ready ({}x{})",
                    ticket.planet_name, width, height
                );
            }
            stored
        }
        Err(e) => {
            warn!("Generation for {} failed: {}", ticket.planet_id, e);
            session.fail_generation(ticket, e.user_message())
        }
    }
}

/// sRGB texture with anisotropic filtering for sphere mapping
pub fn surface_image(pixels: DynamicImage) -> Image {
    let mut image = Image::from_dynamic(pixels, true, RenderAssetUsages::default());
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        anisotropy_clamp: 16,
        ..ImageSamplerDescriptor::linear()
    });
    image
}
