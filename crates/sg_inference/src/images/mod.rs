use sg_core::{ImageGenerator, Result};
use std::sync::Arc;
use tracing::info;

use crate::Config;

pub mod nanobanana;
pub mod placeholder;

pub use nanobanana::NanoBananaImageGenerator;
pub use placeholder::PlaceholderImageGenerator;

/// Nano Banana when an image key is configured, placeholder images otherwise.
pub fn create_image_generator(config: &Config) -> Result<Arc<dyn ImageGenerator>> {
    let generator: Arc<dyn ImageGenerator> = match &config.image_api_key {
        Some(key) => {
            let mut generator = NanoBananaImageGenerator::new(key.clone())?;
            if let Some(base_url) = &config.image_base_url {
                generator = generator.with_base_url(base_url);
            }
            Arc::new(generator)
        }
        None => Arc::new(PlaceholderImageGenerator),
    };
    info!("🖼️ Image generator ready (using {})", generator.name());
    Ok(generator)
}
