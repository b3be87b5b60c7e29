use sg_core::{ContentGenerator, Error, Result};
use std::sync::Arc;
use tracing::info;

use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyGenerator;
pub use openai::OpenAiGenerator;

pub fn create_generator(config: &Config) -> Result<Arc<dyn ContentGenerator>> {
    let generator: Arc<dyn ContentGenerator> = match config.model_name().to_lowercase().as_str() {
        "openai" => Arc::new(OpenAiGenerator::from_config(config)?),
        "dummy" => Arc::new(DummyGenerator::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown model: {}. Available models: openai, dummy",
                other
            )))
        }
    };
    info!("🧠 Content generator ready (using {})", generator.name());
    Ok(generator)
}
