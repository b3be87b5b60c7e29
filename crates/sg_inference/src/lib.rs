use std::fmt;

pub mod images;
pub mod models;

pub const DEFAULT_MODEL: &str = "openai";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://api.nanobanana.ai/v1";

/// Settings for the language model and image collaborators.
#[derive(Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    /// `openai` or `dummy`.
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub chat_model: Option<String>,
    /// Without a key, images come from the placeholder service.
    pub image_api_key: Option<String>,
    pub image_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_key: var("OPENAI_API_KEY"),
            model_name: None,
            base_url: var("OPENAI_BASE_URL"),
            chat_model: var("OPENAI_MODEL"),
            image_api_key: var("NANO_BANANA_API_KEY"),
            image_base_url: var("NANO_BANANA_BASE_URL"),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("image_api_key", &self.image_api_key.as_deref().map(|_| "<redacted>"))
            .field("image_base_url", &self.image_base_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::images::create_image_generator;
    pub use super::models::create_generator;
    pub use super::Config;
    pub use sg_core::{ContentGenerator, Error, ImageGenerator, Result};
}

pub use images::create_image_generator;
pub use models::create_generator;
