pub mod image_client;
pub mod prompts;
pub mod transform_client;
pub mod transport;
pub mod vision_client;

use crate::{
    config::GeminiConfig,
    error::{PokeMorphError, Result},
    models::{GenerateContentResponse, ImageResult, ModelCategory, ModelInfo, Operation},
};
use std::sync::Arc;

pub use image_client::ImageClient;
pub use transform_client::TransformClient;
pub use transport::{GenerativeTransport, HttpTransport};
pub use vision_client::VisionClient;

const FALLBACK_IMAGE_MIME: &str = "image/png";

#[derive(Clone)]
pub struct GeminiClient {
    transform_client: TransformClient,
    image_client: ImageClient,
    vision_client: VisionClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        log::debug!(
            "Gemini client ready: base_url={} key={}",
            config.base_url(),
            config.masked_api_key()
        );
        Ok(Self::with_transport(&config, Arc::new(transport)))
    }

    /// Builds the client over any transport, e.g. a recorded or mocked one.
    pub fn with_transport(config: &GeminiConfig, transport: Arc<dyn GenerativeTransport>) -> Self {
        Self {
            transform_client: TransformClient::new(transport.clone(), config.transform_model()),
            image_client: ImageClient::new(transport.clone(), config.generate_model()),
            vision_client: VisionClient::new(transport, config.analyze_model()),
        }
    }

    pub fn transform(&self) -> &TransformClient {
        &self.transform_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision_client
    }

    pub fn supported_models(config: &GeminiConfig) -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: config.transform_model().to_string(),
                operation: Operation::Transform,
                category: ModelCategory::Image,
                description: "Morphs the subject of a photo into a Pokémon".to_string(),
            },
            ModelInfo {
                id: config.generate_model().to_string(),
                operation: Operation::Generate,
                category: ModelCategory::Image,
                description: "Generates Pokémon art from a text prompt".to_string(),
            },
            ModelInfo {
                id: config.analyze_model().to_string(),
                operation: Operation::Analyze,
                category: ModelCategory::Vision,
                description: "Writes a trainer profile or Pokédex entry for an image".to_string(),
            },
        ]
    }
}

/// Returns the first inline image of the response as a data URI.
pub(crate) fn extract_image(response: &GenerateContentResponse, model: &str) -> Result<ImageResult> {
    match response.first_inline_image() {
        Some(inline) => {
            let mime_type = inline
                .mime_type
                .as_deref()
                .filter(|m| m.starts_with("image/"))
                .unwrap_or(FALLBACK_IMAGE_MIME);
            log::info!(
                "✅ {} returned a {} image ({} base64 chars)",
                model,
                mime_type,
                inline.data.len()
            );
            Ok(ImageResult::new(mime_type, &inline.data, model))
        }
        None => {
            match (response.refusal_reason(), response.text()) {
                (Some(reason), _) => log::warn!("{} produced no image ({})", model, reason),
                (None, Some(text)) => log::warn!("{} answered with text only: {}", model, text),
                (None, None) => log::warn!("{} produced no image", model),
            }
            Err(PokeMorphError::NoImageProduced)
        }
    }
}
