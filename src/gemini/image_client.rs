use super::{extract_image, GenerativeTransport};
use crate::{
    error::{PokeMorphError, Result},
    models::{GenerateContentRequest, GenerateRequest, ImageResult, Part},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn GenerativeTransport>,
    default_model: String,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn GenerativeTransport>, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    pub fn build_request(request: &GenerateRequest) -> GenerateContentRequest {
        GenerateContentRequest::from_parts(vec![Part::text(request.prompt.clone())])
            .with_image_config(request.aspect_ratio, request.resolution)
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<ImageResult> {
        if request.prompt.trim().is_empty() {
            return Err(PokeMorphError::RequestError("Prompt must not be empty".into()));
        }

        let model_id = request.model_id.as_deref().unwrap_or(self.default_model.as_str());
        let body = Self::build_request(&request);

        log::info!(
            "Generating {} image at {} with model: {}",
            request.aspect_ratio,
            request.resolution,
            model_id
        );

        let response = self
            .transport
            .generate_content(model_id, &body)
            .await
            .map_err(|e| {
                log::error!("Generation error: {}", e);
                e
            })?;

        extract_image(&response, model_id)
    }
}
