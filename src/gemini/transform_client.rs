use super::{extract_image, prompts, GenerativeTransport};
use crate::{
    error::{PokeMorphError, Result},
    models::{GenerateContentRequest, ImageResult, Part, TransformRequest},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TransformClient {
    transport: Arc<dyn GenerativeTransport>,
    default_model: String,
}

impl TransformClient {
    pub fn new(transport: Arc<dyn GenerativeTransport>, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    pub fn build_request(request: &TransformRequest) -> GenerateContentRequest {
        let prompt =
            prompts::transform_prompt(&request.target_name, request.extra_instruction.as_deref());

        GenerateContentRequest::from_parts(vec![
            Part::image(&request.source_image),
            Part::text(prompt),
        ])
    }

    /// Morphs the subject of the source image into the target Pokémon.
    pub async fn transform(&self, request: TransformRequest) -> Result<ImageResult> {
        if request.target_name.trim().is_empty() {
            return Err(PokeMorphError::RequestError(
                "Please select a Pokémon or enter a custom name.".into(),
            ));
        }
        if request.source_image.is_empty() {
            return Err(PokeMorphError::RequestError(
                "Please upload an image first.".into(),
            ));
        }

        let model_id = request.model_id.as_deref().unwrap_or(self.default_model.as_str());
        let body = Self::build_request(&request);

        log::info!(
            "Transforming image into {} with model: {}",
            request.target_name,
            model_id
        );

        let response = self
            .transport
            .generate_content(model_id, &body)
            .await
            .map_err(|e| {
                log::error!("Transformation error: {}", e);
                e
            })?;

        extract_image(&response, model_id)
    }
}
