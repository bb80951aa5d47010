use super::{prompts, GenerativeTransport};
use crate::{
    error::{PokeMorphError, Result},
    models::{AnalysisResult, AnalyzeRequest, GenerateContentRequest, Part},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct VisionClient {
    transport: Arc<dyn GenerativeTransport>,
    default_model: String,
}

impl VisionClient {
    pub fn new(transport: Arc<dyn GenerativeTransport>, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    pub fn build_request(request: &AnalyzeRequest) -> GenerateContentRequest {
        GenerateContentRequest::from_parts(vec![
            Part::image(&request.source_image),
            Part::text(prompts::ANALYZE_PROMPT),
        ])
    }

    /// Describes the image as a trainer profile or a Pokédex entry.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        if request.source_image.is_empty() {
            return Err(PokeMorphError::RequestError(
                "Please upload an image first.".into(),
            ));
        }

        let model_id = request.model_id.as_deref().unwrap_or(self.default_model.as_str());
        let body = Self::build_request(&request);

        log::info!("Analyzing image with model: {}", model_id);

        let response = self
            .transport
            .generate_content(model_id, &body)
            .await
            .map_err(|e| {
                log::error!("Analysis error: {}", e);
                e
            })?;

        match response.text() {
            Some(text) => Ok(AnalysisResult {
                text,
                model: model_id.to_string(),
            }),
            None => {
                if let Some(reason) = response.refusal_reason() {
                    log::warn!("Analysis returned no text ({})", reason);
                }
                Err(PokeMorphError::EmptyAnalysis)
            }
        }
    }
}
