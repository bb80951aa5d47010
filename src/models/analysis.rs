use super::ImagePayload;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub source_image: ImagePayload,
    pub model_id: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(source_image: ImagePayload) -> Self {
        Self {
            source_image,
            model_id: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// Markdown text describing the image, exactly as the model wrote it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub text: String,
    pub model: String,
}

/// Shown in place of an analysis when the model returns no text.
pub const ANALYSIS_FALLBACK: &str = "Could not analyze image.";
