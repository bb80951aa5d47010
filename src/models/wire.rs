//! Request and response bodies of the Gemini `generateContent` endpoint.

use super::{AspectRatio, ImagePayload, ImageSize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn image(payload: &ImagePayload) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: Some(payload.mime_type.clone()),
                data: payload.data.clone(),
            }),
            ..Default::default()
        }
    }

    fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
    pub image_size: ImageSize,
}

impl GenerateContentRequest {
    /// A single user turn made of the given parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { role: None, parts }],
            generation_config: None,
        }
    }

    pub fn with_image_config(mut self, aspect_ratio: AspectRatio, image_size: ImageSize) -> Self {
        self.generation_config = Some(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio,
                image_size,
            }),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// First inline image with non-empty data in the first candidate.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty())
    }

    /// All non-thought text parts of the first candidate, concatenated.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter(|p| !p.is_thought())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Why the model stopped or the prompt was refused, when the service says so.
    pub fn refusal_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .or_else(|| {
                self.candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .filter(|r| *r != "STOP")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let payload = ImagePayload::new("AAEC", "image/jpeg");
        let request = GenerateContentRequest::from_parts(vec![
            Part::image(&payload),
            Part::text("Transform"),
        ]);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "AAEC" } },
                        { "text": "Transform" }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_image_config_serialization() {
        let request = GenerateContentRequest::from_parts(vec![Part::text("A dragon")])
            .with_image_config(AspectRatio::Ultrawide, ImageSize::FourK);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "21:9");
        assert_eq!(body["generationConfig"]["imageConfig"]["imageSize"], "4K");
    }

    #[test]
    fn test_first_inline_image_skips_text_and_empty_data() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your Pikachu" },
                        { "inlineData": { "mimeType": "image/png", "data": "" } },
                        { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let image = response.first_inline_image().unwrap();
        assert_eq!(image.data, "iVBORw0KGgo=");
        assert!(response.refusal_reason().is_none());
    }

    #[test]
    fn test_text_concatenates_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "**Name:** Toaster" },
                        { "text": "\n**Type:** Fire" }
                    ]
                }
            }]
        }))
        .unwrap();

        assert_eq!(
            response.text().as_deref(),
            Some("**Name:** Toaster\n**Type:** Fire")
        );
    }

    #[test]
    fn test_whitespace_text_is_kept() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": " \n" }] } }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some(" \n"));
    }

    #[test]
    fn test_blocked_prompt_has_no_content() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        assert!(response.first_inline_image().is_none());
        assert!(response.text().is_none());
        assert_eq!(response.refusal_reason(), Some("SAFETY"));
    }
}
