use crate::error::{PokeMorphError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A binary image carried as base64 text, ready to be sent inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub data: String, // Base64 encoded
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "21:9")]
    Ultrawide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    Tall,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Ultrawide,
        AspectRatio::Standard,
        AspectRatio::Tall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Ultrawide => "21:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::Tall => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = PokeMorphError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s)
            .ok_or_else(|| {
                PokeMorphError::RequestError(format!(
                    "Unsupported aspect ratio '{}', expected one of: {}",
                    s,
                    AspectRatio::ALL.map(|r| r.as_str()).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::OneK, ImageSize::TwoK, ImageSize::FourK];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = PokeMorphError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ImageSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                PokeMorphError::RequestError(format!(
                    "Unsupported image size '{}', expected 1K, 2K or 4K",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub source_image: ImagePayload,
    pub target_name: String,
    pub extra_instruction: Option<String>,
    pub model_id: Option<String>,
}

impl TransformRequest {
    pub fn new(source_image: ImagePayload, target_name: impl Into<String>) -> Self {
        Self {
            source_image,
            target_name: target_name.into(),
            extra_instruction: None,
            model_id: None,
        }
    }

    /// Builds a request the way the transform form does: a chosen Pokémon wins,
    /// otherwise the custom instruction doubles as the target name.
    pub fn from_selection(
        source_image: ImagePayload,
        selected: Option<&str>,
        custom_instruction: Option<&str>,
    ) -> Result<Self> {
        let selected = selected.map(str::trim).filter(|s| !s.is_empty());
        let custom = custom_instruction.map(str::trim).filter(|s| !s.is_empty());

        let target = selected.or(custom).ok_or_else(|| {
            PokeMorphError::RequestError(
                "Please select a Pokémon or enter a custom name.".into(),
            )
        })?;

        Ok(Self {
            source_image,
            target_name: target.to_string(),
            extra_instruction: custom.map(String::from),
            model_id: None,
        })
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.extra_instruction = Some(instruction.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub resolution: ImageSize,
    pub model_id: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: AspectRatio::default(),
            resolution: ImageSize::default(),
            model_id: None,
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_resolution(mut self, resolution: ImageSize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// An image returned by the model, as a `data:` URI.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResult {
    pub data_uri: String,
    pub mime_type: String,
    pub model: String,
}

impl ImageResult {
    pub fn new(mime_type: &str, base64_data: &str, model: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", mime_type, base64_data),
            mime_type: mime_type.to_string(),
            model: model.to_string(),
        }
    }

    pub fn base64_data(&self) -> &str {
        self.data_uri
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or_default()
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.base64_data())
            .map_err(|e| PokeMorphError::ResponseError(format!("Invalid image data: {}", e)))
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }

    /// Decodes the image and writes the raw bytes to `path`, creating any
    /// missing parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = self.decode()?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path.as_ref(), &bytes)?;
        log::info!(
            "💾 Image saved to: {} ({} bytes)",
            path.as_ref().display(),
            bytes.len()
        );
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ImagePayload {
        ImagePayload::new("iVBORw0KGgo=", "image/png")
    }

    #[test]
    fn test_aspect_ratio_parsing() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
        assert_eq!(" 3:4 ".parse::<AspectRatio>().unwrap(), AspectRatio::Tall);
        assert!("2:1".parse::<AspectRatio>().is_err());
        assert_eq!(AspectRatio::default().to_string(), "1:1");
    }

    #[test]
    fn test_image_size_parsing() {
        assert_eq!("4k".parse::<ImageSize>().unwrap(), ImageSize::FourK);
        assert_eq!("2K".parse::<ImageSize>().unwrap(), ImageSize::TwoK);
        assert!("8K".parse::<ImageSize>().is_err());
        assert_eq!(ImageSize::default().as_str(), "1K");
    }

    #[test]
    fn test_wire_names_match_display() {
        for ratio in AspectRatio::ALL {
            let json = serde_json::to_value(ratio).unwrap();
            assert_eq!(json, ratio.as_str());
        }
        for size in ImageSize::ALL {
            let json = serde_json::to_value(size).unwrap();
            assert_eq!(json, size.as_str());
        }
    }

    #[test]
    fn test_selection_prefers_catalog_pokemon() {
        let request =
            TransformRequest::from_selection(payload(), Some("Pikachu"), Some("wearing a hat"))
                .unwrap();
        assert_eq!(request.target_name, "Pikachu");
        assert_eq!(request.extra_instruction.as_deref(), Some("wearing a hat"));
    }

    #[test]
    fn test_selection_falls_back_to_custom_name() {
        let request =
            TransformRequest::from_selection(payload(), Some("  "), Some("Mimikyu")).unwrap();
        assert_eq!(request.target_name, "Mimikyu");
    }

    #[test]
    fn test_selection_requires_a_target() {
        let err = TransformRequest::from_selection(payload(), None, Some("")).unwrap_err();
        assert!(matches!(err, PokeMorphError::RequestError(_)));
    }

    #[test]
    fn test_image_result_data_uri() {
        let result = ImageResult::new("image/jpeg", "AAEC", "gemini-2.5-flash-image");
        assert_eq!(result.data_uri, "data:image/jpeg;base64,AAEC");
        assert_eq!(result.base64_data(), "AAEC");
        assert_eq!(result.decode().unwrap(), vec![0u8, 1, 2]);
        assert_eq!(result.file_extension(), "jpg");
    }

    #[test]
    fn test_image_result_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let result = ImageResult::new("image/png", "AAEC", "m");
        assert_eq!(result.save(&path).unwrap(), 3);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn test_image_result_save_creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-yet-created").join("nested").join("out.png");
        let result = ImageResult::new("image/png", "AAEC", "m");
        assert_eq!(result.save(&path).unwrap(), 3);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn test_image_result_rejects_bad_base64() {
        let result = ImageResult::new("image/png", "not base64!!", "m");
        assert!(result.decode().is_err());
    }
}
