//! PokeMorph: turn photos into Pokémon, generate Pokémon art and scan images
//! for Pokémon content through the Gemini `generateContent` API.

pub mod config;
pub mod error;
pub mod gemini;
pub mod input;
pub mod logger;
pub mod models;

pub use config::{Config, GeminiConfig};
pub use error::{PokeMorphError, Result};
pub use gemini::{
    GeminiClient, GenerativeTransport, HttpTransport, ImageClient, TransformClient, VisionClient,
};
pub use models::{
    AnalysisResult, AnalyzeRequest, AspectRatio, GenerateRequest, ImagePayload, ImageResult,
    ImageSize, TransformRequest,
};
