use thiserror::Error;

#[derive(Debug, Error)]
pub enum PokeMorphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("No image generated.")]
    NoImageProduced,
    #[error("The model returned no analysis text")]
    EmptyAnalysis,
    #[error("Image input error: {0}")]
    ImageInputError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PokeMorphError {
    /// True when the service rejected the API key or the key cannot reach the model.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            PokeMorphError::ApiError {
                status: 401 | 403 | 404,
                ..
            }
        )
    }

    /// True when the request went through but the model returned nothing usable.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            PokeMorphError::NoImageProduced | PokeMorphError::EmptyAnalysis
        )
    }
}

pub type Result<T> = std::result::Result<T, PokeMorphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors() {
        let err = PokeMorphError::ApiError {
            status: 404,
            message: "models/x is not found".into(),
        };
        assert!(err.is_credential_error());
        assert!(!err.is_empty_result());

        let quota = PokeMorphError::ApiError {
            status: 429,
            message: "quota".into(),
        };
        assert!(!quota.is_credential_error());
    }

    #[test]
    fn test_empty_result_errors() {
        assert!(PokeMorphError::NoImageProduced.is_empty_result());
        assert!(PokeMorphError::EmptyAnalysis.is_empty_result());
        assert_eq!(
            PokeMorphError::NoImageProduced.to_string(),
            "No image generated."
        );
    }
}
