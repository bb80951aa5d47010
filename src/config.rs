use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TRANSFORM_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GENERATE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_ANALYZE_MODEL: &str = "gemini-3-pro-preview";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub transform_model: Option<String>,
    pub generate_model: Option<String>,
    pub analyze_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
            transform_model: None,
            generate_model: None,
            analyze_model: None,
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `GEMINI_API_KEY` (or `API_KEY`) plus the optional endpoint and model overrides.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty());
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let transform_model = env::var("POKEMORPH_TRANSFORM_MODEL").ok();
        let generate_model = env::var("POKEMORPH_GENERATE_MODEL").ok();
        let analyze_model = env::var("POKEMORPH_ANALYZE_MODEL").ok();
        let timeout_secs = env::var("POKEMORPH_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| parse_timeout_secs(&raw));

        GeminiConfig {
            api_key,
            base_url,
            transform_model,
            generate_model,
            analyze_model,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_models(
        mut self,
        transform: impl Into<String>,
        generate: impl Into<String>,
        analyze: impl Into<String>,
    ) -> Self {
        self.transform_model = Some(transform.into());
        self.generate_model = Some(generate.into());
        self.analyze_model = Some(analyze.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn transform_model(&self) -> &str {
        self.transform_model
            .as_deref()
            .unwrap_or(DEFAULT_TRANSFORM_MODEL)
    }

    pub fn generate_model(&self) -> &str {
        self.generate_model
            .as_deref()
            .unwrap_or(DEFAULT_GENERATE_MODEL)
    }

    pub fn analyze_model(&self) -> &str {
        self.analyze_model.as_deref().unwrap_or(DEFAULT_ANALYZE_MODEL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Key with everything but the first four characters hidden, for logging.
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if key.chars().count() > 4 => {
                format!("{}****", key.chars().take(4).collect::<String>())
            }
            Some(_) => "****".to_string(),
            None => "<unset>".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: Option<GeminiConfig>,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: None,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let output_dir = env::var("POKEMORPH_OUTPUT_DIR").ok().map(PathBuf::from);

        Config {
            gemini: Some(GeminiConfig::from_env()),
            output_dir,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// A timeout of zero would fail every request, so it is treated as unset.
fn parse_timeout_secs(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            log::warn!("POKEMORPH_TIMEOUT_SECS=0 ignored, requests will not time out");
            None
        }
        Ok(secs) => Some(secs),
        Err(e) => {
            log::warn!("Invalid POKEMORPH_TIMEOUT_SECS '{}': {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::new();
        assert!(!config.has_api_key());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.transform_model(), "gemini-2.5-flash-image");
        assert_eq!(config.generate_model(), "gemini-3-pro-image-preview");
        assert_eq!(config.analyze_model(), "gemini-3-pro-preview");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeminiConfig::new()
            .with_api_key("AIzaSecret")
            .with_base_url("http://localhost:8080/v1beta/")
            .with_models("t", "g", "a")
            .with_timeout(30);

        assert!(config.has_api_key());
        assert_eq!(config.base_url(), "http://localhost:8080/v1beta");
        assert_eq!(config.transform_model(), "t");
        assert_eq!(config.generate_model(), "g");
        assert_eq!(config.analyze_model(), "a");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout_secs("45"), Some(45));
        assert_eq!(parse_timeout_secs(" 5 "), Some(5));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
        assert_eq!(parse_timeout_secs("-3"), None);
        assert!(GeminiConfig::new().with_timeout(0).timeout().is_none());
    }

    #[test]
    fn test_masked_api_key() {
        assert_eq!(GeminiConfig::new().masked_api_key(), "<unset>");
        assert_eq!(
            GeminiConfig::new().with_api_key("AIzaSecret").masked_api_key(),
            "AIza****"
        );
        assert_eq!(GeminiConfig::new().with_api_key("ab").masked_api_key(), "****");
    }

    #[test]
    fn test_blank_key_is_not_a_key() {
        assert!(!GeminiConfig::new().with_api_key("   ").has_api_key());
    }

    #[test]
    fn test_output_dir_defaults_to_cwd() {
        assert_eq!(Config::new().output_dir(), PathBuf::from("."));
        assert_eq!(
            Config::new().with_output_dir("/tmp/out").output_dir(),
            PathBuf::from("/tmp/out")
        );
    }
}
