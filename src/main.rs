use clap::{Parser, Subcommand};
use colored::*;
use pokemorph::{
    input,
    logger::{self, LogLevel, LoggerConfig},
    models::{resolve_target_name, ANALYSIS_FALLBACK, POKEMON_LIST, SAMPLE_PROMPTS},
    AnalysisResult, AnalyzeRequest, AspectRatio, Config, GeminiClient, GeminiConfig, GenerateRequest, ImageResult,
    ImageSize, PokeMorphError, Result, TransformRequest,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pokemorph")]
#[command(author, version, about = "Turn photos into Pokémon with Gemini", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Morph the subject of a photo into a Pokémon
    Transform {
        /// Source image (JPG, PNG, WebP, GIF)
        image: PathBuf,
        /// Pokémon to become (see `pokemorph pokemon`)
        #[arg(short, long)]
        pokemon: Option<String>,
        /// Extra details; used as the target name when no Pokémon is given
        #[arg(short, long)]
        instruction: Option<String>,
        /// Where to write the result
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an image from a text prompt
    Generate {
        prompt: String,
        /// 1:1, 9:16, 16:9, 21:9, 4:3 or 3:4
        #[arg(short, long, default_value = "1:1")]
        aspect_ratio: AspectRatio,
        /// 1K, 2K or 4K
        #[arg(short, long, default_value = "1K")]
        size: ImageSize,
        /// Where to write the result
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Describe an image as a trainer profile or Pokédex entry
    Analyze {
        image: PathBuf,
    },

    /// List the built-in Pokémon
    Pokemon,

    /// Show sample generation prompts
    Prompts,

    /// Show which model serves each operation
    Models,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut log_config = LoggerConfig::new()
        .with_level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        })
        .with_json_output(cli.json_logs);
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file_output(path);
    }
    if let Err(e) = logger::init_with_config(log_config) {
        eprintln!("{}", e);
    }

    logger::log_startup_info("PokeMorph", env!("CARGO_PKG_VERSION"));

    match dotenv::dotenv() {
        Ok(path) => log::debug!("✅ Loaded {}", path.display()),
        Err(_) => log::debug!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    if let Err(e) = run(cli.command, config).await {
        report_failure(&e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: Config) -> Result<()> {
    let gemini_config = config.gemini.clone().unwrap_or_else(GeminiConfig::from_env);

    match command {
        Commands::Transform {
            image,
            pokemon,
            instruction,
            output,
        } => {
            let source_image = input::encode_file(&image)?;
            let selected = pokemon.as_deref().map(resolve_target_name);
            let request = TransformRequest::from_selection(
                source_image,
                selected.as_deref(),
                instruction.as_deref(),
            )?;

            let client = GeminiClient::new(gemini_config)?;
            let _timer = logger::timer("transform");
            let result = client.transform().transform(request).await?;
            save_result(&result, output, &config, "transform")
        }
        Commands::Generate {
            prompt,
            aspect_ratio,
            size,
            output,
        } => {
            let request = GenerateRequest::new(prompt)
                .with_aspect_ratio(aspect_ratio)
                .with_resolution(size);

            let client = GeminiClient::new(gemini_config)?;
            let _timer = logger::timer("generate");
            let result = client.image().generate(request).await?;
            save_result(&result, output, &config, "generate")
        }
        Commands::Analyze { image } => {
            let source_image = input::encode_file(&image)?;
            let client = GeminiClient::new(gemini_config)?;
            let _timer = logger::timer("analyze");

            let outcome = client.vision().analyze(AnalyzeRequest::new(source_image)).await;
            println!("{}", analysis_text(outcome)?);
            Ok(())
        }
        Commands::Pokemon => {
            for pokemon in POKEMON_LIST {
                println!(
                    "{:<12} {:<12} {}",
                    pokemon.id,
                    pokemon.name.bold(),
                    pokemon.types.join(" / ")
                );
            }
            Ok(())
        }
        Commands::Prompts => {
            for prompt in SAMPLE_PROMPTS {
                println!("{}", prompt);
            }
            Ok(())
        }
        Commands::Models => {
            for model in GeminiClient::supported_models(&gemini_config) {
                println!(
                    "{:<10} {:<28} {}",
                    model.operation.as_str(),
                    model.id,
                    model.description
                );
            }
            Ok(())
        }
    }
}

fn save_result(
    result: &ImageResult,
    output: Option<PathBuf>,
    config: &Config,
    operation: &str,
) -> Result<()> {
    let path = output.unwrap_or_else(|| default_output_path(&config.output_dir(), operation, result));
    result.save(&path)?;
    println!("{}", path.display());
    Ok(())
}

fn default_output_path(dir: &Path, operation: &str, result: &ImageResult) -> PathBuf {
    dir.join(format!(
        "pokemorph_{}_{}.{}",
        operation,
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        result.file_extension()
    ))
}

/// An empty analysis still prints something.
fn analysis_text(outcome: Result<AnalysisResult>) -> Result<String> {
    match outcome {
        Ok(analysis) => Ok(analysis.text),
        Err(PokeMorphError::EmptyAnalysis) => Ok(ANALYSIS_FALLBACK.to_string()),
        Err(e) => Err(e),
    }
}

const KEY_HINT: &str = "Connect a valid Gemini API key (GEMINI_API_KEY). Pro models need a paid Google Cloud project: https://ai.google.dev/gemini-api/docs/billing";
const EMPTY_RESULT_HINT: &str = "The model answered without an image. Try again or rephrase.";

fn failure_hint(error: &PokeMorphError) -> Option<&'static str> {
    if error.is_credential_error() || matches!(error, PokeMorphError::ConfigError(_)) {
        Some(KEY_HINT)
    } else if error.is_empty_result() {
        Some(EMPTY_RESULT_HINT)
    } else {
        None
    }
}

fn report_failure(error: &PokeMorphError) {
    eprintln!("{} {}", "✖".red().bold(), error.to_string().red());
    if let Some(hint) = failure_hint(error) {
        eprintln!("{}", hint.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_text_falls_back_when_empty() {
        let text = analysis_text(Err(PokeMorphError::EmptyAnalysis)).unwrap();
        assert_eq!(text, "Could not analyze image.");

        let analysis = AnalysisResult {
            text: "**Type:** Grass".to_string(),
            model: "gemini-3-pro-preview".to_string(),
        };
        assert_eq!(analysis_text(Ok(analysis)).unwrap(), "**Type:** Grass");
    }

    #[test]
    fn test_analysis_text_keeps_other_errors() {
        let err = analysis_text(Err(PokeMorphError::ApiError {
            status: 500,
            message: "boom".to_string(),
        }))
        .unwrap_err();
        assert!(matches!(err, PokeMorphError::ApiError { status: 500, .. }));
    }

    #[test]
    fn test_failure_hints() {
        let unauthorized = PokeMorphError::ApiError {
            status: 403,
            message: "PERMISSION_DENIED".to_string(),
        };
        assert_eq!(failure_hint(&unauthorized), Some(KEY_HINT));
        assert_eq!(
            failure_hint(&PokeMorphError::ConfigError("no key".to_string())),
            Some(KEY_HINT)
        );
        assert_eq!(
            failure_hint(&PokeMorphError::NoImageProduced),
            Some(EMPTY_RESULT_HINT)
        );
        assert_eq!(
            failure_hint(&PokeMorphError::RequestError("timed out".to_string())),
            None
        );
    }

    #[test]
    fn test_default_output_path() {
        let result = ImageResult::new("image/jpeg", "AAEC", "gemini-2.5-flash-image");
        let path = default_output_path(Path::new("/tmp/morphs"), "transform", &result);

        assert_eq!(path.parent(), Some(Path::new("/tmp/morphs")));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("pokemorph_transform_"));
        assert!(name.ends_with(".jpg"));
        // pokemorph_transform_YYYYmmdd_HHMMSS.jpg
        assert_eq!(name.len(), "pokemorph_transform_".len() + 15 + ".jpg".len());
    }

    #[test]
    fn test_save_result_into_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().with_output_dir(dir.path().join("renders"));
        let result = ImageResult::new("image/png", "AAEC", "gemini-3-pro-image-preview");

        save_result(&result, None, &config, "generate").unwrap();

        let saved: Vec<_> = std::fs::read_dir(dir.path().join("renders"))
            .unwrap()
            .collect();
        assert_eq!(saved.len(), 1);
    }
}
