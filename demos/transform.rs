use pokemorph::{input, GeminiClient, GeminiConfig, TransformRequest};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pokemorph::logger::init()?;
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }

    let image_path = env::args().nth(1).ok_or("usage: transform <image> [pokemon]")?;
    let pokemon = env::args().nth(2).unwrap_or_else(|| "Pikachu".to_string());

    let client = GeminiClient::new(GeminiConfig::from_env())?;
    let source_image = input::encode_file(&image_path)?;

    let request = TransformRequest::new(source_image, pokemon.clone())
        .with_instruction("standing in tall grass at golden hour");

    let result = client.transform().transform(request).await?;
    let filename = format!("{}_morph.{}", pokemon.to_lowercase(), result.file_extension());
    result.save(&filename)?;
    println!("{}", filename);

    Ok(())
}
