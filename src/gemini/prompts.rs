//! Fixed prompt templates sent alongside user input.

pub const ANALYZE_PROMPT: &str = "Analyze this image.
1. If there is a person, describe what kind of Pokémon Trainer they would be and suggest a signature Pokémon that matches their vibe/clothing.
2. If there is an object or animal, describe it in the style of a Pokédex entry (Name, Type, Description).
Return the result as a markdown formatted string with bold headers.";

pub fn transform_prompt(target_name: &str, extra_instruction: Option<&str>) -> String {
    let mut prompt = format!(
        "Transform the person or subject in this image into a {}.\n",
        target_name
    );

    if let Some(extra) = extra_instruction.map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("Additional details: {}.\n", extra));
    }

    prompt.push_str(&format!(
        "\nCRITICAL INSTRUCTION: Morph the subject's anatomy and body structure to match the species of {}.\n\
         - Completely alter the skin texture (fur, scales, smooth skin), head shape, and facial features to resemble the Pokémon.\n\
         - Adjust limb proportions and add necessary appendages (tails, wings, horns, ears) that define the Pokémon.\n\
         - STRICTLY maintain the original pose, gesture, and composition of the source image.\n\
         - The goal is a photorealistic or high-quality cinematic image where the subject appears to BE the Pokémon, not a human wearing a costume.",
        target_name
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_prompt_names_target_twice() {
        let prompt = transform_prompt("Pikachu", None);
        assert!(prompt.starts_with("Transform the person or subject in this image into a Pikachu."));
        assert!(prompt.contains("match the species of Pikachu."));
        assert!(!prompt.contains("Additional details"));
    }

    #[test]
    fn test_transform_prompt_with_instruction() {
        let prompt = transform_prompt("Gengar", Some("make it spooky"));
        assert!(prompt.contains("Additional details: make it spooky."));
    }

    #[test]
    fn test_transform_prompt_ignores_blank_instruction() {
        assert_eq!(transform_prompt("Eevee", Some("  ")), transform_prompt("Eevee", None));
    }

    #[test]
    fn test_analyze_prompt_asks_for_markdown() {
        assert!(ANALYZE_PROMPT.contains("Pokédex entry"));
        assert!(ANALYZE_PROMPT.contains("markdown"));
    }
}
