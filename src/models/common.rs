use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub operation: Operation,
    pub category: ModelCategory,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Image,
    Vision,
}

/// The three things a user can ask the service for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Transform,
    Generate,
    Analyze,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Transform => "transform",
            Operation::Generate => "generate",
            Operation::Analyze => "analyze",
        }
    }
}
