pub mod cycle_predictor;
pub mod mood_energy;
pub mod nutrition;
pub mod smart_insight;
pub mod symptom_analyzer;

pub use cycle_predictor::CyclePredictor;
pub use mood_energy::MoodEnergyTool;
pub use nutrition::NutritionTool;
pub use smart_insight::SmartInsightTool;
pub use symptom_analyzer::SymptomAnalyzer;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ToolError;

/// A deterministic calculator the LLM can invoke by name.
///
/// Not object-safe (associated types); the dispatcher calls tools by
/// concrete type, not `dyn Tool`.
pub trait Tool: Send + Sync {
    type Args: DeserializeOwned;
    type Output: Serialize;

    /// Name the LLM uses in `{"tool": ...}`.
    fn name(&self) -> &'static str;

    /// Key under which the raw result is attached to the HTTP response.
    fn result_key(&self) -> &'static str;

    fn run(&self, args: &Self::Args) -> Result<Self::Output, ToolError>;

    /// Render a result as the chat reply shown to the user.
    fn format(&self, args: &Self::Args, output: &Self::Output) -> String;
}

/// True when the lower-cased `text` contains any of `keywords`.
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Horizontal rule used by the formatters.
pub(crate) fn rule(width: usize) -> String {
    "=".repeat(width)
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any() {
        assert!(contains_any("severe cramps", &["pain", "cramp"]));
        assert!(!contains_any("bloating", &["pain", "cramp"]));
        assert!(!contains_any("anything", &[]));
    }
}
