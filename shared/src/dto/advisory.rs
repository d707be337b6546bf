//! # Advisory Results
//!
//! Results of the three AI-backed tools: soil health card analysis, leaf disease
//! check and mandi price prediction (Fasaldaam).
//!
//! Each result carries `is_demo` so screens can flag canned payloads to the farmer.

use serde::{Deserialize, Serialize};

/// Soil health card analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilReport {
    pub soil_type: String,
    /// Exactly three crops when produced by the canned payload
    pub crop_recommendations: Vec<String>,
    pub fertilizer_advice: String,
    /// Short summary; the AI answer names this key `gemini_analysis`
    #[serde(alias = "gemini_analysis")]
    pub analysis: String,
    pub is_demo: bool,
}

fn default_is_leaf() -> bool {
    true
}

/// Leaf disease detection result.
///
/// A model that decides the image is not a leaf answers only `{"is_leaf": false}`,
/// so every other field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseResult {
    #[serde(default = "default_is_leaf")]
    pub is_leaf: bool,
    pub disease_name: String,
    /// 0-100
    pub confidence: u8,
    pub treatment_en: String,
    pub treatment_hi: String,
    pub is_healthy: bool,
    pub is_demo: bool,
}

impl Default for DiseaseResult {
    fn default() -> Self {
        Self {
            is_leaf: true,
            disease_name: String::new(),
            confidence: 0,
            treatment_en: String::new(),
            treatment_hi: String::new(),
            is_healthy: false,
            is_demo: false,
        }
    }
}

/// Expected price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

/// Advice for the farmer holding the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Sell,
    #[default]
    Hold,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Sell => "sell",
            Recommendation::Hold => "hold",
        }
    }
}

/// Mandi price prediction in ₹ per quintal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub crop: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub trend: Trend,
    pub recommendation: Recommendation,
    pub nearest_mandi: String,
    pub is_demo: bool,
}

impl PricePrediction {
    /// Predicted change relative to the current price, in percent.
    pub fn change_percent(&self) -> f64 {
        if self.current_price == 0.0 {
            return 0.0;
        }
        (self.predicted_price - self.current_price) / self.current_price * 100.0
    }
}

/// One month of the simulated price history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryPoint {
    /// Short month label such as `Mar`
    pub month: String,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_result_not_a_leaf_defaults() {
        let result: DiseaseResult = serde_json::from_str(r#"{"is_leaf": false}"#).unwrap();
        assert!(!result.is_leaf);
        assert!(result.disease_name.is_empty());
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn test_disease_result_missing_is_leaf_means_leaf() {
        let result: DiseaseResult =
            serde_json::from_str(r#"{"disease_name": "Rust", "confidence": 70}"#).unwrap();
        assert!(result.is_leaf);
        assert_eq!(result.disease_name, "Rust");
    }

    #[test]
    fn test_trend_and_recommendation_wire_names() {
        let trend: Trend = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(trend, Trend::Up);
        assert_eq!(serde_json::to_string(&Recommendation::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_change_percent() {
        let prediction = PricePrediction {
            crop: "Wheat".to_string(),
            current_price: 2000.0,
            predicted_price: 2100.0,
            trend: Trend::Up,
            recommendation: Recommendation::Hold,
            nearest_mandi: "Indore".to_string(),
            is_demo: false,
        };
        assert!((prediction.change_percent() - 5.0).abs() < f64::EPSILON);
    }
}
