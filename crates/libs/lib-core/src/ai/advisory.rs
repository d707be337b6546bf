//! # Advisory Tools
//!
//! Soil card analysis, leaf disease detection and mandi price prediction.
//!
//! Every operation goes through [`ResilientCall`], so callers always receive a
//! payload of the right shape: live when the backend answered with usable JSON,
//! canned (with `is_demo = true`) otherwise.
//!
//! | Operation        | Model                      | Demo delay | Timeout |
//! |------------------|----------------------------|------------|---------|
//! | `analyze_soil`   | `gemini-2.5-flash`         | 2 s        | none    |
//! | `check_leaf`     | `gemini-2.5-flash-image`   | 2.5 s      | 15 s    |
//! | `predict_price`  | `gemini-2.5-flash`         | 1.5 s      | none    |

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use serde::Deserialize;
use shared::{
    DiseaseResult, Locale, PriceHistoryPoint, PricePrediction, Recommendation, SoilReport, Trend,
};

use super::gemini::{AiBackend, Content, GenerateRequest, Part, TEXT_MODEL, VISION_MODEL};
use super::json::parse_answer;
use crate::canned;
use crate::error::{CoreError, Result};
use crate::resilient::{Outcome, ResilientCall};

pub const SOIL_DEMO_DELAY: Duration = Duration::from_millis(2000);
pub const LEAF_DEMO_DELAY: Duration = Duration::from_millis(2500);
pub const LEAF_TIMEOUT: Duration = Duration::from_secs(15);
pub const PRICE_DEMO_DELAY: Duration = Duration::from_millis(1500);

/// Crops offered by the price tool as `(value, picker label)`.
pub const CROPS: &[(&str, &str)] = &[
    ("Wheat", "Wheat (Gehu)"),
    ("Rice", "Rice (Dhan)"),
    ("Soybean", "Soybean"),
    ("Mustard", "Mustard (Sarso)"),
    ("Cotton", "Cotton (Kapas)"),
    ("Onion", "Onion (Pyaaz)"),
];

/// A soil health card as picked by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SoilInput {
    /// Plain text or CSV contents
    Text(String),
    /// PDF or image, base64 encoded
    Inline { mime_type: String, data: String },
}

pub struct AdvisoryService {
    backend: Option<Arc<dyn AiBackend>>,
}

impl AdvisoryService {
    /// `None` runs every tool in demo mode.
    pub fn new(backend: Option<Arc<dyn AiBackend>>) -> Self {
        Self { backend }
    }

    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    // ========== Soil ==========

    pub async fn analyze_soil(&self, input: SoilInput, locale: Locale) -> Outcome<SoilReport> {
        let live = self
            .backend
            .as_ref()
            .map(|backend| soil_live(backend.clone(), input, locale));

        ResilientCall::new("soil")
            .demo_delay(SOIL_DEMO_DELAY)
            .run(live, || canned::soil_report(locale))
            .await
    }

    // ========== Leaf ==========

    /// Check a base64 encoded photo.
    pub async fn check_leaf(&self, image_b64: String, mime_type: &str, locale: Locale) -> Outcome<DiseaseResult> {
        let live = self
            .backend
            .as_ref()
            .map(|backend| leaf_live(backend.clone(), image_b64, mime_type.to_string(), locale));

        ResilientCall::new("leaf")
            .timeout(LEAF_TIMEOUT)
            .demo_delay(LEAF_DEMO_DELAY)
            .run(live, || canned::leaf_result(locale))
            .await
    }

    // ========== Price ==========

    /// Predict the mandi price of `crop` in `district` for the named month.
    pub async fn predict_price(&self, crop: &str, district: &str, month: &str) -> Outcome<PricePrediction> {
        let live = self.backend.as_ref().map(|backend| {
            price_live(
                backend.clone(),
                crop.trim().to_string(),
                district.trim().to_string(),
                month.to_string(),
            )
        });

        ResilientCall::new("price")
            .demo_delay(PRICE_DEMO_DELAY)
            .run_split(
                live,
                || canned::price_demo(crop, district),
                || canned::price_failure(crop, district),
            )
            .await
    }
}

async fn soil_live(backend: Arc<dyn AiBackend>, input: SoilInput, locale: Locale) -> Result<SoilReport> {
    let card = match &input {
        SoilInput::Text(text) => text.as_str(),
        SoilInput::Inline { .. } => "(see the attached soil health card)",
    };
    let prompt = format!(
        "You are an expert Indian Agronomist. Analyze this soil health card data:\n\
         {card}\n\n\
         Current User Language: {lang}.\n\n\
         Provide the response in JSON format.\n\
         IMPORTANT: If the user language is Hindi, translate all text fields (advice, analysis, crop names) to Hindi.\n\n\
         Structure:\n\
         {{\n  \"soil_type\": \"string\",\n  \"crop_recommendations\": [\"string\", \"string\", \"string\"],\n  \
         \"fertilizer_advice\": \"string\",\n  \"gemini_analysis\": \"string (short summary)\"\n}}",
        lang = locale.prompt_name(),
    );

    let mut parts = Vec::new();
    if let SoilInput::Inline { mime_type, data } = input {
        parts.push(Part::inline(mime_type, data));
    }
    parts.push(Part::text(prompt));

    let request = GenerateRequest {
        contents: vec![Content::user(parts)],
        ..Default::default()
    }
    .json_response();

    let response = backend.generate(TEXT_MODEL, &request).await?;
    let mut report: SoilReport = parse_answer(&response.text())?;
    if report.soil_type.trim().is_empty() && report.crop_recommendations.is_empty() {
        return Err(CoreError::Decode("soil answer has no content".to_string()));
    }
    report.is_demo = false;
    Ok(report)
}

/// Leaf answer as the model sends it; confidence may be fractional.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct LeafAnswer {
    is_leaf: bool,
    disease_name: String,
    confidence: f64,
    treatment_en: String,
    treatment_hi: String,
    is_healthy: bool,
}

impl Default for LeafAnswer {
    fn default() -> Self {
        Self {
            is_leaf: true,
            disease_name: String::new(),
            confidence: 0.0,
            treatment_en: String::new(),
            treatment_hi: String::new(),
            is_healthy: false,
        }
    }
}

async fn leaf_live(
    backend: Arc<dyn AiBackend>,
    image_b64: String,
    mime_type: String,
    locale: Locale,
) -> Result<DiseaseResult> {
    let lang = locale.pick("English", "Hindi");
    let prompt = format!(
        "Analyze this image. Is it a plant leaf?\n\
         If NO, return {{\"is_leaf\": false}}.\n\
         If YES, identify any disease. If healthy, say \"Healthy\".\n\n\
         Current User Language: {lang}.\n\n\
         Strictly Output RAW JSON only.\n\
         Structure:\n\
         {{\n  \"is_leaf\": boolean,\n  \"disease_name\": \"string (In {lang})\",\n  \
         \"confidence\": number (0-100),\n  \"treatment_en\": \"string (Always English)\",\n  \
         \"treatment_hi\": \"string (Always Hindi translation)\",\n  \"is_healthy\": boolean\n}}"
    );

    let request = GenerateRequest {
        contents: vec![Content::user(vec![
            Part::inline(mime_type, lib_utils::strip_data_url(&image_b64)),
            Part::text(prompt),
        ])],
        ..Default::default()
    };

    let response = backend.generate(VISION_MODEL, &request).await?;
    let answer: LeafAnswer = parse_answer(&response.text())?;

    Ok(DiseaseResult {
        is_leaf: answer.is_leaf,
        disease_name: answer.disease_name,
        confidence: answer.confidence.round().clamp(0.0, 100.0) as u8,
        treatment_en: answer.treatment_en,
        treatment_hi: answer.treatment_hi,
        is_healthy: answer.is_healthy,
        is_demo: false,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PriceAnswer {
    current_price: Option<f64>,
    predicted_price: Option<f64>,
    trend: Option<String>,
    recommendation: Option<String>,
    nearest_mandi: Option<String>,
}

async fn price_live(
    backend: Arc<dyn AiBackend>,
    crop: String,
    district: String,
    month: String,
) -> Result<PricePrediction> {
    let prompt = format!(
        "Predict market trend for {crop} in {district} for {month}.\n\
         Return JSON:\n\
         {{\n  \"current_price\": number,\n  \"predicted_price\": number,\n  \
         \"trend\": \"up\" | \"down\" | \"stable\",\n  \"recommendation\": \"sell\" | \"hold\",\n  \
         \"nearest_mandi\": \"string\"\n}}"
    );

    let response = backend
        .generate(TEXT_MODEL, &GenerateRequest::prompt(prompt).json_response())
        .await?;
    let answer: PriceAnswer = parse_answer(&response.text())?;

    let positive = |price: Option<f64>| price.filter(|p| p.is_finite() && *p > 0.0);
    let trend = match answer.trend.as_deref().map(str::trim) {
        Some("up") => Trend::Up,
        Some("down") => Trend::Down,
        _ => Trend::Stable,
    };
    let recommendation = match answer.recommendation.as_deref().map(str::trim) {
        Some("sell") => Recommendation::Sell,
        _ => Recommendation::Hold,
    };

    Ok(PricePrediction {
        crop,
        current_price: positive(answer.current_price).unwrap_or(2000.0),
        predicted_price: positive(answer.predicted_price).unwrap_or(2100.0),
        trend,
        recommendation,
        nearest_mandi: answer
            .nearest_mandi
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(district),
        is_demo: false,
    })
}

/// Six months of simulated prices before `today`'s month, each within ±10 % of `base`.
pub fn price_history(base: f64, today: NaiveDate, rng: &mut impl Rng) -> Vec<PriceHistoryPoint> {
    lib_utils::trailing_month_labels(today, 6)
        .into_iter()
        .map(|month| {
            let fluctuation = rng.random_range(-0.1..0.1);
            PriceHistoryPoint {
                month,
                price: (base * (1.0 + fluctuation)).round(),
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::super::gemini::{GenerateResponse, GenerateRequest};
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Backend replaying scripted responses and recording every request.
    pub struct ScriptedBackend {
        pub replies: Mutex<VecDeque<Result<GenerateResponse>>>,
        pub requests: Mutex<Vec<(String, GenerateRequest)>>,
    }

    impl ScriptedBackend {
        pub fn new(replies: Vec<Result<GenerateResponse>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn text(text: &str) -> Result<GenerateResponse> {
            Ok(serde_json::from_value(serde_json::json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
            }))?)
        }
    }

    #[async_trait]
    impl AiBackend for ScriptedBackend {
        async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
            self.requests.lock().push((model.to_string(), request.clone()));
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(CoreError::Network("no scripted reply".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::ScriptedBackend;
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn demo() -> AdvisoryService {
        AdvisoryService::new(None)
    }

    // ========== Soil Tests ==========

    #[tokio::test(start_paused = true)]
    async fn test_soil_demo_hindi() {
        let start = tokio::time::Instant::now();
        let outcome = demo()
            .analyze_soil(SoilInput::Text("N=240 P=12 K=180 pH=6.1".into()), Locale::Hi)
            .await;

        assert!(start.elapsed() >= SOIL_DEMO_DELAY);
        let report = outcome.into_inner();
        assert_eq!(report.soil_type, "दोमट");
        assert_eq!(report.crop_recommendations, vec!["गेहूं", "सोयाबीन", "सरसों"]);
        assert!(report.is_demo);
    }

    #[tokio::test]
    async fn test_soil_live_with_inline_card() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text(
            "```json\n{\"soil_type\":\"Black Cotton\",\"crop_recommendations\":[\"Cotton\"],\"fertilizer_advice\":\"Gypsum\",\"gemini_analysis\":\"High clay\"}\n```",
        )]);
        let service = AdvisoryService::new(Some(backend.clone()));

        let outcome = service
            .analyze_soil(
                SoilInput::Inline { mime_type: "application/pdf".into(), data: "JVBERi0=".into() },
                Locale::En,
            )
            .await;

        assert!(!outcome.is_canned());
        assert_eq!(outcome.into_inner().analysis, "High clay");

        let requests = backend.requests.lock();
        let (model, request) = &requests[0];
        assert_eq!(model, TEXT_MODEL);
        let parts = &request.contents[0].parts;
        assert_eq!(parts[0].inline_data.as_ref().unwrap().mime_type, "application/pdf");
        assert!(parts[1].text.as_ref().unwrap().contains("Current User Language: English"));
    }

    #[tokio::test]
    async fn test_soil_malformed_answer_is_canned() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text("Sorry, I cannot read this.")]);
        let outcome = AdvisoryService::new(Some(backend))
            .analyze_soil(SoilInput::Text("pH 7".into()), Locale::En)
            .await;
        assert_eq!(outcome, Outcome::Canned(canned::soil_report(Locale::En)));
    }

    // ========== Leaf Tests ==========

    #[tokio::test(start_paused = true)]
    async fn test_leaf_demo() {
        let result = demo()
            .check_leaf("QUJD".into(), "image/jpeg", Locale::En)
            .await
            .into_inner();
        assert!(!result.is_healthy);
        assert_eq!(result.disease_name, "Leaf Blight");
        assert_eq!(result.confidence, 87);
    }

    #[tokio::test]
    async fn test_leaf_not_a_leaf() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text("{\"is_leaf\": false}")]);
        let result = AdvisoryService::new(Some(backend.clone()))
            .check_leaf("data:image/png;base64,QUJD".into(), "image/png", Locale::En)
            .await
            .into_inner();

        assert!(!result.is_leaf);
        assert!(!result.is_demo);
        let requests = backend.requests.lock();
        assert_eq!(requests[0].0, VISION_MODEL);
        assert_eq!(requests[0].1.contents[0].parts[0].inline_data.as_ref().unwrap().data, "QUJD");
    }

    #[tokio::test]
    async fn test_leaf_fractional_confidence() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text(
            "{\"is_leaf\":true,\"disease_name\":\"Rust\",\"confidence\":91.6,\"is_healthy\":false}",
        )]);
        let result = AdvisoryService::new(Some(backend))
            .check_leaf("QUJD".into(), "image/jpeg", Locale::En)
            .await
            .into_inner();
        assert_eq!(result.confidence, 92);
    }

    // ========== Price Tests ==========

    #[tokio::test(start_paused = true)]
    async fn test_price_demo_wheat_indore() {
        let outcome = demo().predict_price("Wheat", "Indore", "October").await;
        let price = outcome.into_inner();
        assert_eq!(price.current_price, 2250.0);
        assert_eq!(price.nearest_mandi, "Indore");
        assert!(price.is_demo);
    }

    #[tokio::test]
    async fn test_price_live_defaults_missing_fields() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text(
            "{\"current_price\": 0, \"trend\": \"sideways\", \"recommendation\": \"sell\"}",
        )]);
        let price = AdvisoryService::new(Some(backend.clone()))
            .predict_price("Onion", "Nashik", "October")
            .await
            .into_inner();

        assert_eq!(price.current_price, 2000.0);
        assert_eq!(price.predicted_price, 2100.0);
        assert_eq!(price.trend, Trend::Stable);
        assert_eq!(price.recommendation, Recommendation::Sell);
        assert_eq!(price.nearest_mandi, "Nashik");
        assert!(!price.is_demo);

        let prompt = backend.requests.lock()[0].1.contents[0].parts[0].text.clone().unwrap();
        assert!(prompt.contains("Onion in Nashik for October"));
    }

    #[tokio::test]
    async fn test_price_backend_failure_echoes_inputs() {
        let backend = ScriptedBackend::new(vec![Err(CoreError::Http { status: 500, message: "boom".into() })]);
        let price = AdvisoryService::new(Some(backend))
            .predict_price("Cotton", "Khargone", "October")
            .await;
        assert!(price.is_canned());
        let price = price.into_inner();
        assert_eq!(price.crop, "Cotton");
        assert_eq!(price.nearest_mandi, "Khargone");
    }

    #[test]
    fn test_price_history_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let history = price_history(2250.0, today, &mut rng);

        let months: Vec<&str> = history.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["Apr", "May", "Jun", "Jul", "Aug", "Sep"]);
        for point in &history {
            assert!(point.price >= 2025.0 && point.price <= 2475.0, "{}", point.price);
        }
    }
}
