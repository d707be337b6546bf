//! # Canned Payloads
//!
//! Fixed results returned in demo mode or when a live call fails. Each payload is
//! built for one locale and carries no text from the other, except the leaf
//! treatment which has dedicated English and Hindi fields.

use shared::{
    DiseaseResult, Locale, PricePrediction, Recommendation, SoilReport, Trend, WeatherSnapshot,
};

pub const DEMO_CURRENT_PRICE: f64 = 2250.0;
pub const DEMO_PREDICTED_PRICE: f64 = 2310.0;

pub fn soil_report(locale: Locale) -> SoilReport {
    match locale {
        Locale::En => SoilReport {
            soil_type: "Loamy".to_string(),
            crop_recommendations: vec![
                "Wheat".to_string(),
                "Soybean".to_string(),
                "Mustard".to_string(),
            ],
            fertilizer_advice: "Urea 50kg/acre + DAP 25kg/acre. Add organic compost.".to_string(),
            analysis: "The soil appears fertile but slightly acidic. Requires lime treatment for optimal pH balance.".to_string(),
            is_demo: true,
        },
        Locale::Hi => SoilReport {
            soil_type: "दोमट".to_string(),
            crop_recommendations: vec![
                "गेहूं".to_string(),
                "सोयाबीन".to_string(),
                "सरसों".to_string(),
            ],
            fertilizer_advice: "यूरिया 50 किग्रा/एकड़ + डीएपी 25 किग्रा/एकड़। जैविक खाद मिलाएं।".to_string(),
            analysis: "मिट्टी उपजाऊ है लेकिन थोड़ी अम्लीय है। संतुलित पीएच के लिए चूने का उपचार आवश्यक है।".to_string(),
            is_demo: true,
        },
    }
}

pub fn leaf_result(locale: Locale) -> DiseaseResult {
    DiseaseResult {
        is_leaf: true,
        disease_name: locale.pick("Leaf Blight", "लीफ ब्लाइट (पत्ती झुलसा)").to_string(),
        confidence: 87,
        treatment_en: "Mancozeb 2g/L spray. Ensure proper drainage to reduce moisture.".to_string(),
        treatment_hi: "मैंकोजेब 2 ग्राम/लीटर का छिड़काव करें। नमी कम करने के लिए उचित जल निकासी सुनिश्चित करें।".to_string(),
        is_healthy: false,
        is_demo: true,
    }
}

/// Demo-mode price card. Blank inputs get placeholder crop and market names.
pub fn price_demo(crop: &str, district: &str) -> PricePrediction {
    let crop = if crop.trim().is_empty() { "Wheat" } else { crop.trim() };
    let district = if district.trim().is_empty() {
        "Local Mandi"
    } else {
        district.trim()
    };
    price_template(crop, district)
}

/// Price card used when a live prediction fails. Inputs are echoed as given.
pub fn price_failure(crop: &str, district: &str) -> PricePrediction {
    price_template(crop.trim(), district.trim())
}

fn price_template(crop: &str, district: &str) -> PricePrediction {
    PricePrediction {
        crop: crop.to_string(),
        current_price: DEMO_CURRENT_PRICE,
        predicted_price: DEMO_PREDICTED_PRICE,
        trend: Trend::Stable,
        recommendation: Recommendation::Hold,
        nearest_mandi: district.to_string(),
        is_demo: true,
    }
}

pub fn weather(locale: Locale) -> WeatherSnapshot {
    WeatherSnapshot {
        temp: 28,
        condition: locale.pick("Clear Sky", "साफ आसमान").to_string(),
        humidity: 65.0,
        wind_speed: 8.0,
        location: demo_location_label(locale).to_string(),
        is_demo: true,
    }
}

pub fn demo_location_label(locale: Locale) -> &'static str {
    locale.pick("Bhopal (Demo)", "भोपाल (डेमो)")
}

pub fn current_location_label(locale: Locale) -> &'static str {
    locale.pick("Current Location", "वर्तमान स्थान")
}

// ========== Chat ==========

pub fn chat_welcome(locale: Locale) -> &'static str {
    locale.pick(
        "Namaste! I am Maatiputra Sahayak. Ask me about weather, nearby shops, crop prices, or soil health.",
        "नमस्ते! मैं माटीपुत्र सहायक हूँ। आप मुझसे मौसम, आस-पास की दुकानों, या फसल के बारे में पूछ सकते हैं।",
    )
}

pub fn chat_demo_reply(locale: Locale) -> &'static str {
    locale.pick(
        "This is a demo response. AI services are currently unavailable.",
        "यह एक डेमो प्रतिक्रिया है। एआई सेवाएँ वर्तमान में अनुपलब्ध हैं।",
    )
}

pub fn chat_apology(locale: Locale) -> &'static str {
    locale.pick(
        "Sorry, I am unable to answer right now.",
        "क्षमा करें, मैं अभी जवाब नहीं दे सकता।",
    )
}

#[cfg(test)]
pub(crate) fn has_ascii_letters(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
pub(crate) fn has_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soil_texts(report: &SoilReport) -> Vec<&str> {
        let mut texts = vec![
            report.soil_type.as_str(),
            report.fertilizer_advice.as_str(),
            report.analysis.as_str(),
        ];
        texts.extend(report.crop_recommendations.iter().map(String::as_str));
        texts
    }

    // ========== Locale Purity Tests ==========

    #[test]
    fn test_hindi_payloads_have_no_english() {
        let hi = Locale::Hi;
        let weather = weather(hi);
        let soil = soil_report(hi);
        let mut texts = soil_texts(&soil);
        texts.extend([
            weather.condition.as_str(),
            weather.location.as_str(),
            chat_welcome(hi),
            chat_demo_reply(hi),
            chat_apology(hi),
            current_location_label(hi),
        ]);
        let leaf = leaf_result(hi);
        texts.push(leaf.disease_name.as_str());
        texts.push(leaf.treatment_hi.as_str());

        for text in texts {
            assert!(!has_ascii_letters(text), "English leaked into {:?}", text);
        }
    }

    #[test]
    fn test_english_payloads_have_no_hindi() {
        let en = Locale::En;
        let weather = weather(en);
        let soil = soil_report(en);
        let mut texts = soil_texts(&soil);
        texts.extend([
            weather.condition.as_str(),
            weather.location.as_str(),
            chat_welcome(en),
            chat_demo_reply(en),
            chat_apology(en),
            current_location_label(en),
        ]);
        let leaf = leaf_result(en);
        texts.push(leaf.disease_name.as_str());
        texts.push(leaf.treatment_en.as_str());

        for text in texts {
            assert!(!has_devanagari(text), "Hindi leaked into {:?}", text);
        }
    }

    // ========== Shape Tests ==========

    #[test]
    fn test_leaf_result_is_fixed() {
        for locale in Locale::all() {
            let result = leaf_result(*locale);
            assert!(!result.is_healthy);
            assert_eq!(result.confidence, 87);
            assert!(result.is_demo);
        }
    }

    #[test]
    fn test_price_demo_fills_blanks() {
        let price = price_demo("", " ");
        assert_eq!(price.crop, "Wheat");
        assert_eq!(price.nearest_mandi, "Local Mandi");

        let price = price_demo("Wheat", "Indore");
        assert_eq!(price.current_price, 2250.0);
        assert_eq!(price.nearest_mandi, "Indore");
        assert!(price.is_demo);
    }

    #[test]
    fn test_price_failure_echoes_inputs() {
        let price = price_failure("Onion", "Nashik");
        assert_eq!(price.crop, "Onion");
        assert_eq!(price.nearest_mandi, "Nashik");
        assert_eq!(price.trend, Trend::Stable);
    }
}
