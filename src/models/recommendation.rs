use serde::{Deserialize, Serialize};

/// The bundle artifact returned by `/quiz/recommend`.
///
/// Treated as opaque once received: the client renders it verbatim and never
/// derives new state from it (apart from forwarding it to the email
/// assistant). Dropped on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub upsell: Vec<String>,
    #[serde(default)]
    pub explanation: Vec<String>,
    #[serde(default)]
    pub bundle_summary: Option<String>,
    #[serde(default)]
    pub product_details: Vec<ProductDetail>,
    #[serde(default)]
    pub llm_explanation: Option<String>,
    #[serde(default)]
    pub safety_notes: Vec<String>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
}

/// A scored core product inside a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    /// Fit score, normalized 0-100 server-side.
    pub score: u32,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub price_per_day: Option<f64>,
}

/// Monthly pricing for the selected bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub bundle_price: Option<f64>,
    #[serde(default)]
    pub bundle_price_subscription: Option<f64>,
    #[serde(default)]
    pub subscription_savings_pct: Option<i64>,
}

/// Template-generated welcome email returned by `/content/welcome-email`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailCopy {
    pub subject: String,
    pub preview_line: String,
    pub body_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_recommendation() {
        let json = r#"{
            "products": ["Adult Daily", "Omega-3 Focus"],
            "upsell": ["Sleep Gummies"],
            "explanation": ["Adult Daily: Designed for this life stage."],
            "bundle_summary": "We selected 2 core products.",
            "product_details": [
                {
                    "id": "adult_daily",
                    "name": "Adult Daily",
                    "score": 100,
                    "reasons": ["Designed for this life stage."],
                    "price_usd": 24.99,
                    "price_per_day": 0.83
                }
            ],
            "safety_notes": ["Omega-3 Focus was skipped due to reported fish allergy."],
            "pricing": {
                "bundle_price": 54.98,
                "bundle_price_subscription": 46.73,
                "subscription_savings_pct": 15
            }
        }"#;

        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.products.len(), 2);
        assert_eq!(rec.product_details[0].score, 100);
        assert_eq!(rec.pricing.unwrap().subscription_savings_pct, Some(15));
        assert!(rec.llm_explanation.is_none());
    }

    #[test]
    fn tolerates_minimal_body() {
        // Older backend builds only send the plain name lists.
        let rec: Recommendation =
            serde_json::from_str(r#"{"products": ["Kids Daily"], "upsell": []}"#).unwrap();
        assert_eq!(rec.products, vec!["Kids Daily"]);
        assert!(rec.product_details.is_empty());
        assert!(rec.pricing.is_none());
    }
}
