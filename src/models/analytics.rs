use std::collections::BTreeMap;

use serde::Deserialize;

/// One logged recommendation, as returned by `/admin/recent-recommendations`.
///
/// The risk fields are only present on backends that run the churn
/// heuristic; the UI surfaces them behind the `risk_label` capability.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    #[serde(default)]
    pub profile_type: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub upsell: Vec<String>,
    #[serde(default)]
    pub bundle_price: Option<f64>,
    #[serde(default)]
    pub bundle_price_subscription: Option<f64>,
    #[serde(default)]
    pub risk_score: Option<u32>,
    #[serde(default)]
    pub risk_label: Option<String>,
}

/// Envelope of `/admin/recent-recommendations`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentRecommendations {
    #[serde(default)]
    pub items: Vec<LogEntry>,
}

/// Aggregate statistics from `/admin/segments-summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentsSummary {
    pub total_recommendations: u64,
    #[serde(default)]
    pub by_profile_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_age_group: BTreeMap<String, u64>,
    #[serde(default)]
    pub product_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub avg_bundle_price: Option<f64>,
    #[serde(default)]
    pub avg_sub_price: Option<f64>,
    #[serde(default)]
    pub avg_discount_pct: Option<i64>,
    #[serde(default)]
    pub avg_products_per_bundle: Option<f64>,
    #[serde(default)]
    pub by_risk_label: BTreeMap<String, u64>,
    #[serde(default)]
    pub high_risk_share: Option<f64>,
}

/// The two admin aggregates, fetched concurrently and only ever replaced
/// together. They describe the same underlying log but carry no relational
/// link; a snapshot is as consistent as the instant both requests resolved.
#[derive(Debug, Clone)]
pub struct AdminSnapshot {
    pub recent: Vec<LogEntry>,
    pub segments: SegmentsSummary,
}

impl SegmentsSummary {
    /// Product names ranked by how often they appeared in bundles.
    pub fn top_products(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut counts: Vec<(&str, u64)> = self
            .product_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts.truncate(limit);
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_segments_summary() {
        let json = r#"{
            "total_recommendations": 12,
            "by_profile_type": {"child": 7, "adult_woman": 5},
            "by_age_group": {"4_8": 7},
            "product_counts": {"Kids Daily": 7, "Adult Daily": 5, "Omega-3 Focus": 7},
            "avg_bundle_price": 52.4,
            "avg_sub_price": 44.1,
            "avg_discount_pct": 16,
            "avg_products_per_bundle": 2.6,
            "by_risk_label": {"low": 8, "medium": 3, "high": 1},
            "high_risk_share": 8.3
        }"#;

        let s: SegmentsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.total_recommendations, 12);
        assert_eq!(s.by_profile_type.get("child"), Some(&7));
        assert_eq!(s.high_risk_share, Some(8.3));
    }

    #[test]
    fn top_products_ranks_by_count_then_name() {
        let s: SegmentsSummary = serde_json::from_str(
            r#"{
                "total_recommendations": 3,
                "product_counts": {"B": 2, "A": 2, "C": 5}
            }"#,
        )
        .unwrap();

        assert_eq!(s.top_products(2), vec![("C", 5), ("A", 2)]);
    }

    #[test]
    fn log_entry_without_risk_fields() {
        let e: LogEntry = serde_json::from_str(
            r#"{
                "timestamp": "2025-11-02T10:15:00",
                "profile_type": "child",
                "goals": ["immunity"],
                "products": ["Kids Daily"],
                "bundle_price": 21.99
            }"#,
        )
        .unwrap();
        assert!(e.risk_label.is_none());
        assert_eq!(e.upsell.len(), 0);
    }
}
