use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use insight_core::catalog::TopicSummary;
use insight_core::model::{Insight, InsightsResponse};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SynthesizeInsightsParams {
    /// Free-text request such as "5 insights about mothers".
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub id: String,
    pub text: String,
    /// One of: emotional, human_truths, behavioral, cultural, religious.
    pub category: String,
    pub campaign_title: String,
    pub brand: String,
    pub year: i32,
    pub video_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SynthesizeInsightsResponse {
    /// The query exactly as received.
    pub query: String,
    pub insights: Vec<InsightResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TopicInfo {
    pub keyword: String,
    pub campaign_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTopicsResponse {
    pub topics: Vec<TopicInfo>,
    /// Campaigns used when no topic keyword matches.
    pub default_campaign_count: usize,
}

impl From<Insight> for InsightResult {
    fn from(insight: Insight) -> Self {
        Self {
            id: insight.id,
            text: insight.text,
            category: insight.category.key().to_string(),
            campaign_title: insight.campaign_title,
            brand: insight.brand,
            year: insight.year,
            video_link: insight.video_link,
        }
    }
}

impl From<InsightsResponse> for SynthesizeInsightsResponse {
    fn from(response: InsightsResponse) -> Self {
        Self {
            query: response.query,
            insights: response.insights.into_iter().map(InsightResult::from).collect(),
        }
    }
}

impl From<TopicSummary> for TopicInfo {
    fn from(summary: TopicSummary) -> Self {
        Self {
            keyword: summary.keyword,
            campaign_count: summary.campaign_count,
        }
    }
}
