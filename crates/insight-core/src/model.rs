use std::fmt;

use serde::{Deserialize, Serialize};

/// Thematic lens applied to an insight.
///
/// The variant order is the round-robin order used when assigning categories
/// to insight positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Emotional,
    HumanTruths,
    Behavioral,
    Cultural,
    Religious,
}

pub const CATEGORY_ORDER: [Category; 5] = [
    Category::Emotional,
    Category::HumanTruths,
    Category::Behavioral,
    Category::Cultural,
    Category::Religious,
];

impl Category {
    /// Category for the insight at `position` in an output list.
    pub fn for_position(position: usize) -> Self {
        CATEGORY_ORDER[position % CATEGORY_ORDER.len()]
    }

    /// Stable key, e.g. "human_truths".
    pub fn key(self) -> &'static str {
        match self {
            Self::Emotional => "emotional",
            Self::HumanTruths => "human_truths",
            Self::Behavioral => "behavioral",
            Self::Cultural => "cultural",
            Self::Religious => "religious",
        }
    }

    /// Human-readable label, e.g. "human truths".
    pub fn label(self) -> &'static str {
        match self {
            Self::HumanTruths => "human truths",
            other => other.key(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A curated advertising campaign used as source material for insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// Campaign title, e.g. "Real Beauty Sketches"
    pub title: String,
    /// Brand (or brand partnership) behind the campaign
    pub brand: String,
    /// Year the campaign was awarded
    pub year: i32,
    /// Sentence-delimited description; only the first clause is used
    pub description: String,
    /// Link to the campaign film, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
}

/// Result of parsing a raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Number of insights asked for, always at least 1
    pub requested_count: u32,
    /// Topic text as written by the user (trimmed)
    pub topic: String,
    /// The query exactly as received
    pub raw_query: String,
    /// True when no usable count was found and the default was applied
    pub count_defaulted: bool,
    /// True when no topic remained and the default was applied
    pub topic_defaulted: bool,
}

/// A synthesized statement plus the campaign it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Unique within one synthesis call
    pub id: String,
    pub text: String,
    pub category: Category,
    pub campaign_title: String,
    pub brand: String,
    pub year: i32,
    pub video_link: String,
}

/// What a synthesis call hands back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsResponse {
    /// The raw query, echoed unchanged
    pub query: String,
    /// Never empty
    pub insights: Vec<Insight>,
}
