/// Campaign catalog: topic keyword -> curated campaign records, a default set
/// for unmatched topics, and the opener phrases used per category.
///
/// The catalog is immutable once built. The built-in data ships as
/// `data/catalog.json`; alternates with the same shape can be loaded from disk.
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SynthesisError;
use crate::model::{CampaignRecord, Category, CATEGORY_ORDER};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Campaigns curated for one topic keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCampaigns {
    /// Lowercase keyword matched as a substring of the topic, e.g. "gen z"
    pub keyword: String,
    pub campaigns: Vec<CampaignRecord>,
}

/// Summary of a topic entry, for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub keyword: String,
    pub campaign_count: usize,
}

/// Outcome of a topic lookup.
#[derive(Debug, Clone, Copy)]
pub struct CatalogMatch<'a> {
    /// Matched keyword; `None` when the default set was used
    pub keyword: Option<&'a str>,
    pub campaigns: &'a [CampaignRecord],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    topics: Vec<TopicCampaigns>,
    default_campaigns: Vec<CampaignRecord>,
    openers: HashMap<Category, Vec<String>>,
}

impl Catalog {
    /// Build a catalog without validation.
    pub fn new(
        topics: Vec<TopicCampaigns>,
        default_campaigns: Vec<CampaignRecord>,
        openers: HashMap<Category, Vec<String>>,
    ) -> Self {
        Self {
            topics,
            default_campaigns,
            openers,
        }
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("builtin catalog is valid")
    }

    pub fn from_json(json: &str) -> Result<Self, SynthesisError> {
        let mut catalog: Catalog = serde_json::from_str(json)?;
        for entry in &mut catalog.topics {
            entry.keyword = entry.keyword.trim().to_lowercase();
        }
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self, SynthesisError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if self.default_campaigns.is_empty() {
            return Err(SynthesisError::InvalidCatalog(
                "default campaign list must not be empty".to_string(),
            ));
        }

        for entry in &self.topics {
            if entry.keyword.is_empty() {
                return Err(SynthesisError::InvalidCatalog(
                    "topic keyword must not be empty".to_string(),
                ));
            }
            if entry.campaigns.is_empty() {
                return Err(SynthesisError::InvalidCatalog(format!(
                    "topic '{}' has no campaigns",
                    entry.keyword
                )));
            }
        }

        for category in CATEGORY_ORDER {
            if self.openers(category).is_empty() {
                return Err(SynthesisError::InvalidCatalog(format!(
                    "category '{category}' has no opener phrases"
                )));
            }
        }

        Ok(())
    }

    /// Resolve a topic to its campaign list.
    ///
    /// A keyword matches when the lowercased topic contains it. When several
    /// keywords match, the last one in catalog order wins.
    pub fn lookup(&self, topic: &str) -> CatalogMatch<'_> {
        let topic = topic.to_lowercase();
        let matched = self
            .topics
            .iter()
            .rev()
            .find(|entry| topic.contains(&entry.keyword));

        match matched {
            Some(entry) => CatalogMatch {
                keyword: Some(entry.keyword.as_str()),
                campaigns: &entry.campaigns,
            },
            None => {
                debug!(topic = %topic, "topic unmatched, using default campaigns");
                CatalogMatch {
                    keyword: None,
                    campaigns: &self.default_campaigns,
                }
            }
        }
    }

    pub fn openers(&self, category: Category) -> &[String] {
        self.openers.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn topics(&self) -> Vec<TopicSummary> {
        self.topics
            .iter()
            .map(|entry| TopicSummary {
                keyword: entry.keyword.clone(),
                campaign_count: entry.campaigns.len(),
            })
            .collect()
    }

    pub fn default_campaigns(&self) -> &[CampaignRecord] {
        &self.default_campaigns
    }
}
