/// Synthesis pipeline: raw query -> parsed query -> campaigns -> insights.
///
/// The public entry points are total. Internal faults are logged and turned
/// into a single fallback insight so callers always get content back.
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::composer::{generic_search_link, search_link, InsightComposer, OpenerPicker, RandomOpeners};
use crate::error::SynthesisError;
use crate::model::{Category, Insight, InsightsResponse, ParsedQuery};
use crate::parser::QueryParser;
use crate::selector;

pub const DEFAULT_MAX_INSIGHTS: u32 = 50;
const FALLBACK_YEAR: i32 = 2023;
const EMPTY_RESULT_BRAND: &str = "Cannes Lions";
const FAULT_BRAND: &str = "InsightMiner";

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Upper bound on insights per call, whatever the query asks for
    pub max_insights: u32,
    /// Artificial delay applied by [`SynthesisPipeline::respond`]
    pub latency: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_insights: DEFAULT_MAX_INSIGHTS,
            latency: Duration::ZERO,
        }
    }
}

pub struct SynthesisPipeline {
    catalog: Arc<Catalog>,
    parser: QueryParser,
    picker: Arc<dyn OpenerPicker>,
    options: PipelineOptions,
}

impl SynthesisPipeline {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            parser: QueryParser::new(),
            picker: Arc::new(RandomOpeners),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_picker(mut self, picker: Arc<dyn OpenerPicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Wait out the configured latency, then synthesize.
    ///
    /// Dropping the returned future abandons the call with no side effects.
    pub async fn respond(&self, raw_query: &str) -> InsightsResponse {
        if !self.options.latency.is_zero() {
            tokio::time::sleep(self.options.latency).await;
        }
        self.synthesize(raw_query)
    }

    /// Turn a free-text query into a non-empty list of insights.
    pub fn synthesize(&self, raw_query: &str) -> InsightsResponse {
        let parsed = self.parser.parse(raw_query);
        let nonce = uuid::Uuid::new_v4().simple().to_string();

        let insights = match self.compose_all(&parsed, &nonce) {
            Ok(insights) if !insights.is_empty() => {
                info!(
                    topic = %parsed.topic,
                    requested = parsed.requested_count,
                    returned = insights.len(),
                    "insights synthesized"
                );
                insights
            }
            Ok(_) => {
                debug!(topic = %parsed.topic, "no insights composed, using fallback");
                vec![empty_result_fallback(&parsed.topic, &nonce)]
            }
            Err(e) => {
                error!(error = %e, query = raw_query, "insight synthesis faulted");
                vec![fault_fallback(&parsed.topic, &nonce)]
            }
        };

        InsightsResponse {
            query: raw_query.to_string(),
            insights,
        }
    }

    fn compose_all(&self, parsed: &ParsedQuery, nonce: &str) -> Result<Vec<Insight>, SynthesisError> {
        // A blank query names nothing to select.
        if parsed.raw_query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let found = self.catalog.lookup(&parsed.topic);
        debug!(
            topic = %parsed.topic,
            keyword = found.keyword.unwrap_or("<default>"),
            campaigns = found.campaigns.len(),
            "topic resolved"
        );

        let records = selector::select(
            found.campaigns,
            parsed.requested_count,
            self.options.max_insights,
            &parsed.topic,
        )?;

        let composer = InsightComposer::new(&self.catalog, self.picker.as_ref());
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                composer.compose(record, Category::for_position(i), &parsed.topic, i, nonce)
            })
            .collect()
    }
}

fn fallback_text(topic: &str) -> String {
    format!("People feel deeply connected to {topic} when it reflects their personal values and experiences.")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn empty_result_fallback(topic: &str, nonce: &str) -> Insight {
    Insight {
        id: format!("fallback-{nonce}"),
        text: fallback_text(topic),
        category: Category::Emotional,
        campaign_title: format!("The Power of {}", capitalize(topic)),
        brand: EMPTY_RESULT_BRAND.to_string(),
        year: FALLBACK_YEAR,
        video_link: search_link(topic),
    }
}

fn fault_fallback(topic: &str, nonce: &str) -> Insight {
    Insight {
        id: format!("error-{nonce}"),
        text: fallback_text(topic),
        category: Category::Emotional,
        campaign_title: "Error Recovery".to_string(),
        brand: FAULT_BRAND.to_string(),
        year: FALLBACK_YEAR,
        video_link: generic_search_link(),
    }
}
