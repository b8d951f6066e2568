/// Query parser for free-text insight requests such as "5 insights about mothers".
///
/// Two independent extractions run over the raw text:
/// - count: first `<digits> insights` occurrence anywhere in the text
/// - topic: whatever follows a leading `<digits> insights about ` prefix
///
/// Malformed input degrades to defaults; the parser never fails.
use regex::Regex;
use tracing::debug;

use crate::model::ParsedQuery;

pub const DEFAULT_COUNT: u32 = 5;
pub const DEFAULT_TOPIC: &str = "marketing";

#[derive(Debug, Clone)]
pub struct QueryParser {
    count_re: Regex,
    prefix_re: Regex,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    pub fn new() -> Self {
        Self {
            count_re: Regex::new(r"(?i)(\d+)\s+insights").expect("valid regex"),
            prefix_re: Regex::new(r"(?i)^\s*\d+\s+insights\s+about\s+").expect("valid regex"),
        }
    }

    pub fn parse(&self, raw_query: &str) -> ParsedQuery {
        let parsed_count = self
            .count_re
            .captures(raw_query)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .filter(|&n| n > 0);
        let count_defaulted = parsed_count.is_none();
        let requested_count = parsed_count.unwrap_or(DEFAULT_COUNT);

        let remainder = self.prefix_re.replace(raw_query, "");
        let remainder = remainder.trim();
        let topic_defaulted = remainder.is_empty();
        let topic = if topic_defaulted {
            DEFAULT_TOPIC.to_string()
        } else {
            remainder.to_string()
        };

        if count_defaulted || topic_defaulted {
            debug!(
                count_defaulted,
                topic_defaulted,
                requested_count,
                topic = %topic,
                "query parse defaulted"
            );
        }

        ParsedQuery {
            requested_count,
            topic,
            raw_query: raw_query.to_string(),
            count_defaulted,
            topic_defaulted,
        }
    }
}
