/// Insight composer: renders one campaign record into a categorized sentence.
///
/// Sentences have the shape `<opener> <clause>.` where the opener is one of the
/// category's phrases and the clause is the first sentence of the campaign
/// description, lowercased. Which opener is used is decided by an
/// [`OpenerPicker`], so production can vary output while tests pin it.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::error::SynthesisError;
use crate::model::{CampaignRecord, Category, Insight};

const SEARCH_RESULTS_URL: &str = "https://www.youtube.com/results?search_query=cannes+lions";

/// Chooses an opener index for the insight at `position`.
///
/// `len` is always at least 1 and the returned index must be below it.
pub trait OpenerPicker: Send + Sync {
    fn pick(&self, len: usize, position: usize) -> usize;
}

/// Uniform random choice from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOpeners;

impl OpenerPicker for RandomOpeners {
    fn pick(&self, len: usize, _position: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Pseudo-random choice that repeats for the same seed and position.
#[derive(Debug, Clone, Copy)]
pub struct SeededOpeners {
    seed: u64,
}

impl SeededOpeners {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl OpenerPicker for SeededOpeners {
    fn pick(&self, len: usize, position: usize) -> usize {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(position as u64));
        rng.gen_range(0..len)
    }
}

/// Always the same opener index (wrapped to the phrase count).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOpener(pub usize);

impl OpenerPicker for FixedOpener {
    fn pick(&self, len: usize, _position: usize) -> usize {
        self.0 % len
    }
}

/// Search-results link for a topic, used when a campaign has no film link.
pub fn search_link(topic: &str) -> String {
    format!("{SEARCH_RESULTS_URL}+{}", urlencoding::encode(topic))
}

/// Generic search-results link with no topic.
pub fn generic_search_link() -> String {
    SEARCH_RESULTS_URL.to_string()
}

pub struct InsightComposer<'a> {
    catalog: &'a Catalog,
    picker: &'a dyn OpenerPicker,
}

impl<'a> InsightComposer<'a> {
    pub fn new(catalog: &'a Catalog, picker: &'a dyn OpenerPicker) -> Self {
        Self { catalog, picker }
    }

    /// Compose the insight at `position` of a call identified by `nonce`.
    pub fn compose(
        &self,
        record: &CampaignRecord,
        category: Category,
        topic: &str,
        position: usize,
        nonce: &str,
    ) -> Result<Insight, SynthesisError> {
        let openers = self.catalog.openers(category);
        if openers.is_empty() {
            return Err(SynthesisError::MissingOpeners(category));
        }
        let index = self.picker.pick(openers.len(), position) % openers.len();
        let opener = &openers[index];

        let clause = key_clause(&record.description)
            .unwrap_or_else(|| format!("{topic} reflects their personal values").to_lowercase());

        Ok(Insight {
            id: format!("insight-{position}-{nonce}"),
            text: format!("{opener} {clause}."),
            category,
            campaign_title: record.title.clone(),
            brand: record.brand.clone(),
            year: record.year,
            video_link: record
                .video_link
                .clone()
                .unwrap_or_else(|| search_link(topic)),
        })
    }
}

/// First `.`-delimited clause of a description, trimmed and lowercased.
fn key_clause(description: &str) -> Option<String> {
    let clause = description.split('.').next().unwrap_or_default().trim();
    if clause.is_empty() {
        None
    } else {
        Some(clause.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mothers_record() -> CampaignRecord {
        CampaignRecord {
            title: "Real Beauty Sketches".to_string(),
            brand: "Dove".to_string(),
            year: 2013,
            description: "Women describe themselves to a forensic artist. More text follows."
                .to_string(),
            video_link: Some("https://www.youtube.com/watch?v=XpaOjMXyJGk".to_string()),
        }
    }

    #[test]
    fn compose_uses_opener_and_first_clause() {
        let catalog = Catalog::builtin();
        let composer = InsightComposer::new(&catalog, &FixedOpener(0));
        let insight = composer
            .compose(&mothers_record(), Category::Emotional, "mothers", 2, "abc")
            .unwrap();

        assert_eq!(
            insight.text,
            "People feel deeply connected to women describe themselves to a forensic artist."
        );
        assert_eq!(insight.id, "insight-2-abc");
        assert_eq!(insight.category, Category::Emotional);
        assert_eq!(insight.campaign_title, "Real Beauty Sketches");
        assert_eq!(insight.brand, "Dove");
        assert_eq!(insight.year, 2013);
        assert_eq!(insight.video_link, "https://www.youtube.com/watch?v=XpaOjMXyJGk");
    }

    #[test]
    fn fixed_opener_wraps_index() {
        let catalog = Catalog::builtin();
        let composer = InsightComposer::new(&catalog, &FixedOpener(4));
        let insight = composer
            .compose(&mothers_record(), Category::HumanTruths, "mothers", 0, "n")
            .unwrap();
        assert!(insight.text.starts_with("People fundamentally seek "));
    }

    #[test]
    fn missing_video_link_uses_topic_search() {
        let catalog = Catalog::builtin();
        let composer = InsightComposer::new(&catalog, &FixedOpener(0));
        let mut record = mothers_record();
        record.video_link = None;
        let insight = composer
            .compose(&record, Category::Cultural, "gen z", 0, "n")
            .unwrap();
        assert_eq!(
            insight.video_link,
            "https://www.youtube.com/results?search_query=cannes+lions+gen%20z"
        );
    }

    #[test]
    fn empty_clause_falls_back_to_topic() {
        let catalog = Catalog::builtin();
        let composer = InsightComposer::new(&catalog, &FixedOpener(0));
        let mut record = mothers_record();
        record.description = ". Starts with a period".to_string();
        let insight = composer
            .compose(&record, Category::Behavioral, "Gen Z", 0, "n")
            .unwrap();
        assert_eq!(
            insight.text,
            "Consumer behavior shifts when gen z reflects their personal values."
        );
    }

    #[test]
    fn text_has_single_trailing_period() {
        let catalog = Catalog::builtin();
        let composer = InsightComposer::new(&catalog, &RandomOpeners);
        for category in crate::model::CATEGORY_ORDER {
            let insight = composer
                .compose(&mothers_record(), category, "mothers", 0, "n")
                .unwrap();
            assert!(insight.text.ends_with("artist."));
            assert!(!insight.text.ends_with(".."));
            assert!(catalog
                .openers(category)
                .iter()
                .any(|o| insight.text.starts_with(o.as_str())));
        }
    }

    #[test]
    fn seeded_openers_are_reproducible() {
        let a = SeededOpeners::new(42);
        let b = SeededOpeners::new(42);
        for position in 0..20 {
            let pick = a.pick(3, position);
            assert!(pick < 3);
            assert_eq!(pick, b.pick(3, position));
        }
    }

    #[test]
    fn missing_openers_is_a_fault() {
        let catalog = Catalog::new(Vec::new(), vec![mothers_record()], Default::default());
        let composer = InsightComposer::new(&catalog, &FixedOpener(0));
        let err = composer
            .compose(&mothers_record(), Category::Religious, "mothers", 0, "n")
            .unwrap_err();
        assert!(matches!(err, SynthesisError::MissingOpeners(Category::Religious)));
    }
}
