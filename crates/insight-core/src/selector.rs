use crate::error::SynthesisError;
use crate::model::CampaignRecord;

/// Pick `min(count, ceiling)` records, cycling through `records` when the
/// request is larger than the list.
pub fn select<'a>(
    records: &'a [CampaignRecord],
    count: u32,
    ceiling: u32,
    topic: &str,
) -> Result<Vec<&'a CampaignRecord>, SynthesisError> {
    if records.is_empty() {
        return Err(SynthesisError::NoCampaigns {
            topic: topic.to_string(),
        });
    }

    let len = count.min(ceiling) as usize;
    Ok((0..len).map(|i| &records[i % records.len()]).collect())
}
