//! Aggregate Tools


use crate::types::{ClassifiedRequest, ExtractedRecord, ResultSet};

/// Group per-page records into a [`ResultSet`].
///
/// Items arrive in completion order; each bucket is re-sequenced by the
/// request's sitemap position. Items without a record (fetch or extraction
/// failed) are left out. Records are never deduplicated.
pub fn aggregate<I>(source: impl Into<String>, items: I) -> ResultSet
where
    I: IntoIterator<Item = (ClassifiedRequest, Option<ExtractedRecord>)>,
{
    let mut kept: Vec<(ClassifiedRequest, ExtractedRecord)> = items
        .into_iter()
        .filter_map(|(request, record)| record.map(|r| (request, r)))
        .collect();
    kept.sort_by_key(|(request, _)| request.position);

    let mut set = ResultSet::new(source);
    for (request, record) in kept {
        set.push(request.category, record);
    }
    set
}
