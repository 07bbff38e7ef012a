use crate::document::{Record, MEDIA_COLLECTIONS};
use crate::thumbnail::derive_thumbnail;

/// Result of one enrichment pass over a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub records: Vec<Record>,
    pub updated: usize,
}

/// Annotate every record, returning the updated records and how many entries gained a thumbnail.
pub fn enrich_records(records: Vec<Record>) -> Enrichment {
    let mut updated = 0;
    let records = records
        .into_iter()
        .map(|record| {
            let (record, n) = enrich_record(record);
            updated += n;
            record
        })
        .collect();
    Enrichment { records, updated }
}

/// Fill in `path` on WSI entries of `media` then `related_figures`.
///
/// Entries that aren't WSI, have no usable URL, already carry a thumbnail,
/// or point at an unknown host are left as they are. An entry listed in both
/// collections is handled once per occurrence.
pub fn enrich_record(mut record: Record) -> (Record, usize) {
    let mut updated = 0;
    for collection in MEDIA_COLLECTIONS {
        for mut entry in record.entries_mut(collection) {
            if !entry.is_wsi() || entry.has_thumbnail() {
                continue;
            }
            let Some(url) = entry.source_url() else {
                tracing::trace!(collection, "wsi entry without url");
                continue;
            };
            let Some((host, thumbnail)) = derive_thumbnail(url) else {
                tracing::trace!(collection, url, "no thumbnail for url");
                continue;
            };
            tracing::debug!(collection, host = host.name(), %thumbnail, "annotated wsi entry");
            entry.set_thumbnail(thumbnail);
            updated += 1;
        }
    }
    (record, updated)
}
