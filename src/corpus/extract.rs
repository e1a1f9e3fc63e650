use tracing::warn;

use super::record::{AlignedRecord, ResultRecord, SimpleRecord};
use super::types::{Example, Fragment, SearchResponse};
use crate::marker::Marker;

pub fn extract_records(response: SearchResponse, marker: Option<Marker>) -> Vec<ResultRecord> {
    let mut records = Vec::new();

    for document in response.documents {
        if document.examples.is_empty() {
            warn!(source = %document.source, "corpus document without examples");
        }
        for example in document.examples {
            let source = document.source.clone();
            let record = match example {
                Example::Simple(fragment) => ResultRecord::Simple(SimpleRecord {
                    text: marked_text(&fragment, marker),
                    source,
                }),
                Example::Aligned { aligned } => ResultRecord::Aligned(AlignedRecord {
                    texts: aligned
                        .iter()
                        .map(|f| (f.lang.clone().unwrap_or_default(), marked_text(f, marker)))
                        .collect(),
                    source,
                }),
            };
            records.push(record);
        }
    }

    records
}

fn marked_text(fragment: &Fragment, marker: Option<Marker>) -> String {
    match marker {
        Some(m) => m.highlight(&fragment.text, &fragment.matches),
        None => fragment.text.clone(),
    }
}
