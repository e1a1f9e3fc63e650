use crate::corpus::{PIVOT_LANGUAGE, ResultCollection, ResultRecord};

/// Length of the text an example is ranked by: the Russian side of aligned examples.
/// An aligned example without a Russian side ranks as empty.
pub fn length_key(record: &ResultRecord) -> usize {
    match record {
        ResultRecord::Simple(r) => r.text.chars().count(),
        ResultRecord::Aligned(r) => r.text(PIVOT_LANGUAGE).map_or(0, |t| t.chars().count()),
    }
}

/// Shortest examples first, keeping fetch order among equal lengths, cut to `count`.
pub fn rank_and_truncate(mut records: ResultCollection, count: usize) -> Vec<ResultRecord> {
    records.sort_by_key(length_key);
    records.truncate(count);
    records
}
