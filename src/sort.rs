//! Orders exported word records with a caller-supplied total order.

use std::cmp::Ordering;

use crate::store::WordRecord;

/// Stable in-place sort by `cmp`. Records that compare equal keep their
/// relative input order, so output is deterministic for a fixed input.
pub fn sort_records<F>(records: &mut [WordRecord], cmp: F)
where
    F: Fn(&WordRecord, &WordRecord) -> Ordering,
{
    records.sort_by(|a, b| cmp(a, b));
}

/// The canonical ordering: descending count, ties broken by ascending
/// byte-wise word order, so equal-count words always print alphabetically.
pub fn by_count_desc(a: &WordRecord, b: &WordRecord) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}
