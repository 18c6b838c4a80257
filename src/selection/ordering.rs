//! Reference-sequence ordering of ad contents by eligible-group CTR.
//!
//! The selection rule ranks contents by reordering them against a reference
//! sequence of content ids sorted ascending by CTR. Two quirks are load
//! bearing and preserved here:
//!
//! - equal-CTR entries collapse to the last writer, so at most one content
//!   id survives per distinct CTR value;
//! - a content id appearing more than once in the reference counts by its
//!   **last** index, which pins a content's rank to the highest CTR among
//!   its eligible groups.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::content::AdvertisementContent;
use crate::targeting::group::TargetingGroup;

/// Total order over CTR values: NaN sorts below every number and equals
/// itself, giving undefined rates the stable "absent" bucket.
#[must_use]
pub fn ctr_order(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

/// Builds the ascending-CTR content-id reference sequence for a set of
/// eligible groups.
///
/// Groups are sorted stably by CTR; within a run of equal CTRs only the last
/// entry survives, mirroring map-overwrite semantics in the ranking rule.
#[must_use]
pub fn reference_sequence(groups: &[&TargetingGroup]) -> Vec<String> {
    let mut ranked: Vec<(f64, &str)> = groups
        .iter()
        .map(|group| (group.click_through_rate(), group.content_id()))
        .collect();
    ranked.sort_by(|left, right| ctr_order(left.0, right.0));

    let mut sequence = Vec::with_capacity(ranked.len());
    for (position, (ctr, content_id)) in ranked.iter().enumerate() {
        let last_of_run = match ranked.get(position + 1) {
            Some((next_ctr, _)) => ctr_order(*ctr, *next_ctr) != Ordering::Equal,
            None => true,
        };
        if last_of_run {
            sequence.push((*content_id).to_string());
        }
    }
    sequence
}

/// Stably reorders `items` by their content id's last index in `reference`.
///
/// Ids absent from the reference sort before present ones, so they can never
/// win a selection that takes the final element. Later occurrences of an id
/// in the reference override earlier ones.
pub fn sort_by_reference(items: &mut [AdvertisementContent], reference: &[String]) {
    let mut last_index = HashMap::with_capacity(reference.len());
    for (index, content_id) in reference.iter().enumerate() {
        last_index.insert(content_id.as_str(), index);
    }
    // Option<usize> ordering puts None (absent) first.
    items.sort_by_key(|item| last_index.get(item.content_id()).copied());
}
