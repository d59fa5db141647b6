//! Streaming lowest-common-ancestor fold over one group of lineages.

use crate::types::{ConsensusLineage, LineageGroup, RankSlot, RANK_COUNT};

/// Compute the consensus lineage of a group.
///
/// The first record's present prefix seeds the candidate; every later
/// record is merged position by position in input order. Folding stops as
/// soon as no rank remains resolved.
#[must_use]
pub fn reduce(group: &LineageGroup) -> ConsensusLineage {
    let mut candidate = seed(&group.first().present_prefix());

    for record in &group.records()[1..] {
        candidate = merge(candidate, &record.present_prefix());
        if !candidate.iter().any(RankSlot::is_resolved) {
            break;
        }
    }

    ConsensusLineage::new(group.key(), candidate)
}

/// Reduce every group, preserving group order.
pub fn reduce_all(groups: &[LineageGroup]) -> Vec<ConsensusLineage> {
    groups
        .iter()
        .map(|group| {
            let consensus = reduce(group);
            log::debug!(
                "{}: {} record(s) -> depth {} ({})",
                consensus.key,
                group.len(),
                consensus.depth(),
                consensus
                    .deepest_rank()
                    .map_or("unresolved", |rank| rank.name())
            );
            consensus
        })
        .collect()
}

fn seed(prefix: &[&str]) -> [RankSlot; RANK_COUNT] {
    std::array::from_fn(|i| match prefix.get(i) {
        Some(label) => RankSlot::Resolved((*label).to_string()),
        None => RankSlot::Absent,
    })
}

fn merge(candidate: [RankSlot; RANK_COUNT], prefix: &[&str]) -> [RankSlot; RANK_COUNT] {
    let mut merged = candidate;
    for (i, slot) in merged.iter_mut().enumerate() {
        let next = match (&*slot, prefix.get(i)) {
            (RankSlot::Resolved(label), Some(other)) if label == other => continue,
            (RankSlot::Resolved(_), Some(_)) | (RankSlot::Conflict, _) => RankSlot::Conflict,
            (RankSlot::Resolved(_) | RankSlot::Absent, None) | (RankSlot::Absent, Some(_)) => {
                RankSlot::Absent
            }
        };
        *slot = next;
    }
    close_prefix(&mut merged);
    merged
}

/// Agreement below an unresolved rank is not a common ancestor.
fn close_prefix(slots: &mut [RankSlot; RANK_COUNT]) {
    let Some(first_gap) = slots.iter().position(|slot| !slot.is_resolved()) else {
        return;
    };
    for slot in &mut slots[first_gap + 1..] {
        if slot.is_resolved() {
            *slot = RankSlot::Conflict;
        }
    }
}
