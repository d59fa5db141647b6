use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ConsensusLineage, Rank};

/// Summary of one reduction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcaStats {
    /// Input rows read
    pub records: usize,

    /// Distinct UViG keys (one consensus each)
    pub groups: usize,

    /// Consensus lineages by their deepest resolved rank
    pub by_deepest_rank: BTreeMap<Rank, usize>,

    /// Consensus lineages with no resolved rank at all
    pub unresolved: usize,

    /// Consensus lineages truncated by a disagreement between hosts
    pub conflicts: usize,
}

impl LcaStats {
    pub fn from_run(records: usize, lineages: &[ConsensusLineage]) -> Self {
        let mut stats = Self {
            records,
            groups: lineages.len(),
            ..Self::default()
        };
        for lineage in lineages {
            match lineage.deepest_rank() {
                Some(rank) => *stats.by_deepest_rank.entry(rank).or_insert(0) += 1,
                None => stats.unresolved += 1,
            }
            if lineage.has_conflict() {
                stats.conflicts += 1;
            }
        }
        stats
    }
}
