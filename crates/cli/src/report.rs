use host_lca_lineage::{GroupOrder, LcaStats, Rank};
use serde::Serialize;
use std::path::Path;

/// Machine-readable summary of one `lca` run
#[derive(Debug, Serialize)]
pub struct LcaReport {
    pub input: String,
    pub output: String,
    pub order: GroupOrder,
    pub stats: LcaStats,
}

impl LcaReport {
    pub fn new(input: &Path, output: &Path, order: GroupOrder, stats: LcaStats) -> Self {
        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            order,
            stats,
        }
    }

    /// One-line summary for the log
    pub fn summary_line(&self) -> String {
        let depths = Rank::ALL
            .iter()
            .filter_map(|rank| {
                self.stats
                    .by_deepest_rank
                    .get(rank)
                    .map(|count| format!("{rank}={count}"))
            })
            .collect::<Vec<_>>();
        format!(
            "{} records -> {} UViGs (deepest rank: {}; unresolved={}, with conflicts={})",
            self.stats.records,
            self.stats.groups,
            if depths.is_empty() {
                "none".to_string()
            } else {
                depths.join(", ")
            },
            self.stats.unresolved,
            self.stats.conflicts
        )
    }
}
