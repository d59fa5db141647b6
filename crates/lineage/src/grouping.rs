use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{LineageGroup, LineageRecord};

/// Order in which groups (and therefore output rows) are emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    /// Lexicographic by key
    #[default]
    Sorted,

    /// Order in which each key first appears in the input
    FirstSeen,
}

/// Partition records into one group per key.
///
/// Records keep their relative input order inside each group, since the
/// reducer's fold depends on it.
pub fn group_records(
    records: impl IntoIterator<Item = LineageRecord>,
    order: GroupOrder,
) -> Vec<LineageGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<LineageGroup> = Vec::new();

    for record in records {
        match index.get(&record.key) {
            Some(&slot) => groups[slot].push(record),
            None => {
                index.insert(record.key.clone(), groups.len());
                groups.push(LineageGroup::new(record));
            }
        }
    }

    if order == GroupOrder::Sorted {
        groups.sort_by(|a, b| a.key().cmp(b.key()));
    }
    groups
}
