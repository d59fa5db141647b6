use serde::{Deserialize, Serialize};
use std::fmt;

/// Header of the grouping key column
pub const KEY_COLUMN: &str = "UViGs";

/// Number of hierarchical ranks in a lineage
pub const RANK_COUNT: usize = 6;

/// Full header of lineage tables, key first
pub const COLUMNS: [&str; RANK_COUNT + 1] = [
    KEY_COLUMN, "Phylum", "Class", "Order", "Family", "Genus", "Species",
];

/// Taxonomic rank, ordered from broadest to most specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// All ranks in descending order (Phylum first)
    pub const ALL: [Rank; RANK_COUNT] = [
        Rank::Phylum,
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Column header for this rank
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Phylum => "Phylum",
            Self::Class => "Class",
            Self::Order => "Order",
            Self::Family => "Family",
            Self::Genus => "Genus",
            Self::Species => "Species",
        }
    }

    /// Zero-based position of this rank within a lineage
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One input row: a UViG paired with one candidate host lineage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageRecord {
    /// Grouping key (UViG identifier)
    pub key: String,

    /// Rank labels, `None` where the row carries no information
    pub ranks: [Option<String>; RANK_COUNT],
}

impl LineageRecord {
    #[must_use]
    pub fn new(key: impl Into<String>, ranks: [Option<String>; RANK_COUNT]) -> Self {
        Self {
            key: key.into(),
            ranks,
        }
    }

    /// Build a record from a contiguous list of labels starting at Phylum
    #[must_use]
    pub fn from_labels(key: impl Into<String>, labels: &[&str]) -> Self {
        let mut ranks: [Option<String>; RANK_COUNT] = Default::default();
        for (slot, label) in ranks.iter_mut().zip(labels) {
            *slot = Some((*label).to_string());
        }
        Self::new(key, ranks)
    }

    #[must_use]
    pub fn rank(&self, rank: Rank) -> Option<&str> {
        self.ranks[rank.index()].as_deref()
    }

    /// Labels from Phylum onward, stopping at the first absent rank
    #[must_use]
    pub fn present_prefix(&self) -> Vec<&str> {
        self.ranks.iter().map_while(|rank| rank.as_deref()).collect()
    }
}

/// State of one rank in a consensus lineage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSlot {
    /// Every folded record agrees on this label
    Resolved(String),

    /// At least one record carried no information this deep
    Absent,

    /// Records disagree here or at a broader rank
    Conflict,
}

impl RankSlot {
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Resolved(label) => Some(label),
            Self::Absent | Self::Conflict => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Deepest point of agreement among the candidate hosts of one UViG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusLineage {
    pub key: String,
    pub slots: [RankSlot; RANK_COUNT],
}

impl ConsensusLineage {
    #[must_use]
    pub fn new(key: impl Into<String>, slots: [RankSlot; RANK_COUNT]) -> Self {
        Self {
            key: key.into(),
            slots,
        }
    }

    #[must_use]
    pub fn slot(&self, rank: Rank) -> &RankSlot {
        &self.slots[rank.index()]
    }

    #[must_use]
    pub fn label(&self, rank: Rank) -> Option<&str> {
        self.slot(rank).label()
    }

    /// Resolved labels from Phylum down to the first unresolved rank
    #[must_use]
    pub fn resolved_prefix(&self) -> Vec<&str> {
        self.slots.iter().map_while(RankSlot::label).collect()
    }

    /// Number of resolved ranks
    #[must_use]
    pub fn depth(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_resolved()).count()
    }

    /// Most specific resolved rank, `None` when nothing is resolved
    #[must_use]
    pub fn deepest_rank(&self) -> Option<Rank> {
        self.depth().checked_sub(1).and_then(Rank::from_index)
    }

    #[must_use]
    pub fn has_conflict(&self) -> bool {
        self.slots.contains(&RankSlot::Conflict)
    }

    /// No resolved rank follows an unresolved one
    #[must_use]
    pub fn is_prefix_closed(&self) -> bool {
        let depth = self.depth();
        self.slots[depth..].iter().all(|slot| !slot.is_resolved())
    }
}

/// Records sharing one key, in input order
///
/// A group always holds at least one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageGroup {
    records: Vec<LineageRecord>,
}

impl LineageGroup {
    #[must_use]
    pub fn new(first: LineageRecord) -> Self {
        Self {
            records: vec![first],
        }
    }

    /// Append a record; callers keep keys consistent
    pub fn push(&mut self, record: LineageRecord) {
        debug_assert_eq!(record.key, self.key());
        self.records.push(record);
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.records[0].key
    }

    #[must_use]
    pub fn records(&self) -> &[LineageRecord] {
        &self.records
    }

    #[must_use]
    pub fn first(&self) -> &LineageRecord {
        &self.records[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}
