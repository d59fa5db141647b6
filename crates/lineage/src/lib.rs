//! # Host LCA lineage
//!
//! Consensus host taxonomy for uncultivated virus genomes (UViGs).
//!
//! A UViG is often linked to several candidate hosts. This crate reduces
//! the candidate host lineages of each UViG to their lowest common
//! ancestor: the deepest rank at which every candidate agrees.
//!
//! ## Architecture
//!
//! ```text
//! host table (TSV)
//!     │
//!     ├──> Loader   → LineageRecord[] (input order, gaps kept positional)
//!     │
//!     ├──> Grouping → LineageGroup[] (one per UViG, non-empty)
//!     │
//!     ├──> Reducer  → ConsensusLineage[] (pairwise LCA fold)
//!     │
//!     └──> Writer   → consensus table (TSV, "-" for unresolved ranks)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use host_lca_lineage::{reduce, LineageGroup, LineageRecord, Rank};
//!
//! let mut group = LineageGroup::new(LineageRecord::from_labels(
//!     "Virus_002",
//!     &["P_1", "C_2", "O_2", "F_2"],
//! ));
//! group.push(LineageRecord::from_labels(
//!     "Virus_002",
//!     &["P_1", "C_2", "O_2", "F_3"],
//! ));
//!
//! let consensus = reduce(&group);
//! assert_eq!(consensus.resolved_prefix(), vec!["P_1", "C_2", "O_2"]);
//! assert_eq!(consensus.deepest_rank(), Some(Rank::Order));
//! ```

mod config;
mod error;
mod grouping;
mod loader;
mod reducer;
mod stats;
mod types;
mod writer;

pub use config::{TableFormat, DEFAULT_PLACEHOLDER};
pub use error::{LineageError, Result};
pub use grouping::{group_records, GroupOrder};
pub use loader::{load, parse_table};
pub use reducer::{reduce, reduce_all};
pub use stats::LcaStats;
pub use types::{
    ConsensusLineage, LineageGroup, LineageRecord, Rank, RankSlot, COLUMNS, KEY_COLUMN,
    RANK_COUNT,
};
pub use writer::{write, write_table};
