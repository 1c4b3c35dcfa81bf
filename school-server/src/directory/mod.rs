//! The national school directory.
//!
//! Schools are bulk loaded from every regional office into an immutable
//! [`Snapshot`], searched by fuzzy and phonetic (initial consonant)
//! matching, and reloaded on a schedule without blocking readers.

mod loader;
mod phonetic;
mod rank;
mod service;
mod snapshot;

pub use loader::{LoaderConfig, load_all};
pub use phonetic::{is_initial_only, leading_consonant, phonetic_key};
pub use rank::{MatchRule, PreparedQuery, Ranked, rank};
pub use service::{DirectoryConfig, DirectoryStatus, RefreshOutcome, SchoolDirectory};
pub use snapshot::{IndexEntry, Snapshot};
