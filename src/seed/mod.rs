//! Seeding: word finder drivers and the per-query search session

pub mod session;
pub mod word_finder;

pub use session::UngappedSearch;
pub use word_finder::{word_finder, word_finder_one_hit, word_finder_two_hit, WordFinderConfig};
