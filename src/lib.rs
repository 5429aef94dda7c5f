pub mod core;
pub mod seed;
pub mod utils;

pub use crate::core::blast_diagnostics::ScanStatistics;
pub use crate::core::blast_encoding::{Encoding, Residues, Sequence};
pub use crate::core::blast_extend::{DiagStruct, DiagonalTable};
pub use crate::core::blast_hits::{HitSink, InitHitList, InitialHit};
pub use crate::core::error::{Result, SeedError};
pub use crate::core::query_info::QueryInfo;
pub use crate::core::scan::{OffsetPair, ScanMode, ScanRange, Scanner, WordScanner};
pub use crate::seed::{UngappedSearch, WordFinderConfig};
pub use crate::utils::matrix::{Pssm, Scoring, ScoringMatrix, SubstitutionMatrix};
