//! Unit tests for seed/session.rs

use seedext::core::blast_encoding::{encode_ascii_nucleotides, Sequence};
use seedext::core::blast_extend::DiagonalTable;
use seedext::core::error::SeedError;
use seedext::core::query_info::QueryInfo;
use seedext::core::scan::{ScanMode, WordScanner};
use seedext::seed::{UngappedSearch, WordFinderConfig};
use seedext::utils::matrix::{Pssm, ScoringMatrix};

use crate::helpers::{acgt_repeat, dna_matrix};

fn seed_error(err: &anyhow::Error) -> Option<&SeedError> {
    err.downcast_ref::<SeedError>()
}

fn nucl_config() -> WordFinderConfig {
    WordFinderConfig::nucleotide()
        .with_word_size(8)
        .with_x_dropoff(10)
        .with_cutoff_score(8)
}

#[test]
fn test_search_subjects_sorted_and_counted() {
    let query = encode_ascii_nucleotides(b"GGATCCAAGCTTGAATTCCTGCAG");
    let info = QueryInfo::single(query.len());
    let matrix = ScoringMatrix::from(dna_matrix());
    let scanner = WordScanner::new(ScanMode::Nucleotide, &query, &info, 8).unwrap();

    let subjects = vec![
        // 12-base match
        Sequence::from_ascii_nucleotides(b"TTTTGGATCCAAGCTTTTTT"),
        // no match
        Sequence::from_ascii_nucleotides(b"CCCCCCCCCCCCCCCCCCCC"),
        // full query
        Sequence::from_ascii_nucleotides(b"AGGATCCAAGCTTGAATTCCTGCAGA"),
        // shorter than a word
        Sequence::from_ascii_nucleotides(b"GGATC"),
    ];

    let mut search = UngappedSearch::new(&scanner, &matrix, &query, info, nucl_config()).unwrap();
    let (hits, batch) = search.search_subjects(&subjects).unwrap();

    assert_eq!(search.subjects_searched(), 4);
    assert_eq!(search.statistics(), batch);
    assert_eq!(batch.hits_saved as usize, hits.len());

    let scores: Vec<i32> = hits.iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![24, 12]);
    assert_eq!(hits.as_slice()[0].subject_start, 1);
    assert_eq!(hits.as_slice()[1].subject_start, 4);

    // Table advanced by every subject length, short subject included
    let total: i32 = subjects.iter().map(|s| s.len() as i32).sum();
    assert_eq!(search.table().offset(), total);
}

#[test]
fn test_two_hit_session() {
    let query = acgt_repeat(40);
    let info = QueryInfo::single(query.len());
    let matrix = ScoringMatrix::from(dna_matrix());
    let scanner = WordScanner::new(ScanMode::Protein, &query, &info, 4).unwrap();
    let config = WordFinderConfig::protein_two_hit()
        .with_word_size(4)
        .with_x_dropoff(10)
        .with_two_hit_window(20);

    let subject = Sequence::from_residues(acgt_repeat(40));
    let mut search = UngappedSearch::new(&scanner, &matrix, &query, info, config).unwrap();
    let (hits, stats) = search.search_subjects([&subject]).unwrap();

    assert!(stats.hits_extended > 0);
    assert_eq!(stats.right_extensions, stats.hits_extended);
    // The main diagonal is covered by a single extension
    let main: Vec<_> = hits.iter().filter(|h| h.diagonal() == 0).collect();
    assert_eq!(main.len(), 1);
    assert_eq!(main[0].length, 40);
    assert_eq!(main[0].score, 40);
    assert_eq!(search.table().offset(), 20 + 40 + 20);
}

#[test]
fn test_rejects_invalid_config() {
    let query = acgt_repeat(20);
    let info = QueryInfo::single(query.len());
    let matrix = ScoringMatrix::from(dna_matrix());
    let scanner = WordScanner::new(ScanMode::Protein, &query, &info, 3).unwrap();

    let config = WordFinderConfig::protein_two_hit().with_two_hit_window(0);
    let err = UngappedSearch::new(&scanner, &matrix, &query, info, config)
        .err()
        .unwrap();
    assert_eq!(seed_error(&err), Some(&SeedError::InvalidWindow { window: 0 }));
}

#[test]
fn test_rps_requires_pssm() {
    let query = acgt_repeat(20);
    let info = QueryInfo::single(query.len());
    let scanner = WordScanner::new(ScanMode::Rps, &query, &info, 3).unwrap();
    let config = WordFinderConfig::protein_one_hit();

    let substitution = ScoringMatrix::from(dna_matrix());
    let err = UngappedSearch::new(&scanner, &substitution, &query, info.clone(), config)
        .err()
        .unwrap();
    assert_eq!(
        seed_error(&err),
        Some(&SeedError::ScoringMismatch { mode: ScanMode::Rps })
    );

    let short = ScoringMatrix::from(Pssm::from_query(&query[..10], &dna_matrix()));
    let err = UngappedSearch::new(&scanner, &short, &query, info.clone(), config)
        .err()
        .unwrap();
    assert_eq!(
        seed_error(&err),
        Some(&SeedError::PssmTooShort {
            rows: 10,
            query_length: 20
        })
    );

    let pssm = ScoringMatrix::from(Pssm::from_query(&query, &dna_matrix()));
    let mut search = UngappedSearch::new(&scanner, &pssm, &query, info, config).unwrap();
    let subject = Sequence::from_residues(acgt_repeat(20));
    let (hits, _) = search.search_subjects([&subject]).unwrap();
    assert!(hits.iter().any(|h| h.diagonal() == 0 && h.score == 20));
}

#[test]
fn test_subject_error_carries_context() {
    let query = acgt_repeat(20);
    let info = QueryInfo::single(query.len());
    let matrix = ScoringMatrix::from(dna_matrix());
    let scanner = WordScanner::new(ScanMode::Protein, &query, &info, 3).unwrap();
    let mut search =
        UngappedSearch::new(&scanner, &matrix, &query, info, WordFinderConfig::protein_one_hit()).unwrap();

    let good = Sequence::from_residues(acgt_repeat(20));
    let packed = Sequence::from_ascii_nucleotides(b"ACGTACGTACGT");
    let err = search.search_subjects([&good, &packed]).err().unwrap();

    assert!(format!("{:#}", err).contains("subject #1"));
    assert!(matches!(seed_error(&err), Some(SeedError::EncodingMismatch { .. })));
    assert_eq!(search.subjects_searched(), 1);
}

#[test]
fn test_table_reuse_across_queries() {
    let matrix = ScoringMatrix::from(dna_matrix());
    let config = WordFinderConfig::protein_two_hit()
        .with_word_size(4)
        .with_x_dropoff(10)
        .with_two_hit_window(16);

    let first = acgt_repeat(48);
    let first_info = QueryInfo::single(first.len());
    let first_scanner = WordScanner::new(ScanMode::Protein, &first, &first_info, 4).unwrap();
    let mut search = UngappedSearch::new(&first_scanner, &matrix, &first, first_info, config).unwrap();
    let subject = Sequence::from_residues(acgt_repeat(48));
    search.search_subjects([&subject]).unwrap();
    let mut table: DiagonalTable = search.into_table();

    let second = acgt_repeat(32);
    let second_info = QueryInfo::single(second.len());
    let second_scanner = WordScanner::new(ScanMode::Protein, &second, &second_info, 4).unwrap();

    // Not cleared: rejected
    let err = UngappedSearch::with_table(
        table.clone(),
        &second_scanner,
        &matrix,
        &second,
        second_info.clone(),
        config,
    )
    .err()
    .unwrap();
    assert_eq!(seed_error(&err), Some(&SeedError::TableNotCleared));

    // Other mode: rejected
    table.clear();
    let err = UngappedSearch::with_table(
        table.clone(),
        &second_scanner,
        &matrix,
        &second,
        second_info.clone(),
        WordFinderConfig::protein_one_hit().with_word_size(4),
    )
    .err()
    .unwrap();
    assert!(matches!(seed_error(&err), Some(SeedError::ModeMismatch { .. })));

    // Cleared and large enough: accepted, and results match a fresh table
    let mut reused =
        UngappedSearch::with_table(table, &second_scanner, &matrix, &second, second_info.clone(), config).unwrap();
    assert_eq!(reused.table().query_length(), 32);
    let subject = Sequence::from_residues(acgt_repeat(32));
    let (reused_hits, _) = reused.search_subjects([&subject]).unwrap();

    let mut fresh = UngappedSearch::new(&second_scanner, &matrix, &second, second_info, config).unwrap();
    let (fresh_hits, _) = fresh.search_subjects([&subject]).unwrap();
    assert_eq!(reused_hits.as_slice(), fresh_hits.as_slice());
}

#[test]
fn test_reuse_rejects_small_table() {
    let matrix = ScoringMatrix::from(dna_matrix());
    let config = WordFinderConfig::protein_one_hit();
    let small = DiagonalTable::new(16, false, 0).unwrap();

    let query = acgt_repeat(100);
    let info = QueryInfo::single(query.len());
    let scanner = WordScanner::new(ScanMode::Protein, &query, &info, 3).unwrap();
    let err = UngappedSearch::with_table(small, &scanner, &matrix, &query, info, config)
        .err()
        .unwrap();
    assert!(matches!(seed_error(&err), Some(SeedError::TableTooSmall { .. })));
}
