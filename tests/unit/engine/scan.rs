//! Unit tests for core/scan

use seedext::core::blast_encoding::{encode_ascii_nucleotides, Sequence};
use seedext::core::constants::OFFSET_ARRAY_SIZE;
use seedext::core::query_info::QueryInfo;
use seedext::core::scan::{OffsetPair, ScanMode, ScanRange, Scanner, WordScanner};

use crate::helpers::pair;

fn scan_all<S: Scanner>(scanner: &S, subject: &Sequence) -> Vec<OffsetPair> {
    let mut out = Vec::new();
    let mut pairs = vec![OffsetPair::default(); scanner.offset_array_size()];
    let Some(mut range) = ScanRange::for_subject(subject.len(), scanner.word_length()) else {
        return out;
    };
    while !range.is_done() {
        let n = scanner.scan(subject, &mut pairs, &mut range);
        out.extend_from_slice(&pairs[..n]);
    }
    out
}

#[test]
fn test_packed_scan_finds_every_occurrence() {
    let q = encode_ascii_nucleotides(b"ACGTACGT");
    let scanner = WordScanner::new(ScanMode::Nucleotide, &q, &QueryInfo::single(q.len()), 4).unwrap();
    let subject = Sequence::from_ascii_nucleotides(b"ACGTACGT");
    let hits = scan_all(&scanner, &subject);
    assert_eq!(
        hits,
        vec![
            pair(0, 0),
            pair(4, 0),
            pair(1, 1),
            pair(2, 2),
            pair(3, 3),
            pair(0, 4),
            pair(4, 4),
        ]
    );
}

#[test]
fn test_protein_scan_on_residue_subject() {
    let q = vec![5u8, 9, 14, 2, 5, 9, 14];
    let scanner = WordScanner::new(ScanMode::Protein, &q, &QueryInfo::single(q.len()), 3).unwrap();
    let subject = Sequence::from_residues(vec![1u8, 5, 9, 14, 0]);
    assert_eq!(scan_all(&scanner, &subject), vec![pair(0, 1), pair(4, 1)]);
}

#[test]
fn test_offset_array_size_covers_longest_chain() {
    let q = vec![3u8; 50];
    let scanner = WordScanner::new(ScanMode::Protein, &q, &QueryInfo::single(q.len()), 3).unwrap();
    assert_eq!(scanner.longest_chain(), 48);
    assert_eq!(scanner.offset_array_size(), OFFSET_ARRAY_SIZE + 48);
}

#[test]
fn test_subject_shorter_than_word_has_no_range() {
    assert!(ScanRange::for_subject(3, 4).is_none());
    let r = ScanRange::for_subject(4, 4).unwrap();
    assert!(!r.is_done());
    assert_eq!((r.first, r.last), (0, 0));
}

#[test]
fn test_query_info_layout() {
    let info = QueryInfo::from_lengths(&[12, 0, 30]);
    assert_eq!(info.num_contexts(), 3);
    assert_eq!(info.total_length(), 42);
    assert_eq!(info.context_of(11), 0);
    assert_eq!(info.context_of(12), 2);
    assert_eq!(info.context_start(2), 12);
}
