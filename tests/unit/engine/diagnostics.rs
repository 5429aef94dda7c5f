//! Unit tests for core/blast_diagnostics.rs

use seedext::core::blast_diagnostics::{diagnostics_enabled, ScanStatistics};
use std::env;

#[test]
fn test_diagnostics_enabled() {
    env::remove_var("SEEDEXT_DIAGNOSTICS");
    assert!(!diagnostics_enabled());

    env::set_var("SEEDEXT_DIAGNOSTICS", "1");
    assert!(diagnostics_enabled());

    env::set_var("SEEDEXT_DIAGNOSTICS", "true");
    assert!(diagnostics_enabled());

    env::set_var("SEEDEXT_DIAGNOSTICS", "TRUE");
    assert!(diagnostics_enabled());

    env::set_var("SEEDEXT_DIAGNOSTICS", "0");
    assert!(!diagnostics_enabled());

    env::set_var("SEEDEXT_DIAGNOSTICS", "yes");
    assert!(!diagnostics_enabled());

    env::remove_var("SEEDEXT_DIAGNOSTICS");
}

#[test]
fn test_statistics_aggregate() {
    let per_subject = vec![
        ScanStatistics {
            hits_scanned: 7,
            hits_extended: 2,
            hits_saved: 1,
            seeds_too_far: 3,
            right_extensions: 1,
            ..Default::default()
        },
        ScanStatistics {
            hits_scanned: 4,
            seeds_overlap: 2,
            seeds_context_boundary: 1,
            ..Default::default()
        },
    ];

    let total: ScanStatistics = per_subject.iter().sum();
    assert_eq!(total.hits_scanned, 11);
    assert_eq!(total.hits_extended, 2);
    assert_eq!(total.seeds_too_far, 3);
    assert_eq!(total.seeds_overlap, 2);
    assert_eq!(total.seeds_context_boundary, 1);

    let mut running = ScanStatistics::new();
    for s in per_subject {
        running += s;
    }
    assert_eq!(running, total);

    // Logging must not panic without a subscriber
    total.log_summary("test");
}
