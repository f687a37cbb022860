//! End-to-end tests over a realistic itinerary export.
//!
//! These tests validate the full pipeline: CSV ingestion, reconstruction,
//! annotated output, anomaly report and customer enrichment.

mod fixtures;

use trip_chain::anomaly::AnomalyKind;
use trip_chain::enrichment::{
    CUSTOMER_EMAIL_COLUMN, CustomerTable, SUMMARY_COLUMNS, TRIP_EMAIL_COLUMN, customer_summary, enrich,
};
use trip_chain::reconstruct::{ReconstructOptions, ResolverChoice};
use trip_chain::table::{AnnotatedTable, CsvColumns, TripTable, write_anomalies};

use fixtures::{CUSTOMERS_CSV, EXPORT_CSV};

fn reconstruct(resolver: ResolverChoice) -> AnnotatedTable {
    let table = TripTable::from_reader(EXPORT_CSV.as_bytes(), &CsvColumns::default()).unwrap();
    table
        .reconstruct(&ReconstructOptions {
            resolver,
            ..ReconstructOptions::default()
        })
        .unwrap()
}

fn trips_by_row(annotated: &AnnotatedTable) -> Vec<(&str, &str)> {
    annotated
        .table
        .rows()
        .iter()
        .map(|row| (row.trip_origin(), row.trip_destination()))
        .collect()
}

#[test]
fn test_chain_resolution_of_export() {
    let annotated = reconstruct(ResolverChoice::Chain);

    assert_eq!(
        trips_by_row(&annotated),
        vec![
            ("BOS", "HNL"),
            ("BOS", "HNL"),
            ("BOS", "HNL"),
            ("DEN", "NRT"),
            ("DEN", "NRT"),
            ("DEN", "NRT"),
            ("DEN", "NRT"),
            ("FRA", "Unknown"),
        ]
    );

    let kinds: Vec<_> = annotated.anomalies.iter().map(|a| a.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![AnomalyKind::MissingEndpoint { position: 1 }, AnomalyKind::NoDestination]
    );
}

#[test]
fn test_degree_resolution_of_export() {
    let annotated = reconstruct(ResolverChoice::Degree);
    let trips = trips_by_row(&annotated);

    assert_eq!(trips[0], ("BOS", "HNL"));
    assert_eq!(trips[3], ("Unknown", "Unknown"));
    assert_eq!(trips[7], ("Unknown", "Unknown"));
    assert_eq!(annotated.trips.len(), 3);
    assert_eq!(annotated.trips[1].segment_count, 4);
}

#[test]
fn test_output_preserves_rows_and_columns() {
    let annotated = reconstruct(ResolverChoice::Chain);
    let mut out = Vec::new();
    annotated.table.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), EXPORT_CSV.lines().count());
    assert!(lines[0].ends_with(",Customer Email,Trip Origin,Trip Destination"));
    assert_eq!(
        lines[1],
        "A-100,Maria Silva,2024-06-01,ORD,SFO,2,maria@example.com,BOS,HNL"
    );
}

#[test]
fn test_anomaly_report_export() {
    let annotated = reconstruct(ResolverChoice::Chain);
    let mut out = Vec::new();
    write_anomalies(&annotated.anomalies, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("A-102,Lea Roth,,Warning,missing_endpoint,"));
    assert!(text.contains("A-102,Lea Roth,,Error,no_destination,"));
}

#[test]
fn test_enrichment_and_summary() {
    let mut table = reconstruct(ResolverChoice::Chain).table;
    let customers = CustomerTable::from_reader(CUSTOMERS_CSV.as_bytes(), CUSTOMER_EMAIL_COLUMN).unwrap();

    let matched = enrich(&mut table, &customers, TRIP_EMAIL_COLUMN).unwrap();
    assert_eq!(matched, 7);

    let city = table.column_index("City").unwrap();
    assert_eq!(table.rows()[3].get(city), Some("Denver"));
    assert_eq!(table.rows()[7].get(city), Some(""));

    let summary = customer_summary(&table, TRIP_EMAIL_COLUMN, SUMMARY_COLUMNS).unwrap();
    let emails: Vec<&str> = summary.iter().map(|s| s.email.as_str()).collect();
    assert_eq!(emails, vec!["maria@example.com", "ken@example.com", "lea@example.com"]);
    assert_eq!(summary[1].values[0], "Ken Ito");
    assert!(summary.iter().all(|s| s.transactions == 1));
}
