//! Structured diagnostics produced while reconstructing trips.
//!
//! Anomalies are returned to the caller rather than logged; a batch report is
//! the concatenation of every group's records in group order.

use std::fmt;

use serde::Serialize;

use crate::model::{TripGroupKey, Waypoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("WARNING"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// What went wrong. `position` fields are 1-based segment positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyKind {
    MissingEndpoint { position: usize },
    MultipleOrigins(Vec<Waypoint>),
    MultipleDestinations(Vec<Waypoint>),
    NoOrigin,
    NoDestination,
    EmptyGroup,
    FirstSegmentMissingOrigin,
    MissingSequenceHint,
    UnparsableDate,
}

impl AnomalyKind {
    pub fn severity(&self) -> Severity {
        match self {
            AnomalyKind::MissingEndpoint { .. }
            | AnomalyKind::MultipleOrigins(_)
            | AnomalyKind::MultipleDestinations(_)
            | AnomalyKind::MissingSequenceHint
            | AnomalyKind::UnparsableDate => Severity::Warning,
            AnomalyKind::NoOrigin
            | AnomalyKind::NoDestination
            | AnomalyKind::EmptyGroup
            | AnomalyKind::FirstSegmentMissingOrigin => Severity::Error,
        }
    }

    /// Short machine-friendly label.
    pub fn code(&self) -> &'static str {
        match self {
            AnomalyKind::MissingEndpoint { .. } => "missing_endpoint",
            AnomalyKind::MultipleOrigins(_) => "multiple_origins",
            AnomalyKind::MultipleDestinations(_) => "multiple_destinations",
            AnomalyKind::NoOrigin => "no_origin",
            AnomalyKind::NoDestination => "no_destination",
            AnomalyKind::EmptyGroup => "empty_group",
            AnomalyKind::FirstSegmentMissingOrigin => "first_segment_missing_origin",
            AnomalyKind::MissingSequenceHint => "missing_sequence_hint",
            AnomalyKind::UnparsableDate => "unparsable_date",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::MissingEndpoint { position } => {
                write!(f, "Missing origin or destination in segment {}.", position)
            }
            AnomalyKind::MultipleOrigins(candidates) => {
                write!(f, "Multiple trip origins found: {}", list(candidates))
            }
            AnomalyKind::MultipleDestinations(candidates) => {
                write!(f, "Multiple trip destinations found: {}", list(candidates))
            }
            AnomalyKind::NoOrigin => f.write_str("No trip origin found."),
            AnomalyKind::NoDestination => f.write_str("No trip destination found."),
            AnomalyKind::EmptyGroup => f.write_str("No segments found."),
            AnomalyKind::FirstSegmentMissingOrigin => {
                f.write_str("First segment has no origin; trip origin cannot be determined.")
            }
            AnomalyKind::MissingSequenceHint => {
                f.write_str("No sequence hint on every segment; segments kept in received order.")
            }
            AnomalyKind::UnparsableDate => {
                f.write_str("Travel dates are not all YYYY-MM-DD; dates ignored for ordering.")
            }
        }
    }
}

fn list(candidates: &[Waypoint]) -> String {
    let names = candidates
        .iter()
        .map(Waypoint::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", names)
}

/// One diagnostic for one trip group. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyRecord {
    pub group_key: TripGroupKey,
    pub severity: Severity,
    pub kind: AnomalyKind,
    pub message: String,
}

impl AnomalyRecord {
    pub fn new(group_key: &TripGroupKey, kind: AnomalyKind) -> Self {
        let message = format!("{}: {}", group_key, kind);
        Self {
            group_key: group_key.clone(),
            severity: kind.severity(),
            kind,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for AnomalyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Severity counts over a batch report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnomalySummary {
    pub warnings: usize,
    pub errors: usize,
}

impl AnomalySummary {
    pub fn of(anomalies: &[AnomalyRecord]) -> Self {
        anomalies.iter().fold(Self::default(), |mut summary, anomaly| {
            match anomaly.severity {
                Severity::Warning => summary.warnings += 1,
                Severity::Error => summary.errors += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.warnings + self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> TripGroupKey {
        TripGroupKey::new("A100", "Grace Hopper")
    }

    #[test]
    fn test_message_names_trip() {
        let record = AnomalyRecord::new(&key(), AnomalyKind::NoOrigin);
        assert_eq!(record.message, "Order A100, Passenger Grace Hopper: No trip origin found.");
        assert_eq!(record.severity, Severity::Error);
    }

    #[test]
    fn test_candidates_listed_in_order() {
        let candidates = vec![Waypoint::parse("BOS").unwrap(), Waypoint::parse("ORD").unwrap()];
        let record = AnomalyRecord::new(&key(), AnomalyKind::MultipleOrigins(candidates));
        assert!(record.message.ends_with("Multiple trip origins found: [BOS, ORD]"));
        assert_eq!(record.severity, Severity::Warning);
    }

    #[test]
    fn test_summary_counts() {
        let anomalies = vec![
            AnomalyRecord::new(&key(), AnomalyKind::MissingEndpoint { position: 2 }),
            AnomalyRecord::new(&key(), AnomalyKind::NoDestination),
            AnomalyRecord::new(&key(), AnomalyKind::EmptyGroup),
        ];
        let summary = AnomalySummary::of(&anomalies);
        assert_eq!(summary, AnomalySummary { warnings: 1, errors: 2 });
        assert_eq!(summary.total(), 3);
    }
}
