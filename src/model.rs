//! Trip segment data model.

use std::cmp::Ordering;
use std::fmt;

use crate::anomaly::AnomalyRecord;

/// Rendered value for an unresolved trip endpoint.
pub const UNKNOWN: &str = "Unknown";

/// An opaque location token (airport, station, stop code).
///
/// Waypoints are trimmed but keep their case; equality is exact string
/// equality on the trimmed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Waypoint(String);

impl Waypoint {
    /// Builds a waypoint from a raw field, or `None` if it is blank.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved trip endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TripEndpoint {
    Known(Waypoint),
    Unknown,
}

impl From<Option<Waypoint>> for TripEndpoint {
    fn from(value: Option<Waypoint>) -> Self {
        value.map_or(TripEndpoint::Unknown, TripEndpoint::Known)
    }
}

impl fmt::Display for TripEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripEndpoint::Known(waypoint) => fmt::Display::fmt(waypoint, f),
            TripEndpoint::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Chronological ordering hint for a segment.
///
/// Explicit hints (sequence number, barcode, segment id) take priority over
/// departure times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceHint {
    Explicit(String),
    DepartureTime(String),
}

impl SequenceHint {
    fn rank(&self) -> u8 {
        match self {
            SequenceHint::Explicit(_) => 0,
            SequenceHint::DepartureTime(_) => 1,
        }
    }

    fn value(&self) -> &str {
        match self {
            SequenceHint::Explicit(value) | SequenceHint::DepartureTime(value) => value,
        }
    }
}

impl PartialOrd for SequenceHint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SequenceHint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| natural_cmp(self.value(), other.value()))
    }
}

/// Numeric comparison when both sides are unsigned integers, lexicographic otherwise.
pub(crate) fn natural_cmp(left: &str, right: &str) -> Ordering {
    let (left, right) = (left.trim(), right.trim());
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        _ => left.cmp(right),
    }
}

/// One directed, well-formed edge of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEdge {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub sequence: Option<SequenceHint>,
    /// Position of the originating row in the input batch.
    pub source_row: usize,
}

/// A row's view inside a trip group. Endpoints may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSegment {
    pub origin: Option<Waypoint>,
    pub destination: Option<Waypoint>,
    pub date: Option<String>,
    pub sequence: Option<SequenceHint>,
    pub source_row: usize,
}

impl TripSegment {
    /// The directed edge for this segment, if both endpoints are present.
    pub fn edge(&self) -> Option<SegmentEdge> {
        match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => Some(SegmentEdge {
                origin: origin.clone(),
                destination: destination.clone(),
                sequence: self.sequence.clone(),
                source_row: self.source_row,
            }),
            _ => None,
        }
    }
}

/// Identifies one trip: order, passenger and optionally the travel date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripGroupKey {
    pub order_id: String,
    pub passenger: String,
    pub date: Option<String>,
}

impl TripGroupKey {
    pub fn new(order_id: impl Into<String>, passenger: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            passenger: passenger.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl fmt::Display for TripGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order {}, Passenger {}", self.order_id, self.passenger)?;
        if let Some(date) = &self.date {
            write!(f, ", Date {}", date)?;
        }
        Ok(())
    }
}

/// All segments sharing one [`TripGroupKey`], in received (or sorted) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripGroup {
    pub key: TripGroupKey,
    pub segments: Vec<TripSegment>,
}

impl TripGroup {
    pub fn new(key: TripGroupKey) -> Self {
        Self {
            key,
            segments: Vec::new(),
        }
    }

    /// Well-formed edges in segment order.
    pub fn edges(&self) -> impl Iterator<Item = SegmentEdge> + '_ {
        self.segments.iter().filter_map(TripSegment::edge)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Output of a single resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub origin: TripEndpoint,
    pub destination: TripEndpoint,
    pub anomalies: Vec<AnomalyRecord>,
}

impl ResolutionResult {
    pub fn unresolved(anomalies: Vec<AnomalyRecord>) -> Self {
        Self {
            origin: TripEndpoint::Unknown,
            destination: TripEndpoint::Unknown,
            anomalies,
        }
    }
}
