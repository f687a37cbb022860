//! Test fixtures for trip-chain.
//!
//! Provides:
//! - A row type implementing the ingestion and annotation seams
//! - Realistic multi-leg itineraries (IATA airport codes)

#![allow(dead_code)]

pub mod itineraries;

pub use itineraries::*;

use trip_chain::model::{SequenceHint, TripEndpoint};
use trip_chain::traits::{AnnotatedRecord, SegmentRecord};

/// Builder for test segment rows with sensible defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestSegment {
    pub order: String,
    pub passenger: String,
    pub date: Option<String>,
    pub origin: String,
    pub destination: String,
    pub sequence: Option<String>,
    pub trip_origin: Option<String>,
    pub trip_destination: Option<String>,
}

impl TestSegment {
    pub fn new(order: &str, passenger: &str, origin: &str, destination: &str) -> Self {
        Self {
            order: order.to_string(),
            passenger: passenger.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            ..Self::default()
        }
    }

    pub fn on(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn seq(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence.to_string());
        self
    }

    pub fn trip(&self) -> (&str, &str) {
        (
            self.trip_origin.as_deref().unwrap_or("<none>"),
            self.trip_destination.as_deref().unwrap_or("<none>"),
        )
    }
}

impl SegmentRecord for TestSegment {
    fn order_id(&self) -> Option<&str> {
        Some(&self.order)
    }

    fn passenger(&self) -> Option<&str> {
        Some(&self.passenger)
    }

    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn origin(&self) -> Option<&str> {
        Some(&self.origin)
    }

    fn destination(&self) -> Option<&str> {
        Some(&self.destination)
    }

    fn sequence_hint(&self) -> Option<SequenceHint> {
        self.sequence.clone().map(SequenceHint::Explicit)
    }
}

impl AnnotatedRecord for TestSegment {
    fn annotate(&mut self, origin: &TripEndpoint, destination: &TripEndpoint) {
        self.trip_origin = Some(origin.to_string());
        self.trip_destination = Some(destination.to_string());
    }
}

/// Rows for one trip, numbered in the given order.
pub fn legs(order: &str, passenger: &str, legs: &[(&str, &str)]) -> Vec<TestSegment> {
    legs.iter()
        .enumerate()
        .map(|(idx, (origin, destination))| {
            TestSegment::new(order, passenger, origin, destination).seq(idx as u32 + 1)
        })
        .collect()
}
