//! Core seams for trip reconstruction.
//!
//! Ingestion and output formats live outside the core. Callers implement
//! [`SegmentRecord`] and [`AnnotatedRecord`] for their own row types.

use crate::model::{ResolutionResult, SequenceHint, TripEndpoint, TripGroup};

/// Read-only view of one itinerary segment row.
///
/// Only `origin` and `destination` feed edge construction; previously written
/// annotations are never read back.
pub trait SegmentRecord {
    fn order_id(&self) -> Option<&str>;

    fn passenger(&self) -> Option<&str>;

    /// Travel date, kept as an opaque token.
    fn date(&self) -> Option<&str>;

    fn origin(&self) -> Option<&str>;

    fn destination(&self) -> Option<&str>;

    /// Chronological hint, if the source carries one.
    fn sequence_hint(&self) -> Option<SequenceHint> {
        None
    }
}

/// Receives the resolved trip endpoints for a row.
pub trait AnnotatedRecord {
    fn annotate(&mut self, origin: &TripEndpoint, destination: &TripEndpoint);
}

/// A strategy that turns one trip group into a resolved origin/destination pair.
///
/// Implementations hold no state between calls.
pub trait TripResolver: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the group must be chronologically ordered before `resolve`.
    fn requires_ordering(&self) -> bool {
        false
    }

    fn resolve(&self, group: &TripGroup) -> ResolutionResult;
}
