//! Sequential chain trip resolver.
//!
//! Walks chronologically ordered segments and stops at the first segment that
//! departs from an already visited waypoint. That fold-back marks the
//! turnaround point of the journey, so a round trip flattened into a single
//! ordered list still resolves to its logical destination.

use std::collections::HashSet;

use crate::anomaly::{AnomalyKind, AnomalyRecord};
use crate::model::{ResolutionResult, SegmentEdge, TripEndpoint, TripGroup, TripGroupKey};
use crate::traits::TripResolver;

/// Order-sensitive resolver. Groups must be sorted before resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainResolver;

impl TripResolver for ChainResolver {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn requires_ordering(&self) -> bool {
        true
    }

    fn resolve(&self, group: &TripGroup) -> ResolutionResult {
        resolve_by_chain(
            group,
            &group.key.order_id,
            &group.key.passenger,
            group.key.date.as_deref(),
        )
    }
}

/// Resolve an ordered trip group by walking it as a chain.
///
/// `order_number`, `passenger` and `schedule_date` only label anomalies.
pub fn resolve_by_chain(
    group: &TripGroup,
    order_number: &str,
    passenger: &str,
    schedule_date: Option<&str>,
) -> ResolutionResult {
    let label = TripGroupKey {
        order_id: order_number.to_string(),
        passenger: passenger.to_string(),
        date: schedule_date.map(str::to_string),
    };
    let mut anomalies = Vec::new();

    let Some(first) = group.segments.first() else {
        anomalies.push(AnomalyRecord::new(&label, AnomalyKind::EmptyGroup));
        return ResolutionResult::unresolved(anomalies);
    };
    let Some(trip_origin) = first.origin.clone() else {
        anomalies.push(AnomalyRecord::new(&label, AnomalyKind::FirstSegmentMissingOrigin));
        return ResolutionResult::unresolved(anomalies);
    };

    // Last well-formed edge seen by the walk.
    let mut previous: Option<SegmentEdge> = first.edge();
    if previous.is_none() {
        anomalies.push(AnomalyRecord::new(&label, AnomalyKind::MissingEndpoint { position: 1 }));
    }

    let mut visited = HashSet::from([trip_origin.clone()]);
    let mut looped_back = false;
    let mut destination = None;

    for (idx, segment) in group.segments.iter().enumerate().skip(1) {
        let Some(edge) = segment.edge() else {
            anomalies.push(AnomalyRecord::new(
                &label,
                AnomalyKind::MissingEndpoint { position: idx + 1 },
            ));
            continue;
        };

        if visited.contains(&edge.origin) {
            looped_back = true;
            destination = previous.as_ref().map(|prev| prev.origin.clone());
            break;
        }

        visited.insert(edge.origin.clone());
        previous = Some(edge);
    }

    if !looped_back {
        destination = previous.map(|last| last.destination);
    }

    if destination.is_none() {
        anomalies.push(AnomalyRecord::new(&label, AnomalyKind::NoDestination));
    }

    ResolutionResult {
        origin: TripEndpoint::Known(trip_origin),
        destination: TripEndpoint::from(destination),
        anomalies,
    }
}
