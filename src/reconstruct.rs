//! Trip reconstruction: grouping, per-group resolution and annotation.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::anomaly::{AnomalyRecord, AnomalySummary};
use crate::chain::ChainResolver;
use crate::degree::DegreeResolver;
use crate::error::Error;
use crate::model::{ResolutionResult, TripEndpoint, TripGroup, TripGroupKey, TripSegment, Waypoint};
use crate::ordering::order_segments;
use crate::traits::{AnnotatedRecord, SegmentRecord, TripResolver};

/// Which resolver to run for every group of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverChoice {
    #[default]
    Degree,
    Chain,
}

impl ResolverChoice {
    pub fn resolver(self) -> &'static dyn TripResolver {
        match self {
            ResolverChoice::Degree => &DegreeResolver,
            ResolverChoice::Chain => &ChainResolver,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReconstructOptions {
    pub resolver: ResolverChoice,
    /// Include the travel date in the trip key.
    pub group_by_date: bool,
    /// Resolve groups on the rayon thread pool.
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrip {
    pub key: TripGroupKey,
    pub origin: TripEndpoint,
    pub destination: TripEndpoint,
    pub segment_count: usize,
}

#[derive(Debug, Clone)]
pub struct Reconstruction<R> {
    /// Input rows in input order, each annotated with its trip's endpoints.
    pub rows: Vec<R>,
    /// Anomalies of every group, in group first-appearance order.
    pub anomalies: Vec<AnomalyRecord>,
    pub trips: Vec<ResolvedTrip>,
}

impl<R> Reconstruction<R> {
    pub fn summary(&self) -> AnomalySummary {
        AnomalySummary::of(&self.anomalies)
    }
}

/// Reconstruct every trip in `rows` with the configured resolver.
pub fn reconstruct_all<R>(rows: Vec<R>, options: &ReconstructOptions) -> Result<Reconstruction<R>, Error>
where
    R: SegmentRecord + AnnotatedRecord,
{
    reconstruct_with(rows, options.resolver.resolver(), options)
}

/// Reconstruct every trip in `rows` with a caller-supplied resolver.
///
/// Fails only when a row cannot be grouped; nothing is annotated in that case.
pub fn reconstruct_with<R, T>(
    mut rows: Vec<R>,
    resolver: &T,
    options: &ReconstructOptions,
) -> Result<Reconstruction<R>, Error>
where
    R: SegmentRecord + AnnotatedRecord,
    T: TripResolver + ?Sized,
{
    let groups = group_rows(&rows, options.group_by_date)?;
    info!(
        rows = rows.len(),
        groups = groups.len(),
        resolver = resolver.name(),
        "Reconstructing trips"
    );

    let resolve = |group: TripGroup| resolve_group(group, resolver);
    let resolved: Vec<(TripGroup, ResolutionResult)> = if options.parallel {
        groups.into_par_iter().map(resolve).collect()
    } else {
        groups.into_iter().map(resolve).collect()
    };

    let mut anomalies = Vec::new();
    let mut trips = Vec::with_capacity(resolved.len());

    for (group, result) in resolved {
        for segment in &group.segments {
            rows[segment.source_row].annotate(&result.origin, &result.destination);
        }

        trips.push(ResolvedTrip {
            key: group.key,
            origin: result.origin,
            destination: result.destination,
            segment_count: group.segments.len(),
        });
        anomalies.extend(result.anomalies);
    }

    let summary = AnomalySummary::of(&anomalies);
    info!(
        trips = trips.len(),
        warnings = summary.warnings,
        errors = summary.errors,
        "Trip reconstruction complete"
    );

    Ok(Reconstruction {
        rows,
        anomalies,
        trips,
    })
}

fn resolve_group<T>(mut group: TripGroup, resolver: &T) -> (TripGroup, ResolutionResult)
where
    T: TripResolver + ?Sized,
{
    let mut anomalies = Vec::new();
    if resolver.requires_ordering() {
        anomalies.extend(order_segments(&mut group));
    }

    let mut result = resolver.resolve(&group);
    anomalies.append(&mut result.anomalies);
    result.anomalies = anomalies;

    debug!(
        trip = %group.key,
        origin = %result.origin,
        destination = %result.destination,
        anomalies = result.anomalies.len(),
        "Resolved trip"
    );

    (group, result)
}

/// Partition rows into trip groups in order of first appearance.
///
/// Membership keeps input order. A row with a blank order id or passenger
/// aborts the whole batch.
pub fn group_rows<R>(rows: &[R], group_by_date: bool) -> Result<Vec<TripGroup>, Error>
where
    R: SegmentRecord,
{
    let mut groups: Vec<TripGroup> = Vec::new();
    let mut index: HashMap<TripGroupKey, usize> = HashMap::new();

    for (row_idx, row) in rows.iter().enumerate() {
        let order_id = required_field(row.order_id(), row_idx, "order id")?;
        let passenger = required_field(row.passenger(), row_idx, "passenger")?;
        let date = row
            .date()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(str::to_string);

        let mut key = TripGroupKey::new(order_id, passenger);
        if group_by_date {
            key.date = date.clone();
        }

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(TripGroup::new(key));
            groups.len() - 1
        });

        groups[slot].segments.push(TripSegment {
            origin: row.origin().and_then(Waypoint::parse),
            destination: row.destination().and_then(Waypoint::parse),
            date,
            sequence: row.sequence_hint(),
            source_row: row_idx,
        });
    }

    Ok(groups)
}

fn required_field<'a>(value: Option<&'a str>, row: usize, field: &'static str) -> Result<&'a str, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingGroupKey { row, field }),
    }
}
