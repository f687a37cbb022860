//! Degree-based trip resolver.
//!
//! Builds a directed multigraph from a trip's edges and picks the nodes with
//! no incoming edge (origin) and no outgoing edge (destination). Independent
//! of segment order.

use std::collections::HashMap;

use crate::anomaly::{AnomalyKind, AnomalyRecord};
use crate::model::{ResolutionResult, TripEndpoint, TripGroup, TripGroupKey, Waypoint};
use crate::traits::TripResolver;

/// Order-independent resolver over in/out degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeResolver;

impl TripResolver for DegreeResolver {
    fn name(&self) -> &'static str {
        "degree"
    }

    fn resolve(&self, group: &TripGroup) -> ResolutionResult {
        resolve_by_degree(group)
    }
}

/// Node set in first-seen order with per-node degrees.
#[derive(Debug, Default)]
struct DegreeTable {
    nodes: Vec<Waypoint>,
    index: HashMap<Waypoint, usize>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
}

impl DegreeTable {
    fn register(&mut self, waypoint: &Waypoint) -> usize {
        if let Some(&idx) = self.index.get(waypoint) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(waypoint.clone());
        self.index.insert(waypoint.clone(), idx);
        self.in_degree.push(0);
        self.out_degree.push(0);
        idx
    }

    fn add_edge(&mut self, origin: &Waypoint, destination: &Waypoint) {
        let from = self.register(origin);
        let to = self.register(destination);
        self.out_degree[from] += 1;
        self.in_degree[to] += 1;
    }

    fn sources(&self) -> Vec<Waypoint> {
        self.nodes
            .iter()
            .zip(&self.in_degree)
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| node.clone())
            .collect()
    }

    fn sinks(&self) -> Vec<Waypoint> {
        self.nodes
            .iter()
            .zip(&self.out_degree)
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| node.clone())
            .collect()
    }
}

/// Resolve a trip group by in/out degree.
///
/// Ties between several candidates are broken by taking the first candidate
/// in the order its node was first seen.
pub fn resolve_by_degree(group: &TripGroup) -> ResolutionResult {
    let mut anomalies = Vec::new();
    let mut table = DegreeTable::default();

    for (position, segment) in group.segments.iter().enumerate() {
        match segment.edge() {
            Some(edge) => table.add_edge(&edge.origin, &edge.destination),
            None => anomalies.push(AnomalyRecord::new(
                &group.key,
                AnomalyKind::MissingEndpoint {
                    position: position + 1,
                },
            )),
        }
    }

    let origin = pick_candidate(
        &group.key,
        table.sources(),
        AnomalyKind::NoOrigin,
        AnomalyKind::MultipleOrigins,
        &mut anomalies,
    );
    let destination = pick_candidate(
        &group.key,
        table.sinks(),
        AnomalyKind::NoDestination,
        AnomalyKind::MultipleDestinations,
        &mut anomalies,
    );

    ResolutionResult {
        origin,
        destination,
        anomalies,
    }
}

fn pick_candidate(
    key: &TripGroupKey,
    candidates: Vec<Waypoint>,
    none: AnomalyKind,
    many: fn(Vec<Waypoint>) -> AnomalyKind,
    anomalies: &mut Vec<AnomalyRecord>,
) -> TripEndpoint {
    match candidates.len() {
        0 => {
            anomalies.push(AnomalyRecord::new(key, none));
            TripEndpoint::Unknown
        }
        1 => TripEndpoint::from(candidates.into_iter().next()),
        _ => {
            let first = candidates[0].clone();
            anomalies.push(AnomalyRecord::new(key, many(candidates)));
            TripEndpoint::Known(first)
        }
    }
}
