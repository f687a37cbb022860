//! Chronological ordering of a trip group ahead of chain resolution.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::anomaly::{AnomalyKind, AnomalyRecord};
use crate::model::{TripGroup, TripSegment};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sort a group's segments into travel order.
///
/// With a sequence hint on every segment, segments are ordered by
/// `(date, hint)`. Otherwise only the date is used, received order is kept
/// within a date, and a reduced-confidence warning is returned.
///
/// Dates must be `YYYY-MM-DD`. If any date in the group is not, dates are
/// ignored for ordering and a warning is returned.
pub fn order_segments(group: &mut TripGroup) -> Vec<AnomalyRecord> {
    let mut anomalies = Vec::new();

    let dated = group
        .segments
        .iter()
        .filter_map(|segment| segment.date.as_deref())
        .all(|date| parse_date(date).is_some());
    if !dated {
        anomalies.push(AnomalyRecord::new(&group.key, AnomalyKind::UnparsableDate));
    }

    let by_date = |a: &TripSegment, b: &TripSegment| {
        if dated { compare_dates(a, b) } else { Ordering::Equal }
    };

    let fully_hinted = group.segments.iter().all(|segment| segment.sequence.is_some());
    if fully_hinted {
        group
            .segments
            .sort_by(|a, b| by_date(a, b).then_with(|| a.sequence.cmp(&b.sequence)));
    } else {
        group.segments.sort_by(by_date);
        anomalies.push(AnomalyRecord::new(&group.key, AnomalyKind::MissingSequenceHint));
    }

    anomalies
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Undated segments sort first.
fn compare_dates(a: &TripSegment, b: &TripSegment) -> Ordering {
    let date = |segment: &TripSegment| segment.date.as_deref().and_then(parse_date);
    date(a).cmp(&date(b))
}
