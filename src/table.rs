//! CSV-backed itinerary tables.
//!
//! Reads segment rows with arbitrary extra columns, hands them to the
//! reconstruction core, and writes them back with the two trip columns
//! appended (or overwritten when a previous run already added them).

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::anomaly::{AnomalyRecord, Severity};
use crate::error::Error;
use crate::model::{SequenceHint, TripEndpoint};
use crate::reconstruct::{ReconstructOptions, Reconstruction, ResolvedTrip, reconstruct_all};
use crate::traits::{AnnotatedRecord, SegmentRecord};

/// Column names for the itinerary export.
#[derive(Debug, Clone)]
pub struct CsvColumns {
    pub order_id: String,
    pub passenger: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    /// Explicit sequence fields, highest priority first.
    pub sequence: Vec<String>,
    pub departure_time: String,
    pub trip_origin: String,
    pub trip_destination: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            order_id: "Order #".to_string(),
            passenger: "Passenger".to_string(),
            origin: "BP Origin".to_string(),
            destination: "BP Destination".to_string(),
            date: "Date".to_string(),
            sequence: vec![
                "Sequence".to_string(),
                "Barcode".to_string(),
                "Segment ID".to_string(),
            ],
            departure_time: "Departure Time".to_string(),
            trip_origin: "Trip Origin".to_string(),
            trip_destination: "Trip Destination".to_string(),
        }
    }
}

/// Column positions shared by every row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowLayout {
    order_id: usize,
    passenger: usize,
    origin: usize,
    destination: usize,
    date: Option<usize>,
    sequence: Vec<usize>,
    departure_time: Option<usize>,
    trip_origin: usize,
    trip_destination: usize,
}

impl RowLayout {
    /// Resolve positions, appending the trip columns to `headers` if absent.
    fn resolve(headers: &mut Vec<String>, columns: &CsvColumns) -> Result<Self, Error> {
        let required =
            |name: &str| position(&headers[..], name).ok_or_else(|| Error::MissingColumn(name.to_string()));

        let order_id = required(&columns.order_id)?;
        let passenger = required(&columns.passenger)?;
        let origin = required(&columns.origin)?;
        let destination = required(&columns.destination)?;
        let date = position(headers, &columns.date);
        let sequence = columns
            .sequence
            .iter()
            .filter_map(|name| position(headers, name))
            .collect();
        let departure_time = position(headers, &columns.departure_time);

        let trip_origin = position_or_append(headers, &columns.trip_origin);
        let trip_destination = position_or_append(headers, &columns.trip_destination);

        Ok(Self {
            order_id,
            passenger,
            origin,
            destination,
            date,
            sequence,
            departure_time,
            trip_origin,
            trip_destination,
        })
    }
}

fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn position_or_append(headers: &mut Vec<String>, name: &str) -> usize {
    position(headers, name).unwrap_or_else(|| {
        headers.push(name.to_string());
        headers.len() - 1
    })
}

/// One itinerary row with all of its source columns.
#[derive(Debug, Clone)]
pub struct TripRow {
    values: Vec<String>,
    layout: Arc<RowLayout>,
}

impl TripRow {
    pub fn get(&self, column: usize) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn trip_origin(&self) -> &str {
        self.get(self.layout.trip_origin).unwrap_or_default()
    }

    pub fn trip_destination(&self) -> &str {
        self.get(self.layout.trip_destination).unwrap_or_default()
    }

    pub(crate) fn set(&mut self, column: usize, value: String) {
        if column >= self.values.len() {
            self.values.resize(column + 1, String::new());
        }
        self.values[column] = value;
    }

    fn non_blank(&self, column: usize) -> Option<&str> {
        self.get(column).filter(|value| !value.trim().is_empty())
    }
}

impl SegmentRecord for TripRow {
    fn order_id(&self) -> Option<&str> {
        self.get(self.layout.order_id)
    }

    fn passenger(&self) -> Option<&str> {
        self.get(self.layout.passenger)
    }

    fn date(&self) -> Option<&str> {
        self.layout.date.and_then(|column| self.non_blank(column))
    }

    fn origin(&self) -> Option<&str> {
        self.get(self.layout.origin)
    }

    fn destination(&self) -> Option<&str> {
        self.get(self.layout.destination)
    }

    fn sequence_hint(&self) -> Option<SequenceHint> {
        let explicit = self
            .layout
            .sequence
            .iter()
            .find_map(|&column| self.non_blank(column))
            .map(|value| SequenceHint::Explicit(value.trim().to_string()));

        explicit.or_else(|| {
            self.layout
                .departure_time
                .and_then(|column| self.non_blank(column))
                .map(|value| SequenceHint::DepartureTime(value.trim().to_string()))
        })
    }
}

impl AnnotatedRecord for TripRow {
    fn annotate(&mut self, origin: &TripEndpoint, destination: &TripEndpoint) {
        self.set(self.layout.trip_origin, origin.to_string());
        self.set(self.layout.trip_destination, destination.to_string());
    }
}

/// A headered itinerary table.
#[derive(Debug, Clone)]
pub struct TripTable {
    headers: Vec<String>,
    rows: Vec<TripRow>,
}

/// A table after reconstruction, with the batch anomaly report.
#[derive(Debug, Clone)]
pub struct AnnotatedTable {
    pub table: TripTable,
    pub anomalies: Vec<AnomalyRecord>,
    pub trips: Vec<ResolvedTrip>,
}

impl TripTable {
    pub fn from_reader<R: io::Read>(reader: R, columns: &CsvColumns) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let source_width = headers.len();
        let layout = Arc::new(RowLayout::resolve(&mut headers, columns)?);

        let mut rows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > source_width {
                return Err(Error::RowTooLong {
                    row,
                    found: record.len(),
                    expected: source_width,
                });
            }
            let mut values: Vec<String> = record.iter().map(String::from).collect();
            values.resize(headers.len(), String::new());
            rows.push(TripRow {
                values,
                layout: Arc::clone(&layout),
            });
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: impl AsRef<Path>, columns: &CsvColumns) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(file, columns)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TripRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        position(&self.headers, name)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [TripRow] {
        &mut self.rows
    }

    /// Append a column; `value_for` is called once per row in order.
    pub(crate) fn append_column<F>(&mut self, name: &str, mut value_for: F)
    where
        F: FnMut(&TripRow) -> String,
    {
        let column = self.headers.len();
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            let value = value_for(row);
            row.set(column, value);
        }
    }

    /// Resolve every trip and annotate every row.
    pub fn reconstruct(self, options: &ReconstructOptions) -> Result<AnnotatedTable, Error> {
        let Reconstruction {
            rows,
            anomalies,
            trips,
        } = reconstruct_all(self.rows, options)?;

        Ok(AnnotatedTable {
            table: TripTable {
                headers: self.headers,
                rows,
            },
            anomalies,
            trips,
        })
    }

    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(&row.values)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = File::create(path)?;
        self.write_to(file)
    }
}

#[derive(Debug, Serialize)]
struct AnomalyRow<'a> {
    order_id: &'a str,
    passenger: &'a str,
    date: &'a str,
    severity: Severity,
    kind: &'static str,
    message: &'a str,
}

const ANOMALY_HEADERS: [&str; 6] = ["order_id", "passenger", "date", "severity", "kind", "message"];

/// Write the anomaly report as CSV, header included even when empty.
pub fn write_anomalies<W: io::Write>(anomalies: &[AnomalyRecord], writer: W) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(ANOMALY_HEADERS)?;
    for anomaly in anomalies {
        writer.serialize(AnomalyRow {
            order_id: &anomaly.group_key.order_id,
            passenger: &anomaly.group_key.passenger,
            date: anomaly.group_key.date.as_deref().unwrap_or_default(),
            severity: anomaly.severity,
            kind: anomaly.kind.code(),
            message: &anomaly.message,
        })?;
    }
    writer.flush()?;
    Ok(())
}
