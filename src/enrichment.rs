//! Customer enrichment and per-customer summaries.
//!
//! Trip rows are joined to a customer export on a normalized e-mail key
//! (trimmed, lower-cased). The customer export is treated as unique per key:
//! the first record seen for an address wins.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Error;
use crate::table::TripTable;
use crate::traits::SegmentRecord;

pub const CUSTOMER_EMAIL_COLUMN: &str = "E-mail Address";
pub const TRIP_EMAIL_COLUMN: &str = "Customer Email";
pub const TRANSACTIONS_COLUMN: &str = "# of transactions";

/// Customer fields carried into the summary by default.
pub const SUMMARY_COLUMNS: &[&str] = &[
    "Name",
    "Has Acct",
    "Created",
    "Sales Amt.",
    "Address 1",
    "Address2",
    "City",
    "State",
    "ZIP",
    "Phone",
    "Cell Phone",
];

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Decode a Latin-1 field. Every byte maps to the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Customer records keyed by normalized e-mail.
///
/// The customer export is read as Latin-1.
#[derive(Debug, Clone, Default)]
pub struct CustomerTable {
    /// Non-key columns, in source order.
    columns: Vec<String>,
    records: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl CustomerTable {
    pub fn from_reader<R: io::Read>(reader: R, email_column: &str) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader.byte_headers()?.iter().map(latin1).collect();
        let key_column = headers
            .iter()
            .position(|header| header == email_column)
            .ok_or_else(|| Error::MissingColumn(email_column.to_string()))?;

        let mut table = CustomerTable {
            columns: headers
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != key_column)
                .map(|(_, header)| header.clone())
                .collect(),
            ..CustomerTable::default()
        };

        let mut duplicates = 0;
        for record in reader.byte_records() {
            let record = record?;
            let key = normalize_email(&record.get(key_column).map(latin1).unwrap_or_default());
            if key.is_empty() {
                continue;
            }
            if table.index.contains_key(&key) {
                duplicates += 1;
                continue;
            }

            let mut values: Vec<String> = (0..headers.len())
                .filter(|idx| *idx != key_column)
                .map(|idx| record.get(idx).map(latin1).unwrap_or_default())
                .collect();
            values.resize(table.columns.len(), String::new());

            table.index.insert(key, table.records.len());
            table.records.push(values);
        }

        if duplicates > 0 {
            warn!(duplicates, "Dropped duplicate customer e-mail addresses");
        }

        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>, email_column: &str) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(file, email_column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Customer values for an address (normalized before lookup).
    pub fn get(&self, email: &str) -> Option<&[String]> {
        self.index
            .get(&normalize_email(email))
            .map(|&idx| self.records[idx].as_slice())
    }
}

/// Left-join customer columns onto every trip row.
///
/// The trip table's e-mail column is normalized in place. Returns the number
/// of rows that matched a customer.
pub fn enrich(table: &mut TripTable, customers: &CustomerTable, email_column: &str) -> Result<usize, Error> {
    let email_idx = table
        .column_index(email_column)
        .ok_or_else(|| Error::MissingColumn(email_column.to_string()))?;

    let mut matched = Vec::with_capacity(table.len());
    for row in table.rows_mut() {
        let email = normalize_email(row.get(email_idx).unwrap_or_default());
        matched.push(customers.index.get(&email).copied());
        row.set(email_idx, email);
    }

    for (column, name) in customers.columns.iter().enumerate() {
        let mut rows = matched.iter();
        table.append_column(name, |_| {
            rows.next()
                .copied()
                .flatten()
                .map(|record| customers.records[record][column].clone())
                .unwrap_or_default()
        });
    }

    let hits = matched.iter().filter(|m| m.is_some()).count();
    debug!(rows = matched.len(), matched = hits, "Enriched trip rows with customer data");
    Ok(hits)
}

/// One customer with the number of distinct orders placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub email: String,
    /// First-seen values of the requested columns.
    pub values: Vec<String>,
    pub transactions: usize,
}

/// Summarize customers of a trip table, in first-seen order.
///
/// Rows with a blank e-mail are left out.
pub fn customer_summary(
    table: &TripTable,
    email_column: &str,
    columns: &[&str],
) -> Result<Vec<CustomerSummary>, Error> {
    let email_idx = table
        .column_index(email_column)
        .ok_or_else(|| Error::MissingColumn(email_column.to_string()))?;
    let column_idx = columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut summaries: Vec<CustomerSummary> = Vec::new();
    let mut orders: Vec<HashSet<String>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in table.rows() {
        let email = normalize_email(row.get(email_idx).unwrap_or_default());
        if email.is_empty() {
            continue;
        }

        let slot = *index.entry(email.clone()).or_insert_with(|| {
            summaries.push(CustomerSummary {
                email,
                values: column_idx
                    .iter()
                    .map(|&idx| row.get(idx).unwrap_or_default().to_string())
                    .collect(),
                transactions: 0,
            });
            orders.push(HashSet::new());
            summaries.len() - 1
        });

        if let Some(order_id) = row.order_id().map(str::trim).filter(|id| !id.is_empty()) {
            orders[slot].insert(order_id.to_string());
        }
    }

    for (summary, order_ids) in summaries.iter_mut().zip(&orders) {
        summary.transactions = order_ids.len();
    }

    Ok(summaries)
}

pub fn write_customer_summary<W: io::Write>(
    summaries: &[CustomerSummary],
    columns: &[&str],
    email_column: &str,
    writer: W,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec![email_column];
    header.extend_from_slice(columns);
    header.push(TRANSACTIONS_COLUMN);
    writer.write_record(&header)?;

    for summary in summaries {
        let transactions = summary.transactions.to_string();
        let mut record = vec![summary.email.as_str()];
        record.extend(summary.values.iter().map(String::as_str));
        record.push(&transactions);
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
