use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::ExpenseRecord;

pub(crate) const HEADERS: [&str; 4] = ["date", "category", "amount", "description"];

/// Column positions for one record file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    date: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            date: 0,
            category: 1,
            amount: 2,
            description: Some(3),
        }
    }
}

impl Layout {
    /// Locate columns by header name. `None` when the row is not a header.
    fn from_header(row: &[String]) -> Option<Self> {
        let h: Vec<String> = row.iter().map(|s| s.trim().to_lowercase()).collect();
        let col = |name: &str| h.iter().position(|c| c == name);
        Some(Self {
            date: col("date")?,
            category: col("category")?,
            amount: col("amount")?,
            description: col("description"),
        })
    }
}

/// Read the record file. A missing file is an empty store; rows that cannot
/// form a valid record are dropped.
pub(crate) fn read_records(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No record file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::storage(path, e)),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(bytes.as_slice());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    let (layout, data) = match rows.split_first() {
        None => return Ok(Vec::new()),
        Some((first, rest)) => match Layout::from_header(first) {
            Some(layout) => (layout, rest),
            None => (Layout::default(), rows.as_slice()),
        },
    };

    let mut records = Vec::with_capacity(data.len());
    let mut dropped = 0usize;
    for (i, row) in data.iter().enumerate() {
        match parse_row(row, &layout) {
            Some(rec) => records.push(rec),
            None => {
                dropped += 1;
                debug!("Dropping row {}: {:?}", i + 1, row);
            }
        }
    }

    if dropped > 0 {
        debug!("Dropped {dropped} unusable rows from {}", path.display());
    }
    debug!("Loaded {} expense records", records.len());
    Ok(records)
}

fn parse_row(row: &[String], layout: &Layout) -> Option<ExpenseRecord> {
    let field = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");

    let date = parse_date(field(layout.date))?;

    let raw_amount = field(layout.amount);
    let amount = match parse_amount(raw_amount) {
        Some(a) => a,
        None => {
            warn!("Skipping expense on {date}: unreadable amount '{raw_amount}'");
            return None;
        }
    };

    let description = layout.description.map(field).unwrap_or("");
    match ExpenseRecord::new(date, field(layout.category), amount, description) {
        Ok(rec) => Some(rec),
        Err(e) => {
            warn!("Skipping expense on {date}: {e}");
            None
        }
    }
}

/// Overwrite the record file with `records`, header first.
pub(crate) fn write_records(path: &Path, records: &[ExpenseRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::storage(path, e))?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(HEADERS)?;
    for rec in records {
        wtr.write_record([
            rec.date_string(),
            rec.category.clone(),
            rec.amount.to_string(),
            rec.description.clone(),
        ])?;
    }
    wtr.flush().map_err(|e| Error::storage(path, e))?;
    Ok(())
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y", "%d.%m.%Y",
    "%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y", "%Y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Permissive calendar-date parsing. Time components are discarded.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse an amount, tolerating currency symbols and thousands separators.
pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches(['$', '₹', '€', '£'])
        .replace([',', '"'], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
