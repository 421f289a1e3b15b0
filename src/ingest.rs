use crate::error::{MailerError, Result};
use crate::types::AttendeeRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Column names the attendee source must expose after header normalization.
const REQUIRED_COLUMNS: [&str; 4] = ["first_name", "zipcode", "homephone", "regdate"];

/// Lowercases a header and drops everything but alphanumerics and
/// underscores, so "first_Name" and "HomePhone" address the same columns no
/// matter how the source file capitalizes them.
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

/// Reads the attendee registration CSV into immutable records.
pub fn read_attendees(path: &Path) -> Result<Vec<AttendeeRecord>> {
    let reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let attendees = parse_attendees(reader)?;
    info!("read {} attendee records from {}", attendees.len(), path.display());
    Ok(attendees)
}

/// Same as `read_attendees` but over any reader, for in-memory sources.
pub fn read_attendees_from<R: Read>(source: R) -> Result<Vec<AttendeeRecord>> {
    let reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);
    parse_attendees(reader)
}

fn parse_attendees<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<AttendeeRecord>> {
    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| (normalize_header(header), index))
        .collect();

    for name in REQUIRED_COLUMNS {
        if !columns.contains_key(name) {
            return Err(MailerError::MissingField(format!(
                "{name} column not found in attendee CSV"
            )));
        }
    }

    let mut attendees = Vec::new();
    for result in reader.records() {
        let record = result?;
        attendees.push(AttendeeRecord {
            // The id is positional: whatever sits in the first column.
            id: field(&record, 0),
            first_name: named_field(&record, &columns, "first_name"),
            zipcode: named_field(&record, &columns, "zipcode"),
            home_phone: named_field(&record, &columns, "homephone"),
            reg_date: named_field(&record, &columns, "regdate"),
        });
    }

    Ok(attendees)
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

fn named_field(record: &StringRecord, columns: &HashMap<String, usize>, name: &str) -> String {
    columns
        .get(name)
        .map(|&index| field(record, index))
        .unwrap_or_default()
}
