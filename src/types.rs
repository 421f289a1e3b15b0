use serde::{Deserialize, Serialize};

/// One row of the attendee registration CSV, untouched after read.
/// `reg_date` stays in its source format `MM/DD/YYYY HH:MM` (24-hour).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub id: String,
    pub first_name: String,
    pub zipcode: String,
    pub home_phone: String,
    pub reg_date: String,
}

/// Outcome of an elected-representative lookup. Lookup failures are folded
/// into `Fallback` with a human-readable pointer, never an error, so the
/// pipeline can always hand something to the letter renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegislatorLookup {
    Officials(Vec<String>),
    Fallback(String),
}

/// Boundary trait for the representative-lookup collaborator.
#[async_trait::async_trait]
pub trait LegislatorFinder: Send + Sync {
    /// Resolves a normalized 5-digit zipcode to official names.
    async fn lookup(&self, zipcode: &str) -> LegislatorLookup;
}
