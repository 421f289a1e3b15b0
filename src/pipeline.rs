use crate::aggregate::{build_frequency_table, FrequencyTable};
use crate::error::Result;
use crate::ingest;
use crate::letter::{save_letter, LetterTemplate};
use crate::normalize::{normalize_phone_number, normalize_zipcode};
use crate::temporal::{registration_hour, registration_weekday};
use crate::types::{AttendeeRecord, LegislatorFinder};
use askama::Template;
use metrics::{counter, histogram};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of a complete pipeline run. The frequency tables are kept private
/// so the only ways out are `summary` and the ranked accessors, both of
/// which preserve the tie-breaking guarantees.
#[derive(Debug)]
pub struct PipelineResult {
    pub total_records: usize,
    pub processed_records: usize,
    pub skipped_records: usize,
    pub errors: Vec<String>,
    pub letters_dir: Option<PathBuf>,
    hours: FrequencyTable<u32>,
    weekdays: FrequencyTable<String>,
}

/// The two peaks reported on the console.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSummary {
    pub peak_hour: (u32, u64),
    pub peak_weekday: (String, u64),
}

impl PipelineResult {
    /// Ranks both frequency tables and returns the peaks. Fails when no
    /// record made it through extraction.
    pub fn summary(&self) -> Result<RegistrationSummary> {
        Ok(RegistrationSummary {
            peak_hour: self.hours.peak()?,
            peak_weekday: self.weekdays.peak()?,
        })
    }

    /// Registration hours, most frequent first.
    pub fn ranked_hours(&self) -> Vec<(u32, u64)> {
        self.hours.rank_descending()
    }

    /// Registration weekdays, most frequent first.
    pub fn ranked_weekdays(&self) -> Vec<(String, u64)> {
        self.weekdays.rank_descending()
    }
}

/// Hour and weekday captured for one record before any letter work, plus
/// whatever went wrong while rendering or persisting its letter.
struct RecordOutcome {
    hour: u32,
    weekday: String,
    letter_error: Option<String>,
}

pub struct Pipeline;

impl Pipeline {
    /// Runs the full pipeline: read the CSV, write one letter per attendee,
    /// and accumulate registration hours and weekdays in file order.
    ///
    /// Records are processed strictly sequentially. A record whose timestamp
    /// does not parse is skipped outright; a record whose letter fails to
    /// render or persist still counts toward the aggregates, since its hour
    /// and weekday are captured first.
    #[instrument(skip(finder))]
    pub async fn run(
        attendees_csv: &Path,
        letters_dir: &Path,
        finder: Arc<dyn LegislatorFinder>,
    ) -> Result<PipelineResult> {
        info!("🚀 Starting attendee pipeline");
        counter!("mailer_pipeline_runs_total").increment(1);
        let t_pipeline = std::time::Instant::now();

        let records = ingest::read_attendees(attendees_csv)?;
        info!("📋 Read {} attendee records", records.len());
        histogram!("mailer_records_per_run").record(records.len() as f64);

        let mut hours = Vec::new();
        let mut weekdays = Vec::new();
        let mut errors = Vec::new();
        let mut skipped = 0usize;

        for record in &records {
            match Self::process_record(record, letters_dir, finder.as_ref()).await {
                Ok(outcome) => {
                    hours.push(outcome.hour);
                    weekdays.push(outcome.weekday);
                    if let Some(letter_error) = outcome.letter_error {
                        warn!("{letter_error}");
                        errors.push(letter_error);
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!("skipping attendee {}: {}", record.id, e);
                    errors.push(format!("Skipped attendee {}: {e}", record.id));
                }
            }
        }

        let processed = hours.len();
        counter!("mailer_records_processed_total").increment(processed as u64);
        counter!("mailer_records_skipped_total").increment(skipped as u64);
        histogram!("mailer_pipeline_duration_seconds").record(t_pipeline.elapsed().as_secs_f64());

        info!(
            "✅ Processed {} records ({} skipped, {} errors)",
            processed,
            skipped,
            errors.len()
        );

        Ok(PipelineResult {
            total_records: records.len(),
            processed_records: processed,
            skipped_records: skipped,
            errors,
            letters_dir: Some(letters_dir.to_path_buf()),
            hours: build_frequency_table(hours),
            weekdays: build_frequency_table(weekdays),
        })
    }

    /// Aggregation-only run: extract hours and weekdays from the CSV with
    /// the same skip policy as `run`, but no lookups and no letters.
    #[instrument]
    pub fn collect_stats(attendees_csv: &Path) -> Result<PipelineResult> {
        info!("📈 Collecting registration stats");
        let records = ingest::read_attendees(attendees_csv)?;

        let mut hours = Vec::new();
        let mut weekdays = Vec::new();
        let mut errors = Vec::new();
        let mut skipped = 0usize;

        for record in &records {
            match Self::extract_registration(record) {
                Ok((hour, weekday)) => {
                    hours.push(hour);
                    weekdays.push(weekday);
                }
                Err(e) => {
                    skipped += 1;
                    warn!("skipping attendee {}: {}", record.id, e);
                    errors.push(format!("Skipped attendee {}: {e}", record.id));
                }
            }
        }

        Ok(PipelineResult {
            total_records: records.len(),
            processed_records: hours.len(),
            skipped_records: skipped,
            errors,
            letters_dir: None,
            hours: build_frequency_table(hours),
            weekdays: build_frequency_table(weekdays),
        })
    }

    /// Extraction happens before any letter work so a bad timestamp never
    /// leaves a letter on disk for a record the aggregates never saw.
    fn extract_registration(record: &AttendeeRecord) -> Result<(u32, String)> {
        let hour = registration_hour(&record.reg_date)?;
        let weekday = registration_weekday(&record.reg_date)?;
        Ok((hour, weekday))
    }

    async fn process_record(
        record: &AttendeeRecord,
        letters_dir: &Path,
        finder: &dyn LegislatorFinder,
    ) -> Result<RecordOutcome> {
        let (hour, weekday) = Self::extract_registration(record)?;

        let zipcode = normalize_zipcode(&record.zipcode);
        let phone = normalize_phone_number(&record.home_phone);
        let legislators = finder.lookup(&zipcode).await;

        let letter = LetterTemplate {
            id: &record.id,
            name: &record.first_name,
            zipcode: &zipcode,
            phone: phone.as_deref(),
            legislators: &legislators,
        };

        let letter_error = match letter.render() {
            Ok(content) => match save_letter(letters_dir, &record.id, &content) {
                Ok(_) => None,
                Err(e) => Some(format!("Failed to save letter for attendee {}: {e}", record.id)),
            },
            Err(e) => Some(format!("Failed to render letter for attendee {}: {e}", record.id)),
        };

        Ok(RecordOutcome {
            hour,
            weekday,
            letter_error,
        })
    }
}
