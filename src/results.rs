use crate::error::Result;
use crate::session::{FinishReason, Session};
use serde::Serialize;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;

/// One line of the results log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Seconds since the UNIX epoch
    pub timestamp: i64,
    pub dataset: String,
    pub seed: u64,
    pub word_count: usize,
    pub wpm: f64,
    pub accuracy: f64,
    /// Active seconds
    pub time: f64,
    pub correct: u32,
    pub incorrect: u32,
    pub missed: u32,
    pub extra: u32,
}

impl ResultRecord {
    pub fn from_session(session: &Session, dataset: &str, seed: u64, timestamp: i64) -> Self {
        let stats = session.stats();
        let c = stats.counters;
        Self {
            timestamp,
            dataset: dataset.to_string(),
            seed,
            word_count: session.word_count(),
            wpm: stats.wpm(),
            accuracy: stats.accuracy(),
            time: stats.active_time.as_secs_f64(),
            correct: c.correct,
            incorrect: c.incorrect,
            missed: c.missed,
            extra: c.extra,
        }
    }
}

/// Appends `record` to the CSV at `path`, writing the header first if the file is empty.
pub fn append_record(path: &Path, record: &ResultRecord) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let needs_header = file.metadata()?.len() == 0;
    if needs_header {
        log::info!("writing CSV header into '{}'", path.display());
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;

    log::info!("appended result to '{}'", path.display());
    Ok(())
}

/// Appends `record` only when the run was completed and a log path is set.
/// Returns whether anything was written.
pub fn record_if_completed(
    reason: FinishReason,
    path: Option<&Path>,
    record: &ResultRecord,
) -> Result<bool> {
    match (reason, path) {
        (FinishReason::Completed, Some(path)) => {
            append_record(path, record)?;
            Ok(true)
        }
        (FinishReason::Aborted, Some(_)) => {
            log::info!("run aborted, not recording result");
            Ok(false)
        }
        (_, None) => Ok(false),
    }
}

/// Human readable end-of-run report
pub struct Summary<'a> {
    pub record: &'a ResultRecord,
    pub reason: FinishReason,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        match self.reason {
            FinishReason::Completed => writeln!(f, "worded")?,
            FinishReason::Aborted => writeln!(f, "worded (aborted, not recorded)")?,
        }
        writeln!(f, "  Dataset: {}", r.dataset)?;
        writeln!(f, "  Seed: {}", r.seed)?;
        writeln!(f, "  Words: {}", r.word_count)?;
        writeln!(f, "  WPM: {:.1}", r.wpm)?;
        writeln!(f, "  Accuracy: {:.1}%", r.accuracy)?;
        writeln!(f, "  Time: {:.1}s", r.time)?;
        write!(
            f,
            "  C/I/M/E: {}/{}/{}/{}",
            r.correct, r.incorrect, r.missed, r.extra
        )
    }
}
