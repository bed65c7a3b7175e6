use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::logic::features::layout::FEATURE_LAYOUT;
use super::record::{Categorical, SessionRecord};

/// Name of the label column, written after the feature columns
pub const LABEL_COLUMN: &str = "Conversion";

/// On-disk dataset format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma separated, one header line
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl ExportFormat {
    /// Guess format from the file extension, CSV otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => ExportFormat::Jsonl,
            _ => ExportFormat::Csv,
        }
    }
}

/// Write records as CSV with a header row
pub fn write_csv<W: Write>(records: &[SessionRecord], writer: &mut W) -> io::Result<()> {
    let header: Vec<&str> = FEATURE_LAYOUT.iter().copied().chain([LABEL_COLUMN]).collect();
    writeln!(writer, "{}", header.join(","))?;

    for r in records {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.traffic_source.label(),
            r.time_spent,
            r.bounce_rate,
            r.interactions,
            r.visits,
            r.cart_abandonment_rate,
            r.purchase_history.label(),
            r.device_type.label(),
            r.time_of_day.label(),
            r.discount_usage.label(),
            r.loyalty_score,
            r.noise_feature_1,
            r.noise_feature_2,
            r.conversion,
        )?;
    }

    Ok(())
}

/// Write records as JSON Lines
pub fn write_jsonl<W: Write>(records: &[SessionRecord], writer: &mut W) -> io::Result<()> {
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

/// Export records to a file (truncates if exists)
/// Returns the number of records written
pub fn to_file(records: &[SessionRecord], path: &Path, format: ExportFormat) -> io::Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(records, &mut writer)?,
        ExportFormat::Jsonl => write_jsonl(records, &mut writer)?,
    }
    writer.flush()?;

    log::info!("Exported {} records to {} ({:?})", records.len(), path.display(), format);
    Ok(records.len())
}
