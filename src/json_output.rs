//! JSON output for scripting
//!
//! When --json is enabled, every per-file status and the final summary are
//! emitted as JSON lines to stdout, replacing the styled text output.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StripError;
use crate::image_processing::convert::ConversionReport;
use crate::image_processing::BatchSummary;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonMessage {
    /// Metadata removed (or, in dry-run mode, would be)
    Converted {
        input_path: String,
        output_path: String,
        source_format: String,
        output_format: String,
        width: u32,
        height: u32,
        flattened_alpha: bool,
        exif_fields_removed: usize,
        dry_run: bool,
    },
    /// Output already existed
    Skipped {
        input_path: String,
        output_path: String,
    },
    /// File processing failed
    Failed {
        input_path: String,
        kind: String,
        error: String,
    },
    /// Processing summary
    Summary {
        total_files: usize,
        processed: usize,
        failed: usize,
        skipped: usize,
        duration_secs: f64,
    },
}

impl JsonMessage {
    /// Emit JSON message to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn converted(report: &ConversionReport, dry_run: bool) -> Self {
        Self::Converted {
            input_path: report.input_path.display().to_string(),
            output_path: report.output_path.display().to_string(),
            source_format: report.source_format.clone(),
            output_format: report.output_format.name().to_string(),
            width: report.width,
            height: report.height,
            flattened_alpha: report.flattened_alpha,
            exif_fields_removed: report.exif_fields,
            dry_run,
        }
    }

    pub fn skipped(input_path: &Path, output_path: &Path) -> Self {
        Self::Skipped {
            input_path: input_path.display().to_string(),
            output_path: output_path.display().to_string(),
        }
    }

    pub fn failed(input_path: &Path, error: &StripError) -> Self {
        Self::Failed {
            input_path: input_path.display().to_string(),
            kind: error.kind().to_string(),
            error: error.to_string(),
        }
    }

    pub fn summary(summary: &BatchSummary, duration_secs: f64) -> Self {
        Self::Summary {
            total_files: summary.total,
            processed: summary.succeeded,
            failed: summary.failed,
            skipped: summary.skipped,
            duration_secs,
        }
    }
}
