pub mod convert;
pub mod metadata;
pub mod naming;

use std::path::{Path, PathBuf};

use crate::error::{Result, StripError};
use crate::json_output::JsonMessage;
use crate::utils::{error_println, success_println, verbose_println, warn_println};
use convert::ConversionReport;

#[derive(Debug, Clone)]
pub struct StripConfig {
    pub suffix: String,
    pub verbose: bool,
    pub json: bool,
    pub dry_run: bool,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            suffix: naming::DEFAULT_SUFFIX.to_string(),
            verbose: false,
            json: false,
            dry_run: false,
        }
    }
}

/// Counters for one run. Skipped files count toward `total` only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// What happened to a single input file
#[derive(Debug)]
pub enum FileOutcome {
    Converted(ConversionReport),
    Skipped { output_path: PathBuf },
    Failed(StripError),
}

impl FileOutcome {
    /// An output that appeared after the existence check counts as skipped
    pub fn from_result(result: Result<ConversionReport>) -> Self {
        match result {
            Ok(report) => FileOutcome::Converted(report),
            Err(StripError::OutputExists(output_path)) => FileOutcome::Skipped { output_path },
            Err(err) => FileOutcome::Failed(err),
        }
    }
}

pub struct StripEngine {
    config: StripConfig,
}

impl StripEngine {
    pub fn new(config: StripConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Strip every file in order, reporting each outcome as it completes
    pub fn process_files(&self, files: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary {
            total: files.len(),
            ..Default::default()
        };

        for input_path in files {
            let outcome = self.process_file(input_path);
            self.report(input_path, &outcome);

            match outcome {
                FileOutcome::Converted(_) => summary.succeeded += 1,
                FileOutcome::Failed(_) => summary.failed += 1,
                FileOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }

        summary
    }

    /// Derive the output path, skip if it already exists, otherwise convert
    pub fn process_file(&self, input_path: &Path) -> FileOutcome {
        let output_path = naming::derive_output_path(input_path, &self.config.suffix);

        if output_path.exists() {
            return FileOutcome::Skipped { output_path };
        }

        let result = if self.config.dry_run {
            convert::prepare(input_path, &output_path).map(|prepared| prepared.report())
        } else {
            convert::strip_metadata(input_path, &output_path)
        };

        FileOutcome::from_result(result)
    }

    fn report(&self, input_path: &Path, outcome: &FileOutcome) {
        if self.config.json {
            let message = match outcome {
                FileOutcome::Converted(report) => {
                    JsonMessage::converted(report, self.config.dry_run)
                }
                FileOutcome::Skipped { output_path } => {
                    JsonMessage::skipped(input_path, output_path)
                }
                FileOutcome::Failed(err) => JsonMessage::failed(input_path, err),
            };
            message.emit();
            return;
        }

        print_outcome(input_path, outcome, self.config.verbose, self.config.dry_run);
    }
}

/// Styled text line(s) for one outcome
pub(crate) fn print_outcome(
    input_path: &Path,
    outcome: &FileOutcome,
    verbose: bool,
    dry_run: bool,
) {
    match outcome {
        FileOutcome::Converted(report) => {
            verbose_println(
                verbose,
                &format!(
                    "{}: {} {}x{} -> {} {}, {} Exif field(s) dropped{}",
                    input_path.display(),
                    report.source_format,
                    report.width,
                    report.height,
                    report.output_format.name(),
                    report.mode,
                    report.exif_fields,
                    if report.flattened_alpha {
                        ", alpha flattened onto white"
                    } else {
                        ""
                    }
                ),
            );
            if dry_run {
                success_println(&format!("Would write: {}", report.output_path.display()));
            } else {
                success_println(&format!("Removed Exif data: {}", report.output_path.display()));
            }
        }
        FileOutcome::Skipped { output_path } => {
            warn_println(&format!(
                "{} already exists, skipping",
                output_path.display()
            ));
        }
        FileOutcome::Failed(err @ StripError::UnsupportedFormat { .. }) => {
            warn_println(&err.to_string());
        }
        FileOutcome::Failed(err) => error_println(&err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::metadata::fixtures::*;
    use super::metadata::has_exif;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn engine() -> StripEngine {
        StripEngine::new(StripConfig::default())
    }

    #[test]
    fn test_batch_counts() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("photo.jpg");
        let icon = dir.path().join("icon.png");
        let document = dir.path().join("document.pdf");
        fs::write(&photo, jpeg_with_exif(&rgb_gradient(12, 12))).unwrap();
        fs::write(&icon, png_with_exif(&rgba_half_transparent(6, 6))).unwrap();
        fs::write(&document, b"%PDF-1.4\n").unwrap();
        let missing = dir.path().join("missing.jpg");

        let summary = engine().process_files(&[photo, icon, document, missing]);
        assert_eq!(
            summary,
            BatchSummary {
                total: 4,
                succeeded: 2,
                failed: 2,
                skipped: 0,
            }
        );

        let stripped = fs::read(dir.path().join("photo_no_exif.jpg")).unwrap();
        assert!(!has_exif(&stripped));
        assert!(dir.path().join("icon_no_exif.png").exists());
        assert!(!dir.path().join("document_no_exif.pdf").exists());
        assert!(!dir.path().join("missing_no_exif.jpg").exists());
    }

    #[test]
    fn test_existing_output_is_skipped() {
        let dir = TempDir::new().unwrap();
        let icon = dir.path().join("icon.png");
        fs::write(&icon, png_with_exif(&rgba_half_transparent(6, 6))).unwrap();
        let existing = dir.path().join("icon_no_exif.png");
        fs::write(&existing, b"keep me").unwrap();

        let outcome = engine().process_file(&icon);
        assert!(matches!(outcome, FileOutcome::Skipped { ref output_path } if *output_path == existing));

        let summary = engine().process_files(&[icon]);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(fs::read(&existing).unwrap(), b"keep me");
    }

    #[test]
    fn test_output_created_during_write_is_skipped() {
        let output = PathBuf::from("photo_no_exif.jpg");
        let outcome = FileOutcome::from_result(Err(StripError::OutputExists(output.clone())));
        assert!(matches!(outcome, FileOutcome::Skipped { ref output_path } if *output_path == output));

        let outcome = FileOutcome::from_result(Err(StripError::Permission(output)));
        assert!(matches!(outcome, FileOutcome::Failed(StripError::Permission(_))));
    }

    #[test]
    fn test_second_run_skips_everything() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("photo.jpg");
        fs::write(&photo, jpeg_with_exif(&rgb_gradient(8, 8))).unwrap();

        let first = engine().process_files(std::slice::from_ref(&photo));
        assert_eq!(first.succeeded, 1);

        let second = engine().process_files(&[photo]);
        assert_eq!(second.succeeded, 0);
        assert_eq!(second.skipped, 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("photo.jpg");
        fs::write(&photo, jpeg_with_exif(&rgb_gradient(8, 8))).unwrap();
        let document = dir.path().join("notes.txt");
        fs::write(&document, b"hello").unwrap();

        let engine = StripEngine::new(StripConfig {
            dry_run: true,
            ..Default::default()
        });
        let summary = engine.process_files(&[photo, document]);

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert!(!dir.path().join("photo_no_exif.jpg").exists());
    }

    #[test]
    fn test_custom_suffix() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("photo.jpeg");
        fs::write(&photo, jpeg_with_exif(&rgb_gradient(8, 8))).unwrap();

        let engine = StripEngine::new(StripConfig {
            suffix: "-clean".to_string(),
            json: true,
            ..Default::default()
        });
        match engine.process_file(&photo) {
            FileOutcome::Converted(report) => {
                assert_eq!(report.output_path, dir.path().join("photo-clean.jpeg"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(dir.path().join("photo-clean.jpeg").exists());
    }
}
