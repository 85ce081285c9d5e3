// Library exports for reuse by the binary and other front-ends
pub mod cli;
pub mod error;
pub mod image_processing;
pub mod json_output;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, StripError};
pub use image_processing::convert::{remove_metadata, strip_metadata, ConversionReport, OutputFormat};
pub use image_processing::naming::{derive_output_path, DEFAULT_SUFFIX};
pub use image_processing::{BatchSummary, FileOutcome, StripConfig, StripEngine};
pub use json_output::JsonMessage;
