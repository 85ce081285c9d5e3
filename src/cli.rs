use clap::Parser;
use std::ffi::OsString;

use crate::image_processing::naming::DEFAULT_SUFFIX;
use crate::image_processing::StripConfig;

#[derive(Parser, Debug)]
#[command(
    name = "exif-remover",
    version,
    about = "Strip Exif metadata from JPEG and PNG images",
    long_about = "
Exif Remover

Removes Exif and any other embedded metadata from JPEG and PNG images by decoding
the pixels and re-encoding them into a new file next to the original.
photo.jpg becomes photo_no_exif.jpg; existing outputs are never overwritten.

JPEG output is written at quality 95. PNG output keeps transparency.

Example Usage:
  # Single image
  exif-remover image.jpg

  # Every JPEG in the current directory (quote the pattern to let exif-remover expand it)
  exif-remover '*.jpg'

  # Several files at once
  exif-remover image1.png image2.jpg

  # Machine-readable output
  exif-remover --json 'shots/*.png'"
)]
pub struct Args {
    /// Image files or glob patterns to process
    #[arg(value_name = "FILE|GLOB")]
    pub inputs: Vec<OsString>,

    /// Marker inserted before the extension of each output file
    #[arg(long = "suffix", default_value = DEFAULT_SUFFIX, value_name = "SUFFIX")]
    pub suffix: String,

    /// Enable verbose output with detailed per-file information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Emit one JSON object per line instead of styled text
    #[arg(long = "json")]
    pub json: bool,

    /// Validate every input and show what would be written without creating files
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Args {
    pub fn strip_config(&self) -> StripConfig {
        StripConfig {
            suffix: self.suffix.clone(),
            verbose: self.verbose,
            json: self.json,
            dry_run: self.dry_run,
        }
    }
}


// Default implementation for tests
#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            inputs: vec![],
            suffix: DEFAULT_SUFFIX.to_string(),
            verbose: false,
            json: false,
            dry_run: false,
        }
    }
}
