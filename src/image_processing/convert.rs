use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::metadata::count_exif_fields;
use super::{print_outcome, FileOutcome};
use crate::error::{Result, StripError};

/// JPEG has no lossless mode, so re-encoding always uses this fixed quality
pub const JPEG_QUALITY: u8 = 95;

/// Encoders the stripped image can be written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Pick the encoder from the output extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        }
    }
}

/// A freshly decoded pixel buffer with no metadata attached
#[derive(Debug, Clone)]
pub enum Normalized {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Normalized {
    pub fn has_alpha(&self) -> bool {
        matches!(self, Normalized::Rgba(_))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Normalized::Rgb(img) => img.dimensions(),
            Normalized::Rgba(img) => img.dimensions(),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Normalized::Rgb(_) => "RGB",
            Normalized::Rgba(_) => "RGBA",
        }
    }
}

/// Summary of a completed (or, in dry-run mode, validated) conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub source_format: String,
    pub output_format: OutputFormat,
    pub mode: &'static str,
    pub width: u32,
    pub height: u32,
    /// Alpha was composited onto white because the target was JPEG
    pub flattened_alpha: bool,
    /// Exif fields present in the source, all of which are gone from the output
    pub exif_fields: usize,
}

/// An input that has been read, validated and normalized but not written yet
#[derive(Debug)]
pub struct PreparedImage {
    input_path: PathBuf,
    output_path: PathBuf,
    source_format: ImageFormat,
    output_format: OutputFormat,
    image: Normalized,
    exif_fields: usize,
}

impl PreparedImage {
    /// Describe what writing this image would produce
    pub fn report(&self) -> ConversionReport {
        let (width, height) = self.image.dimensions();
        ConversionReport {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            source_format: format_label(self.source_format),
            output_format: self.output_format,
            mode: self.image.mode(),
            width,
            height,
            flattened_alpha: self.output_format == OutputFormat::Jpeg && self.image.has_alpha(),
            exif_fields: self.exif_fields,
        }
    }

    /// Encode the buffer and write it to the output path.
    ///
    /// An existing file is never replaced, and a partially written one is
    /// removed when encoding fails.
    pub fn write(self) -> Result<ConversionReport> {
        let input = self.input_path.as_path();
        let output = self.output_path.as_path();

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(output)
            .map_err(|e| StripError::from_write(input, output, e))?;
        let mut writer = BufWriter::new(file);

        let written = encode(&self.image, self.output_format, &mut writer)
            .map_err(|e| StripError::from_encode(input, output, e))
            .and_then(|_| {
                writer
                    .flush()
                    .map_err(|e| StripError::from_write(input, output, e))
            });

        if let Err(err) = written {
            drop(writer);
            let _ = fs::remove_file(output);
            return Err(err);
        }

        Ok(self.report())
    }
}

/// Read, validate and normalize `input_path` for writing to `output_path`.
///
/// Nothing is created on disk; failures here leave no output behind.
pub fn prepare(input_path: &Path, output_path: &Path) -> Result<PreparedImage> {
    let bytes = fs::read(input_path).map_err(|e| StripError::from_read(input_path, e))?;

    let source_format = detect_format(input_path, &bytes)?;

    let decoded = image::load_from_memory_with_format(&bytes, source_format)
        .map_err(|e| StripError::processing(input_path, e))?;
    let keep_alpha = match source_format {
        ImageFormat::Png => png_keeps_alpha(&bytes),
        _ => decoded.color().has_alpha(),
    };
    let image = normalize(decoded, keep_alpha);

    let output_format = OutputFormat::from_path(output_path).ok_or_else(|| {
        let ext = output_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_else(|| "no extension".to_string());
        StripError::unsupported(output_path, ext)
    })?;

    Ok(PreparedImage {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        source_format,
        output_format,
        image,
        exif_fields: count_exif_fields(&bytes),
    })
}

/// Re-encode `input_path` into `output_path`, dropping every piece of metadata
pub fn strip_metadata(input_path: &Path, output_path: &Path) -> Result<ConversionReport> {
    prepare(input_path, output_path)?.write()
}

/// Boolean front-end over [`strip_metadata`].
///
/// Every outcome is printed the same way the batch engine prints it, and
/// anything but a completed conversion is `false`; nothing propagates.
pub fn remove_metadata(input_path: &Path, output_path: &Path) -> bool {
    let outcome = FileOutcome::from_result(strip_metadata(input_path, output_path));
    print_outcome(input_path, &outcome, false, false);
    matches!(outcome, FileOutcome::Converted(_))
}

/// Detect the container from its magic bytes. Only JPEG and PNG are accepted.
pub fn detect_format(input_path: &Path, bytes: &[u8]) -> Result<ImageFormat> {
    match image::guess_format(bytes) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => Ok(format),
        Ok(other) => Err(StripError::unsupported(input_path, format_label(other))),
        Err(_) => Err(StripError::unsupported(input_path, "unknown")),
    }
}

/// Convert to RGBA when the source has an alpha channel or a palette, RGB otherwise
pub fn normalize(img: DynamicImage, keep_alpha: bool) -> Normalized {
    if keep_alpha {
        Normalized::Rgba(img.into_rgba8())
    } else {
        Normalized::Rgb(img.into_rgb8())
    }
}

/// Composite an RGBA buffer over an opaque white background
pub fn flatten_on_white(img: &RgbaImage) -> RgbImage {
    let (width, height) = img.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

fn encode<W: Write>(
    image: &Normalized,
    format: OutputFormat,
    writer: W,
) -> image::ImageResult<()> {
    match (format, image) {
        (OutputFormat::Jpeg, Normalized::Rgb(rgb)) => {
            rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, JPEG_QUALITY))
        }
        (OutputFormat::Jpeg, Normalized::Rgba(rgba)) => flatten_on_white(rgba)
            .write_with_encoder(JpegEncoder::new_with_quality(writer, JPEG_QUALITY)),
        (OutputFormat::Png, Normalized::Rgb(rgb)) => rgb.write_with_encoder(PngEncoder::new(writer)),
        (OutputFormat::Png, Normalized::Rgba(rgba)) => {
            rgba.write_with_encoder(PngEncoder::new(writer))
        }
    }
}

/// Color type byte of the PNG IHDR chunk
fn png_color_type(bytes: &[u8]) -> Option<u8> {
    if bytes.len() > 25 && &bytes[12..16] == b"IHDR" {
        Some(bytes[25])
    } else {
        None
    }
}

/// The decoder expands palettes and tRNS color keys into an alpha channel, so
/// the stored color type decides: palette (3), gray+alpha (4) and RGBA (6)
/// keep alpha, gray (0) and RGB (2) don't.
fn png_keeps_alpha(bytes: &[u8]) -> bool {
    matches!(png_color_type(bytes), Some(3 | 4 | 6))
}

fn format_label(format: ImageFormat) -> String {
    format!("{:?}", format).to_uppercase()
}
