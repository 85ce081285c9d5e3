use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Marker inserted between the file stem and its extension
pub const DEFAULT_SUFFIX: &str = "_no_exif";

/// Derive the output path for a stripped copy of `input_path`.
///
/// The result sits next to the input, with `suffix` inserted before the last
/// extension: `photos/IMG_001.JPG` becomes `photos/IMG_001_no_exif.JPG`.
/// This is pure path arithmetic and never touches the filesystem.
pub fn derive_output_path(input_path: &Path, suffix: &str) -> PathBuf {
    let Some(stem) = input_path.file_stem() else {
        // Empty paths and `..` have no file name to decorate
        return input_path.join(suffix);
    };

    let mut file_name = OsString::from(stem);
    file_name.push(suffix);
    if let Some(ext) = input_path.extension() {
        file_name.push(".");
        file_name.push(ext);
    }

    input_path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(input: &str) -> PathBuf {
        derive_output_path(Path::new(input), DEFAULT_SUFFIX)
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(derive("photo.jpg"), PathBuf::from("photo_no_exif.jpg"));
        assert_eq!(derive("icon.png"), PathBuf::from("icon_no_exif.png"));
        assert_eq!(
            derive("holiday/2024/IMG_001.JPG"),
            PathBuf::from("holiday/2024/IMG_001_no_exif.JPG")
        );
        assert_eq!(
            derive("/tmp/scan.jpeg"),
            PathBuf::from("/tmp/scan_no_exif.jpeg")
        );
    }

    #[test]
    fn test_derive_unusual_names() {
        // Only the last extension is kept after the marker
        assert_eq!(derive("a.tar.gz"), PathBuf::from("a.tar_no_exif.gz"));
        assert_eq!(derive(".hidden"), PathBuf::from(".hidden_no_exif"));
        assert_eq!(derive("README"), PathBuf::from("README_no_exif"));
        assert_eq!(derive(""), PathBuf::from("_no_exif"));
        assert_eq!(derive(".."), PathBuf::from("../_no_exif"));
    }

    #[test]
    fn test_derive_custom_suffix() {
        assert_eq!(
            derive_output_path(Path::new("shots/cat.png"), "-clean"),
            PathBuf::from("shots/cat-clean.png")
        );
    }

    #[test]
    fn test_derive_is_deterministic() {
        let input = Path::new("dir/photo.jpg");
        assert_eq!(
            derive_output_path(input, DEFAULT_SUFFIX),
            derive_output_path(input, DEFAULT_SUFFIX)
        );
    }
}
