use exif::Reader;
use std::io::Cursor;

/// Count the Exif fields embedded in a JPEG or PNG buffer.
///
/// Returns 0 when the container has no Exif block or it cannot be parsed.
pub fn count_exif_fields(bytes: &[u8]) -> usize {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif.fields().count(),
        Err(_) => 0,
    }
}

/// Check whether a buffer still carries an Exif block
#[cfg(test)]
pub(crate) fn has_exif(bytes: &[u8]) -> bool {
    count_exif_fields(bytes) > 0
}
