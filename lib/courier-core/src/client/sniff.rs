//! Coarse MIME type detection for multipart data fields.
//!
//! Only the first byte of the payload is inspected. Several formats share a
//! leading byte, so the table below is a heuristic and can misclassify;
//! anything it does not recognise is sent as `application/octet-stream`.

use mime::Mime;

/// Leading byte to MIME type.
const SIGNATURES: [(u8, &str); 8] = [
    (0xFF, "image/jpeg"),
    (0x89, "image/png"),
    (0x47, "image/gif"),
    (0x49, "image/tiff"),
    (0x4D, "image/tiff"),
    (0x25, "application/pdf"),
    (0xD0, "application/vnd"),
    (0x46, "text/plain"),
];

/// Classifies `data` from its first byte.
///
/// ```rust
/// use courier_core::sniff_mime_type;
///
/// assert_eq!(sniff_mime_type(&[0x89, b'P', b'N', b'G']), mime::IMAGE_PNG);
/// assert_eq!(sniff_mime_type(&[]), mime::APPLICATION_OCTET_STREAM);
/// ```
#[must_use]
pub fn sniff_mime_type(data: &[u8]) -> Mime {
    data.first()
        .and_then(|first| {
            SIGNATURES
                .iter()
                .find(|(signature, _)| signature == first)
        })
        .and_then(|(_, mime_type)| mime_type.parse().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
