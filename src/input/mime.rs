/// MIME types accepted for upload, matched exactly as the browser reports them.
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Reported for content that cannot be identified.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

pub fn is_accepted(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Guesses a MIME type from the leading bytes, for files that arrive without
/// a declared type (e.g. a path on the command line).
pub fn sniff(bytes: &[u8]) -> &'static str {
    infer::get(bytes).map(|t| t.mime_type()).unwrap_or(UNKNOWN_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn accepts_only_the_listed_types() {
        for mime in ACCEPTED_MIME_TYPES {
            assert!(is_accepted(mime));
        }
        assert!(!is_accepted("image/gif"));
        assert!(!is_accepted("image/svg+xml"));
        assert!(!is_accepted(""));
        assert!(!is_accepted(" image/png"));
        assert!(!is_accepted("image/png "));
        assert!(!is_accepted("IMAGE/PNG"));
    }

    #[test]
    fn sniffs_png_and_falls_back_for_text() {
        assert_eq!(sniff(PNG_MAGIC), "image/png");
        assert_eq!(sniff(b"just some text"), UNKNOWN_MIME);
    }
}
