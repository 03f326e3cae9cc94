/// One file part of a multipart/form-data body.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub filename: String,
    /// The part's own `Content-Type`, i.e. the browser's `file.type`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Boundary token of a `multipart/form-data; boundary=...` Content-Type.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .find_map(|param| param.trim().strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Splits a body into `(headers, data)` pairs, one per part.  Text between
/// delimiters without a blank header line (preamble, the closing `--`) is
/// skipped.
fn parts<'a>(body: &'a [u8], boundary: &str) -> Vec<(String, &'a [u8])> {
    let delimiter = format!("--{}", boundary);
    let mut found = Vec::new();
    let mut rest = Some(body);
    // A body cut short still yields its last, unterminated part.
    while let Some(remaining) = rest {
        let segment = match find_bytes(remaining, delimiter.as_bytes()) {
            Some(pos) => {
                rest = Some(&remaining[pos + delimiter.len()..]);
                &remaining[..pos]
            }
            None => {
                rest = None;
                remaining
            }
        };
        if let Some(blank) = find_bytes(segment, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&segment[..blank]).into_owned();
            let data = &segment[blank + 4..];
            found.push((headers, data.strip_suffix(b"\r\n").unwrap_or(data)));
        }
    }
    found
}

/// Every file part in the body, in submission order.
pub fn extract_file_parts(body: &[u8], boundary: &str) -> Vec<FilePart> {
    parts(body, boundary)
        .into_iter()
        .filter_map(|(headers, data)| {
            let filename = quoted_param(&headers, "filename")?;
            let content_type = header_value(&headers, "content-type").unwrap_or_default();
            Some(FilePart { filename, content_type, bytes: data.to_vec() })
        })
        .collect()
}

/// Extracts a plain-text (non-file) field from a multipart body.
pub fn extract_text_field(body: &[u8], boundary: &str, field_name: &str) -> Option<String> {
    parts(body, boundary)
        .into_iter()
        .find(|(headers, _)| {
            quoted_param(headers, "name").as_deref() == Some(field_name)
                && quoted_param(headers, "filename").is_none()
        })
        .and_then(|(_, data)| String::from_utf8(data.to_vec()).ok())
}

/// Parses `key="..."` from a Content-Disposition line.  The match must start
/// a parameter, so `name` does not pick up `filename`.
fn quoted_param(headers: &str, key: &str) -> Option<String> {
    let pattern = format!("{}=\"", key);
    let mut search = headers;
    while let Some(pos) = search.find(&pattern) {
        let preceded_ok = search[..pos]
            .chars()
            .last()
            .map_or(true, |c| c == ' ' || c == ';');
        let rest = &search[pos + pattern.len()..];
        if preceded_ok {
            let end = rest.find('"')?;
            return Some(rest[..end].to_owned());
        }
        search = rest;
    }
    None
}

/// Case-insensitive lookup of a part header such as `Content-Type`.
fn header_value(headers: &str, name: &str) -> Option<String> {
    headers.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(name) {
            Some(value.trim().to_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "----petalBoundary";

    fn body() -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(b"------petalBoundary\r\n");
        b.extend_from_slice(b"Content-Disposition: form-data; name=\"source\"\r\n\r\n");
        b.extend_from_slice(b"drop\r\n");
        b.extend_from_slice(b"------petalBoundary\r\n");
        b.extend_from_slice(b"Content-Disposition: form-data; name=\"image\"; filename=\"rose.png\"\r\n");
        b.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        b.extend_from_slice(b"\x89PNG\r\n");
        b.extend_from_slice(b"------petalBoundary\r\n");
        b.extend_from_slice(b"Content-Disposition: form-data; name=\"image\"; filename=\"notes.txt\"\r\n");
        b.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        b.extend_from_slice(b"hello\r\n");
        b.extend_from_slice(b"------petalBoundary--\r\n");
        b
    }

    #[test]
    fn boundary_from_header() {
        let ct = "multipart/form-data; boundary=----petalBoundary";
        assert_eq!(extract_boundary(ct).as_deref(), Some(BOUNDARY));
        assert_eq!(extract_boundary("text/plain"), None);
        assert_eq!(extract_boundary("multipart/form-data; boundary=\"abc\"").as_deref(), Some("abc"));
    }

    #[test]
    fn truncated_body_keeps_partial_file() {
        let mut b = body();
        let cut = find_bytes(&b, b"hello").unwrap() + 3;
        b.truncate(cut);
        let files = extract_file_parts(&b, BOUNDARY);
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].bytes, b"hel");
    }

    #[test]
    fn file_parts_keep_order_type_and_bytes() {
        let files = extract_file_parts(&body(), BOUNDARY);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "rose.png");
        assert_eq!(files[0].content_type, "image/png");
        assert_eq!(files[0].bytes, b"\x89PNG");
        assert_eq!(files[1].content_type, "text/plain");
    }

    #[test]
    fn text_field_ignores_file_parts() {
        assert_eq!(extract_text_field(&body(), BOUNDARY, "source").as_deref(), Some("drop"));
        assert_eq!(extract_text_field(&body(), BOUNDARY, "image"), None);
    }
}
