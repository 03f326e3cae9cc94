//! Page rendering for the studio.
//!
//! One embedded HTML page with `{{TOKEN}}` placeholders.  `render_page`
//! fills the page-wide tokens, a handler closure fills its own, and anything
//! left over is removed before the page is served.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// `analyzing` switches on the `/analysis/events` subscription; `max_upload`
/// (bytes) is shown in the drop zone hint.
pub fn render_page<F>(analyzing: bool, max_upload: u64, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let html = TEMPLATE
        .replace("{{ANALYZING}}", if analyzing { "true" } else { "false" })
        .replace("{{MAX_UPLOAD_MB}}", &(max_upload / (1024 * 1024)).to_string());
    blank_remaining(fill(html))
}

/// Drops every `{{TOKEN}}` left in `html`.  An unclosed `{{` is kept as text.
fn blank_remaining(html: String) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html.as_str();
    while let Some(open) = rest.find("{{") {
        match rest[open..].find("}}") {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Escapes text for element content and attribute values.  Braces are
/// encoded too, so user text can never form a `{{TOKEN}}`.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
     .replace('{', "&#123;")
     .replace('}', "&#125;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftover_tokens_are_blanked() {
        assert_eq!(blank_remaining("a{{X}}b{{Y}}c".to_owned()), "abc");
        assert_eq!(blank_remaining("open {{ only".to_owned()), "open {{ only");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
        assert_eq!(html_escape("{{X}}"), "&#123;&#123;X&#125;&#125;");
    }

    #[test]
    fn page_has_no_raw_tokens() {
        let html = render_page(false, 10 * 1024 * 1024, |t| t);
        assert!(!html.contains("{{"));
        assert!(html.contains("up to 10MB"));
    }
}
