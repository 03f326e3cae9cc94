use std::io::Cursor;
use tiny_http::Response;

use petal_counter::AnalysisResult;

use crate::render::{html_escape, render_page};
use crate::state::{self, SharedState};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let page = {
        let st = state::lock(&state);
        build_page(&st)
    };
    crate::routes::html_response(page)
}

/// Snapshot of the session fields the page needs.
pub struct PageView<'a> {
    pub image: Option<(String, &'a str)>,
    pub result: Option<&'a AnalysisResult>,
    pub error: Option<&'a str>,
    pub analyzing: bool,
    pub max_upload: u64,
}

fn build_page(st: &state::StudioState) -> String {
    let session = &st.session;
    let view = PageView {
        image: session.uploaded().map(|u| (u.data_url(), u.name())),
        result: session.result(),
        error: session.error(),
        analyzing: session.is_analyzing(),
        max_upload: st.config.max_upload_bytes,
    };
    render_view(&view)
}

pub fn render_view(view: &PageView<'_>) -> String {
    let hide = |show: bool| if show { "" } else { "hidden" };
    let has_image = view.image.is_some();

    let result_section = if view.analyzing {
        analyzing_html()
    } else if let Some(result) = view.result {
        result_html(result)
    } else if let Some(err) = view.error {
        error_html(err)
    } else {
        String::new()
    };

    // Validation errors show under the drop zone; analysis errors in the result card.
    let upload_error = if has_image { String::new() } else { view.error.map(error_html).unwrap_or_default() };
    let (image_src, image_alt) = view
        .image
        .as_ref()
        .map(|(src, name)| (src.as_str(), html_escape(name)))
        .unwrap_or(("", String::new()));

    render_page(view.analyzing, view.max_upload, |tmpl| {
        tmpl
            .replace("{{UPLOAD_HIDE}}", hide(!has_image))
            .replace("{{ANALYSIS_HIDE}}", hide(has_image))
            .replace("{{ERROR_HTML}}", &upload_error)
            .replace("{{IMAGE_SRC}}", image_src)
            .replace("{{IMAGE_ALT}}", &image_alt)
            .replace("{{RESULT_SECTION}}", &result_section)
    })
}

// ---------------------------------------------------------------------------
// Section builders
// ---------------------------------------------------------------------------

fn analyzing_html() -> String {
    r#"<div class="spinner-wrap"><div class="spinner"></div>
<h3>Analyzing your flower...</h3>
<p>Scanning the image to detect and count petals</p></div>"#.to_owned()
}

fn result_html(result: &AnalysisResult) -> String {
    format!(
        r#"<div class="hero">
  <div class="count">{count}</div>
  <div class="label">Petals Detected</div>
  <div class="conf">{conf:.1}% Confidence</div>
</div>
<div class="details">
  <div class="detail"><h4>Flower Type</h4><p>{flower}</p></div>
  <div class="detail"><h4>Processing Time</h4><p>{secs:.1}s</p></div>
</div>
<div class="bar-head"><span>Confidence Level</span><span>{conf:.1}%</span></div>
<div class="bar-wrap"><div class="bar-fill" style="width:{conf}%"></div></div>
<div class="note"><strong>Note:</strong> The petal count is estimated from brightness and color changes in the
centre of the photo. Accuracy varies with image quality, lighting, and flower type. For best results use a clear,
well-lit image with the flower centred in the frame.</div>"#,
        count  = result.petal_count,
        conf   = result.confidence,
        flower = html_escape(result.flower_type.label()),
        secs   = result.processing_time_secs(),
    )
}

fn error_html(msg: &str) -> String {
    format!(r#"<div class="error-box">{}</div>"#, html_escape(msg))
}
