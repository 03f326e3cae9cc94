use crate::analysis::result::AnalysisResult;
use crate::config::MAX_UPLOAD_BYTES;
use crate::error::{PetalError, Result};
use crate::input::{validate, DragEvent, DropZone, FileCandidate, UploadedImage};

/// Identifies one started analysis.  Completions carrying an outdated ticket
/// are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

/// Everything the upload page shows: the current image, its result or error,
/// and whether an analysis is running.
///
/// At most one analysis is in flight; uploads are refused until it completes
/// or the session is reset.
#[derive(Debug)]
pub struct Session {
    uploaded: Option<UploadedImage>,
    result: Option<AnalysisResult>,
    error: Option<String>,
    analyzing: bool,
    drop_zone: DropZone,
    max_upload_bytes: u64,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(MAX_UPLOAD_BYTES)
    }
}

impl Session {
    pub fn new(max_upload_bytes: u64) -> Self {
        Session {
            uploaded: None,
            result: None,
            error: None,
            analyzing: false,
            drop_zone: DropZone::new(),
            max_upload_bytes,
            generation: 0,
        }
    }

    pub fn uploaded(&self) -> Option<&UploadedImage> {
        self.uploaded.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// Drag highlight for front ends that forward pointer events.  The
    /// studio page keeps its highlight client-side and only reports drops.
    pub fn is_drag_active(&self) -> bool {
        self.drop_zone.is_active()
    }

    /// Feeds a drag event to the drop zone; see [`Session::is_drag_active`].
    pub fn drag(&mut self, event: DragEvent) {
        self.drop_zone.handle(event);
    }

    /// Submits the first dropped file; an empty drop changes nothing but the drag flag.
    pub fn drop_files(&mut self, files: Vec<FileCandidate>) -> Option<Result<AnalysisTicket>> {
        let first = self.drop_zone.drop_files(files)?;
        Some(self.submit(first))
    }

    /// Validates `file` and, if accepted, starts a new analysis.
    ///
    /// On success the previous error and result are cleared and the returned
    /// ticket must be passed to [`Session::complete`].
    pub fn submit(&mut self, file: FileCandidate) -> Result<AnalysisTicket> {
        if self.analyzing {
            return Err(PetalError::AnalysisInProgress);
        }
        let image = match validate(file, self.max_upload_bytes) {
            Ok(image) => image,
            Err(e) => {
                self.error = Some(e.user_message());
                return Err(e);
            }
        };
        log::info!("starting analysis of '{}'", image.name());
        self.error = None;
        self.result = None;
        self.uploaded = Some(image);
        self.analyzing = true;
        self.generation += 1;
        Ok(AnalysisTicket(self.generation))
    }

    /// Records the outcome of the analysis identified by `ticket`.
    ///
    /// Returns `false` when the ticket was superseded by a reset and the
    /// outcome was discarded.
    pub fn complete(&mut self, ticket: AnalysisTicket, outcome: Result<AnalysisResult>) -> bool {
        if !self.analyzing || ticket.0 != self.generation {
            log::debug!("discarding stale analysis outcome {:?}", ticket);
            return false;
        }
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(e) => {
                log::warn!("analysis failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
        self.analyzing = false;
        true
    }

    /// Clears image, result, error, analyzing and drag flags together.
    pub fn reset(&mut self) {
        self.uploaded = None;
        self.result = None;
        self.error = None;
        self.analyzing = false;
        self.drop_zone.clear();
        self.generation += 1;
    }
}
