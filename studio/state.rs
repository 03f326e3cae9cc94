use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use petal_counter::{AnalysisResult, PetalConfig, Session};

/// What the analysis worker reports once it has updated the session.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    Finished(AnalysisResult),
    Failed(String),
}

pub struct StudioState {
    pub config: PetalConfig,
    /// Upload page state: image, result, error, analyzing flag.
    pub session: Session,
    /// Receiver for the in-flight analysis, if one was started.
    pub analysis_rx: Option<Arc<Mutex<mpsc::Receiver<AnalysisEvent>>>>,
}

impl StudioState {
    pub fn new(config: PetalConfig) -> Self {
        let session = Session::new(config.max_upload_bytes);
        StudioState { config, session, analysis_rx: None }
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the shared state, carrying on with the inner value if a handler
/// thread panicked while holding the lock.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(|poisoned| {
        log::warn!("studio state lock poisoned; continuing with recovered state");
        poisoned.into_inner()
    })
}
