pub mod analysis;
pub mod config;
pub mod error;
pub mod input;
pub mod session;

// Convenience re-exports
pub use analysis::analyzer::Analyzer;
pub use analysis::flower_type::FlowerType;
pub use analysis::heuristic::{estimate_petals, scan, ScanStats};
pub use analysis::pacer::{ManualPacer, Pacer, SystemPacer};
pub use analysis::pixels::PixelBuffer;
pub use analysis::result::AnalysisResult;
pub use config::PetalConfig;
pub use error::{PetalError, Result};
pub use input::{DragEvent, DropZone, FileCandidate, UploadedImage};
pub use session::{AnalysisTicket, Session};
