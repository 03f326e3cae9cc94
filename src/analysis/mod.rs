pub mod analyzer;
pub mod flower_type;
pub mod heuristic;
pub mod pacer;
pub mod pixels;
pub mod result;

pub use analyzer::Analyzer;
pub use flower_type::FlowerType;
pub use heuristic::{estimate_petals, scan, ScanStats};
pub use pacer::{ManualPacer, Pacer, SystemPacer};
pub use pixels::PixelBuffer;
pub use result::AnalysisResult;
