pub mod drop_zone;
pub mod mime;
pub mod upload;

pub use drop_zone::{DragEvent, DropZone};
pub use upload::{validate, validate_path, FileCandidate, UploadedImage};
