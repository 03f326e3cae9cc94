pub mod analysis_sse;
pub mod home;
pub mod reset;
pub mod upload;
