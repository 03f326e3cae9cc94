pub mod session;

pub use session::{AnalysisTicket, Session};
