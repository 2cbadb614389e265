pub mod config;
pub mod logging;

pub mod check;
pub mod notify;
pub mod report;
pub mod session;
pub mod validate;

pub use check::{CheckResult, SafetyCheckClient};
pub use session::{CheckSessions, SessionHandle, SessionState};
pub use validate::{is_valid_domain, CandidateUrl};
