pub mod audit;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod report;
pub mod writer;

pub use config::Config;
pub use error::{ReportError, Result};
pub use model::{ReportSummary, Severity, Vulnerability};
pub use report::{Clock, LocalClock, ReportPayload};
