pub mod analyzers;
pub mod collect;
pub mod error;
pub mod mode;
pub mod output;
pub mod pipeline;
pub mod reader;

pub use error::{ReportError, Skipped};
pub use mode::{ReportMode, Schema};
pub use pipeline::{Outcome, ReportRequest, generate_report};
