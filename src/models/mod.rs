pub mod job;
pub mod report;

pub use job::{JobCsvRow, JobRecord, RawJob};
pub use report::{AnalysisReport, CategoryStat, FieldStats};
