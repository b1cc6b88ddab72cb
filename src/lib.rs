pub mod config;
pub mod error;
pub mod models;
pub mod naukri;
pub mod taxonomy;
pub mod analysis;
pub mod report;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use naukri::{NaukriClient, PageSource, SnapshotSource};
pub use analysis::ScrapePipeline;
pub use storage::Storage;
