pub mod cleaner;
pub mod locations;
pub mod pipeline;
pub mod skills;
pub mod stats;

pub use cleaner::{clean_job, clean_jobs};
pub use pipeline::ScrapePipeline;
pub use stats::value_counts;
