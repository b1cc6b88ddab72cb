use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.naukri.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub job_role: String,
    pub num_pages: u32,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub database_path: String,
    pub page_delay_secs: u64,
    pub concurrency_limit: usize,
    pub max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let job_role = env::var("NAUKRI_JOB_ROLE").unwrap_or_else(|_| "SDET".to_string());

        let num_pages = env::var("NAUKRI_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let base_url = env::var("NAUKRI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let output_dir = env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "jobscraper.db".to_string());

        let page_delay_secs = env::var("PAGE_DELAY_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let max_retries = env::var("MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let config = Self {
            job_role,
            num_pages,
            base_url,
            output_dir,
            database_path,
            page_delay_secs,
            concurrency_limit,
            max_retries,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.job_role.trim().is_empty() {
            return Err(Error::Config("job role must not be empty".to_string()));
        }
        if self.num_pages == 0 {
            return Err(Error::Config("number of pages must be at least 1".to_string()));
        }
        if self.concurrency_limit == 0 {
            return Err(Error::Config("CONCURRENCY_LIMIT must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_secs(self.page_delay_secs)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub job_role: String,
    pub num_pages: u32,
    pub output_dir: PathBuf,
    pub concurrency_limit: usize,
    pub render_charts: bool,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            job_role: config.job_role.clone(),
            num_pages: config.num_pages,
            output_dir: config.output_dir.clone(),
            concurrency_limit: config.concurrency_limit,
            render_charts: true,
        }
    }
}
