use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Counts and shares of each distinct value of one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub field: String,
    pub total: usize,
    pub categories: Vec<CategoryStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub job_role: String,
    pub scraped_at: DateTime<Utc>,
    pub analyzed_at: DateTime<Utc>,
    pub total_jobs: usize,
    pub experience: FieldStats,
    pub salaries: FieldStats,
    pub locations: FieldStats,
    pub skills: FieldStats,
    pub distinct_skills: Vec<String>,
    pub artifacts: Vec<PathBuf>,
}
