use serde::{Deserialize, Serialize};

/// A listing exactly as extracted from a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawJob {
    pub job_no: u32,
    pub role: String,
    pub company: String,
    pub location: String,
    pub experience: String,
    pub salary: String,
    pub skills: String,
}

/// A listing after lowercasing, splitting and unit stripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_no: u32,
    pub role: String,
    pub company: String,
    pub locations: Vec<String>,
    pub experience: String,
    pub salary: String,
    pub skills: Vec<String>,
}

/// Column layout of the exported CSV.
#[derive(Debug, Serialize)]
pub struct JobCsvRow<'a> {
    pub job_no: u32,
    pub roles: &'a str,
    pub companies: &'a str,
    pub locations: String,
    pub experience: &'a str,
    pub salaries: &'a str,
    pub skills: String,
}

impl<'a> From<&'a JobRecord> for JobCsvRow<'a> {
    fn from(record: &'a JobRecord) -> Self {
        Self {
            job_no: record.job_no,
            roles: &record.role,
            companies: &record.company,
            locations: record.locations.join(","),
            experience: &record.experience,
            salaries: &record.salary,
            skills: record.skills.join(","),
        }
    }
}
