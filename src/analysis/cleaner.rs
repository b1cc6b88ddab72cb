use crate::models::{JobRecord, RawJob};

const SALARY_UNIT: &str = " lacs pa";
const EXPERIENCE_UNIT: &str = " yrs";

/// Lowercases every field, splits the list columns and strips unit suffixes.
pub fn clean_job(raw: &RawJob) -> JobRecord {
    let location = raw.location.to_lowercase();
    let skills = raw.skills.to_lowercase();

    JobRecord {
        job_no: raw.job_no,
        role: raw.role.to_lowercase(),
        company: raw.company.to_lowercase(),
        locations: location.split(',').map(str::to_string).collect(),
        experience: raw.experience.to_lowercase().replace(EXPERIENCE_UNIT, ""),
        salary: raw.salary.to_lowercase().replace(SALARY_UNIT, ""),
        skills: skills.split(',').map(|s| s.trim().to_string()).collect(),
    }
}

pub fn clean_jobs(raw: &[RawJob]) -> Vec<JobRecord> {
    raw.iter().map(clean_job).collect()
}
