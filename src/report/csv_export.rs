use std::path::Path;

use crate::error::Result;
use crate::models::{JobCsvRow, JobRecord};

pub fn csv_file_name(job_role: &str) -> String {
    format!("Naukri_{}.csv", job_role.replace(' ', "_"))
}

pub fn write_jobs_csv(path: &Path, records: &[JobRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(JobCsvRow::from(record))?;
    }
    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_file_name_replaces_spaces() {
        assert_eq!(csv_file_name("SDET"), "Naukri_SDET.csv");
        assert_eq!(csv_file_name("Data Engineer"), "Naukri_Data_Engineer.csv");
    }

    #[test]
    fn test_writes_header_and_joined_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        let records = vec![JobRecord {
            job_no: 1,
            role: "sdet".to_string(),
            company: "acme".to_string(),
            locations: vec!["pune".to_string(), " mumbai".to_string()],
            experience: "2-5".to_string(),
            salary: "na".to_string(),
            skills: vec!["selenium".to_string(), "java".to_string()],
        }];

        write_jobs_csv(&path, &records).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("job_no,roles,companies,locations,experience,salaries,skills")
        );
        assert_eq!(lines.next(), Some("1,sdet,acme,\"pune, mumbai\",2-5,na,\"selenium,java\""));
    }
}
