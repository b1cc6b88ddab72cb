use std::collections::HashSet;

use crate::models::{FieldStats, JobRecord};

/// One row per job and listed skill.
pub fn explode_skills(records: &[JobRecord]) -> Vec<(u32, String)> {
    records
        .iter()
        .flat_map(|record| record.skills.iter().map(move |s| (record.job_no, s.clone())))
        .collect()
}

/// Skills in order of first appearance.
pub fn distinct_skills(skills: &[(u32, String)]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct = Vec::new();
    for (_, skill) in skills {
        if seen.insert(skill.as_str()) {
            distinct.push(skill.clone());
        }
    }
    distinct
}

pub fn skill_stats(skills: &[(u32, String)]) -> FieldStats {
    FieldStats::from_values("skills", skills.iter().map(|(_, s)| s))
}
