use crate::models::{FieldStats, JobRecord};
use crate::taxonomy::LocationTaxonomy;

/// One normalized location per job and listed location.
pub fn explode_locations(records: &[JobRecord], taxonomy: &LocationTaxonomy) -> Vec<(u32, String)> {
    records
        .iter()
        .flat_map(|record| {
            record
                .locations
                .iter()
                .map(move |location| (record.job_no, taxonomy.normalize(location)))
        })
        .collect()
}

pub fn location_stats(locations: &[(u32, String)]) -> FieldStats {
    FieldStats::from_values("locations", locations.iter().map(|(_, l)| l))
}
