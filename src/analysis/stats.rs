use std::collections::HashMap;

use crate::models::{CategoryStat, FieldStats};

/// Distinct values with their counts, most frequent first.
///
/// Ties keep the order in which values first appeared.
pub fn value_counts<I, S>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        let value = value.as_ref();
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.to_string(), counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

impl FieldStats {
    pub fn from_values<I, S>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let counts = value_counts(values);
        let total: usize = counts.iter().map(|(_, c)| c).sum();

        let categories = counts
            .into_iter()
            .map(|(value, count)| CategoryStat {
                percentage: count as f64 / total as f64 * 100.0,
                value,
                count,
            })
            .collect();

        Self {
            field: field.to_string(),
            total,
            categories,
        }
    }

    pub fn top(&self, n: usize) -> &[CategoryStat] {
        &self.categories[..n.min(self.categories.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
