//! Location normalization.
//!
//! Listing locations arrive as free text such as `Hybrid - Bengaluru`,
//! `New Delhi` or `Mumbai (All Areas)`. Normalization strips the decorations
//! and folds the common spellings of a handful of metros into one name.

use regex::Regex;

use crate::error::Result;

/// Removals applied in order. Whitespace removal runs before the slash rule,
/// so `Delhi / NCR` becomes `delhi`.
const DECORATION_PATTERNS: &[&str] = &[
    r"\(.*\)",
    r"hybrid\s*-\s*",
    r"\bnew\s",
    r"\s*",
    r"/.*$",
];

const CANONICAL_CITIES: &[(&str, &str)] = &[
    (r"\b\w*mumbai\w*\b", "mumbai"),
    (r"\b\w*delhi\w*\b", "delhi"),
    (r"\b\w*bangal\w*\b", "bengaluru"),
    (r"\b\w*noida\w*\b", "noida"),
];

pub struct LocationTaxonomy {
    decorations: Vec<Regex>,
    canonical: Vec<(Regex, &'static str)>,
}

impl LocationTaxonomy {
    pub fn new() -> Result<Self> {
        let decorations = DECORATION_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let canonical = CANONICAL_CITIES
            .iter()
            .map(|(p, name)| Regex::new(p).map(|re| (re, *name)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            decorations,
            canonical,
        })
    }

    pub fn strip_decorations(&self, location: &str) -> String {
        let mut cleaned = location.to_string();
        for re in &self.decorations {
            cleaned = re.replace_all(&cleaned, "").into_owned();
        }
        cleaned.trim().to_string()
    }

    pub fn canonical_city(&self, location: &str) -> String {
        let mut cleaned = location.to_string();
        for (re, name) in &self.canonical {
            cleaned = re.replace_all(&cleaned, *name).into_owned();
        }
        cleaned.trim().to_string()
    }

    /// Full normalization of one already-lowercased location entry.
    pub fn normalize(&self, location: &str) -> String {
        self.canonical_city(&self.strip_decorations(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> LocationTaxonomy {
        LocationTaxonomy::new().unwrap()
    }

    #[test]
    fn test_strips_hybrid_prefix() {
        assert_eq!(taxonomy().normalize("hybrid - bengaluru"), "bengaluru");
        assert_eq!(taxonomy().normalize("hybrid-pune"), "pune");
    }

    #[test]
    fn test_strips_parenthesized_suffix() {
        assert_eq!(taxonomy().normalize("mumbai (all areas)"), "mumbai");
    }

    #[test]
    fn test_drops_new_prefix_and_whitespace() {
        assert_eq!(taxonomy().normalize("new delhi"), "delhi");
        assert_eq!(taxonomy().normalize(" navi mumbai"), "mumbai");
        assert_eq!(taxonomy().normalize("greater noida"), "noida");
    }

    #[test]
    fn test_keeps_first_of_slash_alternatives() {
        assert_eq!(taxonomy().normalize("delhi / ncr"), "delhi");
        assert_eq!(taxonomy().normalize("kolkata/bangalore"), "kolkata");
        assert_eq!(taxonomy().normalize("bangalore/bengaluru"), "bengaluru");
    }

    #[test]
    fn test_unknown_city_passes_through() {
        assert_eq!(taxonomy().normalize("chennai"), "chennai");
        assert_eq!(taxonomy().normalize(""), "");
    }
}
