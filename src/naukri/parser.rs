use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::models::RawJob;

pub const MISSING_FIELD: &str = "NA";

/// CSS selectors for one job tuple on a search results page.
pub struct ListingSelectors {
    tuple: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    experience: Selector,
    salary: Selector,
    skill_list: Selector,
    skill_item: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tuple: parse_selector(".srp-jobtuple-wrapper")?,
            title: parse_selector(".title")?,
            company: parse_selector(".comp-name")?,
            location: parse_selector(".loc-wrap")?,
            experience: parse_selector(".exp-wrap")?,
            salary: parse_selector(".sal-wrap")?,
            skill_list: parse_selector(".tags-gt")?,
            skill_item: parse_selector("li")?,
        })
    }

    /// Extracts the listings of results page `page_index` (0-based).
    ///
    /// Tuples missing a title, company, location or experience are skipped,
    /// but still occupy a slot in the job numbering.
    pub fn parse_page(&self, html: &str, page_index: u32) -> Vec<RawJob> {
        let document = Html::parse_document(html);
        let tuples: Vec<ElementRef> = document.select(&self.tuple).collect();
        let per_page = tuples.len() as u32;

        let mut jobs = Vec::with_capacity(tuples.len());
        for (index, tuple) in tuples.into_iter().enumerate() {
            let job_no = page_index * per_page + index as u32 + 1;
            match self.parse_tuple(tuple, job_no) {
                Some(job) => jobs.push(job),
                None => tracing::debug!("Skipping job {} on page {}: missing fields", job_no, page_index),
            }
        }
        jobs
    }

    fn parse_tuple(&self, tuple: ElementRef<'_>, job_no: u32) -> Option<RawJob> {
        let role = first_text(tuple, &self.title)?;
        let company = first_text(tuple, &self.company)?;
        let location = first_text(tuple, &self.location)?;
        let experience = first_text(tuple, &self.experience)?;

        let salary = first_text(tuple, &self.salary).unwrap_or_else(|| MISSING_FIELD.to_string());

        let skills = match tuple.select(&self.skill_list).next() {
            Some(list) => list
                .select(&self.skill_item)
                .map(element_text)
                .collect::<Vec<_>>()
                .join(","),
            None => MISSING_FIELD.to_string(),
        };

        Some(RawJob {
            job_no,
            role,
            company,
            location,
            experience,
            salary,
            skills,
        })
    }
}

/// Convenience wrapper building the selectors for a single page.
pub fn parse_listing_page(html: &str, page_index: u32) -> Result<Vec<RawJob>> {
    Ok(ListingSelectors::new()?.parse_page(html, page_index))
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::ParseError(format!("selector {}: {}", css, e)))
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

/// Visible text of an element with whitespace runs collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <div class="srp-jobtuple-wrapper">
    <a class="title">SDET - Automation</a>
    <a class="comp-name">Acme Corp</a>
    <span class="exp-wrap"><span>3-6 Yrs</span></span>
    <span class="sal-wrap"><span>10-15 Lacs PA</span></span>
    <span class="loc-wrap"><span>Hybrid - Bengaluru, Pune</span></span>
    <ul class="tags-gt"><li>Selenium</li><li>Java</li><li>API Testing</li></ul>
  </div>
  <div class="srp-jobtuple-wrapper">
    <a class="title">Senior QA</a>
    <a class="comp-name">Globex</a>
    <span class="exp-wrap">5-10 Yrs</span>
    <span class="loc-wrap">New Delhi</span>
  </div>
  <div class="srp-jobtuple-wrapper">
    <a class="title">Orphan Role</a>
    <span class="exp-wrap">1-2 Yrs</span>
    <span class="loc-wrap">Noida</span>
  </div>
  <div class="srp-jobtuple-wrapper">
    <a class="title">Test Engineer</a>
    <a class="comp-name">Initech</a>
    <span class="exp-wrap">0-1 Yrs</span>
    <span class="loc-wrap">Mumbai</span>
    <ul class="tags-gt"></ul>
  </div>
</body></html>
"#;

    #[test]
    fn test_parse_full_tuple() {
        let jobs = parse_listing_page(PAGE, 0).unwrap();
        let first = &jobs[0];
        assert_eq!(first.job_no, 1);
        assert_eq!(first.role, "SDET - Automation");
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(first.location, "Hybrid - Bengaluru, Pune");
        assert_eq!(first.experience, "3-6 Yrs");
        assert_eq!(first.salary, "10-15 Lacs PA");
        assert_eq!(first.skills, "Selenium,Java,API Testing");
    }

    #[test]
    fn test_missing_optional_fields_default_to_na() {
        let jobs = parse_listing_page(PAGE, 0).unwrap();
        let second = &jobs[1];
        assert_eq!(second.salary, "NA");
        assert_eq!(second.skills, "NA");
    }

    #[test]
    fn test_empty_skill_list_is_blank() {
        let jobs = parse_listing_page(PAGE, 0).unwrap();
        assert_eq!(jobs[2].role, "Test Engineer");
        assert_eq!(jobs[2].skills, "");
    }

    #[test]
    fn test_skipped_tuple_keeps_numbering() {
        let jobs = parse_listing_page(PAGE, 0).unwrap();
        let numbers: Vec<u32> = jobs.iter().map(|j| j.job_no).collect();
        assert_eq!(numbers, vec![1, 2, 4]);
    }

    #[test]
    fn test_numbering_offsets_by_page() {
        let jobs = parse_listing_page(PAGE, 2).unwrap();
        let numbers: Vec<u32> = jobs.iter().map(|j| j.job_no).collect();
        assert_eq!(numbers, vec![9, 10, 12]);
    }

    #[test]
    fn test_page_without_tuples() {
        let jobs = parse_listing_page("<html><body><p>No results</p></body></html>", 0).unwrap();
        assert!(jobs.is_empty());
    }
}
