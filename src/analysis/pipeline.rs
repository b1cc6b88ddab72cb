use std::path::PathBuf;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::cleaner::clean_jobs;
use crate::analysis::locations::{explode_locations, location_stats};
use crate::analysis::skills::{distinct_skills, explode_skills, skill_stats};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{AnalysisReport, FieldStats, RawJob};
use crate::naukri::{ListingSelectors, PageSource};
use crate::report::{
    csv_file_name, render_bar_chart, write_jobs_csv, BarChart, WordCloud, EXPERIENCE_CHART,
    LOCATION_CHART, LOCATION_WORDCLOUD, SALARY_CHART, SKILLS_WORDCLOUD,
};
use crate::storage::Storage;
use crate::taxonomy::LocationTaxonomy;

const WORDCLOUD_SIZE: (u32, u32) = (800, 400);

pub struct ScrapePipeline {
    source: Arc<dyn PageSource>,
    selectors: ListingSelectors,
    taxonomy: LocationTaxonomy,
    wordcloud: WordCloud,
    storage: Storage,
    config: PipelineConfig,
}

impl ScrapePipeline {
    pub fn new(
        source: impl PageSource + 'static,
        storage: Storage,
        config: PipelineConfig,
    ) -> Result<Self> {
        Ok(Self {
            source: Arc::new(source),
            selectors: ListingSelectors::new()?,
            taxonomy: LocationTaxonomy::new()?,
            wordcloud: WordCloud::new(WORDCLOUD_SIZE.0, WORDCLOUD_SIZE.1)?,
            storage,
            config,
        })
    }

    /// Scrapes, stores and analyzes one run. `None` when no listing was found.
    pub async fn run(&mut self) -> Result<Option<AnalysisReport>> {
        tracing::info!(
            "Scraping Naukri.com for {} job data ({} pages via {})",
            self.config.job_role,
            self.config.num_pages,
            self.source.name()
        );
        let scraped_at = Utc::now();
        let jobs = self.scrape().await?;
        tracing::info!("Scraping complete, {} listings. Processing data...", jobs.len());

        if jobs.is_empty() {
            tracing::warn!("No job data scraped for {}", self.config.job_role);
            return Ok(None);
        }

        self.storage
            .save_run(&self.config.job_role, self.config.num_pages, scraped_at, &jobs)?;
        tracing::info!("Listings saved to database");

        self.analyze(&jobs, scraped_at).map(Some)
    }

    /// Re-analyzes the latest stored run for the configured role.
    pub fn run_cached(&self) -> Result<Option<AnalysisReport>> {
        match self.storage.latest_run(&self.config.job_role)? {
            Some(run) if !run.jobs.is_empty() => {
                tracing::info!(
                    "Using cached run {} from {} ({} listings)",
                    run.id,
                    run.scraped_at,
                    run.jobs.len()
                );
                self.analyze(&run.jobs, run.scraped_at).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub async fn scrape(&self) -> Result<Vec<RawJob>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit));
        let pb = progress_bar(self.config.num_pages as u64);

        let page_futures = (0..self.config.num_pages).map(|page| {
            let source = self.source.clone();
            let sem = semaphore.clone();
            let pb = pb.clone();

            async move {
                let _permit = sem.acquire().await.ok()?;
                let result = source.fetch_page(page).await;
                pb.inc(1);

                match result {
                    Ok(html) => Some((page, html)),
                    Err(e) => {
                        tracing::warn!("Failed to fetch page {}: {}", page, e);
                        None
                    }
                }
            }
        });

        let pages = join_all(page_futures).await;
        pb.finish_with_message("Fetched all pages");

        let mut jobs = Vec::new();
        for (page, html) in pages.into_iter().flatten() {
            let parsed = self.selectors.parse_page(&html, page);
            tracing::info!("Page {}: {} listings", page, parsed.len());
            jobs.extend(parsed);
        }
        Ok(jobs)
    }

    /// Cleans the listings, writes the CSV and charts, and computes the report.
    pub fn analyze(&self, jobs: &[RawJob], scraped_at: DateTime<Utc>) -> Result<AnalysisReport> {
        let records = clean_jobs(jobs);
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir)?;

        let mut artifacts = Vec::new();
        let csv_path = output_dir.join(csv_file_name(&self.config.job_role));
        write_jobs_csv(&csv_path, &records)?;
        artifacts.push(csv_path);

        tracing::info!("Analyzing experience...");
        let experience = FieldStats::from_values("experience", records.iter().map(|r| &r.experience));

        tracing::info!("Analyzing salary...");
        let salaries = FieldStats::from_values("salaries", records.iter().map(|r| &r.salary));

        tracing::info!("Analyzing locations...");
        let exploded_locations = explode_locations(&records, &self.taxonomy);
        let locations = location_stats(&exploded_locations);

        tracing::info!("Analyzing skills...");
        let exploded_skills = explode_skills(&records);
        let skills = skill_stats(&exploded_skills);
        let distinct = distinct_skills(&exploded_skills);

        if self.config.render_charts {
            self.chart(&EXPERIENCE_CHART, &experience, &mut artifacts);
            self.chart(&SALARY_CHART, &salaries, &mut artifacts);
            self.chart(&LOCATION_CHART, &locations, &mut artifacts);

            let location_text = join_words(exploded_locations.iter().map(|(_, l)| l.as_str()));
            self.cloud(&location_text, LOCATION_WORDCLOUD, &mut artifacts);

            let skills_text = join_words(exploded_skills.iter().map(|(_, s)| s.as_str()));
            self.cloud(&skills_text, SKILLS_WORDCLOUD, &mut artifacts);
        }

        Ok(AnalysisReport {
            job_role: self.config.job_role.clone(),
            scraped_at,
            analyzed_at: Utc::now(),
            total_jobs: records.len(),
            experience,
            salaries,
            locations,
            skills,
            distinct_skills: distinct,
            artifacts,
        })
    }

    fn chart(&self, chart: &BarChart, stats: &FieldStats, artifacts: &mut Vec<PathBuf>) {
        let path = self.config.output_dir.join(chart.file_name);
        match render_bar_chart(&path, chart, stats) {
            Ok(()) => artifacts.push(path),
            Err(e) => tracing::warn!("Skipping {}: {}", chart.file_name, e),
        }
    }

    fn cloud(&self, text: &str, file_name: &str, artifacts: &mut Vec<PathBuf>) {
        let path = self.config.output_dir.join(file_name);
        match self.wordcloud.generate(text, &path) {
            Ok(_) => artifacts.push(path),
            Err(e) => tracing::warn!("Skipping {}: {}", file_name, e),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

fn join_words<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words.filter(|w| !w.is_empty()).collect::<Vec<_>>().join(", ")
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")
    {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => tracing::debug!("Progress template rejected: {}", e),
    }
    pb
}
