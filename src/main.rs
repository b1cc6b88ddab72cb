use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use jobscraper::models::{AnalysisReport, FieldStats};
use jobscraper::{
    Config, NaukriClient, PipelineConfig, ScrapePipeline, SnapshotSource, Storage,
};

#[derive(Parser, Debug)]
#[command(name = "jobscraper")]
#[command(version = "0.1.0")]
#[command(about = "Scrape Naukri job listings and analyze experience, salary, location and skills")]
struct Args {
    /// Job role to search for (overrides NAUKRI_JOB_ROLE)
    #[arg(short, long)]
    role: Option<String>,

    /// Number of result pages to scrape (overrides NAUKRI_PAGES)
    #[arg(short, long)]
    pages: Option<u32>,

    /// Directory for the CSV export and charts (overrides OUTPUT_DIR)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Report format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Report file (defaults to stdout)
    #[arg(long)]
    report: Option<String>,

    /// Read saved pages (page-0.html, page-1.html, ...) instead of fetching
    #[arg(long)]
    html_dir: Option<PathBuf>,

    /// Database path for storing scraped listings (overrides DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,

    /// Re-analyze the latest stored run if available
    #[arg(long)]
    cached: bool,

    /// Skip chart and word cloud rendering
    #[arg(long)]
    no_charts: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("jobscraper=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(ref role) = args.role {
        config.job_role = role.clone();
    }
    if let Some(pages) = args.pages {
        config.num_pages = pages;
    }
    if let Some(ref dir) = args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(ref database) = args.database {
        config.database_path = database.clone();
    }
    config.validate()?;

    let storage = Storage::new(&config.database_path)?;

    let mut pipeline_config = PipelineConfig::from(&config);
    pipeline_config.render_charts = !args.no_charts;

    let mut pipeline = match args.html_dir {
        Some(ref dir) => ScrapePipeline::new(SnapshotSource::new(dir), storage, pipeline_config)?,
        None => ScrapePipeline::new(NaukriClient::from_config(&config)?, storage, pipeline_config)?,
    };

    let report = if args.cached {
        match pipeline.run_cached()? {
            Some(report) => Some(report),
            None => {
                tracing::info!("No cached run found, performing fresh scrape");
                pipeline.run().await?
            }
        }
    } else {
        pipeline.run().await?
    };

    let Some(report) = report else {
        println!("No job data scraped. Exiting.");
        return Ok(());
    };

    output_report(&report, &args)?;
    tracing::info!("Analysis complete. Check generated files in {}", config.output_dir.display());

    Ok(())
}

fn output_report(report: &AnalysisReport, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report),
        _ => format_text(report),
    };

    if let Some(ref path) = args.report {
        std::fs::write(path, &output)?;
        tracing::info!("Report written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn push_stats_text(output: &mut String, label: &str, stats: &FieldStats) {
    output.push_str(&format!("\n{} Categories and their Counts:\n", label));
    for category in &stats.categories {
        output.push_str(&format!("  {:<30} {}\n", category.value, category.count));
    }

    output.push_str(&format!("\n{} Categories and their Percentages:\n", label));
    for category in &stats.categories {
        output.push_str(&format!("  {:<30} {:.2}%\n", category.value, category.percentage));
    }
}

fn format_text(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Naukri Job Analysis: {} ===\n\n",
        report.job_role
    ));
    output.push_str(&format!("Jobs analyzed: {}\n", report.total_jobs));
    output.push_str(&format!(
        "Scraped on: {}\n",
        report.scraped_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    push_stats_text(&mut output, "Experience", &report.experience);
    push_stats_text(&mut output, "Salary", &report.salaries);
    push_stats_text(&mut output, "Location", &report.locations);

    output.push_str("\nDistinct Skills:\n");
    for skill in &report.distinct_skills {
        output.push_str(&format!("  {}\n", skill));
    }

    if !report.artifacts.is_empty() {
        output.push_str("\nFiles written:\n");
        for path in &report.artifacts {
            output.push_str(&format!("  {}\n", path.display()));
        }
    }

    output
}

fn push_stats_markdown(output: &mut String, title: &str, stats: &FieldStats) {
    output.push_str(&format!("\n## {}\n\n", title));
    output.push_str("| Value | Count | Percentage |\n");
    output.push_str("|-------|-------|------------|\n");
    for category in &stats.categories {
        output.push_str(&format!(
            "| {} | {} | {:.2}% |\n",
            category.value, category.count, category.percentage
        ));
    }
}

fn format_markdown(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Naukri Job Analysis: {}\n\n", report.job_role));
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Jobs Analyzed | {} |\n", report.total_jobs));
    output.push_str(&format!("| Distinct Skills | {} |\n", report.distinct_skills.len()));
    output.push_str(&format!(
        "| Distinct Locations | {} |\n",
        report.locations.categories.len()
    ));

    push_stats_markdown(&mut output, "Experience", &report.experience);
    push_stats_markdown(&mut output, "Salary (Lacs PA)", &report.salaries);
    push_stats_markdown(&mut output, "Locations", &report.locations);
    push_stats_markdown(&mut output, "Skills", &report.skills);

    if !report.artifacts.is_empty() {
        output.push_str("\n## Files\n\n");
        for path in &report.artifacts {
            output.push_str(&format!("- `{}`\n", path.display()));
        }
    }

    output.push_str(&format!(
        "\n---\n*Scraped on {}, analyzed on {}*\n",
        report.scraped_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
