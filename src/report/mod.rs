pub mod charts;
pub mod csv_export;
pub mod wordcloud;

pub use charts::{render_bar_chart, BarChart};
pub use csv_export::{csv_file_name, write_jobs_csv};
pub use wordcloud::{PlacedWord, WordCloud};

pub const EXPERIENCE_CHART: BarChart = BarChart {
    title: "Experience Range",
    x_label: "Experience",
    y_label: "Range",
    file_name: "experience_range.svg",
    limit: Some(10),
};

pub const SALARY_CHART: BarChart = BarChart {
    title: "Salaries Range",
    x_label: "Salary",
    y_label: "Range",
    file_name: "salaries_range.svg",
    limit: Some(5),
};

pub const LOCATION_CHART: BarChart = BarChart {
    title: "Job Post in Different Location",
    x_label: "Location",
    y_label: "Count",
    file_name: "job_location_counts.svg",
    limit: None,
};

pub const LOCATION_WORDCLOUD: &str = "location_wordcloud.svg";
pub const SKILLS_WORDCLOUD: &str = "skills_wordcloud.svg";
