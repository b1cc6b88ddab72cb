use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Supplies the HTML of numbered search results pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String>;
    fn name(&self) -> &str;
}

/// Reads pages saved from a browser session as `page-{n}.html`.
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page_path(&self, page: u32) -> PathBuf {
        self.dir.join(format!("page-{}.html", page))
    }
}

#[async_trait]
impl PageSource for SnapshotSource {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let path = self.page_path(page);
        match tokio::fs::read_to_string(&path).await {
            Ok(html) => {
                tracing::debug!("Loaded snapshot {}", path.display());
                Ok(html)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::SnapshotNotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}
