use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::RawJob;

/// A previously scraped batch of listings.
#[derive(Debug, Clone)]
pub struct StoredRun {
    pub id: i64,
    pub job_role: String,
    pub scraped_at: DateTime<Utc>,
    pub pages: u32,
    pub jobs: Vec<RawJob>,
}

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS runs (
                id INTEGER PRIMARY KEY,
                job_role TEXT NOT NULL,
                scraped_at TEXT NOT NULL,
                pages INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS listings (
                id INTEGER PRIMARY KEY,
                run_id INTEGER NOT NULL REFERENCES runs(id),
                job_no INTEGER NOT NULL,
                role TEXT NOT NULL,
                company TEXT NOT NULL,
                location TEXT NOT NULL,
                experience TEXT NOT NULL,
                salary TEXT NOT NULL,
                skills TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_runs_job_role ON runs(job_role);
            CREATE INDEX IF NOT EXISTS idx_listings_run_id ON listings(run_id);
            "#,
        )?;

        Ok(())
    }

    pub fn save_run(
        &mut self,
        job_role: &str,
        pages: u32,
        scraped_at: DateTime<Utc>,
        jobs: &[RawJob],
    ) -> Result<i64> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO runs (job_role, scraped_at, pages) VALUES (?1, ?2, ?3)",
            params![job_role, scraped_at.to_rfc3339(), pages],
        )?;
        let run_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO listings (run_id, job_no, role, company, location, experience, salary, skills)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )?;
            for job in jobs {
                stmt.execute(params![
                    run_id,
                    job.job_no,
                    job.role,
                    job.company,
                    job.location,
                    job.experience,
                    job.salary,
                    job.skills,
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!("Stored run {} with {} listings", run_id, jobs.len());
        Ok(run_id)
    }

    /// Most recent run for `job_role` (case-insensitive), with its listings.
    pub fn latest_run(&self, job_role: &str) -> Result<Option<StoredRun>> {
        let run = self
            .conn
            .query_row(
                r#"
                SELECT id, job_role, scraped_at, pages FROM runs
                WHERE lower(job_role) = lower(?1)
                ORDER BY scraped_at DESC, id DESC
                LIMIT 1
                "#,
                params![job_role],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, u32>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, job_role, scraped_at, pages)) = run else {
            return Ok(None);
        };

        let scraped_at = DateTime::parse_from_rfc3339(&scraped_at)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| Error::ParseError(format!("stored timestamp {}: {}", scraped_at, e)))?;

        Ok(Some(StoredRun {
            id,
            job_role,
            scraped_at,
            pages,
            jobs: self.get_listings(id)?,
        }))
    }

    fn get_listings(&self, run_id: i64) -> Result<Vec<RawJob>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT job_no, role, company, location, experience, salary, skills
            FROM listings WHERE run_id = ?1 ORDER BY id
            "#,
        )?;

        let jobs = stmt
            .query_map(params![run_id], |row| {
                Ok(RawJob {
                    job_no: row.get(0)?,
                    role: row.get(1)?,
                    company: row.get(2)?,
                    location: row.get(3)?,
                    experience: row.get(4)?,
                    salary: row.get(5)?,
                    skills: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(jobs)
    }
}
