//! In-memory store for handler and orchestrator tests. No database required.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisWithSources, JobRow, NewAnalysis, ResumeRow};
use crate::store::{AnalysisStore, StoreSession};

#[derive(Default)]
struct Tables {
    resumes: Vec<ResumeRow>,
    jobs: Vec<JobRow>,
    analyses: Vec<AnalysisRow>,
}

/// Shares its tables across clones and sessions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    /// When set, `insert_analysis` fails after the resume/job inserts have landed.
    fail_analysis_insert: bool,
    /// When set, `session()` fails as if the pool could not hand out a connection.
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_analysis_insert() -> Self {
        Self {
            fail_analysis_insert: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn resume_count(&self) -> usize {
        lock(&self.tables).resumes.len()
    }

    pub fn job_count(&self) -> usize {
        lock(&self.tables).jobs.len()
    }

    pub fn analysis_count(&self) -> usize {
        lock(&self.tables).analyses.len()
    }

    pub fn jobs(&self) -> Vec<JobRow> {
        lock(&self.tables).jobs.clone()
    }

    pub fn analyses(&self) -> Vec<AnalysisRow> {
        lock(&self.tables).analyses.clone()
    }
}

fn lock(tables: &Mutex<Tables>) -> MutexGuard<'_, Tables> {
    tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn session(&self) -> Result<Box<dyn StoreSession>, AppError> {
        if self.unavailable {
            return Err(AppError::Internal(anyhow::anyhow!(
                "pool timed out while waiting for an open connection"
            )));
        }
        Ok(Box::new(self.clone()))
    }
}

impl Tables {
    fn with_sources(&self, analysis: &AnalysisRow) -> AnalysisWithSources {
        AnalysisWithSources {
            analysis: analysis.clone(),
            resume_text: self
                .resumes
                .iter()
                .find(|r| r.id == analysis.resume_id)
                .map(|r| r.resume_text.clone()),
            job_description: analysis.job_id.and_then(|job_id| {
                self.jobs
                    .iter()
                    .find(|j| j.id == job_id)
                    .map(|j| j.job_description.clone())
            }),
        }
    }
}

#[async_trait]
impl StoreSession for MemoryStore {
    async fn insert_resume(&mut self, resume_text: &str) -> Result<ResumeRow, AppError> {
        let mut tables = lock(&self.tables);
        let now = Utc::now();
        let row = ResumeRow {
            id: tables.resumes.len() as i64 + 1,
            resume_text: resume_text.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.resumes.push(row.clone());
        Ok(row)
    }

    async fn insert_job(&mut self, job_description: &str) -> Result<JobRow, AppError> {
        let mut tables = lock(&self.tables);
        let row = JobRow {
            id: tables.jobs.len() as i64 + 1,
            job_description: job_description.to_string(),
            created_at: Utc::now(),
        };
        tables.jobs.push(row.clone());
        Ok(row)
    }

    async fn insert_analysis(&mut self, analysis: &NewAnalysis) -> Result<AnalysisRow, AppError> {
        if self.fail_analysis_insert {
            return Err(AppError::Internal(anyhow::anyhow!(
                "insert into analysis_results failed"
            )));
        }
        let mut tables = lock(&self.tables);
        let row = AnalysisRow {
            id: tables.analyses.len() as i64 + 1,
            resume_id: analysis.resume_id,
            job_id: analysis.job_id,
            match_score: analysis.match_score,
            ats_score: analysis.ats_score,
            quality_score: analysis.quality_score,
            ats_flags: analysis.ats_flags.clone(),
            power_verb_suggestions: analysis.power_verb_suggestions.clone(),
            match_details: analysis.match_details.clone(),
            created_at: Utc::now(),
        };
        tables.analyses.push(row.clone());
        Ok(row)
    }

    async fn recent_analyses(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AnalysisWithSources>, AppError> {
        let tables = lock(&self.tables);
        let mut rows: Vec<&AnalysisRow> = tables.analyses.iter().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|row| tables.with_sources(row))
            .collect())
    }

    async fn find_resume(&mut self, id: i64) -> Result<Option<ResumeRow>, AppError> {
        Ok(lock(&self.tables).resumes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_analysis(&mut self, id: i64) -> Result<Option<AnalysisWithSources>, AppError> {
        let tables = lock(&self.tables);
        Ok(tables
            .analyses
            .iter()
            .find(|a| a.id == id)
            .map(|row| tables.with_sources(row)))
    }
}
