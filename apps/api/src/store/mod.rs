//! Storage gateway — create and read access to resumes, jobs, and analysis results.
//!
//! Handlers never talk to the pool directly. They open a `StoreSession` per
//! request through `AnalysisStore::session`, and the session's connection is
//! returned to the pool when the session drops.
//!
//! Records are append-only: there are no update or delete operations.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisWithSources, JobRow, NewAnalysis, ResumeRow};

/// Hands out per-request sessions. Carried in `AppState` as `Arc<dyn AnalysisStore>`.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn session(&self) -> Result<Box<dyn StoreSession>, AppError>;
}

/// One request's handle on the store. Each insert commits on its own, so the
/// returned row (and its generated id) is visible to the next statement.
#[async_trait]
pub trait StoreSession: Send {
    async fn insert_resume(&mut self, resume_text: &str) -> Result<ResumeRow, AppError>;

    async fn insert_job(&mut self, job_description: &str) -> Result<JobRow, AppError>;

    async fn insert_analysis(&mut self, analysis: &NewAnalysis) -> Result<AnalysisRow, AppError>;

    /// Most recent analyses first, ties broken by id descending.
    async fn recent_analyses(&mut self, limit: i64)
        -> Result<Vec<AnalysisWithSources>, AppError>;

    async fn find_resume(&mut self, id: i64) -> Result<Option<ResumeRow>, AppError>;

    async fn find_analysis(&mut self, id: i64) -> Result<Option<AnalysisWithSources>, AppError>;
}
