use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisWithSources, JobRow, NewAnalysis, ResumeRow};
use crate::store::{AnalysisStore, StoreSession};

const ANALYSIS_WITH_SOURCES: &str = r#"
    SELECT a.*, r.resume_text, j.job_description
    FROM analysis_results a
    LEFT JOIN resumes r ON r.id = a.resume_id
    LEFT JOIN jobs j ON j.id = a.job_id
"#;

/// PostgreSQL-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgStore {
    async fn session(&self) -> Result<Box<dyn StoreSession>, AppError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgSession { conn }))
    }
}

/// Holds one pooled connection for the lifetime of a request.
/// The connection goes back to the pool on drop.
pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl StoreSession for PgSession {
    async fn insert_resume(&mut self, resume_text: &str) -> Result<ResumeRow, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "INSERT INTO resumes (resume_text) VALUES ($1) RETURNING *",
        )
        .bind(resume_text)
        .fetch_one(&mut *self.conn)
        .await?;

        info!("Inserted resume {} ({} chars)", row.id, resume_text.chars().count());
        Ok(row)
    }

    async fn insert_job(&mut self, job_description: &str) -> Result<JobRow, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            "INSERT INTO jobs (job_description) VALUES ($1) RETURNING *",
        )
        .bind(job_description)
        .fetch_one(&mut *self.conn)
        .await?;

        info!("Inserted job {} ({} chars)", row.id, job_description.chars().count());
        Ok(row)
    }

    async fn insert_analysis(&mut self, analysis: &NewAnalysis) -> Result<AnalysisRow, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            INSERT INTO analysis_results
                (resume_id, job_id, match_score, ats_score, quality_score,
                 ats_flags, power_verb_suggestions, match_details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(analysis.resume_id)
        .bind(analysis.job_id)
        .bind(analysis.match_score)
        .bind(analysis.ats_score)
        .bind(analysis.quality_score)
        .bind(&analysis.ats_flags)
        .bind(&analysis.power_verb_suggestions)
        .bind(&analysis.match_details)
        .fetch_one(&mut *self.conn)
        .await?;

        info!(
            "Inserted analysis {} for resume {} (job {:?})",
            row.id, row.resume_id, row.job_id
        );
        Ok(row)
    }

    async fn recent_analyses(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AnalysisWithSources>, AppError> {
        let query = format!("{ANALYSIS_WITH_SOURCES} ORDER BY a.created_at DESC, a.id DESC LIMIT $1");
        let rows = sqlx::query_as::<_, AnalysisWithSources>(&query)
            .bind(limit)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!("Loaded {} history rows (limit {limit})", rows.len());
        Ok(rows)
    }

    async fn find_resume(&mut self, id: i64) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.conn)
                .await?,
        )
    }

    async fn find_analysis(&mut self, id: i64) -> Result<Option<AnalysisWithSources>, AppError> {
        let query = format!("{ANALYSIS_WITH_SOURCES} WHERE a.id = $1");
        Ok(sqlx::query_as::<_, AnalysisWithSources>(&query)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?)
    }
}
