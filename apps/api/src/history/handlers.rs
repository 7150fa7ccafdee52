use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::history::preview::preview;
use crate::models::analysis::{AnalysisWithSources, ResumeRow};
use crate::state::AppState;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Kept as text so a malformed value falls back to the default instead of a 400.
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub resume_id: i64,
    pub job_id: Option<i64>,
    pub match_score: Option<f64>,
    pub ats_score: f64,
    pub quality_score: f64,
    pub created_at: DateTime<Utc>,
    pub resume_preview: Option<String>,
    pub jd_preview: Option<String>,
}

impl From<AnalysisWithSources> for HistoryEntry {
    fn from(row: AnalysisWithSources) -> Self {
        let a = row.analysis;
        HistoryEntry {
            id: a.id,
            resume_id: a.resume_id,
            job_id: a.job_id,
            match_score: a.match_score,
            ats_score: a.ats_score,
            quality_score: a.quality_score,
            created_at: a.created_at,
            resume_preview: row.resume_text.as_deref().map(preview),
            jd_preview: row.job_description.as_deref().map(preview),
        }
    }
}

/// Parses `limit`, falling back to the default. Negative values become 0.
fn resolve_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .max(0)
}

/// GET /history?limit=N
///
/// Most recent analyses first, with 200-character previews of the resume and JD.
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let limit = resolve_limit(params.limit.as_deref());
    let mut session = state.store.session().await?;
    let rows = session.recent_analyses(limit).await?;
    Ok(Json(rows.into_iter().map(HistoryEntry::from).collect()))
}

/// GET /resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
) -> Result<Json<ResumeRow>, AppError> {
    let mut session = state.store.session().await?;
    let resume = session
        .find_resume(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    Ok(Json(resume))
}

/// GET /analysis/:id
///
/// Full analysis row with the untruncated resume text and job description.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<i64>,
) -> Result<Json<AnalysisWithSources>, AppError> {
    let mut session = state.store.session().await?;
    let analysis = session
        .find_analysis(analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Analysis result not found".to_string()))?;
    Ok(Json(analysis))
}
