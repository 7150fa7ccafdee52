use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub resume_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: i64,
    pub resume_id: i64,
    pub job_id: Option<i64>,
    pub match_score: Option<f64>,
    pub ats_score: f64,
    pub quality_score: f64,
    pub ats_flags: Value,
    pub power_verb_suggestions: Value,
    pub match_details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// An analysis row joined with the full text of its resume and job.
/// Backs both the history list (which truncates the texts) and the detail view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisWithSources {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub analysis: AnalysisRow,
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

/// Column values for a new `analysis_results` row.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub resume_id: i64,
    pub job_id: Option<i64>,
    pub match_score: Option<f64>,
    pub ats_score: f64,
    pub quality_score: f64,
    pub ats_flags: Value,
    pub power_verb_suggestions: Value,
    pub match_details: Option<Value>,
}
