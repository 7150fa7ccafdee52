use axum::{extract::State, Json};

use crate::analyze::input::AnalyzeForm;
use crate::analyze::orchestrator::{analyze_resume, AnalyzeResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
///
/// Resolves resume text from `resume_file` or `resume_text`, runs every
/// analyzer, stores the resume/job/analysis rows, and returns the combined report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    form: AnalyzeForm,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let response =
        analyze_resume(form, &state.config, &state.analyzers, state.store.as_ref()).await?;
    Ok(Json(response))
}
