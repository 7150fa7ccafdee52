//! Analyze pipeline: resolve resume text → run collaborators → persist rows.
//!
//! Inserts are committed one at a time (Resume → Job → AnalysisResult) and are
//! not grouped in a transaction: a failure after the resume insert leaves the
//! resume row in place.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::ats::AtsReport;
use crate::analysis::insights::ResumeInsights;
use crate::analysis::matcher::MatchReport;
use crate::analysis::power_verbs::{PowerVerbStats, WeakVerbFinding};
use crate::analysis::quality::QualityReport;
use crate::analysis::Analyzers;
use crate::analyze::input::{AnalyzeForm, UploadedFile};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::analysis::NewAnalysis;
use crate::store::AnalysisStore;

/// Weak-verb findings returned and stored per analysis.
pub const MAX_VERB_FINDINGS: usize = 10;

pub const NO_RESUME_ERROR: &str = "No resume provided";
pub const UNREADABLE_FILE_ERROR: &str = "Could not read PDF text";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerVerbReport {
    pub findings: Vec<WeakVerbFinding>,
    pub stats: PowerVerbStats,
}

/// Every collaborator's output for one resume. `match_score` and
/// `match_details` are both `None` when no job description was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub match_score: Option<f64>,
    pub match_details: Option<MatchReport>,
    pub ats_score: f64,
    pub ats_report: AtsReport,
    pub power_verbs: PowerVerbReport,
    pub quality_score: f64,
    pub quality_details: QualityReport,
    pub resume_insights: ResumeInsights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub analysis_id: i64,
    pub resume_id: i64,
    pub job_id: Option<i64>,
}

/// Full pipeline for one request.
pub async fn analyze_resume(
    form: AnalyzeForm,
    config: &Config,
    analyzers: &Analyzers,
    store: &dyn AnalysisStore,
) -> Result<AnalyzeResponse, AppError> {
    let resume_text = resolve_resume_text(&form, config, analyzers).await?;
    let job_text = form.job_text();

    info!(
        "Analyzing resume ({} chars, job description: {})",
        resume_text.chars().count(),
        job_text.map_or("none".to_string(), |jd| format!("{} chars", jd.chars().count()))
    );

    let report = run_analyzers(analyzers, &resume_text, job_text)?;
    persist(store, &resume_text, job_text, report).await
}

/// Uploaded file first (when its extension is allowed), then the raw text field.
pub async fn resolve_resume_text(
    form: &AnalyzeForm,
    config: &Config,
    analyzers: &Analyzers,
) -> Result<String, AppError> {
    if let Some(file) = form
        .resume_file
        .as_ref()
        .filter(|f| config.allows_file(&f.filename))
    {
        return extract_upload(file, analyzers)
            .await?
            .ok_or_else(|| AppError::Validation(UNREADABLE_FILE_ERROR.to_string()));
    }

    if let Some(file) = &form.resume_file {
        debug!(
            "Ignoring upload '{}': extension not in allow-list",
            file.filename
        );
    }

    form.raw_resume_text()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(NO_RESUME_ERROR.to_string()))
}

async fn extract_upload(
    file: &UploadedFile,
    analyzers: &Analyzers,
) -> Result<Option<String>, AppError> {
    let extractor = analyzers.extractor.clone();
    let bytes = file.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
        .await
        .map_err(|e| AppError::Analysis(format!("Text extraction failed: {e}")))?;

    debug!(
        "Extracted {} chars from '{}' ({} bytes)",
        text.as_deref().map_or(0, |t| t.chars().count()),
        file.filename,
        file.bytes.len()
    );
    Ok(text.filter(|t| !t.trim().is_empty()))
}

/// Runs every collaborator in a fixed order. No output feeds another collaborator.
pub fn run_analyzers(
    analyzers: &Analyzers,
    resume_text: &str,
    job_text: Option<&str>,
) -> Result<AnalysisReport, AppError> {
    let match_details = job_text
        .map(|jd| analyzers.matcher.compute_match(resume_text, jd))
        .transpose()?;

    let ats_report = analyzers.ats.check_compliance(resume_text)?;

    let mut findings = analyzers.verbs.find_weak_verbs(resume_text)?;
    findings.truncate(MAX_VERB_FINDINGS);
    let stats = analyzers.verbs.power_verb_stats(resume_text)?;

    let quality_details = analyzers.quality.score_resume(resume_text, job_text)?;

    let resume_insights = analyzers.insights.extract_insights(resume_text)?;

    Ok(AnalysisReport {
        match_score: match_details.as_ref().map(|m| m.match_score),
        match_details,
        ats_score: ats_report.ats_score,
        ats_report,
        power_verbs: PowerVerbReport { findings, stats },
        quality_score: quality_details.quality_score,
        quality_details,
        resume_insights,
    })
}

async fn persist(
    store: &dyn AnalysisStore,
    resume_text: &str,
    job_text: Option<&str>,
    report: AnalysisReport,
) -> Result<AnalyzeResponse, AppError> {
    // Serialize before the first insert so an encoding failure writes nothing
    let ats_flags = serde_json::to_value(&report.ats_report)?;
    let power_verb_suggestions = serde_json::to_value(&report.power_verbs)?;
    let match_details = report
        .match_details
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    // Acquired only once there is something to write
    let mut session = store.session().await?;
    let resume = session.insert_resume(resume_text).await?;

    let job = match job_text {
        Some(jd) => Some(session.insert_job(jd).await?),
        None => None,
    };
    let job_id = job.as_ref().map(|j| j.id);

    let analysis = session
        .insert_analysis(&NewAnalysis {
            resume_id: resume.id,
            job_id,
            match_score: report.match_score,
            ats_score: report.ats_score,
            quality_score: report.quality_score,
            ats_flags,
            power_verb_suggestions,
            match_details,
        })
        .await?;

    info!(
        "Analysis {} stored (resume {}, job {:?})",
        analysis.id, resume.id, job_id
    );

    Ok(AnalyzeResponse {
        report,
        analysis_id: analysis.id,
        resume_id: resume.id,
        job_id,
    })
}
