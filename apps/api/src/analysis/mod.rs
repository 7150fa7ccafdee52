// Analysis collaborators: text extraction, JD matching, ATS compliance,
// power-verb suggestions, quality scoring, and insight extraction.
// The orchestrator only sees the traits below; each has one default backend.

pub mod ats;
pub mod extract;
pub mod insights;
pub mod matcher;
pub mod power_verbs;
pub mod quality;
pub mod text;

use std::sync::Arc;

use crate::errors::AppError;

use self::ats::{AtsReport, RuleBasedAtsChecker};
use self::extract::PdfTextExtractor;
use self::insights::{HeuristicInsightExtractor, ResumeInsights};
use self::matcher::{KeywordMatchScorer, MatchReport};
use self::power_verbs::{PowerVerbStats, WeakVerbFinding, WeakVerbSuggester};
use self::quality::{FeatureQualityScorer, QualityReport};

// ────────────────────────────────────────────────────────────────────────────
// Collaborator contracts
// ────────────────────────────────────────────────────────────────────────────

/// Converts an uploaded document into plain text.
/// Returns `None` when the document has no readable text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Option<String>;
}

/// Scores a resume against a job description.
pub trait MatchScorer: Send + Sync {
    fn compute_match(&self, resume_text: &str, job_text: &str) -> Result<MatchReport, AppError>;
}

/// Checks a resume against common applicant-tracking-system conventions.
pub trait ComplianceChecker: Send + Sync {
    fn check_compliance(&self, resume_text: &str) -> Result<AtsReport, AppError>;
}

/// Finds weak verb phrases and summarizes power-verb usage.
pub trait VerbSuggester: Send + Sync {
    fn find_weak_verbs(&self, resume_text: &str) -> Result<Vec<WeakVerbFinding>, AppError>;

    fn power_verb_stats(&self, resume_text: &str) -> Result<PowerVerbStats, AppError>;
}

/// Model-based overall quality score. `job_text` is `None` when no JD was supplied.
pub trait QualityScorer: Send + Sync {
    fn score_resume(
        &self,
        resume_text: &str,
        job_text: Option<&str>,
    ) -> Result<QualityReport, AppError>;
}

/// Pulls structured facts (skills, education, contact) out of a resume.
pub trait InsightExtractor: Send + Sync {
    fn extract_insights(&self, resume_text: &str) -> Result<ResumeInsights, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Collaborator suite
// ────────────────────────────────────────────────────────────────────────────

/// The full set of collaborators, carried in `AppState`. Swap any field to
/// change a backend without touching the orchestrator.
#[derive(Clone)]
pub struct Analyzers {
    pub extractor: Arc<dyn TextExtractor>,
    pub matcher: Arc<dyn MatchScorer>,
    pub ats: Arc<dyn ComplianceChecker>,
    pub verbs: Arc<dyn VerbSuggester>,
    pub quality: Arc<dyn QualityScorer>,
    pub insights: Arc<dyn InsightExtractor>,
}

impl Default for Analyzers {
    fn default() -> Self {
        Self {
            extractor: Arc::new(PdfTextExtractor),
            matcher: Arc::new(KeywordMatchScorer),
            ats: Arc::new(RuleBasedAtsChecker),
            verbs: Arc::new(WeakVerbSuggester),
            quality: Arc::new(FeatureQualityScorer::default()),
            insights: Arc::new(HeuristicInsightExtractor),
        }
    }
}

/// Rounds to a fixed number of decimal places for presentation.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666_6, 2), 66.67);
        assert_eq!(round_to(72.25, 1), 72.3);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
