//! Quality scoring — a fixed-weight linear model over normalized resume features.
//!
//! Every feature lies in 0.0 – 1.0; quality_score = 100 × Σ(weight × feature).
//! Without a job description the JD-overlap feature is held at a neutral 0.5.

use serde::{Deserialize, Serialize};

use crate::analysis::matcher::compute_keyword_match;
use crate::analysis::power_verbs::power_verb_stats;
use crate::analysis::text::{
    content_lines, detect_sections, find_email, has_phone, is_bullet_line, is_quantified,
    word_count,
};
use crate::analysis::{round_to, QualityScorer};
use crate::errors::AppError;

pub const MODEL_NAME: &str = "linear-features-v1";

const IDEAL_MIN_WORDS: f64 = 300.0;
const IDEAL_MAX_WORDS: f64 = 800.0;
const CORE_SECTIONS: &[&str] = &["experience", "education", "skills"];
const NEUTRAL_JD_OVERLAP: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityWeights {
    pub length: f64,
    pub quantified: f64,
    pub power_verbs: f64,
    pub sections: f64,
    pub contact: f64,
    pub jd_overlap: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            length: 0.15,
            quantified: 0.25,
            power_verbs: 0.20,
            sections: 0.15,
            contact: 0.10,
            jd_overlap: 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityFeatures {
    pub length: f64,
    pub quantified: f64,
    pub power_verbs: f64,
    pub sections: f64,
    pub contact: f64,
    pub jd_overlap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub quality_score: f64, // 0 – 100, one decimal
    pub grade: String,
    pub features: QualityFeatures,
    pub model: String,
}

#[derive(Default)]
pub struct FeatureQualityScorer {
    pub weights: QualityWeights,
}

impl QualityScorer for FeatureQualityScorer {
    fn score_resume(
        &self,
        resume_text: &str,
        job_text: Option<&str>,
    ) -> Result<QualityReport, AppError> {
        let features = extract_features(resume_text, job_text);
        let quality_score = round_to(combine(&features, &self.weights) * 100.0, 1);
        Ok(QualityReport {
            quality_score,
            grade: grade_for(quality_score).to_string(),
            features,
            model: MODEL_NAME.to_string(),
        })
    }
}

fn extract_features(text: &str, job_text: Option<&str>) -> QualityFeatures {
    let sections = detect_sections(text);
    let covered = CORE_SECTIONS.iter().filter(|s| sections.contains(*s)).count();

    let contact = match (find_email(text).is_some(), has_phone(text)) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => 0.0,
    };

    let jd_overlap = match job_text {
        Some(jd) => compute_keyword_match(text, jd).keyword_coverage,
        None => NEUTRAL_JD_OVERLAP,
    };

    QualityFeatures {
        length: length_feature(word_count(text)),
        quantified: quantified_feature(text),
        power_verbs: power_verb_stats(text).power_verb_ratio,
        sections: covered as f64 / CORE_SECTIONS.len() as f64,
        contact,
        jd_overlap,
    }
}

/// 1.0 inside the ideal word range, linear falloff on either side.
fn length_feature(words: usize) -> f64 {
    let words = words as f64;
    if words < IDEAL_MIN_WORDS {
        words / IDEAL_MIN_WORDS
    } else if words <= IDEAL_MAX_WORDS {
        1.0
    } else {
        (1.0 - (words - IDEAL_MAX_WORDS) / IDEAL_MAX_WORDS).max(0.0)
    }
}

/// Share of achievement lines that carry a metric. Bullets when present, otherwise every line.
fn quantified_feature(text: &str) -> f64 {
    let bullets: Vec<&str> = content_lines(text).filter(|l| is_bullet_line(l)).collect();
    let lines: Vec<&str> = if bullets.is_empty() {
        content_lines(text).collect()
    } else {
        bullets
    };
    if lines.is_empty() {
        return 0.0;
    }
    lines.iter().filter(|l| is_quantified(l)).count() as f64 / lines.len() as f64
}

fn combine(f: &QualityFeatures, w: &QualityWeights) -> f64 {
    let total = w.length + w.quantified + w.power_verbs + w.sections + w.contact + w.jd_overlap;
    if total <= 0.0 {
        return 0.0;
    }
    let weighted = w.length * f.length
        + w.quantified * f.quantified
        + w.power_verbs * f.power_verbs
        + w.sections * f.sections
        + w.contact * f.contact
        + w.jd_overlap * f.jd_overlap;
    (weighted / total).clamp(0.0, 1.0)
}

fn grade_for(score: f64) -> &'static str {
    if score >= 80.0 {
        "excellent"
    } else if score >= 65.0 {
        "good"
    } else if score >= 50.0 {
        "fair"
    } else {
        "needs_improvement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_ones() -> QualityFeatures {
        QualityFeatures {
            length: 1.0,
            quantified: 1.0,
            power_verbs: 1.0,
            sections: 1.0,
            contact: 1.0,
            jd_overlap: 1.0,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = QualityWeights::default();
        let sum = w.length + w.quantified + w.power_verbs + w.sections + w.contact + w.jd_overlap;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_perfect_features() {
        let score = combine(&all_ones(), &QualityWeights::default());
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_normalizes_custom_weights() {
        let w = QualityWeights {
            length: 2.0,
            quantified: 0.0,
            power_verbs: 0.0,
            sections: 0.0,
            contact: 0.0,
            jd_overlap: 2.0,
        };
        let mut f = all_ones();
        f.jd_overlap = 0.0;
        assert!((combine(&f, &w) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_length_feature_shape() {
        assert_eq!(length_feature(0), 0.0);
        assert_eq!(length_feature(150), 0.5);
        assert_eq!(length_feature(500), 1.0);
        assert_eq!(length_feature(1200), 0.5);
        assert_eq!(length_feature(5000), 0.0);
    }

    #[test]
    fn test_quantified_prefers_bullets() {
        let text = "Summary line without numbers\n- Cut costs 30%\n- Shipped the app";
        assert_eq!(quantified_feature(text), 0.5);
    }

    #[test]
    fn test_quantified_empty() {
        assert_eq!(quantified_feature(""), 0.0);
    }

    #[test]
    fn test_missing_jd_uses_neutral_overlap() {
        let report = FeatureQualityScorer::default()
            .score_resume("Built scalable systems", None)
            .unwrap();
        assert_eq!(report.features.jd_overlap, NEUTRAL_JD_OVERLAP);
        assert_eq!(report.model, MODEL_NAME);
        assert!((0.0..=100.0).contains(&report.quality_score));
    }

    #[test]
    fn test_jd_overlap_raises_score() {
        let scorer = FeatureQualityScorer::default();
        let resume = "Built Rust services on Kubernetes";
        let matching = scorer.score_resume(resume, Some("Rust Kubernetes")).unwrap();
        let unrelated = scorer.score_resume(resume, Some("Cobol Mainframe")).unwrap();
        assert!(matching.quality_score > unrelated.quality_score);
        assert_eq!(matching.features.jd_overlap, 1.0);
    }

    #[test]
    fn test_grades() {
        assert_eq!(grade_for(92.0), "excellent");
        assert_eq!(grade_for(70.0), "good");
        assert_eq!(grade_for(50.0), "fair");
        assert_eq!(grade_for(12.5), "needs_improvement");
    }
}
