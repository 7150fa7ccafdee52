//! JD Matching — keyword overlap between a resume and a job description.
//!
//! Algorithm:
//! 1. Extract keywords from the JD (stop-words and bare numbers dropped), counting frequency.
//! 2. A keyword matches when it appears as a resume token.
//! 3. match_score = Σ(freq of matched) / Σ(freq of all) × 100
//! 4. keyword_coverage = matched unique keywords / unique keywords

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::text::{keywords, tokenize};
use crate::analysis::{round_to, MatchScorer};
use crate::errors::AppError;

const MAX_LISTED_KEYWORDS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_score: f64, // 0 – 100
    pub keyword_coverage: f64, // 0.0 – 1.0
    pub jd_keyword_count: usize,
    pub matched_keywords: Vec<String>, // most frequent in the JD first
    pub missing_keywords: Vec<String>,
    pub summary: String,
}

/// Pure keyword scorer. Deterministic, no model call.
pub struct KeywordMatchScorer;

impl MatchScorer for KeywordMatchScorer {
    fn compute_match(&self, resume_text: &str, job_text: &str) -> Result<MatchReport, AppError> {
        Ok(compute_keyword_match(resume_text, job_text))
    }
}

pub fn compute_keyword_match(resume_text: &str, job_text: &str) -> MatchReport {
    let mut frequencies: HashMap<String, u32> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for kw in keywords(job_text) {
        let count = frequencies.entry(kw.clone()).or_insert(0);
        if *count == 0 {
            order.push(kw);
        }
        *count += 1;
    }

    if order.is_empty() {
        return MatchReport {
            match_score: 0.0,
            keyword_coverage: 0.0,
            jd_keyword_count: 0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            summary: "No keywords found in the job description.".to_string(),
        };
    }

    // Most frequent first; first appearance breaks ties.
    order.sort_by_key(|kw| std::cmp::Reverse(frequencies[kw]));

    let resume_tokens: HashSet<String> = tokenize(resume_text).into_iter().collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut matched_weight = 0_u32;
    let mut total_weight = 0_u32;

    for kw in &order {
        let freq = frequencies[kw];
        total_weight += freq;
        if resume_tokens.contains(kw) {
            matched_weight += freq;
            matched.push(kw.clone());
        } else {
            missing.push(kw.clone());
        }
    }

    let match_score = round_to(matched_weight as f64 / total_weight as f64 * 100.0, 2);
    let keyword_coverage = round_to(matched.len() as f64 / order.len() as f64, 4);
    let summary = build_summary(match_score, &missing);

    MatchReport {
        match_score,
        keyword_coverage,
        jd_keyword_count: order.len(),
        matched_keywords: matched.into_iter().take(MAX_LISTED_KEYWORDS).collect(),
        missing_keywords: missing.into_iter().take(MAX_LISTED_KEYWORDS).collect(),
        summary,
    }
}

fn build_summary(score: f64, missing: &[String]) -> String {
    let top_missing: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if score >= 75.0 {
        "Strong match. The resume covers most of the job description's keywords.".to_string()
    } else if score >= 50.0 {
        format!(
            "Moderate match ({score:.0}/100). Consider addressing: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Weak match ({score:.0}/100). Missing key terms: {}.",
            top_missing.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_overlap_scores_100() {
        let report = compute_keyword_match(
            "Senior engineer: Rust, Kubernetes, PostgreSQL",
            "Rust Kubernetes PostgreSQL",
        );
        assert_eq!(report.match_score, 100.0);
        assert_eq!(report.keyword_coverage, 1.0);
        assert!(report.missing_keywords.is_empty());
        assert!(report.summary.contains("Strong match"));
    }

    #[test]
    fn test_frequency_weights_the_score() {
        // rust ×3 matched, java ×1 missing → 3/4
        let report = compute_keyword_match("Rust developer", "Rust rust RUST java");
        assert_eq!(report.match_score, 75.0);
        assert_eq!(report.keyword_coverage, 0.5);
        assert_eq!(report.matched_keywords, vec!["rust"]);
        assert_eq!(report.missing_keywords, vec!["java"]);
    }

    #[test]
    fn test_no_overlap_scores_zero_and_lists_missing() {
        let report = compute_keyword_match("Pastry chef", "Kafka Spark Airflow");
        assert_eq!(report.match_score, 0.0);
        assert_eq!(report.jd_keyword_count, 3);
        assert!(report.summary.contains("Weak match"));
        assert!(report.summary.contains("kafka"));
    }

    #[test]
    fn test_stopword_only_jd_has_no_keywords() {
        let report = compute_keyword_match("anything", "the and of with");
        assert_eq!(report.match_score, 0.0);
        assert_eq!(report.jd_keyword_count, 0);
    }

    #[test]
    fn test_listed_keywords_are_capped() {
        let jd: Vec<String> = (0..30).map(|i| format!("skill{i}")).collect();
        let report = compute_keyword_match("", &jd.join(" "));
        assert_eq!(report.jd_keyword_count, 30);
        assert_eq!(report.missing_keywords.len(), MAX_LISTED_KEYWORDS);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let report = compute_keyword_match("go go go rust", "go rust python");
        assert!((0.0..=100.0).contains(&report.match_score));
    }
}
