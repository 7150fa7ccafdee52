//! Power verbs — flags weak phrasing and measures how often strong action verbs lead.

use serde::{Deserialize, Serialize};

use crate::analysis::text::{content_lines, count_phrase};
use crate::analysis::{round_to, VerbSuggester};
use crate::errors::AppError;

/// Weak phrase → stronger alternatives. Longer phrases first so "worked on" wins over "worked".
const WEAK_VERBS: &[(&str, &[&str])] = &[
    ("responsible for", &["led", "owned", "directed"]),
    ("participated in", &["contributed to", "collaborated on", "drove"]),
    ("was involved in", &["executed", "delivered", "drove"]),
    ("was tasked with", &["executed", "delivered", "owned"]),
    ("worked on", &["developed", "engineered", "delivered"]),
    ("helped", &["enabled", "facilitated", "accelerated"]),
    ("assisted", &["supported", "partnered on", "co-led"]),
    ("handled", &["managed", "coordinated", "resolved"]),
    ("made", &["created", "built", "designed"]),
    ("did", &["executed", "performed", "completed"]),
    ("used", &["leveraged", "applied", "employed"]),
    ("tried", &["piloted", "tested", "prototyped"]),
    ("got", &["achieved", "secured", "earned"]),
];

const POWER_VERBS: &[&str] = &[
    "accelerated", "achieved", "architected", "automated", "built", "championed", "created",
    "cut", "delivered", "designed", "developed", "directed", "drove", "engineered",
    "established", "expanded", "generated", "implemented", "improved", "increased",
    "launched", "led", "managed", "mentored", "migrated", "optimized", "orchestrated",
    "owned", "pioneered", "reduced", "scaled", "shipped", "spearheaded", "streamlined",
    "transformed",
];

const TOP_POWER_VERBS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakVerbFinding {
    pub line_number: usize, // 1-based, counting non-blank lines
    pub line: String,
    pub weak_verb: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbCount {
    pub verb: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerVerbStats {
    pub power_verb_count: usize,
    pub weak_verb_count: usize,
    /// power / (power + weak); 0.0 when neither appears
    pub power_verb_ratio: f64,
    pub top_power_verbs: Vec<VerbCount>,
}

pub struct WeakVerbSuggester;

impl VerbSuggester for WeakVerbSuggester {
    fn find_weak_verbs(&self, resume_text: &str) -> Result<Vec<WeakVerbFinding>, AppError> {
        Ok(find_weak_verbs(resume_text))
    }

    fn power_verb_stats(&self, resume_text: &str) -> Result<PowerVerbStats, AppError> {
        Ok(power_verb_stats(resume_text))
    }
}

/// One finding per (line, weak phrase), in document order.
pub fn find_weak_verbs(text: &str) -> Vec<WeakVerbFinding> {
    let mut findings = Vec::new();
    for (idx, line) in content_lines(text).enumerate() {
        let lower = line.to_lowercase();
        for (weak, suggestions) in WEAK_VERBS {
            if count_phrase(&lower, weak) > 0 {
                findings.push(WeakVerbFinding {
                    line_number: idx + 1,
                    line: line.to_string(),
                    weak_verb: weak.to_string(),
                    suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
                });
            }
        }
    }
    findings
}

pub fn power_verb_stats(text: &str) -> PowerVerbStats {
    let lower = text.to_lowercase();

    let mut counts: Vec<VerbCount> = POWER_VERBS
        .iter()
        .map(|verb| VerbCount {
            verb: verb.to_string(),
            count: count_phrase(&lower, verb),
        })
        .filter(|vc| vc.count > 0)
        .collect();
    let power_verb_count: usize = counts.iter().map(|vc| vc.count).sum();
    let weak_verb_count: usize = WEAK_VERBS
        .iter()
        .map(|(weak, _)| count_phrase(&lower, weak))
        .sum();

    let total = power_verb_count + weak_verb_count;
    let power_verb_ratio = if total > 0 {
        round_to(power_verb_count as f64 / total as f64, 4)
    } else {
        0.0
    };

    // Highest count first; alphabetical among equals (POWER_VERBS is sorted).
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_POWER_VERBS);

    PowerVerbStats {
        power_verb_count,
        weak_verb_count,
        power_verb_ratio,
        top_power_verbs: counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_weak_phrase_with_suggestions() {
        let findings = find_weak_verbs("Summary\n\n- Responsible for the billing service");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].weak_verb, "responsible for");
        assert_eq!(findings[0].line_number, 2);
        assert!(findings[0].suggestions.contains(&"led".to_string()));
    }

    #[test]
    fn test_whole_word_only() {
        // "made" inside "homemade", "used" inside "focused"
        assert!(find_weak_verbs("Focused on homemade tooling").is_empty());
    }

    #[test]
    fn test_multiple_weak_phrases_on_one_line() {
        let findings = find_weak_verbs("Helped the team and worked on the API");
        let verbs: Vec<&str> = findings.iter().map(|f| f.weak_verb.as_str()).collect();
        assert_eq!(verbs, vec!["worked on", "helped"]);
    }

    #[test]
    fn test_strong_resume_has_no_findings() {
        assert!(find_weak_verbs("Built scalable systems").is_empty());
    }

    #[test]
    fn test_stats_count_and_ratio() {
        let stats = power_verb_stats("Led the team. Led the launch. Built the API. Helped QA.");
        assert_eq!(stats.power_verb_count, 3);
        assert_eq!(stats.weak_verb_count, 1);
        assert_eq!(stats.power_verb_ratio, 0.75);
        assert_eq!(stats.top_power_verbs[0].verb, "led");
        assert_eq!(stats.top_power_verbs[0].count, 2);
    }

    #[test]
    fn test_stats_empty_text() {
        let stats = power_verb_stats("");
        assert_eq!(stats.power_verb_count, 0);
        assert_eq!(stats.power_verb_ratio, 0.0);
        assert!(stats.top_power_verbs.is_empty());
    }

    #[test]
    fn test_top_power_verbs_capped() {
        let stats = power_verb_stats("led built cut drove owned scaled shipped");
        assert_eq!(stats.power_verb_count, 7);
        assert_eq!(stats.top_power_verbs.len(), TOP_POWER_VERBS);
    }
}
