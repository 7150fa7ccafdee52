use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::text::{detect_sections, find_email, has_phone, tokenize, word_count};
use crate::analysis::InsightExtractor;
use crate::errors::AppError;

const SKILL_VOCABULARY: &[&str] = &[
    "airflow", "angular", "ansible", "aws", "azure", "c#", "c++", "django", "docker",
    "elasticsearch", "excel", "fastapi", "figma", "flask", "gcp", "git", "go", "golang",
    "graphql", "hadoop", "java", "javascript", "jenkins", "jira", "kafka", "kotlin",
    "kubernetes", "linux", "mongodb", "mysql", "node.js", "nodejs", "pandas", "postgresql",
    "python", "pytorch", "react", "redis", "rust", "scala", "scikit-learn", "snowflake",
    "spark", "spring", "sql", "swift", "tableau", "tensorflow", "terraform", "typescript",
    "vue",
];

/// Lowercase mention → reported education level.
const EDUCATION_LEVELS: &[(&str, &str)] = &[
    ("phd", "doctorate"),
    ("ph.d", "doctorate"),
    ("doctorate", "doctorate"),
    ("master", "master"),
    ("msc", "master"),
    ("mba", "master"),
    ("m.s", "master"),
    ("bachelor", "bachelor"),
    ("bsc", "bachelor"),
    ("b.s", "bachelor"),
    ("b.a", "bachelor"),
    ("associate", "associate"),
];

const PROFILE_HOSTS: &[&str] = &["linkedin.com", "github.com", "gitlab.com"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub has_phone: bool,
    pub profile_links: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInsights {
    pub word_count: usize,
    pub sections: Vec<String>,
    pub skills: Vec<String>,
    pub education_levels: Vec<String>,
    pub estimated_years_experience: Option<u32>,
    pub contact: ContactInfo,
}

pub struct HeuristicInsightExtractor;

impl InsightExtractor for HeuristicInsightExtractor {
    fn extract_insights(&self, resume_text: &str) -> Result<ResumeInsights, AppError> {
        Ok(extract_insights(resume_text))
    }
}

fn extract_insights(text: &str) -> ResumeInsights {
    let tokens = tokenize(text);
    let lower = text.to_lowercase();

    let mut skills: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| tokens.iter().any(|t| t == *skill))
        .map(|s| s.to_string())
        .collect();
    skills.sort();

    let mut education_levels: Vec<String> = Vec::new();
    for (mention, level) in EDUCATION_LEVELS {
        let level = level.to_string();
        if tokens.iter().any(|t| names_degree(t, mention)) && !education_levels.contains(&level) {
            education_levels.push(level);
        }
    }

    ResumeInsights {
        word_count: word_count(text),
        sections: detect_sections(text).into_iter().map(String::from).collect(),
        skills,
        education_levels,
        estimated_years_experience: estimate_years(&lower),
        contact: ContactInfo {
            email: find_email(text),
            has_phone: has_phone(text),
            profile_links: profile_links(text),
        },
    }
}

/// Whole-token match, allowing a plural `s`. `Master's` tokenizes to `master`.
fn names_degree(token: &str, mention: &str) -> bool {
    token == mention || token.strip_suffix('s') == Some(mention)
}

/// Largest "N years" / "N+ years" / "N yrs" mention. Values above 50 are ignored.
fn estimate_years(lower: &str) -> Option<u32> {
    let words: Vec<&str> = lower.split_whitespace().collect();
    words
        .windows(2)
        .filter(|pair| {
            let unit = pair[1].trim_end_matches(|c: char| !c.is_alphanumeric());
            matches!(unit, "years" | "year" | "yrs" | "yr")
        })
        .filter_map(|pair| pair[0].trim_end_matches('+').parse::<u32>().ok())
        .filter(|years| *years <= 50)
        .max()
}

/// Profile URLs in first-seen order, each listed once.
fn profile_links(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| matches!(c, '<' | '>' | '(' | ')' | ',' | ';' | '|')))
        .filter(|t| PROFILE_HOSTS.iter().any(|host| t.to_lowercase().contains(host)))
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}
