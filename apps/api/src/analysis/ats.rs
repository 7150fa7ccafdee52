//! ATS compliance — rule checks for conventions applicant tracking systems parse well.
//!
//! Score starts at 100; each failed rule subtracts its penalty. Clamped to 0 – 100.

use serde::{Deserialize, Serialize};

use crate::analysis::text::{
    content_lines, detect_sections, find_email, has_phone, is_bullet_line, word_count,
};
use crate::analysis::ComplianceChecker;
use crate::errors::AppError;

const REQUIRED_SECTIONS: &[&str] = &["experience", "education", "skills"];
const MIN_WORDS: usize = 150;
const MAX_WORDS: usize = 1000;
const MIN_BULLET_LINES: usize = 3;

const MISSING_SECTION_PENALTY: f64 = 15.0;
const MISSING_EMAIL_PENALTY: f64 = 10.0;
const MISSING_PHONE_PENALTY: f64 = 5.0;
const LENGTH_PENALTY: f64 = 10.0;
const GRAPHICS_PENALTY: f64 = 10.0;
const FEW_BULLETS_PENALTY: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsIssue {
    pub check: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub ats_score: f64,
    pub issues: Vec<AtsIssue>,
    pub sections_found: Vec<String>,
    pub missing_sections: Vec<String>,
    pub has_email: bool,
    pub has_phone: bool,
    pub word_count: usize,
    pub bullet_count: usize,
}

pub struct RuleBasedAtsChecker;

impl ComplianceChecker for RuleBasedAtsChecker {
    fn check_compliance(&self, resume_text: &str) -> Result<AtsReport, AppError> {
        Ok(check_ats(resume_text))
    }
}

fn check_ats(text: &str) -> AtsReport {
    let mut issues = Vec::new();
    let mut penalty = 0.0;

    let sections_found = detect_sections(text);
    let missing_sections: Vec<String> = REQUIRED_SECTIONS
        .iter()
        .filter(|s| !sections_found.contains(*s))
        .map(|s| s.to_string())
        .collect();
    for section in &missing_sections {
        penalty += MISSING_SECTION_PENALTY;
        issues.push(AtsIssue {
            check: "missing_section".to_string(),
            severity: Severity::High,
            message: format!("No '{section}' section heading found"),
        });
    }

    let has_email = find_email(text).is_some();
    if !has_email {
        penalty += MISSING_EMAIL_PENALTY;
        issues.push(AtsIssue {
            check: "contact_email".to_string(),
            severity: Severity::High,
            message: "No email address found".to_string(),
        });
    }

    let has_phone = has_phone(text);
    if !has_phone {
        penalty += MISSING_PHONE_PENALTY;
        issues.push(AtsIssue {
            check: "contact_phone".to_string(),
            severity: Severity::Medium,
            message: "No phone number found".to_string(),
        });
    }

    let words = word_count(text);
    if words < MIN_WORDS {
        penalty += LENGTH_PENALTY;
        issues.push(AtsIssue {
            check: "length".to_string(),
            severity: Severity::Medium,
            message: format!("Resume is short ({words} words); aim for at least {MIN_WORDS}"),
        });
    } else if words > MAX_WORDS {
        penalty += LENGTH_PENALTY;
        issues.push(AtsIssue {
            check: "length".to_string(),
            severity: Severity::Low,
            message: format!("Resume is long ({words} words); keep it under {MAX_WORDS}"),
        });
    }

    let graphic_chars = text.chars().filter(|c| is_graphic_glyph(*c)).count();
    if graphic_chars > 0 {
        penalty += GRAPHICS_PENALTY;
        issues.push(AtsIssue {
            check: "graphics".to_string(),
            severity: Severity::Medium,
            message: format!(
                "Found {graphic_chars} table, icon, or emoji characters that parsers may drop"
            ),
        });
    }

    let bullet_count = content_lines(text).filter(|l| is_bullet_line(l)).count();
    if bullet_count < MIN_BULLET_LINES {
        penalty += FEW_BULLETS_PENALTY;
        issues.push(AtsIssue {
            check: "bullets".to_string(),
            severity: Severity::Low,
            message: "Use bullet points to describe achievements".to_string(),
        });
    }

    AtsReport {
        ats_score: (100.0 - penalty).clamp(0.0, 100.0),
        issues,
        sections_found: sections_found.into_iter().map(String::from).collect(),
        missing_sections,
        has_email,
        has_phone,
        word_count: words,
        bullet_count,
    }
}

/// Box drawing, block elements, decorative dingbats, and emoji.
fn is_graphic_glyph(c: char) -> bool {
    matches!(c as u32,
        0x2500..=0x259F   // box drawing, block elements
        | 0x2605..=0x2606 // ★ ☆
        | 0x2700..=0x27BF // dingbats
        | 0x1F300..=0x1FAFF)
}
