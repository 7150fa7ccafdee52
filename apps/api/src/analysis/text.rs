//! Shared text helpers for the default analyzers. Pure functions, no allocation-heavy parsing.

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "all", "also", "an", "and", "any", "are", "as",
    "at", "be", "been", "being", "both", "but", "by", "can", "could", "do", "does", "each",
    "etc", "for", "from", "had", "has", "have", "how", "if", "in", "into", "is", "it", "its",
    "may", "more", "most", "must", "need", "not", "of", "on", "or", "other", "our", "out",
    "over", "per", "plus", "should", "so", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "up", "us", "using",
    "via", "was", "we", "well", "were", "what", "when", "where", "which", "while", "who",
    "will", "with", "within", "work", "would", "you", "your", "years", "year", "experience",
    "looking", "join", "team", "role", "strong", "ability", "including", "preferred",
    "required", "requirements", "responsibilities", "nice",
];

/// Canonical section name → heading aliases (lowercase).
const SECTION_HEADINGS: &[(&str, &[&str])] = &[
    (
        "experience",
        &["experience", "employment", "work history", "career history"],
    ),
    ("education", &["education", "academic", "qualifications"]),
    ("skills", &["skills", "competencies", "technologies", "tech stack"]),
    ("summary", &["summary", "profile", "objective", "about me"]),
    ("projects", &["projects", "portfolio"]),
    ("certifications", &["certifications", "certificates", "licenses"]),
];

const MAX_HEADING_WORDS: usize = 4;

/// Lowercase word tokens. Keeps `+`, `#`, and inner dots so `c++`, `c#`, and `node.js` survive.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tokens that carry meaning for keyword matching.
pub fn keywords(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Canonical names of the sections whose headings appear in the text, in document order.
pub fn detect_sections(text: &str) -> Vec<&'static str> {
    let mut found = Vec::new();
    for line in text.lines() {
        let heading = line
            .trim()
            .trim_end_matches(':')
            .trim()
            .to_lowercase();
        if heading.is_empty() || heading.split_whitespace().count() > MAX_HEADING_WORDS {
            continue;
        }
        for (section, aliases) in SECTION_HEADINGS {
            if !found.contains(section) && aliases.iter().any(|a| heading.contains(a)) {
                found.push(*section);
            }
        }
    }
    found
}

/// First token that looks like an email address.
pub fn find_email(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| matches!(c, '<' | '>' | '(' | ')' | ',' | ';' | ':' | '|')))
        .map(|t| t.trim_start_matches("mailto:"))
        .find(|t| {
            let Some((local, domain)) = t.split_once('@') else {
                return false;
            };
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        .map(str::to_string)
}

/// True when a run of phone-ish characters contains at least ten digits.
pub fn has_phone(text: &str) -> bool {
    let mut digits = 0;
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits += 1;
            if digits >= 10 {
                return true;
            }
        } else if !matches!(c, ' ' | '-' | '.' | '(' | ')' | '+') {
            digits = 0;
        }
    }
    false
}

/// Counts whole-word occurrences of a lowercase phrase in lowercase text.
pub fn count_phrase(haystack: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    haystack
        .match_indices(phrase)
        .filter(|(start, _)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + phrase.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}

pub fn is_bullet_line(line: &str) -> bool {
    matches!(
        line.trim_start().chars().next(),
        Some('-' | '*' | '•' | '◦' | '▪' | '‣' | '–' | '·')
    )
}

/// A line carries a metric: a digit, a percentage, or a currency amount.
pub fn is_quantified(line: &str) -> bool {
    line.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'))
}

/// Non-blank lines, trimmed.
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}
