//! Fixed skill vocabulary and whole-word matching against CV text.
//!
//! Extending the vocabulary is a data change: add a label to `KNOWN_SKILLS`
//! and the matcher picks it up. Labels are canonical; output always uses the
//! casing written here regardless of the casing found in the source text.

use lazy_static::lazy_static;
use regex::Regex;

pub const KNOWN_SKILLS: &[&str] = &[
    "Python",
    "FastAPI",
    "Django",
    "Flask",
    "Docker",
    "Kubernetes",
    "AWS",
    "GCP",
    "Azure",
    "SQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "React",
    "Vue",
    "Angular",
    "Node.js",
    "Java",
    "Go",
    "C++",
    "Machine Learning",
    "Deep Learning",
    "PyTorch",
    "TensorFlow",
    "LightGBM",
    "YOLO",
    "Computer Vision",
    "NLP",
    "Git",
    "Linux",
    "Scikit-learn",
    "Pandas",
    "NumPy",
];

lazy_static! {
    /// One whole-word pattern per vocabulary label, compiled once. Matching
    /// runs against lowercased text, so the patterns are lowercased too.
    static ref SKILL_PATTERNS: Vec<(&'static str, Regex)> = KNOWN_SKILLS
        .iter()
        .map(|label| {
            let pattern = format!(r"\b{}\b", regex::escape(&label.to_lowercase()));
            (*label, Regex::new(&pattern).unwrap())
        })
        .collect();
}

/// Matches the vocabulary against the text using case-insensitive whole-word
/// matching: "Go" matches "I know Go" but not "Google" or "Golang". Output
/// is sorted, deduplicated, and uses canonical vocabulary casing. Stateless
/// and idempotent.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = SKILL_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&lower))
        .map(|(label, _)| (*label).to_string())
        .collect();
    found.sort_unstable();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_matching() {
        assert_eq!(extract_skills("I know Go"), vec!["Go"]);
        assert!(extract_skills("I work at Google on Golang").is_empty());
    }

    #[test]
    fn test_canonical_casing_preserved() {
        let found = extract_skills("shipped with python, DOCKER and postgresql");
        assert_eq!(found, vec!["Docker", "PostgreSQL", "Python"]);
    }

    #[test]
    fn test_multiword_labels_match() {
        let found = extract_skills("Focus areas: machine learning and computer vision.");
        assert_eq!(found, vec!["Computer Vision", "Machine Learning"]);
    }

    #[test]
    fn test_idempotent_and_deduplicated() {
        let text = "Python python PYTHON, and some Docker. Python again.";
        let first = extract_skills(text);
        let second = extract_skills(text);
        assert_eq!(first, second);
        assert_eq!(first, vec!["Docker", "Python"]);
    }

    #[test]
    fn test_only_vocabulary_labels_appear() {
        let found = extract_skills("Python, COBOL, Fortran, Docker, Excel");
        assert!(found.iter().all(|s| KNOWN_SKILLS.contains(&s.as_str())));
        assert_eq!(found, vec!["Docker", "Python"]);
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(extract_skills("").is_empty());
    }
}
