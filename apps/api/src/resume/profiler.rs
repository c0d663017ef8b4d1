//! Best-effort heuristics over extracted CV text: candidate name and a
//! years-of-experience estimate. These never fail; the worst case is
//! `None` / `0`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// An uppercase letter, spurious whitespace, then a lowercase letter.
    /// PDF extraction inserts these gaps inside kerned names ("W ahyu").
    static ref KERNING_GAP: Regex = Regex::new(r"([A-Z])\s+([a-z])").unwrap();

    /// Four-digit tokens that look like 21st-century years.
    static ref YEAR: Regex = Regex::new(r"\b20\d{2}\b").unwrap();
}

/// Section headers that mark the start of the work-history portion of a CV,
/// checked in order.
const EXPERIENCE_HEADERS: [&str; 3] = ["experience", "work history", "employment"];

/// Repairs kerning gaps until none remain: "W ahyu S antoso" becomes
/// "Wahyu Santoso". Trims surrounding whitespace.
pub fn clean_name(raw: &str) -> String {
    let mut name = raw.trim().to_string();
    loop {
        let repaired = KERNING_GAP.replace_all(&name, "${1}${2}").to_string();
        if repaired == name {
            return name;
        }
        name = repaired;
    }
}

/// Takes the first non-blank line as the candidate name and repairs it.
/// Returns `None` when the text has no non-blank line, never an empty string.
pub fn extract_name(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    let name = clean_name(line);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Coarse estimate: `max(year) - min(year)` over the 4-digit years found
/// after the experience section header (or over the whole text when no
/// header is present). Zero or one distinct year yields 0.
///
/// Restricting the window to the experience section avoids picking up
/// graduation or birth years that precede it. The estimate deliberately does
/// not reason about date ranges or employment gaps; that is an accepted
/// approximation.
pub fn estimate_experience_years(text: &str) -> i32 {
    let lower = text.to_lowercase();

    let mut window = lower.as_str();
    for header in EXPERIENCE_HEADERS {
        if let Some(idx) = lower.find(header) {
            window = &lower[idx..];
            break;
        }
    }

    let years: Vec<i32> = YEAR
        .find_iter(window)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match (years.iter().min(), years.iter().max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kerning_repair() {
        assert_eq!(clean_name("W ahyu S antoso"), "Wahyu Santoso");
        assert_eq!(clean_name("W ahyu"), "Wahyu");
    }

    #[test]
    fn test_clean_name_leaves_normal_names_alone() {
        assert_eq!(clean_name("Jane Doe"), "Jane Doe");
        assert_eq!(clean_name("  Jane Doe  "), "Jane Doe");
    }

    #[test]
    fn test_clean_name_collapses_wide_gaps() {
        assert_eq!(clean_name("W   ahyu"), "Wahyu");
        assert_eq!(clean_name("W\tahyu"), "Wahyu");
    }

    #[test]
    fn test_extract_name_takes_first_non_blank_line() {
        let text = "\n\n  W ahyu S antoso\nSoftware Engineer\n";
        assert_eq!(extract_name(text), Some("Wahyu Santoso".to_string()));
    }

    #[test]
    fn test_extract_name_absent_when_no_lines() {
        assert_eq!(extract_name(""), None);
        assert_eq!(extract_name("  \n\n   \n"), None);
    }

    #[test]
    fn test_experience_from_year_span() {
        let text = "Experience\n2019 - 2023 Backend Engineer";
        assert_eq!(estimate_experience_years(text), 4);
    }

    #[test]
    fn test_experience_ignores_years_before_the_header() {
        // The 2010 graduation year sits before the Experience header and
        // must not widen the span.
        let text = "Education\nGraduated 2010\nExperience\n2020 - 2022";
        assert_eq!(estimate_experience_years(text), 2);
    }

    #[test]
    fn test_experience_uses_whole_text_without_header() {
        assert_eq!(estimate_experience_years("2018 to 2021 freelancing"), 3);
    }

    #[test]
    fn test_single_year_yields_zero() {
        assert_eq!(estimate_experience_years("Experience\n2022"), 0);
    }

    #[test]
    fn test_no_years_yields_zero() {
        assert_eq!(estimate_experience_years("Experience\nten great years"), 0);
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let text = "EMPLOYMENT\n2015\n2019";
        assert_eq!(estimate_experience_years(text), 4);
    }
}
