pub mod handlers;

/// Builds the text that feeds a job's embedding. Stored once at
/// create/update time; match queries compare against it later.
pub fn job_context_text(title: &str, description: &str, skills: &[String]) -> String {
    format!(
        "Job Title: {title}. Description: {description}. Required Skills: {}",
        skills.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_text_shape() {
        let skills = vec!["Python".to_string(), "Docker".to_string()];
        assert_eq!(
            job_context_text("Backend Engineer", "Build APIs", &skills),
            "Job Title: Backend Engineer. Description: Build APIs. Required Skills: Python Docker"
        );
    }

    #[test]
    fn test_context_text_without_skills() {
        assert_eq!(
            job_context_text("Backend Engineer", "Build APIs", &[]),
            "Job Title: Backend Engineer. Description: Build APIs. Required Skills: "
        );
    }
}
