//! Upsert-merge between a stored profile and a fresh analysis.
//!
//! Technical fields (embedding, skills, experience, filename) are
//! re-derivable facts and always take the fresh value. Bio and full name may
//! carry manual edits; a routine re-upload must not silently discard those,
//! so each is kept unless it was empty or the caller asked for a refresh.
//!
//! Pure over its inputs. Persistence is the handler's job.

use crate::embedding::Embedding;
use crate::models::profile::ProfileRow;
use crate::resume::analyzer::ResumeAnalysis;

/// Field values ready to be written to the `profiles` row.
#[derive(Debug, Clone)]
pub struct MergedProfile {
    pub full_name: Option<String>,
    pub bio: String,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub resume_filename: String,
    pub embedding: Embedding,
}

pub fn merge_profile(
    existing: Option<&ProfileRow>,
    fresh: &ResumeAnalysis,
    force_refresh: bool,
) -> MergedProfile {
    let (full_name, bio) = match existing {
        None => (fresh.full_name.clone(), fresh.bio.clone()),
        Some(profile) => {
            let full_name = match &profile.full_name {
                Some(name) if !name.is_empty() && !force_refresh => Some(name.clone()),
                _ => fresh.full_name.clone(),
            };
            let bio = match &profile.bio {
                Some(bio) if !bio.is_empty() && !force_refresh => bio.clone(),
                _ => fresh.bio.clone(),
            };
            (full_name, bio)
        }
    };

    MergedProfile {
        full_name,
        bio,
        skills: fresh.skills.clone(),
        experience_years: fresh.experience_years,
        resume_filename: fresh.source_filename.clone(),
        embedding: fresh.embedding.clone(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pgvector::Vector;
    use uuid::Uuid;

    use super::*;

    fn fresh_analysis() -> ResumeAnalysis {
        ResumeAnalysis {
            full_name: Some("Wahyu Santoso".to_string()),
            bio: "auto".to_string(),
            skills: vec!["Docker".to_string(), "Python".to_string()],
            experience_years: 4,
            embedding: Embedding::new(vec![0.5; 384]).unwrap(),
            source_filename: "cv-v2.pdf".to_string(),
        }
    }

    fn stored_profile(full_name: Option<&str>, bio: Option<&str>) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: full_name.map(String::from),
            bio: bio.map(String::from),
            skills: vec!["Java".to_string()],
            experience_years: 1,
            resume_filename: Some("cv-v1.pdf".to_string()),
            embedding: Vector::from(vec![0.1; 384]),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_existing_adopts_all_fresh_fields() {
        let fresh = fresh_analysis();
        let merged = merge_profile(None, &fresh, false);
        assert_eq!(merged.full_name.as_deref(), Some("Wahyu Santoso"));
        assert_eq!(merged.bio, "auto");
        assert_eq!(merged.skills, fresh.skills);
        assert_eq!(merged.experience_years, 4);
        assert_eq!(merged.resume_filename, "cv-v2.pdf");
    }

    #[test]
    fn test_hand_written_bio_survives_routine_reupload() {
        let existing = stored_profile(Some("Custom Name"), Some("hand-written"));
        let merged = merge_profile(Some(&existing), &fresh_analysis(), false);
        assert_eq!(merged.bio, "hand-written");
        assert_eq!(merged.full_name.as_deref(), Some("Custom Name"));
    }

    #[test]
    fn test_force_refresh_overwrites_human_fields() {
        let existing = stored_profile(Some("Custom Name"), Some("hand-written"));
        let merged = merge_profile(Some(&existing), &fresh_analysis(), true);
        assert_eq!(merged.bio, "auto");
        assert_eq!(merged.full_name.as_deref(), Some("Wahyu Santoso"));
    }

    #[test]
    fn test_empty_human_fields_are_filled_in() {
        let existing = stored_profile(None, Some(""));
        let merged = merge_profile(Some(&existing), &fresh_analysis(), false);
        assert_eq!(merged.bio, "auto");
        assert_eq!(merged.full_name.as_deref(), Some("Wahyu Santoso"));
    }

    #[test]
    fn test_technical_fields_always_take_fresh_values() {
        let existing = stored_profile(Some("Custom Name"), Some("hand-written"));
        let fresh = fresh_analysis();
        let merged = merge_profile(Some(&existing), &fresh, false);
        assert_eq!(merged.skills, fresh.skills);
        assert_eq!(merged.experience_years, 4);
        assert_eq!(merged.resume_filename, "cv-v2.pdf");
        assert_eq!(merged.embedding, fresh.embedding);
    }
}
