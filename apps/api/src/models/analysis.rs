//! Wire shape of a resume analysis. Every field defaults when absent so a sparse
//! collaborator payload still deserializes.

use serde::{Deserialize, Serialize};

/// Placeholder the collaborator uses for a field that does not apply.
pub const NOT_APPLICABLE: &str = "N/A";

/// Returns true for blank values and the `"N/A"` sentinel.
pub fn is_not_applicable(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(NOT_APPLICABLE)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub certifications: Vec<Certification>,
    pub awards_and_achievements: Vec<String>,
    pub publications: Vec<String>,
    pub volunteer_experience: Vec<String>,
    pub extra_curricular: Vec<String>,
    pub analysis: ResumeAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub address: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub major: String,
    pub university: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub grade_or_gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies_used: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub core_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools_and_technologies: Vec<String>,
    pub languages_known: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub organization: String,
    pub year: String,
}

/// Commentary derived from the resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeAnalysis {
    /// Free-form, normally `"X/10"`.
    pub resume_rating: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub upskill_suggestions: Vec<String>,
    pub job_role_fit: Vec<String>,
    pub industry_keywords_to_add: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_payload_deserializes_with_defaults() {
        let json = r#"{"personal_info": {"full_name": "Ada"}, "analysis": {"resume_rating": "7/10"}}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.personal_info.full_name, "Ada");
        assert!(result.personal_info.email.is_empty());
        assert!(result.work_experience.is_empty());
        assert!(result.skills.core_skills.is_empty());
        assert_eq!(result.analysis.resume_rating, "7/10");
    }

    #[test]
    fn test_empty_object_is_valid() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_nested_entries_keep_order() {
        let json = r#"{"work_experience": [
            {"job_title": "Senior", "responsibilities": ["a", "b"]},
            {"job_title": "Junior"}
        ]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.work_experience[0].job_title, "Senior");
        assert_eq!(result.work_experience[0].responsibilities, vec!["a", "b"]);
        assert_eq!(result.work_experience[1].job_title, "Junior");
        assert!(result.work_experience[1].achievements.is_empty());
    }

    #[test]
    fn test_not_applicable_sentinel() {
        assert!(is_not_applicable("N/A"));
        assert!(is_not_applicable(" n/a "));
        assert!(is_not_applicable(""));
        assert!(!is_not_applicable("Berkeley, CA"));
    }
}
