//! Demo collaborator: waits for a fixed delay, then answers every request with
//! the same sample analysis regardless of input.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::analyzer::{AnalysisError, ResumeAnalyzer};
use crate::models::analysis::{
    AnalysisResult, Certification, Education, PersonalInfo, Project, ResumeAnalysis, Skills,
    WorkExperience,
};

pub struct FixtureAnalyzer {
    delay: Duration,
}

impl FixtureAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ResumeAnalyzer for FixtureAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        debug!(
            "Fixture analyzer received {} chars, answering in {}ms",
            text.chars().count(),
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(sample_result())
    }

    fn backend(&self) -> &'static str {
        "fixture"
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The canned analysis served by the demo backend.
pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        personal_info: PersonalInfo {
            full_name: "John Doe".into(),
            email: "john.doe@email.com".into(),
            phone: "+1-555-0123".into(),
            linkedin: "linkedin.com/in/johndoe".into(),
            github: "github.com/johndoe".into(),
            portfolio: "johndoe.dev".into(),
            address: "San Francisco, CA".into(),
            summary: "Experienced software engineer with 5+ years in full-stack development"
                .into(),
        },
        education: vec![Education {
            degree: "Bachelor of Science".into(),
            major: "Computer Science".into(),
            university: "University of California".into(),
            location: "Berkeley, CA".into(),
            start_date: "2016".into(),
            end_date: "2020".into(),
            grade_or_gpa: "3.8 GPA".into(),
        }],
        work_experience: vec![WorkExperience {
            job_title: "Senior Software Engineer".into(),
            company: "Tech Corp".into(),
            location: "San Francisco, CA".into(),
            start_date: "2022".into(),
            end_date: "Present".into(),
            responsibilities: strings(&[
                "Led development of microservices architecture",
                "Mentored junior developers",
                "Implemented CI/CD pipelines",
            ]),
            achievements: strings(&[
                "Reduced deployment time by 60%",
                "Improved system performance by 40%",
            ]),
        }],
        projects: vec![Project {
            title: "E-commerce Platform".into(),
            description: "Full-stack e-commerce solution with React and Node.js".into(),
            technologies_used: strings(&["React", "Node.js", "PostgreSQL", "AWS"]),
            link: "github.com/johndoe/ecommerce".into(),
        }],
        skills: Skills {
            core_skills: strings(&["JavaScript", "React", "Node.js", "Python"]),
            soft_skills: strings(&["Leadership", "Communication", "Problem Solving"]),
            tools_and_technologies: strings(&["Docker", "AWS", "PostgreSQL", "Redis"]),
            languages_known: strings(&["English", "Spanish"]),
        },
        certifications: vec![Certification {
            name: "AWS Solutions Architect".into(),
            organization: "Amazon Web Services".into(),
            year: "2023".into(),
        }],
        awards_and_achievements: strings(&["Employee of the Month - June 2023"]),
        publications: strings(&["N/A"]),
        volunteer_experience: strings(&["Code for Good - Volunteer Developer"]),
        extra_curricular: strings(&["Hackathon Organizer", "Tech Meetup Speaker"]),
        analysis: ResumeAnalysis {
            resume_rating: "8.5/10".into(),
            strengths: strings(&[
                "Strong technical background",
                "Proven leadership experience",
                "Measurable achievements",
            ]),
            improvement_areas: strings(&[
                "Add more quantified results",
                "Include industry-specific keywords",
                "Expand on soft skills examples",
            ]),
            upskill_suggestions: strings(&[
                "Machine Learning fundamentals",
                "Kubernetes certification",
                "System design principles",
            ]),
            job_role_fit: strings(&[
                "Senior Software Engineer",
                "Tech Lead",
                "Engineering Manager",
                "Solutions Architect",
            ]),
            industry_keywords_to_add: strings(&[
                "Agile methodology",
                "Microservices",
                "DevOps",
                "Cloud architecture",
            ]),
        },
    }
}
