//! Result renderer — turns an `AnalysisResult` into ordered display sections.
//!
//! Pure: the same result always yields the same sections. Blank and `"N/A"`
//! values are suppressed; a block with nothing to show is dropped, and so is a
//! section left without blocks.

use serde::Serialize;

use crate::models::analysis::{
    is_not_applicable, AnalysisResult, Certification, Education, PersonalInfo, Project,
    ResumeAnalysis, Skills, WorkExperience,
};
use crate::render::rating::RatingTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Overview,
    PersonalInfo,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Additional,
    Recommendations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Rating {
        value: String,
        tier: RatingTier,
    },
    Fields {
        fields: Vec<Field>,
    },
    Text {
        heading: &'static str,
        body: String,
    },
    /// Sentences, shown one per line.
    Bullets {
        heading: &'static str,
        items: Vec<String>,
    },
    /// Short labels, shown as tags.
    Badges {
        heading: &'static str,
        items: Vec<String>,
    },
    /// One education, job, project or certification.
    Entry {
        title: String,
        subtitle: String,
        period: String,
        details: Vec<Block>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

pub fn render_sections(result: &AnalysisResult) -> Vec<Section> {
    [
        section(SectionKind::Overview, "Resume Analysis", overview(&result.analysis)),
        section(
            SectionKind::PersonalInfo,
            "Personal Information",
            personal_info(&result.personal_info),
        ),
        section(
            SectionKind::Experience,
            "Work Experience",
            result.work_experience.iter().filter_map(experience_entry).collect(),
        ),
        section(
            SectionKind::Education,
            "Education",
            result.education.iter().filter_map(education_entry).collect(),
        ),
        section(
            SectionKind::Projects,
            "Projects",
            result.projects.iter().filter_map(project_entry).collect(),
        ),
        section(SectionKind::Skills, "Skills", skills(&result.skills)),
        section(
            SectionKind::Certifications,
            "Certifications",
            result
                .certifications
                .iter()
                .filter_map(certification_entry)
                .collect(),
        ),
        section(SectionKind::Additional, "Additional", additional(result)),
        section(
            SectionKind::Recommendations,
            "Recommendations",
            recommendations(&result.analysis),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn section(kind: SectionKind, title: &'static str, blocks: Vec<Block>) -> Option<Section> {
    (!blocks.is_empty()).then_some(Section {
        kind,
        title,
        blocks,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Block builders
// ────────────────────────────────────────────────────────────────────────────

fn present(value: &str) -> Option<String> {
    (!is_not_applicable(value)).then(|| value.trim().to_string())
}

fn present_items(items: &[String]) -> Vec<String> {
    items.iter().filter_map(|item| present(item)).collect()
}

/// Joins the applicable parts with `sep`, skipping blanks and `"N/A"`.
fn join_present<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| present(p.as_ref()))
        .collect::<Vec<_>>()
        .join(sep)
}

fn bullets(heading: &'static str, items: &[String]) -> Option<Block> {
    let items = present_items(items);
    (!items.is_empty()).then_some(Block::Bullets { heading, items })
}

fn badges(heading: &'static str, items: &[String]) -> Option<Block> {
    let items = present_items(items);
    (!items.is_empty()).then_some(Block::Badges { heading, items })
}

fn fields<S: AsRef<str>>(pairs: &[(&'static str, S)]) -> Option<Block> {
    let fields: Vec<Field> = pairs
        .iter()
        .filter_map(|(label, value)| {
            present(value.as_ref()).map(|value| Field {
                label: *label,
                value,
            })
        })
        .collect();
    (!fields.is_empty()).then_some(Block::Fields { fields })
}

fn entry(title: String, subtitle: String, period: String, details: Vec<Block>) -> Option<Block> {
    if title.is_empty() && subtitle.is_empty() && period.is_empty() && details.is_empty() {
        return None;
    }
    Some(Block::Entry {
        title,
        subtitle,
        period,
        details,
    })
}

fn period(start: &str, end: &str) -> String {
    join_present(&[start, end], " – ")
}

fn overview(analysis: &ResumeAnalysis) -> Vec<Block> {
    let rating = present(&analysis.resume_rating).map(|value| Block::Rating {
        tier: RatingTier::from_rating(&value),
        value,
    });
    [
        rating,
        bullets("Strengths", &analysis.strengths),
        bullets("Improvement Areas", &analysis.improvement_areas),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn personal_info(info: &PersonalInfo) -> Vec<Block> {
    let contact = fields(&[
        ("Name", &info.full_name),
        ("Email", &info.email),
        ("Phone", &info.phone),
        ("Location", &info.address),
        ("LinkedIn", &info.linkedin),
        ("GitHub", &info.github),
        ("Portfolio", &info.portfolio),
    ]);
    let summary = present(&info.summary).map(|body| Block::Text {
        heading: "Summary",
        body,
    });
    [contact, summary].into_iter().flatten().collect()
}

fn experience_entry(job: &WorkExperience) -> Option<Block> {
    let details = [
        bullets("Responsibilities", &job.responsibilities),
        bullets("Achievements", &job.achievements),
    ]
    .into_iter()
    .flatten()
    .collect();
    entry(
        join_present(&[&job.job_title], ""),
        join_present(&[&job.company, &job.location], " · "),
        period(&job.start_date, &job.end_date),
        details,
    )
}

fn education_entry(education: &Education) -> Option<Block> {
    let details = fields(&[("Grade", &education.grade_or_gpa)])
        .into_iter()
        .collect();
    entry(
        join_present(&[&education.degree, &education.major], ", "),
        join_present(&[&education.university, &education.location], " · "),
        period(&education.start_date, &education.end_date),
        details,
    )
}

fn project_entry(project: &Project) -> Option<Block> {
    let details = [
        badges("Technologies", &project.technologies_used),
        fields(&[("Link", &project.link)]),
    ]
    .into_iter()
    .flatten()
    .collect();
    entry(
        join_present(&[&project.title], ""),
        join_present(&[&project.description], ""),
        String::new(),
        details,
    )
}

fn certification_entry(cert: &Certification) -> Option<Block> {
    entry(
        join_present(&[&cert.name], ""),
        join_present(&[&cert.organization], ""),
        join_present(&[&cert.year], ""),
        Vec::new(),
    )
}

fn skills(skills: &Skills) -> Vec<Block> {
    [
        badges("Core Skills", &skills.core_skills),
        badges("Tools & Technologies", &skills.tools_and_technologies),
        badges("Soft Skills", &skills.soft_skills),
        badges("Languages", &skills.languages_known),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn additional(result: &AnalysisResult) -> Vec<Block> {
    [
        bullets("Awards & Achievements", &result.awards_and_achievements),
        bullets("Publications", &result.publications),
        bullets("Volunteer Experience", &result.volunteer_experience),
        bullets("Extra-curricular", &result.extra_curricular),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn recommendations(analysis: &ResumeAnalysis) -> Vec<Block> {
    [
        bullets("Upskill Suggestions", &analysis.upskill_suggestions),
        badges("Job Role Fit", &analysis.job_role_fit),
        badges("Keywords to Add", &analysis.industry_keywords_to_add),
    ]
    .into_iter()
    .flatten()
    .collect()
}
