// Resume analysis LLM prompt templates.

pub const RESUME_ANALYSIS_SYSTEM: &str = "\
You are an experienced technical recruiter and resume reviewer. \
Extract the structure of a resume and critique it honestly.";

pub const RESUME_ANALYSIS_PROMPT: &str = r#"Parse the following resume into a structured JSON object and analyze it.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "personal_info": {
    "full_name": "string", "email": "string", "phone": "string",
    "linkedin": "string", "github": "string", "portfolio": "string",
    "address": "string", "summary": "string"
  },
  "education": [
    {"degree": "string", "major": "string", "university": "string", "location": "string",
     "start_date": "string", "end_date": "string", "grade_or_gpa": "string"}
  ],
  "work_experience": [
    {"job_title": "string", "company": "string", "location": "string",
     "start_date": "string", "end_date": "string",
     "responsibilities": ["string"], "achievements": ["string"]}
  ],
  "projects": [
    {"title": "string", "description": "string", "technologies_used": ["string"], "link": "string"}
  ],
  "skills": {
    "core_skills": ["string"], "soft_skills": ["string"],
    "tools_and_technologies": ["string"], "languages_known": ["string"]
  },
  "certifications": [{"name": "string", "organization": "string", "year": "string"}],
  "awards_and_achievements": ["string"],
  "publications": ["string"],
  "volunteer_experience": ["string"],
  "extra_curricular": ["string"],
  "analysis": {
    "resume_rating": "X/10",
    "strengths": ["string"],
    "improvement_areas": ["string"],
    "upskill_suggestions": ["string"],
    "job_role_fit": ["string"],
    "industry_keywords_to_add": ["string"]
  }
}

RULES:
1. Keep education, work_experience and projects in the order they appear in the resume
2. Use "Present" as end_date for a current position
3. resume_rating is a single score out of 10 with at most one decimal, e.g. "7.5/10"
4. strengths and improvement_areas: 3-5 specific items each, grounded in the resume text
5. job_role_fit: roles the candidate is credibly qualified for today
6. industry_keywords_to_add: keywords recruiters expect for those roles that the resume lacks
7. Return ONLY the JSON object, no code fences"#;
