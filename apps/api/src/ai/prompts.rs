//! Prompt templates for the AI assistant.

pub const SUGGEST_SYSTEM: &str = "You are an expert resume writer. You respond with valid JSON \
only, no prose and no markdown fences.";

pub const SUGGEST_PROMPT_TEMPLATE: &str = r#"Review the provided resume content and job description.

Provide an improved version of the resume content that is tailored to the job description and
adheres to industry best practices. In addition, provide a list of specific suggestions for
improving the resume.

Return JSON of the shape:
{"improvedContent": "<improved resume text>", "suggestions": ["<suggestion>", ...]}

Resume Content:
{resume_content}

Job Description:
{job_description}"#;

pub const GENERATE_SYSTEM: &str = "You are an expert resume writer. You respond with valid JSON \
only, no prose and no markdown fences.";

pub const GENERATE_PROMPT_TEMPLATE: &str = r#"Create a resume draft based on the following job
description. The draft should be well-formatted plain text, easy to read, and ready for the
candidate to fill in their own specifics.

Return JSON of the shape:
{"resumeDraft": "<draft resume text>"}

Job Description:
{job_description}"#;
