//! Plain-text rendering of a resume document.
//!
//! One function serves two consumers: the AI assistant (resume content sent
//! with a job description) and the TXT export. The output is deterministic —
//! identical documents yield byte-identical text — so it is safe to assert on
//! verbatim in tests.

use crate::models::resume::ResumeDocument;

/// Renders the document as labeled, human-readable sections.
///
/// Work/education entries missing their primary pair (job title + company,
/// degree + institution) are skipped; the skills section is dropped entirely
/// when every skill is blank.
pub fn serialize_for_ai(doc: &ResumeDocument) -> String {
    let mut content = String::new();
    let info = &doc.personal_info;

    content.push_str(&format!("Name: {}\n", info.name));
    if let Some(title) = non_empty(info.job_title.as_deref()) {
        content.push_str(&format!("Current Role/Title: {title}\n"));
    }
    content.push_str(&format!(
        "Email: {}\nPhone: {}\nAddress: {}\n",
        info.email, info.phone, info.address
    ));
    if let Some(linkedin) = non_empty(info.linkedin.as_deref()) {
        content.push_str(&format!("LinkedIn: {linkedin}\n"));
    }
    if let Some(portfolio) = non_empty(info.portfolio.as_deref()) {
        content.push_str(&format!("Portfolio: {portfolio}\n"));
    }

    content.push_str(&format!("\nSummary/Objective:\n{}\n", doc.summary));

    let experience: Vec<_> = doc
        .experience
        .iter()
        .filter(|e| !e.job_title.is_empty() && !e.company.is_empty())
        .collect();
    if !experience.is_empty() {
        content.push_str("\nWork Experience:\n");
        for exp in experience {
            content.push_str(&format!(
                "- {} at {}, {} ({} - {})\n",
                exp.job_title, exp.company, exp.location, exp.start_date, exp.end_date
            ));
            if !exp.responsibilities.is_empty() {
                let bullets: Vec<String> = exp
                    .responsibilities
                    .lines()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .map(|line| format!("    \u{2022} {line}"))
                    .collect();
                if !bullets.is_empty() {
                    content.push_str("  Key Responsibilities & Achievements:\n");
                    content.push_str(&bullets.join("\n"));
                    content.push('\n');
                }
            }
        }
    }

    let education: Vec<_> = doc
        .education
        .iter()
        .filter(|e| !e.degree.is_empty() && !e.institution.is_empty())
        .collect();
    if !education.is_empty() {
        content.push_str("\nEducation:\n");
        for edu in education {
            content.push_str(&format!(
                "- {} from {}, {} (Graduated: {})\n",
                edu.degree, edu.institution, edu.location, edu.graduation_date
            ));
            if let Some(details) = non_empty(edu.details.as_deref()) {
                content.push_str(&format!("  Relevant Coursework/Details: {details}\n"));
            }
        }
    }

    let skills: Vec<&str> = doc
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        content.push_str("\nSkills:\n");
        content.push_str(&skills.join(", "));
        content.push('\n');
    }

    content.trim().to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
