//! The resume document model — the canonical in-memory representation of one
//! resume draft. Documents are never mutated in place: every edit goes through
//! a pure operation in [`crate::models::ops`] that builds a complete new
//! document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

/// One work-history entry. `id` is an opaque token used only for list keying
/// and deletion; it is stable for the lifetime of the entry and is not a
/// business identifier. Dates are free text, never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Multi-line free text; one achievement per line by convention.
    pub responsibilities: String,
}

impl WorkExperience {
    /// A fresh all-empty entry with a collision-resistant id.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            job_title: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            responsibilities: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: Uuid,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl EducationEntry {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            degree: String::new(),
            institution: String::new(),
            location: String::new(),
            graduation_date: String::new(),
            details: None,
        }
    }
}

/// The whole resume draft. Order of `experience`, `education` and `skills` is
/// display order and is preserved across edits. Empty strings are legal
/// everywhere — incomplete drafts are filtered at render/export time, not at
/// storage time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

impl ResumeDocument {
    /// The document a new user starts from: one editable row per list so the
    /// form is never empty, one blank skill slot.
    pub fn create_default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: String::new(),
            experience: vec![WorkExperience::empty()],
            education: vec![EducationEntry::empty()],
            skills: vec![String::new()],
        }
    }

    /// Illustrative seed document for demo deployments (`SEED_MODE=sample`).
    pub fn create_sample() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "Alex Rivera".to_string(),
                email: "alex.rivera@example.com".to_string(),
                phone: "(555) 010-7242".to_string(),
                address: "Portland, OR".to_string(),
                linkedin: Some("linkedin.com/in/alexrivera".to_string()),
                portfolio: Some("alexrivera.dev".to_string()),
                job_title: Some("Software Engineer".to_string()),
            },
            summary: "Engineer with six years of experience building data-heavy \
                      web products, focused on pragmatic design and measurable outcomes."
                .to_string(),
            experience: vec![WorkExperience {
                id: Uuid::new_v4(),
                job_title: "Senior Software Engineer".to_string(),
                company: "Northwind Analytics".to_string(),
                location: "Portland, OR".to_string(),
                start_date: "2021".to_string(),
                end_date: "Present".to_string(),
                responsibilities: "Led migration of the reporting stack to a streaming pipeline\n\
                                   Cut dashboard p95 load time from 4s to 800ms"
                    .to_string(),
            }],
            education: vec![EducationEntry {
                id: Uuid::new_v4(),
                degree: "B.S. Computer Science".to_string(),
                institution: "Oregon State University".to_string(),
                location: "Corvallis, OR".to_string(),
                graduation_date: "2018".to_string(),
                details: None,
            }],
            skills: vec![
                "Rust".to_string(),
                "TypeScript".to_string(),
                "PostgreSQL".to_string(),
            ],
        }
    }

    /// True when every major section is empty — the preview shows a
    /// start-filling-the-form placeholder in this state.
    pub fn is_blank(&self) -> bool {
        self.personal_info.name.is_empty()
            && self.summary.is_empty()
            && self.experience.iter().all(|e| e.job_title.is_empty())
            && self.education.iter().all(|e| e.degree.is_empty())
            && self.skills.iter().all(|s| s.trim().is_empty())
    }
}
