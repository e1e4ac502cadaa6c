//! Pure edit operations over [`ResumeDocument`].
//!
//! Every operation takes the current document by reference and returns a
//! complete new document with exactly one change applied. The controller is
//! the only caller; it replaces its held document with the result, which keeps
//! reads (preview, export, AI) on one consistent snapshot and leaves the door
//! open for undo/redo.

use std::fmt;

use crate::errors::AppError;
use crate::models::resume::{EducationEntry, ResumeDocument, WorkExperience};

/// The two id-keyed lists addressable by list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListName {
    Experience,
    Education,
}

impl ListName {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "experience" => Ok(ListName::Experience),
            "education" => Ok(ListName::Education),
            other => Err(AppError::Validation(format!(
                "unknown list '{other}' (expected 'experience' or 'education')"
            ))),
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListName::Experience => write!(f, "experience"),
            ListName::Education => write!(f, "education"),
        }
    }
}

/// Replaces one leaf field addressed by a dotted path. Valid paths are
/// `summary` and `personalInfo.<field>`. Anything else is a programmer error
/// from the UI's point of view and fails with `InvalidPath`.
pub fn with_field(doc: &ResumeDocument, path: &str, value: &str) -> Result<ResumeDocument, AppError> {
    let mut next = doc.clone();
    match path {
        "summary" => next.summary = value.to_string(),
        "personalInfo.name" => next.personal_info.name = value.to_string(),
        "personalInfo.email" => next.personal_info.email = value.to_string(),
        "personalInfo.phone" => next.personal_info.phone = value.to_string(),
        "personalInfo.address" => next.personal_info.address = value.to_string(),
        "personalInfo.linkedin" => next.personal_info.linkedin = opt(value),
        "personalInfo.portfolio" => next.personal_info.portfolio = opt(value),
        "personalInfo.jobTitle" => next.personal_info.job_title = opt(value),
        unknown => return Err(AppError::InvalidPath(unknown.to_string())),
    }
    Ok(next)
}

/// Replaces one field of one list element. The addressable fields mirror the
/// form inputs; an unknown field name is an `InvalidPath`.
pub fn with_list_item_field(
    doc: &ResumeDocument,
    list: ListName,
    index: usize,
    field: &str,
    value: &str,
) -> Result<ResumeDocument, AppError> {
    let mut next = doc.clone();
    match list {
        ListName::Experience => {
            let entry = get_mut(&mut next.experience, list, index)?;
            match field {
                "jobTitle" => entry.job_title = value.to_string(),
                "company" => entry.company = value.to_string(),
                "location" => entry.location = value.to_string(),
                "startDate" => entry.start_date = value.to_string(),
                "endDate" => entry.end_date = value.to_string(),
                "responsibilities" => entry.responsibilities = value.to_string(),
                unknown => return Err(AppError::InvalidPath(format!("experience.{unknown}"))),
            }
        }
        ListName::Education => {
            let entry = get_mut(&mut next.education, list, index)?;
            match field {
                "degree" => entry.degree = value.to_string(),
                "institution" => entry.institution = value.to_string(),
                "location" => entry.location = value.to_string(),
                "graduationDate" => entry.graduation_date = value.to_string(),
                "details" => entry.details = opt(value),
                unknown => return Err(AppError::InvalidPath(format!("education.{unknown}"))),
            }
        }
    }
    Ok(next)
}

/// Appends a fresh all-empty entry with a newly generated unique id.
pub fn append_list_item(doc: &ResumeDocument, list: ListName) -> ResumeDocument {
    let mut next = doc.clone();
    match list {
        ListName::Experience => next.experience.push(WorkExperience::empty()),
        ListName::Education => next.education.push(EducationEntry::empty()),
    }
    next
}

pub fn remove_list_item(
    doc: &ResumeDocument,
    list: ListName,
    index: usize,
) -> Result<ResumeDocument, AppError> {
    let mut next = doc.clone();
    let len = match list {
        ListName::Experience => next.experience.len(),
        ListName::Education => next.education.len(),
    };
    if index >= len {
        return Err(out_of_range(list, index, len));
    }
    match list {
        ListName::Experience => {
            next.experience.remove(index);
        }
        ListName::Education => {
            next.education.remove(index);
        }
    }
    Ok(next)
}

pub fn set_skill(doc: &ResumeDocument, index: usize, value: &str) -> Result<ResumeDocument, AppError> {
    let mut next = doc.clone();
    let len = next.skills.len();
    match next.skills.get_mut(index) {
        Some(slot) => *slot = value.to_string(),
        None => {
            return Err(AppError::IndexOutOfRange {
                list: "skills".to_string(),
                index,
                len,
            })
        }
    }
    Ok(next)
}

pub fn append_skill(doc: &ResumeDocument) -> ResumeDocument {
    let mut next = doc.clone();
    next.skills.push(String::new());
    next
}

pub fn remove_skill(doc: &ResumeDocument, index: usize) -> Result<ResumeDocument, AppError> {
    let mut next = doc.clone();
    if index >= next.skills.len() {
        return Err(AppError::IndexOutOfRange {
            list: "skills".to_string(),
            index,
            len: next.skills.len(),
        });
    }
    next.skills.remove(index);
    Ok(next)
}

fn get_mut<T>(items: &mut [T], list: ListName, index: usize) -> Result<&mut T, AppError> {
    let len = items.len();
    items.get_mut(index).ok_or_else(|| out_of_range(list, index, len))
}

fn out_of_range(list: ListName, index: usize, len: usize) -> AppError {
    AppError::IndexOutOfRange {
        list: list.to_string(),
        index,
        len,
    }
}

/// Optional fields store `None` rather than an empty string so serialization
/// omits them, matching the persisted shape of untouched documents.
fn opt(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
