pub mod ops;
pub mod resume;
pub mod text;

pub use ops::ListName;
pub use resume::{EducationEntry, PersonalInfo, ResumeDocument, WorkExperience};
