use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured resume as supplied by the upload/parsing collaborator.
/// The matching engine only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linked_in: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    /// Tables, images and multi-column blocks the parser could not flatten to text.
    #[serde(default)]
    pub non_text_elements: u32,
}

/// Job description as stored by the collaborator. Extracted fields are optional;
/// the engine derives equivalents from `description` when they are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub required_skills: Option<String>,
    #[serde(default)]
    pub preferred_skills: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
}

/// Returns the trimmed text of an optional field, or `None` when it is blank.
pub fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl JobDescription {
    /// True when there is nothing to extract keywords from.
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
            && non_blank(&self.job_title).is_none()
            && non_blank(&self.required_skills).is_none()
            && non_blank(&self.preferred_skills).is_none()
            && non_blank(&self.responsibilities).is_none()
    }
}
