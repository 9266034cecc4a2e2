use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{JobDescription, Resume};
use crate::store::InMemoryStore;

/// JSON seed file: `{"resumes": [...], "jobDescriptions": [...]}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub resumes: Vec<Resume>,
    #[serde(default)]
    pub job_descriptions: Vec<JobDescription>,
}

pub fn load_seed(path: &Path) -> Result<SeedData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Seed file '{}' is not valid seed JSON", path.display()))
}

impl From<SeedData> for InMemoryStore {
    fn from(seed: SeedData) -> Self {
        InMemoryStore::with_documents(seed.resumes, seed.job_descriptions)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use uuid::Uuid;

    use super::*;
    use crate::store::ResumeStore;

    #[tokio::test]
    async fn test_load_seed_into_store() {
        let resume_id = Uuid::new_v4();
        let jd_id = Uuid::new_v4();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "resumes": [{{"id": "{resume_id}", "skills": "Java, Docker"}}],
                "jobDescriptions": [{{"id": "{jd_id}", "description": "Java", "requiredSkills": "Java"}}]
            }}"#
        )
        .unwrap();

        let store = InMemoryStore::from(load_seed(file.path()).unwrap());
        assert_eq!(
            store.get_resume(resume_id).await.unwrap().skills.as_deref(),
            Some("Java, Docker")
        );
        assert_eq!(
            store
                .get_job_description(jd_id)
                .await
                .unwrap()
                .required_skills
                .as_deref(),
            Some("Java")
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        let seed = load_seed(file.path()).unwrap();
        assert!(seed.resumes.is_empty() && seed.job_descriptions.is_empty());
    }

    #[test]
    fn test_invalid_seed_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_seed(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("not valid seed JSON"));
    }
}
