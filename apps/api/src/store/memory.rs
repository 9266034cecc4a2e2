use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{JobDescription, Resume};
use crate::store::{ResumeStore, StoreError};

const RESUME: &str = "resume";
const JOB_DESCRIPTION: &str = "job description";

/// Process-local store standing in for the storage collaborator.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    resumes: RwLock<HashMap<Uuid, Resume>>,
    job_descriptions: RwLock<HashMap<Uuid, JobDescription>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-filled with the given documents. Later duplicates win.
    pub fn with_documents(resumes: Vec<Resume>, job_descriptions: Vec<JobDescription>) -> Self {
        Self {
            resumes: RwLock::new(resumes.into_iter().map(|r| (r.id, r)).collect()),
            job_descriptions: RwLock::new(
                job_descriptions.into_iter().map(|j| (j.id, j)).collect(),
            ),
        }
    }

    pub async fn counts(&self) -> (usize, usize) {
        (
            self.resumes.read().await.len(),
            self.job_descriptions.read().await.len(),
        )
    }
}

#[async_trait]
impl ResumeStore for InMemoryStore {
    async fn get_resume(&self, id: Uuid) -> Result<Resume, StoreError> {
        self.resumes
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: RESUME, id })
    }

    async fn insert_resume(&self, resume: Resume) -> Result<Resume, StoreError> {
        let mut resumes = self.resumes.write().await;
        if resumes.contains_key(&resume.id) {
            return Err(StoreError::Conflict {
                kind: RESUME,
                id: resume.id,
            });
        }
        resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn update_summary_and_skills(
        &self,
        id: Uuid,
        summary: Option<String>,
        skills: Option<String>,
    ) -> Result<Resume, StoreError> {
        let mut resumes = self.resumes.write().await;
        let resume = resumes
            .get_mut(&id)
            .ok_or(StoreError::NotFound { kind: RESUME, id })?;
        if summary.is_some() {
            resume.summary = summary;
        }
        if skills.is_some() {
            resume.skills = skills;
        }
        Ok(resume.clone())
    }

    async fn get_job_description(&self, id: Uuid) -> Result<JobDescription, StoreError> {
        self.job_descriptions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: JOB_DESCRIPTION,
                id,
            })
    }

    async fn insert_job_description(&self, jd: JobDescription) -> Result<JobDescription, StoreError> {
        let mut job_descriptions = self.job_descriptions.write().await;
        if job_descriptions.contains_key(&jd.id) {
            return Err(StoreError::Conflict {
                kind: JOB_DESCRIPTION,
                id: jd.id,
            });
        }
        job_descriptions.insert(jd.id, jd.clone());
        Ok(jd)
    }
}
