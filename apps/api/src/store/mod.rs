//! Resume and job-description storage.
//!
//! The engine never touches storage; handlers fetch both documents through
//! `ResumeStore` and hand borrowed snapshots to the matcher.

pub mod handlers;
pub mod memory;
pub mod seed;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{JobDescription, Resume};

pub use memory::InMemoryStore;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("{kind} {id} already exists")]
    Conflict { kind: &'static str, id: Uuid },
}

/// Storage abstraction held in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get_resume(&self, id: Uuid) -> Result<Resume, StoreError>;
    async fn insert_resume(&self, resume: Resume) -> Result<Resume, StoreError>;
    /// Overwrites only the fields given as `Some`, in one write. Concurrent
    /// edits of the same field: last write wins.
    async fn update_summary_and_skills(
        &self,
        id: Uuid,
        summary: Option<String>,
        skills: Option<String>,
    ) -> Result<Resume, StoreError>;

    async fn get_job_description(&self, id: Uuid) -> Result<JobDescription, StoreError>;
    async fn insert_job_description(&self, jd: JobDescription) -> Result<JobDescription, StoreError>;
}
