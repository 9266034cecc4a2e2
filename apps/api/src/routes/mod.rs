pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;
use crate::store::handlers as documents;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents (stand-in for the upload/parsing collaborator)
        .route("/resumes", post(documents::handle_create_resume))
        .route("/resumes/:id", get(documents::handle_get_resume))
        .route(
            "/job-descriptions",
            post(documents::handle_create_job_description),
        )
        .route(
            "/job-descriptions/:id",
            get(documents::handle_get_job_description),
        )
        // Matching & optimization
        .route("/resumes/:id/match", post(handlers::handle_match))
        .route(
            "/resumes/:id/optimization-suggestions",
            get(handlers::handle_optimization_suggestions),
        )
        .route("/resumes/:id/optimize", post(handlers::handle_optimize))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::matching::{EngineSettings, KeywordMatcher};
    use crate::models::{JobDescription, Resume};
    use crate::store::InMemoryStore;

    fn fixture() -> (Router, Uuid, Uuid, Uuid) {
        let resume = Resume {
            summary: Some("Backend developer focused on payments.".to_string()),
            experience: Some("Acme, Jan 2020 - Present\n- Worked on the Java ledger".to_string()),
            education: Some("BSc Computer Science".to_string()),
            skills: Some("Java, Docker".to_string()),
            ..Default::default()
        };
        let jd = JobDescription {
            description: "Platform team.".to_string(),
            job_title: Some("Backend Engineer".to_string()),
            required_skills: Some("Java, Kubernetes".to_string()),
            preferred_skills: Some("React".to_string()),
            ..Default::default()
        };
        let blank = JobDescription {
            company_name: Some("Acme".to_string()),
            ..Default::default()
        };
        let ids = (resume.id, jd.id, blank.id);

        let state = AppState {
            store: Arc::new(InMemoryStore::with_documents(vec![resume], vec![jd, blank])),
            matcher: Arc::new(KeywordMatcher::new(EngineSettings::new(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            ))),
        };
        (build_router(state), ids.0, ids.1, ids.2)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, ..) = fixture();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "resume-matcher");
    }

    #[tokio::test]
    async fn test_match_returns_scores_and_keywords() {
        let (app, resume_id, jd_id, _) = fixture();
        let (status, body) = send(
            &app,
            "POST",
            &format!("/resumes/{resume_id}/match?jdId={jd_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchedKeywords"], json!(["Java"]));
        assert_eq!(body["missingKeywords"], json!(["Kubernetes", "React"]));
        assert!(body["skillsMatchScore"].as_f64().unwrap() < 50.0);
        assert!(body["suggestions"].as_array().unwrap().len() <= 6);
    }

    #[tokio::test]
    async fn test_blank_job_description_is_unprocessable() {
        let (app, resume_id, _, blank_id) = fixture();
        let (status, body) = send(
            &app,
            "POST",
            &format!("/resumes/{resume_id}/match?jdId={blank_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INSUFFICIENT_INPUT");
    }

    #[tokio::test]
    async fn test_unknown_resume_is_not_found() {
        let (app, _, jd_id, _) = fixture();
        let (status, body) = send(
            &app,
            "POST",
            &format!("/resumes/{}/match?jdId={jd_id}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_or_bad_jd_id_is_rejected() {
        let (app, resume_id, ..) = fixture();
        let (status, body) = send(&app, "POST", &format!("/resumes/{resume_id}/match"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            "POST",
            &format!("/resumes/{resume_id}/match?jdId=nope"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_optimization_suggestions_do_not_modify_resume() {
        let (app, resume_id, jd_id, _) = fixture();
        let (status, body) = send(
            &app,
            "GET",
            &format!("/resumes/{resume_id}/optimization-suggestions?jdId={jd_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["optimizedSkills"], "Java, Docker, Kubernetes, React");
        assert_eq!(body["addedKeywords"], 2);
        assert_eq!(
            body["bulletImprovements"][0]["suggested"],
            "- Contributed to the Java ledger"
        );

        let (_, stored) = send(&app, "GET", &format!("/resumes/{resume_id}"), None).await;
        assert_eq!(stored["skills"], "Java, Docker");
    }

    #[tokio::test]
    async fn test_optimize_persists_summary_and_skills() {
        let (app, resume_id, jd_id, _) = fixture();
        let (status, body) = send(
            &app,
            "POST",
            &format!("/resumes/{resume_id}/optimize?jdId={jd_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], "Java, Docker, Kubernetes, React");

        let (_, stored) = send(&app, "GET", &format!("/resumes/{resume_id}"), None).await;
        assert_eq!(stored["skills"], "Java, Docker, Kubernetes, React");
        assert!(stored["summary"]
            .as_str()
            .unwrap()
            .starts_with("Backend developer focused on payments."));
        assert_eq!(stored["education"], "BSc Computer Science");

        // re-scoring after optimization finds the added keywords
        let (_, rescored) = send(
            &app,
            "POST",
            &format!("/resumes/{resume_id}/match?jdId={jd_id}"),
            None,
        )
        .await;
        assert_eq!(rescored["missingKeywords"], json!([]));
    }

    #[tokio::test]
    async fn test_create_and_fetch_documents() {
        let (app, ..) = fixture();
        let (status, created) = send(
            &app,
            "POST",
            "/job-descriptions",
            Some(json!({"description": "Rust services", "requiredSkills": "Rust"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, "GET", &format!("/job-descriptions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["requiredSkills"], "Rust");

        let (status, resume) = send(&app, "POST", "/resumes", Some(json!({"skills": "Rust"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, again) = send(&app, "POST", "/resumes", Some(resume)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(again["error"]["code"], "CONFLICT");
    }
}
