//! In-process stand-in for the analysis backend. Serves canned payloads on the
//! real paths and records how each request arrived.

use std::sync::{Arc, Mutex};

use axum::{
    body::to_bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Debug, Clone)]
pub enum Recorded {
    Json {
        path: String,
        body: Value,
        session: Option<String>,
    },
    Multipart {
        path: String,
        fields: Vec<RecordedField>,
        session: Option<String>,
    },
    Bare {
        path: String,
        session: Option<String>,
    },
}

type Log = Arc<Mutex<Vec<Recorded>>>;

pub struct StubBackend {
    pub origin: String,
    log: Log,
}

impl StubBackend {
    pub async fn start() -> Self {
        let log: Log = Arc::default();
        let app = Router::new().fallback(handle).with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Failed to get addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            origin: format!("http://{addr}"),
            log,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }
}

async fn handle(State(log): State<Log>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let session = request
        .headers()
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let mut json_body = Value::Null;
    let recorded = if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        let mut fields = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let len = field.bytes().await.unwrap().len();
            fields.push(RecordedField {
                name,
                file_name,
                content_type,
                len,
            });
        }
        Recorded::Multipart {
            path: path.clone(),
            fields,
            session: session.clone(),
        }
    } else {
        let bytes = to_bytes(request.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            Recorded::Bare {
                path: path.clone(),
                session: session.clone(),
            }
        } else {
            json_body = serde_json::from_slice(&bytes).unwrap();
            Recorded::Json {
                path: path.clone(),
                body: json_body.clone(),
                session: session.clone(),
            }
        }
    };
    log.lock().unwrap().push(recorded);

    match path.as_str() {
        "/submit" if is_multipart => Json(json!({
            "message": "PDF processed successfully",
            "extractedText": "Jane Doe\nPython, Rust"
        }))
        .into_response(),
        "/submit" => Json(json!({
            "message": "Text received successfully",
            "resumeText": json_body["resumeText"]
        }))
        .into_response(),
        "/get-parsed-resume" if session.as_deref() == Some("garbled") => {
            "<html>not json</html>".into_response()
        }
        "/get-parsed-resume" => Json(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
            "links": null,
            "skills": ["Python", "Rust"]
        }))
        .into_response(),
        "/compare-resume" if json_body["jobDescription"] == "fail" => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No parsed resume found"})),
        )
            .into_response(),
        "/compare-resume" if json_body["jobDescription"] == "soft-fail" => {
            Json(json!({"error": "No resume found"})).into_response()
        }
        "/compare-resume" if json_body["jobDescription"] == "blank" => {
            Json(json!({})).into_response()
        }
        "/compare-resume" => Json(json!({
            "similarityScore": 82,
            "matchedSkills": {"Python": ["python", "0.9"]},
            "unmatchedSkills": ["Go"]
        }))
        .into_response(),
        "/upload-resumes" => Json(json!({"message": "Files uploaded"})).into_response(),
        "/compare-multiple-resumes" => Json(json!([
            {"filename": "b.pdf", "similarityScore": 91.0, "matchedSkills": {"Java": ["java", 0.99]}, "unmatchedSkills": []},
            {"filename": "a.pdf", "similarityScore": 40.5, "matchedSkills": {}, "unmatchedSkills": ["Java"]}
        ]))
        .into_response(),
        "/check-authenticity" if session.as_deref() == Some("blank") => {
            Json(json!({})).into_response()
        }
        "/check-authenticity" => Json(json!({
            "ai_score": 0.71,
            "authenticity_score": 55,
            "is_suspected_ai": true,
            "authenticity_flags": [],
            "unsupported_skills": ["Kubernetes"]
        }))
        .into_response(),
        "/download-tokenized-resume" => "jane doe\npython rust\n".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
