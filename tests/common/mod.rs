//! Shared helpers for integration tests: in-memory PDFs, a stub scoring
//! endpoint and a progress recorder.

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use resume_matcher::ExtractionProgressCallback;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ── PDFs ─────────────────────────────────────────────────────────────────────

/// Build a PDF with one line of Courier text per page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

// ── Stub scoring endpoint ────────────────────────────────────────────────────

/// What the stub answers and what it saw.
#[derive(Clone)]
pub struct Stub {
    pub hits: Arc<AtomicUsize>,
    pub fields: Arc<Mutex<HashMap<String, String>>>,
    status: StatusCode,
    body: Arc<String>,
    gate: Option<Arc<Notify>>,
}

impl Stub {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.lock().unwrap().get(name).cloned()
    }
}

async fn score(State(stub): State<Stub>, mut multipart: Multipart) -> (StatusCode, String) {
    stub.hits.fetch_add(1, Ordering::SeqCst);

    let mut fields = HashMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        fields.insert(name, value);
    }
    *stub.fields.lock().unwrap() = fields;

    if let Some(ref gate) = stub.gate {
        gate.notified().await;
    }
    (stub.status, stub.body.to_string())
}

/// Serve `POST /review` on an ephemeral port; returns the endpoint URL.
pub async fn spawn_stub(status: StatusCode, body: &str) -> (String, Stub) {
    spawn_stub_with_gate(status, body, None).await
}

/// Like [`spawn_stub`], but every response waits for `gate` to be notified.
pub async fn spawn_stub_with_gate(
    status: StatusCode,
    body: &str,
    gate: Option<Arc<Notify>>,
) -> (String, Stub) {
    let stub = Stub {
        hits: Arc::new(AtomicUsize::new(0)),
        fields: Arc::new(Mutex::new(HashMap::new())),
        status,
        body: Arc::new(body.to_string()),
        gate,
    };
    let app = Router::new()
        .route("/review", post(score))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/review"), stub)
}

// ── Progress recorder ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Recorder {
    pub started: Mutex<Option<usize>>,
    pub percents: Mutex<Vec<u8>>,
    pub completed_indices: Mutex<Vec<usize>>,
    pub errors: Mutex<Vec<String>>,
    pub finished: Mutex<Option<(usize, usize)>>,
}

impl Recorder {
    pub fn percents(&self) -> Vec<u8> {
        self.percents.lock().unwrap().clone()
    }
}

impl ExtractionProgressCallback for Recorder {
    fn on_batch_start(&self, total_files: usize) {
        *self.started.lock().unwrap() = Some(total_files);
    }

    fn on_file_complete(&self, index: usize, _name: &str, percent: u8) {
        self.percents.lock().unwrap().push(percent);
        self.completed_indices.lock().unwrap().push(index);
    }

    fn on_file_error(&self, _index: usize, name: &str, _error: &str) {
        self.errors.lock().unwrap().push(name.to_string());
    }

    fn on_batch_complete(&self, total_files: usize, failed: usize) {
        *self.finished.lock().unwrap() = Some((total_files, failed));
    }
}
