//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle of each endpoint against an
//! in-memory review store and a recording summarizer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use review_digest::{
    api::create_router,
    cache::SummaryCache,
    store::{InMemoryReviewStore, ReviewStore},
    summarizer::{Summarizer, SummarizerError},
    AppState, ReviewService,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

// == Test Doubles ==

/// Records every comment set it is asked to summarize.
#[derive(Default)]
struct RecordingSummarizer {
    calls: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl RecordingSummarizer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_call(&self) -> Vec<String> {
        self.calls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, comments: &[String]) -> Result<String, SummarizerError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(comments.to_vec());
        if self.fail {
            return Err(SummarizerError::Status {
                status: 503,
                body: "overloaded".to_string(),
            });
        }
        Ok(format!("Resumo {}", calls.len()))
    }
}

struct TestApp {
    router: Router,
    store: Arc<InMemoryReviewStore>,
    summarizer: Arc<RecordingSummarizer>,
}

// == Helper Functions ==

fn build_app(summarizer: RecordingSummarizer, cache_ttl: Duration) -> TestApp {
    let store = Arc::new(InMemoryReviewStore::new());
    let summarizer = Arc::new(summarizer);
    let service = ReviewService::new(
        Some(store.clone() as Arc<dyn ReviewStore>),
        Arc::new(RwLock::new(SummaryCache::new(100, cache_ttl))),
        summarizer.clone(),
    );

    TestApp {
        router: create_router(AppState::new(service)),
        store,
        summarizer,
    }
}

fn create_test_app() -> TestApp {
    build_app(RecordingSummarizer::default(), Duration::from_secs(3600))
}

fn create_degraded_app() -> Router {
    let service = ReviewService::new(
        None,
        Arc::new(RwLock::new(SummaryCache::new(100, Duration::from_secs(3600)))),
        Arc::new(RecordingSummarizer::default()),
    );
    create_router(AppState::new(service))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_review(app: &Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

async fn post_raw(app: &Router, body: String) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/save_review")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn get_reviews(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn review(product_id: &str, rating: i64, text: &str) -> Value {
    json!({
        "produto_id": product_id,
        "nome_usuario": "Ana",
        "nota": rating,
        "avaliacao": text,
    })
}

// == Save Review Tests ==

#[tokio::test]
async fn test_save_review_success() {
    let app = create_test_app();

    let (status, json) = post_review(&app.router, review("produto123", 5, "Excelente!")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json, json!({"message": "Avaliação salva com sucesso"}));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_save_review_rating_out_of_range_never_reaches_store() {
    let app = create_test_app();

    for rating in [0, 6, -1, 100] {
        let (status, json) = post_review(&app.router, review("p1", rating, "texto")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {}", rating);
        assert_eq!(json["error"], "Dados inválidos");
    }

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_save_review_missing_fields() {
    let app = create_test_app();

    for field in ["produto_id", "nome_usuario", "nota", "avaliacao"] {
        let mut body = review("p1", 4, "bom");
        body.as_object_mut().unwrap().remove(field);

        let (status, json) = post_review(&app.router, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert_eq!(json["error"], "Dados inválidos");
    }

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_save_review_malformed_bodies() {
    let app = create_test_app();

    let bodies = [
        "not json".to_string(),
        r#"{"produto_id":"p1","nome_usuario":"Ana","nota":"cinco","avaliacao":"ok"}"#.to_string(),
        r#"{"produto_id":"p1","nome_usuario":"Ana","nota":4.5,"avaliacao":"ok"}"#.to_string(),
    ];
    for body in bodies {
        let (status, json) = post_raw(&app.router, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert!(json.get("error").is_some());
    }
}

// == Get Reviews Tests ==

#[tokio::test]
async fn test_get_reviews_requires_product_id() {
    let app = create_test_app();

    for uri in ["/get_reviews", "/get_reviews?produto_id="] {
        let (status, json) = get_reviews(&app.router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "ID do produto é obrigatório"}));
    }
}

#[tokio::test]
async fn test_get_reviews_padded_product_id_matches_saved_id() {
    let app = create_test_app();

    let (status, _) = post_review(&app.router, review(" p1 ", 4, "Bom")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = get_reviews(&app.router, "/get_reviews?produto_id=%20p1%20").await;
    assert_eq!(status, StatusCode::OK);
    let items = json["avaliacoes"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["produto_id"], " p1 ");

    let (_, json) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;
    assert_eq!(json["avaliacoes"], json!([]));
}

#[tokio::test]
async fn test_get_reviews_unknown_product() {
    let app = create_test_app();

    let (status, json) = get_reviews(&app.router, "/get_reviews?produto_id=nada").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["resumo_avaliacao"], "Nenhum resumo disponível.");
    assert_eq!(json["media"], 0.0);
    assert_eq!(json["avaliacoes"], json!([]));
    assert_eq!(app.summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_get_reviews_average_and_items() {
    let app = create_test_app();

    post_review(&app.router, review("p1", 5, "Ótimo")).await;
    post_review(&app.router, review("p1", 4, "Bom")).await;
    post_review(&app.router, review("p1", 3, "Ok")).await;
    post_review(&app.router, review("p2", 1, "Outro produto")).await;

    let (status, json) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["media"], 4.0);
    assert_eq!(json["resumo_avaliacao"], "Resumo 1");
    assert!(json.get("resumo_erro").is_none());

    let items = json["avaliacoes"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0],
        json!({"produto_id": "p1", "nome_usuario": "Ana", "nota": 3, "avaliacao": "Ok"})
    );
}

#[tokio::test]
async fn test_get_reviews_rounds_average() {
    let app = create_test_app();

    for rating in [5, 5, 4] {
        post_review(&app.router, review("p1", rating, "x")).await;
    }

    let (_, json) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;
    assert_eq!(json["media"], 4.67);
}

#[tokio::test]
async fn test_get_reviews_newest_first() {
    let app = create_test_app();

    for text in ["primeira", "segunda", "terceira"] {
        post_review(&app.router, review("p1", 4, text)).await;
    }

    let (_, json) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;
    let texts: Vec<&str> = json["avaliacoes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["avaliacao"].as_str().unwrap())
        .collect();

    assert_eq!(texts, vec!["terceira", "segunda", "primeira"]);
}

#[tokio::test]
async fn test_summary_uses_newest_twenty_comments() {
    let app = create_test_app();

    for i in 0..25 {
        post_review(&app.router, review("p1", 3, &format!("comentario {}", i))).await;
    }

    let (_, json) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    // The full list is returned even though only 20 are summarized
    assert_eq!(json["avaliacoes"].as_array().unwrap().len(), 25);

    let comments = app.summarizer.last_call();
    assert_eq!(comments.len(), 20);
    assert_eq!(comments[0], "comentario 24");
    assert_eq!(comments[19], "comentario 5");
}

// == Summary Cache Tests ==

#[tokio::test]
async fn test_summary_cached_within_ttl_even_when_stale() {
    let app = create_test_app();

    post_review(&app.router, review("p1", 5, "Excelente")).await;
    let (_, first) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    post_review(&app.router, review("p1", 1, "Péssimo")).await;
    let (_, second) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    assert_eq!(app.summarizer.call_count(), 1);
    assert_eq!(first["resumo_avaliacao"], second["resumo_avaliacao"]);
    assert_eq!(second["avaliacoes"].as_array().unwrap().len(), 2);
    assert_eq!(second["media"], 3.0);
}

#[tokio::test]
async fn test_summary_recomputed_after_ttl() {
    let app = build_app(RecordingSummarizer::default(), Duration::from_millis(200));

    post_review(&app.router, review("p1", 5, "Excelente")).await;
    let (_, first) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    tokio::time::sleep(Duration::from_millis(300)).await;

    let (_, second) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    assert_eq!(app.summarizer.call_count(), 2);
    assert_eq!(first["resumo_avaliacao"], "Resumo 1");
    assert_eq!(second["resumo_avaliacao"], "Resumo 2");
}

#[tokio::test]
async fn test_summaries_cached_per_product() {
    let app = create_test_app();

    post_review(&app.router, review("p1", 5, "a")).await;
    post_review(&app.router, review("p2", 2, "b")).await;

    get_reviews(&app.router, "/get_reviews?produto_id=p1").await;
    get_reviews(&app.router, "/get_reviews?produto_id=p2").await;
    get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    assert_eq!(app.summarizer.call_count(), 2);
}

#[tokio::test]
async fn test_summarizer_failure_keeps_reviews() {
    let app = build_app(RecordingSummarizer::failing(), Duration::from_secs(3600));

    post_review(&app.router, review("p1", 4, "Bom")).await;
    let (status, json) = get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["resumo_avaliacao"], "Nenhum resumo disponível.");
    assert!(json["resumo_erro"].is_string());
    assert_eq!(json["media"], 4.0);
    assert_eq!(json["avaliacoes"].as_array().unwrap().len(), 1);
}

// == Degraded Mode Tests ==

#[tokio::test]
async fn test_store_unavailable_returns_500() {
    let app = create_degraded_app();
    let expected = json!({"error": "Erro de conexão com o banco de dados"});

    let (status, json) = post_review(&app, review("p1", 5, "ok")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, expected);

    let (status, json) = get_reviews(&app, "/get_reviews?produto_id=p1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, expected);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_reports_cache_stats() {
    let app = create_test_app();

    post_review(&app.router, review("p1", 5, "a")).await;
    get_reviews(&app.router, "/get_reviews?produto_id=p1").await;
    get_reviews(&app.router, "/get_reviews?produto_id=p1").await;

    let (status, json) = get_reviews(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store"], "connected");
    assert_eq!(json["summary_cache"]["hits"], 1);
    assert_eq!(json["summary_cache"]["misses"], 1);
    assert_eq!(json["summary_cache"]["total_entries"], 1);
}

#[tokio::test]
async fn test_health_degraded() {
    let (status, json) = get_reviews(&create_degraded_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
}
