//! JSON REST API for Antioch.
//!
//! Exposes an axum [`Router`] backed by any
//! [`antioch_core::store::SupporterStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", antioch_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod individuals;
pub mod pledges;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use antioch_core::store::SupporterStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SupporterStore + 'static,
{
  Router::new()
    // Individuals
    .route("/individuals", get(individuals::list::<S>))
    .route("/individuals/resolve", post(individuals::resolve::<S>))
    .route("/individuals/{id}", get(individuals::get_one::<S>))
    .route("/individuals/{id}/pledges", get(pledges::list_for_individual::<S>))
    // Pledges
    .route("/pledges", post(pledges::create::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use antioch_store_sqlite::SqliteStore;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn router() -> Router<()> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    router: &Router<()>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn resolve_body(auth_user_id: &str, email: &str) -> Value {
    json!({
      "auth_user_id": auth_user_id,
      "email": email,
      "profile": { "display_name": "Alice Liddell", "phone": "5551234567" },
    })
  }

  // ── Resolve ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn resolve_creates_then_finds_existing() {
    let app = router().await;

    let (status, first) =
      send(&app, "POST", "/individuals/resolve", Some(resolve_body("auth-1", "alice@example.com"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["email"], "alice@example.com");
    assert_eq!(first["auth_user_id"], "auth-1");
    assert_eq!(first["phone"], "(555) 123-4567");

    let (status, second) =
      send(&app, "POST", "/individuals/resolve", Some(resolve_body("auth-1", "alice@example.com"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["individual_id"], first["individual_id"]);
  }

  #[tokio::test]
  async fn resolve_without_profile_is_unprocessable() {
    let app = router().await;

    let (status, body) = send(
      &app,
      "POST",
      "/individuals/resolve",
      Some(json!({ "auth_user_id": "auth-1", "email": "new@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("no profile data"));
  }

  #[tokio::test]
  async fn resolve_with_empty_identity_is_bad_request() {
    let app = router().await;

    let (status, _) =
      send(&app, "POST", "/individuals/resolve", Some(resolve_body("", "alice@example.com"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Individuals ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_individual_returns_404() {
    let app = router().await;
    let (status, body) =
      send(&app, "GET", &format!("/individuals/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
  }

  #[tokio::test]
  async fn list_individuals_returns_created_records() {
    let app = router().await;
    send(&app, "POST", "/individuals/resolve", Some(resolve_body("auth-1", "a@example.com"))).await;
    send(&app, "POST", "/individuals/resolve", Some(resolve_body("auth-2", "b@example.com"))).await;

    let (status, body) = send(&app, "GET", "/individuals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
  }

  // ── Pledges ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_pledge_derives_amount_and_ignores_caller_total() {
    let app = router().await;
    let (_, individual) =
      send(&app, "POST", "/individuals/resolve", Some(resolve_body("auth-1", "a@example.com"))).await;
    let individual_id = individual["individual_id"].as_str().unwrap().to_string();

    let (status, pledge) = send(
      &app,
      "POST",
      "/pledges",
      Some(json!({
        "individual_id": individual_id,
        "committed_on": "2024-03-01",
        "yearly_missionary_support": 1200.0,
        "yearly_special_support": 300.0,
        // Not part of the intake shape; must not override the derived value.
        "amount": 999999.0,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pledge["amount"], 1500.0);

    let (status, listed) =
      send(&app, "GET", &format!("/individuals/{individual_id}/pledges"), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["amount"], 1500.0);
  }
}
