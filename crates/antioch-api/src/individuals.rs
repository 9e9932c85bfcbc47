//! Handlers for `/individuals` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/individuals/resolve` | 201 when a record is created, 200 otherwise |
//! | `GET`  | `/individuals` | Newest first |
//! | `GET`  | `/individuals/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use antioch_core::{
  directory::NullDirectory,
  individual::{Individual, Profile},
  resolve_or_create,
  store::SupporterStore,
};

use crate::error::ApiError;

// ─── Resolve ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResolveBody {
  pub auth_user_id: String,
  pub email:        String,
  /// Required only when no record matches by identity or email.
  #[serde(default)]
  pub profile:      Option<Profile>,
}

/// `POST /individuals/resolve`
///
/// Find-or-create the canonical individual for an authentication identity.
pub async fn resolve<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ResolveBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SupporterStore,
{
  let resolution = resolve_or_create(
    store.as_ref(),
    &NullDirectory,
    &body.auth_user_id,
    &body.email,
    body.profile.as_ref(),
  )
  .await
  .map_err(ApiError::from_resolve)?;

  let status = if resolution.is_created() {
    StatusCode::CREATED
  } else {
    StatusCode::OK
  };
  Ok((status, Json(resolution.into_individual())))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /individuals`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Individual>>, ApiError>
where
  S: SupporterStore,
{
  let individuals = store
    .list_individuals()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(individuals))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /individuals/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Individual>, ApiError>
where
  S: SupporterStore,
{
  let individual = store
    .get_individual(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("individual {id} not found")))?;
  Ok(Json(individual))
}
