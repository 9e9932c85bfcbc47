//! Handlers for pledge endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/pledges` | Derived totals computed server-side |
//! | `GET`  | `/individuals/:id/pledges` | Descending commitment date |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;

use antioch_core::{
  pledge::{NewPledge, Pledge},
  store::SupporterStore,
};

use crate::error::ApiError;

/// `POST /pledges`
///
/// The body is raw intake; the store applies the defaulting rules and
/// computes the combined yearly amount. Any `amount` supplied by the caller
/// is not part of the intake shape and is ignored by deserialisation.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPledge>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SupporterStore,
{
  let pledge = store
    .insert_pledge(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(pledge)))
}

/// `GET /individuals/:id/pledges`
pub async fn list_for_individual<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Pledge>>, ApiError>
where
  S: SupporterStore,
{
  let pledges = store
    .list_pledges(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(pledges))
}
