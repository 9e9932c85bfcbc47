//! Individual — a person tracked as a prospective or actual supporter.
//!
//! An individual may exist before the person ever signs in (entered by an
//! admin), in which case `auth_user_id` stays `None` until the resolver links
//! the record to an authentication identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person who may pledge financial or in-kind support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
  pub individual_id: Uuid,
  pub display_name:  String,
  /// Soft secondary key; the store additionally enforces uniqueness.
  pub email:         String,
  /// Normalised phone number, empty when unknown.
  pub phone:         String,
  /// Link field — the external authentication identity, `None` until linked.
  /// At most one individual per identity.
  pub auth_user_id:  Option<String>,
  pub created_at:    DateTime<Utc>,
}

impl Individual {
  /// Whether this record is linked to an authentication identity.
  pub fn is_linked(&self) -> bool {
    self.auth_user_id.is_some()
  }
}

/// Profile data supplied by the caller for the creation path of the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
  pub display_name: String,
  pub phone:        Option<String>,
}

/// Input for [`SupporterStore::insert_individual`](crate::store::SupporterStore).
///
/// `individual_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewIndividual {
  pub display_name: String,
  pub email:        String,
  pub phone:        String,
  pub auth_user_id: Option<String>,
}
