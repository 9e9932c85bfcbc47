//! The `SupporterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `antioch-store-sqlite`).
//! Higher layers (`antioch-api`, the resolver) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  individual::{Individual, NewIndividual},
  pledge::{NewPledge, Pledge},
};

/// Error type contract for store backends.
///
/// The resolver needs to tell a lost insert race (a unique-constraint
/// violation on `email` or `auth_user_id`) apart from every other failure, so
/// it can re-drive the lookup instead of surfacing an error.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_unique_violation(&self) -> bool;
}

/// Abstraction over an Antioch supporter store backend.
///
/// Backends enforce uniqueness over `individuals.email` and
/// `individuals.auth_user_id`; the insert is the arbiter under concurrency and
/// a lost race surfaces as a unique-violation error (see [`StoreError`]).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SupporterStore: Send + Sync {
  type Error: StoreError;

  // ── Individuals ───────────────────────────────────────────────────────

  /// Find the individual linked to an authentication identity.
  fn find_individual_by_auth_id<'a>(
    &'a self,
    auth_user_id: &'a str,
  ) -> impl Future<Output = Result<Option<Individual>, Self::Error>> + Send + 'a;

  /// Find an individual by email, the soft secondary key.
  fn find_individual_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Individual>, Self::Error>> + Send + 'a;

  /// Retrieve an individual by id. Returns `None` if not found.
  fn get_individual(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Individual>, Self::Error>> + Send + '_;

  /// List all individuals, newest first.
  fn list_individuals(
    &self,
  ) -> impl Future<Output = Result<Vec<Individual>, Self::Error>> + Send + '_;

  /// Create and persist a new individual. The id and creation timestamp are
  /// assigned by the store. Fails with a unique violation when another record
  /// already holds the email or the auth identity.
  fn insert_individual(
    &self,
    input: NewIndividual,
  ) -> impl Future<Output = Result<Individual, Self::Error>> + Send + '_;

  /// Compare-and-swap the link field: set `auth_user_id` only if it is
  /// currently unset, then return the post-attempt row. A concurrent linker
  /// winning the swap is not an error; the surviving link is returned.
  fn link_individual<'a>(
    &'a self,
    id: Uuid,
    auth_user_id: &'a str,
  ) -> impl Future<Output = Result<Individual, Self::Error>> + Send + 'a;

  // ── Pledges ───────────────────────────────────────────────────────────

  /// Normalise intake fields (defaults, derived combined amount) and persist
  /// the pledge.
  fn insert_pledge(
    &self,
    input: NewPledge,
  ) -> impl Future<Output = Result<Pledge, Self::Error>> + Send + '_;

  /// All pledges for one individual, descending commitment date.
  fn list_pledges(
    &self,
    individual_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Pledge>, Self::Error>> + Send + '_;
}
