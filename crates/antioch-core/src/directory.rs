//! The [`AuthDirectory`] seam to the external authentication provider.
//!
//! After creating an individual, the resolver writes the new record's id back
//! onto the identity's provider-side metadata. The write is best-effort: a
//! failure is logged and swallowed, never failing the resolution itself.

use std::convert::Infallible;
use std::future::Future;

use uuid::Uuid;

/// Auxiliary metadata writes against the authentication provider.
pub trait AuthDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Record `individual_id` on the identity `auth_user_id`.
  fn record_individual<'a>(
    &'a self,
    auth_user_id: &'a str,
    individual_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// A directory that records nothing. Used when no provider is configured and
/// in tests that do not care about the side write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDirectory;

impl AuthDirectory for NullDirectory {
  type Error = Infallible;

  async fn record_individual(
    &self,
    _auth_user_id: &str,
    _individual_id: Uuid,
  ) -> Result<(), Infallible> {
    Ok(())
  }
}
