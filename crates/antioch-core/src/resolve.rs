//! Identity resolution — find-or-create the canonical individual for an
//! authentication identity.
//!
//! Three-phase lookup with short-circuit, in a significant order:
//!
//! 1. by auth identity (the fast path for already-linked users),
//! 2. by email, linking an unlinked match in place,
//! 3. create from the supplied profile.
//!
//! Identity must be checked before email: a person may change their
//! registered email after signup, and resolving on email alone would silently
//! fork their record. Exactly one of {existing, linked, created, error}
//! happens per call.
//!
//! The store enforces uniqueness over both `email` and `auth_user_id`, making
//! the insert the arbiter under concurrency: a call that loses the insert
//! race re-drives the lookup once and lands on the surviving record.

use thiserror::Error;
use tracing::warn;

use crate::{
  directory::AuthDirectory,
  individual::{Individual, NewIndividual, Profile},
  phone::normalize_phone,
  store::{StoreError, SupporterStore},
};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// How the canonical individual was arrived at.
#[derive(Debug, Clone)]
pub enum Resolution {
  /// Found directly; nothing was written.
  Existing(Individual),
  /// Found by email with no link; the link field was set to the caller's
  /// identity.
  Linked(Individual),
  /// No match; a new record was inserted.
  Created(Individual),
}

impl Resolution {
  pub fn individual(&self) -> &Individual {
    match self {
      Resolution::Existing(i) | Resolution::Linked(i) | Resolution::Created(i) => i,
    }
  }

  pub fn into_individual(self) -> Individual {
    match self {
      Resolution::Existing(i) | Resolution::Linked(i) | Resolution::Created(i) => i,
    }
  }

  pub fn is_created(&self) -> bool {
    matches!(self, Resolution::Created(_))
  }
}

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ResolveError<E: StoreError> {
  /// Caller-contract violation: the identity is required and non-empty.
  #[error("authentication identity must not be empty")]
  EmptyIdentity,

  /// Caller-contract violation, not a transient failure: phase C was reached
  /// without profile data.
  #[error("no existing record and no profile data to create one")]
  InsufficientData,

  /// Both the lookup and the re-driven lookup after a lost insert race came
  /// up empty. Concurrent create/delete traffic on the same person.
  #[error("identity resolution contended, retry")]
  Contended,

  #[error(transparent)]
  Store(#[from] E),
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Find-or-create the canonical [`Individual`] for `auth_user_id`/`email`.
///
/// `profile` is only required on the creation path; reaching phase C without
/// it fails with [`ResolveError::InsufficientData`].
///
/// On the creation path the new individual's id is written back to
/// `directory` best-effort — a failure there is logged and swallowed.
pub async fn resolve_or_create<S, D>(
  store: &S,
  directory: &D,
  auth_user_id: &str,
  email: &str,
  profile: Option<&Profile>,
) -> Result<Resolution, ResolveError<S::Error>>
where
  S: SupporterStore,
  D: AuthDirectory,
{
  if auth_user_id.is_empty() {
    return Err(ResolveError::EmptyIdentity);
  }

  // Two passes: the second only runs after a lost insert race, when the
  // surviving record is guaranteed visible to the lookup.
  for _ in 0..2 {
    // Phase A — by identity.
    if let Some(found) = store.find_individual_by_auth_id(auth_user_id).await? {
      return Ok(Resolution::Existing(found));
    }

    // Phase B — by email.
    if let Some(found) = store.find_individual_by_email(email).await? {
      if found.auth_user_id.is_none() {
        let linked = store
          .link_individual(found.individual_id, auth_user_id)
          .await?;
        if linked.auth_user_id.as_deref() == Some(auth_user_id) {
          return Ok(Resolution::Linked(linked));
        }
        // The swap lost to a concurrent linker; the surviving link wins.
        return Ok(Resolution::Existing(linked));
      }
      // Already linked, possibly to a different identity: the existing link
      // wins. Not an error, not an overwrite.
      return Ok(Resolution::Existing(found));
    }

    // Phase C — create.
    let Some(profile) = profile else {
      return Err(ResolveError::InsufficientData);
    };

    let input = NewIndividual {
      display_name: profile.display_name.clone(),
      email:        email.to_string(),
      phone:        profile
        .phone
        .as_deref()
        .map(normalize_phone)
        .unwrap_or_default(),
      auth_user_id: Some(auth_user_id.to_string()),
    };

    match store.insert_individual(input).await {
      Ok(created) => {
        record_in_directory(directory, auth_user_id, &created).await;
        return Ok(Resolution::Created(created));
      }
      // Lost the race to a concurrent creator; re-drive the lookup.
      Err(e) if e.is_unique_violation() => continue,
      Err(e) => return Err(ResolveError::Store(e)),
    }
  }

  Err(ResolveError::Contended)
}

/// Best-effort side write; never fails the resolution.
async fn record_in_directory<D: AuthDirectory>(
  directory: &D,
  auth_user_id: &str,
  individual: &Individual,
) {
  if let Err(e) = directory
    .record_individual(auth_user_id, individual.individual_id)
    .await
  {
    warn!(
      auth_user_id,
      individual_id = %individual.individual_id,
      error = %e,
      "failed to record individual id on auth identity"
    );
  }
}
