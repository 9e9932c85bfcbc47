//! Pledge — a recurring or one-time commitment made by an individual.
//!
//! Derived totals are computed server-side at insert time; callers never
//! supply the combined yearly amount. All optional intake fields collapse to
//! concrete defaults (`0`, `false`, `""`) so downstream aggregation never has
//! to special-case missing values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// ─── Enumerations ────────────────────────────────────────────────────────────

/// How often a recurring amount is given. Absent means one-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PledgeFrequency {
  Monthly,
  Quarterly,
  Annually,
}

impl PledgeFrequency {
  pub fn as_str(&self) -> &'static str {
    match self {
      PledgeFrequency::Monthly => "monthly",
      PledgeFrequency::Quarterly => "quarterly",
      PledgeFrequency::Annually => "annually",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "monthly" => Ok(PledgeFrequency::Monthly),
      "quarterly" => Ok(PledgeFrequency::Quarterly),
      "annually" => Ok(PledgeFrequency::Annually),
      other => Err(Error::UnknownFrequency(other.to_string())),
    }
  }
}

/// Fulfillment indicator, stored as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PledgeStatus {
  #[default]
  Open,
  InProgress,
  Fulfilled,
}

impl PledgeStatus {
  pub fn as_i64(&self) -> i64 {
    match self {
      PledgeStatus::Open => 0,
      PledgeStatus::InProgress => 1,
      PledgeStatus::Fulfilled => 2,
    }
  }

  pub fn from_i64(v: i64) -> Result<Self> {
    match v {
      0 => Ok(PledgeStatus::Open),
      1 => Ok(PledgeStatus::InProgress),
      2 => Ok(PledgeStatus::Fulfilled),
      other => Err(Error::UnknownStatus(other)),
    }
  }
}

// ─── Persisted record ────────────────────────────────────────────────────────

/// A persisted pledge. Owned by exactly one [`Individual`](crate::individual::Individual).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pledge {
  pub pledge_id:                 Uuid,
  pub individual_id:             Uuid,
  pub committed_on:              NaiveDate,
  pub missionary_count:          u32,
  pub frequency:                 Option<PledgeFrequency>,
  pub amount_per_frequency:      f64,
  pub special_amount:            f64,
  pub special_frequency:         Option<PledgeFrequency>,
  pub in_kind:                   bool,
  pub in_kind_details:           String,
  pub yearly_missionary_support: f64,
  pub yearly_special_support:    f64,
  /// Derived: `yearly_missionary_support + yearly_special_support`.
  pub amount:                    f64,
  pub status:                    PledgeStatus,
  pub created_at:                DateTime<Utc>,
}

// ─── Intake ──────────────────────────────────────────────────────────────────

/// Raw pledge intake as submitted by a supporter or admin. Everything beyond
/// the owner and the commitment date is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPledge {
  pub individual_id:             Uuid,
  pub committed_on:              NaiveDate,
  pub missionary_count:          Option<u32>,
  pub frequency:                 Option<PledgeFrequency>,
  pub amount_per_frequency:      Option<f64>,
  pub special_amount:            Option<f64>,
  pub special_frequency:         Option<PledgeFrequency>,
  pub in_kind:                   Option<bool>,
  pub in_kind_details:           Option<String>,
  pub yearly_missionary_support: Option<f64>,
  pub yearly_special_support:    Option<f64>,
  pub status:                    Option<PledgeStatus>,
}

/// A fully-defaulted pledge ready for insertion; produced by
/// [`NewPledge::normalize`]. The store persists these fields verbatim.
#[derive(Debug, Clone)]
pub struct PledgeFields {
  pub individual_id:             Uuid,
  pub committed_on:              NaiveDate,
  pub missionary_count:          u32,
  pub frequency:                 Option<PledgeFrequency>,
  pub amount_per_frequency:      f64,
  pub special_amount:            f64,
  pub special_frequency:         Option<PledgeFrequency>,
  pub in_kind:                   bool,
  pub in_kind_details:           String,
  pub yearly_missionary_support: f64,
  pub yearly_special_support:    f64,
  pub amount:                    f64,
  pub status:                    PledgeStatus,
}

/// A per-period amount only counts when it arrives together with a frequency;
/// a lone half of the pair collapses to zero rather than erroring.
fn paired_amount(frequency: Option<PledgeFrequency>, amount: Option<f64>) -> f64 {
  match (frequency, amount) {
    (Some(_), Some(a)) => a,
    _ => 0.0,
  }
}

impl NewPledge {
  /// Apply intake defaults and compute the derived combined yearly amount.
  pub fn normalize(self) -> PledgeFields {
    let yearly_missionary_support = self.yearly_missionary_support.unwrap_or(0.0);
    let yearly_special_support = self.yearly_special_support.unwrap_or(0.0);

    PledgeFields {
      individual_id:        self.individual_id,
      committed_on:         self.committed_on,
      missionary_count:     self.missionary_count.unwrap_or(0),
      frequency:            self.frequency,
      amount_per_frequency: paired_amount(self.frequency, self.amount_per_frequency),
      special_amount:       paired_amount(self.special_frequency, self.special_amount),
      special_frequency:    self.special_frequency,
      in_kind:              self.in_kind.unwrap_or(false),
      in_kind_details:      self.in_kind_details.unwrap_or_default(),
      yearly_missionary_support,
      yearly_special_support,
      amount:               yearly_missionary_support + yearly_special_support,
      status:               self.status.unwrap_or_default(),
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
