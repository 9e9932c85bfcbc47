//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as ISO 8601, UUIDs as
//! hyphenated lowercase strings, pledge frequencies as their lowercase names
//! and pledge statuses as small integers.

use antioch_core::{
  individual::Individual,
  pledge::{Pledge, PledgeFrequency, PledgeStatus},
};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> / NaiveDate ───────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

// ─── PledgeFrequency / PledgeStatus ──────────────────────────────────────────

pub fn encode_frequency(f: Option<PledgeFrequency>) -> Option<&'static str> {
  f.map(|f| f.as_str())
}

pub fn decode_frequency(s: Option<&str>) -> Result<Option<PledgeFrequency>> {
  Ok(s.map(PledgeFrequency::parse).transpose()?)
}

pub fn decode_status(v: i64) -> Result<PledgeStatus> {
  Ok(PledgeStatus::from_i64(v)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `individuals` row.
pub struct RawIndividual {
  pub individual_id: String,
  pub display_name:  String,
  pub email:         String,
  pub phone:         String,
  pub auth_user_id:  Option<String>,
  pub created_at:    String,
}

impl RawIndividual {
  pub fn into_individual(self) -> Result<Individual> {
    Ok(Individual {
      individual_id: decode_uuid(&self.individual_id)?,
      display_name:  self.display_name,
      email:         self.email,
      phone:         self.phone,
      auth_user_id:  self.auth_user_id,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `pledges` row.
pub struct RawPledge {
  pub pledge_id:                 String,
  pub individual_id:             String,
  pub committed_on:              String,
  pub missionary_count:          i64,
  pub frequency:                 Option<String>,
  pub amount_per_frequency:      f64,
  pub special_amount:            f64,
  pub special_frequency:         Option<String>,
  pub in_kind:                   bool,
  pub in_kind_details:           String,
  pub yearly_missionary_support: f64,
  pub yearly_special_support:    f64,
  pub amount:                    f64,
  pub status:                    i64,
  pub created_at:                String,
}

impl RawPledge {
  pub fn into_pledge(self) -> Result<Pledge> {
    Ok(Pledge {
      pledge_id:                 decode_uuid(&self.pledge_id)?,
      individual_id:             decode_uuid(&self.individual_id)?,
      committed_on:              decode_date(&self.committed_on)?,
      missionary_count:          self.missionary_count as u32,
      frequency:                 decode_frequency(self.frequency.as_deref())?,
      amount_per_frequency:      self.amount_per_frequency,
      special_amount:            self.special_amount,
      special_frequency:         decode_frequency(self.special_frequency.as_deref())?,
      in_kind:                   self.in_kind,
      in_kind_details:           self.in_kind_details,
      yearly_missionary_support: self.yearly_missionary_support,
      yearly_special_support:    self.yearly_special_support,
      amount:                    self.amount,
      status:                    decode_status(self.status)?,
      created_at:                decode_dt(&self.created_at)?,
    })
  }
}
