//! [`SqliteStore`] — the SQLite implementation of [`SupporterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use antioch_core::{
  individual::{Individual, NewIndividual},
  pledge::{NewPledge, Pledge},
  store::SupporterStore,
};

use crate::{
  Error, Result,
  encode::{
    RawIndividual, RawPledge, encode_date, encode_dt, encode_frequency, encode_uuid,
  },
  schema::SCHEMA,
};

const INDIVIDUAL_COLUMNS: &str =
  "individual_id, display_name, email, phone, auth_user_id, created_at";

const PLEDGE_COLUMNS: &str = "pledge_id, individual_id, committed_on, \
   missionary_count, frequency, amount_per_frequency, special_amount, \
   special_frequency, in_kind, in_kind_details, yearly_missionary_support, \
   yearly_special_support, amount, status, created_at";

fn read_individual(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawIndividual> {
  Ok(RawIndividual {
    individual_id: row.get(0)?,
    display_name:  row.get(1)?,
    email:         row.get(2)?,
    phone:         row.get(3)?,
    auth_user_id:  row.get(4)?,
    created_at:    row.get(5)?,
  })
}

fn read_pledge(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPledge> {
  Ok(RawPledge {
    pledge_id:                 row.get(0)?,
    individual_id:             row.get(1)?,
    committed_on:              row.get(2)?,
    missionary_count:          row.get(3)?,
    frequency:                 row.get(4)?,
    amount_per_frequency:      row.get(5)?,
    special_amount:            row.get(6)?,
    special_frequency:         row.get(7)?,
    in_kind:                   row.get(8)?,
    in_kind_details:           row.get(9)?,
    yearly_missionary_support: row.get(10)?,
    yearly_special_support:    row.get(11)?,
    amount:                    row.get(12)?,
    status:                    row.get(13)?,
    created_at:                row.get(14)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Antioch supporter store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch one individual by an arbitrary TEXT column equality.
  async fn find_individual_where(
    &self,
    column: &'static str,
    value: String,
  ) -> Result<Option<Individual>> {
    let raw: Option<RawIndividual> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {INDIVIDUAL_COLUMNS} FROM individuals WHERE {column} = ?1"
              ),
              rusqlite::params![value],
              read_individual,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawIndividual::into_individual).transpose()
  }
}

// ─── SupporterStore impl ─────────────────────────────────────────────────────

impl SupporterStore for SqliteStore {
  type Error = Error;

  // ── Individuals ───────────────────────────────────────────────────────────

  async fn find_individual_by_auth_id(
    &self,
    auth_user_id: &str,
  ) -> Result<Option<Individual>> {
    self
      .find_individual_where("auth_user_id", auth_user_id.to_string())
      .await
  }

  async fn find_individual_by_email(&self, email: &str) -> Result<Option<Individual>> {
    self.find_individual_where("email", email.to_string()).await
  }

  async fn get_individual(&self, id: Uuid) -> Result<Option<Individual>> {
    self
      .find_individual_where("individual_id", encode_uuid(id))
      .await
  }

  async fn list_individuals(&self) -> Result<Vec<Individual>> {
    let raws: Vec<RawIndividual> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {INDIVIDUAL_COLUMNS} FROM individuals ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map([], read_individual)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIndividual::into_individual).collect()
  }

  async fn insert_individual(&self, input: NewIndividual) -> Result<Individual> {
    let individual = Individual {
      individual_id: Uuid::new_v4(),
      display_name:  input.display_name,
      email:         input.email,
      phone:         input.phone,
      auth_user_id:  input.auth_user_id,
      created_at:    Utc::now(),
    };

    let id_str       = encode_uuid(individual.individual_id);
    let display_name = individual.display_name.clone();
    let email        = individual.email.clone();
    let phone        = individual.phone.clone();
    let auth_user_id = individual.auth_user_id.clone();
    let at_str       = encode_dt(individual.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO individuals (individual_id, display_name, email, phone, auth_user_id, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, display_name, email, phone, auth_user_id, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(individual)
  }

  async fn link_individual(&self, id: Uuid, auth_user_id: &str) -> Result<Individual> {
    let id_str   = encode_uuid(id);
    let auth_str = auth_user_id.to_string();

    // Compare-and-swap: only an unlinked row takes the new identity. The
    // re-read in the same connection call returns whichever link survived.
    let raw: Option<RawIndividual> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE individuals SET auth_user_id = ?1
           WHERE individual_id = ?2 AND auth_user_id IS NULL",
          rusqlite::params![auth_str, id_str],
        )?;

        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {INDIVIDUAL_COLUMNS} FROM individuals WHERE individual_id = ?1"
              ),
              rusqlite::params![id_str],
              read_individual,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::IndividualNotFound(id))?
      .into_individual()
  }

  // ── Pledges ───────────────────────────────────────────────────────────────

  async fn insert_pledge(&self, input: NewPledge) -> Result<Pledge> {
    let fields = input.normalize();

    let pledge = Pledge {
      pledge_id:                 Uuid::new_v4(),
      individual_id:             fields.individual_id,
      committed_on:              fields.committed_on,
      missionary_count:          fields.missionary_count,
      frequency:                 fields.frequency,
      amount_per_frequency:      fields.amount_per_frequency,
      special_amount:            fields.special_amount,
      special_frequency:         fields.special_frequency,
      in_kind:                   fields.in_kind,
      in_kind_details:           fields.in_kind_details,
      yearly_missionary_support: fields.yearly_missionary_support,
      yearly_special_support:    fields.yearly_special_support,
      amount:                    fields.amount,
      status:                    fields.status,
      created_at:                Utc::now(),
    };

    let pledge_id_str     = encode_uuid(pledge.pledge_id);
    let individual_id_str = encode_uuid(pledge.individual_id);
    let committed_on_str  = encode_date(pledge.committed_on);
    let missionary_count  = pledge.missionary_count as i64;
    let frequency_str     = encode_frequency(pledge.frequency);
    let amount_per_freq   = pledge.amount_per_frequency;
    let special_amount    = pledge.special_amount;
    let special_freq_str  = encode_frequency(pledge.special_frequency);
    let in_kind           = pledge.in_kind;
    let in_kind_details   = pledge.in_kind_details.clone();
    let yearly_missionary = pledge.yearly_missionary_support;
    let yearly_special    = pledge.yearly_special_support;
    let amount            = pledge.amount;
    let status            = pledge.status.as_i64();
    let created_at_str    = encode_dt(pledge.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO pledges ({PLEDGE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
          ),
          rusqlite::params![
            pledge_id_str,
            individual_id_str,
            committed_on_str,
            missionary_count,
            frequency_str,
            amount_per_freq,
            special_amount,
            special_freq_str,
            in_kind,
            in_kind_details,
            yearly_missionary,
            yearly_special,
            amount,
            status,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(pledge)
  }

  async fn list_pledges(&self, individual_id: Uuid) -> Result<Vec<Pledge>> {
    let id_str = encode_uuid(individual_id);

    let raws: Vec<RawPledge> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PLEDGE_COLUMNS} FROM pledges
           WHERE individual_id = ?1
           ORDER BY committed_on DESC, created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_pledge)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPledge::into_pledge).collect()
  }
}
