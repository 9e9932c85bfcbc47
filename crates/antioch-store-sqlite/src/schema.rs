//! SQL schema for the Antioch SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraints on `individuals.email` and
/// `individuals.auth_user_id` make the insert the arbiter under concurrent
/// resolution: a second creator for the same person fails with
/// SQLITE_CONSTRAINT_UNIQUE instead of forking the record.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS individuals (
    individual_id TEXT PRIMARY KEY,
    display_name  TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    phone         TEXT NOT NULL DEFAULT '',
    auth_user_id  TEXT UNIQUE,     -- NULL until linked to an auth identity
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE TABLE IF NOT EXISTS pledges (
    pledge_id                 TEXT    PRIMARY KEY,
    individual_id             TEXT    NOT NULL REFERENCES individuals(individual_id),
    committed_on              TEXT    NOT NULL,  -- ISO 8601 date
    missionary_count          INTEGER NOT NULL DEFAULT 0,
    frequency                 TEXT,              -- 'monthly'|'quarterly'|'annually', NULL = one-time
    amount_per_frequency      REAL    NOT NULL DEFAULT 0,
    special_amount            REAL    NOT NULL DEFAULT 0,
    special_frequency         TEXT,
    in_kind                   INTEGER NOT NULL DEFAULT 0,
    in_kind_details           TEXT    NOT NULL DEFAULT '',
    yearly_missionary_support REAL    NOT NULL DEFAULT 0,
    yearly_special_support    REAL    NOT NULL DEFAULT 0,
    amount                    REAL    NOT NULL DEFAULT 0,  -- derived, never caller-supplied
    status                    INTEGER NOT NULL DEFAULT 0,
    created_at                TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS individuals_email_idx   ON individuals(email);
CREATE INDEX IF NOT EXISTS individuals_auth_idx    ON individuals(auth_user_id);
CREATE INDEX IF NOT EXISTS pledges_individual_idx  ON pledges(individual_id, committed_on DESC);

PRAGMA user_version = 1;
";
