//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Accounts are owned by whatever signs users in; members only point at them.
CREATE TABLE IF NOT EXISTS accounts (
    account_id      TEXT PRIMARY KEY,
    created_at      TEXT NOT NULL,
    attributes_json TEXT NOT NULL DEFAULT '{}'   -- opaque JSON object
);

CREATE TABLE IF NOT EXISTS members (
    member_id                TEXT PRIMARY KEY,
    account_id               TEXT NOT NULL REFERENCES accounts(account_id),
    created_at               TEXT NOT NULL,   -- RFC 3339 UTC, micros; store-assigned
    updated_at               TEXT NOT NULL,
    name                     TEXT NOT NULL,
    position                 TEXT NOT NULL,
    hire_date                TEXT NOT NULL,
    birth_date               TEXT NOT NULL,
    contact_number           TEXT NOT NULL,
    image                    TEXT NOT NULL,
    email                    TEXT NOT NULL,
    emergency_contact_number TEXT NOT NULL,
    address                  TEXT NOT NULL,
    notes                    TEXT NOT NULL
);

-- Serves the newest-first list scan and its (created_at, member_id) cursor.
CREATE INDEX IF NOT EXISTS members_created_idx ON members(created_at, member_id);
CREATE INDEX IF NOT EXISTS members_account_idx ON members(account_id);

PRAGMA user_version = 1;
";
