//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings
//! (`2024-01-02T03:04:05.123456Z`) so that comparing the text compares the
//! instants; the list cursor relies on this. Account attributes are stored as
//! a compact JSON object.

use chrono::{DateTime, SecondsFormat, Utc};
use roster_core::member::{Account, Member};
use serde_json::{Map, Value};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Account attributes ──────────────────────────────────────────────────────

/// Attributes are flattened next to the account `id`, so they may not carry
/// one of their own.
fn check_attributes(attrs: &Map<String, Value>) -> Result<()> {
  if attrs.contains_key("id") {
    return Err(Error::ReservedAttribute);
  }
  Ok(())
}

pub fn encode_attributes(attrs: &Map<String, Value>) -> Result<String> {
  check_attributes(attrs)?;
  Ok(serde_json::to_string(attrs)?)
}

pub fn decode_attributes(s: &str) -> Result<Map<String, Value>> {
  match serde_json::from_str::<Value>(s)? {
    Value::Object(map) => {
      check_attributes(&map)?;
      Ok(map)
    }
    _ => Err(Error::AttributesNotObject),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `members` row joined with its account.
pub struct RawMember {
  pub member_id:                String,
  pub account_id:               String,
  pub created_at:               String,
  pub updated_at:               String,
  pub name:                     String,
  pub position:                 String,
  pub hire_date:                String,
  pub birth_date:               String,
  pub contact_number:           String,
  pub image:                    String,
  pub email:                    String,
  pub emergency_contact_number: String,
  pub address:                  String,
  pub notes:                    String,
  // accounts join
  pub account_attributes:       String,
}

impl RawMember {
  /// Read the columns of [`crate::store::MEMBER_SELECT`], in order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      member_id:                row.get(0)?,
      account_id:               row.get(1)?,
      created_at:               row.get(2)?,
      updated_at:               row.get(3)?,
      name:                     row.get(4)?,
      position:                 row.get(5)?,
      hire_date:                row.get(6)?,
      birth_date:               row.get(7)?,
      contact_number:           row.get(8)?,
      image:                    row.get(9)?,
      email:                    row.get(10)?,
      emergency_contact_number: row.get(11)?,
      address:                  row.get(12)?,
      notes:                    row.get(13)?,
      account_attributes:       row.get(14)?,
    })
  }

  pub fn into_member(self) -> Result<Member> {
    let account = Account {
      id:         self.account_id.clone(),
      attributes: decode_attributes(&self.account_attributes)?,
    };

    Ok(Member {
      id: self.member_id,
      account_id: self.account_id,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      name: self.name,
      position: self.position,
      hire_date: self.hire_date,
      birth_date: self.birth_date,
      contact_number: self.contact_number,
      image: self.image,
      email: self.email,
      emergency_contact_number: self.emergency_contact_number,
      address: self.address,
      notes: self.notes,
      account,
    })
  }
}

/// Raw strings read from an `accounts` row.
pub struct RawAccount {
  pub account_id: String,
  pub attributes: String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      id:         self.account_id,
      attributes: decode_attributes(&self.attributes)?,
    })
  }
}
