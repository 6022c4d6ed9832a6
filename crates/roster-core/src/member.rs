//! Member types: one row of the directory plus its embedded account.
//!
//! Every read returns the same fixed projection ([`Member`]). New store
//! columns stay invisible to callers until they are added here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Account ─────────────────────────────────────────────────────────────────

/// The account a member belongs to, embedded by value.
///
/// Roster does not interpret accounts. Whatever attributes were stored with
/// the account row are returned verbatim alongside its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
  pub id:         String,
  #[serde(flatten)]
  pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Input to `SqliteStore::add_account`.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
  pub id:         String,
  pub attributes: serde_json::Map<String, serde_json::Value>,
}

// ─── Member ──────────────────────────────────────────────────────────────────

/// The default selection: the only shape in which a member ever leaves the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
  pub id:                       String,
  pub account_id:               String,
  /// Store-assigned; the list sort key.
  pub created_at:               DateTime<Utc>,
  pub updated_at:               DateTime<Utc>,
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
  pub account:                  Account,
}

// ─── NewMember ───────────────────────────────────────────────────────────────

/// A validated create request, as handed to
/// [`crate::store::MemberStore::create`].
///
/// Timestamps are always set by the store; they are not accepted from callers.
/// `id` is `None` when the store should generate one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
  pub id:                       Option<String>,
  pub account_id:               String,
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
}
