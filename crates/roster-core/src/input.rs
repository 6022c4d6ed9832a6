//! Procedure inputs and their validation.
//!
//! Each procedure accepts a raw, deserialisable input struct carrying
//! [`validator`] bounds. Converting it into the matching request type runs the
//! checks; a failure is always [`Error::InvalidInput`] and happens before any
//! store access.

use serde::{Deserialize, Deserializer, de::Error as _};
use uuid::Uuid;
use validator::Validate;

use crate::{Error, Result, member::NewMember};

/// Page size used when `limit` is absent.
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page size a caller may request.
pub const MAX_LIMIT: usize = 100;

// ─── list ────────────────────────────────────────────────────────────────────

/// Raw input of the `list` procedure. `null` and absent are equivalent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListInput {
  #[serde(default, deserialize_with = "integral")]
  #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
  pub limit:  Option<i64>,
  /// The `id` of the first member of the requested page.
  pub cursor: Option<String>,
}

/// Accept any JSON number with no fractional part, so `2` and `2.0` both
/// mean two.
fn integral<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let Some(n) = Option::<serde_json::Number>::deserialize(deserializer)? else {
    return Ok(None);
  };
  if let Some(i) = n.as_i64() {
    return Ok(Some(i));
  }
  match n.as_f64() {
    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok(Some(f as i64)),
    _ => Err(D::Error::custom(format!("limit: expected an integer, got {n}"))),
  }
}

/// A validated `list` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
  pub limit:  usize,
  pub cursor: Option<String>,
}

impl Default for ListRequest {
  fn default() -> Self {
    Self {
      limit:  DEFAULT_LIMIT,
      cursor: None,
    }
  }
}

impl TryFrom<ListInput> for ListRequest {
  type Error = Error;

  fn try_from(input: ListInput) -> Result<Self> {
    input.validate()?;
    // The range check above keeps `limit` inside 1..=100.
    let limit = input.limit.map_or(DEFAULT_LIMIT, |l| l as usize);
    // An empty cursor means "from the start", as does an absent one.
    Ok(Self {
      limit,
      cursor: input.cursor.filter(|c| !c.is_empty()),
    })
  }
}

// ─── byId ────────────────────────────────────────────────────────────────────

/// Raw input of the `byId` procedure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ByIdInput {
  #[validate(length(min = 1, message = "must not be empty"))]
  pub id: String,
}

impl ByIdInput {
  /// Validate and return the requested id.
  pub fn into_id(self) -> Result<String> {
    self.validate()?;
    Ok(self.id)
  }
}

// ─── add ─────────────────────────────────────────────────────────────────────

/// Raw input of the `add` procedure. Unknown keys (including client-sent
/// timestamps) are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberInput {
  /// Optional caller-chosen id; must be a hyphenated UUID.
  pub id:                       Option<String>,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub account_id:               String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub name:                     String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub position:                 String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub hire_date:                String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub birth_date:               String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub contact_number:           String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub image:                    String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub email:                    String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub emergency_contact_number: String,
  #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
  pub address:                  String,
  #[validate(length(min = 1, message = "must not be empty"))]
  pub notes:                    String,
}

impl TryFrom<AddMemberInput> for NewMember {
  type Error = Error;

  fn try_from(input: AddMemberInput) -> Result<Self> {
    input.validate()?;
    if let Some(id) = &input.id {
      check_uuid(id)?;
    }
    Ok(NewMember {
      id:                       input.id,
      account_id:               input.account_id,
      name:                     input.name,
      position:                 input.position,
      hire_date:                input.hire_date,
      birth_date:               input.birth_date,
      contact_number:           input.contact_number,
      image:                    input.image,
      email:                    input.email,
      emergency_contact_number: input.emergency_contact_number,
      address:                  input.address,
      notes:                    input.notes,
    })
  }
}

/// Accept only the canonical 8-4-4-4-12 form; `Uuid::parse_str` alone also
/// takes braced, URN and unhyphenated spellings.
fn check_uuid(id: &str) -> Result<()> {
  let canonical = Uuid::parse_str(id)
    .ok()
    .filter(|u| u.hyphenated().to_string().eq_ignore_ascii_case(id));
  match canonical {
    Some(_) => Ok(()),
    None => Err(Error::InvalidInput(format!("id: {id:?} is not a valid UUID"))),
  }
}
