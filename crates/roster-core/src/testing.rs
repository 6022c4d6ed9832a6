//! In-memory [`MemberStore`] used by this crate's unit tests.

use std::sync::{
  Mutex,
  atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
  member::{Account, Member, NewMember},
  store::{FindMany, MemberStore},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("duplicate member id {0}")]
  Duplicate(String),
}

impl From<MemoryError> for crate::Error {
  fn from(e: MemoryError) -> Self {
    match e {
      MemoryError::Duplicate(_) => crate::Error::Conflict(e.to_string()),
    }
  }
}

/// Rows kept newest-first. Each create advances a fake clock by one second so
/// ordering never depends on wall-clock resolution.
#[derive(Default)]
pub struct MemoryStore {
  rows:  Mutex<Vec<Member>>,
  clock: AtomicI64,
}

impl MemoryStore {
  pub fn new_member(name: &str) -> NewMember {
    NewMember {
      id:                       None,
      account_id:               "acct-1".into(),
      name:                     name.into(),
      position:                 "Engineer".into(),
      hire_date:                "2021-04-01".into(),
      birth_date:               "1990-02-03".into(),
      contact_number:           "+1 555 0100".into(),
      image:                    "avatar.png".into(),
      email:                    "someone@example.com".into(),
      emergency_contact_number: "+1 555 0199".into(),
      address:                  "1 Main St".into(),
      notes:                    "n/a".into(),
    }
  }

  fn tick(&self) -> DateTime<Utc> {
    let n = self.clock.fetch_add(1, Ordering::SeqCst);
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(n)
  }
}

impl MemberStore for MemoryStore {
  type Error = MemoryError;

  async fn find_many(&self, query: FindMany) -> Result<Vec<Member>, MemoryError> {
    let rows = self.rows.lock().unwrap();
    let start = match &query.cursor {
      Some(id) => match rows.iter().position(|m| &m.id == id) {
        Some(pos) => pos,
        None => return Ok(Vec::new()),
      },
      None => 0,
    };
    Ok(rows.iter().skip(start).take(query.take).cloned().collect())
  }

  async fn find_unique(&self, id: &str) -> Result<Option<Member>, MemoryError> {
    let rows = self.rows.lock().unwrap();
    Ok(rows.iter().find(|m| m.id == id).cloned())
  }

  async fn create(&self, input: NewMember) -> Result<Member, MemoryError> {
    let id = input.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut rows = self.rows.lock().unwrap();
    if rows.iter().any(|m| m.id == id) {
      return Err(MemoryError::Duplicate(id));
    }
    let now = self.tick();
    let member = Member {
      id,
      account: Account {
        id:         input.account_id.clone(),
        attributes: Default::default(),
      },
      account_id: input.account_id,
      created_at: now,
      updated_at: now,
      name: input.name,
      position: input.position,
      hire_date: input.hire_date,
      birth_date: input.birth_date,
      contact_number: input.contact_number,
      image: input.image,
      email: input.email,
      emergency_contact_number: input.emergency_contact_number,
      address: input.address,
      notes: input.notes,
    };
    rows.insert(0, member.clone());
    Ok(member)
  }
}
