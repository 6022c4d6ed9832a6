//! [`SqliteStore`], the SQLite implementation of [`MemberStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  member::{Account, Member, NewAccount, NewMember},
  store::{FindMany, MemberStore},
};

use crate::{
  Error, Result,
  encode::{RawAccount, RawMember, encode_attributes, encode_dt},
  error::is_unique_violation,
  schema::SCHEMA,
};

/// The default selection, joined with the owning account. Column order is
/// what [`RawMember::from_row`] reads.
pub(crate) const MEMBER_SELECT: &str = "
  SELECT
    m.member_id, m.account_id, m.created_at, m.updated_at,
    m.name, m.position, m.hire_date, m.birth_date,
    m.contact_number, m.image, m.email, m.emergency_contact_number,
    m.address, m.notes,
    a.attributes_json
  FROM members m
  JOIN accounts a ON a.account_id = m.account_id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster member store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
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

  // ── Accounts ──────────────────────────────────────────────────────────────

  /// Persist an account that members can then reference.
  ///
  /// Accounts are not part of the procedure surface; they are provisioned
  /// out of band (the server's `--add-account` helper, tests).
  pub async fn add_account(&self, input: NewAccount) -> Result<Account> {
    let id_str    = input.id.clone();
    let at_str    = encode_dt(Utc::now());
    let attrs_str = encode_attributes(&input.attributes)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO accounts (account_id, created_at, attributes_json)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, at_str, attrs_str],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::DuplicateAccount(input.id.clone())
        } else {
          Error::Database(e)
        }
      })?;

    Ok(Account {
      id:         input.id,
      attributes: input.attributes,
    })
  }

  /// Retrieve an account by id. Returns `None` if not found.
  pub async fn get_account(&self, id: &str) -> Result<Option<Account>> {
    let id_str = id.to_owned();

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT account_id, attributes_json FROM accounts WHERE account_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawAccount {
                  account_id: row.get(0)?,
                  attributes: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }
}

// ─── MemberStore impl ────────────────────────────────────────────────────────

impl MemberStore for SqliteStore {
  type Error = Error;

  async fn find_many(&self, query: FindMany) -> Result<Vec<Member>> {
    let cursor = query.cursor;
    let take   = i64::try_from(query.take).unwrap_or(i64::MAX);

    let raws: Vec<RawMember> = self
      .conn
      .call(move |conn| {
        // The cursor row itself satisfies `<=`, so it leads the page. A
        // cursor id with no row makes the subquery NULL and matches nothing.
        let sql = format!(
          "{MEMBER_SELECT}
           WHERE ?1 IS NULL
              OR (m.created_at, m.member_id) <= (
                   SELECT c.created_at, c.member_id
                   FROM members c
                   WHERE c.member_id = ?1
                 )
           ORDER BY m.created_at DESC, m.member_id DESC
           LIMIT ?2"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![cursor.as_deref(), take],
            RawMember::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMember::into_member).collect()
  }

  async fn find_unique(&self, id: &str) -> Result<Option<Member>> {
    let id_str = id.to_owned();

    let raw: Option<RawMember> = self
      .conn
      .call(move |conn| {
        let sql = format!("{MEMBER_SELECT} WHERE m.member_id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawMember::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMember::into_member).transpose()
  }

  async fn create(&self, input: NewMember) -> Result<Member> {
    let member_id  = input.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let account_id = input.account_id;
    let now_str    = encode_dt(Utc::now());

    let id_str      = member_id.clone();
    let account_str = account_id.clone();
    let fields = [
      input.name,
      input.position,
      input.hire_date,
      input.birth_date,
      input.contact_number,
      input.image,
      input.email,
      input.emergency_contact_number,
      input.address,
      input.notes,
    ];

    // `None` means the account does not exist; nothing was written.
    let raw: Option<RawMember> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let account_exists = tx
          .query_row(
            "SELECT 1 FROM accounts WHERE account_id = ?1",
            rusqlite::params![account_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !account_exists {
          return Ok(None);
        }

        let [
          name,
          position,
          hire_date,
          birth_date,
          contact_number,
          image,
          email,
          emergency_contact_number,
          address,
          notes,
        ] = fields;

        tx.execute(
          "INSERT INTO members (
             member_id, account_id, created_at, updated_at,
             name, position, hire_date, birth_date,
             contact_number, image, email, emergency_contact_number,
             address, notes
           ) VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            id_str,
            account_str,
            now_str,
            name,
            position,
            hire_date,
            birth_date,
            contact_number,
            image,
            email,
            emergency_contact_number,
            address,
            notes,
          ],
        )?;

        let sql = format!("{MEMBER_SELECT} WHERE m.member_id = ?1");
        let raw = tx.query_row(&sql, rusqlite::params![id_str], RawMember::from_row)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::DuplicateMember(member_id.clone())
        } else {
          Error::Database(e)
        }
      })?;

    raw
      .ok_or(Error::AccountNotFound(account_id))?
      .into_member()
  }
}
