//! The `MemberStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! It is the relational collaborator: find-many-with-cursor, find-unique and
//! create, each a single round trip. Pagination itself lives in
//! [`crate::repo`], not in backends.

use std::future::Future;

use crate::member::{Member, NewMember};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`MemberStore::find_many`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindMany {
  /// Maximum number of rows to return.
  pub take:   usize,
  /// If set, the scan starts at (and includes) the member with this id.
  /// An id with no matching row yields no rows.
  pub cursor: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Roster member store backend.
///
/// Every read returns the fixed [`Member`] projection with its account
/// embedded. Backend errors convert into [`crate::Error`], which is where
/// constraint failures get their classification.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait MemberStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  /// Up to `query.take` members ordered newest-first: `created_at`
  /// descending, ties broken by `id` descending.
  fn find_many(
    &self,
    query: FindMany,
  ) -> impl Future<Output = Result<Vec<Member>, Self::Error>> + Send + '_;

  /// Retrieve a member by id. Returns `None` if not found.
  fn find_unique<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Member>, Self::Error>> + Send + 'a;

  /// Insert a member and return the stored projection.
  ///
  /// Generates a UUID v4 when `input.id` is `None`. Sets both timestamps.
  /// Returns an error if the id is already taken or the account is unknown.
  fn create(
    &self,
    input: NewMember,
  ) -> impl Future<Output = Result<Member, Self::Error>> + Send + '_;
}
