//! Member repository access: validated requests in, typed outcomes out.
//!
//! Each method is exactly one store round trip. Absence on `by_id` is turned
//! into [`Error::NotFound`]; store failures are converted through the
//! backend's `Into<Error>` and otherwise passed through untouched.

use std::sync::Arc;

use crate::{
  Error, Result,
  input::ListRequest,
  member::{Member, NewMember},
  pagination::{Page, fetch_size, paginate},
  store::{FindMany, MemberStore},
};

/// Repository over any [`MemberStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct MemberRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for MemberRepository<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: MemberStore> MemberRepository<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// One page, oldest-first, scanning from `req.cursor` towards older rows.
  pub async fn list(&self, req: ListRequest) -> Result<Page<Member>> {
    let rows = self
      .store
      .find_many(FindMany {
        take:   fetch_size(req.limit),
        cursor: req.cursor,
      })
      .await
      .map_err(Into::<Error>::into)?;
    Ok(paginate(rows, req.limit, |m| m.id.clone()))
  }

  pub async fn by_id(&self, id: &str) -> Result<Member> {
    self
      .store
      .find_unique(id)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::NotFound(format!("No member with id '{id}'")))
  }

  pub async fn add(&self, input: NewMember) -> Result<Member> {
    self.store.create(input).await.map_err(Into::into)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;
  use crate::{ErrorCode, testing::MemoryStore};

  async fn seeded(n: usize) -> (MemberRepository<MemoryStore>, Vec<Member>) {
    let repo = MemberRepository::new(Arc::new(MemoryStore::default()));
    let mut created = Vec::new();
    for i in 0..n {
      let m = repo.add(MemoryStore::new_member(&format!("m{i}"))).await.unwrap();
      created.push(m);
    }
    (repo, created)
  }

  fn req(limit: usize, cursor: Option<String>) -> ListRequest {
    ListRequest { limit, cursor }
  }

  #[tokio::test]
  async fn empty_store_lists_nothing() {
    let (repo, _) = seeded(0).await;
    let page = repo.list(ListRequest::default()).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_cursor.is_none());
  }

  #[tokio::test]
  async fn three_members_two_per_page() {
    let (repo, created) = seeded(3).await;
    let (a, b, c) = (&created[0], &created[1], &created[2]);

    let first = repo.list(req(2, None)).await.unwrap();
    assert_eq!(first.items, vec![b.clone(), c.clone()]);
    assert_eq!(first.next_cursor.as_deref(), Some(a.id.as_str()));

    let second = repo.list(req(2, first.next_cursor)).await.unwrap();
    assert_eq!(second.items, vec![a.clone()]);
    assert!(second.next_cursor.is_none());
  }

  #[tokio::test]
  async fn chained_pages_cover_every_member_once() {
    for (n, limit) in [(1, 1), (7, 3), (10, 5), (10, 10), (11, 4), (25, 100)] {
      let (repo, created) = seeded(n).await;

      let mut pages = Vec::new();
      let mut cursor = None;
      loop {
        let page = repo.list(req(limit, cursor)).await.unwrap();
        assert!(page.items.len() <= limit);
        cursor = page.next_cursor.clone();
        pages.push(page.items);
        if cursor.is_none() {
          break;
        }
      }

      let seen: Vec<&str> = pages.iter().flatten().map(|m| m.id.as_str()).collect();
      let unique: HashSet<&str> = seen.iter().copied().collect();
      assert_eq!(seen.len(), n, "n={n} limit={limit}");
      assert_eq!(unique.len(), n, "n={n} limit={limit}");

      // Pages walk backwards in time; each page is oldest-first.
      let ascending: Vec<Member> = pages.into_iter().rev().flatten().collect();
      assert_eq!(ascending, created, "n={n} limit={limit}");
    }
  }

  #[tokio::test]
  async fn cursor_present_iff_rows_remain() {
    let (repo, _) = seeded(4).await;
    assert!(repo.list(req(3, None)).await.unwrap().next_cursor.is_some());
    assert!(repo.list(req(4, None)).await.unwrap().next_cursor.is_none());
    assert!(repo.list(req(5, None)).await.unwrap().next_cursor.is_none());
  }

  #[tokio::test]
  async fn unknown_cursor_gives_empty_page() {
    let (repo, _) = seeded(3).await;
    let page = repo.list(req(2, Some("nope".into()))).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_cursor.is_none());
  }

  #[tokio::test]
  async fn by_id_found_and_missing() {
    let (repo, created) = seeded(2).await;

    let found = repo.by_id(&created[1].id).await.unwrap();
    assert_eq!(found.id, created[1].id);

    let err = repo.by_id("missing").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.to_string(), "No member with id 'missing'");
  }

  #[tokio::test]
  async fn duplicate_id_is_conflict() {
    let (repo, _) = seeded(0).await;
    let mut input = MemoryStore::new_member("Alice");
    input.id = Some("11111111-1111-4111-8111-111111111111".into());

    repo.add(input.clone()).await.unwrap();
    let err = repo.add(input).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
  }
}
