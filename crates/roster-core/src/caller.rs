//! The three `members` procedures, callable in-process.
//!
//! [`Caller`] is what the HTTP layer drives, and what server-side code can use
//! directly without a round trip through JSON. Every call validates its raw
//! input first; an invalid input never reaches the store.

use std::sync::Arc;

use crate::{
  Result,
  input::{AddMemberInput, ByIdInput, ListInput, ListRequest},
  member::{Member, NewMember},
  pagination::Page,
  repo::MemberRepository,
  store::MemberStore,
};

pub struct Caller<S> {
  repo: MemberRepository<S>,
}

impl<S> Clone for Caller<S> {
  fn clone(&self) -> Self {
    Self {
      repo: self.repo.clone(),
    }
  }
}

impl<S: MemberStore> Caller<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      repo: MemberRepository::new(store),
    }
  }

  /// `members.list`
  pub async fn list(&self, input: ListInput) -> Result<Page<Member>> {
    let req = ListRequest::try_from(input)?;
    self.repo.list(req).await
  }

  /// `members.byId`
  pub async fn by_id(&self, input: ByIdInput) -> Result<Member> {
    let id = input.into_id()?;
    self.repo.by_id(&id).await
  }

  /// `members.add`
  pub async fn add(&self, input: AddMemberInput) -> Result<Member> {
    let new = NewMember::try_from(input)?;
    self.repo.add(new).await
  }
}
