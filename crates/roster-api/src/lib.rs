//! JSON remote-procedure API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::MemberStore`].
//! Procedures are addressed as `<router>.<procedure>`; queries are `GET`,
//! mutations `POST`. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/trpc", roster_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod members;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::{Caller, store::MemberStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MemberStore + 'static,
{
  Router::new()
    .route("/members.list", get(members::list::<S>))
    .route("/members.byId", get(members::by_id::<S>))
    .route("/members.add", post(members::add::<S>))
    .with_state(Caller::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────
