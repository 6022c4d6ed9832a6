//! Handlers for the `members` procedures.
//!
//! | Method | Path | Input |
//! |--------|------|-------|
//! | `GET`  | `/members.list` | `?input={"limit":..,"cursor":..}`, both optional |
//! | `GET`  | `/members.byId` | `?input={"id":"..."}` |
//! | `POST` | `/members.add`  | JSON body: [`AddMemberInput`] |
//!
//! Query inputs are URL-encoded JSON in the `input` parameter; an absent
//! parameter is read as `{}`.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use bytes::Bytes;
use roster_core::{
  Caller,
  input::{AddMemberInput, ByIdInput, ListInput},
  member::Member,
  pagination::Page,
  store::MemberStore,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::ApiError;

// ─── Envelope ─────────────────────────────────────────────────────────────────

/// Successful procedure response: `{"result": {"data": ...}}`.
#[derive(Debug, Serialize)]
pub struct RpcResponse<T> {
  pub result: RpcData<T>,
}

#[derive(Debug, Serialize)]
pub struct RpcData<T> {
  pub data: T,
}

fn respond<T>(data: T) -> Json<RpcResponse<T>> {
  Json(RpcResponse {
    result: RpcData { data },
  })
}

// ─── Input decoding ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RpcQuery {
  pub input: Option<String>,
}

fn decode_query<T: DeserializeOwned>(
  query: Result<Query<RpcQuery>, QueryRejection>,
) -> Result<T, ApiError> {
  let Query(query) = query.map_err(|e| ApiError::Decode(e.body_text()))?;
  let raw = query.input.as_deref().unwrap_or("{}");
  serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
  serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// ─── Procedures ───────────────────────────────────────────────────────────────

/// `GET /members.list`
pub async fn list<S>(
  State(caller): State<Caller<S>>,
  query: Result<Query<RpcQuery>, QueryRejection>,
) -> Result<Json<RpcResponse<Page<Member>>>, ApiError>
where
  S: MemberStore,
{
  let input: ListInput = decode_query(query)?;
  tracing::debug!(limit = ?input.limit, cursor = ?input.cursor, "members.list");
  let page = caller.list(input).await?;
  Ok(respond(page))
}

/// `GET /members.byId`
pub async fn by_id<S>(
  State(caller): State<Caller<S>>,
  query: Result<Query<RpcQuery>, QueryRejection>,
) -> Result<Json<RpcResponse<Member>>, ApiError>
where
  S: MemberStore,
{
  let input: ByIdInput = decode_query(query)?;
  tracing::debug!(id = %input.id, "members.byId");
  let member = caller.by_id(input).await?;
  Ok(respond(member))
}

/// `POST /members.add`, returns the stored member.
pub async fn add<S>(
  State(caller): State<Caller<S>>,
  body: Bytes,
) -> Result<Json<RpcResponse<Member>>, ApiError>
where
  S: MemberStore,
{
  let input: AddMemberInput = decode_body(&body)?;
  tracing::debug!(id = ?input.id, account_id = %input.account_id, "members.add");
  let member = caller.add(input).await?;
  tracing::info!(id = %member.id, "member created");
  Ok(respond(member))
}
