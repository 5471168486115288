//! HTTP endpoint handlers. These are thin wrappers that forward to core logic
//! and the store. Admin mutations are gated on the bearer token first; the
//! store is only touched after the gate passes.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::{header, HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::browse;
use crate::domain::{parse_import, Riddle, RiddleDraft};
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
  if state.auth.authorize(bearer(headers)) {
    Ok(())
  } else {
    warn!(target: "bilmece_backend", "Admin request rejected: bad or missing token");
    Err((StatusCode::UNAUTHORIZED, Json(json!({ "message": "admin token required" }))).into_response())
  }
}

//
// Auth
//

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_login(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LoginIn>,
) -> Result<Json<LoginOut>, Response> {
  if state.auth.login(&body.token) {
    Ok(Json(LoginOut { signed_in: true }))
  } else {
    Err((StatusCode::UNAUTHORIZED, Json(json!({ "message": "invalid token" }))).into_response())
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  state.auth.logout();
  Json(LoginOut { signed_in: false })
}

//
// Browse
//

#[instrument(level = "info", skip(state, q))]
pub async fn http_list_riddles(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RiddleQuery>,
) -> impl IntoResponse {
  let pool = state.store.list_all().await;
  let filtered = browse::apply(&pool, &q.to_filter());
  info!(target: "riddle", total = pool.len(), shown = filtered.len(), "HTTP riddles listed");
  Json(filtered)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_filters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let pool = state.store.list_all().await;
  Json(FiltersOut {
    locations: browse::distinct_locations(&pool),
    tags: browse::distinct_tags(&pool),
  })
}

#[instrument(level = "info", skip(state, q))]
pub async fn http_export_quiz(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ExportQuery>,
) -> impl IntoResponse {
  let filter = RiddleQuery { location: q.location.clone(), tags: q.tags.clone() }.to_filter();
  let pool = state.store.list_all().await;
  let doc = browse::export_quiz(&pool, &filter, q.locale);
  info!(target: "quiz", riddles = doc.riddles.len(), "Quiz export generated");
  (
    [(header::CONTENT_DISPOSITION, "attachment; filename=\"quiz.json\"")],
    Json(doc),
  )
}

//
// Admin record mutations
//

#[instrument(level = "info", skip(state, headers, body), fields(location = %body.location))]
pub async fn http_create_riddle(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<RiddleDraft>,
) -> Result<Json<Riddle>, Response> {
  require_admin(&state, &headers)?;
  let r = state.store.create(body).await.map_err(IntoResponse::into_response)?;
  Ok(Json(r))
}

#[instrument(level = "info", skip(state, headers, body), fields(%id))]
pub async fn http_update_riddle(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  headers: HeaderMap,
  Json(body): Json<RiddleDraft>,
) -> Result<Json<Riddle>, Response> {
  require_admin(&state, &headers)?;
  let r = state.store.update(&id, body).await.map_err(IntoResponse::into_response)?;
  Ok(Json(r))
}

#[instrument(level = "info", skip(state, headers), fields(%id))]
pub async fn http_delete_riddle(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  headers: HeaderMap,
) -> Result<StatusCode, Response> {
  require_admin(&state, &headers)?;
  state.store.delete(&id).await.map_err(IntoResponse::into_response)?;
  Ok(StatusCode::NO_CONTENT)
}

/// Bulk JSON upload: one object or an array. Malformed JSON fails the whole
/// batch with a single error and nothing is committed.
#[instrument(level = "info", skip(state, headers, body), fields(payload_len = body.len()))]
pub async fn http_import_riddles(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  body: String,
) -> Result<Json<ImportOut>, Response> {
  require_admin(&state, &headers)?;
  let drafts = parse_import(&body).map_err(|e| {
    error!(target: "riddle", error = %e, payload = %trunc_for_log(&body, 200), "Bulk import rejected: invalid JSON");
    (StatusCode::BAD_REQUEST, Json(json!({ "message": format!("invalid JSON: {e}") }))).into_response()
  })?;
  let inserted = state
    .store
    .insert_many(drafts)
    .await
    .map_err(IntoResponse::into_response)?;
  Ok(Json(ImportOut { inserted: inserted.len() }))
}

//
// Quiz session
//

#[instrument(level = "info", skip(state, body))]
pub async fn http_quiz_start(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartIn>,
) -> Result<Json<StartOut>, crate::error::QuizError> {
  let (session_id, question) = logic::start_session(&state, body.count, body.locale).await?;
  Ok(Json(StartOut { session_id, question }))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id, answer_len = body.text.len()))]
pub async fn http_quiz_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<StatusCode, crate::error::QuizError> {
  logic::set_answer(&state, &body.session_id, body.text).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id))]
pub async fn http_quiz_submit(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> Result<Json<SubmitOut>, crate::error::QuizError> {
  let out = logic::submit_answer(&state, &body.session_id).await?;
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id))]
pub async fn http_quiz_next(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> Result<Json<StepOut>, crate::error::QuizError> {
  let out = logic::advance(&state, &body.session_id).await?;
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id))]
pub async fn http_quiz_previous(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> Result<Json<QuestionOut>, crate::error::QuizError> {
  let out = logic::retreat(&state, &body.session_id).await?;
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id))]
pub async fn http_quiz_restart(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> Result<Json<QuestionOut>, crate::error::QuizError> {
  let out = logic::restart_session(&state, &body.session_id).await?;
  Ok(Json(out))
}
