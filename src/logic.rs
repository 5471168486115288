//! Quiz session behaviors shared by both HTTP and WebSocket handlers.
//!
//! Each operation routes through the session registry, mutates the one
//! session it addresses, and projects the result into a protocol DTO. The
//! pool read is the only async boundary; a session is never created or
//! restarted from a failed/empty read.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::Locale;
use crate::error::QuizError;
use crate::protocol::{to_question_out, QuestionOut, StepOut, SubmitOut, SummaryOut};
use crate::quiz::{Progress, QuizSession, Tier, QUIZ_LEN};
use crate::state::{AppState, SessionSlot};

/// Localized summary copy keyed by display tier.
pub fn summary_message(tier: Tier, locale: Locale) -> &'static str {
  match (tier, locale) {
    (Tier::High, Locale::Tr) => "Mükemmel! Türkiye hakkında çok şey biliyorsunuz.",
    (Tier::High, Locale::En) => "Excellent! You know a lot about Turkey.",
    (Tier::Mid, Locale::Tr) => "İyi! Biraz daha pratik yapabilirsiniz.",
    (Tier::Mid, Locale::En) => "Good! You could practice a bit more.",
    (Tier::Low, Locale::Tr) => "Daha fazla bilmece çözerek gelişebilirsiniz.",
    (Tier::Low, Locale::En) => "You can improve by solving more riddles.",
  }
}

/// Read the pool and open a fresh session. Fails with `NoRiddles` on an
/// empty pool rather than handing out a zero-item session.
#[instrument(level = "info", skip(state))]
pub async fn start_session(
  state: &AppState,
  count: Option<usize>,
  locale: Locale,
) -> Result<(String, QuestionOut), QuizError> {
  let pool = state.store.list_all().await;
  let quiz = QuizSession::with_len(&pool, count.unwrap_or(QUIZ_LEN))?;
  let question = to_question_out(&quiz);
  let id = Uuid::new_v4().to_string();
  state
    .sessions
    .write()
    .await
    .insert(id.clone(), SessionSlot { quiz, locale });
  info!(target: "quiz", session = %id, total = question.total, "Quiz session started");
  Ok((id, question))
}

/// Re-read the pool and replace the session's state in place, score
/// included. The read completes before the slot is touched.
#[instrument(level = "info", skip(state), fields(session = %session_id))]
pub async fn restart_session(state: &AppState, session_id: &str) -> Result<QuestionOut, QuizError> {
  let pool = state.store.list_all().await;
  let mut sessions = state.sessions.write().await;
  let slot = lookup(&mut sessions, session_id)?;
  slot.quiz.restart(&pool)?;
  info!(target: "quiz", session = %session_id, "Quiz session restarted");
  Ok(to_question_out(&slot.quiz))
}

#[instrument(level = "debug", skip(state, text), fields(session = %session_id, answer_len = text.len()))]
pub async fn set_answer(state: &AppState, session_id: &str, text: String) -> Result<(), QuizError> {
  let mut sessions = state.sessions.write().await;
  let slot = lookup(&mut sessions, session_id)?;
  slot.quiz.set_answer(text)
}

/// Grade the current item. Re-submitting a revealed item replays the
/// recorded verdict without changing the score.
#[instrument(level = "info", skip(state), fields(session = %session_id))]
pub async fn submit_answer(state: &AppState, session_id: &str) -> Result<SubmitOut, QuizError> {
  let mut sessions = state.sessions.write().await;
  let slot = lookup(&mut sessions, session_id)?;
  let correct = slot.quiz.submit()?;
  let item = slot.quiz.current_item();
  info!(target: "quiz", session = %session_id, index = slot.quiz.current_index(), %correct, "Answer graded");
  Ok(SubmitOut {
    correct,
    answer: item.question_answer.clone(),
    short_def: item.short_def.clone(),
    score: slot.quiz.score(),
  })
}

/// Move forward; past the last item this completes the session and yields
/// the summary instead of a question.
#[instrument(level = "debug", skip(state), fields(session = %session_id))]
pub async fn advance(state: &AppState, session_id: &str) -> Result<StepOut, QuizError> {
  let mut sessions = state.sessions.write().await;
  let slot = lookup(&mut sessions, session_id)?;
  match slot.quiz.advance() {
    Progress::InProgress => Ok(StepOut {
      completed: false,
      question: Some(to_question_out(&slot.quiz)),
      summary: None,
    }),
    Progress::Completed => {
      let summary = slot.quiz.summary();
      info!(target: "quiz", session = %session_id, score = summary.score, percentage = summary.percentage, "Quiz completed");
      Ok(StepOut {
        completed: true,
        question: None,
        summary: Some(SummaryOut::new(summary, slot.locale)),
      })
    }
  }
}

/// Move back one item; a no-op at the first. Recorded state persists.
#[instrument(level = "debug", skip(state), fields(session = %session_id))]
pub async fn retreat(state: &AppState, session_id: &str) -> Result<QuestionOut, QuizError> {
  let mut sessions = state.sessions.write().await;
  let slot = lookup(&mut sessions, session_id)?;
  if slot.quiz.is_completed() {
    return Err(QuizError::AlreadyCompleted);
  }
  slot.quiz.retreat();
  Ok(to_question_out(&slot.quiz))
}

/// Forget an abandoned session (e.g. on WS disconnect).
#[instrument(level = "debug", skip(state), fields(session = %session_id))]
pub async fn drop_session(state: &AppState, session_id: &str) {
  state.sessions.write().await.remove(session_id);
}

fn lookup<'a>(
  sessions: &'a mut std::collections::HashMap<String, SessionSlot>,
  session_id: &str,
) -> Result<&'a mut SessionSlot, QuizError> {
  sessions
    .get_mut(session_id)
    .ok_or_else(|| QuizError::UnknownSession(session_id.to_string()))
}
