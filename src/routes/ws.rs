//! WebSocket upgrade + message loop. Each client message is parsed as JSON
//! and forwarded to core logic; we reply with a single JSON message per
//! request. The connection owns at most one quiz session, created on
//! `start_quiz` and dropped from the registry on disconnect.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::error::QuizError;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "bilmece_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "bilmece_backend", "WebSocket connected");
  let mut session_id: Option<String> = None;

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target = "bilmece_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &mut session_id).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "bilmece_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }

  // The session is single-owner; abandoning the socket abandons the quiz.
  if let Some(id) = session_id {
    logic::drop_session(&state, &id).await;
  }
  info!(target: "bilmece_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state, session_id))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  session_id: &mut Option<String>,
) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartQuiz { count, locale } => {
      // A fresh start replaces any quiz this connection already had.
      if let Some(old) = session_id.take() {
        logic::drop_session(state, &old).await;
      }
      match logic::start_session(state, count, locale).await {
        Ok((id, question)) => {
          *session_id = Some(id);
          ServerWsMessage::Question { question }
        }
        Err(QuizError::NoRiddles) => ServerWsMessage::QuizUnavailable {
          message: "No riddles available yet.".into(),
        },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::SetAnswer { text } => match current(session_id) {
      Ok(id) => match logic::set_answer(state, id, text).await {
        Ok(()) => ServerWsMessage::Pong,
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      },
      Err(m) => m,
    },

    ClientWsMessage::SubmitAnswer => match current(session_id) {
      Ok(id) => match logic::submit_answer(state, id).await {
        Ok(out) => ServerWsMessage::AnswerResult {
          correct: out.correct,
          answer: out.answer,
          short_def: out.short_def,
          score: out.score,
        },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      },
      Err(m) => m,
    },

    ClientWsMessage::NextQuestion => match current(session_id) {
      Ok(id) => match logic::advance(state, id).await {
        Ok(step) => match (step.question, step.summary) {
          (Some(question), _) => ServerWsMessage::Question { question },
          (None, Some(summary)) => ServerWsMessage::QuizCompleted { summary },
          (None, None) => ServerWsMessage::Error { message: "empty step".into() },
        },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      },
      Err(m) => m,
    },

    ClientWsMessage::PreviousQuestion => match current(session_id) {
      Ok(id) => match logic::retreat(state, id).await {
        Ok(question) => ServerWsMessage::Question { question },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      },
      Err(m) => m,
    },

    ClientWsMessage::RestartQuiz => match current(session_id) {
      Ok(id) => match logic::restart_session(state, id).await {
        Ok(question) => ServerWsMessage::Question { question },
        Err(QuizError::NoRiddles) => ServerWsMessage::QuizUnavailable {
          message: "No riddles available yet.".into(),
        },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      },
      Err(m) => m,
    },
  }
}

fn current(session_id: &Option<String>) -> Result<&str, ServerWsMessage> {
  session_id
    .as_deref()
    .ok_or_else(|| ServerWsMessage::Error { message: "no active quiz; send start_quiz first".into() })
}
