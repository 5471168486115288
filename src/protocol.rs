//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::browse::Filter;
use crate::domain::Locale;
use crate::quiz::{QuizSession, Summary, Tier};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartQuiz {
        #[serde(default)]
        count: Option<usize>,
        #[serde(default)]
        locale: Locale,
    },
    SetAnswer {
        text: String,
    },
    SubmitAnswer,
    NextQuestion,
    PreviousQuestion,
    RestartQuiz,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        question: QuestionOut,
    },
    AnswerResult {
        correct: bool,
        answer: String,
        short_def: Option<String>,
        score: usize,
    },
    QuizCompleted {
        summary: SummaryOut,
    },
    QuizUnavailable {
        message: String,
    },
    Error {
        message: String,
    },
}

/// Current-question DTO used by both WS and HTTP. The canonical answer and
/// verdict ship only once the item is revealed.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub index: usize,
    pub total: usize,
    pub question_text: String,
    pub location: String,
    pub tags: Vec<String>,
    pub established_at: Option<String>,
    pub image: Option<String>,
    pub your_answer: String,
    pub revealed: bool,
    pub answer: Option<String>,
    pub correct: Option<bool>,
    pub short_def: Option<String>,
}

/// Project the session's current item into the public DTO.
pub fn to_question_out(s: &QuizSession) -> QuestionOut {
    let item = s.current_item();
    let revealed = s.current_revealed();
    QuestionOut {
        index: s.current_index(),
        total: s.len(),
        question_text: item.question_text.clone(),
        location: item.location.clone(),
        tags: item.tags.clone(),
        established_at: item.established_at.clone(),
        image: item.image.clone(),
        your_answer: s.current_answer().to_string(),
        revealed,
        answer: revealed.then(|| item.question_answer.clone()),
        correct: revealed.then(|| s.current_correct()),
        short_def: if revealed { item.short_def.clone() } else { None },
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryOut {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: Tier,
    pub message: String,
}

impl SummaryOut {
    pub fn new(summary: Summary, locale: Locale) -> Self {
        Self {
            score: summary.score,
            total: summary.total,
            percentage: summary.percentage,
            tier: summary.tier,
            message: crate::logic::summary_message(summary.tier, locale).to_string(),
        }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct RiddleQuery {
    pub location: Option<String>,
    /// Comma-separated tag selection.
    pub tags: Option<String>,
}

impl RiddleQuery {
    pub fn to_filter(&self) -> Filter {
        Filter {
            location: self.location.clone().filter(|l| !l.is_empty()),
            tags: self
                .tags
                .as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FiltersOut {
    pub locations: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub location: Option<String>,
    pub tags: Option<String>,
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Deserialize)]
pub struct StartIn {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub locale: Locale,
}
#[derive(Debug, Serialize)]
pub struct StartOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub question: QuestionOut,
}

#[derive(Debug, Deserialize)]
pub struct SessionIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitOut {
    pub correct: bool,
    pub answer: String,
    pub short_def: Option<String>,
    pub score: usize,
}

/// Advance result: either the next question or the final summary.
#[derive(Debug, Serialize)]
pub struct StepOut {
    pub completed: bool,
    pub question: Option<QuestionOut>,
    pub summary: Option<SummaryOut>,
}

#[derive(Debug, Serialize)]
pub struct ImportOut {
    pub inserted: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
    pub token: String,
}
#[derive(Debug, Serialize)]
pub struct LoginOut {
    pub signed_in: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riddle_query_splits_comma_separated_tags() {
        let q = RiddleQuery { location: Some("İstanbul".into()), tags: Some("kule, tarihi,,".into()) };
        let f = q.to_filter();
        assert_eq!(f.location.as_deref(), Some("İstanbul"));
        assert_eq!(f.tags, vec!["kule", "tarihi"]);

        let q = RiddleQuery { location: Some(String::new()), tags: None };
        let f = q.to_filter();
        assert!(f.location.is_none());
        assert!(f.tags.is_empty());
    }

    #[test]
    fn ws_messages_parse_from_client_json() {
        let m: ClientWsMessage =
            serde_json::from_str(r#"{"type":"start_quiz","count":5,"locale":"en"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::StartQuiz { count: Some(5), locale: Locale::En }));

        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"start_quiz"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::StartQuiz { count: None, locale: Locale::Tr }));

        let m: ClientWsMessage =
            serde_json::from_str(r#"{"type":"set_answer","text":"galata kulesi"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::SetAnswer { .. }));
    }
}
