//! Domain models: the riddle record, the admin/import input shape, and locale.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// UI language. The backend is bilingual only where user-visible summary
/// strings and export titles are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  #[default]
  Tr,
  En,
}

/// A location-themed riddle record. `id` is unique across the store and
/// `question_answer` is non-empty; both are enforced at the store boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Riddle {
  pub id: String,
  pub question_text: String,
  pub question_answer: String,
  pub location: String,
  #[serde(default)] pub tags: Vec<String>,
  #[serde(default)] pub established_at: Option<String>,
  #[serde(default)] pub near_spots: Option<Vec<String>>,
  #[serde(default)] pub short_def: Option<String>,
  #[serde(default)] pub image: Option<String>,
}

/// Input shape accepted by create/update and bulk import.
/// `question_text`, `question_answer` and `location` are mandatory; every
/// other field defaults to absent, and a malformed `tags` value is coerced
/// to an empty list instead of failing the record.
#[derive(Clone, Debug, Deserialize)]
pub struct RiddleDraft {
  pub question_text: String,
  pub question_answer: String,
  pub location: String,
  #[serde(default, deserialize_with = "tags_or_empty")]
  pub tags: Vec<String>,
  #[serde(default)] pub established_at: Option<String>,
  #[serde(default)] pub near_spots: Option<Vec<String>>,
  #[serde(default)] pub short_def: Option<String>,
  #[serde(default)] pub image: Option<String>,
}

impl RiddleDraft {
  /// Materialize a record under a fresh id.
  pub fn into_riddle(self) -> Riddle {
    self.into_riddle_with_id(Uuid::new_v4().to_string())
  }

  pub fn into_riddle_with_id(self, id: String) -> Riddle {
    Riddle {
      id,
      question_text: self.question_text,
      question_answer: self.question_answer,
      location: self.location,
      tags: self.tags,
      established_at: self.established_at,
      near_spots: self.near_spots,
      short_def: self.short_def,
      image: self.image,
    }
  }
}

/// Bulk-import payload: either one record or a sequence of records.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportPayload {
  Many(Vec<RiddleDraft>),
  One(Box<RiddleDraft>),
}

impl ImportPayload {
  pub fn into_drafts(self) -> Vec<RiddleDraft> {
    match self {
      ImportPayload::Many(v) => v,
      ImportPayload::One(d) => vec![*d],
    }
  }
}

/// Parse an admin upload. Malformed JSON fails the whole batch with a single
/// error; nothing is committed by the caller in that case.
pub fn parse_import(text: &str) -> Result<Vec<RiddleDraft>, serde_json::Error> {
  serde_json::from_str::<ImportPayload>(text).map(ImportPayload::into_drafts)
}

/// Accept only an array of strings for `tags`; anything else (missing,
/// null, scalar, object) becomes an empty list.
fn tags_or_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let v = serde_json::Value::deserialize(de)?;
  Ok(match v {
    serde_json::Value::Array(items) => items
      .into_iter()
      .filter_map(|t| t.as_str().map(str::to_string))
      .collect(),
    _ => Vec::new(),
  })
}
