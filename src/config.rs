//! Loading the optional riddle bank from TOML.
//!
//! `RIDDLE_BANK_PATH` points at a file with `[[riddles]]` tables; entries
//! missing an answer are skipped with an error log, and any IO/parse failure
//! falls back to the built-in seeds.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Riddle;
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BankConfig {
  #[serde(default)]
  pub riddles: Vec<RiddleCfg>,
}

/// Riddle entry accepted in TOML configuration. Only `question_text`,
/// `question_answer` and `location` are required; `id` is generated when
/// absent.
#[derive(Clone, Debug, Deserialize)]
pub struct RiddleCfg {
  #[serde(default)] pub id: Option<String>,
  pub question_text: String,
  pub question_answer: String,
  pub location: String,
  #[serde(default)] pub tags: Vec<String>,
  #[serde(default)] pub established_at: Option<String>,
  #[serde(default)] pub near_spots: Option<Vec<String>>,
  #[serde(default)] pub short_def: Option<String>,
  #[serde(default)] pub image: Option<String>,
}

impl RiddleCfg {
  pub fn into_riddle(self) -> Option<Riddle> {
    if self.question_answer.trim().is_empty() {
      error!(target: "riddle", location = %self.location, "Skipping bank item: empty question_answer.");
      return None;
    }
    Some(Riddle {
      id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
      question_text: self.question_text,
      question_answer: self.question_answer,
      location: self.location,
      tags: self.tags,
      established_at: self.established_at,
      near_spots: self.near_spots,
      short_def: self.short_def,
      image: self.image,
    })
  }
}

/// Attempt to load `BankConfig` from RIDDLE_BANK_PATH. On any parsing/IO
/// error, returns None.
pub fn load_bank_from_env() -> Option<BankConfig> {
  let path = std::env::var("RIDDLE_BANK_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<BankConfig>(&s) {
      Ok(cfg) => {
        info!(target: "bilmece_backend", %path, count = cfg.riddles.len(), "Loaded riddle bank (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "bilmece_backend", %path, error = %e, "Failed to parse TOML riddle bank");
        None
      }
    },
    Err(e) => {
      error!(target: "bilmece_backend", %path, error = %e, "Failed to read TOML riddle bank file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bank_entries_parse_with_defaults() {
    let raw = r#"
      [[riddles]]
      question_text = "soru"
      question_answer = "cevap"
      location = "Bursa"

      [[riddles]]
      id = "b-ulu"
      question_text = "yirmi kubbem var"
      question_answer = "Ulu Cami"
      location = "Bursa"
      tags = ["cami", "tarihi"]
      established_at = "1399"
    "#;
    let cfg: BankConfig = toml::from_str(raw).unwrap();
    assert_eq!(cfg.riddles.len(), 2);

    let first = cfg.riddles[0].clone().into_riddle().unwrap();
    assert!(first.tags.is_empty());
    assert!(first.near_spots.is_none());
    assert!(!first.id.is_empty());

    let second = cfg.riddles[1].clone().into_riddle().unwrap();
    assert_eq!(second.id, "b-ulu");
    assert_eq!(second.tags, vec!["cami", "tarihi"]);
  }

  #[test]
  fn blank_answer_entries_are_dropped() {
    let cfg: BankConfig = toml::from_str(
      r#"
      [[riddles]]
      question_text = "soru"
      question_answer = "  "
      location = "Bursa"
      "#,
    )
    .unwrap();
    assert!(cfg.riddles[0].clone().into_riddle().is_none());
  }
}
