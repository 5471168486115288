//! Browse/filter view computations and the downloadable quiz export.
//!
//! Pure derived data over a pool snapshot, no state machine: a location
//! filter (exact match or all) ANDed with a tag filter (OR across selected
//! tags; empty selection passes everything).

use serde::Serialize;

use crate::domain::{Locale, Riddle};
use crate::quiz::{sample, QUIZ_LEN};

#[derive(Clone, Debug, Default)]
pub struct Filter {
  /// `None` means all locations.
  pub location: Option<String>,
  /// Item passes with at least one of these tags; empty passes everything.
  pub tags: Vec<String>,
}

impl Filter {
  pub fn matches(&self, r: &Riddle) -> bool {
    if let Some(loc) = &self.location {
      if &r.location != loc {
        return false;
      }
    }
    self.tags.is_empty() || self.tags.iter().any(|t| r.tags.contains(t))
  }
}

pub fn apply(pool: &[Riddle], filter: &Filter) -> Vec<Riddle> {
  pool.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// De-duplicated locations in first-seen order over the snapshot.
pub fn distinct_locations(pool: &[Riddle]) -> Vec<String> {
  let mut seen = std::collections::HashSet::new();
  let mut out = Vec::new();
  for r in pool {
    if seen.insert(r.location.as_str()) {
      out.push(r.location.clone());
    }
  }
  out
}

/// De-duplicated tags in first-seen order over the snapshot.
pub fn distinct_tags(pool: &[Riddle]) -> Vec<String> {
  let mut seen = std::collections::HashSet::new();
  let mut out = Vec::new();
  for r in pool {
    for t in &r.tags {
      if seen.insert(t.as_str()) {
        out.push(t.clone());
      }
    }
  }
  out
}

/// Quiz document generated from a filtered subset, intended for download.
/// Canonical answers are included; ids are not.
#[derive(Clone, Debug, Serialize)]
pub struct QuizExport {
  pub title: String,
  pub riddles: Vec<ExportedRiddle>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportedRiddle {
  pub question: String,
  pub answer: String,
  pub location: String,
  pub tags: Vec<String>,
}

pub fn export_quiz(pool: &[Riddle], filter: &Filter, locale: Locale) -> QuizExport {
  let subset = apply(pool, filter);
  let picked = sample(&subset, QUIZ_LEN);
  QuizExport {
    title: match locale {
      Locale::Tr => "Rastgele Quiz".to_string(),
      Locale::En => "Random Quiz".to_string(),
    },
    riddles: picked
      .into_iter()
      .map(|r| ExportedRiddle {
        question: r.question_text,
        answer: r.question_answer,
        location: r.location,
        tags: r.tags,
      })
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn riddle(id: &str, location: &str, tags: &[&str]) -> Riddle {
    Riddle {
      id: id.to_string(),
      question_text: format!("soru {id}"),
      question_answer: format!("cevap {id}"),
      location: location.to_string(),
      tags: tags.iter().map(|t| t.to_string()).collect(),
      established_at: None,
      near_spots: None,
      short_def: None,
      image: None,
    }
  }

  #[test]
  fn location_and_tag_filters_combine_with_and() {
    let pool = vec![
      riddle("r1", "A", &["x"]),
      riddle("r2", "A", &["y"]),
      riddle("r3", "B", &["x"]),
    ];

    let f = Filter { location: Some("A".into()), tags: vec!["x".into()] };
    let got = apply(&pool, &f);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, "r1");

    // OR across selected tags, no location filter.
    let f = Filter { location: None, tags: vec!["x".into(), "y".into()] };
    let got = apply(&pool, &f);
    let ids: Vec<&str> = got.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "r3"]);
  }

  #[test]
  fn empty_tag_selection_passes_everything() {
    let pool = vec![riddle("r1", "A", &[]), riddle("r2", "B", &["x"])];
    assert_eq!(apply(&pool, &Filter::default()).len(), 2);
  }

  #[test]
  fn distinct_projections_keep_first_seen_order() {
    let pool = vec![
      riddle("r1", "İstanbul", &["kule", "tarihi"]),
      riddle("r2", "Ankara", &["anıt", "tarihi"]),
      riddle("r3", "İstanbul", &["cami"]),
    ];
    assert_eq!(distinct_locations(&pool), vec!["İstanbul", "Ankara"]);
    assert_eq!(distinct_tags(&pool), vec!["kule", "tarihi", "anıt", "cami"]);
  }

  #[test]
  fn export_projects_without_ids_and_caps_at_quiz_len() {
    let pool: Vec<Riddle> =
      (0..15).map(|i| riddle(&format!("r{i}"), "Denizli", &["doğa"])).collect();
    let doc = export_quiz(&pool, &Filter::default(), Locale::En);
    assert_eq!(doc.title, "Random Quiz");
    assert_eq!(doc.riddles.len(), QUIZ_LEN);
    let json = serde_json::to_value(&doc).unwrap();
    let first = &json["riddles"][0];
    assert!(first.get("id").is_none());
    assert!(first.get("answer").is_some());

    let doc = export_quiz(&pool, &Filter { location: Some("yok".into()), tags: vec![] }, Locale::Tr);
    assert_eq!(doc.title, "Rastgele Quiz");
    assert!(doc.riddles.is_empty());
  }
}
