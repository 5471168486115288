//! Quiz session core: random sampling, progression, grading, and the result
//! summary.
//!
//! Flow:
//! 1) Caller reads the full pool from the store.
//! 2) `QuizSession::start` samples up to [`QUIZ_LEN`] items without
//!    replacement.
//! 3) The player edits an answer, submits (the canonical answer is revealed
//!    and the verdict recorded), and navigates forward/back.
//! 4) Advancing past the last item completes the session; the summary
//!    carries score, percentage and display tier.
//!
//! Everything here is synchronous single-owner state; the HTTP and WS
//! surfaces drive it through `logic`.

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::domain::Riddle;
use crate::error::QuizError;
use crate::util::normalize_answer;

/// Session length requested by the app. Shorter pools yield shorter sessions.
pub const QUIZ_LEN: usize = 10;

/// Uniform sample without replacement: `min(count, pool.len())` distinct
/// items in randomized order. Unseeded on purpose; reproducibility across
/// calls is not a requirement.
pub fn sample(pool: &[Riddle], count: usize) -> Vec<Riddle> {
  let mut rng = rand::thread_rng();
  let mut picked: Vec<Riddle> = pool.choose_multiple(&mut rng, count).cloned().collect();
  // choose_multiple does not promise a random order for the chosen window.
  picked.shuffle(&mut rng);
  picked
}

/// Correct iff user and canonical answers agree after trim + lowercase.
pub fn grade(user: &str, canonical: &str) -> bool {
  normalize_answer(user) == normalize_answer(canonical)
}

/// Where the session stands after a navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
  InProgress,
  Completed,
}

/// Display band for the final summary; selects the message/icon shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  High,
  Mid,
  Low,
}

impl Tier {
  pub fn for_percentage(pct: u32) -> Self {
    if pct >= 80 {
      Tier::High
    } else if pct >= 60 {
      Tier::Mid
    } else {
      Tier::Low
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
  pub score: usize,
  pub total: usize,
  pub percentage: u32,
  pub tier: Tier,
}

/// One play-through over a sampled subset of the pool.
///
/// The item list is fixed at sampling time. Per-item answer, reveal flag and
/// verdict persist across navigation, so going back shows the recorded state
/// rather than resetting it.
#[derive(Clone, Debug)]
pub struct QuizSession {
  items: Vec<Riddle>,
  current: usize,
  answers: Vec<String>,
  revealed: Vec<bool>,
  correct: Vec<bool>,
  score: usize,
  completed: bool,
}

impl QuizSession {
  /// Sample `min(QUIZ_LEN, pool.len())` items and begin at the first.
  /// An empty pool is a distinct unavailable condition, never a zero-item
  /// session in progress.
  pub fn start(pool: &[Riddle]) -> Result<Self, QuizError> {
    Self::with_len(pool, QUIZ_LEN)
  }

  /// Like [`QuizSession::start`] with an explicit session length.
  pub fn with_len(pool: &[Riddle], count: usize) -> Result<Self, QuizError> {
    let items = sample(pool, count);
    if items.is_empty() {
      return Err(QuizError::NoRiddles);
    }
    let n = items.len();
    Ok(Self {
      items,
      current: 0,
      answers: vec![String::new(); n],
      revealed: vec![false; n],
      correct: vec![false; n],
      score: 0,
      completed: false,
    })
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn is_completed(&self) -> bool {
    self.completed
  }

  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn current_item(&self) -> &Riddle {
    &self.items[self.current]
  }

  pub fn current_answer(&self) -> &str {
    &self.answers[self.current]
  }

  /// Whether the current item has been graded and its answer revealed.
  pub fn current_revealed(&self) -> bool {
    self.revealed[self.current]
  }

  /// Recorded verdict for the current item; meaningful once revealed.
  pub fn current_correct(&self) -> bool {
    self.correct[self.current]
  }

  pub fn score(&self) -> usize {
    self.score
  }

  /// Overwrite the stored free-text answer for the current item. Accepts any
  /// string; does not touch reveal state or score, so editing after reveal
  /// never retroactively regrades.
  pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), QuizError> {
    if self.completed {
      return Err(QuizError::AlreadyCompleted);
    }
    self.answers[self.current] = text.into();
    Ok(())
  }

  /// Grade the current item and reveal its canonical answer.
  ///
  /// Precondition: the stored answer is non-empty after trimming. The first
  /// submit records the verdict and counts a correct item exactly once; any
  /// further submit on the same item replays the recorded verdict without
  /// touching the score.
  pub fn submit(&mut self) -> Result<bool, QuizError> {
    if self.completed {
      return Err(QuizError::AlreadyCompleted);
    }
    if self.answers[self.current].trim().is_empty() {
      return Err(QuizError::EmptyAnswer);
    }
    if self.revealed[self.current] {
      return Ok(self.correct[self.current]);
    }
    let ok = grade(&self.answers[self.current], &self.items[self.current].question_answer);
    self.revealed[self.current] = true;
    self.correct[self.current] = ok;
    if ok {
      self.score += 1;
    }
    Ok(ok)
  }

  /// Move to the next item, or complete the session at the last one.
  /// Never wraps around.
  pub fn advance(&mut self) -> Progress {
    if self.completed {
      return Progress::Completed;
    }
    if self.current + 1 < self.items.len() {
      self.current += 1;
      Progress::InProgress
    } else {
      self.completed = true;
      Progress::Completed
    }
  }

  /// Move back one item; a no-op at the first. Prior answers and reveal
  /// state are kept.
  pub fn retreat(&mut self) {
    if !self.completed && self.current > 0 {
      self.current -= 1;
    }
  }

  /// Discard all state and begin a fresh session from `pool` (which the
  /// caller re-reads beforehand).
  pub fn restart(&mut self, pool: &[Riddle]) -> Result<(), QuizError> {
    *self = Self::start(pool)?;
    Ok(())
  }

  /// Final score arithmetic: percentage rounds half-up (`f64::round`).
  pub fn summary(&self) -> Summary {
    let total = self.items.len();
    let percentage = (self.score as f64 * 100.0 / total as f64).round() as u32;
    Summary {
      score: self.score,
      total,
      percentage,
      tier: Tier::for_percentage(percentage),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  fn riddle(id: &str, answer: &str) -> Riddle {
    Riddle {
      id: id.to_string(),
      question_text: format!("soru {id}"),
      question_answer: answer.to_string(),
      location: "İstanbul".to_string(),
      tags: vec!["tarihi".to_string()],
      established_at: None,
      near_spots: None,
      short_def: None,
      image: None,
    }
  }

  fn pool(n: usize) -> Vec<Riddle> {
    (0..n).map(|i| riddle(&format!("r{i}"), &format!("cevap {i}"))).collect()
  }

  #[test]
  fn sample_returns_min_of_pool_and_count_all_distinct() {
    let p = pool(25);
    for count in [0, 1, 10, 25, 40] {
      let got = sample(&p, count);
      assert_eq!(got.len(), count.min(p.len()));
      let ids: HashSet<&str> = got.iter().map(|r| r.id.as_str()).collect();
      assert_eq!(ids.len(), got.len(), "repeats in sample of {count}");
      for r in &got {
        assert!(p.iter().any(|x| x.id == r.id), "sampled item not from pool");
      }
    }
  }

  #[test]
  fn sample_of_empty_pool_is_empty() {
    assert!(sample(&[], 0).is_empty());
    assert!(sample(&[], 10).is_empty());
  }

  #[test]
  fn empty_pool_never_starts_a_session() {
    assert_eq!(QuizSession::start(&[]).unwrap_err(), QuizError::NoRiddles);
  }

  #[test]
  fn short_pool_caps_the_session_length() {
    let s = QuizSession::start(&pool(3)).unwrap();
    assert_eq!(s.len(), 3);
    let s = QuizSession::start(&pool(30)).unwrap();
    assert_eq!(s.len(), QUIZ_LEN);
  }

  #[test]
  fn grading_ignores_case_and_surrounding_whitespace() {
    assert!(grade("  galata kulesi  ", "Galata Kulesi"));
    assert!(grade("PAMUKKALE", "pamukkale"));
    assert!(grade("\tkapadokya\n", "Kapadokya"));
    assert!(!grade("galata kules", "Galata Kulesi"));
    assert!(!grade("galata  kulesi", "Galata Kulesi")); // inner whitespace counts
  }

  #[test]
  fn submit_requires_a_non_blank_answer() {
    let mut s = QuizSession::start(&pool(2)).unwrap();
    assert_eq!(s.submit().unwrap_err(), QuizError::EmptyAnswer);
    s.set_answer("   \t ").unwrap();
    assert_eq!(s.submit().unwrap_err(), QuizError::EmptyAnswer);
    assert!(!s.current_revealed());
    assert_eq!(s.score(), 0);
  }

  #[test]
  fn resubmitting_never_double_counts() {
    let p = vec![riddle("r0", "Ankara")];
    let mut s = QuizSession::start(&p).unwrap();
    s.set_answer(" ankara ").unwrap();
    assert!(s.submit().unwrap());
    assert_eq!(s.score(), 1);
    // Same item, no intervening advance: verdict replays, score holds.
    assert!(s.submit().unwrap());
    assert!(s.submit().unwrap());
    assert_eq!(s.score(), 1);
  }

  #[test]
  fn editing_after_reveal_does_not_regrade() {
    let p = vec![riddle("r0", "Ankara")];
    let mut s = QuizSession::start(&p).unwrap();
    s.set_answer("yanlış").unwrap();
    assert!(!s.submit().unwrap());
    assert_eq!(s.score(), 0);
    s.set_answer("ankara").unwrap();
    // Verdict was already recorded as incorrect.
    assert!(!s.submit().unwrap());
    assert_eq!(s.score(), 0);
  }

  #[test]
  fn navigation_stops_at_both_ends() {
    let mut s = QuizSession::start(&pool(3)).unwrap();
    s.retreat();
    assert_eq!(s.current_index(), 0);
    assert_eq!(s.advance(), Progress::InProgress);
    assert_eq!(s.advance(), Progress::InProgress);
    assert_eq!(s.current_index(), 2);
    assert_eq!(s.advance(), Progress::Completed);
    assert!(s.is_completed());
    // Completed is terminal for navigation and mutation.
    assert_eq!(s.advance(), Progress::Completed);
    assert_eq!(s.set_answer("x").unwrap_err(), QuizError::AlreadyCompleted);
    assert_eq!(s.submit().unwrap_err(), QuizError::AlreadyCompleted);
  }

  #[test]
  fn going_back_keeps_recorded_state() {
    let p: Vec<Riddle> = vec![riddle("r0", "a"), riddle("r1", "b")];
    let mut s = QuizSession::with_len(&p, 2).unwrap();
    s.set_answer("a").unwrap();
    let first_ok = s.submit().unwrap();
    s.advance();
    s.retreat();
    assert!(s.current_revealed());
    assert_eq!(s.current_correct(), first_ok);
    assert_eq!(s.current_answer(), "a");
  }

  #[test]
  fn percentage_rounds_half_up() {
    let p = pool(10);
    let mut s = QuizSession::start(&p).unwrap();
    // Force a 7/10 run by grading against the items actually sampled.
    for i in 0..s.len() {
      if i < 7 {
        let canonical = s.current_item().question_answer.clone();
        s.set_answer(canonical).unwrap();
      } else {
        s.set_answer("bilmiyorum").unwrap();
      }
      s.submit().unwrap();
      s.advance();
    }
    let sum = s.summary();
    assert_eq!(sum.score, 7);
    assert_eq!(sum.percentage, 70);

    let mut s = QuizSession::with_len(&pool(3), 3).unwrap();
    for i in 0..3 {
      if i < 2 {
        let canonical = s.current_item().question_answer.clone();
        s.set_answer(canonical).unwrap();
      } else {
        s.set_answer("yok").unwrap();
      }
      s.submit().unwrap();
      s.advance();
    }
    // round(200/3) = round(66.67) = 67
    assert_eq!(s.summary().percentage, 67);
  }

  #[test]
  fn tier_bands_match_the_display_contract() {
    assert_eq!(Tier::for_percentage(100), Tier::High);
    assert_eq!(Tier::for_percentage(80), Tier::High);
    assert_eq!(Tier::for_percentage(79), Tier::Mid);
    assert_eq!(Tier::for_percentage(60), Tier::Mid);
    assert_eq!(Tier::for_percentage(59), Tier::Low);
    assert_eq!(Tier::for_percentage(0), Tier::Low);
  }

  #[test]
  fn restart_discards_score_and_reveal_state() {
    let p = pool(4);
    let mut s = QuizSession::start(&p).unwrap();
    let canonical = s.current_item().question_answer.clone();
    s.set_answer(canonical).unwrap();
    s.submit().unwrap();
    while s.advance() == Progress::InProgress {}
    assert!(s.is_completed());
    assert!(s.score() > 0);

    s.restart(&p).unwrap();
    assert_eq!(s.score(), 0);
    assert_eq!(s.current_index(), 0);
    assert!(!s.is_completed());
    for i in 0..s.len() {
      assert_eq!(s.current_index(), i);
      assert!(!s.current_revealed());
      assert!(s.current_answer().is_empty());
      s.advance();
    }
  }
}
