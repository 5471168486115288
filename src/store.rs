//! In-memory riddle repository.
//!
//! The quiz core only needs `list_all`; the admin surface drives the
//! mutations. Listing is newest-first and deterministic for a given
//! snapshot, which the browse projections rely on. Mutations are all-or-
//! nothing per call; callers keep their own view unchanged until a call
//! succeeds.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::domain::{Riddle, RiddleDraft};
use crate::error::StoreError;

#[derive(Clone, Default)]
pub struct RiddleStore {
  // Arrival order; list_all serves the reverse (newest first).
  inner: Arc<RwLock<Vec<Riddle>>>,
}

impl RiddleStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a store from pre-validated records, dropping duplicates and
  /// records with a blank answer (logged, not fatal).
  pub fn from_riddles(riddles: Vec<Riddle>) -> Self {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(riddles.len());
    for r in riddles {
      if r.question_answer.trim().is_empty() {
        warn!(target: "riddle", id = %r.id, "Skipping riddle with empty answer");
        continue;
      }
      if !seen.insert(r.id.clone()) {
        warn!(target: "riddle", id = %r.id, "Skipping duplicate riddle id");
        continue;
      }
      kept.push(r);
    }
    info!(target: "riddle", count = kept.len(), "Riddle store initialized");
    Self { inner: Arc::new(RwLock::new(kept)) }
  }

  /// Full pool snapshot, newest first.
  pub async fn list_all(&self) -> Vec<Riddle> {
    let inner = self.inner.read().await;
    inner.iter().rev().cloned().collect()
  }

  pub async fn len(&self) -> usize {
    self.inner.read().await.len()
  }

  pub async fn get(&self, id: &str) -> Option<Riddle> {
    let inner = self.inner.read().await;
    inner.iter().find(|r| r.id == id).cloned()
  }

  /// Insert a record under its own id; duplicate ids are rejected.
  #[instrument(level = "debug", skip(self, r), fields(id = %r.id))]
  pub async fn insert(&self, r: Riddle) -> Result<(), StoreError> {
    validate(&r)?;
    let mut inner = self.inner.write().await;
    if inner.iter().any(|x| x.id == r.id) {
      return Err(StoreError::Duplicate(r.id));
    }
    inner.push(r);
    Ok(())
  }

  /// Create a record from a draft under a fresh id.
  #[instrument(level = "debug", skip(self, draft), fields(location = %draft.location))]
  pub async fn create(&self, draft: RiddleDraft) -> Result<Riddle, StoreError> {
    let r = draft.into_riddle();
    validate(&r)?;
    let mut inner = self.inner.write().await;
    inner.push(r.clone());
    info!(target: "riddle", id = %r.id, location = %r.location, "Riddle created");
    Ok(r)
  }

  /// Replace the record at `id` with the draft's fields; the id is kept.
  #[instrument(level = "debug", skip(self, draft), fields(%id))]
  pub async fn update(&self, id: &str, draft: RiddleDraft) -> Result<Riddle, StoreError> {
    let r = draft.into_riddle_with_id(id.to_string());
    validate(&r)?;
    let mut inner = self.inner.write().await;
    match inner.iter_mut().find(|x| x.id == id) {
      Some(slot) => {
        *slot = r.clone();
        info!(target: "riddle", %id, "Riddle updated");
        Ok(r)
      }
      None => Err(StoreError::NotFound(id.to_string())),
    }
  }

  #[instrument(level = "debug", skip(self), fields(%id))]
  pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
    let mut inner = self.inner.write().await;
    let before = inner.len();
    inner.retain(|r| r.id != id);
    if inner.len() == before {
      return Err(StoreError::NotFound(id.to_string()));
    }
    info!(target: "riddle", %id, "Riddle deleted");
    Ok(())
  }

  /// Bulk insert for the admin JSON upload. The payload has already parsed
  /// as a whole; every draft gets a fresh id, so this cannot conflict.
  #[instrument(level = "debug", skip(self, drafts), fields(count = drafts.len()))]
  pub async fn insert_many(&self, drafts: Vec<RiddleDraft>) -> Result<Vec<Riddle>, StoreError> {
    let mut records = Vec::with_capacity(drafts.len());
    for d in drafts {
      let r = d.into_riddle();
      validate(&r)?;
      records.push(r);
    }
    let mut inner = self.inner.write().await;
    inner.extend(records.iter().cloned());
    info!(target: "riddle", inserted = records.len(), total = inner.len(), "Bulk import committed");
    Ok(records)
  }
}

fn validate(r: &Riddle) -> Result<(), StoreError> {
  if r.question_answer.trim().is_empty() {
    return Err(StoreError::InvalidRecord("question_answer is empty".into()));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(location: &str) -> RiddleDraft {
    RiddleDraft {
      question_text: "soru".into(),
      question_answer: "cevap".into(),
      location: location.into(),
      tags: vec![],
      established_at: None,
      near_spots: None,
      short_def: None,
      image: None,
    }
  }

  #[tokio::test]
  async fn create_update_delete_roundtrip() {
    let store = RiddleStore::new();
    let r = store.create(draft("İstanbul")).await.unwrap();
    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(&r.id).await.unwrap().location, "İstanbul");

    let mut d = draft("Ankara");
    d.question_answer = "yeni cevap".into();
    let updated = store.update(&r.id, d).await.unwrap();
    assert_eq!(updated.id, r.id);
    assert_eq!(store.get(&r.id).await.unwrap().question_answer, "yeni cevap");

    store.delete(&r.id).await.unwrap();
    assert!(store.get(&r.id).await.is_none());
    assert_eq!(
      store.delete(&r.id).await.unwrap_err(),
      StoreError::NotFound(r.id.clone())
    );
  }

  #[tokio::test]
  async fn update_missing_id_is_not_found() {
    let store = RiddleStore::new();
    let err = store.update("yok", draft("Bursa")).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("yok".into()));
  }

  #[tokio::test]
  async fn duplicate_and_invalid_inserts_are_rejected() {
    let store = RiddleStore::new();
    let r = draft("İzmir").into_riddle_with_id("sabit".into());
    store.insert(r.clone()).await.unwrap();
    assert_eq!(store.insert(r).await.unwrap_err(), StoreError::Duplicate("sabit".into()));

    let mut bad = draft("İzmir");
    bad.question_answer = "   ".into();
    assert!(matches!(
      store.create(bad).await.unwrap_err(),
      StoreError::InvalidRecord(_)
    ));
  }

  #[tokio::test]
  async fn list_all_is_newest_first() {
    let store = RiddleStore::new();
    let first = store.create(draft("A")).await.unwrap();
    let second = store.create(draft("B")).await.unwrap();
    let listed = store.list_all().await;
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
  }

  #[tokio::test]
  async fn insert_many_commits_the_whole_batch() {
    let store = RiddleStore::new();
    let inserted = store
      .insert_many(vec![draft("A"), draft("B"), draft("C")])
      .await
      .unwrap();
    assert_eq!(inserted.len(), 3);
    assert_eq!(store.len().await, 3);

    let mut bad = draft("D");
    bad.question_answer = " ".into();
    // One invalid record fails the batch before anything lands.
    assert!(store.insert_many(vec![draft("E"), bad]).await.is_err());
    assert_eq!(store.len().await, 3);
  }
}
