//! Small utility helpers used across modules.

/// Grading normalization: strip leading/trailing whitespace, then lowercase.
/// Equality on the result is the entire correctness rule; no fuzzy matching,
/// no locale-aware folding.
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  // Back off to a char boundary so multibyte text never splits.
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
