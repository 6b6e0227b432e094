//! Penn Treebank style word tokenizer
//!
//! Works on one sentence at a time (see [`SentenceSplitter`](super::SentenceSplitter)):
//! only the period at the very end of the sentence is split off, so abbreviation
//! periods inside the sentence (`Dr.`) stay attached to their word.

/// Brackets that open a chunk
const OPENING_BRACKETS: [char; 4] = ['(', '[', '{', '<'];

/// Brackets that close a chunk
const CLOSING_BRACKETS: [char; 4] = [')', ']', '}', '>'];

/// Characters always split off as their own token
const ALWAYS_SPLIT: [char; 8] = ['!', '?', ';', '@', '#', '$', '%', '&'];

/// Contraction suffixes split off the end of a word (compared ASCII case-insensitively)
const CONTRACTION_SUFFIXES: [&str; 7] = ["n't", "'ll", "'re", "'ve", "'s", "'m", "'d"];

/// Whole words split into two tokens after their third byte
const SPLIT_AFTER_THIRD: [&str; 6] = ["cannot", "gonna", "gotta", "wanna", "gimme", "lemme"];

/// Treebank word tokenizer
///
/// - Stateless
/// - `Clone + Copy + Send + Sync`
#[derive(Debug, Clone, Copy, Default)]
pub struct TreebankWordTokenizer;

impl TreebankWordTokenizer {
  /// Constructor
  pub fn new() -> Self {
    Self
  }

  /// Tokenizes one sentence
  ///
  /// - `"` is rewritten to ` `` ` when it opens a chunk and to `''` otherwise
  /// - punctuation is split off following Treebank conventions
  /// - contractions are split (`can't` → `ca`, `n't`)
  pub fn tokenize(&self, sentence: &str) -> Vec<String> {
    let chunks: Vec<&str> = sentence.split_whitespace().collect();
    let last = chunks.len().saturating_sub(1);

    let mut tokens = Vec::with_capacity(chunks.len() * 2);
    for (idx, chunk) in chunks.iter().enumerate() {
      tokenize_chunk(chunk, idx == last, &mut tokens);
    }
    tokens
  }
}

/// Tokenizes one whitespace-delimited chunk into `out`
fn tokenize_chunk(chunk: &str, sentence_final: bool, out: &mut Vec<String>) {
  let mut rest = chunk;

  // ─── Leading quotes and brackets ───
  loop {
    if let Some(r) = rest.strip_prefix("``") {
      out.push("``".to_string());
      rest = r;
    } else if let Some(r) = rest.strip_prefix(['"', '“']) {
      out.push("``".to_string());
      rest = r;
    } else if let Some(c) = rest.chars().next().filter(|c| OPENING_BRACKETS.contains(c)) {
      out.push(c.to_string());
      rest = &rest[c.len_utf8()..];
    } else {
      break;
    }
  }

  // ─── Trailing punctuation (collected in reverse) ───
  let mut suffix: Vec<String> = Vec::new();
  // Only closing quotes/brackets seen so far: the sentence-final period may still be split
  let mut only_closers = true;

  while !rest.is_empty() {
    if let Some(r) = rest.strip_suffix("...") {
      suffix.push("...".to_string());
      rest = r;
      only_closers = false;
      continue;
    }
    if let Some(r) = rest.strip_suffix("''") {
      suffix.push("''".to_string());
      rest = r;
      continue;
    }
    if let Some(r) = rest.strip_suffix(['"', '”']) {
      suffix.push("''".to_string());
      rest = r;
      continue;
    }

    let Some(c) = rest.chars().next_back() else {
      break;
    };
    let head = &rest[..rest.len() - c.len_utf8()];

    match c {
      c if CLOSING_BRACKETS.contains(&c) => {
        suffix.push(c.to_string());
      }
      '\'' if !head.ends_with('\'') => {
        suffix.push("'".to_string());
      }
      ',' | ';' | ':' | '!' | '?' => {
        suffix.push(c.to_string());
        only_closers = false;
      }
      '.' if sentence_final && only_closers && !head.ends_with('.') => {
        suffix.push(".".to_string());
        only_closers = false;
      }
      _ => break,
    }
    rest = head;
  }

  // ─── Inner punctuation and contractions ───
  split_inner(rest, out);

  out.extend(suffix.into_iter().rev());
}

/// Splits inner punctuation of a chunk core and pushes the resulting words
fn split_inner(core: &str, out: &mut Vec<String>) {
  let chars: Vec<char> = core.chars().collect();
  let mut word = String::new();
  let mut i = 0;

  while i < chars.len() {
    let c = chars[i];
    let prev = i.checked_sub(1).map(|p| chars[p]);
    let next = chars.get(i + 1).copied();

    if ALWAYS_SPLIT.contains(&c) {
      flush_word(&mut word, out);
      out.push(c.to_string());
    } else if matches!(c, ',' | ':') {
      // Keep "1,000" and "10:30" together
      let between_digits = prev.is_some_and(|p| p.is_ascii_digit())
        && next.is_some_and(|n| n.is_ascii_digit());
      if between_digits {
        word.push(c);
      } else {
        flush_word(&mut word, out);
        out.push(c.to_string());
      }
    } else if c == '-' && next == Some('-') {
      flush_word(&mut word, out);
      out.push("--".to_string());
      i += 2;
      continue;
    } else if c == '.' && next == Some('.') && chars.get(i + 2) == Some(&'.') {
      flush_word(&mut word, out);
      out.push("...".to_string());
      i += 3;
      continue;
    } else if c == '"' {
      flush_word(&mut word, out);
      out.push("''".to_string());
    } else {
      word.push(c);
    }

    i += 1;
  }

  flush_word(&mut word, out);
}

/// Pushes `word` (split at contractions) and clears it
fn flush_word(word: &mut String, out: &mut Vec<String>) {
  if word.is_empty() {
    return;
  }
  split_contraction(word, out);
  word.clear();
}

/// Splits a contraction into its two tokens, or pushes the word as is
fn split_contraction(word: &str, out: &mut Vec<String>) {
  if SPLIT_AFTER_THIRD.iter().any(|w| w.eq_ignore_ascii_case(word)) {
    out.push(word[..3].to_string());
    out.push(word[3..].to_string());
    return;
  }

  for suffix in CONTRACTION_SUFFIXES {
    if let Some(at) = suffix_start_ignore_case(word, suffix)
      && at > 0
    {
      out.push(word[..at].to_string());
      out.push(word[at..].to_string());
      return;
    }
  }

  out.push(word.to_string());
}

/// Byte index where `suffix` starts if `word` ends with it (ASCII case-insensitive)
fn suffix_start_ignore_case(word: &str, suffix: &str) -> Option<usize> {
  let at = word.len().checked_sub(suffix.len())?;
  if word.is_char_boundary(at) && word[at..].eq_ignore_ascii_case(suffix) {
    Some(at)
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tokenize(sentence: &str) -> Vec<String> {
    TreebankWordTokenizer::new().tokenize(sentence)
  }

  #[test]
  fn keeps_abbreviation_period_and_splits_final_period() {
    assert_eq!(
      tokenize("Dr. Smith went to Washington."),
      vec!["Dr.", "Smith", "went", "to", "Washington", "."]
    );
  }

  #[test]
  fn splits_contractions() {
    assert_eq!(
      tokenize("I can't believe they're here, it's great!"),
      vec!["I", "ca", "n't", "believe", "they", "'re", "here", ",", "it", "'s", "great", "!"]
    );
  }

  #[test]
  fn splits_whole_word_contractions() {
    assert_eq!(tokenize("We cannot stay"), vec!["We", "can", "not", "stay"]);
    assert_eq!(tokenize("Gonna win"), vec!["Gon", "na", "win"]);
  }

  #[test]
  fn rewrites_double_quotes() {
    assert_eq!(
      tokenize("He said \"hello\" to me."),
      vec!["He", "said", "``", "hello", "''", "to", "me", "."]
    );
  }

  #[test]
  fn final_period_before_closing_quote() {
    assert_eq!(
      tokenize("She said \"stop.\""),
      vec!["She", "said", "``", "stop", ".", "''"]
    );
  }

  #[test]
  fn keeps_numbers_together() {
    assert_eq!(
      tokenize("It costs $1,000.50 at 10:30 today."),
      vec!["It", "costs", "$", "1,000.50", "at", "10:30", "today", "."]
    );
  }

  #[test]
  fn splits_brackets_and_inner_punctuation() {
    assert_eq!(
      tokenize("(see AT&T) -- wow;ok"),
      vec!["(", "see", "AT", "&", "T", ")", "--", "wow", ";", "ok"]
    );
  }

  #[test]
  fn splits_ellipsis() {
    assert_eq!(tokenize("Well... fine"), vec!["Well", "...", "fine"]);
  }

  #[test]
  fn dotted_acronym_at_sentence_end() {
    assert_eq!(tokenize("I live in the U.S."), vec!["I", "live", "in", "the", "U.S", "."]);
  }

  #[test]
  fn trailing_possessive_apostrophe() {
    assert_eq!(tokenize("the dogs' bowls"), vec!["the", "dogs", "'", "bowls"]);
  }

  #[test]
  fn question_and_exclamation_run() {
    assert_eq!(tokenize("Really?!"), vec!["Really", "?", "!"]);
  }

  #[test]
  fn empty_sentence() {
    assert!(tokenize("   ").is_empty());
  }
}
