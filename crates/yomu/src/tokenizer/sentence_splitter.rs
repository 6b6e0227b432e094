//! Sentence boundary detection
//!
//! Punkt-style heuristics over the abbreviation list: a run of `.`, `!` or `?`
//! (optionally followed by closing quotes or brackets) ends a sentence when it is
//! followed by whitespace and a word that does not start in lowercase.
//! A single period after a known abbreviation, an initial (`J.`) or a dotted
//! acronym (`U.S.`) never ends a sentence.

use std::ops::Range;
use std::sync::Arc;

use tracing::debug;

use crate::resources::Resources;

/// Sentence splitter
///
/// - Stateless apart from the shared resources
/// - `Clone + Send + Sync`
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
  resources: Arc<Resources>,
}

impl SentenceSplitter {
  /// Constructs a splitter from loaded resources
  pub fn new(resources: Arc<Resources>) -> Self {
    Self { resources }
  }

  /// Splits `text` into sentences, returned as trimmed slices of the input
  ///
  /// Whitespace-only input yields no sentence.
  pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
    let sentences: Vec<&str> =
      self.spans(text).into_iter().map(|range| &text[range]).collect();

    debug!(
      text_len = text.len(),
      sentences = sentences.len(),
      "Sentence splitting completed"
    );

    sentences
  }

  /// Returns the byte ranges of the sentences in `text` (trimmed)
  pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let n = chars.len();

    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < n {
      let (term_pos, c) = chars[i];
      if !is_terminator(c) {
        i += 1;
        continue;
      }

      // Run of terminators ("?!", "...")
      let mut j = i;
      while j < n && is_terminator(chars[j].1) {
        j += 1;
      }
      let run_end = byte_at(&chars, j, text.len());

      // Closing quotes and brackets stay with the sentence
      while j < n && is_closer(chars[j].1) {
        j += 1;
      }

      // A boundary needs whitespace after it; the end of text is handled below
      if j >= n || !chars[j].1.is_whitespace() {
        i = j.max(i + 1);
        continue;
      }

      let end = chars[j].0;

      let mut k = j;
      while k < n && chars[k].1.is_whitespace() {
        k += 1;
      }
      if k >= n {
        break;
      }

      let terminators = &text[term_pos..run_end];
      if self.is_boundary(&text[start..term_pos], terminators, chars[k].1) {
        push_trimmed(&mut spans, text, start..end);
        start = chars[k].0;
      }

      i = k;
    }

    push_trimmed(&mut spans, text, start..text.len());
    spans
  }

  /// Decides whether the terminator run ends the sentence
  ///
  /// - `before`: sentence text preceding the terminators
  /// - `terminators`: the run itself (`"."`, `"?!"`, `"..."`)
  /// - `next`: first character of the following word
  fn is_boundary(&self, before: &str, terminators: &str, next: char) -> bool {
    if next.is_lowercase() {
      return false;
    }

    if terminators != "." {
      return true;
    }

    let word = before
      .rsplit(char::is_whitespace)
      .next()
      .unwrap_or_default()
      .trim_start_matches(|c: char| is_opener(c));

    if word.is_empty() {
      return true;
    }

    // "Dr.", "etc.", "e.g."
    if self.resources.is_abbreviation(word) {
      return false;
    }

    // Initials: "J. R. R. Tolkien"
    let mut word_chars = word.chars();
    if let (Some(first), None) = (word_chars.next(), word_chars.next()) {
      if first.is_alphabetic() && first.is_uppercase() {
        return false;
      }
    }

    // Dotted acronyms: "U.S.", "Ph.D."
    if word.contains('.') && word.chars().any(char::is_alphabetic) {
      return false;
    }

    true
  }
}

fn byte_at(chars: &[(usize, char)], idx: usize, len: usize) -> usize {
  chars.get(idx).map_or(len, |(pos, _)| *pos)
}

fn push_trimmed(spans: &mut Vec<Range<usize>>, text: &str, range: Range<usize>) {
  let slice = &text[range.clone()];
  let trimmed_start = slice.len() - slice.trim_start().len();
  let trimmed = slice.trim();
  if trimmed.is_empty() {
    return;
  }
  let start = range.start + trimmed_start;
  spans.push(start..start + trimmed.len());
}

fn is_terminator(c: char) -> bool {
  matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
  matches!(c, '"' | '\'' | ')' | ']' | '}' | '”' | '’')
}

fn is_opener(c: char) -> bool {
  matches!(c, '"' | '\'' | '(' | '[' | '{' | '`' | '“' | '‘')
}
