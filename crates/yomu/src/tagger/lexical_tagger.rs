//! Lexicon based part-of-speech tagger
//!
//! Tagging runs in two passes:
//! 1. every token gets its candidate tags from the lexicon, from punctuation and
//!    number shapes, or from suffix rules for unknown words
//! 2. a left-to-right contextual pass picks one candidate per token using the tag
//!    already chosen for the previous token

use std::sync::Arc;

use tracing::debug;

use crate::models::{PosTag, TaggedToken};
use crate::resources::Resources;

/// Subject pronouns taking the non-3rd-person present (`VBP`)
const PLURAL_SUBJECTS: [&str; 4] = ["i", "you", "we", "they"];

/// Subject pronouns taking the 3rd-person present (`VBZ`)
const SINGULAR_SUBJECTS: [&str; 3] = ["he", "she", "it"];

/// Forms of "have" that introduce a past participle
const HAVE_FORMS: [&str; 6] = ["have", "has", "had", "having", "'ve", "'d"];

/// Forms of "be" that introduce a past participle or a gerund
const BE_FORMS: [&str; 10] = ["be", "am", "is", "are", "was", "were", "been", "being", "'re", "'m"];

/// Words after which `'s` is a contracted "is"/"has"
const VERBAL_S_HOSTS: [&str; 9] = ["it", "he", "she", "that", "there", "here", "what", "who", "where"];

/// Noun suffixes for unknown words
const NOUN_SUFFIXES: [&str; 9] = ["tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism"];

/// Adjective suffixes for unknown words
const ADJECTIVE_SUFFIXES: [&str; 8] = ["able", "ible", "ful", "ous", "ive", "less", "ish", "ical"];

/// Part-of-speech tagger
///
/// - Stateless apart from the shared resources
/// - `Clone + Send + Sync`
#[derive(Debug, Clone)]
pub struct PosTagger {
  resources: Arc<Resources>,
}

impl PosTagger {
  /// Constructs a tagger from loaded resources
  pub fn new(resources: Arc<Resources>) -> Self {
    Self { resources }
  }

  /// Tags the tokens of one sentence
  ///
  /// Output has the same length and order as `tokens`; tagging never fails.
  pub fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
    let candidates: Vec<Vec<PosTag>> = tokens
      .iter()
      .enumerate()
      .map(|(idx, token)| {
        let sentence_start = idx == 0 || is_sentence_opener(&tokens[idx - 1]);
        self.candidates(token, sentence_start)
      })
      .collect();

    let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());
    for (idx, cands) in candidates.iter().enumerate() {
      let prev = idx.checked_sub(1).map(|p| (tokens[p].to_lowercase(), tags[p]));
      let next_tag = candidates.get(idx + 1).and_then(|c| c.first().copied());

      let tag = choose(&tokens[idx].to_lowercase(), cands, prev, next_tag);
      tags.push(tag);
    }

    debug!(tokens = tokens.len(), "POS tagging completed");

    tokens
      .iter()
      .zip(tags)
      .map(|(word, tag)| TaggedToken::new(word.clone(), tag))
      .collect()
  }

  /// Candidate tags of a token, the default first
  fn candidates(&self, token: &str, sentence_start: bool) -> Vec<PosTag> {
    if let Some(tags) = self.resources.tags_of(token).filter(|_| !sentence_start) {
      return tags.to_vec();
    }

    if let Some(tag) = punctuation_tag(token) {
      return vec![tag];
    }

    if is_number(token) {
      return vec![PosTag::Cd];
    }

    let lower = token.to_lowercase();
    let capitalized = token.chars().next().is_some_and(char::is_uppercase);

    if sentence_start {
      // Known names keep their proper-noun reading at the start of a sentence
      if capitalized && self.is_known_name(token) {
        return vec![PosTag::Nnp];
      }
      if let Some(tags) = self.resources.tags_of(&lower).or_else(|| self.resources.tags_of(token)) {
        return tags.to_vec();
      }
      if capitalized {
        return vec![PosTag::Nnp];
      }
    } else {
      if capitalized {
        return vec![PosTag::Nnp];
      }
      if let Some(tags) = self.resources.tags_of(&lower) {
        return tags.to_vec();
      }
    }

    suffix_candidates(&lower)
  }

  fn is_known_name(&self, token: &str) -> bool {
    self.resources.gazetteer.contains_key(token) || self.resources.first_names.contains(token)
  }
}

/// `true` if the token ends a sentence or opens a quotation
fn is_sentence_opener(token: &str) -> bool {
  matches!(token, "." | "!" | "?" | "``")
}

/// Tag of a punctuation token
fn punctuation_tag(token: &str) -> Option<PosTag> {
  let tag = match token {
    "." | "!" | "?" => PosTag::Period,
    "," => PosTag::Comma,
    ":" | ";" | "--" | "-" | "..." => PosTag::Colon,
    "``" => PosTag::OpenQuote,
    "''" | "'" => PosTag::CloseQuote,
    "(" | "[" | "{" | "<" => PosTag::OpenParen,
    ")" | "]" | "}" | ">" => PosTag::CloseParen,
    "$" => PosTag::Dollar,
    "#" => PosTag::Hash,
    "&" => PosTag::Cc,
    "%" => PosTag::Nn,
    "@" => PosTag::Sym,
    _ => return None,
  };
  Some(tag)
}

/// Digits with optional separators (`1,000.50`, `10:30`, `-3`, `1/2`)
fn is_number(token: &str) -> bool {
  token.chars().any(|c| c.is_ascii_digit())
    && token.chars().all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | ':' | '/' | '-'))
}

/// Candidates of an unknown lowercase word from its shape
fn suffix_candidates(lower: &str) -> Vec<PosTag> {
  let ends_with_any = |suffixes: &[&str]| suffixes.iter().any(|s| lower.ends_with(s));

  if lower.len() > 4 && lower.ends_with("ing") {
    vec![PosTag::Vbg, PosTag::Nn, PosTag::Jj]
  } else if lower.len() > 3 && lower.ends_with("ed") {
    vec![PosTag::Vbd, PosTag::Vbn, PosTag::Jj]
  } else if lower.len() > 3 && lower.ends_with("ly") {
    vec![PosTag::Rb]
  } else if ends_with_any(&NOUN_SUFFIXES) {
    vec![PosTag::Nn]
  } else if ends_with_any(&ADJECTIVE_SUFFIXES) || lower.contains('-') {
    vec![PosTag::Jj]
  } else if lower.ends_with("ize") || lower.ends_with("ify") {
    vec![PosTag::Vb, PosTag::Vbp]
  } else if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
    vec![PosTag::Nns, PosTag::Vbz]
  } else {
    vec![PosTag::Nn]
  }
}

/// Picks one tag among the candidates of `word` given its neighbours
///
/// - `prev`: lowercase previous word with its chosen tag
/// - `next_tag`: default tag of the next token
fn choose(
  word: &str,
  cands: &[PosTag],
  prev: Option<(String, PosTag)>,
  next_tag: Option<PosTag>,
) -> PosTag {
  let default = cands.first().copied().unwrap_or(PosTag::Nn);
  let Some((prev_word, prev_tag)) = prev else {
    return default;
  };
  let has = |tag: PosTag| cands.contains(&tag);

  // Possessive after a plural noun: "the dogs' bowls"
  if word == "'" {
    return if prev_tag == PosTag::Nns { PosTag::Pos } else { default };
  }

  if cands.len() < 2 {
    return default;
  }

  match word {
    "'s" => {
      let verbal = matches!(prev_tag, PosTag::Prp | PosTag::Ex | PosTag::Wp | PosTag::Wrb)
        || VERBAL_S_HOSTS.contains(&prev_word.as_str());
      return if verbal { PosTag::Vbz } else { PosTag::Pos };
    }
    "that" if prev_tag.is_verb() && has(PosTag::In) => return PosTag::In,
    "that" if prev_tag.is_noun() && has(PosTag::Wdt) => return PosTag::Wdt,
    "her" if has(PosTag::Prp) && next_tag.is_none_or(|t| !t.is_noun() && !t.is_adjective()) => {
      return PosTag::Prp;
    }
    _ => {}
  }

  let prev_word = prev_word.as_str();

  if matches!(prev_tag, PosTag::To | PosTag::Md) && has(PosTag::Vb) {
    return PosTag::Vb;
  }

  if HAVE_FORMS.contains(&prev_word) && has(PosTag::Vbn) {
    return PosTag::Vbn;
  }

  if BE_FORMS.contains(&prev_word) {
    if has(PosTag::Vbn) && (has(PosTag::Vbd) || default == PosTag::Vbn) {
      return PosTag::Vbn;
    }
    if has(PosTag::Vbg) {
      return PosTag::Vbg;
    }
    if has(PosTag::Jj) {
      return PosTag::Jj;
    }
  }

  let determiner_like = matches!(prev_tag, PosTag::Dt | PosTag::PrpPoss | PosTag::Pos | PosTag::Cd)
    || prev_tag.is_adjective();
  if determiner_like {
    if let Some(noun) = cands.iter().copied().find(PosTag::is_noun) {
      return noun;
    }
    if has(PosTag::Jj) {
      return PosTag::Jj;
    }
  }

  if prev_tag == PosTag::Prp {
    if PLURAL_SUBJECTS.contains(&prev_word) && has(PosTag::Vbp) {
      return PosTag::Vbp;
    }
    if SINGULAR_SUBJECTS.contains(&prev_word) && has(PosTag::Vbz) {
      return PosTag::Vbz;
    }
  }

  if prev_tag.is_noun() || prev_tag == PosTag::Prp {
    if has(PosTag::Vbd) {
      return PosTag::Vbd;
    }
    if prev_tag == PosTag::Nns && has(PosTag::Vbp) {
      return PosTag::Vbp;
    }
    if has(PosTag::Vbz) && !has(PosTag::Nns) {
      return PosTag::Vbz;
    }
  }

  default
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tagger() -> PosTagger {
    PosTagger::new(Arc::new(Resources::embedded().unwrap()))
  }

  fn tags_of(words: &[&str]) -> Vec<&'static str> {
    let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    tagger().tag(&tokens).into_iter().map(|t| t.tag.as_str()).collect()
  }

  #[test]
  fn tags_simple_sentence() {
    assert_eq!(tags_of(&["The", "cat", "sat", "."]), vec!["DT", "NN", "VBD", "."]);
  }

  #[test]
  fn pronoun_subject_selects_present_tense() {
    assert_eq!(tags_of(&["I", "love", "this", "!"]), vec!["PRP", "VBP", "DT", "."]);
  }

  #[test]
  fn infinitive_after_to() {
    let tags = tags_of(&["They", "want", "to", "work", "."]);
    assert_eq!(tags[3], "VB");
  }

  #[test]
  fn noun_after_determiner() {
    let tags = tags_of(&["the", "work", "is", "done"]);
    assert_eq!(tags[1], "NN");
  }

  #[test]
  fn proper_nouns_and_titles() {
    let tags = tags_of(&["Dr.", "Smith", "went", "to", "Washington", "."]);
    assert_eq!(tags, vec!["NNP", "NNP", "VBD", "TO", "NNP", "."]);
  }

  #[test]
  fn possessive_and_contracted_s() {
    let tags = tags_of(&["John", "'s", "dog", "barked", "."]);
    assert_eq!(tags[1], "POS");

    let tags = tags_of(&["it", "'s", "late"]);
    assert_eq!(tags[1], "VBZ");
  }

  #[test]
  fn numbers_and_punctuation() {
    let tags = tags_of(&["It", "costs", "$", "1,000.50", ",", "ok", "?"]);
    assert_eq!(tags[2], "$");
    assert_eq!(tags[3], "CD");
    assert_eq!(tags[4], ",");
    assert_eq!(tags[6], ".");
  }

  #[test]
  fn unknown_words_use_suffixes() {
    assert_eq!(suffix_candidates("blorking")[0], PosTag::Vbg);
    assert_eq!(suffix_candidates("quickishly")[0], PosTag::Rb);
    assert_eq!(suffix_candidates("frobnication")[0], PosTag::Nn);
    assert_eq!(suffix_candidates("wugs")[0], PosTag::Nns);
  }

  #[test]
  fn participle_after_have() {
    let tags = tags_of(&["She", "has", "visited", "Paris"]);
    assert_eq!(tags[2], "VBN");
  }

  #[test]
  fn empty_input() {
    assert!(tagger().tag(&[]).is_empty());
  }

  #[test]
  fn output_preserves_tokens() {
    let tokens: Vec<String> = ["Hello", "world"].iter().map(|w| w.to_string()).collect();
    let tagged = tagger().tag(&tokens);
    let words: Vec<&str> = tagged.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, vec!["Hello", "world"]);
  }
}
