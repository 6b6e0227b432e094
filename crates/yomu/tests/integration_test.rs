//! crates/yomu/tests/integration_test.rs
//!
//! End-to-end integration test.
//! Verifies the entire flow through the facade: Load resources -> Split sentences ->
//! Tokenize -> Tag -> Chunk -> Score sentiment.

use std::fs;

use tempfile::TempDir;

use yomu::config::YomuConfig;
use yomu::errors::{ResourceError, YomuError};
use yomu::models::{ChunkNode, EntityLabel, PosTag};
use yomu::YomuService;

/// Service on the embedded resources only.
fn service() -> YomuService {
  YomuService::init(&YomuConfig::default()).expect("Failed to initialize YomuService")
}

/// Entities of the chunk output as (text, label) pairs.
fn entities(nodes: &[ChunkNode]) -> Vec<(String, EntityLabel)> {
  nodes.iter().filter_map(|node| node.label().map(|label| (node.text(), label))).collect()
}

#[test]
fn sentence_and_word_tokenization() {
  let service = service();
  let text = "Dr. Smith went to Washington.";

  // ── Abbreviation does not end the sentence ──
  assert_eq!(service.sent_tokenize(text), vec![text.to_string()]);

  // ── Abbreviation period kept, final period split ──
  assert_eq!(
    service.word_tokenize(text),
    vec!["Dr.", "Smith", "went", "to", "Washington", "."]
  );
}

#[test]
fn word_tokens_span_sentences() {
  let service = service();
  let tokens = service.word_tokenize("It rained. We stayed in.");
  assert_eq!(tokens, vec!["It", "rained", ".", "We", "stayed", "in", "."]);
}

#[test]
fn pos_tags_simple_sentence() {
  let tagged = service().pos_tag("The cat sat.");

  let words: Vec<&str> = tagged.iter().map(|t| t.word.as_str()).collect();
  assert_eq!(words, vec!["The", "cat", "sat", "."]);

  assert!(tagged[1].tag.is_noun(), "cat should be a noun: {:?}", tagged[1]);
  assert!(tagged[2].tag.is_verb(), "sat should be a verb: {:?}", tagged[2]);
  assert_eq!(tagged[3].tag, PosTag::Period);
}

#[test]
fn named_entities_person_and_place() {
  let found = entities(&service().ne_chunk("Barack Obama visited Paris."));

  assert!(
    found.iter().any(|(text, label)| text.contains("Obama") && *label == EntityLabel::Person),
    "no PERSON containing Obama in {found:?}"
  );
  assert!(
    found.contains(&("Paris".to_string(), EntityLabel::Gpe)),
    "no GPE Paris in {found:?}"
  );
}

#[test]
fn named_entities_brand_name_is_organization() {
  let found = entities(&service().ne_chunk("Elon Musk founded SpaceX."));

  assert!(
    found.contains(&("SpaceX".to_string(), EntityLabel::Organization)),
    "no ORGANIZATION SpaceX in {found:?}"
  );
}

#[test]
fn chunk_leaves_cover_all_tokens() {
  let service = service();
  let text = "Mr. Jones flew from London to the United Nations in New York.";

  let leaves: Vec<String> = service
    .ne_chunk(text)
    .iter()
    .flat_map(|node| node.leaves().iter().map(|t| t.word.clone()).collect::<Vec<_>>())
    .collect();

  assert_eq!(leaves, service.word_tokenize(text));
}

#[test]
fn sentiment_of_positive_text() {
  let scores = service().polarity_scores("I love this!").expect("Sentiment failed");
  assert!(scores.compound > 0.0);
  assert!(scores.pos > scores.neg);
}

#[test]
fn whitespace_only_text_yields_nothing() {
  let service = service();
  assert!(service.sent_tokenize("  \n ").is_empty());
  assert!(service.word_tokenize("  \n ").is_empty());
  assert!(service.pos_tag("  \n ").is_empty());
  assert!(service.ne_chunk("  \n ").is_empty());
}

#[test]
fn results_are_deterministic() {
  let service = service();
  let text = "Apple hired Jane Doe in London. She loves it!";

  assert_eq!(service.pos_tag(text), service.pos_tag(text));
  assert_eq!(service.ne_chunk(text), service.ne_chunk(text));
  assert_eq!(
    service.polarity_scores(text).unwrap(),
    service.polarity_scores(text).unwrap()
  );
}

#[test]
fn data_dir_extends_gazetteer() {
  let tmp_dir = TempDir::new().expect("Failed to create temporary directory");
  fs::write(tmp_dir.path().join("gazetteer.tsv"), "Zembla\tGPE\n").unwrap();

  let mut config = YomuConfig::default();
  config.resources.data_dir = Some(tmp_dir.path().to_path_buf());
  let service = YomuService::init(&config).expect("Failed to initialize YomuService");

  let found = entities(&service.ne_chunk("Kinbote loved Zembla."));
  assert!(found.contains(&("Zembla".to_string(), EntityLabel::Gpe)), "{found:?}");
}

#[test]
fn malformed_resource_fails_init() {
  let tmp_dir = TempDir::new().expect("Failed to create temporary directory");
  fs::write(tmp_dir.path().join("lexicon.tsv"), "word\tNOTATAG\n").unwrap();

  let mut config = YomuConfig::default();
  config.resources.data_dir = Some(tmp_dir.path().to_path_buf());

  let err = YomuService::init(&config).unwrap_err();
  assert!(
    matches!(err, YomuError::Resource(ResourceError::Malformed { line: 1, .. })),
    "unexpected error: {err:?}"
  );
}

#[test]
fn missing_data_dir_fails_init() {
  let tmp_dir = TempDir::new().expect("Failed to create temporary directory");

  let mut config = YomuConfig::default();
  config.resources.data_dir = Some(tmp_dir.path().join("missing"));

  let err = YomuService::init(&config).unwrap_err();
  assert!(matches!(err, YomuError::Resource(ResourceError::InvalidDataDir(_))));
}
