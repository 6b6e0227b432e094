//! Named-entity chunker
//!
//! Groups runs of proper nouns into entity spans and labels each span with the
//! gazetteer, head-word lists and given names. Tokens outside any span are kept
//! as leaves so the output covers the whole sentence.

use std::sync::Arc;

use tracing::debug;

use crate::models::{ChunkNode, EntityLabel, TaggedToken};
use crate::resources::Resources;

/// Person titles, kept outside the entity span
const TITLES: &[&str] = &[
  "Mr.", "Mrs.", "Ms.", "Mr", "Mrs", "Ms", "Dr.", "Dr", "Prof.", "Sir", "Dame", "Lord", "Lady",
  "President", "Senator", "Sen.", "Governor", "Gov.", "Rep.", "Mayor", "Minister", "Chancellor",
  "King", "Queen", "Prince", "Princess", "Pope", "Judge", "General", "Gen.", "Captain", "Capt.",
  "Rev.", "Saint",
];

/// Proper nouns that name dates rather than entities
const TEMPORAL: &[&str] = &[
  "January", "February", "March", "April", "May", "June", "July", "August", "September",
  "October", "November", "December", "Jan.", "Feb.", "Mar.", "Apr.", "Jun.", "Jul.", "Aug.",
  "Sep.", "Sept.", "Oct.", "Nov.", "Dec.", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
  "Saturday", "Sunday",
];

/// Words marking an organisation name
const ORGANIZATION_HEADS: &[&str] = &[
  "Inc", "Inc.", "Corp", "Corp.", "Corporation", "Company", "Co.", "Ltd", "Ltd.", "LLC", "Group",
  "Bank", "University", "College", "Institute", "School", "Association", "Foundation", "Agency",
  "Department", "Ministry", "Council", "Committee", "Commission", "Party", "Times", "Post",
  "News", "Airlines", "Motors", "Systems", "Technologies", "Labs", "Club", "Society", "Union",
  "Organization", "Organisation", "Court", "Army", "Navy", "Press",
];

/// Words marking a facility name
const FACILITY_HEADS: &[&str] = &[
  "Airport", "Bridge", "Tower", "Stadium", "Hospital", "Museum", "Station", "Hotel", "Center",
  "Centre", "Building", "Palace", "Cathedral", "Church", "Temple", "Library", "Hall", "Park",
  "Street", "Avenue", "Square",
];

/// Words marking a natural location
const LOCATION_HEADS: &[&str] = &[
  "River", "Lake", "Mount", "Mt.", "Mountain", "Mountains", "Ocean", "Sea", "Bay", "Island",
  "Islands", "Valley", "Desert", "Forest", "Canyon", "Gulf", "Peninsula", "Coast", "Falls",
];

/// Prepositions after which a lone name is read as a place
const LOCATIVE_PREPOSITIONS: &[&str] = &["in", "at", "from", "to", "near", "into", "across", "throughout"];

/// Named-entity chunker
///
/// - Stateless apart from the shared resources
/// - `Clone + Send + Sync`
#[derive(Debug, Clone)]
pub struct EntityChunker {
  resources: Arc<Resources>,
}

impl EntityChunker {
  /// Constructs a chunker from loaded resources
  pub fn new(resources: Arc<Resources>) -> Self {
    Self { resources }
  }

  /// Chunks the tagged tokens of one sentence
  ///
  /// The leaves of the returned nodes are exactly `tokens`, in order.
  pub fn chunk(&self, tokens: &[TaggedToken]) -> Vec<ChunkNode> {
    let n = tokens.len();
    let mut nodes = Vec::with_capacity(n);
    let mut i = 0;

    while i < n {
      if !self.is_name_token(&tokens[i]) {
        nodes.push(ChunkNode::Token(tokens[i].clone()));
        i += 1;
        continue;
      }

      let mut end = self.run_end(tokens, i);

      // "Bank of America", "Gulf of Mexico"
      while end + 1 < n
        && tokens[end].word == "of"
        && self.is_name_token(&tokens[end + 1])
        && is_joining_head(&tokens[end - 1].word)
      {
        end = self.run_end(tokens, end + 1);
      }

      let preceding = tokens[..i].last().map(|t| t.word.to_lowercase());
      self.label_run(&tokens[i..end], preceding.as_deref(), &mut nodes);
      i = end;
    }

    debug!(
      tokens = n,
      entities = nodes.iter().filter(|node| node.label().is_some()).count(),
      "Entity chunking completed"
    );

    nodes
  }

  /// End (exclusive) of the run of name tokens starting at `start`
  fn run_end(&self, tokens: &[TaggedToken], start: usize) -> usize {
    let mut end = start;
    while end < tokens.len() && self.is_name_token(&tokens[end]) {
      end += 1;
    }
    end
  }

  /// `true` if the token can be part of an entity span
  fn is_name_token(&self, token: &TaggedToken) -> bool {
    let word = token.word.as_str();

    if token.tag.is_proper_noun() {
      return !TEMPORAL.contains(&word);
    }

    // Demonym adjectives: "American", "French"
    token.tag.is_adjective()
      && word.chars().next().is_some_and(char::is_uppercase)
      && matches!(
        self.resources.gazetteer.get(word),
        Some(EntityLabel::Gpe | EntityLabel::Gsp)
      )
  }

  /// Labels one run of name tokens and pushes the resulting nodes
  fn label_run(&self, run: &[TaggedToken], preceding: Option<&str>, nodes: &mut Vec<ChunkNode>) {
    // Titles stay outside the span and make it a person
    let titles = run.iter().take_while(|t| TITLES.contains(&t.word.as_str())).count();
    nodes.extend(run[..titles].iter().cloned().map(ChunkNode::Token));

    let span = &run[titles..];
    if span.is_empty() {
      return;
    }

    if titles > 0 {
      nodes.push(entity(EntityLabel::Person, span));
      return;
    }

    if let Some(label) = self.whole_span_label(span) {
      nodes.push(entity(label, span));
      return;
    }

    // Known non-person names inside a longer run become their own entities
    let mut pending = 0;
    let mut j = 0;
    while j < span.len() {
      match self.longest_known_place_or_org(&span[j..]) {
        Some((len, label)) => {
          if pending < j {
            let before = if pending == 0 { preceding } else { None };
            nodes.push(entity(self.fallback_label(&span[pending..j], before), &span[pending..j]));
          }
          nodes.push(entity(label, &span[j..j + len]));
          j += len;
          pending = j;
        }
        None => j += 1,
      }
    }

    if pending < span.len() {
      let before = if pending == 0 { preceding } else { None };
      let rest = &span[pending..];
      nodes.push(entity(self.fallback_label(rest, before), rest));
    }
  }

  /// Label decided by the span as a whole, if any
  ///
  /// Gazetteer hit, then head words, then a leading given name.
  fn whole_span_label(&self, span: &[TaggedToken]) -> Option<EntityLabel> {
    let name = join_words(span);
    if let Some(label) = self.resources.gazetteer.get(&name) {
      return Some(*label);
    }

    let has_head = |heads: &[&str]| span.iter().any(|t| heads.contains(&t.word.as_str()));
    if has_head(ORGANIZATION_HEADS) {
      return Some(EntityLabel::Organization);
    }
    if has_head(FACILITY_HEADS) {
      return Some(EntityLabel::Facility);
    }
    if has_head(LOCATION_HEADS) {
      return Some(EntityLabel::Location);
    }

    if self.resources.first_names.contains(span[0].word.as_str()) {
      return Some(EntityLabel::Person);
    }

    None
  }

  /// Longest gazetteer entry at the start of `span` that is not a person
  fn longest_known_place_or_org(&self, span: &[TaggedToken]) -> Option<(usize, EntityLabel)> {
    (1..=span.len()).rev().find_map(|len| {
      self
        .resources
        .gazetteer
        .get(&join_words(&span[..len]))
        .filter(|label| **label != EntityLabel::Person)
        .map(|label| (len, *label))
    })
  }

  /// Label of a span nothing specific is known about
  fn fallback_label(&self, span: &[TaggedToken], preceding: Option<&str>) -> EntityLabel {
    if let [single] = span {
      if is_acronym(&single.word) {
        return EntityLabel::Organization;
      }
      if let Some(label) = self.resources.gazetteer.get(single.word.as_str()) {
        return *label;
      }
      // Brand-style names: "SpaceX", "YouTube"
      let word = single.word.as_str();
      if is_camel_case(word) && !self.resources.first_names.contains(word) {
        return EntityLabel::Organization;
      }
      if preceding.is_some_and(|word| LOCATIVE_PREPOSITIONS.contains(&word)) {
        return EntityLabel::Gpe;
      }
    }

    EntityLabel::Person
  }
}

fn entity(label: EntityLabel, tokens: &[TaggedToken]) -> ChunkNode {
  ChunkNode::Entity {
    label,
    tokens: tokens.to_vec(),
  }
}

fn join_words(tokens: &[TaggedToken]) -> String {
  tokens.iter().map(|t| t.word.as_str()).collect::<Vec<_>>().join(" ")
}

/// Head words that may be followed by "of" inside one name
fn is_joining_head(word: &str) -> bool {
  ORGANIZATION_HEADS.contains(&word)
    || LOCATION_HEADS.contains(&word)
    || FACILITY_HEADS.contains(&word)
}

/// "NASA", "U.N.", "AT&T"
fn is_acronym(word: &str) -> bool {
  let letters = word.chars().filter(|c| c.is_alphabetic()).count();
  letters >= 2
    && word
      .chars()
      .all(|c| (c.is_alphabetic() && c.is_uppercase()) || matches!(c, '.' | '&'))
}

/// Capitalised word with an inner capital after a lowercase letter
///
/// Celtic surname prefixes (`McCain`, `MacArthur`, `O'Brien`) are not brand names.
fn is_camel_case(word: &str) -> bool {
  if word.starts_with("Mc") || word.starts_with("Mac") || word.contains('\'') {
    return false;
  }

  let mut chars = word.chars();
  if !chars.next().is_some_and(char::is_uppercase) {
    return false;
  }

  let mut after_lower = false;
  for c in chars {
    if c.is_uppercase() && after_lower {
      return true;
    }
    after_lower = c.is_lowercase();
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::PosTag;

  fn chunker() -> EntityChunker {
    EntityChunker::new(Arc::new(Resources::embedded().unwrap()))
  }

  fn tagged(pairs: &[(&str, PosTag)]) -> Vec<TaggedToken> {
    pairs.iter().map(|(w, t)| TaggedToken::new(*w, *t)).collect()
  }

  fn entities(nodes: &[ChunkNode]) -> Vec<(String, EntityLabel)> {
    nodes
      .iter()
      .filter_map(|node| node.label().map(|label| (join_words(node.leaves()), label)))
      .collect()
  }

  #[test]
  fn person_and_place() {
    let tokens = tagged(&[
      ("Barack", PosTag::Nnp),
      ("Obama", PosTag::Nnp),
      ("visited", PosTag::Vbd),
      ("Paris", PosTag::Nnp),
      (".", PosTag::Period),
    ]);
    let nodes = chunker().chunk(&tokens);

    assert_eq!(
      entities(&nodes),
      vec![
        ("Barack Obama".to_string(), EntityLabel::Person),
        ("Paris".to_string(), EntityLabel::Gpe),
      ]
    );
  }

  #[test]
  fn title_stays_outside_and_forces_person() {
    let tokens = tagged(&[
      ("Dr.", PosTag::Nnp),
      ("Smith", PosTag::Nnp),
      ("went", PosTag::Vbd),
      ("to", PosTag::To),
      ("Washington", PosTag::Nnp),
      (".", PosTag::Period),
    ]);
    let nodes = chunker().chunk(&tokens);

    assert_eq!(nodes[0], ChunkNode::Token(TaggedToken::new("Dr.", PosTag::Nnp)));
    assert_eq!(
      entities(&nodes),
      vec![
        ("Smith".to_string(), EntityLabel::Person),
        ("Washington".to_string(), EntityLabel::Gpe),
      ]
    );
  }

  #[test]
  fn of_joins_organisation_names() {
    let tokens = tagged(&[
      ("She", PosTag::Prp),
      ("joined", PosTag::Vbd),
      ("Bank", PosTag::Nnp),
      ("of", PosTag::In),
      ("Zembla", PosTag::Nnp),
    ]);
    let nodes = chunker().chunk(&tokens);
    assert_eq!(
      entities(&nodes),
      vec![("Bank of Zembla".to_string(), EntityLabel::Organization)]
    );
  }

  #[test]
  fn head_words_label_unknown_names() {
    let tokens = tagged(&[("Zorblat", PosTag::Nnp), ("River", PosTag::Nnp)]);
    assert_eq!(
      entities(&chunker().chunk(&tokens)),
      vec![("Zorblat River".to_string(), EntityLabel::Location)]
    );

    let tokens = tagged(&[("Quux", PosTag::Nnp), ("Airport", PosTag::Nnp)]);
    assert_eq!(
      entities(&chunker().chunk(&tokens)),
      vec![("Quux Airport".to_string(), EntityLabel::Facility)]
    );
  }

  #[test]
  fn acronyms_and_locatives() {
    let tokens = tagged(&[
      ("XYZQ", PosTag::Nnp),
      ("opened", PosTag::Vbd),
      ("in", PosTag::In),
      ("Zembla", PosTag::Nnp),
    ]);
    assert_eq!(
      entities(&chunker().chunk(&tokens)),
      vec![
        ("XYZQ".to_string(), EntityLabel::Organization),
        ("Zembla".to_string(), EntityLabel::Gpe),
      ]
    );
  }

  #[test]
  fn months_are_not_entities() {
    let tokens = tagged(&[("In", PosTag::In), ("March", PosTag::Nnp), ("it", PosTag::Prp)]);
    assert!(entities(&chunker().chunk(&tokens)).is_empty());
  }

  #[test]
  fn leaves_cover_all_tokens() {
    let tokens = tagged(&[
      ("Mr.", PosTag::Nnp),
      ("Zed", PosTag::Nnp),
      ("met", PosTag::Vbd),
      ("Google", PosTag::Nnp),
      ("staff", PosTag::Nn),
    ]);
    let nodes = chunker().chunk(&tokens);
    let leaves: Vec<TaggedToken> = nodes.iter().flat_map(|n| n.leaves().to_vec()).collect();
    assert_eq!(leaves, tokens);
  }

  #[test]
  fn known_organisation_splits_from_unknown_name() {
    let tokens = tagged(&[("Google", PosTag::Nnp), ("Zed", PosTag::Nnp), ("Quux", PosTag::Nnp)]);
    assert_eq!(
      entities(&chunker().chunk(&tokens)),
      vec![
        ("Google".to_string(), EntityLabel::Organization),
        ("Zed Quux".to_string(), EntityLabel::Person),
      ]
    );
  }

  #[test]
  fn single_camel_case_name_is_organisation() {
    let tokens = tagged(&[
      ("Elon", PosTag::Nnp),
      ("Musk", PosTag::Nnp),
      ("founded", PosTag::Vbd),
      ("SpaceX", PosTag::Nnp),
      (".", PosTag::Period),
    ]);
    assert_eq!(
      entities(&chunker().chunk(&tokens)),
      vec![
        ("Elon Musk".to_string(), EntityLabel::Person),
        ("SpaceX".to_string(), EntityLabel::Organization),
      ]
    );
  }

  #[test]
  fn camel_case_detection() {
    assert!(is_camel_case("SpaceX"));
    assert!(is_camel_case("YouTube"));
    assert!(!is_camel_case("McCain"));
    assert!(!is_camel_case("MacArthur"));
    assert!(!is_camel_case("O'Brien"));
    assert!(!is_camel_case("Paris"));
    assert!(!is_camel_case("NASA"));
    assert!(!is_camel_case("iPhone"));
  }

  #[test]
  fn acronym_detection() {
    assert!(is_acronym("NASA"));
    assert!(is_acronym("U.N."));
    assert!(is_acronym("AT&T"));
    assert!(!is_acronym("A"));
    assert!(!is_acronym("Paris"));
  }
}
