//! Data Model Definition
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TaggerError;

/// Penn Treebank part-of-speech tag
///
/// Covers the 36 word tags plus the punctuation tags produced by the Treebank tokenizer.
/// Serialized as the Treebank string (`"NN"`, `"PRP$"`, `"."`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum PosTag {
  /// Coordinating conjunction
  Cc,
  /// Cardinal number
  Cd,
  /// Determiner
  Dt,
  /// Existential there
  Ex,
  /// Foreign word
  Fw,
  /// Preposition or subordinating conjunction
  In,
  /// Adjective
  Jj,
  /// Adjective, comparative
  Jjr,
  /// Adjective, superlative
  Jjs,
  /// List item marker
  Ls,
  /// Modal
  Md,
  /// Noun, singular or mass
  Nn,
  /// Noun, plural
  Nns,
  /// Proper noun, singular
  Nnp,
  /// Proper noun, plural
  Nnps,
  /// Predeterminer
  Pdt,
  /// Possessive ending
  Pos,
  /// Personal pronoun
  Prp,
  /// Possessive pronoun
  PrpPoss,
  /// Adverb
  Rb,
  /// Adverb, comparative
  Rbr,
  /// Adverb, superlative
  Rbs,
  /// Particle
  Rp,
  /// Symbol
  Sym,
  /// to
  To,
  /// Interjection
  Uh,
  /// Verb, base form
  Vb,
  /// Verb, past tense
  Vbd,
  /// Verb, gerund or present participle
  Vbg,
  /// Verb, past participle
  Vbn,
  /// Verb, non-3rd person singular present
  Vbp,
  /// Verb, 3rd person singular present
  Vbz,
  /// Wh-determiner
  Wdt,
  /// Wh-pronoun
  Wp,
  /// Possessive wh-pronoun
  WpPoss,
  /// Wh-adverb
  Wrb,
  /// Dollar sign
  Dollar,
  /// Pound sign
  Hash,
  /// Opening quotation mark
  OpenQuote,
  /// Closing quotation mark
  CloseQuote,
  /// Opening bracket
  OpenParen,
  /// Closing bracket
  CloseParen,
  /// Comma
  Comma,
  /// Sentence-final punctuation
  Period,
  /// Colon, semicolon, dash, ellipsis
  Colon,
}

impl PosTag {
  /// Every tag, in declaration order
  pub const ALL: [PosTag; 45] = [
    PosTag::Cc,
    PosTag::Cd,
    PosTag::Dt,
    PosTag::Ex,
    PosTag::Fw,
    PosTag::In,
    PosTag::Jj,
    PosTag::Jjr,
    PosTag::Jjs,
    PosTag::Ls,
    PosTag::Md,
    PosTag::Nn,
    PosTag::Nns,
    PosTag::Nnp,
    PosTag::Nnps,
    PosTag::Pdt,
    PosTag::Pos,
    PosTag::Prp,
    PosTag::PrpPoss,
    PosTag::Rb,
    PosTag::Rbr,
    PosTag::Rbs,
    PosTag::Rp,
    PosTag::Sym,
    PosTag::To,
    PosTag::Uh,
    PosTag::Vb,
    PosTag::Vbd,
    PosTag::Vbg,
    PosTag::Vbn,
    PosTag::Vbp,
    PosTag::Vbz,
    PosTag::Wdt,
    PosTag::Wp,
    PosTag::WpPoss,
    PosTag::Wrb,
    PosTag::Dollar,
    PosTag::Hash,
    PosTag::OpenQuote,
    PosTag::CloseQuote,
    PosTag::OpenParen,
    PosTag::CloseParen,
    PosTag::Comma,
    PosTag::Period,
    PosTag::Colon,
  ];

  /// Returns the Treebank string of the tag
  pub fn as_str(&self) -> &'static str {
    match self {
      PosTag::Cc => "CC",
      PosTag::Cd => "CD",
      PosTag::Dt => "DT",
      PosTag::Ex => "EX",
      PosTag::Fw => "FW",
      PosTag::In => "IN",
      PosTag::Jj => "JJ",
      PosTag::Jjr => "JJR",
      PosTag::Jjs => "JJS",
      PosTag::Ls => "LS",
      PosTag::Md => "MD",
      PosTag::Nn => "NN",
      PosTag::Nns => "NNS",
      PosTag::Nnp => "NNP",
      PosTag::Nnps => "NNPS",
      PosTag::Pdt => "PDT",
      PosTag::Pos => "POS",
      PosTag::Prp => "PRP",
      PosTag::PrpPoss => "PRP$",
      PosTag::Rb => "RB",
      PosTag::Rbr => "RBR",
      PosTag::Rbs => "RBS",
      PosTag::Rp => "RP",
      PosTag::Sym => "SYM",
      PosTag::To => "TO",
      PosTag::Uh => "UH",
      PosTag::Vb => "VB",
      PosTag::Vbd => "VBD",
      PosTag::Vbg => "VBG",
      PosTag::Vbn => "VBN",
      PosTag::Vbp => "VBP",
      PosTag::Vbz => "VBZ",
      PosTag::Wdt => "WDT",
      PosTag::Wp => "WP",
      PosTag::WpPoss => "WP$",
      PosTag::Wrb => "WRB",
      PosTag::Dollar => "$",
      PosTag::Hash => "#",
      PosTag::OpenQuote => "``",
      PosTag::CloseQuote => "''",
      PosTag::OpenParen => "(",
      PosTag::CloseParen => ")",
      PosTag::Comma => ",",
      PosTag::Period => ".",
      PosTag::Colon => ":",
    }
  }

  /// `NN`, `NNS`, `NNP`, `NNPS`
  pub fn is_noun(&self) -> bool {
    matches!(self, PosTag::Nn | PosTag::Nns | PosTag::Nnp | PosTag::Nnps)
  }

  /// `NNP`, `NNPS`
  pub fn is_proper_noun(&self) -> bool {
    matches!(self, PosTag::Nnp | PosTag::Nnps)
  }

  /// Any `VB*` tag
  pub fn is_verb(&self) -> bool {
    matches!(
      self,
      PosTag::Vb | PosTag::Vbd | PosTag::Vbg | PosTag::Vbn | PosTag::Vbp | PosTag::Vbz
    )
  }

  /// Any `JJ*` tag
  pub fn is_adjective(&self) -> bool {
    matches!(self, PosTag::Jj | PosTag::Jjr | PosTag::Jjs)
  }
}

impl fmt::Display for PosTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PosTag {
  type Err = TaggerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    PosTag::ALL
      .iter()
      .copied()
      .find(|tag| tag.as_str() == s)
      .ok_or_else(|| TaggerError::UnknownTag(s.to_string()))
  }
}

impl From<PosTag> for &'static str {
  fn from(tag: PosTag) -> Self {
    tag.as_str()
  }
}

impl TryFrom<String> for PosTag {
  type Error = TaggerError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

/// A word paired with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
  /// Surface form
  pub word: String,
  /// Assigned tag
  pub tag: PosTag,
}

impl TaggedToken {
  /// Constructor for TaggedToken
  pub fn new(word: impl Into<String>, tag: PosTag) -> Self {
    Self {
      word: word.into(),
      tag,
    }
  }
}

/// Label of a named-entity chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
  /// People, including fictional
  Person,
  /// Companies, agencies, institutions
  Organization,
  /// Geo-political entity: countries, cities, states
  Gpe,
  /// Non-GPE locations: mountains, bodies of water, regions
  Location,
  /// Buildings, airports, bridges
  Facility,
  /// Geo-socio-political groups
  Gsp,
}

impl EntityLabel {
  /// Returns the label string used in chunker output
  pub fn as_str(&self) -> &'static str {
    match self {
      EntityLabel::Person => "PERSON",
      EntityLabel::Organization => "ORGANIZATION",
      EntityLabel::Gpe => "GPE",
      EntityLabel::Location => "LOCATION",
      EntityLabel::Facility => "FACILITY",
      EntityLabel::Gsp => "GSP",
    }
  }
}

impl fmt::Display for EntityLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EntityLabel {
  type Err = TaggerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "PERSON" => Ok(EntityLabel::Person),
      "ORGANIZATION" => Ok(EntityLabel::Organization),
      "GPE" => Ok(EntityLabel::Gpe),
      "LOCATION" => Ok(EntityLabel::Location),
      "FACILITY" => Ok(EntityLabel::Facility),
      "GSP" => Ok(EntityLabel::Gsp),
      other => Err(TaggerError::UnknownLabel(other.to_string())),
    }
  }
}

/// One node of the named-entity chunk tree
///
/// The chunker output is a flat sequence of nodes under an implicit root:
/// tokens outside any entity stay as leaves, entity spans become labelled subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChunkNode {
  /// Token that belongs to no entity
  Token(TaggedToken),
  /// Labelled entity subtree
  Entity {
    /// Entity type
    label: EntityLabel,
    /// Tokens covered by the entity, in order
    tokens: Vec<TaggedToken>,
  },
}

impl ChunkNode {
  /// Returns the label if this node is an entity subtree
  pub fn label(&self) -> Option<EntityLabel> {
    match self {
      ChunkNode::Token(_) => None,
      ChunkNode::Entity { label, .. } => Some(*label),
    }
  }

  /// Returns the tokens covered by this node
  pub fn leaves(&self) -> &[TaggedToken] {
    match self {
      ChunkNode::Token(token) => std::slice::from_ref(token),
      ChunkNode::Entity { tokens, .. } => tokens,
    }
  }

  /// Words of the covered tokens joined by a single space
  pub fn text(&self) -> String {
    self.leaves().iter().map(|t| t.word.as_str()).collect::<Vec<_>>().join(" ")
  }
}

/// VADER polarity scores
///
/// `neg`, `neu` and `pos` are proportions of the text and sum to about 1.0;
/// `compound` is the normalized sum of valences in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
  /// Negative proportion
  pub neg: f64,
  /// Neutral proportion
  pub neu: f64,
  /// Positive proportion
  pub pos: f64,
  /// Normalized compound score
  pub compound: f64,
}
