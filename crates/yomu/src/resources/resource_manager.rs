//! Resource Management Module
//!
//! Manages loading of the toolkit's data assets: the abbreviation list used by the
//! sentence splitter, the tagger lexicon and the chunker's name lists.
//! Every asset is embedded in the crate, so the toolkit works without any download.
//! A local data directory can extend the embedded assets: a file with the same name
//! is parsed after the embedded one and its entries win.
//! Assets are loaded once; there is no reload at runtime.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::errors::error_definition::ResourceError;
use crate::models::{EntityLabel, PosTag};

/// File name of the abbreviation list
pub const ABBREVIATIONS_FILE: &str = "abbreviations.txt";
/// File name of the tagger lexicon
pub const LEXICON_FILE: &str = "lexicon.tsv";
/// File name of the given-name list
pub const FIRST_NAMES_FILE: &str = "first_names.txt";
/// File name of the gazetteer
pub const GAZETTEER_FILE: &str = "gazetteer.tsv";

const EMBEDDED_ABBREVIATIONS: &str = include_str!("../../data/abbreviations.txt");
const EMBEDDED_LEXICON: &str = include_str!("../../data/lexicon.tsv");
const EMBEDDED_FIRST_NAMES: &str = include_str!("../../data/first_names.txt");
const EMBEDDED_GAZETTEER: &str = include_str!("../../data/gazetteer.tsv");

/// Parsed toolkit resources
///
/// Immutable once loaded; shared between components through `Arc`.
#[derive(Debug, Default)]
pub struct Resources {
  /// Lowercase abbreviations without their final period (`"dr"`, `"e.g"`)
  pub abbreviations: HashSet<String>,
  /// Word → allowed tags, the first one being the default
  pub lexicon: HashMap<String, Vec<PosTag>>,
  /// Given names
  pub first_names: HashSet<String>,
  /// Known name (possibly multi-word) → entity label
  pub gazetteer: HashMap<String, EntityLabel>,
}

impl Resources {
  /// Parses the embedded resources only
  pub fn embedded() -> Result<Self, ResourceError> {
    let mut resources = Self::default();
    resources.extend_abbreviations(ABBREVIATIONS_FILE, EMBEDDED_ABBREVIATIONS)?;
    resources.extend_lexicon(LEXICON_FILE, EMBEDDED_LEXICON)?;
    resources.extend_first_names(FIRST_NAMES_FILE, EMBEDDED_FIRST_NAMES)?;
    resources.extend_gazetteer(GAZETTEER_FILE, EMBEDDED_GAZETTEER)?;
    Ok(resources)
  }

  /// Adds abbreviations, one per line
  pub fn extend_abbreviations(&mut self, file: &str, content: &str) -> Result<(), ResourceError> {
    for (_, line) in entries(content) {
      let abbreviation = line.trim_end_matches('.').to_lowercase();
      self.abbreviations.insert(abbreviation);
    }
    debug!(file, count = self.abbreviations.len(), "Abbreviations loaded");
    Ok(())
  }

  /// Adds lexicon entries (`word<TAB>TAG[ TAG...]`); an existing word is replaced
  pub fn extend_lexicon(&mut self, file: &str, content: &str) -> Result<(), ResourceError> {
    for (line_no, line) in entries(content) {
      let (word, tags) = split_columns(file, line_no, line)?;

      let tags = tags
        .split_whitespace()
        .map(|tag| {
          tag.parse::<PosTag>().map_err(|e| ResourceError::Malformed {
            file: file.to_string(),
            line: line_no,
            reason: e.to_string(),
          })
        })
        .collect::<Result<Vec<_>, _>>()?;

      if tags.is_empty() {
        return Err(ResourceError::Malformed {
          file: file.to_string(),
          line: line_no,
          reason: "no tag given".to_string(),
        });
      }

      self.lexicon.insert(word.to_string(), tags);
    }
    debug!(file, count = self.lexicon.len(), "Lexicon loaded");
    Ok(())
  }

  /// Adds given names, one per line
  pub fn extend_first_names(&mut self, file: &str, content: &str) -> Result<(), ResourceError> {
    for (_, line) in entries(content) {
      self.first_names.insert(line.to_string());
    }
    debug!(file, count = self.first_names.len(), "Given names loaded");
    Ok(())
  }

  /// Adds gazetteer entries (`name<TAB>LABEL`); an existing name is relabelled
  pub fn extend_gazetteer(&mut self, file: &str, content: &str) -> Result<(), ResourceError> {
    for (line_no, line) in entries(content) {
      let (name, label) = split_columns(file, line_no, line)?;
      let label = label.trim().parse::<EntityLabel>().map_err(|e| ResourceError::Malformed {
        file: file.to_string(),
        line: line_no,
        reason: e.to_string(),
      })?;
      self.gazetteer.insert(name.to_string(), label);
    }
    debug!(file, count = self.gazetteer.len(), "Gazetteer loaded");
    Ok(())
  }

  /// Returns the allowed tags of `word` (exact match)
  pub fn tags_of(&self, word: &str) -> Option<&[PosTag]> {
    self.lexicon.get(word).map(Vec::as_slice)
  }

  /// `true` if `word` (without its final period) is a known abbreviation
  pub fn is_abbreviation(&self, word: &str) -> bool {
    let word = word.trim_end_matches('.');
    !word.is_empty() && self.abbreviations.contains(&word.to_lowercase())
  }
}

/// Iterates over meaningful lines with their 1-based line numbers
///
/// Blank lines and `#` comments are skipped.
fn entries(content: &str) -> impl Iterator<Item = (usize, &str)> {
  content
    .lines()
    .enumerate()
    .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
    .filter(|(_, line)| {
      let trimmed = line.trim();
      !trimmed.is_empty() && !trimmed.starts_with('#')
    })
}

/// Splits a `key<TAB>value` line
fn split_columns<'a>(
  file: &str,
  line_no: usize,
  line: &'a str,
) -> Result<(&'a str, &'a str), ResourceError> {
  match line.split_once('\t') {
    Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
      Ok((key.trim(), value))
    }
    _ => Err(ResourceError::Malformed {
      file: file.to_string(),
      line: line_no,
      reason: "expected two tab-separated columns".to_string(),
    }),
  }
}

/// Resource manager
///
/// Loads [`Resources`] on the first [`load`](Self::load) call and hands out clones of the
/// same `Arc` afterwards.
pub struct ResourceManager {
  /// Directory whose files extend the embedded resources (`None`: embedded only)
  data_dir: Option<PathBuf>,

  /// Cache of the loaded resources (initialized once on the first load)
  /// ResourceError implements Clone so the Result itself can be cached
  resources: OnceLock<Result<Arc<Resources>, ResourceError>>,
}

impl ResourceManager {
  /// Resource manager using only the embedded resources
  pub fn embedded() -> Self {
    Self {
      data_dir: None,
      resources: OnceLock::new(),
    }
  }

  /// Resource manager extending the embedded resources from `path`
  ///
  /// # Errors
  /// `path` is not an existing directory
  pub fn with_data_dir<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_dir() {
      return Err(ResourceError::InvalidDataDir(path));
    }

    Ok(Self {
      data_dir: Some(path),
      resources: OnceLock::new(),
    })
  }

  /// Resource manager using the OS data directory (see [`default_data_dir`])
  ///
  /// A missing directory is not an error: only the embedded resources are used then.
  pub fn with_default_dir() -> Result<Self, ResourceError> {
    let dir = default_data_dir()?;

    if dir.is_dir() {
      Self::with_data_dir(dir)
    } else {
      debug!(path = %dir.display(), "No local resource directory, using embedded resources");
      Ok(Self::embedded())
    }
  }

  /// Returns the data directory, if any
  pub fn data_dir(&self) -> Option<&Path> {
    self.data_dir.as_deref()
  }

  /// Load resources
  /// - Parses the embedded files and the data directory on the first call
  /// - Returns a clone of `Arc<Resources>` from the second call onwards
  /// - If an error occurs on the first call, caches the error and keeps returning it
  pub fn load(&self) -> Result<Arc<Resources>, ResourceError> {
    self.resources.get_or_init(|| self.load_inner().map(Arc::new)).clone()
  }

  fn load_inner(&self) -> Result<Resources, ResourceError> {
    let mut resources = Resources::embedded()?;

    if let Some(dir) = &self.data_dir {
      if let Some(content) = read_optional(dir, ABBREVIATIONS_FILE)? {
        resources.extend_abbreviations(ABBREVIATIONS_FILE, &content)?;
      }
      if let Some(content) = read_optional(dir, LEXICON_FILE)? {
        resources.extend_lexicon(LEXICON_FILE, &content)?;
      }
      if let Some(content) = read_optional(dir, FIRST_NAMES_FILE)? {
        resources.extend_first_names(FIRST_NAMES_FILE, &content)?;
      }
      if let Some(content) = read_optional(dir, GAZETTEER_FILE)? {
        resources.extend_gazetteer(GAZETTEER_FILE, &content)?;
      }
    }

    info!(
      data_dir = ?self.data_dir,
      abbreviations = resources.abbreviations.len(),
      lexicon = resources.lexicon.len(),
      first_names = resources.first_names.len(),
      gazetteer = resources.gazetteer.len(),
      "Resources loaded"
    );

    Ok(resources)
  }
}

/// Reads `dir/file` if it exists
fn read_optional(dir: &Path, file: &str) -> Result<Option<String>, ResourceError> {
  let path = dir.join(file);
  if !path.is_file() {
    return Ok(None);
  }

  std::fs::read_to_string(&path).map(Some).map_err(|e| ResourceError::Read {
    path,
    source: Arc::new(e),
  })
}

/// Returns the default data directory path according to the OS
///
/// | OS      | Example Path                                   |
/// |---------|------------------------------------------------|
/// | Linux   | `~/.local/share/yomu`                          |
/// | macOS   | `~/Library/Application Support/yomu`           |
/// | Windows | `C:\Users\{user}\AppData\Roaming\yomu`         |
pub fn default_data_dir() -> Result<PathBuf, ResourceError> {
  let base = dirs::data_dir().ok_or(ResourceError::DataDirNotFound)?;

  Ok(base.join("yomu"))
}

impl fmt::Debug for ResourceManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResourceManager")
      .field("data_dir", &self.data_dir)
      .field("resources_initialized", &self.resources.get().is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn embedded_resources_parse() {
    let resources = Resources::embedded().expect("embedded resources must parse");

    assert!(resources.is_abbreviation("Dr."));
    assert!(resources.is_abbreviation("e.g."));
    assert!(!resources.is_abbreviation("Washington."));
    assert_eq!(resources.tags_of("the"), Some(&[PosTag::Dt][..]));
    assert!(resources.first_names.contains("Barack"));
    assert_eq!(resources.gazetteer.get("Paris"), Some(&EntityLabel::Gpe));
    assert_eq!(resources.gazetteer.get("United Nations"), Some(&EntityLabel::Organization));
  }

  #[test]
  fn lexicon_rejects_unknown_tag() {
    let mut resources = Resources::default();
    let err = resources.extend_lexicon("lexicon.tsv", "# header\nfoo\tNN\nbar\tXX\n").unwrap_err();

    match err {
      ResourceError::Malformed { file, line, .. } => {
        assert_eq!(file, "lexicon.tsv");
        assert_eq!(line, 3);
      }
      other => panic!("expected Malformed, got {other:?}"),
    }
  }

  #[test]
  fn lexicon_rejects_missing_column() {
    let mut resources = Resources::default();
    let err = resources.extend_lexicon("lexicon.tsv", "lonely\n").unwrap_err();
    assert!(matches!(err, ResourceError::Malformed { line: 1, .. }));
  }

  #[test]
  fn gazetteer_rejects_unknown_label() {
    let mut resources = Resources::default();
    let err = resources.extend_gazetteer("gazetteer.tsv", "Atlantis\tCITY\n").unwrap_err();
    assert!(matches!(err, ResourceError::Malformed { line: 1, .. }));
  }

  #[test]
  fn with_data_dir_rejects_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let err = ResourceManager::with_data_dir(&missing).unwrap_err();
    assert!(matches!(err, ResourceError::InvalidDataDir(p) if p == missing));
  }

  #[test]
  fn data_dir_files_extend_embedded_resources() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(GAZETTEER_FILE), "Gotham\tGPE\nParis\tPERSON\n").unwrap();
    std::fs::write(temp_dir.path().join(LEXICON_FILE), "grok\tVB VBP\n").unwrap();

    let manager = ResourceManager::with_data_dir(temp_dir.path()).unwrap();
    let resources = manager.load().unwrap();

    assert_eq!(resources.gazetteer.get("Gotham"), Some(&EntityLabel::Gpe));
    // later entries win
    assert_eq!(resources.gazetteer.get("Paris"), Some(&EntityLabel::Person));
    assert_eq!(resources.tags_of("grok"), Some(&[PosTag::Vb, PosTag::Vbp][..]));
    // embedded entries are still present
    assert!(resources.tags_of("cat").is_some());
  }

  #[test]
  fn load_is_cached() {
    let manager = ResourceManager::embedded();
    let first = manager.load().unwrap();
    let second = manager.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
  }

  #[test]
  fn load_caches_errors() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(FIRST_NAMES_FILE), "Ann\n").unwrap();
    std::fs::write(temp_dir.path().join(LEXICON_FILE), "broken\n").unwrap();

    let manager = ResourceManager::with_data_dir(temp_dir.path()).unwrap();
    assert!(manager.load().is_err());

    // Even after fixing the file, the cached error is returned
    std::fs::write(temp_dir.path().join(LEXICON_FILE), "fixed\tNN\n").unwrap();
    assert!(manager.load().is_err());
  }
}
