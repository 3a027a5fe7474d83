use serde::{Deserialize, Serialize};

use crate::file::File;

/// Source-map v3 payload as exchanged with the external code generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapData {
  #[serde(default = "default_version")]
  pub version: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_root: Option<String>,
  #[serde(default)]
  pub sources: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sources_content: Option<Vec<Option<String>>>,
  #[serde(default)]
  pub names: Vec<String>,
  #[serde(default)]
  pub mappings: String,
}

fn default_version() -> u32 {
  3
}

impl Default for SourceMapData {
  fn default() -> Self {
    Self {
      version: default_version(),
      file: None,
      source_root: None,
      sources: vec![],
      sources_content: None,
      names: vec![],
      mappings: String::new(),
    }
  }
}

/// Attach a freshly generated map onto `file`. When the file already carries
/// a map from an upstream step the new map wins at map granularity;
/// `sourcesContent` and `sourceRoot` from the old map are carried over when
/// the generator did not emit any.
pub fn apply_source_map(file: &mut File, mut map: SourceMapData) {
  if let Some(prev) = file.source_map.take() {
    if map.sources_content.is_none() && map.sources == prev.sources {
      map.sources_content = prev.sources_content;
    }
    if map.source_root.is_none() {
      map.source_root = prev.source_root;
    }
  }
  file.source_map = Some(map);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::file::FileContents;

  fn map_with(mappings: &str) -> SourceMapData {
    SourceMapData {
      sources: vec!["a.js".to_owned()],
      mappings: mappings.to_owned(),
      ..SourceMapData::default()
    }
  }

  #[test]
  fn parses_v3_json_keys() {
    let raw = r#"{
      "version": 3,
      "file": "out.js",
      "sourceRoot": "/src",
      "sources": ["a.js"],
      "sourcesContent": ["var a;"],
      "names": ["a"],
      "mappings": "AAAA"
    }"#;
    let map: SourceMapData = serde_json::from_str(raw).unwrap();
    assert_eq!(map.version, 3);
    assert_eq!(map.file.as_deref(), Some("out.js"));
    assert_eq!(map.source_root.as_deref(), Some("/src"));
    assert_eq!(map.sources_content, Some(vec![Some("var a;".to_owned())]));
    assert_eq!(map.mappings, "AAAA");
  }

  #[test]
  fn version_defaults_to_three() {
    let map: SourceMapData = serde_json::from_str(r#"{"mappings": ""}"#).unwrap();
    assert_eq!(map.version, 3);
  }

  #[test]
  fn apply_sets_map_on_bare_file() {
    let mut file = File::new("a.js", FileContents::Buffer(vec![]));
    apply_source_map(&mut file, map_with("AAAA"));
    assert_eq!(file.source_map.as_ref().unwrap().mappings, "AAAA");
  }

  #[test]
  fn new_map_wins_over_previous_one() {
    let mut file = File::new("a.js", FileContents::Buffer(vec![]));
    file.source_map = Some(map_with("AAAA"));
    apply_source_map(&mut file, map_with("BBBB"));
    assert_eq!(file.source_map.as_ref().unwrap().mappings, "BBBB");
  }

  #[test]
  fn carries_sources_content_forward_when_generator_dropped_it() {
    let mut file = File::new("a.js", FileContents::Buffer(vec![]));
    let mut prev = map_with("AAAA");
    prev.sources_content = Some(vec![Some("var a;".to_owned())]);
    file.source_map = Some(prev);

    apply_source_map(&mut file, map_with("BBBB"));
    let map = file.source_map.as_ref().unwrap();
    assert_eq!(map.sources_content, Some(vec![Some("var a;".to_owned())]));
  }

  #[test]
  fn keeps_new_sources_content_when_present() {
    let mut file = File::new("a.js", FileContents::Buffer(vec![]));
    let mut prev = map_with("AAAA");
    prev.sources_content = Some(vec![Some("old".to_owned())]);
    file.source_map = Some(prev);

    let mut next = map_with("BBBB");
    next.sources_content = Some(vec![Some("new".to_owned())]);
    apply_source_map(&mut file, next);
    assert_eq!(
      file.source_map.as_ref().unwrap().sources_content,
      Some(vec![Some("new".to_owned())])
    );
  }
}
